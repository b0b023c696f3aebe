//! Rule descriptors and the poster rule table.
//!
//! Each field maps to an ordered list of [`Rule`]s. A rule pairs a check
//! with the message shown when that check fails.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::core::fields;

/// Failure messages for the built-in rules.
pub mod messages {
    pub const REQUIRED: &str = "This field is required";
    pub const EMAIL: &str = "Enter a valid email address";
    pub const PHONE: &str = "Enter a valid phone number (e.g. (11) 99999-9999)";
    pub const PATTERN: &str = "Invalid format";
    pub const PHOTOS: &str = "Add at least one photo of the pet";
    pub const REWARD: &str = "Enter a valid reward amount";
    pub const DATETIME: &str = "Enter a valid date and time";
    pub const CUSTOM_FIELDS: &str =
        "Custom fields need a label (max 50 chars) and a value (max 200 chars)";

    pub fn min_length(min: usize) -> String {
        format!("Enter at least {} characters", min)
    }

    pub fn max_length(max: usize) -> String {
        format!("Enter at most {} characters", max)
    }
}

/// Phone numbers: optional `+55`, optional (parenthesized) area code,
/// optional mobile `9`, then 4+4 digits. Matched after removing whitespace.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+55\s?)?(?:\(?[1-9]{2}\)?\s?)?(?:9\s?)?[0-9]{4}[-\s]?[0-9]{4}$")
        .expect("phone pattern is valid")
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// `YYYY-MM-DDTHH:MM` (or with a space), optionally followed by seconds or
/// an offset, and exactly `DD/MM/YYYY HH:MM`.
pub static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}|\d{2}/\d{2}/\d{4}\s\d{2}:\d{2}$)")
        .expect("datetime pattern is valid")
});

/// Currencies accepted for a reward.
pub const REWARD_CURRENCIES: [&str; 2] = ["BRL", "USD"];

pub const CUSTOM_LABEL_MAX: usize = 50;
pub const CUSTOM_VALUE_MAX: usize = 200;

/// Predicate over a raw field value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What a rule checks.
#[derive(Clone)]
pub enum RuleKind {
    Required,
    Email,
    Phone,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Custom(Predicate),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => write!(f, "Required"),
            RuleKind::Email => write!(f, "Email"),
            RuleKind::Phone => write!(f, "Phone"),
            RuleKind::MinLength(n) => write!(f, "MinLength({})", n),
            RuleKind::MaxLength(n) => write!(f, "MaxLength({})", n),
            RuleKind::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            RuleKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A single check plus its failure message.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: String,
}

impl Rule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Rule {
            kind,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Rule::new(RuleKind::Required, messages::REQUIRED)
    }

    pub fn email() -> Self {
        Rule::new(RuleKind::Email, messages::EMAIL)
    }

    pub fn phone() -> Self {
        Rule::new(RuleKind::Phone, messages::PHONE)
    }

    pub fn min_length(min: usize) -> Self {
        Rule::new(RuleKind::MinLength(min), messages::min_length(min))
    }

    pub fn max_length(max: usize) -> Self {
        Rule::new(RuleKind::MaxLength(max), messages::max_length(max))
    }

    pub fn pattern(re: Regex, message: impl Into<String>) -> Self {
        Rule::new(RuleKind::Pattern(re), message)
    }

    pub fn custom<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Rule::new(RuleKind::Custom(Arc::new(predicate)), message)
    }

    /// Whether `value` satisfies this rule.
    pub fn check(&self, value: &Value) -> bool {
        match &self.kind {
            RuleKind::Required => is_present(value),
            RuleKind::Email => format_check(value, |s| EMAIL_RE.is_match(s.trim())),
            RuleKind::Phone => is_phone(value),
            RuleKind::MinLength(min) => format_check(value, |s| char_len(s) >= *min),
            RuleKind::MaxLength(max) => format_check(value, |s| char_len(s) <= *max),
            RuleKind::Pattern(re) => format_check(value, |s| re.is_match(s)),
            RuleKind::Custom(predicate) => predicate(value),
        }
    }
}

/// Presence check used by `required`.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        // JSON numbers are always finite.
        Value::Number(_) | Value::Bool(_) | Value::Object(_) => true,
    }
}

/// Format rules pass on empty input and only inspect text.
fn format_check(value: &Value, check: impl Fn(&str) -> bool) -> bool {
    match value {
        Value::String(s) if !s.is_empty() => check(s),
        _ => true,
    }
}

/// Phone is the one format rule that fails on empty input.
fn is_phone(value: &Value) -> bool {
    match value {
        Value::String(s) if !s.is_empty() => {
            let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            PHONE_RE.is_match(&compact)
        }
        _ => false,
    }
}

fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Non-empty list of photo references.
pub fn has_photos(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty())
}

/// Absent reward is fine; otherwise a positive amount in an accepted currency.
pub fn is_valid_reward(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(reward) => {
            let amount_ok = reward
                .get("amount")
                .and_then(Value::as_f64)
                .is_some_and(|amount| amount > 0.0);
            let currency_ok = reward
                .get("currency")
                .and_then(Value::as_str)
                .is_some_and(|code| REWARD_CURRENCIES.contains(&code));
            amount_ok && currency_ok
        }
        _ => false,
    }
}

/// Every pair has a non-empty bounded label and a bounded value.
pub fn are_valid_custom_fields(value: &Value) -> bool {
    let Value::Array(items) = value else {
        return true;
    };

    items.iter().all(|item| {
        let label = item.get("label").and_then(Value::as_str);
        let value = item.get("value").and_then(Value::as_str);
        match (label, value) {
            (Some(label), Some(value)) => {
                let label_len = char_len(label);
                label_len > 0 && label_len <= CUSTOM_LABEL_MAX && char_len(value) <= CUSTOM_VALUE_MAX
            }
            _ => false,
        }
    })
}

/// Ordered rules per field name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Vec<Rule>>,
}

impl RuleSet {
    /// An empty rule set: every field is valid.
    pub fn new() -> Self {
        RuleSet {
            rules: BTreeMap::new(),
        }
    }

    /// The rule table for the poster record.
    pub fn poster() -> Self {
        let mut set = RuleSet::new();

        set.insert(
            fields::PET_NAME,
            vec![Rule::required(), Rule::min_length(2), Rule::max_length(50)],
        );
        set.insert(
            fields::OWNER_NAME,
            vec![Rule::required(), Rule::min_length(2), Rule::max_length(100)],
        );
        set.insert(fields::CONTACT_PHONE, vec![Rule::required(), Rule::phone()]);
        set.insert(
            fields::LAST_SEEN_LOCATION,
            vec![Rule::required(), Rule::min_length(5), Rule::max_length(200)],
        );
        set.insert(
            fields::LAST_SEEN_DATE_TIME,
            vec![Rule::pattern(DATETIME_RE.clone(), messages::DATETIME)],
        );
        set.insert(fields::PET_DESCRIPTION, vec![Rule::max_length(500)]);
        set.insert(fields::ACCESSORIES, vec![Rule::max_length(200)]);
        set.insert(
            fields::REWARD,
            vec![Rule::custom(is_valid_reward, messages::REWARD)],
        );
        set.insert(
            fields::PHOTOS,
            vec![Rule::custom(has_photos, messages::PHOTOS)],
        );
        set.insert(
            fields::CUSTOM_FIELDS,
            vec![Rule::custom(are_valid_custom_fields, messages::CUSTOM_FIELDS)],
        );

        set
    }

    /// Set the rules for a field, replacing any existing ones.
    pub fn insert(&mut self, field: impl Into<String>, rules: Vec<Rule>) {
        self.rules.insert(field.into(), rules);
    }

    pub fn with(mut self, field: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.insert(field, rules);
        self
    }

    pub fn get(&self, field: &str) -> Option<&[Rule]> {
        self.rules.get(field).map(Vec::as_slice)
    }
}

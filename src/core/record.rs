//! The poster draft record.
//!
//! A [`Record`] is the flat set of fields a user fills in to build a
//! missing-pet poster. The field set is fixed; values are strings, an
//! optional reward, a list of photo references, or a list of custom
//! label/value pairs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Serialized field names, in declaration order.
pub mod fields {
    pub const PET_NAME: &str = "petName";
    pub const OWNER_NAME: &str = "ownerName";
    pub const CONTACT_PHONE: &str = "contactPhone";
    pub const LAST_SEEN_LOCATION: &str = "lastSeenLocation";
    pub const LAST_SEEN_DATE_TIME: &str = "lastSeenDateTime";
    pub const PET_DESCRIPTION: &str = "petDescription";
    pub const ACCESSORIES: &str = "accessories";
    pub const REWARD: &str = "reward";
    pub const PHOTOS: &str = "photos";
    pub const CUSTOM_FIELDS: &str = "customFields";

    /// Every field of a record.
    pub const ALL: [&str; 10] = [
        PET_NAME,
        OWNER_NAME,
        CONTACT_PHONE,
        LAST_SEEN_LOCATION,
        LAST_SEEN_DATE_TIME,
        PET_DESCRIPTION,
        ACCESSORIES,
        REWARD,
        PHOTOS,
        CUSTOM_FIELDS,
    ];

    /// Fields that hold plain text.
    pub const TEXT: [&str; 7] = [
        PET_NAME,
        OWNER_NAME,
        CONTACT_PHONE,
        LAST_SEEN_LOCATION,
        LAST_SEEN_DATE_TIME,
        PET_DESCRIPTION,
        ACCESSORIES,
    ];
}

/// Errors produced when mutating a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("invalid value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    #[error("{list} index {index} out of range (len {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

/// Reward currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Brl,
    Usd,
}

impl Currency {
    /// Currency code as stored.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            _ => Err(format!(
                "invalid currency '{}'; expected 'BRL' or 'USD'",
                s
            )),
        }
    }
}

/// Reward offered for the pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub amount: f64,
    pub currency: Currency,
}

impl Reward {
    /// A reward with a finite amount.
    pub fn new(amount: f64, currency: Currency) -> Result<Self, RecordError> {
        if !amount.is_finite() {
            return Err(RecordError::InvalidValue {
                field: fields::REWARD.to_string(),
                message: format!("amount must be a finite number, got {}", amount),
            });
        }
        Ok(Reward { amount, currency })
    }
}

/// A stored reward that does not parse is dropped; the rest of the record
/// still loads.
fn lenient_reward<'de, D>(deserializer: D) -> Result<Option<Reward>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value::<Reward>(value) {
        Ok(reward) => Some(reward),
        Err(e) => {
            tracing::warn!("dropping malformed reward: {}", e);
            None
        }
    }))
}

/// A user-defined label/value pair shown on the poster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    pub label: String,
    pub value: String,
}

impl CustomField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        CustomField {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The draft being edited.
///
/// Missing keys deserialize to their defaults, so a record whose empty
/// values were stripped on save comes back equal to the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    pub pet_name: String,
    pub owner_name: String,
    pub contact_phone: String,
    pub last_seen_location: String,
    pub last_seen_date_time: String,
    pub pet_description: String,
    pub accessories: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_reward"
    )]
    pub reward: Option<Reward>,
    pub photos: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

/// Partial update applied by [`Record::apply`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub pet_name: Option<String>,
    pub owner_name: Option<String>,
    pub contact_phone: Option<String>,
    pub last_seen_location: Option<String>,
    pub last_seen_date_time: Option<String>,
    pub pet_description: Option<String>,
    pub accessories: Option<String>,
    /// `Some(None)` removes the reward.
    pub reward: Option<Option<Reward>>,
    pub photos: Option<Vec<String>>,
    pub custom_fields: Option<Vec<CustomField>>,
}

impl Record {
    /// The record's own fields as JSON values, keyed by serialized name.
    ///
    /// An absent reward has no key.
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of strings, lists and a finite reward always serializes to an object.
            _ => Map::new(),
        }
    }

    /// Merge a patch into this record.
    pub fn apply(&mut self, patch: RecordPatch) {
        let RecordPatch {
            pet_name,
            owner_name,
            contact_phone,
            last_seen_location,
            last_seen_date_time,
            pet_description,
            accessories,
            reward,
            photos,
            custom_fields,
        } = patch;

        if let Some(v) = pet_name {
            self.pet_name = v;
        }
        if let Some(v) = owner_name {
            self.owner_name = v;
        }
        if let Some(v) = contact_phone {
            self.contact_phone = v;
        }
        if let Some(v) = last_seen_location {
            self.last_seen_location = v;
        }
        if let Some(v) = last_seen_date_time {
            self.last_seen_date_time = v;
        }
        if let Some(v) = pet_description {
            self.pet_description = v;
        }
        if let Some(v) = accessories {
            self.accessories = v;
        }
        if let Some(v) = reward {
            self.reward = v;
        }
        if let Some(v) = photos {
            self.photos = v;
        }
        if let Some(v) = custom_fields {
            self.custom_fields = v;
        }
    }

    /// Return a copy of this record with one field replaced by name.
    ///
    /// The value must have the field's JSON shape; `null` resets the field
    /// to its default.
    pub fn with_field(&self, name: &str, value: Value) -> Result<Record, RecordError> {
        if !fields::ALL.contains(&name) {
            return Err(RecordError::UnknownField(name.to_string()));
        }

        // The record tolerates a bad stored reward; an edit must not.
        if name == fields::REWARD && !value.is_null() {
            serde_json::from_value::<Reward>(value.clone()).map_err(|e| {
                RecordError::InvalidValue {
                    field: name.to_string(),
                    message: e.to_string(),
                }
            })?;
        }

        let mut map = self.to_fields();
        if value.is_null() {
            map.remove(name);
        } else {
            map.insert(name.to_string(), value);
        }

        serde_json::from_value(Value::Object(map)).map_err(|e| RecordError::InvalidValue {
            field: name.to_string(),
            message: e.to_string(),
        })
    }

    pub fn add_photo(&mut self, photo: impl Into<String>) {
        self.photos.push(photo.into());
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<String, RecordError> {
        if index >= self.photos.len() {
            return Err(RecordError::IndexOutOfRange {
                list: fields::PHOTOS,
                index,
                len: self.photos.len(),
            });
        }
        Ok(self.photos.remove(index))
    }

    /// Append an empty label/value pair.
    pub fn add_custom_field(&mut self) {
        self.custom_fields.push(CustomField::default());
    }

    pub fn update_custom_field(
        &mut self,
        index: usize,
        field: CustomField,
    ) -> Result<(), RecordError> {
        let len = self.custom_fields.len();
        let slot = self
            .custom_fields
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange {
                list: fields::CUSTOM_FIELDS,
                index,
                len,
            })?;
        *slot = field;
        Ok(())
    }

    pub fn remove_custom_field(&mut self, index: usize) -> Result<CustomField, RecordError> {
        if index >= self.custom_fields.len() {
            return Err(RecordError::IndexOutOfRange {
                list: fields::CUSTOM_FIELDS,
                index,
                len: self.custom_fields.len(),
            });
        }
        Ok(self.custom_fields.remove(index))
    }
}

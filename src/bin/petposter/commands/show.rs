//! `petposter show` command

use anyhow::Result;

use super::{finish, open_ready_session, GlobalOpts};
use crate::cli::ShowArgs;
use petposter::core::Record;
use petposter::validation::format_phone;

pub fn execute(args: ShowArgs, opts: &GlobalOpts) -> Result<()> {
    let session = open_ready_session(opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.record())?);
    } else {
        print!("{}", render(session.record()));
    }

    finish(session, opts)
}

fn render(record: &Record) -> String {
    let mut out = String::new();
    let line = |out: &mut String, label: &str, value: &str| {
        let value = if value.is_empty() { "-" } else { value };
        out.push_str(&format!("{:<12} {}\n", label, value));
    };

    line(&mut out, "Pet", &record.pet_name);
    line(&mut out, "Owner", &record.owner_name);
    line(&mut out, "Phone", &format_phone(&record.contact_phone));
    line(&mut out, "Last seen", &record.last_seen_location);
    line(&mut out, "When", &record.last_seen_date_time);
    line(&mut out, "Description", &record.pet_description);
    line(&mut out, "Accessories", &record.accessories);

    let reward = record
        .reward
        .as_ref()
        .map(|r| format!("{:.2} {}", r.amount, r.currency.code()))
        .unwrap_or_default();
    line(&mut out, "Reward", &reward);

    out.push_str(&format!("Photos ({})\n", record.photos.len()));
    for (i, photo) in record.photos.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i, photo));
    }

    if !record.custom_fields.is_empty() {
        out.push_str("Custom fields\n");
        for (i, field) in record.custom_fields.iter().enumerate() {
            out.push_str(&format!("  [{}] {}: {}\n", i, field.label, field.value));
        }
    }

    out
}

//! Record fixtures shared by unit tests.

use crate::core::{Currency, CustomField, Record, Reward};

/// A record where every field is filled in and valid.
pub fn sample_record() -> Record {
    Record {
        pet_name: "Rex".into(),
        owner_name: "John Smith".into(),
        contact_phone: "11999999999".into(),
        last_seen_location: "Villa Lobos Park".into(),
        last_seen_date_time: "2024-01-15 14:30".into(),
        pet_description: "Golden retriever".into(),
        accessories: "Red collar".into(),
        reward: Some(Reward {
            amount: 500.0,
            currency: Currency::Brl,
        }),
        photos: vec!["photo1.jpg".into(), "photo2.jpg".into()],
        custom_fields: vec![CustomField::new("Age", "3 years")],
    }
}

/// A record with only the required fields filled in.
pub fn minimal_record() -> Record {
    Record {
        pet_name: "Mia".into(),
        owner_name: "Ana".into(),
        contact_phone: "(11) 99999-9999".into(),
        last_seen_location: "Main Street".into(),
        photos: vec!["mia.jpg".into()],
        ..Default::default()
    }
}

use chrono::{DateTime, Utc};

use crate::model::{Record, Schema};
use crate::selector;

const TIP_FIELD: &str = "tip";

/// Built-in tips for catalogs without a tip column, as (title, tip).
pub const SECRET_TIPS: &[(&str, &str)] = &[
    (
        "Pataleshwar Cave Temple",
        "Visit early morning around 6 AM for the most serene experience. The temple has amazing acoustics, try whispering and hear it echo!",
    ),
    (
        "Mulshi Lake Drive",
        "Take the back road through small villages for Instagram-worthy shots of misty mountains. Pack hot tea in a thermos!",
    ),
    (
        "Bhaja Caves Trek",
        "Wear grip shoes! The rocks can be slippery. There's a hidden waterfall 10 minutes past the main caves, follow the sound of water.",
    ),
    (
        "Local Food Secret",
        "Ask locals for 'Kanda Poha with extra chilam' at roadside stalls. It's a secret menu item that most tourists never discover!",
    ),
    (
        "Night Photography",
        "For spooky locations, use a flashlight with red filter to maintain night vision while getting amazing ghost-like photos.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tip {
    pub title: String,
    pub text: String,
}

/// Tips drawn from the catalog's own tip column, or the built-in list when the schema has none.
pub fn tips(records: &[Record], schema: &Schema) -> Vec<Tip> {
    if !schema.fields.contains(&TIP_FIELD) {
        return SECRET_TIPS.iter()
            .map(|(title, text)| Tip { title: (*title).to_owned(), text: (*text).to_owned() })
            .collect();
    }
    records.iter()
        .filter(|r| !r.get(TIP_FIELD).is_empty())
        .map(|r| Tip {
            title: r.category(schema).to_owned(),
            text: r.get(TIP_FIELD).to_owned(),
        })
        .collect()
}

/// One tip per week, rotating through [`tips`]
pub fn tip_of_week(records: &[Record], schema: &Schema, now: DateTime<Utc>) -> Option<Tip> {
    selector::pick_weekly(&tips(records, schema), now).cloned()
}

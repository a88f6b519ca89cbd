use std::fmt;
use std::str::FromStr;

use crate::model::{Record, Schema};

const ALL: &str = "all";
const CAFE_NAME_WORDS: &[&str] = &["cafe", "thali", "tea"];

/// Which records to show by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    All,
    Key(String),
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            ALL => Category::All,
            key => Category::Key(key.to_owned()),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => f.write_str(ALL),
            Category::Key(k) => f.write_str(k),
        }
    }
}

/// Extra conditions, all of which must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field holds "true"
    Flagged(String),
    Equals { field: String, value: String },
    /// Food spots: name mentions cafe, thali or tea, or the category mentions cafe.
    /// Case-insensitive substring match.
    Cafe,
}

impl Predicate {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Flagged(field) => record.get(field).trim().eq_ignore_ascii_case("true"),
            Predicate::Equals { field, value } => record.get(field) == value,
            Predicate::Cafe => {
                let name = record.get("name").to_lowercase();
                CAFE_NAME_WORDS.iter().any(|w| name.contains(w))
                    || record.get("category").to_lowercase().contains("cafe")
            }
        }
    }
}

/// Stable filter: output keeps input order.
pub fn filter<'a>(
    records: &'a [Record],
    schema: &Schema,
    category: &Category,
    predicates: &[Predicate],
) -> Vec<&'a Record> {
    records.iter()
        .filter(|r| match category {
            Category::All => true,
            Category::Key(key) => r.category(schema) == key,
        })
        .filter(|r| predicates.iter().all(|p| p.matches(r)))
        .collect()
}

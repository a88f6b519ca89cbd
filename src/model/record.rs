use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// The set of columns a catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    /// Field compared against the category key when filtering
    pub category: &'static str,
    /// Boolean "true"/"false" column, if the schema has one
    pub flag: Option<&'static str>,
}

impl Schema {
    pub const CONTENT: Schema = Schema {
        name: "content",
        fields: &["issue", "quote", "reference", "video_title", "video_link", "tip", "music_link"],
        category: "issue",
        flag: None,
    };

    pub const PLACES: Schema = Schema {
        name: "places",
        fields: &[
            "id", "name", "category", "description", "location", "best_time",
            "best_time_to_visit", "distance_from_pune_km", "facts", "rules",
            "map_link", "spooky",
        ],
        category: "category",
        flag: Some("spooky"),
    };

    pub fn by_name(name: &str) -> Option<Schema> {
        [Schema::CONTENT, Schema::PLACES].iter()
            .find(|s| s.name == name)
            .copied()
    }
}

/// One parsed row. Serialises as a flat JSON object of field name to value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Record {
            fields: pairs.into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    /// Value of `field`, or "" when the record has no such field
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_owned(), value.into());
    }

    pub fn category<'a>(&'a self, schema: &Schema) -> &'a str {
        self.get(schema.category)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_empty() {
        let record = Record::from_pairs(vec![("issue", "Stress")]);
        assert_eq!(record.get("issue"), "Stress");
        assert_eq!(record.get("tip"), "");
    }

    #[test]
    fn serialises_flat() {
        let record = Record::from_pairs(vec![("issue", "A"), ("quote", "Q")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"issue":"A","quote":"Q"}"#);
    }

    #[test]
    fn schema_lookup() {
        assert_eq!(Schema::by_name("places"), Some(Schema::PLACES));
        assert_eq!(Schema::by_name("content").unwrap().category, "issue");
        assert!(Schema::by_name("nope").is_none());
    }
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use itertools::Itertools;
use log::*;

use crate::error::{FetchError, Result};
use crate::model::{Record, Schema};

const DELIMITER: char = ',';

/// Where catalog text comes from.
pub trait Source {
    fn fetch(&self) -> Result<String>;
}

/// Catalog on the local filesystem. `~` and env vars in the path are expanded.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        FileSource { path: path.into() }
    }

    fn resolve(&self) -> Result<PathBuf> {
        let path = shellexpand::full(&self.path)
            .map_err(|_| FetchError::BadPath(self.path.clone()))?;
        Ok(Path::new(path.as_ref()).to_owned())
    }
}

impl Source for FileSource {
    fn fetch(&self) -> Result<String> {
        let path = self.resolve()?;
        let bytes = std::fs::read(&path).map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        if let std::borrow::Cow::Owned(_) = text {
            warn!("Catalog {:?} is not valid UTF-8, bad bytes replaced", path);
        }
        Ok(text.into_owned())
    }
}

/// In-memory catalog text
impl Source for str {
    fn fetch(&self) -> Result<String> {
        Ok(self.to_owned())
    }
}

/// Fetch and parse. Only the fetch can fail; parsing never does.
pub fn load<S: Source + ?Sized>(source: &S, schema: &Schema) -> Result<Vec<Record>> {
    let text = source.fetch().map_err(|e| {
        error!("Error loading catalog: {}", e);
        e
    })?;
    let records = parse(&text, schema);
    info!("Loaded {} {} records", records.len(), schema.name);
    Ok(records)
}

/// Naive delimiter split: no quoting, no embedded newlines.
/// Every field of `schema` is present on every record, empty when the column or cell is missing.
pub fn parse(text: &str, schema: &Schema) -> Vec<Record> {
    let mut lines = text.lines().filter(|l| !l.is_empty());
    let header = match lines.next() {
        Some(h) => h,
        None => return vec![],
    };
    let columns: HashMap<&str, usize> = split(header).enumerate()
        .map(|(i, name)| (name, i))
        .collect();
    for missing in schema.fields.iter().filter(|f| !columns.contains_key(*f)) {
        debug!("Column {} not in header, defaulting to empty", missing);
    }

    lines.map(|line| {
        let cells = split(line).collect_vec();
        let mut record = Record::new();
        for field in schema.fields {
            let value = columns.get(field)
                .and_then(|&i| cells.get(i))
                .copied()
                .unwrap_or("");
            record.set(field, value);
        }
        record
    }).collect()
}

fn split(line: &str) -> impl Iterator<Item = &str> {
    line.split(DELIMITER).map(str::trim)
}

/// Distinct non-empty category values, sorted
pub fn categories(records: &[Record], schema: &Schema) -> Vec<String> {
    records.iter()
        .map(|r| r.category(schema))
        .filter(|c| !c.is_empty())
        .unique()
        .sorted()
        .map(str::to_owned)
        .collect()
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header labels and data rows extracted from the lookup service's result table.
///
/// An empty table (no header, no rows) is the "no matches" outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Key holding the metadata block in a serialized record.
pub const META_KEY: &str = "_meta";

/// Retrieval metadata attached to every record, serialized under `_meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub v_date: DateTime<Utc>,
    /// Set only on the synthetic record appended when the queried code was not found.
    #[serde(
        rename = "__notfound__",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub not_found: bool,
}

/// One normalized address row.
///
/// Serializes as a flat JSON object: address fields at the top level and
/// the metadata block under `_meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(rename = "_meta")]
    pub meta: RecordMeta,
}

impl AddressRecord {
    pub fn new(v_date: DateTime<Utc>) -> Self {
        Self {
            fields: BTreeMap::new(),
            meta: RecordMeta {
                v_date,
                not_found: false,
            },
        }
    }

    /// The synthetic record for a postal code absent from the results.
    pub fn not_found(cep: &str, v_date: DateTime<Utc>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("cep".to_string(), cep.to_string());
        Self {
            fields,
            meta: RecordMeta {
                v_date,
                not_found: true,
            },
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn is_not_found(&self) -> bool {
        self.meta.not_found
    }
}

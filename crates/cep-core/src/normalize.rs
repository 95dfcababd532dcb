//! Maps the lookup service's heterogeneous column labels onto normalized
//! address fields.
//!
//! Labels are matched against an ordered rule table; the first rule whose
//! predicate accepts the label handles the pair. Order matters: a label
//! containing both `bairro` and `cep` resolves to `bairro`.

use chrono::{DateTime, Utc};

use crate::models::{AddressRecord, META_KEY, RawTable};

/// Accented label written alongside `endereco`.
///
/// Older consumers read the address from the `endereço` key, so records
/// carry the value under both keys. This applies to this label only.
pub const LEGACY_ENDERECO_LABEL: &str = "endereço";

/// One header/value pair of a row, already cleaned.
struct Pair<'a> {
    label: &'a str,
    value: &'a str,
    query: &'a str,
}

struct LabelRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    /// Returns true when the pair's postal code equals the queried one.
    apply: fn(&mut AddressRecord, &Pair<'_>) -> bool,
}

const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        name: "localidade",
        matches: |label| label.contains("localidade"),
        apply: apply_localidade,
    },
    LabelRule {
        name: "logradouro",
        matches: |label| label.contains("logradouro"),
        apply: apply_logradouro,
    },
    LabelRule {
        name: "endereco",
        matches: |label| label == LEGACY_ENDERECO_LABEL,
        apply: apply_endereco,
    },
    LabelRule {
        name: "bairro",
        matches: |label| label.contains("bairro"),
        apply: |record, pair| {
            record.insert("bairro", pair.value);
            false
        },
    },
    LabelRule {
        name: "cep",
        matches: |label| label.contains("cep"),
        apply: apply_cep,
    },
    LabelRule {
        name: "passthrough",
        matches: |_| true,
        apply: |record, pair| {
            // `_meta` is taken by the metadata block.
            if pair.label != META_KEY {
                record.insert(pair.label, pair.value);
            }
            false
        },
    },
];

/// `"São Paulo/SP - Zona Sul"` → `cidade = "São Paulo"`, `estado = "SP"`.
///
/// A value without `/` is taken as the city alone.
fn apply_localidade(record: &mut AddressRecord, pair: &Pair<'_>) -> bool {
    match pair.value.split_once('/') {
        Some((cidade, rest)) => {
            record.insert("cidade", cidade.trim());
            let estado = rest.split('-').next().unwrap_or_default();
            record.insert("estado", estado.trim());
        }
        None => record.insert("cidade", pair.value.trim()),
    }
    false
}

/// `"Rua A - Apto 2"` → `logradouro = "Rua A"`, `complemento = "Apto 2"`.
fn apply_logradouro(record: &mut AddressRecord, pair: &Pair<'_>) -> bool {
    let logradouro = match pair.value.split_once(" - ") {
        Some((logradouro, complemento)) => {
            record.insert(
                "complemento",
                complemento.trim_matches(|c: char| c == ' ' || c == '-'),
            );
            logradouro
        }
        None => pair.value,
    };
    let logradouro = logradouro.trim();
    if !logradouro.is_empty() {
        record.insert("logradouro", logradouro);
    }
    false
}

fn apply_endereco(record: &mut AddressRecord, pair: &Pair<'_>) -> bool {
    record.insert("endereco", pair.value);
    record.insert(pair.label, pair.value);
    false
}

fn apply_cep(record: &mut AddressRecord, pair: &Pair<'_>) -> bool {
    let cep = pair.value.replace('-', "");
    let matched = cep == pair.query;
    record.insert("cep", cep);
    matched
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name of the rule that handles `label` (lower-cased and trimmed first).
pub fn rule_for(label: &str) -> &'static str {
    let label = label.trim().to_lowercase();
    LABEL_RULES
        .iter()
        .find(|rule| (rule.matches)(&label))
        .map_or("passthrough", |rule| rule.name)
}

/// Build one record from a row, pairing header labels and cells positionally.
///
/// Pairing stops at the shorter of the two sequences. Returns the record and
/// whether any of its postal code cells matched `query`.
pub fn normalize_row(
    query: &str,
    header: &[String],
    row: &[String],
    retrieved_at: DateTime<Utc>,
) -> (AddressRecord, bool) {
    let mut record = AddressRecord::new(retrieved_at);
    let mut found = false;

    for (label, value) in header.iter().zip(row) {
        let label = label.trim().to_lowercase();
        let value = collapse_whitespace(value);
        let pair = Pair {
            label: &label,
            value: &value,
            query,
        };

        if let Some(rule) = LABEL_RULES.iter().find(|rule| (rule.matches)(&label)) {
            found |= (rule.apply)(&mut record, &pair);
        }
    }

    (record, found)
}

/// Normalize every row of `table` into address records.
///
/// All records share `retrieved_at`. When no row's postal code equals
/// `query`, a synthetic not-found record for `query` is appended last.
pub fn normalize(
    query: &str,
    table: &RawTable,
    retrieved_at: DateTime<Utc>,
) -> Vec<AddressRecord> {
    let mut records = Vec::with_capacity(table.rows.len() + 1);
    let mut found = false;

    for row in &table.rows {
        let (record, matched) = normalize_row(query, &table.header, row, retrieved_at);
        found |= matched;
        records.push(record);
    }

    if !found {
        records.push(AddressRecord::not_found(query, retrieved_at));
    }

    records
}

use super::{CanonicalField, NormalizeError};
use std::collections::HashMap;

/// declarative mapping from canonical fields to the source column names
/// they may appear under. monthly schema drift is resolved here once per
/// file, not with per-field conditionals at parse time. extra aliases can
/// be layered on top of the built-in table for unanticipated vintages.
#[derive(Clone, Debug, Default)]
pub struct SchemaMap {
    extra_aliases: HashMap<CanonicalField, Vec<String>>,
}

impl SchemaMap {
    pub fn new() -> SchemaMap {
        SchemaMap::default()
    }

    pub fn with_alias(mut self, field: CanonicalField, column: &str) -> SchemaMap {
        self.extra_aliases
            .entry(field)
            .or_default()
            .push(column.to_lowercase());
        self
    }

    /// resolves each canonical field against a header row, producing the
    /// column indices used for every row of that file. fails when a
    /// mandatory field has no matching column; optional fields bind to
    /// None and coerce to defaults downstream.
    pub fn bind(&self, headers: &csv::StringRecord) -> Result<SchemaBinding, NormalizeError> {
        let lookup: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, col)| (col.trim().to_lowercase(), idx))
            .collect();

        let mut indices: HashMap<CanonicalField, usize> = HashMap::new();
        for field in CanonicalField::ALL {
            let found = self
                .candidates(field)
                .into_iter()
                .find_map(|alias| lookup.get(&alias).copied());
            match found {
                Some(idx) => {
                    indices.insert(field, idx);
                }
                None if field.is_mandatory() => {
                    return Err(NormalizeError::MissingColumn {
                        field: field.name().to_string(),
                        candidates: self.candidates(field).join(", "),
                    });
                }
                None => {}
            }
        }
        Ok(SchemaBinding { indices })
    }

    fn candidates(&self, field: CanonicalField) -> Vec<String> {
        let mut candidates: Vec<String> =
            field.aliases().iter().map(|a| a.to_lowercase()).collect();
        if let Some(extra) = self.extra_aliases.get(&field) {
            candidates.extend(extra.iter().cloned());
        }
        candidates
    }
}

/// resolved column indices for one monthly file.
#[derive(Clone, Debug)]
pub struct SchemaBinding {
    indices: HashMap<CanonicalField, usize>,
}

impl SchemaBinding {
    /// cell value for a canonical field, None when the column is absent
    /// from this file or the cell is empty.
    pub fn get<'a>(&self, field: CanonicalField, row: &'a csv::StringRecord) -> Option<&'a str> {
        let idx = self.indices.get(&field)?;
        let value = row.get(*idx)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

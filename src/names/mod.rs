//! Name list and autocomplete support.
//!
//! Independent of the chart core; the UI shell uses it to turn keystrokes
//! into a (name, gender) pair before a chart session exists.

use crate::core::{Gender, Region};
use crate::data::Dataset;

/// First character uppercased, remainder lowercased.
///
/// Dataset name keys are stored in this form, so queries normalize through
/// it before lookup.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// Sorted unique names for one gender, with prefix search.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: Vec<String>,
}

impl NameIndex {
    /// Collects unique names across every year of the aggregate table.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, gender: Gender) -> Self {
        let mut names: Vec<String> = Vec::new();
        if let Some(table) = dataset.region(Region::Aggregate) {
            let mut tables = Vec::with_capacity(2);
            match gender {
                Gender::Female => tables.push(&table.female),
                Gender::Male => tables.push(&table.male),
                Gender::All => {
                    tables.push(&table.female);
                    tables.push(&table.male);
                }
            }
            for gender_table in tables {
                for entry in gender_table.years().values() {
                    names.extend(entry.names.keys().cloned());
                }
            }
        }
        names.sort_unstable();
        names.dedup();
        Self { names }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names starting with the capitalized form of `prefix`, sorted.
    ///
    /// An empty prefix matches nothing rather than everything.
    #[must_use]
    pub fn search(&self, prefix: &str) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let normalized = capitalize(prefix);
        let start = self.names.partition_point(|name| name < &normalized);
        self.names[start..]
            .iter()
            .take_while(|name| name.starts_with(&normalized))
            .map(String::as_str)
            .collect()
    }
}

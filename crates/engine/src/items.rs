//! Item repository: candidate items per category.
//!
//! The repository sheet has one column per category. The header row names the
//! category, the cells below it are the candidates.

use std::collections::{HashMap, HashSet};

use crate::mask::is_blank;

#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    /// Category names in header order.
    order: Vec<String>,
    columns: HashMap<String, Vec<String>>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a header row and the data rows below it.
    ///
    /// Rows shorter than the header contribute blanks for the missing
    /// columns. Cells beyond the header width are ignored. When a header
    /// repeats, the first column wins.
    pub fn from_table(header: &[String], rows: &[Vec<String>]) -> Self {
        let mut table = Self::new();
        for (col, category) in header.iter().enumerate() {
            if table.columns.contains_key(category) {
                log::warn!("duplicate category column '{}' ignored", category);
                continue;
            }
            let values = rows
                .iter()
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect();
            table.insert(category.clone(), values);
        }
        table
    }

    /// Build from `(category, values)` pairs. Later duplicates replace earlier ones.
    pub fn from_columns<I, C, V>(columns: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<V>)>,
        C: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (category, values) in columns {
            table.insert(category.into(), values.into_iter().map(Into::into).collect());
        }
        table
    }

    pub fn insert(&mut self, category: String, values: Vec<String>) {
        if !self.columns.contains_key(&category) {
            self.order.push(category.clone());
        }
        self.columns.insert(category, values);
    }

    pub fn contains(&self, category: &str) -> bool {
        self.columns.contains_key(category)
    }

    /// Category names in header order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Raw column values, blanks included.
    pub fn values(&self, category: &str) -> Option<&[String]> {
        self.columns.get(category).map(Vec::as_slice)
    }

    /// Candidates eligible for sampling: blanks removed, repeats collapsed to
    /// their first occurrence, column order kept.
    pub fn candidates(&self, category: &str) -> Option<Vec<&str>> {
        let values = self.columns.get(category)?;
        let mut seen = HashSet::new();
        Some(
            values
                .iter()
                .map(String::as_str)
                .filter(|v| !is_blank(v))
                .filter(|v| seen.insert(*v))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

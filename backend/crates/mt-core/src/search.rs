//! Client-side dashboard search.
//!
//! The query text is split on whitespace into lowercase terms. A record
//! matches when every term is a substring of at least one of its type,
//! description, car identifier or date. An empty query matches everything.

use crate::MaintenanceRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(text: &str) -> Self {
        Self {
            terms: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn matches(&self, record: &MaintenanceRecord) -> bool {
        let haystacks = record.searchable_fields().map(str::to_lowercase);
        self.terms
            .iter()
            .all(|term| haystacks.iter().any(|field| field.contains(term.as_str())))
    }

    /// Keep matching records, preserving their order.
    pub fn filter(&self, records: Vec<MaintenanceRecord>) -> Vec<MaintenanceRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

//! Policy Store — static keyword-searchable index of policy snippets.
//!
//! Loaded once at startup from a JSON file and read-only for the process
//! lifetime, so unsynchronized concurrent reads are safe.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub id: String,
    pub keywords: Vec<String>,
    pub body: String,
}

pub struct PolicyStore {
    entries: Vec<PolicyEntry>,
}

impl PolicyStore {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read policy store at {}", path.display()))?;
        let entries: Vec<PolicyEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse policy store at {}", path.display()))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<PolicyEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keyword search: tokenize the question, count keyword overlap per
    /// entry, return the best entry iff any keyword matched. Ties resolve
    /// to the earliest-inserted entry.
    pub fn search(&self, question: &str) -> Option<&PolicyEntry> {
        let tokens: Vec<String> = question
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let mut best: Option<(&PolicyEntry, usize)> = None;
        for entry in &self.entries {
            let overlap = entry
                .keywords
                .iter()
                .filter(|k| tokens.contains(&k.to_lowercase()))
                .count();
            // Strict > keeps the earliest entry on equal overlap.
            if overlap > 0 && best.map_or(true, |(_, n)| overlap > n) {
                best = Some((entry, overlap));
            }
        }
        best.map(|(entry, _)| entry)
    }
}

//! Reference catalog of known biomarkers with aliases, units, and ranges.
//!
//! Loaded once at startup from the embedded JSON catalog and shared
//! read-only across all requests. Declaration order in the JSON is
//! authoritative: it decides fuzzy tie-breaks and which range variant is
//! "first" when no default variant exists.

use std::collections::HashMap;

use serde::Deserialize;

use super::canonical::canonicalize;
use super::{fuzzy, CatalogError, CATALOG_MATCH_THRESHOLD};

const DEFAULT_CATALOG: &str = include_str!("../../data/reference_ranges.json");

const DEFAULT_RANGE_VARIANT: &str = "default";

/// One low/high bound pair for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RefRange {
    pub low: f64,
    pub high: f64,
}

/// A known biomarker: canonical key, display unit, aliases, and one or
/// more named range variants in declaration order.
#[derive(Debug, Clone)]
pub struct ReferenceEntry {
    pub key: String,
    pub unit: String,
    pub description: String,
    pub aliases: Vec<String>,
    ranges: Vec<(String, RefRange)>,
}

impl ReferenceEntry {
    /// The `"default"` variant when declared, else the first declared one.
    pub fn reference_range(&self) -> RefRange {
        self.ranges
            .iter()
            .find(|(variant, _)| variant == DEFAULT_RANGE_VARIANT)
            .map(|(_, range)| *range)
            .unwrap_or(self.ranges[0].1)
    }
}

/// What a successful catalog lookup resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReference {
    pub key: String,
    pub low: f64,
    pub high: f64,
    pub unit: String,
    pub description: String,
}

/// Canonicalized name/alias → entry mapping in insertion order.
///
/// Built exactly once per catalog load and never mutated afterwards.
/// A name claimed by two entries keeps its first mapping.
#[derive(Debug, Default)]
struct SearchIndex {
    keys: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl SearchIndex {
    fn insert(&mut self, name: String, entry_idx: usize) {
        if name.is_empty() {
            return;
        }
        if self.positions.contains_key(&name) {
            tracing::debug!(%name, "duplicate catalog name, keeping first mapping");
            return;
        }
        self.positions.insert(name.clone(), self.keys.len());
        self.keys.push((name, entry_idx));
    }

    fn exact(&self, key: &str) -> Option<usize> {
        self.positions.get(key).map(|&pos| self.keys[pos].1)
    }

    fn fuzzy(&self, key: &str) -> Option<usize> {
        fuzzy::best_match(
            key,
            self.keys.iter().map(|(name, _)| name.as_str()),
            CATALOG_MATCH_THRESHOLD,
        )
        .map(|pos| self.keys[pos].1)
    }
}

/// Immutable biomarker reference catalog plus its search index.
#[derive(Debug)]
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
    index: SearchIndex,
}

impl ReferenceCatalog {
    /// Load the catalog bundled with the binary.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    /// Build a catalog from JSON. Key declaration order is preserved.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        #[derive(Deserialize)]
        struct RawEntry {
            unit: String,
            description: String,
            #[serde(default)]
            aliases: Vec<String>,
            ranges: serde_json::Map<String, serde_json::Value>,
        }

        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parsing(e.to_string()))?;

        let mut entries: Vec<ReferenceEntry> = Vec::with_capacity(raw.len());
        let mut index = SearchIndex::default();

        for (key, value) in raw {
            let raw_entry: RawEntry = serde_json::from_value(value)
                .map_err(|e| CatalogError::Parsing(format!("entry {key:?}: {e}")))?;

            let mut ranges = Vec::with_capacity(raw_entry.ranges.len());
            for (variant, bounds) in raw_entry.ranges {
                let range: RefRange = serde_json::from_value(bounds).map_err(|e| {
                    CatalogError::Parsing(format!("entry {key:?}, range {variant:?}: {e}"))
                })?;
                if range.low > range.high {
                    return Err(CatalogError::InvertedRange {
                        key: key.clone(),
                        variant,
                    });
                }
                ranges.push((variant, range));
            }
            if ranges.is_empty() {
                return Err(CatalogError::NoRanges { key });
            }

            let entry_idx = entries.len();
            index.insert(canonicalize(&key), entry_idx);
            for alias in &raw_entry.aliases {
                index.insert(canonicalize(alias), entry_idx);
            }

            entries.push(ReferenceEntry {
                key,
                unit: raw_entry.unit,
                description: raw_entry.description,
                aliases: raw_entry.aliases,
                ranges,
            });
        }

        Ok(Self { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text biomarker name to its reference entry.
    ///
    /// Exact index hit first; otherwise the best fuzzy match at or above
    /// the catalog threshold, scanned in declaration order.
    pub fn lookup(&self, name: &str) -> Option<ResolvedReference> {
        let key = canonicalize(name);
        if key.is_empty() {
            return None;
        }

        let entry_idx = self.index.exact(&key).or_else(|| self.index.fuzzy(&key))?;
        let entry = &self.entries[entry_idx];
        let range = entry.reference_range();

        Some(ResolvedReference {
            key: entry.key.clone(),
            low: range.low,
            high: range.high,
            unit: entry.unit.clone(),
            description: entry.description.clone(),
        })
    }
}

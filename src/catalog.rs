use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fetch engine to use for a source
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    #[default]
    Http,
    /// Headless browser with scroll-to-bottom for lazy-loaded catalogs
    Browser,
}

/// One catalog source, described entirely as data.
///
/// The class fields are substring fragments matched against the `class`
/// attribute (CSS `[class*="..."]`), deliberately looser than exact
/// selectors so minor markup churn doesn't break extraction. Adding a new
/// storefront means adding a record like this to the config, not new code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Display name ("ours", "bbq24", ...)
    pub name: String,
    /// Catalog page URL
    pub url: String,
    /// Fetch engine
    #[serde(default)]
    pub engine: Engine,
    /// Class fragment identifying a product card container
    pub card_class: String,
    /// Class fragment identifying the title element within a card
    pub title_class: String,
    /// Class fragment identifying the price element within a card
    pub price_class: String,
    /// Extra request headers (a browser User-Agent is always sent)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

/// One product from a single source: normalized title plus parsed price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub title: String,
    pub price: u64,
}

/// Insertion-ordered title -> price mapping for one source.
///
/// Iteration order is extraction order, which the matcher depends on for
/// reproducible output. Inserting a duplicate title overwrites the price in
/// place and keeps the original position, so a source listing a title twice
/// contributes one entry carrying the last price seen.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry by title
    pub fn insert(&mut self, title: String, price: u64) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.title == title) {
            existing.price = price;
        } else {
            self.entries.push(CatalogEntry { title, price });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.title == title)
            .map(|e| e.price)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

impl FromIterator<(String, u64)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (title, price) in iter {
            catalog.insert(title, price);
        }
        catalog
    }
}

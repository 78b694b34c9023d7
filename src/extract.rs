use scraper::{ElementRef, Html, Selector};

use crate::catalog::{Catalog, SourceSpec};
use crate::error::{PricedeltaError, Result};
use crate::fetch::PageContent;
use crate::normalize::{clean_name, parse_price};

/// Why an individual product card produced no catalog entry
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No element matching the title class fragment inside the card
    NoTitleElement,
    /// No element matching the price class fragment inside the card
    NoPriceElement,
    /// Price element found but its text contains no digits ("Contact us")
    NoPriceDigits,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoTitleElement => write!(f, "no title element"),
            SkipReason::NoPriceElement => write!(f, "no price element"),
            SkipReason::NoPriceDigits => write!(f, "price text has no digits"),
        }
    }
}

/// A card that was skipped during extraction, kept so operators can spot
/// markup drift without digging through logs
#[derive(Debug, Clone)]
pub struct CardIssue {
    /// Zero-based card position on the page
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of extracting one source's catalog page
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub catalog: Catalog,
    /// Cards that matched the card selector but yielded no entry
    pub issues: Vec<CardIssue>,
}

/// Build a `[class*="..."]` selector from a class fragment.
///
/// Substring matching on the class attribute is deliberate: storefront
/// themes rename classes like `product-item--large` freely, but the stable
/// fragment survives most markup churn.
fn class_fragment_selector(fragment: &str) -> Result<Selector> {
    Selector::parse(&format!("[class*=\"{}\"]", fragment)).map_err(|e| {
        PricedeltaError::ExtractionError(format!("Invalid class fragment '{}': {:?}", fragment, e))
    })
}

/// Collect the text of the first element matching a class fragment
fn first_text(card: &ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
}

/// Extract a catalog from a fetched page using the source's selector heuristics.
///
/// Every element matching the card fragment is treated as a product card.
/// Cards with both a title and a usable price become `{normalized title ->
/// price}` entries; the rest are skipped and recorded as issues. Extraction
/// itself never fails per card - only an unusable selector fragment is fatal.
pub fn extract_catalog(content: &PageContent, spec: &SourceSpec) -> Result<ExtractReport> {
    let document = Html::parse_document(&content.html);

    let card_selector = class_fragment_selector(&spec.card_class)?;
    let title_selector = class_fragment_selector(&spec.title_class)?;
    let price_selector = class_fragment_selector(&spec.price_class)?;

    let mut catalog = Catalog::new();
    let mut issues = Vec::new();

    // The loose card net can catch title/price nodes themselves when their
    // class happens to contain the card fragment (WooCommerce's
    // "woocommerce-loop-product__title" contains "product"). An element that
    // IS a field is never a card.
    let is_field_node = |el: &ElementRef| {
        el.value().attr("class").is_some_and(|classes| {
            classes.contains(&spec.title_class) || classes.contains(&spec.price_class)
        })
    };

    let cards = document
        .select(&card_selector)
        .filter(|card| !is_field_node(card));

    for (index, card) in cards.enumerate() {
        let title_text = match first_text(&card, &title_selector) {
            Some(text) => text,
            None => {
                issues.push(CardIssue {
                    index,
                    reason: SkipReason::NoTitleElement,
                });
                continue;
            }
        };

        let price_text = match first_text(&card, &price_selector) {
            Some(text) => text,
            None => {
                issues.push(CardIssue {
                    index,
                    reason: SkipReason::NoPriceElement,
                });
                continue;
            }
        };

        let price = match parse_price(&price_text) {
            Some(price) => price,
            None => {
                issues.push(CardIssue {
                    index,
                    reason: SkipReason::NoPriceDigits,
                });
                continue;
            }
        };

        catalog.insert(clean_name(&title_text), price);
    }

    Ok(ExtractReport { catalog, issues })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SourceSpec {
        SourceSpec {
            name: "test".into(),
            url: "https://example.com/catalog".into(),
            engine: Default::default(),
            card_class: "product".into(),
            title_class: "item-title".into(),
            price_class: "item-price".into(),
            headers: Default::default(),
        }
    }

    fn page(html: &str) -> PageContent {
        PageContent {
            url: "https://example.com/catalog".into(),
            html: html.to_string(),
        }
    }

    #[test]
    fn test_extract_basic_cards() {
        let html = r#"
            <div class="product-card">
                <h2 class="item-title">Weber Genesis E-325</h2>
                <span class="item-price">1 299,00 ₴</span>
            </div>
            <div class="product-card">
                <h2 class="item-title">Char-Broil Performance</h2>
                <span class="item-price">9 500 грн</span>
            </div>
        "#;
        let report = extract_catalog(&page(html), &spec()).unwrap();
        assert_eq!(report.catalog.len(), 2);
        assert!(report.issues.is_empty());
        assert_eq!(report.catalog.get("weber genesis e325"), Some(129900));
        assert_eq!(report.catalog.get("charbroil performance"), Some(9500));
    }

    #[test]
    fn test_class_substring_matches_decorated_classes() {
        // "product" fragment matches "grid product--wide", title/price
        // fragments match suffixed theme classes
        let html = r#"
            <li class="grid product--wide">
                <a class="item-title-link">Grill One</a>
                <b class="item-price-current">100</b>
            </li>
        "#;
        let report = extract_catalog(&page(html), &spec()).unwrap();
        assert_eq!(report.catalog.get("grill one"), Some(100));
    }

    #[test]
    fn test_card_missing_title_is_skipped_with_issue() {
        let html = r#"
            <div class="product"><span class="item-price">100</span></div>
            <div class="product">
                <h2 class="item-title">Good</h2>
                <span class="item-price">200</span>
            </div>
        "#;
        let report = extract_catalog(&page(html), &spec()).unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].index, 0);
        assert_eq!(report.issues[0].reason, SkipReason::NoTitleElement);
    }

    #[test]
    fn test_card_with_digitless_price_is_skipped() {
        let html = r#"
            <div class="product">
                <h2 class="item-title">Call For Price</h2>
                <span class="item-price">Contact us</span>
            </div>
        "#;
        let report = extract_catalog(&page(html), &spec()).unwrap();
        assert!(report.catalog.is_empty());
        assert_eq!(report.issues[0].reason, SkipReason::NoPriceDigits);
    }

    #[test]
    fn test_duplicate_title_keeps_last_price() {
        let html = r#"
            <div class="product">
                <h2 class="item-title">Same Grill</h2>
                <span class="item-price">100</span>
            </div>
            <div class="product">
                <h2 class="item-title">Same Grill</h2>
                <span class="item-price">150</span>
            </div>
        "#;
        let report = extract_catalog(&page(html), &spec()).unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.catalog.get("same grill"), Some(150));
    }

    #[test]
    fn test_field_nodes_are_not_cards() {
        // Title class contains the card fragment; the h2 must not be
        // treated as a (title-less) card of its own
        let mut spec = spec();
        spec.title_class = "product__title".into();
        spec.price_class = "product__price".into();

        let html = r#"
            <div class="product">
                <h2 class="product__title">Grill</h2>
                <span class="product__price">300</span>
            </div>
        "#;
        let report = extract_catalog(&page(html), &spec).unwrap();
        assert_eq!(report.catalog.get("grill"), Some(300));
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_invalid_fragment_is_fatal() {
        let mut bad = spec();
        bad.card_class = "a\"b".into();
        let result = extract_catalog(&page("<div></div>"), &bad);
        assert!(result.is_err());
    }
}

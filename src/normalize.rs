use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled regex for the title alphabet (compile once, use many times).
// Everything outside lowercase ASCII, Cyrillic, digits and whitespace is deleted.
static TITLE_STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zа-я0-9\s]").expect("Invalid title alphabet regex")
});

// Pre-compiled regex for digit runs in price text
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d").expect("Invalid digit regex")
});

/// Normalize a product title for cross-source comparison.
///
/// Lowercases, deletes every character outside the restricted alphabet
/// (ASCII letters, Cyrillic letters, digits, whitespace), and trims edges.
/// Characters are deleted rather than replaced with a separator, so
/// punctuation-joined fragments merge ("X-300" becomes "x300").
pub fn clean_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    TITLE_STRIP_RE.replace_all(&lowered, "").trim().to_string()
}

/// Parse a price string into an integer amount.
///
/// Concatenates every decimal digit in order and reads the result as base 10,
/// which tolerates currency symbols, thousands separators and non-breaking
/// spaces ("1 299,00 ₴" -> 129900). Returns `None` when the text contains no
/// digits at all - an absent price, deliberately distinct from zero.
pub fn parse_price(price_text: &str) -> Option<u64> {
    let digits: String = DIGITS_RE
        .find_iter(price_text)
        .map(|m| m.as_str())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

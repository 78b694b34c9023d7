use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricedeltaError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    #[error("Browser engine error: {0}")]
    BrowserError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PricedeltaError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PricedeltaError::HttpError(_) => Some(
                "Check your internet connection, or try the browser engine:\n  pricedelta run --browser"
            ),
            PricedeltaError::BrowserError(_) => Some(
                "The browser engine needs Node.js with Playwright:\n  npm install -g playwright && npx playwright install chromium"
            ),
            PricedeltaError::ExtractionError(_) => Some(
                "The site markup may have changed. Check the card/title/price class\nfragments in your config, then verify with: pricedelta preview ours"
            ),
            PricedeltaError::ConfigError(_) => Some(
                "Run `pricedelta init` to write a starter config"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PricedeltaError>;

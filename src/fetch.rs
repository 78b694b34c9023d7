use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

use once_cell::sync::Lazy;
use ureq::ResponseExt;

use crate::catalog::Engine;
use crate::config::Config;
use crate::error::{PricedeltaError, Result};

/// Default HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Realistic desktop browser User-Agent. Both storefronts reject obvious
/// bot UAs with a 403, so requests have to look like a normal browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

/// Shared HTTP agent for connection pooling
static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        .build()
        .into()
});

/// Content fetched from a catalog page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Final URL after redirects
    pub url: String,
    /// Raw HTML content
    pub html: String,
}

/// Fetch a catalog page using the specified engine
pub fn fetch(url: &str, engine: &Engine, headers: &HashMap<String, String>) -> Result<PageContent> {
    match engine {
        Engine::Http => fetch_http(url, headers),
        Engine::Browser => fetch_browser(url),
    }
}

/// Fetch using HTTP (ureq)
fn fetch_http(url: &str, headers: &HashMap<String, String>) -> Result<PageContent> {
    let mut request = HTTP_AGENT.get(url);

    // Add custom headers
    for (key, value) in headers {
        request = request.header(key, value);
    }

    request = request.header("User-Agent", BROWSER_USER_AGENT);

    let response = request.call()?;
    let final_url = response.get_uri().to_string();
    let html = response.into_body().read_to_string()?;

    Ok(PageContent {
        url: final_url,
        html,
    })
}

/// Fetch using a headless browser (Node subprocess).
///
/// Runs the embedded scroll script, which loads the page and keeps scrolling
/// to the bottom until the page height stops growing, so lazy-loaded
/// catalogs are fully materialized before the HTML is captured.
fn fetch_browser(url: &str) -> Result<PageContent> {
    let data_dir = Config::data_dir()?;
    let script_path = scroll_script_path()?;

    if !script_path.exists() {
        ensure_scroll_script()?;
    }

    // Run from data directory so Node.js can find the local node_modules
    let output = Command::new("node")
        .arg(&script_path)
        .arg(url)
        .arg("30000") // 30 second timeout
        .current_dir(&data_dir)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Try to parse as JSON error
        if let Ok(err) = serde_json::from_str::<serde_json::Value>(&stderr) {
            let msg = err["error"].as_str().unwrap_or("unknown error");
            return Err(PricedeltaError::BrowserError(msg.to_string()));
        }
        return Err(PricedeltaError::BrowserError(stderr.to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout)?;

    Ok(PageContent {
        url: result["url"].as_str().unwrap_or(url).to_string(),
        html: result["html"].as_str().unwrap_or("").to_string(),
    })
}

/// Get the path to the browser scroll script
fn scroll_script_path() -> Result<std::path::PathBuf> {
    let data_dir = Config::data_dir()?;
    Ok(data_dir.join("scroll.mjs"))
}

/// Ensure the scroll script exists in the data directory
pub fn ensure_scroll_script() -> Result<()> {
    let script_path = scroll_script_path()?;
    if let Some(parent) = script_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let script_content = include_str!("../assets/scroll.mjs");
    std::fs::write(&script_path, script_content)?;
    Ok(())
}

/// Check if the browser engine is available
pub fn check_browser() -> BrowserStatus {
    let node_available = Command::new("node")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if !node_available {
        return BrowserStatus::NodeMissing;
    }

    let playwright_available = Command::new("npx")
        .args(["playwright", "--version"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if !playwright_available {
        return BrowserStatus::PlaywrightMissing;
    }

    BrowserStatus::Ready
}

/// Status of the headless browser installation
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserStatus {
    Ready,
    NodeMissing,
    PlaywrightMissing,
}

impl BrowserStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, BrowserStatus::Ready)
    }

    pub fn install_instructions(&self) -> &'static str {
        match self {
            BrowserStatus::Ready => "Browser engine is ready",
            BrowserStatus::NodeMissing => "Install Node.js: https://nodejs.org/",
            BrowserStatus::PlaywrightMissing => {
                "Run: npm install -g playwright && npx playwright install chromium"
            }
        }
    }
}

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, USER_AGENT};
use std::path::Path;
use std::time::Duration;
use tracing::info;

const FETCH_TIMEOUT_SECS: u64 = 30;
const FETCH_USER_AGENT: &str = "usosplan/0.1";

/// Fetch one plan page. A single bounded-timeout GET with a fixed
/// User-Agent; no retries. `file://` URLs are read from disk so fixtures and
/// offline runs go through the same path.
pub fn fetch_plan_page(url: &str) -> Result<String> {
    if let Some(path) = url.strip_prefix("file://") {
        return fetch_local_page(Path::new(path));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .context("failed to build reqwest client")?;

    let response = client
        .get(url)
        .header(USER_AGENT, HeaderValue::from_static(FETCH_USER_AGENT))
        .send()
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("request to {url} failed with status {status}");
    }

    let body = response
        .text()
        .with_context(|| format!("failed to read response body from {url}"))?;

    info!(%url, bytes = body.len(), "fetched plan page");
    Ok(body)
}

fn fetch_local_page(path: &Path) -> Result<String> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read local page {}", path.display()))?;

    info!(file = %path.display(), bytes = body.len(), "loaded local plan page");
    Ok(body)
}

//! Integration tests for the soapconv server.
//!
//! These tests require a running server at `localhost:8000`.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p soapconv-integration -- --ignored
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Base URL of the server under test.
fn endpoint_url() -> String {
    std::env::var("SOAPCONV_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8000".to_owned())
}

/// Build the full URL for a request path.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", endpoint_url().trim_end_matches('/'))
}

/// Create an HTTP client for the server under test.
#[must_use]
pub fn client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// POST a raw body and return the status and body text.
pub async fn post_raw(path: &str, body: &'static str) -> anyhow::Result<(u16, String)> {
    let resp = client().post(url(path)).body(body).send().await?;
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    tracing::debug!(path, status, "received response");
    Ok((status, text))
}

/// POST a JSON body and return the status and body text.
pub async fn post_json(path: &str, body: &serde_json::Value) -> anyhow::Result<(u16, String)> {
    let resp = client().post(url(path)).json(body).send().await?;
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    tracing::debug!(path, status, "received response");
    Ok((status, text))
}

mod test_ambient;
mod test_rest;
mod test_soap;

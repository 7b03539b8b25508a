//! Shared HTTP plumbing for the scraping and API connectors.

use std::time::Duration;

use esgscope_core::EsgError;
use serde::de::DeserializeOwned;
use url::Url;

/// Browser-like user agent; several exchange sites reject the reqwest default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Default bound for one HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by one connector.
///
/// # Errors
/// Returns `Config` if the TLS backend or client configuration cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, EsgError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| EsgError::Config(format!("http client: {e}")))
}

/// Parse a configured base URL, normalizing it to end with `/` so joins append.
///
/// # Errors
/// Returns `Config` for unparseable URLs.
pub fn base_url(raw: &str) -> Result<Url, EsgError> {
    let mut s = raw.trim().to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    Url::parse(&s).map_err(|e| EsgError::Config(format!("invalid base url '{raw}': {e}")))
}

/// Join a relative path onto a base URL.
pub(crate) fn join(connector: &'static str, base: &Url, path: &str) -> Result<Url, EsgError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| EsgError::connector(connector, format!("bad url path '{path}': {e}")))
}

fn map_send_err(connector: &'static str, e: &reqwest::Error) -> EsgError {
    if e.is_timeout() {
        EsgError::provider_timeout(connector, "esg")
    } else {
        EsgError::connector(connector, format!("request failed: {e}"))
    }
}

fn check_status(
    connector: &'static str,
    what: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, EsgError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(match status.as_u16() {
        404 => EsgError::not_found(what.to_string()),
        429 => EsgError::connector(connector, format!("rate limit: {what}")),
        code => EsgError::connector(connector, format!("status {code}: {what}")),
    })
}

/// GET `url` and return the body as text.
///
/// # Errors
/// `NotFound` on 404, `ProviderTimeout` on client timeout, `Connector` otherwise.
pub async fn get_text(
    client: &reqwest::Client,
    connector: &'static str,
    what: &str,
    url: Url,
) -> Result<String, EsgError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(connector, url = %url, "GET");
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| map_send_err(connector, &e))?;
    check_status(connector, what, resp)?
        .text()
        .await
        .map_err(|e| map_send_err(connector, &e))
}

/// GET `url` and return the raw body, e.g. for PDF documents.
///
/// # Errors
/// As [`get_text`].
pub async fn get_bytes(
    client: &reqwest::Client,
    connector: &'static str,
    what: &str,
    url: Url,
) -> Result<Vec<u8>, EsgError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(connector, url = %url, "GET bytes");
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| map_send_err(connector, &e))?;
    let body = check_status(connector, what, resp)?
        .bytes()
        .await
        .map_err(|e| map_send_err(connector, &e))?;
    Ok(body.to_vec())
}

/// GET `url` and decode the JSON body.
///
/// # Errors
/// As [`get_text`], plus `Data` when the body does not match `T`.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    connector: &'static str,
    what: &str,
    url: Url,
) -> Result<T, EsgError> {
    let body = get_text(client, connector, what, url).await?;
    serde_json::from_str(&body).map_err(|e| EsgError::Data(format!("{connector}: {what}: {e}")))
}

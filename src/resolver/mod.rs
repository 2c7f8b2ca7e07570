//! Redirect-based URL and filename resolution.
//!
//! The download API answers an authenticated GET on the model endpoint with a
//! redirect whose `Location` points at the signed content URL. The true
//! filename travels inside that location's `response-content-disposition`
//! query parameter, so the redirect must be inspected rather than followed:
//! the client here is built with redirect handling disabled.
//!
//! Resolution has no side effects; it produces a [`ResolvedTarget`] that the
//! transfer engine consumes.

mod error;

pub use error::ResolveError;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::user_agent::BROWSER_USER_AGENT;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Query parameter on the redirect location that carries the content
/// disposition (and thus the authoritative filename).
const DISPOSITION_PARAM: &str = "response-content-disposition";

/// A resolved download target: the signed content URL plus the
/// server-supplied filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The final content URL to stream from.
    pub content_url: String,
    /// The authoritative output filename, percent-decoded.
    pub filename: String,
}

/// Resolves model endpoint URLs into concrete download targets.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
}

impl Resolver {
    /// Creates a resolver whose client surfaces redirects to the caller
    /// instead of following them.
    ///
    /// # Errors
    ///
    /// Returns the builder error when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Resolves `url` into a content URL and filename.
    ///
    /// Sends an authenticated GET and inspects the response:
    /// - 301/302/303/307/308 → parse `Location` and its disposition parameter
    /// - 404 → [`ResolveError::NotFound`]
    /// - anything else → [`ResolveError::UnexpectedStatus`]
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on transport failures or when the response
    /// does not yield a usable target.
    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn resolve(&self, url: &str, token: &str) -> Result<ResolvedTarget, ResolveError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| ResolveError::network(url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ResolveError::not_found(url));
        }
        if !is_inspectable_redirect(status) {
            return Err(ResolveError::unexpected_status(url, status.as_u16()));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ResolveError::missing_location(url))?;

        let filename = filename_from_location(location)
            .ok_or_else(|| ResolveError::filename_resolution(location))?;

        debug!(filename = %filename, "resolved download target");

        Ok(ResolvedTarget {
            content_url: location.to_string(),
            filename,
        })
    }
}

/// Redirect statuses whose `Location` carries the signed content URL.
/// 300 (Multiple Choices) and 304 (Not Modified) do not qualify.
fn is_inspectable_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Extracts the percent-decoded filename from a redirect location's
/// `response-content-disposition` query parameter.
///
/// `Url::query_pairs` decodes the parameter value once (yielding e.g.
/// `attachment; filename="model.safetensors"`); the filename token is then
/// decoded a second time because signed URLs double-encode it.
fn filename_from_location(location: &str) -> Option<String> {
    let parsed = Url::parse(location).ok()?;
    let disposition = parsed
        .query_pairs()
        .find(|(key, _)| key == DISPOSITION_PARAM)
        .map(|(_, value)| value.into_owned())?;
    filename_from_disposition(&disposition)
}

/// Extracts the `filename=` token from a content-disposition value,
/// stripping surrounding quotes and percent-decoding.
fn filename_from_disposition(disposition: &str) -> Option<String> {
    let (_, rest) = disposition.split_once("filename=")?;
    let raw = rest.trim().trim_matches('"');
    let decoded = urlencoding::decode(raw).ok()?;
    let filename = decoded.trim().trim_matches('"').to_string();
    (!filename.is_empty()).then_some(filename)
}

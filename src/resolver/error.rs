//! Error types for the resolver module.

use thiserror::Error;

/// Errors that can occur while resolving a download endpoint.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error resolving {url}: {source}")]
    Network {
        /// The endpoint URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint returned 404: no such model.
    #[error("file not found at {url}")]
    NotFound {
        /// The endpoint URL that returned 404.
        url: String,
    },

    /// The endpoint returned neither a redirect nor 404.
    #[error("no redirect found resolving {url} (HTTP {status}), something went wrong")]
    UnexpectedStatus {
        /// The endpoint URL.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The redirect response carried no usable `Location` header.
    #[error("redirect from {url} is missing a Location header")]
    MissingLocation {
        /// The endpoint URL that redirected.
        url: String,
    },

    /// The redirect location carried no usable filename metadata.
    #[error("unable to determine filename from redirect location {location}")]
    FilenameResolution {
        /// The redirect location that lacked disposition metadata.
        location: String,
    },
}

impl ResolveError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a not-found error.
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// Creates an unexpected-status error.
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a missing-Location error.
    pub fn missing_location(url: impl Into<String>) -> Self {
        Self::MissingLocation { url: url.into() }
    }

    /// Creates a filename-resolution error.
    pub fn filename_resolution(location: impl Into<String>) -> Self {
        Self::FilenameResolution {
            location: location.into(),
        }
    }
}

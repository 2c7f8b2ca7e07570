//! Error types for the transfer module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a streaming transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-level error sending the download request.
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The content URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered a plain GET with a non-success status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The content URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A range request was answered with neither 200 nor 206.
    #[error("unexpected response status {status} negotiating resume for {url}")]
    ResumeNegotiation {
        /// The content URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body stream failed mid-transfer.
    #[error("error streaming response body from {url}: {source}")]
    Stream {
        /// The content URL being streamed.
        url: String,
        /// The underlying stream error.
        #[source]
        source: std::io::Error,
    },

    /// File system error during the transfer (create dir, open, write).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The server sent more bytes than the total it declared.
    #[error("server sent more data than declared for {path}: expected {declared} bytes, received {received}")]
    Overrun {
        /// The output path being written.
        path: PathBuf,
        /// Total size declared by the server.
        declared: u64,
        /// Bytes received so far.
        received: u64,
    },
}

impl TransferError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a resume negotiation error.
    pub fn resume_negotiation(url: impl Into<String>, status: u16) -> Self {
        Self::ResumeNegotiation {
            url: url.into(),
            status,
        }
    }

    /// Creates a body stream error.
    pub fn stream(url: impl Into<String>, source: std::io::Error) -> Self {
        Self::Stream {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an overrun error.
    pub fn overrun(path: impl Into<PathBuf>, declared: u64, received: u64) -> Self {
        Self::Overrun {
            path: path.into(),
            declared,
            received,
        }
    }
}

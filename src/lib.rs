//! civfetch core library
//!
//! This library implements a resumable downloader for CivitAI model files.
//! A download runs in two sequential stages:
//!
//! - [`resolver`] - authenticated redirect inspection that turns a download
//!   endpoint URL into the real content URL plus the server-supplied filename
//! - [`transfer`] - byte-range resume negotiation and the streaming
//!   read/write loop with progress and throughput reporting
//!
//! Supporting collaborators: [`parser`] (model ID normalization), [`token`]
//! (plaintext API token store), and [`cli`] (argument definitions for the
//! binary).

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod parser;
pub mod resolver;
pub mod token;
pub mod transfer;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use parser::{BASE_URL, normalize_input};
pub use resolver::{ResolveError, ResolvedTarget, Resolver};
pub use token::{TokenStore, TokenStoreError};
pub use transfer::{TransferEngine, TransferError, TransferSummary};

//! Streaming transfer engine with byte-range resume.
//!
//! Given a [`ResolvedTarget`](crate::resolver::ResolvedTarget), the engine
//! determines the local resume position, negotiates range support with the
//! server (a single downgrade from range request to full restart, never a
//! general retry), and streams the body to disk in fixed-size chunks while
//! reporting progress and instantaneous throughput.
//!
//! The partial file on disk is the only resume checkpoint: writes land
//! directly on the final path and failures leave the partial file in place
//! for a future invocation.

mod engine;
mod error;
mod progress;

pub use engine::{TransferEngine, TransferSummary};
pub use error::TransferError;

/// Fixed read size for the streaming loop (1,600 KiB).
pub(crate) const CHUNK_SIZE: usize = 1_638_400;

//! Shared User-Agent string for resolver and transfer HTTP clients.
//!
//! The download API rejects requests without a browser-like identity, so both
//! clients send the same fixed string. Kept in one place so resolution and
//! transfer traffic stay consistent.

/// Static browser-like User-Agent sent on every request.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

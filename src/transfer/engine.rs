//! The streaming transfer engine.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures_util::TryStreamExt;
use reqwest::header::RANGE;
use reqwest::{Client, StatusCode};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::{debug, info, instrument};

use crate::resolver::ResolvedTarget;
use crate::user_agent::BROWSER_USER_AGENT;

use super::error::TransferError;
use super::progress::{ProgressReporter, SpeedTracker};
use super::CHUNK_SIZE;

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Outcome of a completed transfer.
#[derive(Debug, Clone)]
pub struct TransferSummary {
    /// Final output path.
    pub path: PathBuf,
    /// File size after the transfer, including any resumed prefix.
    pub bytes_written: u64,
    /// Total size declared by the server, when known.
    pub total_size: Option<u64>,
    /// Whether the server honored a byte-range resume.
    pub resumed: bool,
    /// Wall time of the streaming loop (excludes resume negotiation).
    pub elapsed: Duration,
}

/// Downloads resolved targets to disk with byte-range resume support.
///
/// One engine owns one HTTP connection at a time; the streaming loop is the
/// only suspension point. There is no retry policy beyond the single
/// downgrade from a range request to a full restart when the server ignores
/// range semantics.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    client: Client,
}

impl TransferEngine {
    /// Creates an engine with the shared browser User-Agent and a connect
    /// timeout. No overall request timeout is set: model files routinely take
    /// longer than any reasonable fixed deadline.
    ///
    /// # Errors
    ///
    /// Returns the builder error when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Streams `target` into `output_dir / target.filename`.
    ///
    /// Creates the output directory if missing, resumes from the size of an
    /// existing partial file, and leaves the partial file in place on
    /// failure (it is the resume checkpoint for the next invocation).
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] on network, negotiation, or filesystem
    /// failures, and when the server sends more bytes than it declared.
    #[instrument(skip(self, target), fields(filename = %target.filename))]
    pub async fn transfer(
        &self,
        target: &ResolvedTarget,
        output_dir: &Path,
    ) -> Result<TransferSummary, TransferError> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| TransferError::io(output_dir.to_path_buf(), e))?;
        let local_path = output_dir.join(&target.filename);

        // The partial file on disk is the sole resume marker. Only a missing
        // file means a fresh download; any other stat failure must not be
        // conflated with it, or a resumable file gets truncated.
        let resume_offset = match tokio::fs::metadata(&local_path).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(TransferError::io(local_path.clone(), e)),
        };

        let (response, resume_offset) = self
            .negotiate(&target.content_url, resume_offset)
            .await?;
        let resumed = resume_offset > 0;

        // On 206 the Content-Length covers only the remaining bytes; the true
        // total includes what is already on disk.
        let total_size = response
            .content_length()
            .map(|remaining| remaining + resume_offset);

        let mut file = open_output_file(&local_path, resumed).await?;

        let mut progress = StreamProgress::new(&target.filename, resume_offset, total_size);
        let stream = response.bytes_stream().map_err(io::Error::other);
        let mut reader = StreamReader::new(stream);
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut bytes_written = resume_offset;

        let session_start = Instant::now();
        loop {
            let read_start = Instant::now();
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| TransferError::stream(&target.content_url, e))?;
            let read_elapsed = read_start.elapsed();

            if n == 0 {
                break;
            }

            file.write_all(&buf[..n])
                .await
                .map_err(|e| TransferError::io(local_path.clone(), e))?;
            bytes_written += n as u64;

            if let Some(total) = total_size
                && bytes_written > total
            {
                return Err(TransferError::overrun(local_path, total, bytes_written));
            }

            progress.chunk_written(bytes_written, n, read_elapsed);
        }

        file.flush()
            .await
            .map_err(|e| TransferError::io(local_path.clone(), e))?;

        let elapsed = session_start.elapsed();
        progress.finish(&target.filename, elapsed);

        info!(
            path = %local_path.display(),
            bytes = bytes_written,
            resumed,
            "download complete"
        );

        Ok(TransferSummary {
            path: local_path,
            bytes_written,
            total_size,
            resumed,
            elapsed,
        })
    }

    /// Issues the download GET, negotiating byte-range resume when a partial
    /// file exists.
    ///
    /// Returns the response to stream from plus the effective resume offset
    /// (reset to 0 when the server ignores the range request).
    async fn negotiate(
        &self,
        url: &str,
        resume_offset: u64,
    ) -> Result<(reqwest::Response, u64), TransferError> {
        if resume_offset > 0 {
            info!(
                resume_offset,
                "found existing file, attempting to resume download"
            );
            let response = self
                .client
                .get(url)
                .header(RANGE, format!("bytes={resume_offset}-"))
                .send()
                .await
                .map_err(|e| TransferError::network(url, e))?;

            return match response.status() {
                StatusCode::PARTIAL_CONTENT => {
                    debug!("server supports resume, continuing download");
                    Ok((response, resume_offset))
                }
                StatusCode::OK => {
                    // Protocol downgrade: range ignored, restart from byte 0.
                    info!("server does not support resume, restarting download");
                    Ok((response, 0))
                }
                status => Err(TransferError::resume_negotiation(url, status.as_u16())),
            };
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransferError::network(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::http_status(url, status.as_u16()));
        }
        Ok((response, 0))
    }
}

/// Opens the output file: append for an honored resume, truncate otherwise.
async fn open_output_file(path: &Path, resumed: bool) -> Result<File, TransferError> {
    let result = if resumed {
        OpenOptions::new().append(true).open(path).await
    } else {
        File::create(path).await
    };
    result.map_err(|e| TransferError::io(path.to_path_buf(), e))
}

/// Per-transfer progress state: the terminal reporter plus the throughput
/// sample threaded through the loop.
struct StreamProgress {
    reporter: ProgressReporter,
    speed: SpeedTracker,
}

impl StreamProgress {
    fn new(filename: &str, resume_offset: u64, total_size: Option<u64>) -> Self {
        Self {
            reporter: ProgressReporter::new(filename, resume_offset, total_size),
            speed: SpeedTracker::new(),
        }
    }

    fn chunk_written(&mut self, bytes_written: u64, chunk_len: usize, read_elapsed: Duration) {
        let mbps = self.speed.record(chunk_len, read_elapsed);
        self.reporter.chunk_written(bytes_written, mbps);
    }

    fn finish(self, filename: &str, elapsed: Duration) {
        self.reporter.finish(filename, elapsed);
    }
}

//! Progress, throughput, and duration reporting for transfers.
//!
//! Throughput is sampled per chunk read: bytes in the chunk divided by the
//! wall time of that single read, in MB/s. A read that completes with zero
//! measurable elapsed time yields no valid sample; the tracker retains the
//! last known value instead. That retention rule lives in [`SpeedTracker`] as
//! explicit state rather than a variable carried through the loop.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Instantaneous throughput tracker with last-known-value retention.
#[derive(Debug, Default)]
pub(crate) struct SpeedTracker {
    mbps: f64,
}

impl SpeedTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records one chunk read and returns the current MB/s sample.
    ///
    /// Zero-elapsed reads are skipped: the previous sample is retained.
    pub(crate) fn record(&mut self, chunk_len: usize, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.mbps = chunk_len as f64 / secs / BYTES_PER_MB;
        }
        self.mbps
    }
}

/// Formats an elapsed duration as the smallest applicable unit combination:
/// `Ns`, `Mm Ss`, or `Hh Mm Ss`.
pub(crate) fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Terminal progress reporter for one transfer.
///
/// With a known total size this draws a percent bar; with an unknown total it
/// falls back to a byte counter (percentage suppressed, throughput still
/// shown). The instantaneous speed sample rides in the bar message.
pub(crate) struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub(crate) fn new(filename: &str, resume_offset: u64, total_size: Option<u64>) -> Self {
        let bar = match total_size {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(
                        "Downloading: {prefix} [{bar:40.cyan/blue}] {percent:>3}% - {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::no_length();
                bar.set_style(
                    ProgressStyle::with_template("Downloading: {prefix} {bytes} - {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_prefix(filename.to_string());
        bar.set_position(resume_offset);
        Self { bar }
    }

    /// Reports one chunk: absolute bytes written and the current speed sample.
    ///
    /// Callers must invoke this only after the chunk has been written to the
    /// file, so the reported count never runs ahead of the bytes on disk.
    pub(crate) fn chunk_written(&self, bytes_written: u64, speed_mbps: f64) {
        self.bar.set_position(bytes_written);
        self.bar.set_message(format!("{speed_mbps:.2} MB/s"));
    }

    /// Clears the bar and prints the completion report.
    pub(crate) fn finish(self, filename: &str, elapsed: Duration) {
        self.bar.finish_and_clear();
        println!("Download completed. File saved as: {filename}");
        println!("Downloaded in {}", format_duration(elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_tracker_computes_mbps() {
        let mut tracker = SpeedTracker::new();
        // 2 MiB in one second = 2.0 MB/s
        let sample = tracker.record(2 * 1024 * 1024, Duration::from_secs(1));
        assert!((sample - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_tracker_retains_last_sample_on_zero_elapsed() {
        let mut tracker = SpeedTracker::new();
        let first = tracker.record(1024 * 1024, Duration::from_secs(1));
        let second = tracker.record(8 * 1024 * 1024, Duration::ZERO);
        assert!((first - 1.0).abs() < f64::EPSILON);
        assert!(
            (second - first).abs() < f64::EPSILON,
            "zero-elapsed read must retain the prior sample"
        );
    }

    #[test]
    fn test_speed_tracker_starts_at_zero() {
        let mut tracker = SpeedTracker::new();
        let sample = tracker.record(1024, Duration::ZERO);
        assert!((sample - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_duration_seconds_only() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0s");
        assert_eq!(format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
    }

    #[test]
    fn test_format_duration_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3599)), "59m 59s");
    }

    #[test]
    fn test_reporter_with_total_tracks_percentage() {
        let reporter = ProgressReporter::new("model.bin", 1000, Some(1500));
        assert_eq!(reporter.bar.length(), Some(1500));
        assert_eq!(reporter.bar.position(), 1000);
    }

    #[test]
    fn test_reporter_without_total_suppresses_percentage() {
        // Unknown total: no bar length, so no percentage is rendered; the
        // throughput sample still rides in the message.
        let reporter = ProgressReporter::new("model.bin", 0, None);
        assert!(reporter.bar.length().is_none());

        reporter.chunk_written(4096, 1.5);
        assert_eq!(reporter.bar.position(), 4096);
        assert_eq!(reporter.bar.message(), "1.50 MB/s");
    }

    #[test]
    fn test_format_duration_hours_minutes_seconds() {
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h 0m 0s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}

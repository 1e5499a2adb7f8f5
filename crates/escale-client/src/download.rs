//! Progress reporting for workbook downloads.

/// Progress information during a download.
#[derive(Debug, Clone, Copy)]
pub struct DownloadProgress {
    /// Number of bytes downloaded so far.
    pub downloaded: u64,
    /// Total number of bytes to download, or 0 when the server did not say.
    pub total: u64,
    /// Download progress as a fraction (0.0 to 1.0).
    pub fraction: f32,
}

impl DownloadProgress {
    /// Creates a new progress instance.
    #[must_use]
    pub fn new(downloaded: u64, total: u64) -> Self {
        let fraction = if total > 0 {
            (downloaded as f64 / total as f64) as f32
        } else {
            0.0
        };

        Self {
            downloaded,
            total,
            fraction,
        }
    }

    /// Returns the download progress as a percentage (0-100).
    #[must_use]
    pub fn percentage(&self) -> u8 {
        (self.fraction * 100.0).min(100.0) as u8
    }

    /// Formats the downloaded amount in human-readable form.
    #[must_use]
    pub fn downloaded_display(&self) -> String {
        format_bytes(self.downloaded)
    }

    /// Formats the total size in human-readable form.
    #[must_use]
    pub fn total_display(&self) -> String {
        format_bytes(self.total)
    }
}

/// Formats a byte count in human-readable form.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

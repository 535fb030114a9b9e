/// Bytes received so far by a transfer, as last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadProgress {
    /// Announced size in bytes, 0 while unknown.
    pub total: u64,
    pub downloaded: u64,
}

impl DownloadProgress {
    pub fn new(total: u64, downloaded: u64) -> Self {
        Self { total, downloaded }
    }

    /// Share of the file received, in percent. `None` when the size is unknown.
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.downloaded as f64 / self.total as f64 * 100.0)
    }

    /// Whether at least `threshold` percent of the file has arrived.
    ///
    /// Never true while the total size is unknown.
    pub fn reached(&self, threshold: f64) -> bool {
        self.total != 0 && self.downloaded as f64 * 100.0 >= threshold * self.total as f64
    }

    /// Progress bar range and value in kilobytes. The bar is full when the
    /// playback threshold is reached, not when the download is.
    pub fn bar(&self, threshold: f64) -> (f32, f32) {
        let max = (self.total / 1000) as f64 * (threshold / 100.0);
        let value = (self.downloaded / 1000) as f64;
        (max as f32, value.min(max) as f32)
    }
}

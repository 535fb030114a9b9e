//! In-process download manager.
//!
//! A transfer runs as a single async task. The UI never awaits it directly:
//! it reads progress snapshots from shared counters at its own pace and is
//! told once, through the completion future, how the transfer ended.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::cache;
use crate::error::{Error, Result};
use crate::progress::DownloadProgress;

pub type DownloadId = u64;

/// Everything needed to enqueue one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: Url,
    pub title: String,
    pub description: String,
    /// Whether progress is shown on screen while the transfer runs.
    pub visible: bool,
    pub destination: PathBuf,
}

impl DownloadRequest {
    pub fn new(url: Url, destination: PathBuf) -> Self {
        Self {
            url,
            title: String::new(),
            description: String::new(),
            visible: true,
            destination,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

#[derive(Debug, Default)]
struct Counters {
    total: AtomicU64,
    downloaded: AtomicU64,
    running: AtomicBool,
}

/// Handle on an enqueued transfer.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    id: DownloadId,
    request: Arc<DownloadRequest>,
    counters: Arc<Counters>,
}

impl DownloadJob {
    pub fn id(&self) -> DownloadId {
        self.id
    }

    pub fn request(&self) -> &DownloadRequest {
        &self.request
    }

    pub fn is_running(&self) -> bool {
        self.counters.running.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> DownloadProgress {
        DownloadProgress::new(
            self.counters.total.load(Ordering::Relaxed),
            self.counters.downloaded.load(Ordering::Relaxed),
        )
    }
}

/// How a transfer ended. Errors are carried as text so the outcome can travel
/// inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub id: DownloadId,
    pub result: std::result::Result<PathBuf, String>,
}

#[derive(Debug, Default)]
pub struct DownloadManager {
    client: reqwest::Client,
    jobs: Vec<DownloadJob>,
    next_id: DownloadId,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transfer into `destination` that has not finished yet, if any.
    pub fn ongoing(&self, destination: &Path) -> Option<&DownloadJob> {
        self.jobs
            .iter()
            .find(|job| job.is_running() && job.request.destination == destination)
    }

    pub fn query(&self, id: DownloadId) -> Option<DownloadProgress> {
        self.jobs
            .iter()
            .find(|job| job.id == id)
            .map(DownloadJob::snapshot)
    }

    /// Register a transfer and hand back its completion future.
    ///
    /// Nothing happens until the future is polled; the caller decides which
    /// executor drives it.
    pub fn enqueue(
        &mut self,
        request: DownloadRequest,
    ) -> (DownloadJob, BoxFuture<'static, DownloadOutcome>) {
        let id = self.next_id;
        self.next_id += 1;

        let counters = Arc::new(Counters::default());
        counters.running.store(true, Ordering::Release);

        let job = DownloadJob {
            id,
            request: Arc::new(request),
            counters,
        };
        self.jobs.push(job.clone());

        log::info!(
            "Download {} enqueued: {} -> {} ({})",
            id,
            job.request.url,
            job.request.destination.display(),
            job.request.title
        );

        let client = self.client.clone();
        let running = job.clone();
        let completion = async move {
            let result = transfer(&client, &running.request, &running.counters).await;
            running.counters.running.store(false, Ordering::Release);

            match &result {
                Ok(path) => log::info!(
                    "Download {} complete: {} ({} bytes)",
                    id,
                    path.display(),
                    running.counters.downloaded.load(Ordering::Relaxed)
                ),
                Err(e) => log::debug!("Download {} ended with error: {}", id, e),
            }

            DownloadOutcome {
                id,
                result: result.map_err(|e| e.to_string()),
            }
        }
        .boxed();

        (job, completion)
    }
}

async fn transfer(
    client: &reqwest::Client,
    request: &DownloadRequest,
    counters: &Counters,
) -> Result<PathBuf> {
    let destination = &request.destination;
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    cache::unmark(destination).await?;

    let mut response = client.get(request.url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }

    let expected = response.content_length().unwrap_or(0);
    counters.total.store(expected, Ordering::Relaxed);

    let mut file = tokio::fs::File::create(destination).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        counters
            .downloaded
            .fetch_add(chunk.len() as u64, Ordering::Relaxed);
    }
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    let written = tokio::fs::metadata(destination).await?.len();
    if expected != 0 && written != expected {
        return Err(Error::Truncated { expected, written });
    }

    cache::mark_complete(destination).await?;
    Ok(destination.clone())
}

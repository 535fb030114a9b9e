use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;

const MARKER_SUFFIX: &str = ".done";

/// Path of the file marking `video` as completely downloaded.
pub fn marker_path(video: &Path) -> PathBuf {
    let mut name = OsString::from(video.as_os_str());
    name.push(MARKER_SUFFIX);
    PathBuf::from(name)
}

/// A cached video is usable only once its transfer has finished.
///
/// A bare file without its marker is what an interrupted download leaves
/// behind.
pub fn is_usable(video: &Path) -> bool {
    video.is_file() && marker_path(video).is_file()
}

/// Mark `video` as complete. Called off the UI thread once the transfer ends.
pub async fn mark_complete(video: &Path) -> Result<()> {
    tokio::fs::write(marker_path(video), b"done").await?;
    Ok(())
}

/// Forget a previous completion before overwriting `video`.
pub async fn unmark(video: &Path) -> Result<()> {
    match tokio::fs::remove_file(marker_path(video)).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

/// Delete the cache directory and everything in it.
pub fn clear_cache(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            log::info!("Cache cleared: {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Cache already empty: {}", dir.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_sits_next_to_video() {
        assert_eq!(
            marker_path(Path::new("/cache/hearth/video.mp4")),
            PathBuf::from("/cache/hearth/video.mp4.done")
        );
    }

    #[tokio::test]
    async fn test_partial_file_is_not_usable() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("video.mp4");
        assert!(!is_usable(&video));

        std::fs::write(&video, b"half a fire").unwrap();
        assert!(!is_usable(&video));

        mark_complete(&video).await.unwrap();
        assert!(is_usable(&video));

        unmark(&video).await.unwrap();
        assert!(!is_usable(&video));
        // Unmarking twice is fine.
        unmark(&video).await.unwrap();
    }

    #[test]
    fn test_clear_cache() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("hearth");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("video.mp4"), b"fire").unwrap();

        clear_cache(&root).unwrap();
        assert!(!root.exists());

        clear_cache(&root).unwrap();
    }
}

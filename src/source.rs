use std::path::PathBuf;
use url::Url;

use crate::cache;
use crate::config::{AcquisitionMode, Config};
use crate::download::DownloadRequest;
use crate::error::{Error, Result};

/// Where the player reads the video from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Remote(Url),
}

impl Source {
    pub fn to_url(&self) -> Result<Url> {
        match self {
            Source::File(path) => {
                let absolute = std::path::absolute(path)?;
                Url::from_file_path(&absolute).map_err(|()| Error::Path(path.clone()))
            }
            Source::Remote(url) => Ok(url.clone()),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// What has to happen before playback can start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Ready(Source),
    Download(DownloadRequest),
}

/// Pick the video source for this run.
pub fn resolve(config: &Config) -> Result<Resolution> {
    let url = Url::parse(&config.url)?;

    if config.mode == AcquisitionMode::Stream {
        log::info!("Streaming {}", url);
        return Ok(Resolution::Ready(Source::Remote(url)));
    }

    let video = config.video_path().ok_or(Error::NoCacheDir)?;
    log::debug!("Cached video path: {}", video.display());

    if cache::is_usable(&video) {
        log::info!("Playing cached video {}", video.display());
        return Ok(Resolution::Ready(Source::File(video)));
    }

    if video.exists() {
        log::info!("Discarding incomplete download {}", video.display());
    }

    Ok(Resolution::Download(
        DownloadRequest::new(url, video)
            .title("Hearth")
            .description("Downloading the fireplace video")
            .visible(true),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    fn config_in(dir: &Path, extra: &[&str]) -> Config {
        let mut args = vec![
            "hearth",
            "--url",
            "http://localhost/fire.mp4",
            "--cache-dir",
            dir.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        Config::parse_from(args)
    }

    #[test]
    fn test_empty_cache_requires_download() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &[]);

        match resolve(&config).unwrap() {
            Resolution::Download(request) => {
                assert_eq!(request.url.as_str(), "http://localhost/fire.mp4");
                assert_eq!(request.destination, dir.path().join("video.mp4"));
                assert!(request.visible);
                assert_eq!(request.title, "Hearth");
            }
            other => panic!("expected a download, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completed_cache_plays_directly() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("video.mp4");
        std::fs::write(&video, b"fire").unwrap();
        cache::mark_complete(&video).await.unwrap();

        let config = config_in(dir.path(), &[]);
        assert_eq!(
            resolve(&config).unwrap(),
            Resolution::Ready(Source::File(video))
        );
    }

    #[test]
    fn test_partial_cache_is_downloaded_again() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("video.mp4"), b"half").unwrap();

        let config = config_in(dir.path(), &[]);
        assert!(matches!(
            resolve(&config).unwrap(),
            Resolution::Download(_)
        ));
    }

    #[test]
    fn test_stream_mode_skips_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &["--mode", "stream"]);

        assert_eq!(
            resolve(&config).unwrap(),
            Resolution::Ready(Source::Remote(
                Url::parse("http://localhost/fire.mp4").unwrap()
            ))
        );
    }

    #[test]
    fn test_bad_url_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), &[]);
        config.url = "not a url".to_string();

        assert!(matches!(resolve(&config), Err(Error::Url(_))));
    }

    #[test]
    fn test_file_source_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = Source::File(dir.path().join("video.mp4")).to_url().unwrap();

        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("/video.mp4"));
    }
}

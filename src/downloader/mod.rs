mod fetcher;

use std::cell::RefCell;
use std::env;
use std::fmt;
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;
use crate::registry::{Entry, LogoRegistry};

pub use fetcher::UReqFetcher;

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ok(Vec<u8>),
    /// Non-success status with its reason phrase.
    Status(u16, String),
    InvalidBody(String),
    NetworkError(String),
}

impl Response {
    pub fn ok(body: Vec<u8>) -> Self {
        Self::Ok(body)
    }

    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        Self::Status(code, reason.into())
    }

    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::InvalidBody(reason.into())
    }

    pub fn network_error(reason: impl Into<String>) -> Self {
        Self::NetworkError(reason.into())
    }
}

/// Performs a single GET and hands back the whole body.
pub trait FileDownloader {
    fn fetch(&self, url: &str) -> Response;
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("cannot prepare directory {}: {source}", .path.display())]
    Directory { path: PathBuf, source: io::Error },

    #[error("invalid url {0}")]
    InvalidUrl(String),

    #[error("HTTP Error {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("{0}")]
    NetworkError(String),

    #[error("failed to read response body: {0}")]
    InvalidBody(String),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, PartialEq)]
pub struct Download {
    pub source: String,
    pub file: PathBuf,
    pub size: usize,
}

impl Download {
    pub fn new(source: String, file: PathBuf, size: usize) -> Self {
        Self { source, file, size }
    }
}

/// Outcome of one registry entry. Only used for reporting.
#[derive(Debug)]
pub enum DownloadResult {
    Saved(Download),
    Failed {
        filename: String,
        error: DownloadError,
    },
}

impl DownloadResult {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Fetches registry entries into one directory. Progress lines go to `out`.
pub struct Downloader<T: FileDownloader, W: Write = Stdout> {
    fetcher: T,
    path: PathBuf,
    out: RefCell<W>,
}

impl<T> Downloader<T, Stdout>
where
    T: FileDownloader,
{
    pub fn with_fetcher(path: impl Into<PathBuf>, fetcher: T) -> Self {
        Downloader {
            path: path.into(),
            fetcher,
            out: RefCell::new(io::stdout()),
        }
    }
}

impl<T, W> Downloader<T, W>
where
    T: FileDownloader,
    W: Write,
{
    /// Replace the progress sink.
    pub fn with_output<O: Write>(self, out: O) -> Downloader<T, O> {
        Downloader {
            fetcher: self.fetcher,
            path: self.path,
            out: RefCell::new(out),
        }
    }

    pub fn into_output(self) -> W {
        self.out.into_inner()
    }

    /// Create the target directory, then fetch every entry in registry order.
    ///
    /// Only a directory failure is returned as an error; per-entry failures are
    /// reported and collected into the results.
    pub fn run(&self, registry: &LogoRegistry) -> Result<Vec<DownloadResult>, DownloadError> {
        let directory = ensure_directory(&self.path)?;

        tracing::info!(
            directory = %directory.display(),
            entries = registry.len(),
            "starting download"
        );

        let results = registry
            .into_iter()
            .map(|entry| self.fetch_and_save(entry, &directory))
            .collect_vec();

        let (saved, failed): (Vec<_>, Vec<_>) = results.iter().partition(|r| r.is_saved());

        tracing::info!(saved = saved.len(), failed = failed.len(), "run finished");

        self.report(format_args!("Download complete."));

        Ok(results)
    }

    /// Fetch one entry into `directory`, reporting progress to the output sink.
    pub fn fetch_and_save(&self, entry: &Entry, directory: &Path) -> DownloadResult {
        self.report(format_args!(
            "Downloading {} from {}...",
            entry.filename, entry.url
        ));

        match self.download(entry, directory) {
            Ok(download) => {
                self.report(format_args!("Successfully downloaded {}", entry.filename));

                tracing::debug!(file = %download.file.display(), bytes = download.size, "saved");

                DownloadResult::Saved(download)
            }

            Err(error) => {
                self.report(format_args!("Error downloading {}: {}", entry.filename, error));

                tracing::warn!(filename = %entry.filename, url = %entry.url, "{}", error);

                DownloadResult::Failed {
                    filename: entry.filename.clone(),
                    error,
                }
            }
        }
    }

    fn download(&self, entry: &Entry, directory: &Path) -> Result<Download, DownloadError> {
        let url = parse_url(&entry.url)?;

        let url = url.as_str();

        let response = self.fetcher.fetch(url);

        match response {
            Response::NetworkError(reason) => Err(DownloadError::NetworkError(reason)),
            Response::Status(code, reason) => Err(DownloadError::Status { code, reason }),
            Response::InvalidBody(reason) => Err(DownloadError::InvalidBody(reason)),

            Response::Ok(body) => {
                let file_path = directory.join(&entry.filename);

                fs::write(&file_path, &body).map_err(|source| DownloadError::Write {
                    path: file_path.clone(),
                    source,
                })?;

                Ok(Download::new(entry.url.clone(), file_path, body.len()))
            }
        }
    }

    // A broken console must not abort the run.
    fn report(&self, line: fmt::Arguments<'_>) {
        let mut out = self.out.borrow_mut();

        if let Err(err) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::debug!("failed to write progress line: {}", err);
        }
    }
}

impl Downloader<UReqFetcher> {
    pub fn new(config: &FetchConfig) -> Self {
        let fetcher = UReqFetcher::from_config(config);
        Downloader::with_fetcher(&config.directory, fetcher)
    }
}

/// Resolve `path` against the working directory and create it with all parents.
/// Existing directories are left as they are.
pub fn ensure_directory(path: &Path) -> Result<PathBuf, DownloadError> {
    let directory_error = |source: io::Error| DownloadError::Directory {
        path: path.to_path_buf(),
        source,
    };

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_err(directory_error)?.join(path)
    };

    fs::create_dir_all(&absolute_path).map_err(directory_error)?;

    Ok(absolute_path)
}

fn parse_url(raw: &str) -> Result<Url, DownloadError> {
    let url = Url::parse(raw).map_err(|_| DownloadError::InvalidUrl(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(DownloadError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
use fetcher::MockFetcher;

pub mod config;
pub mod downloader;
pub mod logging;
pub mod registry;

pub use config::FetchConfig;
pub use downloader::{
    ensure_directory, Download, DownloadError, DownloadResult, Downloader, FileDownloader,
    Response, UReqFetcher,
};
pub use registry::{Entry, LogoRegistry};

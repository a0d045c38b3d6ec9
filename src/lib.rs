pub mod cli;
pub mod css_rewriter;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod file_saver;
pub mod html_rewriter;
pub mod urls;

// Re-export the main types for convenience
pub use cli::MirrorCommand;
pub use css_rewriter::{rewrite_css, rewrite_inline_css, CssAndLinks, RewrittenCss};
pub use downloader::{DownloadSummary, WebpageMirror, INDEX_FILENAME};
pub use error::{Error, Result};
pub use fetch::{FetchClient, FetchConfig, HttpClient, DEFAULT_USER_AGENT};
pub use file_saver::{DirectorySaver, FileSaver};
pub use html_rewriter::{rewrite_document, RewrittenPage};
pub use urls::{filename_for_url, resolve, DownloadInfo};

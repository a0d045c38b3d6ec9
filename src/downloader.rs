use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};
use url::Url;

use crate::css_rewriter::rewrite_css;
use crate::error::{Error, Result};
use crate::fetch::FetchClient;
use crate::file_saver::FileSaver;
use crate::html_rewriter::rewrite_document;
use crate::urls::DownloadInfo;

/// The rewritten page itself is always saved under this name.
pub const INDEX_FILENAME: &str = "index.html";

/// What a completed download produced, for caller display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub title: String,
    pub stylesheets_saved: usize,
    pub assets_saved: usize,
}

/// Downloads one page and everything it references, saving a self-contained
/// copy through a [`FileSaver`]. Holds no state between downloads.
pub struct WebpageMirror<C> {
    client: C,
}

impl<C: FetchClient> WebpageMirror<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Mirrors the page at `url`. Fetches are sequential; the first fetch or
    /// save failure aborts the whole call and leaves whatever was already
    /// written behind, so callers must treat a failed download as discard-
    /// and-retry rather than resume.
    pub async fn download(&self, url: &str, saver: &impl FileSaver) -> Result<DownloadSummary> {
        let page_url = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        if !matches!(page_url.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme {
                url: url.to_string(),
            });
        }
        let base_url = page_url.to_string();

        info!(url = %base_url, "downloading page");
        let html = self.client.fetch_text(&base_url).await?;
        let page = rewrite_document(&html, &base_url);
        saver.save_text(INDEX_FILENAME, &page.html)?;

        let mut files = page.files;
        let mut queue: VecDeque<DownloadInfo> = page.stylesheets.into_iter().collect();
        // One fetch per stylesheet URL, so @import cycles terminate.
        let mut seen: HashSet<String> = queue.iter().map(|css| css.url.clone()).collect();

        let mut stylesheets_saved = 0;
        while let Some(stylesheet) = queue.pop_front() {
            debug!(url = %stylesheet.url, filename = %stylesheet.filename, "downloading stylesheet");
            let css = self.client.fetch_text(&stylesheet.url).await?;
            // Nested references resolve against the page URL, not the
            // stylesheet's own location.
            let rewritten = rewrite_css(&css, &base_url);
            saver.save_text(&stylesheet.filename, &rewritten.css)?;
            stylesheets_saved += 1;

            for nested in rewritten.stylesheets {
                if seen.insert(nested.url.clone()) {
                    queue.push_back(nested);
                }
            }
            files.extend(rewritten.files);
        }

        let assets_saved = files.len();
        for file in &files {
            debug!(url = %file.url, filename = %file.filename, "downloading asset");
            let bytes = self.client.fetch_bytes(&file.url).await?;
            saver.save_bytes(&file.filename, &bytes)?;
        }

        info!(stylesheets = stylesheets_saved, assets = assets_saved, "page mirrored");
        Ok(DownloadSummary {
            title: page.title,
            stylesheets_saved,
            assets_saved,
        })
    }
}

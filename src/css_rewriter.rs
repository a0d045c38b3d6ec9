use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::urls::{filename_for_url, resolve, DownloadInfo};

// Covers url(ref), url('ref') and url("ref") with arbitrary inner whitespace,
// which also picks up `@import url(...)` forms.
static URL_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\s*\(\s*['"]?\s*(.*?)\s*['"]?\s*\)"#).unwrap());

// Covers the string form `@import "ref"` / `@import 'ref'`; the url() form is
// already handled by the pass above.
static IMPORT_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@import\s*['"]\s*(.*)\s*['"]\s*"#).unwrap());

/// A stylesheet with every reachable reference rewritten to a local filename,
/// plus the references themselves split by kind. The two sets are disjoint:
/// a reference counts as a stylesheet iff its generated filename ends in
/// `.css`, while `@import` targets are stylesheets regardless of extension.
#[derive(Debug)]
pub struct RewrittenCss {
    pub css: String,
    pub files: HashSet<DownloadInfo>,
    pub stylesheets: HashSet<DownloadInfo>,
}

/// Result of the url()-only pass used for inline `style=` attributes.
#[derive(Debug)]
pub struct CssAndLinks {
    pub css: String,
    pub links: HashSet<DownloadInfo>,
}

/// Rewrites `url()` and `@import` references in a stylesheet against
/// `base_url`. Inline `data:image/` URIs are left untouched and never
/// recorded; references that cannot be resolved are skipped the same way.
pub fn rewrite_css(css: &str, base_url: &str) -> RewrittenCss {
    let mut files = HashSet::new();
    let mut stylesheets = HashSet::new();

    let url_pass = rewrite_references(css, base_url, &URL_REFERENCE);
    for link in url_pass.links {
        if link.filename.ends_with(".css") {
            stylesheets.insert(link);
        } else {
            files.insert(link);
        }
    }

    // The import pass runs on the already-rewritten text; `@import url(...)`
    // was consumed above, so only the string forms remain.
    let import_pass = rewrite_references(&url_pass.css, base_url, &IMPORT_REFERENCE);
    stylesheets.extend(import_pass.links);

    RewrittenCss {
        css: import_pass.css,
        files,
        stylesheets,
    }
}

/// Rewrites `url()` references only. Inline style attributes cannot contain
/// `@import`, and everything they reference is a plain file.
pub fn rewrite_inline_css(css: &str, base_url: &str) -> CssAndLinks {
    rewrite_references(css, base_url, &URL_REFERENCE)
}

fn rewrite_references(css: &str, base_url: &str, pattern: &Regex) -> CssAndLinks {
    let mut rewritten = String::with_capacity(css.len());
    let mut links = HashSet::new();
    let mut copied_up_to = 0;

    for captures in pattern.captures_iter(css) {
        let whole = captures.get(0).unwrap();
        rewritten.push_str(&css[copied_up_to..whole.start()]);
        copied_up_to = whole.end();

        let reference = captures.get(1).map_or("", |m| m.as_str());
        if reference.is_empty() || reference.starts_with("data:image/") {
            rewritten.push_str(whole.as_str());
            continue;
        }
        let Some(absolute) = resolve(base_url, reference) else {
            rewritten.push_str(whole.as_str());
            continue;
        };

        let filename = filename_for_url(&absolute);
        rewritten.push_str(&whole.as_str().replacen(reference, &filename, 1));
        links.insert(DownloadInfo {
            url: absolute,
            filename,
        });
    }
    rewritten.push_str(&css[copied_up_to..]);

    CssAndLinks {
        css: rewritten,
        links,
    }
}

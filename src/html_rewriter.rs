use std::collections::HashSet;

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use crate::css_rewriter::{rewrite_css, rewrite_inline_css};
use crate::urls::{filename_for_url, resolve, DownloadInfo};

/// A page with every stylesheet, script and image reference rewritten to the
/// local filename it will be saved under, plus the two reference sets the
/// download loop works from.
#[derive(Debug)]
pub struct RewrittenPage {
    pub title: String,
    pub html: String,
    pub files: HashSet<DownloadInfo>,
    pub stylesheets: HashSet<DownloadInfo>,
}

/// Rewrites a page against its base URL.
///
/// `<base>` tags are dropped so they cannot skew resolution, anchors are
/// absolutized (never downloaded), stylesheet links, scripts, images and
/// image inputs are pointed at their local filenames, and embedded plus
/// inline CSS goes through the CSS rewriter. References that do not resolve
/// to an `http(s)` URL are left untouched.
pub fn rewrite_document(html: &str, base_url: &str) -> RewrittenPage {
    let document = kuchiki::parse_html().one(html);
    let mut files = HashSet::new();
    let mut stylesheets = HashSet::new();

    let title = document
        .select_first("title")
        .map(|node| node.text_contents().trim().to_string())
        .unwrap_or_default();

    for base in select_all(&document, "base[href]") {
        base.as_node().detach();
    }

    absolutize_anchors(&document, base_url);
    rewrite_style_elements(&document, base_url, &mut files, &mut stylesheets);
    rewrite_stylesheet_links(&document, base_url, &mut stylesheets);
    for selector in ["script[src]", "img[src]", "input[type=image]"] {
        rewrite_source_attributes(&document, selector, base_url, &mut files);
    }
    rewrite_inline_styles(&document, base_url, &mut files);

    RewrittenPage {
        title,
        html: serialize(&document),
        files,
        stylesheets,
    }
}

fn absolutize_anchors(document: &NodeRef, base_url: &str) {
    for anchor in select_all(document, "a[href]") {
        let href = match anchor.attributes.borrow().get("href") {
            Some(href) => href.to_string(),
            None => continue,
        };
        // Fragment-only links stay local to the saved page.
        if href.starts_with('#') {
            continue;
        }
        let Some(absolute) = resolve(base_url, &href) else {
            continue;
        };
        // mailto:, javascript: and the like stay as they are.
        if !absolute.starts_with("http") {
            continue;
        }
        anchor.attributes.borrow_mut().insert("href", absolute);
    }
}

fn rewrite_style_elements(
    document: &NodeRef,
    base_url: &str,
    files: &mut HashSet<DownloadInfo>,
    stylesheets: &mut HashSet<DownloadInfo>,
) {
    for style in select_all(document, "style") {
        let css = style.text_contents();
        let rewritten = rewrite_css(&css, base_url);
        files.extend(rewritten.files);
        stylesheets.extend(rewritten.stylesheets);

        let node = style.as_node();
        while let Some(child) = node.first_child() {
            child.detach();
        }
        node.append(NodeRef::new_text(rewritten.css));
    }
}

fn rewrite_stylesheet_links(
    document: &NodeRef,
    base_url: &str,
    stylesheets: &mut HashSet<DownloadInfo>,
) {
    for link in select_all(document, "link[rel=stylesheet][href]") {
        let href = match link.attributes.borrow().get("href") {
            Some(href) => href.to_string(),
            None => continue,
        };
        let Some(absolute) = resolve(base_url, &href) else {
            continue;
        };
        if !absolute.starts_with("http") {
            continue;
        }

        let mut filename = filename_for_url(&absolute);
        if !filename.ends_with(".css") {
            filename.push_str(".css");
        }

        let mut attributes = link.attributes.borrow_mut();
        attributes.insert("href", filename.clone());
        // Hashes no longer match the rewritten content.
        attributes.remove("crossorigin");
        attributes.remove("integrity");
        stylesheets.insert(DownloadInfo {
            url: absolute,
            filename,
        });
    }
}

fn rewrite_source_attributes(
    document: &NodeRef,
    selector: &str,
    base_url: &str,
    files: &mut HashSet<DownloadInfo>,
) {
    for element in select_all(document, selector) {
        let src = match element.attributes.borrow().get("src") {
            Some(src) => src.to_string(),
            None => continue,
        };
        let Some(absolute) = resolve(base_url, &src) else {
            continue;
        };
        if !absolute.starts_with("http") {
            continue;
        }

        let filename = filename_for_url(&absolute);
        let mut attributes = element.attributes.borrow_mut();
        attributes.insert("src", filename.clone());
        attributes.remove("srcset");
        attributes.remove("crossorigin");
        attributes.remove("integrity");
        files.insert(DownloadInfo {
            url: absolute,
            filename,
        });
    }
}

fn rewrite_inline_styles(document: &NodeRef, base_url: &str, files: &mut HashSet<DownloadInfo>) {
    for element in select_all(document, "[style]") {
        let css = match element.attributes.borrow().get("style") {
            Some(css) => css.to_string(),
            None => continue,
        };
        let rewritten = rewrite_inline_css(&css, base_url);
        element.attributes.borrow_mut().insert("style", rewritten.css);
        files.extend(rewritten.links);
    }
}

// Collects matches up front so rewrites cannot invalidate a live traversal.
fn select_all(node: &NodeRef, selector: &str) -> Vec<NodeDataRef<ElementData>> {
    node.select(selector).map(Iterator::collect).unwrap_or_default()
}

fn serialize(document: &NodeRef) -> String {
    let mut out = Vec::new();
    if document.serialize(&mut out).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

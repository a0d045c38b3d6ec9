use url::Url;
use xxhash_rust::xxh3::xxh3_64;

/// An absolute URL paired with the local filename it will be saved under.
/// The filename is a pure function of the URL, so the pair also serves as
/// the dedup key for everything scheduled for download.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadInfo {
    pub url: String,
    pub filename: String,
}

/// Longest part of a URL basename that is kept in the generated filename.
/// Keeps generated names well under common filesystem path limits.
const MAX_BASENAME_CHARS: usize = 90;

/// Stem used when the basename has no extension to split on.
const NO_NAME_STEM: &str = "no-name";

/// Turns an absolute URL into a flat, filesystem-safe filename.
///
/// The hash is computed over the full URL, not the basename, so
/// `style.css?v=1` and `style.css?v=2` map to different files. The result
/// never contains a path separator and only uses `[A-Za-z0-9._-]`.
pub fn filename_for_url(url: &str) -> String {
    let basename = match url.rfind('/') {
        Some(index) => &url[index + 1..],
        None => url,
    };

    let char_count = basename.chars().count();
    let mut name: String = if char_count > MAX_BASENAME_CHARS {
        basename.chars().skip(char_count - MAX_BASENAME_CHARS).collect()
    } else {
        basename.to_string()
    };

    if let Some(query) = name.find('?') {
        name.truncate(query);
    }

    let hash = xxh3_64(url.as_bytes());
    let (stem, extension) = match name.rfind('.') {
        Some(dot) => (name[..dot].to_string(), name[dot..].to_string()),
        None => (NO_NAME_STEM.to_string(), format!(".{name}")),
    };

    format!("{stem}-{hash}{extension}")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolves a relative reference against an absolute base URL.
///
/// Returns `None` when nothing absolute can be made of the inputs; callers
/// skip such references. Two common relative-URL pitfalls are corrected
/// before joining:
///
/// - a bare query string (`?page=2`) keeps the base's full path instead of
///   replacing its last segment;
/// - a dot-relative reference against a base whose path does not start with
///   `/` resolves from the host root.
pub fn resolve(base_url: &str, relative: &str) -> Option<String> {
    let mut base = match Url::parse(base_url) {
        Ok(base) => base,
        // The base is unusable, but the reference may be absolute on its own.
        Err(_) => return Url::parse(relative).ok().map(String::from),
    };

    let mut relative = relative.to_string();
    if relative.starts_with('?') {
        relative = format!("{}{}", base.path(), relative);
    }
    if relative.starts_with('.') && !base.path().starts_with('/') {
        let rooted = format!("/{}", base.path());
        base.set_path(&rooted);
    }

    base.join(&relative).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn filename_is_deterministic() {
        let url = "https://example.org/assets/style.min.css?ver=1.0.0";
        assert_eq!(filename_for_url(url), filename_for_url(url));
    }

    #[test]
    fn filename_is_unique_across_query_scheme_and_host() {
        let mut filenames = HashSet::new();
        filenames.insert(filename_for_url("https://example.org/style.min.css?ver=1.0.0"));
        filenames.insert(filename_for_url("https://example.org/style.min.css?ver=1.0.1"));
        filenames.insert(filename_for_url("https://example.org/style.min.css"));
        filenames.insert(filename_for_url("http://example.org/style.min.css"));
        filenames.insert(filename_for_url("https://example.com/style.min.css"));

        assert_eq!(filenames.len(), 5);
    }

    #[test]
    fn long_basenames_keep_hash_and_extension() {
        let url = format!("https://example.org/{}.css", "a".repeat(200));
        let filename = filename_for_url(&url);

        assert!(filename.ends_with(".css"));
        assert!(filename.len() < 120);
        assert!(regex::Regex::new(r"-\d+\.").unwrap().is_match(&filename));
    }

    #[test]
    fn filename_strips_host_and_query() {
        let filename = filename_for_url("https://example.org/style.min.css?ver=1.0.0");

        assert!(!filename.contains("example.org"));
        assert!(!filename.contains("ver=1.0.0"));
        assert!(filename.ends_with(".css"));
    }

    #[test]
    fn filename_without_extension_gets_placeholder_stem() {
        let filename = filename_for_url("https://example.org/fonts/roboto");

        assert!(filename.starts_with("no-name-"));
        assert!(filename.ends_with(".roboto"));
    }

    #[test]
    fn filename_only_contains_safe_characters() {
        let filename = filename_for_url("https://example.org/$#%^& *.css");

        assert!(filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn resolve_joins_relative_paths() {
        assert_eq!(
            resolve("https://www.example.org/index.html", "test1.css"),
            Some("https://www.example.org/test1.css".to_string())
        );
    }

    #[test]
    fn resolve_keeps_path_for_bare_query() {
        assert_eq!(
            resolve("https://example.org/dir/page.html", "?v=2"),
            Some("https://example.org/dir/page.html?v=2".to_string())
        );
    }

    #[test]
    fn resolve_handles_dot_relative_against_host() {
        assert_eq!(
            resolve("https://example.org", "./foo"),
            Some("https://example.org/foo".to_string())
        );
    }

    #[test]
    fn resolve_handles_protocol_relative() {
        assert_eq!(
            resolve("https://example.org/page.html", "//cdn.example.com/x.js"),
            Some("https://cdn.example.com/x.js".to_string())
        );
    }

    #[test]
    fn resolve_falls_back_to_absolute_reference() {
        assert_eq!(
            resolve("not a url", "https://example.org/a.css"),
            Some("https://example.org/a.css".to_string())
        );
    }

    #[test]
    fn resolve_gives_up_when_nothing_is_absolute() {
        assert_eq!(resolve("not a url", "also relative"), None);
    }
}

// src/crawl/resolve.rs
// =============================================================================
// Turns an href found on a page into an absolute URL to crawl.
//
// Rules, in order:
// 1. "http://..." or "https://..." is already absolute -> keep it
// 2. contains '#'       -> ignore (a section of a page we already parsed)
// 3. starts with '/'    -> "scheme://host" of the page + href
// 4. anything else      -> page URL + "/" + href
//
// Rule 4 is plain string concatenation: "../" is not collapsed and double
// slashes are kept. Candidate URLs are compared as exact strings, so keeping
// this simple keeps the crawl reproducible.
// =============================================================================

const SCHEMES: [&str; 2] = ["http://", "https://"];

// Returns the part of `url` after "http://" or "https://", if it has one
fn strip_scheme(url: &str) -> Option<&str> {
    SCHEMES.iter().find_map(|scheme| url.strip_prefix(scheme))
}

// Checks whether a string starts like an absolute address ("http(s)://")
pub fn is_absolute(href: &str) -> bool {
    strip_scheme(href).is_some()
}

// Returns "scheme://host" of a URL, or None if it is not an http(s) URL
// with a non-empty host
//
// Example:
//   "http://x.com/a/b" -> Some("http://x.com")
fn root_of(url: &str) -> Option<&str> {
    let rest = strip_scheme(url)?;
    let host_len = rest.find('/').unwrap_or(rest.len());

    if host_len == 0 {
        return None;
    }

    let root_len = url.len() - rest.len() + host_len;
    Some(&url[..root_len])
}

/// Checks a user-supplied starting URL: `http(s)://` followed by a host.
pub fn is_valid_start_url(url: &str) -> bool {
    root_of(url).is_some()
}

/// Resolves `href` against the page it was found on.
///
/// Returns `None` for same-page anchors, and for root-relative links on a
/// page whose own URL has no recognizable host.
pub fn resolve(page_url: &str, href: &str) -> Option<String> {
    if is_absolute(href) {
        return Some(href.to_string());
    }

    if href.contains('#') {
        return None;
    }

    if href.starts_with('/') {
        let root = root_of(page_url)?;
        return Some(format!("{}{}", root, href));
    }

    Some(format!("{}/{}", page_url, href))
}

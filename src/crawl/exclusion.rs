// src/crawl/exclusion.rs
// =============================================================================
// Decides whether a URL belongs to an excluded domain.
//
// A URL is excluded when its host equals an excluded domain or is a
// subdomain of it. The comparison is done label by label:
//
//   host "mail.popular.com" -> ["mail", "popular", "com"]
//   excluded "popular.com"  ->         ["popular", "com"]   => match
//
//   host "notpopular.com"   -> ["notpopular", "com"]         => no match
//
// An excluded domain with more labels than the host can never match.
// =============================================================================

// Reduces a URL to its bare host: drops "http(s)://" and everything from
// the first '/' onward
fn host_of(url: &str) -> &str {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);

    match rest.find('/') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Returns true when the URL's host is covered by any entry of `excluded`.
pub fn is_excluded<S: AsRef<str>>(url: &str, excluded: &[S]) -> bool {
    let host_labels: Vec<&str> = host_of(url).split('.').collect();

    excluded.iter().any(|domain| {
        let excluded_labels: Vec<&str> = domain.as_ref().split('.').collect();

        match host_labels.len().checked_sub(excluded_labels.len()) {
            Some(skip) => host_labels[skip..] == excluded_labels[..],
            None => false,
        }
    })
}

// src/domains.rs
// =============================================================================
// Loads plain-text domain lists (one domain per line).
//
// Only the line terminator ("\n" or "\r\n") is removed from each line.
// Other whitespace is kept as written.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

pub const DEFAULT_POPULAR_DOMAINS: &str = "data/popular_domains.txt";
pub const DEFAULT_BENIGN_DOMAINS: &str = "data/benign_domains.txt";

pub async fn load_domain_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read domain list {}", path.display()))?;

    Ok(content.lines().map(str::to_string).collect())
}

//! Link normalisation: repository file page → direct-content URL.
//!
//! `https://github.com/<owner>/<repo>/blob/<ref>/<path>` serves an HTML page;
//! the bytes live at `https://raw.githubusercontent.com/<owner>/<repo>/<ref>/<path>`.
//! The transform is a pure string rewrite, so a malformed link is rejected
//! before any network traffic.

use crate::error::ItemError;

const HOST_MARKER: &str = "github.com";
const RAW_HOST: &str = "raw.githubusercontent.com";
const PATH_MARKER: &str = "/blob/";

/// Rewrite a repository file link into its raw-content link.
///
/// The part before the first `/blob/` has its host marker replaced; the
/// part after it is appended unchanged.
pub fn to_raw_url(link: &str) -> Result<String, ItemError> {
    let invalid = || ItemError::InvalidSourceUrl {
        url: link.to_string(),
    };

    let (repo, path) = link.split_once(PATH_MARKER).ok_or_else(invalid)?;
    if !repo.contains(HOST_MARKER) || path.is_empty() {
        return Err(invalid());
    }

    Ok(format!("{}/{}", repo.replacen(HOST_MARKER, RAW_HOST, 1), path))
}

/// Last path segment of a URL, ignoring any query string or fragment.
pub fn file_name(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit('/').next().unwrap_or(path)
}

/// Output stem for a file name: its first character, uppercased.
///
/// `Ahand.svg` → `A`. Returns `None` for an empty name.
pub fn letter_for(file_name: &str) -> Option<String> {
    file_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
}

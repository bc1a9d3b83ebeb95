//! Source lists: the built-in hand-sign set and sources-file parsing.
//!
//! Callers can override the default via [`crate::config::PublishConfig::sources`];
//! the list here is used only when no override is provided.

use crate::error::PublishError;
use std::path::Path;

const HANDSIGN_BASE: &str =
    "https://github.com/syauqy/handsign-tensorflow/blob/master/components/handimage";

/// Default sources: one hand-sign SVG per letter, `Ahand.svg` through `Zhand.svg`.
pub fn default_sources() -> Vec<String> {
    ('A'..='Z')
        .map(|letter| format!("{HANDSIGN_BASE}/{letter}hand.svg"))
        .collect()
}

/// Parse a sources file body: one link per line.
///
/// Blank lines and lines starting with `#` are ignored; surrounding
/// whitespace is trimmed. Order is preserved.
pub fn parse_sources(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read and parse a sources file.
pub async fn load_sources(path: impl AsRef<Path>) -> Result<Vec<String>, PublishError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PublishError::SourcesReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_sources(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_cover_alphabet_in_order() {
        let sources = default_sources();
        assert_eq!(sources.len(), 26);
        assert!(sources[0].ends_with("/Ahand.svg"));
        assert!(sources[25].ends_with("/Zhand.svg"));
        assert!(sources.iter().all(|s| s.contains("/blob/")));
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let text = "# letters\n\n  https://github.com/a/b/blob/main/A.svg  \n#B\nhttps://github.com/a/b/blob/main/C.svg\n";
        assert_eq!(
            parse_sources(text),
            vec![
                "https://github.com/a/b/blob/main/A.svg".to_string(),
                "https://github.com/a/b/blob/main/C.svg".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn load_missing_file_is_fatal() {
        let err = load_sources("/definitely/not/here.txt").await.unwrap_err();
        assert!(matches!(err, PublishError::SourcesReadFailed { .. }));
    }
}

//! Loading the list of players to always include

use crate::error::Result;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Parse one discriminator per line.
///
/// Only line breaks are stripped and blank lines skipped. Matching is exact,
/// so stray spaces or a different case will not match.
pub fn parse_discriminators(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Read a discriminator list from a file.
///
/// A missing file is reported and treated as an empty list.
pub fn load_discriminators(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let discriminators = parse_discriminators(&content);
            log::info!("Loaded {} discriminators from {}", discriminators.len(), path.display());
            Ok(discriminators)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Discriminator file {} not found, check path", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// The allow list for an optional discriminator file
pub fn load_allow_list(path: Option<&Path>) -> Result<HashSet<String>> {
    match path {
        Some(path) => Ok(load_discriminators(path)?.into_iter().collect()),
        None => Ok(HashSet::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_strips_only_line_breaks() {
        let list = parse_discriminators("abc123\r\n def456\n\nGHI789 \n");
        assert_eq!(list, vec!["abc123", " def456", "GHI789 "]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a1b2c3d4").unwrap();
        writeln!(file, "e5f6a7b8").unwrap();

        let list = load_discriminators(file.path()).unwrap();
        assert_eq!(list, vec!["a1b2c3d4", "e5f6a7b8"]);

        let allow = load_allow_list(Some(file.path())).unwrap();
        assert!(allow.contains("e5f6a7b8"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let list = load_discriminators(&dir.path().join("players.txt")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_discriminators(dir.path()).is_err());
    }

    #[test]
    fn test_no_file_given() {
        assert!(load_allow_list(None).unwrap().is_empty());
    }
}

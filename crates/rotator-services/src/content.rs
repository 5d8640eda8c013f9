// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Content discovery.

Images are whatever non-directory entries sit directly in the image
directory when the service starts: no recursion, no extension filter,
hidden files included.
*/

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::types::{ServiceError, ServiceResult};

/// List servable image file names in `dir`, sorted by name.
///
/// # Errors
/// * `ServiceError::Io` - the directory cannot be read
/// * `ServiceError::EmptyContent` - no servable entries were found
pub fn load_image_files(dir: &Path) -> ServiceResult<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| ServiceError::io(dir, &e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ServiceError::io(dir, &e))?;
        let file_type = entry.file_type().map_err(|e| ServiceError::io(&entry.path(), &e))?;
        if file_type.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(raw) => {
                warn!(target: "rotator-services", "Skipping image with non UTF-8 name: {:?}", raw);
            }
        }
    }

    if files.is_empty() {
        return Err(ServiceError::EmptyContent(format!(
            "no image files in {}",
            dir.display()
        )));
    }

    files.sort();
    debug!(target: "rotator-services", "Found {} image files in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lists_files_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"b").unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join(".hidden"), b"h").unwrap();
        fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.png"), b"d").unwrap();

        let files = load_image_files(dir.path()).unwrap();
        assert_eq!(files, vec![".hidden", "a.jpg", "b.png", "notes.txt"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let err = load_image_files(&dir.path().join("does-not-exist")).unwrap_err();
        assert!(matches!(err, ServiceError::Io { .. }));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("only-a-dir")).unwrap();
        let err = load_image_files(dir.path()).unwrap_err();
        assert!(matches!(err, ServiceError::EmptyContent(_)));
    }
}

//! Upload validation
//!
//! Size, type and quota checks run before anything is written.

use std::path::Path;

use crate::config::EndpointConfig;
use crate::error::ValidationError;
use crate::storage::listing::total_size;

/// False when `size` exceeds the single-file limit
pub fn check_file_size(size: u64, max_file_size: u64) -> bool {
    size <= max_file_size
}

/// False unless `filetype` is in the allow-list (exact, case-sensitive)
pub fn check_file_type(filetype: &str, allowed_types: &[String]) -> bool {
    allowed_types.iter().any(|t| t == filetype)
}

/// False when the bytes already stored under `root` exceed the quota.
///
/// Only what is on disk counts; the incoming file is not added.
pub fn check_total_size(root: &Path, max_total_size: u64) -> bool {
    total_size(root) <= max_total_size
}

/// Runs the three upload checks in order, reporting the first failure.
pub fn validate_upload(
    config: &EndpointConfig,
    filename: &str,
    filesize: u64,
    filetype: &str,
) -> Result<(), ValidationError> {
    if !check_file_size(filesize, config.max_file_size) {
        return Err(ValidationError::FileTooLarge {
            filename: filename.to_string(),
            limit: config.max_file_size,
        });
    }

    if !check_file_type(filetype, &config.allowed_filetype) {
        return Err(ValidationError::TypeNotAllowed {
            filename: filename.to_string(),
            filetype: filetype.to_string(),
            allowed: config.allowed_filetype.clone(),
        });
    }

    if !check_total_size(config.root(), config.max_total_size) {
        return Err(ValidationError::QuotaExceeded {
            filename: filename.to_string(),
            limit: config.max_total_size,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_file_size() {
        assert!(check_file_size(0, 10));
        assert!(check_file_size(10, 10));
        assert!(!check_file_size(11, 10));
    }

    #[test]
    fn test_check_file_type_is_exact() {
        let allowed = vec!["text/plain".to_string(), "image/png".to_string()];

        assert!(check_file_type("text/plain", &allowed));
        assert!(!check_file_type("Text/Plain", &allowed));
        assert!(!check_file_type("text/plain; charset=utf-8", &allowed));
        assert!(!check_file_type("", &allowed));
    }

    #[test]
    fn test_check_total_size_counts_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("nested/deeper")).unwrap();
        std::fs::write(root.join("a.bin"), vec![0u8; 40]).unwrap();
        std::fs::write(root.join("nested/deeper/b.bin"), vec![0u8; 40]).unwrap();

        assert!(check_total_size(root, 80));
        assert!(!check_total_size(root, 79));
    }

    #[test]
    fn test_validate_upload_order() {
        let temp_dir = TempDir::new().unwrap();
        let config = EndpointConfig {
            upload_dir: temp_dir.path().to_path_buf(),
            max_file_size: 100,
            ..EndpointConfig::default()
        };

        assert!(validate_upload(&config, "a.txt", 10, "text/plain").is_ok());
        assert!(matches!(
            validate_upload(&config, "a.txt", 101, "application/x-evil"),
            Err(ValidationError::FileTooLarge { .. })
        ));
        assert!(matches!(
            validate_upload(&config, "a.txt", 10, "application/x-evil"),
            Err(ValidationError::TypeNotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_upload_quota() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("full.bin"), vec![0u8; 64]).unwrap();
        let config = EndpointConfig {
            upload_dir: temp_dir.path().to_path_buf(),
            max_total_size: 32,
            ..EndpointConfig::default()
        };

        assert!(matches!(
            validate_upload(&config, "a.txt", 1, "text/plain"),
            Err(ValidationError::QuotaExceeded { limit: 32, ref filename }) if filename == "a.txt"
        ));
    }
}

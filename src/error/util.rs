//! Utility functions for error handling
//!
//! Helpers that open files and directories and report failures with the path
//! and the reason the file was needed.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CohortError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(CohortError::NotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(CohortError::io_at(
            path,
            format!("expected a file for: {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions".to_string(),
            io::ErrorKind::NotFound => {
                "file not found - it may have been deleted during operation".to_string()
            }
            _ => format!("failed to open file for: {purpose}"),
        };
        CohortError::io_at(path, context, e)
    })
}

/// Create (or truncate) a file for writing, with rich error information
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::create(path)
        .map_err(|e| CohortError::io_at(path, format!("failed to create file for: {purpose}"), e))
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(CohortError::NotFound(path.to_path_buf()));
    }

    if !path.is_dir() {
        return Err(CohortError::io_at(
            path,
            format!("expected a directory for: {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
        ));
    }

    // Try to read the directory to check permissions
    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "permission denied - check directory permissions".to_string()
                }
                _ => format!("failed to access directory for: {purpose}"),
            };
            Err(CohortError::io_at(path, context, e))
        }
    }
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "file contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("failed to read file content for: {purpose}"),
            };
            Err(CohortError::io_at(path, context, e))
        }
    }
}

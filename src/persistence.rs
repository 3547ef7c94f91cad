//! Reading and writing database files
//!
//! The library itself only produces and consumes text. These helpers are the
//! file-backed store used by the `padmap` tool.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::mapping::{Database, DecodeReport};

/// Load a database file; a missing file is an empty database
///
/// Undecodable bytes are replaced rather than failing the whole file.
pub fn load_database(path: impl AsRef<Path>) -> Result<DecodeReport> {
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No database at {}, starting empty", path.display());
            Vec::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read database: {}", path.display()));
        }
    };

    // Invalid UTF-8 only damages the line it appears on
    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = &text {
        warn!("{}: contains invalid UTF-8, affected lines may not match", path.display());
    }

    let report = Database::decode(&text);
    if report.dropped_lines > 0 {
        warn!(
            "{}: dropped {} malformed line(s)",
            path.display(),
            report.dropped_lines
        );
    }
    Ok(report)
}

/// Write a database file, creating parent directories as needed
pub fn save_database(path: impl AsRef<Path>, database: &Database) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut text = database.encode();
    if !text.is_empty() {
        text.push('\n');
    }

    fs::write(path, text)
        .with_context(|| format!("Failed to write database: {}", path.display()))?;

    info!("Saved {} device mapping(s) to {}", database.len(), path.display());
    Ok(())
}

/// Rewrite a database file in canonical form
///
/// Lines are sorted, malformed lines dropped and every map re-encoded. Returns
/// the decode report of the original file.
pub fn normalize_database(path: impl AsRef<Path>) -> Result<DecodeReport> {
    let path = path.as_ref();
    let report = load_database(path)?;
    save_database(path, &report.database.canonical())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Destination, Origin};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let report = load_database(dir.path().join("none.db")).unwrap();
        assert!(report.database.is_empty());
        assert_eq!(report.dropped_lines, 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("gamepads.db");

        let db = Database::new()
            .with_mapping("pad one", [(Destination::A, Origin::button(0))])
            .with_mapping("pad two", [(Destination::RightTrigger, Origin::axis(5))]);
        save_database(&path, &db).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "pad one,,,a:b0\npad two,,,righttrigger:a5\n");

        let report = load_database(&path).unwrap();
        assert_eq!(report.database, db);
    }

    #[test]
    fn test_load_survives_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gamepads.db");
        fs::write(&path, b"DEV1,,,a:b0\nManette \xE9,,,b:b1\nDEV2,,,b:b1\n").unwrap();

        let report = load_database(&path).unwrap();
        let db = report.database;
        assert_eq!(db.len(), 3);
        assert_eq!(db.get_encoded("DEV1"), Some("a:b0"));
        assert_eq!(db.get_encoded("DEV2"), Some("b:b1"));
        assert!(!db.contains("Manette \u{e9}"));
    }

    #[test]
    fn test_normalize_rewrites_maps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gamepads.db");
        fs::write(&path, "ZZZ,,,b:b1,a:b0\nbroken line\nDEV,,,leftright:a0,b:b1,leftleft:-a0,a:b0,junk\n")
            .unwrap();

        let report = normalize_database(&path).unwrap();
        assert_eq!(report.dropped_lines, 1);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "DEV,,,a:b0,b:b1,leftright:a0\nZZZ,,,a:b0,b:b1\n");
    }

    #[test]
    fn test_load_reports_dropped_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gamepads.db");
        fs::write(&path, "DEV1,,,a:b0\nmalformed\nDEV2,,,b:b1\n").unwrap();

        let report = load_database(&path).unwrap();
        assert_eq!(report.database.len(), 2);
        assert_eq!(report.dropped_lines, 1);
    }
}

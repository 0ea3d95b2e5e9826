use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::content::module::parse_module;
use crate::models::resume::ResumeRecord;

/// Résumé shipped with the binary, used when no seed file is configured.
const BUNDLED_RESUME: &str = include_str!("../../data/resume.json");

pub fn bundled_record() -> Result<ResumeRecord> {
    parse_module(BUNDLED_RESUME).context("Bundled resume data is malformed")
}

/// Loads the starting record from `path` (module or JSON), or the bundled default.
pub fn load_seed(path: Option<&Path>) -> Result<ResumeRecord> {
    let Some(path) = path else {
        info!("Seeding content store from bundled resume data");
        return bundled_record();
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let record = parse_module(&text)
        .with_context(|| format!("Seed file {} is not valid resume data", path.display()))?;
    info!("Seeded content store from {}", path.display());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::module::render_module;
    use std::io::Write;

    #[test]
    fn test_bundled_record_has_content() {
        let record = bundled_record().unwrap();
        assert!(!record.name.is_empty());
        assert!(!record.experience.is_empty());
        assert!(!record.certifications.completed.is_empty());
    }

    #[test]
    fn test_load_seed_from_module_file() {
        let mut record = bundled_record().unwrap();
        record.name = "Seeded Person".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(render_module(&record).unwrap().as_bytes())
            .unwrap();

        let loaded = load_seed(Some(file.path())).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_seed_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_seed(Some(&dir.path().join("absent.ts"))).is_err());
    }
}

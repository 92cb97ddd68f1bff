use crate::error::ScrapeError;
use crate::model::{Catalog, FacilityRecord};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    facilities: Vec<FacilityRecord>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FacilityRecord) {
        self.facilities.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = FacilityRecord>) {
        self.facilities.extend(records);
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Rewrites the accumulated records in place, e.g. for merging.
    pub fn map_records(&mut self, f: impl FnOnce(Vec<FacilityRecord>) -> Vec<FacilityRecord>) {
        let records = std::mem::take(&mut self.facilities);
        self.facilities = f(records);
    }

    pub fn build(self, now: DateTime<Local>) -> Catalog {
        Catalog::from_records(
            self.facilities,
            now.timestamp_micros() as f64 / 1_000_000.0,
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
    }
}

/// Writes the catalog to a temporary file next to `path` and renames it into
/// place, so readers see either the old file or the complete new one.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), ScrapeError> {
    let output_err = |source: std::io::Error| ScrapeError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(output_err)?;

    let serialized = serde_json::to_string_pretty(catalog)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(output_err)?;
    tmp.write_all(serialized.as_bytes()).map_err(output_err)?;
    set_catalog_permissions(tmp.as_file(), path).map_err(output_err)?;
    tmp.as_file().sync_all().map_err(output_err)?;
    tmp.persist(path).map_err(|err| output_err(err.error))?;
    Ok(())
}

/// Temp files start out owner-only; the catalog keeps the mode of the file it
/// replaces, or 0644 when it is new.
#[cfg(unix)]
fn set_catalog_permissions(file: &std::fs::File, path: &Path) -> std::io::Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o7777)
        .unwrap_or(0o644);
    file.set_permissions(Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_catalog_permissions(_file: &std::fs::File, _path: &Path) -> std::io::Result<()> {
    Ok(())
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    use anyhow::Context;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str) -> FacilityRecord {
        FacilityRecord::stub("Test", name, "https://example.invalid", "Czech Republic")
    }

    #[test]
    fn metadata_count_tracks_records() {
        let mut builder = CatalogBuilder::new();
        builder.push(record("A"));
        builder.extend([record("B"), record("C")]);
        let now = Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let catalog = builder.build(now);

        assert_eq!(catalog.metadata().count, 3);
        assert_eq!(catalog.metadata().count, catalog.facilities().len());
        assert_eq!(catalog.metadata().date, "2026-03-14 09:26:53");
        assert_eq!(catalog.metadata().timestamp, now.timestamp() as f64);
    }

    #[test]
    fn written_catalog_keeps_every_field_and_utf8() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/facilities.json");
        let mut builder = CatalogBuilder::new();
        builder.push(record("Hala Žižkov"));
        write_catalog(&path, &builder.build(Local::now()))?;

        let text = std::fs::read_to_string(&path)?;
        assert!(text.contains("Hala Žižkov"));
        for key in ["postalCode", "openingHours", "hasEquipmentRental", "sourceUrl"] {
            assert!(text.contains(&format!("\"{key}\"")), "missing {key}");
        }

        let loaded = load_catalog(&path)?;
        assert_eq!(loaded.metadata().count, 1);
        let leftovers = std::fs::read_dir(path.parent().unwrap())?.count();
        assert_eq!(leftovers, 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn written_catalog_is_readable_by_other_users() -> anyhow::Result<()> {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("facilities.json");
        let mode = |path: &Path| -> anyhow::Result<u32> {
            Ok(std::fs::metadata(path)?.permissions().mode() & 0o777)
        };

        write_catalog(&path, &CatalogBuilder::new().build(Local::now()))?;
        assert_eq!(mode(&path)?, 0o644);

        std::fs::set_permissions(&path, Permissions::from_mode(0o664))?;
        write_catalog(&path, &CatalogBuilder::new().build(Local::now()))?;
        assert_eq!(mode(&path)?, 0o664);
        Ok(())
    }

    #[test]
    fn unwritable_destination_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let catalog = CatalogBuilder::new().build(Local::now());

        let err = write_catalog(&blocker.join("facilities.json"), &catalog).unwrap_err();
        assert!(matches!(err, ScrapeError::Output { .. }));
    }
}

//! Artifact scanning — walks the policy store and produces module records.
//!
//! The SELinux module store lays artifacts out as
//! `<base>/<priority>/<module>/cil`, usually bzip2-compressed. Stores
//! configured with `bzip-blob = 0` in semanage.conf keep plain text, so the
//! payload codec is sniffed from magic bytes rather than assumed.
//!
//! Scanning is the only I/O in the crate. Decompression and extraction run
//! in parallel, but all records are fully collected (in stable path order)
//! before the caller builds any index — dependency resolution needs global
//! knowledge of declared types.

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{CildepError, Result};
use crate::extract::extract_record;
use crate::graph::ModuleRecord;

/// Default module store of a targeted-policy system.
pub const DEFAULT_BASE_DIR: &str = "/var/lib/selinux/targeted/active/modules";

/// Scanner configuration, threaded explicitly from the CLI.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the policy module store.
    pub base_dir: PathBuf,
}

impl ScanConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

/// Scan the policy store and extract a record per module artifact.
///
/// Unreadable or undecompressable artifacts are skipped with a warning;
/// only storage-level failures (missing or unwalkable base directory) are
/// fatal. Records come back in sorted path order so downstream last-write-
/// wins resolution is deterministic.
pub fn scan_modules(config: &ScanConfig) -> Result<Vec<ModuleRecord>> {
    fs::metadata(&config.base_dir).map_err(|source| CildepError::BaseDir {
        path: config.base_dir.clone(),
        source,
    })?;

    debug!(base_dir = %config.base_dir.display(), "scanning policy store");

    let mut files = Vec::new();
    for entry in WalkBuilder::new(&config.base_dir)
        .standard_filters(false)
        .build()
    {
        let entry = entry?;
        if entry.file_type().is_some_and(|ft| ft.is_file())
            && entry.file_name().to_str() == Some("cil")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let records: Vec<ModuleRecord> = files
        .par_iter()
        .filter_map(|path| match read_artifact(path) {
            Ok(record) => record,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable artifact");
                None
            }
        })
        .collect();

    debug!(count = records.len(), "scan complete");
    Ok(records)
}

/// Read one `cil` artifact into a record.
///
/// Returns `Ok(None)` when the path is too shallow to carry the
/// `<priority>/<module>/cil` shape the store guarantees.
fn read_artifact(path: &Path) -> Result<Option<ModuleRecord>> {
    let Some((name, family)) = module_identity(path) else {
        warn!(path = %path.display(), "artifact outside <priority>/<module>/cil layout");
        return Ok(None);
    };

    let raw = fs::read(path)?;
    let content = decompress(&raw)?;
    Ok(Some(extract_record(&name, &family, &content)))
}

/// Derive (module name, family) from `<...>/<family>/<name>/cil`.
fn module_identity(path: &Path) -> Option<(String, String)> {
    let name = path.parent()?.file_name()?.to_string_lossy().into_owned();
    let family = path
        .parent()?
        .parent()?
        .file_name()?
        .to_string_lossy()
        .into_owned();
    Some((name, family))
}

/// Decompress a module payload, sniffing the codec from magic bytes.
fn decompress(raw: &[u8]) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    if raw.starts_with(b"BZh") {
        BzDecoder::new(raw).read_to_end(&mut content)?;
    } else if raw.starts_with(&[0x1f, 0x8b]) {
        GzDecoder::new(raw).read_to_end(&mut content)?;
    } else {
        // Plain-text store (bzip-blob = 0).
        content.extend_from_slice(raw);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const GOGS_CIL: &str = "\
(typeattributeset cil_gen_require init_t)
(type gogs_t)
(type gogs_exec_t)
";

    fn bz2(content: &str) -> Vec<u8> {
        let mut encoder =
            bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn gz(content: &str) -> Vec<u8> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn write_module(root: &Path, family: &str, name: &str, payload: &[u8]) {
        let dir = root.join(family).join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("cil"), payload).unwrap();
    }

    #[test]
    fn scans_bzip2_artifacts_and_derives_identity() {
        let store = TempDir::new().unwrap();
        write_module(store.path(), "400", "gogs", &bz2(GOGS_CIL));

        let records = scan_modules(&ScanConfig::new(store.path())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "gogs");
        assert_eq!(records[0].family, "400");
        assert_eq!(records[0].declared_types, vec!["gogs_t", "gogs_exec_t"]);
        assert_eq!(records[0].required_types, vec!["init_t"]);
    }

    #[test]
    fn scans_gzip_and_plain_artifacts() {
        let store = TempDir::new().unwrap();
        write_module(store.path(), "100", "zipped", &gz("(type zipped_t)\n"));
        write_module(store.path(), "100", "plain", b"(type plain_t)\n");

        let records = scan_modules(&ScanConfig::new(store.path())).unwrap();
        assert_eq!(records.len(), 2);
        let plain = records.iter().find(|r| r.name == "plain").unwrap();
        assert_eq!(plain.declared_types, vec!["plain_t"]);
        let zipped = records.iter().find(|r| r.name == "zipped").unwrap();
        assert_eq!(zipped.declared_types, vec!["zipped_t"]);
    }

    #[test]
    fn records_come_back_in_sorted_path_order() {
        let store = TempDir::new().unwrap();
        write_module(store.path(), "400", "zeta", &bz2("(type z_t)\n"));
        write_module(store.path(), "100", "alpha", &bz2("(type a_t)\n"));

        let records = scan_modules(&ScanConfig::new(store.path())).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn skips_corrupt_artifacts_without_aborting() {
        let store = TempDir::new().unwrap();
        // Truncated bzip2 stream: magic is right, body is not.
        write_module(store.path(), "400", "broken", b"BZh91AY&SY\x00\x01");
        write_module(store.path(), "400", "good", &bz2("(type good_t)\n"));

        let records = scan_modules(&ScanConfig::new(store.path())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "good");
    }

    #[test]
    fn ignores_files_not_named_cil() {
        let store = TempDir::new().unwrap();
        write_module(store.path(), "400", "gogs", &bz2("(type gogs_t)\n"));
        let dir = store.path().join("400").join("gogs");
        fs::write(dir.join("hll"), b"not a cil artifact").unwrap();
        fs::write(dir.join("lang_ext"), b"cil").unwrap();

        let records = scan_modules(&ScanConfig::new(store.path())).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_base_dir_is_fatal() {
        let store = TempDir::new().unwrap();
        let gone = store.path().join("no-such-store");
        let err = scan_modules(&ScanConfig::new(&gone)).unwrap_err();
        assert!(matches!(err, CildepError::BaseDir { .. }));
    }

    #[test]
    fn empty_store_yields_no_records() {
        let store = TempDir::new().unwrap();
        let records = scan_modules(&ScanConfig::new(store.path())).unwrap();
        assert!(records.is_empty());
    }
}

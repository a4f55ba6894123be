//! Catalog record load/save with schema + invariant validation.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::core::record::CatalogRecord;

const RECORD_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/catalog/v1.schema.json"
));

/// Load and validate a record from disk (schema + invariants).
///
/// A missing file yields an empty record.
pub fn load_record(path: &Path) -> Result<CatalogRecord> {
    debug!(path = %path.display(), "loading catalog record");
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no record on disk, starting empty");
            return Ok(CatalogRecord::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read record {}", path.display()));
        }
    };
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse record {}", path.display()))?;
    validate_schema(&value).with_context(|| format!("validate record {}", path.display()))?;
    // Deserialize from the text, not the `Value`: `Value` objects do not keep
    // key order and loans must come back in lending order.
    let record: CatalogRecord = serde_json::from_str(&contents)
        .with_context(|| format!("deserialize record {}", path.display()))?;
    validate_record_invariants(&record)
        .with_context(|| format!("validate record {}", path.display()))?;
    debug!(
        books = record.books.len(),
        loans = record.loans.len(),
        "catalog record loaded"
    );
    Ok(record)
}

/// Atomically write a record to disk (temp file + rename).
pub fn write_record(path: &Path, record: &CatalogRecord) -> Result<()> {
    debug!(
        path = %path.display(),
        books = record.books.len(),
        loans = record.loans.len(),
        "writing catalog record"
    );
    let mut buf = serde_json::to_string_pretty(record).context("serialize record")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Check a loaded record for problems without failing fast.
///
/// Returns every schema and invariant violation found in `path`. A missing
/// file has none.
pub fn check_record(path: &Path) -> Result<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("read record {}", path.display()));
        }
    };
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse record {}", path.display()))?;
    let mut problems = schema_errors(&value)?;
    if !problems.is_empty() {
        return Ok(problems);
    }
    let record: CatalogRecord = serde_json::from_str(&contents)
        .with_context(|| format!("deserialize record {}", path.display()))?;
    problems.extend(validate_invariants(&record));
    Ok(problems)
}

fn validate_schema(value: &Value) -> Result<()> {
    let messages = schema_errors(value)?;
    if !messages.is_empty() {
        return Err(anyhow!(
            "record schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

fn schema_errors(value: &Value) -> Result<Vec<String>> {
    let schema: Value = serde_json::from_str(RECORD_SCHEMA).context("parse record schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    Ok(compiled
        .iter_errors(value)
        .map(|err| err.to_string())
        .collect())
}

fn validate_record_invariants(record: &CatalogRecord) -> Result<()> {
    let errors = validate_invariants(record);
    if errors.is_empty() {
        return Ok(());
    }
    Err(anyhow!("record invariants failed: {}", errors.join("; ")))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp record {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace record {}", path.display()))?;
    Ok(())
}

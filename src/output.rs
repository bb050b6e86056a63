// 💾 Output - JSON document encoding and the filesystem writer

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::holiday::HolidayRecord;
use crate::source::DocumentWriter;

/// 2-space indented JSON array with a trailing newline
pub fn encode_holidays(holidays: &[HolidayRecord]) -> Result<Vec<u8>> {
    let mut payload =
        serde_json::to_vec_pretty(holidays).context("Failed to encode holidays as JSON")?;
    payload.push(b'\n');
    Ok(payload)
}

/// Parse a document previously produced by [`encode_holidays`]
pub fn decode_holidays(payload: &[u8]) -> Result<Vec<HolidayRecord>> {
    serde_json::from_slice(payload).context("Failed to decode holidays JSON")
}

/// `{out_dir}/{year}.json`
pub fn output_path(out_dir: &Path, year: i32) -> PathBuf {
    out_dir.join(format!("{}.json", year))
}

/// Encode and persist one year's holidays, returning the written path
pub fn write_holidays(
    writer: &dyn DocumentWriter,
    out_dir: &Path,
    year: i32,
    holidays: &[HolidayRecord],
) -> Result<PathBuf> {
    let path = output_path(out_dir, year);
    let payload = encode_holidays(holidays)?;
    writer.write_document(&path, &payload)?;
    Ok(path)
}

// ============================================================================
// FILESYSTEM WRITER
// ============================================================================

/// Creates (or truncates) the target file; the directory must exist
pub struct FsWriter;

impl DocumentWriter for FsWriter {
    fn write_document(&self, path: &Path, payload: &[u8]) -> Result<()> {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(payload)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

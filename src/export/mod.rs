//! CSV export for scraped product rows

use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use crate::models::Product;

/// Write `records` to `path`: one header row derived from the record fields,
/// then one row per record in accumulation order.
///
/// Refuses to write when there are no records, so a failed run never leaves
/// a header-only file behind.
pub fn write_csv(records: &[Product], path: &Path) -> Result<()> {
    if records.is_empty() {
        bail!("no records to write");
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

use std::path::Path;

use anyhow::Result;

use super::ReportData;

/// Write one row per transaction. Returns the number of rows written.
pub(crate) fn write(data: &ReportData, path: &Path) -> Result<usize> {
    let bytes = to_bytes(data)?;
    super::write_atomic(path, &bytes)?;
    let count = data.transaction_count();
    tracing::info!(month = %data.month, path = %path.display(), count, "wrote csv export");
    Ok(count)
}

pub(crate) fn to_bytes(data: &ReportData) -> Result<Vec<u8>> {
    let mut wtr = ::csv::Writer::from_writer(Vec::new());
    wtr.write_record(["month", "category", "date", "description", "amount"])?;
    for cat in &data.categories {
        for txn in &cat.transactions {
            let date = txn.date.to_rfc3339();
            let amount = txn.amount.to_string();
            wtr.write_record([
                data.month.as_str(),
                cat.name.as_str(),
                date.as_str(),
                txn.description.as_str(),
                amount.as_str(),
            ])?;
        }
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))
}

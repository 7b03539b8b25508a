//! CSV export of bulk lookups.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use esgscope::EsgReport;

use crate::render::metric_names;

/// Write `reports` as CSV: `ticker, exchange, company, <metrics...>, status`.
///
/// One row per report in input order. Metric columns follow first-seen
/// order; cells a report lacks are left empty.
pub fn write_reports<W: Write>(reports: &[EsgReport], out: W) -> anyhow::Result<()> {
    let names = metric_names(reports);
    let mut w = csv::Writer::from_writer(out);

    let mut header = vec!["ticker", "exchange", "company"];
    header.extend(names.iter().map(String::as_str));
    header.push("status");
    w.write_record(&header)?;

    for r in reports {
        let mut row: Vec<String> = vec![
            r.ticker.clone(),
            r.exchange.clone(),
            r.company().unwrap_or_default().to_string(),
        ];
        for name in &names {
            row.push(
                r.outcome
                    .result()
                    .and_then(|res| res.metric(name))
                    .map(|m| m.value.to_string())
                    .unwrap_or_default(),
            );
        }
        row.push(r.outcome.reason().unwrap_or_else(|| "ok".into()));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

/// Export to a file, creating or truncating it.
pub fn export_to_path(reports: &[EsgReport], path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_reports(reports, file).with_context(|| format!("writing {}", path.display()))
}

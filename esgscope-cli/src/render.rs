//! Plain-text tables for the terminal.

use esgscope::{EsgReport, LookupOutcome};

/// Column-aligned table with a header rule.
pub struct Table {
    title: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Start a table with the given title and column headers.
    pub fn new<I, S>(title: impl Into<String>, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with blanks.
    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.header.len().max(cells.len()), String::new());
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut w: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let n = cell.chars().count();
                match w.get_mut(i) {
                    Some(slot) => *slot = (*slot).max(n),
                    None => w.push(n),
                }
            }
        }
        w
    }

    /// Render to a string terminated by a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.widths();
        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let c = cells.get(i).map_or("", String::as_str);
                    format!("{c:<w$}")
                })
                .collect();
            format!("| {} |", padded.join(" | "))
        };
        let rule = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&line(&self.header));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

/// Metric table for one lookup: `Metric | Value | Source | Last Updated`.
///
/// A failed lookup renders a single `Error` row carrying the reason.
#[must_use]
pub fn outcome_table(ticker: &str, exchange: &str, outcome: &LookupOutcome) -> String {
    let title = match outcome.result() {
        Some(r) => format!("ESG Data: {} ({ticker}, {exchange})", r.company),
        None => format!("ESG Data: {ticker} ({exchange})"),
    };
    let mut t = Table::new(title, ["Metric", "Value", "Source", "Last Updated"]);
    match outcome {
        LookupOutcome::Found(r) => {
            for m in &r.metrics {
                t.row([
                    m.name.clone(),
                    m.value.to_string(),
                    m.source.clone(),
                    m.last_updated.clone().unwrap_or_else(|| "-".into()),
                ]);
            }
        }
        LookupOutcome::Unavailable(e) => t.row(["Error".to_string(), e.to_string()]),
    }
    t.render()
}

/// Distinct metric names across reports, in first-seen order.
#[must_use]
pub fn metric_names(reports: &[EsgReport]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for r in reports {
        if let Some(res) = r.outcome.result() {
            for m in &res.metrics {
                if !names.contains(&m.name) {
                    names.push(m.name.clone());
                }
            }
        }
    }
    names
}

/// Metric-by-ticker comparison with a trailing status row.
#[must_use]
pub fn comparison_table(reports: &[EsgReport]) -> String {
    let header = std::iter::once("Metric".to_string())
        .chain(reports.iter().map(|r| r.ticker.clone()))
        .collect::<Vec<_>>();
    let mut t = Table::new("Cross-Market ESG Comparison", header);
    for name in metric_names(reports) {
        let cells = reports.iter().map(|r| {
            r.outcome
                .result()
                .and_then(|res| res.metric(&name))
                .map_or_else(|| "-".to_string(), |m| m.value.to_string())
        });
        t.row(std::iter::once(name.clone()).chain(cells));
    }
    t.row(std::iter::once("Exchange".to_string()).chain(reports.iter().map(|r| r.exchange.clone())));
    t.row(
        std::iter::once("Status".to_string())
            .chain(reports.iter().map(|r| r.outcome.reason().unwrap_or_else(|| "ok".into()))),
    );
    t.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgscope::{EsgError, EsgResult, MetricRecord};

    #[test]
    fn found_outcome_lists_metrics() {
        let out = LookupOutcome::Found(EsgResult::new(
            "Malayan Banking Berhad",
            vec![MetricRecord::new("Environmental", 72.5, "Bursa Malaysia").updated("2025-01-15")],
        ));
        let s = outcome_table("MAYBANK.KL", "Bursa Malaysia", &out);
        assert!(s.contains("| Metric"));
        assert!(s.contains("Last Updated"));
        assert!(s.contains("Environmental"));
        assert!(s.contains("72.5"));
        assert!(s.contains("2025-01-15"));
    }

    #[test]
    fn failure_renders_error_row() {
        let out = LookupOutcome::Unavailable(EsgError::exhausted("AAPL.US", vec![]));
        let s = outcome_table("AAPL.US", "Yahoo Finance", &out);
        assert!(s.contains("| Error  | ESG data not found |"), "{s}");
    }

    #[test]
    fn columns_align() {
        let mut t = Table::new("T", ["a", "bbb"]);
        t.row(["long cell", "x"]);
        let s = t.render();
        let lens: Vec<usize> = s.lines().skip(1).map(|l| l.chars().count()).collect();
        assert!(lens.windows(2).all(|w| w[0] == w[1]), "{s}");
    }
}

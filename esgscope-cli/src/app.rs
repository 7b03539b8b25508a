//! Interactive menu loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use esgscope::{CountryCode, EsgReport, EsgScope, Ticker, detect};

use crate::analysis::Analyst;
use crate::export::export_to_path;
use crate::render::{comparison_table, outcome_table};

const MENU: &str = "\
=== ESG Scope ===
1. View ESG Data
2. Export Report
3. Cross-Market Analysis
4. Analyze Annual Report
5. Exit
";

/// Menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Look up and display one ticker.
    View,
    /// Resolve several tickers and write a CSV.
    Export,
    /// Compare several tickers side by side.
    Analyze,
    /// Summarize the ESG content of an annual report.
    Report,
    /// Leave the loop.
    Exit,
}

impl Choice {
    /// Parse a menu entry; anything but `1`..`5` is rejected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::View),
            "2" => Some(Self::Export),
            "3" => Some(Self::Analyze),
            "4" => Some(Self::Report),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Split a comma-separated ticker list, skipping blanks.
///
/// Invalid entries are returned separately so the caller can report them.
#[must_use]
pub fn parse_tickers(raw: &str) -> (Vec<Ticker>, Vec<String>) {
    let mut ok = Vec::new();
    let mut bad = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match Ticker::new(part) {
            Ok(t) => ok.push(t),
            Err(_) => bad.push(part.to_string()),
        }
    }
    (ok, bad)
}

/// Terminal session bound to a resolver and a pair of streams.
pub struct App<R, W> {
    scope: EsgScope,
    analyst: Option<Analyst>,
    input: R,
    output: W,
    default_export: PathBuf,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Create a session reading from `input` and writing to `output`.
    pub fn new(scope: EsgScope, input: R, output: W) -> Self {
        Self {
            scope,
            analyst: None,
            input,
            output,
            default_export: PathBuf::from("esg_report.csv"),
        }
    }

    /// Enable the analysis step of the cross-market comparison.
    #[must_use]
    pub fn with_analyst(mut self, analyst: Option<Analyst>) -> Self {
        self.analyst = analyst;
        self
    }

    /// Path offered when the export prompt is left blank.
    #[must_use]
    pub fn default_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_export = path.into();
        self
    }

    /// Consume the session and return the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    /// Returns an error only when the terminal streams fail; lookup and
    /// export failures are reported inline and the loop continues.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            write!(self.output, "\n{MENU}")?;
            let Some(line) = self.prompt("Enter choice (1-5): ")? else {
                break;
            };
            match Choice::parse(&line) {
                Some(Choice::View) => self.view().await?,
                Some(Choice::Export) => self.export().await?,
                Some(Choice::Analyze) => self.analyze().await?,
                Some(Choice::Report) => self.report().await?,
                Some(Choice::Exit) => break,
                None => writeln!(self.output, "Invalid choice. Please enter 1-5.")?,
            }
        }
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print `label` and read one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    async fn view(&mut self) -> anyhow::Result<()> {
        let Some(raw_country) = self.prompt("Country code (blank to detect from suffix): ")? else {
            return Ok(());
        };
        let country = if raw_country.is_empty() {
            None
        } else {
            match CountryCode::new(&raw_country) {
                Ok(c) => Some(c),
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    return Ok(());
                }
            }
        };
        let Some(raw_ticker) = self.prompt("Ticker: ")? else {
            return Ok(());
        };
        let ticker = match Ticker::new(&raw_ticker) {
            Ok(t) => t,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(());
            }
        };

        let outcome = self.scope.resolve(country.as_ref(), &ticker).await;
        if let Some(err) = outcome.error() {
            tracing::debug!(ticker = %ticker, attempts = ?err.clone().flatten(), "lookup failed");
        }
        let exchange = detect(&ticker);
        write!(
            self.output,
            "{}",
            outcome_table(ticker.as_str(), exchange.as_str(), &outcome)
        )?;
        Ok(())
    }

    /// Prompt for tickers and resolve them; `None` when nothing usable was entered.
    async fn batch(&mut self) -> anyhow::Result<Option<Vec<EsgReport>>> {
        let Some(raw) = self.prompt("Tickers (comma-separated): ")? else {
            return Ok(None);
        };
        let (tickers, bad) = parse_tickers(&raw);
        for b in &bad {
            writeln!(self.output, "Skipping invalid ticker: {b}")?;
        }
        if tickers.is_empty() {
            writeln!(self.output, "No tickers entered.")?;
            return Ok(None);
        }
        let requests: Vec<(Option<CountryCode>, Ticker)> =
            tickers.into_iter().map(|t| (None, t)).collect();
        Ok(Some(self.scope.resolve_many(&requests).await))
    }

    async fn export(&mut self) -> anyhow::Result<()> {
        let Some(reports) = self.batch().await? else {
            return Ok(());
        };
        let label = format!("Output file [{}]: ", self.default_export.display());
        let Some(raw_path) = self.prompt(&label)? else {
            return Ok(());
        };
        let path = if raw_path.is_empty() {
            self.default_export.clone()
        } else {
            PathBuf::from(raw_path)
        };
        match export_to_path(&reports, &path) {
            Ok(()) => {
                let found = reports.iter().filter(|r| r.outcome.is_found()).count();
                writeln!(
                    self.output,
                    "Exported {} tickers ({found} with data) to {}",
                    reports.len(),
                    path.display()
                )?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                writeln!(self.output, "Export failed: {e:#}")?;
            }
        }
        Ok(())
    }

    async fn analyze(&mut self) -> anyhow::Result<()> {
        let Some(reports) = self.batch().await? else {
            return Ok(());
        };
        let table = comparison_table(&reports);
        write!(self.output, "{table}")?;
        match &self.analyst {
            Some(analyst) => match analyst.summarize(&table).await {
                Ok(text) => writeln!(self.output, "\nAI Analysis:\n{text}")?,
                Err(e) => {
                    tracing::warn!(error = %e, "analysis failed");
                    writeln!(self.output, "\nAI analysis unavailable: {e:#}")?;
                }
            },
            None => writeln!(
                self.output,
                "\nSet {} to enable AI analysis.",
                crate::analysis::OPENAI_KEY_VAR
            )?,
        }
        Ok(())
    }

    async fn report(&mut self) -> anyhow::Result<()> {
        let Some(url) = self.prompt("Annual report URL (PDF or HTML): ")? else {
            return Ok(());
        };
        if url.is_empty() {
            writeln!(self.output, "No URL entered.")?;
            return Ok(());
        }
        let Some(analyst) = &self.analyst else {
            writeln!(
                self.output,
                "Set {} to enable annual report analysis.",
                crate::analysis::OPENAI_KEY_VAR
            )?;
            return Ok(());
        };
        writeln!(self.output, "Fetching {url}")?;
        match analyst.analyze_report(&url).await {
            Ok(text) => writeln!(self.output, "\nAnnual Report Analysis:\n{text}")?,
            Err(e) => {
                tracing::warn!(error = %e, "report analysis failed");
                writeln!(self.output, "Error processing report: {e:#}")?;
            }
        }
        Ok(())
    }
}

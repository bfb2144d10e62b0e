//! CSV and print renderers.

use crate::model::guest::Guest;
use crate::query::view::{counts, RosterCounts};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Suggested download file name for CSV exports.
pub const CSV_FILE_NAME: &str = "guest-list.csv";
const CSV_HEADER: [&str; 2] = ["Name", "Status"];
const REPORT_TITLE: &str = "Volutrack Guest List";
const REPORT_SUBTITLE: &str = "Rosamond Elementary";

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Encoding(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
            Self::Encoding(message) => write!(f, "csv export produced invalid text: {message}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Encoding(_) => None,
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Renders one `Name,Status` row per guest under a header row.
///
/// Names are quoted by the CSV writer when they contain separators or quotes.
pub fn export_csv(guests: &[Guest]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for guest in guests {
        writer.write_record([guest.name.as_str(), guest.status_label()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Encoding(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Encoding(err.to_string()))
}

/// Renders a printable report: title, summary counts, then a numbered list.
pub fn print_report(guests: &[Guest]) -> String {
    Report { guests }.to_string()
}

struct Report<'a> {
    guests: &'a [Guest],
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{REPORT_TITLE}")?;
        writeln!(f, "{REPORT_SUBTITLE}")?;
        writeln!(f)?;
        write_summary(f, &counts(self.guests))?;
        writeln!(f)?;

        if self.guests.is_empty() {
            return writeln!(f, "No guests yet.");
        }

        let width = self.guests.len().to_string().len();
        for (position, guest) in self.guests.iter().enumerate() {
            writeln!(
                f,
                "{:>width$}. [{}] {}",
                position + 1,
                if guest.is_confirmed { "x" } else { " " },
                guest.name,
            )?;
            if !guest.details.email.is_empty() {
                writeln!(f, "{:width$}    email: {}", "", guest.details.email)?;
            }
            if !guest.details.phone.is_empty() {
                writeln!(f, "{:width$}    phone: {}", "", guest.details.phone)?;
            }
        }
        Ok(())
    }
}

fn write_summary(f: &mut Formatter<'_>, summary: &RosterCounts) -> std::fmt::Result {
    writeln!(f, "Attending:   {}", summary.attending)?;
    writeln!(f, "Unconfirmed: {}", summary.unconfirmed)?;
    writeln!(f, "Total:       {}", summary.total)?;
    writeln!(
        f,
        "Confirmation rate: {}%",
        summary.confirmation_rate_percent()
    )
}

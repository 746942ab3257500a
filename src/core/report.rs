//! CSV export and dashboard reporting.
//!
//! Export takes the already filtered/sorted list a screen is showing plus an
//! enumerated column list, and produces a comma-separated blob with a
//! date-stamped filename. Quoting follows CSV rules: fields embedding commas
//! or quotes are wrapped, everything else is written bare.

use crate::core::sales::{self, SalesTotals};
use crate::entities::{DataSource, Record};
use crate::errors::{Error, Result};
use crate::store::MirrorState;
use chrono::NaiveDate;

/// An exportable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Record key
    Id,
    /// Display name
    Name,
    /// Email
    Email,
    /// Phone
    Phone,
    /// Canonical status text
    Status,
    /// Monetary amount, two decimals
    Amount,
    /// Designated date field, RFC 3339
    Date,
}

impl Column {
    /// Header cell for the column.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Email => "email",
            Column::Phone => "phone",
            Column::Status => "status",
            Column::Amount => "amount",
            Column::Date => "date",
        }
    }

    fn value(self, record: &Record) -> String {
        match self {
            Column::Id => record.key().to_string(),
            Column::Name => record.name().unwrap_or_default().to_string(),
            Column::Email => record.email().unwrap_or_default().to_string(),
            Column::Phone => record.phone().unwrap_or_default().to_string(),
            Column::Status => record.status_text().unwrap_or_default(),
            Column::Amount => record
                .amount()
                .map(|amount| format!("{amount:.2}"))
                .unwrap_or_default(),
            Column::Date => record
                .date_field()
                .map(|date| date.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

/// Renders the given records into a CSV blob with a header row.
pub fn export_csv(records: &[Record], columns: &[Column]) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(columns.iter().map(|column| column.header()))?;
        for record in records {
            writer.write_record(columns.iter().map(|column| column.value(record)))?;
        }
        writer.flush()?;
    }
    String::from_utf8(buf).map_err(|e| Error::Validation {
        message: format!("export produced invalid UTF-8: {e}"),
    })
}

/// Derived filename for an export: `{prefix}_{YYYY-MM-DD}.csv`.
#[must_use]
pub fn export_filename(prefix: &str, today: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, today.format("%Y-%m-%d"))
}

/// Headline numbers for the company dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    /// Mirrored order count
    pub orders: usize,
    /// Mirrored trainer count
    pub trainers: usize,
    /// Mirrored product count
    pub products: usize,
    /// Mirrored customer count
    pub customers: usize,
    /// Sales/commission/withdrawal fold over the transactions collection
    pub sales: SalesTotals,
}

/// Folds the mirror into the dashboard headline numbers.
#[must_use]
pub fn dashboard_summary(state: &MirrorState) -> DashboardSummary {
    DashboardSummary {
        orders: state.len(DataSource::Orders),
        trainers: state.len(DataSource::Trainers),
        products: state.len(DataSource::Products),
        customers: state.len(DataSource::Customers),
        sales: sales::totals(&state.records(DataSource::Transactions)),
    }
}

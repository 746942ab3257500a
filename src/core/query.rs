//! Filter/sort/paginate engine for mirrored record lists.
//!
//! Pure functions over an in-memory list: text search across the enumerated
//! field set, status and date-range filters, a stable single-key sort, and
//! page slicing. Every management screen drives its table through
//! [`process`].

use crate::entities::Record;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

/// Date-range presets offered by the screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    /// No date filtering
    #[default]
    All,
    /// Midnight today up to (not including) midnight tomorrow
    Today,
    /// Trailing seven days, ending tomorrow midnight
    Week,
    /// Trailing thirty days, ending tomorrow midnight
    Month,
    /// Trailing 365 days, ending tomorrow midnight
    Year,
    /// Caller-supplied inclusive day range; a no-op unless both bounds are
    /// present
    Custom,
}

/// Sortable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Display name, case-insensitive
    Name,
    /// Designated date field of the collection
    Date,
    /// Monetary amount
    Amount,
    /// Canonical status text
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// Parameters of one table view.
#[derive(Debug, Clone)]
pub struct QueryParams {
    /// Case-insensitive substring matched against name, email, phone and id;
    /// empty means no search
    pub search: String,
    /// Exact (case-insensitive) status to keep; `"all"` or empty bypasses
    pub status_filter: String,
    /// Date-range preset
    pub date_filter: DateFilter,
    /// First day of a custom range (inclusive)
    pub custom_start: Option<NaiveDate>,
    /// Last day of a custom range (inclusive)
    pub custom_end: Option<NaiveDate>,
    /// Sort key; `None` keeps the mirror's key order
    pub sort_by: Option<SortBy>,
    /// Sort direction
    pub sort_order: SortOrder,
    /// One-based page number
    pub page: usize,
    /// Records per page
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            status_filter: "all".to_string(),
            date_filter: DateFilter::All,
            custom_start: None,
            custom_end: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: 10,
        }
    }
}

/// One page of a processed record list.
#[derive(Debug, Clone)]
pub struct QueryPage {
    /// Records on the requested page (empty when the page is out of range)
    pub page_items: Vec<Record>,
    /// Number of pages for the filtered set
    pub total_pages: usize,
    /// Size of the filtered set before paging
    pub total_count: usize,
}

/// Filters, sorts and pages a record list.
///
/// `now` anchors the date presets, passed in by the caller so screens and
/// tests agree on what "today" means.
#[must_use]
pub fn process(records: &[Record], params: &QueryParams, now: DateTime<Utc>) -> QueryPage {
    let window = date_window(params, now);

    let mut filtered: Vec<Record> = records
        .iter()
        .filter(|record| matches_search(record, &params.search))
        .filter(|record| matches_status(record, &params.status_filter))
        .filter(|record| matches_window(record, window))
        .cloned()
        .collect();

    if let Some(sort_by) = params.sort_by {
        // Vec::sort_by is stable: ties keep their original relative order.
        filtered.sort_by(|a, b| {
            let ordering = compare(a, b, sort_by);
            match params.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let total_count = filtered.len();
    let page_size = params.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size);
    let start = params.page.saturating_sub(1).saturating_mul(page_size);
    let page_items: Vec<Record> = filtered.into_iter().skip(start).take(page_size).collect();

    QueryPage {
        page_items,
        total_pages,
        total_count,
    }
}

fn matches_search(record: &Record, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let fields = [
        record.name(),
        record.email(),
        record.phone(),
        Some(record.key()),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_status(record: &Record, filter: &str) -> bool {
    let wanted = filter.trim().to_lowercase();
    if wanted.is_empty() || wanted == "all" {
        return true;
    }
    // User records filter on either role or seller level.
    record.status_text().is_some_and(|status| status == wanted)
        || record.level_text().is_some_and(|level| level == wanted)
}

fn matches_window(record: &Record, window: Option<(DateTime<Utc>, DateTime<Utc>)>) -> bool {
    let Some((start, end)) = window else {
        return true;
    };
    // A record without a usable date does not pass an active date filter.
    record
        .date_field()
        .is_some_and(|date| start <= date && date < end)
}

/// Derived `[start, end)` window for the active preset, or `None` when the
/// filter is a no-op (preset `All`, or `Custom` with a missing bound).
fn date_window(params: &QueryParams, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = |date: NaiveDate| date.and_time(NaiveTime::MIN).and_utc();
    let tomorrow = midnight(now.date_naive().checked_add_days(Days::new(1))?);

    match params.date_filter {
        DateFilter::All => None,
        DateFilter::Today => Some((midnight(now.date_naive()), tomorrow)),
        DateFilter::Week => Some((tomorrow - chrono::Duration::days(7), tomorrow)),
        DateFilter::Month => Some((tomorrow - chrono::Duration::days(30), tomorrow)),
        DateFilter::Year => Some((tomorrow - chrono::Duration::days(365), tomorrow)),
        DateFilter::Custom => {
            let (start, end) = (params.custom_start?, params.custom_end?);
            Some((midnight(start), midnight(end.checked_add_days(Days::new(1))?)))
        }
    }
}

fn compare(a: &Record, b: &Record, sort_by: SortBy) -> std::cmp::Ordering {
    match sort_by {
        SortBy::Name => text_key(a.name()).cmp(&text_key(b.name())),
        SortBy::Status => a.status_text().cmp(&b.status_text()),
        SortBy::Date => option_cmp(a.date_field(), b.date_field()),
        SortBy::Amount => match (a.amount(), b.amount()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        },
    }
}

fn option_cmp<T: Ord>(a: Option<T>, b: Option<T>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

fn text_key(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

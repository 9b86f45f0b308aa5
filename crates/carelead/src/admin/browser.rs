use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::export::{export, CsvExport, ExportError};
use super::pipeline::{filter_and_sort, paginate, Page};
use super::query::BrowserQuery;
use super::record::AdminRecord;
use super::source::ApplicationSource;

/// One admin tab: the fetched records plus the admin's current filter, sort, and page.
#[derive(Debug, Clone)]
pub struct AdminBrowser<R> {
    records: Vec<R>,
    query: BrowserQuery,
}

impl<R> Default for AdminBrowser<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            query: BrowserQuery::default(),
        }
    }
}

impl<R: AdminRecord> AdminBrowser<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            query: BrowserQuery::default(),
        }
    }

    /// Replaces the records with a fresh fetch. A failed fetch is logged and leaves the tab empty.
    pub fn load<S>(&mut self, source: &S) -> usize
    where
        S: ApplicationSource<R> + ?Sized,
    {
        self.records = match source.fetch() {
            Ok(records) => records,
            Err(err) => {
                warn!(variant = R::VARIANT.slug(), error = %err, "failed to fetch applications");
                Vec::new()
            }
        };
        debug!(
            variant = R::VARIANT.slug(),
            count = self.records.len(),
            "applications loaded"
        );
        self.records.len()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn query(&self) -> &BrowserQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut BrowserQuery {
        &mut self.query
    }

    pub fn with_query(mut self, query: BrowserQuery) -> Self {
        self.query = query;
        self
    }

    /// All matching records in display order.
    pub fn matching(&self, now: DateTime<Utc>) -> Vec<&R> {
        filter_and_sort(&self.records, &self.query, now)
    }

    pub fn page(&self, now: DateTime<Utc>) -> Page<'_, R> {
        paginate(&self.matching(now), self.query.page())
    }

    /// Exports every matching record regardless of the page on screen.
    pub fn export(&self, now: DateTime<Utc>) -> Result<CsvExport, ExportError> {
        export(&self.matching(now), now)
    }
}

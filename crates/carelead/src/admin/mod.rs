//! Admin application browser.
//!
//! Job and care applications are fetched from a record source, narrowed by search, status, and
//! date filters, sorted, and paged ten at a time. The same filtered set can be exported to CSV.

pub mod browser;
pub mod export;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod router;
pub mod source;

#[cfg(test)]
mod tests;

pub use browser::AdminBrowser;
pub use export::{CsvExport, ExportError};
pub use pipeline::{Page, PAGE_SIZE};
pub use query::{
    BrowserQuery, BrowserQueryParams, DateFilter, QueryError, SortDirection, SortField,
    StatusFilter,
};
pub use record::{AdminRecord, ApplicationStatus, CareApplication, JobApplication, RecordVariant};
pub use router::{admin_router, AdminService};
pub use source::{read_envelope, ApplicationSource, ApplicationsEnvelope, SourceError};

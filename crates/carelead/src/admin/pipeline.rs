//! Search, status, and date filtering, then sorting and pagination, always in that order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::query::{BrowserQuery, DateFilter, SortDirection, SortField, StatusFilter};
use super::record::AdminRecord;

pub const PAGE_SIZE: usize = 10;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Case-insensitive on name and email; phone numbers are matched as typed.
pub fn matches_search<R: AdminRecord>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    record.full_name().to_lowercase().contains(&needle)
        || record.email().to_lowercase().contains(&needle)
        || record.phone().contains(query)
}

pub fn matches_status<R: AdminRecord>(record: &R, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Only(status) => record.status() == status.as_str(),
    }
}

/// Whole elapsed 24h periods, floored, so records from the future come out negative.
pub fn days_since(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// `Today` means less than 24h elapsed, not the same calendar day.
pub fn matches_date<R: AdminRecord>(record: &R, filter: DateFilter, now: DateTime<Utc>) -> bool {
    let days = days_since(record.created_at(), now);
    match filter {
        DateFilter::All => true,
        DateFilter::Today => days == 0,
        DateFilter::Week => days <= 7,
        DateFilter::Month => days <= 30,
    }
}

/// Approximates a root-locale collation: letters compare case-insensitively first,
/// and on a tie lowercase sorts before uppercase.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    let folded = left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        left.chars()
            .map(char::is_uppercase)
            .cmp(right.chars().map(char::is_uppercase))
    })
}

pub fn compare<R: AdminRecord>(left: &R, right: &R, field: SortField) -> Ordering {
    match field {
        SortField::Date => left.created_at().cmp(&right.created_at()),
        SortField::Name => locale_compare(&left.full_name(), &right.full_name()),
        SortField::Status => locale_compare(left.status(), right.status()),
    }
}

/// Every record that passes the three filters, in display order.
pub fn filter_and_sort<'a, R: AdminRecord>(
    records: &'a [R],
    query: &BrowserQuery,
    now: DateTime<Utc>,
) -> Vec<&'a R> {
    let mut matching: Vec<&R> = records
        .iter()
        .filter(|record| matches_search(*record, query.search()))
        .filter(|record| matches_status(*record, query.status()))
        .filter(|record| matches_date(*record, query.date(), now))
        .collect();

    let field = query.sort_field();
    match query.sort_direction() {
        SortDirection::Asc => matching.sort_by(|left, right| compare(*left, *right, field)),
        SortDirection::Desc => {
            matching.sort_by(|left, right| compare(*left, *right, field).reverse())
        }
    }

    matching
}

/// One page of sorted records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, R> {
    pub items: Vec<&'a R>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matching: usize,
}

/// Slices out a 1-based page; asking past the end yields an empty page.
pub fn paginate<'a, R>(sorted: &[&'a R], page: usize) -> Page<'a, R> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    let items = sorted
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .copied()
        .collect();

    Page {
        items,
        page,
        page_size: PAGE_SIZE,
        total_pages: sorted.len().div_ceil(PAGE_SIZE),
        total_matching: sorted.len(),
    }
}

use super::common::*;
use chrono::Duration;

use crate::admin::pipeline::{
    days_since, filter_and_sort, locale_compare, matches_date, matches_search, matches_status,
    paginate,
};
use crate::admin::{
    AdminBrowser, AdminRecord, ApplicationStatus, BrowserQuery, DateFilter, JobApplication,
    SortDirection, SortField, StatusFilter,
};
use std::cmp::Ordering;

fn ids<R: AdminRecord>(records: &[&R]) -> Vec<String> {
    records.iter().map(|record| record.id().to_string()).collect()
}

#[test]
fn pending_filter_pages_ten_then_two() {
    let mut browser = AdminBrowser::new(job_pool());
    browser
        .query_mut()
        .set_status(StatusFilter::Only(ApplicationStatus::Pending));

    let first = browser.page(now());
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.total_matching, 12);
    assert_eq!(
        ids(&first.items),
        vec!["job-0", "job-2", "job-4", "job-6", "job-8", "job-10", "job-12", "job-14", "job-16", "job-18"]
    );

    browser.query_mut().set_page(2);
    let second = browser.page(now());
    assert_eq!(second.page, 2);
    assert_eq!(ids(&second.items), vec!["job-20", "job-22"]);
}

#[test]
fn empty_match_reports_zero_pages() {
    let mut browser = AdminBrowser::new(job_pool());
    browser.query_mut().set_search("nobody-by-this-name");

    let page = browser.page(now());
    assert_eq!(page.page, 1);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.total_matching, 0);
}

#[test]
fn page_past_the_end_is_empty() {
    let pool = job_pool();
    let sorted: Vec<_> = pool.iter().collect();
    let page = paginate(&sorted, 9);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 3);
}

#[test]
fn default_order_is_newest_first() {
    let pool = job_pool();
    let sorted = filter_and_sort(&pool, &BrowserQuery::default(), now());
    assert_eq!(sorted.len(), 25);
    assert_eq!(sorted[0].id, "job-0");
    assert_eq!(sorted[24].id, "job-24");
}

#[test]
fn filters_compose_regardless_of_order() {
    let mut pool = job_pool();
    pool.push(job(30, "Applicant", "Number1X", ApplicationStatus::Pending, Duration::days(3)));
    let status = StatusFilter::Only(ApplicationStatus::Pending);
    let filters: [&dyn Fn(&JobApplication) -> bool; 3] = [
        &|record| matches_search(record, "number1"),
        &|record| matches_status(record, status),
        &|record| matches_date(record, DateFilter::Today, now()),
    ];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for order in orders {
        let mut remaining: Vec<&JobApplication> = pool.iter().collect();
        for index in order {
            remaining.retain(|record| filters[index](record));
        }
        let mut found = ids(&remaining);
        found.sort();
        assert_eq!(
            found,
            vec!["job-10", "job-12", "job-14", "job-16", "job-18"],
            "filter order {order:?}"
        );
    }

    let mut query = BrowserQuery::default();
    query.set_search("number1");
    query.set_status(status);
    query.set_date(DateFilter::Today);
    let mut piped = ids(&filter_and_sort(&pool, &query, now()));
    piped.sort();
    assert_eq!(piped, vec!["job-10", "job-12", "job-14", "job-16", "job-18"]);
}

#[test]
fn unknown_statuses_only_match_all() {
    let mut odd = job(1, "Odd", "Status", ApplicationStatus::Pending, Duration::hours(1));
    odd.status = "in_review".to_string();
    let records = vec![odd, job(2, "Plain", "Pending", ApplicationStatus::Pending, Duration::hours(2))];

    let mut query = BrowserQuery::default();
    assert_eq!(filter_and_sort(&records, &query, now()).len(), 2);

    query.set_status(StatusFilter::Only(ApplicationStatus::Pending));
    assert_eq!(ids(&filter_and_sort(&records, &query, now())), vec!["job-2"]);
}

#[test]
fn search_matches_name_email_and_raw_phone() {
    let pool = job_pool();
    let mut query = BrowserQuery::default();

    query.set_search("NUMBER07");
    assert_eq!(ids(&filter_and_sort(&pool, &query, now())), vec!["job-7"]);

    query.set_search("applicant.number13@EXAMPLE");
    assert_eq!(ids(&filter_and_sort(&pool, &query, now())), vec!["job-13"]);

    query.set_search("000-0021");
    assert_eq!(ids(&filter_and_sort(&pool, &query, now())), vec!["job-21"]);

    query.set_search("0000021");
    assert!(filter_and_sort(&pool, &query, now()).is_empty());
}

#[test]
fn date_filters_use_whole_elapsed_days() {
    let records = vec![
        care(1, "Fresh", "Lead", Duration::hours(23) + Duration::minutes(59)),
        care(2, "Day", "Old", Duration::hours(24)),
        care(3, "Week", "Edge", Duration::days(7) + Duration::hours(23)),
        care(4, "Week", "Past", Duration::days(8)),
        care(5, "Month", "Edge", Duration::days(30) + Duration::hours(1)),
        care(6, "Month", "Past", Duration::days(31)),
    ];

    let matching = |filter: DateFilter| {
        let mut query = BrowserQuery::default();
        query.set_date(filter);
        query.set_sort_direction(SortDirection::Asc);
        let mut found = ids(&filter_and_sort(&records, &query, now()));
        found.sort();
        found
    };

    assert_eq!(matching(DateFilter::Today), vec!["care-1"]);
    assert_eq!(matching(DateFilter::Week), vec!["care-1", "care-2", "care-3"]);
    assert_eq!(
        matching(DateFilter::Month),
        vec!["care-1", "care-2", "care-3", "care-4", "care-5"]
    );
    assert_eq!(matching(DateFilter::All).len(), 6);
}

#[test]
fn future_records_are_not_from_today() {
    assert_eq!(days_since(now() + Duration::hours(1), now()), -1);

    let records = vec![care(1, "Clock", "Skew", Duration::hours(-1))];
    let mut query = BrowserQuery::default();
    query.set_date(DateFilter::Today);
    assert!(filter_and_sort(&records, &query, now()).is_empty());
}

#[test]
fn name_sort_ignores_case_first() {
    let records = vec![
        care(1, "bob", "Smith", Duration::hours(1)),
        care(2, "Alice", "Jones", Duration::hours(2)),
        care(3, "alice", "Jones", Duration::hours(3)),
    ];
    let mut query = BrowserQuery::default();
    query.set_sort_field(SortField::Name);
    query.set_sort_direction(SortDirection::Asc);

    let sorted = filter_and_sort(&records, &query, now());
    assert_eq!(ids(&sorted), vec!["care-3", "care-2", "care-1"]);

    query.set_sort_direction(SortDirection::Desc);
    let sorted = filter_and_sort(&records, &query, now());
    assert_eq!(ids(&sorted), vec!["care-1", "care-2", "care-3"]);
}

#[test]
fn locale_compare_orders_case_variants() {
    assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
    assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
    assert_eq!(locale_compare("Pending", "pending"), Ordering::Greater);
    assert_eq!(locale_compare("same", "same"), Ordering::Equal);
}

#[test]
fn status_sort_uses_raw_values() {
    let records = vec![
        job(1, "A", "One", ApplicationStatus::Reviewed, Duration::hours(1)),
        job(2, "B", "Two", ApplicationStatus::Contacted, Duration::hours(2)),
        job(3, "C", "Three", ApplicationStatus::Hired, Duration::hours(3)),
    ];
    let mut query = BrowserQuery::default();
    query.toggle_sort(SortField::Status);
    query.toggle_sort(SortField::Status);

    assert_eq!(query.sort_direction(), SortDirection::Asc);
    let sorted = filter_and_sort(&records, &query, now());
    assert_eq!(ids(&sorted), vec!["job-2", "job-3", "job-1"]);
}

#[test]
fn failed_fetch_leaves_the_tab_empty() {
    let mut browser = AdminBrowser::new(job_pool());
    let loaded = browser.load(&FailingSource);

    assert_eq!(loaded, 0);
    assert!(browser.records().is_empty());
    assert_eq!(browser.page(now()).total_pages, 0);
}

#[test]
fn reload_replaces_previous_records() {
    let mut browser = AdminBrowser::default();
    let source = StaticSource {
        records: job_pool(),
    };
    assert_eq!(browser.load(&source), 25);
    assert_eq!(browser.load(&source), 25);
    assert_eq!(browser.records().len(), 25);
}

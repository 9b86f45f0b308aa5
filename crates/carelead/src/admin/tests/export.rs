use super::common::*;
use chrono::{Duration, NaiveDate};

use crate::admin::export::{export_filename, short_date, write_csv};
use crate::admin::{
    AdminBrowser, ApplicationStatus, CsvExport, RecordVariant, StatusFilter,
};

#[test]
fn export_covers_every_match_not_just_the_page() {
    let mut browser = AdminBrowser::new(job_pool());
    browser
        .query_mut()
        .set_status(StatusFilter::Only(ApplicationStatus::Pending));
    browser.query_mut().set_page(2);

    let export = browser.export(now()).expect("export succeeds");
    assert_eq!(export.rows, 12);
    assert_eq!(export.body.lines().count(), 13);
    assert_eq!(export.filename, "job-applications-2026-10-16.csv");
}

#[test]
fn filenames_carry_variant_and_date() {
    let day = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
    assert_eq!(
        export_filename(RecordVariant::Care, day),
        "care-applications-2026-01-05.csv"
    );
    assert_eq!(
        export_filename(RecordVariant::Job, day),
        "job-applications-2026-01-05.csv"
    );
}

#[test]
fn job_rows_render_booleans_and_dates() {
    let mut record = job(3, "Grace", "Hopper", ApplicationStatus::Hired, Duration::days(2));
    record.has_experience = Some(true);
    let missing = job(4, "Alan", "Turing", ApplicationStatus::Pending, Duration::zero());

    let body = write_csv(&[&record, &missing]).expect("csv written");
    let lines: Vec<&str> = body.lines().collect();

    assert!(lines[0].starts_with("\"First Name\",\"Last Name\",\"Email\""));
    assert!(lines[0].ends_with("\"Status\",\"Admin Notes\",\"Created At\""));
    assert!(lines[1].contains("\"Yes\""));
    assert!(lines[1].contains("\"hired\""));
    assert!(lines[1].ends_with("\"10/14/2026\""));
    assert!(lines[2].contains("\"No\""));
    assert_eq!(short_date(now()), "10/16/2026");
}

#[test]
fn embedded_quotes_and_commas_stay_in_one_field() {
    let mut record = care(1, "Mary, Jr.", "O\"Neil", Duration::hours(1));
    record.admin_notes = Some("said \"call after 5\", prefers text".to_string());

    let body = write_csv(&[&record]).expect("csv written");
    let row = body.lines().nth(1).expect("data row");

    assert!(row.starts_with("\"Mary, Jr.\",\"O\"\"Neil\","));
    assert!(row.contains("\"said \"\"call after 5\"\", prefers text\""));

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let parsed = reader
        .records()
        .next()
        .expect("one record")
        .expect("record parses");
    assert_eq!(&parsed[0], "Mary, Jr.");
    assert_eq!(&parsed[1], "O\"Neil");
    assert_eq!(parsed.len(), 12);
}

#[test]
fn care_rows_render_sms_consent() {
    let mut record = care(2, "Ada", "Lovelace", Duration::hours(1));
    record.sms_consent = true;
    let row = write_csv(&[&record]).expect("csv written");
    assert!(row.lines().nth(1).expect("data row").contains("\"Yes\""));
}

#[test]
fn empty_export_still_has_a_header() {
    let browser = AdminBrowser::new(Vec::<crate::admin::CareApplication>::new());
    let export = browser.export(now()).expect("export succeeds");

    assert_eq!(export.rows, 0);
    assert_eq!(export.body.lines().count(), 1);
    assert_eq!(CsvExport::content_type(), mime::TEXT_CSV);
    assert_eq!(
        export.content_disposition(),
        "attachment; filename=\"care-applications-2026-10-16.csv\""
    );
}

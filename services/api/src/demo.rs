use crate::infra::{InMemoryLeadStore, StaticJobBoard};
use carelead::admin::{
    read_envelope, AdminBrowser, AdminRecord, BrowserQuery, BrowserQueryParams, CareApplication,
    CsvExport, JobApplication, RecordVariant,
};
use carelead::config::{AppConfig, IntakeConfig};
use carelead::error::AppError;
use carelead::intake::{
    BackBehavior, JobBoard, JobContext, StepDescriptor, SubmissionState, WizardBlueprint,
    WizardController, WizardKind,
};
use chrono::Utc;
use clap::Args;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DescribeArgs {
    /// Wizard to describe (e.g. in-home-care, job-application)
    #[arg(value_parser = parse_kind)]
    pub(crate) kind: WizardKind,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Application type: job or care
    #[arg(long, value_parser = parse_variant)]
    pub(crate) variant: RecordVariant,
    /// Saved `{ success, applications }` JSON response
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Case-insensitive search on name and email, raw match on phone
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Status filter (all, pending, reviewed, ...)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Date filter (all, today, week, month)
    #[arg(long)]
    pub(crate) date: Option<String>,
    /// Sort column (date, name, status)
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Sort direction (asc, desc)
    #[arg(long)]
    pub(crate) direction: Option<String>,
    /// Destination file; defaults to the dated export filename in the current directory
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Care wizard to walk through
    #[arg(long, value_parser = parse_care_kind)]
    pub(crate) wizard: Option<WizardKind>,
    /// Skip the job application portion of the demo.
    #[arg(long)]
    pub(crate) skip_job: bool,
}

pub(crate) fn parse_kind(raw: &str) -> Result<WizardKind, String> {
    WizardKind::parse(raw).ok_or_else(|| {
        let known: Vec<_> = WizardKind::ordered()
            .into_iter()
            .map(WizardKind::slug)
            .collect();
        format!("unknown wizard '{raw}' (expected one of {})", known.join(", "))
    })
}

/// Like [`parse_kind`], limited to the wizards the demo can walk end to end.
pub(crate) fn parse_care_kind(raw: &str) -> Result<WizardKind, String> {
    let kind = parse_kind(raw)?;
    if kind.is_care() {
        Ok(kind)
    } else {
        Err(format!("'{raw}' is not a care wizard"))
    }
}

pub(crate) fn parse_variant(raw: &str) -> Result<RecordVariant, String> {
    RecordVariant::parse(raw).ok_or_else(|| format!("unknown application type '{raw}'"))
}

pub(crate) fn run_wizard_describe(args: DescribeArgs) -> Result<(), AppError> {
    let blueprint = WizardBlueprint::for_kind(args.kind, &IntakeConfig::default());
    match serde_json::to_string_pretty(&blueprint) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Wizard description unavailable: {err}"),
    }
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let params = BrowserQueryParams {
        search: args.search.clone(),
        status: args.status.clone(),
        date: args.date.clone(),
        sort: args.sort.clone(),
        direction: args.direction.clone(),
        page: None,
    };
    let query = BrowserQuery::from_params(&params)?;

    let now = Utc::now();
    let export = match args.variant {
        RecordVariant::Job => load_browser::<JobApplication>(&args.input, query)?.export(now)?,
        RecordVariant::Care => load_browser::<CareApplication>(&args.input, query)?.export(now)?,
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&export.filename));
    std::fs::write(&output, &export.body)?;
    println!("Exported {} applications to {}", export.rows, output.display());
    Ok(())
}

fn load_browser<R>(input: &Path, query: BrowserQuery) -> Result<AdminBrowser<R>, AppError>
where
    R: AdminRecord + DeserializeOwned,
{
    let reader = BufReader::new(File::open(input)?);
    let records = read_envelope(reader)?;
    Ok(AdminBrowser::new(records).with_query(query))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = InMemoryLeadStore::default();
    let kind = args.wizard.unwrap_or(WizardKind::InHomeCare);

    println!("Care lead intake demo");
    let blueprint = Arc::new(WizardBlueprint::for_kind(kind, &config.intake));
    let mut controller = WizardController::new(blueprint, BackBehavior::Standalone)
        .with_success_delay(config.intake.success_close_delay());
    println!("- {} ({} steps)", kind.label(), controller.step_count());

    walk_care_wizard(&mut controller)?;
    if let Some(heading) = controller.contact_heading() {
        println!("  Contact step heading: {heading}");
    }
    report_submission(controller.submit(&store)?);
    if let Some(completion) = controller.completion() {
        println!(
            "  Host closes the wizard after {} ms",
            completion.after.as_millis()
        );
    }

    println!("\nResubmitting the same email");
    controller.reset();
    walk_care_wizard(&mut controller)?;
    report_submission(controller.submit(&store)?);

    if !args.skip_job {
        println!("\nJob application from the careers page");
        let board = StaticJobBoard::seeded();
        let listings = board.listings()?;
        if let Some(listing) = listings.first() {
            let context = JobContext::from_listing(listing, Some("Brampton, ON"));
            let blueprint = Arc::new(WizardBlueprint::for_kind(
                WizardKind::JobApplication,
                &config.intake,
            ));
            let mut controller = WizardController::new(blueprint, BackBehavior::Embedded)
                .with_job_context(&context);
            for (field, value) in [
                ("firstName", "Grace"),
                ("lastName", "Hopper"),
                ("mobileNumber", "1 555 987 6543"),
                ("email", "grace@example.com"),
            ] {
                controller.set_field(field, value)?;
            }
            println!("- Applying for {} in {}", context.job_title, context.search_location);
            report_submission(controller.submit(&store)?);
        }
    }

    println!("\nAdmin view");
    let now = Utc::now();
    let mut care = AdminBrowser::<CareApplication>::default();
    care.load(&store);
    print_tab(&care, now)?;

    let mut jobs = AdminBrowser::<JobApplication>::default();
    jobs.load(&store);
    print_tab(&jobs, now)?;

    Ok(())
}

/// Answers every step of a care wizard with its first option, stopping on the contact form.
fn walk_care_wizard(controller: &mut WizardController) -> Result<(), AppError> {
    while let Some(step) = controller.current_descriptor() {
        match *step {
            StepDescriptor::Choice { field, options, .. } => {
                let Some(option) = options.first() else {
                    return Ok(());
                };
                if !controller.select_single(field, option.value)? {
                    return Ok(());
                }
            }
            StepDescriptor::MultiChoice { field, options, .. } => {
                if let Some(option) = options.first() {
                    controller.toggle_multi(field, option.value)?;
                }
                if !controller.go_next() {
                    return Ok(());
                }
            }
            StepDescriptor::ContactForm { consent, .. } => {
                for (field, value) in [
                    ("firstName", "Ada"),
                    ("lastName", "Lovelace"),
                    ("phone", "555 123 4567"),
                    ("email", "ada@example.com"),
                    ("postalCode", "L5B 1A1"),
                ] {
                    controller.set_field(field, value)?;
                }
                if let Some(flag) = consent {
                    controller.set_flag(flag.name, true)?;
                }
                return Ok(());
            }
        }
    }
    Ok(())
}

fn report_submission(state: &SubmissionState) {
    match state {
        SubmissionState::Success(message) => println!("  Submitted: {message}"),
        SubmissionState::Failure(message) => println!("  Submission failed: {message}"),
        SubmissionState::NotSubmitted => println!("  Not submitted"),
    }
}

fn print_tab<R: AdminRecord>(
    browser: &AdminBrowser<R>,
    now: chrono::DateTime<Utc>,
) -> Result<(), AppError> {
    let page = browser.page(now);
    println!(
        "- {} tab: {} matching, page {} of {}",
        R::VARIANT.slug(),
        page.total_matching,
        page.page,
        page.total_pages
    );
    for record in &page.items {
        println!(
            "    {} | {} | {} | {}",
            record.full_name(),
            record.email(),
            record.phone(),
            record.status_label()
        );
    }

    let export: CsvExport = browser.export(now)?;
    println!("  CSV export {} ({} rows)", export.filename, export.rows);
    Ok(())
}

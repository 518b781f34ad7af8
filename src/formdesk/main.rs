use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use formdesk::api::{CmdMessage, ConfigAction, FormApp, MessageLevel, PageInfo, configure};
use formdesk::config::FormdeskConfig;
use formdesk::error::{FormError, Result};
use formdesk::field::{FieldUpdate, FormField};
use formdesk::model::{GenderTag, Nationality, PhoneCountry, Prefix, Record};
use formdesk::store::fs_backend::FsBackend;
use formdesk::table::SortDirection;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, SortArg, SubmitArgs};

const HOME_ENV: &str = "FORMDESK_HOME";
const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";
const KEY_DISPLAY_LEN: usize = 8;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    app: FormApp<FsBackend>,
    data_dir: PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Submit(args)) => handle_submit(&mut ctx, args),
        Some(Commands::List { sort, desc, page }) => handle_list(&mut ctx, sort, desc, page),
        Some(Commands::Delete { key }) => handle_delete(&mut ctx, &key),
        Some(Commands::DeleteSelected { keys }) => handle_delete_selected(&mut ctx, &keys),
        Some(Commands::Clear) => handle_clear(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx, None, false, 1),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "formdesk=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "formdesk", "formdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FormError::Api("Could not determine data directory".into()))
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = FormdeskConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        FormdeskConfig::default()
    });

    let backend = FsBackend::new(data_dir.clone());
    let app = FormApp::new(backend, &config);

    Ok(AppContext { app, data_dir })
}

fn handle_submit(ctx: &mut AppContext, args: SubmitArgs) -> Result<()> {
    for update in submit_updates(args)? {
        ctx.app.apply(update);
    }

    let missing = ctx.app.draft().missing_required();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
        return Err(FormError::Api(format!(
            "Missing required fields: {}",
            names.join(", ")
        )));
    }

    let result = ctx.app.submit()?;
    print_messages(&result.messages);
    Ok(())
}

fn submit_updates(args: SubmitArgs) -> Result<Vec<FieldUpdate>> {
    let mut updates = Vec::new();

    if let Some(prefix) = args.prefix {
        updates.push(FieldUpdate::Prefix(Prefix::from(prefix).as_str().into()));
    }
    if let Some(first_name) = args.first_name {
        updates.push(FieldUpdate::FirstName(first_name));
    }
    if let Some(last_name) = args.last_name {
        updates.push(FieldUpdate::LastName(last_name));
    }
    if let Some(raw) = args.birth_date {
        updates.push(FieldUpdate::BirthDate(normalize_birth_date(&raw)?));
    }
    if let Some(nationality) = args.nationality {
        updates.push(FieldUpdate::Nationality(
            Nationality::from(nationality).as_str().into(),
        ));
    }
    if let Some(id_card) = args.id_card {
        updates.push(FieldUpdate::IdCard(id_card));
    }
    if !args.gender.is_empty() {
        let tags = args
            .gender
            .into_iter()
            .map(|g| GenderTag::from(g).as_str().to_string())
            .collect();
        updates.push(FieldUpdate::Gender(tags));
    }
    if let Some(country) = args.phone_country {
        updates.push(FieldUpdate::PhoneCountry(
            PhoneCountry::from(country).as_str().into(),
        ));
    }
    if let Some(phone_number) = args.phone_number {
        updates.push(FieldUpdate::PhoneNumber(phone_number));
    }
    if let Some(passport) = args.passport {
        updates.push(FieldUpdate::Passport(passport));
    }

    if !args.expected_salary.is_finite() || args.expected_salary < 0.0 {
        return Err(FormError::Api(format!(
            "{} must be a non-negative number",
            FormField::ExpectedSalary
        )));
    }
    updates.push(FieldUpdate::ExpectedSalary(args.expected_salary));

    Ok(updates)
}

fn normalize_birth_date(raw: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).map_err(|_| {
        FormError::Api(format!("Invalid birth date {:?}, expected DD/MM/YYYY", raw))
    })?;
    Ok(date.format(BIRTH_DATE_FORMAT).to_string())
}

fn handle_list(
    ctx: &mut AppContext,
    sort: Option<SortArg>,
    desc: bool,
    page: usize,
) -> Result<()> {
    if let Some(column) = sort {
        let direction = if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        ctx.app.sort_by(column.into(), direction);
    }

    let result = ctx.app.list(page)?;
    print_records(&result.listed_records, result.page);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, key: &str) -> Result<()> {
    let result = ctx.app.delete_one(key)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete_selected(ctx: &mut AppContext, keys: &[String]) -> Result<()> {
    ctx.app.select(keys)?;
    let result = ctx.app.delete_selected()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.app.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = configure(&ctx.data_dir, action)?;
    if show_all && let Some(config) = &result.config {
        println!("storage-key = {}", config.storage_key);
        println!("delete-scope = {}", config.delete_scope);
        println!(
            "{}",
            format!("data-dir = {}", ctx.app.mirror().backend().root().display()).dimmed()
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

const HEADERS: [&str; 7] = [
    "Key",
    "First name",
    "Last name",
    "Gender",
    "Nationality",
    "Phone",
    "Salary",
];
const COLUMN_GAP: &str = "  ";

fn record_cells(record: &Record) -> [String; 7] {
    let key: String = record.key.as_str().chars().take(KEY_DISPLAY_LEN).collect();
    let phone = match PhoneCountry::from_code(&record.phone_country) {
        Some(country) if !record.phone_number.is_empty() => {
            format!("{} {}", country.dial_code(), record.phone_number)
        }
        _ => record.phone_number.clone(),
    };

    [
        key,
        record.first_name.clone(),
        record.last_name.clone(),
        record.gender.clone(),
        record.nationality.clone(),
        phone,
        record.expected_salary.to_string(),
    ]
}

fn print_records(records: &[Record], page: Option<PageInfo>) {
    if records.is_empty() {
        println!("No records found.");
    } else {
        let rows: Vec<[String; 7]> = records.iter().map(record_cells).collect();

        let mut widths = HEADERS.map(|h| h.width());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let header: Vec<String> = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| pad_to_width(h, w))
            .collect();
        println!("{}", header.join(COLUMN_GAP).bold());

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let padded = pad_to_width(cell, w);
                    if i == 0 {
                        padded.yellow().to_string()
                    } else {
                        padded
                    }
                })
                .collect();
            println!("{}", cells.join(COLUMN_GAP).trim_end());
        }
    }

    if let Some(page) = page {
        println!(
            "{}",
            format!(
                "Page {} of {} ({} records)",
                page.number, page.total_pages, page.total_rows
            )
            .dimmed()
        );
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

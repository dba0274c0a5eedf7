// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod render;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use dealerdesk_app::{
    AppCommand, AppState, ScreenKind, catalog_schema, dealer_product_schema, order_schema,
    product_schema,
};
use dealerdesk_table::{FilterChoice, Record, SearchDebouncer, TableCommand, TableSchema, TableView};
use dealerdesk_testkit::DealerFaker;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, info};

const DEMO_SEED: u64 = 7;
const DEMO_ROWS: usize = 60;
const DEBOUNCE_GRACE: Duration = Duration::from_secs(2);

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `dealerdesk --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    logging::init(config.log_filter())?;

    let mut out = std::io::stdout().lock();
    match options.screen {
        ScreenKind::Products => run_screen(
            product_schema()?,
            &options,
            &config,
            |faker| faker.products(DEMO_ROWS),
            &mut out,
        ),
        ScreenKind::Orders => run_screen(
            order_schema()?,
            &options,
            &config,
            |faker| faker.orders(DEMO_ROWS),
            &mut out,
        ),
        ScreenKind::Catalogs => run_screen(
            catalog_schema()?,
            &options,
            &config,
            |faker| faker.catalogs(DEMO_ROWS),
            &mut out,
        ),
        ScreenKind::DealerProducts => run_screen(
            dealer_product_schema()?,
            &options,
            &config,
            |faker| faker.dealer_products(DEMO_ROWS),
            &mut out,
        ),
    }
}

fn run_screen<R, F>(
    schema: TableSchema<R>,
    options: &CliOptions,
    config: &Config,
    demo: F,
    out: &mut impl Write,
) -> Result<()>
where
    R: Record + DeserializeOwned,
    F: FnOnce(&mut DealerFaker) -> Vec<R>,
{
    let records = match (&options.records_path, options.demo) {
        (Some(path), _) => load_records(path)?,
        (None, true) => demo(&mut DealerFaker::new(DEMO_SEED)),
        (None, false) => bail!("no records to show -- pass --records <file.json> or --demo"),
    };
    info!(table = schema.name(), rows = records.len(), "records loaded");

    let mut view = TableView::new(schema, config.page_size())?;
    view.replace_records(records);
    if options.check_only {
        return Ok(());
    }

    let mut state = AppState::default();
    state.dispatch(AppCommand::SelectScreen(options.screen));

    let mut events = Vec::new();
    if let Some(tab) = &options.tab {
        events.extend(view.dispatch(TableCommand::SetTab(FilterChoice::parse(tab)))?);
    }
    for (key, value) in &options.filters {
        events.extend(view.dispatch(TableCommand::SetFilter {
            key: key.clone(),
            choice: FilterChoice::parse(value),
        })?);
    }
    if let Some(query) = &options.search {
        let committed = debounce_search(query, config.search_debounce()?)?;
        events.extend(view.dispatch(TableCommand::CommitSearch(committed))?);
    }
    for field in &options.sorts {
        events.extend(view.dispatch(TableCommand::ToggleSort(field.clone()))?);
    }
    if let Some(page) = options.page {
        events.extend(view.dispatch(TableCommand::GoToPage(page))?);
    }
    for event in &events {
        debug!(event = %event.message(), "table event");
    }
    state.dispatch(AppCommand::ReportTable(events));

    let schema = view.schema().clone();
    let projection = view.project()?;
    if options.json {
        render::write_json(out, &schema, &projection)
    } else {
        render::write_text(out, &schema, &projection, state.status_line.as_deref())
    }
}

/// Runs the query through the same debouncer an interactive screen uses and
/// returns whatever it commits.
fn debounce_search(query: &str, delay: Duration) -> Result<String> {
    let (tx, rx) = mpsc::channel();
    let mut debouncer = SearchDebouncer::new(delay, tx);
    debouncer.schedule(query);
    let commit = rx
        .recv_timeout(delay + DEBOUNCE_GRACE)
        .context("search debounce timer never fired")?;
    debouncer
        .accept(commit)
        .ok_or_else(|| anyhow!("search commit was superseded"))
}

fn load_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "decode records {}; expected a JSON array of records for this screen",
            path.display()
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    records_path: Option<PathBuf>,
    screen: ScreenKind,
    tab: Option<String>,
    filters: Vec<(String, String)>,
    search: Option<String>,
    sorts: Vec<String>,
    page: Option<usize>,
    json: bool,
    demo: bool,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        records_path: None,
        screen: ScreenKind::Products,
        tab: None,
        filters: Vec::new(),
        search: None,
        sorts: Vec::new(),
        page: None,
        json: false,
        demo: false,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter().map(|arg| arg.as_ref().to_owned());
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str, what: &str| -> Result<String> {
            iter.next().ok_or_else(|| anyhow!("{flag} requires {what}"))
        };
        match arg.as_str() {
            "--config" => {
                options.config_path = PathBuf::from(value_for("--config", "a file path")?);
            }
            "--records" => {
                options.records_path = Some(PathBuf::from(value_for("--records", "a file path")?));
            }
            "--screen" => {
                let raw = value_for("--screen", "a screen name")?;
                options.screen = ScreenKind::parse(&raw).ok_or_else(|| {
                    anyhow!(
                        "unknown screen {raw:?}; use one of: {}",
                        ScreenKind::ALL.map(ScreenKind::as_str).join(", ")
                    )
                })?;
            }
            "--tab" => {
                options.tab = Some(value_for("--tab", "a tab value")?);
            }
            "--filter" => {
                let raw = value_for("--filter", "key=value")?;
                let (key, value) = raw
                    .split_once('=')
                    .filter(|(key, _)| !key.trim().is_empty())
                    .ok_or_else(|| anyhow!("--filter expects key=value, got {raw:?}"))?;
                options
                    .filters
                    .push((key.trim().to_owned(), value.trim().to_owned()));
            }
            "--search" => {
                options.search = Some(value_for("--search", "a query")?);
            }
            "--sort" => {
                options.sorts.push(value_for("--sort", "a field name")?);
            }
            "--page" => {
                let raw = value_for("--page", "a page number")?;
                let page: usize = raw
                    .parse()
                    .ok()
                    .filter(|page| *page >= 1)
                    .ok_or_else(|| anyhow!("--page expects a number >= 1, got {raw:?}"))?;
                options.page = Some(page);
            }
            "--json" => {
                options.json = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("dealerdesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --records <file.json>    Load records from a JSON dump");
    println!("  --demo                   Use generated demo records");
    println!("  --screen <name>          products, orders, catalogs or dealer-products");
    println!("  --tab <label>            Restrict to one tab, matched against the shown label");
    println!("                           (for example Active or Published); not on dealer-products");
    println!("  --filter <key=value>     Exact-match filter on a declared key; repeatable");
    println!("  --search <query>         Free-text search");
    println!("  --sort <field>           Toggle sort on a field; repeatable");
    println!("  --page <n>               Page to show");
    println!("  --json                   Print the page as JSON");
    println!("  --check                  Validate config and records, then exit");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --help                   Show this help");
}

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use workflow_dashboard::commands;
use workflow_dashboard::models::{
    ApiCredentials, SortIndicator, TableProjection, TableRow, WorkflowCard, WorkflowDetails,
};
use workflow_dashboard::utils::config;
use workflow_dashboard::utils::format::{format_date, workflow_count_label};
use workflow_dashboard::{AppState, WorkflowCatalog};

#[derive(Parser)]
#[command(name = "workflow-dashboard", version, about = "Browse workflow fixtures from the terminal")]
struct Cli {
    /// Fixture document to load instead of the built-in demo data
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Settings file (defaults to $DASHBOARD_SETTINGS or config/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Folder-grouped workflow table
    Table {
        #[arg(long)]
        folder: Option<String>,
        /// Column to toggle; repeat to cycle asc -> desc -> none
        #[arg(long = "sort")]
        sort: Vec<String>,
        /// Group key to toggle open
        #[arg(long = "expand")]
        expand: Vec<String>,
        #[arg(long)]
        expand_all: bool,
    },
    /// Card grid
    Cards {
        #[arg(long)]
        folder: Option<String>,
    },
    /// Folder sidebar
    Folders {
        #[arg(long)]
        folder: Option<String>,
    },
    /// Details view for one workflow
    Details { id: String },
    /// Simulated credentials check
    TestConnection {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match dotenv {
        Ok(Some(path)) => log::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(err) => log::warn!("Ignoring unreadable .env: {}", err),
    }

    let cli = Cli::parse();

    let settings_path = cli.settings.clone().unwrap_or_else(config::settings_path);
    let settings = config::load_settings(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    let catalog = match cli.fixture.clone().or_else(config::fixture_path) {
        Some(path) => WorkflowCatalog::from_path(&path)?,
        None => WorkflowCatalog::mock()?,
    };
    let state = AppState::new(catalog, settings);

    match cli.command {
        Command::Table {
            folder,
            sort,
            expand,
            expand_all,
        } => {
            commands::dashboard::select_folder(&state, folder).map_err(|e| anyhow!(e))?;
            for column in &sort {
                commands::workflow::toggle_sort(&state, column).map_err(|e| anyhow!(e))?;
            }
            for key in &expand {
                commands::workflow::toggle_folder(&state, key).map_err(|e| anyhow!(e))?;
            }
            if expand_all {
                expand_collapsed_groups(&state)?;
            }
            let title = commands::dashboard::get_panel_title(&state).map_err(|e| anyhow!(e))?;
            let table = commands::workflow::get_workflow_table(&state).map_err(|e| anyhow!(e))?;
            if cli.json {
                print_json(&table)?;
            } else {
                println!("{}\n", title);
                print_table(&table, &state);
            }
        }
        Command::Cards { folder } => {
            commands::dashboard::select_folder(&state, folder).map_err(|e| anyhow!(e))?;
            let cards = commands::workflow::get_workflow_cards(&state).map_err(|e| anyhow!(e))?;
            if cli.json {
                print_json(&cards)?;
            } else {
                print_cards(&cards);
            }
        }
        Command::Folders { folder } => {
            commands::dashboard::select_folder(&state, folder).map_err(|e| anyhow!(e))?;
            let entries = commands::dashboard::get_folders(&state).map_err(|e| anyhow!(e))?;
            if cli.json {
                print_json(&entries)?;
            } else {
                for entry in &entries {
                    let marker = if entry.selected { ">" } else { " " };
                    println!("{} {} ({})", marker, entry.name, entry.workflow_count);
                }
            }
        }
        Command::Details { id } => {
            let details = commands::workflow::open_workflow(&state, &id).map_err(|e| anyhow!(e))?;
            if cli.json {
                print_json(&details)?;
            } else {
                print_details(&details);
            }
        }
        Command::TestConnection { url, key } => {
            let saved = commands::settings::get_credentials(&state).map_err(|e| anyhow!(e))?;
            let credentials = ApiCredentials::new(
                url.or_else(|| saved.as_ref().map(|c| c.api_url.clone()))
                    .unwrap_or_default(),
                key.or_else(|| saved.as_ref().map(|c| c.api_key.clone()))
                    .unwrap_or_default(),
            );
            let result = commands::settings::test_connection(&state, credentials)
                .await
                .map_err(|e| anyhow!(e))?;
            if cli.json {
                print_json(&result)?;
            } else {
                println!("Connection to {} succeeded ({} ms)", result.api_url, result.elapsed_ms);
            }
        }
    }

    Ok(())
}

fn expand_collapsed_groups(state: &AppState) -> anyhow::Result<()> {
    let collapsed: Vec<String> = commands::workflow::get_workflow_table(state)
        .map_err(|e| anyhow!(e))?
        .rows
        .iter()
        .filter_map(|row| match row {
            TableRow::GroupHeader {
                group_key,
                expanded: false,
                ..
            } => Some(group_key.to_string()),
            _ => None,
        })
        .collect();
    for key in &collapsed {
        commands::workflow::toggle_folder(state, key).map_err(|e| anyhow!(e))?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table(table: &TableProjection<'_>, state: &AppState) {
    if table.is_empty() {
        println!("No workflows found");
        return;
    }

    let header: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let arrow = match column.indicator {
                SortIndicator::Unsorted => "↕",
                SortIndicator::Ascending => "↑",
                SortIndicator::Descending => "↓",
            };
            format!("{} {}", column.label, arrow)
        })
        .collect();
    println!("  {}", header.join(" | "));

    for row in &table.rows {
        match row {
            TableRow::GroupHeader {
                display_name,
                member_count,
                expanded,
                ..
            } => {
                let chevron = if *expanded { "▾" } else { "▸" };
                println!("{} {} {}", chevron, display_name, workflow_count_label(*member_count));
            }
            TableRow::WorkflowRow {
                workflow,
                resolved_folder_display_name,
            } => {
                println!(
                    "    {:<28} {:<9} {:<14} {:<17} {:>6} {:>6}%",
                    workflow.name,
                    workflow.status,
                    resolved_folder_display_name,
                    format_date(&workflow.last_run, &state.settings.table.date_format),
                    workflow.execution_count,
                    workflow.error_rate
                );
            }
        }
    }
}

fn print_cards(cards: &[WorkflowCard]) {
    if cards.is_empty() {
        println!("No workflows found");
        return;
    }
    for card in cards {
        println!("{} [{}]", card.name, card.status);
        if let Some(folder) = &card.folder_name {
            println!("  Folder: {}", folder);
        }
        println!("  {}", card.description);
        println!("  Last run: {}  ·  {}", card.last_run, card.runs);
        println!();
    }
}

fn print_details(details: &WorkflowDetails) {
    println!("{} ({})", details.name, details.status_label);
    println!("  Last run: {} ({})", details.last_run.relative, details.last_run.formatted);
    if let Some(next) = &details.next_run {
        println!("  Next run: {} ({})", next.relative, next.formatted);
    }
    println!("  Total executions: {}", details.performance.total_executions);
    if let Some(avg) = details.performance.average_execution_secs {
        println!("  Average execution time: {}s", avg);
    }
    let warn = if details.performance.error_rate_high { " !" } else { "" };
    println!("  Error rate: {}%{}", details.performance.error_rate, warn);
    if let Some(description) = &details.description {
        println!("  {}", description);
    }
    if !details.tags.is_empty() {
        println!("  Tags: {}", details.tags.join(", "));
    }
    if !details.history.points.is_empty() {
        println!("  History:");
        for point in &details.history.points {
            println!("    {}  ok {:>3}  failed {:>3}", point.date, point.successful, point.failed);
        }
        if let Some(rate) = details.history.success_rate {
            println!("  Success rate: {:.1}%", rate);
        }
    }
}

// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use inquire::{Select, Text};

use loadapp::download::{
    BeginOutcome, CompletionDisposition, DownloadCoordinator, HttpTransferClient, OutcomeStatus,
    Resource, Selection,
};
use loadapp::{AppConfig, TerminalFrontend};

/// Exit code after Ctrl+C, as shells report SIGINT
const INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "loadapp")]
#[command(version, about = "Download a file and get notified when it is done")]
#[command(group(ArgGroup::new("selection").args(["glide", "load_app", "retrofit", "url"])))]
struct Cli {
    /// Download Glide (image loading library by BumpTech)
    #[arg(long)]
    glide: bool,

    /// Download the LoadApp starter repository
    #[arg(long)]
    load_app: bool,

    /// Download Retrofit (HTTP client by Square)
    #[arg(long)]
    retrofit: bool,

    /// Download a custom URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Directory to save into (overrides config)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Open the details view once the notification is posted
    #[arg(long)]
    details: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn selection(&self) -> Option<Selection> {
        if self.glide {
            Some(Selection::Preset(Resource::Glide))
        } else if self.load_app {
            Some(Selection::Preset(Resource::LoadApp))
        } else if self.retrofit {
            Some(Selection::Preset(Resource::Retrofit))
        } else {
            self.url.clone().map(Selection::Custom)
        }
    }
}

/// Entries of the interactive picker.
enum Choice {
    Preset(Resource),
    Custom,
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Preset(resource) => write!(f, "{}", resource),
            Choice::Custom => write!(f, "Custom URL"),
        }
    }
}

/// Ask which file to download. Escaping the prompt selects nothing.
fn prompt_selection() -> Selection {
    let mut choices: Vec<Choice> = Resource::ALL.into_iter().map(Choice::Preset).collect();
    choices.push(Choice::Custom);

    match Select::new("Select the file to download", choices).prompt() {
        Ok(Choice::Preset(resource)) => Selection::Preset(resource),
        Ok(Choice::Custom) => match Text::new("URL:").prompt() {
            Ok(url) => Selection::Custom(url),
            Err(_) => Selection::Custom(String::new()),
        },
        Err(_) => Selection::None,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// One click, one download, one notification.
async fn run(selection: Selection, config: &AppConfig, show_details: bool) -> ExitCode {
    let client = HttpTransferClient::new(config.resolved_download_dir());
    let mut coordinator = DownloadCoordinator::new(client, TerminalFrontend::new(), config);

    match coordinator.begin_transfer(&selection, Instant::now()) {
        Ok(BeginOutcome::Submitted(id)) => tracing::debug!(%id, "waiting for completion"),
        Ok(BeginOutcome::Busy) | Err(_) => {
            // The toast already told the user what went wrong
            let (_client, mut frontend) = coordinator.shutdown(Instant::now());
            frontend.close_line();
            return ExitCode::FAILURE;
        }
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let code = loop {
        let deadline = coordinator.next_animation_deadline();
        tokio::select! {
            event = coordinator.next_completion() => match event {
                Some(event) => {
                    if let CompletionDisposition::Delivered(outcome) =
                        coordinator.handle_completion(event, Instant::now())
                    {
                        let details = coordinator
                            .frontend()
                            .last_notification()
                            .map(|n| n.action.invoke());
                        if let (true, Some(details)) = (show_details, details) {
                            coordinator.frontend_mut().show_details(&details);
                        }
                        break if outcome.status == OutcomeStatus::Success {
                            ExitCode::SUCCESS
                        } else {
                            ExitCode::FAILURE
                        };
                    }
                }
                None => {
                    tracing::warn!("completion channel closed before the download finished");
                    break ExitCode::FAILURE;
                }
            },
            _ = wait_until(deadline) => {
                coordinator.on_tick(Instant::now());
            }
            _ = &mut ctrl_c => {
                coordinator.frontend_mut().close_line();
                eprintln!("{} Interrupted", "[!]".yellow());
                break ExitCode::from(INTERRUPTED);
            }
        }
    };

    let (_client, mut frontend) = coordinator.shutdown(Instant::now());
    frontend.close_line();
    code
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {} (using defaults)", "[!]".yellow(), e);
            AppConfig::default()
        }
    };
    if let Some(dir) = &cli.dir {
        config.download_dir = Some(dir.clone());
    }

    let selection = match cli.selection() {
        Some(selection) => selection,
        None if io::stdin().is_terminal() => prompt_selection(),
        None => Selection::None,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    Ok(runtime.block_on(run(selection, &config, cli.details)))
}

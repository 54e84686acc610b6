mod api;
mod app;
mod config;
mod errors;
mod lifecycle;
mod models;
mod routes;
mod session;
mod shell;
mod state;
mod views;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::HttpBackend;
use crate::app::App;
use crate::config::Config;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "screener", version, about = "Resume screening client")]
struct Cli {
    /// Backend origin; overrides API_BASE_URL.
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session on stdin (default).
    Shell,
    /// Ping the backend.
    Health,
    /// Log in and screen one resume against a job description.
    Screen {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "SCREENER_PASSWORD", hide_env_values = true)]
        password: String,
        /// PDF or DOCX file.
        #[arg(long, short)]
        resume: PathBuf,
        #[arg(long, short = 'j', conflicts_with = "job_description_file")]
        job_description: Option<String>,
        #[arg(long, short = 'f')]
        job_description_file: Option<PathBuf>,
    },
    /// Log in and search screened resumes by keyword.
    Search {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "SCREENER_PASSWORD", hide_env_values = true)]
        password: String,
        keyword: String,
    },
    /// Log in and list past screenings.
    History {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "SCREENER_PASSWORD", hide_env_values = true)]
        password: String,
        /// 1-based page of 10 entries.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_base_url {
        config = config.with_api_base_url(url)?;
    }

    // Logs go to stderr so stdout carries only rendered pages.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting screener v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );

    let backend = Arc::new(HttpBackend::from_config(&config));
    let state = AppState::new(backend);
    let mut app = App::new(state);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            shell::run(&mut app, stdin, &mut stdout).await?;
            sign_out(&mut app).await;
        }
        Commands::Health => {
            let health = app
                .health()
                .await
                .with_context(|| format!("Backend at {} is unreachable", config.api_base_url))?;
            println!("{} {} is {}", health.service, health.version, health.status);
        }
        Commands::Screen {
            username,
            password,
            resume,
            job_description,
            job_description_file,
        } => {
            let job_description = match (job_description, job_description_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("Provide --job-description or --job-description-file"),
            };
            let page =
                shell::screen_once(&mut app, &username, &password, &resume, &job_description).await;
            sign_out(&mut app).await;
            print!("{}", page?);
        }
        Commands::Search {
            username,
            password,
            keyword,
        } => {
            let page = shell::search_once(&mut app, &username, &password, &keyword).await;
            sign_out(&mut app).await;
            print!("{}", page?);
        }
        Commands::History {
            username,
            password,
            page,
        } => {
            let page = shell::history_once(&mut app, &username, &password, page).await;
            sign_out(&mut app).await;
            print!("{}", page?);
        }
    }

    Ok(())
}

/// Ends the server session on exit, if one was opened.
async fn sign_out(app: &mut App) {
    if app.current_user().is_some() {
        app.logout().await;
    }
}

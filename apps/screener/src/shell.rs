//! Line-oriented driver for `App`: one command per line, the rendered page after
//! every command that changes it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::app::App;
use crate::lifecycle::Submission;
use crate::views::Tab;

pub const HELP: &str = "\
Commands:
  goto <path>                          open a route (/, /login, /register, /screener)
  tab <name>                           home | about | services | contact | screen | search | history | landing
  login <username> <password>          sign in
  register <username> <email> <pw>    create an account and sign in
  logout                               sign out
  whoami                               show the signed-in user
  resume <path>                        select a PDF or DOCX resume
  jd <text>                            set the job description
  jdfile <path>                        load the job description from a file
  screen                               submit the screening form
  search <keyword>                     search screened resumes
  history [page]                       list past screenings, 10 per page
  health                               check the backend
  show                                 print the current page
  help                                 this text
  quit                                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Goto(String),
    Tab(Tab),
    Login { username: String, password: String },
    Register { username: String, email: String, password: String },
    Logout,
    WhoAmI,
    Resume(PathBuf),
    JobDescription(String),
    JobDescriptionFile(PathBuf),
    Screen,
    Search(String),
    History(u32),
    Health,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. `Ok(None)` for blank lines.
    ///
    /// Free text (`jd`, `search`) is everything after the first space, kept as typed.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (name, text) = match line.split_once(' ') {
            Some((name, text)) => (name, text),
            None => (line.trim_end(), ""),
        };
        let rest = text.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("goto" | "open", [path]) => Command::Goto(path.to_string()),
            ("tab", [tab]) => {
                Command::Tab(Tab::parse(tab).ok_or_else(|| format!("Unknown tab '{tab}'"))?)
            }
            ("login", [username, password]) => Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            ("register", [username, email, password]) => Command::Register {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("whoami", []) => Command::WhoAmI,
            ("resume", _) if !rest.is_empty() => Command::Resume(PathBuf::from(rest)),
            // Free text: keep the line as typed, including an empty description.
            ("jd", _) => Command::JobDescription(text.to_string()),
            ("jdfile", _) if !rest.is_empty() => Command::JobDescriptionFile(PathBuf::from(rest)),
            ("screen", []) => Command::Screen,
            ("search", _) => Command::Search(text.to_string()),
            ("history", []) => Command::History(1),
            ("history", [page]) => Command::History(
                page.parse::<u32>()
                    .ok()
                    .filter(|&page| page > 0)
                    .ok_or_else(|| format!("Page must be a positive number, got '{page}'"))?,
            ),
            ("health", []) => Command::Health,
            ("show", []) => Command::Show,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => {
                return Err(format!(
                    "Cannot parse '{}'. Type 'help' for commands.",
                    line.trim_end()
                ))
            }
        };
        Ok(Some(command))
    }
}

/// Reads commands until `quit` or end of input.
pub async fn run<R, W>(app: &mut App, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write_out(output, &app.render()).await?;
    write_out(output, "Type 'help' for commands.\n").await?;

    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                write_out(output, &format!("{message}\n")).await?;
                continue;
            }
        };
        debug!("Shell command: {:?}", redact(&command));
        if command == Command::Quit {
            break;
        }
        let reply = execute(app, command).await;
        write_out(output, &reply).await?;
    }
    Ok(())
}

/// Applies one command and returns the text to show.
pub async fn execute(app: &mut App, command: Command) -> String {
    match command {
        Command::Goto(path) => {
            app.navigate(&path);
            app.render()
        }
        Command::Tab(tab) => {
            app.select_tab(tab);
            app.render()
        }
        Command::Login { username, password } => {
            // Failures are rendered inline on the form.
            let _ = app.login(&username, &password).await;
            app.render()
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let _ = app.register(&username, &email, &password).await;
            app.render()
        }
        Command::Logout => {
            app.logout().await;
            app.render()
        }
        Command::WhoAmI => match app.current_user() {
            Some(user) => format!("{}\n", user.username),
            None => "Not signed in\n".to_string(),
        },
        Command::Resume(path) => match app.select_resume(&path).await {
            Ok(()) => app.render(),
            Err(e) => format!("{e}\n"),
        },
        Command::JobDescription(text) => {
            app.set_job_description(&text);
            app.render()
        }
        Command::JobDescriptionFile(path) => match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                app.set_job_description(&text);
                app.render()
            }
            Err(e) => format!("Could not read {}: {e}\n", path.display()),
        },
        Command::Screen => {
            app.submit_screening().await;
            app.render()
        }
        Command::Search(keyword) => {
            app.submit_search(&keyword).await;
            app.render()
        }
        Command::History(page) => {
            app.select_tab(Tab::History);
            app.load_history(page).await;
            app.render()
        }
        Command::Health => match app.health().await {
            Ok(health) => format!(
                "{} {} is {}\n",
                health.service, health.version, health.status
            ),
            Err(e) => format!("Backend unreachable: {e}\n"),
        },
        Command::Show => app.render(),
        Command::Help => format!("{HELP}\n"),
        Command::Quit => String::new(),
    }
}

/// Non-interactive screening: log in, screen one resume, print the result page.
pub async fn screen_once(
    app: &mut App,
    username: &str,
    password: &str,
    resume: &std::path::Path,
    job_description: &str,
) -> Result<String> {
    app.select_tab(Tab::Screen);
    app.login(username, password)
        .await
        .context("Login failed")?;
    app.select_resume(resume).await?;
    app.set_job_description(job_description);
    let submission = app.submit_screening().await;
    finish_once(app, submission, "screening")
}

/// Non-interactive search: log in, run one keyword search, print the result page.
pub async fn search_once(
    app: &mut App,
    username: &str,
    password: &str,
    keyword: &str,
) -> Result<String> {
    app.select_tab(Tab::Search);
    app.login(username, password)
        .await
        .context("Login failed")?;
    let submission = app.submit_search(keyword).await;
    finish_once(app, submission, "search")
}

/// Non-interactive history: log in, fetch one page of past screenings.
pub async fn history_once(
    app: &mut App,
    username: &str,
    password: &str,
    page: u32,
) -> Result<String> {
    app.select_tab(Tab::History);
    app.login(username, password)
        .await
        .context("Login failed")?;
    let submission = app.load_history(page).await;
    finish_once(app, submission, "history")
}

fn finish_once(app: &App, submission: Submission, what: &str) -> Result<String> {
    match submission {
        Submission::Succeeded => Ok(app.render()),
        Submission::Skipped => anyhow::bail!("Nothing to submit for {what}: required input is empty"),
        Submission::Unauthorized => anyhow::bail!("The backend rejected the session during {what}"),
        Submission::Failed => anyhow::bail!("{}", app.render()),
    }
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output
        .write_all(text.as_bytes())
        .await
        .context("Failed to write output")?;
    output.flush().await.context("Failed to flush output")?;
    Ok(())
}

fn redact(command: &Command) -> Command {
    match command {
        Command::Login { username, .. } => Command::Login {
            username: username.clone(),
            password: "<redacted>".to_string(),
        },
        Command::Register {
            username, email, ..
        } => Command::Register {
            username: username.clone(),
            email: email.clone(),
            password: "<redacted>".to_string(),
        },
        other => other.clone(),
    }
}

mod cli;
mod config;
mod domain;
mod logger;
mod presenter;
mod render;
mod risk;
mod scanner;
mod state;

use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::render::TextRenderer;
use crate::scanner::{ScanClient, VerdictSource};
use crate::state::{ScanSession, ViewState};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load local .env if present
    let _ = dotenvy::dotenv();

    let args = cli::Args::parse();
    let mut cfg = config::Config::from_env()?;
    if let Some(endpoint) = args.endpoint.as_deref() {
        cfg.endpoint = endpoint.trim().to_string();
        cfg.validate()?;
    }
    if args.no_color || !std::io::stdout().is_terminal() {
        cfg.color = false;
    }

    logger::init_tracing(cfg.log_json);
    info!(?cfg, "boot");

    let client = ScanClient::new(cfg.endpoint.clone(), Duration::from_millis(cfg.timeout_ms))?;
    let mut session = ScanSession::new(client);
    let renderer = TextRenderer::new(cfg.color);

    match args.url {
        Some(url) => {
            session.submit(&url, |state| show_progress(state, &renderer)).await?;
            emit(session.state(), &renderer, args.json)?;
            Ok(exit_code(session.state()))
        }
        None => {
            interactive(&mut session, &renderer, args.json).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prompts for one URL at a time until EOF or `quit`.
async fn interactive<S: VerdictSource>(
    session: &mut ScanSession<S>,
    renderer: &TextRenderer,
    json: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("url> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        session.submit(&line, |state| show_progress(state, renderer)).await?;
        emit(session.state(), renderer, json)?;
        session.reset();
    }
    Ok(())
}

/// Progress goes to stderr so stdout carries only the report.
fn show_progress(state: &ViewState, renderer: &TextRenderer) {
    eprint!("{}", renderer.render(state));
}

fn emit(state: &ViewState, renderer: &TextRenderer, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&render::to_json(state))?);
    } else {
        print!("{}", renderer.render(state));
    }
    Ok(())
}

fn exit_code(state: &ViewState) -> ExitCode {
    match state {
        ViewState::Resolved { verdict, .. } if verdict.is_phishing => ExitCode::from(2),
        ViewState::Resolved { .. } | ViewState::Idle => ExitCode::SUCCESS,
        ViewState::Scanning { .. } | ViewState::Failed(_) => ExitCode::FAILURE,
    }
}

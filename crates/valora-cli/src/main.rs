//! Valora CLI
//!
//! Operator console for valuation leads: run the valuation wizard from flags,
//! inspect and qualify leads, and work through their task checklists.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use valora_core::{params::ListLeads, CrmBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let mut builder = CrmBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let crm = builder.build().await.context("Failed to open the lead store")?;

    info!("Valora started");
    let cli = Cli::new(crm, TerminalRenderer::new(!no_color));

    match command {
        Some(Lead { command }) => cli.handle_lead_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Valuate(args)) => cli.valuate(args).await,
        None => cli.list_leads(&ListLeads::default()).await,
    }
}

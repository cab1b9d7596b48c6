//! Command-line arguments and the sync command.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use nisync_core::{SyncConfig, SyncPipeline, DEFAULT_PAGE_SIZE};
use nisync_inventory::InventoryClient;
use nisync_jira::JiraClient;

use crate::output::{print_report, ConsoleObserver};

/// Sync Jira tickets into the network inventory.
///
/// Reads JIRA_LOCATION, JIRA_USER, JIRA_PASSWORD, NI_LOCATION, NI_USER and
/// NI_PASSWORD from the environment. Deletes every ticket node in the
/// inventory before recreating them, so only one sync may run at a time.
#[derive(Parser)]
#[command(name = "nisync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Issues requested per Jira search page
    #[arg(long, env = "NISYNC_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.load_config(|name| std::env::var(name).ok())?;

        let jira = JiraClient::new(&config.jira);
        let inventory = InventoryClient::new(&config.inventory)
            .context("Failed to set up inventory client")?;

        let mut observer = ConsoleObserver;
        let mut pipeline = SyncPipeline::new(&jira, &inventory, config.page_size);
        let report = pipeline.run(&mut observer).await?;

        print_report(&report);
        Ok(())
    }

    /// Build the run configuration from `lookup` and the command-line overrides.
    fn load_config<F>(&self, lookup: F) -> Result<SyncConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = SyncConfig::from_lookup(lookup)?.with_page_size(self.page_size)?;
        Ok(config)
    }
}

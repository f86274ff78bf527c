//! 命令行参数

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dns_delegation_core::types::MatchPolicy;

use crate::config::{SETTINGS_FILE, SettingsOverrides};

#[derive(Debug, Parser)]
#[command(name = "dns-delegation")]
#[command(version)]
#[command(about = "Set up and audit a Route 53 root zone delegated to per-environment accounts")]
#[command(
    long_about = "Without a subcommand, starts the interactive setup wizard in the working directory."
)]
pub struct Cli {
    /// Working directory holding dns.yaml and the environment files
    #[arg(short = 'C', long, env = "DNS_DELEGATION_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Settings file (defaults to .dns-delegation.yaml in the working directory)
    #[arg(long, env = "DNS_DELEGATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// How many expected nameservers must be observed: any | majority
    #[arg(long)]
    pub match_policy: Option<MatchPolicy>,

    /// Seconds between automatic propagation checks
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Lines kept in the propagation debug log
    #[arg(long)]
    pub debug_log_cap: Option<usize>,

    /// DNS-over-HTTPS JSON endpoint
    #[arg(long)]
    pub doh_endpoint: Option<String>,

    /// Environment that owns the root zone
    #[arg(long)]
    pub root_environment: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the root zone, its live nameservers and the delegated zones
    Status,

    /// Check root and delegated zone propagation and record promotions
    Validate,

    /// Publish a subdomain's nameservers in the root zone
    Delegate {
        /// Fully-qualified subdomain, e.g. dev.example.com
        subdomain: String,

        /// Account that owns the subdomain zone
        #[arg(long)]
        account_id: String,

        /// Hosted zone ID of the subdomain
        #[arg(long)]
        zone_id: String,

        /// Nameservers of the subdomain zone (repeat for each)
        #[arg(long = "nameserver", required = true)]
        nameservers: Vec<String>,
    },

    /// Remove a delegated subdomain and its hosted zone
    Remove {
        /// Fully-qualified subdomain, e.g. dev.example.com
        subdomain: String,
    },
}

impl Cli {
    /// Settings file to read.
    pub fn settings_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.dir.join(SETTINGS_FILE))
    }

    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            match_policy: self.match_policy,
            poll_interval_secs: self.poll_interval,
            debug_log_cap: self.debug_log_cap,
            doh_endpoint: self.doh_endpoint.clone(),
            root_environment: self.root_environment.clone(),
        }
    }
}

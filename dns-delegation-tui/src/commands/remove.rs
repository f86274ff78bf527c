//! `remove` 子命令

use anyhow::Result;
use colored::Colorize;

use crate::backend::CoreServices;

pub async fn run(services: &CoreServices, subdomain: &str) -> Result<()> {
    let outcome = services.delegations().remove_subdomain(subdomain).await?;

    if outcome.ns_records_removed {
        println!("{} NS records removed from the root zone", "✓".bright_green());
    }
    if outcome.zone_deleted {
        println!("{} hosted zone deleted", "✓".bright_green());
    }
    for error in &outcome.errors {
        println!("{} {error}", "!".yellow());
    }
    println!(
        "{}",
        format!("{} removed from the configuration.", outcome.subdomain).bright_green()
    );
    Ok(())
}

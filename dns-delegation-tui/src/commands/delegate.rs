//! `delegate` 子命令

use anyhow::{Result, bail};
use colored::Colorize;

use super::NO_CONFIGURATION;
use crate::backend::CoreServices;

pub async fn run(
    services: &CoreServices,
    subdomain: &str,
    account_id: &str,
    zone_id: &str,
    nameservers: &[String],
) -> Result<()> {
    let Some(config) = services.configuration().load_existing().await? else {
        bail!(NO_CONFIGURATION);
    };
    let root_profile = services
        .zones()
        .resolve_root_profile(None, &config.root_account.account_id)
        .await?;

    let zone = services
        .delegations()
        .delegate_subdomain(&root_profile, subdomain, account_id, zone_id, nameservers)
        .await?;

    println!("{}", "Delegation published.".bright_green());
    println!("  {} {}", "Subdomain:".bold(), zone.subdomain.bright_white());
    println!("  {} {}", "Account:".bold(), zone.account_id);
    println!("  {} {}", "Zone ID:".bold(), zone.zone_id);
    for ns in &zone.ns_records {
        println!("  {}", ns.bright_cyan());
    }
    println!();
    println!(
        "{}",
        "Status is pending_propagation until `dns-delegation validate` sees it live.".dimmed()
    );
    Ok(())
}

//! `status` 子命令

use anyhow::Result;
use colored::Colorize;
use dns_delegation_core::types::{DelegationStatus, NameserverLookupResult};

use super::NO_CONFIGURATION;
use crate::backend::CoreServices;

pub async fn run(services: &CoreServices) -> Result<()> {
    let Some(report) = services.reports().status().await? else {
        println!("{}", NO_CONFIGURATION.yellow());
        return Ok(());
    };
    let config = &report.config;

    println!("{}", "Root zone".bright_cyan().bold());
    println!("  {} {}", "Domain:".bold(), config.root_domain.bright_white());
    println!("  {} {}", "Account:".bold(), config.root_account.account_id);
    println!("  {} {}", "Zone ID:".bold(), config.root_account.zone_id);
    println!(
        "  {} {}",
        "Role:".bold(),
        config.root_account.delegation_role_arn.dimmed()
    );
    println!();
    println!("{}", "Live nameservers".bright_cyan().bold());
    print_lookup(&report.root);
    println!();

    if config.delegated_zones.is_empty() {
        println!("{}", "No delegated zones.".yellow());
        return Ok(());
    }

    println!("{}", "Delegated zones".bright_cyan().bold());
    println!(
        "  {:<32} {:<14} {:<24} {}",
        "SUBDOMAIN".bold(),
        "ACCOUNT".bold(),
        "ZONE ID".bold(),
        "STATUS".bold()
    );
    println!("  {}", "-".repeat(86));
    for (zone, live) in config.delegated_zones.iter().zip(&report.delegated) {
        let status = match zone.status {
            DelegationStatus::Active => zone.status.to_string().bright_green(),
            DelegationStatus::PendingPropagation => zone.status.to_string().yellow(),
        };
        println!(
            "  {:<32} {:<14} {:<24} {}",
            zone.subdomain, zone.account_id, zone.zone_id, status
        );
        if live.nameservers.is_empty() {
            println!("    {}", "no live nameservers".dimmed());
        } else {
            println!("    {}", live.nameservers.join(", ").dimmed());
        }
    }
    Ok(())
}

fn print_lookup(lookup: &NameserverLookupResult) {
    if let Some(error) = &lookup.error {
        println!("  {} {}", "Lookup failed:".red(), error);
    } else if lookup.nameservers.is_empty() {
        println!("  {}", "none".yellow());
    } else {
        for ns in &lookup.nameservers {
            println!("  {}", ns.bright_cyan());
        }
    }
}

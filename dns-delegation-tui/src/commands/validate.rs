//! `validate` 子命令

use anyhow::{Result, bail};
use colored::Colorize;

use super::NO_CONFIGURATION;
use crate::backend::CoreServices;

pub async fn run(services: &CoreServices) -> Result<()> {
    let Some(report) = services.reports().validate().await? else {
        bail!(NO_CONFIGURATION);
    };

    if report.root_propagated {
        println!("{} root nameservers propagated", "✓".bright_green());
    } else {
        println!("{} root nameservers not propagated yet", "✗".yellow());
    }

    for zone in &report.zones {
        let mark = if zone.matches {
            "✓".bright_green()
        } else {
            "✗".red()
        };
        let mut line = format!("{mark} {} ({})", zone.zone.subdomain, zone.zone.status);
        if zone.promoted {
            line.push_str(&format!(" {}", "promoted to active".bright_green()));
        }
        println!("{line}");
    }

    if !report.warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
    if !report.issues.is_empty() {
        println!();
        println!("{}", "Issues:".red().bold());
        for issue in &report.issues {
            println!("  - {issue}");
        }
        bail!("validation found {} issue(s)", report.issues.len());
    }

    if report.is_clean() {
        println!();
        println!("{}", "All DNS checks passed.".bright_green());
    }
    Ok(())
}

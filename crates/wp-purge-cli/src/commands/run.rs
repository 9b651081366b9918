use anyhow::Result;
use chrono::Utc;

use wp_purge_core::{purge_sites, AppConfig};

pub async fn run(config: &AppConfig, site_names: &[String], dry_run: bool) -> Result<()> {
    let sites = config.select_sites(site_names)?;

    if sites.is_empty() {
        println!("No sites configured.");
        println!("\nAdd [[sites]] entries to {}", AppConfig::config_path().display());
        return Ok(());
    }

    let reports = purge_sites(config, &sites, Utc::now(), dry_run).await;

    for report in &reports {
        match &report.outcome {
            Ok(summary) if summary.dry_run => {
                println!(
                    "Site: {} - {} posts would be removed (dry run).",
                    report.site, summary.matched
                );
            }
            Ok(summary) => {
                println!(
                    "Site: {} - Removed a total of {} posts. {} posts having issue removing.",
                    report.site, summary.deleted, summary.errors
                );
            }
            Err(e) => {
                println!("Site: {} - Aborted: {}", report.site, e);
            }
        }
    }

    Ok(())
}

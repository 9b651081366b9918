use anyhow::Result;

use wp_purge_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    if config.sites.is_empty() {
        println!("No sites configured.");
        return Ok(());
    }

    println!("Sites ({}):\n", config.sites.len());

    for site in &config.sites {
        println!("  {} - {}", site.name, site.domain);
        println!("    API: {}", site.api_base()?);
        println!("    User: {}", site.app_username);
        println!();
    }

    Ok(())
}

use anyhow::Result;
use chrono::Utc;

use wp_purge_core::{AppConfig, RetentionPolicy};

pub fn run(config: &AppConfig) -> Result<()> {
    let policy = RetentionPolicy::from(&config.general);
    let window = policy.window_at(Utc::now())?;

    println!(
        "Posts older than {} days, {} day(s) per run:",
        policy.threshold_days, policy.window_days
    );
    println!("  after:  {} UTC", window.after_param());
    println!("  before: {} UTC", window.before_param());

    Ok(())
}

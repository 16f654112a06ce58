use std::sync::Arc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use crate::cli::commands::ScanArgs;
use crate::config::ProspectorConfig;
use crate::db::Database;
use crate::errors::ProspectorError;
use crate::harvester::Harvester;
use crate::places::{GooglePlacesClient, NearbySearch};
use tracing::warn;

pub async fn handle_scan(args: ScanArgs, config: ProspectorConfig) -> Result<(), ProspectorError> {
    let search = NearbySearch {
        latitude: args.lat.unwrap_or(config.dashboard.default_latitude),
        longitude: args.lng.unwrap_or(config.dashboard.default_longitude),
        radius_meters: args.radius.unwrap_or(config.dashboard.default_radius),
        keyword: args.keyword.trim().to_string(),
    };
    if !config.dashboard.categories.contains(&search.keyword) {
        warn!(keyword = %search.keyword, "Keyword is not one of the dashboard categories");
    }

    let api_key = config.places.resolve_api_key()?;
    let client = GooglePlacesClient::new(&api_key, config.places.base_url.as_deref(), config.places.timeout())?;
    let db = Database::new(&config.database.path)?;
    let harvester = Harvester::new(db, Arc::new(client), &config.places);

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.cyan} {bar:30.cyan/dark_gray} {pos}/{len} {msg}")
            .map_err(|e| ProspectorError::Internal(format!("Progress template: {}", e)))?
            .progress_chars("█▓░"),
    );
    bar.set_message(format!("Scanning for '{}'...", search.keyword));
    bar.enable_steady_tick(std::time::Duration::from_millis(120));

    let result = harvester
        .scan_with_progress(&search, |index, total, name| {
            bar.set_length(total as u64);
            bar.set_position(index as u64);
            bar.set_message(format!("Processing {}/{}: {}", index, total, name));
        })
        .await;
    bar.finish_and_clear();
    let summary = result?;

    if let Some(err) = &summary.search_error {
        println!("{} API error during scan: {}", style("✗").red(), err);
    }
    if summary.processed > 0 {
        println!(
            "{} Found {} leads for {} ({} pages, {} with phone)",
            style("✓").green(),
            style(summary.processed).bold(),
            style(&summary.keyword).cyan(),
            summary.pages,
            summary.phones_found
        );
    } else {
        println!("{} No new leads found in this area.", style("⚠").yellow());
    }
    Ok(())
}

use anyhow::Result;
use arrest_scraper::UsaTodayArrestClient;
use badboy_stats::{BadBoyConfig, BadBoyEntry, BadBoyStats};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let refresh = args.iter().any(|arg| arg == "--refresh" || arg == "-r");
    let offline = args.iter().any(|arg| arg == "--offline" || arg == "-o");
    let save_data = args.iter().any(|arg| arg == "--save" || arg == "-s");
    let export_categories = args.iter().any(|arg| arg == "--export-categories");

    // Override paths with environment variables if present
    let data_dir = std::env::var("BADBOY_DATA_DIR").unwrap_or_else(|_| "data/badboy".to_string());
    let crime_categories = std::env::var("CRIME_CATEGORIES_FILE")
        .unwrap_or_else(|_| "engine/badboy-stats/resources/crime_categories.json".to_string());

    let config = BadBoyConfig {
        data_dir: PathBuf::from(data_dir),
        crime_categories_path: PathBuf::from(crime_categories),
        save_data,
        offline,
        refresh,
    };

    println!("🏈 NFL Bad Boy Data Generator");
    println!("=============================");

    let stats = if offline {
        BadBoyStats::initialize(&config, None).await?
    } else {
        let client = UsaTodayArrestClient::connect().await?;
        BadBoyStats::initialize(&config, Some(&client)).await?
    };

    println!("✅ {} bad boy entities loaded", stats.len());

    if export_categories {
        let export_path = config.data_dir.join("crime_categories.new.json");
        stats.write_crime_categories_export(&export_path)?;
        println!("💾 Crime category export written to {:?}", export_path);
    }

    // Top 10 players by bad boy points
    let mut players: Vec<(&String, &BadBoyEntry)> = stats
        .store()
        .iter()
        .filter(|(_, entry)| matches!(entry, BadBoyEntry::Player(_)))
        .collect();
    players.sort_by(|a, b| b.1.total_points().cmp(&a.1.total_points()).then(a.0.cmp(b.0)));

    println!("\nTop 10 Players by Bad Boy Points:");
    println!("{:<22} {:<6} {:<8} {}", "Name", "Pts", "Worst", "Category");
    println!("{}", "-".repeat(60));

    for (name, entry) in players.iter().take(10) {
        println!(
            "{:<22} {:<6} {:<8} {}",
            name,
            entry.total_points(),
            entry.worst_offense_points(),
            entry.worst_offense().unwrap_or("-")
        );
    }

    Ok(())
}

use anyhow::Result;
use arrest_scraper::{fetch_all_arrests, UsaTodayArrestClient};
use std::collections::HashMap;
use std::fs;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚔 USA Today NFL Arrest Scraper");
    println!("===============================");

    // Connect and fetch everything, one team at a time
    let client = UsaTodayArrestClient::connect().await?;
    let data = fetch_all_arrests(&client).await?;

    // Create data directory if it doesn't exist
    fs::create_dir_all("data/badboy")?;

    let json_path = "data/badboy/arrest_records.json";
    let json_content = serde_json::to_string_pretty(&data)?;
    fs::write(json_path, json_content)?;

    println!("✅ Saved {} arrest records to {}", data.len(), json_path);

    // Per-team incident counts, busiest first
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &data.records {
        *counts.entry(record.team.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("\nIncidents by team:");
    for (team, count) in counts.iter().take(10) {
        println!("{:<4} {}", team, count);
    }

    Ok(())
}

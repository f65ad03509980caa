use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{ArrestData, ArrestRecord, ArrestSearchResponse, NFL_TEAMS};

/// The arrest database serves at most 20 rows per request.
pub const PAGE_SIZE: u32 = 20;

const ARREST_PAGE_URL: &str = "https://www.usatoday.com/sports/nfl/arrests/";
const ARREST_AJAX_URL: &str = "https://databases.usatoday.com/wp-admin/admin-ajax.php";

const SITEDATA_PREFIX: &str = "var sitedata = ";

/// One page of arrest-search results for a single team.
#[derive(Debug, Clone)]
pub struct ArrestPage {
    pub records: Vec<ArrestRecord>,
    /// Total matching rows reported by the database, across all pages
    pub total_results: u32,
}

/// A paged source of arrest records.
///
/// Pages are produced on demand, which decouples fetching from aggregation:
/// the live client implements this against the USA Today database, and tests
/// drive the same paging loop with finite in-memory sources.
#[async_trait]
pub trait ArrestSource {
    /// Fetch one page (1-based) of arrest records for a team.
    async fn fetch_page(&self, team: &str, page: u32) -> Result<ArrestPage>;
}

/// USA Today NFL arrest database client.
///
/// The search endpoint requires a session nonce embedded in the landing
/// page, so construction performs one GET to obtain it before any search
/// can be issued.
pub struct UsaTodayArrestClient {
    client: Client,
    ajax_url: String,
    nonce: String,
}

impl UsaTodayArrestClient {
    /// Connect to the production arrest database.
    pub async fn connect() -> Result<Self> {
        Self::connect_with_urls(ARREST_PAGE_URL, ARREST_AJAX_URL).await
    }

    /// Connect against explicit endpoint URLs.
    pub async fn connect_with_urls(page_url: &str, ajax_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        info!("Fetching arrest database session from: {}", page_url);

        let response =
            client.get(page_url).send().await.context("Failed to fetch arrest database page")?;

        if !response.status().is_success() {
            bail!("Arrest database page request failed with status: {}", response.status());
        }

        let html = response.text().await.context("Failed to read arrest database page")?;
        let nonce = extract_ajax_nonce(&html)?;
        debug!("Obtained arrest search nonce");

        Ok(Self { client, ajax_url: ajax_url.to_string(), nonce })
    }
}

#[async_trait]
impl ArrestSource for UsaTodayArrestClient {
    async fn fetch_page(&self, team: &str, page: u32) -> Result<ArrestPage> {
        let page_number = page.to_string();
        let searches = format!("{{\"Team\":\"{team}\"}}");
        let params = [
            ("action", "cspFetchTable"),
            ("security", self.nonce.as_str()),
            ("pageID", "10"),
            ("sortBy", "Date"),
            ("sortOrder", "desc"),
            ("page", page_number.as_str()),
            ("searches", searches.as_str()),
        ];

        let response = self
            .client
            .post(&self.ajax_url)
            .form(&params)
            .send()
            .await
            .with_context(|| format!("Failed to query arrests for {team} page {page}"))?;

        if !response.status().is_success() {
            bail!("Arrest search for {team} failed with status: {}", response.status());
        }

        let parsed: ArrestSearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse arrest search response for {team}"))?;

        let records = parsed
            .data
            .result
            .into_iter()
            .map(ArrestRecord::from_raw)
            .collect::<Result<Vec<_>>>()?;

        Ok(ArrestPage { records, total_results: parsed.data.total_results })
    }
}

/// Extract the ajax nonce from the `var sitedata = {...};` script on the
/// arrest landing page.
fn extract_ajax_nonce(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script")
        .map_err(|e| anyhow::anyhow!("Failed to create script selector: {e}"))?;

    for script in document.select(&script_selector) {
        let text = script.text().collect::<String>();
        let Some(start) = text.find(SITEDATA_PREFIX) else {
            continue;
        };

        let rest = &text[start + SITEDATA_PREFIX.len()..];
        let line = rest.lines().next().unwrap_or(rest).trim();
        let json = line.strip_suffix(';').unwrap_or(line);

        let sitedata: serde_json::Value =
            serde_json::from_str(json).context("Failed to parse sitedata JSON")?;
        let nonce = sitedata
            .get("ajax_nonce")
            .and_then(|value| value.as_str())
            .context("sitedata is missing ajax_nonce")?;

        return Ok(nonce.to_string());
    }

    bail!("Could not find sitedata script on arrest database page")
}

/// Fetch every arrest record for one team, requesting subsequent pages
/// while the reported total exceeds what has been fetched so far.
pub async fn fetch_team_arrests<S: ArrestSource + ?Sized>(
    source: &S,
    team: &str,
) -> Result<Vec<ArrestRecord>> {
    let mut page = 1;
    let first = source.fetch_page(team, page).await?;
    let total_results = first.total_results;
    let mut records = first.records;

    while total_results > PAGE_SIZE * page {
        page += 1;
        let next = source.fetch_page(team, page).await?;
        records.extend(next.records);
    }

    debug!("{}: fetched {} arrest records ({} reported)", team, records.len(), total_results);
    Ok(records)
}

/// Fetch arrest records for all NFL teams, one team at a time.
///
/// Any failure propagates immediately: the caller aborts the run rather
/// than report partially collected data.
pub async fn fetch_all_arrests<S: ArrestSource + ?Sized>(source: &S) -> Result<ArrestData> {
    info!("Fetching NFL arrest records for {} teams", NFL_TEAMS.len());

    let mut all_records = Vec::new();
    for team in NFL_TEAMS {
        let records = fetch_team_arrests(source, team).await?;
        all_records.extend(records);
    }

    info!("Fetched {} arrest records", all_records.len());
    Ok(ArrestData::new(all_records))
}

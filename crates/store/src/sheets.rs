//! Google Sheets worksheet backend.
//!
//! Talks to the Sheets v4 REST API with a service-account bearer token.
//! The dashboard's data lives in one tab (`ConstructionJobs`) of a
//! spreadsheet identified by its pasted URL.

use regex::Regex;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use sitepulse_core::columns;

use crate::auth::{resolve_credentials, TokenProvider};
use crate::error::{StoreError, StoreResult};
use crate::worksheet::Worksheet;

/// Title of the worksheet tab holding job rows.
pub const TAB_TITLE: &str = "ConstructionJobs";

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Extract the spreadsheet id from a pasted Google Sheets URL.
pub fn parse_spreadsheet_id(url: &str) -> StoreResult<String> {
    // Infallible pattern, compiled per call; sheet URLs are entered once at
    // startup, not in any hot path.
    let re = Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)")
        .map_err(|e| StoreError::Backend(e.to_string()))?;
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| StoreError::InvalidSheetUrl(url.to_string()))
}

/// One tab of a remote Google Sheet, addressed by spreadsheet id.
pub struct GoogleSheetsWorksheet {
    spreadsheet_id: String,
    include_project: bool,
    http: reqwest::Client,
    tokens: TokenProvider,
    /// Numeric sheet id of the tab, fetched lazily; row deletion needs it.
    sheet_id: Mutex<Option<i64>>,
}

impl GoogleSheetsWorksheet {
    /// Build a backend for the sheet at `url`, resolving credentials from
    /// the environment. Fails only on configuration problems; network
    /// errors surface per call.
    pub fn from_url(url: &str, include_project: bool) -> StoreResult<Self> {
        let spreadsheet_id = parse_spreadsheet_id(url)?;
        let key = resolve_credentials()?;
        let http = reqwest::Client::new();
        let tokens = TokenProvider::new(key, http.clone());
        Ok(Self {
            spreadsheet_id,
            include_project,
            http,
            tokens,
            sheet_id: Mutex::new(None),
        })
    }

    async fn get(&self, url: &str) -> StoreResult<Value> {
        let token = self.tokens.bearer().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        Self::check_status(response).await
    }

    async fn post(&self, url: &str, body: Value) -> StoreResult<Value> {
        let token = self.tokens.bearer().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn put(&self, url: &str, body: Value) -> StoreResult<Value> {
        let token = self.tokens.bearer().await?;
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> StoreResult<Value> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized(format!(
                "Sheets API returned {status}"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend(format!(
                "Sheets API returned {status}: {body}"
            )));
        }
        Ok(response.json().await?)
    }

    /// Numeric sheet id of our tab, or `None` if the tab does not exist.
    async fn lookup_sheet_id(&self) -> StoreResult<Option<i64>> {
        if let Some(id) = *self.sheet_id.lock().await {
            return Ok(Some(id));
        }

        let url = format!(
            "{API_BASE}/{}?fields=sheets.properties",
            self.spreadsheet_id
        );
        let meta = self.get(&url).await?;
        let found = meta["sheets"]
            .as_array()
            .into_iter()
            .flatten()
            .map(|s| &s["properties"])
            .find(|p| p["title"].as_str() == Some(TAB_TITLE))
            .and_then(|p| p["sheetId"].as_i64());

        if let Some(id) = found {
            *self.sheet_id.lock().await = Some(id);
        }
        Ok(found)
    }

    /// Create the tab with the canonical header row.
    async fn create_tab(&self) -> StoreResult<()> {
        tracing::info!(tab = TAB_TITLE, "Worksheet tab missing, creating it");
        let url = format!("{API_BASE}/{}:batchUpdate", self.spreadsheet_id);
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": TAB_TITLE } } }]
        });
        let reply = self.post(&url, body).await?;
        if let Some(id) = reply["replies"][0]["addSheet"]["properties"]["sheetId"].as_i64() {
            *self.sheet_id.lock().await = Some(id);
        }
        self.append_row(columns::canonical_header(self.include_project))
            .await
    }

    fn values_url(&self, range: &str) -> String {
        format!("{API_BASE}/{}/values/{range}", self.spreadsheet_id)
    }
}

#[async_trait::async_trait]
impl Worksheet for GoogleSheetsWorksheet {
    fn address(&self) -> String {
        format!("sheets://{}/{TAB_TITLE}", self.spreadsheet_id)
    }

    async fn fetch_grid(&self) -> StoreResult<Vec<Vec<String>>> {
        if self.lookup_sheet_id().await?.is_none() {
            self.create_tab().await?;
            return Ok(vec![columns::canonical_header(self.include_project)]);
        }

        let reply = self.get(&self.values_url(TAB_TITLE)).await?;
        let grid = reply["values"]
            .as_array()
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .into_iter()
                            .flatten()
                            .map(|cell| match cell {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(grid)
    }

    async fn append_row(&self, row: Vec<String>) -> StoreResult<()> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(TAB_TITLE)
        );
        self.post(&url, json!({ "values": [row] })).await?;
        Ok(())
    }

    async fn update_row(&self, index: usize, row: Vec<String>) -> StoreResult<()> {
        // Data row 0 is spreadsheet row 2 (1-based, after the header).
        let range = format!("{TAB_TITLE}!A{}", index + 2);
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(&range)
        );
        self.put(&url, json!({ "values": [row] })).await?;
        Ok(())
    }

    async fn delete_row(&self, index: usize) -> StoreResult<()> {
        let sheet_id = self
            .lookup_sheet_id()
            .await?
            .ok_or_else(|| StoreError::Backend("worksheet tab disappeared".to_string()))?;

        let url = format!("{API_BASE}/{}:batchUpdate", self.spreadsheet_id);
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        // 0-based grid coordinates; +1 skips the header.
                        "startIndex": index + 1,
                        "endIndex": index + 2,
                    }
                }
            }]
        });
        self.post(&url, body).await?;
        Ok(())
    }
}

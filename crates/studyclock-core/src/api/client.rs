//! Study-timer backend client.
//!
//! Two endpoints, both bearer-authenticated and both best-effort with
//! respect to the timer: a failed call is logged by the caller and retried
//! at the next natural trigger (next completion or next poll), never in a
//! tight loop.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::error::NetworkError;
use crate::session::SessionRecord;

/// Backend-aggregated per-day totals. The client never computes these
/// locally; they are fetched, not derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    #[serde(rename = "pomodorosCompleted", default)]
    pub pomodoros_completed: u32,
    /// Seconds of focus time today.
    #[serde(rename = "totalStudyTime", default)]
    pub total_study_time_secs: u64,
    /// Seconds of break time today.
    #[serde(rename = "totalBreakTime", default)]
    pub total_break_time_secs: u64,
    #[serde(rename = "longestStreak", default)]
    pub longest_streak_days: u32,
}

/// Client for the study-timer endpoints.
pub struct StudyApiClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl StudyApiClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, NetworkError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
            token: token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, NetworkError> {
        Ok(self.base_url.join(path)?)
    }

    /// Upload a completed focus session.
    ///
    /// The body carries the client-generated id so a retried upload after a
    /// dropped acknowledgment cannot double-count.
    pub async fn record_session(&self, record: &SessionRecord) -> Result<(), NetworkError> {
        let url = self.endpoint("study-timer/session")?;
        let body = json!({
            "clientId": record.client_id,
            "duration": record.duration_min,
            "mode": "pomodoro",
            "completedAt": record.completed_at.to_rfc3339(),
        });

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(NetworkError::Status {
                endpoint: "study-timer/session".into(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Fetch today's aggregated stats.
    pub async fn fetch_daily_stats(&self) -> Result<DailyStats, NetworkError> {
        let url = self.endpoint("study-timer/today")?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;

        if !resp.status().is_success() {
            return Err(NetworkError::Status {
                endpoint: "study-timer/today".into(),
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }
}

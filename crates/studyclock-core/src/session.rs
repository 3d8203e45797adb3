//! Completed focus sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed focus-phase countdown, created exactly once per completion.
///
/// `client_id` is generated at creation so a retried upload is idempotent on
/// the server side: a dropped acknowledgment cannot double-count a pomodoro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub client_id: Uuid,
    pub duration_min: u32,
    pub completed_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(duration_min: u32) -> Self {
        Self {
            client_id: Uuid::new_v4(),
            duration_min,
            completed_at: Utc::now(),
        }
    }
}

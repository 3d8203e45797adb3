//! Read-only view of the backend's daily stats.
//!
//! The view caches the last fetched [`DailyStats`] and coalesces refresh
//! triggers: a completion-triggered refresh and a periodic poll can fire
//! close together, and allowing both in flight would let the slower (staler)
//! response overwrite the fresher one. Only one fetch is outstanding at a
//! time; an overlapping trigger is skipped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{DailyStats, StudyApiClient};

/// Cached, read-only presentation of `DailyStats`.
#[derive(Clone)]
pub struct StatsView {
    client: Arc<StudyApiClient>,
    cached: Arc<Mutex<DailyStats>>,
    in_flight: Arc<AtomicBool>,
}

impl StatsView {
    pub fn new(client: Arc<StudyApiClient>) -> Self {
        Self {
            client,
            cached: Arc::new(Mutex::new(DailyStats::default())),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Last fetched stats (all zeros until the first successful fetch).
    pub fn current(&self) -> DailyStats {
        self.cached.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Re-pull stats from the backend. Returns `true` if the cache was
    /// updated; `false` if another fetch was already in flight or the fetch
    /// failed (the cache is left untouched either way).
    pub async fn refresh(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return false;
        }
        let result = self.client.fetch_daily_stats().await;
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(stats) => {
                if let Ok(mut cached) = self.cached.lock() {
                    *cached = stats;
                }
                true
            }
            Err(err) => {
                // Non-blocking notice; retried at the next trigger.
                eprintln!("stats refresh failed: {err}");
                false
            }
        }
    }
}

/// Render seconds as `"Xh YYm"` / `"Xm"` for display.
pub fn format_duration(secs: u64) -> String {
    let minutes = secs / 60;
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Multi-line summary for terminal display.
pub fn render(stats: &DailyStats) -> String {
    format!(
        "Pomodoros today: {}\nStudy time:      {}\nBreak time:      {}\nLongest streak:  {} days",
        stats.pomodoros_completed,
        format_duration(stats.total_study_time_secs),
        format_duration(stats.total_break_time_secs),
        stats.longest_streak_days,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_sub_hour() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(25 * 60), "25m");
    }

    #[test]
    fn format_hours() {
        assert_eq!(format_duration(3600), "1h 00m");
        assert_eq!(format_duration(4500), "1h 15m");
        assert_eq!(format_duration(2 * 3600 + 5 * 60), "2h 05m");
    }

    #[test]
    fn render_zero_day() {
        let out = render(&DailyStats::default());
        assert!(out.contains("Pomodoros today: 0"));
        assert!(out.contains("0m"));
        assert!(out.contains("0 days"));
    }

    #[tokio::test]
    async fn overlapping_refreshes_coalesce_to_one_fetch() {
        use std::io::Write;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/study-timer/today")
            .with_header("content-type", "application/json")
            // Hold the response long enough for the second trigger to land
            // while the first fetch is still in flight.
            .with_chunked_body(|w| {
                std::thread::sleep(std::time::Duration::from_millis(200));
                w.write_all(br#"{"pomodorosCompleted":1}"#)
            })
            .expect(1)
            .create_async()
            .await;

        let client = Arc::new(StudyApiClient::new(&server.url(), "t").unwrap());
        let view = StatsView::new(client);

        let (first, second) = tokio::join!(view.refresh(), view.refresh());
        assert!(first);
        assert!(!second, "overlapping trigger must be skipped, not queued");
        assert_eq!(view.current().pomodoros_completed, 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn refresh_updates_cache_and_failure_leaves_it() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/study-timer/today")
            .with_header("content-type", "application/json")
            .with_body(r#"{"pomodorosCompleted":2,"totalStudyTime":3000}"#)
            .create_async()
            .await;

        let client = Arc::new(StudyApiClient::new(&server.url(), "t").unwrap());
        let view = StatsView::new(client);
        assert_eq!(view.current(), DailyStats::default());

        assert!(view.refresh().await);
        assert_eq!(view.current().pomodoros_completed, 2);
        ok.remove_async().await;

        server
            .mock("GET", "/study-timer/today")
            .with_status(503)
            .create_async()
            .await;
        assert!(!view.refresh().await);
        // Stale-overwrite guard: the failed fetch did not clobber the cache.
        assert_eq!(view.current().pomodoros_completed, 2);
    }
}

mod client;

pub use client::{DailyStats, StudyApiClient};

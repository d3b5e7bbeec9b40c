//! Instructor dashboard view-model helpers.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::BTreeMap;

pub const DASHBOARD_FAILED: &str = "Failed to fetch dashboard data";
pub const COURSE_DETAILS_FAILED: &str = "Error fetching course details";
pub const INSTRUCTOR_COURSE_FAILED: &str = "Failed to fetch course details";
pub const COURSE_DATA_FAILED: &str = "Failed to fetch course data";

/// One point of the enrollment trend series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: String,
    pub enrollments: u64,
}

/// Flatten `{date -> count}` into points ordered by date.
///
/// Dates are ISO `YYYY-MM-DD` strings, so lexical order is chronological.
#[must_use]
pub fn trend_points(trends: &BTreeMap<String, u64>) -> Vec<TrendPoint> {
    trends
        .iter()
        .map(|(date, count)| TrendPoint { date: date.clone(), enrollments: *count })
        .collect()
}

/// Largest single-day count, for scaling a chart axis.
#[must_use]
pub fn peak_enrollments(points: &[TrendPoint]) -> u64 {
    points.iter().map(|p| p.enrollments).max().unwrap_or(0)
}

//! Placeholder monthly trend figures shown by the analytics view.
//!
//! These are fixed demo numbers, not derived from any event data, and are
//! kept apart from [`crate::AnalyticsReport`] so they cannot be mistaken for
//! computed values.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: &'static str,
    pub events: u32,
    pub revenue: f64,
}

/// Scale the trend bars are drawn against.
pub const TREND_BAR_MAX_EVENTS: u32 = 25;

pub fn sample_monthly_trend() -> [MonthlyTrend; 6] {
    [
        MonthlyTrend { month: "Jan", events: 8, revenue: 12_400.0 },
        MonthlyTrend { month: "Feb", events: 12, revenue: 18_600.0 },
        MonthlyTrend { month: "Mar", events: 15, revenue: 24_800.0 },
        MonthlyTrend { month: "Apr", events: 10, revenue: 16_200.0 },
        MonthlyTrend { month: "May", events: 18, revenue: 28_900.0 },
        MonthlyTrend { month: "Jun", events: 22, revenue: 35_600.0 },
    ]
}

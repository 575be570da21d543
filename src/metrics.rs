use serde::Serialize;

use crate::error::Result;
use crate::filter::View;
use crate::models::DateRange;

/// The three headline cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub total_revenue: f64,
    pub total_units: u64,
    /// Transactions per day: row count over the inclusive day span of the
    /// selected range. Labelled "average daily sales" on screen, but it
    /// counts rows, not revenue or units.
    pub avg_per_day: f64,
}

/// Compute the metric cards from the date-filtered view.
pub fn compute_metrics(date_view: &View, range: &DateRange) -> Result<Metrics> {
    let days = range.day_span()?;
    let total_revenue = date_view.iter().map(|t| t.total).sum();
    let total_units = date_view.iter().map(|t| u64::from(t.quantity)).sum();
    Ok(Metrics {
        total_revenue,
        total_units,
        avg_per_day: date_view.len() as f64 / days as f64,
    })
}

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::filter::View;
use crate::loader::Dataset;
use crate::models::{CustomerType, ProductLine, Transaction};
use crate::stats::{self, BoxStats, HistogramBin};

pub const RATING_BINS: usize = 10;
pub const DENSITY_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Daily revenue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub total: f64,
}

/// Revenue per calendar day, ascending by date. Days with no rows are absent.
pub fn daily_revenue(view: &View) -> Vec<DailyRevenue> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in view.iter() {
        *by_day.entry(t.date).or_insert(0.0) += t.total;
    }
    by_day
        .into_iter()
        .map(|(date, total)| DailyRevenue { date, total })
        .collect()
}

// ---------------------------------------------------------------------------
// Revenue by product line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRevenue {
    pub product_line: ProductLine,
    pub total: f64,
}

/// Revenue per product line, smallest first. Equal sums keep alphabetical order.
pub fn revenue_by_product_line(view: &View) -> Vec<LineRevenue> {
    let mut by_line: BTreeMap<ProductLine, f64> = BTreeMap::new();
    for t in view.iter() {
        *by_line.entry(t.product_line).or_insert(0.0) += t.total;
    }
    let mut items: Vec<LineRevenue> = by_line
        .into_iter()
        .map(|(product_line, total)| LineRevenue { product_line, total })
        .collect();
    items.sort_by(|a, b| a.total.total_cmp(&b.total));
    items
}

// ---------------------------------------------------------------------------
// Rating distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDistribution {
    pub bins: Vec<HistogramBin>,
    /// Smoothed density scaled to the histogram's count axis.
    pub density: Vec<DensityPoint>,
}

pub fn rating_distribution(view: &View) -> RatingDistribution {
    let ratings: Vec<f64> = view.iter().map(|t| t.rating).collect();
    let bins = stats::histogram(&ratings, RATING_BINS);

    let density = match bins.first() {
        Some(first) => {
            let scale = ratings.len() as f64 * (first.upper - first.lower);
            let lo = ratings.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            stats::gaussian_kde(&ratings, lo, hi, DENSITY_POINTS)
                .into_iter()
                .map(|(x, y)| DensityPoint { x, y: y * scale })
                .collect()
        }
        None => Vec::new(),
    };

    RatingDistribution { bins, density }
}

// ---------------------------------------------------------------------------
// Spend by customer type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSpend {
    pub customer_type: CustomerType,
    pub summary: BoxStats,
}

/// Distribution of `Total` per customer type present in the view.
pub fn spend_by_customer_type(view: &View) -> Vec<CustomerSpend> {
    let mut groups: BTreeMap<CustomerType, Vec<f64>> = BTreeMap::new();
    for t in view.iter() {
        groups.entry(t.customer_type).or_default().push(t.total);
    }
    groups
        .into_iter()
        .filter_map(|(customer_type, totals)| {
            stats::box_stats(&totals).map(|summary| CustomerSpend {
                customer_type,
                summary,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cost vs profit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostProfit {
    pub cogs: f64,
    pub gross_income: f64,
}

pub fn cost_vs_profit(view: &View) -> Vec<CostProfit> {
    view.iter()
        .map(|t| CostProfit {
            cogs: t.cogs,
            gross_income: t.gross_income,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payment methods
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentCount {
    pub method: String,
    pub count: usize,
}

/// Payment methods by descending frequency over the whole table. Ties keep
/// first-appearance order.
pub fn payment_order(dataset: &Dataset) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in dataset.rows() {
        match index.get(t.payment_method.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(&t.payment_method, counts.len());
                counts.push((t.payment_method.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(method, _)| method).collect()
}

/// Rows per payment method in the view, in full-table frequency order.
/// Methods absent from the view are reported with a zero count.
pub fn payment_counts(view: &View, dataset: &Dataset) -> Vec<PaymentCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in view.iter() {
        *counts.entry(t.payment_method.as_str()).or_insert(0) += 1;
    }
    payment_order(dataset)
        .into_iter()
        .map(|method| {
            let count = counts.get(method.as_str()).copied().unwrap_or(0);
            PaymentCount { method, count }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericColumn {
    #[serde(rename = "Unit price")]
    UnitPrice,
    Quantity,
    #[serde(rename = "Tax 5%")]
    Tax,
    Total,
    #[serde(rename = "cogs")]
    Cogs,
    #[serde(rename = "gross income")]
    GrossIncome,
    Rating,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 7] = [
        NumericColumn::UnitPrice,
        NumericColumn::Quantity,
        NumericColumn::Tax,
        NumericColumn::Total,
        NumericColumn::Cogs,
        NumericColumn::GrossIncome,
        NumericColumn::Rating,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnitPrice => "Unit price",
            Self::Quantity => "Quantity",
            Self::Tax => "Tax 5%",
            Self::Total => "Total",
            Self::Cogs => "cogs",
            Self::GrossIncome => "gross income",
            Self::Rating => "Rating",
        }
    }

    pub fn value(&self, t: &Transaction) -> f64 {
        match self {
            Self::UnitPrice => t.unit_price,
            Self::Quantity => f64::from(t.quantity),
            Self::Tax => t.tax,
            Self::Total => t.total,
            Self::Cogs => t.cogs,
            Self::GrossIncome => t.gross_income,
            Self::Rating => t.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    /// Row-major; `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    #[allow(dead_code)]
    pub fn get(&self, row: NumericColumn, col: NumericColumn) -> Option<f64> {
        let r = self.columns.iter().position(|c| *c == row)?;
        let c = self.columns.iter().position(|c| *c == col)?;
        self.values[r][c]
    }
}

/// Pearson correlation between the seven numeric columns over the whole
/// table. Sidebar filters never apply here.
pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = NumericColumn::ALL
        .iter()
        .map(|col| dataset.rows().iter().map(|t| col.value(t)).collect())
        .collect();
    let values = series
        .iter()
        .map(|xs| series.iter().map(|ys| stats::pearson(xs, ys)).collect())
        .collect();
    CorrelationMatrix {
        columns: NumericColumn::ALL.to_vec(),
        values,
    }
}

// ---------------------------------------------------------------------------
// Branch x product line profit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchInsight {
    pub branch: String,
    pub branch_total: f64,
    pub product_line: ProductLine,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchProfit {
    /// Sorted branch identifiers (pivot rows).
    pub branches: Vec<String>,
    /// Product lines present in the view, alphabetical (pivot columns).
    pub product_lines: Vec<ProductLine>,
    /// `values[branch][line]`, `None` where the branch sold nothing in that line.
    pub values: Vec<Vec<Option<f64>>>,
    pub insight: Option<BranchInsight>,
}

impl BranchProfit {
    pub fn row_total(&self, branch_idx: usize) -> f64 {
        self.values[branch_idx].iter().flatten().sum()
    }
}

/// Pivot gross income by branch and product line. The insight names the
/// branch with the largest row total and its best line; ties go to the
/// first in sorted order.
pub fn branch_profit(view: &View) -> BranchProfit {
    let mut cells: BTreeMap<(&str, ProductLine), f64> = BTreeMap::new();
    for t in view.iter() {
        *cells.entry((t.branch.as_str(), t.product_line)).or_insert(0.0) += t.gross_income;
    }

    let mut branches: Vec<String> = cells.keys().map(|(b, _)| b.to_string()).collect();
    branches.dedup();
    let mut product_lines: Vec<ProductLine> = cells.keys().map(|(_, l)| *l).collect();
    product_lines.sort();
    product_lines.dedup();

    let values: Vec<Vec<Option<f64>>> = branches
        .iter()
        .map(|b| {
            product_lines
                .iter()
                .map(|l| cells.get(&(b.as_str(), *l)).copied())
                .collect()
        })
        .collect();

    let mut pivot = BranchProfit {
        branches,
        product_lines,
        values,
        insight: None,
    };
    pivot.insight = best_branch(&pivot);
    pivot
}

fn best_branch(pivot: &BranchProfit) -> Option<BranchInsight> {
    let mut best: Option<(usize, f64)> = None;
    for idx in 0..pivot.branches.len() {
        let total = pivot.row_total(idx);
        if best.map_or(true, |(_, t)| total > t) {
            best = Some((idx, total));
        }
    }
    let (idx, branch_total) = best?;

    let mut best_line: Option<(ProductLine, f64)> = None;
    for (line, value) in pivot.product_lines.iter().zip(&pivot.values[idx]) {
        if let Some(v) = value {
            if best_line.map_or(true, |(_, t)| *v > t) {
                best_line = Some((*line, *v));
            }
        }
    }
    let (product_line, line_total) = best_line?;

    Some(BranchInsight {
        branch: pivot.branches[idx].clone(),
        branch_total,
        product_line,
        line_total,
    })
}

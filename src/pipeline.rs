use serde::Serialize;

use crate::aggregate::{
    self, BranchProfit, CorrelationMatrix, CostProfit, CustomerSpend, DailyRevenue, LineRevenue,
    PaymentCount, RatingDistribution,
};
use crate::error::Result;
use crate::filter::{filter_by_category, filter_by_date};
use crate::loader::Dataset;
use crate::metrics::{compute_metrics, Metrics};
use crate::models::{CategorySelection, DateRange};

/// A chart that depends on the product-line selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    /// No product line selected; show the placeholder instead.
    NothingSelected,
}

impl<T> Panel<T> {
    fn build(selection: &CategorySelection, f: impl FnOnce() -> T) -> Self {
        if selection.is_empty() {
            Panel::NothingSelected
        } else {
            Panel::Ready(f())
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(v) => Some(v),
            Panel::NothingSelected => None,
        }
    }

    #[allow(dead_code)]
    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }
}

/// Everything one dashboard frame shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub range: DateRange,
    pub selection: CategorySelection,
    pub metrics: Metrics,
    pub daily_revenue: Vec<DailyRevenue>,
    pub revenue_by_line: Panel<Vec<LineRevenue>>,
    pub rating_distribution: Panel<RatingDistribution>,
    pub spend_by_customer_type: Panel<Vec<CustomerSpend>>,
    pub cost_vs_profit: Panel<Vec<CostProfit>>,
    pub payment_methods: Panel<Vec<PaymentCount>>,
    pub correlation: CorrelationMatrix,
    pub branch_profit: Panel<BranchProfit>,
}

/// Recompute every metric and aggregate for one filter state. Pure: the
/// dataset is only read, and nothing is cached between calls.
pub fn render(
    dataset: &Dataset,
    range: &DateRange,
    selection: &CategorySelection,
) -> Result<Rendered> {
    let dated = filter_by_date(dataset, range);
    let selected = filter_by_category(&dated, selection);
    tracing::debug!(
        start = %range.start,
        end = %range.end,
        lines = selection.len(),
        dated = dated.len(),
        selected = selected.len(),
        "render"
    );

    let metrics = compute_metrics(&dated, range)?;

    Ok(Rendered {
        range: *range,
        selection: selection.clone(),
        metrics,
        daily_revenue: aggregate::daily_revenue(&dated),
        revenue_by_line: Panel::build(selection, || aggregate::revenue_by_product_line(&selected)),
        rating_distribution: Panel::build(selection, || aggregate::rating_distribution(&selected)),
        spend_by_customer_type: Panel::build(selection, || {
            aggregate::spend_by_customer_type(&selected)
        }),
        cost_vs_profit: Panel::build(selection, || aggregate::cost_vs_profit(&selected)),
        payment_methods: Panel::build(selection, || {
            aggregate::payment_counts(&selected, dataset)
        }),
        correlation: aggregate::correlation_matrix(dataset),
        branch_profit: Panel::build(selection, || aggregate::branch_profit(&selected)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesError;
    use crate::loader::fixtures::*;
    use crate::models::{ProductLine, Transaction};

    fn dataset() -> Dataset {
        let lines = ProductLine::MENU_ORDER;
        let methods = ["Ewallet", "Cash", "Credit card", "Cash"];
        let rows: Vec<Transaction> = (0..24u32)
            .map(|i| {
                let mut t = txn(date(2019, 1, 1 + i % 8), lines[i as usize % 6], 10.0 + i as f64);
                t.payment_method = methods[i as usize % 4].to_string();
                t.branch = ["A", "B", "C"][i as usize % 3].to_string();
                t.quantity = 1 + i % 5;
                t.rating = 4.0 + (i % 7) as f64;
                t
            })
            .collect();
        Dataset::from_reader(csv_text(&rows).as_bytes(), "mem.csv").unwrap()
    }

    #[test]
    fn test_empty_selection_suppresses_category_panels() {
        let ds = dataset();
        let out = render(&ds, &ds.full_range(), &CategorySelection::none()).unwrap();
        assert_eq!(out.revenue_by_line, Panel::NothingSelected);
        assert_eq!(out.rating_distribution, Panel::NothingSelected);
        assert_eq!(out.spend_by_customer_type, Panel::NothingSelected);
        assert_eq!(out.cost_vs_profit, Panel::NothingSelected);
        assert_eq!(out.payment_methods, Panel::NothingSelected);
        assert_eq!(out.branch_profit, Panel::NothingSelected);
        // Date-only outputs still render.
        assert_eq!(out.daily_revenue.len(), 8);
        assert_eq!(out.metrics.avg_per_day, 3.0);
        assert!(out.correlation.get(
            aggregate::NumericColumn::Total,
            aggregate::NumericColumn::Cogs
        ).is_some());
    }

    #[test]
    fn test_full_selection_renders_every_panel() {
        let ds = dataset();
        let out = render(&ds, &ds.full_range(), &CategorySelection::all()).unwrap();
        assert!(out.revenue_by_line.is_ready());
        assert!(out.rating_distribution.is_ready());
        assert!(out.spend_by_customer_type.is_ready());
        assert_eq!(out.cost_vs_profit.ready().map(Vec::len), Some(24));
        assert!(out.payment_methods.is_ready());
        assert_eq!(out.branch_profit.ready().map(|p| p.branches.len()), Some(3));
    }

    #[test]
    fn test_metrics_ignore_category_selection() {
        let ds = dataset();
        let range = ds.full_range();
        let all = render(&ds, &range, &CategorySelection::all()).unwrap();
        let one = render(
            &ds,
            &range,
            &CategorySelection::from_labels(&["Fashion accessories"]).unwrap(),
        )
        .unwrap();
        assert_eq!(all.metrics, one.metrics);
        assert_eq!(all.daily_revenue, one.daily_revenue);
    }

    #[test]
    fn test_correlation_and_payment_order_invariant_under_filters() {
        let ds = dataset();
        let full = render(&ds, &ds.full_range(), &CategorySelection::all()).unwrap();
        let narrow_range = DateRange::new(date(2019, 1, 2), date(2019, 1, 3)).unwrap();
        let narrow = render(
            &ds,
            &narrow_range,
            &CategorySelection::from_labels(&["Health and beauty", "Sports and travel"]).unwrap(),
        )
        .unwrap();
        assert_eq!(full.correlation, narrow.correlation);

        let order = |r: &Rendered| -> Vec<String> {
            r.payment_methods
                .ready()
                .map(|v| v.iter().map(|p| p.method.clone()).collect())
                .unwrap_or_default()
        };
        assert_eq!(order(&full), vec!["Cash", "Ewallet", "Credit card"]);
        assert_eq!(order(&full), order(&narrow));
    }

    #[test]
    fn test_inverted_range_aborts_render() {
        let ds = dataset();
        let inverted = DateRange {
            start: date(2019, 1, 5),
            end: date(2019, 1, 2),
        };
        assert!(matches!(
            render(&ds, &inverted, &CategorySelection::all()),
            Err(SalesError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_rendered_serializes_placeholders() {
        let ds = dataset();
        let out = render(&ds, &ds.full_range(), &CategorySelection::none()).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["revenue_by_line"]["status"], "nothing_selected");
        assert_eq!(json["range"]["start"], "2019-01-01");
        assert!(json["daily_revenue"].as_array().is_some_and(|a| a.len() == 8));
    }
}

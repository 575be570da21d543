use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::{
    BranchProfit, CorrelationMatrix, CostProfit, CustomerSpend, DailyRevenue, LineRevenue,
    PaymentCount, RatingDistribution,
};
use crate::captions::{self, ChartKind, NO_DATA, NO_SELECTION};
use crate::fmt::{coefficient, day, money, number};
use crate::pipeline::{Panel, Rendered};
use crate::stats::pearson;

const CAPTION_WIDTH: usize = 88;

fn right(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

/// Render a whole dashboard frame as plain text tables.
pub fn format_report(r: &Rendered) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", captions::DASHBOARD_TITLE.yellow().bold()));
    out.push_str(&format!(
        "{}\n",
        captions::metrics_heading(r.range.start, r.range.end).bold()
    ));
    out.push_str(&format_metrics(r));
    out.push('\n');

    for kind in ChartKind::ALL {
        out.push('\n');
        out.push_str(&format!("{}\n", kind.title().bold()));
        out.push_str(&format_chart(kind, r));
        out.push('\n');
        if let Some(caption) = caption_for(kind, r) {
            out.push_str(&format!("{}\n", textwrap::fill(&caption, CAPTION_WIDTH).dimmed()));
        }
    }
    out
}

fn format_metrics(r: &Rendered) -> String {
    let m = &r.metrics;
    let mut table = Table::new();
    table.set_header(vec![
        captions::METRIC_REVENUE,
        captions::METRIC_UNITS,
        captions::METRIC_AVG_PER_DAY,
    ]);
    table.add_row(vec![
        right(money(m.total_revenue)),
        right(number(m.total_units)),
        right(format!("{:.1}", m.avg_per_day)),
    ]);
    table.to_string()
}

fn caption_for(kind: ChartKind, r: &Rendered) -> Option<String> {
    if kind.needs_selection() && r.selection.is_empty() {
        return None;
    }
    match kind.caption() {
        Some(text) => Some(text.to_string()),
        None => r
            .branch_profit
            .ready()
            .and_then(|p| p.insight.as_ref())
            .map(captions::branch_insight_text),
    }
}

fn format_chart(kind: ChartKind, r: &Rendered) -> String {
    match kind {
        ChartKind::DailyRevenue => format_daily_revenue(&r.daily_revenue),
        ChartKind::RevenueByLine => panel(&r.revenue_by_line, |v| format_revenue_by_line(v)),
        ChartKind::RatingDistribution => panel(&r.rating_distribution, format_rating),
        ChartKind::SpendByCustomerType => panel(&r.spend_by_customer_type, |v| format_spend(v)),
        ChartKind::CostVsProfit => panel(&r.cost_vs_profit, |v| format_cost_vs_profit(v)),
        ChartKind::PaymentMethods => panel(&r.payment_methods, |v| format_payments(v)),
        ChartKind::Correlation => format_correlation(&r.correlation),
        ChartKind::BranchProfit => panel(&r.branch_profit, format_branch_profit),
    }
}

fn panel<T>(p: &Panel<T>, format: impl FnOnce(&T) -> String) -> String {
    match p {
        Panel::Ready(data) => format(data),
        Panel::NothingSelected => format!("{}", format!("ℹ {NO_SELECTION}").blue()),
    }
}

fn no_data() -> String {
    format!("{}", NO_DATA.blue())
}

pub fn format_daily_revenue(series: &[DailyRevenue]) -> String {
    if series.is_empty() {
        return no_data();
    }
    let mut table = Table::new();
    table.set_header(vec!["Fecha", "Total"]);
    for d in series {
        table.add_row(vec![Cell::new(day(d.date)), right(money(d.total))]);
    }
    table.to_string()
}

pub fn format_revenue_by_line(items: &[LineRevenue]) -> String {
    if items.is_empty() {
        return no_data();
    }
    let mut table = Table::new();
    table.set_header(vec!["Línea de Producto", "Total"]);
    for item in items {
        table.add_row(vec![Cell::new(item.product_line.label()), right(money(item.total))]);
    }
    table.to_string()
}

pub fn format_rating(dist: &RatingDistribution) -> String {
    if dist.bins.is_empty() {
        return no_data();
    }
    let mut table = Table::new();
    table.set_header(vec!["Calificación", "Frecuencia"]);
    let last = dist.bins.len() - 1;
    for (i, b) in dist.bins.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        table.add_row(vec![
            Cell::new(format!("[{:.2}, {:.2}{close}", b.lower, b.upper)),
            right(b.count),
        ]);
    }
    let peak = dist
        .density
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map(|p| format!("\nDensidad máxima en {:.2}", p.x))
        .unwrap_or_default();
    format!("{table}{peak}")
}

pub fn format_spend(groups: &[CustomerSpend]) -> String {
    if groups.is_empty() {
        return no_data();
    }
    let mut table = Table::new();
    table.set_header(vec![
        "Tipo de Cliente", "N", "Mín", "Q1", "Mediana", "Q3", "Máx", "Atípicos",
    ]);
    for g in groups {
        let s = &g.summary;
        table.add_row(vec![
            Cell::new(g.customer_type.label()),
            right(s.count),
            right(money(s.whisker_low)),
            right(money(s.q1)),
            right(money(s.median)),
            right(money(s.q3)),
            right(money(s.whisker_high)),
            right(s.outliers.len()),
        ]);
    }
    table.to_string()
}

/// The scatter itself does not fit in text; summarise it.
pub fn format_cost_vs_profit(pairs: &[CostProfit]) -> String {
    if pairs.is_empty() {
        return no_data();
    }
    let cogs: Vec<f64> = pairs.iter().map(|p| p.cogs).collect();
    let income: Vec<f64> = pairs.iter().map(|p| p.gross_income).collect();
    let max = |v: &[f64]| v.iter().copied().fold(f64::MIN, f64::max);
    let min = |v: &[f64]| v.iter().copied().fold(f64::MAX, f64::min);

    let mut table = Table::new();
    table.set_header(vec!["", "Costo", "Ganancia Bruta"]);
    table.add_row(vec![Cell::new("Mín"), right(money(min(&cogs))), right(money(min(&income)))]);
    table.add_row(vec![Cell::new("Máx"), right(money(max(&cogs))), right(money(max(&income)))]);
    format!(
        "{table}\nPuntos: {}  Correlación: {}",
        number(pairs.len() as u64),
        coefficient(pearson(&cogs, &income))
    )
}

pub fn format_payments(counts: &[PaymentCount]) -> String {
    if counts.iter().all(|c| c.count == 0) {
        return no_data();
    }
    let mut table = Table::new();
    table.set_header(vec!["Método de Pago", "Transacciones"]);
    for c in counts {
        table.add_row(vec![Cell::new(&c.method), right(c.count)]);
    }
    table.to_string()
}

pub fn format_correlation(matrix: &CorrelationMatrix) -> String {
    let mut table = Table::new();
    let mut header = vec![Cell::new("")];
    header.extend(matrix.columns.iter().map(|c| Cell::new(c.label())));
    table.set_header(header);
    for (col, values) in matrix.columns.iter().zip(&matrix.values) {
        let mut row = vec![Cell::new(col.label())];
        row.extend(values.iter().map(|v| right(coefficient(*v))));
        table.add_row(row);
    }
    table.to_string()
}

pub fn format_branch_profit(pivot: &BranchProfit) -> String {
    if pivot.branches.is_empty() {
        return no_data();
    }
    let mut table = Table::new();
    let mut header = vec![Cell::new("Sucursal")];
    header.extend(pivot.product_lines.iter().map(|l| Cell::new(l.label())));
    header.push(Cell::new("Total"));
    table.set_header(header);

    for (i, branch) in pivot.branches.iter().enumerate() {
        let mut row = vec![Cell::new(branch)];
        row.extend(
            pivot.values[i]
                .iter()
                .map(|v| right(v.map(money).unwrap_or_default())),
        );
        row.push(right(money(pivot.row_total(i))));
        table.add_row(row);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::fixtures::*;
    use crate::loader::Dataset;
    use crate::models::{CategorySelection, ProductLine};
    use crate::pipeline::render;

    fn rendered(selection: CategorySelection) -> Rendered {
        colored::control::set_override(false);
        let rows = vec![
            txn(date(2019, 1, 1), ProductLine::FoodAndBeverages, 10.0),
            txn(date(2019, 1, 1), ProductLine::HealthAndBeauty, 20.0),
            txn(date(2019, 1, 2), ProductLine::FoodAndBeverages, 5.0),
        ];
        let ds = Dataset::from_reader(csv_text(&rows).as_bytes(), "mem.csv").unwrap();
        render(&ds, &ds.full_range(), &selection).unwrap()
    }

    #[test]
    fn test_report_lists_metrics_and_every_chart() {
        let text = format_report(&rendered(CategorySelection::all()));
        assert!(text.contains("Métricas de ventas entre 01/01/2019 y 02/01/2019"));
        assert!(text.contains("$35.00"));
        assert!(text.contains("1.5"));
        for kind in ChartKind::ALL {
            assert!(text.contains(kind.title()), "missing {}", kind.title());
        }
        assert!(text.contains("la sucursal 'A'"));
        assert!(!text.contains(NO_SELECTION));
    }

    #[test]
    fn test_report_shows_placeholders_without_selection() {
        let text = format_report(&rendered(CategorySelection::none()));
        assert_eq!(text.matches(NO_SELECTION).count(), 6);
        assert!(text.contains("02/01/2019"));
        assert!(!text.contains("la sucursal"));
    }

    #[test]
    fn test_empty_view_shows_no_data_in_every_selected_panel() {
        colored::control::set_override(false);
        let rows = vec![
            txn(date(2019, 1, 1), ProductLine::FoodAndBeverages, 10.0),
            txn(date(2019, 1, 2), ProductLine::FoodAndBeverages, 5.0),
        ];
        let ds = Dataset::from_reader(csv_text(&rows).as_bytes(), "mem.csv").unwrap();
        let day_two = crate::models::DateRange::new(date(2019, 1, 2), date(2019, 1, 2)).unwrap();
        let health = CategorySelection::from_labels(&["Health and beauty"]).unwrap();
        let text = format_report(&render(&ds, &day_two, &health).unwrap());
        assert_eq!(text.matches(NO_DATA).count(), 6);
        assert!(!text.contains("Transacciones"));
    }

    #[test]
    fn test_zeroed_payment_counts_are_no_data() {
        colored::control::set_override(false);
        let zero = [PaymentCount {
            method: "Cash".into(),
            count: 0,
        }];
        assert_eq!(format_payments(&zero), NO_DATA);
    }

    #[test]
    fn test_revenue_table_rows() {
        colored::control::set_override(false);
        let out = format_revenue_by_line(&[
            LineRevenue {
                product_line: ProductLine::HealthAndBeauty,
                total: 20.0,
            },
            LineRevenue {
                product_line: ProductLine::FoodAndBeverages,
                total: 1234.5,
            },
        ]);
        assert!(out.contains("Health and beauty"));
        assert!(out.contains("$1,234.50"));
        assert_eq!(format_revenue_by_line(&[]), NO_DATA);
    }
}

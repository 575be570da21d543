use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset as Series, GraphType,
        Paragraph, Row, Sparkline, Table,
    },
    Frame,
};

use crate::aggregate::{
    BranchProfit, CorrelationMatrix, CostProfit, CustomerSpend, DailyRevenue, LineRevenue,
    PaymentCount, RatingDistribution,
};
use crate::captions::{self, ChartKind, NO_DATA, NO_SELECTION, ROW_COUNT};
use crate::error::Result;
use crate::fmt::{coefficient, compact_money, day, money, number};
use crate::loader::{self, Dataset};
use crate::models::{CategorySelection, DateRange, ProductLine};
use crate::pipeline::{self, Panel, Rendered};
use crate::stats::BoxStats;
use crate::tui::{
    contrast_text, coolwarm, palette, run_view, wrap_text, InteractiveView, ViewAction,
    AMOUNT_STYLE, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE, INFO_STYLE, SELECTED_STYLE,
    TITLE_STYLE,
};

const SIDEBAR_WIDTH: u16 = 34;
const WEEK: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Start,
    End,
    Lines,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Lines,
            Self::Lines => Self::Start,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Start => Self::Lines,
            Self::End => Self::Start,
            Self::Lines => Self::End,
        }
    }
}

/// Sidebar filter state plus the last rendered frame. Every filter change
/// reruns the whole pipeline against the shared dataset.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    range: DateRange,
    selection: CategorySelection,
    focus: Focus,
    cursor: usize,
    row: usize,
    rendered: Option<Rendered>,
    status_message: Option<String>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let range = dataset.full_range();
        let mut dashboard = Self {
            dataset,
            range,
            selection: CategorySelection::all(),
            focus: Focus::Start,
            cursor: 0,
            row: 1,
            rendered: None,
            status_message: None,
        };
        dashboard.rerender();
        dashboard
    }

    fn rerender(&mut self) {
        match pipeline::render(&self.dataset, &self.range, &self.selection) {
            Ok(rendered) => {
                self.rendered = Some(rendered);
                self.status_message = None;
            }
            Err(e) => {
                tracing::warn!("render failed: {e}");
                self.rendered = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Move the focused date by `days`, keeping it inside the dataset bounds
    /// and never letting start pass end.
    fn shift_focused_date(&mut self, days: i64) -> bool {
        let before = self.range;
        match self.focus {
            Focus::Start => {
                self.range.start =
                    clamp_date(self.range.start + Duration::days(days), self.dataset.min_date(), self.range.end);
            }
            Focus::End => {
                self.range.end =
                    clamp_date(self.range.end + Duration::days(days), self.range.start, self.dataset.max_date());
            }
            Focus::Lines => return false,
        }
        self.range != before
    }

    fn handle(&mut self, code: KeyCode) -> ViewAction {
        let changed = match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                false
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                false
            }
            KeyCode::Left => self.shift_focused_date(-1),
            KeyCode::Right => self.shift_focused_date(1),
            KeyCode::PageUp => self.shift_focused_date(-WEEK),
            KeyCode::PageDown => self.shift_focused_date(WEEK),
            KeyCode::Up if self.focus == Focus::Lines => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Down if self.focus == Focus::Lines => {
                self.cursor = (self.cursor + 1).min(ProductLine::MENU_ORDER.len() - 1);
                false
            }
            KeyCode::Char(' ') | KeyCode::Enter if self.focus == Focus::Lines => {
                self.selection.toggle(ProductLine::MENU_ORDER[self.cursor]);
                true
            }
            KeyCode::Char('a') => {
                self.selection = CategorySelection::all();
                true
            }
            KeyCode::Char('x') => {
                self.selection = CategorySelection::none();
                true
            }
            KeyCode::Char('r') => {
                self.range = self.dataset.full_range();
                self.selection = CategorySelection::all();
                true
            }
            KeyCode::Char('n') => {
                self.row = self.row % ROW_COUNT + 1;
                false
            }
            KeyCode::Char('p') => {
                self.row = (self.row + ROW_COUNT - 2) % ROW_COUNT + 1;
                false
            }
            KeyCode::Char(c @ '1'..='5') => {
                self.row = c as usize - '0' as usize;
                false
            }
            _ => false,
        };
        if changed {
            self.rerender();
        }
        ViewAction::Continue
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw_frame(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, sep_area, body_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", captions::DASHBOARD_TITLE)).style(HEADER_STYLE),
            header_area,
        );
        frame.render_widget(
            Paragraph::new("━".repeat(area.width as usize)).style(FOOTER_STYLE),
            sep_area,
        );

        let [sidebar_area, main_area] = Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(body_area);
        self.draw_sidebar(frame, sidebar_area);

        match (&self.rendered, &self.status_message) {
            (Some(rendered), _) => self.draw_main(frame, main_area, rendered),
            (None, Some(msg)) => {
                frame.render_widget(Paragraph::new(msg.as_str()).style(ERROR_STYLE), main_area)
            }
            (None, None) => {}
        }

        let hints = format!(
            " Tab focus  ←/→ day  PgUp/PgDn week  Space toggle  a all  x none  1-5/n/p row {}/{}  r reset  q quit",
            self.row, ROW_COUNT
        );
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect) {
        let focused = |f: Focus| {
            if self.focus == f {
                SELECTED_STYLE
            } else {
                Style::default()
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(captions::DATE_RANGE_LABEL, TITLE_STYLE)),
            Line::from(vec![
                Span::raw(" Desde  "),
                Span::styled(format!("◀ {} ▶", day(self.range.start)), focused(Focus::Start)),
            ]),
            Line::from(vec![
                Span::raw(" Hasta  "),
                Span::styled(format!("◀ {} ▶", day(self.range.end)), focused(Focus::End)),
            ]),
            Line::from(Span::styled(
                format!(
                    " {} – {}",
                    day(self.dataset.min_date()),
                    day(self.dataset.max_date())
                ),
                FOOTER_STYLE,
            )),
            Line::from(""),
            Line::from(Span::styled(captions::PRODUCT_LINES_LABEL, TITLE_STYLE)),
        ];

        for (i, line) in ProductLine::MENU_ORDER.iter().enumerate() {
            let mark = if self.selection.contains(*line) { "[x]" } else { "[ ]" };
            let style = if self.focus == Focus::Lines && self.cursor == i {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!(" {mark} {}", line.label()), style)));
        }

        let block = Block::default()
            .title(captions::SIDEBAR_TITLE)
            .title_style(TITLE_STYLE)
            .borders(Borders::RIGHT)
            .border_style(FOOTER_STYLE);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_main(&self, frame: &mut Frame, area: Rect, rendered: &Rendered) {
        let [heading_area, cards_area, sep_area, charts_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(
                " {}",
                captions::metrics_heading(rendered.range.start, rendered.range.end)
            ))
            .style(TITLE_STYLE),
            heading_area,
        );
        draw_metric_cards(frame, cards_area, rendered);
        frame.render_widget(
            Paragraph::new("─".repeat(area.width as usize)).style(FOOTER_STYLE),
            sep_area,
        );

        let charts = captions::charts_in_row(self.row);
        let columns = Layout::horizontal(vec![Constraint::Ratio(1, charts.len() as u32); charts.len()])
            .spacing(2)
            .split(charts_area);
        for (kind, col) in charts.iter().zip(columns.iter()) {
            draw_chart_cell(frame, *col, *kind, rendered);
        }
    }
}

impl InteractiveView for Dashboard {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_frame(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        self.handle(code)
    }
}

fn clamp_date(date: NaiveDate, lo: NaiveDate, hi: NaiveDate) -> NaiveDate {
    date.max(lo).min(hi)
}

fn draw_metric_cards(frame: &mut Frame, area: Rect, rendered: &Rendered) {
    let m = &rendered.metrics;
    let cards = [
        (captions::METRIC_REVENUE, money(m.total_revenue)),
        (captions::METRIC_UNITS, number(m.total_units)),
        (captions::METRIC_AVG_PER_DAY, format!("{:.1}", m.avg_per_day)),
    ];
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    for ((label, value), col) in cards.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(format!(" {label}"), FOOTER_STYLE)),
            Line::from(Span::styled(format!(" {value}"), AMOUNT_STYLE)),
        ];
        frame.render_widget(Paragraph::new(lines), *col);
    }
}

/// Title on top, chart in the middle, caption below.
fn draw_chart_cell(frame: &mut Frame, area: Rect, kind: ChartKind, rendered: &Rendered) {
    let caption = caption_text(kind, rendered);
    let (wrapped, caption_height) = wrap_text(&caption, area.width as usize);
    let [title_area, chart_area, caption_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(caption_height),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(kind.title(), TITLE_STYLE)),
        title_area,
    );
    frame.render_widget(Paragraph::new(wrapped).style(FOOTER_STYLE), caption_area);

    match kind {
        ChartKind::DailyRevenue => draw_daily_revenue(frame, chart_area, &rendered.daily_revenue, &rendered.range),
        ChartKind::RevenueByLine => {
            with_panel(frame, chart_area, &rendered.revenue_by_line, draw_revenue_by_line)
        }
        ChartKind::RatingDistribution => {
            with_panel(frame, chart_area, &rendered.rating_distribution, draw_rating)
        }
        ChartKind::SpendByCustomerType => {
            with_panel(frame, chart_area, &rendered.spend_by_customer_type, draw_spend)
        }
        ChartKind::CostVsProfit => {
            with_panel(frame, chart_area, &rendered.cost_vs_profit, draw_cost_vs_profit)
        }
        ChartKind::PaymentMethods => {
            with_panel(frame, chart_area, &rendered.payment_methods, draw_payments)
        }
        ChartKind::Correlation => draw_correlation(frame, chart_area, &rendered.correlation),
        ChartKind::BranchProfit => {
            with_panel(frame, chart_area, &rendered.branch_profit, draw_branch_profit)
        }
    }
}

fn caption_text(kind: ChartKind, rendered: &Rendered) -> String {
    if let Some(text) = kind.caption() {
        if !kind.needs_selection() || !rendered.selection.is_empty() {
            return text.to_string();
        }
        return String::new();
    }
    match &rendered.branch_profit {
        Panel::Ready(pivot) => pivot
            .insight
            .as_ref()
            .map(captions::branch_insight_text)
            .unwrap_or_default(),
        Panel::NothingSelected => String::new(),
    }
}

fn with_panel<T>(
    frame: &mut Frame,
    area: Rect,
    panel: &Panel<T>,
    draw: impl FnOnce(&mut Frame, Rect, &T),
) {
    match panel {
        Panel::Ready(data) => draw(frame, area, data),
        Panel::NothingSelected => frame.render_widget(
            Paragraph::new(format!("ℹ {NO_SELECTION}")).style(INFO_STYLE),
            area,
        ),
    }
}

fn no_data(frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new(NO_DATA).style(INFO_STYLE), area);
}

/// Three evenly spaced axis labels over `[lo, hi]`.
fn axis_labels(lo: f64, hi: f64, fmt: impl Fn(f64) -> String) -> Vec<String> {
    vec![fmt(lo), fmt((lo + hi) / 2.0), fmt(hi)]
}

fn upper_bound(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn draw_daily_revenue(frame: &mut Frame, area: Rect, series: &[DailyRevenue], range: &DateRange) {
    if series.is_empty() {
        return no_data(frame, area);
    }
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|d| ((d.date - range.start).num_days() as f64, d.total))
        .collect();
    let span = ((range.end - range.start).num_days() as f64).max(1.0);
    let y_max = upper_bound(series.iter().map(|d| d.total).fold(0.0, f64::max));
    let start = range.start;
    let date_label = move |offset: f64| {
        (start + Duration::days(offset.round() as i64))
            .format("%d/%m")
            .to_string()
    };

    let chart = Chart::new(vec![Series::default()
        .name("Total")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette(2)))
        .data(&points)])
    .x_axis(
        Axis::default()
            .title("Fecha")
            .style(FOOTER_STYLE)
            .bounds([0.0, span])
            .labels(axis_labels(0.0, span, date_label)),
    )
    .y_axis(
        Axis::default()
            .title("Ventas $")
            .style(FOOTER_STYLE)
            .bounds([0.0, y_max])
            .labels(axis_labels(0.0, y_max, compact_money)),
    );
    frame.render_widget(chart, area);
}

fn draw_revenue_by_line(frame: &mut Frame, area: Rect, items: &Vec<LineRevenue>) {
    if items.is_empty() {
        return no_data(frame, area);
    }
    let bars: Vec<Bar> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Bar::default()
                .value(item.total.max(0.0).round() as u64)
                .label(Line::from(item.product_line.label()))
                .text_value(money(item.total))
                .style(Style::default().fg(palette(i)))
                .value_style(Style::default().fg(Color::Black).bg(palette(i)))
        })
        .collect();
    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_rating(frame: &mut Frame, area: Rect, dist: &RatingDistribution) {
    if dist.bins.is_empty() {
        return no_data(frame, area);
    }
    let [hist_area, density_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(area);

    let bar_width = (hist_area.width / dist.bins.len() as u16).saturating_sub(1).max(1);
    let bars: Vec<Bar> = dist
        .bins
        .iter()
        .map(|b| {
            Bar::default()
                .value(b.count as u64)
                .label(Line::from(format!("{:.1}", b.lower)))
                .style(Style::default().fg(palette(1)))
        })
        .collect();
    let hist = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(hist, hist_area);

    if !dist.density.is_empty() {
        let curve: Vec<u64> = dist.density.iter().map(|p| (p.y * 100.0).round() as u64).collect();
        let sparkline = Sparkline::default()
            .block(Block::default().title("Densidad").title_style(FOOTER_STYLE))
            .data(&curve)
            .style(Style::default().fg(palette(3)));
        frame.render_widget(sparkline, density_area);
    }
}

/// Render a horizontal box plot on a `width`-column axis spanning `[lo, hi]`:
/// whiskers `├─ ─┤`, box `█`, median `│`, outliers `•`.
pub(crate) fn box_line(stats: &BoxStats, lo: f64, hi: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    let col = |v: f64| -> usize {
        let pos = ((v - lo) / span * (width - 1) as f64).round();
        (pos.max(0.0) as usize).min(width - 1)
    };

    let mut cells = vec![' '; width];
    let (wl, q1, med, q3, wh) = (
        col(stats.whisker_low),
        col(stats.q1),
        col(stats.median),
        col(stats.q3),
        col(stats.whisker_high),
    );
    for c in cells.iter_mut().take(wh + 1).skip(wl) {
        *c = '─';
    }
    for c in cells.iter_mut().take(q3 + 1).skip(q1) {
        *c = '█';
    }
    cells[wl] = '├';
    cells[wh] = '┤';
    cells[med] = '│';
    for o in &stats.outliers {
        cells[col(*o)] = '•';
    }
    cells.into_iter().collect()
}

fn draw_spend(frame: &mut Frame, area: Rect, groups: &Vec<CustomerSpend>) {
    if groups.is_empty() {
        return no_data(frame, area);
    }
    let hi = groups
        .iter()
        .flat_map(|g| g.summary.outliers.iter().copied().chain([g.summary.whisker_high]))
        .fold(0.0, f64::max);
    let label_width = 8usize;
    let axis_width = (area.width as usize).saturating_sub(label_width + 1);

    let mut lines = Vec::new();
    for (i, g) in groups.iter().enumerate() {
        let s = &g.summary;
        lines.push(Line::from(vec![
            Span::raw(format!("{:<label_width$} ", g.customer_type.label())),
            Span::styled(box_line(s, 0.0, hi, axis_width), Style::default().fg(palette(i * 3))),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "{:<label_width$} med {}  Q1 {}  Q3 {}  atípicos {}",
                "",
                money(s.median),
                money(s.q1),
                money(s.q3),
                s.outliers.len()
            ),
            FOOTER_STYLE,
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{:<label_width$} $0{:>width$}",
            "Gasto",
            compact_money(hi),
            width = axis_width.saturating_sub(2)
        ),
        FOOTER_STYLE,
    )));
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_cost_vs_profit(frame: &mut Frame, area: Rect, pairs: &Vec<CostProfit>) {
    if pairs.is_empty() {
        return no_data(frame, area);
    }
    let points: Vec<(f64, f64)> = pairs.iter().map(|p| (p.cogs, p.gross_income)).collect();
    let x_max = upper_bound(pairs.iter().map(|p| p.cogs).fold(0.0, f64::max));
    let y_max = upper_bound(pairs.iter().map(|p| p.gross_income).fold(0.0, f64::max));

    let chart = Chart::new(vec![Series::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(palette(2)))
        .data(&points)])
    .x_axis(
        Axis::default()
            .title("Costo por unidad")
            .style(FOOTER_STYLE)
            .bounds([0.0, x_max])
            .labels(axis_labels(0.0, x_max, compact_money)),
    )
    .y_axis(
        Axis::default()
            .title("Ganancia Bruta")
            .style(FOOTER_STYLE)
            .bounds([0.0, y_max])
            .labels(axis_labels(0.0, y_max, compact_money)),
    );
    frame.render_widget(chart, area);
}

fn draw_payments(frame: &mut Frame, area: Rect, counts: &Vec<PaymentCount>) {
    if !has_payments(counts) {
        return no_data(frame, area);
    }
    let bar_width = (area.width / counts.len().max(1) as u16).saturating_sub(2).clamp(1, 14);
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::default()
                .value(c.count as u64)
                .label(Line::from(c.method.as_str()))
                .style(Style::default().fg(palette(i * 2)))
        })
        .collect();
    let chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_correlation(frame: &mut Frame, area: Rect, matrix: &CorrelationMatrix) {
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(matrix.columns.iter().map(|c| Cell::from(short(c.label())))),
    )
    .style(FOOTER_STYLE.add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = matrix
        .columns
        .iter()
        .zip(&matrix.values)
        .map(|(col, values)| {
            let cells = std::iter::once(Cell::from(short(col.label())).style(FOOTER_STYLE)).chain(
                values.iter().map(|v| {
                    let style = match v {
                        Some(v) => {
                            let (r, g, b) = coolwarm(*v);
                            Style::default().bg(Color::Rgb(r, g, b)).fg(contrast_text(r, g, b))
                        }
                        None => FOOTER_STYLE,
                    };
                    Cell::from(format!("{:>6}", coefficient(*v))).style(style)
                }),
            );
            Row::new(cells)
        })
        .collect();

    let widths = std::iter::once(Constraint::Length(8))
        .chain(matrix.columns.iter().map(|_| Constraint::Length(7)))
        .collect::<Vec<_>>();
    frame.render_widget(Table::new(rows, widths).header(header).column_spacing(1), area);
}

fn draw_branch_profit(frame: &mut Frame, area: Rect, pivot: &BranchProfit) {
    if pivot.branches.is_empty() {
        return no_data(frame, area);
    }
    let header = Row::new(
        std::iter::once(Cell::from("Sucursal"))
            .chain(
                pivot
                    .product_lines
                    .iter()
                    .enumerate()
                    .map(|(i, l)| Cell::from(short(l.label())).style(Style::default().fg(palette(i)))),
            )
            .chain(std::iter::once(Cell::from("Total"))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = pivot
        .branches
        .iter()
        .enumerate()
        .map(|(bi, branch)| {
            let is_best = pivot.insight.as_ref().is_some_and(|i| &i.branch == branch);
            let cells = std::iter::once(Cell::from(branch.clone()))
                .chain(pivot.values[bi].iter().map(|v| {
                    Cell::from(v.map(|v| format!("{v:.2}")).unwrap_or_default())
                }))
                .chain(std::iter::once(Cell::from(format!("{:.2}", pivot.row_total(bi)))));
            let row = Row::new(cells);
            if is_best {
                row.style(AMOUNT_STYLE)
            } else {
                row
            }
        })
        .collect();

    let widths = std::iter::once(Constraint::Length(9))
        .chain(pivot.product_lines.iter().map(|_| Constraint::Length(10)))
        .chain(std::iter::once(Constraint::Length(10)))
        .collect::<Vec<_>>();
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title("Ingreso Bruto $").title_style(FOOTER_STYLE));
    frame.render_widget(table, area);
}

/// Payment counts always list every method; all zeros means an empty view.
fn has_payments(counts: &[PaymentCount]) -> bool {
    counts.iter().any(|c| c.count > 0)
}

/// First word of a label, for narrow column headers.
fn short(label: &str) -> String {
    label.split_whitespace().next().unwrap_or(label).to_string()
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

pub fn run(data_path: &Path) -> Result<()> {
    let dataset = loader::load(data_path)?;
    let mut dashboard = Dashboard::new(dataset);
    run_view(&mut dashboard)
}

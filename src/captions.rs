//! Fixed on-screen text. Chart captions are written commentary, not derived
//! from the data, and are shown verbatim under their charts.

use crate::aggregate::BranchInsight;

pub const DASHBOARD_TITLE: &str = "🛒Dashboard Supermarket Sales";
pub const SIDEBAR_TITLE: &str = "Filtros del Dashboard📊";
pub const DATE_RANGE_LABEL: &str = "Rango de fechas";
pub const PRODUCT_LINES_LABEL: &str = "Líneas de Producto";
pub const NO_SELECTION: &str = "Seleccione al menos una Línea de Producto.";
pub const NO_DATA: &str = "Sin datos en el rango seleccionado.";

pub const METRIC_REVENUE: &str = "Monto Ventas Totales";
pub const METRIC_UNITS: &str = "Unidades Vendidas";
pub const METRIC_AVG_PER_DAY: &str = "Ventas Diarias Promedio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    DailyRevenue,
    RevenueByLine,
    RatingDistribution,
    SpendByCustomerType,
    CostVsProfit,
    PaymentMethods,
    Correlation,
    BranchProfit,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::DailyRevenue,
        ChartKind::RevenueByLine,
        ChartKind::RatingDistribution,
        ChartKind::SpendByCustomerType,
        ChartKind::CostVsProfit,
        ChartKind::PaymentMethods,
        ChartKind::Correlation,
        ChartKind::BranchProfit,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::DailyRevenue => "Evolución de las ventas totales",
            Self::RevenueByLine => "Ingresos por Línea de Producto",
            Self::RatingDistribution => "Distribución de Calificación",
            Self::SpendByCustomerType => "Comparación Gasto por Tipo de Cliente",
            Self::CostVsProfit => "Relación Costo y Ganancia Bruta",
            Self::PaymentMethods => "Métodos de Pago Preferidos",
            Self::Correlation => "Análisis de Correlación Numérica",
            Self::BranchProfit => "Composición Ingreso Bruto por Sucursal y Línea de Producto",
        }
    }

    /// Static commentary. The branch chart has none; its text comes from
    /// [`branch_insight_text`].
    pub fn caption(&self) -> Option<&'static str> {
        let text = match self {
            Self::DailyRevenue => "*El gráfico muestra la evolución de las ventas totales en el transcurso del tiempo, sin marcar una tendencia de mayores ventas.",
            Self::RevenueByLine => "*Se observa que los productos en general no presentan grandes diferencias de ingresos, pero los productos de 'Food and beverages' son los que más aportan a los ingresos y los que menos aportan son los de 'Health and beauty'.",
            Self::RatingDistribution => "*Se observa que las calificaciones de los usuarios son principalmente positivas, donde la mayor frecuencia se encuentra entre las notas 6 y 7.",
            Self::SpendByCustomerType => "*Se observa que ambos grupos de clientes presentan un gasto similar, pero que existen más out layers en el grupo normal, lo que supone que son clientes que se deben captar como miembros.",
            Self::CostVsProfit => "*Se observa que existe una relacion directamente proporcional, entre mayor sea el costo del producto, mayor es la ganancia bruta.",
            Self::PaymentMethods => "*No existe una preferencia absoluta o marcada por el tipo de pago, sin embargo se aprecia que 'Credit Card' es el medio de pago menos frecuente.",
            Self::Correlation => "*Se observa que existen 4 variables que están 100% correlacionadas, que son los costos (cogs), utilidad (gross income), precio total e impuesto (Tax). Estas variables a la vez tienen una correlación directa con el precio del producto junto a las unidades vendidas.",
            Self::BranchProfit => return None,
        };
        Some(text)
    }

    /// Visual row (1-5) the chart is laid out in.
    pub fn row(&self) -> usize {
        match self {
            Self::DailyRevenue => 1,
            Self::RevenueByLine => 2,
            Self::RatingDistribution | Self::SpendByCustomerType => 3,
            Self::CostVsProfit | Self::PaymentMethods => 4,
            Self::Correlation | Self::BranchProfit => 5,
        }
    }

    /// Whether an empty product-line selection replaces this chart with
    /// [`NO_SELECTION`].
    pub fn needs_selection(&self) -> bool {
        !matches!(self, Self::DailyRevenue | Self::Correlation)
    }
}

/// Charts laid out in visual row `row` (1-5), left to right.
pub fn charts_in_row(row: usize) -> Vec<ChartKind> {
    ChartKind::ALL.into_iter().filter(|c| c.row() == row).collect()
}

pub const ROW_COUNT: usize = 5;

pub fn metrics_heading(start: chrono::NaiveDate, end: chrono::NaiveDate) -> String {
    format!(
        "Métricas de ventas entre {} y {}",
        crate::fmt::day(start),
        crate::fmt::day(end)
    )
}

pub fn branch_insight_text(insight: &BranchInsight) -> String {
    format!(
        "*Se logra apreciar que la sucursal '{}' es la que posee un mayor ingreso bruto con un monto de ${:.2}, en donde la Línea de Producto '{}' posee el mayor retorno de la sucursal por monto de ${:.2}.",
        insight.branch, insight.branch_total, insight.product_line, insight.line_total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductLine;

    #[test]
    fn test_rows_cover_every_chart() {
        let total: usize = (1..=ROW_COUNT).map(|r| charts_in_row(r).len()).sum();
        assert_eq!(total, ChartKind::ALL.len());
        assert_eq!(charts_in_row(1), vec![ChartKind::DailyRevenue]);
        assert_eq!(
            charts_in_row(5),
            vec![ChartKind::Correlation, ChartKind::BranchProfit]
        );
    }

    #[test]
    fn test_only_series_and_correlation_ignore_selection() {
        let unconditional: Vec<ChartKind> = ChartKind::ALL
            .into_iter()
            .filter(|c| !c.needs_selection())
            .collect();
        assert_eq!(unconditional, vec![ChartKind::DailyRevenue, ChartKind::Correlation]);
    }

    #[test]
    fn test_branch_insight_sentence() {
        let text = branch_insight_text(&BranchInsight {
            branch: "A".into(),
            branch_total: 250.0,
            product_line: ProductLine::FoodAndBeverages,
            line_total: 150.0,
        });
        assert!(text.contains("la sucursal 'A'"));
        assert!(text.contains("monto de $250.00"));
        assert!(text.contains("'Food and beverages' posee el mayor retorno"));
        assert!(text.ends_with("$150.00."));
    }

    #[test]
    fn test_metrics_heading_uses_day_first_dates() {
        let start = chrono::NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2019, 3, 30).unwrap();
        assert_eq!(
            metrics_heading(start, end),
            "Métricas de ventas entre 01/01/2019 y 30/03/2019"
        );
    }
}

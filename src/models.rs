use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SalesError};

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Merchandise category. Variants are declared alphabetically so the derived
/// ordering matches group-by key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    #[serde(rename = "Electronic accessories")]
    ElectronicAccessories,
    #[serde(rename = "Fashion accessories")]
    FashionAccessories,
    #[serde(rename = "Food and beverages")]
    FoodAndBeverages,
    #[serde(rename = "Health and beauty")]
    HealthAndBeauty,
    #[serde(rename = "Home and lifestyle")]
    HomeAndLifestyle,
    #[serde(rename = "Sports and travel")]
    SportsAndTravel,
}

impl ProductLine {
    /// Order in which the product-line picker lists its options.
    pub const MENU_ORDER: [ProductLine; 6] = [
        ProductLine::HealthAndBeauty,
        ProductLine::ElectronicAccessories,
        ProductLine::HomeAndLifestyle,
        ProductLine::SportsAndTravel,
        ProductLine::FoodAndBeverages,
        ProductLine::FashionAccessories,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ElectronicAccessories => "Electronic accessories",
            Self::FashionAccessories => "Fashion accessories",
            Self::FoodAndBeverages => "Food and beverages",
            Self::HealthAndBeauty => "Health and beauty",
            Self::HomeAndLifestyle => "Home and lifestyle",
            Self::SportsAndTravel => "Sports and travel",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(raw: &str) -> Result<Self> {
        let wanted = raw.trim();
        Self::MENU_ORDER
            .iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| SalesError::UnknownProductLine(raw.to_string()))
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Member,
    Normal,
}

impl CustomerType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Normal => "Normal",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Transaction row
// ---------------------------------------------------------------------------

/// One sale. Field names map onto the dataset's CSV headers; unlisted
/// columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Product line")]
    pub product_line: ProductLine,
    #[serde(rename = "Unit price")]
    pub unit_price: f64,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Tax 5%")]
    pub tax: f64,
    #[serde(rename = "Total")]
    pub total: f64,
    #[serde(rename = "cogs")]
    pub cogs: f64,
    #[serde(rename = "gross income")]
    pub gross_income: f64,
    #[serde(rename = "Customer type")]
    pub customer_type: CustomerType,
    #[serde(rename = "Payment")]
    pub payment_method: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
}

/// Parse a `Date` cell. Accepts M/D/YYYY, ISO dates, and ISO date-times
/// (time of day is dropped).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("unparseable date: {raw:?}")))
}

/// Parse a command-line date (YYYY-MM-DD only).
pub fn parse_cli_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SalesError::InvalidDate(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Filter inputs
// ---------------------------------------------------------------------------

/// Inclusive calendar-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SalesError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn day_span(&self) -> Result<i64> {
        if self.start > self.end {
            return Err(SalesError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok((self.end - self.start).num_days() + 1)
    }
}

/// The set of product lines chosen in the picker. Empty is a legal state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategorySelection(BTreeSet<ProductLine>);

impl CategorySelection {
    pub fn all() -> Self {
        ProductLine::MENU_ORDER.into_iter().collect()
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        labels
            .iter()
            .map(|l| ProductLine::from_label(l.as_ref()))
            .collect::<Result<BTreeSet<_>>>()
            .map(Self)
    }

    pub fn contains(&self, line: ProductLine) -> bool {
        self.0.contains(&line)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn toggle(&mut self, line: ProductLine) {
        if !self.0.remove(&line) {
            self.0.insert(line);
        }
    }
}

impl FromIterator<ProductLine> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = ProductLine>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("1/5/2019"), Some(d(2019, 1, 5)));
        assert_eq!(parse_date("03/08/2019"), Some(d(2019, 3, 8)));
        assert_eq!(parse_date("2019-02-28"), Some(d(2019, 2, 28)));
        assert_eq!(parse_date("2019-02-28 13:08:00"), Some(d(2019, 2, 28)));
        assert_eq!(parse_date("2019-02-28T23:59:59"), Some(d(2019, 2, 28)));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("13/01/2019"), None);
    }

    #[test]
    fn test_parse_cli_date_is_iso_only() {
        assert_eq!(parse_cli_date("2019-01-03").unwrap(), d(2019, 1, 3));
        assert!(matches!(parse_cli_date("1/3/2019"), Err(SalesError::InvalidDate(_))));
    }

    #[test]
    fn test_product_line_ordering_is_alphabetical() {
        let mut lines = ProductLine::MENU_ORDER.to_vec();
        lines.sort();
        let labels: Vec<&str> = lines.iter().map(|l| l.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_product_line_from_label_ignores_case() {
        assert_eq!(
            ProductLine::from_label("food AND beverages").unwrap(),
            ProductLine::FoodAndBeverages
        );
        assert!(matches!(
            ProductLine::from_label("Groceries"),
            Err(SalesError::UnknownProductLine(_))
        ));
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        assert!(DateRange::new(d(2019, 1, 2), d(2019, 1, 1)).is_err());
        let single = DateRange::new(d(2019, 1, 1), d(2019, 1, 1)).unwrap();
        assert_eq!(single.day_span().unwrap(), 1);
        assert!(single.contains(d(2019, 1, 1)));
        assert!(!single.contains(d(2019, 1, 2)));
    }

    #[test]
    fn test_day_span_guards_unchecked_inversion() {
        let inverted = DateRange {
            start: d(2019, 3, 1),
            end: d(2019, 1, 1),
        };
        assert!(matches!(inverted.day_span(), Err(SalesError::InvalidRange { .. })));
    }

    #[test]
    fn test_category_selection_toggle() {
        let mut sel = CategorySelection::all();
        assert_eq!(sel.len(), 6);
        sel.toggle(ProductLine::HealthAndBeauty);
        assert!(!sel.contains(ProductLine::HealthAndBeauty));
        sel.toggle(ProductLine::HealthAndBeauty);
        assert!(sel.contains(ProductLine::HealthAndBeauty));
        assert!(CategorySelection::none().is_empty());
    }
}

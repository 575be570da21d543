use crate::loader::Dataset;
use crate::models::{CategorySelection, DateRange, Transaction};

/// Read-only projection of dataset rows. Borrowed from the dataset and
/// rebuilt on every render; never mutated.
#[derive(Debug, Clone, Default)]
pub struct View<'a> {
    rows: Vec<&'a Transaction>,
}

impl<'a> View<'a> {
    pub fn new(rows: Vec<&'a Transaction>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.rows.iter().copied()
    }

    fn retain(&self, keep: impl Fn(&Transaction) -> bool) -> View<'a> {
        View::new(self.rows.iter().copied().filter(|t| keep(*t)).collect())
    }
}

/// Rows whose date falls inside `range`, both ends included.
pub fn filter_by_date<'a>(dataset: &'a Dataset, range: &DateRange) -> View<'a> {
    dataset.all().retain(|t| range.contains(t.date))
}

/// Rows whose product line is selected. An empty selection yields an
/// empty view.
pub fn filter_by_category<'a>(view: &View<'a>, selection: &CategorySelection) -> View<'a> {
    if selection.is_empty() {
        return View::default();
    }
    view.retain(|t| selection.contains(t.product_line))
}

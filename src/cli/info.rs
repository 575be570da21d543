use std::collections::BTreeSet;
use std::path::Path;

use crate::aggregate::payment_order;
use crate::error::Result;
use crate::fmt::{day, money, number};
use crate::loader::{self, Dataset};

pub fn format_info(dataset: &Dataset) -> String {
    let branches: BTreeSet<&str> = dataset.rows().iter().map(|t| t.branch.as_str()).collect();
    let revenue: f64 = dataset.rows().iter().map(|t| t.total).sum();
    let span = (dataset.max_date() - dataset.min_date()).num_days() + 1;

    let mut out = String::new();
    out.push_str(&format!("Source:     {}\n", dataset.source().display()));
    out.push_str(&format!("Key:        {}\n", dataset.content_key()));
    out.push_str(&format!("Rows:       {}\n", number(dataset.len() as u64)));
    out.push_str(&format!(
        "Dates:      {} – {} ({span} days)\n",
        day(dataset.min_date()),
        day(dataset.max_date())
    ));
    out.push_str(&format!("Revenue:    {}\n", money(revenue)));
    out.push_str(&format!(
        "Branches:   {}\n",
        branches.into_iter().collect::<Vec<_>>().join(", ")
    ));
    out.push_str(&format!("Payments:   {}", payment_order(dataset).join(", ")));
    out
}

pub fn run(data_path: &Path) -> Result<()> {
    let dataset = loader::load(data_path)?;
    println!("{}", format_info(&dataset));
    Ok(())
}

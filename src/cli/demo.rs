use std::io::Write;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SalesError};
use crate::models::ProductLine;

const HEADER: [&str; 17] = [
    "Invoice ID",
    "Branch",
    "City",
    "Customer type",
    "Gender",
    "Product line",
    "Unit price",
    "Quantity",
    "Tax 5%",
    "Total",
    "Date",
    "Time",
    "Payment",
    "cogs",
    "gross margin percentage",
    "gross income",
    "Rating",
];

const BRANCHES: &[(&str, &str)] = &[("A", "Yangon"), ("B", "Mandalay"), ("C", "Naypyitaw")];
const CUSTOMER_TYPES: &[&str] = &["Member", "Normal"];
const GENDERS: &[&str] = &["Female", "Male"];
const PAYMENTS: &[&str] = &["Ewallet", "Cash", "Credit card"];
const TAX_RATE: f64 = 0.05;
/// First quarter of 2019, like the reference supermarket dataset.
const DAYS: i64 = 89;

fn round_to(val: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (val * f).round() / f
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Write `rows` synthetic sales. Totals are internally consistent:
/// cogs = price × qty, tax = 5% of cogs, total = cogs + tax, gross income = tax.
pub fn generate<W: Write>(out: W, rows: usize, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1)
        .ok_or_else(|| SalesError::Other("bad demo start date".into()))?;
    let margin = format!("{:.9}", TAX_RATE / (1.0 + TAX_RATE) * 100.0);

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for _ in 0..rows {
        let (branch, city) = BRANCHES[rng.gen_range(0..BRANCHES.len())];
        let line = ProductLine::MENU_ORDER[rng.gen_range(0..ProductLine::MENU_ORDER.len())];
        let unit_price = round_to(rng.gen_range(10.0..100.0), 2);
        let quantity: u32 = rng.gen_range(1..=10);
        let cogs = round_to(unit_price * quantity as f64, 2);
        let tax = round_to(cogs * TAX_RATE, 4);
        let total = round_to(cogs + tax, 4);
        let date = first_day + Duration::days(rng.gen_range(0..=DAYS));
        let time = format!("{:02}:{:02}", rng.gen_range(10..21), rng.gen_range(0..60));
        let invoice = format!(
            "{:03}-{:02}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(10..100),
            rng.gen_range(1000..10000)
        );
        let rating = round_to(rng.gen_range(4.0..=10.0), 1);

        wtr.write_record([
            invoice,
            branch.to_string(),
            city.to_string(),
            pick(&mut rng, CUSTOMER_TYPES).to_string(),
            pick(&mut rng, GENDERS).to_string(),
            line.label().to_string(),
            format!("{unit_price:.2}"),
            quantity.to_string(),
            format!("{tax:.4}"),
            format!("{total:.4}"),
            date.format("%-m/%-d/%Y").to_string(),
            time,
            pick(&mut rng, PAYMENTS).to_string(),
            format!("{cogs:.2}"),
            margin.clone(),
            format!("{tax:.4}"),
            format!("{rating:.1}"),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run(output: &str, rows: usize, seed: u64, force: bool) -> Result<()> {
    if rows == 0 {
        return Err(SalesError::Other("--rows must be at least 1".into()));
    }
    let path = Path::new(output);
    if path.exists() && !force {
        return Err(SalesError::Other(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    generate(std::io::BufWriter::new(file), rows, seed)?;

    tracing::info!(rows, seed, path = %path.display(), "demo data written");
    println!("Wrote {rows} demo transactions to {}", path.display());
    println!("Run `salesdash --data {}` to explore them.", path.display());
    Ok(())
}

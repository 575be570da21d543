pub mod dashboard;
pub mod demo;
pub mod export;
pub mod info;
pub mod load;
pub mod report;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::Result;
use crate::loader::Dataset;
use crate::models::{parse_cli_date, CategorySelection, DateRange};

#[derive(Parser)]
#[command(
    name = "salesdash",
    version,
    about = "Terminal dashboard for exploring supermarket sales data."
)]
pub struct Cli {
    /// Path to the sales CSV (default: $SALESDASH_DATA, saved setting, or ./data.csv)
    #[arg(long, global = true)]
    pub data: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard (default).
    Dashboard,
    /// Print metrics and every chart's data as text tables.
    Report {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write metrics and chart data to a JSON file.
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file path (default: ./salesdash-YYYY-MM-DD.json)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved dataset and a summary of its contents.
    Info,
    /// Write a synthetic supermarket sales CSV to explore salesdash.
    Demo {
        /// Output file path
        #[arg(long, default_value = crate::settings::DEFAULT_DATA_FILE)]
        output: String,
        /// Number of transactions to generate
        #[arg(long, default_value_t = 1000)]
        rows: usize,
        /// Random seed; the same seed always produces the same file
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,
    },
    /// Remember a dataset path as the default.
    Load {
        /// Path to a sales CSV
        path: String,
    },
}

/// Date-range and product-line filters shared by `report` and `export`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// First day to include, YYYY-MM-DD (default: earliest date in the data)
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// Last day to include, YYYY-MM-DD (default: latest date in the data)
    #[arg(long = "to")]
    pub to_date: Option<String>,
    /// Product line to include; repeat for several (default: all)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Select no product lines
    #[arg(long = "no-categories", conflicts_with = "categories")]
    pub no_categories: bool,
}

impl FilterArgs {
    pub fn range(&self, dataset: &Dataset) -> Result<DateRange> {
        let start = match &self.from_date {
            Some(raw) => parse_cli_date(raw)?,
            None => dataset.min_date(),
        };
        let end = match &self.to_date {
            Some(raw) => parse_cli_date(raw)?,
            None => dataset.max_date(),
        };
        DateRange::new(start, end)
    }

    pub fn selection(&self) -> Result<CategorySelection> {
        if self.no_categories {
            Ok(CategorySelection::none())
        } else if self.categories.is_empty() {
            Ok(CategorySelection::all())
        } else {
            CategorySelection::from_labels(&self.categories)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesError;
    use crate::loader::fixtures::*;
    use crate::models::ProductLine;

    fn dataset() -> Dataset {
        let rows = vec![
            txn(date(2019, 1, 1), ProductLine::FoodAndBeverages, 10.0),
            txn(date(2019, 3, 30), ProductLine::HealthAndBeauty, 20.0),
        ];
        Dataset::from_reader(csv_text(&rows).as_bytes(), "mem.csv").unwrap()
    }

    #[test]
    fn test_defaults_cover_whole_dataset() {
        let ds = dataset();
        let args = FilterArgs::default();
        assert_eq!(args.range(&ds).unwrap(), ds.full_range());
        assert_eq!(args.selection().unwrap(), CategorySelection::all());
    }

    #[test]
    fn test_explicit_filters() {
        let ds = dataset();
        let args = FilterArgs {
            from_date: Some("2019-02-01".into()),
            to_date: None,
            categories: vec!["health and beauty".into()],
            no_categories: false,
        };
        let range = args.range(&ds).unwrap();
        assert_eq!(range.start, date(2019, 2, 1));
        assert_eq!(range.end, date(2019, 3, 30));
        let sel = args.selection().unwrap();
        assert_eq!(sel.len(), 1);
        assert!(sel.contains(ProductLine::HealthAndBeauty));
    }

    #[test]
    fn test_invalid_filters_are_rejected() {
        let ds = dataset();
        let inverted = FilterArgs {
            from_date: Some("2019-03-01".into()),
            to_date: Some("2019-02-01".into()),
            ..Default::default()
        };
        assert!(matches!(inverted.range(&ds), Err(SalesError::InvalidRange { .. })));

        let bad_date = FilterArgs {
            from_date: Some("01/02/2019".into()),
            ..Default::default()
        };
        assert!(matches!(bad_date.range(&ds), Err(SalesError::InvalidDate(_))));

        let bad_line = FilterArgs {
            categories: vec!["Toys".into()],
            ..Default::default()
        };
        assert!(matches!(bad_line.selection(), Err(SalesError::UnknownProductLine(_))));
    }

    #[test]
    fn test_no_categories_selects_nothing() {
        let args = FilterArgs {
            no_categories: true,
            ..Default::default()
        };
        assert!(args.selection().unwrap().is_empty());
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["salesdash", "report", "--data", "x.csv", "-vv", "--category", "Fashion accessories"]).unwrap();
        assert_eq!(cli.data.as_deref(), Some("x.csv"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Report { .. })));

        let bare = Cli::try_parse_from(["salesdash"]).unwrap();
        assert!(bare.command.is_none());
    }
}

pub mod text;

use std::path::Path;

use crate::cli::FilterArgs;
use crate::error::Result;
use crate::loader;
use crate::pipeline::{self, Rendered};

/// Load the dataset and run the pipeline for the requested filters.
pub(crate) fn render_filtered(data_path: &Path, filters: &FilterArgs) -> Result<Rendered> {
    let dataset = loader::load(data_path)?;
    let range = filters.range(&dataset)?;
    let selection = filters.selection()?;
    pipeline::render(&dataset, &range, &selection)
}

pub fn run(data_path: &Path, filters: &FilterArgs) -> Result<()> {
    let rendered = render_filtered(data_path, filters)?;
    println!("{}", text::format_report(&rendered));
    Ok(())
}

use std::path::{Path, PathBuf};

use crate::cli::report::render_filtered;
use crate::cli::FilterArgs;
use crate::error::Result;
use crate::pipeline::Rendered;

fn default_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    PathBuf::from(format!("salesdash-{date}.json"))
}

fn write_json(rendered: &Rendered, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(rendered)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn run(data_path: &Path, filters: &FilterArgs, output: Option<String>) -> Result<PathBuf> {
    let rendered = render_filtered(data_path, filters)?;
    let path = output.map(PathBuf::from).unwrap_or_else(default_path);
    write_json(&rendered, &path)?;
    tracing::info!(path = %path.display(), "export written");
    println!("Wrote {}", path.display());
    Ok(path)
}

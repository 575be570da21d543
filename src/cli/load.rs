use crate::error::Result;
use crate::loader;
use crate::settings::{load_settings, save_settings, shellexpand_path};

/// Validate the file by loading it, then remember it as the default dataset.
pub fn run(path: &str) -> Result<()> {
    let resolved = shellexpand_path(path);
    let dataset = loader::load(&resolved)?;

    let mut settings = load_settings();
    settings.data_file = Some(resolved.to_string_lossy().to_string());
    save_settings(&settings)?;

    println!(
        "Switched to {} ({} rows)",
        resolved.display(),
        dataset.len()
    );
    Ok(())
}

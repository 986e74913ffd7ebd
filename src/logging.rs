use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Send `tracing` output to `output_path`. The terminal belongs to the UI, so
/// without a log file nothing is installed and events are dropped.
pub fn init_file_logging(output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = Arc::new(File::create(output_path)?);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(file)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = std::env::temp_dir().join("loadline_log_test").join("nested");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("loadline.log");

        ensure_parent_dir(&path).unwrap();

        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(&dir);
    }
}

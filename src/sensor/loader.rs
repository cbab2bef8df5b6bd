//! Camera table loader
//!
//! Reads a user supplied camera table from disk without blocking the UI.
//! When no path is configured the embedded table is used instead.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::registry::SensorRegistry;
use crate::error::{CalcError, CalcResult};

/// Load the camera table from `path`, or the embedded one if `path` is `None`
pub async fn load_registry(path: Option<PathBuf>) -> CalcResult<SensorRegistry> {
    match path {
        Some(path) => load_registry_file(&path).await,
        None => SensorRegistry::embedded(),
    }
}

/// Read and parse a camera table file
pub async fn load_registry_file(path: &Path) -> CalcResult<SensorRegistry> {
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Could not read camera table");
        CalcError::Io(e)
    })?;

    let registry = SensorRegistry::from_json(&json)?;
    info!(path = %path.display(), cameras = registry.len(), "Using camera table from file");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_embedded_when_no_path() {
        let registry = load_registry(None).await.unwrap();
        assert_eq!(registry, SensorRegistry::embedded().unwrap());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Test Back": {{"sensor_w_mm": 53.4, "sensor_h_mm": 40.0, "sensor_w_px": 14204, "sensor_h_px": 10652}}}}"#
        )
        .unwrap();

        let registry = load_registry(Some(file.path().to_path_buf())).await.unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Test Back").unwrap().width_px, 14204);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_registry(Some(PathBuf::from("/nonexistent/cameras.json"))).await;
        assert!(matches!(result, Err(CalcError::Io(_))));
    }
}

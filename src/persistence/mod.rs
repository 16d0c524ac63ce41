use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use crate::core::CoachError;

const APP_NAME: &str = "sales-coach";

pub const SETTINGS_FILE: &str = "settings.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), CoachError> {
    let file_path = get_data_file_path(filename);
    write_json(data, &file_path)?;
    debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    filename: &str,
) -> Result<T, CoachError> {
    read_json(&get_data_file_path(filename))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

/// Writes `data` as pretty JSON to an arbitrary location, e.g. a path picked in
/// a save dialog.
pub fn export_json<T: Serialize>(data: &T, path: &Path) -> Result<(), CoachError> {
    write_json(data, path)?;
    info!("Exported to: {}", path.display());
    Ok(())
}

fn write_json<T: Serialize>(data: &T, path: &Path) -> Result<(), CoachError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T, CoachError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Data loaded from: {}", path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        config::{
            FallbackPolicy,
            SettingsData,
        },
        fallback::placeholder_result,
        history::AnalysisHistory,
    };

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings: SettingsData = read_json(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, SettingsData::default());
    }

    #[test]
    fn settings_survive_a_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = SettingsData {
            api_base_url: Some("http://coach.internal:9000".to_string()),
            fallback_policy: FallbackPolicy::Propagate,
        };

        write_json(&settings, &path).unwrap();
        let loaded: SettingsData = read_json(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn exported_report_is_snake_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_json(&placeholder_result("pitch.mp4"), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["filename"], "pitch.mp4");
        assert_eq!(value["analysis"]["overall_score"], 78.0);
        assert!(value["analysis"]["coaching_feedback"]["strengths"].is_array());
    }

    #[test]
    fn corrupt_history_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyses.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read_json::<AnalysisHistory>(&path), Err(CoachError::Json(_))));
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub version: String,
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub table: TableSettings,
    #[serde(default)]
    pub connection: ConnectionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            general: GeneralSettings::default(),
            table: TableSettings::default(),
            connection: ConnectionSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralSettings {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    pub uncategorized_label: String,
    /// chrono format for table cells and cards.
    pub date_format: String,
    /// chrono format for the details view.
    pub long_date_format: String,
    pub error_rate_threshold: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            uncategorized_label: "Uncategorized".to_string(),
            date_format: "%d/%m/%Y %H:%M".to_string(),
            long_date_format: "%b %-d, %Y at %-I:%M %p".to_string(),
            error_rate_threshold: default_error_rate_threshold(),
        }
    }
}

fn default_error_rate_threshold() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionSettings {
    pub test_delay_ms: u64,
    pub api_url: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            test_delay_ms: 1000,
            api_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let json = r#"{"version":"1.0.0","table":{"uncategorized_label":"Non classé"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.table.uncategorized_label, "Non classé");
        assert_eq!(settings.table.error_rate_threshold, 2.0);
        assert_eq!(settings.table.date_format, "%d/%m/%Y %H:%M");
        assert_eq!(settings.general.view_mode, ViewMode::Grid);
        assert_eq!(settings.connection.test_delay_ms, 1000);
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}

use crate::core::{BoundaryPolicy, SetupError};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "TURTLES";

/// Налаштування процесу: необов'язковий файл плюс змінні `TURTLES_*`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// `pass`, `stop` або `portal`; якщо не задано, діє `pass`.
    pub boundary: Option<String>,
    /// Друкувати всі маршрути в JSON після звіту.
    pub print_runs: bool,
    pub report_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boundary: None,
            print_runs: false,
            report_capacity: 32,
        }
    }
}

impl Settings {
    /// Файлу може не бути, тоді лишаються значення за замовчуванням.
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Політика меж: прапорець командного рядка має пріоритет над налаштуваннями.
    pub fn boundary_policy(&self, flag: Option<&str>) -> Result<BoundaryPolicy, SetupError> {
        match flag.or(self.boundary.as_deref()) {
            None | Some("") => Ok(BoundaryPolicy::default()),
            Some(token) => token
                .parse()
                .map_err(|_| SetupError::InvalidBoundaryPolicy(token.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_boundary_defaults_to_pass() {
        let settings = Settings::default();
        assert_eq!(settings.boundary_policy(None).unwrap(), BoundaryPolicy::Pass);
        assert_eq!(settings.boundary_policy(Some("")).unwrap(), BoundaryPolicy::Pass);
    }

    #[test]
    fn test_flag_overrides_settings() {
        let settings = Settings {
            boundary: Some("portal".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.boundary_policy(None).unwrap(), BoundaryPolicy::Portal);
        assert_eq!(settings.boundary_policy(Some("stop")).unwrap(), BoundaryPolicy::Stop);
    }

    #[test]
    fn test_unknown_boundary_is_rejected() {
        let err = Settings::default().boundary_policy(Some("bounce")).unwrap_err();
        assert!(matches!(err, SetupError::InvalidBoundaryPolicy(ref t) if t == "bounce"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("turtles-settings-{}.toml", std::process::id()));
        fs::write(&path, "boundary = \"stop\"\nreport_capacity = 4\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.boundary.as_deref(), Some("stop"));
        assert_eq!(settings.report_capacity, 4);
        assert!(!settings.print_runs);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let settings = Settings::load(Path::new("/definitely/not/here/Settings.toml")).unwrap();
        assert_eq!(settings.report_capacity, 32);
    }
}

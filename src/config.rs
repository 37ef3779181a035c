use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "static/csv";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Server settings, read from `SHEET_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Directory holding room_info.csv and times_by_type.csv
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let port = match lookup("SHEET_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!("invalid SHEET_PORT {:?}, using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        AppConfig {
            port,
            data_dir: lookup("SHEET_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            static_dir: lookup("SHEET_STATIC_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    /// `web [port]` on the command line wins over SHEET_PORT
    pub fn with_port_arg(mut self, arg: Option<&str>) -> Self {
        if let Some(port) = arg.and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SHEET_PORT", "9000"),
            ("SHEET_DATA_DIR", "/srv/sheet/csv"),
            ("SHEET_STATIC_DIR", ""),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/srv/sheet/csv"));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
    }

    #[test]
    fn bad_port_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[("SHEET_PORT", "http")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn port_argument_overrides_env() {
        let config = AppConfig::from_lookup(lookup(&[("SHEET_PORT", "9000")]));
        assert_eq!(config.clone().with_port_arg(Some("3000")).port, 3000);
        assert_eq!(config.clone().with_port_arg(Some("x")).port, 9000);
        assert_eq!(config.with_port_arg(None).port, 9000);
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// INI-style configuration: global keys plus `[Section]` scoped keys.
///
/// Lines are `key = value` pairs; `#` starts a comment. Values may be quoted,
/// the quotes are stripped. Lookups never fail, they return `Option`.
#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Reads and parses a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Error reading file {}: {e}", path.display()))?;
        Ok(Self::from_str_content(&content))
    }

    /// Parses configuration from an already-loaded string.
    #[must_use]
    pub fn from_str_content(content: &str) -> Self {
        let mut config = Self::default();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        config.globals.insert(key, value);
                    }
                    Some(sec) => {
                        config
                            .sections
                            .entry(sec.clone())
                            .or_default()
                            .insert(key, value);
                    }
                }
            }
        }
        config
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// Reads a boolean key. Accepts `true`/`false`, `1`/`0`, `yes`/`no`
    /// (case-insensitive); anything else is `None`.
    #[must_use]
    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        match self.get(section, key)?.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# top-level comment
app_name = demo

[Trace]
debug = true
base_path = "/tmp/trace-demo"
empty_key =
"#;

    #[test]
    fn parses_globals_and_sections() {
        let config = Config::from_str_content(SAMPLE);
        assert_eq!(config.get_global("app_name"), Some("demo"));
        assert_eq!(config.get("Trace", "base_path"), Some("/tmp/trace-demo"));
        assert_eq!(config.get("Trace", "missing"), None);
        assert_eq!(config.get("NoSuchSection", "debug"), None);
    }

    #[test]
    fn get_non_empty_filters_blank_values() {
        let config = Config::from_str_content(SAMPLE);
        assert_eq!(config.get("Trace", "empty_key"), Some(""));
        assert_eq!(config.get_non_empty("Trace", "empty_key"), None);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let config = Config::from_str_content(
            "[Trace]\ndebug = TRUE\noff = 0\nyes = yes\nbad = maybe\n",
        );
        assert_eq!(config.get_bool("Trace", "debug"), Some(true));
        assert_eq!(config.get_bool("Trace", "off"), Some(false));
        assert_eq!(config.get_bool("Trace", "yes"), Some(true));
        assert_eq!(config.get_bool("Trace", "bad"), None);
        assert_eq!(config.get_bool("Trace", "missing"), None);
    }

    #[test]
    fn empty_config_has_no_keys() {
        let config = Config::empty();
        assert_eq!(config.get_global("anything"), None);
        assert_eq!(config.get("Trace", "debug"), None);
    }
}

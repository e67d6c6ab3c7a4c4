//! Application configuration structures
//!
//! The package tables below are the defaults used when no configuration
//! file is found. Editors never read them directly; callers pass the
//! relevant lists in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Glob patterns, relative to the repository root, selecting scripts
    pub search_patterns: Vec<String>,
    /// Array name -> entries to add
    pub additions: BTreeMap<String, Vec<String>>,
    /// Array name -> entries to remove
    pub removals: BTreeMap<String, Vec<String>>,
    pub exclusions: ExclusionConfig,
    pub backup: BackupConfig,
}

/// Install command pattern the exclusion rewriter looks for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InstallPattern {
    /// Command token, e.g. `dnf`
    pub command: String,
    /// Optional flag allowed between command and `install`, e.g. `-y`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    /// List name that must appear after `install`
    pub list_name: String,
}

/// Exclusion flags injected into install commands
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ExclusionConfig {
    #[serde(flatten)]
    pub pattern: InstallPattern,
    #[serde(default)]
    pub packages: Vec<String>,
}

/// Backup configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct BackupConfig {
    /// Directory for timestamped copies; no backups when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        let mut additions = BTreeMap::new();
        additions.insert(
            "FEDORA_PACKAGES".to_string(),
            strings(&[
                "firefox",
                "firefox-langpacks",
                "fedora-chromium-config",
                "gnome-terminal",
                "gdk-pixbuf2-modules-extra",
                "chromium",
                "gstreamer1-plugin-openh264",
                "mozilla-openh264",
                "nmstate",
                "openh264",
                "remmina",
                "snapd",
                "solaar",
                "subversion",
                "subversion-gnome",
                "subversion-javahl",
                "unclutter",
                "xdotool",
                "openssl-pkcs11",
                "cockpit-ws",
            ]),
        );

        let mut removals = BTreeMap::new();
        removals.insert(
            "EXCLUDED_PACKAGES".to_string(),
            strings(&[
                "fedora-bookmarks",
                "fedora-chromium-config",
                "fedora-chromium-config-gnome",
                "firefox",
                "firefox-langpacks",
                "cockpit-ws",
            ]),
        );
        removals.insert(
            "UNWANTED_PACKAGES".to_string(),
            strings(&["firefox", "firefox-langpacks"]),
        );
        removals.insert(
            "WEAK_PACKAGES_TO_EXCLUDE".to_string(),
            strings(&["fedora-logos"]),
        );

        Config {
            search_patterns: strings(&["build_files/**/*.sh"]),
            additions,
            removals,
            exclusions: ExclusionConfig::default(),
            backup: BackupConfig::default(),
        }
    }
}

impl Default for InstallPattern {
    fn default() -> Self {
        InstallPattern {
            command: "dnf".into(),
            flag: Some("-y".into()),
            list_name: "FEDORA_PACKAGES".into(),
        }
    }
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        ExclusionConfig {
            pattern: InstallPattern::default(),
            packages: strings(&["fedora-logos"]),
        }
    }
}

impl Config {
    /// File name looked up in the repository root
    pub const REPO_FILE_NAME: &'static str = "buildtweak.toml";

    /// Get the buildtweak configuration directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("buildtweak")
    }

    /// Get the per-user configuration file path
    pub fn user_config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Configuration file path inside a repository
    pub fn repo_config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(Self::REPO_FILE_NAME)
    }

    /// Array names with configured additions or removals, additions first,
    /// without repeats.
    pub fn array_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.additions.keys().chain(self.removals.keys()) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search_patterns, vec!["build_files/**/*.sh"]);
        assert_eq!(config.additions["FEDORA_PACKAGES"].len(), 20);
        assert_eq!(config.removals["EXCLUDED_PACKAGES"].len(), 6);
        assert_eq!(config.exclusions.packages, vec!["fedora-logos"]);
        assert_eq!(config.exclusions.pattern.command, "dnf");
        assert!(config.backup.dir.is_none());
    }

    #[test]
    fn test_array_names_order() {
        let config = Config::default();
        assert_eq!(
            config.array_names(),
            vec![
                "FEDORA_PACKAGES",
                "EXCLUDED_PACKAGES",
                "UNWANTED_PACKAGES",
                "WEAK_PACKAGES_TO_EXCLUDE"
            ]
        );
    }

    #[test]
    fn test_array_names_dedup() {
        let mut config = Config::default();
        config
            .removals
            .insert("FEDORA_PACKAGES".into(), vec!["vim".into()]);
        let names = config.array_names();
        assert_eq!(
            names.iter().filter(|n| *n == "FEDORA_PACKAGES").count(),
            1
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
search_patterns = ["scripts/*.sh"]

[exclusions]
command = "dnf5"
list_name = "PKGS"
packages = ["a", "b"]
"#,
        )
        .unwrap();
        assert_eq!(parsed.search_patterns, vec!["scripts/*.sh"]);
        assert_eq!(parsed.exclusions.pattern.command, "dnf5");
        assert_eq!(parsed.exclusions.pattern.flag, None);
        assert_eq!(parsed.exclusions.packages, vec!["a", "b"]);
        assert_eq!(parsed.additions, Config::default().additions);
    }
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pjs/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PjsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub db_path: Option<String>,
    pub editor: Option<String>,
    pub theme: Option<Theme>,
    pub editor_failure: Option<EditorFailurePolicy>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    pub pandoc: Option<String>,
    pub output: Option<String>,
}

/// Theme preference as written by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    #[default]
    Auto,
}

/// Concrete theme used for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// What happens when the external editor fails or exits non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorFailurePolicy {
    /// Show the failure and keep the session running.
    #[default]
    Report,
    /// End the session.
    Quit,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_EDITOR: &str = "vi";
pub const DEFAULT_PANDOC: &str = "pandoc";
pub const DEFAULT_PDF_OUTPUT: &str = "output.pdf";
const APP_DIR: &str = ".pjs";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub db_path: PathBuf,
    pub editor: String,
    pub theme: ThemeMode,
    pub editor_failure: EditorFailurePolicy,
    pub pandoc: String,
    pub pdf_output: PathBuf,
}

/// Values given on the command line; `None` = flag not passed.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<PathBuf>,
    pub editor: Option<String>,
    pub theme: Option<Theme>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.pjs`, the home of config, database and log.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR))
}

/// Returns the path to `~/.pjs/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Returns the path to `~/.pjs/pjs.log`.
pub fn log_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("pjs.log"))
}

/// Load config from `~/.pjs/config.toml`.
pub fn load_config() -> Result<PjsConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(PjsConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PjsConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<PjsConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PjsConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: PjsConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# pjs configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# db_path = "~/.pjs/pjs.db"          # Or set PJS_DB_PATH
# editor = "nvim"                    # Or set PJS_EDITOR / VISUAL / EDITOR
# theme = "auto"                     # "dark", "light" or "auto" (reads COLORFGBG)
# editor_failure = "report"          # "report" keeps the session, "quit" ends it

# [export]
# pandoc = "pandoc"
# output = "output.pdf"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the process environment.
pub fn resolve(config: &PjsConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env` looks up an environment variable; tests pass a fixed table.
pub fn resolve_with<F>(config: &PjsConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let home = dirs::home_dir();

    // DB path: CLI → env → config → ~/.pjs/pjs.db
    let db_path = cli
        .db_path
        .clone()
        .or_else(|| env("PJS_DB_PATH").map(|p| expand_tilde(&p, home.as_deref())))
        .or_else(|| {
            config
                .general
                .db_path
                .as_deref()
                .map(|p| expand_tilde(p, home.as_deref()))
        })
        .unwrap_or_else(|| match &home {
            Some(h) => h.join(APP_DIR).join("pjs.db"),
            None => PathBuf::from("pjs.db"),
        });

    // Editor: CLI → PJS_EDITOR → config → VISUAL → EDITOR → vi
    let editor = cli
        .editor
        .clone()
        .or_else(|| env("PJS_EDITOR"))
        .or_else(|| config.general.editor.clone())
        .or_else(|| env("VISUAL"))
        .or_else(|| env("EDITOR"))
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

    // Theme: CLI → env → config → auto
    let theme = cli
        .theme
        .or_else(|| env("PJS_THEME").and_then(|t| parse_theme(&t)))
        .or(config.general.theme)
        .unwrap_or_default();
    let theme = match theme {
        Theme::Dark => ThemeMode::Dark,
        Theme::Light => ThemeMode::Light,
        Theme::Auto => detect_theme(env("COLORFGBG").as_deref()),
    };

    let pdf_output = config
        .export
        .output
        .as_deref()
        .map(|p| expand_tilde(p, home.as_deref()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_OUTPUT));

    ResolvedConfig {
        db_path,
        editor,
        theme,
        editor_failure: config.general.editor_failure.unwrap_or_default(),
        pandoc: config
            .export
            .pandoc
            .clone()
            .unwrap_or_else(|| DEFAULT_PANDOC.to_string()),
        pdf_output,
    }
}

fn parse_theme(value: &str) -> Option<Theme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "dark" => Some(Theme::Dark),
        "light" => Some(Theme::Light),
        "auto" => Some(Theme::Auto),
        other => {
            warn!("Ignoring unknown theme '{}'", other);
            None
        }
    }
}

/// Guess the terminal background from `COLORFGBG` ("fg;bg" or "fg;x;bg").
/// Background colour 7 or 15 means a light terminal.
pub fn detect_theme(colorfgbg: Option<&str>) -> ThemeMode {
    let bg = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(15) => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(h)) => h.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env() -> impl Fn(&str) -> Option<String> {
        env_of(&[])
    }

    #[test]
    fn test_default_config_parses() {
        let config = PjsConfig::default();
        assert!(config.general.db_path.is_none());
        assert!(config.export.output.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&PjsConfig::default(), &CliOverrides::default(), no_env());
        assert_eq!(resolved.editor, DEFAULT_EDITOR);
        assert_eq!(resolved.pandoc, DEFAULT_PANDOC);
        assert_eq!(resolved.pdf_output, PathBuf::from(DEFAULT_PDF_OUTPUT));
        assert_eq!(resolved.theme, ThemeMode::Dark);
        assert_eq!(resolved.editor_failure, EditorFailurePolicy::Report);
        assert!(resolved.db_path.ends_with("pjs.db"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PjsConfig {
            general: GeneralConfig {
                db_path: Some("/tmp/journal.db".to_string()),
                editor: Some("nano".to_string()),
                theme: Some(Theme::Light),
                editor_failure: Some(EditorFailurePolicy::Quit),
            },
            export: ExportConfig {
                pandoc: Some("/opt/pandoc".to_string()),
                output: Some("/tmp/out.pdf".to_string()),
            },
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env());
        assert_eq!(resolved.db_path, PathBuf::from("/tmp/journal.db"));
        assert_eq!(resolved.editor, "nano");
        assert_eq!(resolved.theme, ThemeMode::Light);
        assert_eq!(resolved.editor_failure, EditorFailurePolicy::Quit);
        assert_eq!(resolved.pandoc, "/opt/pandoc");
        assert_eq!(resolved.pdf_output, PathBuf::from("/tmp/out.pdf"));
    }

    #[test]
    fn test_env_overrides_config() {
        let config = PjsConfig {
            general: GeneralConfig {
                db_path: Some("/tmp/from-config.db".to_string()),
                editor: Some("nano".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_of(&[
            ("PJS_DB_PATH", "/tmp/from-env.db"),
            ("PJS_EDITOR", "hx"),
            ("PJS_THEME", "light"),
        ]);
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.db_path, PathBuf::from("/tmp/from-env.db"));
        assert_eq!(resolved.editor, "hx");
        assert_eq!(resolved.theme, ThemeMode::Light);
    }

    #[test]
    fn test_cli_wins_over_everything() {
        let config = PjsConfig {
            general: GeneralConfig {
                editor: Some("nano".to_string()),
                theme: Some(Theme::Light),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            db_path: Some(PathBuf::from("/cli.db")),
            editor: Some("emacs -nw".to_string()),
            theme: Some(Theme::Dark),
        };
        let env = env_of(&[("PJS_EDITOR", "hx"), ("PJS_DB_PATH", "/env.db")]);
        let resolved = resolve_with(&config, &cli, env);
        assert_eq!(resolved.db_path, PathBuf::from("/cli.db"));
        assert_eq!(resolved.editor, "emacs -nw");
        assert_eq!(resolved.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_editor_falls_back_to_visual_then_editor() {
        let cli = CliOverrides::default();
        let config = PjsConfig::default();

        let both = env_of(&[("VISUAL", "code --wait"), ("EDITOR", "vim")]);
        assert_eq!(resolve_with(&config, &cli, both).editor, "code --wait");

        let only_editor = env_of(&[("EDITOR", "vim")]);
        assert_eq!(resolve_with(&config, &cli, only_editor).editor, "vim");
    }

    #[test]
    fn test_blank_editor_falls_back_to_default() {
        let env = env_of(&[("EDITOR", "  ")]);
        let resolved = resolve_with(&PjsConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.editor, DEFAULT_EDITOR);
    }

    #[test]
    fn test_auto_theme_reads_colorfgbg() {
        assert_eq!(detect_theme(Some("0;15")), ThemeMode::Light);
        assert_eq!(detect_theme(Some("0;default;7")), ThemeMode::Light);
        assert_eq!(detect_theme(Some("15;0")), ThemeMode::Dark);
        assert_eq!(detect_theme(Some("garbage")), ThemeMode::Dark);
        assert_eq!(detect_theme(None), ThemeMode::Dark);

        let env = env_of(&[("COLORFGBG", "0;15")]);
        let resolved = resolve_with(&PjsConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.theme, ThemeMode::Light);
    }

    #[test]
    fn test_unknown_env_theme_is_ignored() {
        let config = PjsConfig {
            general: GeneralConfig {
                theme: Some(Theme::Light),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_of(&[("PJS_THEME", "purple")]);
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.theme, ThemeMode::Light);
    }

    #[test]
    fn test_tilde_expansion() {
        let home = Path::new("/home/someone");
        assert_eq!(
            expand_tilde("~/notes/pjs.db", Some(home)),
            PathBuf::from("/home/someone/notes/pjs.db")
        );
        assert_eq!(expand_tilde("/abs.db", Some(home)), PathBuf::from("/abs.db"));
        assert_eq!(expand_tilde("~/x.db", None), PathBuf::from("~/x.db"));
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
db_path = "~/journal/pjs.db"
editor = "nvim"
theme = "light"
editor_failure = "quit"

[export]
pandoc = "/usr/local/bin/pandoc"
output = "journal.pdf"
"#;
        let config: PjsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.db_path.as_deref(), Some("~/journal/pjs.db"));
        assert_eq!(config.general.theme, Some(Theme::Light));
        assert_eq!(config.general.editor_failure, Some(EditorFailurePolicy::Quit));
        assert_eq!(config.export.output.as_deref(), Some("journal.pdf"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
editor = "micro"
"#;
        let config: PjsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.editor.as_deref(), Some("micro"));
        assert!(config.general.theme.is_none());
        assert!(config.export.pandoc.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.general.editor.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [general]"));
        // The template is all comments, so it parses to the defaults.
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.general.db_path.is_none());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\neditor = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}

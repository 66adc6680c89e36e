use std::io::Write;

use taiga_board::color::Color;
use taiga_board::config::loader::load_config;
use taiga_board::config::types::AppConfig;
use taiga_board::labels::ResolvedLabels;

#[test]
fn parse_minimal_config() {
    let toml = r#"
[server]
base_url = "https://tree.taiga.io/"
projects = [1, 2]
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.base_url, "https://tree.taiga.io/");
    assert_eq!(config.server.projects, vec![1, 2]);
    assert!(config.server.token.is_none());
}

#[test]
fn parse_unknown_keys_ignored() {
    let toml = r#"
unknown_top_level = "should be ignored"

[server]
base_url = "https://taiga.example.com"
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.base_url, "https://taiga.example.com");
}

#[test]
fn defaults_without_config() {
    let config = AppConfig::default();
    assert_eq!(config.defaults.date_format, "relative");
    assert!(config.defaults.show_filter_count);
    assert!(config.defaults.show_separator);
}

#[test]
fn parse_defaults_section() {
    let toml = r#"
[defaults]
date_format = "%d/%m/%Y"
show_filter_count = false
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.defaults.date_format, "%d/%m/%Y");
    assert!(!config.defaults.show_filter_count);
    // Untouched slots keep their defaults.
    assert!(config.defaults.show_separator);
}

#[test]
fn parse_theme_colors() {
    let toml = r##"
[theme.colors.text]
primary = "#c0caf5"
secondary = "245"

[theme.colors.background]
chip = "236"
"##;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(
        config.theme.colors.text.primary.unwrap(),
        Color::Hex {
            r: 0xc0,
            g: 0xca,
            b: 0xf5
        }
    );
    assert_eq!(
        config.theme.colors.text.secondary.unwrap(),
        Color::Ansi256(245)
    );
    assert_eq!(config.theme.colors.background.chip.unwrap(), Color::Ansi256(236));
}

#[test]
fn invalid_theme_color_is_a_parse_error() {
    let toml = r#"
[theme.colors.text]
primary = "not-a-color"
"#;
    let result: Result<AppConfig, _> = toml::from_str(toml);
    assert!(result.is_err());
}

#[test]
fn parse_label_overrides() {
    let toml = r#"
[labels]
multiple = "Mehrere"
type = "Kind"
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    let labels = ResolvedLabels::resolve(&config.labels);
    assert_eq!(labels.multiple, "Mehrere");
    assert_eq!(labels.issue_type, "Kind");
    assert_eq!(labels.priority, "Priority");
}

#[test]
fn load_config_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
base_url = "https://taiga.example.com"
projects = [7]
token = "abc123"
"#
    )
    .unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.server.projects, vec![7]);
    assert_eq!(config.server.token.as_deref(), Some("abc123"));
}

#[test]
fn load_config_missing_explicit_path_fails() {
    let result = load_config(Some(std::path::Path::new("/nonexistent/taiga-board.toml")));
    assert!(result.is_err());
}

use serde::Deserialize;

use crate::color::Color;

// ---------------------------------------------------------------------------
// Custom Color deserialization
// ---------------------------------------------------------------------------

/// Deserialize an `Option<Color>` from a TOML string value.
pub(crate) mod color_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::color::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => Color::parse(&s, "<theme>")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub defaults: Defaults,
    pub theme: Theme,
    pub labels: LabelConfig,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Taiga instance, e.g. `https://tree.taiga.io/`.
    pub base_url: String,
    /// Project ids to load into the dashboard.
    pub projects: Vec<i64>,
    /// Auth token; `$TAIGA_TOKEN` takes precedence when set.
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// `"relative"` or a strftime pattern for the updated column.
    pub date_format: String,
    /// Show the active-filter counter next to the add-filter button.
    pub show_filter_count: bool,
    /// Draw the separator line under the table header.
    pub show_separator: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            date_format: "relative".to_owned(),
            show_filter_count: true,
            show_separator: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ColorsTheme,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    pub text: TextColors,
    pub background: BgColors,
    pub border: BorderColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub primary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub secondary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub faint: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub warning: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub error: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub actor: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BgColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub selected: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub chip: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BorderColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub primary: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub faint: Option<Color>,
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Per-string display overrides; unset slots use the English defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub project: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub severity: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub multiple: Option<String>,
    pub add_filter: Option<String>,
    pub exclude_marker: Option<String>,
    pub col_subject: Option<String>,
    pub col_project: Option<String>,
    pub col_status: Option<String>,
    pub col_priority_severity: Option<String>,
    pub col_type: Option<String>,
    pub col_assignee: Option<String>,
    pub col_modified: Option<String>,
    pub unassigned: Option<String>,
    pub placeholder: Option<String>,
    pub no_issues: Option<String>,
    pub loading: Option<String>,
}

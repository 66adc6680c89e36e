use crate::color::Color;
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
        {
            // ANSI colors 0-6 and 8 are typically dark backgrounds.
            if n > 6 && n != 8 {
                return Background::Light;
            }
        }
        Background::Dark
    }
}

/// A fully resolved theme: every color slot has a concrete `Color` value
/// (either from user config or from defaults for the detected background).
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_faint: Color,
    pub text_warning: Color,
    pub text_error: Color,
    pub text_actor: Color,
    // Background
    pub bg_selected: Color,
    pub bg_chip: Color,
    // Border
    pub border_primary: Color,
    pub border_faint: Color,
}

impl ResolvedTheme {
    /// Build a resolved theme from user config and detected background.
    pub fn resolve(theme: &Theme, bg: Background) -> Self {
        let d = Defaults::for_background(bg);

        Self {
            text_primary: theme.colors.text.primary.unwrap_or(d.text_primary),
            text_secondary: theme.colors.text.secondary.unwrap_or(d.text_secondary),
            text_faint: theme.colors.text.faint.unwrap_or(d.text_faint),
            text_warning: theme.colors.text.warning.unwrap_or(d.text_warning),
            text_error: theme.colors.text.error.unwrap_or(d.text_error),
            text_actor: theme.colors.text.actor.unwrap_or(d.text_actor),
            bg_selected: theme.colors.background.selected.unwrap_or(d.bg_selected),
            bg_chip: theme.colors.background.chip.unwrap_or(d.bg_chip),
            border_primary: theme.colors.border.primary.unwrap_or(d.border_primary),
            border_faint: theme.colors.border.faint.unwrap_or(d.border_faint),
        }
    }
}

/// Default color values for a given terminal background.
struct Defaults {
    text_primary: Color,
    text_secondary: Color,
    text_faint: Color,
    text_warning: Color,
    text_error: Color,
    text_actor: Color,
    bg_selected: Color,
    bg_chip: Color,
    border_primary: Color,
    border_faint: Color,
}

impl Defaults {
    fn for_background(bg: Background) -> Self {
        match bg {
            Background::Dark => Self {
                text_primary: Color::Ansi256(7),
                text_secondary: Color::Ansi256(245),
                text_faint: Color::Ansi256(243),
                text_warning: Color::Ansi256(11),
                text_error: Color::Ansi256(1),
                text_actor: Color::Ansi256(6),
                bg_selected: Color::Ansi256(237),
                bg_chip: Color::Ansi256(236),
                border_primary: Color::Ansi256(244),
                border_faint: Color::Ansi256(241),
            },
            Background::Light => Self {
                text_primary: Color::Ansi256(0),
                text_secondary: Color::Ansi256(240),
                text_faint: Color::Ansi256(248),
                text_warning: Color::Ansi256(3),
                text_error: Color::Ansi256(1),
                text_actor: Color::Ansi256(4),
                bg_selected: Color::Ansi256(254),
                bg_chip: Color::Ansi256(253),
                border_primary: Color::Ansi256(240),
                border_faint: Color::Ansi256(252),
            },
        }
    }
}

//! Terminal styling helpers.
//!
//! ANSI escape codes plus colour detection, so renderers can ask for a
//! palette and never check the environment themselves.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for location names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for the cheapest fare.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for discounted fares.
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow for warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for negative cycles.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            cyan: colors::CYAN,
            yellow: colors::YELLOW,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            cyan: "",
            yellow: "",
            red: "",
        }
    }

    /// Palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Colour for a fare: discounts stand out from regular prices.
    #[must_use]
    pub fn fare(&self, cost: i64) -> &'static str {
        if cost < 0 {
            self.cyan
        } else {
            self.white_bold
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a fare with thousand separators, keeping the sign.
///
/// ```
/// # use farepath_cli::terminal::format_fare;
/// assert_eq!(format_fare(999), "999");
/// assert_eq!(format_fare(12_500), "12,500");
/// assert_eq!(format_fare(-1_234_567), "-1,234,567");
/// ```
#[must_use]
pub fn format_fare(fare: i64) -> String {
    let digits = fare.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if fare < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Run `f` with temporary environment changes, restoring them afterwards.
    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();

        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        result
    }

    #[test]
    fn format_fare_groups_thousands() {
        assert_eq!(format_fare(0), "0");
        assert_eq!(format_fare(1_000), "1,000");
        assert_eq!(format_fare(123_456), "123,456");
        assert_eq!(format_fare(-180), "-180");
        assert_eq!(format_fare(-12_000), "-12,000");
    }

    #[test]
    fn plain_palette_is_empty() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.fare(-1).is_empty());
    }

    #[test]
    fn discounts_use_their_own_colour() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.fare(-5), colors::CYAN);
        assert_eq!(palette.fare(5), colors::WHITE_BOLD);
    }

    #[test]
    fn no_color_disables_palette() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color());
            assert_eq!(ColorPalette::detect(), ColorPalette::plain());
        });
    }

    #[test]
    fn dumb_terminal_disables_palette() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn color_is_on_by_default() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm-256color"))], || {
            assert!(supports_color());
        });
    }
}

//! The two-valued appearance setting.

/// Whether the application renders dark or light.
///
/// There is no "system" variant: the environment's preference only matters
/// when the initial mode is resolved, see [`resolve`](crate::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Returns the opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Returns `true` for [`ThemeMode::Dark`].
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    /// The literal stored under the `"theme"` key.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Parses a stored value.
    ///
    /// Only `"dark"` and `"light"` are recognized, ignoring surrounding
    /// whitespace. Anything else, including values written by other software
    /// or future versions, yields `None` and is treated as absent.
    ///
    /// ```rust
    /// use themeshift::ThemeMode;
    ///
    /// assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
    /// assert_eq!(ThemeMode::parse("Light"), None);
    /// assert_eq!(ThemeMode::parse("system"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

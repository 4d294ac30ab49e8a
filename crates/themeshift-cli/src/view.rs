//! The themed terminal view.
//!
//! The view is a MiniJinja template. A `style` filter maps semantic names to
//! `console` styles picked for the current mode, so the same template renders
//! correctly on a dark or a light terminal background.

use std::collections::HashMap;

use console::Style;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use themeshift::{rgb_to_ansi256, Palette, ThemeMode};

const VIEW_TEMPLATE: &str = r#"{{ " themeshift " | style("badge") }} {{ mode | style("accent") }} {{ "mode" | style("text") }}
  {{ "stored " | style("muted") }} {{ stored | style("text") }}
  {{ "file   " | style("muted") }} {{ path | style("text") }}
  {{ "state  " | style("muted") }} {{ state | style("text") }}"#;

/// Values the view template renders.
#[derive(Debug, Clone, Serialize)]
pub struct ViewData {
    pub mode: String,
    pub stored: String,
    pub path: String,
    pub state: String,
}

/// Named styles for one mode.
type Styles = HashMap<&'static str, Style>;

/// Styles for both modes; the view resolves one set per render.
pub struct TerminalView {
    light: Styles,
    dark: Styles,
    use_color: bool,
}

impl TerminalView {
    pub fn new(palette: &Palette, use_color: bool) -> Self {
        let dark_bg = rgb_to_ansi256(palette.dark);
        let light_bg = rgb_to_ansi256(palette.light);

        let dark = Styles::from([
            ("badge", Style::new().on_color256(light_bg).color256(dark_bg).bold()),
            ("accent", Style::new().cyan().bold()),
            ("text", Style::new().white()),
            ("muted", Style::new().color256(244)),
        ]);
        let light = Styles::from([
            ("badge", Style::new().on_color256(dark_bg).color256(light_bg).bold()),
            ("accent", Style::new().blue().bold()),
            ("text", Style::new().black()),
            ("muted", Style::new().color256(240)),
        ]);

        Self {
            light,
            dark,
            use_color,
        }
    }

    fn styles(&self, mode: ThemeMode) -> &Styles {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    /// Renders the view in `mode`.
    pub fn render(&self, mode: ThemeMode, data: &ViewData) -> Result<String, Error> {
        let mut env = Environment::new();
        register_style_filter(&mut env, self.styles(mode).clone(), self.use_color);
        env.add_template("view", VIEW_TEMPLATE)?;
        env.get_template("view")?.render(data)
    }
}

fn register_style_filter(env: &mut Environment<'_>, styles: Styles, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        match styles.get(name.as_str()) {
            Some(style) => style
                .apply_to(text)
                .force_styling(use_color)
                .to_string(),
            None => text,
        }
    });
}

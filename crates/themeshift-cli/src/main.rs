//! `themeshift` - show or toggle the dark/light theme from a terminal.
//!
//! The terminal stands in for a browser page: the preference lives in a JSON
//! file, the ambient signal comes from the operating system, the overlay is
//! a painted band on stderr, and the view is a styled template on stdout.

mod cli;
mod driver;
mod host;
mod view;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use themeshift::{
    FileStore, NoOverlay, OverlayHost, PreferenceStore, ThemeConfig,
    ThemeController, Toggle, THEME_KEY,
};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::driver::{run_to_idle, FRAME_INTERVAL};
use crate::host::TerminalHost;
use crate::view::{TerminalView, ViewData};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stderr_color = !cli.no_color && console::colors_enabled_stderr();
    init_logging(stderr_color);

    let config = match &cli.config {
        Some(path) => ThemeConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ThemeConfig::default(),
    };
    let use_color = !cli.no_color && console::colors_enabled();
    let view = TerminalView::new(&config.palette, use_color);
    let ambient = cli.ambient.signal();
    let store = FileStore::new(cli.state.clone());

    match cli.command {
        Command::Show => {
            let theme = ThemeController::init(config, store, ambient.as_ref(), NoOverlay);
            draw(&view, &theme)
        }
        Command::Toggle { instant: true } => {
            let theme = ThemeController::init(config, store, ambient.as_ref(), NoOverlay);
            toggle(&view, theme)
        }
        Command::Toggle { instant: false } => {
            let backdrop = Rc::new(Cell::new(config.palette.dark));
            let host = TerminalHost::new(Rc::clone(&backdrop), stderr_color);
            let mut theme = ThemeController::init(config, store, ambient.as_ref(), host);

            let palette = theme.config().palette;
            backdrop.set(palette.background(theme.mode()));
            theme.subscribe(move |mode| backdrop.set(palette.background(mode)));
            toggle(&view, theme)
        }
    }
}

fn init_logging(ansi: bool) {
    let filter =
        EnvFilter::try_from_env("THEMESHIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .init();
}

fn toggle<H: OverlayHost>(view: &TerminalView, mut theme: ThemeController<FileStore, H>) -> Result<()> {
    match theme.toggle(Instant::now()) {
        Toggle::Started => {
            let frames = run_to_idle(&mut theme, FRAME_INTERVAL);
            tracing::debug!(frames, "transition finished");
        }
        Toggle::Immediate => {}
        Toggle::Ignored => anyhow::bail!("a transition is already running"),
    }
    draw(view, &theme)
}

fn draw<H: OverlayHost>(view: &TerminalView, theme: &ThemeController<FileStore, H>) -> Result<()> {
    let store = theme.persistence().store();
    let stored = match store.load(THEME_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => "(unset)".to_string(),
        Err(err) => format!("(unavailable: {})", err),
    };
    let data = ViewData {
        mode: theme.mode().to_string(),
        stored,
        path: store.path().display().to_string(),
        state: theme.state().to_string(),
    };
    let output = view.render(theme.mode(), &data).context("rendering view")?;
    println!("{}", output);
    Ok(())
}

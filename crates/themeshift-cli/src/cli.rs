//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use themeshift::{AmbientSignal, FixedAmbient, OsAmbient};

#[derive(Debug, Parser)]
#[command(name = "themeshift", version, about = "Show or toggle the dark/light theme")]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Preference file holding the stored theme.
    #[arg(long, global = true, value_name = "PATH", default_value = ".themeshift.json")]
    pub state: PathBuf,

    /// Where the environment's appearance preference comes from.
    #[arg(long, global = true, value_enum, default_value_t = AmbientArg::Os)]
    pub ambient: AmbientArg,

    /// Never emit colour codes.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the current theme and render the view.
    Show,
    /// Switch to the other theme.
    Toggle {
        /// Switch without the fade overlay.
        #[arg(long)]
        instant: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmbientArg {
    /// Ask the operating system.
    Os,
    Light,
    Dark,
    /// Behave as if no preference were available.
    #[value(name = "none")]
    Unavailable,
}

impl AmbientArg {
    pub fn signal(self) -> Box<dyn AmbientSignal> {
        match self {
            AmbientArg::Os => Box::new(OsAmbient),
            AmbientArg::Light => Box::new(FixedAmbient::light()),
            AmbientArg::Dark => Box::new(FixedAmbient::dark()),
            AmbientArg::Unavailable => Box::new(FixedAmbient::unavailable()),
        }
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::form::FormMode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sign in, register or reset a password from the terminal."
)]
pub struct Cli {
    /// Form to open with (overrides `initial_mode` from the config file).
    #[arg(long, value_enum)]
    pub mode: Option<FormMode>,

    /// Read configuration from this file instead of the platform config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Do not capture the mouse. Selects then only respond to the keyboard.
    #[arg(long)]
    pub no_mouse: bool,
}

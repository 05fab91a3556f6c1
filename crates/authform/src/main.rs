use anyhow::{Context, Result};
use authform::cli::Cli;
use authform::config::Config;
use authform::screen::window_title;
use authform::{logging, AuthScreen, LogSubmitHandler, ScreenFlags};
use authform_core::ProgramOptions;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_cli(&cli);

    logging::init(&config.log_filter, config.log_file.as_deref())
        .context("failed to initialize logging")?;

    let mode = config.mode();
    tracing::info!(%mode, mouse = config.mouse, fps = config.fps, "starting");

    let flags = ScreenFlags::new(mode, LogSubmitHandler)
        .with_bio_max_length(config.bio_max_length);
    let options = ProgramOptions {
        fps: config.fps,
        mouse: config.mouse,
        title: Some(window_title(mode)),
        ..ProgramOptions::default()
    };

    let screen = authform_core::run_with::<AuthScreen>(flags, options)
        .await
        .context("terminal session failed")?;
    tracing::info!(mode = %screen.form().mode, "exited");
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shared::protocol::BootstrapperCommand;
use tracing_subscriber::EnvFilter;
use ux_core::{ApplyMode, Bootstrapper, WindowHost};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::runtime::launch_engine;
use ui::EguiWindowHost;

#[derive(Parser, Debug)]
#[command(name = "installer_gui", about = "Installer front-end for a bootstrapper engine")]
struct Args {
    /// install, uninstall, unsafe_uninstall, repair, modify, layout, cache, help,
    /// update_replace, update_replace_embedded or unknown.
    #[arg(long, default_value = "install")]
    action: String,
    /// none, embedded, passive, full or unknown.
    #[arg(long, default_value = "full")]
    display: String,
    /// Settings file; defaults to ./installer_gui.toml or the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bundle manifest for the simulated engine.
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// NAME=VALUE variable assignments forwarded to the engine.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    variables: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let command = BootstrapperCommand::from_raw(&args.action, &args.display, args.variables)
        .context("invalid launch command")?;

    let manifest = args.manifest.or(settings.manifest_path);
    let engine = launch_engine(manifest.as_deref())?;

    let apply_mode = if settings.confirm_apply {
        ApplyMode::Manual
    } else {
        ApplyMode::Automatic
    };
    let title = settings.window_title;
    let exit_code = Bootstrapper::new(engine, command)
        .with_windowed_apply_mode(apply_mode)
        .run(move || Ok(Box::new(EguiWindowHost::new(title)) as Box<dyn WindowHost>))?;

    std::process::exit(exit_code)
}

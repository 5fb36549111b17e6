//! `kindling`: downloads a Minecraft client version
//! into a local store and launches it in offline mode.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use kl_core::{err, info, json::LauncherConfigJson, logger_init, StoreLayout, LAUNCHER_VERSION_NAME};
use kl_instances::LaunchConfig;

#[derive(Parser, Debug)]
#[command(name = "kindling", disable_version_flag = true)]
struct Cli {
    /// Game version to launch (for example `1.21`)
    #[arg(long)]
    version: Option<String>,
    /// Offline username, no spaces
    #[arg(long)]
    username: Option<String>,
    /// Java executable to run the game with
    #[arg(long)]
    java: Option<PathBuf>,
    /// Where downloaded files are kept
    #[arg(long, default_value = "launcher_data")]
    dir: PathBuf,
    /// Print the launcher version and exit
    #[arg(short = 'V', long)]
    launcher_version: bool,
}

impl Cli {
    fn apply(self, config: &mut LaunchConfig) {
        if let Some(version) = self.version {
            config.version = version;
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(java) = self.java {
            config.java = java;
        }
    }
}

/// The game's exit code as this process's exit code.
/// A failure that doesn't fit in a byte (negative Windows
/// crash codes, 256 and up) becomes 1, never 0.
fn exit_code_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.launcher_version {
        println!("{}", format!("kindling v{LAUNCHER_VERSION_NAME}").bold());
        return ExitCode::SUCCESS;
    }

    let root = match std::path::absolute(&cli.dir) {
        Ok(n) => n,
        Err(error) => {
            err!("Invalid store directory {:?}: {error}", cli.dir);
            return ExitCode::FAILURE;
        }
    };
    logger_init(&StoreLayout::new(&root).logs_dir());

    let mut config = LaunchConfig::new(&root);
    match LauncherConfigJson::read(&StoreLayout::new(&root).config_json()).await {
        Ok(json) => config.apply_json(json),
        Err(error) => {
            err!("Could not read config.json: {error}");
            return ExitCode::FAILURE;
        }
    }
    cli.apply(&mut config);

    match kl_instances::launch(&config).await {
        Ok(status) => match status.code() {
            Some(code) => {
                info!("Game exited with code {code}");
                ExitCode::from(exit_code_byte(code))
            }
            None => {
                err!("Game was terminated without an exit code");
                ExitCode::FAILURE
            }
        },
        Err(error) => {
            err!("{error}");
            ExitCode::FAILURE
        }
    }
}

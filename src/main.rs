use anyhow::{Context, Result, bail};
use clap::{Parser, ValueHint};
use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};
use tracing::{Dispatch, error, info};

use crate::{
    client::YandexDiskClient,
    config::{Config, ConfigEnv},
};

mod client;
mod config;
mod format;
mod logging;
mod rest_types;

const DEFAULT_TIMEOUT_SECS: u64 = 900;

#[derive(Parser, Debug)]
#[command(name = "ydisk-upload")]
#[command(version)]
#[command(about = "Upload a file to Yandex Disk")]
#[command(
    after_help = "The OAuth token is read from the YANDEX_DISK_TOKEN environment variable."
)]
struct Cli {
    /// Path to the source file
    #[arg(long, value_hint = ValueHint::FilePath)]
    path_to_file: Option<PathBuf>,
    /// Target path on Yandex Disk, e.g. /backups/archive.tar.gz
    #[arg(long)]
    target_yandex_disk_path: Option<String>,
    /// HTTP client timeout (sec)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = Dispatch::new(logging::subscriber(io::stdout));
    let path_to_file = cli.path_to_file.clone();

    tracing::dispatcher::with_default(&logger, || {
        report(execute(cli), path_to_file.as_deref())
    })
}

fn execute(cli: Cli) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let env = config::read_env()?;

    rt.block_on(run(cli, env))
}

fn report(result: Result<()>, path_to_file: Option<&Path>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let file = path_to_file
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            error!(file = %file, "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, env: ConfigEnv) -> Result<()> {
    let config = Config::new(
        cli.path_to_file,
        cli.target_yandex_disk_path,
        cli.timeout,
        env,
    )?;

    let metadata = tokio::fs::metadata(&config.path_to_file)
        .await
        .with_context(|| {
            format!(
                "Failed to check source file {}",
                config.path_to_file.display()
            )
        })?;
    if !metadata.is_file() {
        bail!(
            "Source path {} is not a regular file",
            config.path_to_file.display()
        );
    }

    info!(
        src_file_path = %config.path_to_file.display(),
        size = %format::human_bytes(metadata.len()),
        target_yandex_disk_path = %config.target_yandex_disk_path,
        "src file size"
    );

    let client = YandexDiskClient::new(
        config.yandex_disk_api_url,
        config.yandex_disk_token,
        config.timeout,
    )
    .context("Failed to build HTTP client")?;

    let upload_url = client
        .resolve_upload_url(&config.target_yandex_disk_path)
        .await
        .context("Failed to request upload URL from Yandex Disk")?;

    info!("upload url received");

    let started = Instant::now();
    client
        .upload_file(&upload_url, &config.path_to_file)
        .await
        .context("Failed to upload file")?;
    let elapsed = started.elapsed();

    info!(
        file = %config.path_to_file.display(),
        elapsed = %format::human_elapsed(elapsed),
        "file uploaded successfully"
    );

    Ok(())
}

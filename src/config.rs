use anyhow::{Context, Result, anyhow, bail};
use dotenvy::dotenv;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_YANDEX_DISK_API_URL: &str = "https://cloud-api.yandex.net/v1/disk/";

#[derive(Debug, Deserialize, Default)]
pub struct ConfigEnv {
    pub yandex_disk_token: Option<String>,
    pub yandex_disk_api_url: Option<Url>,
}

/// Everything a single upload needs, validated.
#[derive(Debug)]
pub struct Config {
    pub path_to_file: PathBuf,
    pub target_yandex_disk_path: String,
    pub yandex_disk_token: String,
    pub yandex_disk_api_url: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn new(
        path_to_file: Option<PathBuf>,
        target_yandex_disk_path: Option<String>,
        timeout_secs: u64,
        env: ConfigEnv,
    ) -> Result<Self> {
        let path_to_file = path_to_file.filter(|path| !path.as_os_str().is_empty());
        let target_yandex_disk_path = target_yandex_disk_path.filter(|path| !path.is_empty());
        let yandex_disk_token = env.yandex_disk_token.filter(|token| !token.is_empty());

        let (Some(path_to_file), Some(target_yandex_disk_path), Some(yandex_disk_token)) =
            (path_to_file, target_yandex_disk_path, yandex_disk_token)
        else {
            bail!(
                "please set --path-to-file, --target-yandex-disk-path, and pass the Yandex Disk token in the YANDEX_DISK_TOKEN environment variable"
            );
        };

        if timeout_secs == 0 {
            bail!("--timeout must be at least one second");
        }

        let yandex_disk_api_url = match env.yandex_disk_api_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_YANDEX_DISK_API_URL)
                .map_err(|e| anyhow!("Invalid default API URL: {}", e))?,
        };

        Ok(Self {
            path_to_file,
            target_yandex_disk_path,
            yandex_disk_token,
            yandex_disk_api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub fn read_env() -> Result<ConfigEnv> {
    let _ = dotenv();
    env_from_vars(std::env::vars())
}

fn env_from_vars<I>(vars: I) -> Result<ConfigEnv>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter::<_, ConfigEnv>(vars)
        .context("Invalid YANDEX_DISK_* environment configuration")
}

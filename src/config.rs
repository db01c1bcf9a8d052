// src/config.rs

use anyhow::{Context, Result};
use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use url::Url;

use crate::dataset::IdPolicy;
use crate::provision::DEFAULT_SOURCE_URL;

pub const DEFAULT_DATASET_PATH: &str = "titanic_data.csv";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub source_url: Url,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub id_policy: IdPolicy,
}

impl Config {
    /// Read settings from the process environment.
    ///
    /// | Variable              | Default                |
    /// |-----------------------|------------------------|
    /// | `DATASET_PATH`        | `titanic_data.csv`     |
    /// | `DATASET_URL`         | seaborn titanic CSV    |
    /// | `HOST`                | `127.0.0.1`            |
    /// | `PORT`                | `5000`                 |
    /// | `LOG_LEVEL`           | `info`                 |
    /// | `PASSENGER_ID_POLICY` | `none`                 |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dataset_path = lookup("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));

        let source = lookup("DATASET_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let source_url =
            Url::parse(&source).with_context(|| format!("parsing DATASET_URL {:?}", source))?;

        let host: IpAddr = match lookup("HOST") {
            Some(h) => h.parse::<IpAddr>().with_context(|| format!("parsing HOST {:?}", h))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port: u16 = match lookup("PORT") {
            Some(p) => p.parse::<u16>().with_context(|| format!("parsing PORT {:?}", p))?,
            None => DEFAULT_PORT,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let id_policy = match lookup("PASSENGER_ID_POLICY") {
            Some(p) => p.parse::<IdPolicy>().context("parsing PASSENGER_ID_POLICY")?,
            None => IdPolicy::default(),
        };

        Ok(Self {
            dataset_path,
            source_url,
            bind_addr: SocketAddr::new(host, port),
            log_level,
            id_policy,
        })
    }
}

use anyhow::{Context, Result};
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

pub const DEFAULT_MODEL_PATH: &str = "insurance-response-predictor.pt";
pub const DEFAULT_META_PATH: &str = "insurance-response-predictor.meta.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model_path: PathBuf,
    pub meta_path: PathBuf,
    pub addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let model_path = lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let meta_path = lookup("META_PATH").unwrap_or_else(|| DEFAULT_META_PATH.to_string());

        let host = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(s) => s
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {s:?}"))?,
            None => DEFAULT_PORT,
        };
        let ip: IpAddr = host
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a valid IP address: {host:?}"))?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Text,
        };

        Ok(Self {
            model_path: model_path.into(),
            meta_path: meta_path.into(),
            addr: SocketAddr::new(ip, port),
            log_format,
        })
    }
}

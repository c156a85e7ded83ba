// Copyright © 2014, Peter Atashian

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub mod image;
pub mod input;
pub mod report;
pub mod revisions;

pub use crate::input::Section;
pub use crate::report::SectionResult;
pub use crate::revisions::{Fetch, Revisions};

pub type Json = serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("input file \"{}\" not found", .0.display())]
    MissingInput(PathBuf),
}
impl Error {
    /// Whether the request deadline elapsed before a full response arrived.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: String,
    pub useragent: String,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Per-request deadline in seconds.
    pub timeout: u64,
}
impl Default for Config {
    fn default() -> Config {
        Config {
            api: "https://mdwiki.org/w/api.php".into(),
            useragent: concat!("imagecheck/", env!("CARGO_PKG_VERSION")).into(),
            input: "input.txt".into(),
            output: "output.txt".into(),
            timeout: 15,
        }
    }
}
impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Config, Error> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

pub struct Mediawiki {
    client: Client,
    config: Config,
}
impl Mediawiki {
    pub fn new(config: Config) -> Result<Mediawiki, Error> {
        let client = Client::builder()
            .user_agent(config.useragent.clone())
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Mediawiki { client, config })
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn request(&self) -> RequestBuilder {
        RequestBuilder {
            mw: self,
            args: vec![("format".into(), "json".into())],
        }
    }
}

pub struct RequestBuilder<'a> {
    mw: &'a Mediawiki,
    args: Vec<(String, String)>,
}
impl<'a> RequestBuilder<'a> {
    pub fn arg(&mut self, key: impl Into<String>, val: impl Into<String>) -> &mut Self {
        self.args.push((key.into(), val.into()));
        self
    }
    pub fn get(&self) -> Result<Json, Error> {
        debug!("GET {} {:?}", self.mw.config.api, self.args);
        let response = self.mw.client.get(&self.mw.config.api).query(&self.args).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        Ok(response.json()?)
    }
}

/// Reads the input file, checks every listed article and writes the report.
/// Returns the path the report was written to.
pub fn run<S: Revisions>(source: &S, input: &Path, output: &Path) -> Result<PathBuf, Error> {
    let content = input::read_input(input)?;
    let sections = input::parse_sections(&content);
    let path = report::output_path(output);
    let mut out = report::Report::new();
    for section in &sections {
        let result = report::process_section(source, &section.articles);
        out.push(section, &result);
    }
    fs::write(&path, out.finish())?;
    info!("Results written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imagecheck.json");
        fs::write(&path, r#"{"api": "https://example.org/w/api.php", "timeout": 5}"#).unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.api, "https://example.org/w/api.php");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.input, PathBuf::from("input.txt"));
        assert_eq!(config.output, PathBuf::from("output.txt"));
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.api, "https://mdwiki.org/w/api.php");
        assert_eq!(config.timeout, 15);
    }
}

// src/config.rs

use anyhow::{bail, Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;
use url::Url;

use crate::geo::{Gazetteer, GazetteerEntry};
use crate::portal::{driver::Timing, Selectors};

pub const DEFAULT_PORTAL_URL: &str = "https://panelharga.badanpangan.go.id/harga-eceran-daerah";

static DEFAULT_COMMODITIES: &[&str] = &[
    "Beras SPHP",
    "Cabai Rawit Merah",
    "Bawang Putih Bonggol",
    "Bawang Merah",
    "Daging Sapi Murni",
    "Daging Ayam Ras",
    "Telur Ayam Ras",
    "Gula Konsumsi",
    "Garam Konsumsi",
    "Minyak Goreng Curah",
];

/// Run settings. Every field has a default, so a YAML file only needs the
/// keys it wants to change. Any field can also be set from the environment
/// as `PANGAN_<FIELD>`, nested ones as `PANGAN_SELECTORS__<FIELD>`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How many days to collect, counting back from today (today included).
    pub days: u32,
    pub commodities: Vec<String>,
    pub portal_url: String,
    pub webdriver_url: String,
    pub headless: bool,
    /// `.csv` writes CSV, anything else Parquet.
    pub output: PathBuf,
    #[serde(with = "humantime_serde")]
    pub element_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub settle_min: Duration,
    #[serde(with = "humantime_serde")]
    pub settle_max: Duration,
    #[serde(with = "humantime_serde")]
    pub initial_load: Duration,
    pub selectors: Selectors,
    /// Replaces the built-in province table when present. Order matters.
    pub gazetteer: Option<Vec<GazetteerEntry>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days: 1,
            commodities: DEFAULT_COMMODITIES.iter().map(|s| s.to_string()).collect(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            webdriver_url: "http://localhost:4444".to_string(),
            headless: false,
            output: PathBuf::from("data_pangan.parquet"),
            element_timeout: Duration::from_secs(10),
            settle_min: Duration::from_secs(3),
            settle_max: Duration::from_secs(5),
            initial_load: Duration::from_secs(5),
            selectors: Selectors::default(),
            gazetteer: None,
        }
    }
}

/// `PANGAN_*` variables. `vars` replaces the process environment when given.
fn environment(vars: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix("PANGAN")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("commodities")
        .source(vars)
}

impl Settings {
    /// Defaults, then the YAML file at `path` (if any), then environment
    /// overrides. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(p) = path {
            if !p.exists() {
                bail!("config file {} does not exist", p.display());
            }
            builder = builder.add_source(File::from(p).format(FileFormat::Yaml));
        }
        let settings = Self::layered(builder, None)
            .with_context(|| match path {
                Some(p) => format!("loading settings from {} and environment", p.display()),
                None => "loading settings from environment".to_string(),
            })?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Defaults overlaid with YAML text only; the environment is ignored.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let builder = Config::builder().add_source(File::from_str(text, FileFormat::Yaml));
        Self::layered(builder, Some(HashMap::new()))
    }

    fn layered(
        builder: ConfigBuilder<DefaultState>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        // unprefixed, shared with other WebDriver tooling
        let webdriver_url = match &vars {
            Some(map) => map.get("WEBDRIVER_URL").cloned(),
            None => env::var("WEBDRIVER_URL").ok(),
        };

        let mut settings: Settings = builder
            .add_source(environment(vars))
            .build()?
            .try_deserialize()?;

        if let Some(url) = webdriver_url {
            settings.webdriver_url = url;
        }
        settings.commodities = settings
            .commodities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            bail!("days must be at least 1");
        }
        if self.commodities.is_empty() {
            bail!("at least one commodity must be configured");
        }
        if self.settle_min > self.settle_max {
            bail!(
                "settle_min ({:?}) is greater than settle_max ({:?})",
                self.settle_min,
                self.settle_max
            );
        }
        Url::parse(&self.portal_url)
            .with_context(|| format!("invalid portal_url {:?}", self.portal_url))?;
        Url::parse(&self.webdriver_url)
            .with_context(|| format!("invalid webdriver_url {:?}", self.webdriver_url))?;
        if matches!(&self.gazetteer, Some(entries) if entries.is_empty()) {
            bail!("gazetteer, when given, must list at least one region");
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            element_timeout: self.element_timeout,
            settle_min: self.settle_min,
            settle_max: self.settle_max,
        }
    }

    pub fn gazetteer(&self) -> Gazetteer {
        match &self.gazetteer {
            Some(entries) => Gazetteer::from_entries(entries),
            None => Gazetteer::indonesia(),
        }
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "health-reporter.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub portal: Portal,
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub payload: Payload,
    #[serde(default)]
    pub input: Input,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub output: Output,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw)
            .with_context(|| format!("parsing TOML: {}", path.display()))?;
        Ok(cfg)
    }

    /// Explicit path must load; otherwise fall back to `./health-reporter.toml`, then defaults.
    pub fn resolve(user: Option<&Path>) -> Result<Self> {
        if let Some(p) = user {
            return Self::load(p);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.exists() {
            Self::load(default)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Portal {
    pub status_url: String,
    pub on_campus_url: String,
    /// Unverified endpoint. Left empty unless the operator knows the real one.
    pub off_campus_url: String,
}
impl Default for Portal {
    fn default() -> Self {
        Self {
            status_url: "https://jzsz.uestc.edu.cn/wxvacation/checkRegisterNew".into(),
            on_campus_url: "https://jzsz.uestc.edu.cn/wxvacation/monitorRegisterForReturned"
                .into(),
            off_campus_url: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    pub user_agent: String,
    pub timeout_seconds: u64,
}
impl Default for Http {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/93.0.4577.63 Safari/537.36 Edg/93.0.961.38".into(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub on_campus: OnCampusPayload,
    pub off_campus: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnCampusPayload {
    pub health_condition: String,
    pub today_morning_temperature: String,
    pub yesterday_midday_temperature: String,
    pub yesterday_evening_temperature: String,
    pub location: String,
}
impl Default for OnCampusPayload {
    fn default() -> Self {
        Self {
            health_condition: "正常".into(),
            today_morning_temperature: "36°C~36.5°C".into(),
            yesterday_midday_temperature: "36°C~36.5°C".into(),
            yesterday_evening_temperature: "36°C~36.5°C".into(),
            location: "四川省成都市郫都区银杏大道".into(),
        }
    }
}

impl OnCampusPayload {
    /// Form fields under the names the portal expects.
    pub fn form_fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("healthCondition".to_string(), self.health_condition.clone()),
            (
                "todayMorningTemperature".to_string(),
                self.today_morning_temperature.clone(),
            ),
            (
                "yesterdayMiddayTemperature".to_string(),
                self.yesterday_midday_temperature.clone(),
            ),
            (
                "yesterdayEveningTemperature".to_string(),
                self.yesterday_evening_temperature.clone(),
            ),
            ("location".to_string(), self.location.clone()),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    pub delimiter: String,
}
impl Default for Input {
    fn default() -> Self {
        Self {
            delimiter: "#".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "health-reporter.log".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Where to write the JSON run report. Empty disables it.
    pub report_path: String,
}

use crate::error::{Result, SmartFarmError};
use serde::{Deserialize, Serialize};
use smartfarm_common::api::DEFAULT_BASE_URL;
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "SMARTFARM_API_BASE_URL";
pub const ENV_SESSION: &str = "SMARTFARM_SESSION";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// 로그인 세션 쿠키 (`session=...`)
    pub session_cookie: Option<String>,
    pub timeout_seconds: u64,
    pub default_farm_id: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_cookie: None,
            timeout_seconds: 30,
            default_farm_id: None,
        }
    }
}

impl Config {
    /// 실제로 쓰일 설정: 환경 변수, 그다음 명령행 `--base-url` 순으로 덮어쓴다
    pub fn with_overrides(mut self, base_url: Option<&str>) -> Result<Self> {
        self.apply_env(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_SESSION).ok(),
        );
        if let Some(url) = base_url {
            self.set_base_url(url)?;
        }
        Ok(self)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SmartFarmError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("smartfarm").join("config.json"))
    }

    /// 환경 변수 우선
    pub fn apply_env(&mut self, base_url: Option<String>, session: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(cookie) = session.filter(|s| !s.trim().is_empty()) {
            self.session_cookie = Some(cookie.trim().to_string());
        }
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SmartFarmError::Config(format!("http(s) 주소가 아닙니다: {}", url)));
        }
        self.base_url = url.to_string();
        Ok(())
    }

    /// `config --show` 출력
    pub fn describe(&self) -> String {
        let session = if self.session_cookie.is_some() { "설정됨" } else { "미설정" };
        let farm = self
            .default_farm_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "미설정".into());
        format!(
            "설정:\n  API 서버: {}\n  세션: {}\n  타임아웃: {}초\n  기본 농장: {}",
            self.base_url, session, self.timeout_seconds, farm
        )
    }

    pub fn farm_id(&self, explicit: Option<i64>) -> Result<i64> {
        explicit
            .or(self.default_farm_id)
            .ok_or(SmartFarmError::MissingFarmId)
    }
}

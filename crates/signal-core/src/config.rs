//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 우선순위: 기본값 → 설정 파일 → `SIGNAL__` 접두사 환경 변수.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "SIGNAL_CONFIG";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 시세 제공자 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// 캔들 수집 설정
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
    /// CORS 설정
    #[serde(default)]
    pub cors: CorsConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 시세 제공자 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// 제공자 호출당 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// Yahoo Finance 설정
    pub yahoo: YahooConfig,
    /// Twelve Data 설정
    pub twelve_data: TwelveDataConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 5,
            yahoo: YahooConfig::default(),
            twelve_data: TwelveDataConfig::default(),
        }
    }
}

/// Yahoo Finance 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct YahooConfig {
    /// 1차 조회 심볼 (지수)
    pub target_symbol: String,
    /// 2차 조회 심볼 (같은 지수를 추종하는 ETF)
    pub proxy_symbol: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            target_symbol: "^NSEI".to_string(),
            proxy_symbol: "NIFTYBEES.NS".to_string(),
        }
    }
}

/// Twelve Data 설정.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TwelveDataConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 최종 폴백 심볼 (다른 종목일 수 있음)
    pub symbol: String,
    /// API 키 (설정 파일 또는 환경 변수로만 주입)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twelvedata.com".to_string(),
            symbol: "INFY".to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for TwelveDataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwelveDataConfig")
            .field("base_url", &self.base_url)
            .field("symbol", &self.symbol)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// 캔들 수집 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// 요청당 조회할 일봉 개수
    pub days: usize,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self { days: 20 }
    }
}

/// CORS 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 허용 origin 목록
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:8888".to_string()],
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드 (선택)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("SIGNAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로 또는 `SIGNAL_CONFIG`가 가리키는 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 설정 값의 일관성을 검증합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.acquisition.days == 0 {
            return Err(CoreError::Config("acquisition.days는 1 이상이어야 합니다".to_string()));
        }
        if self.providers.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "providers.request_timeout_secs는 1 이상이어야 합니다".to_string(),
            ));
        }

        let symbols = [
            ("providers.yahoo.target_symbol", &self.providers.yahoo.target_symbol),
            ("providers.yahoo.proxy_symbol", &self.providers.yahoo.proxy_symbol),
            ("providers.twelve_data.symbol", &self.providers.twelve_data.symbol),
        ];
        for (key, value) in symbols {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("{}가 비어 있습니다", key)));
            }
        }

        Ok(())
    }
}

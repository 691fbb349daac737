//! Twelve Data REST time-series 클라이언트.
//!
//! `GET /time_series?symbol=..&interval=1day&outputsize=..&apikey=..` 를 호출합니다.
//!
//! # 응답 형식
//!
//! 성공 시 `values` 배열(최신순, 숫자는 문자열)을 반환하고,
//! 실패 시 `values` 없이 `message` 필드만 반환합니다.
//!
//! ```json
//! {"meta": {...}, "values": [{"datetime": "2024-01-05", "open": "21705.1", ...}], "status": "ok"}
//! {"code": 401, "message": "**apikey** parameter is incorrect", "status": "error"}
//! ```
//!
//! # API 키 관리
//!
//! API 키는 설정에서 주입되며 `SecretString`으로 보관합니다.
//! 오류 메시지에는 요청 URL(API 키 포함)을 남기지 않습니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use signal_core::{Bar, BarSeries, ProviderKind, TwelveDataConfig};
use tracing::{debug, info};

use super::BarProvider;
use crate::error::{ProviderError, Result};

/// 일봉 조회 간격.
const DAILY_INTERVAL: &str = "1day";

/// Twelve Data REST 클라이언트.
#[derive(Clone)]
pub struct TwelveDataProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

/// time_series 응답.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    values: Option<Vec<TimeSeriesValue>>,
    #[serde(default)]
    message: Option<String>,
}

/// time_series 개별 레코드 (숫자 필드는 문자열).
#[derive(Debug, Deserialize)]
struct TimeSeriesValue {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

impl TwelveDataProvider {
    /// 새로운 Twelve Data 클라이언트 생성.
    ///
    /// # Arguments
    /// * `base_url` - REST API 기본 URL (테스트 시 mock 서버 주소)
    /// * `api_key` - 인증키 (없으면 모든 호출이 실패)
    /// * `timeout` - HTTP 요청 타임아웃
    pub fn new(base_url: impl Into<String>, api_key: Option<SecretString>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::from)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// 설정에서 클라이언트 생성.
    pub fn from_config(config: &TwelveDataConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.clone().into()));

        Self::new(config.base_url.clone(), api_key, timeout)
    }

    /// API 키 설정 여부.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// 숫자 문자열 파싱.
    fn parse_number(field: &str, raw: &str) -> Result<f64> {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ProviderError::Parse(format!("{} 값 '{}' 파싱 실패: {}", field, raw, e)))
    }

    /// 날짜 문자열 파싱 ("YYYY-MM-DD" 또는 "YYYY-MM-DD HH:MM:SS").
    fn parse_datetime(raw: &str) -> Result<DateTime<Utc>> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Ok(dt.and_utc());
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| ProviderError::Parse(format!("datetime 값 '{}' 파싱 실패", raw)))
    }

    /// 레코드를 Bar로 변환.
    fn value_to_bar(value: &TimeSeriesValue) -> Result<Bar> {
        let volume = match value.volume.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Self::parse_number("volume", raw)?,
            _ => 0.0,
        };

        Ok(Bar::new(
            Self::parse_datetime(&value.datetime)?,
            Self::parse_number("open", &value.open)?,
            Self::parse_number("high", &value.high)?,
            Self::parse_number("low", &value.low)?,
            Self::parse_number("close", &value.close)?,
            volume,
        ))
    }

    /// 응답 본문을 캔들 목록으로 변환 (최신순 → 오래된 순).
    fn parse_response(symbol: &str, body: TimeSeriesResponse) -> Result<Vec<Bar>> {
        let Some(values) = body.values else {
            return Err(ProviderError::MissingValues {
                detail: body
                    .message
                    .unwrap_or_else(|| format!("Twelve Data: {} 응답에 values가 없습니다", symbol)),
            });
        };

        if values.is_empty() {
            return Err(ProviderError::EmptyResult(format!("Twelve Data: {} 데이터 없음", symbol)));
        }

        let mut bars = values
            .iter()
            .map(Self::value_to_bar)
            .collect::<Result<Vec<Bar>>>()?;
        bars.reverse();

        Ok(bars)
    }
}

#[async_trait]
impl BarProvider for TwelveDataProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::TwelveData
    }

    async fn fetch_bars(&self, symbol: &str, days: usize) -> Result<BarSeries> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(ProviderError::Transport("Twelve Data api key not configured".to_string()));
        };

        let url = format!("{}/time_series", self.base_url);
        let outputsize = days.to_string();

        info!(
            symbol = %symbol,
            interval = DAILY_INTERVAL,
            outputsize = days,
            "Twelve Data: requesting time series"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", DAILY_INTERVAL),
                ("outputsize", outputsize.as_str()),
                ("apikey", api_key.expose_secret()),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        // 오류 응답도 JSON `message`를 담고 있으므로 상태 코드와 무관하게 본문을 해석
        let status = response.status();
        let text = response.text().await?;
        let body: TimeSeriesResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Transport(format!("Twelve Data 응답 해석 실패 [{}]: {}", status, e))
        })?;

        let bars = Self::parse_response(symbol, body)?;
        debug!(symbol = %symbol, count = bars.len(), "Twelve Data: 캔들 수신");

        Ok(BarSeries::normalized(symbol, bars, days))
    }
}

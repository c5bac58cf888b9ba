//! # ヘルスチェックのレスポンス型
//!
//! `GET /health` と `GET /health/ready` のボディ。
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0" }
//! { "status": "not_ready", "checks": { "database": "error" } }
//! ```

use serde::Serialize;

/// Liveness Check のレスポンス
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:  &'static str,
    pub version: String,
}

impl HealthResponse {
    /// 稼働中を示すレスポンスを作成する
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy",
            version: version.into(),
        }
    }
}

/// 依存先ごとの確認結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Readiness の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

/// 確認対象の依存先
#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub database: CheckStatus,
}

/// Readiness Check のレスポンス
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    pub checks: ReadinessChecks,
}

impl ReadinessResponse {
    /// DB の確認結果からレスポンスを作成する
    pub fn from_database(database: CheckStatus) -> Self {
        let status = match database {
            CheckStatus::Ok => ReadinessStatus::Ready,
            CheckStatus::Error => ReadinessStatus::NotReady,
        };
        Self {
            status,
            checks: ReadinessChecks { database },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_healthyはstatusとversionを出力する() {
        let json = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();

        assert_eq!(json, json!({ "status": "healthy", "version": "0.1.0" }));
    }

    #[test]
    fn test_db接続成功ならready() {
        let response = ReadinessResponse::from_database(CheckStatus::Ok);

        assert!(response.is_ready());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "ready", "checks": { "database": "ok" } })
        );
    }

    #[test]
    fn test_db接続失敗ならnot_ready() {
        let response = ReadinessResponse::from_database(CheckStatus::Error);

        assert!(!response.is_ready());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "not_ready", "checks": { "database": "error" } })
        );
    }
}

//! # GET /health
//!
//! 実際の稼働状態は判定しない、シミュレーション用のヘルスエンドポイント。
//! 固定の3通りの応答から一様ランダムに1つを返す。

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use filegate_types::HealthResponse;
use rand::Rng;

use crate::config::GatewayState;

/// /health が返しうる応答（ステータスとメッセージの組）。
pub const HEALTH_OUTCOMES: [(StatusCode, &str); 3] = [
    (StatusCode::OK, "API is healthy."),
    (StatusCode::BAD_REQUEST, "Invalid request (simulation)."),
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error (simulation)."),
];

/// /health の応答を選ぶ乱数源。テストでは固定値を返す実装に差し替える。
pub trait OutcomePicker: Send + Sync {
    /// `0..len` の範囲からインデックスを1つ選ぶ。
    ///
    /// 範囲外の値を返してはならない。`len` は常に1以上。
    fn pick(&self, len: usize) -> usize;
}

/// スレッドローカルRNGによる一様選択。
pub struct ThreadRngPicker;

impl OutcomePicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// GET /health — ランダムなステータスを返す。
pub async fn handle_health(
    State(state): State<Arc<GatewayState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, message) = HEALTH_OUTCOMES[state.outcome_picker.pick(HEALTH_OUTCOMES.len())];

    (
        status,
        Json(HealthResponse {
            status: status.as_u16(),
            message: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_helpers::{
        start_gateway, test_state_with_picker, FixedPicker, MockStorage,
    };

    /// 全ての分岐がステータスとメッセージの正しい組を返すことを確認
    #[tokio::test]
    async fn test_each_outcome() {
        for (index, (expected_status, expected_message)) in HEALTH_OUTCOMES.iter().enumerate() {
            let state = test_state_with_picker(MockStorage::new(), FixedPicker(index));
            let (status, Json(body)) = handle_health(State(state)).await;

            assert_eq!(status, *expected_status);
            assert_eq!(body.status, expected_status.as_u16());
            assert_eq!(body.message, *expected_message);
        }
    }

    /// 本番の乱数源でも3通り以外の応答は返らないことを確認
    #[test]
    fn test_thread_rng_picker_stays_in_range() {
        let picker = ThreadRngPicker;
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let index = picker.pick(HEALTH_OUTCOMES.len());
            assert!(index < HEALTH_OUTCOMES.len());
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s), "not every outcome was drawn: {seen:?}");
    }

    /// HTTP経由でもステータスコードと本文のstatusが一致することを確認
    #[tokio::test]
    async fn test_health_over_http() {
        let state = test_state_with_picker(MockStorage::new(), FixedPicker(2));
        let port = start_gateway(state).await;

        let response = reqwest::get(format!("http://127.0.0.1:{port}/health"))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);

        let body: HealthResponse = response.json().await.unwrap();
        assert_eq!(body.status, 500);
        assert_eq!(body.message, "Internal server error (simulation).");
    }
}

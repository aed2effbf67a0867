//! # ヘルスチェックハンドラ
//!
//! プロセスの稼働確認用エンドポイント。
//!
//! ```text
//! GET /health
//! {"status":"healthy","version":"0.1.0"}
//! ```
//!
//! データベースへの接続は確認しない（liveness のみ）。

use axum::Json;
use todo_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK を返す。`version` は `Cargo.toml` のバージョン。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

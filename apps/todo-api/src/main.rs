//! # Todo API サーバー
//!
//! Todo リソースの CRUD API を提供するサーバーのエントリーポイント。
//!
//! ## 起動シーケンス
//!
//! ```text
//! .env 読み込み → トレーシング初期化 → 設定読み込み
//!   → 接続プール作成 → 疎通確認 → テーブル作成
//!   → ルーター構築 → HTTP サーバー起動
//! ```
//!
//! いずれかの手順が失敗した場合は非ゼロで終了し、リクエストを受け付けない。
//! Ctrl-C / SIGTERM を受け取ると処理中のリクエストを完了させてから停止し、
//! 接続プールを閉じる。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todo-api
//!
//! # JSON ログ
//! LOG_FORMAT=json PORT=8080 DATABASE_URL=postgres://... cargo run -p todo-api --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use todo_api::{config::AppConfig, router::build_router};
use todo_infra::{db, repository::PostgresTodoRepository};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("todo-api");
   init_tracing(&tracing_config);
   let _tracing_guard = tracing_config.root_span().entered();

   // 設定読み込み
   let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;
   tracing::info!(
      "サーバーを起動します: {}:{}",
      config.server.host,
      config.server.port
   );

   // データベース接続プールを作成
   let options = config
      .database
      .connect_options()
      .context("接続設定が不正です")?;
   let pool = db::create_pool(options, &config.database.pool_settings())
      .await
      .context("データベース接続に失敗しました")?;
   db::ping(&pool)
      .await
      .context("データベースの疎通確認に失敗しました")?;
   tracing::info!("データベースに接続しました");

   db::ensure_schema(&pool)
      .await
      .context("テーブルの作成に失敗しました")?;

   // 依存コンポーネントを初期化
   let repository = Arc::new(PostgresTodoRepository::new(pool.clone()));
   let app = build_router(repository);

   // サーバー起動
   let listener = TcpListener::bind(config.server.bind_address())
      .await
      .context("ポートのバインドに失敗しました")?;
   tracing::info!("サーバーが起動しました: {}", listener.local_addr()?);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("データベース接続を閉じます");
   pool.close().await;

   Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!("Ctrl-C ハンドラの登録に失敗しました: {}", e);
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("シャットダウンシグナルを受信しました");
}

//! # ルーター
//!
//! エンドポイントとハンドラの対応表を構築する。
//!
//! | メソッド | パス | ハンドラ |
//! |----------|------|----------|
//! | `POST` | `/api/todos` | [`create_todo`] |
//! | `GET` | `/api/todos` | [`list_todos`] |
//! | `GET` | `/api/todos/{id}` | [`get_todo`] |
//! | `PUT` | `/api/todos/{id}` | [`update_todo`] |
//! | `DELETE` | `/api/todos/{id}` | [`delete_todo`] |
//! | `GET` | `/health` | [`health_check`] |
//!
//! リポジトリはトレイトオブジェクトで受け取るため、テストでは
//! `MockTodoRepository` を渡して HTTP 層だけを検証できる。

use std::sync::Arc;

use axum::{Router, routing::get};
use todo_infra::repository::TodoRepository;
use tower_http::trace::TraceLayer;

use crate::handler::{
   create_todo,
   delete_todo,
   get_todo,
   health_check,
   list_todos,
   update_todo,
};

/// アプリケーションのルーターを構築する
pub fn build_router(repository: Arc<dyn TodoRepository>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route("/api/todos", get(list_todos).post(create_todo))
      .route(
         "/api/todos/{id}",
         get(get_todo).put(update_todo).delete(delete_todo),
      )
      .with_state(repository)
      .layer(TraceLayer::new_for_http())
}

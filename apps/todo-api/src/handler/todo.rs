//! # Todo ハンドラ
//!
//! Todo の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/todos` - Todo 作成
//! - `GET /api/todos` - Todo 一覧（作成日時の降順）
//! - `GET /api/todos/{id}` - Todo 取得
//! - `PUT /api/todos/{id}` - Todo 部分更新
//! - `DELETE /api/todos/{id}` - Todo 削除
//!
//! ## 処理の流れ
//!
//! 1. パスパラメータ（`{id}`）とリクエストボディをデコードする。
//!    ボディは `Content-Type` を問わず JSON として読む
//! 2. 最小限の検証を行う（ボディの形式、ID の形式、タイトルが空でないこと）
//! 3. リポジトリを呼び出す
//! 4. 結果を JSON に変換する（エラーは [`ApiError`] が変換する）

use std::sync::Arc;

use axum::{
   Json,
   body::Bytes,
   extract::{Path, State},
   http::StatusCode,
   response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoId, TodoTitle};
use todo_infra::repository::TodoRepository;
use todo_shared::{MessageResponse, error_response::INVALID_PAYLOAD_MESSAGE};

use crate::error::ApiError;

/// 削除成功時のメッセージ
pub const DELETED_MESSAGE: &str = "Todo deleted successfully";

/// Todo API の共有状態
pub type TodoState = Arc<dyn TodoRepository>;

// --- リクエスト/レスポンス型 ---

/// Todo 作成リクエスト
///
/// `title` の欠落と `null` は空文字列と同じく "Title is required" になる。
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
   #[serde(default)]
   pub title:       Option<String>,
   #[serde(default)]
   pub description: Option<String>,
}

/// Todo 部分更新リクエスト
///
/// 各フィールドは指定されたときだけ更新される。`null` は未指定と同じ扱い。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
   #[serde(default)]
   pub title:       Option<String>,
   #[serde(default)]
   pub description: Option<String>,
   #[serde(default)]
   pub completed:   Option<bool>,
}

impl UpdateTodoRequest {
   /// 変更セットに変換する
   ///
   /// 空文字列のタイトルは "Title is required" で拒否する。
   fn into_changes(self) -> Result<TodoChanges, ApiError> {
      Ok(TodoChanges {
         title:       self.title.map(TodoTitle::new).transpose()?,
         description: self.description,
         completed:   self.completed,
      })
   }
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
   pub id:          i64,
   pub title:       String,
   pub description: String,
   pub completed:   bool,
   pub created_at:  DateTime<Utc>,
   pub updated_at:  DateTime<Utc>,
}

impl From<&Todo> for TodoDto {
   fn from(todo: &Todo) -> Self {
      Self {
         id:          todo.id().as_i64(),
         title:       todo.title().to_string(),
         description: todo.description().to_string(),
         completed:   todo.completed(),
         created_at:  todo.created_at(),
         updated_at:  todo.updated_at(),
      }
   }
}

/// リクエストボディを JSON としてデコードする
///
/// ボディ全体が `null` の場合は全フィールド未指定として扱う。
/// デコードに失敗した場合は 400 "Invalid request payload"。
fn decode_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
   match serde_json::from_slice::<Option<T>>(body) {
      Ok(decoded) => Ok(decoded.unwrap_or_default()),
      Err(e) => {
         tracing::debug!(error = %e, "リクエストボディのデコードに失敗しました");
         Err(ApiError::Validation(INVALID_PAYLOAD_MESSAGE.to_string()))
      }
   }
}

// --- ハンドラ ---

/// POST /api/todos
///
/// ## レスポンス
///
/// - `201 Created`: 作成された Todo
/// - `400 Bad Request`: ボディ不正、タイトル未入力
/// - `500 Internal Server Error`: ストアでの失敗
#[tracing::instrument(skip_all)]
pub async fn create_todo(
   State(repository): State<TodoState>,
   body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
   let req: CreateTodoRequest = decode_body(&body)?;
   let title = TodoTitle::new(req.title.unwrap_or_default())?;

   let todo = repository
      .create(&NewTodo::new(title, req.description))
      .await?;

   tracing::info!(id = %todo.id(), "Todo を作成しました");
   Ok((StatusCode::CREATED, Json(TodoDto::from(&todo))))
}

/// GET /api/todos
///
/// 0 件の場合は空配列 `[]` を返す。
#[tracing::instrument(skip_all)]
pub async fn list_todos(
   State(repository): State<TodoState>,
) -> Result<Json<Vec<TodoDto>>, ApiError> {
   let todos = repository.list().await?;

   Ok(Json(todos.iter().map(TodoDto::from).collect()))
}

/// GET /api/todos/{id}
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn get_todo(
   State(repository): State<TodoState>,
   Path(id): Path<String>,
) -> Result<Json<TodoDto>, ApiError> {
   let id: TodoId = id.parse()?;

   let todo = repository.get_by_id(id).await?;

   Ok(Json(TodoDto::from(&todo)))
}

/// PUT /api/todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Todo（変更なしのボディでは現在の値）
/// - `400 Bad Request`: ID 不正、ボディ不正、空のタイトル
/// - `404 Not Found`: 該当する Todo がない
/// - `500 Internal Server Error`: ストアでの失敗
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update_todo(
   State(repository): State<TodoState>,
   Path(id): Path<String>,
   body: Bytes,
) -> Result<Json<TodoDto>, ApiError> {
   let id: TodoId = id.parse()?;
   let changes = decode_body::<UpdateTodoRequest>(&body)?.into_changes()?;

   let todo = repository.update(id, &changes).await?;

   Ok(Json(TodoDto::from(&todo)))
}

/// DELETE /api/todos/{id}
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_todo(
   State(repository): State<TodoState>,
   Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
   let id: TodoId = id.parse()?;

   repository.delete(id).await?;

   tracing::info!(%id, "Todo を削除しました");
   Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **書き込み後の再取得**: create / update は書き込み後に ID で行を読み直して返す。
//!   タイムスタンプはストアが設定した値が正となる
//! - **NotFound の区別**: 該当行なしは `InfraErrorKind::NotFound`、
//!   それ以外のストア障害は `InfraErrorKind::Database` で返す
//! - **部分更新**: 指定されたカラムだけを `SET` 句に含める。
//!   存在しない ID への UPDATE は 0 行更新となり、続く再取得で NotFound になる

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoId};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// Todo を作成し、ストアが採番した ID とタイムスタンプを含む行を返す
   async fn create(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

   /// 全件を作成日時の降順で取得する
   async fn list(&self) -> Result<Vec<Todo>, InfraError>;

   /// ID で Todo を取得する
   ///
   /// 該当行がなければ `InfraErrorKind::NotFound` を返す。
   async fn get_by_id(&self, id: TodoId) -> Result<Todo, InfraError>;

   /// 指定されたフィールドだけを更新し、更新後の行を返す
   ///
   /// 変更セットが空の場合は何も書き込まず、現在の行を返す。
   async fn update(&self, id: TodoId, changes: &TodoChanges) -> Result<Todo, InfraError>;

   /// Todo を削除する
   ///
   /// 削除された行がなければ `InfraErrorKind::NotFound` を返す。
   async fn delete(&self, id: TodoId) -> Result<(), InfraError>;
}

/// `todos` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
   id:          i64,
   title:       String,
   description: Option<String>,
   completed:   bool,
   created_at:  DateTime<Utc>,
   updated_at:  DateTime<Utc>,
}

impl From<TodoRow> for Todo {
   fn from(row: TodoRow) -> Self {
      Todo::from_db(
         TodoId::from_i64(row.id),
         row.title,
         row.description,
         row.completed,
         row.created_at,
         row.updated_at,
      )
   }
}

/// 部分更新の UPDATE 文を組み立てる
///
/// 変更セットに含まれるカラムだけを `SET` 句に並べ、最後に
/// `updated_at = NOW()` を付ける。変更セットが空なら `None`。
fn build_update_query(id: TodoId, changes: &TodoChanges) -> Option<QueryBuilder<'_, Postgres>> {
   if changes.is_empty() {
      return None;
   }

   let mut builder = QueryBuilder::new("UPDATE todos SET ");
   {
      let mut set = builder.separated(", ");
      if let Some(title) = &changes.title {
         set.push("title = ").push_bind_unseparated(title.as_str());
      }
      if let Some(description) = &changes.description {
         set.push("description = ")
            .push_bind_unseparated(description.as_str());
      }
      if let Some(completed) = changes.completed {
         set.push("completed = ").push_bind_unseparated(completed);
      }
      set.push("updated_at = NOW()");
   }
   builder.push(" WHERE id = ").push_bind(id.as_i64());

   Some(builder)
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
   pool: PgPool,
}

impl PostgresTodoRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn create(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      let id: i64 = sqlx::query_scalar(
         r#"
         INSERT INTO todos (title, description)
         VALUES ($1, $2)
         RETURNING id
         "#,
      )
      .bind(new_todo.title().as_str())
      .bind(new_todo.description())
      .fetch_one(&self.pool)
      .await
      .map_err(|e| InfraError::database("create todo", e))?;

      self.get_by_id(TodoId::from_i64(id)).await
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn list(&self) -> Result<Vec<Todo>, InfraError> {
      let rows = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, title, description, completed, created_at, updated_at
         FROM todos
         ORDER BY created_at DESC, id DESC
         "#,
      )
      .fetch_all(&self.pool)
      .await
      .map_err(|e| InfraError::database("query todos", e))?;

      Ok(rows.into_iter().map(Todo::from).collect())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn get_by_id(&self, id: TodoId) -> Result<Todo, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, title, description, completed, created_at, updated_at
         FROM todos
         WHERE id = $1
         "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| InfraError::database("get todo", e))?;

      let Some(row) = row else {
         return Err(InfraError::not_found(id));
      };

      Ok(row.into())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn update(&self, id: TodoId, changes: &TodoChanges) -> Result<Todo, InfraError> {
      let Some(mut query) = build_update_query(id, changes) else {
         return self.get_by_id(id).await;
      };

      query
         .build()
         .execute(&self.pool)
         .await
         .map_err(|e| InfraError::database("update todo", e))?;

      self.get_by_id(id).await
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: TodoId) -> Result<(), InfraError> {
      let result = sqlx::query(
         r#"
         DELETE FROM todos
         WHERE id = $1
         "#,
      )
      .bind(id.as_i64())
      .execute(&self.pool)
      .await
      .map_err(|e| InfraError::database("delete todo", e))?;

      if result.rows_affected() == 0 {
         return Err(InfraError::not_found(id));
      }

      Ok(())
   }
}

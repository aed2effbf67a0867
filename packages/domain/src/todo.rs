//! # Todo
//!
//! タイトル・説明・完了フラグを持つタスクを表現するドメインモデル。
//!
//! ## 識別子とタイムスタンプ
//!
//! ID と `created_at` / `updated_at` はストアが採番・設定する。
//! ドメイン層はこれらを生成せず、[`Todo::from_db`] で復元するだけである。
//!
//! ## 部分更新
//!
//! [`TodoChanges`] はフィールドごとに「指定あり / 指定なし」を `Option` で保持する。
//! `None` は「変更しない」、`Some("")` や `Some(false)` は「その値に設定する」を意味し、
//! ゼロ値を「未指定」の代わりに使うことはしない。
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::{TodoChanges, TodoId, TodoTitle};
//!
//! let id: TodoId = "42".parse().unwrap();
//! assert_eq!(id.as_i64(), 42);
//!
//! let changes = TodoChanges {
//!     completed: Some(true),
//!     ..Default::default()
//! };
//! assert!(!changes.is_empty());
//! assert!(TodoTitle::new("").is_err());
//! ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// タイトル未入力時のメッセージ
pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";

/// ID の形式不正時のメッセージ
pub const INVALID_ID_MESSAGE: &str = "Invalid todo ID";

// =========================================================================
// TodoId
// =========================================================================

/// Todo の一意識別子
///
/// ストアの自動採番（`BIGSERIAL`）による整数値をラップする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
   /// 既存の整数値から ID を作成する
   pub fn from_i64(value: i64) -> Self {
      Self(value)
   }

   /// 内部の整数値を取得する
   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

impl FromStr for TodoId {
   type Err = DomainError;

   /// パスパラメータの文字列から ID をパースする
   fn from_str(s: &str) -> Result<Self, Self::Err> {
      s.parse::<i64>()
         .map(Self)
         .map_err(|_| DomainError::Validation(INVALID_ID_MESSAGE.to_string()))
   }
}

// =========================================================================
// TodoTitle
// =========================================================================

/// Todo のタイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTitle(String);

impl TodoTitle {
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();

      if value.is_empty() {
         return Err(DomainError::Validation(TITLE_REQUIRED_MESSAGE.to_string()));
      }

      Ok(Self(value))
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// 所有権を持つ文字列に変換する
   pub fn into_string(self) -> String {
      self.0
   }
}

impl std::fmt::Display for TodoTitle {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "{}", self.0)
   }
}

// =========================================================================
// NewTodo / TodoChanges（入力値）
// =========================================================================

/// Todo 作成の入力値
///
/// 説明が省略された場合は空文字列として永続化する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
   title:       TodoTitle,
   description: String,
}

impl NewTodo {
   pub fn new(title: TodoTitle, description: Option<String>) -> Self {
      Self {
         title,
         description: description.unwrap_or_default(),
      }
   }

   pub fn title(&self) -> &TodoTitle {
      &self.title
   }

   pub fn description(&self) -> &str {
      &self.description
   }
}

/// Todo 部分更新の変更セット
///
/// 各フィールドは `Some` のときだけ更新対象になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
   pub title:       Option<TodoTitle>,
   pub description: Option<String>,
   pub completed:   Option<bool>,
}

impl TodoChanges {
   /// 更新対象のフィールドが 1 つもないか
   pub fn is_empty(&self) -> bool {
      self.title.is_none() && self.description.is_none() && self.completed.is_none()
   }
}

// =========================================================================
// Todo（エンティティ）
// =========================================================================

/// Todo エンティティ
///
/// # 不変条件
///
/// - `id` はストアが採番した一意な値
/// - `title` は空ではない（作成・更新時に [`TodoTitle`] で検証済み）
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:          TodoId,
   title:       String,
   description: String,
   completed:   bool,
   created_at:  DateTime<Utc>,
   updated_at:  DateTime<Utc>,
}

impl Todo {
   /// 採番済みの ID で新しい Todo を作成する
   ///
   /// 作成直後は `created_at == updated_at`、`completed == false`。
   pub fn new(id: TodoId, input: NewTodo, now: DateTime<Utc>) -> Self {
      Self {
         id,
         title: input.title.into_string(),
         description: input.description,
         completed: false,
         created_at: now,
         updated_at: now,
      }
   }

   /// データベースから Todo を復元する
   ///
   /// `description` が NULL の行は空文字列として扱う。
   pub fn from_db(
      id: TodoId,
      title: String,
      description: Option<String>,
      completed: bool,
      created_at: DateTime<Utc>,
      updated_at: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         title,
         description: description.unwrap_or_default(),
         completed,
         created_at,
         updated_at,
      }
   }

   /// 変更セットを適用した Todo を返す
   ///
   /// 変更セットが空の場合は何も変えない（`updated_at` も据え置く）。
   pub fn apply(self, changes: &TodoChanges, now: DateTime<Utc>) -> Self {
      if changes.is_empty() {
         return self;
      }

      Self {
         title: changes
            .title
            .as_ref()
            .map_or(self.title, |t| t.as_str().to_string()),
         description: changes.description.clone().unwrap_or(self.description),
         completed: changes.completed.unwrap_or(self.completed),
         updated_at: now,
         ..self
      }
   }

   // Getter メソッド

   pub fn id(&self) -> TodoId {
      self.id
   }

   pub fn title(&self) -> &str {
      &self.title
   }

   pub fn description(&self) -> &str {
      &self.description
   }

   pub fn completed(&self) -> bool {
      self.completed
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   pub fn updated_at(&self) -> DateTime<Utc> {
      self.updated_at
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::{fixture, rstest};

   use super::*;

   #[fixture]
   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   #[fixture]
   fn todo(now: DateTime<Utc>) -> Todo {
      Todo::new(
         TodoId::from_i64(1),
         NewTodo::new(
            TodoTitle::new("牛乳を買う").unwrap(),
            Some("低脂肪".to_string()),
         ),
         now,
      )
   }

   // ===== TodoId =====

   #[rstest]
   #[case("1", 1)]
   #[case("42", 42)]
   #[case("-3", -3)]
   fn test_todo_idは整数文字列をパースできる(#[case] input: &str, #[case] expected: i64) {
      let id: TodoId = input.parse().unwrap();
      assert_eq!(id.as_i64(), expected);
   }

   #[rstest]
   #[case("abc")]
   #[case("")]
   #[case("1.5")]
   #[case("99999999999999999999")]
   fn test_todo_idは整数以外を拒否する(#[case] input: &str) {
      let result = input.parse::<TodoId>();
      assert_eq!(
         result,
         Err(DomainError::Validation("Invalid todo ID".to_string()))
      );
   }

   // ===== TodoTitle =====

   #[test]
   fn test_todo_titleは空文字列を拒否する() {
      assert_eq!(
         TodoTitle::new(""),
         Err(DomainError::Validation("Title is required".to_string()))
      );
   }

   #[test]
   fn test_todo_titleは空白のみのタイトルをそのまま受け入れる() {
      let title = TodoTitle::new("  ").unwrap();
      assert_eq!(title.as_str(), "  ");
   }

   // ===== NewTodo =====

   #[test]
   fn test_new_todoは説明省略時に空文字列になる() {
      let input = NewTodo::new(TodoTitle::new("掃除").unwrap(), None);
      assert_eq!(input.description(), "");
   }

   // ===== Todo =====

   #[rstest]
   fn test_新規todoは未完了で作成日時と更新日時が等しい(todo: Todo, now: DateTime<Utc>) {
      assert!(!todo.completed());
      assert_eq!(todo.created_at(), now);
      assert_eq!(todo.updated_at(), todo.created_at());
   }

   #[rstest]
   fn test_from_dbはnullの説明を空文字列にする(now: DateTime<Utc>) {
      let todo = Todo::from_db(TodoId::from_i64(7), "t".to_string(), None, true, now, now);
      assert_eq!(todo.description(), "");
      assert!(todo.completed());
   }

   #[rstest]
   fn test_applyは指定したフィールドだけを更新する(todo: Todo, now: DateTime<Utc>) {
      let later = now + chrono::Duration::seconds(10);
      let changes = TodoChanges {
         completed: Some(true),
         ..Default::default()
      };

      let updated = todo.clone().apply(&changes, later);

      assert!(updated.completed());
      assert_eq!(updated.title(), todo.title());
      assert_eq!(updated.description(), todo.description());
      assert_eq!(updated.created_at(), now);
      assert_eq!(updated.updated_at(), later);
   }

   #[rstest]
   fn test_applyは空文字列の説明を値として設定する(todo: Todo, now: DateTime<Utc>) {
      let changes = TodoChanges {
         description: Some(String::new()),
         ..Default::default()
      };

      let updated = todo.apply(&changes, now);

      assert_eq!(updated.description(), "");
   }

   #[rstest]
   fn test_applyは空の変更セットで何も変えない(todo: Todo, now: DateTime<Utc>) {
      let later = now + chrono::Duration::seconds(10);

      let updated = todo.clone().apply(&TodoChanges::default(), later);

      assert_eq!(updated, todo);
   }
}

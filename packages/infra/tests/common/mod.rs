//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するスキーマ準備・
//! 入力値生成ヘルパー。Rust の統合テスト規約に従い `tests/common/mod.rs`
//! に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use sqlx::PgPool;
use todo_domain::todo::{NewTodo, TodoChanges, TodoTitle};
use todo_infra::{
   db,
   repository::{PostgresTodoRepository, TodoRepository},
};

/// `todos` テーブルを作成したうえでリポジトリを返す
pub async fn setup(pool: PgPool) -> PostgresTodoRepository {
   db::ensure_schema(&pool).await.unwrap();
   PostgresTodoRepository::new(pool)
}

/// タイトルと説明から作成入力を組み立てる
pub fn new_todo(title: &str, description: Option<&str>) -> NewTodo {
   NewTodo::new(
      TodoTitle::new(title).unwrap(),
      description.map(str::to_string),
   )
}

/// 完了フラグだけを変更する変更セット
pub fn complete() -> TodoChanges {
   TodoChanges {
      completed: Some(true),
      ..Default::default()
   }
}

/// 指定件数の Todo を作成し、作成順に返す
pub async fn create_many<R: TodoRepository>(repo: &R, titles: &[&str]) -> Vec<i64> {
   let mut ids = Vec::with_capacity(titles.len());
   for title in titles {
      let todo = repo.create(&new_todo(title, None)).await.unwrap();
      ids.push(todo.id().as_i64());
   }
   ids
}

//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 採番・並び順・NotFound の扱いは [`PostgresTodoRepository`](crate::repository::PostgresTodoRepository)
//! と同じ振る舞いに揃える。

use std::sync::{
   Arc,
   Mutex,
   atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoId};

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

#[derive(Clone)]
pub struct MockTodoRepository {
   todos:   Arc<Mutex<Vec<Todo>>>,
   next_id: Arc<AtomicI64>,
}

impl Default for MockTodoRepository {
   fn default() -> Self {
      Self::new()
   }
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self {
         todos:   Arc::new(Mutex::new(Vec::new())),
         next_id: Arc::new(AtomicI64::new(1)),
      }
   }

   /// 既存の Todo を直接登録する
   ///
   /// 作成日時を指定して並び順を検証したいテスト向け。
   pub fn add_todo(&self, todo: Todo) {
      let id = todo.id().as_i64();
      self.next_id.fetch_max(id + 1, Ordering::SeqCst);
      self.todos.lock().unwrap().push(todo);
   }

   /// 登録されている件数
   pub fn len(&self) -> usize {
      self.todos.lock().unwrap().len()
   }

   pub fn is_empty(&self) -> bool {
      self.len() == 0
   }

   fn now() -> DateTime<Utc> {
      Utc::now()
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn create(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      let id = TodoId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
      let todo = Todo::new(id, new_todo.clone(), Self::now());
      self.todos.lock().unwrap().push(todo.clone());
      Ok(todo)
   }

   async fn list(&self) -> Result<Vec<Todo>, InfraError> {
      let mut todos = self.todos.lock().unwrap().clone();
      todos.sort_by(|a, b| {
         b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
      });
      Ok(todos)
   }

   async fn get_by_id(&self, id: TodoId) -> Result<Todo, InfraError> {
      self.todos
         .lock()
         .unwrap()
         .iter()
         .find(|t| t.id() == id)
         .cloned()
         .ok_or_else(|| InfraError::not_found(id))
   }

   async fn update(&self, id: TodoId, changes: &TodoChanges) -> Result<Todo, InfraError> {
      let mut todos = self.todos.lock().unwrap();
      let Some(slot) = todos.iter_mut().find(|t| t.id() == id) else {
         return Err(InfraError::not_found(id));
      };

      let updated = slot.clone().apply(changes, Self::now());
      *slot = updated.clone();
      Ok(updated)
   }

   async fn delete(&self, id: TodoId) -> Result<(), InfraError> {
      let mut todos = self.todos.lock().unwrap();
      let before = todos.len();
      todos.retain(|t| t.id() != id);

      if todos.len() == before {
         return Err(InfraError::not_found(id));
      }

      Ok(())
   }
}

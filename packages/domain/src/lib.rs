//! # Todo ドメイン層
//!
//! Todo サービスの中核となるドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-api → infra → domain
//!     ↘               ↗
//!        shared
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと入力値
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::{NewTodo, TodoTitle};
//!
//! let title = TodoTitle::new("牛乳を買う").unwrap();
//! let new_todo = NewTodo::new(title, None);
//! assert_eq!(new_todo.description(), "");
//! ```

pub mod error;
pub mod todo;

pub use error::DomainError;

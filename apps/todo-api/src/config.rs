//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。未設定または空文字列の変数は
//! デフォルト値を使用する。
//!
//! 読み込み処理は [`AppConfig::from_lookup`] に集約し、環境変数の代わりに
//! 任意のキー → 値の関数を渡せるようにしている（テストでプロセスの
//! 環境変数を書き換えないため）。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `HOST` | `0.0.0.0` | バインドアドレス |
//! | `PORT` | `8080` | ポート番号 |
//! | `DATABASE_URL` | - | PostgreSQL 接続 URL（指定時は `DB_*` より優先） |
//! | `DB_HOST` | `localhost` | データベースホスト |
//! | `DB_PORT` | `5432` | データベースポート |
//! | `DB_USER` | `postgres` | データベースユーザー |
//! | `DB_PASSWORD` | `password` | データベースパスワード |
//! | `DB_NAME` | `todo_db` | データベース名 |
//! | `DB_MAX_CONNECTIONS` | `10` | 接続プールの最大接続数 |
//! | `DB_TIMEOUT_SECS` | `5` | 接続取得と SQL 実行のタイムアウト（秒） |
//!
//! ログ出力形式（`LOG_FORMAT`）は `todo_shared::observability` が読み込む。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_api::config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! let options = config.database.connect_options()?;
//! ```

use std::{
   fmt,
   num::{NonZeroU32, NonZeroU64},
   str::FromStr,
   time::Duration,
};

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;
use todo_infra::db::PoolSettings;

/// 設定読み込みのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
   /// 数値として解釈できない値
   #[error("環境変数 {key} の値が不正です: {value:?}")]
   InvalidValue { key: &'static str, value: String },

   /// `DATABASE_URL` を接続オプションとして解釈できない
   #[error("DATABASE_URL の形式が不正です: {0}")]
   InvalidDatabaseUrl(String),
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
   /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
   pub host: String,
   /// ポート番号
   pub port: u16,
}

impl ServerConfig {
   /// `TcpListener::bind` に渡すアドレス
   pub fn bind_address(&self) -> (&str, u16) {
      (self.host.as_str(), self.port)
   }
}

/// データベース接続設定
///
/// `Debug` 出力ではパスワードと接続 URL を伏せる。
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
   /// 接続 URL（指定時は個別の接続パラメータより優先）
   pub url:             Option<String>,
   pub host:            String,
   pub port:            u16,
   pub user:            String,
   pub password:        String,
   pub name:            String,
   pub max_connections: u32,
   /// タイムアウト秒数（1 以上）
   pub timeout_secs:    u64,
}

impl DatabaseConfig {
   /// PostgreSQL の接続オプションを組み立てる
   ///
   /// `url` があればそれをパースし、なければ個別のパラメータから構築する。
   pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
      if let Some(url) = &self.url {
         return url
            .parse::<PgConnectOptions>()
            .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()));
      }

      Ok(PgConnectOptions::new()
         .host(&self.host)
         .port(self.port)
         .username(&self.user)
         .password(&self.password)
         .database(&self.name))
   }

   /// 接続プールの設定値
   pub fn pool_settings(&self) -> PoolSettings {
      PoolSettings {
         max_connections: self.max_connections,
         timeout:         Duration::from_secs(self.timeout_secs),
      }
   }
}

impl fmt::Debug for DatabaseConfig {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("DatabaseConfig")
         .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
         .field("host", &self.host)
         .field("port", &self.port)
         .field("user", &self.user)
         .field("password", &"[REDACTED]")
         .field("name", &self.name)
         .field("max_connections", &self.max_connections)
         .field("timeout_secs", &self.timeout_secs)
         .finish()
   }
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、各コンポーネントに渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
   pub server:   ServerConfig,
   pub database: DatabaseConfig,
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| std::env::var(key).ok())
   }

   /// キーから値を引く関数で設定を読み込む
   ///
   /// 空文字列は未設定として扱う。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
      let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
      let pool_defaults = PoolSettings::default();

      Ok(Self {
         server:   ServerConfig {
            host: get_or("HOST", "0.0.0.0"),
            port: parse(get("PORT"), "PORT")?.unwrap_or(8080),
         },
         database: DatabaseConfig {
            url:             get("DATABASE_URL"),
            host:            get_or("DB_HOST", "localhost"),
            port:            parse(get("DB_PORT"), "DB_PORT")?.unwrap_or(5432),
            user:            get_or("DB_USER", "postgres"),
            password:        get_or("DB_PASSWORD", "password"),
            name:            get_or("DB_NAME", "todo_db"),
            max_connections: parse(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS")?
               .map_or(pool_defaults.max_connections, NonZeroU32::get),
            timeout_secs:    parse(get("DB_TIMEOUT_SECS"), "DB_TIMEOUT_SECS")?
               .map_or(pool_defaults.timeout.as_secs(), NonZeroU64::get),
         },
      })
   }
}

/// 値があればパースする
fn parse<T: FromStr>(value: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError> {
   value
      .map(|value| {
         value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value })
      })
      .transpose()
}

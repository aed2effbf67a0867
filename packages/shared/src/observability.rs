//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//!
//! ## 環境変数
//!
//! | 変数 | 既定値 | 意味 |
//! |------|--------|------|
//! | `LOG_FORMAT` | `pretty` | `json` / `pretty` |
//! | `RUST_LOG` | [`DEFAULT_FILTER`] | ログレベルのフィルタ |
//!
//! 全ログはルートスパン `app` の内側で出力し、JSON 形式では
//! `span.service` にサービス名が入る。

/// `RUST_LOG` 未設定時のフィルタ
///
/// 自クレート（`todo_api` / `todo_infra`）だけ debug まで出す。
pub const DEFAULT_FILTER: &str = "info,todo_api=debug,todo_infra=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// JSON 形式（本番環境向け）
   Json,
   /// 人間が読みやすい形式（開発環境向け）
   #[default]
   Pretty,
}

impl LogFormat {
   /// `LOG_FORMAT` の値を解釈する
   ///
   /// 前後の空白と大文字小文字は無視する。解釈できなければ `None`。
   pub fn from_value(value: &str) -> Option<Self> {
      match value.trim().to_ascii_lowercase().as_str() {
         "json" => Some(Self::Json),
         "pretty" => Some(Self::Pretty),
         _ => None,
      }
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
   /// サービス名（ルートスパンの `service` フィールド）
   pub service_name:       String,
   /// ログ出力形式
   pub log_format:         LogFormat,
   /// 解釈できず既定値にフォールバックした `LOG_FORMAT` の値
   ///
   /// subscriber の初期化後に警告として出力する。
   pub unknown_log_format: Option<String>,
}

impl TracingConfig {
   /// 新しい設定を作成する
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
         unknown_log_format: None,
      }
   }

   /// 環境変数から設定を読み取る
   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::from_lookup(service_name, |key| std::env::var(key).ok())
   }

   /// キーから値を引く関数で設定を読み取る
   ///
   /// 空文字列は未設定として扱う。
   pub fn from_lookup(
      service_name: impl Into<String>,
      lookup: impl Fn(&str) -> Option<String>,
   ) -> Self {
      let mut config = Self::new(service_name, LogFormat::default());

      if let Some(raw) = lookup("LOG_FORMAT").filter(|v| !v.trim().is_empty()) {
         match LogFormat::from_value(&raw) {
            Some(format) => config.log_format = format,
            None => config.unknown_log_format = Some(raw),
         }
      }

      config
   }

   /// プロセス全体を包むルートスパン
   ///
   /// `main` で `entered()` したガードを保持している間、
   /// 全ログに `service` が付く。
   #[cfg(feature = "observability")]
   pub fn root_span(&self) -> tracing::Span {
      tracing::info_span!("app", service = %self.service_name)
   }
}

/// トレーシングを初期化する
///
/// `tracing_error::ErrorLayer` を登録するため、インフラ層のエラーが
/// 生成時点の `SpanTrace` を保持できる。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
   use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| DEFAULT_FILTER.into());

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_target(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .with(tracing_error::ErrorLayer::default())
      .init();

   if let Some(raw) = &config.unknown_log_format {
      tracing::warn!(value = %raw, "LOG_FORMAT を解釈できないため pretty で出力します");
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;

   use super::*;

   fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
      let map: HashMap<String, String> = pairs
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      move |key| map.get(key).cloned()
   }

   #[test]
   fn test_from_valueは大文字小文字と空白を無視する() {
      assert_eq!(LogFormat::from_value("json"), Some(LogFormat::Json));
      assert_eq!(LogFormat::from_value(" JSON "), Some(LogFormat::Json));
      assert_eq!(LogFormat::from_value("Pretty"), Some(LogFormat::Pretty));
      assert_eq!(LogFormat::from_value("yaml"), None);
   }

   #[test]
   fn test_log_format未設定ならprettyになる() {
      let config = TracingConfig::from_lookup("todo-api", lookup_from(&[]));

      assert_eq!(config, TracingConfig::new("todo-api", LogFormat::Pretty));
   }

   #[test]
   fn test_空のlog_formatは未設定として扱う() {
      let config = TracingConfig::from_lookup("todo-api", lookup_from(&[("LOG_FORMAT", "  ")]));

      assert_eq!(config.log_format, LogFormat::Pretty);
      assert_eq!(config.unknown_log_format, None);
   }

   #[test]
   fn test_log_format_jsonを読み取る() {
      let config = TracingConfig::from_lookup("todo-api", lookup_from(&[("LOG_FORMAT", "json")]));

      assert_eq!(config.log_format, LogFormat::Json);
      assert_eq!(config.unknown_log_format, None);
   }

   #[test]
   fn test_不正なlog_formatは値を保持してprettyにフォールバックする() {
      let config = TracingConfig::from_lookup("todo-api", lookup_from(&[("LOG_FORMAT", "xml")]));

      assert_eq!(config.log_format, LogFormat::Pretty);
      assert_eq!(config.unknown_log_format.as_deref(), Some("xml"));
   }

   #[cfg(feature = "observability")]
   #[test]
   fn test_root_spanはappという名前を持つ() {
      use tracing_subscriber::layer::SubscriberExt as _;

      let subscriber = tracing_subscriber::registry().with(tracing_subscriber::fmt::layer());
      let _guard = tracing::subscriber::set_default(subscriber);

      let span = TracingConfig::new("todo-api", LogFormat::Pretty).root_span();

      assert_eq!(span.metadata().map(|m| m.name()), Some("app"));
      assert!(span.field("service").is_some());
   }
}

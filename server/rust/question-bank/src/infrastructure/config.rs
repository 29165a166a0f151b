use secrecy::SecretString;
use serde::Deserialize;

use super::database::DatabaseConfig;

/// Config はアプリケーション全体の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

/// AppConfig はアプリケーション基本設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

/// ServerConfig はサーバー設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// AuthConfig はトークン発行・検証の設定を表す。
/// `jwt_secret` は Debug 出力で [REDACTED] になる。
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// true の場合、職種・問題 API に Bearer トークンを要求する
    #[serde(default)]
    pub require_token: bool,
}

fn default_issuer() -> String {
    "question-bank".to_string()
}

fn default_token_ttl_secs() -> u64 {
    86400
}

/// ImportConfig は CSV 取り込みの設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

impl ImportConfig {
    /// アップロードのリクエストボディ上限（バイト）。
    pub fn body_limit_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

fn default_max_file_size_mb() -> usize {
    10
}

impl Config {
    /// YAML 文字列から設定を読み込む。
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// 設定ファイルパスから設定を読み込む。
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

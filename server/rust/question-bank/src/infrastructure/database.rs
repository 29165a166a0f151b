use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// DatabaseConfig はデータベース接続の設定を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub name: String,
    pub user: String,
    #[serde(default = "default_password")]
    pub password: SecretString,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_port() -> u16 {
    5432
}

fn default_password() -> SecretString {
    SecretString::new(String::new())
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_connections() -> u32 {
    25
}

impl DatabaseConfig {
    /// PostgreSQL 接続 URL を生成する。戻り値にはパスワードが含まれるためログに出力しないこと。
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.name,
            self.ssl_mode
        )
    }
}

/// 接続プールを生成する。`DATABASE_URL` が設定されていれば設定ファイルより優先する。
pub async fn connect(config: Option<&DatabaseConfig>) -> anyhow::Result<PgPool> {
    let url = match (std::env::var("DATABASE_URL"), config) {
        (Ok(url), _) => url,
        (Err(_), Some(cfg)) => cfg.connection_url(),
        (Err(_), None) => anyhow::bail!("neither DATABASE_URL nor database config is set"),
    };
    let max_connections = config.map_or_else(default_max_connections, |c| c.max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&url)
        .await?;
    Ok(pool)
}

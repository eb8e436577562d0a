use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault)]
#[serde(default)]
pub struct Settings {
  /// settings related to the postgresql database
  #[default(Default::default())]
  pub database: DatabaseConfig,
  /// the domain name of your instance (mandatory for anything user-facing)
  #[default("localhost")]
  pub hostname: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault)]
#[serde(default)]
pub struct DatabaseConfig {
  /// Username to connect to postgres
  #[default("chirp")]
  pub user: String,
  /// Password to connect to postgres
  #[default("password")]
  pub password: String,
  /// Host where postgres is running
  #[default("localhost")]
  pub host: String,
  /// Port where postgres can be accessed
  #[default(5432)]
  pub port: i32,
  /// Name of the postgres database for chirp
  #[default("chirp")]
  pub database: String,
  /// Maximum number of active sql connections
  #[default(30)]
  pub pool_size: u32,
}

pub use self::parser::{Config, CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use self::validator::ConfigError;

mod parser;
mod validator;

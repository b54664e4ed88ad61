use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

pub struct Config {
    pub data_dir: PathBuf,
    pub max_amount: f64,
    pub log_level: String,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("max_amount", &self.max_amount)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            data_dir: env::var("MEALSPLIT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            max_amount: env::var("MEALSPLIT_MAX_AMOUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v > 0.0)
                .unwrap_or(150.0),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

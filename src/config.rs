use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOG", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

pub const STORAGE_FILE: &str = "storage.json";

/// Language lesson catalog and player.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about)]
pub struct AppConfig {
    /// Directory holding the lesson storage and the log file
    #[arg(long, env = "LESSONBOX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory exported lesson files are written to
    #[arg(long, env = "LESSONBOX_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Path to open at start-up, e.g. /lesson/numbers-1-10
    #[arg(long, env = "LESSONBOX_PATH", default_value = "/")]
    pub path: String,
}

impl AppConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir().join(STORAGE_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join(LOG_FILE.as_str())
    }
}

pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("org", "lessonbox", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

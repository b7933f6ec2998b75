use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `profiles.json` and `ledger.json`.
    pub data_dir: PathBuf,
    /// Optional YAML file of creators registered on startup.
    pub seed_path: Option<PathBuf>,
    /// Upper bound on concurrent per-creator reputation loads. Always >= 1.
    pub max_concurrent_reputation_loads: usize,
}

impl AppConfig {
    #[must_use]
    pub fn profiles_path(&self) -> PathBuf {
        self.data_dir.join("profiles.json")
    }

    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.json")
    }
}

use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "PRIOTASK_DATA_FILE";
pub const DEFAULT_DATA_FILE: &str = "tasks.json";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{DEFAULT_DATA_FILE, StoreConfig};

    #[test]
    fn default_points_at_working_directory_file() {
        assert_eq!(
            StoreConfig::default().data_file,
            PathBuf::from(DEFAULT_DATA_FILE)
        );
        assert_eq!(
            StoreConfig::new("/tmp/mine.json").data_file,
            PathBuf::from("/tmp/mine.json")
        );
    }
}

use calendar_core::auth::client::DEFAULT_SERVER;
use clap::Parser;
use std::path::PathBuf;

/// Sign up for or sign into your calendar from the terminal
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Which server to authenticate against
    #[clap(long, env = "CALENDAR_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Where should we store the session and logs?
    #[clap(long, env = "CALENDAR_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "sdk", "calendar")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config::parse_from(["calendar", "--data-dir", "/tmp/calendar-test"]);

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/calendar-test"));
    }

    #[test]
    fn server_can_be_overridden() {
        let config = Config::parse_from(["calendar", "--server", "http://localhost:5000"]);

        assert_eq!(config.server, "http://localhost:5000");
    }
}

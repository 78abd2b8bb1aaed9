//! External refresh invocation.

use std::future::Future;
use std::path::PathBuf;

use tokio::process::Command;

use crate::config::Config;
use crate::error_handling::RefreshError;

/// Something that refreshes the reference databases on disk.
///
/// Only success or failure is observed; what the command does to the files is
/// its own business.
pub trait RefreshCommand: Send + Sync {
    /// Runs the refresh to completion.
    fn run(&self) -> impl Future<Output = Result<(), RefreshError>> + Send;
}

/// Runs `geoipupdate -f <config> -d <dir>` (or a compatible executable).
#[derive(Debug, Clone)]
pub struct GeoIpUpdateCommand {
    program: String,
    config_file: PathBuf,
    database_dir: PathBuf,
}

impl GeoIpUpdateCommand {
    /// Creates a command running `program` against `config_file`, writing into `database_dir`.
    pub fn new(
        program: impl Into<String>,
        config_file: impl Into<PathBuf>,
        database_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            config_file: config_file.into(),
            database_dir: database_dir.into(),
        }
    }

    /// Creates the command from the worker configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.update_program.clone(),
            config.update_config.clone(),
            config.database_dir.clone(),
        )
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-f")
            .arg(&self.config_file)
            .arg("-d")
            .arg(&self.database_dir)
            .kill_on_drop(true);
        cmd
    }
}

impl RefreshCommand for GeoIpUpdateCommand {
    async fn run(&self) -> Result<(), RefreshError> {
        let output = self
            .command()
            .output()
            .await
            .map_err(|source| RefreshError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Err(RefreshError::Failed {
            program: self.program.clone(),
            status: output.status,
            output: combined,
        })
    }
}

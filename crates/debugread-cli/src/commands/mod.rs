pub mod agent;
pub mod config;
pub mod members;
pub mod metrics;

use std::io::Write;
use std::path::PathBuf;

use debugread_core::{DebugBundle, DebugReadError, ReaderConfig, Result, default_config_path};
use log::LevelFilter;

/// Global flags shared by every command.
pub struct Context {
    pub config_file: Option<PathBuf>,
    pub debug_path: Option<PathBuf>,
}

impl Context {
    /// Config file in effect: `--config-file`, or the per-user default.
    pub fn config_path(&self) -> PathBuf {
        self.config_file.clone().unwrap_or_else(default_config_path)
    }

    /// Resolve the reader config. `--debug-path` skips the config file entirely.
    pub fn reader_config(&self) -> Result<ReaderConfig> {
        if let Some(dir) = &self.debug_path {
            log::debug!("using --debug-path {}", dir.display());
            return Ok(ReaderConfig::for_directory(dir.to_string_lossy()));
        }
        let path = self.config_path();
        log::debug!("reading config {}", path.display());
        ReaderConfig::load(&path)
    }

    /// Bundle rooted at the configured directory.
    pub fn open_bundle(&self) -> Result<(ReaderConfig, DebugBundle)> {
        let config = self.reader_config()?;
        let dir = config.debug_directory();
        if !dir.is_dir() {
            return Err(DebugReadError::BundleDecode {
                path: dir,
                reason: "not a directory".to_string(),
            });
        }
        log::info!("=> reading debug bundle {}", dir.display());
        Ok((config, DebugBundle::new(dir)))
    }
}

/// Level from the global flags: `--silent` → off, `--verbose` → debug,
/// info otherwise.
pub fn level_filter(silent: bool, verbose: bool) -> LevelFilter {
    if silent {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Plain message lines on stderr, no timestamps.
pub fn init_logging(silent: bool, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    builder.filter_level(level_filter(silent, verbose));
    let _ = builder.try_init();
}

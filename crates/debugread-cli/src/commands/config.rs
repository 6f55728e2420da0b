//! `config` subcommand: inspect and update the user config file.

use std::path::Path;

use debugread_core::{ReaderConfig, Result};

use super::Context;

pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.reader_config()?;
    match &ctx.debug_path {
        Some(_) => println!("Config file:         (none, --debug-path given)"),
        None => println!("Config file:         {}", ctx.config_path().display()),
    }
    println!("DebugDirectoryPath:  {}", config.debug_directory_path);
    println!("TelemetryURL:        {}", config.telemetry_url());
    println!("FetchTimeoutSecs:    {}", config.fetch_timeout().as_secs());
    Ok(())
}

/// Store `dir` as the bundle directory, keeping any other settings already
/// present in the file.
pub fn set_path(ctx: &Context, dir: &Path) -> Result<()> {
    let path = ctx.config_path();
    let mut config = ReaderConfig::load(&path).unwrap_or_else(|e| {
        log::debug!("starting a new config: {e}");
        ReaderConfig::default()
    });
    config.debug_directory_path = dir.to_string_lossy().into_owned();
    config.save(&path)?;
    log::info!(
        "=> DebugDirectoryPath set to {} in {}",
        config.debug_directory_path,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_path_creates_and_updates_config() {
        let home = tempfile::tempdir().unwrap();
        let path = home.path().join(".consul-debug-read").join("config.yaml");
        let ctx = Context {
            config_file: Some(path.clone()),
            debug_path: None,
        };

        set_path(&ctx, Path::new("/tmp/bundle-a")).unwrap();
        assert_eq!(ReaderConfig::load(&path).unwrap().debug_directory_path, "/tmp/bundle-a");

        std::fs::write(
            &path,
            "DebugDirectoryPath: /tmp/bundle-a\nFetchTimeoutSecs: 3\n",
        )
        .unwrap();
        set_path(&ctx, Path::new("/tmp/bundle-b")).unwrap();
        let config = ReaderConfig::load(&path).unwrap();
        assert_eq!(config.debug_directory_path, "/tmp/bundle-b");
        assert_eq!(config.fetch_timeout_secs, Some(3));
    }
}

//! Directory helpers following the XDG Base Directory specification
//!
//! - Config: `~/.config/helpful/` - `config.json`
//!
//! # Example
//!
//! ```no_run
//! use helpful_extensions::utils::{ensure_dirs, get_config_dir};
//!
//! ensure_dirs().expect("Failed to create directories");
//! if let Some(config_path) = get_config_dir() {
//!     println!("{}", config_path.display());
//! }
//! ```

use directories::ProjectDirs;
use std::path::PathBuf;

pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "helpful", "helpful").map(|pd| pd.config_dir().to_path_buf())
}

pub fn ensure_dirs() -> std::io::Result<()> {
    let Some(dir) = get_config_dir() else {
        return Ok(());
    };

    #[cfg(unix)]
    {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        DirBuilder::new().mode(0o700).recursive(true).create(dir)?;
    }

    #[cfg(not(unix))]
    std::fs::create_dir_all(dir)?;

    Ok(())
}

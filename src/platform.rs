// BookmarkHub platform paths
//
// Linux:   $XDG_CONFIG_HOME or ~/.config, $XDG_DATA_HOME or ~/.local/share
// macOS:   ~/Library/Application Support for both
// Windows: %APPDATA% for both

use std::env;
use std::path::PathBuf;

#[cfg(not(target_os = "windows"))]
const APP_DIR: &str = "bookmarkhub";
#[cfg(target_os = "windows")]
const APP_DIR: &str = "BookmarkHub";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Looks up `xdg_var`, falling back to `~/<fallback>`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn xdg_dir(xdg_var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(xdg_var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    }
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

/// Directory holding `config.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    let base = xdg_dir("XDG_CONFIG_HOME", &[".config"]);
    #[cfg(target_os = "macos")]
    let base = home_dir().join("Library").join("Application Support");
    #[cfg(target_os = "windows")]
    let base = appdata_dir();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let base = home_dir().join(".config");

    base.join(APP_DIR)
}

/// Directory holding the SQLite store.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    let base = xdg_dir("XDG_DATA_HOME", &[".local", "share"]);
    #[cfg(target_os = "macos")]
    let base = home_dir().join("Library").join("Application Support");
    #[cfg(target_os = "windows")]
    let base = appdata_dir();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let base = home_dir().join(".local").join("share");

    base.join(APP_DIR)
}

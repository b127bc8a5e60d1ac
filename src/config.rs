use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dispatch::FileKinds;
use crate::{GlueError, Result};

pub const CONFIG_FILE_NAME: &str = "glue_config.toml";
pub const CONFIG_ENV_VAR: &str = "GLUERC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub window: WindowSettings,
    pub script: ScriptSettings,
    pub files: FileSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Glue".to_string(),
            window: WindowSettings::default(),
            script: ScriptSettings::default(),
            files: FileSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Program the script path is handed to.
    pub interpreter: String,
    /// Extra arguments placed before the script path.
    pub args: Vec<String>,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub scripts: Vec<String>,
    pub sessions: Vec<String>,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            scripts: vec!["*.py".to_string()],
            sessions: vec!["*.glu".to_string()],
        }
    }
}

impl FileSettings {
    pub fn kinds(&self) -> Result<FileKinds> {
        FileKinds::from_patterns(self.scripts.as_slice(), self.sessions.as_slice())
    }
}

/// Working directory first, then `$GLUERC`, then `~/.glue/config.toml`.
pub fn default_search_path() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(rc) = std::env::var_os(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(rc));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".glue").join("config.toml"));
    }
    paths
}

/// Loads the first file of `search_path` that exists. Defaults when none does.
pub fn load_configuration(search_path: &[PathBuf]) -> Result<Settings> {
    match search_path.iter().find(|p| p.is_file()) {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            load_configuration_file(path)
        }
        None => {
            debug!(candidates = search_path.len(), "no configuration file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Loads exactly `path`. Unlike the search path, a file that cannot be read
/// is an error rather than a reason to fall back to defaults.
pub fn load_configuration_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| GlueError::read(path, e))?;
    toml::from_str(&content).map_err(|source| GlueError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_search_path_gives_defaults() {
        let settings = load_configuration(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.script.interpreter, "python3");
    }

    #[test]
    fn first_existing_file_wins() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        fs::write(&first, "title = \"First\"\n").unwrap();
        fs::write(&second, "title = \"Second\"\n").unwrap();

        let settings =
            load_configuration(&[dir.path().join("missing.toml"), first, second]).unwrap();
        assert_eq!(settings.title, "First");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glue.toml");
        fs::write(
            &path,
            "[script]\ninterpreter = \"sh\"\n\n[files]\nsessions = [\"*.session\"]\n",
        )
        .unwrap();

        let settings = load_configuration(&[path]).unwrap();
        assert_eq!(settings.script.interpreter, "sh");
        assert!(settings.script.args.is_empty());
        assert_eq!(settings.files.scripts, vec!["*.py"]);
        assert_eq!(settings.files.sessions, vec!["*.session"]);
        assert_eq!(settings.window, WindowSettings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glue.toml");
        fs::write(&path, "title = [unterminated").unwrap();

        let err = load_configuration(&[path]).unwrap_err();
        assert!(matches!(err, GlueError::ConfigParse { .. }));
    }

    #[test]
    fn explicit_directory_is_a_read_error() {
        let dir = TempDir::new().unwrap();

        let err = load_configuration_file(dir.path()).unwrap_err();
        assert!(matches!(err, GlueError::Read { .. }));
        // the search path skips it instead
        assert_eq!(
            load_configuration(&[dir.path().to_path_buf()]).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn search_path_starts_in_working_directory() {
        let paths = default_search_path();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE_NAME));
    }
}

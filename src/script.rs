use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::info;

use crate::config::ScriptSettings;
use crate::{GlueError, Result};

/// Runs `script` with the configured interpreter and waits for it.
/// The returned value is the script's exit code.
pub fn execute_script(script: &Path, settings: &ScriptSettings) -> Result<i32> {
    if !script.is_file() {
        return Err(GlueError::script(format!(
            "Could not find script: {}",
            script.display()
        )));
    }

    info!(
        script = %script.display(),
        interpreter = %settings.interpreter,
        "executing script"
    );
    let status = Command::new(&settings.interpreter)
        .args(&settings.args)
        .arg(script)
        .status()
        .map_err(|e| {
            GlueError::script(format!(
                "Failed to start interpreter {}: {e}",
                settings.interpreter
            ))
        })?;

    Ok(exit_code(status))
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sh() -> ScriptSettings {
        ScriptSettings {
            interpreter: "sh".to_string(),
            args: Vec::new(),
        }
    }

    #[test]
    fn returns_script_exit_code() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fail.py");
        fs::write(&script, "exit 7\n").unwrap();

        assert_eq!(execute_script(&script, &sh()).unwrap(), 7);
    }

    #[test]
    fn interpreter_args_come_before_script() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("ok.py");
        fs::write(&script, "exit 0\n").unwrap();
        let settings = ScriptSettings {
            interpreter: "sh".to_string(),
            args: vec!["-e".to_string()],
        };

        assert_eq!(execute_script(&script, &settings).unwrap(), 0);
    }

    #[test]
    fn missing_script_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = execute_script(&dir.path().join("absent.py"), &sh()).unwrap_err();
        assert!(err.to_string().contains("Could not find script"));
    }

    #[test]
    fn missing_interpreter_is_an_error() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("ok.py");
        fs::write(&script, "").unwrap();
        let settings = ScriptSettings {
            interpreter: "glue-no-such-interpreter".to_string(),
            args: Vec::new(),
        };

        let err = execute_script(&script, &settings).unwrap_err();
        assert!(err.to_string().contains("glue-no-such-interpreter"));
    }
}

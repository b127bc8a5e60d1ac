use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::app;
use crate::cli::Invocation;
use crate::config::{self, ScriptSettings, Settings};
use crate::dispatch::{decide, Action};
use crate::script;
use crate::session::Session;
use crate::Result;

/// Everything the launcher hands control to.
pub trait Host {
    fn execute_script(&mut self, script: &Path, settings: &ScriptSettings) -> Result<i32>;

    /// Blocks until the application exits and returns its exit code.
    fn start_application(
        &mut self,
        session: Option<Session>,
        session_path: Option<PathBuf>,
        settings: &Settings,
    ) -> i32;

    fn show_error(&mut self, title: &str, message: &str);
}

/// Real interpreter, real window.
pub struct NativeHost;

impl Host for NativeHost {
    fn execute_script(&mut self, script: &Path, settings: &ScriptSettings) -> Result<i32> {
        script::execute_script(script, settings)
    }

    fn start_application(
        &mut self,
        session: Option<Session>,
        session_path: Option<PathBuf>,
        settings: &Settings,
    ) -> i32 {
        app::run_application(session, session_path, settings)
    }

    fn show_error(&mut self, title: &str, message: &str) {
        app::show_error_dialog(title, message);
    }
}

pub fn run(invocation: &Invocation, host: &mut impl Host) -> i32 {
    let settings = match load_settings(invocation) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return 1;
        }
    };
    let kinds = match settings.files.kinds() {
        Ok(kinds) => kinds,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return 1;
        }
    };

    let action = decide(invocation, &kinds);
    info!(?action, "dispatching");

    match action {
        Action::ExecuteScript(path) => match host.execute_script(&path, &settings.script) {
            Ok(code) => code,
            Err(e) => {
                error!("{e}");
                eprintln!("{e}");
                1
            }
        },
        Action::RestoreSession(path) => match Session::load(&path) {
            Ok(session) => host.start_application(Some(session), Some(path), &settings),
            Err(e) => {
                error!(path = %path.display(), "failed to restore session: {e}");
                host.show_error("Error", &format!("Error opening Glue file: {e}"));
                1
            }
        },
        Action::Launch => host.start_application(None, None, &settings),
    }
}

fn load_settings(invocation: &Invocation) -> Result<Settings> {
    match &invocation.config {
        Some(path) => config::load_configuration_file(path),
        None => config::load_configuration(&config::default_search_path()),
    }
}

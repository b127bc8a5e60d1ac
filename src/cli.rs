use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use thiserror::Error;

#[derive(Parser, Debug, Default)]
#[command(name = "glue", version, override_usage = "glue [options] [FILE]")]
pub struct CliArgs {
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Execute FILE as a script
    #[arg(short = 'x', long = "execute")]
    pub script: bool,

    /// Restore glue session from FILE
    #[arg(short = 'g')]
    pub restore: bool,

    /// Use CONFIG as configuration file
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

/// Command line after validation: at most one file, flags consistent with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub file: Option<PathBuf>,
    pub execute: bool,
    pub restore: bool,
    pub config: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum UsageError {
    #[error("{}", .0.render())]
    Clap(clap::Error),

    #[error("Too many arguments")]
    TooManyArguments,

    #[error("Must provide a script")]
    MissingScript,

    #[error("Must provide a .glu file")]
    MissingSession,

    #[error("Could not find configuration file: {}", .0.display())]
    MissingConfig(PathBuf),
}

pub fn parse<I, T>(argv: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::try_parse_from(argv).map_err(UsageError::Clap)?;
    verify(args)
}

/// Rules are checked in order and the first failure is reported.
pub fn verify(args: CliArgs) -> Result<Invocation, UsageError> {
    let CliArgs {
        mut files,
        script,
        restore,
        config,
    } = args;

    if files.len() > 1 {
        return Err(UsageError::TooManyArguments);
    }
    if script && files.len() != 1 {
        return Err(UsageError::MissingScript);
    }
    if restore && files.len() != 1 {
        return Err(UsageError::MissingSession);
    }
    if let Some(path) = &config {
        if !path.exists() {
            return Err(UsageError::MissingConfig(path.clone()));
        }
    }

    Ok(Invocation {
        file: files.pop(),
        execute: script,
        restore,
        config,
    })
}

/// Prints the error and returns the process exit code for it.
pub fn report(err: &UsageError) -> i32 {
    if let UsageError::Clap(e) = err {
        if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            let _ = e.print();
            return 0;
        }
        // clap's own rendering already carries the usage line
        eprint!("{}", e.render());
        return 1;
    }

    tracing::debug!(error = %err, "rejected command line");
    eprintln!("\n{err}\n");
    eprintln!("{}", CliArgs::command().render_help());
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(files: &[&str]) -> CliArgs {
        CliArgs {
            files: files.iter().map(PathBuf::from).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_no_arguments() {
        let invocation = verify(args(&[])).unwrap();
        assert_eq!(invocation, Invocation::default());
    }

    #[test]
    fn rejects_two_files() {
        let err = verify(args(&["a.py", "b.py"])).unwrap_err();
        assert!(matches!(err, UsageError::TooManyArguments));
        assert_eq!(err.to_string(), "Too many arguments");
    }

    #[test]
    fn too_many_arguments_wins_over_flags() {
        let mut a = args(&["a.py", "b.py"]);
        a.script = true;
        a.restore = true;
        a.config = Some(PathBuf::from("/definitely/not/here.toml"));
        assert!(matches!(verify(a).unwrap_err(), UsageError::TooManyArguments));
    }

    #[test]
    fn execute_requires_a_file() {
        let mut a = args(&[]);
        a.script = true;
        let err = verify(a).unwrap_err();
        assert!(err.to_string().contains("Must provide a script"));
    }

    #[test]
    fn restore_requires_a_file() {
        let mut a = args(&[]);
        a.restore = true;
        let err = verify(a).unwrap_err();
        assert!(err.to_string().contains("Must provide a .glu file"));
    }

    #[test]
    fn script_check_comes_before_restore_check() {
        let mut a = args(&[]);
        a.script = true;
        a.restore = true;
        assert!(matches!(verify(a).unwrap_err(), UsageError::MissingScript));
    }

    #[test]
    fn missing_config_names_the_path() {
        let mut a = args(&[]);
        a.config = Some(PathBuf::from("/definitely/not/here.toml"));
        let err = verify(a).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find configuration file: /definitely/not/here.toml"
        );
    }

    #[test]
    fn existing_config_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("glue.toml");
        std::fs::write(&config, "").unwrap();

        let invocation = parse(["glue", "-c", config.to_str().unwrap(), "session.glu"]).unwrap();
        assert_eq!(invocation.config.as_deref(), Some(config.as_path()));
        assert_eq!(invocation.file, Some(PathBuf::from("session.glu")));
    }

    #[test]
    fn parses_short_and_long_flags() {
        let invocation = parse(["glue", "-x", "run.py"]).unwrap();
        assert!(invocation.execute);
        assert!(!invocation.restore);

        let invocation = parse(["glue", "--execute", "run.py"]).unwrap();
        assert!(invocation.execute);

        let invocation = parse(["glue", "-g", "state.glu"]).unwrap();
        assert!(invocation.restore);
        assert_eq!(invocation.file, Some(PathBuf::from("state.glu")));
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = parse(["glue", "--bogus"]).unwrap_err();
        assert!(matches!(err, UsageError::Clap(_)));
        assert_eq!(report(&err), 1);
    }

    #[test]
    fn usage_errors_are_std_errors() {
        let err: Box<dyn std::error::Error> = Box::new(UsageError::MissingSession);
        assert_eq!(err.to_string(), "Must provide a .glu file");
        assert!(err.source().is_none());
    }

    #[test]
    fn help_exits_cleanly() {
        let err = parse(["glue", "--help"]).unwrap_err();
        assert_eq!(report(&err), 0);
    }
}

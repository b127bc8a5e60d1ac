use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::cli::Invocation;
use crate::{GlueError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ExecuteScript(PathBuf),
    RestoreSession(PathBuf),
    Launch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Session,
}

/// Glob patterns deciding what a bare FILE argument is.
#[derive(Debug, Clone)]
pub struct FileKinds {
    scripts: Vec<Pattern>,
    sessions: Vec<Pattern>,
}

impl FileKinds {
    pub fn from_patterns<S: AsRef<str>>(scripts: &[S], sessions: &[S]) -> Result<Self> {
        Ok(Self {
            scripts: compile(scripts)?,
            sessions: compile(sessions)?,
        })
    }

    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        if self.scripts.iter().any(|p| p.matches_path(path)) {
            Some(FileKind::Script)
        } else if self.sessions.iter().any(|p| p.matches_path(path)) {
            Some(FileKind::Session)
        } else {
            None
        }
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p.as_ref()).map_err(|source| GlueError::Pattern {
                pattern: p.as_ref().to_string(),
                source,
            })
        })
        .collect()
}

/// Decision table for a validated command line. Explicit flags take
/// precedence over the file's kind, and `-g` over `-x`.
pub fn decide(invocation: &Invocation, kinds: &FileKinds) -> Action {
    let file = match &invocation.file {
        Some(file) => file,
        None => return Action::Launch,
    };

    if invocation.restore {
        return Action::RestoreSession(file.clone());
    }
    if invocation.execute {
        return Action::ExecuteScript(file.clone());
    }

    match kinds.classify(file) {
        Some(FileKind::Script) => Action::ExecuteScript(file.clone()),
        Some(FileKind::Session) => Action::RestoreSession(file.clone()),
        None => Action::Launch,
    }
}

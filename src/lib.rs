//! Launcher and minimal window for the glue data explorer.
//!
//! `glue [options] [FILE]` either runs FILE as a script, restores FILE as a
//! saved session, or opens a fresh window. [`cli`] validates the command line,
//! [`dispatch::decide`] picks the action and [`runner::run`] carries it out
//! through a [`runner::Host`].

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod hub;
pub mod logging;
pub mod runner;
pub mod script;
pub mod session;

pub use error::{GlueError, Result};
pub use session::Session;

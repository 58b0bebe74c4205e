//! ghostterm: a fake terminal with inline ghost-text completion
//!
//! The [`suggest`] module is the heart of it and has no UI dependencies.
//! Everything else wires it to a shell simulator or an HTTP backend and
//! draws it with ratatui.

pub mod app;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod session;
pub mod stats;
pub mod suggest;
pub mod widgets;

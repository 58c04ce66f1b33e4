pub mod commands;
pub mod forms;
pub mod io;
pub mod output;
pub mod screens;
mod shell;
pub mod ui;

pub use shell::{run_cli, run_with_args};

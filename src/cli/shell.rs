use std::env;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::commands::{CommandContext, CommandRegistry};
use crate::cli::io;
use crate::cli::output::{set_preferences, OutputPreferences};
use crate::cli::screens::{run_screen, ScreenContext, ScreenOutcome};
use crate::cli::ui::menu_renderer::clear_terminal;
use crate::config::{Config, ConfigManager};
use crate::core::{SystemClock, WizardController};
use crate::errors::CliError;

const BOOK_COMMAND: &str = "book";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Entry point of `parkqwik_cli`. Without arguments the booking wizard runs.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

pub fn run_with_args(args: &[String]) -> Result<(), CliError> {
    let manager = ConfigManager::new();
    let config = manager.load()?;
    set_preferences(OutputPreferences::from_config(&config));

    let Some((name, rest)) = args.split_first() else {
        return run_wizard(config);
    };
    if name == BOOK_COMMAND {
        return run_wizard(config);
    }

    let registry = CommandRegistry::default();
    let command = registry.get(name.as_str()).ok_or_else(|| {
        CliError::Input(format!("unknown command `{name}`. Run `help` for a list."))
    })?;
    let context = CommandContext {
        config,
        config_manager: manager,
        clock: Arc::new(SystemClock),
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    debug!(command = command.name, "running command");
    (command.handler)(&context, &rest)
}

fn run_wizard(config: Config) -> Result<(), CliError> {
    let mut context = ScreenContext::new(config);
    let mut controller = WizardController::new();
    info!("booking wizard started");

    loop {
        match step(&mut controller, &mut context)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }

    io::print_info("Thanks for using ParkQwik.");
    Ok(())
}

fn step(
    controller: &mut WizardController,
    context: &mut ScreenContext,
) -> Result<LoopControl, CliError> {
    if let Err(err) = clear_terminal() {
        debug!(error = %err, "could not clear terminal");
    }
    match run_screen(controller.state(), context)? {
        ScreenOutcome::Message(message) => {
            controller.dispatch(message);
            Ok(LoopControl::Continue)
        }
        ScreenOutcome::Quit => {
            info!(screen = controller.current_screen().as_str(), "booking wizard closed");
            Ok(LoopControl::Exit)
        }
    }
}

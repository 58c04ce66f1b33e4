use tracing::warn;

use crate::cli::forms::{FormEngine, FormResult, VehicleWizard, WizardInteraction};
use crate::cli::io;
use crate::cli::screens::{back, ScreenOutcome};
use crate::core::{AppState, WizardMessage};
use crate::errors::CliError;

pub(super) fn run(state: &AppState) -> Result<ScreenOutcome, CliError> {
    let wizard = VehicleWizard::new(state.vehicle_details.as_ref());
    let mut interaction = WizardInteraction::new("Vehicle Details");
    match FormEngine::new(&wizard).run(&mut interaction) {
        Ok(FormResult::Completed(vehicle)) => {
            Ok(ScreenOutcome::Message(WizardMessage::VehicleSubmitted(vehicle)))
        }
        Ok(FormResult::Cancelled) => Ok(back()),
        Err(errors) => {
            warn!(%errors, "vehicle form rejected without field errors");
            io::print_warning(errors);
            Ok(back())
        }
    }
}

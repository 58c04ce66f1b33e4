use crate::cli::screens::{escape_outcome, ScreenContext, ScreenOutcome};
use crate::cli::ui::menu_renderer::{MenuRenderer, MenuUI, MenuUIItem};
use crate::core::WizardMessage;
use crate::errors::CliError;

const FEATURES: [(&str, &str); 3] = [
    ("Professional Wash", "Premium cleaning service"),
    ("Quick & Convenient", "Book in just 3 steps"),
    ("At Your Location", "We come to you"),
];

pub(crate) fn intro_lines() -> Vec<String> {
    let mut lines = vec![
        "Professional car wash service at your doorstep".to_string(),
        String::new(),
    ];
    lines.extend(
        FEATURES
            .iter()
            .map(|(title, detail)| format!("  {title}: {detail}")),
    );
    lines
}

pub(super) fn run(_ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    let menu = MenuUI::new(
        "ParkQwik",
        vec![
            MenuUIItem::new("start", "Get Started", "Book a doorstep wash"),
            MenuUIItem::new("exit", "Exit", "Close ParkQwik"),
        ],
    )
    .with_context(intro_lines().join("\n"));

    loop {
        match MenuRenderer::new().show(&menu)?.as_deref() {
            Some("start") => return Ok(ScreenOutcome::Message(WizardMessage::GetStarted)),
            Some(_) => return Ok(ScreenOutcome::Quit),
            None => {
                if let Some(outcome) = escape_outcome()? {
                    return Ok(outcome);
                }
            }
        }
    }
}

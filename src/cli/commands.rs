//! One-shot commands available next to the interactive wizard.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::screens::{plan_row, render_calendar};
use crate::config::{Config, ConfigManager};
use crate::core::validation::VEHICLE_NUMBER_EXAMPLE;
use crate::core::{
    calculate_pricing, format_vehicle_number, generate_calendar, is_valid_vehicle_number, Clock,
    MonthCursor,
};
use crate::domain::{Plan, PlanId};
use crate::errors::{BookingError, CliError};
use crate::utils::build_info;

pub type CommandResult = Result<(), CliError>;

/// What a command can see: the effective config and the manager that loaded it.
pub struct CommandContext {
    pub config: Config,
    pub config_manager: ConfigManager,
    pub clock: Arc<dyn Clock>,
}

pub type CommandHandler = fn(&CommandContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(all_definitions())
    }
}

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("plans", "List wash plans with pricing", "plans", cmd_plans),
        CommandDefinition::new(
            "quote",
            "Print the price breakdown of a plan as JSON",
            "quote <plan-id>",
            cmd_quote,
        ),
        CommandDefinition::new(
            "calendar",
            "Show the booking calendar for a month",
            "calendar [YYYY-MM]",
            cmd_calendar,
        ),
        CommandDefinition::new(
            "plate",
            "Format and check a vehicle number",
            "plate <number>",
            cmd_plate,
        ),
        CommandDefinition::new(
            "config",
            "Show the configuration, or write it out with `init`",
            "config [init]",
            cmd_config,
        ),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("help", "Show available commands", "help", cmd_help),
    ]
}

fn cmd_plans(context: &CommandContext, _args: &[&str]) -> CommandResult {
    for plan in Plan::catalog() {
        let (label, detail) = plan_row(plan, |amount| context.config.money(amount));
        output_section(label);
        io::print_info(format!("  {detail}"));
        let pricing = calculate_pricing(plan);
        let money = |amount| context.config.money(amount);
        io::print_info(format!(
            "  Tax {} · Discount {} · Total {}",
            money(pricing.tax),
            money(pricing.discount),
            money(pricing.total)
        ));
    }
    Ok(())
}

fn cmd_quote(_context: &CommandContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CliError::Input("usage: quote <plan-id>".into()))?;
    let plan = PlanId::parse(raw)
        .and_then(Plan::find)
        .ok_or_else(|| BookingError::UnknownPlan((*raw).to_string()))?;
    println!("{}", serde_json::to_string_pretty(&calculate_pricing(plan))?);
    Ok(())
}

fn cmd_calendar(context: &CommandContext, args: &[&str]) -> CommandResult {
    let today = context.clock.today();
    let month = match args.first() {
        Some(raw) => MonthCursor::parse(raw)
            .ok_or_else(|| CliError::Input(format!("expected YYYY-MM, got `{raw}`")))?,
        None => MonthCursor::containing(today),
    };
    for line in render_calendar(month, &generate_calendar(month, "", today)) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_plate(_context: &CommandContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CliError::Input("usage: plate <number>".into()));
    }
    let formatted = format_vehicle_number(&args.join(" "));
    if is_valid_vehicle_number(&formatted) {
        io::print_success(formatted);
        Ok(())
    } else {
        Err(CliError::Input(format!(
            "`{formatted}` is not a valid vehicle number (e.g., {VEHICLE_NUMBER_EXAMPLE})"
        )))
    }
}

fn cmd_config(context: &CommandContext, args: &[&str]) -> CommandResult {
    let path = context.config_manager.path();
    match args {
        [] => {
            output_section("Configuration");
            io::print_info(format!("  Path: {}", path.display()));
            println!("{}", serde_json::to_string_pretty(&context.config)?);
            Ok(())
        }
        ["init"] => {
            context.config_manager.save(&context.config)?;
            io::print_success(format!("Configuration written to {}", path.display()));
            Ok(())
        }
        _ => Err(CliError::Input("usage: config [init]".into())),
    }
}

fn cmd_version(_context: &CommandContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("ParkQwik {}", meta.version));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Target       : {}", meta.target));
    io::print_info(format!("  Profile      : {}", meta.profile));
    io::print_info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(_context: &CommandContext, _args: &[&str]) -> CommandResult {
    output_section("Commands");
    io::print_info(format!("  {:<20} {}", "book", "Start the booking wizard (default)"));
    for command in CommandRegistry::default().iter() {
        io::print_info(format!("  {:<20} {}", command.usage, command.description));
    }
    Ok(())
}

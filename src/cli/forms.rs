//! Field-by-field form framework behind the vehicle details screen.
//!
//! A [`FormFlow`] describes its fields and turns the collected strings into a
//! typed value; [`FormEngine`] walks the fields through a [`FormInteraction`],
//! handles back/help/keep responses, shows a review step and, when the commit
//! rejects some fields, returns to the first rejected field with every other
//! entry kept.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::cli::io;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::prompts::{
    choice_menu, confirm_menu, text_input, ChoicePromptResult, ConfirmationPromptResult,
    TextPromptResult,
};
use crate::core::validation::{
    format_vehicle_number, VehicleDraft, FIELD_BRAND, FIELD_MODEL, FIELD_VEHICLE_NUMBER,
    FIELD_VEHICLE_TYPE, VEHICLE_NUMBER_MAX_LEN,
};
use crate::domain::vehicle::{brands, models_for};
use crate::domain::{Vehicle, VehicleKind};
use crate::errors::FieldErrors;

const FIELD_SAVE: &str = "saveToVehicles";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// User chose to keep the default/current value.
    Keep,
    /// Abort the entire form immediately.
    Cancel,
    /// Go back to the previous field.
    Back,
    /// Request additional information for the current field.
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    Boolean,
    Choice(Vec<String>),
    /// Options come from [`FormFlow::choices`] and depend on earlier entries.
    DependentChoice,
}

type ValidatorCallback = dyn Fn(&str) -> Result<String, String> + Send + Sync;

#[derive(Clone)]
pub enum Validator {
    None,
    Custom(Arc<ValidatorCallback>),
}

impl Validator {
    pub fn custom(
        func: impl Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    ) -> Self {
        Validator::Custom(Arc::new(func))
    }

    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        match self {
            Validator::None => Ok(input.trim().to_string()),
            Validator::Custom(func) => func(input).map_err(ValidationError::new),
        }
    }
}

#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    pub max_len: Option<usize>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            help: None,
            max_len: None,
            validator,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key == key)
    }
}

/// Snapshot of collected data displayed before final confirmation.
#[derive(Debug, Default)]
pub struct FormSummary {
    pub entries: Vec<(String, String)>,
}

pub struct PromptContext<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<&'a str>,
    pub options: &'a [String],
    pub index: usize,
    pub total: usize,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, summary: &FormSummary, lines: &[String]) -> ConfirmationResponse;
}

/// Terminal implementation backed by the shared menu renderer and prompts.
#[derive(Default)]
pub struct WizardInteraction {
    title: &'static str,
}

impl WizardInteraction {
    pub fn new(title: &'static str) -> Self {
        Self { title }
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        render_prompt(self.title, context);
        match text_input(
            context.descriptor.label,
            context.default,
            context.descriptor.max_len,
        ) {
            Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(TextPromptResult::Keep) => PromptResponse::Keep,
            Ok(TextPromptResult::Back) => PromptResponse::Back,
            Ok(TextPromptResult::Help) => PromptResponse::Help,
            Ok(TextPromptResult::Escape) if context.index > 0 => PromptResponse::Back,
            Ok(TextPromptResult::Escape) | Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_choice(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let lines = self.choice_context_lines(context);
        let title = step_title(self.title, context);
        match choice_menu(
            &title,
            &lines,
            context.options,
            context.default,
            context.index > 0,
        ) {
            Ok(ChoicePromptResult::Value(value)) => {
                if context
                    .default
                    .is_some_and(|default| default.eq_ignore_ascii_case(&value))
                {
                    PromptResponse::Keep
                } else {
                    PromptResponse::Value(value)
                }
            }
            Ok(ChoicePromptResult::Back) => PromptResponse::Back,
            _ => PromptResponse::Cancel,
        }
    }

    fn prompt_boolean(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let options = vec!["Yes".to_string(), "No".to_string()];
        let default_label = context
            .default
            .map(|value| if value == "true" { "Yes" } else { "No" });
        let lines = self.choice_context_lines(context);
        let title = step_title(self.title, context);
        match choice_menu(&title, &lines, &options, default_label, context.index > 0) {
            Ok(ChoicePromptResult::Value(choice)) => {
                let value = if choice == "Yes" { "true" } else { "false" };
                if context.default == Some(value) {
                    PromptResponse::Keep
                } else {
                    PromptResponse::Value(value.to_string())
                }
            }
            Ok(ChoicePromptResult::Back) => PromptResponse::Back,
            _ => PromptResponse::Cancel,
        }
    }

    fn choice_context_lines(&self, context: &PromptContext<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(default) = context.default {
            lines.push(format!("Current: {}", display_value(context.descriptor, default)));
        }
        if let Some(help) = context.descriptor.help {
            lines.push(help.to_string());
        }
        lines
    }
}

impl FormInteraction for WizardInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        match &context.descriptor.kind {
            FieldKind::Choice(_) | FieldKind::DependentChoice => self.prompt_choice(context),
            FieldKind::Boolean => self.prompt_boolean(context),
            FieldKind::Text => self.prompt_text(context),
        }
    }

    fn confirm(&mut self, _summary: &FormSummary, lines: &[String]) -> ConfirmationResponse {
        let title = format!("{}: review", self.title);
        match confirm_menu(&title, lines) {
            Ok(ConfirmationPromptResult::Confirm) => ConfirmationResponse::Confirm,
            Ok(ConfirmationPromptResult::Back) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

/// In-progress form. [`FormEngine::run`] drives the full loop.
pub struct FormSession<'a> {
    descriptor: &'a FormDescriptor,
    values: BTreeMap<String, String>,
    index: usize,
    completed: bool,
    cancelled: bool,
}

impl<'a> FormSession<'a> {
    pub fn new(descriptor: &'a FormDescriptor, defaults: BTreeMap<String, String>) -> Self {
        Self {
            descriptor,
            values: defaults,
            index: 0,
            completed: false,
            cancelled: false,
        }
    }

    pub fn current_field(&self) -> Option<FormStep<'a>> {
        self.descriptor.fields.get(self.index).map(|field| FormStep {
            descriptor: field,
            default: self.values.get(field.key).cloned(),
            index: self.index,
            total: self.descriptor.fields.len(),
        })
    }

    pub fn apply_response(
        &mut self,
        response: PromptResponse,
        options: &[String],
    ) -> Result<FormSessionEvent, ValidationError> {
        if self.completed || self.cancelled {
            return Ok(FormSessionEvent::NoOp);
        }

        let Some(field) = self.descriptor.fields.get(self.index) else {
            return Ok(FormSessionEvent::NoOp);
        };

        match response {
            PromptResponse::Cancel => {
                self.cancelled = true;
                Ok(FormSessionEvent::Cancelled)
            }
            PromptResponse::Back => {
                if self.index > 0 {
                    self.index -= 1;
                    Ok(FormSessionEvent::Moved)
                } else {
                    io::print_warning("Already at the first field.");
                    Ok(FormSessionEvent::Repeat)
                }
            }
            PromptResponse::Help => {
                io::print_info(
                    field
                        .help
                        .unwrap_or("No additional information available for this field."),
                );
                Ok(FormSessionEvent::Repeat)
            }
            PromptResponse::Keep => {
                if self.values.contains_key(field.key) || !field.required {
                    self.index += 1;
                    Ok(FormSessionEvent::Moved)
                } else {
                    io::print_warning("This field is required.");
                    Ok(FormSessionEvent::Repeat)
                }
            }
            PromptResponse::Value(raw) => match validate_field(field, &raw, options) {
                Ok(value) => {
                    self.values.insert(field.key.to_string(), value);
                    self.index += 1;
                    Ok(FormSessionEvent::Moved)
                }
                Err(err) => {
                    io::print_warning(&err.message);
                    Err(err)
                }
            },
        }
    }

    /// Moves to the field named `key`; returns `false` if it does not exist.
    pub fn jump_to(&mut self, key: &str) -> bool {
        match self.descriptor.position(key) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Leaves the remaining fields as they are and goes to the review step.
    pub fn skip_to_review(&mut self) -> bool {
        self.index = self.descriptor.fields.len();
        true
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.descriptor.fields.len()
    }

    pub fn mark_complete(&mut self) {
        self.completed = true;
    }

    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.values
    }
}

fn validate_field(
    field: &FieldDescriptor,
    raw: &str,
    options: &[String],
) -> Result<String, ValidationError> {
    match &field.kind {
        FieldKind::Choice(_) | FieldKind::DependentChoice => {
            let needle = raw.trim();
            options
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(needle))
                .cloned()
                .ok_or_else(|| {
                    ValidationError::new(format!("Value must be one of: {}", options.join(", ")))
                })
        }
        FieldKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok("true".into()),
            "n" | "no" | "false" | "0" => Ok("false".into()),
            _ => Err(ValidationError::new("Answer yes or no")),
        },
        FieldKind::Text => field.validator.validate(raw),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSessionEvent {
    Moved,
    Repeat,
    Cancelled,
    NoOp,
}

pub struct FormStep<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<String>,
    pub index: usize,
    pub total: usize,
}

impl<'a> FormStep<'a> {
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// Contract for a concrete form.
pub trait FormFlow {
    type Output;
    type Error;

    fn descriptor(&self) -> &FormDescriptor;

    /// Values used to pre-populate the session.
    fn defaults(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Options of a [`FieldKind::DependentChoice`] field given the entries so far.
    fn choices(&self, _key: &str, _values: &BTreeMap<String, String>) -> Vec<String> {
        Vec::new()
    }

    /// Invoked after the value of `key` changed.
    fn field_changed(&self, _key: &str, _values: &mut BTreeMap<String, String>) {}

    fn commit(&self, values: BTreeMap<String, String>) -> Result<Self::Output, Self::Error>;

    /// Fields to revisit after a failed commit, as `(key, message)` pairs.
    /// An empty list makes the error final.
    fn rejected_fields(&self, _error: &Self::Error) -> Vec<(String, String)> {
        Vec::new()
    }
}

pub struct FormEngine<'a, F: FormFlow> {
    flow: &'a F,
}

impl<'a, F: FormFlow> FormEngine<'a, F> {
    pub fn new(flow: &'a F) -> Self {
        Self { flow }
    }

    fn options_for(&self, field: &FieldDescriptor, values: &BTreeMap<String, String>) -> Vec<String> {
        match &field.kind {
            FieldKind::Choice(options) => options.clone(),
            FieldKind::DependentChoice => self.flow.choices(field.key, values),
            FieldKind::Text | FieldKind::Boolean => Vec::new(),
        }
    }

    pub fn run<I: FormInteraction>(
        &self,
        interaction: &mut I,
    ) -> Result<FormResult<F::Output>, F::Error> {
        let descriptor = self.flow.descriptor();
        let mut session = FormSession::new(descriptor, self.flow.defaults());
        // Fields rejected by the last commit that still need an answer.
        let mut revisit: Vec<&'static str> = Vec::new();

        loop {
            if session.cancelled {
                return Ok(FormResult::Cancelled);
            }

            if session.is_complete() {
                let summary = build_summary(descriptor, session.values());
                let lines = format_summary_lines(&summary);
                match interaction.confirm(&summary, &lines) {
                    ConfirmationResponse::Confirm => {
                        match self.flow.commit(session.values().clone()) {
                            Ok(output) => {
                                session.mark_complete();
                                return Ok(FormResult::Completed(output));
                            }
                            Err(err) => {
                                let rejected = self.flow.rejected_fields(&err);
                                revisit = descriptor
                                    .fields
                                    .iter()
                                    .filter(|field| rejected.iter().any(|(key, _)| key == field.key))
                                    .map(|field| field.key)
                                    .collect();
                                let Some(first) = revisit.first().copied() else {
                                    return Err(err);
                                };
                                for (key, message) in &rejected {
                                    let label = descriptor
                                        .position(key)
                                        .map(|index| descriptor.fields[index].label)
                                        .unwrap_or(key.as_str());
                                    io::print_warning(format!("{label}: {message}"));
                                }
                                session.jump_to(first);
                                continue;
                            }
                        }
                    }
                    ConfirmationResponse::Back => {
                        if descriptor.fields.is_empty() {
                            return Ok(FormResult::Cancelled);
                        }
                        let last = descriptor.fields.len() - 1;
                        session.jump_to(descriptor.fields[last].key);
                        continue;
                    }
                    ConfirmationResponse::Cancel => {
                        session.mark_cancelled();
                        return Ok(FormResult::Cancelled);
                    }
                }
            }

            let Some(step) = session.current_field() else {
                session.mark_complete();
                continue;
            };

            let key = step.descriptor.key;
            let options = self.options_for(step.descriptor, session.values());
            let response = interaction.prompt_field(&PromptContext {
                descriptor: step.descriptor,
                default: step.default_value(),
                options: &options,
                index: step.index,
                total: step.total,
            });

            let before = session.values().get(key).cloned();
            let index_before = session.index();
            match session.apply_response(response, &options) {
                Ok(FormSessionEvent::Moved) => {
                    if session.values().get(key) != before.as_ref() {
                        self.flow.field_changed(key, session.values_mut());
                    }
                    if session.index() < index_before {
                        revisit.clear();
                    } else if revisit.first() == Some(&key) {
                        revisit.remove(0);
                        match revisit.first() {
                            Some(next) => session.jump_to(next),
                            None => session.skip_to_review(),
                        };
                    }
                }
                Ok(FormSessionEvent::Cancelled) => return Ok(FormResult::Cancelled),
                Ok(FormSessionEvent::Repeat | FormSessionEvent::NoOp) | Err(_) => {}
            }
        }
    }
}

fn step_title(form: &str, context: &PromptContext<'_>) -> String {
    format!(
        "{form}: step {} of {}, {}",
        context.index + 1,
        context.total,
        context.descriptor.label
    )
}

fn render_prompt(form: &str, context: &PromptContext<'_>) {
    let formatter = Formatter::new();
    formatter.print_header(step_title(form, context));
    if let Some(default_value) = context.default {
        formatter.print_detail(format!("Current: {}", default_value));
    }
    if let Some(help) = context.descriptor.help {
        formatter.print_detail(help);
    }
    let escape_hint = if context.index == 0 {
        "ESC leaves the form."
    } else {
        "ESC or :back returns to the previous field."
    };
    formatter.print_detail(format!("Type a value and press Enter. {escape_hint}"));
}

fn display_value(field: &FieldDescriptor, value: &str) -> String {
    match field.kind {
        FieldKind::Boolean if value == "true" => "Yes".into(),
        FieldKind::Boolean => "No".into(),
        _ if value.is_empty() => "[empty]".into(),
        _ => value.to_string(),
    }
}

fn format_summary_lines(summary: &FormSummary) -> Vec<String> {
    let mut lines = vec!["Review your entries:".to_string()];
    for (label, value) in &summary.entries {
        lines.push(format!("  {}: {}", label, value));
    }
    lines
}

fn build_summary(descriptor: &FormDescriptor, values: &BTreeMap<String, String>) -> FormSummary {
    let entries = descriptor
        .fields
        .iter()
        .map(|field| {
            let value = values
                .get(field.key)
                .map(|value| display_value(field, value))
                .unwrap_or_else(|| "[unfilled]".to_string());
            (field.label.to_string(), value)
        })
        .collect();
    FormSummary { entries }
}

/// Vehicle details form: type, brand, model, plate and the save flag.
pub struct VehicleWizard {
    descriptor: FormDescriptor,
    existing: Option<Vehicle>,
}

impl VehicleWizard {
    pub fn new(existing: Option<&Vehicle>) -> Self {
        let kinds = VehicleKind::ALL
            .iter()
            .map(|kind| kind.label().to_string())
            .collect();
        let brand_options = brands().into_iter().map(str::to_string).collect();
        let descriptor = FormDescriptor::new(
            "vehicle",
            vec![
                FieldDescriptor::new(
                    FIELD_VEHICLE_TYPE,
                    "Vehicle type",
                    FieldKind::Choice(kinds),
                    Validator::None,
                ),
                FieldDescriptor::new(
                    FIELD_BRAND,
                    "Brand",
                    FieldKind::Choice(brand_options),
                    Validator::None,
                ),
                FieldDescriptor::new(
                    FIELD_MODEL,
                    "Model",
                    FieldKind::DependentChoice,
                    Validator::None,
                )
                .with_help("Models listed are those of the selected brand."),
                FieldDescriptor::new(
                    FIELD_VEHICLE_NUMBER,
                    "Vehicle number",
                    FieldKind::Text,
                    Validator::custom(|raw| Ok(format_vehicle_number(raw))),
                )
                .with_max_len(VEHICLE_NUMBER_MAX_LEN)
                .with_help("Registration plate, e.g. MH 12 AB 1234."),
                FieldDescriptor::new(
                    FIELD_SAVE,
                    "Save to my vehicles",
                    FieldKind::Boolean,
                    Validator::None,
                )
                .with_optional(),
            ],
        );
        Self {
            descriptor,
            existing: existing.cloned(),
        }
    }
}

impl FormFlow for VehicleWizard {
    type Output = Vehicle;
    type Error = FieldErrors;

    fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    fn defaults(&self) -> BTreeMap<String, String> {
        let mut defaults = BTreeMap::new();
        match &self.existing {
            Some(vehicle) => {
                defaults.insert(FIELD_VEHICLE_TYPE.into(), vehicle.vehicle_type.label().into());
                defaults.insert(FIELD_BRAND.into(), vehicle.brand.clone());
                defaults.insert(FIELD_MODEL.into(), vehicle.model.clone());
                defaults.insert(FIELD_VEHICLE_NUMBER.into(), vehicle.vehicle_number.clone());
                defaults.insert(FIELD_SAVE.into(), vehicle.save_to_vehicles.to_string());
            }
            None => {
                defaults.insert(FIELD_SAVE.into(), "true".into());
            }
        }
        defaults
    }

    fn choices(&self, key: &str, values: &BTreeMap<String, String>) -> Vec<String> {
        if key != FIELD_MODEL {
            return Vec::new();
        }
        values
            .get(FIELD_BRAND)
            .map(|brand| models_for(brand).iter().map(|m| m.to_string()).collect())
            .unwrap_or_default()
    }

    fn field_changed(&self, key: &str, values: &mut BTreeMap<String, String>) {
        if key == FIELD_BRAND {
            values.remove(FIELD_MODEL);
        }
    }

    fn commit(&self, values: BTreeMap<String, String>) -> Result<Vehicle, FieldErrors> {
        let mut draft = VehicleDraft::default();
        let get = |key: &str| values.get(key).map(String::as_str).unwrap_or_default();
        if let Some(kind) = VehicleKind::parse(get(FIELD_VEHICLE_TYPE)) {
            draft.set_vehicle_type(kind);
        }
        draft.set_brand(get(FIELD_BRAND));
        draft.set_model(get(FIELD_MODEL));
        draft.set_vehicle_number(get(FIELD_VEHICLE_NUMBER));
        draft.set_save_to_vehicles(get(FIELD_SAVE) != "false");
        match draft.submit() {
            Some(vehicle) => Ok(vehicle),
            None => Err(draft.errors().clone()),
        }
    }

    fn rejected_fields(&self, error: &FieldErrors) -> Vec<(String, String)> {
        error
            .iter()
            .map(|(key, message)| (key.to_string(), message.to_string()))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::OnceLock;

    struct MockInteraction {
        prompts: VecDeque<PromptResponse>,
        confirmations: VecDeque<ConfirmationResponse>,
        seen: Vec<(String, Option<String>, Vec<String>)>,
    }

    impl MockInteraction {
        fn new(prompts: Vec<PromptResponse>, confirmations: Vec<ConfirmationResponse>) -> Self {
            Self {
                prompts: prompts.into(),
                confirmations: confirmations.into(),
                seen: Vec::new(),
            }
        }

        fn prompted_keys(&self) -> Vec<&str> {
            self.seen.iter().map(|(key, _, _)| key.as_str()).collect()
        }
    }

    impl FormInteraction for MockInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            self.seen.push((
                context.descriptor.key.to_string(),
                context.default.map(str::to_string),
                context.options.to_vec(),
            ));
            self.prompts.pop_front().unwrap_or(PromptResponse::Cancel)
        }

        fn confirm(&mut self, _summary: &FormSummary, _lines: &[String]) -> ConfirmationResponse {
            self.confirmations
                .pop_front()
                .unwrap_or(ConfirmationResponse::Cancel)
        }
    }

    struct NameForm;

    impl FormFlow for NameForm {
        type Output = BTreeMap<String, String>;
        type Error = &'static str;

        fn descriptor(&self) -> &FormDescriptor {
            static DESCRIPTOR: OnceLock<FormDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                FormDescriptor::new(
                    "test",
                    vec![
                        FieldDescriptor::new(
                            "name",
                            "Name",
                            FieldKind::Text,
                            Validator::custom(|raw| match raw.trim() {
                                "" => Err("Value cannot be empty".into()),
                                name => Ok(name.to_string()),
                            }),
                        ),
                        FieldDescriptor::new("note", "Note", FieldKind::Text, Validator::None)
                            .with_optional()
                            .with_help("Anything the technician should know."),
                    ],
                )
            })
        }

        fn commit(&self, values: BTreeMap<String, String>) -> Result<Self::Output, Self::Error> {
            Ok(values)
        }
    }

    fn value(raw: &str) -> PromptResponse {
        PromptResponse::Value(raw.into())
    }

    #[test]
    fn form_reprompts_on_invalid_input_and_supports_back() {
        let mut interaction = MockInteraction::new(
            vec![
                value(""),
                value("Asha"),
                PromptResponse::Back,
                PromptResponse::Keep,
                PromptResponse::Help,
                PromptResponse::Keep,
            ],
            vec![ConfirmationResponse::Confirm],
        );
        let result = FormEngine::new(&NameForm).run(&mut interaction).unwrap();
        match result {
            FormResult::Completed(values) => {
                assert_eq!(values.get("name").unwrap(), "Asha");
                assert!(values.get("note").is_none());
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(
            interaction.prompted_keys(),
            vec!["name", "name", "note", "name", "note", "note"]
        );
    }

    #[test]
    fn cancel_stops_the_form() {
        let mut interaction = MockInteraction::new(vec![PromptResponse::Cancel], vec![]);
        let result = FormEngine::new(&NameForm).run(&mut interaction).unwrap();
        assert_eq!(result, FormResult::Cancelled);
    }

    fn happy_path() -> Vec<PromptResponse> {
        vec![
            value("Car"),
            value("Honda"),
            value("City"),
            value("mh12ab1234"),
            PromptResponse::Keep,
        ]
    }

    #[test]
    fn vehicle_wizard_builds_vehicle() {
        let wizard = VehicleWizard::new(None);
        let mut interaction =
            MockInteraction::new(happy_path(), vec![ConfirmationResponse::Confirm]);
        let result = FormEngine::new(&wizard).run(&mut interaction).unwrap();
        let FormResult::Completed(vehicle) = result else {
            panic!("vehicle form did not complete");
        };
        assert_eq!(vehicle.vehicle_type, VehicleKind::Car);
        assert_eq!(vehicle.model, "City");
        assert_eq!(vehicle.vehicle_number, "MH 12 AB 1234");
        assert!(vehicle.save_to_vehicles);

        let model_options = &interaction.seen[2].2;
        assert_eq!(model_options.first().map(String::as_str), Some("City"));
    }

    #[test]
    fn rejected_plate_returns_to_that_field_only() {
        let wizard = VehicleWizard::new(None);
        let mut prompts = happy_path();
        prompts[3] = value("MH12A1234");
        prompts.push(value("MH12AB1234"));
        let mut interaction = MockInteraction::new(
            prompts,
            vec![ConfirmationResponse::Confirm, ConfirmationResponse::Confirm],
        );
        let result = FormEngine::new(&wizard).run(&mut interaction).unwrap();
        let FormResult::Completed(vehicle) = result else {
            panic!("vehicle form did not complete");
        };
        assert_eq!(vehicle.vehicle_number, "MH 12 AB 1234");
        assert_eq!(vehicle.brand, "Honda");

        let keys = interaction.prompted_keys();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[5], FIELD_VEHICLE_NUMBER);
        assert_eq!(interaction.seen[5].1.as_deref(), Some("MH 12 A1 234"));
    }

    #[test]
    fn changing_brand_clears_model_and_updates_options() {
        let wizard = VehicleWizard::new(None);
        let mut interaction = MockInteraction::new(
            vec![
                value("SUV"),
                value("Honda"),
                value("City"),
                PromptResponse::Back,
                PromptResponse::Back,
                value("Toyota"),
                value("Fortuner"),
                value("KA01AB1234"),
                value("no"),
            ],
            vec![ConfirmationResponse::Confirm],
        );
        let result = FormEngine::new(&wizard).run(&mut interaction).unwrap();
        let FormResult::Completed(vehicle) = result else {
            panic!("vehicle form did not complete");
        };
        assert_eq!(vehicle.model, "Fortuner");
        assert!(!vehicle.save_to_vehicles);

        let (key, default, options) = &interaction.seen[6];
        assert_eq!(key, FIELD_MODEL);
        assert!(default.is_none());
        assert!(options.contains(&"Innova".to_string()));
    }

    #[test]
    fn existing_vehicle_prefills_every_field() {
        let vehicle = Vehicle {
            vehicle_type: VehicleKind::Bike,
            brand: "Tata".into(),
            model: "Nexon".into(),
            vehicle_number: "DL 01 CA 1111".into(),
            save_to_vehicles: false,
        };
        let wizard = VehicleWizard::new(Some(&vehicle));
        let mut interaction = MockInteraction::new(
            vec![PromptResponse::Keep; 5],
            vec![ConfirmationResponse::Confirm],
        );
        let result = FormEngine::new(&wizard).run(&mut interaction).unwrap();
        assert_eq!(result, FormResult::Completed(vehicle));
    }

    #[test]
    fn summary_shows_booleans_as_words() {
        let wizard = VehicleWizard::new(None);
        let summary = build_summary(wizard.descriptor(), &wizard.defaults());
        let save = summary
            .entries
            .iter()
            .find(|(label, _)| label == "Save to my vehicles")
            .unwrap();
        assert_eq!(save.1, "Yes");
    }
}

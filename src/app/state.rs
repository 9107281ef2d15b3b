//! Application state types and enums

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dentreg::sink::{Ack, ParsedError};
use dentreg::wizard::{FieldKind, FieldSpec, FieldValue, Variant, WizardController};

/// Variant chooser menu items (last entry exits)
pub const VARIANT_MENU_ITEMS: &[&str] = &["Register a clinic", "Register as a job seeker", "Exit"];

/// Application mode/screen
#[derive(Debug)]
pub enum AppMode {
    ChooseVariant { selected: usize },
    Wizard(WizardScreen),
    Complete { variant: Variant, ack: Ack },
}

impl AppMode {
    pub fn menu() -> Self {
        AppMode::ChooseVariant { selected: 0 }
    }
}

/// Map a menu index to a variant (None = exit)
pub fn variant_for_menu_index(index: usize) -> Option<Variant> {
    Variant::ALL.get(index).copied()
}

/// One open wizard in the terminal
#[derive(Debug)]
pub struct WizardScreen {
    /// Identifies this opening; results of older sessions are dropped
    pub session: u64,
    pub controller: WizardController,
    /// Index into the current step's fields
    pub selected_field: usize,
    /// Highlighted option of a multiple-choice field
    pub option_cursor: usize,
    /// Text being typed while a field is in edit mode
    pub input: Option<String>,
    /// Edit error for the selected field
    pub field_error: Option<String>,
    /// Last submission failure, kept until the next attempt
    pub submit_error: Option<ParsedError>,
    pub submitting: bool,
    /// Ack of a successful submission, waiting for the close signal
    pub accepted: Option<Ack>,
    /// Set by the close callback when its signal could not be queued
    pub dismiss_lost: Arc<AtomicBool>,
}

impl WizardScreen {
    pub fn new(session: u64, controller: WizardController) -> Self {
        Self {
            session,
            controller,
            selected_field: 0,
            option_cursor: 0,
            input: None,
            field_error: None,
            submit_error: None,
            submitting: false,
            accepted: None,
            dismiss_lost: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the close signal of this session was dropped
    pub fn dismiss_was_lost(&self) -> bool {
        self.dismiss_lost.load(Ordering::SeqCst)
    }

    pub fn step_fields(&self) -> Vec<&'static FieldSpec> {
        self.controller.state().step_fields()
    }

    pub fn selected_spec(&self) -> Option<&'static FieldSpec> {
        self.step_fields().get(self.selected_field).copied()
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    /// Reset the field cursor after the step changed
    pub fn reset_cursor(&mut self) {
        self.selected_field = 0;
        self.option_cursor = 0;
        self.input = None;
        self.field_error = None;
    }

    /// Initial text for editing the given field
    pub fn edit_text(&self, spec: &FieldSpec) -> String {
        match self.controller.state().field(spec.name) {
            Some(FieldValue::Text(s)) => s,
            Some(FieldValue::Set(items)) => items.join(", "),
            Some(FieldValue::Hours(h)) if !h.is_empty() => format!("{}-{}", h.start, h.end),
            Some(FieldValue::Attachment(Some(a))) => a.path.display().to_string(),
            _ => String::new(),
        }
    }
}

/// Whether a field is edited through the text input line
pub fn uses_text_input(kind: FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Text | FieldKind::List | FieldKind::Hours | FieldKind::Attachment
    )
}

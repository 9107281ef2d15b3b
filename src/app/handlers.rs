//! Keyboard input handlers for the application

use anyhow::Result;
use crossterm::event::KeyCode;
use std::path::Path;

use dentreg::constants::MAX_INPUT_LENGTH;
use dentreg::wizard::{Attachment, FieldKind, FieldSpec, FieldValue, WorkingHours};

use super::state::*;
use super::App;

impl App {
    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        // Handle exit confirmation dialog
        if self.show_exit_confirm {
            match key {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.show_exit_confirm = false;
                }
                _ => {}
            }
            return Ok(());
        }

        match &self.mode {
            AppMode::ChooseVariant { selected } => {
                let selected = *selected;
                self.handle_menu_key(key, selected);
            }
            AppMode::Wizard(_) => self.handle_wizard_key(key),
            AppMode::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => self.mode = AppMode::menu(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.show_exit_confirm = true,
                _ => {}
            },
        }

        Ok(())
    }

    fn handle_menu_key(&mut self, key: KeyCode, selected: usize) {
        let max = VARIANT_MENU_ITEMS.len() - 1;
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.mode = AppMode::ChooseVariant {
                    selected: selected.saturating_sub(1),
                };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.mode = AppMode::ChooseVariant {
                    selected: (selected + 1).min(max),
                };
            }
            KeyCode::Enter => match variant_for_menu_index(selected) {
                Some(variant) => self.open_wizard(variant),
                None => self.show_exit_confirm = true,
            },
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.show_exit_confirm = true;
            }
            _ => {}
        }
    }

    fn handle_wizard_key(&mut self, key: KeyCode) {
        let AppMode::Wizard(screen) = &mut self.mode else {
            return;
        };

        if screen.is_editing() {
            handle_input_key(screen, key);
            return;
        }

        // Only closing is allowed while the sink is working
        if screen.submitting {
            if key == KeyCode::Esc {
                self.close_wizard();
            }
            return;
        }

        match key {
            KeyCode::Esc => self.close_wizard(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.show_exit_confirm = true,
            KeyCode::Char('s') | KeyCode::Char('S') => self.start_submission(),
            KeyCode::Tab | KeyCode::PageDown | KeyCode::Char('n') => {
                screen.controller.next();
                screen.reset_cursor();
            }
            KeyCode::BackTab | KeyCode::PageUp | KeyCode::Char('p') => {
                screen.controller.previous();
                screen.reset_cursor();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                screen.selected_field = screen.selected_field.saturating_sub(1);
                screen.option_cursor = 0;
                screen.field_error = None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = screen.step_fields().len().saturating_sub(1);
                screen.selected_field = (screen.selected_field + 1).min(max);
                screen.option_cursor = 0;
                screen.field_error = None;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                screen.option_cursor = screen.option_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(FieldKind::Choices(options)) = screen.selected_spec().map(|s| s.kind) {
                    let max = options.len().saturating_sub(1);
                    screen.option_cursor = (screen.option_cursor + 1).min(max);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => activate_field(screen),
            _ => {}
        }
    }
}

/// Enter/Space on the selected field: start editing or toggle
fn activate_field(screen: &mut WizardScreen) {
    let Some(spec) = screen.selected_spec() else {
        return;
    };
    screen.field_error = None;

    let result = match spec.kind {
        FieldKind::Choices(options) => {
            let Some(option) = options.get(screen.option_cursor) else {
                return;
            };
            screen.controller.toggle_option(spec.name, option).map(|_| ())
        }
        FieldKind::Flag => {
            let current = matches!(
                screen.controller.state().field(spec.name),
                Some(FieldValue::Flag(true))
            );
            screen.controller.set_field(spec.name, FieldValue::Flag(!current))
        }
        kind if uses_text_input(kind) => {
            screen.input = Some(screen.edit_text(spec));
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(e) = result {
        screen.field_error = Some(e.to_string());
    }
}

/// Keys while the input line is active
fn handle_input_key(screen: &mut WizardScreen, key: KeyCode) {
    let Some(input) = screen.input.as_mut() else {
        return;
    };

    match key {
        KeyCode::Char(c) => {
            if input.len() < MAX_INPUT_LENGTH {
                input.push(c);
            }
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Esc => {
            screen.input = None;
            screen.field_error = None;
        }
        KeyCode::Enter => {
            let text = input.clone();
            let Some(spec) = screen.selected_spec() else {
                screen.input = None;
                return;
            };
            match commit_input(spec, &text) {
                Ok(value) => match screen.controller.set_field(spec.name, value) {
                    Ok(()) => {
                        screen.input = None;
                        screen.field_error = None;
                    }
                    Err(e) => screen.field_error = Some(e.to_string()),
                },
                // Keep the input open so the user can fix it
                Err(message) => screen.field_error = Some(message),
            }
        }
        _ => {}
    }
}

/// Turn typed text into a value of the field's kind
pub(crate) fn commit_input(spec: &FieldSpec, text: &str) -> Result<FieldValue, String> {
    let trimmed = text.trim();
    match spec.kind {
        FieldKind::Text => Ok(FieldValue::Text(text.to_string())),
        FieldKind::List => Ok(FieldValue::set(trimmed.split(','))),
        FieldKind::Hours if trimmed.is_empty() => Ok(FieldValue::Hours(WorkingHours::default())),
        FieldKind::Hours => WorkingHours::parse(trimmed)
            .map(FieldValue::Hours)
            .ok_or_else(|| "Use the form 09:00-17:00".to_string()),
        FieldKind::Attachment if trimmed.is_empty() => Ok(FieldValue::Attachment(None)),
        FieldKind::Attachment => Attachment::from_path(Path::new(trimmed))
            .map(|a| FieldValue::Attachment(Some(a)))
            .map_err(|e| e.to_string()),
        FieldKind::Choices(_) | FieldKind::Flag => {
            Err(format!("{} is not edited as text", spec.label))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentreg::sink::{ConfiguredSink, DryRunSink};
    use dentreg::wizard::Variant;

    fn wizard_app(variant: Variant) -> App {
        let mut app = App::new(ConfiguredSink::DryRun(DryRunSink));
        app.open_wizard(variant);
        app
    }

    fn screen(app: &App) -> &WizardScreen {
        match &app.mode {
            AppMode::Wizard(screen) => screen,
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_menu_opens_job_seeker_wizard() {
        let mut app = App::new(ConfiguredSink::DryRun(DryRunSink));
        app.handle_key(KeyCode::Down).await.unwrap();
        app.handle_key(KeyCode::Enter).await.unwrap();
        assert_eq!(screen(&app).controller.variant(), Variant::JobSeeker);
    }

    #[tokio::test]
    async fn test_menu_exit_entry_asks_for_confirmation() {
        let mut app = App::new(ConfiguredSink::DryRun(DryRunSink));
        app.handle_key(KeyCode::Down).await.unwrap();
        app.handle_key(KeyCode::Down).await.unwrap();
        app.handle_key(KeyCode::Down).await.unwrap();
        app.handle_key(KeyCode::Enter).await.unwrap();
        assert!(app.show_exit_confirm);
        app.handle_key(KeyCode::Char('y')).await.unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_edit_text_field() {
        let mut app = wizard_app(Variant::Clinic);
        app.handle_key(KeyCode::Enter).await.unwrap();
        type_text(&mut app, "Jane Doe").await;
        app.handle_key(KeyCode::Enter).await.unwrap();

        let screen = screen(&app);
        assert!(!screen.is_editing());
        assert_eq!(
            screen.controller.state().field("fullName"),
            Some(FieldValue::text("Jane Doe"))
        );
    }

    #[tokio::test]
    async fn test_escape_cancels_edit() {
        let mut app = wizard_app(Variant::Clinic);
        app.handle_key(KeyCode::Enter).await.unwrap();
        type_text(&mut app, "Jane").await;
        app.handle_key(KeyCode::Esc).await.unwrap();

        let screen = screen(&app);
        assert!(!screen.is_editing());
        assert_eq!(screen.controller.state().field("fullName"), Some(FieldValue::text("")));
    }

    #[tokio::test]
    async fn test_step_navigation_clamps() {
        let mut app = wizard_app(Variant::JobSeeker);
        app.handle_key(KeyCode::BackTab).await.unwrap();
        assert_eq!(screen(&app).controller.state().current_index(), 0);
        for _ in 0..5 {
            app.handle_key(KeyCode::Tab).await.unwrap();
        }
        assert_eq!(screen(&app).controller.state().current_index(), 2);
    }

    #[tokio::test]
    async fn test_toggle_specialization() {
        let mut app = wizard_app(Variant::Clinic);
        // specializations is the last field on the first clinic step
        for _ in 0..10 {
            app.handle_key(KeyCode::Down).await.unwrap();
        }
        assert_eq!(screen(&app).selected_spec().unwrap().name, "specializations");
        app.handle_key(KeyCode::Right).await.unwrap();
        app.handle_key(KeyCode::Char(' ')).await.unwrap();
        assert_eq!(
            screen(&app).controller.state().field("specializations"),
            Some(FieldValue::set(["Orthodontics"]))
        );
    }

    #[tokio::test]
    async fn test_escape_closes_wizard() {
        let mut app = wizard_app(Variant::Clinic);
        app.handle_key(KeyCode::Esc).await.unwrap();
        assert!(matches!(app.mode, AppMode::ChooseVariant { .. }));
    }

    #[test]
    fn test_commit_hours() {
        let spec = Variant::Clinic.field_spec("workingHours").unwrap();
        assert_eq!(
            commit_input(spec, "08:30-18:00"),
            Ok(FieldValue::Hours(WorkingHours {
                start: "08:30".to_string(),
                end: "18:00".to_string()
            }))
        );
        assert!(commit_input(spec, "mornings").is_err());
        assert_eq!(
            commit_input(spec, "  "),
            Ok(FieldValue::Hours(WorkingHours::default()))
        );
    }

    #[test]
    fn test_commit_list_splits_on_commas() {
        let spec = Variant::Clinic.field_spec("staffRoles").unwrap();
        assert_eq!(
            commit_input(spec, "Hygienist, Assistant"),
            Ok(FieldValue::set(["Hygienist", " Assistant"]))
        );
    }

    #[test]
    fn test_commit_missing_resume() {
        let spec = Variant::JobSeeker.field_spec("resume").unwrap();
        assert!(commit_input(spec, "/nonexistent/cv.pdf").is_err());
        assert_eq!(commit_input(spec, ""), Ok(FieldValue::Attachment(None)));
    }
}

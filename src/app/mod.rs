//! Application state management
//!
//! This module contains the core application state and is split into:
//! - `state.rs` - State type definitions (AppMode, WizardScreen)
//! - `handlers.rs` - Keyboard input handlers
//! - `messages.rs` - Submission result handling

mod handlers;
mod messages;
pub mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use dentreg::constants::SPINNER_TICK_MS;
use dentreg::sink::ConfiguredSink;
use dentreg::wizard::{Variant, WizardController};

pub use messages::AppMessage;
pub use state::{AppMode, WizardScreen, VARIANT_MENU_ITEMS};

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub should_quit: bool,
    pub show_exit_confirm: bool,
    pub spinner_state: usize,
    pub last_tick: Instant,
    /// Where registrations are sent, for the footer
    pub destination: String,
    sink: ConfiguredSink,
    next_session: u64,
    pub(crate) msg_tx: Option<mpsc::Sender<AppMessage>>,
}

impl App {
    pub fn new(sink: ConfiguredSink) -> Self {
        Self {
            mode: AppMode::menu(),
            should_quit: false,
            show_exit_confirm: false,
            spinner_state: 0,
            last_tick: Instant::now(),
            destination: sink.describe(),
            sink,
            next_session: 0,
            msg_tx: None,
        }
    }

    pub fn set_message_sender(&mut self, tx: mpsc::Sender<AppMessage>) {
        self.msg_tx = Some(tx);
    }

    /// Called on each tick to update animations
    pub fn tick(&mut self) {
        if self.last_tick.elapsed().as_millis() >= SPINNER_TICK_MS {
            self.spinner_state = (self.spinner_state + 1) % 10;
            self.last_tick = Instant::now();
        }
    }

    /// Start a fresh wizard for `variant`. Set the message sender first so
    /// the wizard's close signal can reach the event loop.
    pub fn open_wizard(&mut self, variant: Variant) {
        self.next_session += 1;
        let session = self.next_session;
        tracing::info!("Opening {} registration (session {})", variant.tag(), session);

        let tx = self.msg_tx.clone();
        let dismiss_lost = Arc::new(AtomicBool::new(false));
        let lost = Arc::clone(&dismiss_lost);
        let controller = WizardController::new(variant).on_close(move || {
            let delivered = tx
                .as_ref()
                .is_some_and(|tx| tx.try_send(AppMessage::WizardDismissed { session }).is_ok());
            if !delivered {
                tracing::warn!("Could not deliver close signal for session {}", session);
                lost.store(true, Ordering::SeqCst);
            }
        });

        let mut screen = WizardScreen::new(session, controller);
        screen.dismiss_lost = dismiss_lost;
        self.mode = AppMode::Wizard(screen);
    }

    /// Dispose the open wizard (if any) and return to the variant menu
    pub fn close_wizard(&mut self) {
        if let AppMode::Wizard(screen) = &mut self.mode {
            if screen.submitting {
                tracing::info!("Wizard closed during submission (session {})", screen.session);
            }
            screen.controller.close();
        }
        self.mode = AppMode::menu();
    }

    /// Hand the wizard's payload to the sink on a background task
    pub(crate) fn start_submission(&mut self) {
        let AppMode::Wizard(screen) = &mut self.mode else {
            return;
        };
        if screen.submitting {
            return;
        }

        let payload = match screen.controller.prepare_submission() {
            Ok(payload) => payload,
            Err(e) => {
                screen.field_error = Some(e.to_string());
                return;
            }
        };

        let Some(tx) = self.msg_tx.clone() else {
            tracing::error!("No message channel, cannot submit");
            return;
        };

        screen.submitting = true;
        screen.submit_error = None;
        screen.field_error = None;

        let session = screen.session;
        let sink = self.sink.clone();
        tokio::spawn(async move {
            use dentreg::sink::SubmissionSink;

            let result = sink.submit(&payload).await;
            if tx
                .send(AppMessage::SubmissionFinished { session, result })
                .await
                .is_err()
            {
                tracing::debug!("App gone before submission {} finished", session);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentreg::sink::DryRunSink;

    fn app() -> App {
        App::new(ConfiguredSink::DryRun(DryRunSink))
    }

    #[test]
    fn test_starts_on_menu() {
        assert!(matches!(app().mode, AppMode::ChooseVariant { selected: 0 }));
    }

    #[test]
    fn test_open_wizard() {
        let mut app = app();
        app.open_wizard(Variant::JobSeeker);
        match &app.mode {
            AppMode::Wizard(screen) => {
                assert_eq!(screen.controller.variant(), Variant::JobSeeker);
                assert_eq!(screen.session, 1);
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn test_close_wizard_disposes_controller() {
        let mut app = app();
        app.open_wizard(Variant::Clinic);
        app.close_wizard();
        assert!(matches!(app.mode, AppMode::ChooseVariant { .. }));
    }

    #[test]
    fn test_sessions_increase() {
        let mut app = app();
        app.open_wizard(Variant::Clinic);
        app.close_wizard();
        app.open_wizard(Variant::Clinic);
        match &app.mode {
            AppMode::Wizard(screen) => assert_eq!(screen.session, 2),
            other => panic!("unexpected mode: {other:?}"),
        }
    }
}

//! Message handling for the application

use anyhow::Result;

use dentreg::sink::{Ack, ParsedError, SubmitError};
use dentreg::wizard::WizardError;

use super::state::AppMode;
use super::App;

/// Messages sent from background tasks and wizard callbacks to the event loop
#[derive(Debug)]
pub enum AppMessage {
    /// A sink answered for the given session
    SubmissionFinished {
        session: u64,
        result: Result<Ack, SubmitError>,
    },
    /// The wizard of the given session asked to be dismissed
    WizardDismissed { session: u64 },
}

impl App {
    /// Handle messages from background tasks
    pub async fn handle_message(&mut self, msg: AppMessage) -> Result<()> {
        match msg {
            AppMessage::SubmissionFinished { session, result } => {
                self.handle_submission_finished(session, result);
            }
            AppMessage::WizardDismissed { session } => {
                self.handle_wizard_dismissed(session);
            }
        }
        Ok(())
    }

    fn handle_submission_finished(&mut self, session: u64, result: Result<Ack, SubmitError>) {
        let AppMode::Wizard(screen) = &mut self.mode else {
            tracing::debug!("Dropping result of session {}: wizard no longer open", session);
            return;
        };
        if screen.session != session {
            tracing::debug!(
                "Dropping result of session {}: session {} is open",
                session,
                screen.session
            );
            return;
        }

        screen.submitting = false;
        match screen.controller.complete_submission(result) {
            Ok(ack) => {
                // The close signal follows through the channel, unless it
                // could not be queued
                screen.accepted = Some(ack);
                if screen.dismiss_was_lost() {
                    self.handle_wizard_dismissed(session);
                }
            }
            Err(WizardError::Submit(e)) => {
                screen.submit_error = Some(ParsedError::from_submit_error(&e));
            }
            Err(e) => {
                tracing::warn!("Submission result not applied: {}", e);
            }
        }
    }

    fn handle_wizard_dismissed(&mut self, session: u64) {
        let ack = match &mut self.mode {
            AppMode::Wizard(screen) if screen.session == session => screen.accepted.take(),
            _ => None,
        };
        let Some(ack) = ack else {
            return;
        };

        if let AppMode::Wizard(screen) = &self.mode {
            let variant = screen.controller.variant();
            self.mode = AppMode::Complete { variant, ack };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentreg::sink::{ConfiguredSink, DryRunSink};
    use dentreg::wizard::Variant;
    use tokio::sync::mpsc;

    fn app_with_channel() -> (App, mpsc::Receiver<AppMessage>) {
        let (tx, rx) = mpsc::channel(8);
        let mut app = App::new(ConfiguredSink::DryRun(DryRunSink));
        app.set_message_sender(tx);
        (app, rx)
    }

    fn move_to_final_step(app: &mut App) {
        if let AppMode::Wizard(screen) = &mut app.mode {
            while !screen.controller.is_final_step() {
                screen.controller.next();
            }
        }
    }

    #[tokio::test]
    async fn test_dry_run_submission_reaches_complete() {
        let (mut app, mut rx) = app_with_channel();
        app.open_wizard(Variant::JobSeeker);
        move_to_final_step(&mut app);

        app.start_submission();
        let finished = rx.recv().await.unwrap();
        assert!(matches!(finished, AppMessage::SubmissionFinished { session: 1, .. }));
        app.handle_message(finished).await.unwrap();

        let dismissed = rx.recv().await.unwrap();
        assert!(matches!(dismissed, AppMessage::WizardDismissed { session: 1 }));
        app.handle_message(dismissed).await.unwrap();

        assert!(matches!(
            app.mode,
            AppMode::Complete { variant: Variant::JobSeeker, .. }
        ));
    }

    #[tokio::test]
    async fn test_failed_submission_stays_on_final_step() {
        let (mut app, _rx) = app_with_channel();
        app.open_wizard(Variant::Clinic);
        move_to_final_step(&mut app);
        if let AppMode::Wizard(screen) = &mut app.mode {
            screen.submitting = true;
        }

        let result = Err(SubmitError::Rejected {
            status: 503,
            message: String::new(),
        });
        app.handle_message(AppMessage::SubmissionFinished { session: 1, result })
            .await
            .unwrap();

        match &app.mode {
            AppMode::Wizard(screen) => {
                assert!(!screen.submitting);
                assert!(screen.controller.is_final_step());
                assert!(screen.submit_error.is_some());
                assert!(!screen.controller.is_closed());
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_full_channel_still_reaches_complete() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(ConfiguredSink::DryRun(DryRunSink));
        app.set_message_sender(tx.clone());
        app.open_wizard(Variant::Clinic);
        move_to_final_step(&mut app);
        tx.try_send(AppMessage::WizardDismissed { session: 99 }).unwrap();

        let result = Ok(Ack::new(Some("abc".to_string()), None));
        app.handle_message(AppMessage::SubmissionFinished { session: 1, result })
            .await
            .unwrap();

        match &app.mode {
            AppMode::Complete { variant, ack } => {
                assert_eq!(*variant, Variant::Clinic);
                assert_eq!(ack.id.as_deref(), Some("abc"));
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stale_session_result_ignored() {
        let (mut app, _rx) = app_with_channel();
        app.open_wizard(Variant::Clinic);
        app.close_wizard();
        app.open_wizard(Variant::Clinic);

        let result = Ok(Ack::new(None, None));
        app.handle_message(AppMessage::SubmissionFinished { session: 1, result })
            .await
            .unwrap();

        match &app.mode {
            AppMode::Wizard(screen) => {
                assert_eq!(screen.session, 2);
                assert!(screen.accepted.is_none());
                assert!(!screen.controller.is_closed());
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_premature_submit_shows_error() {
        let (mut app, mut rx) = app_with_channel();
        app.open_wizard(Variant::Clinic);
        app.start_submission();

        match &app.mode {
            AppMode::Wizard(screen) => {
                assert!(!screen.submitting);
                assert!(screen.field_error.as_deref().unwrap().contains("final step"));
            }
            other => panic!("unexpected mode: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }
}

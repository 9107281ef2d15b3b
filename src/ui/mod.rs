//! UI rendering module

mod layout;
mod screens;
pub mod theme;
pub mod widgets;

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppMode};

/// Main draw function - dispatches to appropriate screen
pub fn draw(frame: &mut Frame, app: &App) {
    match &app.mode {
        AppMode::ChooseVariant { selected } => {
            screens::variant_menu::draw(frame, *selected, app);
        }
        AppMode::Wizard(screen) => {
            screens::wizard::draw(frame, screen, app);
        }
        AppMode::Complete { variant, ack } => {
            screens::complete::draw(frame, *variant, ack, app);
        }
    }

    if app.show_exit_confirm {
        draw_exit_confirm(frame);
    }
}

/// Draw the exit confirmation popup centered on screen
fn draw_exit_confirm(frame: &mut Frame) {
    let popup_area = layout::centered_fixed(40, 7, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Quit without registering?", theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[", theme::dim()),
            Span::styled("Enter/Y", theme::key_hint()),
            Span::styled("] Yes  [", theme::dim()),
            Span::styled("Esc/N", theme::key_hint()),
            Span::styled("] No", theme::dim()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(Span::styled(" Exit ", theme::title())),
    );
    frame.render_widget(content, popup_area);
}

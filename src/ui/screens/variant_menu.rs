//! Variant chooser shown before a wizard is opened

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, VARIANT_MENU_ITEMS};
use crate::ui::layout::centered_rect;
use crate::ui::theme;
use crate::ui::widgets::MenuList;

pub fn draw(frame: &mut Frame, selected: usize, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Title
            Constraint::Min(5),    // Menu
            Constraint::Length(2), // Destination
            Constraint::Length(1), // Key hints
        ])
        .split(centered_rect(60, 70, area));

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Dental Registration", theme::title())),
        Line::from(Span::styled(
            "Sign up a clinic or a dental professional",
            theme::dim(),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let menu = MenuList::new(VARIANT_MENU_ITEMS, selected).title(" Register ");
    frame.render_widget(menu, chunks[1]);

    let destination = Paragraph::new(Line::from(vec![
        Span::styled("Sending to ", theme::dim()),
        Span::styled(app.destination.as_str(), theme::info()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(destination, chunks[2]);

    super::draw_footer(frame, chunks[3], &["↑↓ Navigate", "Enter Select", "q Quit"]);
}

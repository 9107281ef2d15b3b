//! Confirmation after the backend accepted a registration

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use dentreg::sink::Ack;
use dentreg::wizard::Variant;

use crate::app::App;
use crate::ui::layout::centered_rect;
use crate::ui::theme;

pub fn draw(frame: &mut Frame, variant: Variant, ack: &Ack, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(centered_rect(60, 60, area));

    super::draw_header(frame, chunks[0], "Registration Sent");

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("✓ {} registration accepted", variant.label()),
            theme::success(),
        )),
        Line::from(""),
    ];
    if let Some(id) = &ack.id {
        lines.push(Line::from(vec![
            Span::styled("Reference: ", theme::dim()),
            Span::styled(id.as_str(), theme::text()),
        ]));
    }
    if let Some(message) = &ack.message {
        lines.push(Line::from(Span::styled(message.as_str(), theme::text())));
    }
    lines.push(Line::from(vec![
        Span::styled("Received: ", theme::dim()),
        Span::styled(
            ack.received_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            theme::text(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Destination: ", theme::dim()),
        Span::styled(app.destination.as_str(), theme::info()),
    ]));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border()),
        );
    frame.render_widget(body, chunks[1]);

    super::draw_footer(frame, chunks[2], &["Enter Register another", "q Quit"]);
}

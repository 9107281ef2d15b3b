//! Screen renderers

pub mod complete;
pub mod variant_menu;
pub mod wizard;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

fn draw_header(frame: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(Line::from(Span::styled(title, theme::title())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_active()),
        );
    frame.render_widget(header, area);
}

/// Hints are written as "Key Action", e.g. "Tab Next"
fn footer_line<'a>(hints: &[&'a str]) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::dim()));
        }
        spans.push(Span::styled("[", theme::dim()));
        match hint.split_once(' ') {
            Some((key, action)) => {
                spans.push(Span::styled(key, theme::key_hint()));
                spans.push(Span::styled(format!("] {}", action), theme::dim()));
            }
            None => {
                spans.push(Span::styled(*hint, theme::key_hint()));
                spans.push(Span::styled("]", theme::dim()));
            }
        }
    }
    Line::from(spans)
}

fn draw_footer(frame: &mut Frame, area: Rect, hints: &[&str]) {
    let footer = Paragraph::new(footer_line(hints)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

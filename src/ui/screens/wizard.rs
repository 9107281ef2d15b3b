//! Wizard screen: step progress, fields of the current step, input line

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use dentreg::wizard::{FieldKind, FieldSpec, FieldValue};

use crate::app::{App, WizardScreen};
use crate::ui::layout::{centered_rect, wizard_layout};
use crate::ui::theme;
use crate::ui::widgets::{Spinner, StepProgress};

pub fn draw(frame: &mut Frame, screen: &WizardScreen, app: &App) {
    let area = centered_rect(90, 95, frame.area());
    let (progress_area, fields_area, status_area, footer_area) = wizard_layout(area);

    let state = screen.controller.state();
    let progress = StepProgress::new(state.steps(), state.current_index());
    frame.render_widget(progress, progress_area);

    draw_fields(frame, fields_area, screen);
    draw_status(frame, status_area, screen, app);

    let hints: &[&str] = if screen.is_editing() {
        &["Enter Save", "Esc Cancel"]
    } else if screen.submitting {
        &["Esc Close"]
    } else if screen.controller.is_final_step() {
        &["↑↓ Field", "Enter Edit", "Shift+Tab Back", "s Submit", "Esc Close"]
    } else {
        &["↑↓ Field", "Enter Edit", "Tab Next", "Shift+Tab Back", "Esc Close"]
    };
    super::draw_footer(frame, footer_area, hints);
}

fn draw_fields(frame: &mut Frame, area: Rect, screen: &WizardScreen) {
    let state = screen.controller.state();
    let step = state.current_step();
    let title = format!(
        " {} · {} of {} ",
        step.title,
        state.current_index() + 1,
        state.steps().len()
    );

    let mut lines = vec![Line::from("")];
    for (index, spec) in screen.step_fields().into_iter().enumerate() {
        let focused = index == screen.selected_field;
        let value = state.field(spec.name);
        lines.push(field_line(spec, value.as_ref(), focused));

        if let FieldKind::Choices(options) = spec.kind {
            if focused {
                lines.push(options_line(options, value.as_ref(), screen.option_cursor));
            }
        }
    }

    let content = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(Span::styled(title, theme::title()))
            .title_bottom(Span::styled(
                format!(" {} registration ", screen.controller.variant().label()),
                theme::dim(),
            )),
    );
    frame.render_widget(content, area);
}

fn field_line<'a>(spec: &'a FieldSpec, value: Option<&FieldValue>, focused: bool) -> Line<'a> {
    let (prefix, label_style) = if focused {
        ("> ", theme::selected())
    } else {
        ("  ", theme::text())
    };

    let shown = value.map(FieldValue::display).unwrap_or_default();
    let value_span = if shown.is_empty() {
        Span::styled(placeholder(spec.kind), theme::dim())
    } else {
        Span::styled(shown, theme::info())
    };

    Line::from(vec![
        Span::styled(format!("{}{}", prefix, spec.label), label_style),
        Span::styled(": ", theme::dim()),
        value_span,
    ])
}

fn placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "-",
        FieldKind::Choices(_) => "none selected",
        FieldKind::List => "comma separated",
        FieldKind::Flag => "No",
        FieldKind::Hours => "e.g. 09:00-17:00",
        FieldKind::Attachment => "no file",
    }
}

fn options_line<'a>(options: &'a [&'a str], value: Option<&FieldValue>, cursor: usize) -> Line<'a> {
    let chosen: &[String] = match value {
        Some(FieldValue::Set(items)) => items,
        _ => &[],
    };

    let mut spans = vec![Span::raw("    ")];
    for (index, option) in options.iter().enumerate() {
        let mark = if chosen.iter().any(|c| c == option) { "x" } else { " " };
        let style = if index == cursor {
            theme::selected()
        } else {
            theme::text()
        };
        spans.push(Span::styled(format!("[{}] {}", mark, option), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn draw_status(frame: &mut Frame, area: Rect, screen: &WizardScreen, app: &App) {
    let mut lines = Vec::new();

    if let Some(input) = &screen.input {
        let label = screen.selected_spec().map(|s| s.label).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), theme::dim()),
            Span::styled(input.as_str(), theme::text()),
            Span::styled("█", theme::info()),
        ]));
    } else if screen.submitting {
        lines.push(Line::from(vec![
            Spinner::new(app.spinner_state).span(),
            Span::styled(format!("Submitting to {}...", app.destination), theme::text()),
        ]));
    }

    if let Some(error) = &screen.field_error {
        lines.push(Line::from(Span::styled(error.as_str(), theme::error())));
    } else if let Some(parsed) = &screen.submit_error {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", parsed.summary),
            theme::error(),
        )));
        if let Some(detail) = &parsed.detail {
            lines.push(Line::from(Span::styled(detail.as_str(), theme::dim())));
        }
        lines.push(Line::from(Span::styled(parsed.suggestion.as_str(), theme::warning())));
    } else if lines.is_empty() && screen.controller.is_final_step() {
        lines.push(Line::from(Span::styled(
            "Last step. Press s to submit your registration.",
            theme::dim(),
        )));
    }

    let border = if screen.is_editing() {
        theme::border_active()
    } else {
        theme::border()
    };
    let status = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentreg::wizard::{Variant, SPECIALIZATIONS};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_field_shows_placeholder() {
        let spec = Variant::Clinic.field_spec("workingHours").unwrap();
        let line = field_line(spec, None, false);
        assert_eq!(text(&line), "  Working Hours: e.g. 09:00-17:00");
    }

    #[test]
    fn test_options_line_marks_chosen() {
        let value = FieldValue::set(["Orthodontics"]);
        let line = options_line(SPECIALIZATIONS, Some(&value), 0);
        let rendered = text(&line);
        assert!(rendered.contains("[x] Orthodontics"));
        assert!(rendered.contains("[ ] Endodontics"));
    }
}

//! Horizontal wizard progress indicator
//!
//! Completed steps are drawn with a check mark, the current step is
//! highlighted and later steps are dimmed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use dentreg::wizard::Step;

use crate::ui::theme;

pub struct StepProgress<'a> {
    steps: &'a [Step],
    current: usize,
}

impl<'a> StepProgress<'a> {
    pub fn new(steps: &'a [Step], current: usize) -> Self {
        Self { steps, current }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            let (marker, style) = if index < self.current {
                ("✓".to_string(), theme::step_done())
            } else if index == self.current {
                ((index + 1).to_string(), theme::step_current())
            } else {
                ((index + 1).to_string(), theme::dim())
            };

            spans.push(Span::styled(format!(" [{}] ", marker), style));
            spans.push(Span::styled(step.title, style));

            if index + 1 != self.steps.len() {
                let connector = if index < self.current {
                    theme::step_done()
                } else {
                    theme::dim()
                };
                spans.push(Span::styled(" ──", connector));
            }
        }
        spans
    }
}

impl Widget for StepProgress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(self.spans());
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border()),
        );
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentreg::wizard::Variant;

    fn rendered(progress: &StepProgress) -> String {
        progress.spans().iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_marks_completed_steps() {
        let steps = Variant::Clinic.steps();
        let text = rendered(&StepProgress::new(steps, 2));
        assert!(text.starts_with(" [✓] General Information"));
        assert!(text.contains("[✓] Pricing & Scheduling"));
        assert!(text.contains("[3] Staffing"));
        assert!(text.contains("[4] Clinic Management"));
    }

    #[test]
    fn test_no_trailing_connector() {
        let steps = Variant::JobSeeker.steps();
        let text = rendered(&StepProgress::new(steps, 0));
        assert!(text.ends_with("Job Preferences"));
    }
}

//! Animated spinner shown while a submission is in flight

use ratatui::text::Span;

use crate::ui::theme;

/// Braille spinner characters
const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct Spinner {
    state: usize,
}

impl Spinner {
    pub fn new(state: usize) -> Self {
        Self { state }
    }

    pub fn char(&self) -> char {
        SPINNER_CHARS[self.state % SPINNER_CHARS.len()]
    }

    pub fn span(&self) -> Span<'static> {
        Span::styled(format!("{} ", self.char()), theme::info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(Spinner::new(0).char(), Spinner::new(SPINNER_CHARS.len()).char());
    }
}

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::fmt::money;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);
pub const UNAVAILABLE_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::ITALIC);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const FOCUSED_INPUT_STYLE: Style = Style::new().fg(Color::Cyan);
pub const CURRENT_PAGE_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);

/// Currency as a colored Span. Unlike a signed register, balances keep their
/// sign in the text; color only distinguishes negatives and missing values.
pub fn money_span(amount: Option<f64>) -> Span<'static> {
    let style = match amount {
        None => UNAVAILABLE_STYLE,
        Some(v) if v < 0.0 => AMOUNT_NEG_STYLE,
        Some(_) => AMOUNT_POS_STYLE,
    };
    Span::styled(money(amount), style)
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// Restore the terminal before the default panic output runs.
pub fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_span_styles() {
        assert_eq!(money_span(None).style, UNAVAILABLE_STYLE);
        assert_eq!(money_span(Some(-1.0)).style, AMOUNT_NEG_STYLE);
        assert_eq!(money_span(Some(1.0)).content, "R$ 1,00");
    }

    #[test]
    fn test_wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("Rua das Flores 123 Centro", 10);
        assert!(lines > 1);
        assert_eq!(wrapped.lines().count() as u16, lines);
        assert_eq!(wrap_text("abc", 0), ("abc".to_string(), 1));
    }
}

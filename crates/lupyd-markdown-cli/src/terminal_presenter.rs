use lupyd_markdown_engine::{Document, ElementType, Fragment, Presenter, render};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Presents spans as styled ratatui text; each flag patches the style.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPresenter;

pub fn style_for(flag: ElementType) -> Style {
    let style = Style::default();
    match flag {
        f if f == ElementType::BOLD => style.add_modifier(Modifier::BOLD),
        f if f == ElementType::ITALIC => style.add_modifier(Modifier::ITALIC),
        f if f == ElementType::UNDERLINE => style.add_modifier(Modifier::UNDERLINED),
        f if f == ElementType::HEADER => style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
        f if f == ElementType::CODE => style.fg(Color::Yellow),
        f if f == ElementType::QUOTE => style.fg(Color::Gray).add_modifier(Modifier::ITALIC),
        f if f == ElementType::SPOILER => style.fg(Color::DarkGray).bg(Color::DarkGray),
        f if f == ElementType::HYPERLINK
            || f == ElementType::IMAGE_LINK
            || f == ElementType::VIDEO_LINK =>
        {
            style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
        }
        f if f == ElementType::MENTION => style.fg(Color::Magenta),
        f if f == ElementType::HASHTAG => style.fg(Color::Green),
        f if f == ElementType::SVG => style.fg(Color::DarkGray),
        _ => style,
    }
}

impl Presenter for TerminalPresenter {
    type Node = Span<'static>;

    fn wrap(&self, child: Fragment<'_, Span<'static>>, flag: ElementType) -> Span<'static> {
        match child {
            Fragment::Text(text) => Span::styled(text.to_string(), style_for(flag)),
            Fragment::Node(span) => span.patch_style(style_for(flag)),
        }
    }
}

/// Lays the styled spans out as lines, breaking at every newline in the text.
pub fn preview_lines(doc: &Document) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for span in render(doc, &TerminalPresenter) {
        for (i, piece) in span.content.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !piece.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.push_span(Span::styled(piece.to_string(), span.style));
            }
        }
    }
    lines
}

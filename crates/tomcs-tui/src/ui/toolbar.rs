//! Tool bar listing the placement hotkeys.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;

const TOOLS: &[(&str, &str)] = &[
    ("R", "Rectangle"),
    ("L", "Line"),
    ("T", "Text Box"),
    ("I", "Image"),
    ("A", "Add from Registry"),
    ("Del", "Remove"),
    ("Q", "Quit"),
];

/// Renders the tool bar.
pub fn render_toolbar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let mut spans = Vec::with_capacity(TOOLS.len() * 2);
    for (key, label) in TOOLS {
        spans.push(Span::styled(format!("[{key}]"), theme.accent()));
        spans.push(Span::styled(format!(" {label}  "), theme.muted()));
    }

    let block = Block::bordered()
        .border_type(theme.border)
        .border_style(theme.muted())
        .title(Line::styled(" tomcs designer ", theme.accent()));
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .style(theme.base()),
        area,
    );
}

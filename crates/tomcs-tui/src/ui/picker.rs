//! Component library picker, drawn as a popup over the canvas.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::app::App;
use crate::ui::centered;

const MARKER: &str = "❯ ";
const MORE_ABOVE: &str = "↑ more";
const MORE_BELOW: &str = "↓ more";

/// Renders the picker popup inside `area`.
pub fn render_picker(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let picker = app.picker();
    let state = picker.state();

    let mut lines = Vec::with_capacity(state.window_size + 2);
    if picker.has_more_above() {
        lines.push(Line::styled(MORE_ABOVE, theme.muted()));
    }
    for (_, item, selected) in picker.visible() {
        if selected {
            lines.push(Line::styled(format!("{MARKER}{item}"), theme.accent()));
        } else {
            lines.push(Line::styled(format!("  {item}"), theme.muted()));
        }
    }
    if picker.has_more_below() {
        lines.push(Line::styled(MORE_BELOW, theme.muted()));
    }
    if state.len == 0 {
        lines.push(Line::styled("registry is empty", theme.muted()));
    }

    let longest = picker
        .items()
        .iter()
        .map(|item| item.chars().count())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(longest + 6).unwrap_or(u16::MAX).max(24);
    // Window rows, both indicators, borders.
    let height = u16::try_from(state.window_size + 4).unwrap_or(u16::MAX);
    let popup = centered(area, width, height);

    let block = Block::bordered()
        .border_type(theme.border)
        .border_style(theme.accent())
        .title(" Add from Registry ");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), popup);
}

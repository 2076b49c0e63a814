//! Inspector pane: the selected component and every live binding.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::app::App;

/// Renders the inspector.
pub fn render_inspector(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let mut lines = Vec::new();

    match app.selected_component() {
        Some(component) => {
            let state = if app.drag().is_dragging() { "dragging" } else { "idle" };
            lines.push(field(app, "id", component.id.clone()));
            lines.push(field(app, "kind", component.kind.to_string()));
            lines.push(field(app, "position", component.position.to_string()));
            lines.push(field(app, "state", state.to_string()));
            if let Some(output) = app.output_for(&component.id) {
                lines.push(field(app, "output", output.to_string()));
            }
        }
        None => lines.push(Line::styled("nothing selected", theme.muted())),
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Bindings", theme.accent()));
    if app.commands().is_empty() {
        lines.push(Line::styled("none", theme.muted()));
    }
    for (id, command) in app.commands() {
        let value = app.output_for(id).unwrap_or("…");
        lines.push(field(app, id, value.to_string()));
        lines.push(Line::styled(format!("  $ {command}"), theme.muted()));
    }

    let block = Block::bordered()
        .border_type(theme.border)
        .border_style(theme.muted())
        .title(" Inspector ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(theme.base())
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn field(app: &App, label: &str, value: String) -> Line<'static> {
    let theme = app.theme();
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.muted()),
        Span::styled(value, theme.accent()),
    ])
}

//! Canvas pane: placed components at their absolute positions.
//!
//! Component positions are the same 1-based screen cells mouse reports
//! use, so a component is drawn at its position minus one on each axis and
//! clipped to the canvas interior.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::app::{App, ImageSlot};
use crate::component::{Component, ComponentKind};
use crate::theme::color;

/// Renders the canvas and every placed component.
pub fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let block = Block::bordered()
        .border_type(theme.border)
        .border_style(theme.muted())
        .title(" Canvas ")
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (index, component) in app.components().iter().enumerate() {
        let (x, y) = component.position.layout_offset();
        let footprint = Rect::new(x, y, component.size.0, component.size.1);
        let visible = footprint.intersection(inner);
        if visible.is_empty() {
            continue;
        }
        let selected = app.selected() == Some(index);
        let dragging = selected && app.drag().is_dragging();
        render_component(frame, footprint, visible, app, component, selected, dragging);
    }
}

fn render_component(
    frame: &mut Frame,
    footprint: Rect,
    visible: Rect,
    app: &App,
    component: &Component,
    selected: bool,
    dragging: bool,
) {
    let theme = app.theme();
    let style = theme.component_border(selected, dragging);

    match &component.kind {
        ComponentKind::Line => {
            let rule = "─".repeat(usize::from(visible.width));
            frame.render_widget(Paragraph::new(rule).style(style), visible);
        }
        ComponentKind::Image => render_image(frame, footprint, visible, app),
        kind => {
            let title = if dragging {
                format!(" {} · dragging ", component.id)
            } else {
                format!(" {} ", component.id)
            };
            let body = app
                .output_for(&component.id)
                .map_or_else(|| kind.to_string(), str::to_string);
            let block = Block::bordered()
                .border_type(theme.border)
                .border_style(style)
                .title(Line::styled(title, style));
            frame.render_widget(
                Paragraph::new(body)
                    .block(block)
                    .style(theme.base())
                    .wrap(Wrap { trim: true }),
                visible,
            );
        }
    }
}

fn render_image(frame: &mut Frame, footprint: Rect, visible: Rect, app: &App) {
    let theme = app.theme();
    match app.image() {
        ImageSlot::Ready(grid) => {
            let skip_x = usize::from(visible.x - footprint.x);
            let skip_y = usize::from(visible.y - footprint.y);
            let buffer = frame.buffer_mut();
            let rows = grid.rows().iter().skip(skip_y).take(usize::from(visible.height));
            for (dy, row) in (0u16..).zip(rows) {
                let cells = row.iter().skip(skip_x).take(usize::from(visible.width));
                for (dx, cell) in (0u16..).zip(cells) {
                    if let Some(target) = buffer.cell_mut((visible.x + dx, visible.y + dy)) {
                        let _ = target
                            .set_char(cell.glyph)
                            .set_fg(color(cell.foreground))
                            .set_bg(color(cell.background));
                    }
                }
            }
        }
        ImageSlot::Loading | ImageSlot::Missing => {
            frame.render_widget(
                Paragraph::new("loading image…").style(theme.muted()),
                visible,
            );
        }
        ImageSlot::Failed(message) => {
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .style(theme.error_style())
                    .wrap(Wrap { trim: true }),
                visible,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use tomcs_common::config::TomcsConfig;
    use tomcs_core::input::{KeyCode, KeyEvent, MouseButton, MouseEvent, MousePhase};
    use tomcs_runtime::poller::BindingSnapshot;

    use crate::app::App;
    use crate::theme::color;
    use crate::ui::test_support::{draw, text};

    fn app_with_rectangle() -> App {
        let mut app = App::new(&TomcsConfig::default());
        let _ = app.handle_key(KeyEvent::new(KeyCode::Char('r')));
        app
    }

    #[test]
    fn component_draws_at_position_minus_one() {
        let app = app_with_rectangle();
        let buffer = draw(&app);
        // Default position (10, 5) puts the top-left corner at (9, 4).
        let corner = buffer.cell((9, 4)).unwrap();
        assert_ne!(corner.symbol(), " ");
        assert!(text(&buffer).contains("rect-1"));
    }

    #[test]
    fn dragged_component_uses_success_border() {
        let mut app = app_with_rectangle();
        let _ = app.handle_mouse(&MouseEvent {
            button: MouseButton::Left,
            x: 10,
            y: 5,
            phase: MousePhase::DownOrMove,
        });
        let buffer = draw(&app);
        let corner = buffer.cell((9, 4)).unwrap();
        assert_eq!(corner.fg, color(app.theme().success));
        assert!(text(&buffer).contains("dragging"));
    }

    #[test]
    fn bound_output_replaces_placeholder() {
        let mut app = App::new(&TomcsConfig::default());
        let _ = app.handle_key(KeyEvent::new(KeyCode::Char('a')));
        let _ = app.handle_key(KeyEvent::new(KeyCode::Enter));
        let mut snapshot = BindingSnapshot::new();
        let _ = snapshot.insert("button".into(), "OK 42".into());
        app.apply_bindings(snapshot);

        assert!(text(&draw(&app)).contains("OK 42"));
    }

    #[test]
    fn offscreen_component_is_skipped() {
        let mut app = app_with_rectangle();
        let _ = app.handle_mouse(&MouseEvent {
            button: MouseButton::Left,
            x: 10,
            y: 5,
            phase: MousePhase::DownOrMove,
        });
        let _ = app.handle_mouse(&MouseEvent {
            button: MouseButton::Left,
            x: 500,
            y: 500,
            phase: MousePhase::DownOrMove,
        });
        let buffer = draw(&app);
        assert_eq!(buffer.cell((9, 4)).unwrap().symbol(), " ");
    }
}

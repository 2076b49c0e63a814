//! UI rendering components for the designer.
//!
//! Screen layout: toolbar on top, canvas and inspector side by side, a
//! one-line status bar at the bottom. The library picker floats over the
//! canvas while open.

pub mod canvas;
pub mod inspector;
pub mod picker;
pub mod toolbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::{App, Status};

/// Width of the inspector pane in columns.
pub const INSPECTOR_WIDTH: u16 = 34;

/// Renders the whole designer screen.
pub fn render(frame: &mut Frame, app: &App) {
    let [top, body, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [canvas_area, inspector_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(INSPECTOR_WIDTH)])
            .areas(body);

    toolbar::render_toolbar(frame, top, app);
    canvas::render_canvas(frame, canvas_area, app);
    inspector::render_inspector(frame, inspector_area, app);
    if app.picker_open() {
        picker::render_picker(frame, canvas_area, app);
    }
    render_status(frame, bottom, app);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let line = match app.status() {
        Status::Info(message) => Line::styled(message.as_str(), theme.muted()),
        Status::Error(message) => Line::styled(message.as_str(), theme.error_style()),
    };
    frame.render_widget(Paragraph::new(line).style(theme.base()), area);
}

/// A `width` × `height` rectangle centered in `area`, clipped to it.
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

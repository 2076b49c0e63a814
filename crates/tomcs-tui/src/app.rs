//! Designer application state machine.
//!
//! Applies decoded input to the canvas: hotkeys place and remove
//! components, the library picker adds named components, and left-button
//! drags select and move them. Slow work (image conversion) is requested
//! through [`Action`] and its result handed back later.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::mpsc;

use tomcs_common::config::TomcsConfig;
use tomcs_common::types::Position;
use tomcs_core::input::{
    InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MousePhase,
};
use tomcs_image::{ConvertError, GlyphGrid, ImageSource};
use tomcs_runtime::poller::BindingSnapshot;

use crate::component::{self, Component, ComponentKind};
use crate::drag::DragState;
use crate::list::ListController;
use crate::theme::Theme;

/// Follow-up work the event loop must perform after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    None,
    /// Leave the designer.
    Quit,
    /// Convert an image in the background and report back through
    /// [`App::image_loaded`].
    LoadImage {
        /// Image to convert.
        source: ImageSource,
        /// Output width in columns.
        width: u32,
    },
}

/// Message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Neutral feedback.
    Info(String),
    /// Something failed.
    Error(String),
}

/// Load state of the configured image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// Not requested yet.
    Missing,
    /// Conversion in progress.
    Loading,
    /// Converted and ready to draw.
    Ready(GlyphGrid),
    /// Conversion failed with this message.
    Failed(String),
}

/// Root application state for the designer.
#[derive(Debug)]
pub struct App {
    /// Whether the app should continue running.
    pub running: bool,
    theme: Theme,
    components: Vec<Component>,
    selected: Option<usize>,
    drag: DragState,
    picker: ListController,
    picker_open: bool,
    picks: mpsc::Receiver<String>,
    commands: BTreeMap<String, String>,
    outputs: BindingSnapshot,
    status: Status,
    image: ImageSlot,
    image_path: Option<PathBuf>,
    image_width: u32,
    default_position: Position,
    id_counters: HashMap<String, usize>,
}

impl App {
    /// Creates the designer state from a loaded configuration.
    #[must_use]
    pub fn new(config: &TomcsConfig) -> Self {
        let (tx, picks) = mpsc::channel();
        let mut picker = ListController::new(config.registry.clone(), config.picker_window)
            .with_listener(move |item| {
                let _ = tx.send(item.to_string());
            });
        picker.set_active(false);

        Self {
            running: true,
            theme: Theme::get(config.theme),
            components: Vec::new(),
            selected: None,
            drag: DragState::new(config.default_position),
            picker,
            picker_open: false,
            picks,
            commands: config.bindings.clone(),
            outputs: BindingSnapshot::new(),
            status: Status::Info("press [A] to add a component, [Q] to quit".into()),
            image: ImageSlot::Missing,
            image_path: config.image.clone(),
            image_width: config.image_width,
            default_position: config.default_position,
            id_counters: HashMap::new(),
        }
    }

    /// Signals the app to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Applies one decoded input event.
    pub fn handle_input(&mut self, event: InputEvent) -> Action {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => {
                let _ = self.handle_mouse(&mouse);
                Action::None
            }
        }
    }

    /// Applies a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.is_ctrl('c') {
            self.quit();
            return Action::Quit;
        }
        if self.picker_open {
            return self.handle_picker_key(key);
        }
        if key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
            return Action::None;
        }

        match key.code {
            KeyCode::Char('q' | 'Q') => {
                self.quit();
                return Action::Quit;
            }
            KeyCode::Char('a' | 'A') => self.open_picker(),
            KeyCode::Esc => self.deselect(),
            KeyCode::Char('r' | 'R') => self.place(ComponentKind::Rectangle),
            KeyCode::Char('l' | 'L') => self.place(ComponentKind::Line),
            KeyCode::Char('t' | 'T') => self.place(ComponentKind::TextBox),
            KeyCode::Char('i' | 'I') => return self.place_image(),
            KeyCode::Delete | KeyCode::Backspace => self.remove_selected(),
            _ => {}
        }
        Action::None
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('a' | 'A') => self.close_picker(),
            _ => {
                let _ = self.picker.handle_key(key);
                self.drain_picks();
            }
        }
        Action::None
    }

    fn drain_picks(&mut self) {
        while let Ok(name) = self.picks.try_recv() {
            self.close_picker();
            self.place(ComponentKind::Library(name));
        }
    }

    /// Applies a mouse report. Returns whether the canvas changed.
    ///
    /// Only left-button reports and releases reach the drag machine; hover
    /// and wheel reports are ignored. A press while idle selects the
    /// topmost component under the pointer, or clears the selection.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if event.button != MouseButton::Left && event.phase != MousePhase::Up {
            return false;
        }
        // The picker is modal; only a release gets through, to end a drag.
        if self.picker_open && event.phase != MousePhase::Up {
            return false;
        }

        let mut changed = false;
        if !self.drag.is_dragging() && event.phase == MousePhase::DownOrMove {
            let hit = component::hit_test(&self.components, event.position());
            changed = hit != self.selected;
            self.selected = hit;
            if let Some(component) = self.selected_component() {
                tracing::debug!(id = %component.id, "component selected");
            }
        }

        changed |= self.drag.apply(event);
        if self.drag.is_dragging() {
            let position = self.drag.position();
            if let Some(component) = self.selected.and_then(|i| self.components.get_mut(i)) {
                component.position = position;
            }
        }
        changed
    }

    /// Stores a new binding snapshot.
    pub fn apply_bindings(&mut self, snapshot: BindingSnapshot) {
        self.outputs = snapshot;
    }

    /// Receives the result of an image conversion.
    pub fn image_loaded(&mut self, result: Result<GlyphGrid, ConvertError>) {
        match result {
            Ok(grid) => {
                let size = (
                    u16::try_from(grid.width()).unwrap_or(u16::MAX),
                    u16::try_from(grid.height()).unwrap_or(u16::MAX),
                );
                for component in &mut self.components {
                    if component.kind == ComponentKind::Image {
                        component.size = size;
                    }
                }
                tracing::info!(columns = size.0, rows = size.1, "image ready");
                self.status = Status::Info("image loaded".into());
                self.image = ImageSlot::Ready(grid);
            }
            Err(e) => {
                tracing::warn!(error = %e, "image conversion failed");
                self.status = Status::Error(e.to_string());
                self.image = ImageSlot::Failed(e.to_string());
            }
        }
    }

    fn open_picker(&mut self) {
        self.picker_open = true;
        self.picker.set_active(true);
    }

    fn close_picker(&mut self) {
        self.picker_open = false;
        self.picker.set_active(false);
    }

    fn deselect(&mut self) {
        self.selected = None;
    }

    fn place(&mut self, kind: ComponentKind) {
        let id = self.next_id(&kind);
        let mut component = Component::new(id, kind, self.default_position);
        if let (ComponentKind::Image, ImageSlot::Ready(grid)) = (&component.kind, &self.image) {
            component.size = (
                u16::try_from(grid.width()).unwrap_or(u16::MAX),
                u16::try_from(grid.height()).unwrap_or(u16::MAX),
            );
        }
        tracing::info!(id = %component.id, kind = %component.kind, "component placed");
        self.status = Status::Info(format!("placed {}", component.id));
        self.components.push(component);
        self.selected = Some(self.components.len() - 1);
    }

    fn place_image(&mut self) -> Action {
        let Some(path) = self.image_path.clone() else {
            self.status = Status::Error("no image configured (set \"image\" in tomcs.json)".into());
            return Action::None;
        };
        self.place(ComponentKind::Image);
        match self.image {
            ImageSlot::Missing | ImageSlot::Failed(_) => {
                self.image = ImageSlot::Loading;
                Action::LoadImage {
                    source: ImageSource::Path(path),
                    width: self.image_width,
                }
            }
            ImageSlot::Loading | ImageSlot::Ready(_) => Action::None,
        }
    }

    fn remove_selected(&mut self) {
        let Some(index) = self.selected.take() else {
            return;
        };
        if index < self.components.len() {
            let removed = self.components.remove(index);
            tracing::info!(id = %removed.id, "component removed");
            self.status = Status::Info(format!("removed {}", removed.id));
        }
    }

    fn next_id(&mut self, kind: &ComponentKind) -> String {
        let prefix = kind.id_prefix().to_string();
        loop {
            let count = self.id_counters.entry(prefix.clone()).or_insert(0);
            *count += 1;
            // Library components keep their bare name the first time so a
            // binding with that name attaches to them.
            let id = if matches!(kind, ComponentKind::Library(_)) && *count == 1 {
                prefix.clone()
            } else {
                format!("{prefix}-{count}")
            };
            if !self.components.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }

    /// Active theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Placed components, bottom to top.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Index of the selected component.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected component, if any.
    #[must_use]
    pub fn selected_component(&self) -> Option<&Component> {
        self.selected.and_then(|i| self.components.get(i))
    }

    /// Drag machine state.
    #[must_use]
    pub const fn drag(&self) -> &DragState {
        &self.drag
    }

    /// The component library picker.
    #[must_use]
    pub const fn picker(&self) -> &ListController {
        &self.picker
    }

    /// Whether the picker is shown.
    #[must_use]
    pub const fn picker_open(&self) -> bool {
        self.picker_open
    }

    /// Configured binding commands by id.
    #[must_use]
    pub const fn commands(&self) -> &BTreeMap<String, String> {
        &self.commands
    }

    /// Latest binding outputs.
    #[must_use]
    pub const fn outputs(&self) -> &BindingSnapshot {
        &self.outputs
    }

    /// Live output bound to a component id.
    #[must_use]
    pub fn output_for(&self, id: &str) -> Option<&str> {
        self.outputs.get(id).map(String::as_str)
    }

    /// Status line message.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Load state of the configured image.
    #[must_use]
    pub const fn image(&self) -> &ImageSlot {
        &self.image
    }
}

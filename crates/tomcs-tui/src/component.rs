//! Components placed on the canvas.

use std::fmt;

use tomcs_common::types::Position;

/// What a placed component is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Bordered box.
    Rectangle,
    /// Horizontal rule.
    Line,
    /// Bordered text area.
    TextBox,
    /// The configured image, drawn with half blocks.
    Image,
    /// A named entry from the component library.
    Library(String),
}

impl ComponentKind {
    /// Prefix used when generating ids.
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        match self {
            Self::Rectangle => "rect",
            Self::Line => "line",
            Self::TextBox => "text",
            Self::Image => "image",
            Self::Library(name) => name,
        }
    }

    /// Default footprint in cells, as (width, height).
    #[must_use]
    pub const fn default_size(&self) -> (u16, u16) {
        match self {
            Self::Rectangle => (16, 5),
            Self::Line => (16, 1),
            Self::TextBox => (20, 3),
            Self::Image => (12, 4),
            Self::Library(_) => (18, 3),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "Rectangle"),
            Self::Line => write!(f, "Line"),
            Self::TextBox => write!(f, "Text Box"),
            Self::Image => write!(f, "Image"),
            Self::Library(name) => write!(f, "{name}"),
        }
    }
}

/// One component on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Unique id; also the key looked up in the binding snapshot.
    pub id: String,
    /// Component type.
    pub kind: ComponentKind,
    /// Top-left corner, 1-based like mouse reports.
    pub position: Position,
    /// Footprint in cells.
    pub size: (u16, u16),
}

impl Component {
    /// Creates a component with its kind's default size.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ComponentKind, position: Position) -> Self {
        let size = kind.default_size();
        Self {
            id: id.into(),
            kind,
            position,
            size,
        }
    }

    /// Whether the 1-based cell `point` falls inside the footprint.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        let (left, top) = self.position.layout_offset();
        let (x, y) = point.layout_offset();
        x >= left
            && y >= top
            && u32::from(x) < u32::from(left) + u32::from(self.size.0)
            && u32::from(y) < u32::from(top) + u32::from(self.size.1)
    }
}

/// Index of the topmost component under `point`. Later entries draw on top.
#[must_use]
pub fn hit_test(components: &[Component], point: Position) -> Option<usize> {
    components.iter().rposition(|c| c.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_uses_zero_based_footprint() {
        let rect = Component::new("r", ComponentKind::Rectangle, Position::new(10, 5));
        assert!(rect.contains(Position::new(10, 5)));
        assert!(rect.contains(Position::new(25, 9)));
        assert!(!rect.contains(Position::new(26, 9)));
        assert!(!rect.contains(Position::new(9, 5)));
        assert!(!rect.contains(Position::new(10, 10)));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let components = vec![
            Component::new("below", ComponentKind::Rectangle, Position::new(1, 1)),
            Component::new("above", ComponentKind::TextBox, Position::new(5, 2)),
        ];
        assert_eq!(hit_test(&components, Position::new(6, 3)), Some(1));
        assert_eq!(hit_test(&components, Position::new(2, 1)), Some(0));
        assert_eq!(hit_test(&components, Position::new(60, 30)), None);
    }

    #[test]
    fn library_kind_uses_its_name() {
        let kind = ComponentKind::Library("badge".into());
        assert_eq!(kind.id_prefix(), "badge");
        assert_eq!(kind.to_string(), "badge");
    }
}

//! What a screen hands to the renderer each frame

use super::snapshot::{Hud, WorldSnapshot};
use crate::states::StateId;

/// A vertical menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: StateId,
    pub hud: Option<Hud>,
    pub world: Option<WorldSnapshot>,
    pub menu: Option<MenuView>,
    /// Centered text lines (titles, prompts, tables)
    pub lines: Vec<String>,
}

impl Frame {
    pub fn new(state: StateId) -> Self {
        Self {
            state,
            hud: None,
            world: None,
            menu: None,
            lines: Vec::new(),
        }
    }

    pub fn with_menu(mut self, menu: MenuView) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

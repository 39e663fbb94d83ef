//! Active panel navigation
//!
//! Exactly one panel is visible at a time. The front end renders the
//! `active` panel and hides the rest.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Panel {
    #[default]
    Menu,
    Fun,
    Calculator,
    Clock,
    Blackjack,
    Roast,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Menu,
        Panel::Fun,
        Panel::Calculator,
        Panel::Clock,
        Panel::Blackjack,
        Panel::Roast,
    ];

    /// DOM element id of the panel's section
    pub fn id(&self) -> &'static str {
        match self {
            Panel::Menu => "menu-section",
            Panel::Fun => "fun-section",
            Panel::Calculator => "calc-section",
            Panel::Clock => "date-section",
            Panel::Blackjack => "blackjack-section",
            Panel::Roast => "claire-section",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

/// Tracks which panel is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    active: Panel,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Panel {
        self.active
    }

    /// Switch panels. Returns true if the active panel changed.
    pub fn show(&mut self, panel: Panel) -> bool {
        if self.active == panel {
            return false;
        }
        log::debug!("Panel {:?} -> {:?}", self.active, panel);
        self.active = panel;
        true
    }

    pub fn back(&mut self) -> bool {
        self.show(Panel::Menu)
    }

    pub fn is_active(&self, panel: Panel) -> bool {
        self.active == panel
    }

    /// The clock only ticks while its panel is visible
    pub fn clock_running(&self) -> bool {
        self.is_active(Panel::Clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_menu() {
        let nav = Navigator::new();
        assert_eq!(nav.active(), Panel::Menu);
        assert!(!nav.clock_running());
    }

    #[test]
    fn test_show_and_back() {
        let mut nav = Navigator::new();
        assert!(nav.show(Panel::Clock));
        assert!(nav.clock_running());
        assert!(!nav.show(Panel::Clock));
        assert!(nav.back());
        assert_eq!(nav.active(), Panel::Menu);
        assert!(!nav.back());
    }

    #[test]
    fn test_ids_round_trip() {
        for panel in Panel::ALL {
            assert_eq!(Panel::from_id(panel.id()), Some(panel));
        }
        assert_eq!(Panel::from_id("nope"), None);
    }
}

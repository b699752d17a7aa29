//! Defines the mutable, reactive state for the application's UI.

use crate::Screen;
use dioxus::prelude::*;

/// The current screen plus the screens that led to it.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Navigation {
    current: Screen,
    back_stack: Vec<Screen>,
}

impl Navigation {
    pub fn current(&self) -> &Screen {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    /// Moves to `to`, remembering the current screen. Navigating to the
    /// screen already shown is a no-op.
    pub fn go(&mut self, to: Screen) {
        if self.current != to {
            let from = std::mem::replace(&mut self.current, to);
            self.back_stack.push(from);
        }
    }

    /// Returns to the previous screen, or home when there is none.
    pub fn back(&mut self) {
        self.current = self.back_stack.pop().unwrap_or_default();
    }
}

/// A reactive state provided as a Dioxus context for mutable UI data.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    pub navigation: Signal<Navigation>,
}

impl AppStateMut {
    pub fn screen(&self) -> Screen {
        self.navigation.read().current().clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation.read().can_go_back()
    }

    pub fn navigate(&mut self, to: Screen) {
        self.navigation.write().go(to);
    }

    pub fn back(&mut self) {
        self.navigation.write().back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_returns_through_visited_screens() {
        let mut nav = Navigation::default();
        nav.go(Screen::Search {
            query: "tx::a".into(),
        });
        nav.go(Screen::Detail { id: "tx::a".into() });
        assert!(nav.can_go_back());

        nav.back();
        assert_eq!(
            nav.current(),
            &Screen::Search {
                query: "tx::a".into()
            }
        );
        nav.back();
        assert_eq!(nav.current(), &Screen::Home);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn back_with_no_history_lands_home() {
        let mut nav = Navigation::default();
        nav.back();
        assert_eq!(nav.current(), &Screen::Home);
    }

    #[test]
    fn revisiting_the_current_screen_adds_no_history() {
        let mut nav = Navigation::default();
        nav.go(Screen::Home);
        assert!(!nav.can_go_back());
    }
}

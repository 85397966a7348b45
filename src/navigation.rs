//! Keyboard shortcuts for moving between bodies

use crate::scene::{BodyHandle, BodyRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Highlight moved; nothing to fly to yet
    Highlight(BodyHandle),
    /// Fly to this body
    Select(BodyHandle),
    /// Back to the overview pose
    Reset,
}

/// Cursor over the planet list driven by key presses
#[derive(Debug, Clone, Default)]
pub struct KeyboardNavigator {
    planets: Vec<BodyHandle>,
    star: Option<BodyHandle>,
    current: usize,
}

impl KeyboardNavigator {
    pub fn new(registry: &BodyRegistry) -> Self {
        Self {
            planets: registry.planets(),
            star: registry.star(),
            current: 0,
        }
    }

    pub fn current(&self) -> Option<BodyHandle> {
        self.planets.get(self.current).copied()
    }

    /// Map a `KeyboardEvent.key` value to a command. Unhandled keys return None.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Option<NavigationCommand> {
        if self.planets.is_empty() && self.star.is_none() {
            return None;
        }

        let key = key.to_lowercase();
        match key.as_str() {
            "arrowright" | "d" if !ctrl => self.step(1),
            "arrowleft" | "a" if !ctrl => self.step(-1),
            "enter" | " " | "space" | "spacebar" => self.current().map(NavigationCommand::Select),
            "s" if !ctrl => self.star.map(NavigationCommand::Select),
            "escape" => Some(NavigationCommand::Reset),
            digit if !ctrl && digit.len() == 1 => {
                let n = digit.chars().next()?.to_digit(10)? as usize;
                if n == 0 || n > self.planets.len() {
                    return None;
                }
                self.current = n - 1;
                self.current().map(NavigationCommand::Select)
            }
            _ => None,
        }
    }

    fn step(&mut self, delta: isize) -> Option<NavigationCommand> {
        let len = self.planets.len() as isize;
        if len == 0 {
            return None;
        }
        self.current = (self.current as isize + delta).rem_euclid(len) as usize;
        self.current().map(NavigationCommand::Highlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SystemConfig;

    fn navigator() -> (KeyboardNavigator, BodyRegistry) {
        let registry = BodyRegistry::new(&SystemConfig::default().bodies);
        (KeyboardNavigator::new(&registry), registry)
    }

    #[test]
    fn test_arrows_wrap() {
        let (mut nav, registry) = navigator();
        let pluto = registry.lookup("pluto").unwrap();
        let mercury = registry.lookup("mercury").unwrap();
        let venus = registry.lookup("venus").unwrap();

        assert_eq!(nav.handle_key("ArrowLeft", false), Some(NavigationCommand::Highlight(pluto)));
        assert_eq!(nav.handle_key("ArrowRight", false), Some(NavigationCommand::Highlight(mercury)));
        assert_eq!(nav.handle_key("d", false), Some(NavigationCommand::Highlight(venus)));
    }

    #[test]
    fn test_enter_selects_highlighted() {
        let (mut nav, registry) = navigator();
        nav.handle_key("d", false);
        nav.handle_key("d", false);
        assert_eq!(
            nav.handle_key("Enter", false),
            Some(NavigationCommand::Select(registry.lookup("earth").unwrap()))
        );
        assert_eq!(
            nav.handle_key(" ", false),
            Some(NavigationCommand::Select(registry.lookup("earth").unwrap()))
        );
    }

    #[test]
    fn test_digits_jump_and_select() {
        let (mut nav, registry) = navigator();
        let jupiter = registry.lookup("jupiter").unwrap();
        assert_eq!(nav.handle_key("5", false), Some(NavigationCommand::Select(jupiter)));
        assert_eq!(nav.current(), Some(jupiter));
        assert_eq!(nav.handle_key("0", false), None);
    }

    #[test]
    fn test_star_and_reset() {
        let (mut nav, registry) = navigator();
        assert_eq!(nav.handle_key("s", false), Some(NavigationCommand::Select(registry.star().unwrap())));
        assert_eq!(nav.handle_key("s", true), None);
        assert_eq!(nav.handle_key("Escape", false), Some(NavigationCommand::Reset));
    }

    #[test]
    fn test_other_keys_ignored() {
        let (mut nav, _) = navigator();
        assert_eq!(nav.handle_key("q", false), None);
        assert_eq!(nav.handle_key("F1", false), None);
        assert_eq!(nav.handle_key("x", true), None);
    }
}

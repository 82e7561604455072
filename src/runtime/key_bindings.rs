use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    /// Bound command for `event`, or the key itself for the focused widget.
    pub fn resolve(&self, event: KeyEvent) -> Command {
        self.bindings
            .get(&KeyBinding::from_event(event))
            .cloned()
            .unwrap_or(Command::InputKey(event))
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Char('q')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::PageUp), Command::PrevMonth);
        self.bind(KeyBinding::key(KeyCode::PageDown), Command::NextMonth);
        self.bind(KeyBinding::key(KeyCode::Char('<')), Command::PrevMonth);
        self.bind(KeyBinding::key(KeyCode::Char('>')), Command::NextMonth);
        // Some terminals report `<`/`>` with SHIFT held.
        self.bind(
            KeyBinding::new(KeyCode::Char('<'), KeyModifiers::SHIFT),
            Command::PrevMonth,
        );
        self.bind(
            KeyBinding::new(KeyCode::Char('>'), KeyModifiers::SHIFT),
            Command::NextMonth,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn defaults_cover_exit_and_month_keys() {
        let bindings = KeyBindings::new();
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(bindings.resolve(ctrl_c), Command::Exit);
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::PageUp)), Command::PrevMonth);
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('>'))), Command::NextMonth);
    }

    #[test]
    fn unbound_keys_fall_through_to_widget() {
        let mut bindings = KeyBindings::new();
        let enter = KeyEvent::plain(KeyCode::Enter);
        assert_eq!(bindings.resolve(enter), Command::InputKey(enter));

        let q = KeyEvent::plain(KeyCode::Char('q'));
        bindings.unbind(&KeyBinding::key(KeyCode::Char('q')));
        assert_eq!(bindings.resolve(q), Command::InputKey(q));
    }
}

// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map digit/shifted-digit keys to a number (1..4).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    if let KeyCode::Char(c) = k.code {
        match c {
            '1' | '!' => Some(1),
            '2' | '@' => Some(2),
            '3' | '#' => Some(3),
            '4' | '$' => Some(4),
            _ => None,
        }
    } else {
        None
    }
}

/// Check if the key event is a shifted symbol (!, @, #, $).
pub fn is_shifted_symbol(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('!') | KeyCode::Char('@') | KeyCode::Char('#') | KeyCode::Char('$')
    )
}

/// Actions derived from key events. Beyond navigation and transport,
/// this is the control surface for the visual engine: sensitivity,
/// beat intensity, and the display toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Up,
    Down,
    Enter,
    Back,
    TogglePause,
    Stop,
    NextTrack,
    PreviousTrack,
    Quit,
    /// Shift+number: show/hide a whole pane.
    ToggleSection(usize),
    /// Plain number: toggle one visual element.
    ToggleEffect(usize),
    VolumeUp,
    VolumeDown,
    SensitivityUp,
    SensitivityDown,
    IntensityUp,
    IntensityDown,
    EchoUp,
    EchoDown,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    if let Some(d) = map_key_to_digit(key) {
        if key.modifiers.contains(KeyModifiers::SHIFT) || is_shifted_symbol(key) {
            return NavigationAction::ToggleSection(d);
        }
        return NavigationAction::ToggleEffect(d);
    }

    match key.code {
        KeyCode::Down => NavigationAction::Down,
        KeyCode::Up => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right => NavigationAction::Enter,
        KeyCode::Left => NavigationAction::Back,
        KeyCode::Char(' ') => NavigationAction::TogglePause,
        KeyCode::Char('s') => NavigationAction::Stop,
        KeyCode::Char('n') => NavigationAction::NextTrack,
        KeyCode::Char('p') => NavigationAction::PreviousTrack,
        KeyCode::Char('q') => NavigationAction::Quit,
        KeyCode::Char('+') | KeyCode::Char('=') => NavigationAction::VolumeUp,
        KeyCode::Char('-') => NavigationAction::VolumeDown,
        KeyCode::Char(']') => NavigationAction::SensitivityUp,
        KeyCode::Char('[') => NavigationAction::SensitivityDown,
        KeyCode::Char('}') => NavigationAction::IntensityUp,
        KeyCode::Char('{') => NavigationAction::IntensityDown,
        KeyCode::Char('e') => NavigationAction::EchoUp,
        KeyCode::Char('E') => NavigationAction::EchoDown,
        _ => NavigationAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_digit_toggles_an_effect() {
        let k = key(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(key_to_action(&k), NavigationAction::ToggleEffect(2));
    }

    #[test]
    fn shifted_digit_toggles_a_section() {
        // Terminals report shift+1 as '!' with or without the modifier.
        let k = key(KeyCode::Char('!'), KeyModifiers::NONE);
        assert_eq!(key_to_action(&k), NavigationAction::ToggleSection(1));
        let k = key(KeyCode::Char('1'), KeyModifiers::SHIFT);
        assert_eq!(key_to_action(&k), NavigationAction::ToggleSection(1));
    }

    #[test]
    fn transport_keys_map_to_transport_actions() {
        let k = key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key_to_action(&k), NavigationAction::TogglePause);
        let k = key(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(key_to_action(&k), NavigationAction::Stop);
    }
}

//! Desktop stand-ins for the hardware back button.

use winit::event::MouseButton;
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// `Alt+Left`, the dedicated browser-back key, and `Cmd+[` on macOS.
pub(super) fn is_back_shortcut(key: &Key, mods: ModifiersState) -> bool {
    match key {
        Key::Named(NamedKey::BrowserBack) => true,
        Key::Named(NamedKey::ArrowLeft) => {
            mods.alt_key() && !mods.control_key() && !mods.super_key() && !mods.shift_key()
        }
        Key::Character(c) if c.as_str() == "[" => cfg!(target_os = "macos") && mods.super_key(),
        _ => false,
    }
}

/// The "back" thumb button on a mouse.
pub(super) fn is_back_button(button: MouseButton) -> bool {
    button == MouseButton::Back
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_left_is_back() {
        let key = Key::Named(NamedKey::ArrowLeft);
        assert!(is_back_shortcut(&key, ModifiersState::ALT));
        assert!(!is_back_shortcut(&key, ModifiersState::empty()));
        assert!(!is_back_shortcut(&key, ModifiersState::ALT | ModifiersState::SHIFT));
    }

    #[test]
    fn browser_back_key_is_back() {
        assert!(is_back_shortcut(
            &Key::Named(NamedKey::BrowserBack),
            ModifiersState::empty()
        ));
    }

    #[test]
    fn cmd_bracket_is_back_on_macos_only() {
        let key = Key::Character("[".into());
        assert_eq!(
            is_back_shortcut(&key, ModifiersState::SUPER),
            cfg!(target_os = "macos")
        );
        assert!(!is_back_shortcut(&key, ModifiersState::empty()));
    }

    #[test]
    fn other_keys_are_not_back() {
        assert!(!is_back_shortcut(
            &Key::Character("a".into()),
            ModifiersState::ALT
        ));
        assert!(!is_back_shortcut(
            &Key::Named(NamedKey::Backspace),
            ModifiersState::empty()
        ));
    }

    #[test]
    fn mouse_back_button() {
        assert!(is_back_button(MouseButton::Back));
        assert!(!is_back_button(MouseButton::Left));
    }
}

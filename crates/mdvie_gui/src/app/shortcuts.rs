//! Translate egui key events into editor key chords.

use eframe::egui::{Event, Key};
use mdvie_core::keymap::{command_for, KeyChord};

fn key_char(key: Key) -> Option<char> {
    Some(match key {
        Key::B => 'b',
        Key::I => 'i',
        Key::K => 'k',
        Key::S => 's',
        Key::Num1 => '1',
        Key::Num2 => '2',
        Key::Num3 => '3',
        _ => return None,
    })
}

/// Chord for a key press, if the editor binds it.
///
/// `command` covers Ctrl on Linux/Windows and Cmd on macOS. Chords with Alt
/// or Shift held are left alone.
pub(super) fn bound_chord(event: &Event) -> Option<KeyChord> {
    let Event::Key {
        key,
        pressed: true,
        modifiers,
        ..
    } = event
    else {
        return None;
    };
    if !modifiers.command || modifiers.alt || modifiers.shift {
        return None;
    }
    let chord = KeyChord::ctrl(key_char(*key)?);
    command_for(chord).map(|_| chord)
}

/// Remove bound chords from `events` and return them in order.
///
/// Removing them keeps widgets such as the text editor from also reacting
/// to the same key press.
pub(super) fn take_bound_chords(events: &mut Vec<Event>) -> Vec<KeyChord> {
    let mut chords = Vec::new();
    events.retain(|event| match bound_chord(event) {
        Some(chord) => {
            chords.push(chord);
            false
        }
        None => true,
    });
    chords
}

#[cfg(test)]
pub(super) fn key_event(key: Key, modifiers: eframe::egui::Modifiers) -> Event {
    Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers,
    }
}

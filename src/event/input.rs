//! Raw input samples fed to the engine, decoupled from crossterm.
//!
//! Terminal events are converted through [`InputBatch`]; everything past
//! this module only sees [`InputSample`]s.
//!
//! Most terminals only report key presses. Unless the front-end knows
//! releases will arrive, every press or repeat is delivered as a down
//! immediately followed by an up, so no key is left held.

use crate::geometry::Point;

/// Raw key code: ASCII plus a few sentinels.
pub type KeyCode = u32;

pub const KEY_BACKSPACE: KeyCode = 8;
pub const KEY_ENTER: KeyCode = 13;
pub const KEY_ESCAPE: KeyCode = 27;

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Scroll wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// One raw input sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSample {
    /// Absolute pointer position.
    PointerMove(Point),
    PointerDown(MouseButton),
    PointerUp(MouseButton),
    Scroll(ScrollDirection),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// The samples one terminal event expands to (possibly none).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBatch(pub Vec<InputSample>);

impl InputBatch {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for InputBatch {
    type Item = InputSample;
    type IntoIter = std::vec::IntoIter<InputSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Map a crossterm key code to a raw key code, if it has one.
pub fn convert_key_code(code: crossterm::event::KeyCode) -> Option<KeyCode> {
    use crossterm::event::KeyCode as Ct;
    match code {
        Ct::Char(c) => Some(c as KeyCode),
        Ct::Enter => Some(KEY_ENTER),
        Ct::Esc => Some(KEY_ESCAPE),
        Ct::Backspace => Some(KEY_BACKSPACE),
        Ct::Tab => Some(9),
        Ct::Delete => Some(127),
        _ => None,
    }
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

impl From<crossterm::event::Event> for InputBatch {
    /// Converts assuming a press-only terminal.
    fn from(event: crossterm::event::Event) -> Self {
        Self::from_event(event, false)
    }
}

impl InputBatch {
    /// Convert a terminal event. `key_releases` says whether the terminal
    /// reports key release events of its own.
    pub fn from_event(event: crossterm::event::Event, key_releases: bool) -> Self {
        use crossterm::event::{Event, KeyEventKind, MouseEventKind};

        let samples = match event {
            Event::Key(key) => match (convert_key_code(key.code), key.kind) {
                (None, _) => Vec::new(),
                (Some(code), KeyEventKind::Release) => vec![InputSample::KeyUp(code)],
                (Some(code), KeyEventKind::Press | KeyEventKind::Repeat) if key_releases => {
                    vec![InputSample::KeyDown(code)]
                }
                (Some(code), KeyEventKind::Press | KeyEventKind::Repeat) => {
                    vec![InputSample::KeyDown(code), InputSample::KeyUp(code)]
                }
            },
            Event::Mouse(mouse) => {
                let at = InputSample::PointerMove(Point::new(mouse.column as i32, mouse.row as i32));
                match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => vec![at],
                    MouseEventKind::Down(b) => vec![at, InputSample::PointerDown(convert_mouse_button(b))],
                    MouseEventKind::Up(b) => vec![at, InputSample::PointerUp(convert_mouse_button(b))],
                    MouseEventKind::ScrollUp => vec![at, InputSample::Scroll(ScrollDirection::Up)],
                    MouseEventKind::ScrollDown => vec![at, InputSample::Scroll(ScrollDirection::Down)],
                    _ => vec![at],
                }
            }
            _ => Vec::new(),
        };
        InputBatch(samples)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        Event, KeyCode as Ct, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    };

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn key_codes_use_ascii_and_sentinels() {
        assert_eq!(convert_key_code(Ct::Char('a')), Some(97));
        assert_eq!(convert_key_code(Ct::Enter), Some(KEY_ENTER));
        assert_eq!(convert_key_code(Ct::Esc), Some(KEY_ESCAPE));
        assert_eq!(convert_key_code(Ct::Backspace), Some(KEY_BACKSPACE));
        assert_eq!(convert_key_code(Ct::F(5)), None);
    }

    fn key(code: Ct, kind: KeyEventKind) -> Event {
        let mut event = KeyEvent::new(code, KeyModifiers::NONE);
        event.kind = kind;
        Event::Key(event)
    }

    #[test]
    fn press_only_terminal_taps_each_key() {
        let x = 'x' as u32;
        assert_eq!(
            InputBatch::from(key(Ct::Char('x'), KeyEventKind::Press)).0,
            vec![InputSample::KeyDown(x), InputSample::KeyUp(x)]
        );
        assert_eq!(
            InputBatch::from(key(Ct::Char('x'), KeyEventKind::Repeat)).0,
            vec![InputSample::KeyDown(x), InputSample::KeyUp(x)]
        );
    }

    #[test]
    fn release_reporting_terminal_holds_keys() {
        let x = 'x' as u32;
        let convert = |kind| InputBatch::from_event(key(Ct::Char('x'), kind), true).0;
        assert_eq!(convert(KeyEventKind::Press), vec![InputSample::KeyDown(x)]);
        assert_eq!(convert(KeyEventKind::Repeat), vec![InputSample::KeyDown(x)]);
        assert_eq!(convert(KeyEventKind::Release), vec![InputSample::KeyUp(x)]);
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert!(InputBatch::from(key(Ct::F(1), KeyEventKind::Press)).is_empty());
    }

    #[test]
    fn mouse_down_moves_first() {
        let event = mouse(MouseEventKind::Down(crossterm::event::MouseButton::Left), 4, 7);
        assert_eq!(
            InputBatch::from(event).0,
            vec![
                InputSample::PointerMove(Point::new(4, 7)),
                InputSample::PointerDown(MouseButton::Left),
            ]
        );
    }

    #[test]
    fn mouse_scroll() {
        let event = mouse(MouseEventKind::ScrollDown, 1, 1);
        let batch = InputBatch::from(event);
        assert_eq!(batch.0[1], InputSample::Scroll(ScrollDirection::Down));
    }

    #[test]
    fn unrelated_events_are_empty() {
        assert!(InputBatch::from(Event::FocusGained).is_empty());
        assert!(InputBatch::from(Event::Resize(10, 10)).is_empty());
    }
}

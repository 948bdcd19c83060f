use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::entities::MoveKeys;

/// How long a movement key stays held after a press or repeat when the
/// terminal never reports releases.
pub const HOLD_WINDOW: Duration = Duration::from_millis(120);

/// One-shot actions drained from the event queue each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    FireBeam,
    Special,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// When each movement key was last seen pressed; `None` once released
#[derive(Debug, Default)]
struct KeyState {
    pressed_at: [Option<Instant>; 4],
}

/// Turns raw crossterm key events into a held-key snapshot plus one-shot
/// actions.
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// The terminal reports key releases (keyboard enhancement is active).
    release_events: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    /// Creates an InputManager; pass whether the terminal reports key releases
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Drains every pending terminal event without blocking.
    /// Call once per tick before reading actions or keys.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, Instant::now());
            }
        }

        Ok(())
    }

    /// Updates held keys and queues one-shot actions for a single key event
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, now),
            KeyEventKind::Repeat => {
                if let Some(direction) = Direction::from_code(key_event.code) {
                    self.key_state.pressed_at[direction.index()] = Some(now);
                }
            }
            KeyEventKind::Release => {
                if let Some(direction) = Direction::from_code(key_event.code) {
                    self.key_state.pressed_at[direction.index()] = None;
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, now: Instant) {
        let ctrl_c = key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c
            || matches!(
                key_event.code,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
            )
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match key_event.code {
            KeyCode::Char(' ') => self.oneshot_actions.push(InputAction::FireBeam),
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.oneshot_actions.push(InputAction::Special)
            }
            code => {
                // Opposite keys are both kept; they cancel out in MoveKeys::net
                if let Some(direction) = Direction::from_code(code) {
                    self.key_state.pressed_at[direction.index()] = Some(now);
                }
            }
        }
    }

    /// One-shot actions queued by the last poll, in arrival order.
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Movement keys held at `now`.
    pub fn move_keys(&self, now: Instant) -> MoveKeys {
        let held = |direction: Direction| {
            self.key_state.pressed_at[direction.index()].is_some_and(|at| {
                self.release_events || now.saturating_duration_since(at) < HOLD_WINDOW
            })
        };
        MoveKeys {
            up: held(Direction::Up),
            down: held(Direction::Down),
            left: held(Direction::Left),
            right: held(Direction::Right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_keys() {
        let now = Instant::now();
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut input = InputManager::new(true);
            input.handle_key_event(event, now);
            assert_eq!(input.actions(), &[InputAction::Quit]);
        }
    }

    #[test]
    fn test_fire_and_special_are_one_shot() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_key_event(press(KeyCode::Char(' ')), now);
        input.handle_key_event(press(KeyCode::Char('b')), now);
        input.handle_key_event(press(KeyCode::Char(' ')), now);
        assert_eq!(
            input.actions(),
            &[
                InputAction::FireBeam,
                InputAction::Special,
                InputAction::FireBeam
            ]
        );
        assert_eq!(input.move_keys(now), MoveKeys::default());
    }

    #[test]
    fn test_press_and_release_with_release_events() {
        let mut input = InputManager::new(true);
        let start = Instant::now();
        input.handle_key_event(press(KeyCode::Left), start);
        let later = start + Duration::from_secs(5);
        assert!(input.move_keys(later).left);

        input.handle_key_event(key(KeyCode::Left, KeyEventKind::Release), later);
        assert!(!input.move_keys(later).left);
    }

    #[test]
    fn test_opposite_keys_both_held() {
        let mut input = InputManager::new(true);
        let now = Instant::now();
        input.handle_key_event(press(KeyCode::Char('a')), now);
        input.handle_key_event(press(KeyCode::Char('d')), now);
        let keys = input.move_keys(now);
        assert!(keys.left && keys.right);
        assert_eq!(keys.net(), (0, 0));
    }

    #[test]
    fn test_hold_window_without_release_events() {
        let mut input = InputManager::new(false);
        let start = Instant::now();
        input.handle_key_event(press(KeyCode::Char('w')), start);
        assert!(input.move_keys(start + Duration::from_millis(50)).up);
        assert!(!input.move_keys(start + HOLD_WINDOW).up);

        // Auto-repeat keeps it alive
        let repeat = start + Duration::from_millis(100);
        input.handle_key_event(key(KeyCode::Char('w'), KeyEventKind::Repeat), repeat);
        assert!(input.move_keys(start + HOLD_WINDOW).up);
    }
}

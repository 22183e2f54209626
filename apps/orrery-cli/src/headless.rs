use glam::Vec2;
use orrery_input::{InputDevice, KeyCode, MouseButton};
use orrery_kernel::Window;

/// Window with no surface. Asks to close once it has presented `close_after` frames.
#[derive(Debug)]
pub struct HeadlessWindow {
    width: u32,
    height: u32,
    close_after: usize,
    presented: usize,
    disposed: bool,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32, close_after: usize) -> Self {
        Self {
            width,
            height,
            close_after,
            presented: 0,
            disposed: false,
        }
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Window for HeadlessWindow {
    fn is_close_requested(&self) -> bool {
        self.disposed || self.presented >= self.close_after
    }

    fn present_frame(&mut self) {
        self.presented += 1;
    }

    fn dispose(&mut self) {
        tracing::debug!(presented = self.presented, "headless window disposed");
        self.disposed = true;
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// A key held from poll `from` up to, not including, poll `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: KeyCode,
    pub from: u64,
    pub until: u64,
}

impl KeyPress {
    pub fn new(key: KeyCode, from: u64, until: u64) -> Self {
        Self { key, from, until }
    }
}

/// Keyboard that replays a fixed script indexed by poll count.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: Vec<KeyPress>,
    polls: u64,
    disposed: bool,
}

impl ScriptedInput {
    pub fn new(script: Vec<KeyPress>) -> Self {
        Self {
            script,
            polls: 0,
            disposed: false,
        }
    }

    /// Walk forward, turn right, then tap reset.
    pub fn demo() -> Self {
        Self::new(vec![
            KeyPress::new(KeyCode::W, 2, 200),
            KeyPress::new(KeyCode::RIGHT, 100, 300),
            KeyPress::new(KeyCode::L, 320, 322),
            KeyPress::new(KeyCode::R, 400, 402),
        ])
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl InputDevice for ScriptedInput {
    fn poll_devices(&mut self) {
        self.polls += 1;
    }

    fn key_count(&self) -> usize {
        256
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        !self.disposed
            && self
                .script
                .iter()
                .any(|p| p.key == key && (p.from..p.until).contains(&self.polls))
    }

    fn mouse_button_count(&self) -> usize {
        3
    }

    fn is_mouse_button_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn set_cursor_grabbed(&mut self, _grabbed: bool) {}

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_closes_after_frame_budget() {
        let mut window = HeadlessWindow::new(640, 480, 2);
        assert!(!window.is_close_requested());
        window.present_frame();
        window.present_frame();
        assert!(window.is_close_requested());
        assert_eq!(window.presented(), 2);
    }

    #[test]
    fn disposed_window_requests_close() {
        let mut window = HeadlessWindow::new(640, 480, 100);
        window.dispose();
        assert!(window.is_disposed());
        assert!(window.is_close_requested());
    }

    #[test]
    fn script_follows_poll_count() {
        let mut input = ScriptedInput::new(vec![KeyPress::new(KeyCode::W, 2, 4)]);
        input.poll_devices();
        assert!(!input.is_key_down(KeyCode::W));
        input.poll_devices();
        assert!(input.is_key_down(KeyCode::W));
        input.poll_devices();
        assert!(input.is_key_down(KeyCode::W));
        assert!(!input.is_key_down(KeyCode::A));
        input.poll_devices();
        assert!(!input.is_key_down(KeyCode::W));
        assert_eq!(input.polls(), 4);
    }

    #[test]
    fn disposed_input_reads_released() {
        let mut input = ScriptedInput::new(vec![KeyPress::new(KeyCode::S, 0, 10)]);
        assert!(input.is_key_down(KeyCode::S));
        input.dispose();
        assert!(!input.is_key_down(KeyCode::S));
    }
}

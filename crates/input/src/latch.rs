use glam::Vec2;

/// Device-level key code, in the numbering of the window system's keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const W: KeyCode = KeyCode(17);
    pub const R: KeyCode = KeyCode(19);
    pub const T: KeyCode = KeyCode(20);
    pub const A: KeyCode = KeyCode(30);
    pub const S: KeyCode = KeyCode(31);
    pub const D: KeyCode = KeyCode(32);
    pub const L: KeyCode = KeyCode(38);
    pub const ESCAPE: KeyCode = KeyCode(1);
    pub const UP: KeyCode = KeyCode(200);
    pub const LEFT: KeyCode = KeyCode(203);
    pub const RIGHT: KeyCode = KeyCode(205);
    pub const DOWN: KeyCode = KeyCode(208);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MouseButton(pub u32);

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton(0);
    pub const RIGHT: MouseButton = MouseButton(1);
    pub const MIDDLE: MouseButton = MouseButton(2);
}

/// Raw polled input provided by the window system.
pub trait InputDevice {
    /// Refresh the device's view of the hardware. Called once per tick.
    fn poll_devices(&mut self);
    fn key_count(&self) -> usize;
    fn is_key_down(&self, key: KeyCode) -> bool;
    fn mouse_button_count(&self) -> usize;
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;
    fn mouse_position(&self) -> Vec2;
    fn set_cursor_grabbed(&mut self, grabbed: bool);
    fn dispose(&mut self);
}

/// Latched state of one button between two polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Pressed since the previous poll.
    JustDown,
    Down,
    /// Released since the previous poll.
    JustUp,
    Up,
}

impl ButtonState {
    /// Steady state for a button first seen at this poll. No edge is reported.
    fn initial(down: bool) -> Self {
        if down { ButtonState::Down } else { ButtonState::Up }
    }

    fn advance(self, down: bool) -> Self {
        match (self.is_down(), down) {
            (false, true) => ButtonState::JustDown,
            (true, true) => ButtonState::Down,
            (true, false) => ButtonState::JustUp,
            (false, false) => ButtonState::Up,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, ButtonState::JustDown | ButtonState::Down)
    }
}

/// Per-button latch over an [`InputDevice`].
///
/// [`Input::update`] polls the device and advances every key and mouse button one step;
/// the `just_*` queries then report edges since the previous update.
#[derive(Debug)]
pub struct Input<D> {
    device: D,
    keys: Vec<ButtonState>,
    buttons: Vec<ButtonState>,
    mouse_position: Vec2,
}

impl<D: InputDevice> Input<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            keys: Vec::new(),
            buttons: Vec::new(),
            mouse_position: Vec2::ZERO,
        }
    }

    /// Poll the device and advance the latch.
    pub fn update(&mut self) {
        self.device.poll_devices();

        let device = &self.device;
        latch(&mut self.keys, device.key_count(), |i| {
            device.is_key_down(KeyCode(i as u32))
        });
        latch(&mut self.buttons, device.mouse_button_count(), |i| {
            device.is_mouse_button_down(MouseButton(i as u32))
        });
        self.mouse_position = device.mouse_position();
    }

    pub fn key_state(&self, key: KeyCode) -> ButtonState {
        self.keys
            .get(key.0 as usize)
            .copied()
            .unwrap_or(ButtonState::Up)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.key_state(key).is_down()
    }

    pub fn key_just_down(&self, key: KeyCode) -> bool {
        self.key_state(key) == ButtonState::JustDown
    }

    pub fn key_just_up(&self, key: KeyCode) -> bool {
        self.key_state(key) == ButtonState::JustUp
    }

    pub fn mouse_state(&self, button: MouseButton) -> ButtonState {
        self.buttons
            .get(button.0 as usize)
            .copied()
            .unwrap_or(ButtonState::Up)
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_state(button).is_down()
    }

    pub fn mouse_just_down(&self, button: MouseButton) -> bool {
        self.mouse_state(button) == ButtonState::JustDown
    }

    pub fn mouse_just_up(&self, button: MouseButton) -> bool {
        self.mouse_state(button) == ButtonState::JustUp
    }

    /// Cursor position observed at the last update.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn set_cursor_grabbed(&mut self, grabbed: bool) {
        tracing::debug!(grabbed, "cursor grab");
        self.device.set_cursor_grabbed(grabbed);
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Release the device. The latch reads as all-up afterwards.
    pub fn dispose(&mut self) {
        self.device.dispose();
        self.keys.clear();
        self.buttons.clear();
    }
}

fn latch(states: &mut Vec<ButtonState>, count: usize, is_down: impl Fn(usize) -> bool) {
    states.truncate(count);
    for (i, state) in states.iter_mut().enumerate() {
        *state = state.advance(is_down(i));
    }
    for i in states.len()..count {
        states.push(ButtonState::initial(is_down(i)));
    }
}

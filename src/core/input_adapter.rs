use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};
use crate::rig::PointerState;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Presses not yet consumed by the app
    pressed: Vec<Button>,
    /// Cursor position in physical pixels from the top-left corner
    cursor: Option<(f32, f32)>,
    /// Window inner size in physical pixels
    viewport: (f32, f32),
}

impl WinitController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width as f32, height as f32),
            ..Self::default()
        }
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    self.handle_key(keycode, event.state, event.repeat);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::Resized(size) => self.set_viewport(size.width, size.height),
            _ => {}
        }
    }

    /// Records a press on the first (non-repeat) key down
    pub fn handle_key(&mut self, keycode: KeyCode, state: ElementState, repeat: bool) {
        if state != ElementState::Pressed || repeat {
            return;
        }
        if let Some(button) = Self::keycode_to_button(keycode) {
            self.pressed.push(button);
        }
    }

    pub fn handle_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width as f32, height as f32);
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyG | KeyCode::Tab => Some(Button::ToggleMode),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(Button::RouteNormal),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(Button::RouteGhost),
            KeyCode::Escape => Some(Button::Quit),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn pointer(&self) -> PointerState {
        match self.cursor {
            Some((x, y)) => PointerState::from_cursor(x, y, self.viewport.0, self.viewport.1),
            None => PointerState::default(),
        }
    }

    fn take_pressed(&mut self) -> Vec<Button> {
        std::mem::take(&mut self.pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // KeyEvent has private platform fields, so tests drive the handlers directly

    #[test]
    fn test_new_controller_centered() {
        let controller = WinitController::new(800, 600);
        assert_eq!(controller.pointer(), PointerState::default());
        assert_eq!(controller.cursor(), None);
    }

    #[test]
    fn test_cursor_normalized_against_viewport() {
        let mut controller = WinitController::new(800, 600);
        controller.handle_cursor(800.0, 0.0);
        assert_eq!(controller.pointer(), PointerState::new(1.0, 1.0));

        controller.set_viewport(1600, 1200);
        assert_eq!(controller.pointer(), PointerState::new(0.0, 1.0));
    }

    #[test]
    fn test_key_bindings() {
        let mut controller = WinitController::new(800, 600);
        controller.handle_key(KeyCode::KeyG, ElementState::Pressed, false);
        controller.handle_key(KeyCode::Tab, ElementState::Pressed, false);
        controller.handle_key(KeyCode::Digit1, ElementState::Pressed, false);
        controller.handle_key(KeyCode::Digit2, ElementState::Pressed, false);
        controller.handle_key(KeyCode::Escape, ElementState::Pressed, false);
        controller.handle_key(KeyCode::KeyW, ElementState::Pressed, false);
        assert_eq!(
            controller.take_pressed(),
            vec![
                Button::ToggleMode,
                Button::ToggleMode,
                Button::RouteNormal,
                Button::RouteGhost,
                Button::Quit,
            ]
        );
    }

    #[test]
    fn test_release_and_repeat_ignored() {
        let mut controller = WinitController::new(800, 600);
        controller.handle_key(KeyCode::KeyG, ElementState::Released, false);
        controller.handle_key(KeyCode::KeyG, ElementState::Pressed, true);
        assert!(controller.take_pressed().is_empty());
    }
}

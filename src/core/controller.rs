use crate::rig::PointerState;

/// Discrete viewer commands bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Flip between Normal and Ghost
    ToggleMode,
    /// Navigate to `/`
    RouteNormal,
    /// Navigate to `/tunic`
    RouteGhost,
    Quit,
}

/// Controller - pointer plus edge-triggered buttons
pub trait Controller {
    /// Normalized pointer, last known value when the cursor left the window
    fn pointer(&self) -> PointerState;

    /// Buttons pressed since the previous call, in press order
    fn take_pressed(&mut self) -> Vec<Button>;
}

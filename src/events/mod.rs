pub mod controls;
pub mod gesture;

pub use controls::wire_controls;
pub use gesture::wire_gesture_unlock;

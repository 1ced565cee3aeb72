//! Input: action state, the input buffer and the player input handler

mod buffer;
mod handler;
mod state;

pub use buffer::{BufferedInput, InputBuffer, DEFAULT_BUFFER_TIME};
pub use handler::{InputPhase, InputSignal, PlayerInputHandler};
pub use state::{InputAction, InputBindings, InputState};

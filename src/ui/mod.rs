mod board;
mod input;

pub use board::render_board;
pub use input::render_input_modal;

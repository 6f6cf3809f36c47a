/// Line layout and serialization of ANSI art token streams.
///
/// Wraps tokens at a fixed width, restating the live colours on every new
/// line so each line renders correctly on its own.
pub mod lines;
pub mod output;

pub use lines::{Lines, RenderState};
pub use output::{line_to_string, render_to_string, write_lines};

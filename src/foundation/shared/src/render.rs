mod buffer;
mod color;
mod drawing;
mod text;

pub use buffer::*;
pub use color::*;
pub use drawing::*;
pub use text::*;

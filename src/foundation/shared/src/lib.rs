#![allow(clippy::too_many_arguments)]

pub mod codec;
pub mod identifier;
pub mod instruction;
pub mod lifecycle;
pub mod param;
pub mod permission;
pub mod render;
pub mod screen;
pub mod time;
pub mod validate;
pub mod window;

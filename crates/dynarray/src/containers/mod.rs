pub mod array;
pub mod buffer;
mod part;
pub mod selection;

pub mod line;
pub mod utf16;

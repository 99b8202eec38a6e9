pub mod frame;

pub use frame::Frame;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

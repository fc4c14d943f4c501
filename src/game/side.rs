use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Cross,
    Circle,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Cross => Side::Circle,
            Side::Circle => Side::Cross,
        }
    }

    /// Convert side to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Side::Cross => Cell::Cross,
            Side::Circle => Cell::Circle,
        }
    }

    pub fn from_cell(cell: Cell) -> Option<Side> {
        match cell {
            Cell::Cross => Some(Side::Cross),
            Cell::Circle => Some(Side::Circle),
            Cell::Empty => None,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Cross => "Cross",
            Side::Circle => "Circle",
        }
    }
}

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Loc {
    pub start: Position,
    pub end: Position,
}

impl Loc {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Loc {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    // Zero-width range at the start of this range
    pub fn start_of(self) -> Loc {
        Loc {
            start: self.start,
            end: self.start,
        }
    }

    // Zero-width range at the end of this range
    pub fn end_of(self) -> Loc {
        Loc {
            start: self.end,
            end: self.end,
        }
    }

    pub fn btwn(first: Loc, second: Loc) -> Loc {
        Loc {
            start: first.start,
            end: second.end,
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

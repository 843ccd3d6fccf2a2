mod change;
mod list;
mod tree;

pub use change::{Change, EditScript, LocatedChange, Node};
pub use list::{diff as list_diff, Algorithm, PositionedChange, ShallowEq};
pub use tree::program;

mod loc;

pub mod ast;
pub mod diff;
pub mod script_formatter;

pub use crate::diff::{
    list_diff, Algorithm, Change, EditScript, LocatedChange, Node, PositionedChange, ShallowEq,
};
pub use crate::loc::{Loc, Position};

use crate::ast::Program;
use std::rc::Rc;

// Compare two parsed programs and return the location-annotated edit script
// turning `origin` into `modified`. Unchanged subtrees are expected (but not
// required) to be shared between the two trees; sharing is what lets the
// differ skip them without looking inside.
pub fn compute_diff(
    algorithm: Algorithm,
    origin: &Rc<Program>,
    modified: &Rc<Program>,
) -> EditScript {
    diff::program(algorithm, origin, modified)
}

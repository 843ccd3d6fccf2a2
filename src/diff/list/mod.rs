use super::change::Change;
use std::rc::Rc;

mod standard;
mod trivial;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Algorithm {
    Trivial,
    Standard,
}

// Shallow identity between sequence elements. For parser-produced trees this
// is pointer equality on the shared subtree, a sound under-approximation of
// structural equality.
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

impl<T> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

// An edit positioned against the old sequence. For Replace and Delete the
// index names the affected old element; for Insert it names the element the
// insertion follows, with -1 standing for "before the head".
pub type PositionedChange<T> = (isize, Change<T>);

pub fn diff<T: Clone + ShallowEq>(
    algorithm: Algorithm,
    old: &[T],
    new: &[T],
) -> Option<Vec<PositionedChange<T>>> {
    match algorithm {
        Algorithm::Trivial => trivial::lockstep_script(old, new),
        Algorithm::Standard => standard::shortest_edit_script(old, new, old.len() + new.len()),
    }
}

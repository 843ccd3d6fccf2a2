use super::{Change, PositionedChange, ShallowEq};

// Lockstep positional comparison. Only equal-length sequences qualify; every
// shallow-unequal pair becomes a Replace at its position.
pub(super) fn lockstep_script<T: Clone + ShallowEq>(
    old: &[T],
    new: &[T],
) -> Option<Vec<PositionedChange<T>>> {
    if old.len() != new.len() {
        return None;
    }
    Some(
        old.iter()
            .zip(new)
            .enumerate()
            .filter(|&(_, (old_elem, new_elem))| !old_elem.shallow_eq(new_elem))
            .map(|(i, (old_elem, new_elem))| {
                (
                    i as isize,
                    Change::Replace(old_elem.clone(), new_elem.clone()),
                )
            })
            .collect(),
    )
}

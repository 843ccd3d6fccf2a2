use estdiff::{list_diff, Algorithm, Change, PositionedChange, ShallowEq};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// A tiny element type with by-value identity, standing in for shared
// subtrees. Keeping the alphabet small makes collisions (and therefore
// interesting scripts) likely.
#[derive(Clone, Debug, PartialEq)]
struct Sym(u8);

impl ShallowEq for Sym {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

fn syms(values: &[u8]) -> Vec<Sym> {
    values.iter().copied().map(Sym).collect()
}

// Interpret a positional script against the original old sequence.
fn apply(old: &[Sym], script: &[PositionedChange<Sym>]) -> Vec<Sym> {
    let mut replaced: HashMap<usize, Sym> = HashMap::new();
    let mut deleted: HashSet<usize> = HashSet::new();
    let mut inserted: HashMap<isize, Vec<Sym>> = HashMap::new();
    for (index, change) in script {
        match change {
            Change::Replace(_, new) => {
                replaced.insert(*index as usize, new.clone());
            }
            Change::Delete(_) => {
                deleted.insert(*index as usize);
            }
            Change::Insert(items) => inserted
                .entry(*index)
                .or_default()
                .extend(items.iter().cloned()),
        }
    }
    let mut result = Vec::new();
    if let Some(items) = inserted.get(&-1) {
        result.extend(items.iter().cloned());
    }
    for (i, elem) in old.iter().enumerate() {
        if let Some(new) = replaced.get(&i) {
            result.push(new.clone());
        } else if !deleted.contains(&i) {
            result.push(elem.clone());
        }
        if let Some(items) = inserted.get(&(i as isize)) {
            result.extend(items.iter().cloned());
        }
    }
    result
}

// One delete or one inserted element each cost 1; a replace stands for one
// of each.
fn script_cost(script: &[PositionedChange<Sym>]) -> usize {
    script
        .iter()
        .map(|(_, change)| match change {
            Change::Replace(_, _) => 2,
            Change::Delete(_) => 1,
            Change::Insert(items) => items.len(),
        })
        .sum()
}

proptest! {
    #[test]
    fn standard_patch_soundness(
        old in vec(0u8..4, 0..12),
        new in vec(0u8..4, 0..12),
    ) {
        let old = syms(&old);
        let new = syms(&new);
        let script = list_diff(Algorithm::Standard, &old, &new)
            .expect("bound of N+M always suffices");
        prop_assert_eq!(apply(&old, &script), new);
    }

    #[test]
    fn standard_no_worse_than_discarding_everything(
        old in vec(0u8..4, 0..12),
        new in vec(0u8..4, 0..12),
    ) {
        let old = syms(&old);
        let new = syms(&new);
        let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
        prop_assert!(script_cost(&script) <= old.len() + new.len());
    }

    #[test]
    fn standard_indices_non_decreasing(
        old in vec(0u8..4, 0..12),
        new in vec(0u8..4, 0..12),
    ) {
        let old = syms(&old);
        let new = syms(&new);
        let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
        for pair in script.windows(2) {
            prop_assert!(pair[0].0 <= pair[1].0);
        }
    }

    #[test]
    fn trivial_patch_soundness_on_equal_lengths(
        pairs in vec((0u8..4, 0u8..4), 0..12),
    ) {
        let old = syms(&pairs.iter().map(|(a, _)| *a).collect::<Vec<_>>());
        let new = syms(&pairs.iter().map(|(_, b)| *b).collect::<Vec<_>>());
        let script = list_diff(Algorithm::Trivial, &old, &new)
            .expect("equal lengths are always accepted");
        prop_assert_eq!(apply(&old, &script), new);
    }

    #[test]
    fn identity_scripts_are_empty(values in vec(0u8..4, 0..12)) {
        let seq = syms(&values);
        prop_assert_eq!(list_diff(Algorithm::Trivial, &seq, &seq).unwrap(), vec![]);
        prop_assert_eq!(list_diff(Algorithm::Standard, &seq, &seq).unwrap(), vec![]);
    }
}

#[test]
fn trivial_rejects_length_mismatch() {
    assert_eq!(
        list_diff(Algorithm::Trivial, &syms(&[1, 2]), &syms(&[1, 2, 3])),
        None
    );
}

#[test]
fn all_different_equal_lengths_become_replaces() {
    let old = syms(&[1, 1, 1]);
    let new = syms(&[2, 2, 2]);
    for algorithm in [Algorithm::Trivial, Algorithm::Standard] {
        let script = list_diff(algorithm, &old, &new).unwrap();
        assert_eq!(script.len(), 3, "{:?}", algorithm);
        for (i, (index, change)) in script.iter().enumerate() {
            assert_eq!(*index, i as isize);
            assert!(matches!(change, Change::Replace(Sym(1), Sym(2))));
        }
    }
}

#[test]
fn insertion_before_the_head_uses_the_sentinel() {
    let old = syms(&[7]);
    let new = syms(&[5, 7]);
    let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
    assert_eq!(script, vec![(-1, Change::Insert(vec![Sym(5)]))]);
}

#[test]
fn deletion_keeps_the_old_index() {
    let old = syms(&[1, 2, 3]);
    let new = syms(&[1, 3]);
    let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
    assert_eq!(script, vec![(1, Change::Delete(Sym(2)))]);
}

#[test]
fn head_insert_fuses_with_following_delete() {
    let old = syms(&[1, 2]);
    let new = syms(&[3]);
    let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
    assert_eq!(
        script,
        vec![
            (0, Change::Replace(Sym(1), Sym(3))),
            (1, Change::Delete(Sym(2))),
        ]
    );
}

#[test]
fn leftover_insertion_chains_into_further_replaces() {
    let old = syms(&[1, 2]);
    let new = syms(&[3, 4]);
    let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
    assert_eq!(
        script,
        vec![
            (0, Change::Replace(Sym(1), Sym(3))),
            (1, Change::Replace(Sym(2), Sym(4))),
        ]
    );
}

#[test]
fn empty_old_sequence_is_one_insertion() {
    let old: Vec<Sym> = Vec::new();
    let new = syms(&[1, 2]);
    let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
    assert_eq!(script, vec![(-1, Change::Insert(vec![Sym(1), Sym(2)]))]);
}

#[test]
fn common_prefix_and_suffix_are_untouched() {
    let old = syms(&[1, 2, 3, 4]);
    let new = syms(&[1, 5, 3, 4]);
    let script = list_diff(Algorithm::Standard, &old, &new).unwrap();
    assert_eq!(script, vec![(1, Change::Replace(Sym(2), Sym(5)))]);
}

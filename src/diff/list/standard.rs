use super::{Change, PositionedChange, ShallowEq};
use im_rc::Vector;
use std::collections::{HashSet, VecDeque};

type MatchPoint = (usize, usize);

struct Endpoint {
    x: usize,
    y: usize,
    trace: Vector<MatchPoint>,
}

fn follow_snake<T: ShallowEq>(
    old: &[T],
    new: &[T],
    mut x: usize,
    mut y: usize,
    trace: &mut Vector<MatchPoint>,
) -> (usize, usize) {
    while x < old.len() && y < new.len() && old[x].shallow_eq(&new[y]) {
        trace.push_back((x, y));
        x += 1;
        y += 1;
    }
    (x, y)
}

// Forward Myers shortest-edit-script search, O((N+M)·D). Endpoints reached
// with the same edit distance form a wave; each endpoint remembers the match
// points on its path as a persistent vector so waves share trace prefixes.
pub(super) fn shortest_edit_script<T: Clone + ShallowEq>(
    old: &[T],
    new: &[T],
    max_distance: usize,
) -> Option<Vec<PositionedChange<T>>> {
    let old_len = old.len();
    let new_len = new.len();
    let mut visited = vec![false; (old_len + 1) * (new_len + 1)];
    let point_index = |x: usize, y: usize| x + y * (old_len + 1);

    let mut trace = Vector::new();
    let (x, y) = follow_snake(old, new, 0, 0, &mut trace);
    visited[point_index(x, y)] = true;
    if (x, y) == (old_len, new_len) {
        return Some(build_script(old, new, &trace));
    }
    let mut frontier = vec![Endpoint { x, y, trace }];

    for _distance in 1..=max_distance {
        let mut next_frontier = Vec::new();
        for endpoint in &frontier {
            // Either consume one old element (a delete) or one new element
            // (an insert), then ride the snake of matches that follows.
            for (moved_x, moved_y) in [(endpoint.x + 1, endpoint.y), (endpoint.x, endpoint.y + 1)] {
                if moved_x > old_len || moved_y > new_len {
                    continue;
                }
                let mut trace = endpoint.trace.clone();
                let (x, y) = follow_snake(old, new, moved_x, moved_y, &mut trace);
                if visited[point_index(x, y)] {
                    continue;
                }
                visited[point_index(x, y)] = true;
                if (x, y) == (old_len, new_len) {
                    return Some(build_script(old, new, &trace));
                }
                next_frontier.push(Endpoint { x, y, trace });
            }
        }
        frontier = next_frontier;
    }
    None
}

fn build_script<T: Clone>(
    old: &[T],
    new: &[T],
    trace: &Vector<MatchPoint>,
) -> Vec<PositionedChange<T>> {
    let matched_old: HashSet<usize> = trace.iter().map(|&(x, _)| x).collect();
    let mut script: Vec<PositionedChange<T>> = (0..old.len())
        .filter(|x| !matched_old.contains(x))
        .map(|x| (x as isize, Change::Delete(old[x].clone())))
        .collect();

    // Gaps in the new-side coordinates of consecutive match points are
    // insertions, attached after the old index of the left-hand match.
    // Sentinels close the two open ends of the trace.
    let mut prev: (isize, isize) = (-1, -1);
    for (x, y) in trace
        .iter()
        .map(|&(x, y)| (x as isize, y as isize))
        .chain(std::iter::once((old.len() as isize, new.len() as isize)))
    {
        if prev.1 + 1 < y {
            let items = new[(prev.1 + 1) as usize..y as usize].to_vec();
            script.push((prev.0, Change::Insert(items)));
        }
        prev = (x, y);
    }

    script.sort_by_key(|(index, change)| (*index, change.rank()));
    fuse_replacements(script)
}

// An insertion immediately left of a deletion is really a replacement of
// that deleted element by the first inserted one. Only a Replace can be
// refined further by the tree layer, so the fusion matters there.
fn fuse_replacements<T>(script: Vec<PositionedChange<T>>) -> Vec<PositionedChange<T>> {
    let mut queue: VecDeque<PositionedChange<T>> = script.into();
    let mut fused = Vec::with_capacity(queue.len());
    while let Some(edit) = queue.pop_front() {
        let fuses = matches!(
            (&edit, queue.front()),
            ((insert_index, Change::Insert(_)), Some((delete_index, Change::Delete(_))))
                if *insert_index + 1 == *delete_index
        );
        if !fuses {
            fused.push(edit);
            continue;
        }
        let mut items = match edit.1 {
            Change::Insert(items) => items,
            _ => unreachable!(),
        };
        let (delete_index, deleted) = match queue.pop_front() {
            Some((delete_index, Change::Delete(deleted))) => (delete_index, deleted),
            _ => unreachable!(),
        };
        let first = items.remove(0);
        fused.push((delete_index, Change::Replace(deleted, first)));
        if !items.is_empty() {
            // The leftover insertion now follows the replaced element and
            // may fuse again with a deletion right behind it.
            queue.push_front((delete_index, Change::Insert(items)));
        }
    }
    fused
}

//! Commit-graph traversal: reachability and the split point
//! (latest common ancestor) that seeds a three-way merge.

use std::collections::{HashSet, VecDeque};

use crate::object::{Commit, Id};
use crate::repo::Result;
use crate::store::ObjectStore;

/// Every commit reachable from `tip` through any parent link,
/// including `tip` itself.
pub(crate) fn ancestors(store: &ObjectStore, tip: &Id) -> Result<HashSet<Id>> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(tip.clone());

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let commit = store.commit(&id)?;
        for parent in commit.parents() {
            if !visited.contains(parent) {
                queue.push_back(parent.clone());
            }
        }
    }

    Ok(visited)
}

/// The split point of two tips: the first commit, in breadth-first
/// order walking back from `other`, that is also an ancestor of
/// `head`.
///
/// With criss-cross histories more than one latest common ancestor can
/// exist; the breadth-first queue order picks one deterministically.
/// Tips with no recorded connection fall back to the root commit,
/// which every repository shares.
pub(crate) fn split_point(store: &ObjectStore, head: &Id, other: &Id) -> Result<Id> {
    let head_ancestors = ancestors(store, head)?;

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(other.clone());

    while let Some(id) = queue.pop_front() {
        if head_ancestors.contains(&id) {
            return Ok(id);
        }

        if !visited.insert(id.clone()) {
            continue;
        }

        let commit = store.commit(&id)?;
        for parent in commit.parents() {
            queue.push_back(parent.clone());
        }
    }

    Ok(Commit::initial().id().clone())
}

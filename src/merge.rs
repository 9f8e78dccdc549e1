//! Three-way merge: classify every file against the split point and
//! render conflict markers where both sides changed it differently.

use std::collections::BTreeSet;

use crate::object::Commit;

/// What a merge will do, file by file. Names within each list are
/// sorted; the three lists are disjoint.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct MergePlan {
    /// Kept by us, deleted by them: stage for removal.
    pub removals: Vec<String>,
    /// Untouched by us, changed or added by them: take their version.
    pub rewrites: Vec<String>,
    /// Changed by both sides to different content: write markers.
    pub conflicts: Vec<String>,
}

impl MergePlan {
    pub(crate) fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.rewrites.is_empty() && self.conflicts.is_empty()
    }

    /// True if the merge would touch this file at all.
    pub(crate) fn touches(&self, filename: &str) -> bool {
        self.removals.iter().any(|name| name == filename)
            || self.rewrites.iter().any(|name| name == filename)
            || self.conflicts.iter().any(|name| name == filename)
    }
}

/// Classify every filename any of the three commits tracks.
///
/// Per file, with `l`, `h`, `o` the blob IDs at the split point, our
/// head, and the other tip (absent counting as its own value):
/// matching `h == o` or `l == o` means the other side brings nothing
/// new; otherwise `l == h` means only they changed it, so their
/// version wins; otherwise both sides diverged and the file conflicts.
pub(crate) fn plan(split: &Commit, head: &Commit, other: &Commit) -> MergePlan {
    let mut names = BTreeSet::new();
    names.extend(split.files().keys());
    names.extend(head.files().keys());
    names.extend(other.files().keys());

    let mut plan = MergePlan::default();

    for name in names {
        let l = split.tracked(name);
        let h = head.tracked(name);
        let o = other.tracked(name);

        if h == o || l == o {
            continue;
        }

        if l == h {
            if o.is_none() {
                plan.removals.push(name.clone());
            } else {
                plan.rewrites.push(name.clone());
            }
        } else {
            plan.conflicts.push(name.clone());
        }
    }

    plan
}

/// Render a conflicted file: walk both versions line by line, passing
/// equal lines through and wrapping differing pairs (or the longer
/// side's tail, paired with nothing) in conflict markers.
pub(crate) fn conflict_file(head: &str, other: &str) -> String {
    let head_lines = split_lines(head);
    let other_lines = split_lines(other);

    let mut out = String::new();
    let mut i = 0;
    let mut j = 0;

    while i < head_lines.len() && j < other_lines.len() {
        if head_lines[i] == other_lines[j] {
            out.push_str(head_lines[i]);
            out.push('\n');
        } else {
            push_conflict(&mut out, head_lines[i], other_lines[j]);
        }
        i += 1;
        j += 1;
    }

    while i < head_lines.len() {
        push_conflict(&mut out, head_lines[i], "");
        i += 1;
    }

    while j < other_lines.len() {
        push_conflict(&mut out, "", other_lines[j]);
        j += 1;
    }

    out
}

fn push_conflict(out: &mut String, head: &str, other: &str) {
    out.push_str("<<<<<<< HEAD\n");
    out.push_str(head);
    out.push_str("\n=======\n");
    out.push_str(other);
    out.push_str("\n>>>>>>>\n");
}

/// Split on newlines, dropping all trailing empty lines, so content
/// with and without a final newline compares the same way.
fn split_lines(s: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = s.split('\n').collect();
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

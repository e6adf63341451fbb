//! Merge base search
//!
//! Finds the common ancestor used as the base of a three-way merge.
//!
//! ## Algorithm
//!
//! 1. Breadth-first walk from `ours` over both parents, marking every
//!    reachable commit (including `ours` itself)
//! 2. Breadth-first walk from `theirs`, returning the first commit already
//!    marked by the first walk
//!
//! The result is the nearest common ancestor by first encounter from
//! `theirs`. For criss-cross histories (two merges that each merged the
//! other side) this is not guaranteed to be a lowest common ancestor; the
//! commit found depends on the parent order of the merges involved.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = MergeBaseFinder::new(|commit_id| database.get_commit(commit_id));
//!
//! let base = finder.find_merge_base(Some(&ours), Some(&theirs));
//! ```

use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const REACHABLE_FROM_OURS = 0b01;
        const VISITED_FROM_THEIRS = 0b10;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::REACHABLE_FROM_OURS) {
            flags.push("OURS");
        }
        if self.contains(VisitState::VISITED_FROM_THEIRS) {
            flags.push("THEIRS");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Common ancestor finder over any commit source
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - Looks up a commit by id, returning `None` for ids
///   the source does not know (those are treated as having no parents)
pub struct MergeBaseFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<&'c CommitRecord>,
{
    commit_loader: CommitLoaderFn,
    _marker: std::marker::PhantomData<&'c ()>,
}

impl<'c, CommitLoaderFn> MergeBaseFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<&'c CommitRecord>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            _marker: std::marker::PhantomData,
        }
    }

    /// Find the merge base of two commits
    ///
    /// # Returns
    ///
    /// - `None` if either side is absent or the histories share no commit
    /// - The commit itself if both ids are equal
    /// - Otherwise the first commit reachable from `ours` met while walking
    ///   breadth-first from `theirs`
    pub fn find_merge_base(
        &self,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> Option<&'c CommitRecord> {
        let (ours, theirs) = (ours?, theirs?);

        if ours == theirs {
            return (self.commit_loader)(ours);
        }

        let mut states = HashMap::<ObjectId, VisitState>::new();
        self.mark_ancestors(ours, &mut states);

        let mut queue = VecDeque::from([theirs.clone()]);
        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);

            debug_log!("Visiting {} from theirs: state={}", commit_id, state);

            if state.contains(VisitState::REACHABLE_FROM_OURS) {
                debug_log!("Merge base found: {}", commit_id);
                return (self.commit_loader)(&commit_id);
            }
            if state.contains(VisitState::VISITED_FROM_THEIRS) {
                continue;
            }
            *state |= VisitState::VISITED_FROM_THEIRS;

            if let Some(commit) = (self.commit_loader)(&commit_id) {
                queue.extend(commit.parents().cloned());
            }
        }

        debug_log!("No common ancestor between {} and {}", ours, theirs);
        None
    }

    /// Mark `start` and everything reachable from it
    fn mark_ancestors(&self, start: &ObjectId, states: &mut HashMap<ObjectId, VisitState>) {
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::REACHABLE_FROM_OURS) {
                continue;
            }
            *state |= VisitState::REACHABLE_FROM_OURS;

            if let Some(commit) = (self.commit_loader)(&commit_id) {
                queue.extend(commit.parents().cloned());
            }
        }

        debug_log!("{} commits reachable from {}", states.len(), start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CommitGraph;
    use rstest::{fixture, rstest};

    fn merge_base<'g>(graph: &'g CommitGraph, ours: &str, theirs: &str) -> Option<&'g str> {
        let finder = MergeBaseFinder::new(|commit_id| graph.database.get_commit(commit_id));

        finder
            .find_merge_base(Some(graph.id(ours)), Some(graph.id(theirs)))
            .map(|commit| graph.name_of(commit.id()))
    }

    /// A <- B <- C <- D
    #[fixture]
    fn linear() -> CommitGraph {
        let mut graph = CommitGraph::new();
        graph.commit("A", &[], &[("f", "a")]);
        graph.commit("B", &["A"], &[("f", "b")]);
        graph.commit("C", &["B"], &[("f", "c")]);
        graph.commit("D", &["C"], &[("f", "d")]);
        graph
    }

    #[rstest]
    #[case("A", "A", "A")]
    #[case("D", "D", "D")]
    #[case("B", "D", "B")]
    #[case("D", "B", "B")]
    #[case("C", "A", "A")]
    fn linear_history(
        linear: CommitGraph,
        #[case] ours: &str,
        #[case] theirs: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(merge_base(&linear, ours, theirs), Some(expected));
    }

    #[rstest]
    fn absent_side_has_no_merge_base(linear: CommitGraph) {
        let finder = MergeBaseFinder::new(|commit_id| linear.database.get_commit(commit_id));

        assert!(finder.find_merge_base(None, Some(linear.id("A"))).is_none());
        assert!(finder.find_merge_base(Some(linear.id("A")), None).is_none());
        assert!(finder.find_merge_base(None, None).is_none());
    }

    #[rstest]
    fn simple_fork() {
        //     A
        //    / \
        //   B   C
        //   |
        //   D
        let mut graph = CommitGraph::new();
        graph.commit("A", &[], &[("f", "a")]);
        graph.commit("B", &["A"], &[("f", "b")]);
        graph.commit("C", &["A"], &[("f", "c")]);
        graph.commit("D", &["B"], &[("f", "d")]);

        assert_eq!(merge_base(&graph, "D", "C"), Some("A"));
        assert_eq!(merge_base(&graph, "C", "D"), Some("A"));
    }

    #[rstest]
    fn after_previous_merge_the_merged_head_is_the_base() {
        //   A
        //  / \
        // B   C
        //  \ / \
        //   M   E
        let mut graph = CommitGraph::new();
        graph.commit("A", &[], &[("f", "a")]);
        graph.commit("B", &["A"], &[("f", "b")]);
        graph.commit("C", &["A"], &[("f", "c")]);
        graph.commit("M", &["B", "C"], &[("f", "m")]);
        graph.commit("E", &["C"], &[("f", "e")]);

        assert_eq!(merge_base(&graph, "M", "E"), Some("C"));
    }

    #[rstest]
    fn unrelated_roots_have_no_merge_base() {
        let mut graph = CommitGraph::new();
        graph.commit("A", &[], &[("f", "a")]);
        graph.commit("B", &["A"], &[("f", "b")]);
        graph.commit("X", &[], &[("g", "x")]);
        graph.commit("Y", &["X"], &[("g", "y")]);

        assert_eq!(merge_base(&graph, "B", "Y"), None);
    }

    #[rstest]
    fn criss_cross_returns_first_encountered_ancestor() {
        //     A
        //    / \
        //   B   C
        //   |\ /|
        //   | X |
        //   |/ \|
        //   M1  M2
        //
        // M1 = merge(B, C), M2 = merge(C, B). B and C are both lowest common
        // ancestors; the walk from M2 meets its first parent C first.
        let mut graph = CommitGraph::new();
        graph.commit("A", &[], &[("f", "a")]);
        graph.commit("B", &["A"], &[("f", "b")]);
        graph.commit("C", &["A"], &[("f", "c")]);
        graph.commit("M1", &["B", "C"], &[("f", "m1")]);
        graph.commit("M2", &["C", "B"], &[("f", "m2")]);

        assert_eq!(merge_base(&graph, "M1", "M2"), Some("C"));
        assert_eq!(merge_base(&graph, "M2", "M1"), Some("B"));
    }
}

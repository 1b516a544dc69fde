use log::debug;
use rustc_hash::FxHashSet;
use tokn_utilities::debug_trace;

use crate::CODEMAX;
use crate::CODEMIN;
use crate::CodeSet;
use crate::EPSILON;

/// A node of the partition tree. The sets of the children are pairwise
/// disjoint and their union is the set of the node.
#[derive(Debug)]
struct Node {
    set: CodeSet,
    children: Vec<usize>,
}

/// Transforms a collection of possibly overlapping code sets into a
/// refinement whose members are pairwise disjoint.
///
/// The subset construction has to find out which states are reachable on
/// every code, which can not be done code by code for an alphabet as large as
/// Unicode. Instead every edge label is replaced by the pieces of the
/// partition it covers, after which any two labels are either equal or
/// disjoint and moves can be grouped by label.
///
/// The partition is a tree whose root holds every representable code. Adding
/// a set performs a depth first search that splits every leaf the set only
/// partially covers, so the running time is linear in the number of sets
/// times the height of the tree.
#[derive(Debug)]
pub struct RangePartition {
    /// The tree is stored as an arena, the root is the first node.
    nodes: Vec<Node>,
    sets_to_add: Vec<CodeSet>,
    registered: FxHashSet<CodeSet>,
    prepared: bool,
}

impl RangePartition {
    /// Creates a partition that covers `[CODEMIN, CODEMAX)`, in which the
    /// epsilon label always ends up in its own leaf.
    pub fn new() -> Self {
        let mut partition = Self {
            nodes: vec![Node {
                set: CodeSet::with_range(CODEMIN, CODEMAX),
                children: Vec::new(),
            }],
            sets_to_add: Vec::new(),
            registered: FxHashSet::default(),
            prepared: false,
        };

        partition.add_set(CodeSet::with_value(EPSILON));
        partition
    }

    /// Registers a set whose boundaries should align with the leaves of the
    /// partition. Sets that were already registered are ignored.
    pub fn add_set(&mut self, set: CodeSet) {
        assert!(!self.prepared, "Sets can not be added after the partition was prepared");
        assert!(
            set.is_subset(&self.nodes[0].set),
            "Set {set} is outside of the representable codes"
        );

        if !set.is_empty() && self.registered.insert(set.clone()) {
            self.sets_to_add.push(set);
        }
    }

    /// Builds the partition from the registered sets, can only be called once.
    pub fn prepare(&mut self) {
        assert!(!self.prepared, "The partition was already prepared");

        // Adding the largest sets first tends to produce a shallower tree.
        let mut sets = std::mem::take(&mut self.sets_to_add);
        self.registered.clear();
        sets.sort_by_key(|set| std::cmp::Reverse(set.num_of_codes()));

        for set in &sets {
            self.add_set_aux(set, 0);
        }

        self.prepared = true;
        debug!(
            "Partitioned {} sets into a tree of {} nodes",
            sets.len(),
            self.nodes.len()
        );
    }

    /// Returns the pieces of the partition whose union equals the given set,
    /// ordered by their smallest code. Every piece is a contiguous range of a
    /// leaf, so pieces obtained for different sets are equal or disjoint.
    ///
    /// The set must be a union of leaves, which holds for every registered
    /// set and every union of registered sets.
    pub fn apply(&self, set: &CodeSet) -> Vec<CodeSet> {
        assert!(self.prepared, "The partition must be prepared before it is applied");
        assert!(
            set.is_subset(&self.nodes[0].set),
            "Set {set} is outside of the representable codes"
        );

        let mut result = Vec::new();
        self.apply_aux(0, set.clone(), &mut result);

        result.sort_by_key(|piece| piece.min());
        result
    }

    /// Returns the number of leaves in the partition.
    pub fn num_of_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.children.is_empty()).count()
    }

    fn apply_aux(&self, node_index: usize, mut set: CodeSet, result: &mut Vec<CodeSet>) {
        let node = &self.nodes[node_index];

        if node.children.is_empty() {
            assert_eq!(
                set, node.set,
                "Set is not a union of partition leaves, it was probably never registered"
            );
            result.extend(set.ranges().map(|(lower, upper)| CodeSet::with_range(lower, upper)));
            return;
        }

        for &child in &node.children {
            let child_set = &self.nodes[child].set;
            let piece = set.intersect(child_set);
            if piece.is_empty() {
                continue;
            }

            self.apply_aux(child, piece, result);
            set = set.difference(child_set);
            if set.is_empty() {
                break;
            }
        }

        assert!(set.is_empty(), "Codes {set} are not covered by the children of a partition node");
    }

    /// Adds the set to the subtree at the given node, the set must be a
    /// subset of the node's set.
    fn add_set_aux(&mut self, set: &CodeSet, node_index: usize) {
        if self.nodes[node_index].set == *set {
            return;
        }

        if self.nodes[node_index].children.is_empty() {
            let remainder = self.nodes[node_index].set.difference(set);
            debug_trace!("Splitting {} into {} and {}", self.nodes[node_index].set, remainder, set);

            let left = self.add_node(remainder);
            let right = self.add_node(set.clone());
            self.nodes[node_index].children = vec![left, right];
        } else {
            for child in self.nodes[node_index].children.clone() {
                let overlap = self.nodes[child].set.intersect(set);
                if !overlap.is_empty() {
                    self.add_set_aux(&overlap, child);
                }
            }
        }
    }

    fn add_node(&mut self, set: CodeSet) -> usize {
        self.nodes.push(Node {
            set,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }
}

impl Default for RangePartition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use test_log::test;

    use tokn_utilities::random_test;

    fn union_of(pieces: &[CodeSet]) -> CodeSet {
        pieces.iter().fold(CodeSet::new(), |acc, piece| acc.union(piece))
    }

    #[test]
    fn test_partition_nested_ranges() {
        let mut partition = RangePartition::new();
        partition.add_set(CodeSet::with_range(0, 256));
        partition.add_set(CodeSet::with_range(65, 91));
        partition.prepare();

        assert_eq!(
            partition.apply(&CodeSet::with_range(65, 91)),
            vec![CodeSet::with_range(65, 91)]
        );
        assert_eq!(
            partition.apply(&CodeSet::with_range(0, 256)),
            vec![
                CodeSet::with_range(0, 65),
                CodeSet::with_range(65, 91),
                CodeSet::with_range(91, 256)
            ]
        );
    }

    #[test]
    fn test_partition_isolates_epsilon() {
        let mut partition = RangePartition::new();
        partition.add_set(CodeSet::from_elements(vec![EPSILON, 10]));
        partition.prepare();

        assert_eq!(
            partition.apply(&CodeSet::from_elements(vec![EPSILON, 10])),
            vec![CodeSet::with_value(EPSILON), CodeSet::with_range(0, 10)]
        );
    }

    #[test]
    #[should_panic]
    fn test_apply_unregistered_set() {
        let mut partition = RangePartition::new();
        partition.add_set(CodeSet::with_range(0, 10));
        partition.prepare();

        partition.apply(&CodeSet::with_range(0, 5));
    }

    #[test]
    #[should_panic(expected = "outside of the representable codes")]
    fn test_apply_beyond_codemax() {
        let mut partition = RangePartition::new();
        partition.add_set(CodeSet::with_range(0, 10));
        partition.prepare();

        partition.apply(&CodeSet::from_elements(vec![0, 10, CODEMAX, CODEMAX + 5]));
    }

    #[test]
    fn test_duplicate_sets_are_registered_once() {
        let mut partition = RangePartition::new();
        partition.add_set(CodeSet::with_range(0, 10));
        partition.add_set(CodeSet::with_range(0, 10));
        partition.add_set(CodeSet::new());
        partition.prepare();

        // The root splits into [0, 10) and the rest, the rest into epsilon and its remainder.
        assert_eq!(partition.num_of_leaves(), 3);
        assert_eq!(partition.apply(&CodeSet::with_range(0, 10)), vec![CodeSet::with_range(0, 10)]);
    }

    #[test]
    #[should_panic]
    fn test_add_after_prepare() {
        let mut partition = RangePartition::new();
        partition.prepare();
        partition.add_set(CodeSet::with_range(0, 10));
    }

    #[test]
    fn test_random_partition() {
        random_test(100, |rng| {
            let mut sets = Vec::new();
            for _ in 0..rng.random_range(1..8) {
                let mut set = CodeSet::new();
                for _ in 0..rng.random_range(1..4) {
                    let lower = rng.random_range(0..99);
                    set.add(lower, rng.random_range(lower + 1..100));
                }
                sets.push(set);
            }

            let mut partition = RangePartition::new();
            for set in &sets {
                partition.add_set(set.clone());
            }
            partition.prepare();

            let mut all_pieces: Vec<CodeSet> = Vec::new();
            for set in &sets {
                let pieces = partition.apply(set);
                assert_eq!(&union_of(&pieces), set, "The pieces should cover exactly the set");
                all_pieces.extend(pieces);
            }

            // Pieces obtained from different inputs are either equal or disjoint.
            for a in &all_pieces {
                for b in &all_pieces {
                    assert!(a == b || a.is_disjoint(b), "{a} and {b} overlap");
                }
            }

            // A union of registered sets is also a union of leaves.
            let combined = union_of(&sets);
            assert_eq!(union_of(&partition.apply(&combined)), combined);
        });
    }
}

use std::fmt;

/// The edge label of epsilon transitions.
pub const EPSILON: i32 = -1;

/// One plus the maximum code that can be represented, which is one past the
/// largest Unicode scalar value.
pub const CODEMAX: i32 = 0x110000;

/// The minimum code that can be represented. The codes between `CODEMIN` and
/// [`EPSILON`] are reserved for token identifiers.
pub const CODEMIN: i32 = -10000;

/// A set of integer codes, stored as a sorted array of boundaries
/// `[start_0, end_0, start_1, end_1, ...]` where every pair denotes the half
/// open range `[start, end)`.
///
/// The array is always canonical: it has even length and is strictly
/// increasing, so ranges never overlap, touch or have zero width. Membership
/// of a code follows from the parity of the number of boundaries that are
/// smaller than or equal to it, which is what all the operations below exploit.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeSet {
    elements: Vec<i32>,
}

impl CodeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the set containing only the given value.
    pub fn with_value(value: i32) -> Self {
        Self::with_range(value, value + 1)
    }

    /// Creates the set containing the range `[lower, upper)`.
    pub fn with_range(lower: i32, upper: i32) -> Self {
        assert!(lower < upper, "Range [{lower}, {upper}) is empty");
        Self {
            elements: vec![lower, upper],
        }
    }

    /// Creates a set from an array of boundaries, which must be canonical.
    pub fn from_elements(elements: Vec<i32>) -> Self {
        assert!(
            is_canonical(&elements),
            "Boundaries {elements:?} must have even length and be strictly increasing"
        );
        Self { elements }
    }

    /// Returns the boundary array.
    pub fn elements(&self) -> &[i32] {
        &self.elements
    }

    /// Returns the half open ranges `[lower, upper)` of this set in increasing order.
    pub fn ranges(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.elements.chunks_exact(2).map(|range| (range[0], range[1]))
    }

    /// Returns true iff the set contains no codes.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of codes in the set.
    pub fn num_of_codes(&self) -> u64 {
        self.ranges().map(|(lower, upper)| (upper as i64 - lower as i64) as u64).sum()
    }

    /// Returns the smallest code in the set.
    pub fn min(&self) -> Option<i32> {
        self.elements.first().copied()
    }

    /// Returns the value of a set containing exactly one code.
    pub fn single_value(&self) -> Option<i32> {
        match self.elements[..] {
            [lower, upper] if upper == lower + 1 => Some(lower),
            _ => None,
        }
    }

    /// Returns true iff the given code is in the set.
    pub fn contains(&self, value: i32) -> bool {
        self.elements.partition_point(|&boundary| boundary <= value) % 2 == 1
    }

    /// Adds a single code to the set.
    pub fn add_value(&mut self, value: i32) {
        self.add(value, value + 1);
    }

    /// Adds the range `[lower, upper)` to the set.
    pub fn add(&mut self, lower: i32, upper: i32) {
        assert!(lower < upper, "Range [{lower}, {upper}) is empty");
        let old = &self.elements;
        let mut elements = Vec::with_capacity(old.len() + 2);

        let mut i = 0;
        while i < old.len() && old[i] < lower {
            elements.push(old[i]);
            i += 1;
        }

        // At an even position lower starts a new range, otherwise it falls
        // inside (or touches the end of) the range that is being copied.
        if i % 2 == 0 {
            elements.push(lower);
        }

        while i < old.len() && old[i] <= upper {
            i += 1;
        }

        if i % 2 == 0 {
            elements.push(upper);
        }

        elements.extend_from_slice(&old[i..]);
        self.set_elements(elements);
    }

    /// Removes the range `[lower, upper)` from the set.
    pub fn remove(&mut self, lower: i32, upper: i32) {
        assert!(lower < upper, "Range [{lower}, {upper}) is empty");
        let old = &self.elements;
        let mut elements = Vec::with_capacity(old.len() + 2);

        let mut i = 0;
        while i < old.len() && old[i] < lower {
            elements.push(old[i]);
            i += 1;
        }

        // At an odd position lower cuts the range that is being copied.
        if i % 2 == 1 {
            elements.push(lower);
        }

        while i < old.len() && old[i] <= upper {
            i += 1;
        }

        if i % 2 == 1 {
            elements.push(upper);
        }

        elements.extend_from_slice(&old[i..]);
        self.set_elements(elements);
    }

    /// Adds every code of the other set to this one.
    pub fn add_set(&mut self, other: &CodeSet) {
        for (lower, upper) in other.ranges() {
            self.add(lower, upper);
        }
    }

    /// Returns the union of this set and the other.
    pub fn union(&self, other: &CodeSet) -> CodeSet {
        self.combine_with(other, |a, b| a || b)
    }

    /// Returns the intersection of this set and the other.
    pub fn intersect(&self, other: &CodeSet) -> CodeSet {
        self.combine_with(other, |a, b| a && b)
    }

    /// Returns the codes of this set that are not in the other.
    pub fn difference(&self, other: &CodeSet) -> CodeSet {
        self.combine_with(other, |a, b| a && !b)
    }

    /// Returns this set with the membership of every code in `[lower, upper)`
    /// flipped. Codes outside of the range are unaffected.
    pub fn negate(&self, lower: i32, upper: i32) -> CodeSet {
        self.combine_with(&CodeSet::with_range(lower, upper), |a, b| a != b)
    }

    /// Returns true iff every code of this set is in the other.
    pub fn is_subset(&self, other: &CodeSet) -> bool {
        self.difference(other).is_empty()
    }

    /// Returns true iff this set and the other have no code in common.
    pub fn is_disjoint(&self, other: &CodeSet) -> bool {
        self.intersect(other).is_empty()
    }

    /// Merges the boundaries of both sets in a single pass. After consuming
    /// all boundaries equal to the current value, the parity of the number of
    /// consumed boundaries tells whether the value is inside each operand, and
    /// a boundary is emitted whenever `inside` of the combination flips.
    fn combine_with(&self, other: &CodeSet, inside: impl Fn(bool, bool) -> bool) -> CodeSet {
        let (a, b) = (&self.elements, &other.elements);
        let mut elements = Vec::with_capacity(a.len() + b.len());

        let (mut i, mut j) = (0, 0);
        let mut was_inside = false;
        while i < a.len() || j < b.len() {
            let value = a
                .get(i)
                .into_iter()
                .chain(b.get(j))
                .copied()
                .min()
                .expect("At least one of the boundary arrays is not exhausted");

            if a.get(i) == Some(&value) {
                i += 1;
            }
            if b.get(j) == Some(&value) {
                j += 1;
            }

            let is_inside = inside(i % 2 == 1, j % 2 == 1);
            if is_inside != was_inside {
                elements.push(value);
                was_inside = is_inside;
            }
        }

        CodeSet::from_elements(elements)
    }

    fn set_elements(&mut self, elements: Vec<i32>) {
        debug_assert!(is_canonical(&elements), "Boundaries {elements:?} are not canonical");
        self.elements = elements;
    }
}

/// Returns true iff the boundaries have even length and are strictly increasing.
fn is_canonical(elements: &[i32]) -> bool {
    elements.len() % 2 == 0 && elements.windows(2).all(|pair| pair[0] < pair[1])
}

/// Prints a single code of a set in a readable way.
fn fmt_code(f: &mut fmt::Formatter<'_>, code: i32) -> fmt::Result {
    const FORBIDDEN: &str = "'\"\\[]{}()";

    if code == EPSILON {
        return write!(f, "(e)");
    }

    // Only print non-confusing printable ASCII as characters.
    if let Some(c) = char::from_u32(code as u32).filter(|c| code > 0x20 && code < 0x7f && !FORBIDDEN.contains(*c)) {
        return write!(f, "'{c}'");
    }

    if code == CODEMAX - 1 {
        return write!(f, "MAX");
    }

    write!(f, "{code}")
}

impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        for (index, (lower, upper)) in self.ranges().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }

            fmt_code(f, lower)?;
            if upper != lower + 1 {
                write!(f, "..")?;
                fmt_code(f, upper - 1)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{self}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use test_log::test;

    use tokn_utilities::random_test;

    /// Generates a random set within [0, 40) by a sequence of additions and removals.
    fn random_code_set(rng: &mut impl Rng) -> CodeSet {
        let mut set = CodeSet::new();
        for _ in 0..rng.random_range(0..5) {
            let lower = rng.random_range(0..39);
            let upper = rng.random_range(lower + 1..40);
            if rng.random_bool(0.8) {
                set.add(lower, upper);
            } else {
                set.remove(lower, upper);
            }
        }
        set
    }

    fn members(set: &CodeSet) -> Vec<i32> {
        (-2..42).filter(|&code| set.contains(code)).collect()
    }

    #[test]
    fn test_remove_splits_range() {
        let mut set = CodeSet::new();
        set.add(10, 20);
        set.remove(12, 15);

        assert_eq!(set.elements(), &[10, 12, 15, 20]);
    }

    #[test]
    fn test_add_merges_touching_ranges() {
        let mut set = CodeSet::with_range(10, 20);

        set.add(5, 10);
        assert_eq!(set.elements(), &[5, 20]);

        set.add(20, 30);
        assert_eq!(set.elements(), &[5, 30]);

        set.add(40, 50);
        set.add(30, 40);
        assert_eq!(set.elements(), &[5, 50]);
    }

    #[test]
    fn test_remove_edges_of_range() {
        let mut set = CodeSet::with_range(10, 20);

        set.remove(10, 12);
        assert_eq!(set.elements(), &[12, 20]);

        set.remove(18, 25);
        assert_eq!(set.elements(), &[12, 18]);

        set.remove(0, 100);
        assert!(set.is_empty());
    }

    #[test]
    fn test_negate_within_bound() {
        let set = CodeSet::from_elements(vec![5, 10, 20, 30]);

        let negated = set.negate(0, 25);
        assert_eq!(negated.elements(), &[0, 5, 10, 20, 25, 30]);
        assert_eq!(negated.negate(0, 25), set);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(CodeSet::with_value(EPSILON).single_value(), Some(EPSILON));
        assert_eq!(CodeSet::with_range(3, 5).single_value(), None);
        assert_eq!(CodeSet::new().single_value(), None);
    }

    #[test]
    fn test_contains_boundaries() {
        let set = CodeSet::from_elements(vec![10, 20, 30, 31]);

        assert!(!set.contains(9));
        assert!(set.contains(10));
        assert!(set.contains(19));
        assert!(!set.contains(20));
        assert!(set.contains(30));
        assert!(!set.contains(31));
        assert_eq!(set.num_of_codes(), 11);
    }

    #[test]
    fn test_display() {
        let mut set = CodeSet::with_value(EPSILON);
        set.add('a' as i32, 'z' as i32 + 1);
        set.add_value('(' as i32);
        set.add(CODEMAX - 2, CODEMAX);

        assert_eq!(set.to_string(), "(e) 40 'a'..'z' 1114110..MAX");
    }

    #[test]
    #[should_panic]
    fn test_odd_boundaries_rejected() {
        let _ = CodeSet::from_elements(vec![1, 2, 3]);
    }

    #[test]
    fn test_random_add_remove_against_array() {
        random_test(3000, |rng| {
            let mut set = CodeSet::new();
            let mut expected = [false; 40];

            for _ in 0..rng.random_range(1..10) {
                let lower = rng.random_range(0..39);
                let upper = rng.random_range(lower + 1..=40);
                let include = rng.random_bool(0.6);
                if include {
                    set.add(lower, upper);
                } else {
                    set.remove(lower, upper);
                }
                expected[lower as usize..upper as usize].fill(include);

                assert!(is_canonical(set.elements()), "Boundaries {:?} are not canonical", set.elements());
                for (code, &member) in expected.iter().enumerate() {
                    assert_eq!(set.contains(code as i32), member, "Code {code} in {set}");
                }
            }
        });
    }

    #[test]
    fn test_random_set_operations() {
        random_test(500, |rng| {
            let a = random_code_set(rng);
            let b = random_code_set(rng);

            for code in -2..42 {
                assert_eq!(a.union(&b).contains(code), a.contains(code) || b.contains(code));
                assert_eq!(a.intersect(&b).contains(code), a.contains(code) && b.contains(code));
                assert_eq!(a.difference(&b).contains(code), a.contains(code) && !b.contains(code));
            }

            let mut added = a.clone();
            added.add_set(&b);
            assert_eq!(added, a.union(&b), "add_set and union should agree");
        });
    }

    #[test]
    fn test_random_algebra_laws() {
        random_test(500, |rng| {
            let a = random_code_set(rng);
            let b = random_code_set(rng);

            assert_eq!(a.union(&b).intersect(&a), a);
            assert!(a.difference(&a).is_empty());
            assert_eq!(a.intersect(&b), b.intersect(&a));
            assert_eq!(a.negate(-1, 41).negate(-1, 41), a);
            assert_eq!(
                members(&a.negate(-1, 41)),
                (-1..41).filter(|&code| !a.contains(code)).collect::<Vec<_>>()
            );

            for set in [a.union(&b), a.intersect(&b), a.difference(&b), a.negate(0, 40)] {
                assert!(is_canonical(set.elements()), "{:?} is not canonical", set.elements());
            }
        });
    }
}

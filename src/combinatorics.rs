//! Enumeration primitives for the orbit engine: permutations that fix the
//! reference node, connection masks for one-node extensions, proper subsets
//! used as required-adjacency sets, and a disjoint-set structure for
//! consolidating orbit-merge hints.
//!
//! # Examples
//!
//! All required-adjacency subsets of a 3-node graphlet:
//!
//! ```rust
//! use orbitgen::combinatorics::SubsetIterator;
//!
//! let mut s = SubsetIterator::new(3);
//! let mut subsets = vec![];
//! while let Some(c) = s.next() {
//!     subsets.push(c.to_vec());
//! }
//!
//! let ans: Vec<Vec<usize>> = vec![
//!     vec![0], vec![1], vec![0, 1], vec![2], vec![0, 2], vec![1, 2],
//! ];
//!
//! assert_eq!(subsets, ans);
//! ```

use smallvec::{smallvec, SmallVec};

/// Generate every permutation of the node indices `0..order` that maps the
/// reference node 0 to itself.
///
/// Permutations are built by iterative insertion: each next value is placed
/// at every position of every permutation built so far. The resulting order
/// is deterministic but carries no meaning.
pub fn permutations_fixing_zero(order: usize) -> Vec<Vec<usize>> {
    assert!(order >= 2, "a graphlet has at least 2 nodes, got order {}", order);

    // permutations of 0..order-1, grown one value at a time
    let mut perms: Vec<Vec<usize>> = vec![vec![0]];
    for value in 1..order - 1 {
        let mut next = Vec::with_capacity(perms.len() * (value + 1));
        for p in &perms {
            for pos in 0..=p.len() {
                let mut q = Vec::with_capacity(p.len() + 1);
                q.extend_from_slice(&p[..pos]);
                q.push(value);
                q.extend_from_slice(&p[pos..]);
                next.push(q);
            }
        }
        perms = next;
    }

    // shift to the range 1..order and pin node 0 in front
    for p in &mut perms {
        for v in p.iter_mut() {
            *v += 1;
        }
        p.insert(0, 0);
    }

    perms
}

/// An iterator over the adjacency masks of a node added to a graphlet of the
/// given order: every mask that contains the `required` indices, one per
/// combination of the free indices.
///
/// When `required` is empty, the all-false mask is skipped so that the new
/// node always gains at least one edge.
pub struct ConnectionMaskIterator {
    order: usize,
    required: SmallVec<[usize; 8]>,
    counter: usize,
    end: usize,
    mask: SmallVec<[bool; 8]>,
}

impl ConnectionMaskIterator {
    /// Creates an iterator over the `2^(order - required.len())` masks of
    /// length `order` that include every index in `required`.
    ///
    /// `required` must be sorted, duplicate-free and within `0..order`.
    pub fn new(order: usize, required: &[usize]) -> ConnectionMaskIterator {
        debug_assert!(required.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(required.iter().all(|&r| r < order));

        ConnectionMaskIterator {
            order,
            required: required.into(),
            counter: if required.is_empty() { 1 } else { 0 },
            end: 1 << (order - required.len()),
            mask: smallvec![false; order],
        }
    }

    /// Advances the iterator and returns the next adjacency mask.
    pub fn next(&mut self) -> Option<&[bool]> {
        if self.counter >= self.end {
            return None;
        }

        let mut bits = self.counter;
        let mut next_required = 0;
        for j in 0..self.order {
            if next_required < self.required.len() && self.required[next_required] == j {
                self.mask[j] = true;
                next_required += 1;
            } else {
                self.mask[j] = bits % 2 == 1;
                bits /= 2;
            }
        }

        self.counter += 1;
        Some(&self.mask)
    }
}

/// An iterator over every nonempty proper subset of `0..n`, in binary
/// counting order. The empty set and the full set are excluded.
pub struct SubsetIterator {
    n: usize,
    counter: usize,
    end: usize,
    subset: SmallVec<[usize; 8]>,
}

impl SubsetIterator {
    pub fn new(n: usize) -> SubsetIterator {
        SubsetIterator {
            n,
            counter: 1,
            end: (1usize << n).saturating_sub(1),
            subset: SmallVec::new(),
        }
    }

    /// Advances the iterator and returns the next subset, ascending members.
    pub fn next(&mut self) -> Option<&[usize]> {
        if self.counter >= self.end {
            return None;
        }

        self.subset.clear();
        let mut bits = self.counter;
        for j in 0..self.n {
            if bits % 2 == 1 {
                self.subset.push(j);
            }
            bits /= 2;
        }

        self.counter += 1;
        Some(&self.subset)
    }
}

/// A disjoint-set (union-find) structure over the integers `0..n`, used to
/// consolidate the orbit-merge hints produced by automorphisms into maximal
/// disjoint node groups.
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> DisjointSet {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the representative of the set containing `x`, halving the
    /// path along the way.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets containing `a` and `b`. Returns `true` if they were
    /// distinct.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    /// Returns the sets as a partition of `0..n`: groups ordered by their
    /// smallest member, members ascending.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut by_root: Vec<Vec<usize>> = vec![vec![]; n];
        for x in 0..n {
            let root = self.find(x);
            by_root[root].push(x);
        }

        let mut groups: Vec<_> = by_root.into_iter().filter(|g| !g.is_empty()).collect();
        groups.sort_by_key(|g| g[0]);
        groups
    }
}

#[cfg(test)]
mod test {
    use super::{permutations_fixing_zero, ConnectionMaskIterator, DisjointSet, SubsetIterator};

    #[test]
    fn permutations() {
        let perms = permutations_fixing_zero(4);
        assert_eq!(perms.len(), 6); // (4-1)!

        for p in &perms {
            assert_eq!(p[0], 0);
            let mut sorted = p.clone();
            sorted.sort();
            assert_eq!(sorted, vec![0, 1, 2, 3]);
        }

        // all distinct
        for (i, p) in perms.iter().enumerate() {
            assert!(!perms[i + 1..].contains(p));
        }

        assert_eq!(permutations_fixing_zero(2), vec![vec![0, 1]]);
    }

    #[test]
    fn masks_without_requirement() {
        let mut it = ConnectionMaskIterator::new(3, &[]);
        let mut masks = vec![];
        while let Some(m) = it.next() {
            masks.push(m.to_vec());
        }

        // the empty mask is skipped
        assert_eq!(masks.len(), 7);
        assert!(masks.iter().all(|m| m.iter().any(|&b| b)));
    }

    #[test]
    fn masks_with_requirement() {
        let mut it = ConnectionMaskIterator::new(4, &[1, 3]);
        let mut count = 0;
        while let Some(m) = it.next() {
            assert!(m[1] && m[3]);
            count += 1;
        }
        assert_eq!(count, 4); // 2^(4-2)
    }

    #[test]
    fn subsets() {
        let mut it = SubsetIterator::new(4);
        let mut subsets = vec![];
        while let Some(c) = it.next() {
            subsets.push(c.to_vec());
        }

        assert_eq!(subsets.len(), 14); // 2^4 - 2
        assert!(!subsets.contains(&vec![]));
        assert!(!subsets.contains(&vec![0, 1, 2, 3]));

        // degenerate: no proper nonempty subsets of a single node
        let mut it = SubsetIterator::new(1);
        assert!(it.next().is_none());
    }

    #[test]
    fn disjoint_set() {
        let mut ds = DisjointSet::new(5);
        ds.union(0, 2);
        ds.union(3, 4);
        ds.union(2, 3);

        assert_eq!(ds.find(0), ds.find(4));
        assert_ne!(ds.find(0), ds.find(1));
        assert_eq!(ds.groups(), vec![vec![0, 2, 3, 4], vec![1]]);
    }

    #[test]
    fn disjoint_set_reflexive_union() {
        let mut ds = DisjointSet::new(3);
        assert!(!ds.union(1, 1));
        assert_eq!(ds.groups(), vec![vec![0], vec![1], vec![2]]);
    }
}

//! Graphlets and their automorphism-orbit structure.
//!
//! An [OrbitRepresentative] is a small graph over the node indices
//! `0..order` in which node 0 is a distinguished reference node: it stands
//! for the node whose relation to a growing graphlet is being tracked and is
//! never relabeled. [OrbitRepresentative::calculate_symmetry] enumerates all
//! relabelings that fix node 0, records every edge-set image for isomorphism
//! testing, and partitions the nodes into orbits under the automorphisms.

use ahash::HashSet;

use crate::{
    catalog::OrbitCatalog,
    combinatorics::{permutations_fixing_zero, ConnectionMaskIterator, DisjointSet},
};

/// An unordered pair of distinct node indices. The endpoints are normalized
/// so that the smaller one comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(usize, usize);

impl Edge {
    pub fn new(u: usize, v: usize) -> Edge {
        assert!(u != v, "self-loop edge {}-{}", u, v);
        if u < v {
            Edge(u, v)
        } else {
            Edge(v, u)
        }
    }

    /// The endpoints, smaller index first.
    #[inline(always)]
    pub fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }
}

/// Automorphism data of a graphlet, computed by
/// [OrbitRepresentative::calculate_symmetry].
#[derive(Clone, Debug)]
pub struct Symmetry {
    /// Every edge-set image under a relabeling that fixes node 0, each as a
    /// sorted edge list. Contains the identity image, so a graphlet's own
    /// edge set is always a member.
    images: HashSet<Vec<Edge>>,
    /// The orbit partition of `0..order`: groups ordered by their smallest
    /// member, members ascending. Node 0 is never merged with another node.
    orbits: Vec<Vec<usize>>,
}

impl Symmetry {
    /// The orbit partition of the graphlet's nodes.
    pub fn orbits(&self) -> &[Vec<usize>] {
        &self.orbits
    }
}

/// A graphlet standing for one automorphism orbit of its reference node.
#[derive(Clone, Debug)]
pub struct OrbitRepresentative {
    order: usize,
    edges: Vec<Edge>,
    symmetry: Option<Symmetry>,
}

impl Default for OrbitRepresentative {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitRepresentative {
    /// Creates the degenerate 2-node graphlet with a single edge, the root
    /// of all one-node extensions.
    pub fn new() -> OrbitRepresentative {
        OrbitRepresentative {
            order: 2,
            edges: vec![Edge::new(0, 1)],
            symmetry: None,
        }
    }

    /// Creates a graphlet from an edge collection and its order. Duplicate
    /// edges are collapsed; endpoints must lie in `0..order`.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>, order: usize) -> OrbitRepresentative {
        let mut edges: Vec<_> = edges.into_iter().collect();
        edges.sort();
        edges.dedup();

        assert!(
            edges.iter().all(|e| e.endpoints().1 < order),
            "edge endpoint out of range for order {}",
            order
        );

        OrbitRepresentative {
            order,
            edges,
            symmetry: None,
        }
    }

    /// The number of nodes.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The edges, sorted.
    #[inline(always)]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether the pair `(u, v)` is an edge.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edges.binary_search(&Edge::new(u, v)).is_ok()
    }

    /// The automorphism data.
    ///
    /// Panics if [Self::calculate_symmetry] has not run since the last
    /// mutation; querying stale symmetry data is a contract violation.
    pub fn symmetry(&self) -> &Symmetry {
        self.symmetry
            .as_ref()
            .expect("symmetry data not computed; call calculate_symmetry first")
    }

    /// Rewrites an edge list under a node relabeling, returning it sorted.
    fn permute(edges: &[Edge], mapping: &[usize]) -> Vec<Edge> {
        let mut result: Vec<_> = edges
            .iter()
            .map(|e| {
                let (u, v) = e.endpoints();
                Edge::new(mapping[u], mapping[v])
            })
            .collect();
        result.sort();
        result
    }

    /// Computes the edge-set images under all relabelings fixing node 0 and
    /// the orbit partition under those relabelings that preserve the edge
    /// set. Idempotent; a second call on an unmodified graphlet is a no-op.
    ///
    /// Brute force over all `(order - 1)!` relabelings, acceptable because
    /// graphlets of interest have few nodes.
    pub fn calculate_symmetry(&mut self) {
        if self.symmetry.is_some() {
            return;
        }

        let mut images = HashSet::default();
        let mut merges = DisjointSet::new(self.order);

        for permutation in permutations_fixing_zero(self.order) {
            let image = Self::permute(&self.edges, &permutation);
            if image == self.edges {
                // an automorphism: every node shares an orbit with its image
                for (i, &p) in permutation.iter().enumerate() {
                    merges.union(i, p);
                }
            }
            images.insert(image);
        }

        self.symmetry = Some(Symmetry {
            images,
            orbits: merges.groups(),
        });
    }

    /// The size of the orbit containing `node`.
    ///
    /// Panics if `node` is out of range or symmetry data is missing; the
    /// orbit partition covers every node, so a miss is a programmer error.
    pub fn orbit_size(&self, node: usize) -> usize {
        self.symmetry()
            .orbits
            .iter()
            .find(|group| group.contains(&node))
            .unwrap_or_else(|| panic!("node {} not covered by the orbit partition", node))
            .len()
    }

    /// Returns `true` iff `other` is isomorphic to this graphlet under a
    /// relabeling that fixes node 0.
    ///
    /// Requires this graphlet's symmetry data; `other`'s is not consulted.
    pub fn is_isomorphic(&self, other: &Self) -> bool {
        if self.order != other.order || self.edges.len() != other.edges.len() {
            return false;
        }

        if self.edges == other.edges {
            return true;
        }

        self.symmetry().images.contains(&other.edges)
    }

    /// Adds node `order` connected to every index whose mask entry is true,
    /// then increments the order. Invalidates symmetry data.
    pub fn add_node(&mut self, connected: &[bool]) {
        assert!(
            connected.len() == self.order,
            "connection mask length {} does not match order {}",
            connected.len(),
            self.order
        );

        for (i, &c) in connected.iter().enumerate() {
            if c {
                self.edges.push(Edge::new(i, self.order));
            }
        }
        self.edges.sort();
        self.order += 1;
        self.symmetry = None;
    }

    /// Generates every one-node extension whose new node is connected to at
    /// least the nodes in `required`, deduplicated by isomorphism, each with
    /// symmetry computed. When `required` is empty, the new node still gains
    /// at least one edge.
    ///
    /// The result order follows the mask enumeration; use
    /// [Self::generate_next] for canonical ordering against a catalog.
    pub fn extensions(&self, required: &[usize]) -> Vec<OrbitRepresentative> {
        let mut result: Vec<OrbitRepresentative> = Vec::new();

        let mut masks = ConnectionMaskIterator::new(self.order, required);
        while let Some(mask) = masks.next() {
            let mut extended = OrbitRepresentative {
                order: self.order,
                edges: self.edges.clone(),
                symmetry: None,
            };
            extended.add_node(mask);
            extended.calculate_symmetry();

            if !result.iter().any(|g| g.is_isomorphic(&extended)) {
                result.push(extended);
            }
        }

        result
    }

    /// [Self::extensions], sorted by canonical id. Extensions missing from
    /// the catalog sort first.
    pub fn generate_next(&self, required: &[usize], catalog: &OrbitCatalog) -> Vec<OrbitRepresentative> {
        let mut result = self.extensions(required);
        result.sort_by_key(|g| catalog.identify_orbit(g));
        result
    }
}

#[cfg(test)]
mod test {
    use super::{Edge, OrbitRepresentative};

    fn path3() -> OrbitRepresentative {
        // 1 - 0 - 2
        OrbitRepresentative::from_edges([Edge::new(0, 1), Edge::new(0, 2)], 3)
    }

    fn triangle() -> OrbitRepresentative {
        OrbitRepresentative::from_edges([Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 2)], 3)
    }

    #[test]
    fn edge_normalization() {
        assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
        assert_eq!(Edge::new(3, 1).endpoints(), (1, 3));
    }

    #[test]
    #[should_panic(expected = "self-loop")]
    fn edge_rejects_self_loop() {
        Edge::new(2, 2);
    }

    #[test]
    fn single_edge_symmetry() {
        let mut g = OrbitRepresentative::new();
        g.calculate_symmetry();

        // the swap of nodes 0 and 1 moves node 0 and is not considered; the
        // only relabeling left is the identity, which merges nothing
        assert_eq!(g.symmetry().orbits(), &[vec![0], vec![1]]);
        assert_eq!(g.orbit_size(0), 1);
        assert_eq!(g.orbit_size(1), 1);
    }

    #[test]
    fn path_orbits() {
        let mut g = path3();
        g.calculate_symmetry();

        // the middle node 0 is fixed, the two ends are interchangeable
        assert_eq!(g.symmetry().orbits(), &[vec![0], vec![1, 2]]);
        assert_eq!(g.orbit_size(0), 1);
        assert_eq!(g.orbit_size(1), 2);
        assert_eq!(g.orbit_size(2), 2);
    }

    #[test]
    fn triangle_orbits() {
        let mut g = triangle();
        g.calculate_symmetry();

        assert_eq!(g.symmetry().orbits(), &[vec![0], vec![1, 2]]);
    }

    #[test]
    fn orbits_partition_nodes() {
        let mut graphs = vec![path3(), triangle()];
        for g in &mut graphs {
            g.calculate_symmetry();

            let mut seen = vec![false; g.order()];
            for group in g.symmetry().orbits() {
                for &n in group {
                    assert!(!seen[n], "node {} in two orbits", n);
                    seen[n] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn symmetry_is_idempotent() {
        let mut g = path3();
        g.calculate_symmetry();
        let orbits = g.symmetry().orbits().to_vec();
        g.calculate_symmetry();
        assert_eq!(g.symmetry().orbits(), &orbits[..]);
    }

    #[test]
    fn symmetry_independent_of_edge_order() {
        let mut a = OrbitRepresentative::from_edges([Edge::new(0, 1), Edge::new(1, 2)], 3);
        let mut b = OrbitRepresentative::from_edges([Edge::new(2, 1), Edge::new(1, 0)], 3);
        a.calculate_symmetry();
        b.calculate_symmetry();
        assert_eq!(a.symmetry().orbits(), b.symmetry().orbits());
        assert!(a.is_isomorphic(&b));
    }

    #[test]
    fn isomorphism_is_symmetric() {
        // path with 0 as an end, written over two different labelings
        let mut a = OrbitRepresentative::from_edges([Edge::new(0, 1), Edge::new(1, 2)], 3);
        let mut b = OrbitRepresentative::from_edges([Edge::new(0, 2), Edge::new(1, 2)], 3);
        a.calculate_symmetry();
        b.calculate_symmetry();

        assert!(a.is_isomorphic(&b));
        assert!(b.is_isomorphic(&a));

        // 0 as an end is not the same orbit as 0 in the middle
        let mut mid = path3();
        mid.calculate_symmetry();
        assert!(!a.is_isomorphic(&mid));
        assert!(!mid.is_isomorphic(&a));
    }

    #[test]
    fn add_node_invalidates_symmetry() {
        let mut g = OrbitRepresentative::new();
        g.calculate_symmetry();
        g.add_node(&[true, false]);

        assert_eq!(g.order(), 3);
        assert_eq!(g.edges(), &[Edge::new(0, 1), Edge::new(0, 2)]);

        g.calculate_symmetry();
        assert_eq!(g.symmetry().orbits(), &[vec![0], vec![1, 2]]);
    }

    #[test]
    #[should_panic(expected = "connection mask length")]
    fn add_node_rejects_bad_mask() {
        OrbitRepresentative::new().add_node(&[true]);
    }

    #[test]
    #[should_panic(expected = "symmetry data not computed")]
    fn stale_symmetry_query_fails_fast() {
        let mut g = OrbitRepresentative::new();
        g.calculate_symmetry();
        g.add_node(&[true, true]);
        g.orbit_size(0);
    }

    #[test]
    fn extensions_of_single_edge() {
        let g = OrbitRepresentative::new();

        // masks 10, 01, 11 yield three non-isomorphic graphlets: with node 0
        // fixed, the two path roles (0 in the middle, 0 at an end) are
        // distinct orbits, plus the triangle
        let ext = g.extensions(&[]);
        assert_eq!(ext.len(), 3);

        // connecting to at least node 0 rules out the path where the new
        // node hangs off node 1
        let ext = g.extensions(&[0]);
        assert_eq!(ext.len(), 2);
        for e in &ext {
            assert!(e.has_edge(0, 2));
        }
    }

    #[test]
    fn extensions_never_isolate_the_new_node() {
        let mut g = path3();
        g.calculate_symmetry();
        for e in g.extensions(&[]) {
            assert_eq!(e.order(), 4);
            assert!(e.edges().iter().any(|edge| edge.endpoints().1 == 3));
        }
    }

    #[test]
    fn extensions_honor_required_adjacency() {
        let g = triangle();
        for e in g.extensions(&[1, 2]) {
            assert!(e.has_edge(1, 3));
            assert!(e.has_edge(2, 3));
        }
    }
}

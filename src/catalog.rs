//! The canonical orbit catalog: an ordered list of orbit representatives
//! parsed from a textual source, numbered densely in insertion order and
//! grouped by graphlet order.
//!
//! The source lists one orbit representative per line, lines grouped by
//! ascending order. Each line is a sequence of 4-character groups `d-d `
//! giving the zero-based endpoints of one edge; the largest index present
//! determines the graphlet's order. The line order *is* the canonical
//! numbering, so a catalog file must be shared verbatim between systems
//! that exchange orbit ids.

use std::{fs, path::Path};

use ahash::HashMap;
use tracing::debug;

use crate::graphlet::{Edge, OrbitRepresentative};

/// An ordered catalog of orbit representatives with dense canonical ids.
pub struct OrbitCatalog {
    /// Representatives by canonical id, symmetry computed.
    orbits: Vec<OrbitRepresentative>,
    /// Orbit counts per order; `counts[k]` is the count for order `k + 2`.
    counts: Vec<usize>,
    /// Coarse structural index: `(order, edge count)` to candidate ids.
    index: HashMap<(usize, usize), Vec<usize>>,
}

impl OrbitCatalog {
    /// Reads a catalog from a file, ignoring entries whose order exceeds
    /// `max_order`.
    pub fn load(path: impl AsRef<Path>, max_order: usize) -> Result<OrbitCatalog, String> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| format!("cannot read catalog file {}: {}", path.display(), e))?;
        Self::parse(&source, max_order)
    }

    /// Parses a catalog from its textual form, ignoring entries whose order
    /// exceeds `max_order`.
    pub fn parse(source: &str, max_order: usize) -> Result<OrbitCatalog, String> {
        let mut catalog = OrbitCatalog {
            orbits: Vec::new(),
            counts: Vec::new(),
            index: HashMap::default(),
        };

        let mut current_order = 0;
        for (line_number, line) in source.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let edges = parse_edge_list(line)
                .map_err(|e| format!("catalog line {}: {}", line_number + 1, e))?;
            let order = edges
                .iter()
                .map(|e| e.endpoints().1 + 1)
                .max()
                .ok_or_else(|| format!("catalog line {}: no edges", line_number + 1))?;

            if order < current_order {
                return Err(format!(
                    "catalog line {}: order {} after order {}; lines must be grouped by ascending order",
                    line_number + 1,
                    order,
                    current_order
                ));
            }
            if order > max_order {
                break;
            }
            current_order = order;

            let mut representative = OrbitRepresentative::from_edges(edges, order);
            representative.calculate_symmetry();

            let id = catalog.orbits.len();
            while catalog.counts.len() < order - 1 {
                catalog.counts.push(0);
            }
            catalog.counts[order - 2] += 1;
            catalog
                .index
                .entry((order, representative.edges().len()))
                .or_default()
                .push(id);
            catalog.orbits.push(representative);
        }

        debug!(
            orbits = catalog.orbits.len(),
            max_order = catalog.counts.len() + 1,
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// The canonical id of the orbit represented by `g`, or `None` if the
    /// catalog holds no structurally equal entry. Callers may probe
    /// speculatively.
    pub fn identify_orbit(&self, g: &OrbitRepresentative) -> Option<usize> {
        let candidates = self.index.get(&(g.order(), g.edges().len()))?;
        candidates
            .iter()
            .copied()
            .find(|&id| self.orbits[id].is_isomorphic(g))
    }

    /// The representative with the given canonical id.
    pub fn orbit(&self, id: usize) -> &OrbitRepresentative {
        &self.orbits[id]
    }

    /// All representatives, by canonical id.
    pub fn orbits(&self) -> &[OrbitRepresentative] {
        &self.orbits
    }

    /// The number of orbits of the given order.
    pub fn count_for_order(&self, order: usize) -> usize {
        if order < 2 {
            return 0;
        }
        self.counts.get(order - 2).copied().unwrap_or(0)
    }

    /// The number of orbits of the given order or lower; the first id of
    /// order `k + 1` is therefore `total_up_to_order(k)`.
    pub fn total_up_to_order(&self, order: usize) -> usize {
        self.counts
            .iter()
            .take(order.saturating_sub(1))
            .sum()
    }

    /// The representatives of the given order, a contiguous canonical-id
    /// range.
    pub fn orbits_of_order(&self, order: usize) -> &[OrbitRepresentative] {
        &self.orbits[self.total_up_to_order(order.saturating_sub(1))..self.total_up_to_order(order)]
    }
}

/// Parses one catalog line: repeated groups `d-d `, the trailing separator
/// optional on the last group.
fn parse_edge_list(line: &str) -> Result<Vec<Edge>, String> {
    let bytes = line.as_bytes();
    let mut edges = Vec::new();

    let mut i = 0;
    while i + 2 < bytes.len() {
        let (a, sep, b) = (bytes[i], bytes[i + 1], bytes[i + 2]);
        if !a.is_ascii_digit() || !b.is_ascii_digit() || sep != b'-' {
            return Err(format!("malformed edge group at column {}", i + 1));
        }
        if i + 3 < bytes.len() && bytes[i + 3] != b' ' {
            return Err(format!("missing separator at column {}", i + 4));
        }

        let (u, v) = ((a - b'0') as usize, (b - b'0') as usize);
        if u == v {
            return Err(format!("self-loop edge {}-{} at column {}", u, v, i + 1));
        }
        edges.push(Edge::new(u, v));
        i += 4;
    }

    Ok(edges)
}

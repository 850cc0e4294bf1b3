//! Synthesis and consolidation of the linear counting equations that relate
//! orbit counts of order `k` to orbit counts of order `k - 1`.
//!
//! For every catalog orbit of order `k - 1` and every nonempty proper subset
//! of its nodes (the required adjacency), one candidate equation is derived
//! from the one-node extensions. Candidates sharing the smallest left-hand
//! canonical id land in the same slot of an [EquationManager] and are merged
//! there when they describe the same right-hand orbit.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    catalog::OrbitCatalog,
    combinatorics::SubsetIterator,
    graphlet::OrbitRepresentative,
};

/// One weighted term of an equation's left-hand side: an order-`k` orbit and
/// the size of the automorphism orbit containing its newly added node.
#[derive(Clone, Debug)]
pub struct Term {
    pub coefficient: usize,
    pub orbit_id: usize,
    pub orbit: OrbitRepresentative,
}

/// A linear relation between order-`k` orbit counts (the weighted left-hand
/// terms) and one order-`k - 1` orbit counted under a required-adjacency
/// constraint.
///
/// Only the term structure is modeled; the arithmetic relation is applied by
/// the downstream counting engine.
#[derive(Clone, Debug)]
pub struct Equation {
    lhs: Vec<Term>,
    rhs_orbit: OrbitRepresentative,
    rhs_id: usize,
    required: Vec<usize>,
    lowest_orbit: usize,
}

impl Equation {
    /// Derives the candidate equation for `rhs` under the given required
    /// adjacency: one term per distinct one-node extension, in canonical id
    /// order.
    ///
    /// Fails if `rhs` or one of its extensions has no catalog entry, which
    /// means the catalog is incomplete for this derivation.
    pub fn derive(
        rhs: &OrbitRepresentative,
        required: &[usize],
        catalog: &OrbitCatalog,
    ) -> Result<Equation, String> {
        let rhs_id = catalog.identify_orbit(rhs).ok_or_else(|| {
            format!(
                "right-hand orbit of order {} is not in the catalog",
                rhs.order()
            )
        })?;

        let mut lhs = Vec::new();
        for extended in rhs.generate_next(required, catalog) {
            let orbit_id = catalog.identify_orbit(&extended).ok_or_else(|| {
                format!(
                    "catalog has no entry for an extension of orbit {}; \
                     it is incomplete for order {}",
                    rhs_id,
                    extended.order()
                )
            })?;
            lhs.push(Term {
                coefficient: extended.orbit_size(extended.order() - 1),
                orbit_id,
                orbit: extended,
            });
        }

        // at least the all-connected extension always exists
        let lowest_orbit = lhs.iter().map(|t| t.orbit_id).min().unwrap();

        Ok(Equation {
            lhs,
            rhs_orbit: rhs.clone(),
            rhs_id,
            required: required.to_vec(),
            lowest_orbit,
        })
    }

    /// The ordered left-hand terms.
    pub fn lhs(&self) -> &[Term] {
        &self.lhs
    }

    /// The orbit this equation is about.
    pub fn rhs_orbit(&self) -> &OrbitRepresentative {
        &self.rhs_orbit
    }

    /// The canonical id of the right-hand orbit.
    pub fn rhs_id(&self) -> usize {
        self.rhs_id
    }

    /// The node indices of the right-hand orbit that the added node must
    /// connect to.
    pub fn required_adjacency(&self) -> &[usize] {
        &self.required
    }

    /// The smallest canonical id on the left-hand side, the grouping key
    /// under which equations are consolidated.
    pub fn lowest_orbit(&self) -> usize {
        self.lowest_orbit
    }

    /// Whether `other` may be merged into this equation: both must describe
    /// the same right-hand orbit.
    pub fn is_compatible(&self, other: &Equation) -> bool {
        self.rhs_id == other.rhs_id
    }

    /// Appends `other`'s terms. Terms are not deduplicated; distinct
    /// required-adjacency variants contribute independently.
    pub fn merge(&mut self, other: Equation) {
        self.lhs.extend(other.lhs);
    }
}

/// Consolidates the equations for one target order: one slot per canonical
/// id of that order, keyed by the smallest left-hand id.
pub struct EquationManager {
    target_order: usize,
    /// First canonical id of the target order.
    base_id: usize,
    /// A slot may stay empty when no equation routes through its id.
    slots: Vec<Option<Equation>>,
    /// Every right-hand orbit referenced by any added equation, by id.
    rhs_orbits: BTreeMap<usize, OrbitRepresentative>,
}

impl EquationManager {
    /// Creates an empty manager for equations counting orbits of
    /// `target_order`.
    pub fn new(target_order: usize, catalog: &OrbitCatalog) -> EquationManager {
        EquationManager {
            target_order,
            base_id: catalog.total_up_to_order(target_order - 1),
            slots: vec![None; catalog.count_for_order(target_order)],
            rhs_orbits: BTreeMap::new(),
        }
    }

    /// The order whose orbits the managed equations count.
    pub fn target_order(&self) -> usize {
        self.target_order
    }

    /// Inserts an equation into the slot of its lowest left-hand id, merging
    /// into a compatible occupant. The equation's right-hand orbit is
    /// registered either way; an incompatible equation is otherwise dropped.
    pub fn add_equation(&mut self, e: Equation) {
        let slot = e.lowest_orbit() - self.base_id;
        assert!(
            slot < self.slots.len(),
            "lowest orbit {} is not of order {}",
            e.lowest_orbit(),
            self.target_order
        );

        self.rhs_orbits
            .entry(e.rhs_id())
            .or_insert_with(|| e.rhs_orbit().clone());

        match &mut self.slots[slot] {
            Some(stored) => {
                if stored.is_compatible(&e) {
                    stored.merge(e);
                }
            }
            empty => *empty = Some(e),
        }
    }

    /// The slot table; empty slots are represented as `None`.
    pub fn slots(&self) -> &[Option<Equation>] {
        &self.slots
    }

    /// The occupied slots, in slot order.
    pub fn equations(&self) -> impl Iterator<Item = &Equation> {
        self.slots.iter().flatten()
    }

    /// Every right-hand orbit summed over by any equation, ascending by
    /// canonical id.
    pub fn rhs_orbits(&self) -> impl Iterator<Item = (usize, &OrbitRepresentative)> {
        self.rhs_orbits.iter().map(|(&id, orbit)| (id, orbit))
    }
}

/// Derives every orbit representative of the given order from the single
/// edge by repeated one-node extension, deduplicated by isomorphism. No
/// catalog is needed; the result order is the generation order.
pub fn generate_orbits(order: usize) -> Vec<OrbitRepresentative> {
    assert!(order >= 2, "the smallest graphlet has order 2");

    let mut root = OrbitRepresentative::new();
    root.calculate_symmetry();
    let mut orbits = vec![root];

    for _ in 2..order {
        let mut grown: Vec<OrbitRepresentative> = Vec::new();
        for orbit in &orbits {
            for candidate in orbit.extensions(&[]) {
                if !grown.iter().any(|g| g.is_isomorphic(&candidate)) {
                    grown.push(candidate);
                }
            }
        }
        orbits = grown;
    }

    orbits
}

/// Generates and consolidates all equations for counting orbits of the
/// given order, driving [Equation::derive] over every catalog orbit of
/// order `order - 1` and every nonempty proper subset of its nodes.
pub fn generate_equations(order: usize, catalog: &OrbitCatalog) -> Result<EquationManager, String> {
    assert!(order >= 3, "equations need a target order of at least 3, got {}", order);

    let mut manager = EquationManager::new(order, catalog);

    for rhs in catalog.orbits_of_order(order - 1) {
        let mut subsets = SubsetIterator::new(rhs.order());
        while let Some(required) = subsets.next() {
            manager.add_equation(Equation::derive(rhs, required, catalog)?);
        }
        debug!(order, "derived equations for one rhs orbit");
    }

    Ok(manager)
}

//! Orbitgen computes the automorphism-orbit structure of small graphlets
//! and generates the linear counting equations that relate orbit counts of
//! one graphlet order to the order below, so that a counting engine can
//! count orbits in large networks by recursion instead of enumeration.
//!
//! For example:
//!
//! ```
//! use orbitgen::{catalog::OrbitCatalog, equations::generate_equations};
//!
//! let catalog = OrbitCatalog::parse("0-1 \n0-1 1-2 \n0-1 0-2 \n0-1 0-2 1-2 \n", 3).unwrap();
//! let manager = generate_equations(3, &catalog).unwrap();
//!
//! // one consolidated equation per reachable lowest left-hand orbit
//! assert_eq!(manager.equations().count(), 2);
//! ```
//!
//! The orbit catalog is read from a textual description shared with the
//! downstream counter; see [catalog::OrbitCatalog] for the format.

pub mod catalog;
pub mod combinatorics;
pub mod equations;
pub mod graphlet;
pub mod printer;

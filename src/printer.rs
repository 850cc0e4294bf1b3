//! Rendering of orbits and equations in plain text or LaTeX.
//!
//! An orbit prints as its set-builder definition, an equation as the
//! weighted sum of its left-hand orbit counts against a sum over the
//! right-hand orbit of the common-neighbour count of the required nodes.
//! Node 0 is written `x`, the remaining nodes `a`, `b`, ….

use std::fmt;

use crate::{
    catalog::OrbitCatalog,
    equations::{Equation, EquationManager},
    graphlet::OrbitRepresentative,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrintMode {
    Plain,
    Latex,
}

fn node_label(index: usize) -> char {
    if index == 0 {
        'x'
    } else {
        (b'a' + index as u8 - 1) as char
    }
}

/// The canonical id as printed: unknown structures render as -1.
fn print_id(catalog: &OrbitCatalog, orbit: &OrbitRepresentative) -> i64 {
    catalog.identify_orbit(orbit).map(|i| i as i64).unwrap_or(-1)
}

fn node_list(order: usize) -> String {
    let mut list = String::from("x");
    for i in 1..order {
        list.push(',');
        list.push(node_label(i));
    }
    list
}

/// Comma-separated pair lists of the edges and non-edges over all node
/// pairs.
fn edge_lists(orbit: &OrbitRepresentative) -> (String, String) {
    let mut edges = String::new();
    let mut non_edges = String::new();
    for i in 0..orbit.order() - 1 {
        for j in i + 1..orbit.order() {
            let target = if orbit.has_edge(i, j) {
                &mut edges
            } else {
                &mut non_edges
            };
            if !target.is_empty() {
                target.push_str(", ");
            }
            target.push('(');
            target.push(node_label(i));
            target.push(',');
            target.push(node_label(j));
            target.push(')');
        }
    }
    (edges, non_edges)
}

/// Prints an orbit representative as its set-builder definition.
pub struct OrbitPrinter<'a> {
    pub orbit: &'a OrbitRepresentative,
    pub catalog: &'a OrbitCatalog,
    pub print_mode: PrintMode,
}

impl<'a> OrbitPrinter<'a> {
    pub fn new(
        orbit: &'a OrbitRepresentative,
        catalog: &'a OrbitCatalog,
        print_mode: PrintMode,
    ) -> OrbitPrinter<'a> {
        OrbitPrinter {
            orbit,
            catalog,
            print_mode,
        }
    }
}

impl fmt::Display for OrbitPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let id = print_id(self.catalog, self.orbit);
        let vars = node_list(self.orbit.order());
        let (edges, non_edges) = edge_lists(self.orbit);

        match self.print_mode {
            PrintMode::Plain => {
                write!(f, "P_{} ({}) = {{{{{}}} in V(G) | ", id, vars, vars)?;
                write!(f, "{{{}}} in E(G)", edges)?;
                if !non_edges.is_empty() {
                    write!(f, " & {{{}}} not in E(G)", non_edges)?;
                }
                write!(f, "}}")
            }
            PrintMode::Latex => {
                write!(
                    f,
                    "\\[\\begin{{split}}P_{{{}}}({}) = \\{{ &\\{{{}\\}} \\subset V(G) | \\\\",
                    id, vars, vars
                )?;
                write!(f, "&\\{{{}\\}} \\subset E(G)", edges)?;
                if !non_edges.is_empty() {
                    write!(
                        f,
                        " \\wedge \\\\&\\{{{}\\}} \\cap E(G) = \\emptyset",
                        non_edges
                    )?;
                }
                write!(f, " \\}}\\end{{split}}\\]")
            }
        }
    }
}

/// Prints one equation: the weighted left-hand sum of orbit counts, equated
/// to the sum over the right-hand orbit of the common-neighbour count of
/// the required-adjacency nodes.
pub struct EquationPrinter<'a> {
    pub equation: &'a Equation,
    pub catalog: &'a OrbitCatalog,
    pub print_mode: PrintMode,
}

impl<'a> EquationPrinter<'a> {
    pub fn new(
        equation: &'a Equation,
        catalog: &'a OrbitCatalog,
        print_mode: PrintMode,
    ) -> EquationPrinter<'a> {
        EquationPrinter {
            equation,
            catalog,
            print_mode,
        }
    }
}

impl fmt::Display for EquationPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let required: Vec<String> = self
            .equation
            .required_adjacency()
            .iter()
            .map(|&n| node_label(n).to_string())
            .collect();
        let required = required.join(", ");

        match self.print_mode {
            PrintMode::Plain => {
                for (i, term) in self.equation.lhs().iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    if term.coefficient != 1 {
                        write!(f, "{} ", term.coefficient)?;
                    }
                    write!(f, "P_{}", term.orbit_id)?;
                }
                write!(
                    f,
                    " = sum_{{P_{}}} c({})",
                    self.equation.rhs_id(),
                    required
                )
            }
            PrintMode::Latex => {
                write!(f, "\\[")?;
                for (i, term) in self.equation.lhs().iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    if term.coefficient != 1 {
                        write!(f, "{} ", term.coefficient)?;
                    }
                    write!(f, "P_{{{}}}", term.orbit_id)?;
                }
                write!(
                    f,
                    " = \\sum_{{P_{{{}}}}} \\binom{{c({})}}{{1}}\\]",
                    self.equation.rhs_id(),
                    required
                )
            }
        }
    }
}

/// Prints a whole equation set: the definitions of every right-hand orbit,
/// a blank line, then one equation per occupied slot.
pub struct EquationSetPrinter<'a> {
    pub manager: &'a EquationManager,
    pub catalog: &'a OrbitCatalog,
    pub print_mode: PrintMode,
}

impl<'a> EquationSetPrinter<'a> {
    pub fn new(
        manager: &'a EquationManager,
        catalog: &'a OrbitCatalog,
        print_mode: PrintMode,
    ) -> EquationSetPrinter<'a> {
        EquationSetPrinter {
            manager,
            catalog,
            print_mode,
        }
    }
}

impl fmt::Display for EquationSetPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (_, orbit) in self.manager.rhs_orbits() {
            writeln!(f, "{}", OrbitPrinter::new(orbit, self.catalog, self.print_mode))?;
        }
        writeln!(f)?;
        for equation in self.manager.equations() {
            writeln!(
                f,
                "{}",
                EquationPrinter::new(equation, self.catalog, self.print_mode)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{EquationPrinter, EquationSetPrinter, OrbitPrinter, PrintMode};
    use crate::{
        catalog::OrbitCatalog,
        equations::{generate_equations, Equation},
    };

    const CATALOG: &str = "0-1 \n0-1 1-2 \n0-1 0-2 \n0-1 0-2 1-2 \n";

    #[test]
    fn plain_orbit_definition() {
        let catalog = OrbitCatalog::parse(CATALOG, 3).unwrap();

        let p = OrbitPrinter::new(catalog.orbit(0), &catalog, PrintMode::Plain);
        assert_eq!(p.to_string(), "P_0 (x,a) = {{x,a} in V(G) | {(x,a)} in E(G)}");

        // non-edges are listed for the path
        let p = OrbitPrinter::new(catalog.orbit(2), &catalog, PrintMode::Plain);
        assert_eq!(
            p.to_string(),
            "P_2 (x,a,b) = {{x,a,b} in V(G) | {(x,a), (x,b)} in E(G) & {(a,b)} not in E(G)}"
        );
    }

    #[test]
    fn latex_orbit_definition() {
        let catalog = OrbitCatalog::parse(CATALOG, 3).unwrap();
        let s = OrbitPrinter::new(catalog.orbit(3), &catalog, PrintMode::Latex).to_string();

        assert!(s.starts_with("\\[\\begin{split}P_{3}(x,a,b)"));
        assert!(s.contains("\\subset E(G)"));
        assert!(s.ends_with("\\]"));
        // the triangle has no non-edges
        assert!(!s.contains("\\emptyset"));
    }

    #[test]
    fn plain_equation() {
        let catalog = OrbitCatalog::parse(CATALOG, 3).unwrap();
        let edge = &catalog.orbits_of_order(2)[0];

        let e = Equation::derive(edge, &[0], &catalog).unwrap();
        let s = EquationPrinter::new(&e, &catalog, PrintMode::Plain).to_string();
        assert_eq!(s, "2 P_2 + 2 P_3 = sum_{P_0} c(x)");

        // a unit coefficient is not written
        let e = Equation::derive(edge, &[1], &catalog).unwrap();
        let s = EquationPrinter::new(&e, &catalog, PrintMode::Plain).to_string();
        assert_eq!(s, "P_1 + 2 P_3 = sum_{P_0} c(a)");
    }

    #[test]
    fn equation_set_layout() {
        let catalog = OrbitCatalog::parse(CATALOG, 3).unwrap();
        let manager = generate_equations(3, &catalog).unwrap();
        let s = EquationSetPrinter::new(&manager, &catalog, PrintMode::Plain).to_string();

        let lines: Vec<_> = s.lines().collect();
        // one rhs orbit definition, a blank line, two equations
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("P_0 "));
        assert!(lines[1].is_empty());
        assert!(lines[2].starts_with("P_1 "));
        assert!(lines[3].starts_with("2 P_2 "));
    }

    #[test]
    fn latex_equation() {
        let catalog = OrbitCatalog::parse(CATALOG, 3).unwrap();
        let edge = &catalog.orbits_of_order(2)[0];
        let e = Equation::derive(edge, &[0], &catalog).unwrap();
        let s = EquationPrinter::new(&e, &catalog, PrintMode::Latex).to_string();
        assert_eq!(s, "\\[2 P_{2} + 2 P_{3} = \\sum_{P_{0}} \\binom{c(x)}{1}\\]");
    }
}

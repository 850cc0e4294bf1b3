use std::{env, process::exit};

use colored::Colorize;
use orbitgen::{
    catalog::OrbitCatalog,
    equations::generate_equations,
    printer::{EquationSetPrinter, PrintMode},
};

const DEFAULT_CATALOG: &str = "Orbits.txt";

fn usage() -> ! {
    eprintln!(
        "{}: orbitgen <order> [catalog-file] [latex]",
        "usage".bold()
    );
    exit(1)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let Some(order_arg) = args.first() else {
        usage();
    };
    let Ok(order) = order_arg.parse::<usize>() else {
        eprintln!("{}: invalid order '{}'", "error".red().bold(), order_arg);
        usage();
    };
    if order < 3 {
        eprintln!(
            "{}: equations need an order of at least 3",
            "error".red().bold()
        );
        exit(1);
    }

    let mut filename = DEFAULT_CATALOG.to_string();
    let mut mode = PrintMode::Plain;
    for arg in &args[1..] {
        if arg.eq_ignore_ascii_case("latex") {
            mode = PrintMode::Latex;
        } else {
            filename = arg.clone();
        }
    }

    let catalog = OrbitCatalog::load(&filename, order).unwrap_or_else(|e| {
        eprintln!("{}: {}", "error".red().bold(), e);
        exit(1);
    });

    let manager = generate_equations(order, &catalog).unwrap_or_else(|e| {
        eprintln!("{}: {}", "error".red().bold(), e);
        exit(1);
    });

    print!("{}", EquationSetPrinter::new(&manager, &catalog, mode));
}

//! Generate FORMULAS.md from the physics formula registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas
//! ```
//!
//! The generated file is written to `calc_core/src/formulas/FORMULAS.md`.

use std::fs;
use std::path::Path;

use calc_core::formulas::{formulas_markdown, STANDARD_FORMULAS};

fn main() {
    println!("Generating FORMULAS.md...");

    let markdown = formulas_markdown(&STANDARD_FORMULAS);

    // Relative to workspace root
    let output_path = Path::new("calc_core/src/formulas/FORMULAS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}

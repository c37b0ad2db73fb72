//! rFootfall main entrypoint.

use rfootfall::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        // Configuration problems are fatal before any store access.
        std::process::exit(if e.is_config_error() { 2 } else { 1 });
    }
}

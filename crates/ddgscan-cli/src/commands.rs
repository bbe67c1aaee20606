pub mod figures;
pub mod structure;
pub mod tables;

use std::path::PathBuf;

fn print_outputs(what: &str, paths: &[PathBuf]) {
    match paths {
        [] => println!("No {} written.", what),
        [single] => println!("✓ {} written to: {}", what, single.display()),
        many => {
            println!("✓ {} {} written:", many.len(), what);
            for path in many {
                println!("  {}", path.display());
            }
        }
    }
}

//! swap-sizer entry point.

use std::process;

fn main() {
    if let Err(err) = swap_sizer::cli::run_cli() {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

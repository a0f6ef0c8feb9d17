#![cfg(feature = "gui")]
//! Desktop editor entrypoint for the workspace root package.

fn main() {
    if let Err(err) = mdvie::run_gui() {
        eprintln!("mdvie gui failed: {}", err);
        std::process::exit(1);
    }
}

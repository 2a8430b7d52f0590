//! structsearch CLI binary
//!
//! Minimal entrypoint: all logic is in the library; main.rs only invokes
//! cli::run() and maps its result to a process exit status. On a
//! successful dispatch run() never returns, because the pipeline script
//! replaces this process.

fn main() {
    if let Err(code) = structsearch::cli::run() {
        std::process::exit(code.as_i32());
    }
}

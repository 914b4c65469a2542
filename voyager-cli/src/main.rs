//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = voyager_cli::run() {
        eprintln!("voyager: {err}");
        std::process::exit(1);
    }
}

//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = shiftplan_cli::run() {
        eprintln!("shiftplan: {err}");
        std::process::exit(1);
    }
}

//! tdvt CLI entry point

fn main() {
    // Logging is initialized by the CLI once the verbosity flags are known
    tdvt::cli::run();
}

//! Entry point for the `darksky` command-line interface.
#![forbid(unsafe_code)]

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn main() {
    if let Err(err) = darksky_cli::run() {
        eprintln!("darksky: {err}");
        std::process::exit(1);
    }
}

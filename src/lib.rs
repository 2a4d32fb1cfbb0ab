pub mod config;
pub mod decode;
pub mod dispatch;
pub mod domain;
pub mod report;

pub(crate) mod cli;
pub(crate) mod logging;

pub use cli::Options;

/// Run bithooker: read stdin, decode the hooks, run them in order, report.
///
/// This is the binary entry point. It bridges `main.rs` to the library
/// without exposing `cli` internals; embedders should use [`decode::decode`]
/// and [`dispatch::Dispatcher`] directly.
pub fn run(options: Options) -> std::process::ExitCode {
    cli::run::run(options)
}

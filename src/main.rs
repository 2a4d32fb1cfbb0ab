use clap::Parser;
use std::process::ExitCode;

/// Runs multiple hooks from a single Bitbucket pre-receive hook.
///
/// Hooks are configured with directives, one `<name>@<id>` header per hook,
/// followed by its arguments indented with one space:
///
///     <hook-name>@<unique-hook-id>
///      <args>
///      <args>
///
///     <another-hook-name>@<another-unique-hook-id>
///      <args>
///
/// Each hook gets bithooker's stdin, its arguments, and HOOK_NAME / HOOK_ID
/// in its environment. Hooks run in order; the first failure stops the run
/// and is reported on stderr.
#[derive(Debug, Parser)]
#[command(name = "bithooker", version, about, verbatim_doc_comment)]
struct Cli {
    #[command(flatten)]
    options: bithooker::Options,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    bithooker::run(cli.options)
}

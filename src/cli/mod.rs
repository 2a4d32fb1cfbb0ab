pub mod run;

use std::path::PathBuf;

use clap::Args;

use crate::config::Overrides;
use crate::decode::Format;
use crate::dispatch::{BodyMode, OutputMode};

/// Command-line options for a run.
#[derive(Debug, Default, Args)]
pub struct Options {
    /// Hook directives, one line per argument (read from stdin when omitted)
    #[arg(value_name = "HOOK")]
    pub hooks: Vec<String>,

    /// Language the hook configuration is written in
    #[arg(long, value_enum, env = "BITHOOKER_FORMAT")]
    pub format: Option<Format>,

    /// Pass each hook's body as arguments or as stdin data
    #[arg(long, value_enum, env = "BITHOOKER_BODY")]
    pub body: Option<BodyMode>,

    /// Relay hook stdout behind a blank separator, or inherit both streams
    #[arg(long, value_enum, env = "BITHOOKER_OUTPUT")]
    pub output: Option<OutputMode>,

    /// Directory hook names are resolved in [default: directory of bithooker]
    #[arg(long, value_name = "DIR", env = "BITHOOKER_HOOKS_DIR")]
    pub hooks_dir: Option<PathBuf>,

    /// Resolve hook names on PATH instead of a hooks directory (wins over --hooks-dir)
    #[arg(long)]
    pub search_path: bool,

    /// Path to a TOML settings file
    #[arg(long, value_name = "FILE", env = "BITHOOKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log hook launches and exit statuses to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Options {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format,
            body: self.body,
            output: self.output,
            hooks_dir: self.hooks_dir.clone(),
            search_path: self.search_path,
        }
    }
}

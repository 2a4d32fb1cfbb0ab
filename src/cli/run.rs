use std::borrow::Cow;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use super::Options;
use crate::config::{Host, Settings, SettingsFile};
use crate::decode;
use crate::dispatch::Dispatcher;
use crate::report::{self, Error};

/// Execute a run against the real process streams and environment.
///
/// On success a single blank line goes to stdout. On failure a blank line and
/// the error chain go to stderr, and the exit code reflects the error kind.
pub fn run(options: Options) -> ExitCode {
    crate::logging::init(options.verbose);

    let host = Host::current();
    let result = execute(&options, &host, &mut io::stdin().lock(), &mut io::stderr());

    match result {
        Ok(()) => {
            // Nothing useful can be done if stdout is already gone.
            let _ = writeln!(io::stdout());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "run failed");
            let _ = report::write(&err, &mut io::stderr().lock());
            ExitCode::from(err.exit_code())
        }
    }
}

/// Read input, decode hooks, run them in order.
///
/// Hook text comes from the positional arguments when given, otherwise from
/// `stdin` itself. Either way the full stdin bytes are the replayable input.
pub(crate) fn execute(
    options: &Options,
    host: &Host,
    stdin: &mut dyn Read,
    relay: &mut dyn Write,
) -> Result<(), Error> {
    let file = options
        .config
        .as_deref()
        .map(SettingsFile::load)
        .transpose()
        .map_err(Error::Config)?;
    let settings = Settings::resolve(&options.overrides(), file, &host.executable_dir)
        .map_err(Error::Config)?;

    let mut input = Vec::new();
    stdin.read_to_end(&mut input).map_err(Error::Input)?;

    let text: Cow<'_, str> = if options.hooks.is_empty() {
        let text = std::str::from_utf8(&input)
            .map_err(|e| Error::Input(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Cow::Borrowed(text)
    } else {
        Cow::Owned(options.hooks.join("\n"))
    };
    let hooks = decode::decode(&text, settings.format).map_err(Error::Decode)?;

    let dispatcher = Dispatcher {
        resolver: settings.resolver,
        env: host.env.clone(),
        body: settings.body,
        output: settings.output,
    };
    dispatcher.run(&hooks, &input, relay)?;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn host() -> Host {
        Host {
            env: std::env::var_os("PATH")
                .map(|path| vec![(OsString::from("PATH"), path)])
                .unwrap_or_default(),
            executable_dir: PathBuf::from("/nonexistent/hooks"),
        }
    }

    fn search_path(hooks: &[&str]) -> Options {
        Options {
            hooks: hooks.iter().map(|s| s.to_string()).collect(),
            search_path: true,
            ..Default::default()
        }
    }

    fn execute_with(options: &Options, stdin: &str) -> (Result<(), Error>, String) {
        let mut relay = Vec::new();
        let result = execute(options, &host(), &mut stdin.as_bytes(), &mut relay);
        (result, String::from_utf8(relay).unwrap())
    }

    #[test]
    fn arguments_joined_into_directives() {
        let options = search_path(&["sh@x", " -c", " cat"]);
        let (result, relay) = execute_with(&options, "ref-update\n");
        result.unwrap();
        assert_eq!(relay, "\nref-update\n");
    }

    #[test]
    fn directives_read_from_stdin_when_no_arguments() {
        let options = search_path(&[]);
        let (result, relay) = execute_with(&options, "sh@x\n -c\n echo from-stdin\n");
        result.unwrap();
        assert_eq!(relay, "\nfrom-stdin\n");
    }

    #[test]
    fn table_from_stdin_feeds_values() {
        let options = Options {
            format: Some(decode::Format::Table),
            ..search_path(&[])
        };
        let (result, relay) = execute_with(&options, "cat = \"\"\"\npayload\n\n\"\"\"\n");
        result.unwrap();
        assert_eq!(relay, "\npayload\n");
    }

    #[test]
    fn syntax_error_runs_nothing() {
        let options = search_path(&["sh@x", " -c", " echo ran", "", " orphan"]);
        let (result, relay) = execute_with(&options, "");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.exit_code(), report::EXIT_CONFIG);
        assert!(relay.is_empty());
    }

    #[test]
    fn empty_stdin_without_arguments_is_syntax_error() {
        let (result, _) = execute_with(&search_path(&[]), "");
        assert!(matches!(
            result.unwrap_err(),
            Error::Decode(decode::DecodeError::Empty)
        ));
    }

    #[test]
    fn non_utf8_directives_are_input_error() {
        let mut relay = Vec::new();
        let result = execute(&search_path(&[]), &host(), &mut &b"\xff\xfe"[..], &mut relay);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Input(_)));
        assert_eq!(err.exit_code(), report::EXIT_FAILURE);
    }

    #[test]
    fn missing_settings_file_is_config_error() {
        let options = Options {
            config: Some(PathBuf::from("/tmp/does-not-exist-bithooker.toml")),
            ..search_path(&["sh@x"])
        };
        let (result, _) = execute_with(&options, "");
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn default_resolver_uses_executable_dir() {
        let (result, _) = execute_with(
            &Options {
                hooks: vec!["check@1".to_string()],
                ..Default::default()
            },
            "",
        );
        match result.unwrap_err() {
            Error::Hook(err) => {
                assert_eq!(err.name, "check");
                assert!(err.failure.to_string().contains("/nonexistent/hooks/check"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

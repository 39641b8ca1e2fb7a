mod launch;
mod utils;

use clap::{ErrorKind, Parser};
use launch::{
  executable::Executable,
  limit::rlimit::DataLimit,
  Launch, LaunchError,
};
use log::debug;
use std::{env, ffi::OsString, process::exit};
use utils::parse_memory_limit;

/// Run a program with a lowered data segment limit
#[derive(Parser, Debug)]
#[clap(author, version, about)]
#[clap(trailing_var_arg = true, allow_negative_numbers = true)]
struct CliArgs {
  /// Soft limit for the data segment, in bytes. Must not exceed the current hard limit.
  #[clap(value_parser, value_name = "MEMORY_LIMIT")]
  memory_limit: OsString,
  /// Program to run (searched in PATH) followed by its arguments, passed through unchanged.
  #[clap(
    value_parser,
    value_name = "PROGRAM",
    required = true,
    multiple_values = true,
    allow_hyphen_values = true
  )]
  command: Vec<OsString>,
}

/// name this program was invoked as, for the usage line
fn program_name() -> String {
  env::args_os()
    .next()
    .map(|arg| arg.to_string_lossy().into_owned())
    .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}

/// Split argv into MEMORY_LIMIT and the target command line
///
/// With at least two arguments argv[1] is always the limit and argv[2..] the
/// command, whatever they look like (`--`, `--help`, `-V`). Only shorter
/// invocations go through clap, so `--help` and `--version` still work there.
fn parse_args(argv: Vec<OsString>) -> Result<CliArgs, clap::Error> {
  if argv.len() < 3 {
    return CliArgs::try_parse_from(argv);
  }
  let mut argv = argv.into_iter().skip(1);
  let memory_limit = argv.next().unwrap_or_default();
  Ok(CliArgs {
    memory_limit,
    command: argv.collect(),
  })
}

fn run() -> LaunchError {
  let args = match parse_args(env::args_os().collect()) {
    Ok(args) => args,
    Err(e) => match e.kind() {
      ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
      _ => {
        debug!("argument parsing failed: {e}");
        return LaunchError::Usage {
          program: program_name(),
        };
      }
    },
  };

  let memory = parse_memory_limit(&args.memory_limit);
  debug!("requested data limit: {memory}");

  let limit = match DataLimit::new(memory) {
    Ok(limit) => limit,
    Err(e) => return e.into(),
  };
  let executable = match Executable::from_command_line(args.command) {
    Some(executable) => executable,
    None => {
      return LaunchError::Usage {
        program: program_name(),
      }
    }
  };

  Launch::new(limit, executable).exec()
}

#[cfg(unix)]
fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let e = run();
  debug!("launch failed: {e:?}");
  if e.is_os_error() {
    eprintln!("{e}");
  } else {
    println!("{e}");
  }
  exit(libc::EXIT_FAILURE);
}

#[cfg(test)]
mod test {
  use super::parse_args;
  use clap::ErrorKind;
  use std::ffi::OsString;

  fn argv(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
  }

  fn split(args: &[&str]) -> (OsString, Vec<OsString>) {
    let args = parse_args(argv(args)).unwrap();
    (args.memory_limit, args.command)
  }

  #[test]
  fn positional_slots_are_never_flags_test() {
    assert_eq!(
      split(&["memlimit", "--", "100000000", "true"]),
      (OsString::from("--"), argv(&["100000000", "true"]))
    );
    assert_eq!(split(&["memlimit", "--help", "true"]), (OsString::from("--help"), argv(&["true"])));
    assert_eq!(split(&["memlimit", "-V", "true"]), (OsString::from("-V"), argv(&["true"])));
    assert_eq!(split(&["memlimit", "100", "--help"]), (OsString::from("100"), argv(&["--help"])));
    assert_eq!(split(&["memlimit", "100", "--foo"]), (OsString::from("100"), argv(&["--foo"])));
    assert_eq!(
      split(&["memlimit", "100", "--", "echo", "hi"]),
      (OsString::from("100"), argv(&["--", "echo", "hi"]))
    );
  }

  #[test]
  fn short_invocations_use_clap_test() {
    let kind = |args: &[&str]| parse_args(argv(args)).unwrap_err().kind();
    assert_eq!(kind(&["memlimit", "--help"]), ErrorKind::DisplayHelp);
    assert_eq!(kind(&["memlimit", "-V"]), ErrorKind::DisplayVersion);
    assert_eq!(kind(&["memlimit", "100"]), ErrorKind::MissingRequiredArgument);
    assert!(parse_args(argv(&["memlimit"])).is_err());
  }
}

#[cfg(not(unix))]
compile_error!("Only support unix platforms: setrlimit and exec are required.");


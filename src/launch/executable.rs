use std::{ffi::OsString, process::Command};

/// Target command line, passed to the new image verbatim
#[derive(Debug)]
pub struct Executable {
  /// program path, or a bare name searched in `PATH`
  pub name: OsString,
  pub args: Vec<OsString>,
}

impl Executable {
  /// split `PROGRAM [ARGUMENT]...`, `None` when empty
  pub fn from_command_line(command_line: Vec<OsString>) -> Option<Self> {
    let mut command_line = command_line.into_iter();
    let name = command_line.next()?;
    Some(Self {
      name,
      args: command_line.collect(),
    })
  }

  /// `name` doubles as argv[0]; environment and file descriptors are inherited
  pub fn command(&self) -> Command {
    let mut command = Command::new(&self.name);
    command.args(&self.args);
    command
  }
}

#[cfg(test)]
mod test {
  use super::Executable;
  use std::ffi::OsString;

  #[test]
  fn from_command_line_test() {
    let line = ["sh", "-c", "echo $0", "--help"]
      .iter()
      .map(OsString::from)
      .collect::<Vec<_>>();
    let executable = Executable::from_command_line(line).unwrap();
    assert_eq!(executable.name, "sh");
    assert_eq!(executable.args, vec!["-c", "echo $0", "--help"]);

    let command = executable.command();
    assert_eq!(command.get_program(), "sh");
    assert_eq!(command.get_args().collect::<Vec<_>>(), vec!["-c", "echo $0", "--help"]);

    assert!(Executable::from_command_line(Vec::new()).is_none());
  }
}

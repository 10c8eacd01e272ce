use crate::options::{OptionName, Options};

/// A boolean predicate over the option record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
  Always,
  Enabled(OptionName),
  AnyOf(&'static [OptionName]),
}

impl Guard {
  pub fn holds(&self, options: &Options) -> bool {
    match self {
      Guard::Always => true,
      Guard::Enabled(name) => options.value(*name),
      Guard::AnyOf(names) => names.iter().any(|name| options.value(*name)),
    }
  }
}

/// Gates the command-line parsing library.
///
/// Shared by requirement resolution and component publication so the two
/// can never disagree.
pub const CLI_PARSER: Guard = Guard::AnyOf(&[OptionName::WithExamples, OptionName::WithFramework, OptionName::WithCli]);

/// Gates the unit test framework.
pub const TESTS: Guard = Guard::Enabled(OptionName::WithTests);

#[cfg(test)]
mod tests {
  use super::*;

  fn options(overrides: &[(&str, &str)]) -> Options {
    Options::from_overrides(overrides.iter().copied()).unwrap()
  }

  #[test]
  fn cli_parser_guard_holds_for_any_member() {
    let none = options(&[("with_framework", "False")]);
    assert!(!CLI_PARSER.holds(&none));

    for member in ["with_examples", "with_framework", "with_cli"] {
      let mut overrides = vec![("with_framework", "False")];
      overrides.retain(|(name, _)| *name != member);
      overrides.push((member, "True"));
      assert!(CLI_PARSER.holds(&options(&overrides)), "{member}");
    }
  }

  #[test]
  fn cli_parser_guard_ignores_unrelated_options() {
    let unrelated = options(&[
      ("with_framework", "False"),
      ("with_tests", "True"),
      ("with_openssl", "True"),
      ("shared", "True"),
    ]);

    assert!(!CLI_PARSER.holds(&unrelated));
  }

  #[test]
  fn always_holds() {
    assert!(Guard::Always.holds(&Options::default()));
  }
}

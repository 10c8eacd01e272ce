use std::collections::BTreeMap;

use serde::Serialize;

use crate::options::{OptionName, Options};

/// Build-system variables and the option each one projects.
pub(crate) const DEFINITIONS: &[(&str, OptionName)] = &[
  ("TOUCA_BUILD_TESTS", OptionName::WithTests),
  ("TOUCA_BUILD_CLI", OptionName::WithCli),
  ("TOUCA_BUILD_EXAMPLES", OptionName::WithExamples),
  ("TOUCA_BUILD_FRAMEWORK", OptionName::WithFramework),
];

/// Named boolean definitions handed, uninterpreted, to the build step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildDefinitions(BTreeMap<String, bool>);

impl BuildDefinitions {
  pub fn get(&self, name: &str) -> Option<bool> {
    self.0.get(name).copied()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
    self.0.iter().map(|(name, value)| (name.as_str(), *value))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Render as CMake cache arguments, e.g. `-DTOUCA_BUILD_CLI=ON`.
  pub fn to_cmake_args(&self) -> Vec<String> {
    self
      .iter()
      .map(|(name, value)| format!("-D{}={}", name, if value { "ON" } else { "OFF" }))
      .collect()
  }
}

impl FromIterator<(String, bool)> for BuildDefinitions {
  fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// One definition per build-relevant option, equal to that option's value.
pub fn build_definitions(options: &Options) -> BuildDefinitions {
  DEFINITIONS
    .iter()
    .map(|(name, option)| (name.to_string(), options.value(*option)))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_project_one_to_one() {
    let definitions = build_definitions(&Options::default());

    assert_eq!(definitions.len(), 4);
    assert_eq!(definitions.get("TOUCA_BUILD_TESTS"), Some(false));
    assert_eq!(definitions.get("TOUCA_BUILD_CLI"), Some(false));
    assert_eq!(definitions.get("TOUCA_BUILD_EXAMPLES"), Some(false));
    assert_eq!(definitions.get("TOUCA_BUILD_FRAMEWORK"), Some(true));
  }

  #[test]
  fn non_build_options_do_not_leak_in() {
    let options = Options::from_overrides([("shared", "True"), ("with_openssl", "False")]).unwrap();

    let definitions = build_definitions(&options);

    assert_eq!(definitions, build_definitions(&Options::default()));
  }

  #[test]
  fn cmake_args_use_on_off() {
    let options = Options::from_overrides([("with_cli", "True")]).unwrap();

    let args = build_definitions(&options).to_cmake_args();

    assert_eq!(
      args,
      vec![
        "-DTOUCA_BUILD_CLI=ON",
        "-DTOUCA_BUILD_EXAMPLES=OFF",
        "-DTOUCA_BUILD_FRAMEWORK=ON",
        "-DTOUCA_BUILD_TESTS=OFF",
      ]
    );
  }
}

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::requirements::requirements;
use crate::error::ConfigurationError;
use crate::options::{OptionName, Options};

/// Where a forced sub-option gets its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ForcedValue {
  /// Fixed override, not user-configurable.
  Fixed(bool),
  /// Copied verbatim from a top-level option.
  PassThrough(OptionName),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ForcedRule {
  pub package: &'static str,
  pub option: &'static str,
  pub value: ForcedValue,
}

pub(crate) const RULES: &[ForcedRule] = &[
  ForcedRule {
    package: "fmt",
    option: "header_only",
    value: ForcedValue::Fixed(true),
  },
  ForcedRule {
    package: "flatbuffers",
    option: "header_only",
    value: ForcedValue::Fixed(true),
  },
  ForcedRule {
    package: "cpp-httplib",
    option: "with_openssl",
    value: ForcedValue::PassThrough(OptionName::WithOpenssl),
  },
];

/// Sub-options forced onto required packages, keyed by package then
/// sub-option name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ForcedOptions(BTreeMap<String, BTreeMap<String, bool>>);

impl ForcedOptions {
  pub fn get(&self, package: &str, option: &str) -> Option<bool> {
    self.0.get(package).and_then(|options| options.get(option)).copied()
  }

  /// Entries as `(package, sub_option, value)`, ordered by package.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str, bool)> {
    self.0.iter().flat_map(|(package, options)| {
      options
        .iter()
        .map(move |(option, value)| (package.as_str(), option.as_str(), *value))
    })
  }

  pub fn packages(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.values().map(BTreeMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

pub(crate) fn apply_rules(rules: &[ForcedRule], options: &Options) -> Result<ForcedOptions, ConfigurationError> {
  let required: BTreeSet<String> = requirements(options).into_iter().map(|r| r.name).collect();
  let mut forced = ForcedOptions::default();

  for rule in rules {
    if !required.contains(rule.package) {
      return Err(ConfigurationError::UnknownRequirement {
        package: rule.package.to_string(),
        option: rule.option.to_string(),
      });
    }

    let value = match rule.value {
      ForcedValue::Fixed(value) => value,
      ForcedValue::PassThrough(name) => options.value(name),
    };
    debug!(package = rule.package, option = rule.option, value, "forcing sub-option");

    forced
      .0
      .entry(rule.package.to_string())
      .or_default()
      .insert(rule.option.to_string(), value);
  }

  Ok(forced)
}

/// Sub-options to force onto the required packages.
///
/// Fails if a rule targets a package that is not part of
/// [`requirements`] for these options.
pub fn configure(options: &Options) -> Result<ForcedOptions, ConfigurationError> {
  apply_rules(RULES, options)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn header_only_is_unconditional() {
    let options = Options::from_overrides([("with_openssl", "False"), ("with_framework", "False")]).unwrap();

    let forced = configure(&options).unwrap();

    assert_eq!(forced.get("fmt", "header_only"), Some(true));
    assert_eq!(forced.get("flatbuffers", "header_only"), Some(true));
  }

  #[test]
  fn openssl_flag_passes_through() {
    let enabled = configure(&Options::default()).unwrap();
    assert_eq!(enabled.get("cpp-httplib", "with_openssl"), Some(true));

    let options = Options::from_overrides([("with_openssl", "False")]).unwrap();
    let disabled = configure(&options).unwrap();
    assert_eq!(disabled.get("cpp-httplib", "with_openssl"), Some(false));
  }

  #[test]
  fn rule_for_unrequired_package_is_rejected() {
    let options = Options::from_overrides([("with_framework", "False")]).unwrap();
    let rules = [ForcedRule {
      package: "cxxopts",
      option: "unicode",
      value: ForcedValue::Fixed(true),
    }];

    let result = apply_rules(&rules, &options);

    assert_eq!(
      result,
      Err(ConfigurationError::UnknownRequirement {
        package: "cxxopts".to_string(),
        option: "unicode".to_string(),
      })
    );
  }

  #[test]
  fn serializes_as_nested_map() {
    let forced = configure(&Options::default()).unwrap();

    let json = serde_json::to_value(&forced).unwrap();

    assert_eq!(json["fmt"]["header_only"], serde_json::json!(true));
    assert_eq!(json["cpp-httplib"]["with_openssl"], serde_json::json!(true));
    assert_eq!(forced.len(), 3);
  }
}

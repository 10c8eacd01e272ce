use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Every option the recipe understands.
///
/// Variant order is declaration order, which is also the iteration order of
/// [`Options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionName {
  #[serde(rename = "fPIC")]
  Fpic,
  #[serde(rename = "shared")]
  Shared,
  #[serde(rename = "with_tests")]
  WithTests,
  #[serde(rename = "with_cli")]
  WithCli,
  #[serde(rename = "with_examples")]
  WithExamples,
  #[serde(rename = "with_framework")]
  WithFramework,
  #[serde(rename = "with_openssl")]
  WithOpenssl,
}

impl OptionName {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Fpic => "fPIC",
      Self::Shared => "shared",
      Self::WithTests => "with_tests",
      Self::WithCli => "with_cli",
      Self::WithExamples => "with_examples",
      Self::WithFramework => "with_framework",
      Self::WithOpenssl => "with_openssl",
    }
  }

  /// The declared default for this option.
  pub fn default_value(self) -> bool {
    DECLARED
      .iter()
      .find(|decl| decl.name == self)
      .map(|decl| decl.default)
      .unwrap_or(false)
  }
}

impl fmt::Display for OptionName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for OptionName {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DECLARED
      .iter()
      .map(|decl| decl.name)
      .find(|name| name.as_str() == s)
      .ok_or_else(|| ConfigurationError::UnknownOption(s.to_string()))
  }
}

/// One entry of the declared option schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDecl {
  pub name: OptionName,
  pub default: bool,
}

/// The declared option schema with defaults.
pub const DECLARED: &[OptionDecl] = &[
  OptionDecl {
    name: OptionName::Fpic,
    default: true,
  },
  OptionDecl {
    name: OptionName::Shared,
    default: false,
  },
  OptionDecl {
    name: OptionName::WithTests,
    default: false,
  },
  OptionDecl {
    name: OptionName::WithCli,
    default: false,
  },
  OptionDecl {
    name: OptionName::WithExamples,
    default: false,
  },
  OptionDecl {
    name: OptionName::WithFramework,
    default: true,
  },
  OptionDecl {
    name: OptionName::WithOpenssl,
    default: true,
  },
];

/// Parse a boolean option value.
///
/// Accepts `true/false`, `1/0`, `on/off` and `yes/no`, ignoring case, so both
/// `True` and `true` work.
pub fn parse_bool(value: &str) -> Option<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "true" | "1" | "on" | "yes" => Some(true),
    "false" | "0" | "off" | "no" => Some(false),
    _ => None,
  }
}

/// Split a `NAME=VALUE` assignment as given on the command line.
pub fn parse_assignment(input: &str) -> Result<(String, String), ConfigurationError> {
  match input.split_once('=') {
    Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
      Ok((name.trim().to_string(), value.trim().to_string()))
    }
    _ => Err(ConfigurationError::MalformedAssignment(input.to_string())),
  }
}

/// Stack two override layers: entries in `top` replace entries in `base`
/// with the same name.
///
/// Duplicates inside `top` are kept so that [`Options::from_overrides`] can
/// reject them.
pub fn layer_overrides(base: &[(String, String)], top: &[(String, String)]) -> Vec<(String, String)> {
  let replaced: BTreeSet<&str> = top.iter().map(|(name, _)| name.as_str()).collect();
  base
    .iter()
    .filter(|(name, _)| !replaced.contains(name.as_str()))
    .chain(top.iter())
    .cloned()
    .collect()
}

/// The option state for one recipe invocation.
///
/// Holds a value for every declared option. There are no setters: build a
/// new record with [`Options::from_overrides`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options {
  values: BTreeMap<OptionName, bool>,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      values: DECLARED.iter().map(|decl| (decl.name, decl.default)).collect(),
    }
  }
}

impl Options {
  /// Apply user overrides on top of the declared defaults.
  ///
  /// Fails on unknown option names, values that are not booleans, and
  /// options named more than once.
  pub fn from_overrides<I, K, V>(overrides: I) -> Result<Self, ConfigurationError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
  {
    let mut options = Self::default();
    let mut seen = BTreeSet::new();

    for (name, value) in overrides {
      let (name, value) = (name.as_ref(), value.as_ref());
      let option: OptionName = name.parse()?;
      if !seen.insert(option) {
        return Err(ConfigurationError::DuplicateOverride(name.to_string()));
      }
      let parsed = parse_bool(value).ok_or_else(|| ConfigurationError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
      })?;
      options.values.insert(option, parsed);
    }

    Ok(options)
  }

  /// Look up an option by its declared name.
  pub fn get(&self, name: &str) -> Result<bool, ConfigurationError> {
    let option: OptionName = name.parse()?;
    Ok(self.value(option))
  }

  pub fn value(&self, option: OptionName) -> bool {
    self
      .values
      .get(&option)
      .copied()
      .unwrap_or_else(|| option.default_value())
  }

  /// Options in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
    self.values.iter().map(|(name, value)| (*name, *value))
  }

  /// Options whose value differs from the declared default.
  pub fn overridden(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
    self.iter().filter(|(name, value)| name.default_value() != *value)
  }
}

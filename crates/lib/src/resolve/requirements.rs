use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::guard::{self, Guard};
use crate::options::Options;

/// A pinned package requirement, rendered as `name/version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Requirement {
  pub name: String,
  pub version: String,
}

impl Requirement {
  pub fn new(name: &str, version: &str) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
    }
  }
}

impl fmt::Display for Requirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.name, self.version)
  }
}

/// A requirement table entry: the package is required when `guard` holds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PinnedPackage {
  pub guard: Guard,
  pub name: &'static str,
  pub version: &'static str,
}

/// Runtime dependencies, baseline first.
pub(crate) const RUNTIME: &[PinnedPackage] = &[
  PinnedPackage {
    guard: Guard::Always,
    name: "cpp-httplib",
    version: "0.9.5",
  },
  PinnedPackage {
    guard: Guard::Always,
    name: "flatbuffers",
    version: "2.0.0",
  },
  PinnedPackage {
    guard: Guard::Always,
    name: "fmt",
    version: "8.0.1",
  },
  PinnedPackage {
    guard: Guard::Always,
    name: "ghc-filesystem",
    version: "1.5.8",
  },
  PinnedPackage {
    guard: Guard::Always,
    name: "nlohmann_json",
    version: "3.10.3",
  },
  PinnedPackage {
    guard: guard::CLI_PARSER,
    name: "cxxopts",
    version: "2.2.1",
  },
];

/// Tools needed only while building the package.
pub(crate) const BUILD_TOOLS: &[PinnedPackage] = &[PinnedPackage {
  guard: guard::TESTS,
  name: "catch2",
  version: "2.13.7",
}];

fn select(table: &[PinnedPackage], options: &Options) -> Vec<Requirement> {
  let mut seen = BTreeSet::new();
  let mut selected = Vec::new();

  for entry in table {
    if !entry.guard.holds(options) {
      debug!(package = entry.name, "guard not satisfied, skipping requirement");
      continue;
    }
    if seen.insert(entry.name) {
      selected.push(Requirement::new(entry.name, entry.version));
    }
  }

  selected
}

/// Packages the built library links against.
///
/// Always contains the baseline set; conditional entries follow in table
/// order when their guard holds. Each package appears at most once.
pub fn requirements(options: &Options) -> Vec<Requirement> {
  select(RUNTIME, options)
}

/// Packages needed on the build machine only.
pub fn build_requirements(options: &Options) -> Vec<Requirement> {
  select(BUILD_TOOLS, options)
}

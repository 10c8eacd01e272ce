//! The recipe: one option record and one set of settings, with every
//! resolution hook available as a method.

use serde::Serialize;

use crate::component::{self, PackageInfo};
use crate::consts;
use crate::error::ConfigurationError;
use crate::options::Options;
use crate::resolve::{self, BuildDefinitions, ForcedOptions, Requirement};
use crate::settings::Settings;
use crate::util::hash::{HashError, Hashable, ObjectHash};

/// Static description of the package.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
  pub name: &'static str,
  pub version: &'static str,
  pub description: &'static str,
  pub homepage: &'static str,
  pub url: &'static str,
  pub license: &'static str,
  pub author: &'static str,
  pub topics: &'static [&'static str],
  pub settings: &'static [&'static str],
  pub exports_sources: &'static [&'static str],
}

pub static METADATA: Metadata = Metadata {
  name: consts::PACKAGE_NAME,
  version: consts::PACKAGE_VERSION,
  description: consts::DESCRIPTION,
  homepage: consts::HOMEPAGE,
  url: consts::DOCS_URL,
  license: consts::LICENSE,
  author: consts::AUTHOR,
  topics: consts::TOPICS,
  settings: consts::SETTINGS,
  exports_sources: consts::EXPORTS_SOURCES,
};

/// Inputs that distinguish one binary package from another.
#[derive(Serialize)]
struct PackageIdInput<'a> {
  settings: &'a Settings,
  options: &'a Options,
  requires: Vec<String>,
}

impl Hashable for PackageIdInput<'_> {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
  options: Options,
  settings: Settings,
}

impl Recipe {
  pub fn new(options: Options, settings: Settings) -> Self {
    Self { options, settings }
  }

  pub fn metadata(&self) -> &'static Metadata {
    &METADATA
  }

  pub fn options(&self) -> &Options {
    &self.options
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  pub fn requirements(&self) -> Vec<Requirement> {
    resolve::requirements(&self.options)
  }

  pub fn build_requirements(&self) -> Vec<Requirement> {
    resolve::build_requirements(&self.options)
  }

  pub fn configure(&self) -> Result<ForcedOptions, ConfigurationError> {
    resolve::configure(&self.options)
  }

  pub fn build_definitions(&self) -> BuildDefinitions {
    resolve::build_definitions(&self.options)
  }

  pub fn package_info(&self) -> Result<PackageInfo, ConfigurationError> {
    component::package_info(&self.options)
  }

  /// Identifier of the binary package this configuration produces.
  ///
  /// Covers settings, options and the pinned runtime requirements. Build
  /// requirements do not affect the binary and are left out.
  pub fn package_id(&self) -> Result<ObjectHash, HashError> {
    PackageIdInput {
      settings: &self.settings,
      options: &self.options,
      requires: self.requirements().iter().map(ToString::to_string).collect(),
    }
    .compute_hash()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::settings::BuildType;

  #[test]
  fn default_recipe_scenario() {
    let recipe = Recipe::new(Options::default(), Settings::default());

    let names: Vec<_> = recipe.requirements().into_iter().map(|r| r.name).collect();
    assert!(names.contains(&"cxxopts".to_string()));

    let forced = recipe.configure().unwrap();
    assert_eq!(forced.get("fmt", "header_only"), Some(true));
    assert_eq!(forced.get("cpp-httplib", "with_openssl"), Some(true));
  }

  #[test]
  fn package_id_is_stable() {
    let recipe = Recipe::new(Options::default(), Settings::default());

    assert_eq!(recipe.package_id().unwrap(), recipe.package_id().unwrap());
  }

  #[test]
  fn package_id_tracks_options_and_settings() {
    let base = Recipe::new(Options::default(), Settings::default());
    let shared = Recipe::new(
      Options::from_overrides([("shared", "True")]).unwrap(),
      Settings::default(),
    );
    let debug = Recipe::new(Options::default(), Settings::default().with_build_type(BuildType::Debug));

    let id = base.package_id().unwrap();
    assert_ne!(id, shared.package_id().unwrap());
    assert_ne!(id, debug.package_id().unwrap());
  }

  #[test]
  fn test_tools_stay_out_of_runtime_requirements() {
    let without = Recipe::new(Options::default(), Settings::default());
    let with = Recipe::new(
      Options::from_overrides([("with_tests", "True")]).unwrap(),
      Settings::default(),
    );

    // with_tests is itself an option, so the ids differ; the tool requirement
    // only shows up in build_requirements.
    assert_ne!(without.package_id().unwrap(), with.package_id().unwrap());
    assert_eq!(with.requirements(), without.requirements());
    assert_eq!(with.build_requirements().len(), 1);
  }

  #[test]
  fn metadata_describes_sdk() {
    let metadata = Recipe::default().metadata();

    assert_eq!(metadata.name, "touca");
    assert_eq!(metadata.version, "1.5.2");
    assert_eq!(metadata.license, "Apache-2.0");
  }
}

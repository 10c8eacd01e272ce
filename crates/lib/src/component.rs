//! Consumer-facing component metadata.
//!
//! A downstream project linking against the SDK sees a single package-level
//! name and one component, `client`, together with the library artifacts it
//! produces and the external components it links against.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::consts::{CLIENT_COMPONENT, CLIENT_LIBS, PACKAGE_NAME};
use crate::error::ConfigurationError;
use crate::options::Options;
use crate::resolve::requirements::{RUNTIME, requirements};

/// Reference to a component of some package, written `package::component`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentRef {
  pub package: String,
  pub component: String,
}

impl ComponentRef {
  /// The default component of a package, named after the package itself.
  pub fn package_default(package: &str) -> Self {
    Self {
      package: package.to_string(),
      component: package.to_string(),
    }
  }
}

impl fmt::Display for ComponentRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}::{}", self.package, self.component)
  }
}

impl Serialize for ComponentRef {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
  pub name: String,
  /// Target name used by CMake `find_package` consumers.
  pub find_package_name: String,
  pub libs: Vec<String>,
  pub requires: Vec<ComponentRef>,
}

/// Everything published for consumers of the built package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
  pub name: String,
  pub components: BTreeMap<String, Component>,
}

impl PackageInfo {
  pub fn component(&self, name: &str) -> Option<&Component> {
    self.components.get(name)
  }
}

/// Assemble the published package info for `options`.
///
/// The client component requires the default component of every runtime
/// requirement whose guard holds. Each one is checked against the resolved
/// requirement set, so a component can never link against a package that was
/// not requested.
pub fn package_info(options: &Options) -> Result<PackageInfo, ConfigurationError> {
  let resolved: BTreeSet<String> = requirements(options).into_iter().map(|r| r.name).collect();

  let requires = RUNTIME
    .iter()
    .filter(|entry| entry.guard.holds(options))
    .map(|entry| ComponentRef::package_default(entry.name))
    .collect();

  let client = Component {
    name: CLIENT_COMPONENT.to_string(),
    find_package_name: CLIENT_COMPONENT.to_string(),
    libs: CLIENT_LIBS.iter().map(|lib| lib.to_string()).collect(),
    requires,
  };
  check_requires(&client, &resolved)?;

  Ok(PackageInfo {
    name: PACKAGE_NAME.to_string(),
    components: BTreeMap::from([(client.name.clone(), client)]),
  })
}

fn check_requires(component: &Component, resolved: &BTreeSet<String>) -> Result<(), ConfigurationError> {
  match component.requires.iter().find(|dep| !resolved.contains(&dep.package)) {
    Some(dep) => Err(ConfigurationError::UndeclaredComponentDependency {
      component: component.name.clone(),
      dependency: dep.to_string(),
    }),
    None => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn requires(info: &PackageInfo) -> Vec<String> {
    info
      .component(CLIENT_COMPONENT)
      .unwrap()
      .requires
      .iter()
      .map(ToString::to_string)
      .collect()
  }

  #[test]
  fn framework_alone_pulls_in_cli_parser() {
    let options = Options::from_overrides([
      ("with_examples", "False"),
      ("with_framework", "True"),
      ("with_cli", "False"),
    ])
    .unwrap();

    let info = package_info(&options).unwrap();

    assert_eq!(
      requires(&info),
      vec![
        "cpp-httplib::cpp-httplib",
        "flatbuffers::flatbuffers",
        "fmt::fmt",
        "ghc-filesystem::ghc-filesystem",
        "nlohmann_json::nlohmann_json",
        "cxxopts::cxxopts",
      ]
    );
  }

  #[test]
  fn baseline_only_when_guard_fails() {
    let options = Options::from_overrides([("with_framework", "False")]).unwrap();

    let info = package_info(&options).unwrap();

    assert_eq!(requires(&info).len(), 5);
    assert!(!requires(&info).contains(&"cxxopts::cxxopts".to_string()));
  }

  #[test]
  fn client_component_shape() {
    let info = package_info(&Options::default()).unwrap();
    let client = info.component("client").unwrap();

    assert_eq!(info.name, "touca");
    assert_eq!(client.find_package_name, "client");
    assert_eq!(client.libs, vec!["touca"]);
    assert_eq!(info.components.len(), 1);
  }

  #[test]
  fn undeclared_dependency_is_rejected() {
    let component = Component {
      name: "client".to_string(),
      find_package_name: "client".to_string(),
      libs: vec![],
      requires: vec![ComponentRef::package_default("openssl")],
    };
    let resolved = BTreeSet::from(["fmt".to_string()]);

    assert_eq!(
      check_requires(&component, &resolved),
      Err(ConfigurationError::UndeclaredComponentDependency {
        component: "client".to_string(),
        dependency: "openssl::openssl".to_string(),
      })
    );
  }

  #[test]
  fn component_refs_serialize_as_strings() {
    let info = package_info(&Options::default()).unwrap();

    let json = serde_json::to_value(&info).unwrap();

    assert_eq!(json["components"]["client"]["requires"][0], "cpp-httplib::cpp-httplib");
  }
}

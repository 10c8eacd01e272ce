//! Profile files: option overrides and settings stored in TOML.
//!
//! ```toml
//! [options]
//! with_cli = true
//! shared = "True"
//!
//! [settings]
//! build_type = "Debug"
//! compiler = "gcc"
//! ```
//!
//! Option names are validated when the overrides are applied to
//! [`Options`](crate::options::Options), not while parsing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::settings::{BuildType, Settings};

#[derive(Debug, Error)]
pub enum ProfileError {
  #[error("failed to read profile {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse profile {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// An option value as written in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
  Bool(bool),
  Text(String),
}

impl ProfileValue {
  fn as_override(&self) -> String {
    match self {
      ProfileValue::Bool(value) => value.to_string(),
      ProfileValue::Text(value) => value.clone(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSettings {
  pub build_type: Option<String>,
  pub compiler: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
  #[serde(default)]
  pub options: BTreeMap<String, ProfileValue>,
  #[serde(default)]
  pub settings: ProfileSettings,
}

impl Profile {
  pub fn load(path: &Path) -> Result<Self, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let profile: Profile = toml::from_str(&content).map_err(|source| ProfileError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), options = profile.options.len(), "loaded profile");
    Ok(profile)
  }

  /// Option overrides as `(name, value)` pairs, sorted by name.
  pub fn option_overrides(&self) -> Vec<(String, String)> {
    self
      .options
      .iter()
      .map(|(name, value)| (name.clone(), value.as_override()))
      .collect()
  }

  /// Apply the profile's settings on top of `base`.
  pub fn apply_settings(&self, base: Settings) -> Result<Settings, ConfigurationError> {
    let mut settings = base;
    if let Some(build_type) = &self.settings.build_type {
      settings = settings.with_build_type(build_type.parse::<BuildType>()?);
    }
    if let Some(compiler) = &self.settings.compiler {
      settings = settings.with_compiler(compiler);
    }
    Ok(settings)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::{OptionName, Options};
  use tempfile::TempDir;

  fn write_profile(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profile.toml");
    std::fs::write(&path, content).unwrap();
    (temp, path)
  }

  #[test]
  fn load_options_and_settings() {
    let (_temp, path) = write_profile(
      r#"
[options]
with_cli = true
shared = "True"

[settings]
build_type = "Debug"
compiler = "gcc"
"#,
    );

    let profile = Profile::load(&path).unwrap();

    assert_eq!(
      profile.option_overrides(),
      vec![
        ("shared".to_string(), "True".to_string()),
        ("with_cli".to_string(), "true".to_string()),
      ]
    );
    let settings = profile.apply_settings(Settings::default()).unwrap();
    assert_eq!(settings.build_type, BuildType::Debug);
    assert_eq!(settings.compiler.as_deref(), Some("gcc"));
  }

  #[test]
  fn overrides_feed_option_record() {
    let (_temp, path) = write_profile("[options]\nwith_openssl = false\n");

    let profile = Profile::load(&path).unwrap();
    let options = Options::from_overrides(profile.option_overrides()).unwrap();

    assert!(!options.value(OptionName::WithOpenssl));
  }

  #[test]
  fn unknown_option_surfaces_at_construction() {
    let (_temp, path) = write_profile("[options]\nwith_gui = true\n");

    let profile = Profile::load(&path).unwrap();

    assert_eq!(
      Options::from_overrides(profile.option_overrides()),
      Err(ConfigurationError::UnknownOption("with_gui".to_string()))
    );
  }

  #[test]
  fn unknown_section_fails_to_parse() {
    let (_temp, path) = write_profile("[env]\nCC = \"gcc\"\n");

    assert!(matches!(Profile::load(&path), Err(ProfileError::Parse { .. })));
  }

  #[test]
  fn missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");

    let err = Profile::load(&path).unwrap_err();

    assert!(matches!(err, ProfileError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
  }

  #[test]
  fn invalid_build_type_is_rejected() {
    let profile = Profile {
      settings: ProfileSettings {
        build_type: Some("Fast".to_string()),
        compiler: None,
      },
      ..Profile::default()
    };

    assert!(profile.apply_settings(Settings::default()).is_err());
  }
}

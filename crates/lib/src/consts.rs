//! Fixed recipe metadata for the Touca C++ SDK.

/// Package name, also the name of the published package-level target.
pub const PACKAGE_NAME: &str = "touca";
pub const PACKAGE_VERSION: &str = "1.5.2";
pub const DESCRIPTION: &str = "Touca SDK for C++";
pub const HOMEPAGE: &str = "https://github.com/trytouca/touca-cpp";
pub const DOCS_URL: &str = "https://touca.io/docs";
pub const LICENSE: &str = "Apache-2.0";
pub const AUTHOR: &str = "Touca, Inc. <hello@touca.io>";
pub const TOPICS: &[&str] = &["regression-testing", "test-framework", "test-automation"];

/// Settings the binary package depends on.
pub const SETTINGS: &[&str] = &["os", "compiler", "build_type", "arch"];

/// Source paths exported alongside the recipe.
pub const EXPORTS_SOURCES: &[&str] = &[
  "CMakeLists.txt",
  "LICENSE",
  "README.md",
  "cmake/**",
  "include/**",
  "src/**",
  "tests/**",
  "cli/**",
];

/// The single component exposed to consumers.
pub const CLIENT_COMPONENT: &str = "client";

/// Library artifacts produced by the client component.
pub const CLIENT_LIBS: &[&str] = &["touca"];

/// Length of the truncated hex digest used for package ids.
pub const PACKAGE_ID_LEN: usize = 20;

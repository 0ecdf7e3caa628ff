//! Constants used throughout the header tool

/// Tool version, from the crate manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = "sht.toml";

/// Location of the CMake file-API reply directory inside a build tree
pub const DEFAULT_CMAKE_API_DIR: &str = ".cmake/api/v1/reply";

/// Prefix of the codemodel object in the reply directory
pub const CODEMODEL_PREFIX: &str = "codemodel-v2";

/// File suffixes that are tokenized
pub const DEFAULT_EXTENSIONS: &[&str] = &["cpp", "h"];

pub const BANNER: &str = r"
  (\
  .'.
  | |
  | |
  |_|--------------------------|
    \_   Shadow Header Tool    |
      \_       v{version:<8}   |
        \______________________|
";

/// The banner with the version filled in.
pub fn banner() -> String {
    BANNER.replace("{version:<8}", &format!("{:<8}", VERSION))
}

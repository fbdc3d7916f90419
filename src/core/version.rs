//! Version information, including the git revision the binary was built from.
//!
//! The same string is stamped into every written assembly, so a file can be traced back to the
//! build that produced it.

const GIT_VERSION: &str = git_version::git_version!(
    args = ["--broken", "--always", "--exclude", "*"],
    prefix = "git:",
    fallback = "release"
);

/// The package version followed by the git revision, e.g. `0.1.0 (git:3fa2c1e)`.
pub fn version() -> String {
    format!("{} ({GIT_VERSION})", env!("CARGO_PKG_VERSION"))
}

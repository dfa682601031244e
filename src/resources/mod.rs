//! Idempotent package primitives (check + apply pattern) and the package
//! store they run against.
pub mod package;
pub mod profile;
pub mod store;

/// State of a manifest entry relative to the installed set.
///
/// # Examples
///
/// ```
/// use brewsync::resources::ResourceState;
///
/// assert_ne!(ResourceState::Missing, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Not in the installed set.
    Missing,
    /// Already installed.
    Correct,
}

//! Package categories and the manifest marker keys that select them.
use std::fmt;

/// Kind of item a manifest entry asks the package manager to install.
///
/// # Examples
///
/// ```
/// use brewsync::config::Category;
///
/// assert_eq!(Category::from_marker("homebrew_cask"), Some(Category::Cask));
/// assert_eq!(Category::from_marker("cask"), Some(Category::Cask));
/// assert_eq!(Category::from_marker("name"), None);
/// assert_eq!(Category::Formula.to_string(), "formula");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Third-party source of formulae and casks.
    Tap,
    /// GUI application package.
    Cask,
    /// Command-line package.
    Formula,
    /// Python package installed through the pip bridge.
    Pip,
    /// Ruby gem installed through the gem bridge.
    Gem,
}

impl Category {
    /// Every category, in the order a run reconciles them.
    pub const ALL: [Self; 5] = [Self::Tap, Self::Cask, Self::Formula, Self::Pip, Self::Gem];

    /// Canonical manifest marker key (e.g. `homebrew_formula`).
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Tap => "homebrew_tap",
            Self::Cask => "homebrew_cask",
            Self::Formula => "homebrew_formula",
            Self::Pip => "homebrew_pip",
            Self::Gem => "homebrew_gem",
        }
    }

    /// Short alias accepted for the marker key (e.g. `formula`).
    #[must_use]
    pub const fn short_marker(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Cask => "cask",
            Self::Formula => "formula",
            Self::Pip => "pip",
            Self::Gem => "gem",
        }
    }

    /// Resolve a mapping key to the category it marks, if any.
    #[must_use]
    pub fn from_marker(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.marker() == key || c.short_marker() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_marker())
    }
}

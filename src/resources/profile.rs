//! Per-category command profiles: how to list and how to install.
//!
//! A profile is plain data. The reconciliation loop is the same for every
//! category; only the argument vectors and the installed-set filter differ.
use std::collections::HashSet;

use crate::config::Category;

/// Output of `brew pip --version` that marks the legacy bridge release.
pub const LEGACY_PIP_BRIDGE_PREFIX: &str = "brew pip v0.4.";

/// Arguments that make the pip bridge print its version.
pub const PIP_VERSION_ARGS: &[&str] = &["pip", "--version"];

/// Normalisation applied to list output before membership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstalledFilter {
    /// Every non-empty line is an installed identifier.
    Identity,
    /// Only lines carrying the prefix count, with the prefix removed
    /// (e.g. `pip-requests` → `requests`).
    StripPrefix(&'static str),
}

impl InstalledFilter {
    /// Build the installed set from raw list output.
    ///
    /// # Examples
    ///
    /// ```
    /// use brewsync::resources::profile::InstalledFilter;
    ///
    /// let set = InstalledFilter::StripPrefix("gem-").apply("wget\ngem-rubocop\n");
    /// assert!(set.contains("rubocop"));
    /// assert!(!set.contains("wget"));
    /// ```
    #[must_use]
    pub fn apply(self, output: &str) -> HashSet<String> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match self {
                Self::Identity => Some(line),
                Self::StripPrefix(prefix) => line.strip_prefix(prefix),
            })
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

/// List/install argument vectors and installed-set filter for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Category this profile reconciles.
    pub category: Category,
    /// Arguments that print the installed set, one identifier per line.
    pub list_args: &'static [&'static str],
    /// Arguments that install one item; the item name is appended.
    pub install_args: &'static [&'static str],
    /// Normalisation of the list output.
    pub filter: InstalledFilter,
}

impl CategoryProfile {
    /// Default profile for `category`.
    ///
    /// Pip uses the current bridge; see [`PipBridge`] for the legacy one.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Tap => Self {
                category,
                list_args: &["tap", "--quieter"],
                install_args: &["tap", "--quieter"],
                filter: InstalledFilter::Identity,
            },
            Category::Cask => Self {
                category,
                list_args: &["cask", "list"],
                install_args: &["cask", "install"],
                filter: InstalledFilter::Identity,
            },
            Category::Formula => Self {
                category,
                list_args: &["list"],
                install_args: &["install"],
                filter: InstalledFilter::Identity,
            },
            Category::Pip => PipBridge::Current.profile(),
            Category::Gem => Self {
                category,
                list_args: &["list"],
                install_args: &["gem", "install"],
                filter: InstalledFilter::StripPrefix("gem-"),
            },
        }
    }

    /// Full install argument vector for `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use brewsync::config::Category;
    /// use brewsync::resources::profile::CategoryProfile;
    ///
    /// let profile = CategoryProfile::for_category(Category::Cask);
    /// assert_eq!(profile.install_command("firefox"), vec!["cask", "install", "firefox"]);
    /// ```
    #[must_use]
    pub fn install_command<'a>(&self, name: &'a str) -> Vec<&'a str> {
        let mut args: Vec<&'a str> = self.install_args.to_vec();
        args.push(name);
        args
    }
}

/// Release family of the pip bridging formula.
///
/// The two releases expose pip packages differently: the current one has
/// native `pip list`/`pip install` subcommands, the legacy one installs
/// packages as `pip-<name>` formulae.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipBridge {
    /// Bridge with native pip subcommands.
    Current,
    /// `brew pip v0.4.x`, which installs pip packages as prefixed formulae.
    Legacy,
}

impl PipBridge {
    /// Select the bridge from the output of `brew pip --version`.
    ///
    /// # Examples
    ///
    /// ```
    /// use brewsync::resources::profile::PipBridge;
    ///
    /// assert_eq!(PipBridge::from_version("brew pip v0.4.2\n"), PipBridge::Legacy);
    /// assert_eq!(PipBridge::from_version("brew pip v1.0.0\n"), PipBridge::Current);
    /// ```
    #[must_use]
    pub fn from_version(version: &str) -> Self {
        if version.starts_with(LEGACY_PIP_BRIDGE_PREFIX) {
            Self::Legacy
        } else {
            Self::Current
        }
    }

    /// Profile used to reconcile pip packages with this bridge.
    #[must_use]
    pub const fn profile(self) -> CategoryProfile {
        match self {
            Self::Current => CategoryProfile {
                category: Category::Pip,
                list_args: &["pip", "list"],
                install_args: &["pip", "install"],
                filter: InstalledFilter::Identity,
            },
            Self::Legacy => CategoryProfile {
                category: Category::Pip,
                list_args: &["list"],
                install_args: &["pip"],
                filter: InstalledFilter::StripPrefix("pip-"),
            },
        }
    }
}

impl std::fmt::Display for PipBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_filter_trims_and_skips_blank_lines() {
        let set = InstalledFilter::Identity.apply("wget\n  jq  \n\n\ncurl\n");
        assert_eq!(set.len(), 3);
        assert!(set.contains("jq"));
        assert!(!set.contains(""));
    }

    #[test]
    fn strip_prefix_filter_drops_unprefixed_lines() {
        let set = InstalledFilter::StripPrefix("pip-").apply("python\npip-requests\npip-\nbrew-pip\n");
        assert_eq!(set, HashSet::from(["requests".to_string()]));
    }

    #[test]
    fn legacy_detection_requires_prefix_at_start() {
        assert_eq!(PipBridge::from_version("v0.4.1 brew pip"), PipBridge::Current);
        assert_eq!(PipBridge::from_version(""), PipBridge::Current);
        assert_eq!(PipBridge::from_version("brew pip v0.4.0"), PipBridge::Legacy);
        assert_eq!(PipBridge::from_version("brew pip v0.5.0"), PipBridge::Current);
    }

    #[test]
    fn legacy_profile_uses_formula_listing() {
        let profile = PipBridge::Legacy.profile();
        assert_eq!(profile.list_args, &["list"]);
        assert_eq!(profile.install_command("requests"), vec!["pip", "requests"]);
        assert_eq!(profile.filter, InstalledFilter::StripPrefix("pip-"));
    }

    #[test]
    fn pip_default_profile_is_current_bridge() {
        assert_eq!(
            CategoryProfile::for_category(Category::Pip),
            PipBridge::Current.profile()
        );
    }

    #[test]
    fn every_profile_matches_its_category() {
        for category in Category::ALL {
            assert_eq!(CategoryProfile::for_category(category).category, category);
        }
    }

    #[test]
    fn gem_profile_strips_gem_prefix() {
        let profile = CategoryProfile::for_category(Category::Gem);
        let set = profile.filter.apply("gem-rubocop\nwget\n");
        assert!(set.contains("rubocop"));
        assert!(!set.contains("wget"));
        assert_eq!(
            profile.install_command("rubocop"),
            vec!["gem", "install", "rubocop"]
        );
    }

    #[test]
    fn tap_profile_lists_and_adds_quietly() {
        let profile = CategoryProfile::for_category(Category::Tap);
        assert_eq!(profile.list_args, &["tap", "--quieter"]);
        assert_eq!(
            profile.install_command("homebrew/cask"),
            vec!["tap", "--quieter", "homebrew/cask"]
        );
    }
}

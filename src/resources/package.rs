//! Package resource: one manifest entry checked against an installed set.
use std::collections::HashSet;

use super::profile::CategoryProfile;
use super::store::PackageStore;
use super::ResourceState;
use crate::error::EntryError;

/// An item of one category that can be checked and installed.
pub struct PackageResource<'a> {
    /// Name passed to the install command.
    pub name: &'a str,
    /// Command profile of the item's category.
    pub profile: &'a CategoryProfile,
    store: &'a dyn PackageStore,
}

impl std::fmt::Debug for PackageResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageResource")
            .field("name", &self.name)
            .field("profile", &self.profile)
            .field("store", &"<dyn PackageStore>")
            .finish()
    }
}

impl<'a> PackageResource<'a> {
    /// Create a new package resource.
    #[must_use]
    pub const fn new(
        name: &'a str,
        profile: &'a CategoryProfile,
        store: &'a dyn PackageStore,
    ) -> Self {
        Self {
            name,
            profile,
            store,
        }
    }

    /// Determine the resource state from a pre-fetched installed set.
    ///
    /// Presence is an exact string match; there is no version comparison.
    #[must_use]
    pub fn state_from_installed(&self, installed: &HashSet<String>) -> ResourceState {
        if installed.contains(self.name) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }

    /// Install the item.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Install`] if the install command fails.
    pub fn apply(&self) -> Result<(), EntryError> {
        self.store.install(self.profile, self.name)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Category;
    use crate::resources::store::MockPackageStore;

    #[test]
    fn state_from_installed_is_exact_match() {
        let store = MockPackageStore::new();
        let profile = CategoryProfile::for_category(Category::Formula);
        let installed = HashSet::from(["python@3.12".to_string(), "wget".to_string()]);

        let wget = PackageResource::new("wget", &profile, &store);
        assert_eq!(wget.state_from_installed(&installed), ResourceState::Correct);

        let python = PackageResource::new("python", &profile, &store);
        assert_eq!(
            python.state_from_installed(&installed),
            ResourceState::Missing
        );
    }

    #[test]
    fn apply_installs_through_store() {
        let mut store = MockPackageStore::new();
        store
            .expect_install()
            .withf(|profile, name| profile.category == Category::Formula && name == "wget")
            .times(1)
            .returning(|_, _| Ok(()));
        let profile = CategoryProfile::for_category(Category::Formula);
        let resource = PackageResource::new("wget", &profile, &store);
        resource.apply().unwrap();
    }

    #[test]
    fn apply_propagates_install_error() {
        let mut store = MockPackageStore::new();
        store.expect_install().returning(|profile, name| {
            Err(EntryError::Install {
                category: profile.category,
                name: name.to_string(),
                output: "boom".to_string(),
            })
        });
        let profile = CategoryProfile::for_category(Category::Gem);
        let resource = PackageResource::new("rubocop", &profile, &store);
        assert!(matches!(
            resource.apply().unwrap_err(),
            EntryError::Install { .. }
        ));
    }
}

//! Implicit dependencies added to the manifest before reconciliation.
//!
//! Casks need the default cask taps, and the pip and gem categories need the
//! bridging formulae that teach the package manager about those ecosystems.
//! Every rule is additive, by name only, and idempotent.
use super::category::Category;
use super::classify::{Entry, Manifest};

/// Taps required whenever any cask is declared.
pub const CASK_TAPS: [&str; 4] = [
    "homebrew/cask",
    "homebrew/cask-drivers",
    "homebrew/cask-fonts",
    "homebrew/cask-versions",
];

/// Formulae required whenever any pip package is declared.
pub const PIP_SUPPORT_FORMULAE: [&str; 2] = ["python", "brew-pip"];

/// Formulae required whenever any gem package is declared.
pub const GEM_SUPPORT_FORMULAE: [&str; 1] = ["brew-gem"];

/// Append a synthetic entry for each of `names` not already present in
/// `bucket`, returning the names that were added.
fn ensure_entries<'a>(
    bucket: &mut Vec<Entry>,
    category: Category,
    names: &[&'a str],
) -> Vec<&'a str> {
    let mut added = Vec::new();
    for name in names {
        let present = bucket.iter().any(|e| e.name.as_deref() == Some(*name));
        if !present {
            bucket.push(Entry::synthetic(category, name));
            added.push(*name);
        }
    }
    added
}

/// An entry added by [`inject`], for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    /// Bucket the entry was appended to.
    pub category: Category,
    /// Name of the appended entry.
    pub name: String,
    /// Category whose presence triggered the rule.
    pub required_by: Category,
}

/// Apply every injection rule to `manifest`.
pub fn inject(manifest: &mut Manifest) -> Vec<Injected> {
    let rules: [(Category, Category, &[&str]); 3] = [
        (Category::Cask, Category::Tap, &CASK_TAPS),
        (Category::Pip, Category::Formula, &PIP_SUPPORT_FORMULAE),
        (Category::Gem, Category::Formula, &GEM_SUPPORT_FORMULAE),
    ];

    let mut injected = Vec::new();
    for (trigger, target, names) in rules {
        if manifest.bucket(trigger).is_empty() {
            continue;
        }
        for name in ensure_entries(manifest.bucket_mut(target), target, names) {
            injected.push(Injected {
                category: target,
                name: name.to_string(),
                required_by: trigger,
            });
        }
    }
    injected
}

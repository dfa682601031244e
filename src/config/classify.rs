//! Classification of raw manifest records into typed per-category buckets.
use super::category::Category;
use super::manifest::{ManifestRecord, describe, record_name};
use super::validation::ValidationWarning;

/// Where an entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Declared in the manifest.
    Declared {
        /// Zero-based position of the record in the manifest.
        index: usize,
        /// Rendering of the original record, for diagnostics.
        record: String,
    },
    /// Added implicitly because another category needs it.
    Synthetic,
}

/// A manifest entry bound to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Category decided at parse time.
    pub category: Category,
    /// Name passed to the install command; `None` if the record had no
    /// string `name`.
    pub name: Option<String>,
    /// Where the entry came from.
    pub origin: Origin,
}

impl Entry {
    /// Create an entry added by an injection rule.
    #[must_use]
    pub fn synthetic(category: Category, name: &str) -> Self {
        Self {
            category,
            name: Some(name.to_string()),
            origin: Origin::Synthetic,
        }
    }

    /// Rendering used when reporting a name error.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.origin {
            Origin::Declared { record, .. } => record.clone(),
            Origin::Synthetic => format!("{{{}: ~}}", self.category.marker()),
        }
    }
}

/// Manifest entries split into one ordered bucket per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Taps to add.
    pub taps: Vec<Entry>,
    /// Casks to install.
    pub casks: Vec<Entry>,
    /// Formulae to install.
    pub formulae: Vec<Entry>,
    /// Pip packages to install.
    pub pip: Vec<Entry>,
    /// Gem packages to install.
    pub gems: Vec<Entry>,
}

impl Manifest {
    /// Entries of one category, in declaration order.
    #[must_use]
    pub fn bucket(&self, category: Category) -> &[Entry] {
        match category {
            Category::Tap => &self.taps,
            Category::Cask => &self.casks,
            Category::Formula => &self.formulae,
            Category::Pip => &self.pip,
            Category::Gem => &self.gems,
        }
    }

    /// Mutable access to one category's bucket.
    pub const fn bucket_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Tap => &mut self.taps,
            Category::Cask => &mut self.casks,
            Category::Formula => &mut self.formulae,
            Category::Pip => &mut self.pip,
            Category::Gem => &mut self.gems,
        }
    }

    /// Total number of entries across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    /// Whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort records into buckets, returning warnings for records that were
/// dropped.
///
/// A record must carry the marker of exactly one category. Records with no
/// marker, or with markers of two different categories, are dropped with a
/// warning. Records without a string `name` are kept: reconciliation reports
/// them as name errors.
#[must_use]
pub fn classify(records: &[ManifestRecord]) -> (Manifest, Vec<ValidationWarning>) {
    let mut manifest = Manifest::default();
    let mut warnings = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let item = format!("entry {}", index + 1);
        let mut categories: Vec<Category> = record
            .keys()
            .filter_map(|k| k.as_str().and_then(Category::from_marker))
            .collect();
        categories.sort_unstable();
        categories.dedup();

        let category = match categories.as_slice() {
            [one] => *one,
            [] => {
                warnings.push(ValidationWarning::new(
                    item,
                    format!("no category marker, ignoring {}", describe(record)),
                ));
                continue;
            }
            many => {
                let markers: Vec<&str> = many.iter().map(|c| c.marker()).collect();
                warnings.push(ValidationWarning::new(
                    item,
                    format!(
                        "ambiguous category markers ({}), ignoring {}",
                        markers.join(", "),
                        describe(record)
                    ),
                ));
                continue;
            }
        };

        manifest.bucket_mut(category).push(Entry {
            category,
            name: record_name(record).map(String::from),
            origin: Origin::Declared {
                index,
                record: describe(record),
            },
        });
    }

    (manifest, warnings)
}

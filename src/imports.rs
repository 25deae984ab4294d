//! Import synthesis: ordered identifier buckets and the statements they render to.

use crate::classify::{Bucket, Package};
use crate::model::ComponentMeta;

/// Deduplicated identifier list in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSet {
    names: Vec<String>,
}

impl ImportSet {
    /// Insert a name; returns false if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.insert(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Members joined with ", ".
    pub fn joined(&self) -> String {
        self.names.join(", ")
    }
}

impl<'a> FromIterator<&'a str> for ImportSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = ImportSet::default();
        set.extend(iter);
        set
    }
}

/// Render an import template. `{}` is replaced by the joined members; an
/// empty set renders to an empty string.
pub fn render(set: &ImportSet, template: &str) -> String {
    if set.is_empty() {
        return String::new();
    }
    template.replacen("{}", &set.joined(), 1)
}

/// Render `export { a, b } from 'module';`, or nothing for an empty set.
pub fn render_re_exports(set: &ImportSet, module: &str) -> String {
    render(set, &format!("export {{ {{}} }} from '{}';", module))
}

/// Import template for a fixed package.
pub fn package_template(package: Package) -> String {
    format!("import {{ {{}} }} from '{}';", package.module())
}

/// Import template for a local component, relative to `<dsd>/doc/index.mdx`.
pub fn local_template(meta: &ComponentMeta) -> String {
    format!("import {{ {{}} }} from '../../{}/src';", meta.folder)
}

/// Per-document buckets: one set per fixed package plus local components.
#[derive(Debug, Default, Clone)]
pub struct Buckets {
    packages: [ImportSet; 7],
    local: Vec<(ComponentMeta, ImportSet)>,
}

impl Buckets {
    pub fn add(&mut self, identifier: &str, bucket: &Bucket) {
        match bucket {
            Bucket::Package(package) => {
                self.packages[slot(*package)].insert(identifier);
            }
            Bucket::Local(meta) => {
                let idx = match self.local.iter().position(|(m, _)| m == meta) {
                    Some(idx) => idx,
                    None => {
                        self.local.push((meta.clone(), ImportSet::default()));
                        self.local.len() - 1
                    }
                };
                self.local[idx].1.insert(identifier);
            }
        }
    }

    pub fn package(&self, package: Package) -> &ImportSet {
        &self.packages[slot(package)]
    }

    pub fn local(&self) -> &[(ComponentMeta, ImportSet)] {
        &self.local
    }

    pub fn is_empty(&self) -> bool {
        self.packages.iter().all(ImportSet::is_empty) && self.local.is_empty()
    }

    /// Import lines in header order: vendor icon packs, generic icons, core,
    /// local components, input, spinner. Empty buckets produce no line.
    pub fn import_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for package in Package::ALL {
            lines.push(render(self.package(package), &package_template(package)));
            if package == Package::Core {
                for (meta, set) in &self.local {
                    lines.push(render(set, &local_template(meta)));
                }
            }
        }
        lines.retain(|line| !line.is_empty());
        lines
    }
}

fn slot(package: Package) -> usize {
    Package::ALL
        .iter()
        .position(|p| *p == package)
        .unwrap_or_default()
}

/// The framework-core, icon and input buckets shared across a batch.
#[derive(Debug, Default, Clone)]
pub struct SharedBuckets {
    pub core: ImportSet,
    pub icons: ImportSet,
    pub input: ImportSet,
}

impl SharedBuckets {
    fn set_mut(&mut self, package: Package) -> Option<&mut ImportSet> {
        match package {
            Package::Core => Some(&mut self.core),
            Package::Icons => Some(&mut self.icons),
            Package::Input => Some(&mut self.input),
            _ => None,
        }
    }

    fn sets(&self) -> [(Package, &ImportSet); 3] {
        [
            (Package::Icons, &self.icons),
            (Package::Core, &self.core),
            (Package::Input, &self.input),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.sets().iter().all(|(_, set)| set.is_empty())
    }

    /// One re-export line per non-empty bucket.
    pub fn re_export_lines(&self) -> Vec<String> {
        self.sets()
            .iter()
            .map(|(package, set)| render_re_exports(set, package.module()))
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn absorb(&mut self, other: &SharedBuckets) {
        for (package, set) in other.sets() {
            if let Some(target) = self.set_mut(package) {
                target.extend(set.iter());
            }
        }
    }

    fn clear(&mut self) {
        self.core.clear();
        self.icons.clear();
        self.input.clear();
    }
}

/// Batch-wide accumulator passed by reference into every document rewrite.
///
/// `current` collects the shared buckets of the document being processed and
/// feeds its `src/index.ts`. It must be [`reset`](Self::reset) between
/// documents; the reset folds it into `totals`, which feed the batch index.
#[derive(Debug, Default, Clone)]
pub struct BatchAccumulator {
    current: SharedBuckets,
    totals: SharedBuckets,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified identifier; non-shared buckets are ignored.
    pub fn record(&mut self, identifier: &str, bucket: &Bucket) {
        if let Bucket::Package(package) = bucket {
            if let Some(set) = self.current.set_mut(*package) {
                set.insert(identifier);
            }
        }
    }

    /// Shared buckets accumulated since the last reset.
    pub fn current(&self) -> &SharedBuckets {
        &self.current
    }

    /// Every shared identifier seen in the batch, including the current document.
    pub fn totals(&self) -> SharedBuckets {
        let mut all = self.totals.clone();
        all.absorb(&self.current);
        all
    }

    /// Clear the per-document shared state before the next document begins.
    pub fn reset(&mut self) {
        self.totals.absorb(&self.current);
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> ImportSet {
        names.iter().copied().collect()
    }

    #[test]
    fn set_preserves_first_seen_order() {
        let s = set(&["Box", "Alert", "Box", "Stack", "Alert"]);
        assert_eq!(s.joined(), "Box, Alert, Stack");
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(render(&ImportSet::default(), "import { {} } from 'x';"), "");
        assert_eq!(render_re_exports(&ImportSet::default(), "x"), "");
    }

    #[test]
    fn render_is_stable() {
        let s = set(&["Alert", "AlertIcon"]);
        let template = package_template(Package::Core);
        let first = render(&s, &template);
        assert_eq!(first, "import { Alert, AlertIcon } from '@chakra-ui/react';");
        assert_eq!(render(&s, &template), first);
    }

    #[test]
    fn re_exports() {
        let s = set(&["PhoneIcon", "AddIcon"]);
        assert_eq!(
            render_re_exports(&s, "@chakra-ui/icons"),
            "export { PhoneIcon, AddIcon } from '@chakra-ui/icons';"
        );
    }

    #[test]
    fn header_order_puts_local_after_core() {
        let meta = ComponentMeta {
            name: "Alert".into(),
            folder: "alert".into(),
        };
        let mut buckets = Buckets::default();
        buckets.add("BarLoader", &Bucket::Package(Package::Spinner));
        buckets.add("Alert", &Bucket::Local(meta.clone()));
        buckets.add("Box", &Bucket::Package(Package::Core));
        buckets.add("FaGithub", &Bucket::Package(Package::FaIcons));
        buckets.add("Alert", &Bucket::Local(meta));

        assert_eq!(
            buckets.import_lines(),
            vec![
                "import { FaGithub } from 'react-icons/fa';",
                "import { Box } from '@chakra-ui/react';",
                "import { Alert } from '../../alert/src';",
                "import { BarLoader } from 'react-spinners';",
            ]
        );
    }

    #[test]
    fn accumulator_ignores_unshared_buckets() {
        let mut acc = BatchAccumulator::new();
        acc.record("FaGithub", &Bucket::Package(Package::FaIcons));
        acc.record("Box", &Bucket::Package(Package::Core));
        assert_eq!(acc.current().core.joined(), "Box");
        assert!(acc.current().icons.is_empty());
    }

    #[test]
    fn reset_clears_current_and_keeps_totals() {
        let mut acc = BatchAccumulator::new();
        acc.record("Box", &Bucket::Package(Package::Core));
        acc.reset();
        assert!(acc.current().is_empty());
        acc.record("Stack", &Bucket::Package(Package::Core));
        acc.record("Box", &Bucket::Package(Package::Core));
        assert_eq!(acc.current().core.joined(), "Stack, Box");
        assert_eq!(acc.totals().core.joined(), "Box, Stack");
    }
}

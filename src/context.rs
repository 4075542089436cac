use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::docs::DocMap;
use crate::model::TypeCatalog;

/// One generated interface waiting for the rewriting pass: which interface
/// to splice into which source file, and which class name triggers the
/// reference replacements.
#[derive(Debug, Clone)]
pub struct PendingAppend {
    pub interface_full_name: String,
    pub source_class_name: String,
    pub source_file: PathBuf,
}

/// A (generated interface, concrete class) pair destined for the
/// dependency-registration output of one source project.
#[derive(Debug, Clone)]
pub struct BindingPair {
    pub interface_name: String,
    pub class_name: String,
}

/// All cross-type state of a single generation run.
///
/// Created empty by the driver, threaded by reference through the
/// coordinator and every component that needs cross-type memoization, and
/// discarded when the run ends. Nothing here is global.
pub struct GenerationContext<'a> {
    catalog: &'a TypeCatalog,
    docs: DocMap,
    /// Source class name → generated interface name, as used in rewrites.
    pairs: HashMap<String, String>,
    /// Interfaces scheduled for the rewriting pass, keyed by their simple
    /// generation name; doubles as the duplicate-file-name guard.
    pending: Vec<PendingAppend>,
    scheduled: BTreeSet<String>,
    /// Source project → accumulated registration bindings.
    bindings: HashMap<String, Vec<BindingPair>>,
    /// Source file → line numbers where marker annotations were seen.
    annotations: HashMap<PathBuf, BTreeSet<usize>>,
    registrations_count: usize,
}

impl<'a> GenerationContext<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        GenerationContext {
            catalog,
            docs: DocMap::empty(),
            pairs: HashMap::new(),
            pending: Vec::new(),
            scheduled: BTreeSet::new(),
            bindings: HashMap::new(),
            annotations: HashMap::new(),
            registrations_count: 0,
        }
    }

    pub fn catalog(&self) -> &'a TypeCatalog {
        self.catalog
    }

    /// Swaps in the documentation map of the task being processed.
    pub fn set_docs(&mut self, docs: DocMap) {
        self.docs = docs;
    }

    pub fn docs(&self) -> &DocMap {
        &self.docs
    }

    // ----------------------------
    // Class → interface name pairs
    // ----------------------------

    /// Records the interface name generated for a source class. First write
    /// wins; at most one interface body per source type per run.
    pub fn try_add_pair(&mut self, class_name: &str, interface_name: &str) {
        self.pairs
            .entry(class_name.to_string())
            .or_insert_with(|| interface_name.to_string());
    }

    pub fn generated_interface(&self, class_name: &str) -> Option<&str> {
        self.pairs.get(class_name).map(String::as_str)
    }

    pub fn pairs(&self) -> &HashMap<String, String> {
        &self.pairs
    }

    // -------------------
    // Pending rewrites
    // -------------------

    /// Queues a generated interface for the rewriting pass. The `name` key
    /// is the simple generation name; a repeat name is ignored.
    pub fn schedule_append(&mut self, name: &str, entry: PendingAppend) {
        if self.scheduled.insert(name.to_string()) {
            self.pending.push(entry);
        }
    }

    /// Whether an interface with this simple name is already scheduled;
    /// the emitter refuses a second file under the same name.
    pub fn is_interface_scheduled(&self, name: &str) -> bool {
        self.scheduled.contains(name)
    }

    /// Hands the queued rewrites over; consumed exactly once per task batch.
    pub fn take_pending(&mut self) -> Vec<PendingAppend> {
        std::mem::take(&mut self.pending)
    }

    // -------------------
    // Registration bindings
    // -------------------

    pub fn add_binding(&mut self, project: &str, binding: BindingPair) {
        self.bindings
            .entry(project.to_string())
            .or_default()
            .push(binding);
    }

    pub fn bindings_for(&self, project: &str) -> Option<&[BindingPair]> {
        self.bindings.get(project).map(Vec::as_slice)
    }

    pub fn count_registrations(&mut self, amount: usize) {
        self.registrations_count += amount;
    }

    pub fn nothing_registered(&self) -> bool {
        self.registrations_count == 0
    }

    // -------------------
    // Annotation positions
    // -------------------

    /// Remembers a marker-annotation line for the optional cleanup pass.
    /// Line numbers are unique per file.
    pub fn record_annotation(&mut self, file: &Path, line_number: usize) {
        self.annotations
            .entry(file.to_path_buf())
            .or_default()
            .insert(line_number);
    }

    /// Returns every file with recorded annotation lines, numbers strictly
    /// descending within a file so sequential removal never shifts indices
    /// still to be processed. Clears the positions.
    pub fn drain_annotations(&mut self) -> Vec<(PathBuf, Vec<usize>)> {
        let drained = std::mem::take(&mut self.annotations);
        drained
            .into_iter()
            .map(|(path, lines)| {
                let descending: Vec<usize> = lines.into_iter().rev().collect();
                (path, descending)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeCatalog;

    #[test]
    fn drain_annotations_descends_within_a_file() {
        let catalog = TypeCatalog::empty();
        let mut ctx = GenerationContext::new(&catalog);
        for line in [3, 1, 5, 2, 4] {
            ctx.record_annotation(Path::new("a.cs"), line);
        }
        // Re-recording a line must not duplicate it.
        ctx.record_annotation(Path::new("a.cs"), 3);

        let drained = ctx.drain_annotations();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].1, vec![5, 4, 3, 2, 1]);
        // Consumed: a second drain is empty.
        assert!(ctx.drain_annotations().is_empty());
    }

    #[test]
    fn first_pair_wins() {
        let catalog = TypeCatalog::empty();
        let mut ctx = GenerationContext::new(&catalog);
        ctx.try_add_pair("Cat", "ICat");
        ctx.try_add_pair("Cat", "IOther");
        assert_eq!(ctx.generated_interface("Cat"), Some("ICat"));
    }

    #[test]
    fn scheduling_guards_duplicate_names() {
        let catalog = TypeCatalog::empty();
        let mut ctx = GenerationContext::new(&catalog);
        let entry = PendingAppend {
            interface_full_name: "Api.ICat".into(),
            source_class_name: "Cat".into(),
            source_file: PathBuf::from("Cat.cs"),
        };
        ctx.schedule_append("ICat", entry.clone());
        ctx.schedule_append("ICat", entry);
        assert!(ctx.is_interface_scheduled("ICat"));
        assert_eq!(ctx.take_pending().len(), 1);
    }
}

use crate::catalog::{CategoryNode, TypeDescriptor, TypeRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const EXECUTION_NODES_PREFIX: &str = "Runtimes/Execution/Nodes/";
pub const EXECUTION_PREFIX: &str = "Runtimes/Execution/";

/// Records whose generic arity exceeds this are left out of the catalog.
pub const DEFAULT_MAX_PARAMETERS: usize = 1;

/// Ordered category path prefixes. The first one a path starts with is
/// stripped from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPrefixes(Vec<String>);

impl Default for CategoryPrefixes {
    fn default() -> Self {
        Self::new([EXECUTION_NODES_PREFIX, EXECUTION_PREFIX])
    }
}

impl CategoryPrefixes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        self.0
            .iter()
            .find_map(|prefix| path.strip_prefix(prefix.as_str()))
            .unwrap_or(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    pub max_parameters: usize,
    pub prefixes: CategoryPrefixes,
    /// Drop repeated `(category, full name)` pairs.
    pub dedupe: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_parameters: DEFAULT_MAX_PARAMETERS,
            prefixes: CategoryPrefixes::default(),
            dedupe: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub emitted: usize,
    pub filtered: usize,
    pub duplicates: usize,
}

/// Receives the traversal as it happens.
///
/// `depth` counts from the children of the walked root, which sit at depth
/// 0. Records carry the depth of the category holding them plus one; the
/// root's own records have depth 0.
pub trait CatalogSink {
    fn enter_category(&mut self, _depth: usize, _name: &str, _path: &str) {}

    fn emit(&mut self, depth: usize, record: TypeRecord);
}

impl CatalogSink for Vec<TypeRecord> {
    fn emit(&mut self, _depth: usize, record: TypeRecord) {
        self.push(record);
    }
}

/// Walk `root` and collect its records.
pub fn walk(root: &CategoryNode, options: &WalkOptions) -> Vec<TypeRecord> {
    let mut records = Vec::new();
    walk_into(root, options, &mut records);
    records
}

/// Walk `root` depth first. Every category reports its subcategories before
/// its own elements; the root's elements come last and are filed under the
/// root's name.
pub fn walk_into<S>(root: &CategoryNode, options: &WalkOptions, sink: &mut S) -> WalkSummary
where
    S: CatalogSink + ?Sized,
{
    let mut walker = Walker {
        options,
        sink,
        seen: HashSet::new(),
        summary: WalkSummary::default(),
    };

    for child in &root.subcategories {
        walker.visit_category(child, 0, "");
    }
    for element in &root.elements {
        walker.visit_element(element, 0, &root.name);
    }

    tracing::debug!(
        emitted = walker.summary.emitted,
        filtered = walker.summary.filtered,
        duplicates = walker.summary.duplicates,
        "catalog walk finished"
    );
    walker.summary
}

struct Walker<'a, S: ?Sized> {
    options: &'a WalkOptions,
    sink: &'a mut S,
    seen: HashSet<(String, String)>,
    summary: WalkSummary,
}

impl<S: CatalogSink + ?Sized> Walker<'_, S> {
    fn visit_category(&mut self, node: &CategoryNode, depth: usize, parent_path: &str) {
        let path = if parent_path.is_empty() {
            node.name.clone()
        } else {
            format!("{}/{}", parent_path, node.name)
        };

        self.sink.enter_category(depth, &node.name, &path);

        for child in &node.subcategories {
            self.visit_category(child, depth + 1, &path);
        }
        for element in &node.elements {
            self.visit_element(element, depth + 1, &path);
        }
    }

    fn visit_element(&mut self, element: &TypeDescriptor, depth: usize, path: &str) {
        let record = TypeRecord::new(
            element.full_name.as_str(),
            element.nice_name.as_str(),
            self.options.prefixes.normalize(path),
        );

        if record.parameter_count() > self.options.max_parameters {
            tracing::debug!(
                full_name = record.full_name(),
                parameters = record.parameter_count(),
                "skipping type with too many generic parameters"
            );
            self.summary.filtered += 1;
            return;
        }

        if self.options.dedupe {
            let key = (
                record.nice_category().to_string(),
                record.full_name().to_string(),
            );
            if !self.seen.insert(key) {
                self.summary.duplicates += 1;
                return;
            }
        }

        self.sink.emit(depth, record);
        self.summary.emitted += 1;
    }
}

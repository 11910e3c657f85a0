pub mod provider;
pub mod walker;

use crate::tokenizer::Tokenizer;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use provider::{JsonCatalogProvider, TypeProvider};
pub use walker::{walk, walk_into, CatalogSink, CategoryPrefixes, WalkOptions, WalkSummary};

lazy_static! {
    static ref GENERIC_ARITY: Regex = Regex::new(r"`([0-9]+)").unwrap();
}

/// A type as the component library exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeDescriptor {
    /// Fully qualified name, `` Foo`1 `` for generics.
    pub full_name: String,
    /// Human readable rendering, `Foo<T>` for generics.
    pub nice_name: String,
}

impl TypeDescriptor {
    pub fn new(full_name: impl Into<String>, nice_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            nice_name: nice_name.into(),
        }
    }
}

/// One category of the component library tree.
///
/// Subcategory order is significant and preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryNode {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<CategoryNode>,
    #[serde(default)]
    pub elements: Vec<TypeDescriptor>,
}

impl CategoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_subcategory(mut self, child: CategoryNode) -> Self {
        self.subcategories.push(child);
        self
    }

    pub fn with_element(mut self, element: TypeDescriptor) -> Self {
        self.elements.push(element);
        self
    }

    /// Resolve a slash separated path of direct subcategory names.
    pub fn subcategory(&self, path: &str) -> Option<&CategoryNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| {
                node.subcategories.iter().find(|child| child.name == segment)
            })
    }

    /// Fold another tree into this one. Subcategories with the same name are
    /// merged recursively, new ones are appended, elements are appended.
    pub fn merge(&mut self, other: CategoryNode) {
        if self.name.is_empty() {
            self.name = other.name;
        }

        for child in other.subcategories {
            match self
                .subcategories
                .iter_mut()
                .find(|existing| existing.name == child.name)
            {
                Some(existing) => existing.merge(child),
                None => self.subcategories.push(child),
            }
        }

        self.elements.extend(other.elements);
    }

    /// Number of type descriptors in this subtree.
    pub fn type_count(&self) -> usize {
        self.elements.len()
            + self
                .subcategories
                .iter()
                .map(CategoryNode::type_count)
                .sum::<usize>()
    }
}

/// A catalog entry. The parameter count and word list are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    full_name: String,
    nice_name: String,
    nice_category: String,
}

impl TypeRecord {
    pub fn new(
        full_name: impl Into<String>,
        nice_name: impl Into<String>,
        nice_category: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            nice_name: nice_name.into(),
            nice_category: nice_category.into(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn nice_name(&self) -> &str {
        &self.nice_name
    }

    pub fn nice_category(&self) -> &str {
        &self.nice_category
    }

    pub fn parameter_count(&self) -> usize {
        generic_arity(&self.full_name)
    }

    pub fn words(&self, tokenizer: &dyn Tokenizer) -> Vec<String> {
        tokenizer.words(&self.nice_name)
    }
}

/// Digits after the first backtick of a fully qualified name, 0 without one.
pub fn generic_arity(full_name: &str) -> usize {
    GENERIC_ARITY
        .captures(full_name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod tokenizer;

pub use catalog::{CategoryNode, TypeDescriptor, TypeProvider, TypeRecord};
pub use config::Config;
pub use error::CatalogError;
pub use tokenizer::{RuleCascade, Tokenizer};

use catalog::walk_into;
use cli::output::{render_json, ListingSink, OutputFormat};

/// A rendered catalog ready to be written out.
#[derive(Debug, Clone)]
pub struct CatalogExport {
    pub records: Vec<TypeRecord>,
    pub contents: String,
}

/// Load the library from `provider`, walk the configured root category and
/// render the result in `format`.
pub fn export(
    provider: &dyn TypeProvider,
    config: &Config,
    format: OutputFormat,
) -> Result<CatalogExport, CatalogError> {
    let library = provider.library()?;
    let root = library
        .subcategory(&config.root_category)
        .ok_or_else(|| CatalogError::MissingCategory(config.root_category.clone()))?;
    let options = config.walk_options();

    let export = match format {
        OutputFormat::Json => {
            let mut records = Vec::new();
            walk_into(root, &options, &mut records);
            let contents = render_json(&records, &config.tokenizer())?;
            CatalogExport { records, contents }
        }
        OutputFormat::List => {
            let mut sink = ListingSink::default();
            walk_into(root, &options, &mut sink);
            let contents = sink.render();
            CatalogExport {
                records: sink.records().to_vec(),
                contents,
            }
        }
    };

    tracing::info!(
        root = %config.root_category,
        records = export.records.len(),
        format = %format,
        "catalog exported"
    );
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> CategoryNode {
        CategoryNode::new("").with_subcategory(
            CategoryNode::new("ProtoFlux")
                .with_subcategory(
                    CategoryNode::new("Runtimes").with_subcategory(
                        CategoryNode::new("Execution").with_subcategory(
                            CategoryNode::new("Nodes").with_subcategory(
                                CategoryNode::new("Math")
                                    .with_element(TypeDescriptor::new("Nodes.IsNaN", "IsNaN"))
                                    .with_element(TypeDescriptor::new(
                                        "Nodes.ValueLerp`2",
                                        "ValueLerp<A,B>",
                                    )),
                            ),
                        ),
                    ),
                )
                .with_element(TypeDescriptor::new("Nodes.Comment", "Comment")),
        )
    }

    #[test]
    fn test_export_json() {
        let exported = export(&library(), &Config::default(), OutputFormat::Json).unwrap();
        assert_eq!(exported.records.len(), 2);

        let value: serde_json::Value = serde_json::from_str(&exported.contents).unwrap();
        assert_eq!(value[0]["NiceCategory"], "Math");
        assert_eq!(value[0]["WordsOfNiceName"], serde_json::json!(["Is", "NaN"]));
        assert_eq!(value[1]["NiceCategory"], "ProtoFlux");
    }

    #[test]
    fn test_export_is_idempotent() {
        let first = export(&library(), &Config::default(), OutputFormat::Json).unwrap();
        let second = export(&library(), &Config::default(), OutputFormat::Json).unwrap();
        assert_eq!(first.contents, second.contents);
    }

    #[test]
    fn test_export_list() {
        let exported = export(&library(), &Config::default(), OutputFormat::List).unwrap();
        assert!(exported.contents.starts_with(" Runtimes#Runtimes\n"));
        assert!(exported.contents.contains("#### IsNaN#Nodes.IsNaN#Math\n"));
    }

    #[test]
    fn test_missing_root_category() {
        let config = Config {
            root_category: "Audio".to_string(),
            ..Default::default()
        };
        let err = export(&library(), &config, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::MissingCategory(name) if name == "Audio"));
    }
}

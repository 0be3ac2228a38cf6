//! Validate a content directory
//!
//! Loads `config.toml`, `items.ron` and `bundles.ron` the same way the runtime
//! does and reports every problem instead of stopping at the first.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bundle_content::{BundleLoader, ConfigLoader, ContentFactory, ItemCatalog, ItemLoader};
use bundle_core::{BundleDefinition, IngredientMatch, ItemId};
use clap::Parser;
use console::style;

use crate::dirs;

/// Validate bundle content files
#[derive(Parser, Debug)]
pub struct ValidateContent {
    /// Content directory (defaults to `<data dir>/content`)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl ValidateContent {
    pub fn execute(self) -> Result<()> {
        let data_dir = self.data_dir.unwrap_or_else(dirs::content_dir);
        let factory = ContentFactory::new(&data_dir);
        tracing::debug!("Validating content in {}", data_dir.display());

        println!(
            "{} {}",
            style("Content Dir:").bold().cyan(),
            data_dir.display()
        );
        println!();

        let config = ConfigLoader::load(&factory.config_path())?;
        println!(
            "{} delay {} ms, ignore stack count: {}, milestones: {:?}",
            style("✓ config.toml").green(),
            config.completion_delay_ms,
            config.ignore_stack_count,
            config.milestones
        );

        let items = ItemLoader::load(&factory.items_path())?;
        println!(
            "{} {} items, {} preserve products",
            style("✓ items.ron").green(),
            items.items.len(),
            items.preserves.len()
        );

        let catalog = BundleLoader::load_catalog(&factory.bundles_path())
            .context("Failed to read bundle catalog")?;
        let total = catalog.bundles.len();

        let definitions = match bundle_content::build_definitions(catalog.bundles) {
            Ok(definitions) => definitions,
            Err(errors) => {
                println!(
                    "{} {} of {} bundles rejected",
                    style("✗ bundles.ron").red().bold(),
                    errors.len(),
                    total
                );
                for error in &errors {
                    println!("  {} {}", style("•").red(), error);
                }
                anyhow::bail!("{} definition errors", errors.len());
            }
        };

        println!(
            "{} {} bundles",
            style("✓ bundles.ron").green(),
            definitions.len()
        );

        let warnings = unresolved_references(&definitions, &items);
        if !warnings.is_empty() {
            println!();
            println!("{}", style("Unresolved references:").bold().yellow());
            for warning in &warnings {
                println!("  {} {}", style("!").yellow(), warning);
            }
        }

        println!();
        print_bundles(&definitions);

        Ok(())
    }
}

/// Item ids used by bundles but missing from the item catalog.
///
/// Missing items do not break donations, only previews and rewards.
fn unresolved_references(definitions: &[BundleDefinition], items: &ItemCatalog) -> Vec<String> {
    let known: HashSet<&ItemId> = items.items.iter().map(|item| &item.id).collect();
    let preserves: HashSet<_> = items.preserves.iter().map(|product| product.tag).collect();
    let mut warnings = Vec::new();

    for definition in definitions {
        for (slot, ingredient) in definition.ingredients().iter().enumerate() {
            match &ingredient.matcher {
                IngredientMatch::Item(id) if !known.contains(id) => {
                    warnings.push(format!("{} slot {}: unknown item {}", definition.id(), slot, id));
                }
                IngredientMatch::Flavored(flavor) => {
                    if !known.contains(&flavor.base) {
                        warnings.push(format!(
                            "{} slot {}: unknown base item {}",
                            definition.id(),
                            slot,
                            flavor.base
                        ));
                    }
                    if !preserves.contains(&flavor.tag) {
                        warnings.push(format!(
                            "{} slot {}: no preserve product for {}",
                            definition.id(),
                            slot,
                            flavor.tag
                        ));
                    }
                }
                _ => {}
            }
        }

        if let Some(reward) = definition.reward()
            && !known.contains(&reward.item)
        {
            warnings.push(format!(
                "{} reward: unknown item {}",
                definition.id(),
                reward.item
            ));
        }
    }

    warnings
}

fn print_bundles(definitions: &[BundleDefinition]) {
    println!("{}", style("=== Bundles ===").bold().green());
    for definition in definitions {
        println!(
            "  {} {} ({}, {}/{} slots required)",
            style(definition.id()).bold(),
            definition.label(),
            definition.color(),
            definition.required_slots(),
            definition.slot_count()
        );
    }
}

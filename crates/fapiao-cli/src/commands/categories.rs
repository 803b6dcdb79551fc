//! Categories command - show the keyword rule table.

use clap::Args;
use console::style;

use fapiao_core::receipt::rules::CATEGORY_RULES;
use fapiao_core::Category;

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Emit the table as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CategoriesArgs) -> anyhow::Result<()> {
    if args.json {
        let table: Vec<_> = CATEGORY_RULES
            .iter()
            .map(|(category, keywords)| {
                serde_json::json!({
                    "category": category,
                    "label": category.zh_label(),
                    "keywords": keywords,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for (category, keywords) in CATEGORY_RULES {
        println!(
            "{} ({})",
            style(category.to_string()).bold(),
            category.zh_label()
        );
        println!("  {}", keywords.join(", "));
    }

    // The default category has no keywords of its own.
    println!(
        "{} ({})",
        style(Category::Other.to_string()).bold(),
        Category::Other.zh_label()
    );
    println!("  assigned when no keyword matches");

    Ok(())
}

use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::{output_field, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::notion::{ContentNode, ContentTreeFetcher, NotionClient};

#[derive(Subcommand)]
pub enum NotionCommands {
    #[command(about = "Fetch a page and its full block tree")]
    Tree {
        #[arg(help = "Page or block ID (dashed or undashed)")]
        id: String,
    },
}

pub async fn handle(cmd: NotionCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        NotionCommands::Tree { id } => {
            let client = NotionClient::new(&config.notion)?;
            let fetcher = ContentTreeFetcher::new(Arc::new(client));
            let document = fetcher.fetch_document(&id).await?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&document)?);
                }
                OutputFormat::Text => {
                    let nodes: usize = document.blocks.iter().map(ContentNode::subtree_size).sum();
                    let message = if document.complete {
                        "Fetched complete page tree"
                    } else {
                        "Fetched partial page tree"
                    };
                    output_success(&output_format, message, None)?;
                    output_field(&output_format, "page", &document.page.id);
                    output_field(&output_format, "top-level blocks", document.blocks.len());
                    output_field(&output_format, "total blocks", nodes);
                    println!();
                    for block in &document.blocks {
                        print_outline(block, 0);
                    }
                    for truncation in &document.truncated {
                        eprintln!(
                            "warning: children of {} stopped after {} page(s): {}",
                            truncation.node_id, truncation.pages_fetched, truncation.message
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

fn print_outline(node: &ContentNode, depth: usize) {
    println!("{}- {} ({})", "  ".repeat(depth), node.kind().unwrap_or("block"), node.id);
    for child in node.children.iter().flatten() {
        print_outline(child, depth + 1);
    }
}

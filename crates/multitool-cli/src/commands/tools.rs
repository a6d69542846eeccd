//! Tool CLI commands
//!
//! Handles: multitool tools list/open/drop

use anyhow::Result;
use clap::Subcommand;
use serde_json::json;

use multitool_core::AppContext;

/// Tool commands
#[derive(Subcommand)]
pub enum ToolCommands {
    /// List registered tools by category
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open a tool and print its view
    Open {
        /// Tool name, e.g. "PDF Merger"
        name: String,
    },
    /// Drop files onto a tool
    Drop {
        /// Tool name
        name: String,
        /// Paths to hand to the tool
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Execute tool command
pub fn execute(cmd: ToolCommands, ctx: &AppContext) -> Result<()> {
    match cmd {
        ToolCommands::List { json } => execute_list(json, ctx),
        ToolCommands::Open { name } => execute_open(&name, ctx),
        ToolCommands::Drop { name, paths } => execute_drop(&name, &paths, ctx),
    }
}

fn execute_list(json_output: bool, ctx: &AppContext) -> Result<()> {
    let grouped = ctx.registry().by_category();

    if json_output {
        let tools: Vec<serde_json::Value> = grouped
            .iter()
            .flat_map(|(category, descriptors)| {
                descriptors.iter().map(move |d| {
                    json!({
                        "name": d.name,
                        "category": category,
                        "icon": d.icon.label(),
                    })
                })
            })
            .collect();
        let output = json!({
            "count": tools.len(),
            "tools": tools,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if grouped.is_empty() {
        println!("No tools registered.");
        return Ok(());
    }

    for (category, descriptors) in &grouped {
        println!("[{category}]");
        for descriptor in descriptors {
            println!("  {}", descriptor.name);
        }
    }
    Ok(())
}

fn execute_open(name: &str, ctx: &AppContext) -> Result<()> {
    let tool = ctx.tool(name)?;
    println!("{} - {}", tool.name(), tool.description());
    println!();
    print!("{}", tool.ui_surface());
    Ok(())
}

fn execute_drop(name: &str, paths: &[String], ctx: &AppContext) -> Result<()> {
    let accepted = ctx.drop_files(name, paths)?;
    println!("Accepted {accepted} of {} file(s).", paths.len());
    println!();
    print!("{}", ctx.tool(name)?.ui_surface());
    Ok(())
}

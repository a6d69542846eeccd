//! Tray CLI command
//!
//! Handles: multitool tray

use anyhow::Result;

use multitool_core::AppContext;

/// Print the tray menu for the current profile set
pub fn execute(json_output: bool, ctx: &AppContext) -> Result<()> {
    let menu = ctx.tray_menu()?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&menu)?);
    } else {
        print!("{menu}");
    }
    Ok(())
}

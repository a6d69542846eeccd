//! Profile CLI commands
//!
//! Handles: multitool profile list/show/add/edit/delete/apply

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;
use std::io::{self, Write};

use multitool_core::profile::{set, NetworkPriority, Profile};
use multitool_core::{AppContext, CoreError};

/// Profile commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List all profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show profile details
    Show {
        /// Profile name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new profile
    Add(ProfileAddArgs),
    /// Change an existing profile
    Edit(ProfileEditArgs),
    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Apply a profile to this machine
    Apply {
        /// Profile name
        name: String,
        /// Preview the changes without applying
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for `multitool profile add`
#[derive(Args)]
pub struct ProfileAddArgs {
    /// Profile name (must be unique)
    pub name: String,

    /// Interface to prefer (ethernet, wifi)
    #[arg(long)]
    pub priority: String,

    /// Enable the system proxy with this host:port
    #[arg(long, value_name = "HOST:PORT")]
    pub proxy: Option<String>,
}

impl ProfileAddArgs {
    /// Convert to a `Profile`
    pub fn to_profile(&self) -> Result<Profile, CoreError> {
        let profile = Profile::new(self.name.clone(), self.priority.parse()?);
        Ok(match &self.proxy {
            Some(server) => profile.with_proxy(server.clone()),
            None => profile,
        })
    }
}

/// Arguments for `multitool profile edit`
#[derive(Args)]
pub struct ProfileEditArgs {
    /// Profile name
    pub name: String,

    /// New name
    #[arg(long, value_name = "NAME")]
    pub rename: Option<String>,

    /// New preferred interface (ethernet, wifi)
    #[arg(long)]
    pub priority: Option<String>,

    /// Enable the system proxy with this host:port
    #[arg(long, value_name = "HOST:PORT", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Disable the system proxy
    #[arg(long)]
    pub no_proxy: bool,
}

impl ProfileEditArgs {
    /// Apply the requested changes to `profile`
    pub fn update(&self, profile: &mut Profile) -> Result<(), CoreError> {
        if let Some(name) = &self.rename {
            profile.name.clone_from(name);
        }
        if let Some(priority) = &self.priority {
            profile.network_priority = priority.parse::<NetworkPriority>()?;
        }
        if let Some(server) = &self.proxy {
            profile.proxy_enabled = true;
            profile.proxy_server.clone_from(server);
        }
        if self.no_proxy {
            profile.proxy_enabled = false;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.rename.is_none() && self.priority.is_none() && self.proxy.is_none() && !self.no_proxy
    }
}

/// Execute profile command
pub fn execute(cmd: ProfileCommands, ctx: &AppContext) -> Result<()> {
    match cmd {
        ProfileCommands::List { json } => execute_list(json, ctx),
        ProfileCommands::Show { name, json } => execute_show(&name, json, ctx),
        ProfileCommands::Add(args) => execute_add(&args, ctx),
        ProfileCommands::Edit(args) => execute_edit(&args, ctx),
        ProfileCommands::Delete { name, force } => execute_delete(&name, force, ctx),
        ProfileCommands::Apply {
            name,
            dry_run,
            json,
        } => execute_apply(&name, dry_run, json, ctx),
    }
}

fn proxy_summary(profile: &Profile) -> String {
    if profile.proxy_enabled {
        format!("proxy {}", profile.proxy_server)
    } else {
        "no proxy".to_string()
    }
}

fn execute_list(json_output: bool, ctx: &AppContext) -> Result<()> {
    let profiles = ctx.profiles()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    println!("Profiles:");
    for p in &profiles {
        println!("  {} - {}, {}", p.name, p.network_priority, proxy_summary(p));
    }
    Ok(())
}

fn execute_show(name: &str, json_output: bool, ctx: &AppContext) -> Result<()> {
    let profile = ctx.profile(name)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("Profile: {}", profile.name);
    println!("  Network priority: {}", profile.network_priority);
    println!(
        "  Proxy: {}",
        if profile.proxy_enabled { "enabled" } else { "disabled" }
    );
    if !profile.proxy_server.is_empty() {
        println!("  Proxy server: {}", profile.proxy_server);
    }
    Ok(())
}

fn execute_add(args: &ProfileAddArgs, ctx: &AppContext) -> Result<()> {
    let profile = args.to_profile()?;

    ctx.edit_profiles(|profiles| {
        if set::find(profiles, &profile.name).is_ok() {
            return Err(CoreError::Validation(format!(
                "A profile named '{}' already exists",
                profile.name
            )));
        }
        set::upsert(profiles, None, profile.clone())
    })?;

    println!("Added profile '{}'", profile.name);
    Ok(())
}

fn execute_edit(args: &ProfileEditArgs, ctx: &AppContext) -> Result<()> {
    if args.is_empty() {
        bail!("Nothing to change; pass --rename, --priority, --proxy or --no-proxy");
    }

    let updated = ctx.edit_profiles(|profiles| {
        let mut profile = set::find(profiles, &args.name)?.clone();
        args.update(&mut profile)?;
        set::upsert(profiles, Some(args.name.as_str()), profile.clone())?;
        Ok(profile)
    })?;

    println!("Updated profile '{}'", updated.name);
    Ok(())
}

fn execute_delete(name: &str, force: bool, ctx: &AppContext) -> Result<()> {
    let profile = ctx.profile(name)?;

    if !force {
        print!("Delete profile '{}'? [y/N] ", profile.name);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.edit_profiles(|profiles| set::remove(profiles, name))?;
    println!("Deleted profile: {}", profile.name);
    Ok(())
}

fn execute_apply(name: &str, dry_run: bool, json_output: bool, ctx: &AppContext) -> Result<()> {
    if dry_run {
        let steps = ctx.plan_profile(name)?;
        if json_output {
            let output = json!({
                "profile": name,
                "dry_run": true,
                "steps": steps,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Applying profile '{name}' would:");
        for (i, planned) in steps.iter().enumerate() {
            println!("  {}. {}", i + 1, planned.mutation);
        }
        println!("\nDry run - no changes made.");
        return Ok(());
    }

    let report = ctx.apply_profile(name)?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Profile '{}' applied successfully.", report.profile);
    }
    Ok(())
}

use std::path::Path;

use anyhow::Result;

use super::Context;
use crate::config;

pub fn init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\n\
            Use --force to overwrite it",
            path.display()
        );
    }

    config::create_default_config(&path)?;
    println!("Created config file at {}", path.display());
    Ok(())
}

/// Print the settings in effect, overrides included.
pub fn show(ctx: &Context) -> Result<()> {
    let path = match &ctx.config_path {
        Some(p) => p.clone(),
        None => config::config_path()?,
    };

    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{}", path.display(), status);
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}

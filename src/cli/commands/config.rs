//! Configuration command implementation

use crate::cli::CliContext;
use crate::config::{ConfigKey, ConfigValue, MerkleConfig};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;

/// Execute the config command
pub fn execute(
    ctx: &CliContext,
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
) -> Result<()> {
    let config_path = &ctx.config_path;

    if show_origin {
        if ctx.json {
            println!(
                "{}",
                json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                config_path.display().to_string().cyan()
            );
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    let mut config = ctx.load_config()?;

    if list {
        return list_configuration(&config, ctx.json);
    }

    let Some(key_str) = key else {
        print_usage(ctx.json);
        return Ok(());
    };
    let config_key = ConfigKey::parse(&key_str)?;

    if unset {
        config.unset(config_key);
        config.save_to(config_path)?;

        if ctx.json {
            println!("{}", json!({"action": "unset", "key": key_str, "status": "success"}));
        } else {
            println!("{} {}", "✓".green(), format!("Unset {}", key_str).bold());
        }
    } else if let Some(value_str) = value {
        config.set(config_key, ConfigValue::parse(&value_str))?;
        config.save_to(config_path)?;

        if ctx.json {
            println!(
                "{}",
                json!({"action": "set", "key": key_str, "value": value_str, "status": "success"})
            );
        } else {
            println!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan());
        }
    } else {
        match config.get(config_key) {
            Some(value) if ctx.json => {
                println!("{}", json!({"key": key_str, "value": value}));
            },
            Some(value) => println!("{}", value),
            None if ctx.json => {
                println!("{}", json!({"key": key_str, "value": null, "error": "not set"}));
            },
            None => {
                eprintln!("{}", format!("Configuration key '{}' is not set", key_str).yellow());
                return Err(anyhow::anyhow!("Configuration key not found"));
            },
        }
    }

    Ok(())
}

/// List all configuration values
fn list_configuration(config: &MerkleConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(key, value)| (key.as_str().to_string(), json!(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else if entries.is_empty() {
        println!("{}", "No configuration values set".yellow());
        println!();
        println!("{}", "To set configuration:".bold());
        println!("  {}", "merkletools config hash.algorithm sha512".cyan());
        println!("  {}", "merkletools config hash.leaves true".cyan());
    } else {
        for (key, value) in entries {
            println!("{} = {}", key.as_str().bold(), value.to_string().cyan());
        }
    }

    Ok(())
}

fn print_usage(json: bool) {
    if json {
        println!(
            "{}",
            json!({
                "error": "No configuration key specified",
                "usage": "merkletools config <key> [value] or --list"
            })
        );
        return;
    }

    println!("{}", "Configuration Management".green().bold());
    println!();
    println!("{}", "Usage:".bold());
    println!("  {} Get value", "merkletools config <key>".cyan());
    println!("  {} Set value", "merkletools config <key> <value>".cyan());
    println!("  {} List all", "merkletools config --list".cyan());
    println!("  {} Unset value", "merkletools config --unset <key>".cyan());
    println!();
    println!("{}", "Keys:".bold());
    println!("  {} Default hash algorithm", "hash.algorithm".green());
    println!("  {} Hash leaves before insertion", "hash.leaves".green());
}

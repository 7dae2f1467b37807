use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{Local, Utc};
use es_core::journal::backup_file_name;
use uuid::Uuid;

use super::{print_json, write_artifact, Context};

pub fn add(ctx: &Context, text: &str) -> anyhow::Result<()> {
    let entry = ctx.journal().save_entry(text, ctx.environment)?;
    println!("Saved {} [{}]", entry.id, entry.environment);
    Ok(())
}

pub fn list(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let entries = ctx.journal().all_entries();
    if json_output {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No journal entries yet.");
        return Ok(());
    }
    for entry in entries {
        let when = entry.timestamp.with_timezone(&Local);
        println!(
            "{}  {:<5}  {}",
            when.format("%Y-%m-%d %H:%M"),
            entry.environment,
            entry.id
        );
        for line in entry.content.lines() {
            println!("    {line}");
        }
    }
    Ok(())
}

pub fn delete(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let id = Uuid::parse_str(id).with_context(|| format!("invalid entry id: {id}"))?;
    if ctx.journal().delete_entry(id)? {
        println!("Deleted {id}");
    } else {
        println!("No entry with id {id}");
    }
    Ok(())
}

pub fn clear(ctx: &Context) -> anyhow::Result<()> {
    ctx.journal().clear_all()?;
    println!("All journal entries deleted.");
    Ok(())
}

pub fn info(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let info = ctx.journal().storage_info();
    if json_output {
        return print_json(&info);
    }
    println!("Entries:    {}", info.entry_count);
    println!("Size:       {} bytes", info.total_size);
    println!(
        "Storage:    {} ({})",
        if info.is_available { "available" } else { "unavailable" },
        ctx.data_dir().display()
    );
    Ok(())
}

/// Resolve `--out`: a directory receives a dated backup file name.
fn export_path(out: &Path) -> PathBuf {
    if out.is_dir() {
        out.join(backup_file_name(Utc::now().date_naive()))
    } else {
        out.to_path_buf()
    }
}

/// Write the backup to `out`, or print it when no path is given.
pub fn export(ctx: &Context, out: Option<&Path>) -> anyhow::Result<()> {
    let document = ctx.journal().export_json()?;
    match out {
        Some(out) => {
            let path = export_path(out);
            write_artifact(&path, &document)?;
            println!("Exported journal to {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

use std::{io::Write, path::PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use cobalt_item::{
    ItemExt, ItemTemplate, ItemTemplates, NameLoreStrategy,
    strategy::{LEGACY, LEGACY_AMPERSAND, PLAIN},
};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use valence_protocol::ItemStack;

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum Format {
    /// `&` color codes
    #[default]
    Ampersand,
    /// `§` color codes
    Section,
    /// no color codes
    Plain,
}

impl Format {
    fn strategy(self) -> &'static dyn NameLoreStrategy {
        match self {
            Self::Ampersand => &LEGACY_AMPERSAND,
            Self::Section => &LEGACY,
            Self::Plain => &PLAIN,
        }
    }
}

/// Builds item templates and prints the resulting stacks as JSON.
#[derive(Parser)]
struct Params {
    /// TOML file with a table per item
    path: PathBuf,

    /// Only build this template
    #[clap(short, long)]
    item: Option<String>,

    /// How names, lore and pages are formatted
    #[clap(short, long, value_enum, default_value_t)]
    format: Format,
}

fn preview(name: &str, template: &ItemTemplate, format: Format) -> anyhow::Result<serde_json::Value> {
    let stack: ItemStack = template
        .build_with(format.strategy())
        .with_context(|| format!("failed to build {name}"))?;

    let nbt: Option<&valence_nbt::Compound> = stack.nbt.as_ref();

    Ok(json!({
        "template": name,
        "kind": stack.item.to_str(),
        "count": stack.count,
        "category": stack.category().name(),
        "name": stack.display_name().map(|name| name.to_plain()),
        "lore": stack.lore().iter().map(|line| line.to_plain()).collect::<Vec<_>>(),
        "nbt": nbt,
    }))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let params = Params::parse();

    let source = std::fs::read_to_string(&params.path)
        .with_context(|| format!("failed to read {}", params.path.display()))?;
    let templates = ItemTemplates::from_toml(&source)?;
    info!(count = templates.len(), path = %params.path.display(), "loaded templates");

    let selected: Vec<_> = match &params.item {
        Some(name) => {
            let Some(template) = templates.get(name) else {
                bail!("no template named {name}");
            };
            vec![(name.as_str(), template)]
        }
        None => templates.iter().collect(),
    };

    if selected.is_empty() {
        warn!("nothing to preview");
    }

    let mut stdout = std::io::stdout().lock();

    for (name, template) in selected {
        let preview = preview(name, template, params.format)?;
        writeln!(stdout, "{}", serde_json::to_string_pretty(&preview)?)?;
    }

    Ok(())
}

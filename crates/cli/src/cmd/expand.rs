//! Batch expansion.

use std::path::Path;

use color_eyre::eyre::Result;
use stackvars_core::batch::{GeneratedPrompt, expand};

use super::session::Session;
use crate::ExpandArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ExpandArgs) -> Result<()> {
    let session = Session::open(config, profile)?;
    let template = args.input.read()?;
    let sources = session.varying_sources(&template, args.vars.as_deref())?;

    let mut opts = session.config.batch_options();
    if let Some(max) = args.max {
        opts.max_combinations = max;
    }

    let prompts = expand(&template, &sources, &session.sources, &opts)?;
    tracing::info!(count = prompts.len(), "expanded template");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prompts)?);
        return Ok(());
    }

    if prompts.is_empty() {
        println!("(no varying sources; nothing generated)");
        return Ok(());
    }

    for (i, p) in prompts.iter().enumerate() {
        println!("# {} {}", i + 1, label(p));
        println!("{}", p.prompt);
    }
    Ok(())
}

fn label(p: &GeneratedPrompt) -> String {
    p.assignment
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

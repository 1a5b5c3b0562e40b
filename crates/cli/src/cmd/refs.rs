//! Reference listing.

use std::path::Path;

use color_eyre::eyre::Result;
use serde::Serialize;
use stackvars_core::interpolate::{RenderOutcome, render_reference};
use stackvars_core::references::parse;
use tabled::{Table, Tabled, settings::Style};

use super::session::Session;
use crate::RefsArgs;

#[derive(Debug, Serialize, Tabled)]
struct RefRow {
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &RefsArgs) -> Result<()> {
    let session = Session::open(config, profile)?;
    let template = args.input.read()?;
    let opts = session.config.interpolate_options();

    let rows: Vec<RefRow> = parse(&template)
        .into_iter()
        .map(|located| {
            let outcome = render_reference(&located.reference, &session.sources, &opts);
            let (status, value) = describe(outcome);
            RefRow {
                reference: template[located.span].to_string(),
                scope: located.reference.scope.to_string(),
                status,
                value,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("(no references found)");
        return Ok(());
    }

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    println!("{table}");

    let unresolved = rows.iter().filter(|r| r.status != "resolved").count();
    if unresolved > 0 {
        println!("{unresolved} of {} reference(s) left literal", rows.len());
    }
    Ok(())
}

fn describe(outcome: RenderOutcome) -> (String, String) {
    match outcome {
        RenderOutcome::Resolved(v) => ("resolved".into(), v),
        RenderOutcome::NotFound => ("not found".into(), String::new()),
        RenderOutcome::IndexOutOfRange { index, len } => {
            ("index out of range".into(), format!("{index} >= {len}"))
        }
        RenderOutcome::MissingPath(seg) => ("missing path".into(), seg),
        RenderOutcome::ParseFailed => ("unparseable value".into(), String::new()),
        RenderOutcome::Unrenderable => ("shape mismatch".into(), String::new()),
    }
}

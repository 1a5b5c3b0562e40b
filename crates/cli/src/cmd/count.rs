use std::path::Path;

use color_eyre::eyre::Result;
use stackvars_core::combinatorics::count;

use super::session::Session;
use crate::CountArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &CountArgs) -> Result<()> {
    let session = Session::open(config, profile)?;
    let template = args.input.read()?;
    let sources = session.varying_sources(&template, args.vars.as_deref())?;

    let n = count(&sources);
    let limit = session.config.batch.max_combinations;
    println!("{n}");
    if n > limit {
        eprintln!("note: exceeds the configured limit of {limit}");
    }
    Ok(())
}

use std::path::Path;

use color_eyre::eyre::Result;
use stackvars_core::interpolate::interpolate_with;

use super::session::Session;
use crate::TemplateInput;

pub fn run(config: Option<&Path>, profile: Option<&str>, input: &TemplateInput) -> Result<()> {
    let session = Session::open(config, profile)?;
    let template = input.read()?;

    let out =
        interpolate_with(&template, &session.sources, &session.config.interpolate_options());
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}

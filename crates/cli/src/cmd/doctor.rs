use stackvars_core::config::{ConfigLoader, default_config_path};
use stackvars_core::sources::{Scope, SourceMap, load_sources};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL svx doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = crate::logging::init(&rc.logging) {
        println!("FAIL svx doctor");
        println!("{e:#}");
        std::process::exit(1);
    }

    let snapshot = match load_sources(&rc.sources_path) {
        Ok(s) => s,
        Err(e) => {
            println!("FAIL svx doctor");
            println!("{e}");
            std::process::exit(1);
        }
    };
    let map = SourceMap::from_snapshot(&rc.context, &snapshot);

    println!("OK   svx doctor");
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("sources: {}", rc.sources_path.display());
    println!("workspace_id: {}", rc.context.workspace_id.as_deref().unwrap_or("-"));
    println!("stack_id: {}", rc.context.stack_id.as_deref().unwrap_or("-"));
    println!("user_id: {}", rc.context.user_id.as_deref().unwrap_or("-"));
    println!("records: {}", snapshot.len());
    for scope in [Scope::Stack, Scope::Workspace, Scope::User, Scope::Ambient] {
        println!("visible.{scope}: {}", map.len(scope));
    }
    println!("batch.max_combinations: {}", rc.batch.max_combinations);
    println!("interpolation.separator: {:?}", rc.interpolation.separator);
}

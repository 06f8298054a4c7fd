//! Implementation of `lapidoc init`.

use std::{fs, path::Path, process::ExitCode};

use lapidoc_config::{CONFIG_ENV, CONFIG_FILENAME, global_template, local_template};
use lapidoc_highlight::{Highlighter, subheader};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Initializes a `.lapidoc.toml` configuration file.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let cwd = &ctx.cwd;

    let global = ctx.discovery.global_file();
    let is_global_dir = global.and_then(Path::parent).is_some_and(|dir| dir == cwd.as_path());

    let use_global = cmd.global || is_global_dir;

    let config_path = if use_global {
        match global {
            Some(path) => path.to_path_buf(),
            None => {
                eprintln!(
                    "error: no global config location (home directory unknown or {CONFIG_ENV} is empty)"
                );
                return ExitCode::FAILURE;
            }
        }
    } else {
        cwd.join(CONFIG_FILENAME)
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if use_global {
        global_template()
    } else {
        local_template()
    };

    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    print!("{}", Highlighter::new().highlight_toml(&template));

    ExitCode::SUCCESS
}

//! Implementation of `lapidoc config`.

use std::process::ExitCode;

use crate::cli::{context::CommandContext, output::dim};

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    if config.files.is_empty() {
        println!("{}", dim("# no configuration files found; showing defaults"));
    } else {
        for path in &config.files {
            println!("{}", dim(&format!("# {}", ctx.describe_config_file(path))));
        }
    }
    let highlighter = ctx.highlighter();
    print!("{}", highlighter.highlight_toml(&config.settings_to_toml()));
    ExitCode::SUCCESS
}

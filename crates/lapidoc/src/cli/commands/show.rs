//! Implementation of `lapidoc show`.

use std::process::ExitCode;

use crate::cli::{
    args::ShowCommand,
    context::CommandContext,
    output::{render_code_only, render_document, render_welcome},
};

/// Renders one page, or the welcome state if the id is unknown.
pub fn run(ctx: &mut CommandContext, cmd: &ShowCommand) -> ExitCode {
    let id = cmd
        .id
        .clone()
        .unwrap_or_else(|| ctx.config.display.start_page.clone());
    let highlighter = ctx.highlighter();
    let language = ctx.config.display.default_language.clone();

    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let Some(doc) = corpus.get(&id) else {
        eprintln!("warning: no document with id '{id}'");
        print!("{}", render_welcome());
        return ExitCode::SUCCESS;
    };

    if cmd.raw_code {
        print!("{}", render_code_only(doc));
    } else {
        print!("{}", render_document(doc, &highlighter, &language));
    }
    ExitCode::SUCCESS
}

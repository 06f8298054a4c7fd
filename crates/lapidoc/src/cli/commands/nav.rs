//! Implementation of `lapidoc nav`.

use std::process::ExitCode;

use crate::cli::{
    args::NavCommand,
    context::CommandContext,
    output::{NavState, render_nav},
};

/// Prints the navigation tree.
pub fn run(ctx: &mut CommandContext, cmd: &NavCommand) -> ExitCode {
    let mut state = NavState::default();
    for id in &cmd.expand {
        state.set(id, true);
    }
    for id in &cmd.collapse {
        state.set(id, false);
    }

    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    print!("{}", render_nav(corpus.nav(), &state, cmd.active.as_deref()));
    ExitCode::SUCCESS
}

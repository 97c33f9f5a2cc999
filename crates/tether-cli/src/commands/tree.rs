//! Dependency tree view.

use tether_core::error::TetherResult;

use super::CommandContext;
use crate::output::report::{render_cycles, render_tree};

pub fn execute(ctx: &CommandContext) -> TetherResult<()> {
    let report = ctx.load_inputs()?.resolve();
    let colors = ctx.output.colors();

    let mut text = render_tree(&report, &colors);
    text.push_str(&render_cycles(&report, &colors));
    ctx.output.print(&text);
    Ok(())
}

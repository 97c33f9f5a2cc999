//! Default command: human-readable resolution report.

use tether_core::error::TetherResult;

use super::CommandContext;
use crate::output::report::render_resolve;

pub fn execute(ctx: &CommandContext) -> TetherResult<()> {
    let inputs = ctx.load_inputs()?;
    let report = inputs.resolve();

    ctx.output
        .print(&render_resolve(&report, &inputs.installed, &ctx.output.colors()));
    Ok(())
}

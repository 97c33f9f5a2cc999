//! Machine-readable report on stdout.

use tether_core::error::{TetherError, TetherResult};

use super::CommandContext;
use crate::output::report::render_json;

pub fn execute(ctx: &CommandContext) -> TetherResult<()> {
    let report = ctx.load_inputs()?.resolve();
    let text = render_json(&report).map_err(|e| TetherError::json("JSON report", e))?;

    ctx.output.print(&text);
    Ok(())
}

//! Register Read (RR) Stage.
//!
//! Operand readiness was captured at rename and is kept current by writeback
//! broadcasts, so this stage only forwards its bundle to dispatch.

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::Stage;

/// Executes the register read stage.
pub fn reg_read_stage(p: &mut Pipeline) {
    if !p.dispatch.is_empty() {
        return;
    }
    if let Some(bundle) = p.reg_read.take() {
        p.advance_all(&bundle, Stage::RegRead);
        p.dispatch.push(bundle);
    }
}

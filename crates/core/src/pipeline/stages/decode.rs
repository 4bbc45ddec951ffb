//! Instruction Decode (DE) Stage.
//!
//! Decode has no work of its own in a trace-driven model: records arrive with
//! their registers and latency class already resolved. The stage only moves its
//! bundle forward once the rename latch is free.

use crate::pipeline::Pipeline;
use crate::pipeline::instruction::Stage;

/// Executes the decode stage.
pub fn decode_stage(p: &mut Pipeline) {
    if !p.rename.is_empty() {
        return;
    }
    if let Some(bundle) = p.decode.take() {
        p.advance_all(&bundle, Stage::Decode);
        p.rename.push(bundle);
    }
}

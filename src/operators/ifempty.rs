//! If-empty (`??`) (spec §4.4.5).
//!
//! Grounded on `IrEmitter::emit_if_empty_assignment`/`OperatorEmitter::prepare_if_empty`
//! (`examples/original_source/src/fluid/luajit-2.1/src/parser/ir_emitter.cpp`,
//! `operator_emitter.cpp`): a chain of extended-falsey equality checks, each
//! landing (on match) in one shared jump list, plus a separate unconditional
//! jump that skips the RHS entirely when none of them matched.
//!
//! Convention used throughout this chain (distinct from the truthiness tests
//! in [`crate::expr::ExpressionValue::jump_if_true`]): the `JMP` following an
//! `ISEQP`/`ISEQS`/`ISEQN`/`ISEMPTYARR` test fires exactly when the tested
//! predicate holds, not when it fails — the only reading under which chaining
//! four independent equality checks into one shared landing site produces the
//! right OR-of-equalities result.

use crate::bytecode::{BcIns, BcReg};
use crate::cfg::{ControlFlowGraph, Edge, EdgeKind};
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue};
use crate::opcodes::Opcode;

use super::OpCtx;

/// Emit the extended-falsey test chain (`nil`, `false`, `0`, `""`, empty
/// array) against a value already sitting in `reg`, collecting every match
/// into one edge. Shared by [`prepare`] and [`super::presence::check`], which
/// both need exactly this chain (as the original does, duplicated at each of
/// its three call sites).
pub(crate) fn falsey_check_chain(ctx: &mut OpCtx, reg: BcReg, span: SourceSpan) -> EmitResult<Edge> {
    let mut edge = ControlFlowGraph::make_edge(EdgeKind::False, None);
    for sentinel in [ExpDescKind::Nil, ExpDescKind::False, ExpDescKind::Num(0.0), ExpDescKind::Str(String::new())] {
        let lhs = ExpDesc::new(ExpDescKind::NonReloc(reg));
        let mut result = super::compare::equality(ctx, false, lhs, ExpDesc::new(sentinel), span)?;
        if let Some(t) = result.t.take() {
            ControlFlowGraph::append(ctx.buf, &mut edge, t, span)?;
        }
    }
    ctx.buf.emit(BcIns::ad(Opcode::Isemptyarr, 0, reg.index() as i16), ctx.line);
    ControlFlowGraph::emit_jump(ctx.buf, &mut edge, ctx.line, span)?;
    Ok(edge)
}

/// Outcome of [`prepare`].
pub enum IfEmptyPrep {
    /// `lhs` is a compile-time-truthy (extended) constant; it is the final
    /// result and the RHS must not be evaluated.
    Constant(ExpDesc),
    /// `lhs` is a compile-time-falsey (extended) constant; the caller should
    /// evaluate the RHS and use it as-is via [`elide_lhs`].
    ElideLhs,
    /// A runtime value: the caller evaluates the RHS, then calls [`complete`].
    Continue {
        /// The register `lhs` was materialised into, reused as the `??`
        /// expression's own result register.
        reg: BcReg,
        /// Jumps taken when `lhs` matched a falsey sentinel.
        falsey_edge: Edge,
    },
}

/// `lhs ?? _`: prepare phase.
pub fn prepare(ctx: &mut OpCtx, mut lhs: ExpDesc, span: SourceSpan) -> EmitResult<IfEmptyPrep> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut lhs, ctx.line, span)?;
    if let Some(truthy) = lhs.extended_truthy() {
        if truthy {
            return Ok(IfEmptyPrep::Constant(lhs));
        }
        return Ok(IfEmptyPrep::ElideLhs);
    }
    let reg = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;
    let falsey_edge = falsey_check_chain(ctx, reg, span)?;
    Ok(IfEmptyPrep::Continue { reg, falsey_edge })
}

/// `lhs ?? rhs` when `lhs` was a compile-time-falsey constant: the RHS alone is the result.
pub fn elide_lhs(ctx: &mut OpCtx, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut rhs, ctx.line, span)?;
    Ok(rhs)
}

/// `lhs ?? rhs`: complete phase, once the RHS has been emitted into `rhs`.
///
/// Emits an unconditional jump that skips the RHS materialisation entirely
/// (taken when none of the falsey checks matched), patches `falsey_edge` to
/// land right where the RHS materialises into the shared result register,
/// then rejoins the two paths just past it.
pub fn complete(ctx: &mut OpCtx, reg: BcReg, mut falsey_edge: Edge, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    let mut present_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
    ControlFlowGraph::emit_jump(ctx.buf, &mut present_edge, ctx.line, span)?;
    ControlFlowGraph::patch_here(ctx.buf, &mut falsey_edge, span)?;
    ExpressionValue::to_reg(ctx.buf, ctx.alloc, &mut rhs, reg, ctx.consts, ctx.line, span)?;
    ControlFlowGraph::patch_here(ctx.buf, &mut present_edge, span)?;
    Ok(ExpDesc::new(ExpDescKind::NonReloc(reg)))
}

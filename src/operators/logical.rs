//! Short-circuit logical `and`/`or` (spec §4.4.4).
//!
//! The three-phase dance (`prepare_*` / evaluate RHS / `complete_*`) mirrors
//! `lcode.rs`'s `luaK_goiftrue`/`luaK_goiffalse`/`luaK_concat`-driven `and`/`or`
//! handling (`examples/other_examples/48c30ccb_Fivesplate-Lua-skyla__src-lcode.rs.rs`),
//! split into an explicit enum return instead of letting the caller inspect
//! flags after the fact: a constant-folded short circuit tells the statement
//! emitter outright not to evaluate the RHS AST node at all.

use crate::cfg::ControlFlowGraph;
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpressionValue};

use super::OpCtx;

/// Outcome of a logical-operator prepare phase.
pub enum LogicalPrep {
    /// The whole expression folded to a constant at compile time; the RHS
    /// must not be evaluated.
    Constant(ExpDesc),
    /// A runtime branch was emitted; evaluate the RHS, then call the
    /// matching `complete_*`.
    Continue(ExpDesc),
}

/// `a and b`: prepare phase. Jumps past the RHS when `a` is falsey.
pub fn prepare_and(ctx: &mut OpCtx, mut lhs: ExpDesc, span: SourceSpan) -> EmitResult<LogicalPrep> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut lhs, ctx.line, span)?;
    if let Some(truthy) = lhs.narrow_truthy() {
        if !truthy {
            return Ok(LogicalPrep::Constant(lhs));
        }
        return Ok(LogicalPrep::Continue(lhs));
    }

    let falsey_edge = ExpressionValue::jump_if_true(ctx.buf, &lhs, ctx.line, span)?;
    match &mut lhs.f {
        Some(existing) => ControlFlowGraph::append(ctx.buf, existing, falsey_edge, span)?,
        None => lhs.f = Some(falsey_edge),
    }
    if let Some(mut t) = lhs.t.take() {
        ControlFlowGraph::patch_here(ctx.buf, &mut t, span)?;
    }
    Ok(LogicalPrep::Continue(lhs))
}

/// `a or b`: prepare phase. Jumps past the RHS when `a` is truthy.
pub fn prepare_or(ctx: &mut OpCtx, mut lhs: ExpDesc, span: SourceSpan) -> EmitResult<LogicalPrep> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut lhs, ctx.line, span)?;
    if let Some(truthy) = lhs.narrow_truthy() {
        if truthy {
            return Ok(LogicalPrep::Constant(lhs));
        }
        return Ok(LogicalPrep::Continue(lhs));
    }

    let truthy_edge = ExpressionValue::jump_if_false(ctx.buf, &lhs, ctx.line, span)?;
    match &mut lhs.t {
        Some(existing) => ControlFlowGraph::append(ctx.buf, existing, truthy_edge, span)?,
        None => lhs.t = Some(truthy_edge),
    }
    if let Some(mut f) = lhs.f.take() {
        ControlFlowGraph::patch_here(ctx.buf, &mut f, span)?;
    }
    Ok(LogicalPrep::Continue(lhs))
}

/// `a and b`: complete phase, once the RHS has been emitted into `rhs`.
pub fn complete_and(ctx: &mut OpCtx, mut lhs: ExpDesc, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut rhs, ctx.line, span)?;
    if let Some(f) = lhs.f.take() {
        match &mut rhs.f {
            Some(existing) => ControlFlowGraph::append(ctx.buf, existing, f, span)?,
            None => rhs.f = Some(f),
        }
    }
    Ok(rhs)
}

/// `a or b`: complete phase, once the RHS has been emitted into `rhs`.
pub fn complete_or(ctx: &mut OpCtx, mut lhs: ExpDesc, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut rhs, ctx.line, span)?;
    if let Some(t) = lhs.t.take() {
        match &mut rhs.t {
            Some(existing) => ControlFlowGraph::append(ctx.buf, existing, t, span)?,
            None => rhs.t = Some(t),
        }
    }
    Ok(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::{BcReg, BytecodeBuffer};
    use crate::const_pool::ConstPool;
    use crate::expr::ExpDescKind;
    use crate::regalloc::RegisterAllocator;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    fn ctx<'a>(buf: &'a mut BytecodeBuffer, alloc: &'a mut RegisterAllocator, consts: &'a mut ConstPool) -> OpCtx<'a> {
        OpCtx { buf, alloc, consts, line: 1 }
    }

    #[test]
    fn and_with_falsey_constant_short_circuits() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::Nil);
        match prepare_and(&mut c, lhs, span()).unwrap() {
            LogicalPrep::Constant(e) => assert_eq!(e.kind, ExpDescKind::Nil),
            LogicalPrep::Continue(_) => panic!("expected a constant short circuit"),
        }
    }

    #[test]
    fn and_with_runtime_lhs_emits_branch() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::Local(BcReg(0)));
        let prepped = match prepare_and(&mut c, lhs, span()).unwrap() {
            LogicalPrep::Continue(e) => e,
            LogicalPrep::Constant(_) => panic!("expected continue"),
        };
        assert!(prepped.f.is_some());
        assert_eq!(buf.instructions().len(), 2);
    }

    #[test]
    fn complete_and_merges_false_lists() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::Local(BcReg(0)));
        let lhs = match prepare_and(&mut c, lhs, span()).unwrap() {
            LogicalPrep::Continue(e) => e,
            LogicalPrep::Constant(_) => unreachable!(),
        };
        let rhs = ExpDesc::new(ExpDescKind::Local(BcReg(1)));
        let out = complete_and(&mut c, lhs, rhs, span()).unwrap();
        assert!(out.f.is_some());
    }

    #[test]
    fn or_with_truthy_constant_short_circuits() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::True);
        match prepare_or(&mut c, lhs, span()).unwrap() {
            LogicalPrep::Constant(e) => assert_eq!(e.kind, ExpDescKind::True),
            LogicalPrep::Continue(_) => panic!("expected a constant short circuit"),
        }
    }
}

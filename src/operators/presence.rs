//! Presence check `x?` (spec §4.4.8).
//!
//! Grounded on `OperatorEmitter::emit_presence_check`
//! (`examples/original_source/src/fluid/luajit-2.1/src/parser/operator_emitter.cpp`):
//! unlike every other operator here, this one is a single-operand, single-phase
//! lowering — there is no RHS to stage a prepare/complete split around, so
//! [`check`] runs the whole thing in one call, reusing
//! [`super::ifempty::falsey_check_chain`] for the extended-falsey test.

use crate::bytecode::{BcIns, BcReg};
use crate::cfg::{ControlFlowGraph, EdgeKind};
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, TypeHint};
use crate::opcodes::Opcode;

use super::OpCtx;

/// `operand?`: true unless `operand` is `nil`, `false`, `0`, `""`, or an empty
/// array (spec §4.4.2 extended falsey predicate). A compile-time constant
/// folds directly; a runtime value materialises a boolean via the falsey
/// check chain, reusing its register as the result.
pub fn check(ctx: &mut OpCtx, mut operand: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut operand, ctx.line, span)?;

    if let Some(truthy) = operand.extended_truthy() {
        return Ok(ExpDesc::new(if truthy { ExpDescKind::True } else { ExpDescKind::False }));
    }

    let reg = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut operand, ctx.consts, ctx.line, span)?;
    ctx.alloc.release_register(reg.index());

    let mut falsey_edge = super::ifempty::falsey_check_chain(ctx, reg, span)?;

    let dest = BcReg(ctx.alloc.reserve_raw(1, span)?);

    ctx.buf.emit(BcIns::ad(Opcode::Kpri, dest.index(), 2), ctx.line);
    let mut skip_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
    ControlFlowGraph::emit_jump(ctx.buf, &mut skip_edge, ctx.line, span)?;

    ControlFlowGraph::patch_here(ctx.buf, &mut falsey_edge, span)?;
    ctx.buf.emit(BcIns::ad(Opcode::Kpri, dest.index(), 1), ctx.line);

    ControlFlowGraph::patch_here(ctx.buf, &mut skip_edge, span)?;

    let mut out = ExpDesc::new(ExpDescKind::NonReloc(dest));
    out.type_hint = TypeHint::Bool;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::{BcReg as Reg, BytecodeBuffer};
    use crate::const_pool::ConstPool;
    use crate::regalloc::RegisterAllocator;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    fn ctx<'a>(buf: &'a mut BytecodeBuffer, alloc: &'a mut RegisterAllocator, consts: &'a mut ConstPool) -> OpCtx<'a> {
        OpCtx { buf, alloc, consts, line: 1 }
    }

    #[test]
    fn constant_truthy_folds_without_emitting() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let out = check(&mut c, ExpDesc::new(ExpDescKind::Num(1.0)), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::True);
        assert!(buf.instructions().is_empty());
    }

    #[test]
    fn constant_falsey_folds_to_false() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let out = check(&mut c, ExpDesc::new(ExpDescKind::Str(String::new())), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::False);
        assert!(buf.instructions().is_empty());
    }

    #[test]
    fn runtime_value_emits_falsey_chain_and_materialises_bool() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let operand = ExpDesc::new(ExpDescKind::Local(Reg(0)));
        let out = check(&mut c, operand, span()).unwrap();
        match out.kind {
            ExpDescKind::NonReloc(_) => {}
            other => panic!("expected NonReloc, got {other:?}"),
        }
        assert!(buf.instructions().iter().any(|li| li.ins.op == Opcode::Isemptyarr));
    }
}

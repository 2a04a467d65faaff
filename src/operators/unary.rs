//! Unary operators: negation, logical not, length, bitwise not (spec §4.4.1).

use crate::bytecode::BcIns;
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, TypeHint};
use crate::opcodes::Opcode;

use super::OpCtx;

/// `-e`. Constant-folds when `e` is a non-zero numeric constant (avoiding a
/// fold to negative zero, which the VM would otherwise treat identically to
/// `+0.0` but which this crate preserves bit-exactly per spec §4.4.1).
pub fn negate(ctx: &mut OpCtx, mut e: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    if let ExpDescKind::Num(n) = e.kind {
        if n != 0.0 {
            e.kind = ExpDescKind::Num(-n);
            return Ok(e);
        }
    }
    let r = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut e, ctx.consts, ctx.line, span)?;
    ctx.alloc.release_register(r.index());
    let dst = ctx.alloc.reserve_raw(1, span)?;
    let pc = ctx.buf.emit(BcIns::ad(Opcode::Unm, dst, r.index() as i16), ctx.line);
    let mut out = ExpDesc::new(ExpDescKind::Relocable(pc));
    out.type_hint = TypeHint::Num;
    Ok(out)
}

/// `not e` (spec §4.4.1): a constant folds directly; an operand already
/// carrying jump lists (a comparison's `JMP`, a chained `and`/`or`) inverts
/// by swapping its true/false lists, so whichever branch consumes them later
/// (`jump_if_true`/`jump_if_false`, `to_reg`'s jump-materialisation) sees the
/// negated condition. A bare value with no jump lists of its own (a local,
/// global, table read, call result, …) has nothing to swap — `not` on it
/// must emit an actual `NOT` instruction, or the operator would silently be
/// a no-op.
pub fn logical_not(ctx: &mut OpCtx, mut e: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    if let Some(b) = e.narrow_truthy() {
        return Ok(ExpDesc::new(if b { ExpDescKind::False } else { ExpDescKind::True }));
    }
    if e.t.is_some() || e.f.is_some() {
        std::mem::swap(&mut e.t, &mut e.f);
        e.type_hint = TypeHint::Bool;
        return Ok(e);
    }
    let r = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut e, ctx.consts, ctx.line, span)?;
    ctx.alloc.release_register(r.index());
    let dst = ctx.alloc.reserve_raw(1, span)?;
    let pc = ctx.buf.emit(BcIns::ad(Opcode::Not, dst, r.index() as i16), ctx.line);
    let mut out = ExpDesc::new(ExpDescKind::Relocable(pc));
    out.type_hint = TypeHint::Bool;
    Ok(out)
}

/// `#e`: always emits `LEN`, never folded at compile time.
pub fn length(ctx: &mut OpCtx, mut e: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    let r = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut e, ctx.consts, ctx.line, span)?;
    ctx.alloc.release_register(r.index());
    let dst = ctx.alloc.reserve_raw(1, span)?;
    let pc = ctx.buf.emit(BcIns::ad(Opcode::Len, dst, r.index() as i16), ctx.line);
    let mut out = ExpDesc::new(ExpDescKind::Relocable(pc));
    out.type_hint = TypeHint::Num;
    Ok(out)
}

/// `~e`: folds via 32-bit two's-complement when `e` is a numeric constant;
/// otherwise lowers to a call to `bit.bnot` through [`super::bitwise`].
pub fn bitwise_not(ctx: &mut OpCtx, e: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    if let ExpDescKind::Num(n) = e.kind {
        let folded = !(n as i64 as i32) as i32;
        return Ok(ExpDesc::new(ExpDescKind::Num(folded as f64)));
    }
    super::bitwise::dispatch_unary(ctx, "bnot", e, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::BytecodeBuffer;
    use crate::const_pool::ConstPool;
    use crate::regalloc::RegisterAllocator;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    #[test]
    fn negate_folds_nonzero_constant() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let out = negate(&mut ctx, ExpDesc::new(ExpDescKind::Num(3.0)), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::Num(-3.0));
    }

    #[test]
    fn negate_does_not_fold_zero() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let out = negate(&mut ctx, ExpDesc::new(ExpDescKind::Num(0.0)), span()).unwrap();
        assert!(matches!(out.kind, ExpDescKind::Relocable(_)));
        assert_eq!(buf.get(1).op, Opcode::Unm);
    }

    #[test]
    fn logical_not_folds_constants() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let out = logical_not(&mut ctx, ExpDesc::new(ExpDescKind::Nil), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::True);
        let out = logical_not(&mut ctx, ExpDesc::new(ExpDescKind::True), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::False);
    }

    #[test]
    fn logical_not_emits_not_for_a_bare_runtime_value() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let out = logical_not(&mut ctx, ExpDesc::new(ExpDescKind::Local(crate::bytecode::BcReg(0))), span()).unwrap();
        assert!(matches!(out.kind, ExpDescKind::Relocable(_)));
        assert!(buf.instructions().iter().any(|li| li.ins.op == Opcode::Not));
    }

    #[test]
    fn logical_not_swaps_jump_lists_for_a_comparison_result() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let lhs = ExpDesc::new(ExpDescKind::Local(crate::bytecode::BcReg(0)));
        let rhs = ExpDesc::new(ExpDescKind::Local(crate::bytecode::BcReg(1)));
        let cmp = super::super::compare::ordered(&mut ctx, super::super::compare::Ordering::Lt, lhs, rhs, span()).unwrap();
        assert!(cmp.t.is_some() && cmp.f.is_none());
        let out = logical_not(&mut ctx, cmp, span()).unwrap();
        assert!(out.f.is_some() && out.t.is_none());
    }

    #[test]
    fn bitwise_not_folds_with_32bit_wraparound() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let out = bitwise_not(&mut ctx, ExpDesc::new(ExpDescKind::Num(0.0)), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::Num(-1.0));
    }
}

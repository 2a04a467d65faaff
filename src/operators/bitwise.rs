//! Bitwise binary/unary operators, dispatched through the runtime `bit`
//! library rather than a dedicated opcode (spec §4.4.6).
//!
//! `LJ_FR2` (whether the target VM's call frame reserves an extra header
//! slot) is a target-ABI detail this crate does not need to match bit-for-bit
//! (spec §1 Non-goals: "only semantic equivalence under the VM contract");
//! it is modeled as a config-free constant `0` here, with the call-frame
//! layout otherwise following spec §4.4.6 exactly.

use crate::bytecode::BcIns;
use crate::const_pool::ConstPool;
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, TypeHint};
use crate::opcodes::Opcode;

use super::OpCtx;

/// Frame-header slot reservation; see module doc.
const LJ_FR2: u8 = 0;

fn fold_u32(op: &str, a: f64, b: Option<f64>) -> Option<f64> {
    let ia = a as i64 as u32;
    let ib = b.map(|b| b as i64 as u32);
    let result = match (op, ib) {
        ("band", Some(ib)) => ia & ib,
        ("bor", Some(ib)) => ia | ib,
        ("bxor", Some(ib)) => ia ^ ib,
        ("lshift", Some(ib)) => ia.wrapping_shl(ib),
        ("rshift", Some(ib)) => ia.wrapping_shr(ib),
        ("bnot", None) => !ia,
        _ => return None,
    };
    Some(result as i32 as f64)
}

fn global_string_index(consts: &mut ConstPool, s: &str, span: SourceSpan) -> EmitResult<u32> {
    consts.intern_string(s, span)
}

/// Lower a bitwise binary operator (`& | ^ << >>`). Folds at compile time
/// when both operands are numeric constants; otherwise reserves a call-frame
/// base before the RHS is evaluated (mirroring the prepare/evaluate/complete
/// contract every other binary operator follows) and emits a `bit.<name>`
/// call sequence.
pub fn dispatch_binary(
    ctx: &mut OpCtx,
    name: &'static str,
    lhs: ExpDesc,
    rhs: ExpDesc,
    span: SourceSpan,
) -> EmitResult<ExpDesc> {
    if let (ExpDescKind::Num(a), ExpDescKind::Num(b)) = (&lhs.kind, &rhs.kind) {
        if let Some(folded) = fold_u32(name, *a, Some(*b)) {
            return Ok(ExpDesc::new(ExpDescKind::Num(folded)));
        }
    }
    emit_call(ctx, name, lhs, Some(rhs), span)
}

/// Lower `bit.bnot` for the unary `~` operator (spec §4.4.1/§4.4.6).
pub fn dispatch_unary(ctx: &mut OpCtx, name: &'static str, operand: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    emit_call(ctx, name, operand, None, span)
}

fn emit_call(
    ctx: &mut OpCtx,
    name: &'static str,
    mut arg1: ExpDesc,
    arg2: Option<ExpDesc>,
    span: SourceSpan,
) -> EmitResult<ExpDesc> {
    // Reserve the call frame: callee + up to two arguments, each preceded by
    // `LJ_FR2` header slots.
    let argc = if arg2.is_some() { 2 } else { 1 };
    let frame_len = 1 + LJ_FR2 + argc as u8 + (argc as u8 * LJ_FR2);
    let base = ctx.alloc.reserve_raw(frame_len, span)?;

    // `base`: load global `bit`, then index it with the operation name.
    let bit_global = global_string_index(ctx.consts, "bit", span)?;
    let bit_idx = i16::try_from(bit_global).map_err(|_| EmitError::XKConst { span })?;
    ctx.buf.emit(BcIns::ad(Opcode::Gget, base, bit_idx), ctx.line);
    let name_idx = global_string_index(ctx.consts, name, span)?;
    let name_idx = u8::try_from(name_idx).map_err(|_| EmitError::internal(span, "bit.* method name constant too wide"))?;
    ctx.buf.emit(BcIns::abc(Opcode::Tgets, base, base, name_idx), ctx.line);

    let arg1_reg = base + 1 + LJ_FR2;
    ExpressionValue::to_reg(ctx.buf, ctx.alloc, &mut arg1, crate::bytecode::BcReg(arg1_reg), ctx.consts, ctx.line, span)?;

    if let Some(mut arg2) = arg2 {
        let arg2_reg = base + 2 + LJ_FR2 * 2;
        ExpressionValue::to_reg(ctx.buf, ctx.alloc, &mut arg2, crate::bytecode::BcReg(arg2_reg), ctx.consts, ctx.line, span)?;
    }

    let total_args = argc + LJ_FR2 * argc;
    let pc = ctx.buf.emit(BcIns::abc(Opcode::Call, base, total_args + 1, 2), ctx.line);
    ctx.alloc.release_register(base + frame_len - 1);
    for i in (0..frame_len - 1).rev() {
        ctx.alloc.release_register(base + i);
    }

    let mut out = ExpDesc::new(ExpDescKind::Call { pc, base: crate::bytecode::BcReg(base) });
    out.type_hint = TypeHint::Num;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::BytecodeBuffer;
    use crate::regalloc::RegisterAllocator;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    #[test]
    fn band_folds_constants() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let out = dispatch_binary(
            &mut ctx,
            "band",
            ExpDesc::new(ExpDescKind::Num(6.0)),
            ExpDesc::new(ExpDescKind::Num(3.0)),
            span(),
        )
        .unwrap();
        assert_eq!(out.kind, ExpDescKind::Num(2.0));
    }

    #[test]
    fn runtime_bitwise_emits_bit_global_and_call() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut ctx = OpCtx { buf: &mut buf, alloc: &mut alloc, consts: &mut consts, line: 1 };
        let lhs = ExpDesc::new(ExpDescKind::Local(crate::bytecode::BcReg(0)));
        let rhs = ExpDesc::new(ExpDescKind::Local(crate::bytecode::BcReg(1)));
        let out = dispatch_binary(&mut ctx, "lshift", lhs, rhs, span()).unwrap();
        assert!(matches!(out.kind, ExpDescKind::Call { .. }));
        assert_eq!(buf.get(0).op, Opcode::Gget);
        assert_eq!(buf.get(1).op, Opcode::Tgets);
        assert!(buf.instructions().iter().any(|li| li.ins.op == Opcode::Call));
        // register balance restored after the call frame is released
        assert_eq!(alloc.freereg(), 0);
    }
}

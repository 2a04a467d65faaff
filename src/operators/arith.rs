//! Arithmetic operators `+ - * / % ^` (spec §4.4.2).

use crate::bytecode::BcIns;
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, TypeHint};
use crate::opcodes::Opcode;

use super::OpCtx;

/// Which arithmetic operator is being lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl ArithOp {
    fn fold(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Mod => a - (a / b).floor() * b,
            Self::Pow => a.powf(b),
        }
    }

    /// `R(A) := R(B) <op> R(C)`.
    fn vv_op(self) -> Opcode {
        match self {
            Self::Add => Opcode::Addvv,
            Self::Sub => Opcode::Subvv,
            Self::Mul => Opcode::Mulvv,
            Self::Div => Opcode::Divvv,
            Self::Mod => Opcode::Modvv,
            Self::Pow => Opcode::Pow,
        }
    }

    /// `R(A) := R(B) <op> Knum[C]`, if this operator has a `VN` form (`^` doesn't).
    fn vn_op(self) -> Option<Opcode> {
        match self {
            Self::Add => Some(Opcode::Addvn),
            Self::Sub => Some(Opcode::Subvn),
            Self::Mul => Some(Opcode::Mulvn),
            Self::Div => Some(Opcode::Divvn),
            Self::Mod => Some(Opcode::Modvn),
            Self::Pow => None,
        }
    }

    /// `R(A) := Knum[C] <op> R(B)`.
    fn nv_op(self) -> Option<Opcode> {
        match self {
            Self::Add => Some(Opcode::Addnv),
            Self::Sub => Some(Opcode::Subnv),
            Self::Mul => Some(Opcode::Mulnv),
            Self::Div => Some(Opcode::Divnv),
            Self::Mod => Some(Opcode::Modnv),
            Self::Pow => None,
        }
    }
}

/// Reject a constant fold that would produce NaN or a signed-zero result
/// (spec §4.4.2: "the fold uses VM-equivalent semantics and rejects NaN and
/// signed zero results" — those are left to emit runtime instructions so the
/// VM's own arithmetic, not this crate's fold, decides the bit pattern).
fn fold_is_safe(result: f64) -> bool {
    !result.is_nan() && !(result == 0.0 && result.is_sign_negative())
}

/// Prepare phase (spec §4.4 "prepare LHS, evaluate RHS, complete"): a
/// table/global/upvalue/call-result LHS must be discharged to a register
/// *before* the RHS is evaluated, or the RHS's own temporaries end up below
/// the register `binary`'s `VV` path later allocates for LHS, and the
/// release order it assumes (RHS first, then LHS) unwinds the wrong slot.
/// Constants are left untouched so `binary`'s `VN`/`NV` fast path can still
/// fold them without ever occupying a register.
pub fn prepare(ctx: &mut OpCtx, mut lhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut lhs, ctx.line, span)?;
    if matches!(
        lhs.kind,
        ExpDescKind::Nil | ExpDescKind::True | ExpDescKind::False | ExpDescKind::Num(_) | ExpDescKind::Str(_) | ExpDescKind::CData(_)
    ) {
        return Ok(lhs);
    }
    let r = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;
    Ok(ExpDesc::new(ExpDescKind::NonReloc(r)))
}

/// Lower `lhs <op> rhs`. Folds when both operands are numeric constants and
/// the fold is "safe" (see [`fold_is_safe`]). Otherwise: if exactly one
/// operand is constant and fits the 8-bit `C` field, emits the `VN`/`NV`
/// variant to save a constant-pool slot; `^` always uses the `VV` form with
/// both operands in registers.
pub fn binary(ctx: &mut OpCtx, op: ArithOp, mut lhs: ExpDesc, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    if let (ExpDescKind::Num(a), ExpDescKind::Num(b)) = (&lhs.kind, &rhs.kind) {
        let folded = op.fold(*a, *b);
        if fold_is_safe(folded) {
            return Ok(ExpDesc::new(ExpDescKind::Num(folded)));
        }
    }

    let pc = if op != ArithOp::Pow {
        if let (ExpDescKind::Num(b), vn) = (&rhs.kind, op.vn_op()) {
            if let (Some(vn_op), Ok(c)) = (vn, u8::try_from(ctx.consts.intern_number(*b, span)?)) {
                let lr = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;
                ctx.alloc.release_register(lr.index());
                let dst = ctx.alloc.reserve_raw(1, span)?;
                Some(ctx.buf.emit(BcIns::abc(vn_op, dst, lr.index(), c), ctx.line))
            } else {
                None
            }
        } else if let (ExpDescKind::Num(a), nv) = (&lhs.kind, op.nv_op()) {
            if let (Some(nv_op), Ok(c)) = (nv, u8::try_from(ctx.consts.intern_number(*a, span)?)) {
                let rr = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut rhs, ctx.consts, ctx.line, span)?;
                ctx.alloc.release_register(rr.index());
                let dst = ctx.alloc.reserve_raw(1, span)?;
                Some(ctx.buf.emit(BcIns::abc(nv_op, dst, rr.index(), c), ctx.line))
            } else {
                None
            }
        } else {
            None
        }
    } else {
        None
    };

    let pc = match pc {
        Some(pc) => pc,
        None => {
            let lr = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;
            let rr = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut rhs, ctx.consts, ctx.line, span)?;
            ctx.alloc.release_register(rr.index());
            ctx.alloc.release_register(lr.index());
            let dst = ctx.alloc.reserve_raw(1, span)?;
            ctx.buf.emit(BcIns::abc(op.vv_op(), dst, lr.index(), rr.index()), ctx.line)
        }
    };

    let mut out = ExpDesc::new(ExpDescKind::Relocable(pc));
    out.type_hint = TypeHint::Num;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::{BcReg, BytecodeBuffer};
    use crate::const_pool::ConstPool;
    use crate::regalloc::RegisterAllocator;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    fn ctx<'a>(buf: &'a mut BytecodeBuffer, alloc: &'a mut RegisterAllocator, consts: &'a mut ConstPool) -> OpCtx<'a> {
        OpCtx { buf, alloc, consts, line: 1 }
    }

    #[test]
    fn add_folds_numeric_constants() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let out = binary(&mut c, ArithOp::Add, ExpDesc::new(ExpDescKind::Num(2.0)), ExpDesc::new(ExpDescKind::Num(3.0)), span()).unwrap();
        assert_eq!(out.kind, ExpDescKind::Num(5.0));
    }

    #[test]
    fn fold_rejects_negative_zero() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let out = binary(&mut c, ArithOp::Mul, ExpDesc::new(ExpDescKind::Num(-1.0)), ExpDesc::new(ExpDescKind::Num(0.0)), span()).unwrap();
        assert!(matches!(out.kind, ExpDescKind::Relocable(_)));
    }

    #[test]
    fn constant_rhs_uses_vn_form() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::Local(BcReg(0)));
        let rhs = ExpDesc::new(ExpDescKind::Num(1.0));
        binary(&mut c, ArithOp::Add, lhs, rhs, span()).unwrap();
        assert_eq!(buf.get(0).op, Opcode::Addvn);
    }

    #[test]
    fn both_registers_uses_vv_form() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::Local(BcReg(0)));
        let rhs = ExpDesc::new(ExpDescKind::Local(BcReg(1)));
        binary(&mut c, ArithOp::Sub, lhs, rhs, span()).unwrap();
        assert_eq!(buf.get(0).op, Opcode::Subvv);
    }

    #[test]
    fn power_always_uses_vv() {
        let mut buf = BytecodeBuffer::new();
        let mut alloc = RegisterAllocator::new(250);
        let mut consts = ConstPool::new(16);
        let mut c = ctx(&mut buf, &mut alloc, &mut consts);
        let lhs = ExpDesc::new(ExpDescKind::Local(BcReg(0)));
        let rhs = ExpDesc::new(ExpDescKind::Num(2.0));
        binary(&mut c, ArithOp::Pow, lhs, rhs, span()).unwrap();
        assert_eq!(buf.get(0).op, Opcode::Pow);
    }
}

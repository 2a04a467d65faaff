//! Comparison operators: equality and ordered comparison (spec §4.4.3).

use crate::bytecode::BcIns;
use crate::cfg::{ControlFlowGraph, EdgeKind};
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, TypeHint};
use crate::opcodes::Opcode;

use super::OpCtx;

/// Which ordered comparison is being lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Lt,
    Le,
    Gt,
    Ge,
}

/// Prepare phase (spec §4.4 "prepare LHS, evaluate RHS, complete"), shared by
/// [`equality`] and [`ordered`]: a table/global/upvalue/call-result LHS must
/// be discharged to a register before the RHS is evaluated, or the RHS's own
/// temporaries land below the register LHS is later forced into, and
/// `release_lifo`'s assumed order (second operand, then first) unwinds the
/// wrong slot. Recognisable constants are left alone — `equality`'s
/// constant-vs-register fast path, and the fact that `ordered` never holds a
/// constant in a register any longer than it has to, both depend on that.
pub fn prepare(ctx: &mut OpCtx, mut lhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    ExpressionValue::discharge(ctx.buf, ctx.alloc, &mut lhs, ctx.line, span)?;
    if is_recognisable_constant(&lhs).is_some() {
        return Ok(lhs);
    }
    let r = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;
    Ok(ExpDesc::new(ExpDescKind::NonReloc(r)))
}

/// `==`/`!=`. Prefers a constant-specific test (`ISEQP`/`ISEQS`/`ISEQN`) over
/// the generic `ISEQV`/`ISNEV` when one side is a recognisable constant; the
/// constant must be on the right, so operands are swapped if necessary
/// (spec §4.4.3).
pub fn equality(ctx: &mut OpCtx, negate: bool, mut lhs: ExpDesc, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    if is_recognisable_constant(&rhs).is_none() && is_recognisable_constant(&lhs).is_some() {
        std::mem::swap(&mut lhs, &mut rhs);
    }

    let lr = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;

    if is_recognisable_constant(&rhs).is_some() {
        let kind = const_kind(ctx.consts, &rhs, span)?;
        let (op, d) = match kind {
            ConstKind::Primitive(d) => (eq_op(negate, PrimOp::Pri), d),
            ConstKind::Str(idx) => (
                eq_op(negate, PrimOp::Str),
                i16::try_from(idx).map_err(|_| crate::error::EmitError::XKConst { span })?,
            ),
            ConstKind::Num(idx) => (
                eq_op(negate, PrimOp::Num),
                i16::try_from(idx).map_err(|_| crate::error::EmitError::XKConst { span })?,
            ),
        };
        ctx.alloc.release_register(lr.index());
        ctx.buf.emit(BcIns::ad(op, lr.index(), d), ctx.line);
    } else {
        let rr = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut rhs, ctx.consts, ctx.line, span)?;
        release_lifo(ctx, lr.index(), rr.index());
        ctx.buf.emit(BcIns::abc(eq_op(negate, PrimOp::Var), 0, lr.index(), rr.index()), ctx.line);
    };

    finish_as_jmp(ctx, span)
}

enum PrimOp {
    Pri,
    Str,
    Num,
    Var,
}

fn eq_op(negate: bool, kind: PrimOp) -> Opcode {
    match (kind, negate) {
        (PrimOp::Pri, false) => Opcode::Iseqp,
        (PrimOp::Pri, true) => Opcode::Isnep,
        (PrimOp::Str, false) => Opcode::Iseqs,
        (PrimOp::Str, true) => Opcode::Isnes,
        (PrimOp::Num, false) => Opcode::Iseqn,
        (PrimOp::Num, true) => Opcode::Isnen,
        (PrimOp::Var, false) => Opcode::Iseqv,
        (PrimOp::Var, true) => Opcode::Isnev,
    }
}

enum ConstKind {
    Primitive(i16),
    Str(u32),
    Num(u32),
}

fn is_recognisable_constant(e: &ExpDesc) -> Option<()> {
    matches!(e.kind, ExpDescKind::Nil | ExpDescKind::False | ExpDescKind::True | ExpDescKind::Num(_) | ExpDescKind::Str(_))
        .then_some(())
}

fn const_kind(consts: &mut crate::const_pool::ConstPool, e: &ExpDesc, span: SourceSpan) -> EmitResult<ConstKind> {
    Ok(match &e.kind {
        ExpDescKind::Nil => ConstKind::Primitive(0),
        ExpDescKind::False => ConstKind::Primitive(1),
        ExpDescKind::True => ConstKind::Primitive(2),
        ExpDescKind::Num(n) => ConstKind::Num(consts.intern_number(*n, span)?),
        ExpDescKind::Str(s) => ConstKind::Str(consts.intern_string(s, span)?),
        _ => return Err(crate::error::EmitError::internal(span, "const_kind on a non-constant ExpDesc")),
    })
}

fn release_lifo(ctx: &mut OpCtx, a: u8, b: u8) {
    // If the two operand registers are the two topmost temporaries, release
    // both (LIFO) to collapse `freereg` (spec §4.4.3).
    ctx.alloc.release_register(b);
    ctx.alloc.release_register(a);
}

/// The comparison instruction just emitted implicitly follows with an
/// unconditional `JMP` whose PC becomes the result expression's jump-list
/// head (spec §4.4.3: "emit the comparison then an unconditional `JMP`").
fn finish_as_jmp(ctx: &mut OpCtx, span: SourceSpan) -> EmitResult<ExpDesc> {
    let mut edge = ControlFlowGraph::make_edge(EdgeKind::True, None);
    let jmp_pc = ControlFlowGraph::emit_jump(ctx.buf, &mut edge, ctx.line, span)?;
    let mut out = ExpDesc::new(ExpDescKind::Jmp(jmp_pc));
    out.t = Some(edge);
    out.type_hint = TypeHint::Bool;
    Ok(out)
}

/// `< <= > >=`. `GT`/`GE` reduce to `LT`/`LE` with swapped operands (spec §4.4.3).
pub fn ordered(ctx: &mut OpCtx, ord: Ordering, lhs: ExpDesc, rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    let (op, mut a, mut b) = match ord {
        Ordering::Lt => (Opcode::Islt, lhs, rhs),
        Ordering::Le => (Opcode::Isle, lhs, rhs),
        Ordering::Gt => (Opcode::Islt, rhs, lhs),
        Ordering::Ge => (Opcode::Isle, rhs, lhs),
    };
    let ar = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut a, ctx.consts, ctx.line, span)?;
    let br = ExpressionValue::to_any_reg(ctx.buf, ctx.alloc, &mut b, ctx.consts, ctx.line, span)?;
    release_lifo(ctx, ar.index(), br.index());
    ctx.buf.emit(BcIns::ad(op, ar.index(), br.index() as i16), ctx.line);
    finish_as_jmp(ctx, span)
}

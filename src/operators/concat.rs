//! Concatenation `..` (spec §4.4.7).
//!
//! Grounded on `OperatorEmitter::prepare_concat`/`complete_concat`
//! (`examples/original_source/src/fluid/luajit-2.1/src/parser/operator_emitter.cpp`):
//! `CAT` operates over a *run* of consecutive registers, so unlike every other
//! binary operator here the LHS is discharged straight into `freereg` (not
//! "any register") and the completion phase special-cases an already-`CAT`
//! RHS to flatten `a..b..c` into one instruction instead of nesting `CAT`s.

use crate::bytecode::BcIns;
use crate::error::{EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, TypeHint};
use crate::opcodes::Opcode;

use super::OpCtx;

/// `lhs .. _`: prepare phase. Moves `lhs` into the next free register so it
/// anchors the consecutive run `CAT` will read from.
pub fn prepare(ctx: &mut OpCtx, mut lhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    let r = ExpressionValue::to_next_reg(ctx.buf, ctx.alloc, &mut lhs, ctx.consts, ctx.line, span)?;
    Ok(ExpDesc::new(ExpDescKind::NonReloc(r)))
}

/// `lhs .. rhs`: complete phase, once the RHS has been emitted into `rhs`.
///
/// If `rhs` is itself the relocable result of a not-yet-materialised `CAT`
/// whose start register is exactly `lhs`'s register plus one, the existing
/// `CAT` is widened in place rather than nesting a fresh one (spec §4.4.7:
/// "flattens `a..b..c` into a single instruction").
pub fn complete(ctx: &mut OpCtx, lhs: ExpDesc, mut rhs: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
    let lhs_reg = match lhs.kind {
        ExpDescKind::NonReloc(r) => r,
        _ => {
            return Err(crate::error::EmitError::internal(
                span,
                "concat completion called with an undischarged LHS (prepare() was not run)",
            ))
        }
    };

    ExpressionValue::to_val(ctx.buf, ctx.alloc, &mut rhs, ctx.consts, ctx.line, span)?;

    if let ExpDescKind::Relocable(pc) = rhs.kind {
        if ctx.buf.get(pc).op == Opcode::Cat {
            if let crate::bytecode::Operands::Abc { b, .. } = ctx.buf.get(pc).operands {
                if b == lhs_reg.index() + 1 {
                    ctx.alloc.release_register(lhs_reg.index());
                    if let crate::bytecode::Operands::Abc { c, .. } = ctx.buf.get(pc).operands {
                        *ctx.buf.get_mut(pc) = BcIns::abc(Opcode::Cat, 0, lhs_reg.index(), c);
                    }
                    let mut out = ExpDesc::new(ExpDescKind::Relocable(pc));
                    out.type_hint = TypeHint::Str;
                    return Ok(out);
                }
            }
        }
    }

    let rhs_reg = ExpressionValue::to_next_reg(ctx.buf, ctx.alloc, &mut rhs, ctx.consts, ctx.line, span)?;
    ctx.alloc.release_register(rhs_reg.index());
    ctx.alloc.release_register(lhs_reg.index());
    let pc = ctx.buf.emit(BcIns::abc(Opcode::Cat, 0, lhs_reg.index(), rhs_reg.index()), ctx.line);
    let mut out = ExpDesc::new(ExpDescKind::Relocable(pc));
    out.type_hint = TypeHint::Str;
    Ok(out)
}

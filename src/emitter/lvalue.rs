//! Assignable targets: resolving an [`LValue`] to a storage slot and reading/
//! writing through it (spec §4.5 "Assignment", §4.1 `duplicate_table_operands`).
//!
//! [`LvalueSlot::Indexed`] is what actually satisfies
//! `duplicate_table_operands`: the table and key expressions of a `Member`/
//! `Index` target are evaluated exactly once by [`Emitter::resolve_lvalue`]
//! and the resulting registers are reused for both the read half of a
//! compound assignment and the write that follows it, rather than
//! re-evaluating the target expression twice.

use crate::ast::{Expr, LValue, LiteralValue};
use crate::bytecode::{BcIns, BcReg};
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, IndexKey};
use crate::external::{GcHeap, LexState};
use crate::opcodes::Opcode;
use crate::proto::PrototypeSink;

use super::Emitter;

/// Where an [`LValue`] actually lives, with its table/key operands (if any)
/// already evaluated into registers.
pub(super) enum LvalueSlot {
    Local(BcReg),
    Upval(u16),
    Global(u32),
    Unscoped(u32),
    Indexed { table: BcReg, key: IndexKey },
}

impl<'a, L, G, K> Emitter<'a, L, G, K>
where
    L: LexState,
    G: GcHeap,
    K: PrototypeSink,
{
    /// Classify an index expression as a short-string field, a small
    /// non-negative integer, or fall back to evaluating it into a register
    /// (spec §4.3 `Indexed`'s `aux`). Shared by [`Self::resolve_lvalue`] and
    /// plain `table[expr]` reads in `emitter/expr.rs`.
    pub(super) fn classify_index_key(&mut self, index: &Expr, span: SourceSpan) -> EmitResult<IndexKey> {
        match index {
            Expr::Literal { value: LiteralValue::Str(s), .. } => {
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let idx = fs.consts.intern_string(s, span)?;
                let _ = line;
                Ok(IndexKey::Str(idx))
            }
            Expr::Literal { value: LiteralValue::Num(n), .. } if *n >= 0.0 && *n <= 255.0 && n.fract() == 0.0 => {
                Ok(IndexKey::Imm(*n as u8))
            }
            other => {
                let mut e = self.emit_expr(other)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let r = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut e, &mut fs.consts, line, span)?;
                Ok(IndexKey::Reg(r))
            }
        }
    }

    /// Resolve an [`LValue`] to its storage slot, evaluating any `table`/`key`
    /// sub-expressions exactly once.
    pub(super) fn resolve_lvalue(&mut self, lvalue: &LValue, span: SourceSpan) -> EmitResult<LvalueSlot> {
        match lvalue {
            LValue::Identifier(name) => {
                let kind = self.stack.resolve(name, span)?;
                match kind {
                    ExpDescKind::Local(r) => Ok(LvalueSlot::Local(r)),
                    ExpDescKind::Upval(slot) => Ok(LvalueSlot::Upval(slot)),
                    ExpDescKind::Global(idx) => Ok(LvalueSlot::Global(idx)),
                    ExpDescKind::Unscoped(idx) => Ok(LvalueSlot::Unscoped(idx)),
                    _ => Err(EmitError::internal(span, "resolve() produced a non-lvalue ExpDescKind")),
                }
            }
            LValue::Member { table, name } => {
                let mut t = self.emit_expr(table)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let table_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut t, &mut fs.consts, line, span)?;
                let str_idx = fs.consts.intern_string(name, span)?;
                Ok(LvalueSlot::Indexed { table: table_reg, key: IndexKey::Str(str_idx) })
            }
            LValue::Index { table, index } => {
                let mut t = self.emit_expr(table)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let table_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut t, &mut fs.consts, line, span)?;
                let key = self.classify_index_key(index, span)?;
                Ok(LvalueSlot::Indexed { table: table_reg, key })
            }
        }
    }

    /// Read a slot's current value as an (undischarged) [`ExpDesc`], mirroring
    /// the shape [`crate::funcstate::FuncStateStack::resolve`] would have
    /// produced had the lvalue been an ordinary identifier reference.
    pub(super) fn read_slot(&self, slot: &LvalueSlot) -> ExpDesc {
        match slot {
            LvalueSlot::Local(r) => ExpDesc::new(ExpDescKind::Local(*r)),
            LvalueSlot::Upval(s) => ExpDesc::new(ExpDescKind::Upval(*s)),
            LvalueSlot::Global(idx) => ExpDesc::new(ExpDescKind::Global(*idx)),
            LvalueSlot::Unscoped(idx) => ExpDesc::new(ExpDescKind::Unscoped(*idx)),
            LvalueSlot::Indexed { table, key } => ExpDesc::new(ExpDescKind::Indexed { table: *table, key: *key }),
        }
    }

    /// Read a slot's current value for a compound assignment's read phase
    /// (spec §4.1 `duplicate_table_operands`): an `Indexed` slot's `table`/
    /// `key` registers must stay reserved and untouched until the write that
    /// follows, so the read side gets its own `MOV`-duplicated copy instead
    /// of the original registers. Every other slot kind has nothing to
    /// duplicate (a local/upvalue/global isn't at risk of being clobbered by
    /// the RHS's own temporaries) and behaves exactly like [`Self::read_slot`].
    pub(super) fn read_slot_for_update(&mut self, slot: &LvalueSlot, span: SourceSpan) -> EmitResult<ExpDesc> {
        match slot {
            LvalueSlot::Indexed { table, key } => {
                let (dup_table, dup_key) = self.duplicate_table_operands(*table, *key, span)?;
                Ok(ExpDesc::new(ExpDescKind::Indexed { table: dup_table, key: dup_key }))
            }
            other => Ok(self.read_slot(other)),
        }
    }

    /// Copy `table` (and `key`, if it also lives in a register) into a fresh
    /// pair of registers above the current watermark (spec §4.1
    /// `duplicate_table_operands`). Grounded here rather than in
    /// `regalloc.rs` because emitting the `MOV`s needs the bytecode buffer,
    /// which the allocator deliberately doesn't touch.
    pub(super) fn duplicate_table_operands(&mut self, table: BcReg, key: IndexKey, span: SourceSpan) -> EmitResult<(BcReg, IndexKey)> {
        let line = self.current_line();
        let fs = self.stack.current_mut();
        let dup_table = BcReg(fs.alloc.reserve_raw(1, span)?);
        fs.buf.emit(BcIns::ad(Opcode::Mov, dup_table.index(), table.index() as i16), line);
        let dup_key = match key {
            IndexKey::Reg(kr) => {
                let r = BcReg(fs.alloc.reserve_raw(1, span)?);
                fs.buf.emit(BcIns::ad(Opcode::Mov, r.index(), kr.index() as i16), line);
                IndexKey::Reg(r)
            }
            other => other,
        };
        Ok((dup_table, dup_key))
    }

    /// Store `value` through `slot` (spec §4.5 "Assignment").
    ///
    /// Upvalue writes prefer a constant-specialised opcode (`USETS`/`USETN`/
    /// `USETP`) over the generic `USETV` when `value` discharges to a
    /// recognisable constant, mirroring the equality operator's constant
    /// dispatch in `operators/compare.rs`.
    pub(super) fn write_slot(&mut self, slot: &LvalueSlot, mut value: ExpDesc, span: SourceSpan) -> EmitResult<()> {
        let line = self.current_line();
        let fs = self.stack.current_mut();

        match slot {
            LvalueSlot::Local(r) => {
                ExpressionValue::to_reg(&mut fs.buf, &mut fs.alloc, &mut value, *r, &mut fs.consts, line, span)?;
            }
            LvalueSlot::Upval(uv_slot) => {
                ExpressionValue::to_val(&mut fs.buf, &mut fs.alloc, &mut value, &mut fs.consts, line, span)?;
                let uv = *uv_slot as u8;
                match value.kind {
                    ExpDescKind::Nil => {
                        fs.buf.emit(BcIns::ad(Opcode::Usetp, uv, 0), line);
                    }
                    ExpDescKind::False => {
                        fs.buf.emit(BcIns::ad(Opcode::Usetp, uv, 1), line);
                    }
                    ExpDescKind::True => {
                        fs.buf.emit(BcIns::ad(Opcode::Usetp, uv, 2), line);
                    }
                    ExpDescKind::Num(n) => {
                        let idx = fs.consts.intern_number(n, span)?;
                        let idx = i16::try_from(idx).map_err(|_| EmitError::XKConst { span })?;
                        fs.buf.emit(BcIns::ad(Opcode::Usetn, uv, idx), line);
                    }
                    ExpDescKind::Str(ref s) => {
                        let idx = fs.consts.intern_string(s, span)?;
                        let idx = i16::try_from(idx).map_err(|_| EmitError::XKConst { span })?;
                        fs.buf.emit(BcIns::ad(Opcode::Usets, uv, idx), line);
                    }
                    _ => {
                        let r = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut value, &mut fs.consts, line, span)?;
                        fs.buf.emit(BcIns::ad(Opcode::Usetv, r.index(), *uv_slot as i16), line);
                    }
                }
            }
            LvalueSlot::Global(idx) | LvalueSlot::Unscoped(idx) => {
                let r = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut value, &mut fs.consts, line, span)?;
                let d = i16::try_from(*idx).map_err(|_| EmitError::XKConst { span })?;
                fs.buf.emit(BcIns::ad(Opcode::Gset, r.index(), d), line);
            }
            LvalueSlot::Indexed { table, key } => {
                let table = *table;
                let key = *key;
                self.store_indexed(table, key, value, span)?;
                let fs = self.stack.current_mut();
                if let IndexKey::Reg(kr) = key {
                    fs.alloc.release_register(kr.index());
                }
                fs.alloc.release_register(table.index());
                return Ok(());
            }
        }
        Ok(())
    }

    /// `table[key] := value` (spec §4.5, and table-literal field construction
    /// in `emitter/expr.rs`'s `emit_table`). Shared so both an lvalue write
    /// and a table constructor's field store go through the same
    /// `TSETV`/`TSETS`/`TSETB` dispatch as the `TGETV`/`TGETS`/`TGETB` dispatch
    /// in [`ExpressionValue::discharge`].
    pub(super) fn store_indexed(&mut self, table: BcReg, key: IndexKey, mut value: ExpDesc, span: SourceSpan) -> EmitResult<()> {
        let line = self.current_line();
        let fs = self.stack.current_mut();
        let r = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut value, &mut fs.consts, line, span)?;
        match key {
            IndexKey::Reg(kr) => {
                fs.buf.emit(BcIns::abc(Opcode::Tsetv, r.index(), table.index(), kr.index()), line);
            }
            IndexKey::Str(s) => {
                let s = u8::try_from(s).map_err(|_| EmitError::internal(span, "TSETS constant index too wide"))?;
                fs.buf.emit(BcIns::abc(Opcode::Tsets, r.index(), table.index(), s), line);
            }
            IndexKey::Imm(i) => {
                fs.buf.emit(BcIns::abc(Opcode::Tsetb, r.index(), table.index(), i), line);
            }
        }
        fs.alloc.release_register(r.index());
        Ok(())
    }
}

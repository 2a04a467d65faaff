//! Expression emission (spec §4.3, §4.4): lowers every [`Expr`] variant to an
//! [`ExpDesc`], dispatching operators into `crate::operators::*` and calls/
//! table literals/nested functions into the helpers below.

use crate::ast::{BinaryOp, Expr, LiteralValue, TableField, TableFieldKind, UnaryOp, UpdateOp};
use crate::bytecode::{BcIns, BcReg};
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, IndexKey};
use crate::external::{GcHeap, LexState};
use crate::opcodes::Opcode;
use crate::operators::{arith, bitwise, compare, concat, ifempty, logical, presence, unary};
use crate::proto::PrototypeSink;

use super::Emitter;

/// True if `e`, as the last entry of an expression/argument list, should
/// widen to "all results" rather than contribute exactly one value (spec
/// §3.4, §4.5 "Local declaration"). Unlike [`Expr::is_multret`] (purely
/// variant-based), this also honours the parser's `forwards_multret` flag on
/// a trailing call.
pub(super) fn trailing_forwards_multret(e: &Expr) -> bool {
    match e {
        Expr::Call { forwards_multret, .. } => *forwards_multret,
        Expr::VarArg { .. } => true,
        _ => false,
    }
}

impl<'a, L, G, K> Emitter<'a, L, G, K>
where
    L: LexState,
    G: GcHeap,
    K: PrototypeSink,
{
    pub(crate) fn emit_expr(&mut self, expr: &Expr) -> EmitResult<ExpDesc> {
        match expr {
            Expr::Literal { value, span } => Ok(self.emit_literal(value, *span)),
            Expr::Identifier { name, span } => {
                let kind = self.stack.resolve(name, *span)?;
                Ok(ExpDesc::new(kind))
            }
            Expr::VarArg { span } => {
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let pc = fs.buf.emit(BcIns::ad(Opcode::Varg, 0, 1), line);
                let _ = span;
                Ok(ExpDesc::new(ExpDescKind::Relocable(pc)))
            }
            Expr::Unary { op, operand, span } => {
                let e = self.emit_expr(operand)?;
                self.emit_unary(*op, e, *span)
            }
            Expr::Update { op, prefix, target, span } => self.emit_update(*op, *prefix, target, *span),
            Expr::Binary { op, lhs, rhs, span } => self.emit_binary(*op, lhs, rhs, *span),
            Expr::Ternary { cond, then_branch, else_branch, span } => self.emit_ternary(cond, then_branch, else_branch, *span),
            Expr::Presence { operand, span } => {
                let e = self.emit_expr(operand)?;
                self.with_opctx(|ctx| presence::check(ctx, e, *span))
            }
            Expr::Call { callee, method, args, forwards_multret: _, span } => {
                self.emit_call_expr(callee, method, args, *span)
            }
            Expr::Member { table, name, span } => {
                let mut t = self.emit_expr(table)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let table_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut t, &mut fs.consts, line, *span)?;
                let idx = fs.consts.intern_string(name, *span)?;
                Ok(ExpDesc::new(ExpDescKind::Indexed { table: table_reg, key: IndexKey::Str(idx) }))
            }
            Expr::Index { table, index, span } => {
                let mut t = self.emit_expr(table)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let table_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut t, &mut fs.consts, line, *span)?;
                let key = self.classify_index_key(index, *span)?;
                Ok(ExpDesc::new(ExpDescKind::Indexed { table: table_reg, key }))
            }
            Expr::Table { fields, span } => self.emit_table(fields, *span),
            Expr::Function { literal } => self.emit_function_literal(literal),
        }
    }

    fn emit_literal(&mut self, value: &LiteralValue, _span: SourceSpan) -> ExpDesc {
        match value {
            LiteralValue::Nil => ExpDesc::new(ExpDescKind::Nil),
            LiteralValue::Bool(true) => ExpDesc::new(ExpDescKind::True),
            LiteralValue::Bool(false) => ExpDesc::new(ExpDescKind::False),
            LiteralValue::Num(n) => ExpDesc::new(ExpDescKind::Num(*n)),
            LiteralValue::Str(s) => ExpDesc::new(ExpDescKind::Str(s.clone())),
            LiteralValue::CData(idx) => ExpDesc::new(ExpDescKind::CData(*idx)),
        }
    }

    fn emit_unary(&mut self, op: UnaryOp, e: ExpDesc, span: SourceSpan) -> EmitResult<ExpDesc> {
        match op {
            UnaryOp::Neg => self.with_opctx(|ctx| unary::negate(ctx, e, span)),
            UnaryOp::Not => self.with_opctx(|ctx| unary::logical_not(ctx, e, span)),
            UnaryOp::Len => self.with_opctx(|ctx| unary::length(ctx, e, span)),
            UnaryOp::BNot => self.with_opctx(|ctx| unary::bitwise_not(ctx, e, span)),
        }
    }

    /// `++x`/`x++`/`--x`/`x--` (spec §4.5's `LValue`-targeting expression
    /// forms): read the slot once, compute `old +/- 1`, write it back, and
    /// return either the new value (prefix) or a snapshot of the old one
    /// (postfix) taken before the slot is overwritten.
    fn emit_update(&mut self, op: UpdateOp, prefix: bool, target: &crate::ast::LValue, span: SourceSpan) -> EmitResult<ExpDesc> {
        let base = self.stack.current_mut().alloc.freereg();

        let slot = self.resolve_lvalue(target, span)?;
        let mut old = self.read_slot_for_update(&slot, span)?;

        let line = self.current_line();
        let fs = self.stack.current_mut();
        let old_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut old, &mut fs.consts, line, span)?;

        let snapshot_reg = if !prefix {
            let r = BcReg(fs.alloc.reserve_raw(1, span)?);
            let mut copy = ExpDesc::new(ExpDescKind::NonReloc(old_reg));
            ExpressionValue::to_reg(&mut fs.buf, &mut fs.alloc, &mut copy, r, &mut fs.consts, line, span)?;
            Some(r)
        } else {
            None
        };

        let arith_op = match op {
            UpdateOp::Inc => arith::ArithOp::Add,
            UpdateOp::Dec => arith::ArithOp::Sub,
        };
        let new_val = self.with_opctx(|ctx| {
            arith::binary(ctx, arith_op, ExpDesc::new(ExpDescKind::NonReloc(old_reg)), ExpDesc::new(ExpDescKind::Num(1.0)), span)
        })?;

        let line = self.current_line();
        let fs = self.stack.current_mut();
        let mut new_val = new_val;
        let new_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut new_val, &mut fs.consts, line, span)?;

        self.write_slot(&slot, ExpDesc::new(ExpDescKind::NonReloc(new_reg)), span)?;

        // Release whichever temporaries this expression doesn't hand back;
        // a no-op on any register that turned out to be a live local's own
        // (`release_register` only collapses registers at/above `nactvar`).
        let fs = self.stack.current_mut();
        fs.alloc.release_register(old_reg.index());
        if !prefix {
            fs.alloc.release_register(new_reg.index());
        }

        let result_reg = if prefix { new_reg } else { snapshot_reg.expect("postfix reserves a snapshot register") };

        // For an `Indexed` target, `result_reg` sits above the target's own
        // table/key registers (still reserved this whole time for the final
        // `write_slot` above); a plain top-of-stack release can't reach them
        // once `result_reg` is pinned above. Relocate the result down to
        // `base` and collapse everything above it in one go. A no-op move
        // when `result_reg` already is `base` (every non-`Indexed` target).
        let line = self.current_line();
        let fs = self.stack.current_mut();
        let dest = BcReg(base);
        if result_reg != dest {
            fs.buf.emit(BcIns::ad(Opcode::Mov, dest.index(), result_reg.index() as i16), line);
        }
        while fs.alloc.freereg() > base + 1 {
            let top = fs.alloc.freereg() - 1;
            fs.alloc.release_register(top);
        }

        Ok(ExpDesc::new(ExpDescKind::NonReloc(dest)))
    }

    fn emit_binary(&mut self, op: BinaryOp, lhs_expr: &Expr, rhs_expr: &Expr, span: SourceSpan) -> EmitResult<ExpDesc> {
        match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
                let lhs = self.emit_expr(lhs_expr)?;
                let lhs = self.with_opctx(|ctx| arith::prepare(ctx, lhs, span))?;
                let rhs = self.emit_expr(rhs_expr)?;
                let arith_op = match op {
                    BinaryOp::Add => arith::ArithOp::Add,
                    BinaryOp::Sub => arith::ArithOp::Sub,
                    BinaryOp::Mul => arith::ArithOp::Mul,
                    BinaryOp::Div => arith::ArithOp::Div,
                    BinaryOp::Mod => arith::ArithOp::Mod,
                    BinaryOp::Pow => arith::ArithOp::Pow,
                    _ => unreachable!(),
                };
                self.with_opctx(|ctx| arith::binary(ctx, arith_op, lhs, rhs, span))
            }
            BinaryOp::Eq | BinaryOp::Ne => {
                let lhs = self.emit_expr(lhs_expr)?;
                let lhs = self.with_opctx(|ctx| compare::prepare(ctx, lhs, span))?;
                let rhs = self.emit_expr(rhs_expr)?;
                self.with_opctx(|ctx| compare::equality(ctx, op == BinaryOp::Ne, lhs, rhs, span))
            }
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                let lhs = self.emit_expr(lhs_expr)?;
                let lhs = self.with_opctx(|ctx| compare::prepare(ctx, lhs, span))?;
                let rhs = self.emit_expr(rhs_expr)?;
                let ord = match op {
                    BinaryOp::Lt => compare::Ordering::Lt,
                    BinaryOp::Le => compare::Ordering::Le,
                    BinaryOp::Gt => compare::Ordering::Gt,
                    BinaryOp::Ge => compare::Ordering::Ge,
                    _ => unreachable!(),
                };
                self.with_opctx(|ctx| compare::ordered(ctx, ord, lhs, rhs, span))
            }
            BinaryOp::And => {
                let lhs = self.emit_expr(lhs_expr)?;
                match self.with_opctx(|ctx| logical::prepare_and(ctx, lhs, span))? {
                    logical::LogicalPrep::Constant(e) => Ok(e),
                    logical::LogicalPrep::Continue(lhs) => {
                        let rhs = self.emit_expr(rhs_expr)?;
                        self.with_opctx(|ctx| logical::complete_and(ctx, lhs, rhs, span))
                    }
                }
            }
            BinaryOp::Or => {
                let lhs = self.emit_expr(lhs_expr)?;
                match self.with_opctx(|ctx| logical::prepare_or(ctx, lhs, span))? {
                    logical::LogicalPrep::Constant(e) => Ok(e),
                    logical::LogicalPrep::Continue(lhs) => {
                        let rhs = self.emit_expr(rhs_expr)?;
                        self.with_opctx(|ctx| logical::complete_or(ctx, lhs, rhs, span))
                    }
                }
            }
            BinaryOp::IfEmpty => {
                let lhs = self.emit_expr(lhs_expr)?;
                match self.with_opctx(|ctx| ifempty::prepare(ctx, lhs, span))? {
                    ifempty::IfEmptyPrep::Constant(e) => Ok(e),
                    ifempty::IfEmptyPrep::ElideLhs => {
                        let rhs = self.emit_expr(rhs_expr)?;
                        self.with_opctx(|ctx| ifempty::elide_lhs(ctx, rhs, span))
                    }
                    ifempty::IfEmptyPrep::Continue { reg, falsey_edge } => {
                        let rhs = self.emit_expr(rhs_expr)?;
                        self.with_opctx(|ctx| ifempty::complete(ctx, reg, falsey_edge, rhs, span))
                    }
                }
            }
            BinaryOp::Concat => {
                let lhs = self.emit_expr(lhs_expr)?;
                let lhs = self.with_opctx(|ctx| concat::prepare(ctx, lhs, span))?;
                let rhs = self.emit_expr(rhs_expr)?;
                self.with_opctx(|ctx| concat::complete(ctx, lhs, rhs, span))
            }
            BinaryOp::BAnd | BinaryOp::BOr | BinaryOp::BXor | BinaryOp::Shl | BinaryOp::Shr => {
                let lhs = self.emit_expr(lhs_expr)?;
                let rhs = self.emit_expr(rhs_expr)?;
                let name: &'static str = match op {
                    BinaryOp::BAnd => "band",
                    BinaryOp::BOr => "bor",
                    BinaryOp::BXor => "bxor",
                    BinaryOp::Shl => "lshift",
                    BinaryOp::Shr => "rshift",
                    _ => unreachable!(),
                };
                self.with_opctx(|ctx| bitwise::dispatch_binary(ctx, name, lhs, rhs, span))
            }
        }
    }

    /// `cond ? then : else`, using the extended-falsey predicate on `cond`
    /// (spec §4.4's ternary note), grounded on the same falsey-chain +
    /// shared-destination-register shape as `operators::presence::check`.
    fn emit_ternary(&mut self, cond: &Expr, then_e: &Expr, else_e: &Expr, span: SourceSpan) -> EmitResult<ExpDesc> {
        let mut cond_desc = self.emit_expr(cond)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        ExpressionValue::discharge(&mut fs.buf, &mut fs.alloc, &mut cond_desc, line, span)?;
        if let Some(truthy) = cond_desc.extended_truthy() {
            return if truthy { self.emit_expr(then_e) } else { self.emit_expr(else_e) };
        }

        let fs = self.stack.current_mut();
        let reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut cond_desc, &mut fs.consts, line, span)?;
        fs.alloc.release_register(reg.index());

        let mut falsey_edge = self.with_opctx(|ctx| ifempty::falsey_check_chain(ctx, reg, span))?;

        let fs = self.stack.current_mut();
        let dest = BcReg(fs.alloc.reserve_raw(1, span)?);

        let mut then_desc = self.emit_expr(then_e)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        ExpressionValue::to_reg(&mut fs.buf, &mut fs.alloc, &mut then_desc, dest, &mut fs.consts, line, span)?;

        let mut skip_edge = crate::cfg::ControlFlowGraph::make_edge(crate::cfg::EdgeKind::Unconditional, None);
        crate::cfg::ControlFlowGraph::emit_jump(&mut fs.buf, &mut skip_edge, line, span)?;

        crate::cfg::ControlFlowGraph::patch_here(&mut fs.buf, &mut falsey_edge, span)?;

        let mut else_desc = self.emit_expr(else_e)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        ExpressionValue::to_reg(&mut fs.buf, &mut fs.alloc, &mut else_desc, dest, &mut fs.consts, line, span)?;

        crate::cfg::ControlFlowGraph::patch_here(&mut fs.buf, &mut skip_edge, span)?;

        Ok(ExpDesc::new(ExpDescKind::NonReloc(dest)))
    }

    /// Reserve and populate a call frame's leading register(s): just the
    /// callee for a plain call, or `callee, receiver` for a method call
    /// (which also emits the `TGETS` lookup). Shared by [`Self::emit_call_expr`]
    /// and `emitter::stmt`'s `defer` handling, which freezes the same frame
    /// shape without emitting the trailing `CALL` itself.
    ///
    /// Returns `(base register, implicit argument count)` — the implicit
    /// count is `1` for a method call (the receiver already occupies the
    /// first argument slot) and `0` otherwise.
    pub(super) fn setup_call_frame(&mut self, callee: &Expr, method: &Option<String>, span: SourceSpan) -> EmitResult<(u8, u8)> {
        match method {
            None => {
                let mut callee_desc = self.emit_expr(callee)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let base = ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut callee_desc, &mut fs.consts, line, span)?;
                Ok((base.index(), 0u8))
            }
            Some(name) => {
                let mut recv = self.emit_expr(callee)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let base = fs.alloc.reserve_raw(2, span)?;
                let recv_reg = BcReg(base + 1);
                ExpressionValue::to_reg(&mut fs.buf, &mut fs.alloc, &mut recv, recv_reg, &mut fs.consts, line, span)?;
                let name_idx = fs.consts.intern_string(name, span)?;
                let name_idx = u8::try_from(name_idx).map_err(|_| EmitError::internal(span, "method name constant too wide"))?;
                fs.buf.emit(BcIns::abc(Opcode::Tgets, base, recv_reg.index(), name_idx), line);
                Ok((base, 1u8))
            }
        }
    }

    /// `callee(args)` / `callee:method(args)` (spec §4.4.6 call-frame shape,
    /// generalised beyond bitwise dispatch's synthesized frame). A method
    /// call reserves two consecutive registers, discharges the receiver into
    /// the second, and looks up `method` on it via `TGETS` — there is no
    /// dedicated `SELF`-style opcode in this crate's bytecode ABI.
    fn emit_call_expr(&mut self, callee: &Expr, method: &Option<String>, args: &[Expr], span: SourceSpan) -> EmitResult<ExpDesc> {
        let (base, implicit) = self.setup_call_frame(callee, method, span)?;

        let (nargs, multret) = self.emit_call_args(implicit, args, span)?;

        let line = self.current_line();
        let fs = self.stack.current_mut();
        let b = if multret { 0 } else { nargs + 1 };
        let pc = fs.buf.emit(BcIns::abc(Opcode::Call, base, b, 2), line);

        let top = fs.alloc.freereg();
        for r in (base..top).rev() {
            fs.alloc.release_register(r);
        }

        Ok(ExpDesc::new(ExpDescKind::Call { pc, base: BcReg(base) }))
    }

    /// Emit each argument expression into consecutive registers starting
    /// just past the call frame's header, widening the declared call to
    /// "forward all results" (`B = 0`) when the last argument is a trailing
    /// call/`...` marked `forwards_multret` (spec §4.5 "Local declaration").
    /// Returns `(fixed argument count including any implicit receiver,
    /// widened-to-multret)`.
    pub(super) fn emit_call_args(&mut self, implicit_args: u8, args: &[Expr], span: SourceSpan) -> EmitResult<(u8, bool)> {
        let mut nargs = implicit_args;
        let mut multret = false;
        for (i, arg) in args.iter().enumerate() {
            let is_last = i + 1 == args.len();
            if is_last && trailing_forwards_multret(arg) {
                self.emit_trailing_multret(arg, span)?;
                multret = true;
            } else {
                let mut desc = self.emit_expr(arg)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
                nargs += 1;
            }
        }
        Ok((nargs, multret))
    }

    /// Emit a trailing `Call`/`VarArg` expression known to spread (spec §4.5
    /// "Local declaration"/"`return`"), leaving its results in consecutive
    /// registers starting at the returned base and widening its declared
    /// result count to "all" via the `set_c`/`set_d` sentinel documented on
    /// [`BcIns::set_c`]/[`BcIns::set_d`].
    ///
    /// A `Call` already lands at the correct base (its call frame was
    /// reserved in argument-list order); a bare `VarArg` has not yet been
    /// assigned a destination register at all, so this reserves one before
    /// widening its `D` field.
    pub(super) fn emit_trailing_multret(&mut self, expr: &Expr, span: SourceSpan) -> EmitResult<BcReg> {
        let desc = self.emit_expr(expr)?;
        match desc.kind {
            ExpDescKind::Call { pc, base } => {
                self.stack.current_mut().buf.get_mut(pc).set_c(0);
                Ok(base)
            }
            ExpDescKind::Relocable(pc) => {
                let fs = self.stack.current_mut();
                if fs.buf.get(pc).op != Opcode::Varg {
                    return Err(EmitError::internal(span, "trailing multret on a non-multret Relocable"));
                }
                let r = BcReg(fs.alloc.reserve_raw(1, span)?);
                fs.buf.get_mut(pc).set_a(r.index());
                fs.buf.get_mut(pc).set_d(0);
                Ok(r)
            }
            _ => Err(EmitError::internal(span, "trailing multret on a non-multret ExpDesc")),
        }
    }

    /// `{ ... }` (spec §4.4 table constructor). Array-position fields are
    /// stored by literal 0-based slot (`TSETB`); record fields by field-name
    /// constant (`TSETS`); computed fields go through the same `table[key] :=
    /// value` dispatch as an indexed lvalue write. A trailing array field
    /// that spreads (a multret call or `...`) widens to "all results" and is
    /// stored with one `TSETM` run rather than one `TSETB` per element.
    fn emit_table(&mut self, fields: &[TableField], span: SourceSpan) -> EmitResult<ExpDesc> {
        let array_hint = fields.iter().filter(|f| matches!(f.kind, TableFieldKind::Array { .. })).count().min(255) as u8;
        let hash_hint = fields.len() as u8 - array_hint.min(fields.len() as u8);

        let line = self.current_line();
        let fs = self.stack.current_mut();
        let dst = fs.alloc.reserve_raw(1, span)?;
        fs.buf.emit(BcIns::abc(Opcode::Tnew, dst, hash_hint, array_hint), line);
        let table_reg = BcReg(dst);

        let mut array_index: u32 = 0;
        for (i, field) in fields.iter().enumerate() {
            let is_last = i + 1 == fields.len();
            match &field.kind {
                TableFieldKind::Array { value } => {
                    if is_last && trailing_forwards_multret(value) {
                        let base_reg = self.emit_trailing_multret(value, field.span)?;
                        let start = u8::try_from(array_index)
                            .map_err(|_| EmitError::internal(field.span, "table literal array index too wide for TSETM"))?;
                        let line = self.current_line();
                        let fs = self.stack.current_mut();
                        fs.buf.emit(BcIns::abc(Opcode::Tsetm, base_reg.index(), table_reg.index(), start), line);
                    } else {
                        let mut desc = self.emit_expr(value)?;
                        let line = self.current_line();
                        let fs = self.stack.current_mut();
                        let val_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
                        let idx = u8::try_from(array_index).map_err(|_| EmitError::internal(field.span, "table literal array index too wide"))?;
                        fs.buf.emit(BcIns::abc(Opcode::Tsetb, val_reg.index(), table_reg.index(), idx), line);
                        fs.alloc.release_register(val_reg.index());
                        array_index += 1;
                    }
                }
                TableFieldKind::Record { name, value } => {
                    let mut desc = self.emit_expr(value)?;
                    let line = self.current_line();
                    let fs = self.stack.current_mut();
                    let val_reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
                    let str_idx = fs.consts.intern_string(name, span)?;
                    let str_idx = u8::try_from(str_idx).map_err(|_| EmitError::internal(field.span, "TSETS constant index too wide"))?;
                    fs.buf.emit(BcIns::abc(Opcode::Tsets, val_reg.index(), table_reg.index(), str_idx), line);
                    fs.alloc.release_register(val_reg.index());
                }
                TableFieldKind::Computed { key, value } => {
                    let key = self.classify_index_key(key, field.span)?;
                    let desc = self.emit_expr(value)?;
                    self.store_indexed(table_reg, key, desc, field.span)?;
                }
            }
        }
        Ok(ExpDesc::new(ExpDescKind::NonReloc(table_reg)))
    }
}

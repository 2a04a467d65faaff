//! Statement emission (spec §4.5): lowers every [`Stmt`] variant to
//! bytecode, threading register floors and jump-list edges through
//! `crate::cfg`/`crate::regalloc`/`crate::scope`/`crate::loopctx`.
//!
//! Grounded on the same "one method per AST node" shape as `emitter/expr.rs`,
//! plus the teacher's `CallFrame` push/pop discipline for the loop/scope
//! bookkeeping each control-flow statement needs around its body.

use crate::ast::{AssignOp, Block, Expr, FunctionLiteral, IfClause, LValue, Stmt};
use crate::bytecode::{BcIns, BcReg};
use crate::cfg::{ControlFlowGraph, Edge, EdgeKind};
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::expr::{ExpDesc, ExpDescKind, ExpressionValue, IndexKey};
use crate::external::{GcHeap, LexState};
use crate::funcstate::{DeferEntry, FuncFlags};
use crate::opcodes::Opcode;
use crate::operators::{arith, concat, ifempty};
use crate::proto::PrototypeSink;
use crate::scope::ScopeFlags;

use super::lvalue::LvalueSlot;
use super::Emitter;

/// Resolve `function a.b.c:m(...)`'s dotted prefix plus optional method
/// suffix into the single assignment target it ultimately writes through
/// (spec §4.5 "Function declaration").
fn function_stmt_lvalue(path: &[String], method: &Option<String>, span: SourceSpan) -> EmitResult<LValue> {
    let first = path.first().ok_or_else(|| EmitError::internal(span, "function statement with empty path"))?;

    if path.len() == 1 && method.is_none() {
        return Ok(LValue::Identifier(first.clone()));
    }

    let (last_seg, table_segs): (&str, &[String]) = match method {
        Some(m) => (m.as_str(), path),
        None => (path.last().expect("path.len() > 1").as_str(), &path[..path.len() - 1]),
    };

    let mut segs = table_segs.iter();
    let root = segs.next().ok_or_else(|| EmitError::internal(span, "function statement with a method but no table segment"))?;
    let mut table_expr = Expr::Identifier { name: root.clone(), span };
    for seg in segs {
        table_expr = Expr::Member { table: Box::new(table_expr), name: seg.clone(), span };
    }
    Ok(LValue::Member { table: Box::new(table_expr), name: last_seg.to_owned() })
}

impl<'a, L, G, K> Emitter<'a, L, G, K>
where
    L: LexState,
    G: GcHeap,
    K: PrototypeSink,
{
    pub(crate) fn emit_stmt(&mut self, stmt: &Stmt) -> EmitResult<()> {
        match stmt {
            Stmt::Expression { expr, span } => self.emit_expression_stmt(expr, *span),
            Stmt::Return { values, span } => self.emit_return(values, *span),
            Stmt::LocalDecl { names, values, span } => self.emit_local_decl(names, values, *span),
            Stmt::LocalFunction { name, literal, span } => self.emit_local_function(name, literal, *span),
            Stmt::Function { path, method, literal, span } => self.emit_function_stmt(path, method, literal, *span),
            Stmt::Assignment { targets, op, values, span } => self.emit_assignment(targets, *op, values, *span),
            Stmt::If { clauses, span } => self.emit_if(clauses, *span),
            Stmt::While { cond, body, span } => self.emit_while(cond, body, *span),
            Stmt::Repeat { body, cond, span } => self.emit_repeat(body, cond, *span),
            Stmt::NumericFor { var, start, stop, step, body, span } => self.emit_numeric_for(var, start, stop, step, body, *span),
            Stmt::GenericFor { vars, iterators, body, span } => self.emit_generic_for(vars, iterators, body, *span),
            Stmt::Break { span } => self.emit_break(*span),
            Stmt::Continue { span } => self.emit_continue(*span),
            Stmt::Defer { call, span } => self.emit_defer(call, *span),
            Stmt::Do { body, .. } => self.emit_block(body),
        }
    }

    fn emit_expression_stmt(&mut self, expr: &Expr, span: SourceSpan) -> EmitResult<()> {
        let mut desc = self.emit_expr(expr)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        ExpressionValue::discharge(&mut fs.buf, &mut fs.alloc, &mut desc, line, span)?;
        match desc.kind {
            ExpDescKind::NonReloc(r) => fs.alloc.release_register(r.index()),
            ExpDescKind::Call { base, .. } => fs.alloc.release_register(base.index()),
            _ => {}
        }
        Ok(())
    }

    /// Evaluate `values` into exactly `want` consecutive registers starting
    /// at the current `freereg` (spec §4.5 "Local declaration"/"Assignment"):
    /// an empty list pads every slot with `KNIL`; a trailing call/`...` is
    /// widened (or narrowed) to whatever [`LexState::assign_adjust`] says the
    /// tail should contribute, not unconditionally to "all"; a short list
    /// pads its remainder, a long one discards the extra values it produced.
    fn emit_value_list(&mut self, values: &[Expr], want: u8, span: SourceSpan) -> EmitResult<BcReg> {
        let base = self.stack.current().alloc.freereg();

        if values.is_empty() {
            for _ in 0..want {
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let r = fs.alloc.reserve_raw(1, span)?;
                fs.buf.emit(BcIns::ad(Opcode::Knil, r, 0), line);
            }
            return Ok(BcReg(base));
        }

        let n = values.len();
        let mut produced: u32 = 0;
        for (i, v) in values.iter().enumerate() {
            let is_last = i + 1 == n;
            if is_last && super::expr::trailing_forwards_multret(v) {
                let extra = self.lex.assign_adjust(want as u32, n as u32, true);
                if extra > 0 {
                    let count = u8::try_from(extra).map_err(|_| EmitError::internal(span, "assign_adjust requested too many extra values"))?;
                    self.emit_trailing_fixed_multret(v, count, span)?;
                    produced += extra;
                } else {
                    let mut desc = self.emit_expr(v)?;
                    let line = self.current_line();
                    let fs = self.stack.current_mut();
                    ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
                    produced += 1;
                }
            } else {
                let mut desc = self.emit_expr(v)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
                produced += 1;
            }
        }

        let want32 = want as u32;
        if produced < want32 {
            for _ in produced..want32 {
                let line = self.current_line();
                let fs = self.stack.current_mut();
                let r = fs.alloc.reserve_raw(1, span)?;
                fs.buf.emit(BcIns::ad(Opcode::Knil, r, 0), line);
            }
        } else if produced > want32 {
            let fs = self.stack.current_mut();
            let top = fs.alloc.freereg();
            let keep_from = base + want;
            for r in (keep_from..top).rev() {
                fs.alloc.release_register(r);
            }
        }

        Ok(BcReg(base))
    }

    /// As [`Self::emit_value_list`]'s trailing-argument case, but requesting
    /// `count` results rather than deferring to [`LexState::assign_adjust`]
    /// (used once the caller has already computed the exact count it needs).
    fn emit_trailing_fixed_multret(&mut self, expr: &Expr, count: u8, span: SourceSpan) -> EmitResult<BcReg> {
        let desc = self.emit_expr(expr)?;
        match desc.kind {
            ExpDescKind::Call { pc, base } => {
                let fs = self.stack.current_mut();
                fs.alloc.reserve_raw(count, span)?;
                fs.buf.get_mut(pc).set_c(count + 1);
                Ok(base)
            }
            ExpDescKind::Relocable(pc) => {
                let fs = self.stack.current_mut();
                if fs.buf.get(pc).op != Opcode::Varg {
                    return Err(EmitError::internal(span, "fixed trailing multret on a non-multret Relocable"));
                }
                let r = BcReg(fs.alloc.reserve_raw(count, span)?);
                fs.buf.get_mut(pc).set_a(r.index());
                fs.buf.get_mut(pc).set_d(count as i16);
                Ok(r)
            }
            _ => Err(EmitError::internal(span, "fixed trailing multret on a non-multret ExpDesc")),
        }
    }

    /// As [`Self::emit_value_list`], but the trailing multret expression (if
    /// any) forwards *every* result rather than a fixed count (spec §4.5
    /// "return"'s own widening, distinct from assignment's `assign_adjust`).
    fn emit_value_list_forward(&mut self, values: &[Expr], span: SourceSpan) -> EmitResult<BcReg> {
        let base = self.stack.current().alloc.freereg();
        let n = values.len();
        for (i, v) in values.iter().enumerate() {
            let is_last = i + 1 == n;
            if is_last && super::expr::trailing_forwards_multret(v) {
                self.emit_trailing_multret(v, span)?;
            } else {
                let mut desc = self.emit_expr(v)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
            }
        }
        Ok(BcReg(base))
    }

    /// `return ...` (spec §4.5): zero values become `RET0`; a lone trailing
    /// `...` or call forwards via `RETM`/collapses into a tail call (`CALLT`);
    /// anything else materialises into consecutive registers and emits
    /// `RET1`/`RET`. Pending defers are flushed to register `0` and, if this
    /// function has a nested closure, `UCLO` runs before the final
    /// instruction — except in the tail-call case, where both must happen
    /// *before* the call is even emitted, since `CALLT` never returns control
    /// to any instruction that follows it.
    fn emit_return(&mut self, values: &[Expr], span: SourceSpan) -> EmitResult<()> {
        self.stack.current_mut().add_flags(FuncFlags::HAS_RETURN);

        if values.is_empty() {
            self.flush_defers_to(0, span)?;
            self.maybe_emit_uclo();
            let line = self.current_line();
            self.stack.current_mut().buf.emit(BcIns::ad(Opcode::Ret0, 0, 0), line);
            return Ok(());
        }

        let n = values.len();
        let last = &values[n - 1];

        if n == 1 {
            if matches!(last, Expr::VarArg { .. }) {
                let line = self.current_line();
                let base = {
                    let fs = self.stack.current_mut();
                    let pc = fs.buf.emit(BcIns::ad(Opcode::Varg, 0, 0), line);
                    let base = fs.alloc.reserve_raw(1, span)?;
                    fs.buf.get_mut(pc).set_a(base);
                    base
                };
                self.flush_defers_to(0, span)?;
                self.maybe_emit_uclo();
                let line = self.current_line();
                self.stack.current_mut().buf.emit(BcIns::ad(Opcode::Retm, base, 0), line);
                return Ok(());
            }

            if matches!(last, Expr::Call { .. }) {
                // Defers/UCLO must run *before* the call: CALLT never returns
                // here, so anything emitted after it would be dead code.
                self.flush_defers_to(0, span)?;
                self.maybe_emit_uclo();
                let desc = self.emit_expr(last)?;
                let ExpDescKind::Call { pc, base } = desc.kind else {
                    return Err(EmitError::internal(span, "call expression did not produce ExpDescKind::Call"));
                };
                let fs = self.stack.current_mut();
                let b = fs.buf.get(pc).b().unwrap_or(0);
                *fs.buf.get_mut(pc) = BcIns::abc(Opcode::Callt, base.index(), b, 0);
                return Ok(());
            }

            let mut desc = self.emit_expr(last)?;
            let line = self.current_line();
            let r = {
                let fs = self.stack.current_mut();
                ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?
            };
            self.flush_defers_to(0, span)?;
            self.maybe_emit_uclo();
            let line = self.current_line();
            self.stack.current_mut().buf.emit(BcIns::ad(Opcode::Ret1, r.index(), 0), line);
            return Ok(());
        }

        if super::expr::trailing_forwards_multret(last) {
            let base = self.emit_value_list_forward(values, span)?;
            self.flush_defers_to(0, span)?;
            self.maybe_emit_uclo();
            let line = self.current_line();
            self.stack.current_mut().buf.emit(BcIns::ad(Opcode::Retm, base.index(), 0), line);
        } else {
            let base = self.stack.current().alloc.freereg();
            for v in values {
                let mut desc = self.emit_expr(v)?;
                let line = self.current_line();
                let fs = self.stack.current_mut();
                ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
            }
            self.flush_defers_to(0, span)?;
            self.maybe_emit_uclo();
            let line = self.current_line();
            let count = values.len() as u8;
            self.stack.current_mut().buf.emit(BcIns::abc(Opcode::Ret, base, count + 1, 0), line);
        }
        Ok(())
    }

    fn maybe_emit_uclo(&mut self) {
        if self.stack.current().flags().contains(FuncFlags::CHILD) {
            let line = self.current_line();
            self.stack.current_mut().buf.emit(BcIns::ad(Opcode::Uclo, 0, 0), line);
        }
    }

    fn emit_local_decl(&mut self, names: &[String], values: &[Expr], span: SourceSpan) -> EmitResult<()> {
        let want = names.len() as u8;
        let base = self.emit_value_list(values, want, span)?;
        let fs = self.stack.current_mut();
        let pc = fs.buf.pc();
        for (i, name) in names.iter().enumerate() {
            let reg = base.index() + i as u8;
            fs.scopes.bind_local(name, reg);
            fs.record_local(name, reg, pc);
        }
        fs.alloc.bind_locals(want, span)?;
        Ok(())
    }

    /// `local function f(...) ... end` (spec §4.5): the local is bound
    /// *before* the literal's body is compiled, so a recursive call inside
    /// the function resolves `f` as an upvalue/local of its own enclosing
    /// scope rather than a global.
    fn emit_local_function(&mut self, name: &str, literal: &FunctionLiteral, span: SourceSpan) -> EmitResult<()> {
        let reg = {
            let fs = self.stack.current_mut();
            let r = fs.alloc.reserve_raw(1, span)?;
            fs.alloc.bind_locals(1, span)?;
            let pc = fs.buf.pc();
            fs.scopes.bind_local(name, r);
            fs.record_local(name, r, pc);
            r
        };

        let mut desc = self.emit_function_literal(literal)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        ExpressionValue::to_reg(&mut fs.buf, &mut fs.alloc, &mut desc, BcReg(reg), &mut fs.consts, line, span)?;
        Ok(())
    }

    fn emit_function_stmt(&mut self, path: &[String], method: &Option<String>, literal: &FunctionLiteral, span: SourceSpan) -> EmitResult<()> {
        let lvalue = function_stmt_lvalue(path, method, span)?;
        let slot = self.resolve_lvalue(&lvalue, span)?;
        let desc = self.emit_function_literal(literal)?;
        self.write_slot(&slot, desc, span)
    }

    fn emit_assignment(&mut self, targets: &[LValue], op: AssignOp, values: &[Expr], span: SourceSpan) -> EmitResult<()> {
        if !matches!(op, AssignOp::Plain) {
            if targets.len() != 1 || values.len() != 1 {
                return Err(EmitError::InvalidConstruct {
                    span,
                    message: "compound assignment requires exactly one target and one value".to_owned(),
                });
            }
            return self.emit_compound_assignment(&targets[0], op, &values[0], span);
        }

        let mut slots: Vec<LvalueSlot> = Vec::with_capacity(targets.len());
        for t in targets {
            slots.push(self.resolve_lvalue(t, span)?);
        }

        // Spec §4.5: store in reverse order, popping from the stack — each
        // target's table/key temporaries (from `resolve_lvalue`) sit below
        // the next target's, so releasing them only unwinds cleanly if the
        // last-resolved target is also the first one written back.
        let want = targets.len() as u8;
        let base = self.emit_value_list(values, want, span)?;
        for (i, slot) in slots.iter().enumerate().rev() {
            let reg = BcReg(base.index() + i as u8);
            self.write_slot(slot, ExpDesc::new(ExpDescKind::NonReloc(reg)), span)?;
        }

        let fs = self.stack.current_mut();
        let top = fs.alloc.freereg();
        for r in (base.index()..top.min(base.index() + want)).rev() {
            fs.alloc.release_register(r);
        }

        // `write_slot`'s own release of an `Indexed` target's table/key
        // temporaries only takes effect when they're already the top of the
        // stack; while the value-list registers above are still live it's a
        // harmless no-op. Walk the targets back to front (the resolution
        // order, which is also the register layout, bottom to top) so each
        // release now actually lands on the current top.
        for slot in slots.iter().rev() {
            if let LvalueSlot::Indexed { table, key } = slot {
                let fs = self.stack.current_mut();
                if let IndexKey::Reg(kr) = key {
                    fs.alloc.release_register(kr.index());
                }
                fs.alloc.release_register(table.index());
            }
        }
        Ok(())
    }

    /// `x += e` and friends (spec §4.5): the three-phase prepare/evaluate-RHS/
    /// complete contract of `??=` (and, by the same shape, `..=`) must not
    /// evaluate `e` before its short-circuit prepare phase has decided
    /// whether `e` is even needed, mirroring `emit_binary`'s own
    /// `IfEmpty`/`Concat` handling.
    fn emit_compound_assignment(&mut self, target: &LValue, op: AssignOp, rhs: &Expr, span: SourceSpan) -> EmitResult<()> {
        let slot = self.resolve_lvalue(target, span)?;
        let old = self.read_slot_for_update(&slot, span)?;

        let new_val = match op {
            AssignOp::AddAssign | AssignOp::SubAssign | AssignOp::MulAssign | AssignOp::DivAssign | AssignOp::ModAssign => {
                let arith_op = match op {
                    AssignOp::AddAssign => arith::ArithOp::Add,
                    AssignOp::SubAssign => arith::ArithOp::Sub,
                    AssignOp::MulAssign => arith::ArithOp::Mul,
                    AssignOp::DivAssign => arith::ArithOp::Div,
                    AssignOp::ModAssign => arith::ArithOp::Mod,
                    _ => unreachable!(),
                };
                let old = self.with_opctx(|ctx| arith::prepare(ctx, old, span))?;
                let rhs_desc = self.emit_expr(rhs)?;
                self.with_opctx(|ctx| arith::binary(ctx, arith_op, old, rhs_desc, span))?
            }
            AssignOp::ConcatAssign => {
                let old = self.with_opctx(|ctx| concat::prepare(ctx, old, span))?;
                let rhs_desc = self.emit_expr(rhs)?;
                self.with_opctx(|ctx| concat::complete(ctx, old, rhs_desc, span))?
            }
            AssignOp::IfEmptyAssign => match self.with_opctx(|ctx| ifempty::prepare(ctx, old, span))? {
                ifempty::IfEmptyPrep::Constant(e) => e,
                ifempty::IfEmptyPrep::ElideLhs => {
                    let rhs_desc = self.emit_expr(rhs)?;
                    self.with_opctx(|ctx| ifempty::elide_lhs(ctx, rhs_desc, span))?
                }
                ifempty::IfEmptyPrep::Continue { reg, falsey_edge } => {
                    let rhs_desc = self.emit_expr(rhs)?;
                    self.with_opctx(|ctx| ifempty::complete(ctx, reg, falsey_edge, rhs_desc, span))?
                }
            },
            AssignOp::Plain => return Err(EmitError::internal(span, "Plain AssignOp routed to the compound-assignment path")),
        };

        self.write_slot(&slot, new_val, span)
    }

    fn emit_if(&mut self, clauses: &[IfClause], span: SourceSpan) -> EmitResult<()> {
        let mut end_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
        let mut pending_false: Option<Edge> = None;

        for (i, clause) in clauses.iter().enumerate() {
            if let Some(mut pf) = pending_false.take() {
                let fs = self.stack.current_mut();
                ControlFlowGraph::patch_here(&mut fs.buf, &mut pf, span)?;
            }

            match &clause.cond {
                Some(cond) => {
                    let mut desc = self.emit_expr(cond)?;
                    let line = self.current_line();
                    let false_edge = {
                        let fs = self.stack.current_mut();
                        let reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
                        let edge = ExpressionValue::jump_if_false(&mut fs.buf, &desc, line, span)?;
                        fs.alloc.release_register(reg.index());
                        edge
                    };

                    self.emit_block(&clause.body)?;

                    if i + 1 != clauses.len() {
                        let line = self.current_line();
                        let fs = self.stack.current_mut();
                        ControlFlowGraph::emit_jump(&mut fs.buf, &mut end_edge, line, span)?;
                    }

                    pending_false = Some(false_edge);
                }
                None => {
                    self.emit_block(&clause.body)?;
                }
            }
        }

        if let Some(mut pf) = pending_false {
            let fs = self.stack.current_mut();
            ControlFlowGraph::patch_here(&mut fs.buf, &mut pf, span)?;
        }

        let fs = self.stack.current_mut();
        ControlFlowGraph::patch_here(&mut fs.buf, &mut end_edge, span)?;
        Ok(())
    }

    fn emit_while(&mut self, cond: &Expr, body: &Block, span: SourceSpan) -> EmitResult<()> {
        let floor = self.stack.current().alloc.nactvar();
        let top_pc = self.stack.current().buf.pc();
        self.stack.current_mut().loops.enter_loop(floor);

        let mut desc = self.emit_expr(cond)?;
        let line = self.current_line();
        let mut false_edge = {
            let fs = self.stack.current_mut();
            let reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
            let edge = ExpressionValue::jump_if_false(&mut fs.buf, &desc, line, span)?;
            fs.alloc.release_register(reg.index());
            edge
        };

        self.emit_block(body)?;

        let mut back_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
        let line = self.current_line();
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::emit_jump(&mut fs.buf, &mut back_edge, line, span)?;
            ControlFlowGraph::patch_to(&mut fs.buf, &mut back_edge, top_pc, span)?;
        }

        let exit_pc = self.stack.current().buf.pc();
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::patch_to(&mut fs.buf, &mut false_edge, exit_pc, span)?;
        }

        let (mut break_edge, mut continue_edge) = self.stack.current_mut().loops.exit_loop(span)?;
        let fs = self.stack.current_mut();
        ControlFlowGraph::patch_to(&mut fs.buf, &mut break_edge, exit_pc, span)?;
        ControlFlowGraph::patch_to(&mut fs.buf, &mut continue_edge, top_pc, span)?;
        Ok(())
    }

    /// `repeat ... until cond` (spec §4.5): unlike every other loop, the
    /// condition is compiled *inside* the body's own scope (it can see the
    /// body's locals), so this does not delegate to [`Self::emit_block`].
    fn emit_repeat(&mut self, body: &Block, cond: &Expr, span: SourceSpan) -> EmitResult<()> {
        let floor = self.stack.current().alloc.nactvar();
        let top_pc = self.stack.current().buf.pc();
        self.stack.current_mut().loops.enter_loop(floor);

        let nactvar = self.stack.current().alloc.nactvar();
        self.stack.current_mut().scopes.enter_scope(nactvar, ScopeFlags::LOOP);
        for stmt in &body.statements {
            self.emit_stmt(stmt)?;
        }

        let until_check_pc = self.stack.current().buf.pc();
        let mut desc = self.emit_expr(cond)?;
        let line = self.current_line();
        let mut false_edge = {
            let fs = self.stack.current_mut();
            let reg = ExpressionValue::to_any_reg(&mut fs.buf, &mut fs.alloc, &mut desc, &mut fs.consts, line, span)?;
            let edge = ExpressionValue::jump_if_false(&mut fs.buf, &desc, line, span)?;
            fs.alloc.release_register(reg.index());
            edge
        };
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::patch_to(&mut fs.buf, &mut false_edge, top_pc, span)?;
        }

        self.exit_innermost_scope(span)?;
        let exit_pc = self.stack.current().buf.pc();

        let (mut break_edge, mut continue_edge) = self.stack.current_mut().loops.exit_loop(span)?;
        let fs = self.stack.current_mut();
        ControlFlowGraph::patch_to(&mut fs.buf, &mut break_edge, exit_pc, span)?;
        ControlFlowGraph::patch_to(&mut fs.buf, &mut continue_edge, until_check_pc, span)?;
        Ok(())
    }

    /// Numeric `for` (spec §4.5): four consecutive registers (index, limit,
    /// step, the user-visible loop variable). `FORI` is a one-shot jump
    /// funnelled straight to `FORL` (classic Lua `FORPREP`/`FORLOOP` shape —
    /// only `FORL` ever actually tests the range, including on the first
    /// pass); `break` targets the point past the closed-out scope, `continue`
    /// re-enters at `FORL` directly.
    fn emit_numeric_for(&mut self, var: &str, start: &Expr, stop: &Expr, step: &Option<Expr>, body: &Block, span: SourceSpan) -> EmitResult<()> {
        let nactvar = self.stack.current().alloc.nactvar();
        self.stack.current_mut().scopes.enter_scope(nactvar, ScopeFlags::LOOP);

        let mut start_d = self.emit_expr(start)?;
        let line = self.current_line();
        let base = {
            let fs = self.stack.current_mut();
            ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut start_d, &mut fs.consts, line, span)?.index()
        };

        let mut stop_d = self.emit_expr(stop)?;
        let line = self.current_line();
        {
            let fs = self.stack.current_mut();
            ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut stop_d, &mut fs.consts, line, span)?;
        }

        let mut step_d = match step {
            Some(e) => self.emit_expr(e)?,
            None => ExpDesc::new(ExpDescKind::Num(1.0)),
        };
        let line = self.current_line();
        {
            let fs = self.stack.current_mut();
            ExpressionValue::to_next_reg(&mut fs.buf, &mut fs.alloc, &mut step_d, &mut fs.consts, line, span)?;
        }

        let loopvar_reg = {
            let fs = self.stack.current_mut();
            fs.alloc.reserve_raw(1, span)?
        };
        {
            let fs = self.stack.current_mut();
            fs.alloc.bind_locals(4, span)?;
            let pc = fs.buf.pc();
            fs.scopes.bind_local(var, loopvar_reg);
            fs.record_local(var, loopvar_reg, pc);
        }

        self.stack.current_mut().loops.enter_loop(base);

        let line = self.current_line();
        let fori_pc = {
            let fs = self.stack.current_mut();
            fs.buf.emit(BcIns::ad(Opcode::Fori, base, 0), line)
        };
        let mut fori_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::append_pc(&mut fs.buf, &mut fori_edge, fori_pc, span)?;
        }

        let body_start = self.stack.current().buf.pc();
        self.emit_block(body)?;

        let line = self.current_line();
        let forl_pc = {
            let fs = self.stack.current_mut();
            fs.buf.emit(BcIns::ad(Opcode::Forl, base, 0), line)
        };
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::patch_head(&mut fs.buf, &fori_edge, forl_pc, span)?;
        }
        {
            let fs = self.stack.current_mut();
            let mut back_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
            ControlFlowGraph::append_pc(&mut fs.buf, &mut back_edge, forl_pc, span)?;
            ControlFlowGraph::patch_to(&mut fs.buf, &mut back_edge, body_start, span)?;
        }

        self.exit_innermost_scope(span)?;
        let exit_pc = self.stack.current().buf.pc();

        let (mut break_edge, mut continue_edge) = self.stack.current_mut().loops.exit_loop(span)?;
        let fs = self.stack.current_mut();
        ControlFlowGraph::patch_to(&mut fs.buf, &mut break_edge, exit_pc, span)?;
        ControlFlowGraph::patch_to(&mut fs.buf, &mut continue_edge, forl_pc, span)?;
        Ok(())
    }

    /// True when the generic `for`'s iterator expression is a direct,
    /// unambiguous call to `pairs`/`next` and binds at most two loop
    /// variables (spec §4.5 "if the iterator expression is a direct call to
    /// `pairs` or `next`, emit `ISNEXT`"). Grounded on the original's
    /// `predict_next`, simplified to an AST-shape check: this crate always
    /// has the full iterator expression in hand at the call site, so there's
    /// no need to re-derive the callee's identity from an already-emitted
    /// `MOV`/`UGET`/`GGET` instruction the way the original does.
    fn generic_for_fast_path(iterators: &[Expr], loop_vars: usize) -> bool {
        if loop_vars > 2 {
            return false;
        }
        matches!(
            iterators,
            [Expr::Call { callee, method: None, .. }]
                if matches!(callee.as_ref(), Expr::Identifier { name, .. } if name == "pairs" || name == "next")
        )
    }

    /// Generic `for` (spec §4.5): three registers for the iterator triple
    /// (function/state/control) plus one per loop variable. Entry edge
    /// (`JMP`, or `ISNEXT` when [`Self::generic_for_fast_path`] holds) skips
    /// the body on first entry straight to the iterator call; the call
    /// (`ITERC`, or `ITERN` on the fast path) sits right after the body;
    /// `ITERL` tests the result and loops back to the body start.
    fn emit_generic_for(&mut self, vars: &[String], iterators: &[Expr], body: &Block, span: SourceSpan) -> EmitResult<()> {
        let nactvar = self.stack.current().alloc.nactvar();
        self.stack.current_mut().scopes.enter_scope(nactvar, ScopeFlags::LOOP);

        let fast_path = Self::generic_for_fast_path(iterators, vars.len());

        let base_reg = self.emit_value_list(iterators, 3, span)?;
        let base = base_reg.index();

        let nvars = vars.len() as u8;
        let loopvar_base = {
            let fs = self.stack.current_mut();
            fs.alloc.reserve_raw(nvars, span)?
        };
        {
            let fs = self.stack.current_mut();
            fs.alloc.bind_locals(3 + nvars, span)?;
            let pc = fs.buf.pc();
            for (i, name) in vars.iter().enumerate() {
                let reg = loopvar_base + i as u8;
                fs.scopes.bind_local(name, reg);
                fs.record_local(name, reg, pc);
            }
        }

        self.stack.current_mut().loops.enter_loop(base);

        let line = self.current_line();
        let entry_pc = {
            let fs = self.stack.current_mut();
            let op = if fast_path { Opcode::Isnext } else { Opcode::Jmp };
            fs.buf.emit(BcIns::ad(op, base, crate::bytecode::NO_JMP_SENTINEL), line)
        };
        let mut entry_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::append_pc(&mut fs.buf, &mut entry_edge, entry_pc, span)?;
        }

        let body_start = self.stack.current().buf.pc();
        self.emit_block(body)?;

        let line = self.current_line();
        let iter_pc = {
            let fs = self.stack.current_mut();
            let op = if fast_path { Opcode::Itern } else { Opcode::Iterc };
            fs.buf.emit(BcIns::ad(op, base, 0), line)
        };
        {
            let fs = self.stack.current_mut();
            ControlFlowGraph::patch_head(&mut fs.buf, &entry_edge, iter_pc, span)?;
        }

        let line = self.current_line();
        let iterl_pc = {
            let fs = self.stack.current_mut();
            fs.buf.emit(BcIns::ad(Opcode::Iterl, base, 0), line)
        };
        {
            let fs = self.stack.current_mut();
            let mut back_edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
            ControlFlowGraph::append_pc(&mut fs.buf, &mut back_edge, iterl_pc, span)?;
            ControlFlowGraph::patch_to(&mut fs.buf, &mut back_edge, body_start, span)?;
        }

        self.exit_innermost_scope(span)?;
        let exit_pc = self.stack.current().buf.pc();

        let (mut break_edge, mut continue_edge) = self.stack.current_mut().loops.exit_loop(span)?;
        let fs = self.stack.current_mut();
        ControlFlowGraph::patch_to(&mut fs.buf, &mut break_edge, exit_pc, span)?;
        ControlFlowGraph::patch_to(&mut fs.buf, &mut continue_edge, iterl_pc, span)?;
        Ok(())
    }

    fn emit_break(&mut self, span: SourceSpan) -> EmitResult<()> {
        let floor = self.stack.current().loops.innermost_defer_base(span)?;
        self.flush_defers_to(floor, span)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        let edge = fs.loops.innermost_break_edge_mut(span)?;
        ControlFlowGraph::emit_jump(&mut fs.buf, edge, line, span)?;
        Ok(())
    }

    fn emit_continue(&mut self, span: SourceSpan) -> EmitResult<()> {
        let floor = self.stack.current().loops.innermost_defer_base(span)?;
        self.flush_defers_to(floor, span)?;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        let edge = fs.loops.innermost_continue_edge_mut(span)?;
        ControlFlowGraph::emit_jump(&mut fs.buf, edge, line, span)?;
        Ok(())
    }

    /// `defer call(...)` (spec §4.5): freeze the call's frame (callee plus
    /// arguments, via the same [`Self::setup_call_frame`]/`emit_call_args`
    /// an ordinary call uses) but stop short of emitting the `CALL` itself —
    /// that happens later, in LIFO order, wherever [`Self::flush_defers_to`]
    /// is next invoked for a floor at or below this frame's base.
    fn emit_defer(&mut self, call: &Expr, span: SourceSpan) -> EmitResult<()> {
        let Expr::Call { callee, method, args, .. } = call else {
            return Err(EmitError::InvalidConstruct { span, message: "defer target must be a call expression".to_owned() });
        };

        let (base, implicit) = self.setup_call_frame(callee, method, span)?;
        let (nargs, multret) = self.emit_call_args(implicit, args, span)?;

        self.stack.current_mut().defers.push(DeferEntry { base, nargs, multret });
        Ok(())
    }

    /// Emit the `CALL` for every pending defer whose frame sits at or above
    /// `floor`, innermost (highest base) first.
    fn flush_defers_to(&mut self, floor: u8, span: SourceSpan) -> EmitResult<()> {
        let _ = span;
        let line = self.current_line();
        let fs = self.stack.current_mut();
        while let Some(entry) = fs.defers.last().copied() {
            if entry.base < floor {
                break;
            }
            fs.defers.pop();
            let b = if entry.multret { 0 } else { entry.nargs + 1 };
            fs.buf.emit(BcIns::abc(Opcode::Call, entry.base, b, 1), line);
        }
        Ok(())
    }
}

//! The statement/expression emitter tying every other module together (spec
//! §4.5, §4.7).
//!
//! Grounded on the teacher's `Interpreter<S>` (`fuel-vm/src/interpreter.rs`):
//! a struct generic over the external collaborators it needs (there, `S:
//! InterpreterStorage`; here, `L: LexState`, `G: GcHeap`, `K: PrototypeSink`)
//! that owns every subsystem as a field and exposes one statement-shaped
//! method per AST node.

mod expr;
mod lvalue;
mod stmt;

use crate::ast::{Block, FunctionLiteral};
use crate::bytecode::BcIns;
use crate::config::EmitterConfig;
use crate::const_pool::GcConstant;
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::external::{GcHeap, LexState};
use crate::funcstate::{FuncFlags, FuncStateStack, FunctionState};
use crate::opcodes::Opcode;
use crate::proto::{Prototype, PrototypeSink};
use crate::scope::ScopeFlags;

/// Ties [`FuncStateStack`] together with the three external collaborators a
/// production embedding supplies: the lexer's variable/string bookkeeping,
/// the GC heap, and the sink that receives finished prototypes.
pub struct Emitter<'a, L, G, K> {
    stack: FuncStateStack,
    lex: &'a mut L,
    gc: &'a mut G,
    sink: &'a mut K,
    config: EmitterConfig,
}

impl<'a, L, G, K> Emitter<'a, L, G, K>
where
    L: LexState,
    G: GcHeap,
    K: PrototypeSink,
{
    /// A fresh emitter bounded by `config`'s per-function limits.
    pub fn new(lex: &'a mut L, gc: &'a mut G, sink: &'a mut K, config: EmitterConfig) -> Self {
        Self { stack: FuncStateStack::new(), lex, gc, sink, config }
    }

    /// Compile a top-level chunk: a vararg function of zero declared
    /// parameters whose body is `block` (spec §4.7 "the outermost function").
    pub fn compile_chunk(&mut self, block: &Block) -> EmitResult<Prototype> {
        let literal = FunctionLiteral { params: Vec::new(), is_vararg: true, body: block.clone(), span: SourceSpan::default() };
        self.compile_function(&literal)
    }

    /// Compile a standalone function literal into a [`Prototype`], without
    /// embedding it into any enclosing function (used by embeddings that
    /// compile one function at a time, and by tests).
    pub fn compile_function(&mut self, literal: &FunctionLiteral) -> EmitResult<Prototype> {
        self.push_function(literal)?;
        self.emit_function_body(literal)?;
        let (proto, _flags) = self.pop_function(literal.span)?;
        Ok(proto)
    }

    fn push_function(&mut self, literal: &FunctionLiteral) -> EmitResult<()> {
        let mut fs = FunctionState::new(self.config);
        if literal.is_vararg {
            fs.add_flags(FuncFlags::VARARG);
        }
        fs.set_nparams(literal.params.len() as u8);
        self.stack.push(fs);
        self.lex.fs_init();

        let fs = self.stack.current_mut();
        fs.scopes.enter_scope(0, ScopeFlags::empty());
        let span = literal.span;
        for (i, p) in literal.params.iter().enumerate() {
            let reg = i as u8;
            fs.alloc.reserve_raw(1, span)?;
            fs.scopes.bind_local(&p.name, reg);
            fs.record_local(&p.name, reg, 0);
        }
        fs.alloc.bind_locals(literal.params.len() as u8, span)?;
        Ok(())
    }

    /// A `return` nested inside an `if`/loop does not make the function's
    /// fall-through path unreachable, so — matching the Lua compiler's own
    /// `close_func`, which always appends a closing return — this
    /// unconditionally emits a trailing `RET0` rather than gating it on
    /// [`FuncFlags::HAS_RETURN`] (that flag only tracks "at least one
    /// `return` exists somewhere in this function", for `CHILD_HAS_RETURN`
    /// propagation, not "every path returns").
    fn emit_function_body(&mut self, literal: &FunctionLiteral) -> EmitResult<()> {
        self.emit_block(&literal.body)?;
        let line = self.lex.lastline();
        self.stack.current_mut().buf.emit(BcIns::ad(Opcode::Ret0, 0, 0), line);
        Ok(())
    }

    /// Pop the innermost function state, finish its locals and hand back a
    /// [`Prototype`] plus the flags it finished with (so a caller embedding a
    /// nested literal can propagate `CHILD_HAS_RETURN`/`HAS_FFI` outward).
    fn pop_function(&mut self, span: SourceSpan) -> EmitResult<(Prototype, FuncFlags)> {
        self.lex.fs_finish();
        let end_pc = self.stack.current().buf.pc();
        let fs = self.stack.pop(span)?;
        fs.assert_no_open_loops(span)?;
        let flags = fs.flags();
        Ok((Prototype::from_function_state(fs, end_pc), flags))
    }

    /// Emit a nested function literal as an expression: compile it as its
    /// own prototype, hand it to the sink, then emit `FNEW` in the enclosing
    /// function referencing it (spec §4.7).
    fn emit_function_literal(&mut self, literal: &FunctionLiteral) -> EmitResult<crate::expr::ExpDesc> {
        use crate::expr::{ExpDesc, ExpDescKind};

        self.push_function(literal)?;
        self.emit_function_body(literal)?;
        let (proto, child_flags) = self.pop_function(literal.span)?;
        let gc_idx = self.sink.finish(proto);

        let span = literal.span;
        let parent = self.stack.current_mut();
        parent.add_flags(FuncFlags::CHILD);
        if child_flags.contains(FuncFlags::HAS_RETURN) || child_flags.contains(FuncFlags::CHILD_HAS_RETURN) {
            parent.add_flags(FuncFlags::CHILD_HAS_RETURN);
        }
        if child_flags.contains(FuncFlags::HAS_FFI) {
            parent.add_flags(FuncFlags::HAS_FFI);
        }

        let kidx = parent.consts.intern_gc(GcConstant::Prototype(gc_idx), span)?;
        let d = i16::try_from(kidx).map_err(|_| EmitError::XKConst { span })?;
        let line = self.lex.lastline();
        let pc = parent.buf.emit(BcIns::ad(Opcode::Fnew, 0, d), line);
        Ok(ExpDesc::new(ExpDescKind::Relocable(pc)))
    }

    /// Emit a lexical block: a fresh scope over `block`'s statements, exited
    /// (with `UCLO` if anything inside it was captured) before returning.
    pub(crate) fn emit_block(&mut self, block: &Block) -> EmitResult<()> {
        let nactvar = self.stack.current().alloc.nactvar();
        self.stack.current_mut().scopes.enter_scope(nactvar, ScopeFlags::empty());
        for stmt in &block.statements {
            self.emit_stmt(stmt)?;
        }
        self.exit_innermost_scope(SourceSpan::default())
    }

    fn exit_innermost_scope(&mut self, span: SourceSpan) -> EmitResult<()> {
        let line = self.lex.lastline();
        let fs = self.stack.current_mut();
        let floor = fs.scopes.exit_scope(&mut fs.buf, &mut fs.alloc, line, span)?;
        let end_pc = fs.buf.pc();
        fs.close_locals_from(floor, end_pc);
        Ok(())
    }

    /// The GC heap hook this emitter was built with; callers ask for a
    /// collection check at loop back-edges (spec §1, `lj_gc_check`).
    pub(crate) fn gc_check(&mut self) {
        self.gc.gc_check();
    }

    pub(crate) fn current_line(&self) -> u32 {
        self.lex.lastline()
    }

    /// Borrow the innermost function's buffer/allocator/constant pool as an
    /// [`crate::operators::OpCtx`] and run `f` against it. Every operator
    /// lowering in `emitter/expr.rs` goes through this rather than threading
    /// the three fields through by hand at each call site.
    pub(crate) fn with_opctx<T>(&mut self, f: impl FnOnce(&mut crate::operators::OpCtx) -> EmitResult<T>) -> EmitResult<T> {
        let line = self.current_line();
        let fs = self.stack.current_mut();
        let mut ctx = crate::operators::OpCtx { buf: &mut fs.buf, alloc: &mut fs.alloc, consts: &mut fs.consts, line };
        f(&mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Expr, LiteralValue, Stmt};
    use crate::external::{TestGcHeap, TestLexer};
    use crate::opcodes::Opcode;
    use crate::proto::CollectingSink;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    #[test]
    fn empty_chunk_emits_ret0() {
        let mut lex = TestLexer::new();
        let mut gc = TestGcHeap::new();
        let mut sink = CollectingSink::new();
        let mut emitter = Emitter::new(&mut lex, &mut gc, &mut sink, EmitterConfig::default());
        let proto = emitter.compile_chunk(&Block::new(vec![])).unwrap();
        assert_eq!(proto.instructions.last().unwrap().ins.op, Opcode::Ret0);
        assert!(proto.is_vararg);
    }

    #[test]
    fn return_statement_emits_ret1() {
        let mut lex = TestLexer::new();
        let mut gc = TestGcHeap::new();
        let mut sink = CollectingSink::new();
        let mut emitter = Emitter::new(&mut lex, &mut gc, &mut sink, EmitterConfig::default());
        let block = Block::new(vec![Stmt::Return {
            values: vec![Expr::Literal { value: LiteralValue::Num(1.0), span: span() }],
            span: span(),
        }]);
        let proto = emitter.compile_chunk(&block).unwrap();
        assert!(proto.instructions.iter().any(|li| li.ins.op == Opcode::Ret1));
    }
}

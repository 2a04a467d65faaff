//! Lexical scope stack, the emitter-side local binding table, and upvalue
//! resolution (spec §3.5, §4.6).
//!
//! `FuncScope` mirrors the teacher's `CallFrame` push/pop discipline
//! (`fuel-vm/src/call.rs`, `fuel-vm/src/interpreter.rs`'s `frames: Vec<CallFrame>`)
//! applied to lexical scoping instead of call frames: a stack of entries each
//! recording the state to restore on exit.

use tracing::trace;

use crate::bytecode::{BcIns, BcPos, BytecodeBuffer};
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::opcodes::Opcode;
use crate::regalloc::RegisterAllocator;

/// The reserved name that makes a local binding slot write-only (spec §4.6).
pub const BLANK_IDENT: &str = "_";

/// Per-scope-frame flags (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeFlags(u8);

impl ScopeFlags {
    /// This scope is a loop body.
    pub const LOOP: ScopeFlags = ScopeFlags(1 << 0);
    /// A local declared directly in this scope was captured as an upvalue by
    /// a nested function literal; its exit must emit `UCLO`.
    pub const UPVALUE: ScopeFlags = ScopeFlags(1 << 1);

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn set(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A single scope frame (spec §4.6 "Scope frames").
#[derive(Debug, Clone, Copy)]
struct FuncScope {
    /// `nactvar` at scope entry; exit pops back down to this floor.
    nactvar_at_entry: u8,
    flags: ScopeFlags,
}

/// One binding in the [`LocalBindingTable`]: a symbol mapped to a register slot.
#[derive(Debug, Clone)]
struct Binding {
    name: String,
    reg: u8,
    /// Number of scopes open (including this binding's own) at bind time,
    /// i.e. [`LocalBindingTable::push_scope`] calls minus matching pops so
    /// far. Lets [`LocalBindingTable::lookup_with_depth`] report which
    /// ancestor scope (counting from the innermost, currently open one) owns
    /// a binding, so upvalue capture marks the scope that actually needs to
    /// emit `UCLO`, not just whichever scope happens to be innermost at the
    /// point of reference (spec §4.6).
    depth: usize,
}

/// Emitter-side, scope-aware symbol → register map, independent of the
/// lexer's own variable stack (spec §3.5). Lookup searches newest-to-oldest
/// so shadowing resolves to the innermost binding.
#[derive(Debug, Clone, Default)]
pub struct LocalBindingTable {
    bindings: Vec<Binding>,
    /// One entry per open scope: the `bindings.len()` at scope entry.
    scope_marks: Vec<usize>,
}

impl LocalBindingTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new binding scope.
    pub fn push_scope(&mut self) {
        self.scope_marks.push(self.bindings.len());
    }

    /// Pop the innermost binding scope, discarding bindings declared within it.
    pub fn pop_scope(&mut self) -> EmitResult<()> {
        let mark = self
            .scope_marks
            .pop()
            .ok_or_else(|| EmitError::internal(SourceSpan::default(), "pop_scope with no open scope"))?;
        self.bindings.truncate(mark);
        Ok(())
    }

    /// Bind `name` to `reg` in the current (innermost) scope. The blank
    /// identifier is intentionally never recorded: it occupies a register
    /// for storage but [`Self::lookup`] must never resolve it (spec §4.6).
    pub fn bind(&mut self, name: &str, reg: u8) {
        if name == BLANK_IDENT {
            return;
        }
        self.bindings.push(Binding { name: name.to_owned(), reg, depth: self.scope_marks.len() });
    }

    /// Resolve `name` to its register, searching newest-to-oldest. Always
    /// misses for the blank identifier.
    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.lookup_with_depth(name).map(|(reg, _)| reg)
    }

    /// As [`Self::lookup`], but also reports how many scopes out from the
    /// innermost currently-open one the binding lives (`0` = innermost).
    pub fn lookup_with_depth(&self, name: &str) -> Option<(u8, usize)> {
        if name == BLANK_IDENT {
            return None;
        }
        let open = self.scope_marks.len();
        self.bindings.iter().rev().find(|b| b.name == name).map(|b| (b.reg, open.saturating_sub(b.depth)))
    }
}

/// One resolved upvalue: either a slot in the immediately enclosing
/// function's locals, or an upvalue index in that enclosing function (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvalOrigin {
    /// References a local register in the parent function.
    ParentLocal(u8),
    /// References an already-resolved upvalue slot in the parent function.
    ParentUpval(u16),
}

/// One entry of a function's upvalue map (spec §3.2 `uvmap`).
#[derive(Debug, Clone)]
pub struct UpvalEntry {
    /// Symbol name, kept for debug info.
    pub name: String,
    /// Where it originates.
    pub origin: UpvalOrigin,
}

/// Function scope stack plus upvalue bookkeeping for one [`crate::funcstate::FunctionState`].
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<FuncScope>,
    locals: LocalBindingTable,
    upvalues: Vec<UpvalEntry>,
}

impl ScopeStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open scope frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a new scope frame, recording `nactvar` at entry.
    pub fn enter_scope(&mut self, nactvar: u8, flags: ScopeFlags) {
        self.frames.push(FuncScope { nactvar_at_entry: nactvar, flags });
        self.locals.push_scope();
        trace!(nactvar, depth = self.frames.len(), "enter_scope");
    }

    /// Pop the innermost scope frame, releasing registers and locals back
    /// down to the frame's entry floor via `alloc`, and emitting `UCLO` if
    /// the scope captured an upvalue. Returns the `nactvar` to restore.
    pub fn exit_scope(
        &mut self,
        buf: &mut BytecodeBuffer,
        alloc: &mut RegisterAllocator,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<u8> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| EmitError::internal(span, "exit_scope with no open scope"))?;
        self.locals.pop_scope()?;
        if frame.flags.contains(ScopeFlags::UPVALUE) {
            buf.emit(BcIns::ad(Opcode::Uclo, frame.nactvar_at_entry, 0), line);
        }
        let popped = alloc.nactvar() - frame.nactvar_at_entry;
        alloc.unbind_locals(popped);
        Ok(frame.nactvar_at_entry)
    }

    /// Mark the innermost scope (or a specific ancestor, if `depth_from_top`
    /// is nonzero) as having captured an upvalue, so its exit emits `UCLO`.
    pub fn mark_upvalue_capture(&mut self, depth_from_top: usize) -> EmitResult<()> {
        let len = self.frames.len();
        let idx = len
            .checked_sub(1 + depth_from_top)
            .ok_or_else(|| EmitError::internal(SourceSpan::default(), "mark_upvalue_capture depth out of range"))?;
        self.frames[idx].flags = self.frames[idx].flags.set(ScopeFlags::UPVALUE);
        Ok(())
    }

    /// Bind `name` to register `reg` in the current scope's local table.
    pub fn bind_local(&mut self, name: &str, reg: u8) {
        self.locals.bind(name, reg);
    }

    /// Resolve `name` as a local in *this* function (not recursing into
    /// enclosing functions — that is [`crate::funcstate::FuncStateStack::resolve`]'s job).
    pub fn lookup_local(&self, name: &str) -> Option<u8> {
        self.locals.lookup(name)
    }

    /// As [`Self::lookup_local`], but also reports which ancestor scope
    /// (`0` = innermost currently open) owns the binding, so the caller can
    /// mark exactly that scope for upvalue capture.
    pub fn lookup_local_with_depth(&self, name: &str) -> Option<(u8, usize)> {
        self.locals.lookup_with_depth(name)
    }

    /// Record a new upvalue referencing `origin`, deduping against an
    /// existing entry for the same origin (spec §4.6: "duplicate upvalue
    /// entries for the same source are coalesced"). Returns the upvalue slot.
    pub fn record_upvalue(&mut self, name: &str, origin: UpvalOrigin, max_upvalues: u16, span: SourceSpan) -> EmitResult<u16> {
        if let Some(idx) = self.upvalues.iter().position(|u| u.origin == origin) {
            return Ok(idx as u16);
        }
        if self.upvalues.len() as u16 >= max_upvalues {
            return Err(EmitError::XLimC { span });
        }
        self.upvalues.push(UpvalEntry { name: name.to_owned(), origin });
        Ok((self.upvalues.len() - 1) as u16)
    }

    /// The finished upvalue map, in slot order (spec §6.3).
    pub fn upvalues(&self) -> &[UpvalEntry] {
        &self.upvalues
    }
}

//! Per-function emission state and the enclosing-function stack used to
//! resolve identifiers across nested function literal boundaries (spec §3.2,
//! §4.6, §4.7).
//!
//! Grounded on `fuel-vm`'s `interpreter.rs` `frames: Vec<CallFrame>` (a flat
//! stack of per-call state, innermost last) applied here to *compile-time*
//! function nesting instead of runtime call frames: each [`FunctionState`]
//! owns its own [`BytecodeBuffer`] (see that module's doc comment for why
//! this departs from the original's single shared `bcbase` arena), and
//! [`FuncStateStack`] is the thing that actually walks outward to resolve a
//! name as local/upvalue/global (spec §4.6 "upvalue lookup recursion").

use crate::bytecode::{BcReg, BytecodeBuffer};
use crate::config::EmitterConfig;
use crate::const_pool::ConstPool;
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::expr::ExpDescKind;
use crate::loopctx::LoopStack;
use crate::regalloc::RegisterAllocator;
use crate::scope::{ScopeStack, UpvalOrigin};

/// Per-function flags (spec §3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuncFlags(u8);

impl FuncFlags {
    /// This function contains a `return` statement.
    pub const HAS_RETURN: FuncFlags = FuncFlags(1 << 0);
    /// Some nested function literal within this function has `HAS_RETURN` or
    /// its own `CHILD_HAS_RETURN` set; propagated outward at finalisation
    /// (spec §4.7 step 7).
    pub const CHILD_HAS_RETURN: FuncFlags = FuncFlags(1 << 1);
    /// This function accepts a variable number of trailing arguments.
    pub const VARARG: FuncFlags = FuncFlags(1 << 2);
    /// The final `return` this function emits needs `RETM`/argument-count
    /// fixup applied by the prototype finaliser (spec §6.3).
    pub const FIXUP_RETURN: FuncFlags = FuncFlags(1 << 3);
    /// This function (or a descendant, propagated like `CHILD_HAS_RETURN`)
    /// calls into the bitwise-dispatch runtime library.
    pub const HAS_FFI: FuncFlags = FuncFlags(1 << 4);
    /// This function has at least one nested function literal.
    pub const CHILD: FuncFlags = FuncFlags(1 << 5);

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

/// A `defer fn(args…)` whose call frame has been materialised into
/// consecutive registers but whose `CALL` has not yet been emitted (spec
/// §4.5 "defer"). Flushed in LIFO order by whichever construct reaches the
/// defer's owning floor first: the enclosing block's exit, an intervening
/// `break`/`continue`, or `return`.
///
/// The spec describes this bookkeeping as `Defer`/`DeferArg` flags stamped
/// onto the lexer's own variable-info stack (`VarInfo::is_defer`). This
/// crate's `LexState` trait has no call to mutate or read back a `VarInfo`
/// already pushed, so the emitter keeps its own parallel stack instead —
/// same LIFO-by-register-floor shape, just owned here rather than routed
/// through the lexer (see `DESIGN.md`).
#[derive(Debug, Clone, Copy)]
pub struct DeferEntry {
    /// First register of the frozen call frame (callee, then its arguments).
    pub base: u8,
    /// Argument count, meaningful only when `multret` is `false`.
    pub nargs: u8,
    /// The frame's trailing argument forwards a multret expression (`...`/
    /// another call), so the `CALL` widens `B` to request "all of them".
    pub multret: bool,
}

/// Per-local debug info (spec §6.3: "name, start PC, end PC").
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDebugInfo {
    pub name: String,
    pub register: u8,
    pub start_pc: u32,
    pub end_pc: u32,
}

/// All per-function compilation state (spec §3.2), minus the lexer-owned
/// variable stack (that lives behind [`crate::external::LexState`]).
#[derive(Debug)]
pub struct FunctionState {
    pub buf: BytecodeBuffer,
    pub alloc: RegisterAllocator,
    pub consts: ConstPool,
    pub scopes: ScopeStack,
    pub loops: LoopStack,
    pub defers: Vec<DeferEntry>,
    config: EmitterConfig,
    flags: FuncFlags,
    nparams: u8,
    open_locals: Vec<LocalDebugInfo>,
    closed_locals: Vec<LocalDebugInfo>,
}

impl FunctionState {
    /// A fresh function state bounded by `config`'s per-function limits.
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            buf: BytecodeBuffer::new(),
            alloc: RegisterAllocator::new(config.max_registers()),
            consts: ConstPool::new(config.max_constants()),
            scopes: ScopeStack::new(),
            loops: LoopStack::new(),
            defers: Vec::new(),
            config,
            flags: FuncFlags::empty(),
            nparams: 0,
            open_locals: Vec::new(),
            closed_locals: Vec::new(),
        }
    }

    /// The limits this function was constructed with.
    pub const fn config(&self) -> EmitterConfig {
        self.config
    }

    /// Current flag set.
    pub const fn flags(&self) -> FuncFlags {
        self.flags
    }

    /// Raise one or more flags.
    pub fn add_flags(&mut self, flags: FuncFlags) {
        self.flags = self.flags.set(flags);
    }

    /// Declared parameter count, set once during the function header (spec §4.7 step 4).
    pub const fn nparams(&self) -> u8 {
        self.nparams
    }

    /// Record the declared parameter count.
    pub fn set_nparams(&mut self, n: u8) {
        self.nparams = n;
    }

    /// Warn (not fail) about any loop/operator jump lists this function's
    /// caller forgot to patch before finalisation. Actual `XFixup` detection
    /// over the function's own still-open loop contexts is the caller's
    /// responsibility (a non-empty [`LoopStack`] at function close is always
    /// an internal bug, since `if`/`while`/etc. always pop what they push).
    pub fn assert_no_open_loops(&self, span: SourceSpan) -> EmitResult<()> {
        if self.loops.in_loop() {
            return Err(EmitError::internal(span, "function closed with an open loop context"));
        }
        if !self.defers.is_empty() {
            return Err(EmitError::internal(span, "function closed with unflushed defer entries"));
        }
        Ok(())
    }

    /// Record a local's birth: called wherever a name is bound to a register
    /// (parameter binding, `local` declarations, `for` loop control variables).
    pub fn record_local(&mut self, name: &str, register: u8, start_pc: u32) {
        self.open_locals.push(LocalDebugInfo { name: name.to_owned(), register, start_pc, end_pc: 0 });
    }

    /// Close every still-open local at or above `floor` register, stamping
    /// `end_pc`. Called when a scope exits (spec §6.3 "end PC" is the point
    /// the local's register is released back to the allocator).
    pub fn close_locals_from(&mut self, floor: u8, end_pc: u32) {
        let mut i = 0;
        while i < self.open_locals.len() {
            if self.open_locals[i].register >= floor {
                let mut info = self.open_locals.remove(i);
                info.end_pc = end_pc;
                self.closed_locals.push(info);
            } else {
                i += 1;
            }
        }
    }

    /// Close every remaining open local (function exit) and hand back the
    /// full per-local debug table in declaration order.
    pub fn finish_locals(&mut self, end_pc: u32) -> Vec<LocalDebugInfo> {
        self.close_locals_from(0, end_pc);
        self.closed_locals.sort_by_key(|l| l.start_pc);
        std::mem::take(&mut self.closed_locals)
    }
}

/// A stack of [`FunctionState`]s for the function currently being compiled
/// plus every lexically enclosing one, innermost last. Owns the identifier
/// resolution walk that turns a bare name into `Local`/`Upval`/`Global`
/// (spec §4.6).
#[derive(Debug, Default)]
pub struct FuncStateStack {
    frames: Vec<FunctionState>,
}

impl FuncStateStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh innermost function state (entry to a function body, spec §4.7 step 2).
    pub fn push(&mut self, fs: FunctionState) {
        self.frames.push(fs);
    }

    /// Pop the innermost function state (its prototype has been finalised; spec §4.7 step 6).
    pub fn pop(&mut self, span: SourceSpan) -> EmitResult<FunctionState> {
        self.frames.pop().ok_or_else(|| EmitError::internal(span, "pop with no open function"))
    }

    /// The innermost (currently compiling) function state.
    pub fn current(&self) -> &FunctionState {
        self.frames.last().expect("FuncStateStack::current with no open function")
    }

    /// Mutable access to the innermost function state.
    pub fn current_mut(&mut self) -> &mut FunctionState {
        self.frames.last_mut().expect("FuncStateStack::current_mut with no open function")
    }

    /// The immediate parent of the innermost function, if any (used by the
    /// nested function literal's `FNEW` emission, spec §4.7 step 6).
    pub fn parent_mut(&mut self) -> Option<&mut FunctionState> {
        let len = self.frames.len();
        if len < 2 {
            return None;
        }
        Some(&mut self.frames[len - 2])
    }

    /// Number of open function states (1 at the outermost chunk, more while
    /// compiling a nested function literal).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolve `name` from the innermost function's perspective: a local of
    /// the innermost function, an upvalue chasing back through enclosing
    /// functions' locals/upvalues, or (if found nowhere) a global.
    ///
    /// Every frame strictly between the declaring function and the
    /// referencing one gets its own upvalue entry recorded (spec §4.6: an
    /// upvalue chain, not a direct reference that skips intermediate
    /// closures), and the declaring scope is marked so its exit emits `UCLO`.
    pub fn resolve(&mut self, name: &str, span: SourceSpan) -> EmitResult<ExpDescKind> {
        let top = self.frames.len().checked_sub(1).ok_or_else(|| EmitError::internal(span, "resolve with no open function"))?;

        let mut owner = None;
        for i in (0..=top).rev() {
            if self.frames[i].scopes.lookup_local(name).is_some() {
                owner = Some(i);
                break;
            }
        }

        let Some(owner) = owner else {
            let idx = self.frames[top].consts.intern_string(name, span)?;
            return Ok(ExpDescKind::Global(idx));
        };

        if owner == top {
            let (reg, _) = self.frames[top]
                .scopes
                .lookup_local_with_depth(name)
                .ok_or_else(|| EmitError::internal(span, "local vanished between lookup and resolve"))?;
            return Ok(ExpDescKind::Local(BcReg(reg)));
        }

        let (reg, depth_from_top) = self.frames[owner]
            .scopes
            .lookup_local_with_depth(name)
            .ok_or_else(|| EmitError::internal(span, "local vanished between lookup and resolve"))?;
        self.frames[owner].scopes.mark_upvalue_capture(depth_from_top)?;

        // Thread an upvalue entry through every frame from just inside the
        // owner up to (and including) the referencing frame.
        let mut origin = UpvalOrigin::ParentLocal(reg);
        let mut slot = 0u16;
        for i in (owner + 1)..=top {
            let max_uv = self.frames[i].config().max_upvalues();
            slot = self.frames[i].scopes.record_upvalue(name, origin, max_uv, span)?;
            origin = UpvalOrigin::ParentUpval(slot);
        }
        Ok(ExpDescKind::Upval(slot))
    }
}

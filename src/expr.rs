//! The expression descriptor (`ExpDesc`) and its lifecycle methods (spec §3.1, §4.3).
//!
//! Grounded in the re-architecture note of spec §9 ("Multi-variant expression
//! union"): the discriminant-specific payload lives inside [`ExpDescKind`] as a
//! tagged sum, while the jump-list heads and flags the original keeps in the
//! same C struct regardless of variant sit outside it on [`ExpDesc`] itself.
//! The `discharge`/`to_val`/`to_reg`/`to_next_reg`/`to_any_reg` pipeline
//! mirrors `lcode.rs`'s `luaK_dischargevars`/`exp2anyreg`/`exp2reg`/`exp2nextreg`
//! (`examples/other_examples/48c30ccb_Fivesplate-Lua-skyla__src-lcode.rs.rs`),
//! reworked to return `Result` instead of relying on a non-local `longjmp` exit.

use crate::bytecode::{BcIns, BcPos, BcReg, BytecodeBuffer};
use crate::cfg::{ControlFlowGraph, Edge, EdgeKind};
use crate::const_pool::ConstPool;
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::opcodes::Opcode;
use crate::regalloc::RegisterAllocator;

/// Flags carried alongside an [`ExpDesc`], orthogonal to its [`ExpDescKind`].
///
/// Only two independent bits are needed (spec §3.1), so this is a small
/// hand-rolled bitset rather than pulling in a flags crate for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpFlags(u8);

impl ExpFlags {
    /// A register has already been reserved for an upcoming RHS operand
    /// (bitwise dispatch's call-frame `base`, spec §4.4.6).
    pub const HAS_RHS_REG: ExpFlags = ExpFlags(1 << 0);
    /// `aux` holds a reserved call-frame base register rather than a key/index.
    pub const BITWISE_BASE: ExpFlags = ExpFlags(1 << 1);

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Union of two flag sets.
    pub const fn set(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if every bit in `other` is present in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A hint about the runtime type of a value, used only by downstream
/// consumers for diagnostics; never authoritative for codegen decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// No useful hint available.
    Unknown,
    /// A Lua number.
    Num,
    /// A Lua string.
    Str,
    /// A Lua boolean.
    Bool,
}

/// The kind-specific payload of an expression descriptor (spec §3.1).
#[derive(Debug, Clone, PartialEq)]
pub enum ExpDescKind {
    /// No value (e.g. the result of a statement with no expression).
    Void,
    /// The constant `nil`.
    Nil,
    /// The constant `true`.
    True,
    /// The constant `false`.
    False,
    /// A numeric constant not yet interned into the constant pool.
    Num(f64),
    /// A string constant not yet interned, carried by value (stands in for
    /// the original's interned-string pointer — interning happens at
    /// `to_val` time, see [`ExpressionValue::to_val`]).
    Str(String),
    /// An FFI/cdata constant, opaque to this crate beyond its pool index.
    CData(u32),
    /// A local variable, living in register `info`.
    Local(BcReg),
    /// An upvalue, `info` is the upvalue slot.
    Upval(u16),
    /// A global variable, `info` is the string constant index of its name.
    Global(u32),
    /// Identical codegen to [`ExpDescKind::Global`] but marks the surrounding
    /// language's "unscoped" binding semantics (spec §9 Open Questions); the
    /// bytecode layer never inspects this distinction.
    Unscoped(u32),
    /// `table[key]`. `info` is the table's register, `aux` the key's
    /// register (or, for a small integer/short-string key, an immediate).
    Indexed {
        /// Register holding the table.
        table: BcReg,
        /// How the key is represented.
        key: IndexKey,
    },
    /// The result of a call instruction at PC `info`; `aux` is the base register.
    Call {
        /// PC of the `CALL`-family instruction.
        pc: BcPos,
        /// Base register of the call frame (and of its first return value).
        base: BcReg,
    },
    /// A value sitting in a register that is already fixed and owned by this
    /// expression (a live local, or a temporary the expression owns).
    NonReloc(BcReg),
    /// An instruction at PC `info` whose destination register has not been assigned yet.
    Relocable(BcPos),
    /// A boolean produced entirely by a jump list (a comparison's `JMP`, say);
    /// no value has been materialised into a register yet.
    Jmp(BcPos),
}

/// How an [`ExpDescKind::Indexed`] key is represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexKey {
    /// Key lives in a register.
    Reg(BcReg),
    /// Key is a short string constant (field access).
    Str(u32),
    /// Key is a small non-negative integer immediate (array access).
    Imm(u8),
}

/// An expression value: the tagged kind plus the always-present jump lists
/// and flags (spec §3.1).
#[derive(Debug, Clone, PartialEq)]
pub struct ExpDesc {
    /// The kind-specific payload.
    pub kind: ExpDescKind,
    /// Jumps to patch when this expression evaluates truthy.
    pub t: Option<Edge>,
    /// Jumps to patch when this expression evaluates falsey.
    pub f: Option<Edge>,
    /// Orthogonal flags.
    pub flags: ExpFlags,
    /// Non-authoritative result-type hint.
    pub type_hint: TypeHint,
    /// Secondary payload slot used transiently by the operator emitter
    /// (bitwise dispatch's reserved call base, spec §4.4.6); not part of the
    /// steady-state invariants of `kind` itself.
    pub aux_reg: Option<BcReg>,
}

impl ExpDesc {
    /// A void expression with no jump lists.
    pub const fn void() -> Self {
        Self {
            kind: ExpDescKind::Void,
            t: None,
            f: None,
            flags: ExpFlags::empty(),
            type_hint: TypeHint::Unknown,
            aux_reg: None,
        }
    }

    /// Wrap a bare kind with empty jump lists and flags.
    pub const fn new(kind: ExpDescKind) -> Self {
        Self { kind, t: None, f: None, flags: ExpFlags::empty(), type_hint: TypeHint::Unknown, aux_reg: None }
    }

    /// True if this is a pure constant with no pending jump lists (spec §3.1 invariant).
    pub const fn is_constant(&self) -> bool {
        matches!(
            self.kind,
            ExpDescKind::Nil
                | ExpDescKind::True
                | ExpDescKind::False
                | ExpDescKind::Num(_)
                | ExpDescKind::Str(_)
                | ExpDescKind::CData(_)
        )
    }

    /// The boolean value of a compile-time-constant expression's narrow
    /// (Lua-standard) truthiness, if knowable without emitting code.
    pub const fn narrow_truthy(&self) -> Option<bool> {
        match self.kind {
            ExpDescKind::Nil | ExpDescKind::False => Some(false),
            ExpDescKind::True | ExpDescKind::Num(_) | ExpDescKind::Str(_) | ExpDescKind::CData(_) => Some(true),
            _ => None,
        }
    }

    /// The boolean value of a compile-time-constant expression's *extended*
    /// falsey predicate (`nil`, `false`, `0`, `""`; empty arrays are a
    /// runtime-only case and never reach this path as a constant).
    pub const fn extended_truthy(&self) -> Option<bool> {
        match &self.kind {
            ExpDescKind::Nil | ExpDescKind::False => Some(false),
            ExpDescKind::Num(n) => Some(*n != 0.0),
            ExpDescKind::Str(s) => Some(!s.is_empty()),
            ExpDescKind::True | ExpDescKind::CData(_) => Some(true),
            _ => None,
        }
    }
}

/// The discharge/materialise/store pipeline over [`ExpDesc`] (spec §4.3).
///
/// A thin namespace, not a stateful type: every method takes the buffer,
/// allocator and constant pool it needs explicitly, the same narrow-surface
/// style the bytecode/CFG layers use.
pub struct ExpressionValue;

impl ExpressionValue {
    /// Normalise `e` into `NonReloc`, `Relocable`, `Jmp`, or a pure constant,
    /// resolving `Local`/`Upval`/`Global`/`Unscoped`/`Indexed` into an emitted
    /// instruction (`discharge` in spec §4.3). `Call` is left as-is: a call
    /// result is only materialised into a register on demand.
    ///
    /// An `Indexed` read releases its `table`/`key` registers once the `TGET*`
    /// is emitted (spec §4.5's register-balance invariant applies to every
    /// indexed read, not just lvalue writes): `release_register` is a no-op
    /// unless the register is genuinely the current top of the temporary
    /// stack, so a `table`/`key` that's actually a named local is left alone.
    /// This must run *before* the caller reserves a destination register for
    /// the discharged value, or the destination ends up sitting above
    /// `table`/`key` and the release becomes a no-op that leaks them instead —
    /// callers that reserve their own target up front (`to_reg` via a
    /// pre-chosen register) are unaffected either way, since `table`/`key`
    /// were necessarily evaluated, and so sit above, that target already.
    pub fn discharge(
        buf: &mut BytecodeBuffer,
        alloc: &mut RegisterAllocator,
        e: &mut ExpDesc,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<()> {
        match &e.kind {
            ExpDescKind::Local(r) => e.kind = ExpDescKind::NonReloc(*r),
            ExpDescKind::Upval(slot) => {
                let pc = buf.emit(BcIns::ad(Opcode::Uget, 0, *slot as i16), line);
                e.kind = ExpDescKind::Relocable(pc);
            }
            ExpDescKind::Global(k) | ExpDescKind::Unscoped(k) => {
                let pc = buf.emit(BcIns::ad(Opcode::Gget, 0, *k as i16), line);
                e.kind = ExpDescKind::Relocable(pc);
            }
            ExpDescKind::Indexed { table, key } => {
                let table = *table;
                let key = *key;
                let pc = match key {
                    IndexKey::Reg(kr) => buf.emit(BcIns::abc(Opcode::Tgetv, 0, table.index(), kr.index()), line),
                    IndexKey::Str(s) => {
                        let s = u8::try_from(s).map_err(|_| EmitError::internal(span, "TGETS constant index too wide"))?;
                        buf.emit(BcIns::abc(Opcode::Tgets, 0, table.index(), s), line)
                    }
                    IndexKey::Imm(i) => buf.emit(BcIns::abc(Opcode::Tgetb, 0, table.index(), i), line),
                };
                if let IndexKey::Reg(kr) = key {
                    alloc.release_register(kr.index());
                }
                alloc.release_register(table.index());
                e.kind = ExpDescKind::Relocable(pc);
            }
            _ => {}
        }
        Ok(())
    }

    /// A weaker normalisation than `discharge`, used before constant-pool
    /// lookup: ensure `e` is either a constant or a materialised register.
    pub fn to_val(
        buf: &mut BytecodeBuffer,
        alloc: &mut RegisterAllocator,
        e: &mut ExpDesc,
        const_pool: &mut ConstPool,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<()> {
        Self::discharge(buf, alloc, e, line, span)?;
        if e.t.is_some() || e.f.is_some() {
            Self::to_any_reg(buf, alloc, e, const_pool, line, span)?;
        }
        Ok(())
    }

    /// Force `e`'s value into register `r`, emitting whatever load/move
    /// instruction is appropriate, and resolving any pending jump lists by
    /// patching them to the current PC (spec §4.3 `to_reg`).
    pub fn to_reg(
        buf: &mut BytecodeBuffer,
        alloc: &mut RegisterAllocator,
        e: &mut ExpDesc,
        r: BcReg,
        const_pool: &mut ConstPool,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<()> {
        Self::discharge(buf, alloc, e, line, span)?;
        match &e.kind {
            ExpDescKind::Nil => {
                buf.emit(BcIns::ad(Opcode::Knil, r.index(), 0), line);
            }
            ExpDescKind::True => {
                buf.emit(BcIns::ad(Opcode::Kpri, r.index(), 2), line);
            }
            ExpDescKind::False => {
                buf.emit(BcIns::ad(Opcode::Kpri, r.index(), 1), line);
            }
            ExpDescKind::Num(n) => {
                let idx = const_pool.intern_number(*n, span)?;
                let idx = i16::try_from(idx).map_err(|_| EmitError::XKConst { span })?;
                buf.emit(BcIns::ad(Opcode::Knum, r.index(), idx), line);
            }
            ExpDescKind::Str(s) => {
                let s = s.clone();
                let idx = const_pool.intern_string(&s, span)?;
                let idx = i16::try_from(idx).map_err(|_| EmitError::XKConst { span })?;
                buf.emit(BcIns::ad(Opcode::Kstr, r.index(), idx), line);
            }
            ExpDescKind::CData(idx) => {
                let idx = i16::try_from(*idx).map_err(|_| EmitError::XKConst { span })?;
                buf.emit(BcIns::ad(Opcode::Kcdata, r.index(), idx), line);
            }
            ExpDescKind::NonReloc(src) => {
                if *src != r {
                    buf.emit(BcIns::ad(Opcode::Mov, r.index(), src.index() as i16), line);
                }
            }
            ExpDescKind::Relocable(pc) => {
                buf.get_mut(*pc).set_a(r.index());
            }
            ExpDescKind::Call { base, .. } => {
                if *base != r {
                    buf.emit(BcIns::ad(Opcode::Mov, r.index(), base.index() as i16), line);
                }
            }
            ExpDescKind::Jmp(_) => {
                // A bare boolean jump (a comparison's test + `JMP`, or `not`
                // of one after `logical_not` swaps `t`/`f`) with no preceding
                // test-and-copy: materialise both arms with an explicit
                // `KPRI`/jump/`KPRI` sequence. `e.t` fires when the
                // underlying test is false (this crate's comparisons skip
                // the `JMP` on a true result, the same convention
                // `jump_if_true`/`jump_if_false` use), `e.f` fires when it's
                // true; whichever field is empty is the polarity that
                // reaches this point by falling straight through the
                // untaken jump, so its value is loaded first.
                match (e.t.take(), e.f.take()) {
                    (Some(mut false_edge), None) => {
                        buf.emit(BcIns::ad(Opcode::Kpri, r.index(), 2), line);
                        let mut skip = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
                        ControlFlowGraph::emit_jump(buf, &mut skip, line, span)?;
                        ControlFlowGraph::patch_here(buf, &mut false_edge, span)?;
                        buf.emit(BcIns::ad(Opcode::Kpri, r.index(), 1), line);
                        ControlFlowGraph::patch_here(buf, &mut skip, span)?;
                    }
                    (None, Some(mut true_edge)) => {
                        buf.emit(BcIns::ad(Opcode::Kpri, r.index(), 1), line);
                        let mut skip = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
                        ControlFlowGraph::emit_jump(buf, &mut skip, line, span)?;
                        ControlFlowGraph::patch_here(buf, &mut true_edge, span)?;
                        buf.emit(BcIns::ad(Opcode::Kpri, r.index(), 2), line);
                        ControlFlowGraph::patch_here(buf, &mut skip, span)?;
                    }
                    (Some(false_edge), Some(true_edge)) => {
                        // A merged jump list with edges of both polarities has no
                        // implicit fallthrough value; defer to the generic
                        // jump-list resolution below.
                        e.t = Some(false_edge);
                        e.f = Some(true_edge);
                    }
                    (None, None) => {
                        return Err(EmitError::internal(span, "Jmp ExpDesc with no jump edge"));
                    }
                }
            }
            ExpDescKind::Local(_)
            | ExpDescKind::Upval(_)
            | ExpDescKind::Global(_)
            | ExpDescKind::Unscoped(_)
            | ExpDescKind::Indexed { .. }
            | ExpDescKind::Void => {
                return Err(EmitError::internal(span, "to_reg on an undischarged ExpDesc kind"));
            }
        }
        e.kind = ExpDescKind::NonReloc(r);
        Self::resolve_jumps_here(buf, e, r.index(), span)?;
        Ok(())
    }

    /// `to_reg(e, freereg)` then reserve that register.
    ///
    /// Discharges `e` *before* reserving `freereg`: an `Indexed` source
    /// releases its `table`/`key` registers on discharge, and that only
    /// collapses `freereg` if it happens while they're still the topmost
    /// temporaries — reserving the destination first would park it above
    /// them and turn the release into a no-op.
    pub fn to_next_reg(
        buf: &mut BytecodeBuffer,
        alloc: &mut RegisterAllocator,
        e: &mut ExpDesc,
        const_pool: &mut ConstPool,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<BcReg> {
        Self::discharge(buf, alloc, e, line, span)?;
        let r = BcReg(alloc.reserve_raw(1, span)?);
        Self::to_reg(buf, alloc, e, r, const_pool, line, span)?;
        Ok(r)
    }

    /// If `e` already occupies a register, return it; otherwise allocate one
    /// and materialise into it.
    pub fn to_any_reg(
        buf: &mut BytecodeBuffer,
        alloc: &mut RegisterAllocator,
        e: &mut ExpDesc,
        const_pool: &mut ConstPool,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<BcReg> {
        Self::discharge(buf, alloc, e, line, span)?;
        if let ExpDescKind::NonReloc(r) = e.kind {
            if e.t.is_none() && e.f.is_none() {
                return Ok(r);
            }
        }
        Self::to_next_reg(buf, alloc, e, const_pool, line, span)
    }

    /// Patch `e`'s true/false jump lists (if any) to the PC the value ends
    /// up materialised at, and to the instruction after it for the opposite
    /// polarity, matching the original's "resolve pending lists on discharge" behaviour.
    fn resolve_jumps_here(buf: &mut BytecodeBuffer, e: &mut ExpDesc, register: u8, span: SourceSpan) -> EmitResult<()> {
        let here = buf.pc();
        if let Some(mut t) = e.t.take() {
            ControlFlowGraph::patch_with_value(buf, &mut t, here, register, here, span)?;
        }
        if let Some(mut f) = e.f.take() {
            ControlFlowGraph::patch_with_value(buf, &mut f, here, register, here, span)?;
        }
        Ok(())
    }

    /// Build the true-jump edge for `e`, emitting the conditional test +
    /// `JMP` pair needed to branch "if truthy" (used by `and`/`or`/`if` prep phases).
    pub fn jump_if_true(
        buf: &mut BytecodeBuffer,
        e: &ExpDesc,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<Edge> {
        let mut edge = ControlFlowGraph::make_edge(EdgeKind::True, None);
        let test_reg = match e.kind {
            ExpDescKind::NonReloc(r) => r.index(),
            _ => 0,
        };
        buf.emit(BcIns::ad(Opcode::Ist, 0, test_reg as i16), line);
        ControlFlowGraph::emit_jump(buf, &mut edge, line, span)?;
        Ok(edge)
    }

    /// As [`Self::jump_if_true`] but for the falsey branch.
    pub fn jump_if_false(
        buf: &mut BytecodeBuffer,
        e: &ExpDesc,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<Edge> {
        let mut edge = ControlFlowGraph::make_edge(EdgeKind::False, None);
        let test_reg = match e.kind {
            ExpDescKind::NonReloc(r) => r.index(),
            _ => 0,
        };
        buf.emit(BcIns::ad(Opcode::Isf, 0, test_reg as i16), line);
        ControlFlowGraph::emit_jump(buf, &mut edge, line, span)?;
        Ok(edge)
    }
}

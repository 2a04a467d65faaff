//! Bytecode instruction encoding and the append-only instruction buffer.
//!
//! Grounded on `fuel_asm::instruction`/`pack` (bit-packed operand encode and
//! decode behind narrow accessor methods) but reworked per spec §9's
//! "raw pointers into the bytecode buffer" re-architecture note: the
//! original core mutates instructions through a `BCIns*`, this crate indexes
//! a `Vec<BcIns>` by [`BcPos`] instead, and every mutation goes through
//! [`BytecodeBuffer`] methods rather than borrowed pointers.

use crate::opcodes::{Opcode, OperandMode};

/// A program-counter-sized index into a function's bytecode buffer.
///
/// `NO_JMP` (the jump-list terminator from spec §3.3) is represented as
/// `Option<BcPos>::None` everywhere in this crate, rather than as a sentinel
/// value of this type.
pub type BcPos = u32;

/// Sentinel `D` value used for an unpatched jump list node's link field,
/// chosen (like the teacher's opcode encodings) to be a value no real
/// relative offset ever produces from this crate's own emission.
pub const NO_JMP_SENTINEL: i16 = i16::MIN;

/// A register index within the current function's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BcReg(pub u8);

impl BcReg {
    /// Register zero.
    pub const ZERO: BcReg = BcReg(0);

    /// This register's raw index.
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl From<u8> for BcReg {
    fn from(value: u8) -> Self {
        BcReg(value)
    }
}

/// The operand payload of one instruction, tagged by [`OperandMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// `ABC` layout: two more 8-bit fields alongside `A`.
    Abc {
        /// The `B` operand.
        b: u8,
        /// The `C` operand.
        c: u8,
    },
    /// `AD` layout: one 16-bit field alongside `A`, signed when used for jumps.
    Ad {
        /// The `D` operand (bias-free; callers apply `BCBIAS_J` if needed).
        d: i16,
    },
}

/// A single 32-bit bytecode instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcIns {
    /// The opcode.
    pub op: Opcode,
    /// The `A` operand, present in both layouts.
    pub a: u8,
    /// The layout-specific remainder of the instruction.
    pub operands: Operands,
}

impl BcIns {
    /// Build an `ABC`-layout instruction. Panics (debug-only) if `op` does not use that layout.
    pub fn abc(op: Opcode, a: u8, b: u8, c: u8) -> Self {
        debug_assert_eq!(op.operand_mode(), OperandMode::Abc, "{op:?} is not an ABC opcode");
        Self { op, a, operands: Operands::Abc { b, c } }
    }

    /// Build an `AD`-layout instruction. Panics (debug-only) if `op` does not use that layout.
    pub fn ad(op: Opcode, a: u8, d: i16) -> Self {
        debug_assert_eq!(op.operand_mode(), OperandMode::Ad, "{op:?} is not an AD opcode");
        Self { op, a, operands: Operands::Ad { d } }
    }

    /// The `D` field, if this instruction uses the `AD` layout.
    pub const fn d(&self) -> Option<i16> {
        match self.operands {
            Operands::Ad { d } => Some(d),
            Operands::Abc { .. } => None,
        }
    }

    /// Overwrite the `D` field in place. No-op (debug-asserts) on an `ABC` instruction.
    pub fn set_d(&mut self, d: i16) {
        match &mut self.operands {
            Operands::Ad { d: slot } => *slot = d,
            Operands::Abc { .. } => debug_assert!(false, "set_d on an ABC instruction"),
        }
    }

    /// Overwrite the `A` field in place (used when materialising a `Relocable`
    /// expression's destination register, and when `patch_with_value`
    /// rewrites a test-and-copy's destination).
    pub fn set_a(&mut self, a: u8) {
        self.a = a;
    }

    /// The `B` field, if this instruction uses the `ABC` layout.
    pub const fn b(&self) -> Option<u8> {
        match self.operands {
            Operands::Abc { b, .. } => Some(b),
            Operands::Ad { .. } => None,
        }
    }

    /// The `C` field, if this instruction uses the `ABC` layout.
    pub const fn c(&self) -> Option<u8> {
        match self.operands {
            Operands::Abc { c, .. } => Some(c),
            Operands::Ad { .. } => None,
        }
    }

    /// Overwrite the `B` field in place. No-op (debug-asserts) on an `AD` instruction.
    ///
    /// Used to widen a trailing `CALL`'s declared argument count in place when
    /// its last argument turns out to spread (spec §4.5 "Local declaration").
    pub fn set_b(&mut self, b: u8) {
        match &mut self.operands {
            Operands::Abc { b: slot, .. } => *slot = b,
            Operands::Ad { .. } => debug_assert!(false, "set_b on an AD instruction"),
        }
    }

    /// Overwrite the `C` field in place. No-op (debug-asserts) on an `AD` instruction.
    ///
    /// Used to rewrite a `CALL`'s declared return count in place (spec §4.5
    /// "`return`": "rewrite the call's return-count to forward all").
    pub fn set_c(&mut self, c: u8) {
        match &mut self.operands {
            Operands::Abc { c: slot, .. } => *slot = c,
            Operands::Ad { .. } => debug_assert!(false, "set_c on an ABC instruction"),
        }
    }
}

/// A `{instruction, source line}` pair as stored in the bytecode buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineIns {
    /// The instruction.
    pub ins: BcIns,
    /// The source line it is attributed to (spec §4.5 "Line info").
    pub line: u32,
}

/// The append-only instruction stream for a single function compilation.
///
/// One buffer is owned per [`crate::funcstate::FunctionState`]; nested
/// function literals get a fresh buffer of their own (spec §4.7), unlike the
/// teacher's shared `bcbase` arena — modeling each function's code as an
/// independently owned `Vec` is simpler in safe Rust and the two are
/// semantically equivalent since only the innermost function ever writes.
#[derive(Debug, Clone, Default)]
pub struct BytecodeBuffer {
    code: Vec<LineIns>,
    /// PC of the most recent jump target, used to block cross-target peephole folds.
    lasttarget: Option<BcPos>,
}

impl BytecodeBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instructions emitted so far; also the PC the next emission will land at.
    pub fn pc(&self) -> BcPos {
        self.code.len() as BcPos
    }

    /// Append an instruction, returning the PC it was written to.
    pub fn emit(&mut self, ins: BcIns, line: u32) -> BcPos {
        let pc = self.pc();
        self.code.push(LineIns { ins, line });
        pc
    }

    /// Read an instruction.
    pub fn get(&self, pc: BcPos) -> &BcIns {
        &self.code[pc as usize].ins
    }

    /// Mutably access an instruction (e.g. to patch a jump offset or relocate a destination).
    pub fn get_mut(&mut self, pc: BcPos) -> &mut BcIns {
        &mut self.code[pc as usize].ins
    }

    /// The source line an instruction was emitted for.
    pub fn line_of(&self, pc: BcPos) -> u32 {
        self.code[pc as usize].line
    }

    /// The most recently recorded jump target, if any.
    pub fn lasttarget(&self) -> Option<BcPos> {
        self.lasttarget
    }

    /// Record `pc` as a jump target (called by the CFG when it resolves an edge here).
    pub fn mark_target(&mut self, pc: BcPos) {
        self.lasttarget = Some(pc);
    }

    /// All emitted instructions in order, with their line info. Used by the
    /// prototype finaliser (spec §6.3).
    pub fn instructions(&self) -> &[LineIns] {
        &self.code
    }

    /// Truncate the buffer back to `pc`, discarding everything after it.
    ///
    /// Used by constant folding of short-circuit operators: when a branch is
    /// proven dead at compile time, the speculative instructions for it are
    /// rolled back rather than left as unreachable bytecode.
    pub fn truncate(&mut self, pc: BcPos) {
        self.code.truncate(pc as usize);
        if self.lasttarget.is_some_and(|t| t >= pc) {
            self.lasttarget = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_returns_sequential_pcs() {
        let mut buf = BytecodeBuffer::new();
        let p0 = buf.emit(BcIns::ad(Opcode::Knil, 0, 0), 1);
        let p1 = buf.emit(BcIns::ad(Opcode::Jmp, 0, -1), 1);
        assert_eq!(p0, 0);
        assert_eq!(p1, 1);
        assert_eq!(buf.pc(), 2);
    }

    #[test]
    fn set_d_round_trips() {
        let mut buf = BytecodeBuffer::new();
        let pc = buf.emit(BcIns::ad(Opcode::Jmp, 0, -1), 1);
        buf.get_mut(pc).set_d(42);
        assert_eq!(buf.get(pc).d(), Some(42));
    }

    #[test]
    fn truncate_drops_trailing_instructions() {
        let mut buf = BytecodeBuffer::new();
        buf.emit(BcIns::ad(Opcode::Knil, 0, 0), 1);
        let mark = buf.pc();
        buf.emit(BcIns::ad(Opcode::Jmp, 0, -1), 1);
        buf.truncate(mark);
        assert_eq!(buf.pc(), mark);
    }
}

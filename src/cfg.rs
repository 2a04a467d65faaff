//! Control-flow graph bookkeeping over in-flight jump-list edges (spec §3.3, §4.2).
//!
//! A jump list is a singly-linked list of `JMP`-family instructions threaded
//! through their own `D` operand, living inside [`crate::bytecode::BytecodeBuffer`]
//! itself. Grounded on
//! `examples/other_examples/48c30ccb_Fivesplate-Lua-skyla__src-lcode.rs.rs`'s
//! `patchlist`/`concat`/`get_jump`/`patch_jump`, reworked per spec §9's
//! "Embedded linked lists in instruction stream" note: traversal here goes
//! through [`ControlFlowGraph`] methods operating on [`BcPos`] indices rather
//! than raw pointer walks, and an [`Edge`] handle distinguishes the four kinds
//! of outstanding branch bookkeeping (§4.2 Operations) instead of callers
//! juggling bare jump-list heads.

use tracing::warn;

use crate::bytecode::{BcIns, BcPos, BytecodeBuffer};
use crate::error::{EmitError, EmitResult, SourceSpan};
use crate::opcodes::Opcode;

/// What an [`Edge`] represents, purely for diagnostics (unresolved-edge warnings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// An unconditional jump list (e.g. `if` clause escapes, short-circuit rewiring).
    Unconditional,
    /// The "branch taken when true" jump list of a logical/comparison expression.
    True,
    /// The "branch taken when false" jump list.
    False,
    /// Pending `break` jumps within the innermost loop.
    Break,
    /// Pending `continue` jumps within the innermost loop.
    Continue,
}

/// A handle over an in-flight jump list: the head PC (or `None` for an empty
/// list) plus its kind, used only to produce a useful warning if it is
/// dropped unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    kind: EdgeKind,
    head: Option<BcPos>,
    resolved: bool,
}

impl Edge {
    /// True if the edge currently has no pending jumps.
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The head PC, if any.
    pub const fn head(&self) -> Option<BcPos> {
        self.head
    }
}

/// Bookkeeping for outstanding jump-list edges over one function's
/// [`BytecodeBuffer`]. Stateless beyond what it reads from/writes into the
/// buffer itself — an instance is cheap to construct and does not need to
/// outlive a single emission pass.
#[derive(Debug, Default)]
pub struct ControlFlowGraph;

impl ControlFlowGraph {
    /// A fresh CFG view. Carries no state of its own; all jump-list state
    /// lives in the [`BytecodeBuffer`] the caller passes to every method.
    pub const fn new() -> Self {
        Self
    }

    /// Create a new edge, optionally starting from an existing jump-list head.
    pub const fn make_edge(kind: EdgeKind, head: Option<BcPos>) -> Edge {
        Edge { kind, head, resolved: false }
    }

    /// Read the `D` field of a jump instruction as a raw link (relative to its own PC).
    fn next_link(buf: &BytecodeBuffer, pc: BcPos) -> Option<BcPos> {
        let ins = buf.get(pc);
        let d = ins.d().unwrap_or(0);
        if d == crate::bytecode::NO_JMP_SENTINEL {
            None
        } else {
            // Stored as a relative offset from `pc + 1`, LuaJIT-style.
            Some(((pc as i64) + 1 + d as i64) as BcPos)
        }
    }

    fn set_link(buf: &mut BytecodeBuffer, pc: BcPos, target: Option<BcPos>, span: SourceSpan) -> EmitResult<()> {
        let d = match target {
            None => crate::bytecode::NO_JMP_SENTINEL,
            Some(t) => {
                let rel = (t as i64) - (pc as i64) - 1;
                i16::try_from(rel).map_err(|_| EmitError::XJump { span })?
            }
        };
        buf.get_mut(pc).set_d(d);
        Ok(())
    }

    /// Append a single PC (a freshly-emitted jump instruction) to an edge's list.
    pub fn append_pc(buf: &mut BytecodeBuffer, edge: &mut Edge, pc: BcPos, span: SourceSpan) -> EmitResult<()> {
        match edge.head {
            None => edge.head = Some(pc),
            Some(head) => {
                let mut cur = head;
                while let Some(next) = Self::next_link(buf, cur) {
                    cur = next;
                }
                Self::set_link(buf, cur, Some(pc), span)?;
            }
        }
        edge.resolved = false;
        Ok(())
    }

    /// Splice `other`'s jump list into `edge`'s, consuming `other`.
    pub fn append(buf: &mut BytecodeBuffer, edge: &mut Edge, other: Edge, span: SourceSpan) -> EmitResult<()> {
        match other.head {
            None => {}
            Some(head) => match edge.head {
                None => edge.head = Some(head),
                Some(edge_head) => {
                    let mut cur = edge_head;
                    while let Some(next) = Self::next_link(buf, cur) {
                        cur = next;
                    }
                    Self::set_link(buf, cur, Some(head), span)?;
                }
            },
        }
        edge.resolved = false;
        Ok(())
    }

    /// Rewrite every jump in `edge`'s list to target `target`, marking the edge resolved.
    pub fn patch_to(buf: &mut BytecodeBuffer, edge: &mut Edge, target: BcPos, span: SourceSpan) -> EmitResult<()> {
        let mut cur = edge.head;
        while let Some(pc) = cur {
            let next = Self::next_link(buf, pc);
            Self::set_link(buf, pc, Some(target), span)?;
            cur = next;
        }
        buf.mark_target(target);
        edge.resolved = true;
        Ok(())
    }

    /// Patch `edge` to the buffer's current PC.
    pub fn patch_here(buf: &mut BytecodeBuffer, edge: &mut Edge, span: SourceSpan) -> EmitResult<()> {
        let here = buf.pc();
        Self::patch_to(buf, edge, here, span)
    }

    /// Rewrite only the head instruction's target, leaving the rest of the
    /// list's nodes unresolved (their own target is established by a
    /// subsequent `patch_to`). Used by the numeric-`for` `FORI`/`FORL` pair,
    /// where `FORI`'s target must be the `FORL` instruction specifically.
    pub fn patch_head(buf: &mut BytecodeBuffer, edge: &Edge, destination: BcPos, span: SourceSpan) -> EmitResult<()> {
        if let Some(head) = edge.head {
            Self::set_link_keep_chain(buf, head, destination, span)?;
        }
        Ok(())
    }

    /// Overwrite a single node's destination while preserving the rest of the
    /// conceptual chain is not representable once the node's `D` slot is
    /// reused as a target rather than a link; callers that need both must
    /// capture the next link first (this is only ever used on a single-node
    /// edge in this emitter, matching the `FORI` use site).
    fn set_link_keep_chain(buf: &mut BytecodeBuffer, pc: BcPos, target: BcPos, span: SourceSpan) -> EmitResult<()> {
        Self::set_link(buf, pc, Some(target), span)
    }

    /// For each jump in `edge`'s list: if the instruction immediately
    /// preceding it is a test-and-copy (`ISTC`/`ISFC`), rewrite its
    /// destination register to `register` and send the jump to
    /// `value_target`; otherwise send it to `default_target`. Used to
    /// materialise a boolean result from a short-circuit chain without
    /// forcing every branch through the same code path (spec §4.2).
    pub fn patch_with_value(
        buf: &mut BytecodeBuffer,
        edge: &mut Edge,
        value_target: BcPos,
        register: u8,
        default_target: BcPos,
        span: SourceSpan,
    ) -> EmitResult<()> {
        let mut cur = edge.head;
        while let Some(pc) = cur {
            let next = Self::next_link(buf, pc);
            if pc > 0 && buf.get(pc - 1).op.is_test_and_copy() {
                buf.get_mut(pc - 1).set_a(register);
                Self::set_link(buf, pc, Some(value_target), span)?;
            } else {
                Self::set_link(buf, pc, Some(default_target), span)?;
            }
            cur = next;
        }
        buf.mark_target(value_target);
        buf.mark_target(default_target);
        edge.resolved = true;
        Ok(())
    }

    /// True if any jump in `edge`'s list is preceded by a test-and-copy instruction.
    pub fn produces_values(buf: &BytecodeBuffer, edge: &Edge) -> bool {
        let mut cur = edge.head;
        while let Some(pc) = cur {
            if pc > 0 && buf.get(pc - 1).op.is_test_and_copy() {
                return true;
            }
            cur = Self::next_link(buf, pc);
        }
        false
    }

    /// Convert every test-and-copy preceding a jump in `edge`'s list to its
    /// plain-test counterpart, discarding the copy destination.
    pub fn drop_values(buf: &mut BytecodeBuffer, edge: &Edge) {
        let mut cur = edge.head;
        while let Some(pc) = cur {
            if pc > 0 {
                if let Some(plain) = buf.get(pc - 1).op.as_plain_test() {
                    let d = buf.get(pc - 1).d();
                    let ins = buf.get_mut(pc - 1);
                    *ins = BcIns::ad(plain, 0, d.unwrap_or(0));
                }
            }
            cur = Self::next_link(buf, pc);
        }
    }

    /// Emit a bare `JMP` instruction and append it to `edge`, returning the new PC.
    pub fn emit_jump(
        buf: &mut BytecodeBuffer,
        edge: &mut Edge,
        line: u32,
        span: SourceSpan,
    ) -> EmitResult<BcPos> {
        let pc = buf.emit(BcIns::ad(Opcode::Jmp, 0, crate::bytecode::NO_JMP_SENTINEL), line);
        Self::append_pc(buf, edge, pc, span)?;
        Ok(pc)
    }

    /// Warn (not fail) if `edge` still has pending jumps at function close
    /// (spec §4.2 Invariants: a bug marker upstream, not itself fatal here).
    pub fn warn_if_unresolved(edge: &Edge, fn_name: &str) {
        if !edge.resolved && edge.head.is_some() {
            warn!(kind = ?edge.kind, fn_name, "unresolved jump-list edge at function finalisation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    #[test]
    fn emit_and_patch_to_roundtrip() {
        let mut buf = BytecodeBuffer::new();
        let mut edge = ControlFlowGraph::make_edge(EdgeKind::Unconditional, None);
        let pc = ControlFlowGraph::emit_jump(&mut buf, &mut edge, 1, span()).unwrap();
        buf.emit(BcIns::ad(Opcode::Knil, 0, 0), 2);
        let target = buf.pc();
        ControlFlowGraph::patch_to(&mut buf, &mut edge, target, span()).unwrap();
        assert_eq!(buf.get(pc).d(), Some(target as i16 - pc as i16 - 1));
        assert!(edge.resolved);
    }

    #[test]
    fn append_merges_two_lists() {
        let mut buf = BytecodeBuffer::new();
        let mut a = ControlFlowGraph::make_edge(EdgeKind::True, None);
        let mut b = ControlFlowGraph::make_edge(EdgeKind::True, None);
        let pc_a = ControlFlowGraph::emit_jump(&mut buf, &mut a, 1, span()).unwrap();
        let pc_b = ControlFlowGraph::emit_jump(&mut buf, &mut b, 1, span()).unwrap();
        ControlFlowGraph::append(&mut buf, &mut a, b, span()).unwrap();
        let target = buf.pc();
        ControlFlowGraph::patch_to(&mut buf, &mut a, target, span()).unwrap();
        assert_eq!(buf.get(pc_a).d(), Some(target as i16 - pc_a as i16 - 1));
        assert_eq!(buf.get(pc_b).d(), Some(target as i16 - pc_b as i16 - 1));
    }

    #[test]
    fn empty_edge_append_is_noop() {
        let mut buf = BytecodeBuffer::new();
        let mut edge = ControlFlowGraph::make_edge(EdgeKind::Break, None);
        let empty = ControlFlowGraph::make_edge(EdgeKind::Break, None);
        ControlFlowGraph::append(&mut buf, &mut edge, empty, span()).unwrap();
        assert!(edge.is_empty());
    }

    #[test]
    fn jump_list_traversal_terminates() {
        let mut buf = BytecodeBuffer::new();
        let mut edge = ControlFlowGraph::make_edge(EdgeKind::Break, None);
        for _ in 0..5 {
            ControlFlowGraph::emit_jump(&mut buf, &mut edge, 1, span()).unwrap();
        }
        let target = buf.pc();
        ControlFlowGraph::patch_to(&mut buf, &mut edge, target, span()).unwrap();
        for pc in 0..5u32 {
            assert_eq!(buf.get(pc).d(), Some(target as i16 - pc as i16 - 1));
        }
    }
}

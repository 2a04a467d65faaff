//! The finished compilation artifact handed to the embedder (spec §6.3).
//!
//! Grounded on the teacher's public `Interpreter<S>` surface: a plain bundle
//! of already-validated data plus a narrow trait the embedder implements to
//! receive it, the same shape as [`crate::external::GcHeap`]'s role as a
//! boundary to code this crate doesn't own.

use crate::bytecode::LineIns;
use crate::const_pool::GcConstant;
use crate::funcstate::{FuncFlags, FunctionState, LocalDebugInfo};
use crate::scope::UpvalEntry;

/// One finished function's bytecode plus everything a VM needs to load it
/// (spec §6.3: instructions, four constant tables, upvalue map, flags, and
/// per-local debug info).
#[derive(Debug, Clone)]
pub struct Prototype {
    /// Emitted instructions with per-instruction line info.
    pub instructions: Vec<LineIns>,
    /// The number constant table.
    pub numbers: Vec<f64>,
    /// The string constant table.
    pub strings: Vec<String>,
    /// The GC-object constant table (sub-prototypes, table templates).
    pub gc_constants: Vec<GcConstant>,
    /// The upvalue map, in slot order.
    pub upvalues: Vec<UpvalEntry>,
    /// Declared parameter count.
    pub nparams: u8,
    /// Accepts a variable number of trailing arguments.
    pub is_vararg: bool,
    /// This function (or a descendant) calls into the bitwise-dispatch runtime library.
    pub has_ffi: bool,
    /// This function has at least one nested function literal.
    pub has_child: bool,
    /// Per-local debug info, in declaration order.
    pub locals: Vec<LocalDebugInfo>,
}

impl Prototype {
    /// Bundle a finished function's state into a consumable prototype,
    /// closing out any locals still open at `end_pc` (spec §4.7 step 7:
    /// "finalise the prototype").
    pub fn from_function_state(mut fs: FunctionState, end_pc: u32) -> Self {
        let locals = fs.finish_locals(end_pc);
        let flags = fs.flags();
        let nparams = fs.nparams();
        Self {
            instructions: fs.buf.instructions().to_vec(),
            numbers: fs.consts.numbers().to_vec(),
            strings: fs.consts.strings().to_vec(),
            gc_constants: fs.consts.gc_constants().to_vec(),
            upvalues: fs.scopes.upvalues().to_vec(),
            nparams,
            is_vararg: flags.contains(FuncFlags::VARARG),
            has_ffi: flags.contains(FuncFlags::HAS_FFI),
            has_child: flags.contains(FuncFlags::CHILD),
            locals,
        }
    }
}

/// External hook a production embedder implements to receive finished
/// prototypes (spec §6.3: "returns a prototype object and an index the
/// parent can embed via `FNEW`"). A narrow trait boundary for a GC-owned
/// artifact this crate never allocates itself, the same role
/// [`crate::external::GcHeap`] plays for tables.
pub trait PrototypeSink {
    /// Consume a finished prototype, returning the GC-constant index its
    /// parent function should embed as `FNEW`'s operand.
    fn finish(&mut self, proto: Prototype) -> u32;
}

/// A [`PrototypeSink`] that accumulates prototypes in emission order. Used by
/// tests, and by any embedding that doesn't need a real GC heap to hand
/// prototypes a home (e.g. dumping them to a serialized module).
#[derive(Debug, Default)]
pub struct CollectingSink {
    prototypes: Vec<Prototype>,
}

impl CollectingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The prototypes collected so far, in the order [`PrototypeSink::finish`] received them.
    pub fn prototypes(&self) -> &[Prototype] {
        &self.prototypes
    }

    /// Consume the sink, handing back its collected prototypes.
    pub fn into_prototypes(self) -> Vec<Prototype> {
        self.prototypes
    }
}

impl PrototypeSink for CollectingSink {
    fn finish(&mut self, proto: Prototype) -> u32 {
        let idx = self.prototypes.len() as u32;
        self.prototypes.push(proto);
        idx
    }
}

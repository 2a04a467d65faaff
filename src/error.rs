//! Emitter error taxonomy.
//!
//! Mirrors the split the original LuaJIT-derived core makes between *source
//! errors* (raised through the lexer's `err_syntax` path) and *internal
//! invariants* (emitter bugs that should never fire for well-formed ASTs).
//! Rather than the non-local `longjmp` exit the C implementation uses, every
//! fallible entry point in this crate threads a [`Result<_, EmitError>`].

use std::fmt;

use thiserror::Error;

/// A location in the original Fluid source, carried through to diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    /// Byte offset of the span's start.
    pub offset: u32,
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub column: u32,
}

impl SourceSpan {
    /// Build a span from its three components.
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source-level error codes the lexer's `err_syntax` path would raise.
///
/// These track `XJUMP`, `XSLOTS`, `XKCONST`, `XLIMC` and `XFIXUP` from the
/// specification one-for-one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A jump offset does not fit in the bytecode's `D` operand field.
    #[error("{span}: jump offset out of range (XJUMP)")]
    XJump {
        /// Location of the offending jump.
        span: SourceSpan,
    },

    /// Register allocation would exceed the per-function register limit.
    #[error("{span}: too many local variables / temporaries (XSLOTS)")]
    XSlots {
        /// Location that triggered the overflow.
        span: SourceSpan,
    },

    /// A function's constant pool has exhausted its operand-width-bounded index space.
    #[error("{span}: too many constants in function (XKCONST)")]
    XKConst {
        /// Location that triggered the overflow.
        span: SourceSpan,
    },

    /// The upvalue table (or an analogous per-function limited table) overflowed.
    #[error("{span}: too many upvalues in function (XLIMC)")]
    XLimC {
        /// Location that triggered the overflow.
        span: SourceSpan,
    },

    /// A jump list was left unpatched when its owning function was finalised.
    #[error("{span}: unresolved jump at function close (XFIXUP)")]
    XFixup {
        /// Location of the function whose close found the dangling edge.
        span: SourceSpan,
    },

    /// A `break`/`continue`/compound-assignment used outside the context that
    /// makes it meaningful (e.g. `break` with no enclosing loop). This is a
    /// source error — the lexer's parser is expected to reject most of these
    /// earlier, but the emitter is the last line of defense.
    #[error("{span}: {message}")]
    InvalidConstruct {
        /// Location of the offending construct.
        span: SourceSpan,
        /// Human-readable description.
        message: String,
    },

    /// An unreachable internal state: a bug in the emitter rather than in the
    /// input program. Never expected to fire for well-formed ASTs.
    #[error("internal invariant violated at {span}: {description}")]
    InternalInvariant {
        /// Best-effort location (may be the span of the node being emitted).
        span: SourceSpan,
        /// Description of which invariant was violated.
        description: &'static str,
    },
}

impl EmitError {
    /// Construct an [`EmitError::InternalInvariant`] with a `'static` message.
    pub const fn internal(span: SourceSpan, description: &'static str) -> Self {
        Self::InternalInvariant { span, description }
    }

    /// True if this error represents a source error rather than an internal bug.
    pub const fn is_source_error(&self) -> bool {
        !matches!(self, Self::InternalInvariant { .. })
    }
}

/// Convenience alias used throughout the emitter.
pub type EmitResult<T> = Result<T, EmitError>;

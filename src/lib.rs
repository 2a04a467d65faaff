//! A bytecode emitter for the Fluid scripting language (spec §1): takes an
//! AST handed in by an external lexer/parser and lowers it to register-based,
//! LuaJIT-style bytecode prototypes.
//!
//! Grounded on the teacher's `src/lib.rs`: a thin `mod` tree with the
//! handful of types an embedder actually touches re-exported at the crate
//! root, rather than requiring callers to reach into `fluid_codegen::emitter::...`.
#![forbid(unsafe_code)]

mod ast;
mod bytecode;
mod cfg;
mod config;
mod const_pool;
mod emitter;
mod error;
mod expr;
mod external;
mod funcstate;
mod loopctx;
mod opcodes;
mod operators;
mod proto;
mod regalloc;
mod scope;

pub use ast::{
    AssignOp, BinaryOp, Block, Expr, FunctionLiteral, IfClause, LValue, LiteralValue, Param, Stmt, TableField, TableFieldKind, UnaryOp,
    UpdateOp,
};
pub use bytecode::{BcIns, BcPos, BcReg, BytecodeBuffer, LineIns, Operands};
pub use config::EmitterConfig;
pub use const_pool::{GcConstant, TableTemplate, TemplateValue};
pub use emitter::Emitter;
pub use error::{EmitError, EmitResult, SourceSpan};
pub use external::{GcHeap, LexState, VarInfo};
pub use funcstate::LocalDebugInfo;
pub use opcodes::Opcode;
pub use proto::{CollectingSink, Prototype, PrototypeSink};
pub use scope::UpvalEntry;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{TestGcHeap, TestLexer};

    fn span() -> SourceSpan {
        SourceSpan::new(0, 1, 1)
    }

    /// End-to-end smoke test (spec §10.5): a chunk with a local, an `if`,
    /// and a `return` compiles through the public API into a well-formed
    /// [`Prototype`] without reaching into any `emitter::*` internals.
    #[test]
    fn compile_chunk_through_the_public_api() {
        let mut lex = TestLexer::new();
        let mut gc = TestGcHeap::new();
        let mut sink = CollectingSink::new();
        let mut emitter = Emitter::new(&mut lex, &mut gc, &mut sink, EmitterConfig::default());

        let block = Block::new(vec![
            Stmt::LocalDecl {
                names: vec!["x".into()],
                values: vec![Expr::Literal { value: LiteralValue::Num(1.0), span: span() }],
                span: span(),
            },
            Stmt::If {
                clauses: vec![IfClause {
                    cond: Some(Expr::Identifier { name: "x".into(), span: span() }),
                    body: Block::new(vec![Stmt::Return {
                        values: vec![Expr::Identifier { name: "x".into(), span: span() }],
                        span: span(),
                    }]),
                    span: span(),
                }],
                span: span(),
            },
        ]);

        let proto = emitter.compile_chunk(&block).unwrap();
        assert!(proto.is_vararg);
        assert_eq!(proto.nparams, 0);
        assert!(!proto.instructions.is_empty());
        assert_eq!(proto.instructions.last().unwrap().ins.op, Opcode::Ret0);
    }
}

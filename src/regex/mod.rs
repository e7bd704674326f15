//! Regex front-end: parses a pattern with `regex-syntax`, compiles it to a
//! flat [`program::Program`], then lowers that into an [`crate::nfa::Nfa`].
//!
//! [`create_nfa`] is the single entry point most callers need; [`compiler`]
//! and [`build`] are public for callers who want the intermediate bytecode
//! (e.g. to inspect capture slots before lowering).

pub mod build;
pub mod compiler;
pub mod program;

pub use build::{build_nfa_from_program, create_nfa};
pub use compiler::compile_pattern;
pub use program::{EmptyLook, Inst, Program};

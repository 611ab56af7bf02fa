//! # typeval
//!
//! A typed predicate/expression evaluator for `key=value` monitoring
//! records.
//!
//! Expressions such as `hostname=="node1" && 4 in queues` are tokenized
//! and evaluated against a mutable variable environment; free-form
//! records such as `ncpus=4;physmem=3922492kb;queues=["q1","q2"];` are
//! decoded into the same dynamically-typed value model and can seed
//! that environment.
//!
//! ## Architecture
//!
//! - **Value model**: a tagged union ([`Value`]) over unknown, string,
//!   number, boolean and list, with normalized numbers (`4.0` is `4`).
//! - **Auto-typing decoder**: [`decode_value`] / [`decode_record`] turn
//!   raw text into typed values without a schema.
//! - **Tokenizer**: [`Lexer`], a lazy token stream over expression text.
//! - **Evaluator**: [`evaluate`] parses and runs `;`-separated
//!   statements; [`Evaluator`] wraps an [`Environment`] into a session.
//!
//! Identifier resolution has two modes: *strict* (unbound identifiers
//! fail) and *autodefine* (unbound identifiers are created as unknown
//! and unified with the type they are first used against).
//!
//! Errors abort the current call and are returned as typed
//! [`EvalError`] values; bindings made by statements that already ran
//! are kept. The core does no I/O and no logging.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod environment;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod lexer;
pub mod value;

// Re-export main types
pub use decode::{decode_record, decode_value, encode_record};
pub use environment::Environment;
pub use error::{type_name, EvalError, Result};
pub use eval::{evaluate, unify};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenKind};
pub use value::{Number, Value, ValueKind};

/// typeval version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

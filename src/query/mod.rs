//! Boolean query assembly from retrieved terms.

pub mod assembler;
pub mod boolean;
pub mod compiler;

pub use self::assembler::QueryAssembler;
pub use self::boolean::{BooleanTermQuery, Occur, TermClause};
pub use self::compiler::compile;

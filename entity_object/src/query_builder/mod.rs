//! Statement builder
//!
//! Parameterized CRUD statement construction. Values only ever travel as
//! bound parameters; identifiers are validated before they reach SQL text.

pub mod assignment;
pub mod builder;
pub mod condition;
pub mod pagination;
pub mod sql_generation;
pub mod statement;


pub use assignment::AssignmentSet;
pub use builder::StatementBuilder;
pub use condition::Condition;
pub use pagination::Pagination;
pub use statement::{ParamRole, Statement, StatementKind};

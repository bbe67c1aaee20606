pub mod identifiers;
pub mod mutations;
pub mod selection;

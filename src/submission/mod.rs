pub mod enrich;
pub mod naming;
pub mod parser;

// Edge-list input parser

pub mod edgelist;

pub use edgelist::parse_edgelist;

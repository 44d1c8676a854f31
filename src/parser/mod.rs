//! Parsing of grammar dumps produced by external grammar tooling.

pub(crate) mod dump;

//! Serialize rendered documentation into plain text.
//!
//! Use it like so:
//! ```no_run
//! use gramdoc::grammar::Grammar;
//! use gramdoc::backends::text::TextGenerator;
//!
//! // First, load a grammar from disk
//! let grammar = Grammar::builder()
//!     .parser_grammar("my-parser.json").unwrap()
//!     .build().unwrap();
//!
//! // Then, write the flattened reference document into reference.txt
//! TextGenerator::new().generate("reference.txt", &grammar);
//! ```

mod generator;

pub use generator::TextGenerator;

//! Serialize rendered documentation into XML.
//!
//! Use it like so:
//! ```no_run
//! use gramdoc::grammar::Grammar;
//! use gramdoc::backends::xml::XmlGenerator;
//!
//! // First, load a grammar from disk
//! let grammar = Grammar::builder()
//!     .lexer_grammar("my-lexer.json").unwrap()
//!     .parser_grammar("my-parser.json").unwrap()
//!     .build().unwrap();
//!
//! // Then, write the pretty-printed reference document into reference.xml
//! XmlGenerator::new()
//!     .section_docs("docs/sections")
//!     .generate("reference.xml", &grammar);
//! ```

mod formatter;
mod generator;

pub use generator::XmlGenerator;

//! This library renders context-free grammars into human-readable reference documentation.
//!
//! It consists of
//! - __frontend__: Load grammar dumps produced by external grammar tooling. A dump carries
//!   the rule set of one grammar half (lexer or parser) together with the raw source lines
//!   of the grammar file.
//! - __rendering core__: Walk every rule's operator tree once and compose a structured
//!   document out of it: line breaks where rule bodies grow long, brackets and pipes for
//!   alternations, named sections discovered from source comments, and a cross-reference
//!   block under every declaration that lists who refers to it.
//! - __backends__: Serialize the composed document. Current backends are
//!   - `xml`: A pretty-printed XML document with explicit formatting markers
//!   - `text`: The same structure flattened to plain text
//!
//! ## Getting Started
//! The first step always is to load the grammar halves. To do this use the
//! [`Grammar::builder()`](grammar::Grammar::builder) method that will give you access to a
//! [`GrammarBuilder`](grammar::GrammarBuilder) like this:
//! ```no_run
//! use gramdoc::grammar::Grammar;
//!
//! let grammar = Grammar::builder()
//!     // Load the lexer half of the grammar
//!     .lexer_grammar("my-lexer.json").unwrap()
//!     // And the parser half
//!     .parser_grammar("my-parser.json").unwrap()
//!     // Optionally designate the entry rule
//!     .entrypoint("document")
//!     .build().unwrap();
//! ```
//! Then, you can plug the grammar into one of the provided backends:
//! ```no_run
//! # use gramdoc::grammar::Grammar;
//! # let grammar = Grammar::builder().build().unwrap();
//! use gramdoc::backends::{xml::XmlGenerator, text::TextGenerator};
//!
//! XmlGenerator::new().generate("reference.xml", &grammar);
//! // or
//! TextGenerator::new().generate("reference.txt", &grammar);
//! ```
//! And that's it.

#![deny(missing_docs)]

pub(crate) mod parser;

pub mod error;
pub mod grammar;
pub mod render;
pub mod backends;

//! This is the frontend that loads grammars.
//!
//! Use it like so:
//! ```no_run
//! use gramdoc::grammar::Grammar;
//!
//! let grammar = Grammar::builder()
//!     .lexer_grammar("my-lexer.json").unwrap()
//!     .parser_grammar("my-parser.json").unwrap()
//!     .entrypoint("document")
//!     .build().unwrap();
//! ```
//! You can inspect the grammar contents like this:
//! ```no_run
//! # use gramdoc::grammar::Grammar;
//! # let grammar = Grammar::builder().build().unwrap();
//! // A grammar is two halves: lexer rules and parser rules
//! for rule in grammar.parser_rules() {
//!     // Every rule has a name, a declaration line and an operator tree
//!     println!("rule {} @ line {}", rule.name(), rule.line());
//!     println!("body: {:?}", rule.ast());
//! }
//! ```

mod builder;

pub use builder::*;

/// Distinguishes the two halves of a grammar.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum RuleKind {
    /// A rule that produces tokens
    Lexer,
    /// A rule that produces syntax trees from tokens
    Parser,
}

/// One operator node in the body of a grammar rule.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GrammarNode {
    /// Abstract root marker inserted by the grammar tooling. Carries no content.
    Root,

    /// A semantic predicate. Carries no documentation-visible content.
    Predicate,

    /// An alternation between multiple alternatives.
    Block(Vec<GrammarNode>),

    /// An alternation between single-token alternatives.
    TokenSet(Vec<GrammarNode>),

    /// One alternative: a sequence of elements.
    Alternative(Vec<GrammarNode>),

    /// Zero or one occurrence of the child (`?`).
    Optional {
        /// The repeated expression
        child: Box<GrammarNode>,
        /// Whether matching prefers the longest match
        greedy: bool,
    },

    /// One or more occurrences of the child (`+`).
    OneOrMore {
        /// The repeated expression
        child: Box<GrammarNode>,
        /// Whether matching prefers the longest match
        greedy: bool,
    },

    /// Zero or more occurrences of the child (`*`).
    ZeroOrMore {
        /// The repeated expression
        child: Box<GrammarNode>,
        /// Whether matching prefers the longest match
        greedy: bool,
    },

    /// Negation of the child (`~`).
    Not(Box<GrammarNode>),

    /// A range between two endpoints (`a .. b`).
    Range {
        /// Lower endpoint
        from: Box<GrammarNode>,
        /// Upper endpoint
        to: Box<GrammarNode>,
    },

    /// A reference to another rule by name.
    RuleRef(String),

    /// A literal terminal or a token used by name.
    Terminal(String),

    /// A character set in lexer syntax, without the enclosing brackets.
    CharSet(String),
}

/// A single named production of a grammar.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    fragment: bool,
    line: usize,
    ast: GrammarNode,
}

impl Rule {
    /// Create a rule from its name, fragment flag, 1-based declaration line and body.
    pub fn new<S: Into<String>>(name: S, fragment: bool, line: usize, ast: GrammarNode) -> Self {
        Self {
            name: name.into(),
            fragment,
            line,
            ast,
        }
    }

    /// The name this rule is declared under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a lexer helper rule that never becomes a standalone token.
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// The 1-based source line of the declaration.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The operator tree of the rule body.
    pub fn ast(&self) -> &GrammarNode {
        &self.ast
    }

    /// The literal text of a rule whose body is exactly one terminal, e.g. `PLUS: '+' ;`.
    pub fn single_literal(&self) -> Option<&str> {
        fn unwrap(node: &GrammarNode) -> Option<&str> {
            match node {
                GrammarNode::Terminal(text) => Some(text),
                GrammarNode::Block(children) | GrammarNode::Alternative(children) if children.len() == 1 => {
                    unwrap(&children[0])
                },
                _ => None,
            }
        }

        unwrap(&self.ast)
    }
}

/// A fully loaded grammar: both rule halves plus the raw source lines of each grammar file.
pub struct Grammar {
    lexer_rules: Vec<Rule>,
    parser_rules: Vec<Rule>,
    lexer_source: Vec<String>,
    parser_source: Vec<String>,
    entrypoint: Option<String>,
}

impl Grammar {
    pub(crate) fn new(
        lexer_rules: Vec<Rule>,
        parser_rules: Vec<Rule>,
        lexer_source: Vec<String>,
        parser_source: Vec<String>,
        entrypoint: Option<String>,
    ) -> Self {
        Self {
            lexer_rules,
            parser_rules,
            lexer_source,
            parser_source,
            entrypoint,
        }
    }

    /// Access a [`GrammarBuilder`] to load grammar dumps from disk.
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// The lexer rules in declaration order.
    pub fn lexer_rules(&self) -> &[Rule] {
        &self.lexer_rules
    }

    /// The parser rules in declaration order.
    pub fn parser_rules(&self) -> &[Rule] {
        &self.parser_rules
    }

    /// The raw source lines of the lexer grammar file.
    pub fn lexer_source(&self) -> &[String] {
        &self.lexer_source
    }

    /// The raw source lines of the parser grammar file.
    pub fn parser_source(&self) -> &[String] {
        &self.parser_source
    }

    /// The designated entry rule, if any.
    pub fn entrypoint(&self) -> Option<&str> {
        self.entrypoint.as_deref()
    }
}

use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::{GrammarError, ParsingError},
    grammar::{Grammar, Rule, RuleKind},
    parser::dump,
};

/// The GrammarBuilder loads grammar dumps from disk and returns a unified [`Grammar`].
///
/// Use it like so:
/// ```no_run
/// use gramdoc::grammar::Grammar;
///
/// let grammar = Grammar::builder()
///     // Load the lexer half of the grammar
///     .lexer_grammar("my-lexer.json").unwrap()
///     // And the parser half
///     .parser_grammar("my-parser.json").unwrap()
///     // Optionally designate the entry rule
///     .entrypoint("document")
///     .build().unwrap();
/// ```
pub struct GrammarBuilder {
    lexer_rules: Vec<Rule>,
    parser_rules: Vec<Rule>,
    lexer_source: Vec<String>,
    parser_source: Vec<String>,
    entrypoint: Option<String>,
}

impl GrammarBuilder {
    pub(crate) fn new() -> Self {
        Self {
            lexer_rules: Vec::new(),
            parser_rules: Vec::new(),
            lexer_source: Vec::new(),
            parser_source: Vec::new(),
            entrypoint: None,
        }
    }

    fn check_entrypoint(&self, entrypoint: &str) -> bool {
        for rule in self.lexer_rules.iter().chain(&self.parser_rules) {
            if rule.name() == entrypoint {
                return false;
            }
        }

        true
    }

    fn check_duplicates(&self) -> Option<String> {
        let mut seen = HashSet::new();

        for rule in self.lexer_rules.iter().chain(&self.parser_rules) {
            if !seen.insert(rule.name()) {
                return Some(rule.name().to_string());
            }
        }

        None
    }
}

impl GrammarBuilder {
    /// Load the lexer half of a grammar from a dump produced by the grammar tooling.
    pub fn lexer_grammar<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ParsingError> {
        let mut file = dump::parse_json(path.as_ref())?;

        if file.kind != RuleKind::Lexer {
            return Err(ParsingError::new(path.as_ref(), "Expected a lexer grammar dump"));
        }

        self.lexer_rules.append(&mut file.rules);
        self.lexer_source.append(&mut file.source);
        Ok(self)
    }

    /// Load the parser half of a grammar from a dump produced by the grammar tooling.
    pub fn parser_grammar<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ParsingError> {
        let mut file = dump::parse_json(path.as_ref())?;

        if file.kind != RuleKind::Parser {
            return Err(ParsingError::new(path.as_ref(), "Expected a parser grammar dump"));
        }

        self.parser_rules.append(&mut file.rules);
        self.parser_source.append(&mut file.source);
        Ok(self)
    }

    /// Designate the non-terminal `entrypoint` as the entry rule of the grammar.
    pub fn entrypoint<S: Into<String>>(mut self, entrypoint: S) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    /// Create a [`Grammar`].
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(entrypoint) = &self.entrypoint {
            if self.check_entrypoint(entrypoint) {
                return Err(GrammarError::MissingEntrypoint(entrypoint.clone()));
            }
        }

        if let Some(name) = self.check_duplicates() {
            return Err(GrammarError::DuplicateRule(name));
        }

        Ok(Grammar::new(
            self.lexer_rules,
            self.parser_rules,
            self.lexer_source,
            self.parser_source,
            self.entrypoint,
        ))
    }
}

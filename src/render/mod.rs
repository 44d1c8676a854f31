//! This is the rendering core.
//!
//! It walks every rule of a loaded [`Grammar`](crate::grammar::Grammar) exactly once,
//! composes a [`Document`] out of the visit results and hands that document to one of
//! the [`backends`](crate::backends) for serialization.
//!
//! The composition happens bottom-up: every operator node becomes a deferred emission
//! action plus the text length its rendering will occupy, lengths decide where line
//! breaks go, and whole-rule results carry the section name discovered above their
//! declaration. Cross-references are collected along the way and appended as usages
//! blocks after all rules have been emitted.

mod document;
mod layout;
mod result;
mod section;
mod usage;
mod visitor;

pub use document::{Annotation, DocBlock, Document, Item, ItemId, Marker, Section};

use std::path::PathBuf;

use crate::grammar::{Grammar, RuleKind};
use crate::render::result::Emitter;
use crate::render::section::SectionTracker;
use crate::render::usage::UsageMap;
use crate::render::visitor::TokenIndex;

/// Knobs for one render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory holding optional per-section documentation blurbs, named `<section>.txt`.
    pub section_docs: Option<PathBuf>,

    /// How many lines above a declaration the section marker comment is expected.
    pub section_offset: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            section_docs: None,
            section_offset: 2,
        }
    }
}

/// Render `grammar` into a [`Document`].
///
/// The parser rules are visited first so that the cross-reference index knows which
/// lexer rules are actually used; lexer rules nobody refers to are internal noise
/// and do not appear in the output. In the final document the lexer declarations
/// precede the parser declarations.
pub fn render_document(grammar: &Grammar, options: &RenderOptions) -> Document {
    let mut doc = Document::new();
    let mut usages = UsageMap::new();
    let tokens = TokenIndex::new(grammar);
    let docs_dir = options.section_docs.as_deref();

    for rule in grammar.lexer_rules().iter().chain(grammar.parser_rules()) {
        usages.seed(rule.name());
    }

    let mut parser_tracker = SectionTracker::new(docs_dir);

    for rule in grammar.parser_rules() {
        let result = visitor::visit_rule(rule, RuleKind::Parser, grammar, &tokens, &mut usages, options.section_offset);
        let id = doc.new_item();
        parser_tracker.place(id, result.section_name());

        let mut emitter = Emitter::new(&mut doc, &mut usages, id);
        result.emit(&mut emitter);
    }

    let parser_blocks = parser_tracker.finish();

    // Only lexer rules the parser half refers to are documented
    let documented: Vec<_> = grammar
        .lexer_rules()
        .iter()
        .filter(|rule| usages.is_referenced(rule.name()))
        .collect();

    let mut lexer_tracker = SectionTracker::new(docs_dir);

    for rule in documented {
        let result = visitor::visit_rule(rule, RuleKind::Lexer, grammar, &tokens, &mut usages, options.section_offset);
        let id = doc.new_item();
        lexer_tracker.place(id, result.section_name());

        let mut emitter = Emitter::new(&mut doc, &mut usages, id);
        result.emit(&mut emitter);
    }

    for block in lexer_tracker.finish() {
        doc.push_block(block);
    }

    for block in parser_blocks {
        doc.push_block(block);
    }

    usages.annotate(&mut doc);

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarNode, Rule};

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn token_ref(name: &str) -> GrammarNode {
        GrammarNode::Terminal(name.to_string())
    }

    fn roundtrip_grammar() -> Grammar {
        // ID: [a-zA-Z]+ ;  /  decl: ID ;
        let lexer = vec![Rule::new("ID", false, 1, GrammarNode::OneOrMore {
            child: Box::new(GrammarNode::CharSet("a-zA-Z".to_string())),
            greedy: true,
        })];
        let parser = vec![Rule::new("decl", false, 1, GrammarNode::Block(vec![
            GrammarNode::Alternative(vec![token_ref("ID")]),
        ]))];

        Grammar::new(lexer, parser, Vec::new(), Vec::new(), None)
    }

    fn items<'a>(doc: &'a Document) -> Vec<&'a Item> {
        let mut items = Vec::new();

        for block in doc.blocks() {
            match block {
                DocBlock::Item(id) => items.push(doc.item(*id)),
                DocBlock::Section(section) => {
                    for id in section.items() {
                        items.push(doc.item(*id));
                    }
                },
            }
        }

        items
    }

    #[test]
    fn test_roundtrip() {
        let grammar = roundtrip_grammar();
        let doc = render_document(&grammar, &RenderOptions::default());
        let items = items(&doc);

        assert_eq!(items.len(), 2);

        // Lexer declarations come first
        assert_eq!(items[0].declaration(), "ID");
        assert_eq!(items[1].declaration(), "decl");

        // The parser rule refers to ID by name
        assert!(items[1]
            .description()
            .contains(&Marker::Identifier("ID".to_string())));

        // And ID's declaration carries the usages block listing decl
        assert_eq!(items[0].usages(), ["decl".to_string()]);
        assert!(items[1].usages().is_empty());
    }

    #[test]
    fn test_unreferenced_lexer_rules_are_omitted() {
        let lexer = vec![
            Rule::new("ID", false, 1, GrammarNode::CharSet("a-z".to_string())),
            Rule::new("WS", false, 2, GrammarNode::CharSet(" \\t".to_string())),
        ];
        let parser = vec![Rule::new("decl", false, 1, token_ref("ID"))];
        let grammar = Grammar::new(lexer, parser, Vec::new(), Vec::new(), None);

        let doc = render_document(&grammar, &RenderOptions::default());
        let items = items(&doc);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.declaration() != "WS"));
        assert_eq!(items.iter().filter(|item| item.declaration() == "ID").count(), 1);
    }

    #[test]
    fn test_lexer_only_references_do_not_resurrect() {
        // LETTER is used by ID but by no parser rule, so it stays undocumented
        let lexer = vec![
            Rule::new("ID", false, 1, GrammarNode::OneOrMore {
                child: Box::new(GrammarNode::RuleRef("LETTER".to_string())),
                greedy: true,
            }),
            Rule::new("LETTER", true, 2, GrammarNode::CharSet("a-z".to_string())),
        ];
        let parser = vec![Rule::new("decl", false, 1, token_ref("ID"))];
        let grammar = Grammar::new(lexer, parser, Vec::new(), Vec::new(), None);

        let doc = render_document(&grammar, &RenderOptions::default());
        let items = items(&doc);

        assert!(items.iter().all(|item| item.declaration() != "LETTER"));
    }

    #[test]
    fn test_sections_open_and_inherit() {
        let source = lines(&[
            "// SECTION: Statements",
            "",
            "stmt: 'x' ;",
            "decl: 'y' ;",
            "",
            "// SECTION: Expressions",
            "",
            "expr: 'z' ;",
        ]);
        let parser = vec![
            Rule::new("stmt", false, 3, token_ref("'x'")),
            Rule::new("decl", false, 4, token_ref("'y'")),
            Rule::new("expr", false, 8, token_ref("'z'")),
        ];
        let grammar = Grammar::new(Vec::new(), parser, Vec::new(), source, None);

        let doc = render_document(&grammar, &RenderOptions::default());

        assert_eq!(doc.blocks().len(), 2);
        assert!(matches!(
            &doc.blocks()[0],
            DocBlock::Section(section) if section.name() == "Statements" && section.items().len() == 2
        ));
        assert!(matches!(
            &doc.blocks()[1],
            DocBlock::Section(section) if section.name() == "Expressions" && section.items().len() == 1
        ));
    }

    #[test]
    fn test_usages_deduplicated_across_repeats() {
        // expr refers to ID three times but shows up once in the usages block
        let lexer = vec![Rule::new("ID", false, 1, GrammarNode::CharSet("a-z".to_string()))];
        let parser = vec![Rule::new("expr", false, 1, GrammarNode::Alternative(vec![
            token_ref("ID"),
            token_ref("ID"),
            GrammarNode::RuleRef("ID".to_string()),
        ]))];
        let grammar = Grammar::new(lexer, parser, Vec::new(), Vec::new(), None);

        let doc = render_document(&grammar, &RenderOptions::default());
        let items = items(&doc);

        let id = items.iter().find(|item| item.declaration() == "ID").unwrap();
        assert_eq!(id.usages(), ["expr".to_string()]);
    }

    #[test]
    fn test_entrypoint_annotation_survives_assembly() {
        let parser = vec![
            Rule::new("document", false, 1, GrammarNode::RuleRef("other".to_string())),
            Rule::new("other", false, 2, token_ref("'x'")),
        ];
        let grammar = Grammar::new(Vec::new(), parser, Vec::new(), Vec::new(), Some("document".to_string()));

        let doc = render_document(&grammar, &RenderOptions::default());
        let items = items(&doc);

        assert_eq!(items[0].annotation(), Some(Annotation::Start));
        assert_eq!(items[1].annotation(), None);
        assert_eq!(items[1].usages(), ["document".to_string()]);
    }
}

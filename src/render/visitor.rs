use std::collections::{HashMap, HashSet};

use ahash::RandomState;

use crate::grammar::{Grammar, GrammarNode, Rule, RuleKind};
use crate::render::document::Annotation;
use crate::render::layout;
use crate::render::result::RenderResult;
use crate::render::section;
use crate::render::usage::UsageMap;

/// Lookup tables that resolve terminal text to lexer rule names.
///
/// A terminal either uses a token by name or spells out the literal of a lexer
/// rule like `PLUS: '+' ;`. Both forms should surface the rule name in the docs.
pub(crate) struct TokenIndex {
    names: HashSet<String, RandomState>,
    literals: HashMap<String, String, RandomState>,
}

impl TokenIndex {
    pub(crate) fn new(grammar: &Grammar) -> Self {
        let mut names = HashSet::default();
        let mut literals = HashMap::default();

        for rule in grammar.lexer_rules() {
            names.insert(rule.name().to_string());

            if let Some(literal) = rule.single_literal() {
                literals.entry(literal.to_string()).or_insert_with(|| rule.name().to_string());
            }
        }

        Self {
            names,
            literals,
        }
    }

    fn resolve(&self, text: &str) -> Option<&str> {
        if let Some(name) = self.names.get(text) {
            return Some(name);
        }

        self.literals.get(text).map(String::as_str)
    }
}

/// Traversal context while one rule's subtree is visited. `current_rule` is the
/// name of that rule; it is what ends up in the usage sets of everything the
/// subtree refers to.
struct VisitCtx<'a> {
    tokens: &'a TokenIndex,
    usages: &'a mut UsageMap,
    current_rule: &'a str,
}

fn identifier(name: String) -> RenderResult {
    RenderResult::new(name.len(), Box::new(move |em| em.identifier(name)))
}

fn terminal(text: &str, cx: &mut VisitCtx) -> RenderResult {
    match cx.tokens.resolve(text) {
        Some(name) => {
            let name = name.to_string();
            cx.usages.record_reference(name.as_str(), cx.current_rule);
            identifier(name)
        },
        None => {
            cx.usages.record_reference(text, cx.current_rule);

            let text = text.to_string();
            RenderResult::new(text.len(), Box::new(move |em| em.string(text)))
        },
    }
}

fn chars_set(text: &str) -> RenderResult {
    let text = text.to_string();

    RenderResult::new(
        text.len() + 2,
        Box::new(move |em| {
            em.symbol("[");
            em.string(text);
            em.symbol("]");
        }),
    )
}

fn visit(node: &GrammarNode, nested: bool, cx: &mut VisitCtx) -> RenderResult {
    match node {
        GrammarNode::Root | GrammarNode::Predicate => RenderResult::empty(),
        GrammarNode::Block(alternatives) | GrammarNode::TokenSet(alternatives) => {
            let alternatives = alternatives.iter().map(|alt| visit(alt, true, cx)).collect();
            layout::group_using_pipe(alternatives, nested)
        },
        GrammarNode::Alternative(elements) => {
            let elements = elements
                .iter()
                .map(|element| visit(element, true, cx))
                .filter(|result| result.content_length() > 0)
                .collect();
            layout::join_through_length(elements)
        },
        GrammarNode::Optional { child, greedy } => layout::quantifier(visit(child, true, cx), '?', *greedy),
        GrammarNode::OneOrMore { child, greedy } => layout::quantifier(visit(child, true, cx), '+', *greedy),
        GrammarNode::ZeroOrMore { child, greedy } => layout::quantifier(visit(child, true, cx), '*', *greedy),
        GrammarNode::Not(child) => layout::not(visit(child, true, cx)),
        GrammarNode::Range { from, to } => layout::range(visit(from, true, cx), visit(to, true, cx)),
        GrammarNode::RuleRef(name) => {
            cx.usages.record_reference(name.as_str(), cx.current_rule);
            identifier(name.clone())
        },
        GrammarNode::Terminal(text) => terminal(text, cx),
        GrammarNode::CharSet(text) => chars_set(text),
    }
}

/// Render one whole rule: declaration header, the body prefixed with `:` and
/// suffixed with `;` on their own lines, and the section name found above the
/// declaration, if any.
pub(crate) fn visit_rule(
    rule: &Rule,
    kind: RuleKind,
    grammar: &Grammar,
    tokens: &TokenIndex,
    usages: &mut UsageMap,
    section_offset: usize,
) -> RenderResult {
    let mut cx = VisitCtx {
        tokens,
        usages,
        current_rule: rule.name(),
    };
    let body = visit(rule.ast(), false, &mut cx);

    let source = match kind {
        RuleKind::Lexer => grammar.lexer_source(),
        RuleKind::Parser => grammar.parser_source(),
    };
    let section_name = section::marker_above(source, rule.line(), section_offset).map(str::to_string);

    let annotation = if grammar.entrypoint() == Some(rule.name()) {
        Some(Annotation::Start)
    } else if rule.is_fragment() {
        Some(Annotation::Helper)
    } else {
        None
    };

    let name = rule.name().to_string();
    let length = name.len() + body.content_length() + 8;

    let result = RenderResult::new(
        length,
        Box::new(move |em| {
            let item = em.item();
            em.usages_mut().record_declaration(&name, item);
            em.declare(&name, annotation);

            em.identifier(name);
            em.crlf();
            em.whitespace();
            em.symbol(":");
            em.whitespace();
            body.emit(em);
            em.crlf();
            em.whitespace();
            em.symbol(";");
            em.crlf();
        }),
    );

    result.with_section(section_name)
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use json_comments::{CommentSettings, StripComments};
use serde_json as json;

use crate::{
    error::ParsingError,
    grammar::{GrammarNode, Rule, RuleKind},
};

/// The contents of one grammar dump: which half it is, its rules and the raw
/// source lines of the grammar file it was generated from.
pub(crate) struct GrammarFile {
    pub(crate) kind: RuleKind,
    pub(crate) rules: Vec<Rule>,
    pub(crate) source: Vec<String>,
}

fn required_str<'a>(object: &'a json::Map<String, json::Value>, key: &str) -> Result<&'a str, String> {
    match object.get(key).and_then(json::Value::as_str) {
        Some(value) => Ok(value),
        None => Err(format!("Missing string field '{}'", key)),
    }
}

fn required_child(object: &json::Map<String, json::Value>, key: &str) -> Result<GrammarNode, String> {
    match object.get(key) {
        Some(value) => parse_node(value),
        None => Err(format!("Missing node field '{}'", key)),
    }
}

fn parse_children(object: &json::Map<String, json::Value>) -> Result<Vec<GrammarNode>, String> {
    let children = match object.get("children").and_then(json::Value::as_array) {
        Some(children) => children,
        None => return Err("Missing array field 'children'".to_string()),
    };

    children.iter().map(parse_node).collect()
}

fn parse_node(value: &json::Value) -> Result<GrammarNode, String> {
    let object = match value {
        json::Value::Object(object) => object,
        _ => return Err("Every AST node must be an object".to_string()),
    };

    let kind = required_str(object, "node")?;

    match kind {
        "root" => Ok(GrammarNode::Root),
        "pred" => Ok(GrammarNode::Predicate),
        "block" => Ok(GrammarNode::Block(parse_children(object)?)),
        "set" => Ok(GrammarNode::TokenSet(parse_children(object)?)),
        "alt" => Ok(GrammarNode::Alternative(parse_children(object)?)),
        "opt" | "plus" | "star" => {
            let greedy = object.get("greedy").and_then(json::Value::as_bool).unwrap_or(true);
            let child = Box::new(required_child(object, "child")?);

            Ok(match kind {
                "opt" => GrammarNode::Optional { child, greedy },
                "plus" => GrammarNode::OneOrMore { child, greedy },
                _ => GrammarNode::ZeroOrMore { child, greedy },
            })
        },
        "not" => Ok(GrammarNode::Not(Box::new(required_child(object, "child")?))),
        "range" => Ok(GrammarNode::Range {
            from: Box::new(required_child(object, "from")?),
            to: Box::new(required_child(object, "to")?),
        }),
        "ref" => Ok(GrammarNode::RuleRef(required_str(object, "name")?.to_string())),
        "terminal" => Ok(GrammarNode::Terminal(required_str(object, "text")?.to_string())),
        "charset" => Ok(GrammarNode::CharSet(required_str(object, "text")?.to_string())),
        _ => Err(format!("Unknown node kind: '{}'", kind)),
    }
}

fn parse_rule(value: &json::Value) -> Result<Rule, String> {
    let object = match value {
        json::Value::Object(object) => object,
        _ => return Err("Every rule must be an object".to_string()),
    };

    let name = required_str(object, "name")?;
    let fragment = object.get("fragment").and_then(json::Value::as_bool).unwrap_or(false);

    let line = match object.get("line").and_then(json::Value::as_u64) {
        Some(line) if line > 0 => line as usize,
        _ => return Err(format!("Rule '{}' needs a positive 'line' number", name)),
    };

    let ast = required_child(object, "ast").map_err(|e| format!("In rule '{}': {}", name, e))?;

    Ok(Rule::new(name, fragment, line, ast))
}

fn parse_grammar(value: json::Value) -> Result<GrammarFile, String> {
    let object = match value {
        json::Value::Object(object) => object,
        _ => return Err("A grammar dump must be an object".to_string()),
    };

    let kind = match required_str(&object, "kind")? {
        "lexer" => RuleKind::Lexer,
        "parser" => RuleKind::Parser,
        other => return Err(format!("Grammar kind must be 'lexer' or 'parser', not '{}'", other)),
    };

    let source = match object.get("source") {
        None => Vec::new(),
        Some(json::Value::Array(lines)) => {
            let mut source = Vec::with_capacity(lines.len());

            for line in lines {
                match line.as_str() {
                    Some(line) => source.push(line.to_string()),
                    None => return Err("'source' must be an array of strings".to_string()),
                }
            }

            source
        },
        Some(_) => return Err("'source' must be an array of strings".to_string()),
    };

    let rules = match object.get("rules").and_then(json::Value::as_array) {
        Some(rules) => rules,
        None => return Err("Missing array field 'rules'".to_string()),
    };

    let rules = rules.iter().map(parse_rule).collect::<Result<Vec<Rule>, String>>()?;

    Ok(GrammarFile {
        kind,
        rules,
        source,
    })
}

pub(crate) fn parse_json(path: &Path) -> Result<GrammarFile, ParsingError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return Err(ParsingError::new(path, format!("Could not open file: {}", e)));
        },
    };
    let reader = BufReader::new(file);
    let reader = StripComments::with_settings(CommentSettings::c_style(), reader);

    let value: json::Value = match json::from_reader(reader) {
        Ok(value) => value,
        Err(_) => {
            return Err(ParsingError::new(path, "Invalid JSON syntax"));
        },
    };

    parse_grammar(value).map_err(|e| ParsingError::new(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_lexer() {
        let file = parse_json(Path::new("test-data/grammars/calc-lexer.json")).unwrap();

        assert_eq!(file.kind, RuleKind::Lexer);
        assert_eq!(file.rules.len(), 6);
        assert_eq!(file.source.len(), 13);

        let letter = file.rules.iter().find(|r| r.name() == "LETTER").unwrap();
        assert!(letter.is_fragment());
        assert_eq!(letter.line(), 13);
        assert!(matches!(letter.ast(), GrammarNode::CharSet(_)));
    }

    #[test]
    fn test_calc_parser() {
        let file = parse_json(Path::new("test-data/grammars/calc-parser.json")).unwrap();

        assert_eq!(file.kind, RuleKind::Parser);
        assert_eq!(file.rules[0].name(), "expr");
    }

    #[test]
    fn test_unknown_node_kind() {
        let result = parse_grammar(json::json!({
            "kind": "parser",
            "rules": [
                { "name": "a", "line": 1, "ast": { "node": "frobnicate" } }
            ]
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_line() {
        let result = parse_grammar(json::json!({
            "kind": "parser",
            "rules": [
                { "name": "a", "ast": { "node": "root" } }
            ]
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(parse_json(Path::new("test-data/grammars/no-such-dump.json")).is_err());
    }
}

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::grammar::Grammar;
use crate::render::{render_document, DocBlock, Document, Item, Marker, RenderOptions};

fn flatten_item(item: &Item, out: &mut String) {
    for marker in item.description() {
        match marker {
            Marker::Whitespace => out.push(' '),
            Marker::Crlf => out.push('\n'),
            Marker::Symbol(text) | Marker::Str(text) | Marker::Identifier(text) => out.push_str(text),
        }
    }

    if !item.usages().is_empty() {
        out.push_str("used by: ");
        out.push_str(&item.usages().iter().join(", "));
        out.push('\n');
    }

    out.push('\n');
}

fn flatten_document(doc: &Document) -> String {
    let mut out = String::new();

    for block in doc.blocks() {
        match block {
            DocBlock::Item(id) => flatten_item(doc.item(*id), &mut out),
            DocBlock::Section(section) => {
                out.push_str(&format!("==== {} ====\n", section.name()));

                if let Some(blurb) = section.doc() {
                    out.push_str(blurb);
                    out.push('\n');
                }

                out.push('\n');

                for id in section.items() {
                    flatten_item(doc.item(*id), &mut out);
                }
            },
        }
    }

    out
}

/// This is the main struct of the [`text`](crate::backends::text) backend that renders the
/// grammar and flattens the result to plain text.
pub struct TextGenerator {
    options: RenderOptions,
}

impl TextGenerator {
    /// Create a new TextGenerator.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }

    /// Read optional per-section documentation blurbs from `dir`.
    ///
    /// Default: disabled
    pub fn section_docs<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.options.section_docs = Some(dir.into());
        self
    }

    /// Expect section marker comments `offset` lines above a rule's declaration.
    ///
    /// Default: `2`
    pub fn section_offset(mut self, offset: usize) -> Self {
        self.options.section_offset = offset;
        self
    }

    /// Render `grammar` and write the text document into the output file `path`.
    pub fn generate<P: AsRef<Path>>(self, path: P, grammar: &Grammar) {
        let doc = render_document(grammar, &self.options);
        let mut outfile = File::create(path.as_ref()).expect("Could not create output file");

        outfile
            .write_all(flatten_document(&doc).as_bytes())
            .expect("Could not write to output file");
    }
}

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backends::xml::formatter::{escape_attr, escape_text, XmlFormatter};
use crate::grammar::Grammar;
use crate::render::{render_document, Annotation, DocBlock, Document, Item, Marker, RenderOptions, Section};

fn write_marker<T: Write>(marker: &Marker, fmt: &mut XmlFormatter<T>) {
    match marker {
        Marker::Whitespace => fmt.write("<whitespace/>"),
        Marker::Crlf => fmt.write("<crlf/>"),
        Marker::Symbol(text) => fmt.write(format!("<symbol>{}</symbol>", escape_text(text))),
        Marker::Str(text) => fmt.write(format!("<string>{}</string>", escape_text(text))),
        Marker::Identifier(text) => fmt.write(format!("<identifier>{}</identifier>", escape_text(text))),
    }
}

fn write_item<T: Write>(item: &Item, fmt: &mut XmlFormatter<T>) {
    let declaration = escape_attr(item.declaration());

    match item.annotation() {
        Some(Annotation::Start) => fmt.write(format!("<item declaration=\"{}\" annotation=\"start\">", declaration)),
        Some(Annotation::Helper) => fmt.write(format!("<item declaration=\"{}\" annotation=\"helper\">", declaration)),
        None => fmt.write(format!("<item declaration=\"{}\">", declaration)),
    }

    fmt.indent();
    fmt.write("<description>");
    fmt.indent();

    for marker in item.description() {
        write_marker(marker, fmt);
    }

    fmt.unindent();
    fmt.write("</description>");

    if !item.usages().is_empty() {
        fmt.write("<usages>");
        fmt.indent();

        for name in item.usages() {
            fmt.write(format!("<usage declaration=\"{}\"/>", escape_attr(name)));
        }

        fmt.unindent();
        fmt.write("</usages>");
    }

    fmt.unindent();
    fmt.write("</item>");
}

fn write_section<T: Write>(section: &Section, doc: &Document, fmt: &mut XmlFormatter<T>) {
    fmt.write(format!("<set name=\"{}\">", escape_attr(section.name())));
    fmt.indent();

    if let Some(blurb) = section.doc() {
        fmt.write(format!("<doc>{}</doc>", escape_text(blurb)));
    }

    for id in section.items() {
        write_item(doc.item(*id), fmt);
    }

    fmt.unindent();
    fmt.write("</set>");
}

fn write_document<T: Write>(doc: &Document, fmt: &mut XmlFormatter<T>) {
    fmt.write("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    fmt.write("<tokens>");
    fmt.indent();

    for block in doc.blocks() {
        match block {
            DocBlock::Item(id) => write_item(doc.item(*id), fmt),
            DocBlock::Section(section) => write_section(section, doc, fmt),
        }
    }

    fmt.unindent();
    fmt.write("</tokens>");
}

/// This is the main struct of the [`xml`](crate::backends::xml) backend that renders the
/// grammar and serializes the result as a pretty-printed XML document.
pub struct XmlGenerator {
    options: RenderOptions,
}

impl XmlGenerator {
    /// Create a new XmlGenerator.
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

    /// Render `grammar` and write the XML document into the output file `path`.
    pub fn generate<P: AsRef<Path>>(self, path: P, grammar: &Grammar) {
        let doc = render_document(grammar, &self.options);
        let outfile = File::create(path.as_ref()).expect("Could not create output file");
        let mut fmt = XmlFormatter::new(outfile);

        write_document(&doc, &mut fmt);
    }
}

/// Handle to an item in a [`Document`].
///
/// The handle stays valid for the lifetime of the document, so content can still be
/// appended to an item after the main emission pass has completed.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct ItemId(usize);

/// Extra classification attached to a declaration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Annotation {
    /// The rule is the designated entry rule of the grammar
    Start,

    /// The rule is a lexer fragment usable only from other lexer rules
    Helper,
}

/// One formatting marker inside a rendered rule body.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Marker {
    /// A single space
    Whitespace,

    /// A line break
    Crlf,

    /// Grammar punctuation like `:`, `|` or `~`
    Symbol(String),

    /// A literal terminal or character-set text
    Str(String),

    /// A cross-linkable rule or token name
    Identifier(String),
}

impl Marker {
    /// The number of characters this marker occupies in flattened text form.
    pub fn cost(&self) -> usize {
        match self {
            Marker::Whitespace | Marker::Crlf => 1,
            Marker::Symbol(text) | Marker::Str(text) | Marker::Identifier(text) => text.len(),
        }
    }
}

/// One rendered rule declaration.
#[derive(Debug, Default)]
pub struct Item {
    declaration: String,
    annotation: Option<Annotation>,
    description: Vec<Marker>,
    usages: Vec<String>,
}

impl Item {
    /// The name of the declared rule.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// The classification of the declared rule, if any.
    pub fn annotation(&self) -> Option<Annotation> {
        self.annotation
    }

    /// The formatting markers that make up the rendered rule.
    pub fn description(&self) -> &[Marker] {
        &self.description
    }

    /// The names of the rules that refer to this declaration.
    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    pub(crate) fn set_declaration(&mut self, name: &str, annotation: Option<Annotation>) {
        self.declaration = name.to_string();
        self.annotation = annotation;
    }

    pub(crate) fn push_marker(&mut self, marker: Marker) {
        self.description.push(marker);
    }

    pub(crate) fn set_usages(&mut self, usages: Vec<String>) {
        self.usages = usages;
    }
}

/// A named group of consecutive declarations.
#[derive(Debug)]
pub struct Section {
    name: String,
    doc: Option<String>,
    items: Vec<ItemId>,
}

impl Section {
    pub(crate) fn new(name: String, doc: Option<String>) -> Self {
        Self {
            name,
            doc,
            items: Vec::new(),
        }
    }

    /// The section name from the source comment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The prose blurb loaded for this section, if one was found.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The declarations grouped under this section.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub(crate) fn push(&mut self, item: ItemId) {
        self.items.push(item);
    }
}

/// Top-level building block of a document.
#[derive(Debug)]
pub enum DocBlock {
    /// A declaration outside of any section
    Item(ItemId),

    /// A named section and the declarations grouped under it
    Section(Section),
}

/// The fully composed documentation artifact.
///
/// Items live in an arena indexed by [`ItemId`] while the block list determines
/// the order they appear in. Backends serialize this structure.
#[derive(Debug, Default)]
pub struct Document {
    items: Vec<Item>,
    blocks: Vec<DocBlock>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level blocks in output order.
    pub fn blocks(&self) -> &[DocBlock] {
        &self.blocks
    }

    /// Access the item behind a handle.
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.0]
    }

    pub(crate) fn new_item(&mut self) -> ItemId {
        let id = ItemId(self.items.len());
        self.items.push(Item::default());
        id
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> &mut Item {
        &mut self.items[id.0]
    }

    pub(crate) fn push_block(&mut self, block: DocBlock) {
        self.blocks.push(block);
    }
}

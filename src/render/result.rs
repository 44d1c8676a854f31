use crate::render::document::{Annotation, Document, ItemId, Marker};
use crate::render::usage::UsageMap;

/// The output-building context that deferred emission actions run against.
///
/// All markers go into the description of the item the emitter currently points at.
pub struct Emitter<'a> {
    doc: &'a mut Document,
    usages: &'a mut UsageMap,
    item: ItemId,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(doc: &'a mut Document, usages: &'a mut UsageMap, item: ItemId) -> Self {
        Self {
            doc,
            usages,
            item,
        }
    }

    pub(crate) fn item(&self) -> ItemId {
        self.item
    }

    pub(crate) fn usages_mut(&mut self) -> &mut UsageMap {
        self.usages
    }

    pub(crate) fn declare(&mut self, name: &str, annotation: Option<Annotation>) {
        self.doc.item_mut(self.item).set_declaration(name, annotation);
    }

    pub(crate) fn marker(&mut self, marker: Marker) {
        self.doc.item_mut(self.item).push_marker(marker);
    }

    pub(crate) fn whitespace(&mut self) {
        self.marker(Marker::Whitespace);
    }

    pub(crate) fn crlf(&mut self) {
        self.marker(Marker::Crlf);
    }

    pub(crate) fn symbol<S: Into<String>>(&mut self, text: S) {
        self.marker(Marker::Symbol(text.into()));
    }

    pub(crate) fn string<S: Into<String>>(&mut self, text: S) {
        self.marker(Marker::Str(text.into()));
    }

    pub(crate) fn identifier<S: Into<String>>(&mut self, text: S) {
        self.marker(Marker::Identifier(text.into()));
    }
}

/// Deferred emission action of a [`RenderResult`].
pub(crate) type EmitFn = Box<dyn FnOnce(&mut Emitter)>;

/// The value every visitor operation produces.
///
/// `content_length` is the flattened text length the rendered subtree will occupy.
/// It is computed bottom-up, used purely for layout decisions and never read back
/// from emitted output. The deferred action produces the actual markers; its summed
/// marker cost always equals `content_length`.
pub struct RenderResult {
    content_length: usize,
    section_name: Option<String>,
    emit: EmitFn,
}

impl RenderResult {
    pub(crate) fn new(content_length: usize, emit: EmitFn) -> Self {
        Self {
            content_length,
            section_name: None,
            emit,
        }
    }

    /// A zero-length result that emits nothing.
    pub(crate) fn empty() -> Self {
        Self::new(0, Box::new(|_| {}))
    }

    /// The flattened text length of the rendered subtree.
    pub(crate) fn content_length(&self) -> usize {
        self.content_length
    }

    /// The section this rule opens, if a marker comment was found above its declaration.
    pub(crate) fn section_name(&self) -> Option<&str> {
        self.section_name.as_deref()
    }

    pub(crate) fn with_section(mut self, section_name: Option<String>) -> Self {
        self.section_name = section_name;
        self
    }

    /// Run the deferred emission action.
    pub(crate) fn emit(self, emitter: &mut Emitter) {
        (self.emit)(emitter);
    }
}

#[cfg(test)]
pub(crate) fn collect_markers(result: RenderResult) -> Vec<Marker> {
    let mut doc = Document::new();
    let mut usages = UsageMap::new();
    let item = doc.new_item();

    let mut emitter = Emitter::new(&mut doc, &mut usages, item);
    result.emit(&mut emitter);

    doc.item(item).description().to_vec()
}

#[cfg(test)]
pub(crate) fn marker_cost(markers: &[Marker]) -> usize {
    markers.iter().map(Marker::cost).sum()
}

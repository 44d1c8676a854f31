use std::path::Path;

use log::debug;

use crate::render::document::{DocBlock, ItemId, Section};

/// Extract the section name from a marker comment like `// SECTION: Literals`.
fn section_marker(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("//")?;
    let name = rest.trim_start().strip_prefix("SECTION:")?.trim();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Look up the section marker a fixed number of lines above a declaration.
/// `line` is the 1-based declaration line within `source`.
pub(crate) fn marker_above(source: &[String], line: usize, offset: usize) -> Option<&str> {
    let idx = line.checked_sub(offset + 1)?;
    section_marker(source.get(idx)?)
}

/// Load the optional prose blurb for section `name` from `<docs_dir>/<name>.txt`.
/// A missing file is not an error, the section just renders without a blurb.
fn section_doc(docs_dir: Option<&Path>, name: &str) -> Option<String> {
    let path = docs_dir?.join(format!("{}.txt", name));

    match std::fs::read_to_string(&path) {
        Ok(text) => Some(text.trim().to_string()),
        Err(_) => {
            debug!("No documentation blurb for section '{}' at {}", name, path.display());
            None
        },
    }
}

/// Groups a run of declarations under the most recently opened section.
///
/// A rule carrying a section name opens a new container unless that section is
/// already open; rules without one inherit whatever container is current.
pub(crate) struct SectionTracker<'a> {
    docs_dir: Option<&'a Path>,
    blocks: Vec<DocBlock>,
    current: Option<Section>,
}

impl<'a> SectionTracker<'a> {
    pub(crate) fn new(docs_dir: Option<&'a Path>) -> Self {
        Self {
            docs_dir,
            blocks: Vec::new(),
            current: None,
        }
    }

    pub(crate) fn place(&mut self, item: ItemId, section_name: Option<&str>) {
        if let Some(name) = section_name {
            let same = matches!(&self.current, Some(section) if section.name() == name);

            if !same {
                self.flush();
                self.current = Some(Section::new(name.to_string(), section_doc(self.docs_dir, name)));
            }
        }

        match &mut self.current {
            Some(section) => section.push(item),
            None => self.blocks.push(DocBlock::Item(item)),
        }
    }

    fn flush(&mut self) {
        if let Some(section) = self.current.take() {
            self.blocks.push(DocBlock::Section(section));
        }
    }

    pub(crate) fn finish(mut self) -> Vec<DocBlock> {
        self.flush();
        self.blocks
    }
}

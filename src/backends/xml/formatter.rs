use std::io::{BufWriter, Write};

pub struct XmlFormatter<T: Write> {
    stream: BufWriter<T>,
    indentation: usize,
}

impl<T> XmlFormatter<T>
where
    T: Write,
{
    pub fn new(writer: T) -> Self {
        Self {
            stream: BufWriter::new(writer),
            indentation: 0,
        }
    }

    pub fn indent(&mut self) {
        self.indentation += 4;
    }

    pub fn unindent(&mut self) {
        if self.indentation > 0 {
            self.indentation -= 4;
        }
    }

    pub fn write<S: AsRef<str>>(&mut self, line: S) {
        writeln!(&mut self.stream, "{:width$}{}", "", line.as_ref(), width = self.indentation).expect("Could not write to outfile");
    }
}

/// Escape text for use inside an XML element.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Escape text for use inside a double-quoted XML attribute.
pub fn escape_attr(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

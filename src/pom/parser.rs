//! Streaming, path-aware descriptor reader.
//!
//! [`parse_document`] walks an XML document with `quick-xml` and keeps two stacks: the
//! element path from the root to the current element, and one text buffer per open
//! element. Character data only ever lands in the innermost buffer, so a child's text
//! cannot bleed into its parent's. On every element close the visitor sees the path
//! (still including the closing element) and the text gathered directly inside it.

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use crate::core::PomError;

/// Read-only view of the parse position handed to visitors on element close.
#[derive(Debug, Clone, Copy)]
pub struct ParseView<'a> {
    path: &'a [String],
    text: &'a str,
}

impl<'a> ParseView<'a> {
    /// Element names from the document root down to the current element.
    pub fn path(&self) -> &'a [String] {
        self.path
    }

    /// Depth of the current element, the root being 1.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// True when the path is exactly `expected`.
    pub fn path_is(&self, expected: &[&str]) -> bool {
        self.path.len() == expected.len() && self.path_starts_with(expected)
    }

    /// True when the path begins with `prefix`.
    pub fn path_starts_with(&self, prefix: &[&str]) -> bool {
        self.path.len() >= prefix.len() && self.path.iter().zip(prefix).all(|(a, b)| a == b)
    }

    /// True when the path ends with `suffix`.
    pub fn path_ends_with(&self, suffix: &[&str]) -> bool {
        self.path.len() >= suffix.len()
            && self.path[self.path.len() - suffix.len()..].iter().zip(suffix).all(|(a, b)| a == b)
    }

    /// Name of the element `n` levels above the current one (0 is the current element).
    pub fn ancestor(&self, n: usize) -> Option<&'a str> {
        self.path.len().checked_sub(n + 1).map(|i| self.path[i].as_str())
    }

    /// Text accumulated directly inside the current element, untrimmed.
    pub fn raw_text(&self) -> &'a str {
        self.text
    }

    /// Text accumulated directly inside the current element, trimmed.
    pub fn text(&self) -> &'a str {
        self.text.trim()
    }
}

/// Receives element-close callbacks from [`parse_document`].
pub trait ElementVisitor {
    /// Called before the closing element is popped from the path.
    fn end_element(&mut self, name: &str, view: &ParseView<'_>);
}

/// Path and text stacks for one document.
#[derive(Debug, Default)]
struct PathTracker {
    path: Vec<String>,
    text: String,
    text_stack: Vec<String>,
}

impl PathTracker {
    fn open(&mut self, name: String) {
        self.text_stack.push(std::mem::take(&mut self.text));
        self.path.push(name);
    }

    fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Notify the visitor and pop. Returns false if no element was open.
    fn close(&mut self, visitor: &mut dyn ElementVisitor) -> bool {
        let Some(name) = self.path.last().cloned() else {
            return false;
        };
        visitor.end_element(
            &name,
            &ParseView {
                path: &self.path,
                text: &self.text,
            },
        );
        self.path.pop();
        self.text = self.text_stack.pop().unwrap_or_default();
        true
    }
}

fn byte_offset<T: TryInto<usize>>(position: T) -> Option<usize> {
    position.try_into().ok()
}

fn element_name(local_name: &[u8]) -> String {
    String::from_utf8_lossy(local_name).into_owned()
}

/// Attribute values are never read, but their syntax still has to be valid.
fn check_attributes(start: &BytesStart<'_>) -> Result<(), AttrError> {
    let mut attributes = start.attributes();
    attributes.with_checks(true);
    attributes.try_for_each(|attribute| attribute.map(drop))
}

/// Parse `content` (read from `source`) and drive `visitor` over every element close.
///
/// Element names are taken without namespace prefix. The whole document is consumed
/// before returning; any syntax error aborts with [`PomError::MalformedDocument`] naming
/// `source`. Besides tag nesting this rejects a second root element, text outside the
/// root, and malformed or duplicate attributes.
pub fn parse_document(
    source: &Path,
    content: &str,
    visitor: &mut dyn ElementVisitor,
) -> Result<(), PomError> {
    let mut reader = Reader::from_str(content);
    let mut tracker = PathTracker::default();
    let mut seen_root = false;

    let malformed = |diagnostic: String, offset: Option<usize>| {
        PomError::malformed(source, diagnostic, content, offset)
    };

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(e.to_string(), byte_offset(reader.error_position())))?;
        match event {
            Event::Start(e) | Event::Empty(e) if tracker.path.is_empty() && seen_root => {
                let name = element_name(e.local_name().as_ref());
                return Err(malformed(
                    format!("second root element <{name}>"),
                    byte_offset(reader.buffer_position()),
                ));
            }
            Event::Start(e) => {
                check_attributes(&e).map_err(|err| {
                    malformed(err.to_string(), byte_offset(reader.buffer_position()))
                })?;
                seen_root = true;
                tracker.open(element_name(e.local_name().as_ref()));
            }
            Event::Empty(e) => {
                check_attributes(&e).map_err(|err| {
                    malformed(err.to_string(), byte_offset(reader.buffer_position()))
                })?;
                seen_root = true;
                tracker.open(element_name(e.local_name().as_ref()));
                tracker.close(visitor);
            }
            Event::End(_) => {
                if !tracker.close(visitor) {
                    return Err(malformed(
                        "closing tag without matching opening tag".to_string(),
                        byte_offset(reader.buffer_position()),
                    ));
                }
            }
            Event::Text(e) if tracker.path.is_empty() => {
                if !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(malformed(
                        "text outside the root element".to_string(),
                        byte_offset(reader.buffer_position()),
                    ));
                }
            }
            Event::CData(_) if tracker.path.is_empty() => {
                return Err(malformed(
                    "character data outside the root element".to_string(),
                    byte_offset(reader.buffer_position()),
                ));
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| {
                    malformed(err.to_string(), byte_offset(reader.buffer_position()))
                })?;
                tracker.append(&text);
            }
            Event::CData(e) => {
                tracker.append(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = tracker.path.last() {
        return Err(malformed(
            format!("unclosed element <{open}> at end of document"),
            byte_offset(reader.buffer_position()),
        ));
    }
    if !seen_root {
        return Err(malformed("no element found".to_string(), None));
    }
    Ok(())
}

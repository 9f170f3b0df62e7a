//! Builds a rowan document tree from XML text.
//!
//! quick-xml drives the scan and decides where each piece of markup begins
//! and ends; this module only slices those spans into tokens and nests them.
//! The tree is lossless: concatenating every token reproduces the input, so
//! token ranges are valid source offsets.

use quick_xml::Reader;
use quick_xml::events::Event;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};
use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if the document was well formed
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Build a document tree from XML text.
///
/// Never fails: malformed input still yields a complete tree, with the
/// unreadable tail kept as an `ERROR` token and the problem reported in
/// [`Parse::errors`].
pub fn parse_document(text: &str) -> Parse {
    let mut builder = TreeBuilder::new(text);
    builder.run();
    builder.finish()
}

struct TreeBuilder<'a> {
    text: &'a str,
    builder: GreenNodeBuilder<'static>,
    /// Names of the tags that are currently open, innermost last
    open_tags: Vec<SmolStr>,
    errors: Vec<SyntaxError>,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            builder: GreenNodeBuilder::new(),
            open_tags: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(&mut self) {
        let text = self.text;
        self.builder.start_node(SyntaxKind::DOCUMENT.into());

        // The reader skips a byte order mark without counting it, so it only
        // ever sees the text after one and its positions are shifted back.
        let bom = if text.starts_with(BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len_utf8()
        } else {
            0
        };
        self.token(SyntaxKind::PROLOG, &text[..bom]);

        let mut reader = Reader::from_str(&text[bom..]);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = false;

        let mut last = bom;
        loop {
            let event = reader.read_event();
            let pos = (bom + reader.buffer_position() as usize).min(text.len());

            match event {
                Ok(Event::Eof) => break,
                Ok(Event::Start(_)) => {
                    let raw = &text[last..pos];
                    self.builder.start_node(SyntaxKind::TAG.into());
                    let name = self.markup(SyntaxKind::TAG_HEADER, raw);
                    self.open_tags.push(name);
                }
                Ok(Event::Empty(_)) => {
                    let raw = &text[last..pos];
                    self.builder.start_node(SyntaxKind::TAG.into());
                    self.markup(SyntaxKind::TAG_HEADER, raw);
                    self.builder.finish_node();
                }
                Ok(Event::End(_)) => {
                    let raw = &text[last..pos];
                    self.close_tag(raw, last);
                }
                Ok(Event::Text(_)) => self.text_run(&text[last..pos]),
                Ok(Event::CData(_)) => self.token(SyntaxKind::CDATA, &text[last..pos]),
                Ok(Event::Comment(_)) => self.token(SyntaxKind::COMMENT, &text[last..pos]),
                Ok(_) => self.token(SyntaxKind::PROLOG, &text[last..pos]),
                Err(err) => {
                    let at = offset((bom + reader.error_position() as usize).min(text.len()));
                    self.errors.push(SyntaxError::new(
                        format!("malformed markup: {err}"),
                        TextRange::new(offset(last), at.max(offset(last))),
                    ));
                    self.token(SyntaxKind::ERROR, &text[last..]);
                    last = text.len();
                    break;
                }
            }
            last = pos;
        }

        if last < text.len() {
            self.token(SyntaxKind::ERROR, &text[last..]);
        }

        while let Some(name) = self.open_tags.pop() {
            self.errors.push(SyntaxError::new(
                format!("unclosed tag <{name}>"),
                TextRange::empty(offset(text.len())),
            ));
            self.builder.finish_node();
        }

        self.builder.finish_node();
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn token(&mut self, kind: SyntaxKind, text: &str) {
        if !text.is_empty() {
            self.builder.token(kind.into(), text);
        }
    }

    fn close_tag(&mut self, raw: &str, start: usize) {
        let range = TextRange::new(offset(start), offset(start + raw.len()));
        match self.open_tags.pop() {
            Some(open) => {
                let name = self.markup(SyntaxKind::TAG_FOOTER, raw);
                if name != open {
                    self.errors.push(SyntaxError::new(
                        format!("expected </{open}>, found </{name}>"),
                        range,
                    ));
                }
                self.builder.finish_node();
            }
            None => {
                self.errors
                    .push(SyntaxError::new("closing tag without opening tag", range));
                self.markup(SyntaxKind::TAG_FOOTER, raw);
            }
        }
    }

    /// Character data: surrounding whitespace is split into trivia so the
    /// TEXT token carries exactly the value a reference is made of.
    fn text_run(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            self.token(SyntaxKind::WHITESPACE, raw);
            return;
        }
        let lead = raw.len() - raw.trim_start().len();
        let tail = lead + value.len();
        self.token(SyntaxKind::WHITESPACE, &raw[..lead]);
        self.token(SyntaxKind::TEXT, value);
        self.token(SyntaxKind::WHITESPACE, &raw[tail..]);
    }

    /// Lex a header or footer (`<name a="b">`, `</name>`) into a node of
    /// `kind`, returning the tag name.
    fn markup(&mut self, kind: SyntaxKind, raw: &str) -> SmolStr {
        self.builder.start_node(kind.into());

        let mut pos = 0;
        if raw.starts_with("</") {
            self.token(SyntaxKind::L_ANGLE_SLASH, "</");
            pos = 2;
        } else if raw.starts_with('<') {
            self.token(SyntaxKind::L_ANGLE, "<");
            pos = 1;
        }

        let name_end = scan(raw, pos, is_name_byte);
        let name = SmolStr::new(&raw[pos..name_end]);
        self.token(SyntaxKind::IDENTIFIER, &raw[pos..name_end]);
        pos = name_end;

        while pos < raw.len() {
            let rest = &raw[pos..];
            let byte = raw.as_bytes()[pos];
            if byte.is_ascii_whitespace() {
                let end = scan(raw, pos, |b| b.is_ascii_whitespace());
                self.token(SyntaxKind::WHITESPACE, &raw[pos..end]);
                pos = end;
            } else if rest.starts_with("/>") {
                self.token(SyntaxKind::SLASH_R_ANGLE, "/>");
                pos += 2;
            } else if byte == b'>' {
                self.token(SyntaxKind::R_ANGLE, ">");
                pos += 1;
            } else if is_name_byte(byte) {
                pos = self.attribute(raw, pos);
            } else {
                let width = rest.chars().next().map_or(1, char::len_utf8);
                self.token(SyntaxKind::ERROR, &raw[pos..pos + width]);
                pos += width;
            }
        }

        self.builder.finish_node();
        name
    }

    fn attribute(&mut self, raw: &str, start: usize) -> usize {
        let bytes = raw.as_bytes();
        self.builder.start_node(SyntaxKind::ATTRIBUTE.into());

        let name_end = scan(raw, start, is_name_byte);
        self.token(SyntaxKind::IDENTIFIER, &raw[start..name_end]);
        let mut pos = name_end;

        let eq_at = scan(raw, pos, |b| b.is_ascii_whitespace());
        if bytes.get(eq_at) == Some(&b'=') {
            self.token(SyntaxKind::WHITESPACE, &raw[pos..eq_at]);
            self.token(SyntaxKind::EQ, "=");
            pos = eq_at + 1;

            let value_at = scan(raw, pos, |b| b.is_ascii_whitespace());
            self.token(SyntaxKind::WHITESPACE, &raw[pos..value_at]);
            pos = value_at;

            let value_end = match bytes.get(pos) {
                Some(&quote @ (b'"' | b'\'')) => raw[pos + 1..]
                    .find(quote as char)
                    .map_or(raw.len(), |close| pos + 1 + close + 1),
                _ => scan(raw, pos, |b| !b.is_ascii_whitespace() && b != b'>'),
            };
            self.token(SyntaxKind::STRING, &raw[pos..value_end]);
            pos = value_end;
        }

        self.builder.finish_node();
        pos
    }
}

const BYTE_ORDER_MARK: char = '\u{FEFF}';

fn offset(pos: usize) -> TextSize {
    TextSize::new(pos as u32)
}

fn is_name_byte(byte: u8) -> bool {
    !byte.is_ascii_whitespace() && !matches!(byte, b'=' | b'>' | b'/' | b'<' | b'"' | b'\'')
}

/// Advance from `start` while `pred` holds, returning the first
/// non-matching byte position. Only ASCII bytes ever stop a scan, so the
/// result is always a char boundary.
fn scan(raw: &str, start: usize, pred: impl Fn(u8) -> bool) -> usize {
    raw.as_bytes()[start..]
        .iter()
        .position(|&b| !pred(b))
        .map_or(raw.len(), |len| start + len)
}

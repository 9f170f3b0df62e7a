//! A parsed document held by the analysis layer.

use std::path::{Path, PathBuf};

use crate::base::{LineCol, LineIndex, TextSize};
use crate::syntax::{GreenNode, SyntaxError, SyntaxKind, SyntaxNode, SyntaxToken, parse_document};

/// One def document: its tree, parse errors and line table.
///
/// Only the green tree is stored, so documents can be shared across threads;
/// red nodes are rebuilt on demand.
#[derive(Clone, Debug)]
pub struct Document {
    path: PathBuf,
    green: GreenNode,
    errors: Vec<SyntaxError>,
    line_index: LineIndex,
}

impl Document {
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        let parse = parse_document(text);
        if !parse.ok() {
            tracing::debug!("{} parsed with {} errors", path.display(), parse.errors.len());
        }
        Self {
            path,
            green: parse.green,
            errors: parse.errors,
            line_index: LineIndex::new(text),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.line_index.line_col(offset)
    }

    /// The token at `offset`.
    ///
    /// At a boundary between two tokens the one that can carry a reference
    /// wins, so a cursor right after `Wall` in `<defName>Wall</defName>`
    /// still lands on `Wall`.
    pub fn token_at(&self, offset: TextSize) -> Option<SyntaxToken> {
        let root = self.syntax();
        if offset > root.text_range().end() {
            return None;
        }
        root.token_at_offset(offset).max_by_key(|token| {
            matches!(
                token.kind(),
                SyntaxKind::TEXT | SyntaxKind::STRING | SyntaxKind::IDENTIFIER
            )
        })
    }
}

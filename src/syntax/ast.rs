//! Typed wrappers over the untyped rowan tree.
//!
//! Each struct wraps a SyntaxNode and provides accessors for the pieces the
//! resolution rules read: tag names, attributes and character data.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Document, DOCUMENT);
ast_node!(Tag, TAG);
ast_node!(TagHeader, TAG_HEADER);
ast_node!(Attribute, ATTRIBUTE);

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

impl Document {
    /// The outermost tag (`<Defs>` in a def file).
    pub fn root_tag(&self) -> Option<Tag> {
        self.0.children().find_map(Tag::cast)
    }

    /// Every tag in the document, in source order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + use<> {
        self.0.descendants().filter_map(Tag::cast)
    }
}

impl Tag {
    pub fn header(&self) -> Option<TagHeader> {
        self.0.children().find_map(TagHeader::cast)
    }

    /// The identifier token naming this tag, taken from its header.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        self.header()?.name_token()
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.name_token().map(|t| SmolStr::new(t.text()))
    }

    /// The enclosing tag, if this is not the outermost one.
    pub fn parent_tag(&self) -> Option<Tag> {
        self.0.parent().and_then(Tag::cast)
    }

    pub fn child_tags(&self) -> impl Iterator<Item = Tag> + use<> {
        self.0.children().filter_map(Tag::cast)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        self.header().into_iter().flat_map(|h| h.attributes())
    }

    /// Find an attribute by exact name.
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes()
            .find(|a| a.name_token().is_some_and(|t| t.text() == name))
    }

    /// Character data directly inside this tag.
    pub fn text_token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::TEXT)
    }

    /// True when the tag sits directly under the document node.
    pub fn is_root(&self) -> bool {
        self.0
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::DOCUMENT)
    }
}

impl TagHeader {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::IDENTIFIER)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        self.0.children().filter_map(Attribute::cast)
    }

    /// The tag this header opens.
    pub fn tag(&self) -> Option<Tag> {
        self.0.parent().and_then(Tag::cast)
    }
}

impl Attribute {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::IDENTIFIER)
    }

    pub fn value_token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::STRING)
    }

    /// The attribute value with its quotes removed.
    pub fn value(&self) -> Option<SmolStr> {
        self.value_token().map(|t| SmolStr::new(unquote(t.text())))
    }

    /// The tag whose header carries this attribute.
    pub fn tag(&self) -> Option<Tag> {
        self.0
            .parent()
            .and_then(TagHeader::cast)
            .and_then(|h| h.tag())
    }
}

/// Strip one layer of matching quotes.
pub fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}

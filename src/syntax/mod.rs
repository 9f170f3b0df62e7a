//! Document trees for def files.
//!
//! The engine never owns a format parser. Documents arrive as generic,
//! lossless rowan trees whose node kinds are the ones the resolution rules
//! care about:
//!
//! ```text
//! DOCUMENT
//!   TAG                         <ThingDef Name="BaseWall">...</ThingDef>
//!     TAG_HEADER                <ThingDef Name="BaseWall">
//!       IDENTIFIER              ThingDef
//!       ATTRIBUTE               Name="BaseWall"
//!         IDENTIFIER            Name
//!         STRING                "BaseWall"
//!     TAG                       <defName>Wall</defName>
//!       TAG_HEADER ...
//!       TEXT                    Wall
//!       TAG_FOOTER ...
//!     TAG_FOOTER                </ThingDef>
//! ```
//!
//! [`parse_document`] is the host adapter that produces such a tree from
//! XML text. Any other producer works as long as it emits the same shape.

pub mod ast;
mod builder;
mod syntax_kind;

pub use ast::{AstNode, Attribute, Document, Tag, TagHeader};
pub use builder::{Parse, SyntaxError, parse_document};
pub use syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken, XmlLanguage};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

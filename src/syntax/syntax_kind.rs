//! Syntax kinds for the rowan document tree.

/// All syntax kinds (tokens and nodes) in a def document.
///
/// Tokens are leaves (identifiers, strings, text runs, punctuation).
/// Nodes are composite (tags, headers, attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,
    PROLOG, // <?xml ...?>, processing instructions, doctype

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_ANGLE,       // <
    L_ANGLE_SLASH, // </
    R_ANGLE,       // >
    SLASH_R_ANGLE, // />
    EQ,            // =

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENTIFIER, // tag or attribute name
    STRING,     // quoted attribute value, quotes included
    TEXT,       // character data between tags, surrounding whitespace split off
    CDATA,      // <![CDATA[...]]>
    ERROR,

    // =========================================================================
    // NODES
    // =========================================================================
    DOCUMENT,
    TAG,
    TAG_HEADER,
    TAG_FOOTER,
    ATTRIBUTE,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comments, prolog)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT | Self::PROLOG)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_ANGLE as u16) && (self as u16) <= (Self::EQ as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XmlLanguage {}

impl rowan::Language for XmlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<XmlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<XmlLanguage>;

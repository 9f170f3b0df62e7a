//! Field/Member Resolver — which member a tag or attribute name denotes.

use smol_str::SmolStr;

use crate::scope::{AttributeArgument, Member, SymbolScope, TypeContext};

use super::ResolveConfig;

/// Decides whether an alias attribute argument matches a token.
///
/// Implementations may be lossy, but must never claim a match they cannot
/// justify: a false negative only hides a link, a false positive sends the
/// user to the wrong field.
pub trait AliasMatcher: Send + Sync {
    fn matches(&self, argument: &AttributeArgument, text: &str) -> bool;
}

/// Compares constant arguments directly. For arguments the host could not
/// evaluate, scans the rendered attribute for `Arguments: "<text>"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetadataDumpMatcher;

impl AliasMatcher for MetadataDumpMatcher {
    fn matches(&self, argument: &AttributeArgument, text: &str) -> bool {
        match argument {
            AttributeArgument::Constant(value) => value == text,
            AttributeArgument::Expression {
                metadata: Some(dump),
            } => dump.contains(&format!("Arguments: \"{text}\"")),
            AttributeArgument::Expression { metadata: None } => false,
        }
    }
}

/// A member matched by a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberMatch {
    pub member: Member,
    /// The alias the token matched, when it did not match the name itself
    pub alias: Option<SmolStr>,
}

impl MemberMatch {
    /// The name to show instead of the token text: the member's real name,
    /// present only for alias matches.
    pub fn display_name(&self) -> Option<&SmolStr> {
        self.alias.as_ref().map(|_| &self.member.name)
    }
}

/// Find the member of `context` that `text` denotes.
///
/// An exact name match on any member (own or inherited) wins over every
/// alias. Aliases are only read from attributes of the configured alias type
/// with exactly one argument.
pub fn resolve_member(
    context: &TypeContext,
    text: &str,
    scope: &SymbolScope,
    config: &ResolveConfig,
    aliases: &dyn AliasMatcher,
) -> Option<MemberMatch> {
    let class = context.as_class()?;
    let members = scope.all_members_of(class);

    if let Some(member) = members.iter().find(|m| m.name == text) {
        return Some(MemberMatch {
            member: member.clone(),
            alias: None,
        });
    }

    let member = members.into_iter().find(|member| {
        scope
            .attributes_of(member)
            .iter()
            .filter(|attr| attr.type_name == config.alias_attribute)
            .any(|attr| match attr.args.as_slice() {
                [argument] => aliases.matches(argument, text),
                _ => false,
            })
    })?;

    tracing::trace!("{} matched {}.{} by alias", text, member.owner, member.name);
    Some(MemberMatch {
        member,
        alias: Some(SmolStr::new(text)),
    })
}

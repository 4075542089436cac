//! Compiled structural patterns for the line-oriented source scan. These
//! deliberately stop short of a real parser: each one recognizes a single
//! line shape, and anything unrecognized is reported, not guessed at.

use once_cell::sync::Lazy;
use regex::Regex;

/// The class-level marker annotation name as written in source.
pub const CLASS_MARKER: &str = "ApiClass";
/// The member-level marker annotation name as written in source.
pub const MEMBER_MARKER: &str = "ApiMember";

/// A type declaration line: access modifier, optional `abstract`/`sealed`,
/// `class`/`interface`, the name with optional generic parameters, an
/// optional `where` constraint, and the inheritance list.
///
/// A constraint written after the inheritance list lands inside the
/// `inherit` group; the rewriter recovers it from there.
pub static CLASS_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<decl>.*(?:public|internal)(?: (?:abstract|sealed))? (?:class|interface) )(?P<name>\w+<.+?>|\w+)(?P<constraint> ?where \w+ : \w+(?:, )?)?(?: : )?(?P<inherit>.*)",
    )
    .unwrap()
});

/// Only the `where` generic constraint, for recovery out of a rebuilt
/// inheritance string.
pub static GENERIC_CONSTRAINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<constraint> ?where \w+ : \w+)").unwrap()
});

/// A member with an object-construction assignment or expression body:
/// `… = new …` / `… => new …`. Only the text before the construction is
/// eligible for reference replacement.
pub static OBJECT_INITIALIZATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<before>.+)(?P<ctor> =>? new .+)$").unwrap()
});

/// A marker annotation inside an attribute list, commented-out usages
/// included; the surrounding text is captured for the cleanup pass.
pub static MARKER_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<before>//\s*\[|\s*\[.*)(?P<attr>{CLASS_MARKER}|{MEMBER_MARKER})(?P<after>.*\].*)"
    ))
    .unwrap()
});

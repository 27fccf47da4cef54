use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

pub const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "const", "continue", "debugger", "default", "delete", "do", "else",
    "finally", "for", "function", "if", "in", "instanceof", "new", "return", "switch", "throw",
    "try", "typeof", "var", "void", "while", "with",
];

pub const RESERVED_WORDS: &[&str] = &[
    "abstract", "await", "boolean", "byte", "char", "class", "double", "enum", "export",
    "extends", "final", "float", "goto", "implements", "import", "int", "interface", "let",
    "long", "native", "package", "private", "protected", "public", "short", "static", "super",
    "synchronized", "throws", "transient", "volatile", "yield",
];

pub const ATOMS: &[&str] = &["false", "null", "true", "undefined", "this"];

lazy_static! {
    static ref NOT_IDENTIFIERS: FxHashSet<&'static str> = KEYWORDS
        .iter()
        .chain(RESERVED_WORDS)
        .chain(ATOMS)
        .copied()
        .collect();
}

pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

pub fn is_ident_part(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

/// Whether `name` can be written as a plain identifier: `[A-Za-z_$][A-Za-z0-9_$]*`
/// that is not a keyword, reserved word or atom.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return false;
    };

    if !is_ident_start(first) || !chars.all(is_ident_part) {
        return false;
    }

    !NOT_IDENTIFIERS.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("$"));
        assert!(is_identifier("_a1"));
        assert!(is_identifier("hasOwnProperty"));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier("foo-bar"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn rejects_words() {
        assert!(!is_identifier("do"));
        assert!(!is_identifier("in"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier("this"));
        assert!(!is_identifier("null"));
    }
}

//! Persistent `token:name` mapping between runs.
//!
//! Names that were handed out once are never reassigned: a seed mapping is
//! loaded first, and only tokens it does not know get fresh short names.

use std::path::PathBuf;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    token_allocator::TokenAllocator,
    token_file::{extract_token_from_chunk, read_lines, COMMENT_MARKER},
};

pub const SEPARATOR: char = ':';

/// Bijective token to name relation.
#[derive(Debug, Default)]
pub struct MappingSet {
    mangled: FxHashMap<String, String>,
    rev_mangled: FxHashMap<String, String>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `token:name` entries, skipping blank ones.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut set = Self::new();

        for entry in entries.iter().map(|e| e.as_ref().trim()) {
            if entry.is_empty() {
                continue;
            }

            let (token, name) = parse_entry(entry)?;
            set.insert(token, name)?;
        }

        Ok(set)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.mangled.get(token).map(String::as_str)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.rev_mangled.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.mangled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mangled.is_empty()
    }

    /// Register `token -> name`. Re-registering the same pair is a no-op; any
    /// other overlap would break the bijection.
    pub fn insert(&mut self, token: &str, name: &str) -> Result<()> {
        let conflict = |other_token: &str, other_name: &str| Error::ConflictingMapping {
            entry: format!("{token}{SEPARATOR}{name}"),
            existing: format!("{other_token}{SEPARATOR}{other_name}"),
        };

        match (self.mangled.get(token), self.rev_mangled.get(name)) {
            (None, None) => {}
            (Some(existing), Some(_)) if existing == name => return Ok(()),
            (Some(existing), _) => return Err(conflict(token, existing)),
            (None, Some(owner)) => return Err(conflict(owner, name)),
        }

        self.mangled.insert(token.to_string(), name.to_string());
        self.rev_mangled.insert(name.to_string(), token.to_string());
        Ok(())
    }

    /// All pairs as `token:name`, sorted by token.
    pub fn entries(&self) -> Vec<String> {
        self.mangled
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(token, name)| format!("{token}{SEPARATOR}{name}"))
            .collect()
    }
}

fn parse_entry(entry: &str) -> Result<(&str, &str)> {
    let malformed = || Error::MalformedMapping(entry.to_string());

    let (token, name) = entry.split_once(SEPARATOR).ok_or_else(malformed)?;
    let (token, name) = (token.trim(), name.trim());

    if token.is_empty() || name.is_empty() {
        return Err(malformed());
    }

    Ok((token, name))
}

/// Give every eligible token in `chunks` a name, keeping the names already in
/// `seed_mapping`. Chunks are token file lines: commented and blank ones are
/// skipped, any other line must hold a token. The result does not depend on the order of either input.
pub fn assign<M: AsRef<str>, C: AsRef<str>>(seed_mapping: &[M], chunks: &[C]) -> Result<Vec<String>> {
    let mut mapping = MappingSet::from_entries(seed_mapping)?;
    let seeded = mapping.len();
    let mut allocator = TokenAllocator::new();

    for chunk in chunks.iter().map(|c| c.as_ref()).sorted() {
        let chunk = chunk.trim();
        if chunk.is_empty() || chunk.starts_with(COMMENT_MARKER) {
            continue;
        }

        let token = extract_token_from_chunk(chunk)
            .ok_or_else(|| Error::InvalidTokenLine(chunk.to_string()))?;

        if mapping.get(token).is_some() {
            continue;
        }

        let name = allocator.alloc(|candidate| mapping.contains_name(candidate));
        trace!("assign {token} -> {name}");
        mapping.insert(token, &name)?;
    }

    debug!(
        "mapping has {} entries, {} newly assigned",
        mapping.len(),
        mapping.len() - seeded
    );

    Ok(mapping.entries())
}

#[derive(Debug, Default, Clone)]
pub struct MappingOptions {
    /// Seed `token:name` entries.
    pub mapping: Vec<String>,
    pub mapping_file: Option<PathBuf>,
    pub tokens: Vec<String>,
    pub tokenfile: Option<PathBuf>,
}

/// Mapping for the tokens and seeds listed inline or in files.
pub fn make_mapping(options: &MappingOptions) -> Result<Vec<String>> {
    let mut seed = options.mapping.clone();
    if let Some(file) = &options.mapping_file {
        seed.extend(read_lines(file)?);
    }

    let mut chunks = options.tokens.clone();
    if let Some(file) = &options.tokenfile {
        chunks.extend(read_lines(file)?);
    }

    assign(&seed, &chunks)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashSet;

    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn assigns_in_sorted_order() {
        assert_eq!(
            assign(NONE, &["foo", "bar", "baz"]).unwrap(),
            vec!["bar:a", "baz:b", "foo:c"]
        );
    }

    #[test]
    fn keeps_seeded_names() {
        assert_eq!(
            assign(&["foo:a", "baz:b"], &["foo", "bar", "baz"]).unwrap(),
            vec!["bar:c", "baz:b", "foo:a"]
        );
    }

    #[test]
    fn keeps_extra_seed_tokens() {
        assert_eq!(
            assign(&["foo:a", "bar:c", "baz:b", "qux:z"], &["foo", "bar", "baz"]).unwrap(),
            vec!["bar:c", "baz:b", "foo:a", "qux:z"]
        );
    }

    #[test]
    fn skips_comments_and_blank_chunks() {
        assert_eq!(
            assign(NONE, &["  ", "#bar: used in dom", "foo # reviewed", " baz "]).unwrap(),
            vec!["baz:a", "foo:b"]
        );
    }

    #[test]
    fn chunk_without_token() {
        assert!(matches!(
            assign(NONE, &["foo", "---"]),
            Err(Error::InvalidTokenLine(line)) if line == "---"
        ));
    }

    #[test]
    fn input_order_does_not_matter() {
        let first = assign(&["zz:b", "yy:a"], &["foo", "bar", "baz", "qux"]).unwrap();
        let second = assign(&["yy:a", "zz:b"], &["qux", "baz", "foo", "bar"]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn repeated_runs_are_stable() {
        let first = assign(NONE, &["foo", "bar"]).unwrap();
        let second = assign(&first, &["foo", "bar"]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn names_are_unique() {
        let tokens = (0..2000).map(|i| format!("token{i}")).collect::<Vec<_>>();
        let mapping = assign(&["token7:a", "other:c"], &tokens).unwrap();

        let names = mapping
            .iter()
            .map(|entry| entry.split_once(':').unwrap().1)
            .collect::<FxHashSet<_>>();

        assert_eq!(mapping.len(), 2001);
        assert_eq!(names.len(), mapping.len());
        assert!(names.iter().all(|name| crate::is_identifier(name)));
    }

    #[test]
    fn malformed_seed() {
        assert!(matches!(
            assign(&["foo"], NONE),
            Err(Error::MalformedMapping(entry)) if entry == "foo"
        ));
        assert!(matches!(assign(&[":a"], NONE), Err(Error::MalformedMapping(_))));
    }

    #[test]
    fn conflicting_seed() {
        assert!(matches!(
            assign(&["foo:a", "bar:a"], NONE),
            Err(Error::ConflictingMapping { .. })
        ));
        assert!(matches!(
            assign(&["foo:a", "foo:b"], NONE),
            Err(Error::ConflictingMapping { .. })
        ));
        assert_eq!(assign(&["foo:a", "foo:a"], NONE).unwrap(), vec!["foo:a"]);
    }

    #[test]
    fn mapping_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let mapping_file = dir.path().join("mapping.txt");
        let tokenfile = dir.path().join("tokens.txt");
        std::fs::write(&mapping_file, "foo:a\nbaz:b\n").unwrap();
        std::fs::write(&tokenfile, "foo\r\nbar\r\n#qux\r\n").unwrap();

        let mapping = make_mapping(&MappingOptions {
            mapping_file: Some(mapping_file),
            tokenfile: Some(tokenfile),
            tokens: vec!["baz".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(mapping, vec!["bar:c", "baz:b", "foo:a"]);
    }

    #[test]
    fn missing_mapping_file() {
        let err = make_mapping(&MappingOptions {
            mapping_file: Some("/no/such/mapping".into()),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, Error::MissingFile(path) if path.ends_with("mapping")));
    }
}

//! Token files: the human reviewed list of tokens, one per line, where a leading
//! `#` keeps a token away from the mangler.
//!
//! ```text
//! foo
//! #bar: used in custom reserved
//! baz # kept, the comment is only for reviewers
//! ```

use std::{cmp::Ordering, fs::read_to_string, path::Path};

use crate::{
    error::{Error, Result},
    ident::is_ident_part,
};

pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub token: String,
    pub message: String,
}

impl TokenInfo {
    pub fn new(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message: message.into(),
        }
    }

    pub fn eligible(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            message: token.clone(),
            token,
        }
    }

    /// `#token: reason`, kept in the file but never mangled.
    pub fn excluded(token: impl Into<String>, reason: &str) -> Self {
        let token = token.into();
        Self {
            message: format!("{COMMENT_MARKER}{token}: {reason}"),
            token,
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.message.trim_start().starts_with(COMMENT_MARKER)
    }
}

/// First run of identifier characters in a line, so `#foo` gives `foo` and
/// `bar # comment` gives `bar`.
pub fn extract_token_from_chunk(chunk: &str) -> Option<&str> {
    let start = chunk.find(is_ident_part)?;
    let rest = &chunk[start..];
    let end = rest.find(|ch: char| !is_ident_part(ch)).unwrap_or(rest.len());

    Some(&rest[..end])
}

/// Trim the text as a whole, then split on `\n` or `\r\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Comma separated token list as given on a command line.
pub fn split_token_list(list: &str) -> Vec<String> {
    list.split(',').map(str::to_string).collect()
}

pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }

    let content = read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(split_lines(&content))
}

/// Token infos of existing lines. Blank lines are skipped and every message is
/// kept exactly as written.
pub fn parse_token_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<TokenInfo>> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let token = extract_token_from_chunk(line)
                .ok_or_else(|| Error::InvalidTokenLine(line.to_string()))?;

            Ok(TokenInfo::new(token, line))
        })
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergedTokenFile {
    /// Every current token; prior messages win over fresh ones.
    pub whole: Vec<String>,
    /// `+ message` for added tokens, `- message` for removed ones.
    pub diff: Vec<String>,
}

fn added(info: &TokenInfo) -> String {
    format!("+ {}", info.message)
}

fn removed(info: &TokenInfo) -> String {
    format!("- {}", info.message)
}

fn without_marker(line: &str) -> &str {
    line.get(2..).unwrap_or(line)
}

fn sorted_by_token(infos: &[TokenInfo]) -> Vec<&TokenInfo> {
    let mut infos = infos.iter().collect::<Vec<_>>();
    infos.sort_by(|a, b| a.token.cmp(&b.token));
    infos
}

/// Merge the infos of a saved token file with freshly classified ones.
pub fn merge(existing: &[TokenInfo], fresh: &[TokenInfo]) -> MergedTokenFile {
    let existing = sorted_by_token(existing);
    let fresh = sorted_by_token(fresh);

    let mut whole = vec![];
    let mut diff = vec![];
    let (mut from, mut to) = (0, 0);

    while from < existing.len() && to < fresh.len() {
        match existing[from].token.cmp(&fresh[to].token) {
            Ordering::Equal => {
                whole.push(existing[from].message.clone());
                from += 1;
                to += 1;
            }
            Ordering::Greater => {
                whole.push(fresh[to].message.clone());
                diff.push(added(fresh[to]));
                to += 1;
            }
            Ordering::Less => {
                diff.push(removed(existing[from]));
                from += 1;
            }
        }
    }

    diff.extend(existing[from..].iter().map(|info| removed(info)));
    for info in &fresh[to..] {
        whole.push(info.message.clone());
        diff.push(added(info));
    }

    whole.sort();
    diff.sort_by(|a, b| without_marker(a).cmp(without_marker(b)));

    MergedTokenFile { whole, diff }
}

use std::path::PathBuf;

use imt_core::{
    is_identifier, merge, parse_token_lines, read_lines, ReservedTokenIndex, TokenInfo,
};
use swc_ecma_ast::Module;
use swc_ecma_visit::VisitWith;
use tracing::{debug, trace};

use crate::{
    collector::{TokenCollector, EMBEDDED_CODE_MARKER},
    error::Result,
    util::script::parse,
};

pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Mangling candidates of `module` in first-occurrence order.
pub fn extract_module_tokens(module: &Module, marker: &str) -> Vec<String> {
    let mut collector = TokenCollector::new(marker);
    module.visit_with(&mut collector);
    collector.into_tokens()
}

pub fn extract_tokens(code: &str) -> Result<Vec<String>> {
    let module = parse(code)?;
    Ok(extract_module_tokens(&module, EMBEDDED_CODE_MARKER))
}

/// The first reason `token` must not be mangled, if any.
fn exclusion_reason(token: &str, reserved: &ReservedTokenIndex, min_length: usize) -> Option<String> {
    if reserved.is_reserved(token) {
        return Some(format!("used in {}", reserved.categories(token).join(", ")));
    }

    if !is_identifier(token) {
        return Some("not identifier".to_string());
    }

    if token.chars().count() < min_length {
        return Some(format!("length of token is less than {min_length}"));
    }

    None
}

/// Annotate each token, keeping the given order.
pub fn classify_tokens<S: AsRef<str>>(
    tokens: &[S],
    reserved: &ReservedTokenIndex,
    min_length: usize,
) -> Vec<TokenInfo> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            match exclusion_reason(token, reserved, min_length) {
                Some(reason) => {
                    trace!("exclude {token}: {reason}");
                    TokenInfo::excluded(token, &reason)
                }
                None => TokenInfo::eligible(token),
            }
        })
        .collect()
}

pub fn classify(
    module: &Module,
    reserved: &ReservedTokenIndex,
    min_length: usize,
    marker: &str,
) -> Vec<TokenInfo> {
    classify_tokens(&extract_module_tokens(module, marker), reserved, min_length)
}

#[derive(Debug, Clone)]
pub struct TokenFileOptions {
    /// Previously saved token file.
    pub tokenfile: Option<PathBuf>,
    /// Extra existing lines, read after the token file.
    pub tokens: Vec<String>,
    pub reserved_names: Vec<String>,
    pub min_length: usize,
    /// Return the `+`/`-` diff instead of the whole file.
    pub diff: bool,
    pub embedded_code_marker: String,
}

impl Default for TokenFileOptions {
    fn default() -> Self {
        Self {
            tokenfile: None,
            tokens: vec![],
            reserved_names: vec![],
            min_length: DEFAULT_MIN_LENGTH,
            diff: false,
            embedded_code_marker: EMBEDDED_CODE_MARKER.to_string(),
        }
    }
}

/// Token file lines for `code`, merged with the existing annotations.
pub fn make_tokenfile_info(code: &str, options: &TokenFileOptions) -> Result<Vec<String>> {
    let mut existing_lines = vec![];
    if let Some(tokenfile) = &options.tokenfile {
        existing_lines.extend(read_lines(tokenfile)?);
    }
    existing_lines.extend(options.tokens.iter().cloned());
    let existing = parse_token_lines(&existing_lines)?;

    let module = parse(code)?;
    let reserved = ReservedTokenIndex::new(&options.reserved_names);
    let fresh = classify(
        &module,
        &reserved,
        options.min_length,
        &options.embedded_code_marker,
    );

    debug!(
        "merging {} existing token lines with {} fresh tokens, {} excluded",
        existing.len(),
        fresh.len(),
        fresh.iter().filter(|info| info.is_excluded()).count()
    );

    let merged = merge(&existing, &fresh);
    Ok(if options.diff { merged.diff } else { merged.whole })
}

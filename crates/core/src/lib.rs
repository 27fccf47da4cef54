#![deny(clippy::all)]

mod error;
mod ident;
mod mapping;
mod reserved;
mod token_allocator;
mod token_file;

pub use error::{Error, Result};
pub use ident::{is_ident_part, is_ident_start, is_identifier};
pub use mapping::{assign, make_mapping, MappingOptions, MappingSet, SEPARATOR};
pub use reserved::{ReservedTokenIndex, CUSTOM_RESERVED};
pub use token_allocator::{base54, TokenAllocator};
pub use token_file::{
    extract_token_from_chunk, merge, parse_token_lines, read_lines, split_lines,
    split_token_list, MergedTokenFile, TokenInfo, COMMENT_MARKER,
};

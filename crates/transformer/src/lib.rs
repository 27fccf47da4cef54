#![deny(clippy::all)]

mod classifier;
mod collector;
mod error;
mod replacer;
mod stage;
mod transformer;
mod util;

pub use classifier::{
    classify, classify_tokens, extract_module_tokens, extract_tokens, make_tokenfile_info,
    TokenFileOptions, DEFAULT_MIN_LENGTH,
};
pub use collector::{TokenCollector, EMBEDDED_CODE_MARKER};
pub use error::{Result, TransformError};
pub use replacer::{replace_in_code, PropertyReplacer};
pub use stage::{
    Collaborators, Consolidator, MangleRequest, Mangler, PropertyMangler, SqueezeRequest,
    Squeezer, VarLifter,
};
pub use transformer::*;
pub use util::{
    leading_comments,
    script::{codegen, parse, parse_with_comments, CodegenOption},
    time_it,
};

use std::time::Instant;

use swc_common::{
    comments::{CommentKind, Comments, SingleThreadedComments},
    Spanned,
};
use swc_ecma_ast::Module;
use tracing::info;

pub mod script;

/// Run `f`, logging how long it took when `verbose` is set.
pub fn time_it<T>(name: &str, verbose: bool, f: impl FnOnce() -> T) -> T {
    if !verbose {
        return f();
    }

    let start = Instant::now();
    let result = f();
    info!("// {}: {:.3} sec.", name, start.elapsed().as_secs_f64());
    result
}

/// The shebang and the comments before the first statement of `module`,
/// reproduced as written.
pub fn leading_comments(module: &Module, comments: &SingleThreadedComments) -> String {
    let mut ret = String::new();

    if let Some(shebang) = &module.shebang {
        ret.push_str("#!");
        ret.push_str(shebang);
        ret.push('\n');
    }

    let Some(first) = module.body.first() else {
        return ret;
    };

    for comment in comments.get_leading(first.span().lo).unwrap_or_default() {
        match comment.kind {
            CommentKind::Line => {
                ret.push_str("//");
                ret.push_str(&comment.text);
                ret.push('\n');
            }
            CommentKind::Block => {
                ret.push_str("/*");
                ret.push_str(&comment.text);
                ret.push_str("*/");
            }
        }
    }

    ret
}

use swc_common::{
    comments::{Comments, SingleThreadedComments},
    sync::Lrc,
    BytePos, SourceMap, DUMMY_SP,
};
use swc_ecma_ast::{Module, ModuleItem, Program};
use swc_ecma_codegen::{
    text_writer::{JsWriter, WriteJs},
    Config, Emitter,
};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax};

use crate::error::{Result, TransformError};

fn parse_error(err: swc_ecma_parser::error::Error) -> TransformError {
    TransformError::Parse {
        message: err.kind().msg().to_string(),
        dump: format!("{err:#?}"),
    }
}

fn parse_program(content: &str, comments: Option<&dyn Comments>) -> Result<Module> {
    // position 0 is the dummy position, comments can not be attached there
    let input = StringInput::new(
        content,
        BytePos(1),
        BytePos(1 + content.len() as u32),
    );

    let mut parser = Parser::new(Syntax::Es(EsSyntax::default()), input, comments);

    // a script unless it uses import or export, so sloppy mode code parses
    let program = parser.parse_program().map_err(parse_error)?;

    // recovered errors still mean the source is not valid
    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(parse_error(err));
    }

    Ok(match program {
        Program::Module(module) => module,
        Program::Script(script) => Module {
            span: script.span,
            body: script.body.into_iter().map(ModuleItem::Stmt).collect(),
            shebang: script.shebang,
        },
    })
}

pub fn parse(content: &str) -> Result<Module> {
    parse_program(content, None)
}

/// Like [parse], keeping the comments of the source in `comments`.
pub fn parse_with_comments(content: &str, comments: &SingleThreadedComments) -> Result<Module> {
    parse_program(content, Some(comments as &dyn Comments))
}

#[derive(Debug, Clone, Copy)]
pub struct CodegenOption {
    pub minify: bool,
}

pub fn codegen(module: &Module, option: CodegenOption) -> Result<String> {
    let config = Config::default().with_minify(option.minify);
    let cm: Lrc<SourceMap> = Default::default();
    let mut buf = vec![];
    let writer = Box::new(JsWriter::new(cm.clone(), "\n", &mut buf, None)) as Box<dyn WriteJs>;

    let mut emitter = Emitter {
        cfg: config,
        cm,
        comments: None,
        wr: writer,
    };

    emitter.emit_module(module)?;

    drop(emitter);

    Ok(String::from_utf8_lossy(&buf).to_string())
}

/// Generate every top level item on its own, terminated, so the pieces can be
/// joined on separate lines.
pub fn codegen_items(module: &Module, minify: bool) -> Result<Vec<String>> {
    module
        .body
        .iter()
        .map(|item: &ModuleItem| {
            let single = Module {
                span: DUMMY_SP,
                body: vec![item.clone()],
                shebang: None,
            };

            codegen(&single, CodegenOption { minify }).map(|code| code.trim().to_string())
        })
        .collect()
}

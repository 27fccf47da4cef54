use std::{collections::BTreeMap, fs::read_to_string, path::Path, path::PathBuf};

use imt_core::{read_lines, MappingSet};
use serde::{Deserialize, Serialize};
use swc_common::comments::SingleThreadedComments;
use swc_ecma_ast::Module;
use tracing::debug;

use crate::{
    collector::EMBEDDED_CODE_MARKER,
    error::{Result, TransformError},
    stage::{Collaborators, MangleRequest, SqueezeRequest},
    util::{
        leading_comments,
        script::{codegen, codegen_items, parse_with_comments, CodegenOption},
        time_it,
    },
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MangleOptions {
    #[serde(rename = "toplevel")]
    pub mangle_toplevel: bool,
    pub defines: BTreeMap<String, serde_json::Value>,
    #[serde(alias = "except")]
    pub reserved_names: Vec<String>,
    pub no_mangle_functions: bool,
    pub mangle_uniquely: bool,
    pub ignore_eval: bool,
    /// `token:name` entries for property names.
    pub property_maps: Vec<String>,
    pub vars_in_string: Vec<String>,
    /// Its lines are added to `vars_in_string`.
    pub tokenfile: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqueezeOptions {
    pub make_seqs: bool,
    pub dead_code: bool,
    #[serde(rename = "unsafe")]
    pub unsafe_passes: bool,
}

impl Default for SqueezeOptions {
    fn default() -> Self {
        Self {
            make_seqs: true,
            dead_code: true,
            unsafe_passes: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyOptions {
    pub consolidate: bool,
    pub lift_vars: bool,
    pub mangle: bool,
    #[serde(flatten)]
    pub mangle_options: MangleOptions,
    pub squeeze: bool,
    #[serde(flatten)]
    pub squeeze_options: SqueezeOptions,
    /// Return the syntax tree dump instead of code.
    pub ast: bool,
    pub beautify: bool,
    pub max_line_length: Option<usize>,
    pub show_copyright: bool,
    pub verbose: bool,
    pub embedded_code_marker: String,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            consolidate: false,
            lift_vars: false,
            mangle: false,
            mangle_options: Default::default(),
            squeeze: false,
            squeeze_options: Default::default(),
            ast: false,
            beautify: false,
            max_line_length: None,
            show_copyright: false,
            verbose: false,
            embedded_code_marker: EMBEDDED_CODE_MARKER.to_string(),
        }
    }
}

impl MinifyOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(imt_core::Error::MissingFile(path.to_path_buf()).into());
        }

        let json = read_to_string(path).map_err(|source| imt_core::Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub content: String,
}

fn required<'a, T: ?Sized>(
    enabled: bool,
    stage: &'static str,
    collaborator: &'a Option<Box<T>>,
) -> Result<Option<&'a T>> {
    if !enabled {
        return Ok(None);
    }

    collaborator
        .as_deref()
        .map(Some)
        .ok_or(TransformError::MissingCollaborator { stage })
}

fn run_stage(stage: &'static str, result: anyhow::Result<Module>) -> Result<Module> {
    result.map_err(|err| TransformError::stage(stage, err))
}

/// Pack already generated statements into lines of at most `max_line_length`;
/// a longer statement gets a line of its own. Only top level statements are
/// line breaks, so a program wrapped in one function expression stays on a
/// single line.
pub fn split_lines(statements: &[String], max_line_length: usize) -> String {
    let mut lines: Vec<String> = vec![];

    for statement in statements {
        match lines.last_mut() {
            Some(line) if line.len() + statement.len() <= max_line_length => {
                line.push_str(statement);
            }
            _ => lines.push(statement.clone()),
        }
    }

    lines.join("\n")
}

/// Run the configured stages over `content`. Configuration is checked before
/// anything runs and the first failing stage aborts the whole run.
pub fn transform(
    content: &str,
    options: &MinifyOptions,
    collaborators: &Collaborators,
) -> Result<TransformOutput> {
    let verbose = options.verbose;
    let mangle_options = &options.mangle_options;
    let squeeze_options = &options.squeeze_options;

    let consolidator = required(options.consolidate, "consolidate", &collaborators.consolidator)?;
    let lifter = required(options.lift_vars, "lift_vars", &collaborators.lifter)?;
    let mangler = required(options.mangle, "mangle", &collaborators.mangler)?;
    let squeezer = required(options.squeeze, "squeeze", &collaborators.squeezer)?;

    let property_maps = MappingSet::from_entries(&mangle_options.property_maps)?;
    let mut vars_in_string = mangle_options.vars_in_string.clone();
    if options.mangle {
        if let Some(tokenfile) = &mangle_options.tokenfile {
            vars_in_string.extend(read_lines(tokenfile)?);
        }
    }

    let comments = SingleThreadedComments::default();
    let mut module = time_it("parse", verbose, || parse_with_comments(content, &comments))?;

    let mut result = String::new();
    if options.show_copyright {
        result.push_str(&leading_comments(&module, &comments));
    }

    if let Some(consolidator) = consolidator {
        module = time_it("consolidate", verbose, || {
            run_stage("consolidate", consolidator.consolidate(module))
        })?;
    }

    if let Some(lifter) = lifter {
        module = time_it("lift", verbose, || run_stage("lift", lifter.lift_vars(module)))?;
    }

    if let Some(mangler) = mangler {
        let request = MangleRequest {
            toplevel: mangle_options.mangle_toplevel,
            defines: &mangle_options.defines,
            except: &mangle_options.reserved_names,
            no_functions: mangle_options.no_mangle_functions,
            mangle_uniquely: mangle_options.mangle_uniquely,
            ignore_eval: mangle_options.ignore_eval,
            property_maps: &property_maps,
            vars_in_string,
            embedded_code_marker: &options.embedded_code_marker,
        };

        module = time_it("mangle", verbose, || {
            run_stage("mangle", mangler.mangle(module, &request))
        })?;
    }

    if let Some(squeezer) = squeezer {
        let request = SqueezeRequest {
            make_seqs: squeeze_options.make_seqs,
            dead_code: squeeze_options.dead_code,
            keep_comps: !squeeze_options.unsafe_passes,
        };

        module = time_it("squeeze", verbose, || {
            let module = run_stage("squeeze", squeezer.squeeze(module, &request))?;
            if squeeze_options.unsafe_passes {
                return run_stage("squeeze", squeezer.squeeze_more(module));
            }
            Ok(module)
        })?;
    }

    if options.ast {
        return Ok(TransformOutput {
            content: format!("{module:#?}"),
        });
    }

    let minify = !options.beautify;
    let max_line_length = options.max_line_length.filter(|len| minify && *len > 0);

    match max_line_length {
        Some(max_line_length) => {
            let statements = time_it("generate", verbose, || codegen_items(&module, minify))?;
            let code = time_it("split", verbose, || split_lines(&statements, max_line_length));
            result.push_str(&code);
        }
        None => {
            let code = time_it("generate", verbose, || {
                codegen(&module, CodegenOption { minify })
            })?;
            result.push_str(code.trim_end());
        }
    }

    debug!("generated {} bytes", result.len());

    Ok(TransformOutput { content: result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_regenerate() -> anyhow::Result<()> {
        let output = transform(
            "var obj = { foo: 1 };\nobj.foo = 2;",
            &Default::default(),
            &Default::default(),
        )?;

        assert_eq!(output.content, "var obj={foo:1};obj.foo=2;");

        Ok(())
    }

    #[test]
    fn sloppy_mode_input() -> anyhow::Result<()> {
        let output = transform("var a = 010; o.foo = a;", &Default::default(), &Default::default())?;

        assert!(output.content.ends_with("o.foo=a;"), "{}", output.content);

        Ok(())
    }

    #[test]
    fn options_from_json() -> anyhow::Result<()> {
        let options = MinifyOptions::from_json(
            r#"{
                "mangle": true,
                "toplevel": true,
                "except": ["$"],
                "property_maps": ["foo:aa"],
                "squeeze": true,
                "unsafe": true,
                "max_line_length": 80
            }"#,
        )?;

        assert!(options.mangle);
        assert!(options.mangle_options.mangle_toplevel);
        assert_eq!(options.mangle_options.reserved_names, vec!["$"]);
        assert_eq!(options.mangle_options.property_maps, vec!["foo:aa"]);
        assert!(options.squeeze);
        assert!(options.squeeze_options.unsafe_passes);
        assert!(options.squeeze_options.make_seqs);
        assert!(options.squeeze_options.dead_code);
        assert_eq!(options.max_line_length, Some(80));
        assert_eq!(options.embedded_code_marker, EMBEDDED_CODE_MARKER);

        Ok(())
    }

    #[test]
    fn split_statements() {
        let statements = ["var a=1;", "var b=2;", "var longer=3;"].map(String::from);

        assert_eq!(split_lines(&statements, 16), "var a=1;var b=2;\nvar longer=3;");
        assert_eq!(split_lines(&statements, 4), "var a=1;\nvar b=2;\nvar longer=3;");
        assert_eq!(split_lines(&[], 4), "");
    }
}

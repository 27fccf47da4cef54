//! The engines the pipeline hands the program to. Only property mangling is
//! built in; scope renaming and optimization come from outside.

use std::collections::BTreeMap;

use anyhow::Result;
use imt_core::MappingSet;
use swc_ecma_ast::Module;
use swc_ecma_visit::VisitMutWith;
use tracing::debug;

use crate::replacer::PropertyReplacer;

pub trait Consolidator {
    fn consolidate(&self, module: Module) -> Result<Module>;
}

pub trait VarLifter {
    fn lift_vars(&self, module: Module) -> Result<Module>;
}

/// Everything a renaming engine is told about one mangle run.
#[derive(Debug)]
pub struct MangleRequest<'a> {
    pub toplevel: bool,
    /// Symbolic constants to substitute.
    pub defines: &'a BTreeMap<String, serde_json::Value>,
    /// Names that keep their spelling.
    pub except: &'a [String],
    pub no_functions: bool,
    pub mangle_uniquely: bool,
    pub ignore_eval: bool,
    pub property_maps: &'a MappingSet,
    /// Variables that are also renamed where they appear in embedded code.
    pub vars_in_string: Vec<String>,
    pub embedded_code_marker: &'a str,
}

pub trait Mangler {
    fn mangle(&self, module: Module, request: &MangleRequest<'_>) -> Result<Module>;
}

#[derive(Debug, Clone, Copy)]
pub struct SqueezeRequest {
    pub make_seqs: bool,
    pub dead_code: bool,
    /// Keep comparisons as written; cleared in unsafe mode.
    pub keep_comps: bool,
}

pub trait Squeezer {
    fn squeeze(&self, module: Module, request: &SqueezeRequest) -> Result<Module>;

    /// Extra pass run only in unsafe mode.
    fn squeeze_more(&self, module: Module) -> Result<Module> {
        Ok(module)
    }
}

/// Renames properties after the property map and unwraps embedded code
/// strings. Scope aware options are for a full renaming engine.
#[derive(Debug, Default)]
pub struct PropertyMangler;

impl Mangler for PropertyMangler {
    fn mangle(&self, mut module: Module, request: &MangleRequest<'_>) -> Result<Module> {
        let mut replacer = PropertyReplacer::new(request.property_maps, request.embedded_code_marker);
        module.visit_mut_with(&mut replacer);

        debug!("replaced {} property names", replacer.replaced);
        Ok(module)
    }
}

pub struct Collaborators {
    pub consolidator: Option<Box<dyn Consolidator>>,
    pub lifter: Option<Box<dyn VarLifter>>,
    pub mangler: Option<Box<dyn Mangler>>,
    pub squeezer: Option<Box<dyn Squeezer>>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            consolidator: None,
            lifter: None,
            mangler: Some(Box::new(PropertyMangler)),
            squeezer: None,
        }
    }
}

impl Collaborators {
    pub fn with_consolidator(mut self, consolidator: Box<dyn Consolidator>) -> Self {
        self.consolidator = Some(consolidator);
        self
    }

    pub fn with_lifter(mut self, lifter: Box<dyn VarLifter>) -> Self {
        self.lifter = Some(lifter);
        self
    }

    pub fn with_mangler(mut self, mangler: Box<dyn Mangler>) -> Self {
        self.mangler = Some(mangler);
        self
    }

    pub fn with_squeezer(mut self, squeezer: Box<dyn Squeezer>) -> Self {
        self.squeezer = Some(squeezer);
        self
    }
}

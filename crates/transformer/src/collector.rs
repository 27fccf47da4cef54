use itertools::Itertools;
use swc_ecma_ast::{
    ComputedPropName, Expr, Ident, IdentName, Lit, MemberExpr, MemberProp, ObjectPatProp, Prop,
    PropName, Str, SuperProp, SuperPropExpr,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::{trace, warn};

use crate::util::script::parse;

/// String literals starting with this are treated as code.
pub const EMBEDDED_CODE_MARKER: &str = "/**/";

/// Collects mangling candidates in first-occurrence order: property names of the
/// program, and, inside embedded code strings, every identifier as well.
#[derive(Debug)]
pub struct TokenCollector<'a> {
    tokens: Vec<String>,
    marker: &'a str,
    /// Identifiers of the program are left to the scope aware renamer; inside
    /// embedded code nothing else sees them.
    collect_identifiers: bool,
}

impl<'a> TokenCollector<'a> {
    pub fn new(marker: &'a str) -> Self {
        Self {
            tokens: vec![],
            marker,
            collect_identifiers: false,
        }
    }

    fn embedded(marker: &'a str) -> Self {
        Self {
            collect_identifiers: true,
            ..Self::new(marker)
        }
    }

    fn push_str(&mut self, token: &str) {
        self.tokens.push(token.to_string());
    }

    fn push(&mut self, ident: &IdentName) {
        self.push_str(ident.sym.as_str());
    }

    fn is_embedded_code(&self, value: &str) -> bool {
        !self.marker.is_empty() && value.starts_with(self.marker)
    }

    fn collect_embedded(&mut self, value: &str) {
        let code = &value[self.marker.len()..];
        let module = match parse(code) {
            Ok(module) => module,
            Err(err) => {
                warn!("skip embedded code that does not parse: {err}");
                return;
            }
        };

        let mut collector = Self::embedded(self.marker);
        module.visit_with(&mut collector);

        trace!("{} tokens in embedded code", collector.tokens.len());
        self.tokens.extend(collector.tokens);
    }

    /// `o["foo"]` names `foo` like `o.foo` does.
    fn push_computed(&mut self, computed: &ComputedPropName) {
        if let Expr::Lit(Lit::Str(lit)) = &*computed.expr {
            if !self.is_embedded_code(lit.value.as_str()) {
                self.push_str(lit.value.as_str());
                return;
            }
        }
        computed.visit_with(self);
    }

    /// Tokens without duplicates, each at its first occurrence.
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens.into_iter().unique().collect()
    }
}

impl Visit for TokenCollector<'_> {
    fn visit_member_expr(&mut self, node: &MemberExpr) {
        node.obj.visit_with(self);

        match &node.prop {
            MemberProp::Ident(ident_name) => {
                self.push(ident_name);
            }
            MemberProp::PrivateName(_) => {}
            MemberProp::Computed(computed_prop_name) => {
                self.push_computed(computed_prop_name);
            }
        }
    }

    fn visit_super_prop_expr(&mut self, node: &SuperPropExpr) {
        match &node.prop {
            SuperProp::Ident(ident_name) => self.push(ident_name),
            SuperProp::Computed(computed_prop_name) => self.push_computed(computed_prop_name),
        }
    }

    fn visit_object_pat_prop(&mut self, node: &ObjectPatProp) {
        // `var { foo } = o` reads property `foo`
        if let ObjectPatProp::Assign(assign) = node {
            self.push_str(assign.key.id.sym.as_str());
            assign.value.visit_with(self);
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_prop_name(&mut self, node: &PropName) {
        match node {
            PropName::Ident(ident_name) => self.push(ident_name),
            PropName::Str(lit) => self.push_str(lit.value.as_str()),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_prop(&mut self, node: &Prop) {
        if let Prop::Shorthand(ident) = node {
            self.push_str(ident.sym.as_str());
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_ident(&mut self, ident: &Ident) {
        if self.collect_identifiers {
            self.push_str(ident.sym.as_str());
        }
    }

    fn visit_str(&mut self, lit: &Str) {
        if self.is_embedded_code(lit.value.as_str()) {
            self.collect_embedded(lit.value.as_str());
        }
    }
}

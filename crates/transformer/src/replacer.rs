use imt_core::{is_ident_part, MappingSet};
use swc_ecma_ast::{
    AssignPat, Expr, IdentName, ImportDecl, KeyValuePatProp, KeyValueProp, MemberExpr,
    MemberProp, ObjectPatProp, Pat, Prop, PropName, Str, SuperProp, SuperPropExpr,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};

/// Renames property names, and strings naming properties, after a
/// `token:name` property map.
#[derive(Debug)]
pub struct PropertyReplacer<'a> {
    property_maps: &'a MappingSet,
    marker: &'a str,
    pub replaced: usize,
}

impl<'a> PropertyReplacer<'a> {
    pub fn new(property_maps: &'a MappingSet, marker: &'a str) -> Self {
        Self {
            property_maps,
            marker,
            replaced: 0,
        }
    }

    fn mangled(&mut self, name: &str) -> Option<&'a str> {
        let property_maps: &'a MappingSet = self.property_maps;
        let mangled = property_maps.get(name)?;
        self.replaced += 1;
        Some(mangled)
    }

    fn replace_ident_name(&mut self, ident: &mut IdentName) {
        if let Some(mangled) = self.mangled(ident.sym.as_str()) {
            ident.sym = mangled.into();
        }
    }

    fn replace_str(&mut self, lit: &mut Str) {
        let value = lit.value.as_str();

        let replaced = if !self.marker.is_empty() && value.starts_with(self.marker) {
            let code = &value[self.marker.len()..];
            replace_in_code(code, self.property_maps)
        } else if let Some(mangled) = self.mangled(value) {
            mangled.to_string()
        } else {
            return;
        };

        lit.value = replaced.into();
        lit.raw = None;
    }
}

/// Rewrite mapped names inside code held in a string: quoted names (`'foo'`,
/// `"foo"`) and names after a dot. Bare words are left alone, they may be
/// variables or keys written without quotes.
pub fn replace_in_code(code: &str, property_maps: &MappingSet) -> String {
    let mut ret = String::with_capacity(code.len());
    let mut rest = code;

    while let Some(pos) = rest.find(|ch: char| matches!(ch, '.' | '\'' | '"')) {
        let lead = rest.as_bytes()[pos] as char;
        ret.push_str(&rest[..=pos]);

        let after = &rest[pos + 1..];
        let end = after
            .find(|ch: char| !is_ident_part(ch))
            .unwrap_or(after.len());
        let word = &after[..end];

        if word.is_empty() {
            rest = after;
            continue;
        }

        if lead == '.' {
            ret.push_str(property_maps.get(word).unwrap_or(word));
            rest = &after[end..];
        } else if after[end..].starts_with(lead) {
            ret.push_str(property_maps.get(word).unwrap_or(word));
            ret.push(lead);
            rest = &after[end + 1..];
        } else {
            rest = after;
        }
    }

    ret.push_str(rest);
    ret
}

impl VisitMut for PropertyReplacer<'_> {
    fn visit_mut_import_decl(&mut self, _: &mut ImportDecl) {}

    fn visit_mut_member_expr(&mut self, node: &mut MemberExpr) {
        node.obj.visit_mut_with(self);

        match &mut node.prop {
            MemberProp::Ident(ident) => self.replace_ident_name(ident),
            MemberProp::PrivateName(_) => {}
            MemberProp::Computed(computed_prop_name) => {
                computed_prop_name.visit_mut_with(self);
            }
        }
    }

    fn visit_mut_super_prop_expr(&mut self, node: &mut SuperPropExpr) {
        match &mut node.prop {
            SuperProp::Ident(ident) => self.replace_ident_name(ident),
            SuperProp::Computed(computed_prop_name) => {
                computed_prop_name.visit_mut_with(self);
            }
        }
    }

    fn visit_mut_object_pat_prop(&mut self, node: &mut ObjectPatProp) {
        if let ObjectPatProp::Assign(assign) = node {
            assign.value.visit_mut_with(self);

            let Some(mangled) = self.mangled(assign.key.id.sym.as_str()) else {
                return;
            };

            // `{ foo = 1 } = o` => `{ aa: foo = 1 } = o`
            let binding = Pat::Ident(assign.key.clone());
            let value = match assign.value.take() {
                Some(default) => Pat::Assign(AssignPat {
                    span: assign.span,
                    left: Box::new(binding),
                    right: default,
                }),
                None => binding,
            };
            let key = PropName::Ident(IdentName {
                span: assign.key.id.span,
                sym: mangled.into(),
            });
            *node = ObjectPatProp::KeyValue(KeyValuePatProp {
                key,
                value: Box::new(value),
            });
            return;
        }

        node.visit_mut_children_with(self);
    }

    fn visit_mut_prop_name(&mut self, node: &mut PropName) {
        match node {
            PropName::Ident(ident) => self.replace_ident_name(ident),
            _ => node.visit_mut_children_with(self),
        }
    }

    fn visit_mut_prop(&mut self, node: &mut Prop) {
        if let Prop::Shorthand(ident) = node {
            let Some(mangled) = self.mangled(ident.sym.as_str()) else {
                return;
            };

            // `{ foo }` => `{ aa: foo }`
            let key = PropName::Ident(IdentName {
                span: ident.span,
                sym: mangled.into(),
            });
            let value = Box::new(Expr::Ident(ident.clone()));
            *node = Prop::KeyValue(KeyValueProp { key, value });
            return;
        }

        node.visit_mut_children_with(self);
    }

    fn visit_mut_str(&mut self, lit: &mut Str) {
        self.replace_str(lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> MappingSet {
        MappingSet::from_entries(&["foo:aa", "bar:bb", "baz:cc"]).unwrap()
    }

    #[test]
    fn quoted_and_dotted_names_in_code() {
        let maps = maps();

        assert_eq!(
            replace_in_code("var o = { 'foo': 1 }; o[\"bar\"] = 2; o.baz = 3; o['bar'];", &maps),
            "var o = { 'aa': 1 }; o[\"bb\"] = 2; o.cc = 3; o['bb'];"
        );
        assert_eq!(
            replace_in_code("var obj = { foo: 1, 'bar': 2, \"baz\": 3 };", &maps),
            "var obj = { foo: 1, 'bb': 2, \"cc\": 3 };"
        );
    }

    fn mangle(code: &str) -> String {
        let maps = maps();
        let mut module = crate::parse(code).unwrap();
        module.visit_mut_with(&mut PropertyReplacer::new(&maps, crate::EMBEDDED_CODE_MARKER));

        crate::codegen(&module, crate::CodegenOption { minify: true }).unwrap()
    }

    #[test]
    fn destructured_properties() {
        let code = mangle("var o = { foo: 1 }; var { foo } = o; var { bar = o.baz, qux } = o;");

        assert!(code.contains("aa:1"), "{code}");
        assert!(code.contains("aa:foo"), "{code}");
        assert!(code.contains("bb:bar=o.cc"), "{code}");
        assert!(code.contains("qux"), "{code}");
    }

    #[test]
    fn super_properties() {
        let code =
            mangle("class A { foo() {} } class B extends A { bar() { return super.foo() + super['baz']; } }");

        assert!(code.contains("aa()"), "{code}");
        assert!(code.contains("bb()"), "{code}");
        assert!(code.contains("super.aa()"), "{code}");
        assert!(code.contains("super[\"cc\"]"), "{code}");
        assert!(!code.contains("foo"), "{code}");
    }

    #[test]
    fn unmapped_names_in_code() {
        let maps = maps();
        let code = "var o = { 'foo2': 1 }; o[\"bar2\"] = 2; o.baz2 = 3; x = 'foo bar'; 1.5";

        assert_eq!(replace_in_code(code, &maps), code);
    }
}

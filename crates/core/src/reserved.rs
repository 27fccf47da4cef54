//! Tokens that must never be mangled, each with the categories explaining why.

use rustc_hash::FxHashMap;

use crate::ident::{ATOMS, KEYWORDS, RESERVED_WORDS};

pub const CUSTOM_RESERVED: &str = "custom reserved";

/// Properties every object inherits. They are seeded with an empty category list
/// so a lookup never depends on how the host map treats such keys.
const OBJECT_PROTOTYPE: &[&str] = &[
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
    "__proto__",
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];

const GLOBAL_OBJECTS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "EvalError", "Function", "Infinity", "JSON", "Math",
    "NaN", "Number", "Object", "RangeError", "ReferenceError", "RegExp", "String", "SyntaxError",
    "TypeError", "URIError", "arguments", "clearInterval", "clearTimeout", "console",
    "decodeURI", "decodeURIComponent", "encodeURI", "encodeURIComponent", "escape", "eval",
    "isFinite", "isNaN", "parseFloat", "parseInt", "setInterval", "setTimeout", "unescape",
];

const ARRAY_PROPERTIES: &[&str] = &[
    "concat", "every", "filter", "forEach", "indexOf", "join", "lastIndexOf", "length", "map",
    "pop", "push", "reduce", "reduceRight", "reverse", "shift", "slice", "some", "sort",
    "splice", "unshift",
];

const STRING_PROPERTIES: &[&str] = &[
    "charAt", "charCodeAt", "fromCharCode", "indexOf", "lastIndexOf", "length", "localeCompare",
    "match", "replace", "search", "slice", "split", "substr", "substring", "toLowerCase",
    "toUpperCase", "trim",
];

const FUNCTION_PROPERTIES: &[&str] = &["apply", "bind", "call", "caller", "length", "name", "prototype"];

const DOM: &[&str] = &[
    "addEventListener", "appendChild", "body", "createElement", "document", "getElementById",
    "getElementsByTagName", "innerHTML", "location", "navigator", "removeChild",
    "removeEventListener", "setAttribute", "getAttribute", "style", "window",
];

/// Engine tables in registration order. A token found in several tables lists
/// the categories in this order.
const ENGINE_RESERVED: &[(&str, &[&str])] = &[
    ("keyword", KEYWORDS),
    ("reserved word", RESERVED_WORDS),
    ("atom", ATOMS),
    ("global object", GLOBAL_OBJECTS),
    ("object property", OBJECT_PROTOTYPE),
    ("array property", ARRAY_PROPERTIES),
    ("string property", STRING_PROPERTIES),
    ("function property", FUNCTION_PROPERTIES),
    ("dom", DOM),
];

#[derive(Debug, Default)]
pub struct ReservedTokenIndex {
    categories: FxHashMap<String, Vec<&'static str>>,
}

impl ReservedTokenIndex {
    pub fn new<S: AsRef<str>>(custom_reserved: &[S]) -> Self {
        let mut index = Self::default();

        for name in OBJECT_PROTOTYPE {
            index.categories.entry(name.to_string()).or_default();
        }

        for &(category, names) in ENGINE_RESERVED {
            for name in names.iter() {
                index.register(category, name);
            }
        }

        for name in custom_reserved {
            index.register(CUSTOM_RESERVED, name.as_ref());
        }

        index
    }

    fn register(&mut self, category: &'static str, name: &str) {
        let categories = self.categories.entry(name.to_string()).or_default();
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    /// Categories `token` is reserved under, empty when it may be mangled.
    pub fn categories(&self, token: &str) -> &[&'static str] {
        self.categories.get(token).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_reserved(&self, token: &str) -> bool {
        !self.categories(token).is_empty()
    }
}

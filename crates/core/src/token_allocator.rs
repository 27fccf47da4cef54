use crate::ident::is_identifier;

const LEADING: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_";
const TRAILING: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_0123456789";

/// Short name for `index`: the first character never is a digit, later ones may be.
/// Distinct indexes give distinct names.
pub fn base54(index: usize) -> String {
    let mut pos = index;
    let mut base = LEADING.len();
    let mut alphabet = LEADING;
    let mut r = String::new();

    loop {
        r.push(alphabet[pos % base] as char);
        pos /= base;

        if pos == 0 {
            return r;
        }

        alphabet = TRAILING;
        base = TRAILING.len();
    }
}

#[derive(Debug)]
pub struct TokenAllocator {
    /// Last index handed to `base54`; -1 before the first candidate.
    pos: isize,
}

impl Default for TokenAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenAllocator {
    pub fn new() -> Self {
        Self { pos: -1 }
    }

    fn next_candidate(&mut self) -> String {
        self.pos += 1;
        base54(self.pos as usize)
    }

    /// Next name that is a valid identifier and not `is_taken`.
    pub fn alloc(&mut self, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let s = self.next_candidate();

            if !is_taken(&s) && is_identifier(&s) {
                return s;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn short_names() {
        let v = (0..200).map(base54).collect::<Vec<_>>();

        assert_eq!(v[0], "a");
        assert_eq!(v[25], "z");
        assert_eq!(v[26], "A");
        assert_eq!(v[52], "$");
        assert_eq!(v[53], "_");
        assert_eq!(v[54], "ab");
        assert_eq!(v[55], "bb");
        assert_eq!(v[108], "ac");
        assert_eq!(v.iter().collect::<FxHashSet<_>>().len(), 200);
    }

    #[test]
    fn digits_only_after_first_character() {
        assert_eq!(base54(54 * 54), "a0");
        assert!((0..10_000).map(base54).all(|s| !s.as_bytes()[0].is_ascii_digit()));
    }

    #[test]
    fn ident_alloc() {
        let mut token = TokenAllocator::new();

        let v = (0..200).map(|_| token.alloc(|_| false)).collect::<Vec<_>>();

        assert_eq!(v[0], "a");
        assert_eq!(v[199], base54(199));
    }

    #[test]
    fn ident_alloc_with_used() {
        let mut token = TokenAllocator::new();
        let used = FxHashSet::from_iter(["b".to_string()]);

        let v = (0..3)
            .map(|_| token.alloc(|s| used.contains(s)))
            .collect::<Vec<_>>();

        assert_eq!(v, vec!["a", "c", "d"]);
    }

    #[test]
    fn skips_keywords() {
        // index 278 is "if"
        assert_eq!(base54(278), "if");

        let mut token = TokenAllocator { pos: 276 };

        assert_eq!(token.alloc(|_| false), base54(277));
        assert_eq!(token.alloc(|_| false), base54(279));
    }
}

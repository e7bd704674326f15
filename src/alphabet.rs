//! Alphabet abstractions consumed (never owned) by the automaton core.
//!
//! Grounded on `original_source/include/mata/alphabet.hh`: an `Alphabet`
//! trait with three canonical implementations (`IntAlphabet`, `EnumAlphabet`,
//! `OnTheFlyAlphabet`). The reference crate's own `automata::alphabet`
//! module (a `Segmentation` of byte ranges for a lexer) solves a related but
//! narrower problem — it informed keeping the alphabet's symbol set itself
//! as an [`OrdVector`], but its division/byte-range machinery has no
//! counterpart here, since this spec's alphabet is a set of opaque symbols,
//! not a segmentation of a byte range.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::ord_vector::OrdVector;
use crate::symbol::Symbol;

/// An alphabet: a name↔symbol mapping plus the ability to enumerate and
/// complement symbol sets. Two alphabet values are equal iff they are the
/// same instance (identity), matching the reference semantics; this crate
/// models that with `std::ptr::eq` on trait-object references rather than a
/// `PartialEq` impl, since structurally-equal-but-distinct alphabets must
/// still compare unequal.
pub trait Alphabet: std::fmt::Debug {
    /// Maps a symbol name to its numeric value, allocating a fresh value if
    /// the implementation supports on-the-fly growth.
    fn translate_symbol(&self, name: &str) -> Result<Symbol>;

    /// The inverse of [`Alphabet::translate_symbol`], if the symbol is known.
    fn reverse_translate_symbol(&self, symbol: Symbol) -> Option<String>;

    /// All symbols this alphabet currently knows about, in ascending order.
    fn get_alphabet_symbols(&self) -> Result<OrdVector<Symbol>>;

    /// `get_alphabet_symbols() \ symbols`.
    fn get_complement(&self, symbols: &OrdVector<Symbol>) -> Result<OrdVector<Symbol>>;
}

/// Returns whether two alphabet references are the very same instance.
pub fn same_alphabet(a: &dyn Alphabet, b: &dyn Alphabet) -> bool {
    std::ptr::eq(a as *const dyn Alphabet as *const (), b as *const dyn Alphabet as *const ())
}

/// Every non-negative integer is its own symbol. Has no finite symbol set,
/// so enumeration and complementation are unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntAlphabet;

impl Alphabet for IntAlphabet {
    fn translate_symbol(&self, name: &str) -> Result<Symbol> {
        name.parse::<Symbol>()
            .map_err(|_| Error::InvalidArgument(format!("`{name}` is not a valid integer symbol")))
    }

    fn reverse_translate_symbol(&self, symbol: Symbol) -> Option<String> {
        Some(symbol.to_string())
    }

    fn get_alphabet_symbols(&self) -> Result<OrdVector<Symbol>> {
        Err(Error::UnsupportedOperation(
            "IntAlphabet has no finite symbol set to enumerate".into(),
        ))
    }

    fn get_complement(&self, _symbols: &OrdVector<Symbol>) -> Result<OrdVector<Symbol>> {
        Err(Error::UnsupportedOperation("IntAlphabet cannot be complemented".into()))
    }
}

/// A finite, explicitly enumerated set of symbols with optional names.
#[derive(Debug, Clone, Default)]
pub struct EnumAlphabet {
    symbols: OrdVector<Symbol>,
    names: HashMap<String, Symbol>,
    reverse: HashMap<Symbol, String>,
}

impl EnumAlphabet {
    /// An alphabet with no symbols.
    pub fn new() -> Self {
        EnumAlphabet::default()
    }

    /// Builds an alphabet from `(name, symbol)` pairs.
    pub fn from_symbols(pairs: impl IntoIterator<Item = (String, Symbol)>) -> Self {
        let mut a = EnumAlphabet::new();
        for (name, sym) in pairs {
            a.add_new_symbol(name, sym);
        }
        a
    }

    /// Adds a named symbol, overwriting any previous name for the same value.
    pub fn add_new_symbol(&mut self, name: String, symbol: Symbol) {
        self.symbols.insert(symbol);
        self.reverse.insert(symbol, name.clone());
        self.names.insert(name, symbol);
    }

    /// The next unused symbol value, for callers allocating fresh symbols.
    pub fn get_next_value(&self) -> Symbol {
        self.symbols.iter().max().map(|m| m + 1).unwrap_or(0)
    }

    pub fn get_number_of_symbols(&self) -> usize {
        self.symbols.len()
    }
}

impl Alphabet for EnumAlphabet {
    fn translate_symbol(&self, name: &str) -> Result<Symbol> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("unknown symbol name `{name}`")))
    }

    fn reverse_translate_symbol(&self, symbol: Symbol) -> Option<String> {
        self.reverse.get(&symbol).cloned()
    }

    fn get_alphabet_symbols(&self) -> Result<OrdVector<Symbol>> {
        Ok(self.symbols.clone())
    }

    fn get_complement(&self, symbols: &OrdVector<Symbol>) -> Result<OrdVector<Symbol>> {
        Ok(self.symbols.difference(symbols))
    }
}

/// A name→symbol map that allocates a fresh symbol the first time a name is seen.
#[derive(Debug, Default)]
pub struct OnTheFlyAlphabet {
    inner: RefCell<OnTheFlyInner>,
}

#[derive(Debug, Default)]
struct OnTheFlyInner {
    names: HashMap<String, Symbol>,
    reverse: HashMap<Symbol, String>,
    next_symbol_value: Symbol,
}

impl OnTheFlyAlphabet {
    pub fn new() -> Self {
        OnTheFlyAlphabet::default()
    }

    /// Builds an alphabet pre-seeded with `initial_symbol_value` as the next value to allocate.
    pub fn with_next_value(initial_symbol_value: Symbol) -> Self {
        OnTheFlyAlphabet {
            inner: RefCell::new(OnTheFlyInner { next_symbol_value: initial_symbol_value, ..Default::default() }),
        }
    }

    /// Looks up `name`, allocating a fresh symbol if it has not been seen before.
    /// Returns `(symbol, was_freshly_inserted)`.
    pub fn try_add_new_symbol(&self, name: &str) -> (Symbol, bool) {
        let mut inner = self.inner.borrow_mut();
        if let Some(&s) = inner.names.get(name) {
            return (s, false);
        }
        let s = inner.next_symbol_value;
        inner.next_symbol_value += 1;
        inner.names.insert(name.to_string(), s);
        inner.reverse.insert(s, name.to_string());
        (s, true)
    }
}

impl Alphabet for OnTheFlyAlphabet {
    fn translate_symbol(&self, name: &str) -> Result<Symbol> {
        Ok(self.try_add_new_symbol(name).0)
    }

    fn reverse_translate_symbol(&self, symbol: Symbol) -> Option<String> {
        self.inner.borrow().reverse.get(&symbol).cloned()
    }

    fn get_alphabet_symbols(&self) -> Result<OrdVector<Symbol>> {
        Ok(OrdVector::from_iter_unsorted(self.inner.borrow().reverse.keys().copied()))
    }

    fn get_complement(&self, symbols: &OrdVector<Symbol>) -> Result<OrdVector<Symbol>> {
        Ok(self.get_alphabet_symbols()?.difference(symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_alphabet_round_trips_but_cannot_enumerate() {
        let a = IntAlphabet;
        assert_eq!(a.translate_symbol("42").unwrap(), 42);
        assert_eq!(a.reverse_translate_symbol(42).unwrap(), "42");
        assert!(a.get_alphabet_symbols().is_err());
    }

    #[test]
    fn enum_alphabet_translate_and_complement() {
        let a = EnumAlphabet::from_symbols([("a".to_string(), 0), ("b".to_string(), 1), ("c".to_string(), 2)]);
        assert_eq!(a.translate_symbol("b").unwrap(), 1);
        let comp = a.get_complement(&OrdVector::from_iter_unsorted([1])).unwrap();
        assert_eq!(comp.as_slice(), &[0, 2]);
    }

    #[test]
    fn on_the_fly_allocates_once_per_name() {
        let a = OnTheFlyAlphabet::new();
        let (s1, fresh1) = a.try_add_new_symbol("x");
        let (s2, fresh2) = a.try_add_new_symbol("x");
        let (s3, fresh3) = a.try_add_new_symbol("y");
        assert_eq!(s1, s2);
        assert!(fresh1 && !fresh2 && fresh3);
        assert_ne!(s1, s3);
    }

    #[test]
    fn same_alphabet_is_identity_not_structural() {
        let a = IntAlphabet;
        let b = IntAlphabet;
        assert!(same_alphabet(&a, &a));
        assert!(!same_alphabet(&a, &b));
    }
}

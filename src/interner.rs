use std::fmt;

use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

/// Type alias for our symbol type
pub type Symbol = DefaultSymbol;

type Interner = StringInterner<DefaultBackend>;

thread_local! {
    static INTERNER: std::cell::RefCell<Interner> =
        std::cell::RefCell::new(StringInterner::new());
}

/// Intern a string and return its symbol
pub fn intern(s: &str) -> Symbol {
    INTERNER.with(|interner| interner.borrow_mut().get_or_intern(s))
}

/// Resolve a symbol back to its string
pub fn resolve(sym: Symbol) -> Option<String> {
    INTERNER.with(|interner| interner.borrow().resolve(sym).map(|s| s.to_string()))
}

/// An interned identifier: variable, binder, constructor, type or
/// annotation-variable name.
///
/// Names are only meaningful on the thread that interned them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(Symbol);

impl Name {
    pub fn new(text: &str) -> Self {
        Name(intern(text))
    }

    pub fn symbol(self) -> Symbol {
        self.0
    }

    pub fn as_string(self) -> String {
        resolve(self.0).unwrap_or_default()
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_string())
    }
}

use crate::binding::{Binding, BindingKind};
use crate::builtin;

/// A resolved identifier.
#[derive(Debug, Clone, Copy)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub kind: BindingKind<'a>,
    /// Only builtins are pure; caller bindings may observe or mutate external state.
    pub pure: bool,
}

/// Maps identifiers to caller bindings first and builtins second.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'s, 'a> {
    bindings: &'s [Binding<'a>],
}

impl<'s, 'a> Resolver<'s, 'a> {
    pub fn new(bindings: &'s [Binding<'a>]) -> Self {
        Self { bindings }
    }

    pub fn resolve(&self, name: &str) -> Option<Symbol<'a>> {
        self.bindings
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| Symbol {
                name: binding.name,
                kind: binding.kind,
                pure: false,
            })
            .or_else(|| {
                builtin::lookup(name).map(|builtin| Symbol {
                    name: builtin.name,
                    kind: BindingKind::Function(builtin.function),
                    pure: true,
                })
            })
    }
}

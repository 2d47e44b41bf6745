// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{fmt, ops::BitOr};

use ahash::AHashMap;
use oxc_ast::ast::Function;

/// Kind of node a [`Scope`] belongs to.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScopeFlags(u8);

impl ScopeFlags {
    pub const GLOBAL: Self = Self(1 << 0);
    pub const FUNCTION: Self = Self(1 << 1);
    pub const BLOCK: Self = Self(1 << 2);
    /// The function has a default value or a pattern in its parameter list,
    /// so its parameters are bound in an environment of their own.
    pub const PARAMETER_EXPRESSIONS: Self = Self(1 << 3);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ScopeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for ScopeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::GLOBAL, "GLOBAL"),
            (Self::FUNCTION, "FUNCTION"),
            (Self::BLOCK, "BLOCK"),
            (Self::PARAMETER_EXPRESSIONS, "PARAMETER_EXPRESSIONS"),
        ];
        write_flag_names(f, names.iter().filter(|(flag, _)| self.contains(*flag)).map(|(_, name)| *name))
    }
}

/// How a name was declared. A name declared more than once in the same
/// scope carries the union of its kinds, e.g. `var a; function a() {}`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DeclarationFlags(u8);

impl DeclarationFlags {
    pub const VAR: Self = Self(1 << 0);
    pub const LET: Self = Self(1 << 1);
    pub const CONST: Self = Self(1 << 2);
    pub const FUNCTION: Self = Self(1 << 3);
    pub const PARAM: Self = Self(1 << 4);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Declared by `let` or `const`.
    pub const fn is_lexical(self) -> bool {
        self.0 & (Self::LET.0 | Self::CONST.0) != 0
    }
}

impl BitOr for DeclarationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for DeclarationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::VAR, "var"),
            (Self::LET, "let"),
            (Self::CONST, "const"),
            (Self::FUNCTION, "function"),
            (Self::PARAM, "param"),
        ];
        write_flag_names(f, names.iter().filter(|(flag, _)| self.contains(*flag)).map(|(_, name)| *name))
    }
}

fn write_flag_names<'n>(f: &mut fmt::Formatter<'_>, mut names: impl Iterator<Item = &'n str>) -> fmt::Result {
    match names.next() {
        None => f.write_str("(empty)"),
        Some(first) => {
            f.write_str(first)?;
            names.try_for_each(|name| write!(f, " | {name}"))
        }
    }
}

/// A static scope: the names a function, block, loop head, switch or catch
/// clause declares, and the function declarations that must be
/// instantiated when control enters it.
pub struct Scope<'a> {
    pub flags: ScopeFlags,
    /// Declared names in order of first declaration.
    declarations: Vec<(&'a str, DeclarationFlags)>,
    index: AHashMap<&'a str, usize>,
    /// One function per name, the last declaration winning, in source order.
    functions: Vec<&'a Function<'a>>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(flags: ScopeFlags) -> Self {
        Self {
            flags,
            declarations: Vec::new(),
            index: AHashMap::default(),
            functions: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<DeclarationFlags> {
        self.index.get(name).map(|index| self.declarations[*index].1)
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declared names with their kinds, in order of first declaration.
    pub fn declarations(&self) -> impl Iterator<Item = (&'a str, DeclarationFlags)> + '_ {
        self.declarations.iter().copied()
    }

    /// Function declarations to instantiate on entry.
    pub fn functions(&self) -> &[&'a Function<'a>] {
        &self.functions
    }

    pub(crate) fn declare(&mut self, name: &'a str, flags: DeclarationFlags) {
        match self.index.get(name) {
            Some(index) => {
                let declared = &mut self.declarations[*index].1;
                *declared = *declared | flags;
            }
            None => {
                self.index.insert(name, self.declarations.len());
                self.declarations.push((name, flags));
            }
        }
    }

    pub(crate) fn hoist_function(&mut self, function: &'a Function<'a>) {
        // Overload signatures have no body and declare nothing.
        let (Some(id), Some(_)) = (&function.id, &function.body) else {
            return;
        };
        let name = id.name.as_str();
        self.declare(name, DeclarationFlags::FUNCTION);
        self.functions.retain(|hoisted| hoisted.id.as_ref().is_none_or(|id| id.name != name));
        self.functions.push(function);
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("flags", &self.flags)
            .field("declarations", &self.declarations)
            .field("functions", &self.functions.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn declarations_merge_their_kinds() {
        let mut scope = Scope::new(ScopeFlags::FUNCTION);
        scope.declare("a", DeclarationFlags::VAR);
        scope.declare("b", DeclarationFlags::CONST);
        scope.declare("a", DeclarationFlags::FUNCTION);
        let a = scope.get("a").unwrap();
        assert!(a.contains(DeclarationFlags::VAR));
        assert!(a.contains(DeclarationFlags::FUNCTION));
        assert!(!a.is_lexical());
        assert!(scope.get("b").unwrap().is_lexical());
        assert!(!scope.has("c"));
        let names: Vec<_> = scope.declarations().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn flags_render_their_names() {
        assert_eq!(
            format!("{:?}", ScopeFlags::FUNCTION | ScopeFlags::PARAMETER_EXPRESSIONS),
            "FUNCTION | PARAMETER_EXPRESSIONS"
        );
        assert_eq!(format!("{:?}", DeclarationFlags::VAR | DeclarationFlags::PARAM), "var | param");
        assert_eq!(format!("{:?}", DeclarationFlags::default()), "(empty)");
    }
}

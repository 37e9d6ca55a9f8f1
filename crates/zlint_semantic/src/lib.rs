//! Binds names to declarations across a single Zig file.
//!
//! A [`SemanticModel`] is built in one pass over a [`zlint_syntax::Ast`]: it
//! declares every symbol (variables, constants, functions, parameters,
//! container members, and capture payloads), resolves every identifier
//! reference against the nearest visible declaration, and records the
//! file's `@import`/`usingnamespace` graph. Rules that need more than
//! syntax — "is this parameter ever read?", "does this const shadow an
//! outer one?" — are built on top of this model rather than re-walking the
//! AST themselves.

mod builder;
mod ids;
mod model;
mod module;
mod reference;
mod scope;
mod symbol;

pub use builder::{build, AnalysisError};
pub use ids::{ReferenceId, ScopeId, SymbolId};
pub use model::SemanticModel;
pub use module::{Import, ImportKind, USINGNAMESPACE_SPECIFIER};
pub use reference::{Reference, ReferenceFlags};
pub use scope::{Scope, ScopeFlags};
pub use symbol::{Symbol, SymbolFlags};

#[cfg(test)]
mod tests {
    use super::*;
    use zlint_syntax::parse;

    #[test]
    fn builds_empty_file() {
        let parsed = parse("");
        let model = build(&parsed.ast, "").unwrap();
        assert_eq!(model.symbols().count(), 0);
        // The root scope always exists, even for an empty file.
        assert_eq!(model.scope(model.root_scope()).id, ScopeId::ROOT);
    }

    #[test]
    fn unused_const_has_no_references() {
        let src = "const unused = 1;\n";
        let parsed = parse(src);
        let model = build(&parsed.ast, src).unwrap();
        let (_, sym) = model.symbols().find(|(_, s)| &*s.name == "unused").unwrap();
        assert!(sym.is_unused());
    }

    #[test]
    fn every_symbol_scope_is_registered_in_that_scope() {
        let src = "const a = 1;\nfn f(b: u32) void {\n    const c = b;\n    _ = c;\n}\n";
        let parsed = parse(src);
        let model = build(&parsed.ast, src).unwrap();
        for (id, sym) in model.symbols() {
            assert!(model.scope(sym.scope).symbols.contains(&id));
        }
    }
}

use zlint_syntax::NodeId;

use crate::ids::{ReferenceId, ScopeId, SymbolId};
use crate::module::Import;
use crate::reference::Reference;
use crate::scope::Scope;
use crate::symbol::Symbol;

/// Symbols, scopes, references, node-parent links, and the import record
/// for one file. Owned data, no lifetime: names are interned as owned
/// strings at build time so the model outlives the `&str` it was built
/// from (the AST itself carries no text either — only spans).
#[derive(Debug, Clone)]
pub struct SemanticModel {
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) references: Vec<Reference>,
    pub(crate) node_parents: Vec<Option<NodeId>>,
    pub(crate) imports: Vec<Import>,
    pub(crate) unresolved_references: Vec<ReferenceId>,
}

impl SemanticModel {
    #[inline]
    pub fn root_scope(&self) -> ScopeId {
        ScopeId::ROOT
    }

    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.index()]
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (ScopeId(i as u32), s))
    }

    pub fn references(&self) -> impl Iterator<Item = (ReferenceId, &Reference)> {
        self.references
            .iter()
            .enumerate()
            .map(|(i, r)| (ReferenceId(i as u32), r))
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// References that never found a declaration anywhere in their scope
    /// chain, including all the way up through the root scope's
    /// forward-reference pass.
    pub fn unresolved_references(&self) -> &[ReferenceId] {
        &self.unresolved_references
    }

    /// The node directly enclosing `node`, or `None` for the root.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node_parents.get(node.index()).copied().flatten()
    }

    /// Walks `node`'s ancestor chain (excluding `node` itself) up to the
    /// root, without needing to traverse the AST from the top.
    pub fn ancestors_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_of(node), move |&n| self.parent_of(n))
    }

    /// Is `ancestor` the same scope as `scope`, or one of its lexical
    /// ancestors? Used to check the core reference-resolution invariant:
    /// every resolved reference's symbol lives in a scope that is an
    /// ancestor of (or equal to) the reference's own scope.
    pub fn is_ancestor_scope(&self, ancestor: ScopeId, scope: ScopeId) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.scope(id).parent;
        }
        false
    }

    /// Scopes from `scope` up to (and including) the root, innermost first.
    pub fn scope_chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |&s| self.scope(s).parent)
    }

    /// Looks up `name` by climbing `scope`'s lexical ancestor chain, the
    /// same resolution order the builder uses. Useful for rules that need
    /// a post-hoc lookup (e.g. checking whether a shadowing name already
    /// exists) without re-running resolution.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        for s in self.scope_chain(scope) {
            if let Some(&id) = self
                .scope(s)
                .symbols
                .iter()
                .find(|&&sym| self.symbol(sym).name.as_ref() == name)
            {
                return Some(id);
            }
        }
        None
    }
}

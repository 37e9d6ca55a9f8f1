//! Builds a [`SemanticModel`] from a parsed [`Ast`] in one depth-first walk.
//!
//! Symbols are declared and references recorded as the walk proceeds
//! (`Pass A`, inline resolution against everything declared so far in the
//! current scope chain). Container scopes (struct/enum/union/error, and the
//! file root, which is itself an implicit struct) additionally get a
//! `Pass B`: once every member of the container has been declared, any
//! reference that failed to resolve inline is retried against the now-
//! complete scope before bubbling further unresolved references to the
//! parent's pending set. Block-like scopes never get a Pass B of their own
//! — Zig doesn't allow a local variable to be used before its declaration —
//! so an unresolved reference there is simply handed up to the nearest
//! enclosing container.

use rustc_hash::FxHashMap;

use zlint_syntax::{Ast, ContainerKind, DeclFlags, NodeId, NodeKind, TokenId};

use crate::ids::{ReferenceId, ScopeId, SymbolId};
use crate::model::SemanticModel;
use crate::module::{Import, ImportKind, USINGNAMESPACE_SPECIFIER};
use crate::reference::{Reference, ReferenceFlags};
use crate::scope::{Scope, ScopeFlags};
use crate::symbol::{Symbol, SymbolFlags};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    /// An impossible state transition in the builder itself (e.g. an AST
    /// root that isn't `NodeKind::Root`). Never expected to fire against
    /// a tree produced by `zlint_syntax::parse`; exists because the
    /// contract with an external parser can't be enforced at compile time.
    #[error("semantic analysis failed: {0}")]
    AnalysisFailed(String),
}

pub fn build(ast: &Ast, source: &str) -> Result<SemanticModel, AnalysisError> {
    Builder::new(ast, source).build()
}

struct Builder<'a> {
    ast: &'a Ast,
    source: &'a str,
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    references: Vec<Reference>,
    node_parents: Vec<Option<NodeId>>,
    imports: Vec<Import>,
    /// `(scope, name) -> symbol`, populated as symbols are declared.
    symbol_lookup: FxHashMap<(ScopeId, String), SymbolId>,
    /// References awaiting resolution, keyed by the scope they occurred in.
    pending: FxHashMap<ScopeId, Vec<ReferenceId>>,
    scope_stack: Vec<ScopeId>,
    /// Top is the symbol `@This()` should resolve to inside the currently
    /// open container, or `None` for anonymous/non-container scopes.
    container_symbol_stack: Vec<Option<SymbolId>>,
    unresolved_references: Vec<ReferenceId>,
}

impl<'a> Builder<'a> {
    fn new(ast: &'a Ast, source: &'a str) -> Self {
        Self {
            ast,
            source,
            symbols: Vec::new(),
            scopes: Vec::new(),
            references: Vec::new(),
            node_parents: Vec::new(),
            imports: Vec::new(),
            symbol_lookup: FxHashMap::default(),
            pending: FxHashMap::default(),
            scope_stack: Vec::new(),
            container_symbol_stack: Vec::new(),
            unresolved_references: Vec::new(),
        }
    }

    fn build(mut self) -> Result<SemanticModel, AnalysisError> {
        self.compute_node_parents();

        let root = self.ast.root();
        let NodeKind::Root { decls } = self.ast.kind(root).clone() else {
            return Err(AnalysisError::AnalysisFailed(
                "AST root is not NodeKind::Root".to_string(),
            ));
        };

        self.push_scope(ScopeFlags::S_TOP);
        self.container_symbol_stack.push(None);
        self.predeclare_decls(&decls);
        self.visit_decl_bodies(&decls);
        self.container_symbol_stack.pop();
        self.pop_scope();

        debug_assert!(self.scope_stack.is_empty(), "scope stack must be balanced");

        Ok(SemanticModel {
            symbols: self.symbols,
            scopes: self.scopes,
            references: self.references,
            node_parents: self.node_parents,
            imports: self.imports,
            unresolved_references: self.unresolved_references,
        })
    }

    // -- plumbing ---------------------------------------------------------

    fn compute_node_parents(&mut self) {
        let n = self.ast.node_count();
        self.node_parents = vec![None; n];
        for i in 0..n {
            let id = NodeId(i as u32);
            for child in self.ast.children(id) {
                self.node_parents[child.index()] = Some(id);
            }
        }
    }

    fn token_text(&self, token: TokenId) -> String {
        self.ast.tokens().slice(token, self.source).to_string()
    }

    fn current_scope(&self) -> ScopeId {
        *self.scope_stack.last().expect("scope stack must not be empty")
    }

    fn push_scope(&mut self, flags: ScopeFlags) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        let parent = self.scope_stack.last().copied();
        self.scopes.push(Scope {
            id,
            parent,
            flags,
            children: Vec::new(),
            symbols: Vec::new(),
        });
        if let Some(p) = parent {
            self.scopes[p.index()].children.push(id);
        }
        self.scope_stack.push(id);
        self.pending.insert(id, Vec::new());
        id
    }

    /// Pops the current scope, running its resolution pass (Pass B for
    /// container-like scopes, unconditional bubbling otherwise).
    fn pop_scope(&mut self) {
        let id = self.scope_stack.pop().expect("unbalanced scope pop");
        self.resolve_pending_for_scope(id);
    }

    fn resolve_pending_for_scope(&mut self, scope: ScopeId) {
        let pending = self.pending.remove(&scope).unwrap_or_default();
        let forward_refs = self.scopes[scope.index()].flags.allows_forward_references();
        let mut still_unresolved = Vec::new();
        for rid in pending {
            let resolved = if forward_refs {
                let name = self.token_text(self.references[rid.index()].identifier_token);
                self.lookup_in_scope_only(scope, &name)
            } else {
                None
            };
            match resolved {
                Some(sym) => self.link_reference(rid, sym),
                None => still_unresolved.push(rid),
            }
        }
        match self.scopes[scope.index()].parent {
            Some(parent) => self
                .pending
                .get_mut(&parent)
                .expect("parent scope still open")
                .extend(still_unresolved),
            None => self.unresolved_references.extend(still_unresolved),
        }
    }

    fn lookup_in_scope_only(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.symbol_lookup.get(&(scope, name.to_string())).copied()
    }

    /// Pass A: climb the scope chain from `scope` looking for an already-
    /// declared symbol named `name`.
    fn try_resolve_immediate(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(sym) = self.lookup_in_scope_only(id, name) {
                return Some(sym);
            }
            current = self.scopes[id.index()].parent;
        }
        None
    }

    fn link_reference(&mut self, rid: ReferenceId, symbol: SymbolId) {
        self.references[rid.index()].symbol = Some(symbol);
        self.symbols[symbol.index()].references.push(rid);
    }

    fn declare_symbol(
        &mut self,
        scope: ScopeId,
        name: &str,
        decl_node: NodeId,
        token: TokenId,
        flags: SymbolFlags,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name: name.into(),
            decl_node,
            scope,
            token,
            flags,
            members: Vec::new(),
            exports: Vec::new(),
            references: Vec::new(),
        });
        self.scopes[scope.index()].symbols.push(id);
        self.symbol_lookup.insert((scope, name.to_string()), id);
        if flags.contains(SymbolFlags::EXPORT) {
            if let Some(&owner) = self.container_symbol_stack.last().and_then(|o| o.as_ref()) {
                self.symbols[owner.index()].exports.push(id);
            }
        }
        id
    }

    /// Records a read/write/call/type reference for an identifier token,
    /// resolving it immediately if possible (Pass A) and otherwise queuing
    /// it on the current scope's pending list.
    fn record_reference(&mut self, node: NodeId, token: TokenId, flags: ReferenceFlags) -> ReferenceId {
        let scope = self.current_scope();
        let name = self.token_text(token);
        let rid = ReferenceId(self.references.len() as u32);
        let resolved = self.try_resolve_immediate(scope, &name);
        self.references.push(Reference {
            symbol: resolved,
            node,
            scope,
            identifier_token: token,
            flags,
        });
        match resolved {
            Some(sym) => self.symbols[sym.index()].references.push(rid),
            None => self.pending.get_mut(&scope).expect("scope is open").push(rid),
        }
        rid
    }

    fn push_payload_scope(&mut self, owning_node: NodeId, payload: Option<TokenId>, is_catch: bool) -> ScopeId {
        let mut flags = ScopeFlags::S_BLOCK;
        if is_catch {
            flags |= ScopeFlags::CATCH;
        }
        let scope = self.push_scope(flags);
        if let Some(token) = payload {
            let name = self.token_text(token);
            let mut sflags = SymbolFlags::CONST | SymbolFlags::PAYLOAD;
            if is_catch {
                sflags |= SymbolFlags::CATCH_PARAM;
            }
            self.declare_symbol(scope, &name, owning_node, token, sflags);
        }
        scope
    }

    // -- declarations -------------------------------------------------------

    fn predeclare_decls(&mut self, decls: &[NodeId]) {
        let scope = self.current_scope();
        for &d in decls {
            match self.ast.kind(d).clone() {
                NodeKind::VarDecl { flags, name_token, .. } => {
                    let name = self.token_text(name_token);
                    let sym_flags = var_decl_flags(flags);
                    self.declare_symbol(scope, &name, d, name_token, sym_flags);
                }
                NodeKind::FnDecl {
                    flags,
                    name_token: Some(name_token),
                    ..
                } => {
                    let name = self.token_text(name_token);
                    let mut f = SymbolFlags::FN;
                    if flags.contains(DeclFlags::EXPORT) {
                        f |= SymbolFlags::EXPORT;
                    }
                    if flags.contains(DeclFlags::EXTERN) {
                        f |= SymbolFlags::EXTERN;
                    }
                    self.declare_symbol(scope, &name, d, name_token, f);
                }
                _ => {}
            }
        }
    }

    fn predeclare_fields(&mut self, fields: &[NodeId], kind: ContainerKind) {
        let scope = self.current_scope();
        let kind_flag = match kind {
            ContainerKind::Struct => SymbolFlags::STRUCT,
            ContainerKind::Enum => SymbolFlags::ENUM,
            ContainerKind::Union => SymbolFlags::UNION,
            ContainerKind::ErrorSet => SymbolFlags::ERROR,
        };
        for &f in fields {
            if let NodeKind::ContainerField { name_token, .. } = self.ast.kind(f).clone() {
                let name = self.token_text(name_token);
                self.declare_symbol(scope, &name, f, name_token, SymbolFlags::MEMBER | kind_flag);
            }
        }
    }

    fn visit_decl_bodies(&mut self, decls: &[NodeId]) {
        for &d in decls {
            match self.ast.kind(d).clone() {
                NodeKind::VarDecl { name_token, ty, init, .. } => {
                    let scope = self.current_scope();
                    let name = self.token_text(name_token);
                    let sym = *self
                        .symbol_lookup
                        .get(&(scope, name))
                        .expect("decl was predeclared");
                    self.visit_var_decl_init(sym, ty, init);
                }
                NodeKind::FnDecl {
                    flags,
                    params,
                    return_type,
                    body,
                    ..
                } => {
                    self.visit_fn_decl(flags, &params, return_type, body);
                }
                _ => {
                    self.visit(d, false);
                }
            }
        }
    }

    fn visit_var_decl_init(&mut self, sym: SymbolId, ty: Option<NodeId>, init: Option<NodeId>) {
        if let Some(t) = ty {
            self.visit(t, true);
        }
        if let Some(i) = init {
            if let NodeKind::ContainerDecl { kind, fields, decls } = self.ast.kind(i).clone() {
                self.visit_container(i, kind, &fields, &decls, Some(sym));
            } else {
                self.visit(i, false);
            }
        }
    }

    fn visit_container(
        &mut self,
        _node: NodeId,
        kind: ContainerKind,
        fields: &[NodeId],
        decls: &[NodeId],
        owner: Option<SymbolId>,
    ) {
        let scope_flag = match kind {
            ContainerKind::Struct => ScopeFlags::S_STRUCT,
            ContainerKind::Enum => ScopeFlags::S_ENUM,
            ContainerKind::Union => ScopeFlags::S_UNION,
            ContainerKind::ErrorSet => ScopeFlags::S_ERROR,
        };
        self.push_scope(scope_flag);
        self.container_symbol_stack.push(owner);
        self.predeclare_fields(fields, kind);
        self.predeclare_decls(decls);
        for &f in fields {
            if let NodeKind::ContainerField { ty, default, .. } = self.ast.kind(f).clone() {
                if let Some(t) = ty {
                    self.visit(t, true);
                }
                if let Some(def) = default {
                    self.visit(def, false);
                }
            }
        }
        self.visit_decl_bodies(decls);
        self.container_symbol_stack.pop();
        self.pop_scope();
    }

    fn visit_fn_decl(&mut self, _flags: DeclFlags, params: &[NodeId], return_type: Option<NodeId>, body: Option<NodeId>) {
        self.push_scope(ScopeFlags::S_FUNCTION);
        self.container_symbol_stack.push(None);
        for &p in params {
            if let NodeKind::Param { flags: pflags, name_token, ty } = self.ast.kind(p).clone() {
                if let Some(nt) = name_token {
                    let name = self.token_text(nt);
                    let mut f = SymbolFlags::FN_PARAM;
                    if pflags.contains(DeclFlags::COMPTIME) {
                        f |= SymbolFlags::COMPTIME;
                    }
                    let scope = self.current_scope();
                    self.declare_symbol(scope, &name, p, nt, f);
                }
                if let Some(t) = ty {
                    self.visit(t, true);
                }
            }
        }
        if let Some(rt) = return_type {
            self.visit(rt, true);
        }
        // The body block's own scope push (inside `visit`) nests as a child
        // of this signature scope, keeping params visible inside it.
        if let Some(b) = body {
            self.visit(b, false);
        }
        self.container_symbol_stack.pop();
        self.pop_scope();
    }

    fn visit_assign_target(&mut self, lhs: NodeId, compound: bool) {
        match self.ast.kind(lhs).clone() {
            NodeKind::Identifier { token } => {
                let flags = if compound {
                    ReferenceFlags::READ | ReferenceFlags::WRITE
                } else {
                    ReferenceFlags::WRITE
                };
                self.record_reference(lhs, token, flags);
            }
            _ => self.visit(lhs, false),
        }
    }

    fn record_import(&mut self, node: NodeId, specifier: &str) {
        let kind = ImportKind::of_specifier(specifier);
        self.imports.push(Import {
            specifier: specifier.into(),
            kind,
            node,
        });
    }

    fn visit_switch_case(&mut self, case_node: NodeId) {
        if let NodeKind::SwitchCase { values, payload, body, .. } = self.ast.kind(case_node).clone() {
            for v in values {
                self.visit(v, false);
            }
            self.push_payload_scope(case_node, payload, false);
            self.visit(body, false);
            self.pop_scope();
        }
    }

    /// The single recursive entry point for every statement/expression
    /// node that isn't reached through one of the declaration-phase
    /// helpers above. Returns the reference just created when `node` is a
    /// bare identifier, so callers like `Call` can retroactively flag it
    /// `call` without re-resolving it.
    fn visit(&mut self, node: NodeId, in_type: bool) -> Option<ReferenceId> {
        match self.ast.kind(node).clone() {
            NodeKind::Identifier { token } => {
                let mut flags = ReferenceFlags::READ;
                if in_type {
                    flags |= ReferenceFlags::TYPE;
                }
                Some(self.record_reference(node, token, flags))
            }
            NodeKind::FieldAccess { lhs, .. } => {
                self.visit(lhs, in_type);
                None
            }
            NodeKind::Call { callee, args } => {
                let callee_ref = self.visit(callee, false);
                if let Some(rid) = callee_ref {
                    self.references[rid.index()].flags |= ReferenceFlags::CALL;
                }
                for a in args {
                    self.visit(a, false);
                }
                None
            }
            NodeKind::BuiltinCall { name_token, args } => {
                let name = self.token_text(name_token);
                if name == "@import" {
                    if let Some(&first) = args.first() {
                        if let NodeKind::StringLiteral { token } = self.ast.kind(first).clone() {
                            let text = self.token_text(token);
                            let specifier = text.trim_matches('"').to_string();
                            self.record_import(node, &specifier);
                        }
                    }
                } else if name == "@This" && args.is_empty() {
                    let scope = self.current_scope();
                    let symbol = self.container_symbol_stack.last().copied().flatten();
                    let rid = ReferenceId(self.references.len() as u32);
                    self.references.push(Reference {
                        symbol,
                        node,
                        scope,
                        identifier_token: name_token,
                        flags: ReferenceFlags::READ,
                    });
                    if let Some(sym) = symbol {
                        self.symbols[sym.index()].references.push(rid);
                    }
                    return Some(rid);
                }
                for a in args {
                    self.visit(a, false);
                }
                None
            }
            NodeKind::BinaryExpr { lhs, rhs, .. } => {
                self.visit(lhs, in_type);
                self.visit(rhs, in_type);
                None
            }
            NodeKind::UnaryExpr { expr, .. } => {
                self.visit(expr, in_type);
                None
            }
            NodeKind::Assign { op, lhs, rhs } => {
                self.visit_assign_target(lhs, op.is_compound());
                self.visit(rhs, false);
                None
            }
            NodeKind::Grouped { inner } => self.visit(inner, in_type),
            NodeKind::OptionalType { inner } => {
                self.visit(inner, true);
                None
            }
            NodeKind::PointerType { inner, .. } => {
                self.visit(inner, true);
                None
            }
            NodeKind::SliceType { inner } => {
                self.visit(inner, true);
                None
            }
            NodeKind::ArrayType { len, inner } => {
                if let Some(l) = len {
                    self.visit(l, false);
                }
                self.visit(inner, true);
                None
            }
            NodeKind::ErrorUnion { error_set, payload } => {
                if let Some(e) = error_set {
                    self.visit(e, true);
                }
                self.visit(payload, true);
                None
            }
            NodeKind::ContainerDecl { kind, fields, decls } => {
                self.visit_container(node, kind, &fields, &decls, None);
                None
            }
            NodeKind::Comptime { body } => {
                self.push_scope(ScopeFlags::S_COMPTIME);
                self.visit(body, in_type);
                self.pop_scope();
                None
            }
            NodeKind::Block { stmts } => {
                self.push_scope(ScopeFlags::S_BLOCK);
                for s in stmts {
                    self.visit(s, false);
                }
                self.pop_scope();
                None
            }
            NodeKind::ExprStmt { expr } => {
                self.visit(expr, false);
                None
            }
            NodeKind::VarDecl { flags, name_token, ty, init } => {
                let sym_flags = var_decl_flags(flags);
                let scope = self.current_scope();
                let name = self.token_text(name_token);
                let sym = self.declare_symbol(scope, &name, node, name_token, sym_flags);
                self.visit_var_decl_init(sym, ty, init);
                None
            }
            NodeKind::If {
                cond,
                payload,
                then_branch,
                else_branch,
                else_payload,
            } => {
                self.visit(cond, false);
                self.push_payload_scope(node, payload, false);
                self.visit(then_branch, false);
                self.pop_scope();
                if let Some(eb) = else_branch {
                    self.push_payload_scope(node, else_payload, else_payload.is_some());
                    self.visit(eb, false);
                    self.pop_scope();
                }
                None
            }
            NodeKind::While {
                cond,
                payload,
                continue_expr,
                body,
                else_branch,
            } => {
                self.visit(cond, false);
                self.push_payload_scope(node, payload, false);
                if let Some(c) = continue_expr {
                    self.visit(c, false);
                }
                self.visit(body, false);
                self.pop_scope();
                if let Some(e) = else_branch {
                    self.visit(e, false);
                }
                None
            }
            NodeKind::For {
                inputs,
                payloads,
                body,
                else_branch,
            } => {
                for i in &inputs {
                    self.visit(*i, false);
                }
                let scope = self.push_scope(ScopeFlags::S_BLOCK);
                for tok in &payloads {
                    let name = self.token_text(*tok);
                    self.declare_symbol(scope, &name, node, *tok, SymbolFlags::CONST | SymbolFlags::PAYLOAD);
                }
                self.visit(body, false);
                self.pop_scope();
                if let Some(e) = else_branch {
                    self.visit(e, false);
                }
                None
            }
            NodeKind::Switch { cond, cases } => {
                self.visit(cond, false);
                for c in cases {
                    self.visit_switch_case(c);
                }
                None
            }
            NodeKind::SwitchCase { .. } => {
                self.visit_switch_case(node);
                None
            }
            NodeKind::Catch { expr, payload, fallback } => {
                self.visit(expr, false);
                self.push_payload_scope(node, payload, true);
                self.visit(fallback, false);
                self.pop_scope();
                None
            }
            NodeKind::Defer { expr } => {
                self.visit(expr, false);
                None
            }
            NodeKind::ErrDefer { payload, expr } => {
                self.push_payload_scope(node, payload, true);
                self.visit(expr, false);
                self.pop_scope();
                None
            }
            NodeKind::Return { expr } => {
                if let Some(e) = expr {
                    self.visit(e, false);
                }
                None
            }
            NodeKind::Try { expr } => {
                self.visit(expr, false);
                None
            }
            NodeKind::Break { expr, .. } => {
                if let Some(e) = expr {
                    self.visit(e, false);
                }
                None
            }
            NodeKind::Continue { .. } => None,
            NodeKind::TestDecl { body, .. } => {
                self.visit(body, false);
                None
            }
            NodeKind::UsingNamespace { expr } => {
                self.record_import(node, USINGNAMESPACE_SPECIFIER);
                self.visit(expr, false);
                None
            }
            // Leaves, and nodes only ever reached through a dedicated
            // declaration-phase helper (Root, ContainerField, FnDecl,
            // Param) rather than this generic dispatch.
            _ => None,
        }
    }
}

fn var_decl_flags(flags: DeclFlags) -> SymbolFlags {
    let mut f = if flags.contains(DeclFlags::CONST) {
        SymbolFlags::CONST
    } else {
        SymbolFlags::VARIABLE
    };
    if flags.contains(DeclFlags::COMPTIME) {
        f |= SymbolFlags::COMPTIME;
    }
    if flags.contains(DeclFlags::EXPORT) {
        f |= SymbolFlags::EXPORT;
    }
    if flags.contains(DeclFlags::EXTERN) {
        f |= SymbolFlags::EXTERN;
    }
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use zlint_syntax::parse;

    fn model_of(src: &str) -> SemanticModel {
        let parsed = parse(src);
        assert!(!parsed.has_errors(), "unexpected parse errors: {:?}", parsed.errors);
        build(&parsed.ast, src).expect("analysis should succeed")
    }

    #[test]
    fn resolves_a_simple_reference() {
        let model = model_of("const x = 1;\nconst y = x;\n");
        let (_, y) = model.symbols().find(|(_, s)| &*s.name == "y").unwrap();
        assert_eq!(y.references.len(), 0);
        let (_, x) = model.symbols().find(|(_, s)| &*s.name == "x").unwrap();
        assert_eq!(x.references.len(), 1);
    }

    #[test]
    fn forward_reference_within_struct_resolves() {
        let src = "const Foo = struct {\n    fn a() void { b(); }\n    fn b() void {}\n};\n";
        let model = model_of(src);
        let (_, b) = model.symbols().find(|(_, s)| &*s.name == "b").unwrap();
        assert_eq!(b.references.len(), 1);
    }

    #[test]
    fn forward_reference_in_block_does_not_resolve() {
        let src = "fn f() void {\n    const a = b;\n    const b = 1;\n    _ = a;\n}\n";
        let model = model_of(src);
        assert_eq!(model.unresolved_references().len(), 1);
        let rid = model.unresolved_references()[0];
        assert!(model.reference(rid).symbol.is_none());
    }

    #[test]
    fn reference_scope_is_descendant_of_symbol_scope_invariant() {
        let src = "const x = 1;\nfn f() void {\n    _ = x;\n}\n";
        let model = model_of(src);
        for (_, reference) in model.references() {
            if let Some(sym) = reference.symbol {
                let sym_scope = model.symbol(sym).scope;
                assert!(model.is_ancestor_scope(sym_scope, reference.scope));
            }
        }
    }

    #[test]
    fn scope_parent_ids_are_strictly_increasing_with_dfs_order() {
        let src = "fn f() void {\n    if (true) {\n        const a = 1;\n        _ = a;\n    }\n}\n";
        let model = model_of(src);
        for (id, scope) in model.scopes() {
            if let Some(parent) = scope.parent {
                assert!(parent.0 < id.0);
            }
        }
    }

    #[test]
    fn payload_capture_is_const_and_scoped_to_branch() {
        let src = "fn f(m: ?u32) void {\n    if (m) |v| {\n        _ = v;\n    }\n}\n";
        let model = model_of(src);
        let (_, v) = model.symbols().find(|(_, s)| &*s.name == "v").unwrap();
        assert!(v.is_payload());
        assert!(v.is_const());
        assert_eq!(v.references.len(), 1);
    }

    #[test]
    fn catch_payload_sets_catch_param_flag() {
        let src = "fn f() void {\n    doThing() catch |err| {\n        _ = err;\n    };\n}\n";
        let model = model_of(src);
        let (_, err) = model.symbols().find(|(_, s)| &*s.name == "err").unwrap();
        assert!(err.flags.contains(SymbolFlags::CATCH_PARAM));
    }

    #[test]
    fn import_is_recorded_with_file_or_module_kind() {
        let src = "const std = @import(\"std\");\nconst helper = @import(\"helper.zig\");\n";
        let model = model_of(src);
        assert_eq!(model.imports().len(), 2);
        assert_eq!(model.imports()[0].kind, ImportKind::Module);
        assert_eq!(model.imports()[1].kind, ImportKind::File);
    }

    #[test]
    fn usingnamespace_is_recorded_as_anonymous_import() {
        let src = "usingnamespace @import(\"a.zig\");\n";
        let model = model_of(src);
        assert_eq!(model.imports().len(), 2);
        assert!(model.imports().iter().any(|i| &*i.specifier == USINGNAMESPACE_SPECIFIER));
    }

    #[test]
    fn compound_assignment_sets_read_and_write() {
        let src = "fn f() void {\n    var x: u32 = 0;\n    x += 1;\n}\n";
        let model = model_of(src);
        let (_, x) = model.symbols().find(|(_, s)| &*s.name == "x").unwrap();
        assert_eq!(x.references.len(), 1);
        let rid = x.references[0];
        let reference = model.reference(rid);
        assert!(reference.is_read());
        assert!(reference.is_write());
    }

    #[test]
    fn function_params_are_visible_in_body() {
        let src = "fn add(a: u32, b: u32) u32 {\n    return a + b;\n}\n";
        let model = model_of(src);
        let (_, a) = model.symbols().find(|(_, s)| &*s.name == "a").unwrap();
        assert!(a.is_param());
        assert_eq!(a.references.len(), 1);
    }

    #[test]
    fn this_resolves_to_enclosing_container_symbol() {
        let src = "const Foo = struct {\n    fn self() type {\n        return @This();\n    }\n};\n";
        let model = model_of(src);
        let (foo_id, _) = model.symbols().find(|(_, s)| &*s.name == "Foo").unwrap();
        let this_ref = model
            .references()
            .find(|(_, r)| r.flags == ReferenceFlags::READ && r.symbol == Some(foo_id));
        assert!(this_ref.is_some());
    }
}

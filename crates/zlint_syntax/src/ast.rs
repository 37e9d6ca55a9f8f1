use bitflags::bitflags;

use crate::token::{TokenId, Tokens};
use zlint_span::Span;

/// Dense index into `Ast`'s node arena. Never a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Declaration-site modifiers, shared by `VarDecl`, `FnDecl`, and `Param`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DeclFlags: u16 {
        const PUB          = 1 << 0;
        const CONST        = 1 << 1; // var-decl is `const` rather than `var`
        const COMPTIME     = 1 << 2;
        const EXPORT       = 1 << 3;
        const EXTERN       = 1 << 4;
        const THREADLOCAL  = 1 << 5;
        const NOALIAS      = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Struct,
    Enum,
    Union,
    ErrorSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    BoolAnd,
    BoolOr,
    Orelse,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
    AddressOf,
    Deref,
}

/// Compound-assignment operators carry both the read and the write; plain
/// `=` is write-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl AssignOp {
    pub const fn is_compound(self) -> bool {
        !matches!(self, AssignOp::Assign)
    }
}

/// A coarse node classification, independent of payload — the "tag" the
/// specification's builder and rules switch over, mirroring Zig's own
/// `Ast.Node.Tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Root,
    ContainerDecl,
    ContainerField,
    VarDecl,
    FnDecl,
    Param,
    Block,
    ExprStmt,
    If,
    While,
    For,
    Switch,
    SwitchCase,
    Comptime,
    TestDecl,
    Return,
    Try,
    Catch,
    Defer,
    ErrDefer,
    Break,
    Continue,
    Call,
    BuiltinCall,
    FieldAccess,
    Identifier,
    BinaryExpr,
    UnaryExpr,
    Assign,
    NumberLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    NullLiteral,
    UndefinedLiteral,
    UnreachableLiteral,
    UsingNamespace,
    ErrorUnion,
    OptionalType,
    PointerType,
    SliceType,
    ArrayType,
    Grouped,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Root {
        decls: Vec<NodeId>,
    },
    ContainerDecl {
        kind: ContainerKind,
        fields: Vec<NodeId>,
        decls: Vec<NodeId>,
    },
    ContainerField {
        name_token: TokenId,
        ty: Option<NodeId>,
        default: Option<NodeId>,
    },
    VarDecl {
        flags: DeclFlags,
        name_token: TokenId,
        ty: Option<NodeId>,
        init: Option<NodeId>,
    },
    FnDecl {
        flags: DeclFlags,
        name_token: Option<TokenId>,
        params: Vec<NodeId>,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
    },
    Param {
        flags: DeclFlags,
        name_token: Option<TokenId>,
        ty: Option<NodeId>,
    },
    Block {
        stmts: Vec<NodeId>,
    },
    ExprStmt {
        expr: NodeId,
    },
    If {
        cond: NodeId,
        payload: Option<TokenId>,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
        else_payload: Option<TokenId>,
    },
    While {
        cond: NodeId,
        payload: Option<TokenId>,
        continue_expr: Option<NodeId>,
        body: NodeId,
        else_branch: Option<NodeId>,
    },
    For {
        inputs: Vec<NodeId>,
        payloads: Vec<TokenId>,
        body: NodeId,
        else_branch: Option<NodeId>,
    },
    Switch {
        cond: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchCase {
        values: Vec<NodeId>,
        is_else: bool,
        payload: Option<TokenId>,
        body: NodeId,
    },
    Comptime {
        body: NodeId,
    },
    TestDecl {
        name_token: Option<TokenId>,
        body: NodeId,
    },
    Return {
        expr: Option<NodeId>,
    },
    Try {
        expr: NodeId,
    },
    Catch {
        expr: NodeId,
        payload: Option<TokenId>,
        fallback: NodeId,
    },
    Defer {
        expr: NodeId,
    },
    ErrDefer {
        payload: Option<TokenId>,
        expr: NodeId,
    },
    Break {
        label: Option<TokenId>,
        expr: Option<NodeId>,
    },
    Continue {
        label: Option<TokenId>,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    BuiltinCall {
        name_token: TokenId,
        args: Vec<NodeId>,
    },
    FieldAccess {
        lhs: NodeId,
        field_token: TokenId,
    },
    Identifier {
        token: TokenId,
    },
    BinaryExpr {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    UnaryExpr {
        op: UnaryOp,
        expr: NodeId,
    },
    Assign {
        op: AssignOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    NumberLiteral {
        token: TokenId,
    },
    StringLiteral {
        token: TokenId,
    },
    CharLiteral {
        token: TokenId,
    },
    BoolLiteral {
        token: TokenId,
        value: bool,
    },
    NullLiteral {
        token: TokenId,
    },
    UndefinedLiteral {
        token: TokenId,
    },
    UnreachableLiteral {
        token: TokenId,
    },
    UsingNamespace {
        expr: NodeId,
    },
    ErrorUnion {
        error_set: Option<NodeId>,
        payload: NodeId,
    },
    OptionalType {
        inner: NodeId,
    },
    PointerType {
        inner: NodeId,
        is_const: bool,
    },
    SliceType {
        inner: NodeId,
    },
    ArrayType {
        len: Option<NodeId>,
        inner: NodeId,
    },
    Grouped {
        inner: NodeId,
    },
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Root { .. } => NodeTag::Root,
            NodeKind::ContainerDecl { .. } => NodeTag::ContainerDecl,
            NodeKind::ContainerField { .. } => NodeTag::ContainerField,
            NodeKind::VarDecl { .. } => NodeTag::VarDecl,
            NodeKind::FnDecl { .. } => NodeTag::FnDecl,
            NodeKind::Param { .. } => NodeTag::Param,
            NodeKind::Block { .. } => NodeTag::Block,
            NodeKind::ExprStmt { .. } => NodeTag::ExprStmt,
            NodeKind::If { .. } => NodeTag::If,
            NodeKind::While { .. } => NodeTag::While,
            NodeKind::For { .. } => NodeTag::For,
            NodeKind::Switch { .. } => NodeTag::Switch,
            NodeKind::SwitchCase { .. } => NodeTag::SwitchCase,
            NodeKind::Comptime { .. } => NodeTag::Comptime,
            NodeKind::TestDecl { .. } => NodeTag::TestDecl,
            NodeKind::Return { .. } => NodeTag::Return,
            NodeKind::Try { .. } => NodeTag::Try,
            NodeKind::Catch { .. } => NodeTag::Catch,
            NodeKind::Defer { .. } => NodeTag::Defer,
            NodeKind::ErrDefer { .. } => NodeTag::ErrDefer,
            NodeKind::Break { .. } => NodeTag::Break,
            NodeKind::Continue { .. } => NodeTag::Continue,
            NodeKind::Call { .. } => NodeTag::Call,
            NodeKind::BuiltinCall { .. } => NodeTag::BuiltinCall,
            NodeKind::FieldAccess { .. } => NodeTag::FieldAccess,
            NodeKind::Identifier { .. } => NodeTag::Identifier,
            NodeKind::BinaryExpr { .. } => NodeTag::BinaryExpr,
            NodeKind::UnaryExpr { .. } => NodeTag::UnaryExpr,
            NodeKind::Assign { .. } => NodeTag::Assign,
            NodeKind::NumberLiteral { .. } => NodeTag::NumberLiteral,
            NodeKind::StringLiteral { .. } => NodeTag::StringLiteral,
            NodeKind::CharLiteral { .. } => NodeTag::CharLiteral,
            NodeKind::BoolLiteral { .. } => NodeTag::BoolLiteral,
            NodeKind::NullLiteral { .. } => NodeTag::NullLiteral,
            NodeKind::UndefinedLiteral { .. } => NodeTag::UndefinedLiteral,
            NodeKind::UnreachableLiteral { .. } => NodeTag::UnreachableLiteral,
            NodeKind::UsingNamespace { .. } => NodeTag::UsingNamespace,
            NodeKind::ErrorUnion { .. } => NodeTag::ErrorUnion,
            NodeKind::OptionalType { .. } => NodeTag::OptionalType,
            NodeKind::PointerType { .. } => NodeTag::PointerType,
            NodeKind::SliceType { .. } => NodeTag::SliceType,
            NodeKind::ArrayType { .. } => NodeTag::ArrayType,
            NodeKind::Grouped { .. } => NodeTag::Grouped,
        }
    }

    /// Direct children, in source order. Used by the semantic builder's
    /// generic DFS and by the dispatcher's pre-order node walk.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Root { decls } => decls.clone(),
            NodeKind::ContainerDecl { fields, decls, .. } => {
                fields.iter().chain(decls.iter()).copied().collect()
            }
            NodeKind::ContainerField { ty, default, .. } => {
                ty.iter().chain(default.iter()).copied().collect()
            }
            NodeKind::VarDecl { ty, init, .. } => {
                ty.iter().chain(init.iter()).copied().collect()
            }
            NodeKind::FnDecl {
                params,
                return_type,
                body,
                ..
            } => params
                .iter()
                .chain(return_type.iter())
                .chain(body.iter())
                .copied()
                .collect(),
            NodeKind::Param { ty, .. } => ty.iter().copied().collect(),
            NodeKind::Block { stmts } => stmts.clone(),
            NodeKind::ExprStmt { expr } => vec![*expr],
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => std::iter::once(*cond)
                .chain(std::iter::once(*then_branch))
                .chain(else_branch.iter().copied())
                .collect(),
            NodeKind::While {
                cond,
                continue_expr,
                body,
                else_branch,
                ..
            } => std::iter::once(*cond)
                .chain(continue_expr.iter().copied())
                .chain(std::iter::once(*body))
                .chain(else_branch.iter().copied())
                .collect(),
            NodeKind::For {
                inputs,
                body,
                else_branch,
                ..
            } => inputs
                .iter()
                .copied()
                .chain(std::iter::once(*body))
                .chain(else_branch.iter().copied())
                .collect(),
            NodeKind::Switch { cond, cases } => {
                std::iter::once(*cond).chain(cases.iter().copied()).collect()
            }
            NodeKind::SwitchCase { values, body, .. } => {
                values.iter().copied().chain(std::iter::once(*body)).collect()
            }
            NodeKind::Comptime { body } => vec![*body],
            NodeKind::TestDecl { body, .. } => vec![*body],
            NodeKind::Return { expr } => expr.iter().copied().collect(),
            NodeKind::Try { expr } => vec![*expr],
            NodeKind::Catch { expr, fallback, .. } => vec![*expr, *fallback],
            NodeKind::Defer { expr } => vec![*expr],
            NodeKind::ErrDefer { expr, .. } => vec![*expr],
            NodeKind::Break { expr, .. } => expr.iter().copied().collect(),
            NodeKind::Continue { .. } => vec![],
            NodeKind::Call { callee, args } => {
                std::iter::once(*callee).chain(args.iter().copied()).collect()
            }
            NodeKind::BuiltinCall { args, .. } => args.clone(),
            NodeKind::FieldAccess { lhs, .. } => vec![*lhs],
            NodeKind::Identifier { .. } => vec![],
            NodeKind::BinaryExpr { lhs, rhs, .. } => vec![*lhs, *rhs],
            NodeKind::UnaryExpr { expr, .. } => vec![*expr],
            NodeKind::Assign { lhs, rhs, .. } => vec![*lhs, *rhs],
            NodeKind::NumberLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::CharLiteral { .. }
            | NodeKind::BoolLiteral { .. }
            | NodeKind::NullLiteral { .. }
            | NodeKind::UndefinedLiteral { .. }
            | NodeKind::UnreachableLiteral { .. } => vec![],
            NodeKind::UsingNamespace { expr } => vec![*expr],
            NodeKind::ErrorUnion { error_set, payload } => {
                error_set.iter().copied().chain(std::iter::once(*payload)).collect()
            }
            NodeKind::OptionalType { inner }
            | NodeKind::PointerType { inner, .. }
            | NodeKind::SliceType { inner }
            | NodeKind::Grouped { inner } => vec![*inner],
            NodeKind::ArrayType { len, inner } => {
                len.iter().copied().chain(std::iter::once(*inner)).collect()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub main_token: TokenId,
    pub kind: NodeKind,
}

/// A fully parsed file: its token stream, its node arena, and any parse
/// errors recovered along the way (which do not prevent semantic analysis
/// of the rest of the file, per the builder's error-handling contract).
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
    tokens: Tokens,
}

impl Ast {
    pub fn new(nodes: Vec<Node>, root: NodeId, tokens: Tokens) -> Self {
        Self { nodes, root, tokens }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.nodes[id.index()].kind.tag()
    }

    #[inline]
    pub fn main_token(&self, id: NodeId) -> TokenId {
        self.nodes[id.index()].main_token
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.index()].kind.children()
    }

    #[inline]
    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// The node's span: the union of its main token and every descendant's
    /// span. Adequate for diagnostics and fixes; not cached, since the
    /// dispatcher calls this at most once per node per rule.
    pub fn span(&self, id: NodeId) -> Span {
        let mut span = self.tokens.span(self.main_token(id));
        for child in self.children(id) {
            span = span.cover(self.span(child));
        }
        span
    }

    /// All node ids reachable from the root, in pre-order (parent before
    /// children, children in source order). The dispatcher's `runOnNode`
    /// visitors iterate this sequence exactly once.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.children(id);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

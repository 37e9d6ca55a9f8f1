use bitflags::bitflags;
use zlint_syntax::{NodeId, TokenId};

use crate::ids::{ScopeId, SymbolId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ReferenceFlags: u8 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
        const CALL  = 1 << 2;
        const TYPE  = 1 << 3;
    }
}

/// A use-site of an identifier: resolved against a [`SymbolId`] once the
/// enclosing scope (or one of its ancestors) finishes declaring everything
/// visible to it. Unresolved references are never discarded — they end up
/// in `SemanticModel::unresolved_references` for rules that care (e.g. an
/// `undeclared-identifier`-style check, or just defensive `None` handling).
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub symbol: Option<SymbolId>,
    pub node: NodeId,
    pub scope: ScopeId,
    pub identifier_token: TokenId,
    pub flags: ReferenceFlags,
}

impl Reference {
    pub fn is_write(&self) -> bool {
        self.flags.contains(ReferenceFlags::WRITE)
    }

    pub fn is_read(&self) -> bool {
        self.flags.contains(ReferenceFlags::READ)
    }

    pub fn is_call(&self) -> bool {
        self.flags.contains(ReferenceFlags::CALL)
    }
}

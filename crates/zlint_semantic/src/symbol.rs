use bitflags::bitflags;
use zlint_syntax::{NodeId, TokenId};

use crate::ids::{ReferenceId, ScopeId, SymbolId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SymbolFlags: u16 {
        const CONST       = 1 << 0;
        const VARIABLE    = 1 << 1;
        const MEMBER      = 1 << 2;
        const FN          = 1 << 3;
        const FN_PARAM    = 1 << 4;
        const PAYLOAD     = 1 << 5;
        const CATCH_PARAM = 1 << 6;
        const COMPTIME    = 1 << 7;
        const EXPORT      = 1 << 8;
        const EXTERN      = 1 << 9;
        const STRUCT      = 1 << 10;
        const ENUM        = 1 << 11;
        const UNION       = 1 << 12;
        const ERROR       = 1 << 13;
    }
}

/// A named, declared entity: a variable, constant, function, parameter,
/// container member, or payload capture.
///
/// `members`/`exports`/`references` live on the symbol itself rather than in
/// a separate side table — unlike scopes' `children`/`symbols_in_scope`,
/// which are indexed by id because they're populated before the owning
/// scope exists. A symbol's relationship sets only grow after the symbol
/// itself is created, so there's no ordering problem.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: Box<str>,
    pub decl_node: NodeId,
    pub scope: ScopeId,
    pub token: TokenId,
    pub flags: SymbolFlags,
    pub members: Vec<SymbolId>,
    pub exports: Vec<SymbolId>,
    pub references: Vec<ReferenceId>,
}

impl Symbol {
    pub fn is_const(&self) -> bool {
        self.flags.contains(SymbolFlags::CONST)
    }

    pub fn is_fn(&self) -> bool {
        self.flags.contains(SymbolFlags::FN)
    }

    pub fn is_param(&self) -> bool {
        self.flags.contains(SymbolFlags::FN_PARAM)
    }

    pub fn is_payload(&self) -> bool {
        self.flags.contains(SymbolFlags::PAYLOAD)
    }

    pub fn is_member(&self) -> bool {
        self.flags.contains(SymbolFlags::MEMBER)
    }

    pub fn is_unused(&self) -> bool {
        self.references.is_empty()
    }
}

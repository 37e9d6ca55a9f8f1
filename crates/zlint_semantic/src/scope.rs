use bitflags::bitflags;

use crate::ids::{ScopeId, SymbolId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScopeFlags: u16 {
        const S_TOP      = 1 << 0;
        const S_FUNCTION = 1 << 1;
        const S_BLOCK    = 1 << 2;
        const S_STRUCT   = 1 << 3;
        const S_ENUM     = 1 << 4;
        const S_UNION    = 1 << 5;
        const S_ERROR    = 1 << 6;
        const S_COMPTIME = 1 << 7;
        /// Set on the wrapper scope a `catch`/`errdefer`/`else |err|` payload
        /// lives in, distinguishing it from an ordinary optional-unwrap
        /// payload scope.
        const CATCH      = 1 << 8;
    }
}

impl ScopeFlags {
    /// Container-like scopes resolve their pending references against every
    /// declaration in the scope once it closes, regardless of textual
    /// order (`zlint_semantic`'s forward-reference rule). The root scope is
    /// included: a Zig file is itself an implicit struct.
    pub fn allows_forward_references(self) -> bool {
        self.intersects(
            ScopeFlags::S_TOP | ScopeFlags::S_STRUCT | ScopeFlags::S_ENUM | ScopeFlags::S_UNION | ScopeFlags::S_ERROR,
        )
    }
}

/// A lexical container: a block, function signature, container body,
/// `comptime` block, or the file root.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub flags: ScopeFlags,
    pub children: Vec<ScopeId>,
    pub symbols: Vec<SymbolId>,
}

impl Scope {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

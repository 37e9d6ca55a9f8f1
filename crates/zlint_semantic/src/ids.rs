//! Dense `u32` indices into the semantic model's parallel arenas. Never
//! pointers, matching the discipline `zlint_syntax::NodeId`/`TokenId` already
//! use. `ScopeId(0)` is always the file's root scope, mirroring
//! `NodeId::ROOT`. `SymbolId`/`ReferenceId` have no analogous reserved root;
//! "no symbol" is expressed with `Option<SymbolId>`, not a sentinel index.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ReferenceId(pub u32);

impl ReferenceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

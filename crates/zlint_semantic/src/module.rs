use zlint_syntax::NodeId;

/// Whether an `@import` specifier names another source file or a package
/// module (anything not ending in `.zig`, e.g. `"std"` or a build-graph
/// module name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    File,
    Module,
}

impl ImportKind {
    pub fn of_specifier(specifier: &str) -> Self {
        if specifier.ends_with(".zig") {
            ImportKind::File
        } else {
            ImportKind::Module
        }
    }
}

/// One entry in a file's module/import record: an `@import("...")` call, or
/// a `usingnamespace` declaration (recorded with an anonymous specifier,
/// since it imports a whole namespace rather than binding it to a name).
#[derive(Debug, Clone)]
pub struct Import {
    pub specifier: Box<str>,
    pub kind: ImportKind,
    pub node: NodeId,
}

/// Specifier recorded for a `usingnamespace` declaration, which has no
/// string literal of its own to name.
pub const USINGNAMESPACE_SPECIFIER: &str = "<usingnamespace>";

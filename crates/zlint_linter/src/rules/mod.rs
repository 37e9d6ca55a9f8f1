//! The concrete rule catalog. Each submodule owns one rule's `Violation`
//! type and its [`LintRule`] visitor implementation; [`catalog`] wires them
//! into the dispatcher in the order `zlint_codes::Rule` declares them.

mod empty_file;
mod field_default_undefined;
mod homeless_try;
mod no_return_try;
mod redundant_comptime_block;
mod shadowed_param;
mod unsafe_undefined;
mod unused_decls;
mod unused_function_param;
mod unused_import;
mod useless_comptime;

use crate::dispatcher::LintRule;

/// The full rule catalog, in `zlint_codes::Rule`'s declaration order. Does
/// not include `invalid-config`: that diagnostic is produced by config
/// resolution in the `zlint` binary crate, not by traversing a file's AST.
pub fn catalog() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(homeless_try::HomelessTry),
        Box::new(unsafe_undefined::UnsafeUndefined),
        Box::new(no_return_try::NoReturnTry),
        Box::new(unused_decls::UnusedDecls),
        Box::new(unused_function_param::UnusedFunctionParam),
        Box::new(unused_import::UnusedImport),
        Box::new(shadowed_param::ShadowedParam),
        Box::new(empty_file::EmptyFile),
        Box::new(field_default_undefined::FieldDefaultUndefined),
        Box::new(useless_comptime::UselessComptime),
        Box::new(redundant_comptime_block::RedundantComptimeBlock),
    ]
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use zlint_codes::Rule;

    use crate::test_util::lint_one;

    #[test_case("const x = try std.heap.page_allocator.alloc(u8, 8);\n", Rule::HomelessTry, true; "homeless_try fires at top level")]
    #[test_case("fn f() !void {\n    const x = try g();\n    _ = x;\n}\n", Rule::HomelessTry, false; "homeless_try is quiet inside a function")]
    #[test_case("const x = undefined;\n", Rule::UnsafeUndefined, true; "unsafe_undefined fires on a bare initializer")]
    #[test_case("const Foo = struct { x: u32 = undefined };\n", Rule::UnsafeUndefined, false; "unsafe_undefined defers to field_default_undefined")]
    #[test_case("fn f() !void {\n    return try g();\n}\n", Rule::NoReturnTry, true; "no_return_try fires on return try")]
    #[test_case("fn f() !void {\n    const x = try g();\n    return x;\n}\n", Rule::NoReturnTry, false; "no_return_try is quiet when try is not directly returned")]
    #[test_case("", Rule::EmptyFile, true; "empty_file fires on an empty file")]
    #[test_case("const x = 1;\n", Rule::EmptyFile, false; "empty_file is quiet on a nonempty file")]
    #[test_case("comptime {}\n", Rule::UselessComptime, true; "useless_comptime fires on an empty block")]
    #[test_case("comptime {\n    @compileLog(\"x\");\n}\n", Rule::UselessComptime, false; "useless_comptime is quiet with a statement")]
    fn rule_smoke_table(source: &str, rule: Rule, should_fire: bool) {
        let diagnostics = lint_one(source, rule);
        assert_eq!(!diagnostics.is_empty(), should_fire, "source: {source:?}");
        if should_fire {
            assert_eq!(diagnostics[0].code, rule.name());
        }
    }
}

use std::rc::Rc;

use basalt::{
    parse_module, parse_script, parse_script_with_options, LocalizedParseError, OptionsBuilder,
    Source,
};

fn script_error(text: &str) -> LocalizedParseError {
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    match parse_script(&source) {
        Ok(_) => panic!("expected parse error for {}", text),
        Err(error) => error,
    }
}

fn module_error(text: &str) -> LocalizedParseError {
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    match parse_module(&source) {
        Ok(_) => panic!("expected parse error for {}", text),
        Err(error) => error,
    }
}

fn assert_script_error(text: &str, expected_code: &str) {
    let error = script_error(text);
    assert_eq!(
        error.error.code(),
        expected_code,
        "wrong error for {}: {}",
        text,
        error
    );
}

fn assert_module_error(text: &str, expected_code: &str) {
    let error = module_error(text);
    assert_eq!(
        error.error.code(),
        expected_code,
        "wrong error for {}: {}",
        text,
        error
    );
}

#[test]
fn lexical_redeclaration() {
    let error = script_error("let x = 1; let x = 2;");

    assert_eq!(error.error.code(), "NAME_REDECLARATION");
    assert_eq!(error.to_string(), "SyntaxError: test.js:1:15 Identifier 'x' has already been declared");
    assert_eq!(error.index(), Some(15));
    assert_eq!(error.line_col(), Some((1, 15)));
}

#[test]
fn redeclaration_rules() {
    assert_script_error("let x; var x;", "NAME_REDECLARATION");
    assert_script_error("var x; let x;", "NAME_REDECLARATION");
    assert_script_error("const x = 1; function x() {}", "NAME_REDECLARATION");
    assert_script_error("class C {} class C {}", "NAME_REDECLARATION");
    assert_script_error("{ let x; { var x; } }", "NAME_REDECLARATION");
    assert_script_error("let x; { var x; }", "NAME_REDECLARATION");
    assert_script_error("function f(a) { let a; }", "NAME_REDECLARATION");
    assert_script_error("try {} catch (e) { let e; }", "NAME_REDECLARATION");
    assert_script_error("try {} catch ([e]) { var e; }", "NAME_REDECLARATION");
    assert_script_error("'use strict'; { function f() {} function f() {} }", "NAME_REDECLARATION");

    // Shadowing in an inner scope is not a redeclaration
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "let x; { let x; } function f() { var x; }".to_owned(),
    ));
    assert!(parse_script(&source).is_ok());
}

#[test]
fn lexical_errors() {
    assert_script_error("'abc", "UNTERMINATED_STRING");
    assert_script_error("\"abc\nd\"", "UNTERMINATED_STRING");
    assert_script_error("`abc", "UNTERMINATED_TEMPLATE");
    assert_script_error("/abc", "UNTERMINATED_REGEXP");
    assert_script_error("/* comment", "UNTERMINATED_COMMENT");
    assert_script_error("'\\u{}'", "MALFORMED_ESCAPE");
    assert_script_error("'\\u{110000}'", "MALFORMED_ESCAPE");
    assert_script_error("`\\u`", "MALFORMED_ESCAPE");
    assert_script_error("0b2", "MALFORMED_NUMBER");
    assert_script_error("0x", "MALFORMED_NUMBER");
    assert_script_error("1e", "MALFORMED_NUMBER");
    assert_script_error("1__2", "ADJACENT_NUMERIC_SEPARATORS");
    assert_script_error("1_", "TRAILING_NUMERIC_SEPARATOR");
    assert_script_error("3in x", "INVALID_NUMBER_SUFFIX");
    assert_script_error("1.5n", "BIGINT_MALFORMED");
    assert_script_error("1e3n", "BIGINT_MALFORMED");
    assert_script_error("012n", "INVALID_NUMBER_SUFFIX");
    assert_script_error("0123n9", "INVALID_NUMBER_SUFFIX");
}

#[test]
fn regexp_flag_errors() {
    assert_script_error("/a/x", "INVALID_REGEXP_FLAG");
    assert_script_error("/a/gg", "DUPLICATE_REGEXP_FLAG");
    assert_script_error("/a/uv", "INCOMPATIBLE_REGEXP_FLAGS");
}

#[test]
fn strict_mode_errors() {
    assert_script_error("'use strict'; with (a) {}", "STRICT_WITH");
    assert_script_error("'use strict'; 012;", "STRICT_OCTAL_LITERAL");
    assert_script_error("'use strict'; '\\012';", "STRICT_OCTAL_ESCAPE");
    assert_script_error("'use strict'; '\\8';", "STRICT_NON_OCTAL_ESCAPE");
    assert_script_error("'use strict'; delete x;", "STRICT_DELETE");
    assert_script_error("'use strict'; eval = 1;", "STRICT_ASSIGN_EVAL");
    assert_script_error("'use strict'; arguments = 1;", "STRICT_ASSIGN_ARGUMENTS");
    assert_script_error("'use strict'; var eval;", "STRICT_BIND_RESTRICTED");
    assert_script_error("'use strict'; let arguments;", "STRICT_BIND_RESTRICTED");
    assert_script_error("'use strict'; var interface;", "RESERVED_WORD");
    assert_script_error("'use strict'; var let;", "RESERVED_WORD");
    assert_script_error("'use strict'; eval++;", "STRICT_ASSIGN_EVAL");

    // Function that becomes strict via directive revalidates its parameters
    assert_script_error("function f(a, a) { 'use strict'; }", "DUPLICATE_PARAMETERS");
    assert_script_error("function f(eval) { 'use strict'; }", "STRICT_BIND_RESTRICTED");
    assert_script_error(
        "function f(a = 1) { 'use strict'; }",
        "USE_STRICT_NON_SIMPLE_PARAMS",
    );
}

#[test]
fn duplicate_parameter_errors() {
    assert_script_error("'use strict'; function f(a, a) {}", "DUPLICATE_PARAMETERS");
    assert_script_error("function f(a, [a]) {}", "DUPLICATE_PARAMETERS");
    assert_script_error("function f(a, a = 1) {}", "DUPLICATE_PARAMETERS");
    assert_script_error("function f(a, ...a) {}", "DUPLICATE_PARAMETERS");
    assert_script_error("(a, a) => a", "DUPLICATE_PARAMETERS");
    assert_script_error("x = { m(a, a) {} };", "DUPLICATE_PARAMETERS");

    // Sloppy mode functions with simple parameter lists allow duplicates
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "function f(a, a) {}".to_owned(),
    ));
    assert!(parse_script(&source).is_ok());
}

#[test]
fn assignment_target_errors() {
    assert_script_error("1 = a;", "INVALID_ASSIGNMENT_TARGET");
    assert_script_error("a + b = c;", "INVALID_ASSIGNMENT_TARGET");
    assert_script_error("a?.b = c;", "INVALID_ASSIGNMENT_TARGET");
    assert_script_error("[a + 1] = b;", "INVALID_ASSIGNMENT_TARGET");
    assert_script_error("({ m() {} } = a);", "INVALID_ASSIGNMENT_TARGET");
    assert_script_error("[a, b] += c;", "INVALID_ASSIGNMENT_TARGET");
    assert_script_error("1++;", "INVALID_UPDATE_TARGET");
    assert_script_error("++1;", "INVALID_UPDATE_TARGET");
    assert_script_error("for (1 of x) ;", "INVALID_FOR_TARGET");
}

#[test]
fn rest_element_errors() {
    assert_script_error("[...a, b] = c;", "REST_NOT_LAST");
    assert_script_error("[...a,] = c;", "REST_TRAILING_COMMA");
    assert_script_error("[...a = 1] = c;", "REST_INITIALIZER");
    assert_script_error("let [...a, b] = c;", "REST_NOT_LAST");
    assert_script_error("let [...a,] = c;", "REST_TRAILING_COMMA");
    assert_script_error("function f(...a, b) {}", "REST_TRAILING_COMMA");
    assert_script_error("function f(...a = 1) {}", "REST_INITIALIZER");
    assert_script_error("let { ...r, b } = c;", "REST_NOT_LAST");
}

#[test]
fn cover_grammar_errors() {
    assert_script_error("({ a = 1 });", "INVALID_PATTERN_INITIALIZER");
    assert_script_error("x = { __proto__: 1, __proto__: 2 };", "DUPLICATE_PROTO");
    assert_script_error("({ __proto__: 1, __proto__: 2 });", "DUPLICATE_PROTO");
    assert_script_error("for ({ __proto__: 1, __proto__: 2 };;) ;", "DUPLICATE_PROTO");
}

#[test]
fn operator_restriction_errors() {
    assert_script_error("a ?? b || c;", "MIXED_COALESCE");
    assert_script_error("a || b ?? c;", "MIXED_COALESCE");
    assert_script_error("a && b ?? c;", "MIXED_COALESCE");
    assert_script_error("-a ** b;", "INVALID_EXPONENTIATION_OPERAND");
    assert_script_error("typeof a ** b;", "INVALID_EXPONENTIATION_OPERAND");
    assert_script_error(
        "async function f() { await a ** b; }",
        "INVALID_EXPONENTIATION_OPERAND",
    );
}

#[test]
fn structural_errors() {
    assert_script_error("return 1;", "RETURN_OUTSIDE_FUNCTION");
    assert_script_error("break;", "BREAK_OUTSIDE_BREAKABLE");
    assert_script_error("continue;", "CONTINUE_OUTSIDE_LOOP");
    assert_script_error("while (a) { continue b; }", "LABEL_NOT_FOUND");
    assert_script_error("a: { continue a; }", "CONTINUE_LABEL_NOT_ITERATION");
    assert_script_error("a: a: while (b) ;", "DUPLICATE_LABEL");
    assert_script_error("switch (a) { default: 1; default: 2; }", "MULTIPLE_DEFAULT_CLAUSES");
    assert_script_error("function f() { break; }", "BREAK_OUTSIDE_BREAKABLE");
    assert_script_error("while (a) { function f() { break; } }", "BREAK_OUTSIDE_BREAKABLE");
}

#[test]
fn restricted_production_errors() {
    assert_script_error("throw\n1;", "THROW_NEWLINE");
    assert_script_error("a\n=> b;", "ARROW_NEWLINE");
    assert_script_error("if (x) let [a] = b;", "AMBIGUOUS_LET_BRACKET");
}

#[test]
fn for_head_errors() {
    assert_script_error("'use strict'; for (var x = 1 in o) ;", "FOR_IN_INITIALIZER");
    assert_module_error("for (var x = 1 in o) ;", "FOR_IN_INITIALIZER");
    assert_script_error("for (var x = 1 of o) ;", "FOR_IN_INITIALIZER");
    assert_script_error("for (let x = 1 of o) ;", "FOR_IN_INITIALIZER");
    assert_script_error("for (var x, y in o) ;", "INVALID_FOR_EACH_INIT");
    assert_script_error("for (const x;;) ;", "CONST_WITHOUT_INITIALIZER");
}

#[test]
fn declaration_errors() {
    assert_script_error("const x;", "CONST_WITHOUT_INITIALIZER");
    assert_script_error("let let = 1;", "LET_IN_LEXICAL_DECLARATION");
    assert_script_error("const let = 1;", "LET_IN_LEXICAL_DECLARATION");
}

#[test]
fn class_errors() {
    assert_script_error(
        "class C { constructor() {} constructor() {} }",
        "MULTIPLE_CONSTRUCTORS",
    );
    assert_script_error("class C { get constructor() {} }", "NON_SIMPLE_CONSTRUCTOR");
    assert_script_error("class C { async constructor() {} }", "NON_SIMPLE_CONSTRUCTOR");
    assert_script_error("class C { *constructor() {} }", "NON_SIMPLE_CONSTRUCTOR");
    assert_script_error("class C { constructor = 1; }", "FIELD_NAMED_CONSTRUCTOR");
    assert_script_error("class C { static prototype() {} }", "CLASS_STATIC_PROTOTYPE");
    assert_script_error("class C { static prototype = 1; }", "CLASS_STATIC_PROTOTYPE");
    assert_script_error("class C { #constructor; }", "PRIVATE_NAME_CONSTRUCTOR");
    assert_script_error("class C { #x; #x; }", "DUPLICATE_PRIVATE_NAME");
    assert_script_error("class C { #x; get #x() {} }", "DUPLICATE_PRIVATE_NAME");
    assert_script_error(
        "class C { static get #x() {} set #x(v) {} }",
        "DUPLICATE_PRIVATE_NAME",
    );

    // A getter and setter with the same placement may share a private name
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "class C { get #x() {} set #x(v) {} }".to_owned(),
    ));
    assert!(parse_script(&source).is_ok());
}

#[test]
fn private_field_reference_errors() {
    let error = script_error("class C { #x; foo() { return this.#y; } }");
    assert_eq!(error.error.code(), "PRIVATE_NAME_UNDEFINED");
    assert!(error
        .to_string()
        .contains("Private field '#y' must be declared in an enclosing class"));

    assert_script_error("this.#x;", "PRIVATE_NAME_OUTSIDE_CLASS");

    // Private field checking can be disabled
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "class C { #x; foo() { return this.#y; } }".to_owned(),
    ));
    let options = OptionsBuilder::new().check_private_fields(false).build();
    assert!(parse_script_with_options(&source, &options).is_ok());
}

#[test]
fn super_and_new_target_errors() {
    assert_script_error("super.x;", "SUPER_PROPERTY_OUTSIDE_METHOD");
    assert_script_error("function f() { super.x; }", "SUPER_PROPERTY_OUTSIDE_METHOD");
    assert_script_error(
        "class C { constructor() { super(); } }",
        "SUPER_CALL_OUTSIDE_CONSTRUCTOR",
    );
    assert_script_error(
        "class C extends B { m() { super(); } }",
        "SUPER_CALL_OUTSIDE_CONSTRUCTOR",
    );
    assert_script_error("new.target;", "NEW_TARGET_OUTSIDE_FUNCTION");
    assert_script_error("new.meta;", "EXPECTED_NEW_TARGET");
}

#[test]
fn accessor_parameter_errors() {
    assert_script_error("x = { get g(a) {} };", "GETTER_PARAMS");
    assert_script_error("x = { set s() {} };", "SETTER_PARAMS");
    assert_script_error("x = { set s(a, b) {} };", "SETTER_PARAMS");
    assert_script_error("x = { set s(...a) {} };", "SETTER_PARAMS");
    assert_script_error("class C { get g(a) {} }", "GETTER_PARAMS");
}

#[test]
fn optional_chain_errors() {
    assert_script_error("new a?.b();", "OPTIONAL_CHAIN_NEW");
    assert_script_error("a?.b`c`;", "OPTIONAL_CHAIN_TEMPLATE");
    assert_script_error("class C { #x; m() { delete this.#x; } }", "DELETE_PRIVATE_NAME");
}

#[test]
fn module_syntax_errors() {
    assert_script_error("import a from 'm';", "MODULE_SYNTAX_OUTSIDE_MODULE");
    assert_script_error("export var a;", "MODULE_SYNTAX_OUTSIDE_MODULE");
    assert_module_error(
        "function f() { import a from 'm'; }",
        "MODULE_SYNTAX_NOT_TOP_LEVEL",
    );
    assert_module_error("var a; export { a }; export { a };", "DUPLICATE_EXPORT");
    assert_module_error("export default 1; export default 2;", "DUPLICATE_EXPORT");
    assert_module_error("export { missing };", "UNRESOLVED_EXPORT");
    assert_module_error("export { 'str' };", "UNEXPECTED_TOKEN");
    assert_module_error(
        "import a from 'm' with { type: 'json', type: 'json' };",
        "DUPLICATE_IMPORT_ATTRIBUTE",
    );
}

#[test]
fn reserved_word_errors() {
    assert_module_error("var await = 1;", "RESERVED_WORD");
    // At the module toplevel await starts an await expression, so a missing
    // operand is the error
    assert_module_error("await;", "UNEXPECTED_TOKEN");
    assert_script_error("async function f() { var await; }", "RESERVED_WORD");
    assert_script_error("function* g() { var yield; }", "RESERVED_WORD");
    assert_script_error("'use strict'; var yield;", "RESERVED_WORD");
    assert_script_error("\\u0069f (x) {}", "RESERVED_WORD");
    assert_script_error("var \\u{63}lass;", "RESERVED_WORD");
    assert_script_error("class C { static { await; } }", "RESERVED_WORD");
}

#[test]
fn await_yield_position_errors() {
    assert_script_error(
        "async function f(a = await b) {}",
        "AWAIT_IN_PARAMETERS",
    );
    assert_script_error("function* g(a = yield) {}", "YIELD_IN_PARAMETERS");
}

#[test]
fn import_meta_errors() {
    assert_script_error("import.meta;", "IMPORT_META_OUTSIDE_MODULE");
    assert_module_error("import.foo;", "EXPECTED_IMPORT_META");
}

#[test]
fn labeled_function_errors() {
    assert_script_error("'use strict'; a: function f() {}", "LABELED_FUNCTION");
    assert_script_error("a: function* f() {}", "LABELED_FUNCTION");
}

#[test]
fn tolerant_mode_reports_all_errors() {
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "var x = ;\nlet y = 1; let y = 2;\nvar z = ;".to_owned(),
    ));
    let options = OptionsBuilder::new().tolerant(true).build();
    let result = parse_script_with_options(&source, &options).unwrap();

    assert_eq!(result.errors.len(), 3);
}

#[test]
fn hashbang_rejected_when_disallowed() {
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "#!/usr/bin/env node\nvar x;".to_owned(),
    ));
    let options = OptionsBuilder::new().allow_hash_bang(false).build();
    assert!(parse_script_with_options(&source, &options).is_err());
}

#[test]
fn version_gating() {
    use basalt::EcmaVersion;

    let source = Rc::new(Source::new_from_string("test.js", "123n;".to_owned()));
    let options = OptionsBuilder::new().ecma_version(EcmaVersion::ES2018).build();
    let error = parse_script_with_options(&source, &options).unwrap_err();
    assert_eq!(error.error.code(), "UNSUPPORTED_FEATURE");

    let source = Rc::new(Source::new_from_string(
        "test.js",
        "class C { x = 1; }".to_owned(),
    ));
    let options = OptionsBuilder::new().ecma_version(EcmaVersion::ES2015).build();
    let error = parse_script_with_options(&source, &options).unwrap_err();
    assert_eq!(error.error.code(), "UNSUPPORTED_FEATURE");

    // Optional chaining does not tokenize before ES2020
    let source = Rc::new(Source::new_from_string("test.js", "a?.b;".to_owned()));
    let options = OptionsBuilder::new().ecma_version(EcmaVersion::ES2019).build();
    assert!(parse_script_with_options(&source, &options).is_err());
}

#[test]
fn unexpected_token_errors() {
    assert_script_error("var = 1;", "UNEXPECTED_TOKEN");
    assert_script_error("a b;", "EXPECTED_TOKEN");
    assert_script_error("if (a {}", "EXPECTED_TOKEN");
    assert_script_error("{", "EXPECTED_TOKEN");
}

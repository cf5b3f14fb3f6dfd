use std::rc::Rc;

use basalt::parser::ast::*;
use basalt::{
    parse_expression, parse_module, parse_script, parse_script_with_options, print_program,
    Options, OptionsBuilder, Source,
};

fn parse_script_source(text: &str) -> Program {
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    parse_script(&source)
        .unwrap_or_else(|err| panic!("failed to parse {}: {}", text, err))
        .program
}

fn parse_module_source(text: &str) -> Program {
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    parse_module(&source)
        .unwrap_or_else(|err| panic!("failed to parse {}: {}", text, err))
        .program
}

fn parse_with_options(text: &str, options: Options) -> Program {
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    parse_script_with_options(&source, &options)
        .unwrap_or_else(|err| panic!("failed to parse {}: {}", text, err))
        .program
}

fn parse_single_expression(text: &str) -> Expression {
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    *parse_expression(&source).unwrap_or_else(|err| panic!("failed to parse {}: {}", text, err))
}

fn expression_statement(stmt: &Statement) -> &Expression {
    match stmt {
        Statement::Expr(stmt) => &stmt.expr,
        _ => panic!("expected expression statement"),
    }
}

#[test]
fn division_is_not_regexp() {
    let expr = parse_single_expression("a/b/c");

    // (a / b) / c
    match &expr {
        Expression::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOperator::Divide);
            match outer.left.as_ref() {
                Expression::Binary(inner) => {
                    assert_eq!(inner.operator, BinaryOperator::Divide);
                    assert_eq!(inner.left.to_id().name, "a");
                    assert_eq!(inner.right.to_id().name, "b");
                }
                _ => panic!("expected nested binary expression"),
            }
            assert_eq!(outer.right.to_id().name, "c");
        }
        _ => panic!("expected binary expression"),
    }
}

#[test]
fn regexp_at_expression_start() {
    let program = parse_script_source("/a/g");

    match expression_statement(&program.body[0]) {
        Expression::Regexp(regexp) => {
            assert_eq!(regexp.pattern, "a");
            assert_eq!(regexp.flags, "g");
            assert_eq!(regexp.raw, "/a/g");
        }
        _ => panic!("expected regexp literal"),
    }
}

#[test]
fn regexp_after_operator_and_division_after_operand() {
    let program = parse_script_source("x = /[/]/u; y = x / 2;");

    match expression_statement(&program.body[0]) {
        Expression::Assign(assign) => {
            assert!(matches!(assign.right.as_ref(), Expression::Regexp(_)))
        }
        _ => panic!("expected assignment"),
    }

    match expression_statement(&program.body[1]) {
        Expression::Assign(assign) => match assign.right.as_ref() {
            Expression::Binary(binary) => assert_eq!(binary.operator, BinaryOperator::Divide),
            _ => panic!("expected division"),
        },
        _ => panic!("expected assignment"),
    }
}

#[test]
fn async_arrow_function() {
    let expr = parse_single_expression("async (a, b) => a + b");

    match &expr {
        Expression::ArrowFunction(func) => {
            assert!(func.is_async);
            assert!(!func.is_generator);
            assert_eq!(func.params.len(), 2);

            match func.body.as_ref() {
                FunctionBody::Expression(Expression::Binary(binary)) => {
                    assert_eq!(binary.operator, BinaryOperator::Add)
                }
                _ => panic!("expected binary expression body"),
            }
        }
        _ => panic!("expected arrow function"),
    }
}

#[test]
fn optional_chain_shape() {
    let expr = parse_single_expression("a?.b?.(c).d");

    // A single chain expression wrapping member(call(member))
    match &expr {
        Expression::Chain(chain) => match chain.expression.as_ref() {
            Expression::Member(member) => {
                assert!(!member.is_optional);
                assert_eq!(member.property.to_id().name, "d");

                match member.object.as_ref() {
                    Expression::Call(call) => {
                        assert!(call.is_optional);
                        assert_eq!(call.arguments.len(), 1);

                        match call.callee.as_ref() {
                            Expression::Member(inner) => {
                                assert!(inner.is_optional);
                                assert_eq!(inner.property.to_id().name, "b");
                                assert_eq!(inner.object.to_id().name, "a");
                            }
                            _ => panic!("expected member callee"),
                        }
                    }
                    _ => panic!("expected optional call"),
                }
            }
            _ => panic!("expected member expression in chain"),
        },
        _ => panic!("expected chain expression"),
    }
}

#[test]
fn legacy_for_in_initializer_in_sloppy_mode() {
    let program = parse_script_source("for (var x = 1 in o) ;");

    match &program.body[0] {
        Statement::ForEach(stmt) => {
            assert_eq!(stmt.kind, ForEachKind::In);
            assert!(!stmt.is_await);

            match stmt.left.as_ref() {
                ForEachInit::VarDecl(decl) => {
                    assert_eq!(decl.declarations.len(), 1);
                    assert!(decl.declarations[0].init.is_some());
                }
                _ => panic!("expected var declaration"),
            }
        }
        _ => panic!("expected for in statement"),
    }
}

#[test]
fn automatic_semicolon_insertion() {
    let program = parse_script_source("a\nb");
    assert_eq!(program.body.len(), 2);

    // A newline terminates the restricted production after return
    let options = OptionsBuilder::new()
        .allow_return_outside_function(true)
        .build();
    let program = parse_with_options("return\n5;", options);

    match &program.body[0] {
        Statement::Return(ret) => assert!(ret.argument.is_none()),
        _ => panic!("expected return statement"),
    }
    assert!(matches!(&program.body[1], Statement::Expr(_)));
}

#[test]
fn asi_update_restriction() {
    let program = parse_script_source("a\n++b");
    assert_eq!(program.body.len(), 2);

    match expression_statement(&program.body[1]) {
        Expression::Update(update) => assert!(update.is_prefix),
        _ => panic!("expected prefix update"),
    }
}

#[test]
fn do_while_asi() {
    let program = parse_script_source("do {} while (a) b");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn strict_directive_detection() {
    let program = parse_script_source("'use strict';");
    assert!(program.is_strict_mode);
    assert!(program.has_use_strict_directive);

    // A directive with an escape sequence does not enable strict mode, so
    // a with statement still parses
    let program = parse_script_source("'use\\u0020strict'; with (a) {}");
    assert!(!program.is_strict_mode);

    // A string expression is not a directive
    let program = parse_script_source("'use strict'.length;");
    assert!(!program.is_strict_mode);

    // Modules are always strict
    let program = parse_module_source("x;");
    assert!(program.is_strict_mode);
}

#[test]
fn strict_mode_propagates_into_functions() {
    let program = parse_script_source("'use strict'; function f() {}");
    match &program.body[1] {
        Statement::FuncDecl(func) => {
            assert!(func.is_strict_mode);
            assert!(!func.has_use_strict_directive);
        }
        _ => panic!("expected function declaration"),
    }

    let program = parse_script_source("function f() { 'use strict'; }");
    assert!(!program.is_strict_mode);
    match &program.body[0] {
        Statement::FuncDecl(func) => {
            assert!(func.is_strict_mode);
            assert!(func.has_use_strict_directive);
        }
        _ => panic!("expected function declaration"),
    }
}

#[test]
fn template_literals() {
    let expr = parse_single_expression("`a${b}c`");

    match &expr {
        Expression::Template(template) => {
            assert_eq!(template.quasis.len(), 2);
            assert_eq!(template.expressions.len(), 1);

            assert_eq!(template.quasis[0].raw, "a");
            assert_eq!(template.quasis[0].cooked.as_deref(), Some("a"));
            assert!(!template.quasis[0].is_tail);

            assert_eq!(template.quasis[1].raw, "c");
            assert!(template.quasis[1].is_tail);

            assert_eq!(template.expressions[0].to_id().name, "b");
        }
        _ => panic!("expected template literal"),
    }
}

#[test]
fn tagged_template_with_invalid_escape() {
    // An invalid escape produces a missing cooked value in tagged templates
    let expr = parse_single_expression("tag`\\u`");

    match &expr {
        Expression::TaggedTemplate(tagged) => {
            assert_eq!(tagged.tag.to_id().name, "tag");
            assert!(tagged.quasi.quasis[0].cooked.is_none());
            assert_eq!(tagged.quasi.quasis[0].raw, "\\u");
        }
        _ => panic!("expected tagged template"),
    }
}

#[test]
fn template_escape_decoding() {
    let expr = parse_single_expression("`\\n\\x41\\u0042`");

    match &expr {
        Expression::Template(template) => {
            assert_eq!(template.quasis[0].cooked.as_deref(), Some("\nAB"));
        }
        _ => panic!("expected template literal"),
    }
}

#[test]
fn numeric_literals() {
    let program = parse_script_source("0x10; 0o17; 0b101; 1_000_000; 1e3; .5; 123n;");

    let values: Vec<&Expression> = program.body.iter().map(expression_statement).collect();

    match values[0] {
        Expression::Number(lit) => assert_eq!(lit.value, 16.0),
        _ => panic!("expected number"),
    }
    match values[1] {
        Expression::Number(lit) => assert_eq!(lit.value, 15.0),
        _ => panic!("expected number"),
    }
    match values[2] {
        Expression::Number(lit) => assert_eq!(lit.value, 5.0),
        _ => panic!("expected number"),
    }
    match values[3] {
        Expression::Number(lit) => assert_eq!(lit.value, 1_000_000.0),
        _ => panic!("expected number"),
    }
    match values[4] {
        Expression::Number(lit) => assert_eq!(lit.value, 1000.0),
        _ => panic!("expected number"),
    }
    match values[5] {
        Expression::Number(lit) => assert_eq!(lit.value, 0.5),
        _ => panic!("expected number"),
    }
    match values[6] {
        Expression::BigInt(lit) => assert_eq!(lit.value.to_string(), "123"),
        _ => panic!("expected bigint"),
    }
}

#[test]
fn string_escape_decoding() {
    let program = parse_script_source("'\\x41\\u0042\\u{43}\\n';");

    match expression_statement(&program.body[0]) {
        Expression::String(lit) => assert_eq!(lit.value, "ABC\n"),
        _ => panic!("expected string"),
    }
}

#[test]
fn unicode_escaped_identifier() {
    let program = parse_script_source("var \\u0061 = 1; \\u0061;");

    match &program.body[0] {
        Statement::VarDecl(decl) => {
            assert_eq!(decl.declarations[0].id.to_id().name, "a");
        }
        _ => panic!("expected var declaration"),
    }
}

#[test]
fn destructuring_declarations() {
    let program = parse_script_source("let { a, b: { c }, d = 1, ...rest } = obj;");

    match &program.body[0] {
        Statement::VarDecl(decl) => {
            assert_eq!(decl.kind, VarKind::Let);
            match decl.declarations[0].id.as_ref() {
                Pattern::Object(object) => {
                    assert_eq!(object.properties.len(), 4);
                    assert!(object.properties[3].is_rest);
                }
                _ => panic!("expected object pattern"),
            }
        }
        _ => panic!("expected var declaration"),
    }
}

#[test]
fn destructuring_assignment() {
    let program = parse_script_source("[a, , [b], ...c] = d;");

    match expression_statement(&program.body[0]) {
        Expression::Assign(assign) => {
            assert_eq!(assign.operator, AssignmentOperator::Equals);
            match assign.left.as_ref() {
                Pattern::Array(array) => {
                    assert_eq!(array.elements.len(), 4);
                    assert!(matches!(array.elements[0], ArrayPatternElement::Pattern(_)));
                    assert!(matches!(array.elements[1], ArrayPatternElement::Hole));
                    assert!(matches!(array.elements[3], ArrayPatternElement::Rest(_)));
                }
                _ => panic!("expected array pattern"),
            }
        }
        _ => panic!("expected assignment"),
    }
}

#[test]
fn object_destructuring_assignment_with_defaults() {
    let program = parse_script_source("({ a = 1, b: c = 2 } = d);");

    match expression_statement(&program.body[0]) {
        Expression::Assign(assign) => match assign.left.as_ref() {
            Pattern::Object(object) => {
                assert_eq!(object.properties.len(), 2);
                assert!(matches!(
                    object.properties[0].value.as_ref(),
                    Pattern::Assign(_)
                ));
            }
            _ => panic!("expected object pattern"),
        },
        _ => panic!("expected assignment"),
    }
}

#[test]
fn member_expression_as_destructuring_target() {
    let program = parse_script_source("[a.b, c[0]] = d;");

    match expression_statement(&program.body[0]) {
        Expression::Assign(assign) => match assign.left.as_ref() {
            Pattern::Array(array) => {
                assert!(matches!(
                    array.elements[0],
                    ArrayPatternElement::Pattern(Pattern::Member(_))
                ));
            }
            _ => panic!("expected array pattern"),
        },
        _ => panic!("expected assignment"),
    }
}

#[test]
fn duplicate_proto_allowed_in_patterns() {
    parse_script_source("({ __proto__: a, __proto__: b } = c);");
    parse_script_source("for ({ __proto__: a, __proto__: b } of c) ;");
}

#[test]
fn arrow_functions() {
    let expr = parse_single_expression("a => b");
    assert!(matches!(&expr, Expression::ArrowFunction(_)));

    let expr = parse_single_expression("() => ({})");
    match &expr {
        Expression::ArrowFunction(func) => {
            assert!(func.params.is_empty());
            assert!(matches!(
                func.body.as_ref(),
                FunctionBody::Expression(Expression::Object(_))
            ));
        }
        _ => panic!("expected arrow function"),
    }

    let expr = parse_single_expression("({ a = 1, ...rest }) => a");
    match &expr {
        Expression::ArrowFunction(func) => assert_eq!(func.params.len(), 1),
        _ => panic!("expected arrow function"),
    }

    let expr = parse_single_expression("async => async");
    match &expr {
        Expression::ArrowFunction(func) => {
            assert!(!func.is_async);
            assert_eq!(func.params.len(), 1);
        }
        _ => panic!("expected arrow function"),
    }
}

#[test]
fn logical_assignment_operators() {
    let program = parse_script_source("a &&= b; a ||= c; a ??= d;");

    let operators: Vec<AssignmentOperator> = program
        .body
        .iter()
        .map(|stmt| match expression_statement(stmt) {
            Expression::Assign(assign) => assign.operator,
            _ => panic!("expected assignment"),
        })
        .collect();

    assert_eq!(
        operators,
        vec![
            AssignmentOperator::LogicalAnd,
            AssignmentOperator::LogicalOr,
            AssignmentOperator::NullishCoalesce,
        ]
    );
}

#[test]
fn exponent_right_associative() {
    let expr = parse_single_expression("2 ** 3 ** 2");

    match &expr {
        Expression::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOperator::Exponent);
            assert!(matches!(outer.left.as_ref(), Expression::Number(_)));
            match outer.right.as_ref() {
                Expression::Binary(inner) => assert_eq!(inner.operator, BinaryOperator::Exponent),
                _ => panic!("expected nested exponent"),
            }
        }
        _ => panic!("expected binary expression"),
    }
}

#[test]
fn parenthesized_coalesce_and_logical() {
    parse_single_expression("(a ?? b) || c");
    parse_single_expression("a ?? (b && c)");
}

#[test]
fn generators_and_yield() {
    let program = parse_script_source("function* g() { yield; yield 1; yield* gen(); }");

    match &program.body[0] {
        Statement::FuncDecl(func) => {
            assert!(func.is_generator);

            if let FunctionBody::Block(block) = func.body.as_ref() {
                match expression_statement(&block.body[1]) {
                    Expression::Yield(yield_expr) => {
                        assert!(!yield_expr.is_delegate);
                        assert!(yield_expr.argument.is_some());
                    }
                    _ => panic!("expected yield"),
                }

                match expression_statement(&block.body[2]) {
                    Expression::Yield(yield_expr) => assert!(yield_expr.is_delegate),
                    _ => panic!("expected yield"),
                }
            }
        }
        _ => panic!("expected function declaration"),
    }

    // yield is an ordinary identifier in sloppy non-generator code
    parse_script_source("var yield = 1; yield;");
}

#[test]
fn async_functions_and_await() {
    let program = parse_script_source("async function f() { await g(); }");
    match &program.body[0] {
        Statement::FuncDecl(func) => assert!(func.is_async),
        _ => panic!("expected function declaration"),
    }

    // await is an ordinary identifier in scripts
    parse_script_source("var await = 1; await;");

    // Top level await is allowed in modules
    let program = parse_module_source("await x;");
    assert!(matches!(
        expression_statement(&program.body[0]),
        Expression::Await(_)
    ));

    // for await of inside async functions
    parse_script_source("async function f() { for await (const x of xs) {} }");
}

#[test]
fn class_bodies() {
    let program = parse_script_source(
        "class C extends B {
            constructor() { super(); }
            m(a) { return super.x; }
            get x() { return 1; }
            set x(v) {}
            static s() {}
            f = 1;
            static g = 2;
            #p = 3;
            static { this.g += 1; }
            async am() { await 1; }
            *gm() { yield 1; }
        }",
    );

    match &program.body[0] {
        Statement::ClassDecl(class) => {
            assert!(class.super_class.is_some());

            let methods: Vec<&ClassMethod> = class
                .body
                .iter()
                .filter_map(|element| match element {
                    ClassElement::Method(method) => Some(method),
                    _ => None,
                })
                .collect();
            let properties: Vec<&ClassProperty> = class
                .body
                .iter()
                .filter_map(|element| match element {
                    ClassElement::Property(property) => Some(property),
                    _ => None,
                })
                .collect();

            assert_eq!(methods.len(), 8);
            assert_eq!(properties.len(), 3);

            assert_eq!(methods[0].kind, ClassMethodKind::Constructor);
            assert_eq!(methods[1].kind, ClassMethodKind::Method);
            assert_eq!(methods[2].kind, ClassMethodKind::Get);
            assert_eq!(methods[3].kind, ClassMethodKind::Set);
            assert!(methods[4].is_static);
            assert_eq!(methods[5].kind, ClassMethodKind::StaticInitializer);
            assert!(methods[6].value.is_async);
            assert!(methods[7].value.is_generator);

            assert!(properties[2].is_private);
        }
        _ => panic!("expected class declaration"),
    }
}

#[test]
fn private_name_references() {
    parse_script_source("class C { #x; m() { return this.#x; } }");
    parse_script_source("class C { #x; m(o) { return #x in o; } }");

    // Inner classes can reference outer private names
    parse_script_source("class A { #x; m() { return class B { n() { return this.#x; } }; } }");
}

#[test]
fn labeled_statements() {
    parse_script_source("a: while (x) { continue a; }");
    parse_script_source("a: b: while (x) { continue a; break b; }");
    parse_script_source("a: { break a; }");
}

#[test]
fn switch_statements() {
    let program = parse_script_source(
        "switch (x) { case 1: a; break; case 2: b; break; default: c; }",
    );

    match &program.body[0] {
        Statement::Switch(switch) => {
            assert_eq!(switch.cases.len(), 3);
            assert!(switch.cases[2].test.is_none());
        }
        _ => panic!("expected switch statement"),
    }
}

#[test]
fn try_catch_forms() {
    parse_script_source("try { a; } catch (e) { b; } finally { c; }");
    parse_script_source("try { a; } catch { b; }");
    parse_script_source("try { a; } catch ([e1, e2]) { b; }");

    // Annex B allows a var to share the simple catch parameter name
    parse_script_source("try {} catch (e) { var e; }");
}

#[test]
fn for_statement_heads() {
    parse_script_source("for (;;) break;");
    parse_script_source("for (var i = 0; i < 10; i++) ;");
    parse_script_source("for (let i = 0, j = 1; i < j; i++, j--) ;");
    parse_script_source("for (const x of xs) ;");
    parse_script_source("for (const [a, b] of pairs) ;");
    parse_script_source("for (x in o) ;");
    parse_script_source("for (x.y of o) ;");

    // `in` is allowed in parenthesized subexpressions of a for init
    parse_script_source("for (var x = ('a' in o);;) ;");
}

#[test]
fn let_is_contextual_in_sloppy_mode() {
    parse_script_source("var let = 1; let;");
    parse_script_source("let = 5;");

    let program = parse_script_source("let x = 1;");
    match &program.body[0] {
        Statement::VarDecl(decl) => assert_eq!(decl.kind, VarKind::Let),
        _ => panic!("expected let declaration"),
    }
}

#[test]
fn new_expressions() {
    let expr = parse_single_expression("new a.b(c)");
    match &expr {
        Expression::New(new) => {
            assert!(matches!(new.callee.as_ref(), Expression::Member(_)));
            assert_eq!(new.arguments.len(), 1);
        }
        _ => panic!("expected new expression"),
    }

    // new new a()() attaches arguments innermost first
    let expr = parse_single_expression("new new a()");
    assert!(matches!(&expr, Expression::New(_)));

    let program = parse_script_source("function f() { return new.target; }");
    match &program.body[0] {
        Statement::FuncDecl(_) => {}
        _ => panic!("expected function"),
    }
}

#[test]
fn meta_properties_and_dynamic_import() {
    let program = parse_module_source("import.meta.url;");
    match expression_statement(&program.body[0]) {
        Expression::Member(member) => {
            assert!(matches!(
                member.object.as_ref(),
                Expression::MetaProperty(MetaProperty { kind: MetaPropertyKind::ImportMeta, .. })
            ));
        }
        _ => panic!("expected member expression"),
    }

    let program = parse_script_source("import('mod').then(f);");
    match expression_statement(&program.body[0]) {
        Expression::Call(call) => match call.callee.as_ref() {
            Expression::Member(member) => {
                assert!(matches!(member.object.as_ref(), Expression::Import(_)))
            }
            _ => panic!("expected member"),
        },
        _ => panic!("expected call"),
    }
}

#[test]
fn import_declarations() {
    let program = parse_module_source(
        "import \"side-effect\";
         import a from \"m1\";
         import * as ns from \"m2\";
         import b, { c, d as e, \"f\" as g } from \"m3\";",
    );

    match &program.body[3] {
        Statement::Import(import) => {
            assert_eq!(import.specifiers.len(), 4);
            assert!(matches!(import.specifiers[0], ImportSpecifier::Default(_)));
            assert!(matches!(import.specifiers[1], ImportSpecifier::Named(_)));
            assert_eq!(import.source.value, "m3");
        }
        _ => panic!("expected import declaration"),
    }
}

#[test]
fn import_attributes() {
    let program = parse_module_source("import config from \"./config.json\" with { type: \"json\" };");

    match &program.body[0] {
        Statement::Import(import) => {
            assert_eq!(import.attributes.len(), 1);
            assert_eq!(import.attributes[0].value.value, "json");
        }
        _ => panic!("expected import declaration"),
    }
}

#[test]
fn export_declarations() {
    let program = parse_module_source(
        "export var a = 1;
         export function f() {}
         export class C {}
         export { a as b };
         export { x } from \"m\";
         export * from \"m2\";
         export * as ns from \"m3\";
         export default 42;",
    );

    assert!(matches!(&program.body[0], Statement::ExportNamed(_)));
    assert!(matches!(&program.body[4], Statement::ExportNamed(_)));
    assert!(matches!(&program.body[5], Statement::ExportAll(_)));
    assert!(matches!(&program.body[7], Statement::ExportDefault(_)));
}

#[test]
fn export_default_function_and_class() {
    parse_module_source("export default function () {}");
    parse_module_source("export default function named() {}");
    parse_module_source("export default class {}");
    parse_module_source("export default class Named {}");
}

#[test]
fn hashbang_comment() {
    let program = parse_script_source("#!/usr/bin/env node\nvar x = 1;");
    assert_eq!(program.body.len(), 1);
}

#[test]
fn preserve_parens_option() {
    let options = OptionsBuilder::new().preserve_parens(true).build();
    let program = parse_with_options("(a);", options);

    assert!(matches!(
        expression_statement(&program.body[0]),
        Expression::Paren(_)
    ));

    // Parenthesized simple assignment targets are still valid
    let options = OptionsBuilder::new().preserve_parens(true).build();
    parse_with_options("(a) = 1;", options);
}

#[test]
fn tolerant_mode_collects_errors() {
    let source = Rc::new(Source::new_from_string(
        "test.js",
        "var x = ;\nvar y = 2;\nvar z = ;\nvar w = 4;".to_owned(),
    ));
    let options = OptionsBuilder::new().tolerant(true).build();
    let result = parse_script_with_options(&source, &options).unwrap();

    assert_eq!(result.errors.len(), 2);

    // The valid statements were still parsed
    let declared: Vec<String> = result
        .program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::VarDecl(decl) => Some(decl.declarations[0].id.to_id().name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(declared, vec!["y".to_owned(), "w".to_owned()]);
}

#[test]
fn node_ranges_nest() {
    let text = "let x = a + b;";
    let program = parse_script_source(text);

    assert_eq!(program.loc.start, 0);
    assert_eq!(program.loc.end, text.len());

    match &program.body[0] {
        Statement::VarDecl(decl) => {
            assert!(program.loc.contains(decl.loc));

            let declarator = &decl.declarations[0];
            assert!(decl.loc.contains(declarator.loc));

            let init = declarator.init.as_ref().unwrap();
            let init_loc = init.loc();
            assert!(declarator.loc.contains(init_loc));

            match init.as_ref() {
                Expression::Binary(binary) => {
                    assert!(init_loc.contains(binary.left.loc()));
                    assert!(init_loc.contains(binary.right.loc()));
                    assert!(binary.left.loc().end <= binary.right.loc().start);
                }
                _ => panic!("expected binary expression"),
            }
        }
        _ => panic!("expected var declaration"),
    }
}

#[test]
fn printer_emits_estree_shape() {
    let text = "let x = 1;";
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    let program = parse_script(&source).unwrap().program;

    let printed = print_program(&program, &source);

    assert!(printed.contains("type: \"Program\""));
    assert!(printed.contains("type: \"VariableDeclaration\""));
    assert!(printed.contains("type: \"VariableDeclarator\""));
    assert!(printed.contains("type: \"Identifier\""));
    assert!(printed.contains("type: \"Literal\""));
    assert!(printed.contains("range: [0, 10]"));
    assert!(printed.contains("loc: \"1:0-1:10\""));
}

#[test]
fn line_terminators_in_positions() {
    let text = "a;\r\nb;\u{2028}c;";
    let source = Rc::new(Source::new_from_string("test.js", text.to_owned()));
    let program = parse_script(&source).unwrap().program;

    assert_eq!(program.body.len(), 3);

    let third_loc = match &program.body[2] {
        Statement::Expr(stmt) => stmt.loc,
        _ => panic!("expected expression statement"),
    };

    let (line, col) = source.line_col_for_pos(third_loc.start);
    assert_eq!((line, col), (3, 0));
}

#[test]
fn sequence_and_conditional_expressions() {
    let expr = parse_single_expression("(a, b, c ? d : e)");
    match &expr {
        Expression::Sequence(seq) => {
            assert_eq!(seq.expressions.len(), 3);
            assert!(matches!(seq.expressions[2], Expression::Conditional(_)));
        }
        _ => panic!("expected sequence expression"),
    }
}

#[test]
fn object_literal_forms() {
    let program = parse_script_source(
        "x = { a, b: 1, 'c': 2, 3: 4, [k]: 5, m() {}, get g() { return 1; }, set s(v) {}, async am() {}, *gm() {}, ...rest };",
    );

    match expression_statement(&program.body[0]) {
        Expression::Assign(assign) => match assign.right.as_ref() {
            Expression::Object(object) => {
                assert_eq!(object.properties.len(), 11);
                assert!(object.properties[0].is_shorthand);
                assert!(object.properties[4].is_computed);
                assert!(object.properties[5].is_method);
                assert_eq!(object.properties[6].kind, PropertyKind::Get);
                assert_eq!(object.properties[7].kind, PropertyKind::Set);
                assert_eq!(object.properties[10].kind, PropertyKind::Spread);
            }
            _ => panic!("expected object literal"),
        },
        _ => panic!("expected assignment"),
    }
}

#[test]
fn keyword_like_property_names() {
    parse_script_source("x = { if: 1, for: 2, class: 3, new: 4 };");
    parse_script_source("x.if; x.class; x.new;");
}

#[test]
fn expression_entry_point() {
    let expr = parse_single_expression("1 + 2 * 3");
    assert!(matches!(&expr, Expression::Binary(_)));

    let source = Rc::new(Source::new_from_string("test.js", "1 + ".to_owned()));
    assert!(parse_expression(&source).is_err());
}

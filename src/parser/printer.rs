use super::ast::*;
use super::loc::{find_line_col_for_pos, Loc};
use super::source::Source;

/// Prints an AST in an ESTree shaped text format, used for snapshot tests
/// and debugging. Each node is printed with its `type` tag, `range`, and a
/// concise `loc` of the form `line:col-line:col`.
struct Printer<'a> {
    buf: String,
    indent: usize,
    source: &'a Source,
}

impl<'a> Printer<'a> {
    fn new(source: &'a Source) -> Printer<'a> {
        Printer { buf: String::new(), indent: 0, source }
    }

    fn finish(self) -> String {
        self.buf
    }

    fn inc_indent(&mut self) {
        self.indent += 1;
    }

    fn dec_indent(&mut self) {
        self.indent -= 1;
    }

    fn indent(&mut self) {
        self.string(&"  ".repeat(self.indent))
    }

    fn string(&mut self, str: &str) {
        self.buf.push_str(str);
    }

    fn print_str(&mut self, string: &str) {
        self.buf.push('\"');
        self.buf.push_str(string);
        self.buf.push('\"');
    }

    fn print_string(&mut self, string: &String) {
        self.print_str(string)
    }

    fn print_bool(&mut self, value: bool) {
        if value {
            self.string("true")
        } else {
            self.string("false")
        }
    }

    fn print_f64(&mut self, value: f64) {
        self.string(&value.to_string())
    }

    fn print_null(&mut self) {
        self.string("null")
    }

    fn start_node(&mut self, name: &str, loc: &Loc) {
        self.string("{\n");
        self.inc_indent();

        self.property("type", name, Printer::print_str);

        self.indent();
        self.string(&format!("range: [{}, {}],\n", loc.start, loc.end));

        // Calculate line/column offsets for the loc
        let line_offsets = self.source.line_offsets();
        let (start_line, start_col) = find_line_col_for_pos(loc.start, line_offsets);
        let (end_line, end_col) = find_line_col_for_pos(loc.end, line_offsets);

        self.indent();
        self.string(&format!(
            "loc: \"{}:{}-{}:{}\",\n",
            start_line, start_col, end_line, end_col
        ));
    }

    fn end_node(&mut self) {
        self.dec_indent();
        self.indent();
        self.string("}");
    }

    fn property<T>(&mut self, name: &str, value: T, print_value_fn: fn(&mut Self, T)) {
        self.indent();

        self.string(name);
        self.string(": ");
        print_value_fn(self, value);

        self.string(",\n");
    }

    fn array_property<T>(
        &mut self,
        name: &str,
        values: &[T],
        print_value_fn: fn(&mut Self, &T),
    ) {
        self.indent();
        self.string(name);
        self.string(": ");
        if values.is_empty() {
            self.string("[],\n")
        } else {
            self.string("[\n");
            self.inc_indent();

            for value in values {
                self.indent();
                print_value_fn(self, value);
                self.string(",\n");
            }

            self.dec_indent();
            self.indent();
            self.string("],\n");
        }
    }

    fn optional_property<T>(
        &mut self,
        name: &str,
        value: &Option<T>,
        print_value_fn: fn(&mut Self, &T),
    ) {
        self.indent();
        self.string(name);
        self.string(": ");

        match value {
            None => self.print_null(),
            Some(value) => print_value_fn(self, value),
        }

        self.string(",\n");
    }

    fn print_program(&mut self, program: &Program) {
        self.start_node("Program", &program.loc);

        let source_type = match program.kind {
            ProgramKind::Script => "script",
            ProgramKind::Module => "module",
        };
        self.property("sourceType", source_type, Printer::print_str);
        self.property("strict", program.is_strict_mode, Printer::print_bool);
        self.array_property("body", &program.body, Printer::print_statement);

        self.end_node();
    }

    fn print_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VarDecl(var_decl) => self.print_variable_declaration(var_decl),
            Statement::FuncDecl(func) => self.print_function(func, "FunctionDeclaration"),
            Statement::ClassDecl(class) => self.print_class(class, "ClassDeclaration"),
            Statement::Expr(stmt) => self.print_expression_statement(stmt),
            Statement::Block(block) => self.print_block(block),
            Statement::If(stmt) => self.print_if_statement(stmt),
            Statement::Switch(stmt) => self.print_switch_statement(stmt),
            Statement::For(stmt) => self.print_for_statement(stmt),
            Statement::ForEach(stmt) => self.print_for_each_statement(stmt),
            Statement::While(stmt) => self.print_while_statement(stmt),
            Statement::DoWhile(stmt) => self.print_do_while_statement(stmt),
            Statement::With(stmt) => self.print_with_statement(stmt),
            Statement::Try(stmt) => self.print_try_statement(stmt),
            Statement::Throw(stmt) => self.print_throw_statement(stmt),
            Statement::Return(stmt) => self.print_return_statement(stmt),
            Statement::Break(stmt) => self.print_break_statement(stmt),
            Statement::Continue(stmt) => self.print_continue_statement(stmt),
            Statement::Labeled(stmt) => self.print_labeled_statement(stmt),
            Statement::Empty(loc) => {
                self.start_node("EmptyStatement", loc);
                self.end_node();
            }
            Statement::Debugger(loc) => {
                self.start_node("DebuggerStatement", loc);
                self.end_node();
            }
            Statement::Import(import) => self.print_import_declaration(import),
            Statement::ExportNamed(export) => self.print_export_named_declaration(export),
            Statement::ExportDefault(export) => self.print_export_default_declaration(export),
            Statement::ExportAll(export) => self.print_export_all_declaration(export),
        }
    }

    fn print_variable_declaration(&mut self, var_decl: &VariableDeclaration) {
        self.start_node("VariableDeclaration", &var_decl.loc);

        let kind = match var_decl.kind {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        };
        self.property("kind", kind, Printer::print_str);

        self.array_property(
            "declarations",
            &var_decl.declarations,
            Printer::print_variable_declarator,
        );

        self.end_node();
    }

    fn print_variable_declarator(&mut self, decl: &VariableDeclarator) {
        self.start_node("VariableDeclarator", &decl.loc);
        self.property("id", decl.id.as_ref(), Printer::print_pattern);
        self.optional_property("init", &decl.init, |p, init| p.print_expression(init));
        self.end_node();
    }

    fn print_function(&mut self, func: &Function, name: &str) {
        self.start_node(name, &func.loc);

        self.optional_property("id", &func.id, |p, id| p.print_identifier(id));
        self.array_property("params", &func.params, Printer::print_function_param);
        self.property("generator", func.is_generator, Printer::print_bool);
        self.property("async", func.is_async, Printer::print_bool);

        self.indent();
        self.string("body: ");
        match func.body.as_ref() {
            FunctionBody::Block(block) => self.print_block(block),
            FunctionBody::Expression(expr) => self.print_expression(expr),
        }
        self.string(",\n");

        self.end_node();
    }

    fn print_function_param(&mut self, param: &FunctionParam) {
        match param {
            FunctionParam::Pattern(pattern) => self.print_pattern(pattern),
            FunctionParam::Rest(rest) => self.print_rest_element(rest),
        }
    }

    fn print_class(&mut self, class: &Class, name: &str) {
        self.start_node(name, &class.loc);

        self.optional_property("id", &class.id, |p, id| p.print_identifier(id));
        self.optional_property("superClass", &class.super_class, |p, expr| {
            p.print_expression(expr)
        });
        self.array_property("body", &class.body, Printer::print_class_element);

        self.end_node();
    }

    fn print_class_element(&mut self, element: &ClassElement) {
        match element {
            ClassElement::Method(method) => self.print_class_method(method),
            ClassElement::Property(property) => self.print_class_property(property),
        }
    }

    fn print_class_method(&mut self, method: &ClassMethod) {
        if method.kind == ClassMethodKind::StaticInitializer {
            self.start_node("StaticBlock", &method.loc);

            if let FunctionBody::Block(block) = method.value.body.as_ref() {
                self.array_property("body", &block.body, Printer::print_statement);
            }

            self.end_node();
            return;
        }

        self.start_node("MethodDefinition", &method.loc);

        let kind = match method.kind {
            ClassMethodKind::Method => "method",
            ClassMethodKind::Constructor => "constructor",
            ClassMethodKind::Get => "get",
            ClassMethodKind::Set => "set",
            ClassMethodKind::StaticInitializer => unreachable!(),
        };
        self.property("kind", kind, Printer::print_str);
        self.property("static", method.is_static, Printer::print_bool);
        self.property("computed", method.is_computed, Printer::print_bool);
        self.print_property_key(&method.key, method.is_private);

        self.indent();
        self.string("value: ");
        self.print_function(&method.value, "FunctionExpression");
        self.string(",\n");

        self.end_node();
    }

    fn print_class_property(&mut self, property: &ClassProperty) {
        self.start_node("PropertyDefinition", &property.loc);

        self.property("static", property.is_static, Printer::print_bool);
        self.property("computed", property.is_computed, Printer::print_bool);
        self.print_property_key(&property.key, property.is_private);
        self.optional_property("value", &property.value, |p, expr| p.print_expression(expr));

        self.end_node();
    }

    fn print_property_key(&mut self, key: &Expression, is_private: bool) {
        self.indent();
        self.string("key: ");

        if is_private {
            let id = key.to_id();
            self.start_node("PrivateIdentifier", &id.loc);
            self.property("name", &id.name, Printer::print_string);
            self.end_node();
        } else {
            self.print_expression(key);
        }

        self.string(",\n");
    }

    fn print_expression_statement(&mut self, stmt: &ExpressionStatement) {
        self.start_node("ExpressionStatement", &stmt.loc);
        self.property("expression", stmt.expr.as_ref(), Printer::print_expression);
        self.end_node();
    }

    fn print_block(&mut self, block: &Block) {
        self.start_node("BlockStatement", &block.loc);
        self.array_property("body", &block.body, Printer::print_statement);
        self.end_node();
    }

    fn print_if_statement(&mut self, stmt: &IfStatement) {
        self.start_node("IfStatement", &stmt.loc);
        self.property("test", stmt.test.as_ref(), Printer::print_expression);
        self.property("consequent", stmt.conseq.as_ref(), Printer::print_statement);
        self.optional_property("alternate", &stmt.altern, |p, stmt| p.print_statement(stmt));
        self.end_node();
    }

    fn print_switch_statement(&mut self, stmt: &SwitchStatement) {
        self.start_node("SwitchStatement", &stmt.loc);
        self.property("discriminant", stmt.discriminant.as_ref(), Printer::print_expression);
        self.array_property("cases", &stmt.cases, Printer::print_switch_case);
        self.end_node();
    }

    fn print_switch_case(&mut self, case: &SwitchCase) {
        self.start_node("SwitchCase", &case.loc);
        self.optional_property("test", &case.test, |p, expr| p.print_expression(expr));
        self.array_property("consequent", &case.body, Printer::print_statement);
        self.end_node();
    }

    fn print_for_statement(&mut self, stmt: &ForStatement) {
        self.start_node("ForStatement", &stmt.loc);

        self.indent();
        self.string("init: ");
        match &stmt.init {
            None => self.print_null(),
            Some(init) => match init.as_ref() {
                ForInit::Expression(expr) => self.print_expression(expr),
                ForInit::VarDecl(decl) => self.print_variable_declaration(decl),
            },
        }
        self.string(",\n");

        self.optional_property("test", &stmt.test, |p, expr| p.print_expression(expr));
        self.optional_property("update", &stmt.update, |p, expr| p.print_expression(expr));
        self.property("body", stmt.body.as_ref(), Printer::print_statement);

        self.end_node();
    }

    fn print_for_each_statement(&mut self, stmt: &ForEachStatement) {
        let name = match stmt.kind {
            ForEachKind::In => "ForInStatement",
            ForEachKind::Of => "ForOfStatement",
        };

        self.start_node(name, &stmt.loc);

        if stmt.kind == ForEachKind::Of {
            self.property("await", stmt.is_await, Printer::print_bool);
        }

        self.indent();
        self.string("left: ");
        match stmt.left.as_ref() {
            ForEachInit::VarDecl(decl) => self.print_variable_declaration(decl),
            ForEachInit::Pattern(pattern) => self.print_pattern(pattern),
        }
        self.string(",\n");

        self.property("right", stmt.right.as_ref(), Printer::print_expression);
        self.property("body", stmt.body.as_ref(), Printer::print_statement);

        self.end_node();
    }

    fn print_while_statement(&mut self, stmt: &WhileStatement) {
        self.start_node("WhileStatement", &stmt.loc);
        self.property("test", stmt.test.as_ref(), Printer::print_expression);
        self.property("body", stmt.body.as_ref(), Printer::print_statement);
        self.end_node();
    }

    fn print_do_while_statement(&mut self, stmt: &DoWhileStatement) {
        self.start_node("DoWhileStatement", &stmt.loc);
        self.property("body", stmt.body.as_ref(), Printer::print_statement);
        self.property("test", stmt.test.as_ref(), Printer::print_expression);
        self.end_node();
    }

    fn print_with_statement(&mut self, stmt: &WithStatement) {
        self.start_node("WithStatement", &stmt.loc);
        self.property("object", stmt.object.as_ref(), Printer::print_expression);
        self.property("body", stmt.body.as_ref(), Printer::print_statement);
        self.end_node();
    }

    fn print_try_statement(&mut self, stmt: &TryStatement) {
        self.start_node("TryStatement", &stmt.loc);
        self.property("block", stmt.block.as_ref(), Printer::print_block);
        self.optional_property("handler", &stmt.handler, |p, handler| {
            p.print_catch_clause(handler)
        });
        self.optional_property("finalizer", &stmt.finalizer, |p, block| p.print_block(block));
        self.end_node();
    }

    fn print_catch_clause(&mut self, clause: &CatchClause) {
        self.start_node("CatchClause", &clause.loc);
        self.optional_property("param", &clause.param, |p, pattern| p.print_pattern(pattern));
        self.property("body", clause.body.as_ref(), Printer::print_block);
        self.end_node();
    }

    fn print_throw_statement(&mut self, stmt: &ThrowStatement) {
        self.start_node("ThrowStatement", &stmt.loc);
        self.property("argument", stmt.argument.as_ref(), Printer::print_expression);
        self.end_node();
    }

    fn print_return_statement(&mut self, stmt: &ReturnStatement) {
        self.start_node("ReturnStatement", &stmt.loc);
        self.optional_property("argument", &stmt.argument, |p, expr| p.print_expression(expr));
        self.end_node();
    }

    fn print_break_statement(&mut self, stmt: &BreakStatement) {
        self.start_node("BreakStatement", &stmt.loc);
        self.optional_property("label", &stmt.label, |p, label| p.print_identifier(label));
        self.end_node();
    }

    fn print_continue_statement(&mut self, stmt: &ContinueStatement) {
        self.start_node("ContinueStatement", &stmt.loc);
        self.optional_property("label", &stmt.label, |p, label| p.print_identifier(label));
        self.end_node();
    }

    fn print_labeled_statement(&mut self, stmt: &LabeledStatement) {
        self.start_node("LabeledStatement", &stmt.loc);
        self.property("label", stmt.label.as_ref(), Printer::print_identifier);
        self.property("body", stmt.body.as_ref(), Printer::print_statement);
        self.end_node();
    }

    fn print_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Id(id) => self.print_identifier(id),
            Expression::Null(loc) => {
                self.start_node("Literal", loc);
                self.indent();
                self.string("value: null,\n");
                self.end_node();
            }
            Expression::Boolean(lit) => {
                self.start_node("Literal", &lit.loc);
                self.property("value", lit.value, Printer::print_bool);
                self.end_node();
            }
            Expression::Number(lit) => {
                self.start_node("Literal", &lit.loc);
                self.property("value", lit.value, Printer::print_f64);
                self.end_node();
            }
            Expression::String(lit) => {
                self.start_node("Literal", &lit.loc);
                self.property("value", &lit.value, Printer::print_string);
                self.end_node();
            }
            Expression::BigInt(lit) => {
                self.start_node("Literal", &lit.loc);
                self.indent();
                self.string(&format!("bigint: \"{}\",\n", lit.value));
                self.end_node();
            }
            Expression::Regexp(lit) => {
                self.start_node("Literal", &lit.loc);
                self.indent();
                self.string(&format!(
                    "regex: {{ pattern: \"{}\", flags: \"{}\" }},\n",
                    lit.pattern, lit.flags
                ));
                self.end_node();
            }
            Expression::Unary(expr) => self.print_unary_expression(expr),
            Expression::Binary(expr) => self.print_binary_expression(expr),
            Expression::Logical(expr) => self.print_logical_expression(expr),
            Expression::Assign(expr) => self.print_assignment_expression(expr),
            Expression::Update(expr) => self.print_update_expression(expr),
            Expression::Member(expr) => self.print_member_expression(expr),
            Expression::Conditional(expr) => self.print_conditional_expression(expr),
            Expression::Call(expr) => self.print_call_expression(expr),
            Expression::New(expr) => self.print_new_expression(expr),
            Expression::Sequence(expr) => self.print_sequence_expression(expr),
            Expression::Array(expr) => self.print_array_expression(expr),
            Expression::Object(expr) => self.print_object_expression(expr),
            Expression::Function(func) => self.print_function(func, "FunctionExpression"),
            Expression::ArrowFunction(func) => {
                self.print_function(func, "ArrowFunctionExpression")
            }
            Expression::Class(class) => self.print_class(class, "ClassExpression"),
            Expression::This(loc) => {
                self.start_node("ThisExpression", loc);
                self.end_node();
            }
            Expression::Await(expr) => {
                self.start_node("AwaitExpression", &expr.loc);
                self.property("argument", expr.argument.as_ref(), Printer::print_expression);
                self.end_node();
            }
            Expression::Yield(expr) => {
                self.start_node("YieldExpression", &expr.loc);
                self.property("delegate", expr.is_delegate, Printer::print_bool);
                self.optional_property("argument", &expr.argument, |p, expr| {
                    p.print_expression(expr)
                });
                self.end_node();
            }
            Expression::SuperMember(expr) => self.print_super_member_expression(expr),
            Expression::SuperCall(expr) => self.print_super_call_expression(expr),
            Expression::Template(template) => self.print_template_literal(template),
            Expression::TaggedTemplate(expr) => {
                self.start_node("TaggedTemplateExpression", &expr.loc);
                self.property("tag", expr.tag.as_ref(), Printer::print_expression);
                self.property("quasi", expr.quasi.as_ref(), Printer::print_template_literal);
                self.end_node();
            }
            Expression::Chain(expr) => {
                self.start_node("ChainExpression", &expr.loc);
                self.property("expression", expr.expression.as_ref(), Printer::print_expression);
                self.end_node();
            }
            Expression::MetaProperty(expr) => {
                self.start_node("MetaProperty", &expr.loc);
                let (meta, property) = match expr.kind {
                    MetaPropertyKind::NewTarget => ("new", "target"),
                    MetaPropertyKind::ImportMeta => ("import", "meta"),
                };
                self.property("meta", meta, Printer::print_str);
                self.property("property", property, Printer::print_str);
                self.end_node();
            }
            Expression::Import(expr) => {
                self.start_node("ImportExpression", &expr.loc);
                self.property("source", expr.source.as_ref(), Printer::print_expression);
                self.optional_property("options", &expr.options, |p, expr| {
                    p.print_expression(expr)
                });
                self.end_node();
            }
            Expression::Paren(expr) => {
                self.start_node("ParenthesizedExpression", &expr.loc);
                self.property("expression", expr.expression.as_ref(), Printer::print_expression);
                self.end_node();
            }
        }
    }

    fn print_identifier(&mut self, id: &Identifier) {
        self.start_node("Identifier", &id.loc);
        self.property("name", &id.name, Printer::print_string);
        self.end_node();
    }

    fn print_unary_expression(&mut self, expr: &UnaryExpression) {
        self.start_node("UnaryExpression", &expr.loc);

        let operator = match expr.operator {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::TypeOf => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        };
        self.property("operator", operator, Printer::print_str);
        self.property("argument", expr.argument.as_ref(), Printer::print_expression);

        self.end_node();
    }

    fn print_binary_expression(&mut self, expr: &BinaryExpression) {
        self.start_node("BinaryExpression", &expr.loc);

        let operator = match expr.operator {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Exponent => "**",
            BinaryOperator::EqEq => "==",
            BinaryOperator::EqEqEq => "===",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::NotEqEq => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&",
            BinaryOperator::Or => "|",
            BinaryOperator::Xor => "^",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRightArithmetic => ">>",
            BinaryOperator::ShiftRightLogical => ">>>",
            BinaryOperator::In | BinaryOperator::InPrivate => "in",
            BinaryOperator::InstanceOf => "instanceof",
        };
        self.property("operator", operator, Printer::print_str);

        self.indent();
        self.string("left: ");
        if expr.operator == BinaryOperator::InPrivate {
            let id = expr.left.to_id();
            self.start_node("PrivateIdentifier", &id.loc);
            self.property("name", &id.name, Printer::print_string);
            self.end_node();
        } else {
            self.print_expression(&expr.left);
        }
        self.string(",\n");

        self.property("right", expr.right.as_ref(), Printer::print_expression);

        self.end_node();
    }

    fn print_logical_expression(&mut self, expr: &LogicalExpression) {
        self.start_node("LogicalExpression", &expr.loc);

        let operator = match expr.operator {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
            LogicalOperator::NullishCoalesce => "??",
        };
        self.property("operator", operator, Printer::print_str);
        self.property("left", expr.left.as_ref(), Printer::print_expression);
        self.property("right", expr.right.as_ref(), Printer::print_expression);

        self.end_node();
    }

    fn print_assignment_expression(&mut self, expr: &AssignmentExpression) {
        self.start_node("AssignmentExpression", &expr.loc);

        let operator = match expr.operator {
            AssignmentOperator::Equals => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Subtract => "-=",
            AssignmentOperator::Multiply => "*=",
            AssignmentOperator::Divide => "/=",
            AssignmentOperator::Remainder => "%=",
            AssignmentOperator::Exponent => "**=",
            AssignmentOperator::And => "&=",
            AssignmentOperator::Or => "|=",
            AssignmentOperator::Xor => "^=",
            AssignmentOperator::ShiftLeft => "<<=",
            AssignmentOperator::ShiftRightArithmetic => ">>=",
            AssignmentOperator::ShiftRightLogical => ">>>=",
            AssignmentOperator::LogicalAnd => "&&=",
            AssignmentOperator::LogicalOr => "||=",
            AssignmentOperator::NullishCoalesce => "??=",
        };
        self.property("operator", operator, Printer::print_str);
        self.property("left", expr.left.as_ref(), Printer::print_pattern);
        self.property("right", expr.right.as_ref(), Printer::print_expression);

        self.end_node();
    }

    fn print_update_expression(&mut self, expr: &UpdateExpression) {
        self.start_node("UpdateExpression", &expr.loc);

        let operator = match expr.operator {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        };
        self.property("operator", operator, Printer::print_str);
        self.property("prefix", expr.is_prefix, Printer::print_bool);
        self.property("argument", expr.argument.as_ref(), Printer::print_expression);

        self.end_node();
    }

    fn print_member_expression(&mut self, expr: &MemberExpression) {
        self.start_node("MemberExpression", &expr.loc);

        self.property("computed", expr.is_computed, Printer::print_bool);
        self.property("optional", expr.is_optional, Printer::print_bool);
        self.property("object", expr.object.as_ref(), Printer::print_expression);
        self.print_property_key(&expr.property, expr.is_private);

        self.end_node();
    }

    fn print_conditional_expression(&mut self, expr: &ConditionalExpression) {
        self.start_node("ConditionalExpression", &expr.loc);
        self.property("test", expr.test.as_ref(), Printer::print_expression);
        self.property("consequent", expr.conseq.as_ref(), Printer::print_expression);
        self.property("alternate", expr.altern.as_ref(), Printer::print_expression);
        self.end_node();
    }

    fn print_call_expression(&mut self, expr: &CallExpression) {
        self.start_node("CallExpression", &expr.loc);
        self.property("optional", expr.is_optional, Printer::print_bool);
        self.property("callee", expr.callee.as_ref(), Printer::print_expression);
        self.array_property("arguments", &expr.arguments, Printer::print_call_argument);
        self.end_node();
    }

    fn print_call_argument(&mut self, argument: &CallArgument) {
        match argument {
            CallArgument::Expression(expr) => self.print_expression(expr),
            CallArgument::Spread(spread) => self.print_spread_element(spread),
        }
    }

    fn print_new_expression(&mut self, expr: &NewExpression) {
        self.start_node("NewExpression", &expr.loc);
        self.property("callee", expr.callee.as_ref(), Printer::print_expression);
        self.array_property("arguments", &expr.arguments, Printer::print_call_argument);
        self.end_node();
    }

    fn print_sequence_expression(&mut self, expr: &SequenceExpression) {
        self.start_node("SequenceExpression", &expr.loc);
        self.array_property("expressions", &expr.expressions, Printer::print_expression);
        self.end_node();
    }

    fn print_array_expression(&mut self, expr: &ArrayExpression) {
        self.start_node("ArrayExpression", &expr.loc);

        self.indent();
        self.string("elements: ");
        if expr.elements.is_empty() {
            self.string("[],\n");
        } else {
            self.string("[\n");
            self.inc_indent();

            for element in &expr.elements {
                self.indent();
                match element {
                    ArrayElement::Expression(expr) => self.print_expression(expr),
                    ArrayElement::Spread(spread) => self.print_spread_element(spread),
                    ArrayElement::Hole => self.print_null(),
                }
                self.string(",\n");
            }

            self.dec_indent();
            self.indent();
            self.string("],\n");
        }

        self.end_node();
    }

    fn print_spread_element(&mut self, spread: &SpreadElement) {
        self.start_node("SpreadElement", &spread.loc);
        self.property("argument", spread.argument.as_ref(), Printer::print_expression);
        self.end_node();
    }

    fn print_object_expression(&mut self, expr: &ObjectExpression) {
        self.start_node("ObjectExpression", &expr.loc);
        self.array_property("properties", &expr.properties, Printer::print_property);
        self.end_node();
    }

    fn print_property(&mut self, property: &Property) {
        if property.kind == PropertyKind::Spread {
            // Spread properties store their argument in the key
            self.start_node("SpreadElement", &property.loc);
            self.property("argument", property.key.as_ref(), Printer::print_expression);
            self.end_node();
            return;
        }

        self.start_node("Property", &property.loc);

        let kind = match property.kind {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
            PropertyKind::Spread => unreachable!(),
        };
        self.property("kind", kind, Printer::print_str);
        self.property("computed", property.is_computed, Printer::print_bool);
        self.property("method", property.is_method, Printer::print_bool);
        self.property("shorthand", property.is_shorthand, Printer::print_bool);
        self.print_property_key(&property.key, false);
        self.optional_property("value", &property.value, |p, expr| p.print_expression(expr));

        self.end_node();
    }

    fn print_super_member_expression(&mut self, expr: &SuperMemberExpression) {
        self.start_node("MemberExpression", &expr.loc);

        self.property("computed", expr.is_computed, Printer::print_bool);

        self.indent();
        self.string("object: ");
        self.start_node("Super", &expr.super_);
        self.end_node();
        self.string(",\n");

        self.property("property", expr.property.as_ref(), Printer::print_expression);

        self.end_node();
    }

    fn print_super_call_expression(&mut self, expr: &SuperCallExpression) {
        self.start_node("CallExpression", &expr.loc);

        self.indent();
        self.string("callee: ");
        self.start_node("Super", &expr.super_);
        self.end_node();
        self.string(",\n");

        self.array_property("arguments", &expr.arguments, Printer::print_call_argument);

        self.end_node();
    }

    fn print_template_literal(&mut self, template: &TemplateLiteral) {
        self.start_node("TemplateLiteral", &template.loc);
        self.array_property("quasis", &template.quasis, Printer::print_template_element);
        self.array_property("expressions", &template.expressions, Printer::print_expression);
        self.end_node();
    }

    fn print_template_element(&mut self, element: &TemplateElement) {
        self.start_node("TemplateElement", &element.loc);
        self.property("tail", element.is_tail, Printer::print_bool);
        self.property("raw", &element.raw, Printer::print_string);
        self.optional_property("cooked", &element.cooked, |p, cooked| p.print_string(cooked));
        self.end_node();
    }

    fn print_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Id(id) => self.print_identifier(id),
            Pattern::Array(array) => self.print_array_pattern(array),
            Pattern::Object(object) => self.print_object_pattern(object),
            Pattern::Assign(assign) => self.print_assignment_pattern(assign),
            Pattern::Member(member) => self.print_member_expression(member),
            Pattern::SuperMember(member) => self.print_super_member_expression(member),
        }
    }

    fn print_array_pattern(&mut self, pattern: &ArrayPattern) {
        self.start_node("ArrayPattern", &pattern.loc);

        self.indent();
        self.string("elements: ");
        if pattern.elements.is_empty() {
            self.string("[],\n");
        } else {
            self.string("[\n");
            self.inc_indent();

            for element in &pattern.elements {
                self.indent();
                match element {
                    ArrayPatternElement::Pattern(pattern) => self.print_pattern(pattern),
                    ArrayPatternElement::Rest(rest) => self.print_rest_element(rest),
                    ArrayPatternElement::Hole => self.print_null(),
                }
                self.string(",\n");
            }

            self.dec_indent();
            self.indent();
            self.string("],\n");
        }

        self.end_node();
    }

    fn print_rest_element(&mut self, rest: &RestElement) {
        self.start_node("RestElement", &rest.loc);
        self.property("argument", rest.argument.as_ref(), Printer::print_pattern);
        self.end_node();
    }

    fn print_object_pattern(&mut self, pattern: &ObjectPattern) {
        self.start_node("ObjectPattern", &pattern.loc);
        self.array_property(
            "properties",
            &pattern.properties,
            Printer::print_object_pattern_property,
        );
        self.end_node();
    }

    fn print_object_pattern_property(&mut self, property: &ObjectPatternProperty) {
        if property.is_rest {
            self.start_node("RestElement", &property.loc);
            self.property("argument", property.value.as_ref(), Printer::print_pattern);
            self.end_node();
            return;
        }

        self.start_node("Property", &property.loc);

        self.property("computed", property.is_computed, Printer::print_bool);
        self.property("shorthand", property.key.is_none(), Printer::print_bool);
        self.optional_property("key", &property.key, |p, key| p.print_expression(key));
        self.property("value", property.value.as_ref(), Printer::print_pattern);

        self.end_node();
    }

    fn print_assignment_pattern(&mut self, pattern: &AssignmentPattern) {
        self.start_node("AssignmentPattern", &pattern.loc);
        self.property("left", pattern.left.as_ref(), Printer::print_pattern);
        self.property("right", pattern.right.as_ref(), Printer::print_expression);
        self.end_node();
    }

    fn print_import_declaration(&mut self, import: &ImportDeclaration) {
        self.start_node("ImportDeclaration", &import.loc);

        self.array_property("specifiers", &import.specifiers, Printer::print_import_specifier);
        self.print_string_literal_property("source", &import.source);
        self.array_property("attributes", &import.attributes, Printer::print_import_attribute);

        self.end_node();
    }

    fn print_import_specifier(&mut self, specifier: &ImportSpecifier) {
        match specifier {
            ImportSpecifier::Default(spec) => {
                self.start_node("ImportDefaultSpecifier", &spec.loc);
                self.property("local", spec.local.as_ref(), Printer::print_identifier);
                self.end_node();
            }
            ImportSpecifier::Namespace(spec) => {
                self.start_node("ImportNamespaceSpecifier", &spec.loc);
                self.property("local", spec.local.as_ref(), Printer::print_identifier);
                self.end_node();
            }
            ImportSpecifier::Named(spec) => {
                self.start_node("ImportSpecifier", &spec.loc);

                self.indent();
                self.string("imported: ");
                self.print_module_export_name(spec.imported.as_ref());
                self.string(",\n");

                self.indent();
                self.string("local: ");
                match &spec.local {
                    Some(local) => self.print_identifier(local),
                    None => self.print_module_export_name(spec.imported.as_ref()),
                }
                self.string(",\n");

                self.end_node();
            }
        }
    }

    fn print_module_export_name(&mut self, name: &ModuleExportName) {
        match name {
            ModuleExportName::Id(id) => self.print_identifier(id),
            ModuleExportName::String(lit) => {
                self.start_node("Literal", &lit.loc);
                self.property("value", &lit.value, Printer::print_string);
                self.end_node();
            }
        }
    }

    fn print_string_literal_property(&mut self, name: &str, lit: &StringLiteral) {
        self.indent();
        self.string(name);
        self.string(": ");
        self.start_node("Literal", &lit.loc);
        self.property("value", &lit.value, Printer::print_string);
        self.end_node();
        self.string(",\n");
    }

    fn print_import_attribute(&mut self, attribute: &ImportAttribute) {
        self.start_node("ImportAttribute", &attribute.loc);
        self.property("key", attribute.key.as_ref(), Printer::print_expression);
        self.print_string_literal_property("value", &attribute.value);
        self.end_node();
    }

    fn print_export_named_declaration(&mut self, export: &ExportNamedDeclaration) {
        self.start_node("ExportNamedDeclaration", &export.loc);

        self.optional_property("declaration", &export.declaration, |p, stmt| {
            p.print_statement(stmt)
        });
        self.array_property("specifiers", &export.specifiers, Printer::print_export_specifier);

        self.indent();
        self.string("source: ");
        match &export.source {
            Some(source) => {
                self.start_node("Literal", &source.loc);
                self.property("value", &source.value, Printer::print_string);
                self.end_node();
            }
            None => self.print_null(),
        }
        self.string(",\n");

        self.end_node();
    }

    fn print_export_specifier(&mut self, specifier: &ExportSpecifier) {
        self.start_node("ExportSpecifier", &specifier.loc);

        self.indent();
        self.string("local: ");
        self.print_module_export_name(specifier.local.as_ref());
        self.string(",\n");

        self.indent();
        self.string("exported: ");
        match &specifier.exported {
            Some(exported) => self.print_module_export_name(exported),
            None => self.print_module_export_name(specifier.local.as_ref()),
        }
        self.string(",\n");

        self.end_node();
    }

    fn print_export_default_declaration(&mut self, export: &ExportDefaultDeclaration) {
        self.start_node("ExportDefaultDeclaration", &export.loc);

        self.indent();
        self.string("declaration: ");
        match &export.declaration {
            ExportDefaultKind::Function(func) => {
                self.print_function(func, "FunctionDeclaration")
            }
            ExportDefaultKind::Class(class) => self.print_class(class, "ClassDeclaration"),
            ExportDefaultKind::Expression(expr) => self.print_expression(expr),
        }
        self.string(",\n");

        self.end_node();
    }

    fn print_export_all_declaration(&mut self, export: &ExportAllDeclaration) {
        self.start_node("ExportAllDeclaration", &export.loc);

        self.indent();
        self.string("exported: ");
        match &export.exported {
            Some(exported) => self.print_module_export_name(exported),
            None => self.print_null(),
        }
        self.string(",\n");

        self.print_string_literal_property("source", &export.source);

        self.end_node();
    }
}

pub fn print_program(program: &Program, source: &Source) -> String {
    let mut printer = Printer::new(source);
    printer.print_program(program);
    printer.finish()
}

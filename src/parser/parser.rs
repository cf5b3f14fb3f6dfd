use std::collections::HashSet;
use std::rc::Rc;

use bitflags::bitflags;
use indexmap::IndexMap;

use crate::common::options::{AllowReserved, Options, SourceType};

use super::ast::*;
use super::keywords::{classify_reserved_word, is_future_reserved_any_version, ReservedWordCategory};
use super::lexer::{Lexer, SavedLexerState};
use super::loc::{Loc, Pos, EMPTY_LOC};
use super::parse_error::{
    InvalidDuplicateParametersReason, LocalizedParseError, ParseError, ParseResult,
};
use super::scope::{BindingKind, SavedScopeTreeState, ScopeNodeKind, ScopeTree};
use super::source::Source;
use super::token::Token;

// Arbitrary error used to fail try parse
const FAIL_TRY_PARSED_ERROR: ParseError = ParseError::MalformedNumericLiteral;

/// Expression operator precedence. A lower number binds tighter than a larger
/// number.
#[derive(Clone, Copy)]
enum Precedence {
    PostfixUpdate = 0,
    Unary = 1, // Includes prefix update
    Exponentiation = 2,
    Multiplication = 3,
    Addition = 4,
    Shift = 5,
    Relational = 6, // Includes in and instanceof
    Equality = 7,
    BitwiseAnd = 8,
    BitwiseXor = 9,
    BitwiseOr = 10,
    LogicalAnd = 11,
    LogicalOr = 12, // Includes nullish coalescing
    Conditional = 13,
}

impl Precedence {
    fn is_weaker_than(self, other: Precedence) -> bool {
        (self as i32) > (other as i32)
    }
}

bitflags! {
    /// Flags tracking the current parsing context, reset or rebuilt at
    /// function boundaries.
    #[derive(Clone, Copy, PartialEq, Eq)]
    struct ParseContext: u16 {
        /// Inside any function body, so return statements are allowed
        const IN_FUNCTION = 1 << 0;
        /// Await expressions are allowed
        const ALLOW_AWAIT = 1 << 1;
        /// Yield expressions are allowed
        const ALLOW_YIELD = 1 << 2;
        /// Inside an iteration statement body
        const IN_ITERATION = 1 << 3;
        /// Inside a switch statement body
        const IN_SWITCH = 1 << 4;
        /// new.target is allowed. Set in functions and methods, inherited by
        /// arrow functions.
        const ALLOW_NEW_TARGET = 1 << 5;
        /// Super property accesses are allowed
        const ALLOW_SUPER_PROPERTY = 1 << 6;
        /// Super calls are allowed
        const ALLOW_SUPER_CALL = 1 << 7;
        /// Inside a function parameter list
        const IN_PARAMETERS = 1 << 8;
        /// Inside the init clause of a for statement head, where the in
        /// operator is not allowed
        const IN_FOR_INIT = 1 << 9;
        /// Inside a class field initializer or static block, where await is
        /// reserved but may not start an await expression
        const IN_CLASS_INITIALIZER = 1 << 10;
    }
}

/// Deferred errors for positions that are errors in only one interpretation
/// of a cover grammar. Recorded while parsing the cover, resolved when the
/// covering expression is finalized as an expression or reinterpreted as a
/// pattern.
#[derive(Clone, Copy, Default)]
struct CoverGrammarState {
    /// Loc of a duplicate __proto__ property in an object literal, an error
    /// unless the literal is reinterpreted as a pattern
    proto_loc: Option<Loc>,
    /// Loc of a shorthand property initializer, an error unless the object
    /// literal is reinterpreted as a pattern
    shorthand_init_loc: Option<Loc>,
    /// Loc of a comma following a spread element in an array literal, an
    /// error only if the literal is reinterpreted as a pattern
    rest_trailing_comma_loc: Option<Loc>,
}

/// The context in which an expression is being reinterpreted as a pattern.
#[derive(Clone, Copy, PartialEq)]
enum PatternContext {
    Assignment,
    ForLeftHandSide,
}

#[derive(Clone)]
struct LabelEntry {
    name: String,
    is_iteration: bool,
    /// The start position of the labeled statement this label is attached
    /// to, used to resolve the kind of label chains.
    statement_start: Pos,
}

/// How a private name is used within a class body. Getters and setters with
/// the same placement may share a name, all other duplicates are errors.
struct PrivateNameUsage {
    /// Set if declared as a getter, recording whether the getter is static
    getter_is_static: Option<bool>,
    /// Set if declared as a setter, recording whether the setter is static
    setter_is_static: Option<bool>,
    /// Whether the name is declared as a field or method
    is_other: bool,
}

enum PrivateNameKind {
    Getter,
    Setter,
    Other,
}

struct PrivateNameScope {
    defined: IndexMap<String, PrivateNameUsage>,
    used: Vec<(String, Loc)>,
}

#[derive(Clone, Copy, PartialEq)]
enum PropertyContext {
    Class,
    Object,
    Pattern,
}

struct PropertyNameResult {
    key: P<Expression>,
    is_computed: bool,
    is_shorthand: bool,
    is_private: bool,
}

fn p<T>(node: T) -> P<T> {
    Box::new(node)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    loc: Loc,
    prev_loc: Loc,
    // Whether the parser is currently parsing in strict mode
    in_strict_mode: bool,
    context: ParseContext,
    program_kind: ProgramKind,
    options: &'a Options,
    scope_tree: ScopeTree,
    labels: Vec<LabelEntry>,
    private_names: Vec<PrivateNameScope>,
    /// Whether each enclosing class has a superclass, innermost last
    class_extends: Vec<bool>,
    /// All exported names seen so far in a module
    export_names: HashSet<String>,
    /// Exported local names that must resolve to module scope bindings
    exported_local_names: Vec<(String, Loc)>,
    cover: CoverGrammarState,
    /// Errors collected in tolerant mode
    errors: Vec<LocalizedParseError>,
}

/// A save point for the parser, can be used to restore the parser to a
/// particular position.
struct ParserSaveState {
    saved_lexer_state: SavedLexerState,
    saved_scope_state: SavedScopeTreeState,
    token: Token,
    loc: Loc,
    prev_loc: Loc,
    in_strict_mode: bool,
    context: ParseContext,
    labels: Vec<LabelEntry>,
    num_private_name_scopes: usize,
    cover: CoverGrammarState,
    num_errors: usize,
}

impl<'a> Parser<'a> {
    // Must prime parser by calling advance before using.
    fn new(lexer: Lexer<'a>, program_kind: ProgramKind, options: &'a Options) -> Parser<'a> {
        let toplevel_scope_kind = match program_kind {
            ProgramKind::Script => ScopeNodeKind::Global,
            ProgramKind::Module => ScopeNodeKind::Module,
        };

        Parser {
            lexer,
            token: Token::Eof,
            loc: EMPTY_LOC,
            prev_loc: EMPTY_LOC,
            in_strict_mode: false,
            context: ParseContext::empty(),
            program_kind,
            options,
            scope_tree: ScopeTree::new(toplevel_scope_kind),
            labels: vec![],
            private_names: vec![],
            class_extends: vec![],
            export_names: HashSet::new(),
            exported_local_names: vec![],
            cover: CoverGrammarState::default(),
            errors: vec![],
        }
    }

    fn error<T>(&self, loc: Loc, error: ParseError) -> ParseResult<T> {
        let source = (*self.lexer.source).clone();
        Err(LocalizedParseError { error, source_loc: Some((loc, source)) })
    }

    fn localized_error(&self, loc: Loc, error: ParseError) -> LocalizedParseError {
        let source = (*self.lexer.source).clone();
        LocalizedParseError { error, source_loc: Some((loc, source)) }
    }

    fn save(&self) -> ParserSaveState {
        ParserSaveState {
            saved_lexer_state: self.lexer.save(),
            saved_scope_state: self.scope_tree.save(),
            token: self.token.clone(),
            loc: self.loc,
            prev_loc: self.prev_loc,
            in_strict_mode: self.in_strict_mode,
            context: self.context,
            labels: self.labels.clone(),
            num_private_name_scopes: self.private_names.len(),
            cover: self.cover,
            num_errors: self.errors.len(),
        }
    }

    fn restore(&mut self, save_state: ParserSaveState) {
        self.lexer.restore(&save_state.saved_lexer_state);
        self.scope_tree.restore(&save_state.saved_scope_state);
        self.token = save_state.token;
        self.loc = save_state.loc;
        self.prev_loc = save_state.prev_loc;
        self.set_strict_mode(save_state.in_strict_mode);
        self.context = save_state.context;
        self.labels = save_state.labels;
        self.private_names.truncate(save_state.num_private_name_scopes);
        self.cover = save_state.cover;
        self.errors.truncate(save_state.num_errors);
    }

    /// Try parsing, restoring to the state before this function was called if
    /// an error occurs.
    fn try_parse<T>(&mut self, try_fn: fn(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let save_state = self.save();
        let result = try_fn(self);
        if result.is_err() {
            self.restore(save_state);
        }
        result
    }

    /// Enter or exit strict mode, keeping the lexer in sync.
    fn set_strict_mode(&mut self, in_strict_mode: bool) {
        self.in_strict_mode = in_strict_mode;
        self.lexer.in_strict_mode = in_strict_mode;
    }

    fn advance(&mut self) -> ParseResult<()> {
        let (token, loc) = self.lexer.next()?;
        self.prev_loc = self.loc;
        self.token = token;
        self.loc = loc;

        Ok(())
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.token != token {
            return self.error(self.loc, ParseError::ExpectedToken(self.token.clone(), token));
        }

        self.advance()?;
        Ok(())
    }

    fn error_unexpected_token<T>(&self, loc: Loc, token: &Token) -> ParseResult<T> {
        self.error(loc, ParseError::UnexpectedToken(token.clone()))
    }

    fn error_expected_token<T>(
        &self,
        loc: Loc,
        actual: &Token,
        expected: &Token,
    ) -> ParseResult<T> {
        self.error(loc, ParseError::ExpectedToken(actual.clone(), expected.clone()))
    }

    #[inline]
    fn current_start_pos(&self) -> Pos {
        self.loc.start
    }

    fn mark_loc(&self, start_pos: Pos) -> Loc {
        Loc { start: start_pos, end: self.prev_loc.end }
    }

    fn source_text(&self, loc: Loc) -> &str {
        &self.lexer.source.contents[loc.to_range()]
    }

    // Expect a semicolon, or insert one via automatic semicolon insertion if
    // possible. Error if a semicolon was not present and one could not be
    // inserted.
    fn expect_semicolon(&mut self) -> ParseResult<()> {
        match &self.token {
            Token::Semicolon => {
                self.advance()?;
                Ok(())
            }
            Token::RightBrace | Token::Eof => Ok(()),
            other => {
                if self.lexer.is_new_line_before_current() {
                    Ok(())
                } else {
                    self.error(self.loc, ParseError::ExpectedToken(other.clone(), Token::Semicolon))
                }
            }
        }
    }

    // Consume a semicolon if present and return true, otherwise return
    // whether a semicolon could be inserted via automatic semicolon
    // insertion.
    fn maybe_expect_semicolon(&mut self) -> ParseResult<bool> {
        match &self.token {
            Token::Semicolon => {
                self.advance()?;
                Ok(true)
            }
            Token::RightBrace | Token::Eof => Ok(true),
            _ => Ok(self.lexer.is_new_line_before_current()),
        }
    }

    fn allow_await(&self) -> bool {
        self.context.contains(ParseContext::ALLOW_AWAIT)
    }

    fn allow_yield(&self) -> bool {
        self.context.contains(ParseContext::ALLOW_YIELD)
    }

    /// Whether await is reserved as an identifier in the current context.
    fn is_await_reserved(&self) -> bool {
        self.program_kind == ProgramKind::Module
            || self.allow_await()
            || self.context.contains(ParseContext::IN_CLASS_INITIALIZER)
    }

    /// Run a parse function with the in operator allowed, restoring the for
    /// init context afterwards. Used when entering a parenthesized or
    /// bracketed subexpression of a for init.
    fn with_in_allowed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let had_for_init = self.context.contains(ParseContext::IN_FOR_INIT);
        self.context.remove(ParseContext::IN_FOR_INIT);

        let result = f(self);

        if had_for_init {
            self.context.insert(ParseContext::IN_FOR_INIT);
        }

        result
    }

    /// Raise any deferred cover grammar errors, called when a covering
    /// expression is finalized as an expression.
    fn check_cover_errors(&mut self) -> ParseResult<()> {
        if let Some(loc) = self.cover.shorthand_init_loc {
            return self.error(loc, ParseError::InvalidPatternInitializer);
        }

        if let Some(loc) = self.cover.proto_loc {
            return self.error(loc, ParseError::DuplicateProtoProperty);
        }

        // A trailing comma after a spread element is valid in expressions
        self.cover.rest_trailing_comma_loc = None;

        Ok(())
    }

    /// Discard deferred cover errors recorded within the given loc, called
    /// when the covering expression is reinterpreted as a pattern.
    fn clear_cover_errors_within(&mut self, loc: Loc) {
        if let Some(proto_loc) = self.cover.proto_loc {
            if loc.contains(proto_loc) {
                self.cover.proto_loc = None;
            }
        }

        if let Some(init_loc) = self.cover.shorthand_init_loc {
            if loc.contains(init_loc) {
                self.cover.shorthand_init_loc = None;
            }
        }
    }

    /// Record a use of a private name, erroring if used outside any class.
    fn record_private_name_use(&mut self, name: &str, loc: Loc) -> ParseResult<()> {
        if self.private_names.is_empty() {
            return self.error(loc, ParseError::PrivateNameOutsideClass);
        }

        let scope = self.private_names.last_mut().unwrap();
        scope.used.push((name.to_owned(), loc));

        Ok(())
    }

    /// Declare a private name in the innermost class, enforcing uniqueness
    /// with separate getter and setter namespaces.
    fn declare_private_name(
        &mut self,
        name: &str,
        kind: PrivateNameKind,
        is_static: bool,
        loc: Loc,
    ) -> ParseResult<()> {
        if name == "constructor" {
            return self.error(loc, ParseError::PrivateNameConstructor);
        }

        let scope = self.private_names.last_mut().unwrap();

        let usage = scope.defined.entry(name.to_owned()).or_insert(PrivateNameUsage {
            getter_is_static: None,
            setter_is_static: None,
            is_other: false,
        });

        let is_duplicate = match kind {
            PrivateNameKind::Getter => {
                let conflicts = usage.is_other
                    || usage.getter_is_static.is_some()
                    || matches!(usage.setter_is_static, Some(setter_static) if setter_static != is_static);
                usage.getter_is_static = Some(is_static);
                conflicts
            }
            PrivateNameKind::Setter => {
                let conflicts = usage.is_other
                    || usage.setter_is_static.is_some()
                    || matches!(usage.getter_is_static, Some(getter_static) if getter_static != is_static);
                usage.setter_is_static = Some(is_static);
                conflicts
            }
            PrivateNameKind::Other => {
                let conflicts = usage.is_other
                    || usage.getter_is_static.is_some()
                    || usage.setter_is_static.is_some();
                usage.is_other = true;
                conflicts
            }
        };

        if is_duplicate {
            return self.error(loc, ParseError::DuplicatePrivateName(name.to_owned()));
        }

        Ok(())
    }

    /// Pop the innermost class private name scope, resolving recorded uses.
    /// Unresolved uses propagate to the enclosing class, or are errors at the
    /// outermost class when private field checking is enabled.
    fn pop_private_name_scope(&mut self) -> ParseResult<()> {
        let scope = self.private_names.pop().unwrap();

        for (name, loc) in scope.used {
            if scope.defined.contains_key(&name) {
                continue;
            }

            if let Some(outer_scope) = self.private_names.last_mut() {
                outer_scope.used.push((name, loc));
            } else if self.options.check_private_fields {
                return self.error(loc, ParseError::PrivateNameNotDefined(name));
            }
        }

        Ok(())
    }

    /// Declare every name bound by a pattern in the current scope.
    fn declare_pattern_bindings(&mut self, pattern: &Pattern, kind: &BindingKind) -> ParseResult<()> {
        let mut bound_names = vec![];
        pattern.iter_bound_names(&mut |id| bound_names.push((id.name.clone(), id.loc)));

        for (name, loc) in bound_names {
            if let Err(error) = self.scope_tree.add_binding(&name, kind.clone()) {
                return self.error(loc, error);
            }
        }

        Ok(())
    }
}

/// Program and statement parsing.
impl<'a> Parser<'a> {
    fn parse_program(&mut self) -> ParseResult<Program> {
        if self.program_kind == ProgramKind::Module {
            self.set_strict_mode(true);

            if self.options.ecma_version.has_top_level_await() {
                self.context.insert(ParseContext::ALLOW_AWAIT);
            }
        } else if self.options.allow_await_outside_function {
            self.context.insert(ParseContext::ALLOW_AWAIT);
        }

        let mut body = vec![];
        let has_use_strict_directive = self.parse_directive_prologue(&mut body)?;

        while self.token != Token::Eof {
            let before_pos = self.loc.start;
            let save_state = if self.options.tolerant {
                Some(self.save())
            } else {
                None
            };

            match self.parse_toplevel() {
                Ok(stmt) => body.push(stmt),
                Err(error) if self.options.tolerant => {
                    // Rewind to the start of the failed statement, record the
                    // error, then skip ahead to a statement boundary.
                    self.restore(save_state.unwrap());
                    self.errors.push(error);
                    self.synchronize();

                    // Bail if no progress can be made past the error
                    if self.loc.start == before_pos
                        && (self.advance().is_err() || self.loc.start == before_pos)
                    {
                        break;
                    }
                }
                Err(error) => return Err(error),
            }
        }

        if self.program_kind == ProgramKind::Module {
            self.check_exported_names()?;
        }

        // Start out at beginning of file
        let loc = self.mark_loc(0);

        Ok(Program::new(
            loc,
            self.program_kind,
            body,
            has_use_strict_directive,
            self.in_strict_mode,
        ))
    }

    /// Every exported local name must be declared at the module toplevel.
    fn check_exported_names(&mut self) -> ParseResult<()> {
        let names = std::mem::take(&mut self.exported_local_names);
        for (name, loc) in names {
            if !self.scope_tree.has_toplevel_binding(&name) {
                let error = self.localized_error(loc, ParseError::UnresolvedExport(name));
                if self.options.tolerant {
                    self.errors.push(error);
                } else {
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    /// Parse the directive prologue of a program or function body, pushing
    /// the directives onto the body. Returns whether a "use strict" directive
    /// was found, entering strict mode as soon as one is seen.
    fn parse_directive_prologue(&mut self, body: &mut Vec<Statement>) -> ParseResult<bool> {
        let mut has_use_strict_directive = false;

        while let Token::StringLiteral(_) = &self.token {
            let start_pos = self.current_start_pos();
            let string_loc = self.loc;

            let expr = self.parse_expression()?;

            // Only a lone string literal is a directive. Any larger expression
            // ends the prologue.
            let is_directive =
                matches!(expr.as_ref(), Expression::String(lit) if lit.loc == string_loc);

            // A use strict directive must not contain any escape sequences,
            // so compare the raw source text directly. Strict mode applies
            // before the next token is lexed.
            if is_directive {
                let raw = self.source_text(string_loc);
                if raw == "\"use strict\"" || raw == "'use strict'" {
                    has_use_strict_directive = true;
                    self.set_strict_mode(true);
                }
            }

            self.expect_semicolon()?;
            let loc = self.mark_loc(start_pos);
            body.push(Statement::Expr(ExpressionStatement { loc, expr }));

            if !is_directive {
                return Ok(has_use_strict_directive);
            }
        }

        Ok(has_use_strict_directive)
    }

    /// Skip tokens until a statement boundary, used to recover in tolerant
    /// mode. Stops after a semicolon, or before a right brace, EOF, or a
    /// token on a new line that starts a statement.
    fn synchronize(&mut self) {
        self.cover = CoverGrammarState::default();

        loop {
            match &self.token {
                Token::Semicolon => {
                    let _ = self.advance();
                    return;
                }
                Token::RightBrace | Token::Eof => return,
                Token::Var
                | Token::Let
                | Token::Const
                | Token::Function
                | Token::Class
                | Token::If
                | Token::For
                | Token::While
                | Token::Do
                | Token::Switch
                | Token::Try
                | Token::Return
                | Token::Throw
                | Token::Break
                | Token::Continue
                    if self.lexer.is_new_line_before_current() =>
                {
                    return;
                }
                _ => {
                    let before_pos = self.loc.start;
                    if self.advance().is_err() && self.loc.start == before_pos {
                        return;
                    }
                }
            }
        }
    }

    fn parse_toplevel(&mut self) -> ParseResult<Statement> {
        match self.token {
            Token::Import => {
                if self.is_import_expression_start()? {
                    self.parse_statement_list_item()
                } else {
                    self.check_module_syntax_allowed()?;
                    self.parse_import_declaration()
                }
            }
            Token::Export => {
                self.check_module_syntax_allowed()?;
                self.parse_export_declaration()
            }
            _ => self.parse_statement_list_item(),
        }
    }

    /// Whether the current import token starts an import call or import.meta
    /// expression instead of an import declaration.
    fn is_import_expression_start(&mut self) -> ParseResult<bool> {
        let save_state = self.save();
        self.advance()?;
        let is_expression = self.token == Token::LeftParen || self.token == Token::Period;
        self.restore(save_state);

        Ok(is_expression)
    }

    fn check_module_syntax_allowed(&mut self) -> ParseResult<()> {
        if self.program_kind != ProgramKind::Module && !self.options.allow_import_export_everywhere
        {
            return self.error(self.loc, ParseError::ImportExportOutsideModule);
        }

        Ok(())
    }

    fn parse_statement_list_item(&mut self) -> ParseResult<Statement> {
        match self.token {
            Token::Const => {
                return Ok(Statement::VarDecl(self.parse_variable_declaration(false)?));
            }
            Token::Let => {
                if self.is_let_declaration_start()? {
                    return Ok(Statement::VarDecl(self.parse_variable_declaration(false)?));
                }
            }
            Token::Class => return Ok(Statement::ClassDecl(self.parse_class(true, false)?)),
            Token::Import => {
                if !self.is_import_expression_start()? {
                    if self.options.allow_import_export_everywhere {
                        return self.parse_import_declaration();
                    } else if self.program_kind == ProgramKind::Module {
                        return self.error(self.loc, ParseError::ImportExportNotTopLevel);
                    } else {
                        return self.error(self.loc, ParseError::ImportExportOutsideModule);
                    }
                }
            }
            Token::Export => {
                if self.options.allow_import_export_everywhere {
                    return self.parse_export_declaration();
                } else if self.program_kind == ProgramKind::Module {
                    return self.error(self.loc, ParseError::ImportExportNotTopLevel);
                } else {
                    return self.error(self.loc, ParseError::ImportExportOutsideModule);
                }
            }
            _ => {}
        }

        if self.is_function_start()? {
            return Ok(Statement::FuncDecl(self.parse_function_declaration()?));
        }

        self.parse_statement()
    }

    /// Whether a let token begins a lexical declaration rather than an
    /// identifier reference. In strict mode let always begins a declaration.
    fn is_let_declaration_start(&mut self) -> ParseResult<bool> {
        if self.in_strict_mode {
            return Ok(true);
        }

        let save_state = self.save();
        self.advance()?;

        let is_declaration = match &self.token {
            Token::Identifier(_)
            | Token::LeftBracket
            | Token::LeftBrace
            | Token::Async
            | Token::Of
            | Token::From
            | Token::As
            | Token::Get
            | Token::Set
            | Token::Static
            | Token::Let
            | Token::Await
            | Token::Yield => true,
            _ => false,
        };

        self.restore(save_state);

        Ok(is_declaration)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.token {
            Token::Var => Ok(Statement::VarDecl(self.parse_variable_declaration(false)?)),
            Token::LeftBrace => Ok(Statement::Block(self.parse_block()?)),
            Token::If => self.parse_if_statement(),
            Token::Switch => self.parse_switch_statement(),
            Token::For => self.parse_any_for_statement(),
            Token::While => self.parse_while_statement(),
            Token::Do => self.parse_do_while_statement(),
            Token::With => self.parse_with_statement(),
            Token::Try => self.parse_try_statement(),
            Token::Throw => self.parse_throw_statement(),
            Token::Return => self.parse_return_statement(),
            Token::Break => self.parse_break_statement(),
            Token::Continue => self.parse_continue_statement(),
            Token::Semicolon => {
                let loc = self.loc;
                self.advance()?;

                Ok(Statement::Empty(loc))
            }
            Token::Debugger => {
                let start_pos = self.current_start_pos();
                self.advance()?;
                self.expect_semicolon()?;

                Ok(Statement::Debugger(self.mark_loc(start_pos)))
            }
            _ => {
                if self.is_function_start()? || self.token == Token::Class {
                    return self.error_unexpected_token(self.loc, &self.token);
                } else if self.token == Token::Let {
                    // The form `let [` is ambiguous as it could be the start
                    // of a let declaration with an array pattern, or a
                    // computed member access expression statement.
                    let let_loc = self.loc;
                    let save_state = self.save();
                    self.advance()?;
                    if self.token == Token::LeftBracket {
                        return self.error(let_loc, ParseError::AmbiguousLetBracket);
                    }

                    self.restore(save_state);
                }

                let start_pos = self.current_start_pos();
                let expr = self.parse_expression()?;

                // Parse labeled statement
                if self.token == Token::Colon {
                    if let Expression::Id(label) = *expr {
                        return self.parse_labeled_statement(label, start_pos);
                    }
                }

                // Otherwise must be an expression statement
                self.expect_semicolon()?;
                let loc = self.mark_loc(start_pos);

                Ok(Statement::Expr(ExpressionStatement { loc, expr }))
            }
        }
    }

    fn parse_labeled_statement(
        &mut self,
        label: Identifier,
        start_pos: Pos,
    ) -> ParseResult<Statement> {
        if self.labels.iter().any(|entry| entry.name == label.name) {
            return self.error(label.loc, ParseError::DuplicateLabel(label.name));
        }

        // Consume the colon
        self.advance()?;

        let is_iteration =
            matches!(self.token, Token::For | Token::While | Token::Do);

        // A chain of labels all labels the same statement, so resolve the
        // kind of all labels that start at this labeled statement.
        let new_statement_start = self.current_start_pos();
        for entry in self.labels.iter_mut().rev() {
            if entry.statement_start == start_pos {
                entry.statement_start = new_statement_start;
                entry.is_iteration = is_iteration;
            } else {
                break;
            }
        }

        self.labels.push(LabelEntry {
            name: label.name.clone(),
            is_iteration,
            statement_start: self.current_start_pos(),
        });

        // Functions can be labeled items in sloppy mode, though only plain
        // function declarations.
        let body = if self.is_function_start()? {
            if self.in_strict_mode {
                return self.error(self.loc, ParseError::InvalidLabeledFunction(true));
            }

            let func = self.parse_function_declaration()?;
            if func.is_async || func.is_generator {
                return self.error(func.loc, ParseError::InvalidLabeledFunction(false));
            }

            Statement::FuncDecl(func)
        } else {
            self.parse_statement()?
        };

        self.labels.pop();

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Labeled(LabeledStatement { loc, label: p(label), body: p(body) }))
    }

    fn is_function_start(&mut self) -> ParseResult<bool> {
        match self.token {
            Token::Function => Ok(true),
            Token::Async if self.options.ecma_version.has_async_functions() => {
                let save_state = self.save();
                self.advance()?;
                let is_function =
                    self.token == Token::Function && !self.lexer.is_new_line_before_current();
                self.restore(save_state);

                Ok(is_function)
            }
            _ => Ok(false),
        }
    }

    fn parse_variable_declaration(
        &mut self,
        is_for_init: bool,
    ) -> ParseResult<VariableDeclaration> {
        let start_pos = self.current_start_pos();
        let kind = match &self.token {
            Token::Var => VarKind::Var,
            Token::Let => VarKind::Let,
            Token::Const => VarKind::Const,
            _ => unreachable!(),
        };
        self.advance()?;

        let binding_kind = match kind {
            VarKind::Var => BindingKind::Var,
            VarKind::Let => BindingKind::Let,
            VarKind::Const => BindingKind::Const,
        };

        // Gather comma separated declarators
        let mut declarations = vec![];
        loop {
            let start_pos = self.current_start_pos();
            let id = self.parse_pattern()?;

            // Lexical declarations may not bind the name let
            if kind != VarKind::Var {
                let mut let_loc = None;
                id.iter_bound_names(&mut |id| {
                    if id.name == "let" && let_loc.is_none() {
                        let_loc = Some(id.loc);
                    }
                });

                if let Some(let_loc) = let_loc {
                    return self.error(let_loc, ParseError::LetNameInLexicalDeclaration);
                }
            }

            self.declare_pattern_bindings(&id, &binding_kind)?;

            let init = match self.token {
                Token::Equals => {
                    self.advance()?;
                    Some(self.parse_assignment_expression()?)
                }
                _ => None,
            };

            if init.is_none() && !is_for_init {
                // Const declarations and all destructuring declarations
                // require an initializer
                if kind == VarKind::Const {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::ConstWithoutInitializer);
                } else if !matches!(id, Pattern::Id(_)) {
                    return self.error_expected_token(self.loc, &self.token, &Token::Equals);
                }
            }

            let loc = self.mark_loc(start_pos);

            declarations.push(VariableDeclarator { loc, id: p(id), init });

            if self.token == Token::Comma {
                self.advance()?;
            } else {
                break;
            }
        }

        if !is_for_init {
            self.expect_semicolon()?;
        }

        let loc = self.mark_loc(start_pos);

        Ok(VariableDeclaration { loc, kind, declarations })
    }

    fn parse_function_declaration(&mut self) -> ParseResult<Function> {
        self.parse_function(true, false)
    }

    fn parse_function_expression(&mut self) -> ParseResult<Function> {
        self.parse_function(false, false)
    }

    fn parse_function(&mut self, is_decl: bool, id_optional: bool) -> ParseResult<Function> {
        let start_pos = self.current_start_pos();

        // Function can be prefixed by the async contextual keyword
        let is_async = self.token == Token::Async;
        if is_async {
            self.advance()?
        }

        self.expect(Token::Function)?;

        // Function keyword can be suffixed by generator `*`
        let is_generator = self.token == Token::Multiply;
        if is_generator {
            self.advance()?
        }

        // Id is optional only for function expressions and default exports
        let id = if self.token != Token::LeftParen {
            Some(p(self.parse_binding_identifier()?))
        } else if is_decl && !id_optional {
            // Declarations require a name, so force the error
            Some(p(self.parse_binding_identifier()?))
        } else {
            None
        };

        // Declarations bind their name in the enclosing scope. At the top
        // level of a script or function body sloppy mode functions are var
        // scoped, otherwise function declarations are lexical.
        if is_decl {
            if let Some(id) = &id {
                let is_lexical = !self.scope_tree.current_is_hoist_target();
                let is_duplicable = is_lexical
                    && !self.in_strict_mode
                    && self.options.annex_b
                    && !is_async
                    && !is_generator;

                let kind = BindingKind::Function { is_lexical, is_duplicable };
                if let Err(error) = self.scope_tree.add_binding(&id.name, kind) {
                    return self.error(id.loc, error);
                }
            }
        }

        // The entire function, parameters included, is parsed in the
        // function's own context and scope.
        let saved_context = self.context;
        let saved_labels = std::mem::take(&mut self.labels);

        let mut context = ParseContext::IN_FUNCTION | ParseContext::ALLOW_NEW_TARGET;
        if is_async {
            context.insert(ParseContext::ALLOW_AWAIT);
        }
        if is_generator {
            context.insert(ParseContext::ALLOW_YIELD);
        }
        self.context = context;

        self.scope_tree.enter_scope(ScopeNodeKind::Function);

        let params = self.parse_function_params()?;
        let (block, has_use_strict_directive, is_strict_mode) =
            self.parse_function_block_body()?;
        let body = p(FunctionBody::Block(block));

        self.scope_tree.exit_scope();
        self.context = saved_context;
        self.labels = saved_labels;

        let loc = self.mark_loc(start_pos);

        let func = Function::new(
            loc,
            id,
            params,
            body,
            is_async,
            is_generator,
            is_strict_mode,
            has_use_strict_directive,
        );

        self.check_function_params(&func, None)?;

        Ok(func)
    }

    fn parse_function_params(&mut self) -> ParseResult<Vec<FunctionParam>> {
        let saved_in_params = self.context.contains(ParseContext::IN_PARAMETERS);
        self.context.insert(ParseContext::IN_PARAMETERS);

        let result = self.with_in_allowed(Self::parse_function_params_inner);

        if !saved_in_params {
            self.context.remove(ParseContext::IN_PARAMETERS);
        }

        result
    }

    fn parse_function_params_inner(&mut self) -> ParseResult<Vec<FunctionParam>> {
        // Read all function params between the parentheses
        let mut params: Vec<FunctionParam> = vec![];
        self.expect(Token::LeftParen)?;

        while self.token != Token::RightParen {
            if self.token == Token::Spread {
                let rest = self.parse_rest_element()?;
                self.declare_pattern_bindings(
                    &rest.argument,
                    &BindingKind::FunctionParameter,
                )?;
                params.push(FunctionParam::Rest(rest));

                // A rest element must be the last parameter
                if self.token == Token::Comma {
                    return self.error(self.loc, ParseError::RestTrailingComma);
                }

                break;
            }

            let pattern = self.parse_pattern_including_assignment_pattern()?;
            self.declare_pattern_bindings(&pattern, &BindingKind::FunctionParameter)?;
            params.push(FunctionParam::Pattern(pattern));

            if self.token == Token::Comma {
                self.advance()?;
            } else {
                break;
            }
        }

        self.expect(Token::RightParen)?;

        Ok(params)
    }

    fn parse_rest_element(&mut self) -> ParseResult<RestElement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let argument = p(self.parse_pattern()?);

        // Rest elements may not have a default value
        if self.token == Token::Equals {
            return self.error(self.loc, ParseError::RestElementInitializer);
        }

        let loc = self.mark_loc(start_pos);

        Ok(RestElement { loc, argument })
    }

    fn parse_function_block_body(&mut self) -> ParseResult<(Block, bool, bool)> {
        let saved_in_params = self.context.contains(ParseContext::IN_PARAMETERS);
        self.context.remove(ParseContext::IN_PARAMETERS);

        let start_pos = self.current_start_pos();
        self.expect(Token::LeftBrace)?;

        // Enter strict mode if applicable, saving the strict mode context
        // from before this function.
        let old_in_strict_mode = self.in_strict_mode;

        let mut body = vec![];
        let has_use_strict_directive = self.parse_directive_prologue(&mut body)?;

        while self.token != Token::RightBrace && self.token != Token::Eof {
            let before_pos = self.loc.start;
            let save_state = if self.options.tolerant {
                Some(self.save())
            } else {
                None
            };

            match self.parse_statement_list_item() {
                Ok(stmt) => body.push(stmt),
                Err(error) if self.options.tolerant => {
                    self.restore(save_state.unwrap());
                    self.errors.push(error);
                    self.synchronize();

                    if self.loc.start == before_pos
                        && (self.advance().is_err() || self.loc.start == before_pos)
                    {
                        break;
                    }
                }
                Err(error) => return Err(error),
            }
        }

        self.expect(Token::RightBrace)?;
        let loc = self.mark_loc(start_pos);

        // Restore to the strict mode context from before this function
        let is_strict_mode = self.in_strict_mode;
        self.set_strict_mode(old_in_strict_mode);

        if saved_in_params {
            self.context.insert(ParseContext::IN_PARAMETERS);
        }

        Ok((Block::new(loc, body), has_use_strict_directive, is_strict_mode))
    }

    /// Validate the parameter list of a completed function against its final
    /// strict mode, which may have been set by a directive in its own body.
    fn check_function_params(
        &mut self,
        func: &Function,
        duplicate_reason: Option<InvalidDuplicateParametersReason>,
    ) -> ParseResult<()> {
        if func.has_use_strict_directive && !func.has_simple_parameter_list {
            return self.error(func.loc, ParseError::UseStrictFunctionNonSimpleParameterList);
        }

        let mut bound_names = vec![];
        for param in &func.params {
            param.iter_bound_names(&mut |id| bound_names.push((id.name.clone(), id.loc)));
        }

        // Duplicate parameters are only allowed in sloppy mode functions with
        // simple parameter lists.
        let duplicate_reason = if let Some(reason) = duplicate_reason {
            Some(reason)
        } else if func.is_strict_mode {
            Some(InvalidDuplicateParametersReason::StrictMode)
        } else if !func.has_simple_parameter_list {
            Some(InvalidDuplicateParametersReason::NonSimpleParameters)
        } else {
            None
        };

        if let Some(reason) = duplicate_reason {
            let mut seen = HashSet::new();
            let mut duplicate_loc = None;
            for (name, loc) in &bound_names {
                if !seen.insert(name.clone()) {
                    duplicate_loc = Some(*loc);
                    break;
                }
            }

            if let Some(loc) = duplicate_loc {
                return self.error(loc, ParseError::InvalidDuplicateParameters(reason));
            }
        }

        // A function that became strict via a directive must re-validate its
        // parameter names under strict mode rules.
        if func.is_strict_mode {
            for (name, loc) in &bound_names {
                match classify_reserved_word(name, self.options.ecma_version) {
                    ReservedWordCategory::StrictBind => {
                        return self
                            .error(*loc, ParseError::BindRestrictedNameInStrictMode(name.clone()));
                    }
                    ReservedWordCategory::StrictOnly => {
                        return self.error(*loc, ParseError::IdentifierIsReservedWord(name.clone()));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        self.scope_tree.enter_scope(ScopeNodeKind::Block);
        let block = self.parse_block_in_current_scope();
        self.scope_tree.exit_scope();

        block
    }

    fn parse_block_in_current_scope(&mut self) -> ParseResult<Block> {
        let start_pos = self.current_start_pos();
        self.expect(Token::LeftBrace)?;

        let mut body = vec![];
        while self.token != Token::RightBrace && self.token != Token::Eof {
            let before_pos = self.loc.start;
            let save_state = if self.options.tolerant {
                Some(self.save())
            } else {
                None
            };

            match self.parse_statement_list_item() {
                Ok(stmt) => body.push(stmt),
                Err(error) if self.options.tolerant => {
                    self.restore(save_state.unwrap());
                    self.errors.push(error);
                    self.synchronize();

                    if self.loc.start == before_pos
                        && (self.advance().is_err() || self.loc.start == before_pos)
                    {
                        break;
                    }
                }
                Err(error) => return Err(error),
            }
        }

        self.expect(Token::RightBrace)?;
        let loc = self.mark_loc(start_pos);

        Ok(Block::new(loc, body))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.expect(Token::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        let conseq = p(self.parse_statement()?);

        let altern = if self.token == Token::Else {
            self.advance()?;
            Some(p(self.parse_statement()?))
        } else {
            None
        };

        let loc = self.mark_loc(start_pos);

        Ok(Statement::If(IfStatement { loc, test, conseq, altern }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.expect(Token::LeftParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        let saved_in_switch = self.context.contains(ParseContext::IN_SWITCH);
        self.context.insert(ParseContext::IN_SWITCH);
        self.scope_tree.enter_scope(ScopeNodeKind::Switch);

        let result = self.parse_switch_cases();

        self.scope_tree.exit_scope();
        if !saved_in_switch {
            self.context.remove(ParseContext::IN_SWITCH);
        }

        let cases = result?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::Switch(SwitchStatement { loc, discriminant, cases }))
    }

    fn parse_switch_cases(&mut self) -> ParseResult<Vec<SwitchCase>> {
        let mut cases = vec![];
        let mut seen_default = false;

        self.expect(Token::LeftBrace)?;

        while self.token != Token::RightBrace {
            match self.token {
                Token::Case | Token::Default => {
                    let case_start_pos = self.current_start_pos();
                    let is_case = self.token == Token::Case;

                    if !is_case {
                        if seen_default {
                            return self.error(self.loc, ParseError::MultipleDefaultClauses);
                        }
                        seen_default = true;
                    }

                    self.advance()?;

                    let test = if is_case {
                        Some(self.parse_expression()?)
                    } else {
                        None
                    };
                    self.expect(Token::Colon)?;

                    // Parse statement list, which will be terminated by the
                    // start of another case or the end of the switch.
                    let mut body = vec![];
                    while self.token != Token::Case
                        && self.token != Token::Default
                        && self.token != Token::RightBrace
                        && self.token != Token::Eof
                    {
                        body.push(self.parse_statement_list_item()?)
                    }

                    let loc = self.mark_loc(case_start_pos);
                    cases.push(SwitchCase { loc, test, body })
                }
                _ => return self.error_expected_token(self.loc, &self.token, &Token::Case),
            }
        }

        self.expect(Token::RightBrace)?;

        Ok(cases)
    }

    fn parse_any_for_statement(&mut self) -> ParseResult<Statement> {
        self.scope_tree.enter_scope(ScopeNodeKind::Block);
        let result = self.parse_any_for_statement_in_scope();
        self.scope_tree.exit_scope();

        result
    }

    fn parse_any_for_statement_in_scope(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // A for await loop must be inside an async context
        let is_await = self.token == Token::Await;
        if is_await {
            if !self.allow_await() || !self.options.ecma_version.has_async_iteration() {
                return self.error_unexpected_token(self.loc, &self.token);
            }

            self.advance()?;
        }

        self.expect(Token::LeftParen)?;

        // Both for and for each loops can start with a variable declaration
        let is_decl_start = match self.token {
            Token::Var | Token::Const => true,
            Token::Let => self.is_let_declaration_start()?,
            _ => false,
        };

        // Init statement, if it exists
        match self.token {
            _ if is_decl_start => self.parse_for_statement_after_decl_start(start_pos, is_await),
            // Empty init, but we know this is a regular for loop
            Token::Semicolon if !is_await => {
                self.advance()?;
                self.parse_for_statement(None, start_pos)
            }
            _ => {
                let expr_start_pos = self.current_start_pos();

                // The in operator is suppressed so that the head of a for in
                // loop terminates after its left hand side. Deferred cover
                // errors are resolved once the head form is known.
                let saved_cover = std::mem::take(&mut self.cover);
                self.context.insert(ParseContext::IN_FOR_INIT);
                let expr_result = self.parse_assignment_expression_deferred();
                self.context.remove(ParseContext::IN_FOR_INIT);
                let expr = expr_result?;

                match self.token {
                    // If this is a for each loop the parsed expression must
                    // actually be a pattern
                    Token::In | Token::Of => {
                        if self.token == Token::Of && is_await {
                            // valid for await (x of ...)
                        } else if is_await {
                            return self.error_expected_token(self.loc, &self.token, &Token::Of);
                        }

                        let pattern =
                            self.reparse_expression_as_for_left_hand_side(*expr, expr_start_pos)?;
                        self.cover = saved_cover;

                        let left = p(ForEachInit::Pattern(pattern));
                        self.parse_for_each_statement(left, start_pos, is_await)
                    }
                    // Otherwise this is a regular for loop and the expression
                    // is used directly, possibly as the start of a sequence.
                    _ => {
                        self.check_cover_errors()?;
                        self.cover = saved_cover;

                        if is_await {
                            return self.error_expected_token(self.loc, &self.token, &Token::Of);
                        }

                        let expr = self.parse_sequence_expression_continuation(
                            expr,
                            expr_start_pos,
                        )?;

                        let init = Some(p(ForInit::Expression(*expr)));
                        self.expect(Token::Semicolon)?;
                        self.parse_for_statement(init, start_pos)
                    }
                }
            }
        }
    }

    fn parse_for_statement_after_decl_start(
        &mut self,
        start_pos: Pos,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let saved_in_for_init = self.context.contains(ParseContext::IN_FOR_INIT);
        self.context.insert(ParseContext::IN_FOR_INIT);
        let var_decl_result = self.parse_variable_declaration(true);
        if !saved_in_for_init {
            self.context.remove(ParseContext::IN_FOR_INIT);
        }
        let var_decl = var_decl_result?;

        match self.token {
            Token::In | Token::Of => {
                if is_await && self.token == Token::In {
                    return self.error_expected_token(self.loc, &self.token, &Token::Of);
                }

                self.check_for_each_var_decl(&var_decl)?;

                let init = p(ForEachInit::VarDecl(var_decl));
                self.parse_for_each_statement(init, start_pos, is_await)
            }
            _ => {
                if is_await {
                    return self.error_expected_token(self.loc, &self.token, &Token::Of);
                }

                // Const declarations and destructuring declarations in a
                // regular for loop require initializers
                for declaration in &var_decl.declarations {
                    if declaration.init.is_none() {
                        if var_decl.kind == VarKind::Const {
                            return self
                                .error(declaration.loc, ParseError::ConstWithoutInitializer);
                        } else if !matches!(declaration.id.as_ref(), Pattern::Id(_)) {
                            return self
                                .error_expected_token(self.loc, &self.token, &Token::Equals);
                        }
                    }
                }

                let init = Some(p(ForInit::VarDecl(var_decl)));
                self.expect(Token::Semicolon)?;
                self.parse_for_statement(init, start_pos)
            }
        }
    }

    /// The left hand side declaration of a for each loop must be a single
    /// declarator, without an initializer except for the legacy sloppy mode
    /// `for (var x = init in target)` form.
    fn check_for_each_var_decl(&mut self, var_decl: &VariableDeclaration) -> ParseResult<()> {
        if var_decl.declarations.len() != 1 {
            return self.error(var_decl.loc, ParseError::ForEachInitInvalidVarDecl);
        }

        let declaration = &var_decl.declarations[0];
        if let Some(_) = &declaration.init {
            let is_legacy_for_in_init = self.token == Token::In
                && !self.in_strict_mode
                && var_decl.kind == VarKind::Var
                && matches!(declaration.id.as_ref(), Pattern::Id(_));

            if !is_legacy_for_in_init {
                return self.error(declaration.loc, ParseError::ForInInitWithInitializer);
            }
        }

        Ok(())
    }

    fn reparse_expression_as_for_left_hand_side(
        &mut self,
        expr: Expression,
        start_pos: Pos,
    ) -> ParseResult<Pattern> {
        match self.reparse_expression_as_pattern(expr, PatternContext::ForLeftHandSide) {
            Ok(pattern) => Ok(pattern),
            Err(error) => {
                // Replace generic target errors with the for specific error
                if let ParseError::InvalidAssignmentLeftHandSide = error.error {
                    let loc = self.mark_loc(start_pos);
                    self.error(loc, ParseError::InvalidForLeftHandSide)
                } else {
                    Err(error)
                }
            }
        }
    }

    fn parse_for_statement(
        &mut self,
        init: Option<P<ForInit>>,
        start_pos: Pos,
    ) -> ParseResult<Statement> {
        let test = match self.token {
            Token::Semicolon => None,
            _ => Some(self.parse_expression()?),
        };
        self.expect(Token::Semicolon)?;

        let update = match self.token {
            Token::RightParen => None,
            _ => Some(self.parse_expression()?),
        };

        self.expect(Token::RightParen)?;
        let body = p(self.parse_iteration_body()?);
        let loc = self.mark_loc(start_pos);

        Ok(Statement::For(ForStatement { loc, init, test, update, body }))
    }

    fn parse_for_each_statement(
        &mut self,
        left: P<ForEachInit>,
        start_pos: Pos,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let kind = match self.token {
            Token::In => ForEachKind::In,
            Token::Of => ForEachKind::Of,
            _ => unreachable!(),
        };

        self.advance()?;

        let right = match kind {
            ForEachKind::In => self.parse_expression()?,
            ForEachKind::Of => self.parse_assignment_expression()?,
        };

        self.expect(Token::RightParen)?;
        let body = p(self.parse_iteration_body()?);
        let loc = self.mark_loc(start_pos);

        Ok(Statement::ForEach(ForEachStatement { loc, kind, left, right, body, is_await }))
    }

    fn parse_iteration_body(&mut self) -> ParseResult<Statement> {
        let saved_in_iteration = self.context.contains(ParseContext::IN_ITERATION);
        self.context.insert(ParseContext::IN_ITERATION);

        let result = self.parse_statement();

        if !saved_in_iteration {
            self.context.remove(ParseContext::IN_ITERATION);
        }

        result
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.expect(Token::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        let body = p(self.parse_iteration_body()?);

        let loc = self.mark_loc(start_pos);

        Ok(Statement::While(WhileStatement { loc, test, body }))
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let body = p(self.parse_iteration_body()?);

        self.expect(Token::While)?;
        self.expect(Token::LeftParen)?;
        let test = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        // A semicolon is always automatically inserted after a do while
        // statement
        if self.token == Token::Semicolon {
            self.advance()?;
        }

        let loc = self.mark_loc(start_pos);

        Ok(Statement::DoWhile(DoWhileStatement { loc, test, body }))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();

        if self.in_strict_mode {
            return self.error(self.loc, ParseError::WithInStrictMode);
        }

        self.advance()?;

        self.expect(Token::LeftParen)?;
        let object = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        self.scope_tree.enter_scope(ScopeNodeKind::With);
        let body = self.parse_statement();
        self.scope_tree.exit_scope();

        let body = p(body?);
        let loc = self.mark_loc(start_pos);

        Ok(Statement::With(WithStatement { loc, object, body }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let block = p(self.parse_block()?);

        // Optional handler block
        let handler = if self.token == Token::Catch {
            Some(p(self.parse_catch_clause()?))
        } else {
            None
        };

        let finalizer = if self.token == Token::Finally {
            self.advance()?;
            Some(p(self.parse_block()?))
        } else {
            None
        };

        // Must have at least one handler or finalizer
        if handler.is_none() && finalizer.is_none() {
            return self.error_expected_token(self.loc, &self.token, &Token::Catch);
        }

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Try(TryStatement { loc, block, handler, finalizer }))
    }

    fn parse_catch_clause(&mut self) -> ParseResult<CatchClause> {
        let catch_start_pos = self.current_start_pos();
        self.advance()?;

        let param = if self.token == Token::LeftBrace {
            // The binding is optional entirely
            if !self.options.ecma_version.has_optional_catch_binding() {
                return self.error_expected_token(self.loc, &self.token, &Token::LeftParen);
            }

            None
        } else {
            // Handler optionally has a single pattern as the parameter
            self.expect(Token::LeftParen)?;
            let param = self.parse_pattern()?;
            self.expect(Token::RightParen)?;
            Some(p(param))
        };

        // The catch parameter and the lexical declarations of the catch body
        // share a scope, so that redeclarations of the parameter are errors.
        let is_simple_param = matches!(param.as_deref(), None | Some(Pattern::Id(_)));
        self.scope_tree
            .enter_scope(ScopeNodeKind::Catch { is_simple_param });

        let result = (|| {
            if let Some(param) = &param {
                self.declare_pattern_bindings(param, &BindingKind::CatchParameter)?;

                // Destructured catch parameters may not contain duplicates
                if !is_simple_param {
                    let mut bound_names = vec![];
                    param.iter_bound_names(&mut |id| {
                        bound_names.push((id.name.clone(), id.loc))
                    });

                    let mut seen = HashSet::new();
                    for (name, loc) in bound_names {
                        if seen.contains(&name) {
                            return self.error(loc, ParseError::NameRedeclaration(name));
                        }
                        seen.insert(name);
                    }
                }
            }

            self.parse_block_in_current_scope()
        })();

        self.scope_tree.exit_scope();
        let body = p(result?);

        let loc = self.mark_loc(catch_start_pos);

        Ok(CatchClause { loc, param, body })
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        if self.lexer.is_new_line_before_current() {
            return self.error(self.loc, ParseError::ThrowArgumentOnNewLine);
        }

        let argument = self.parse_expression()?;
        self.expect_semicolon()?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::Throw(ThrowStatement { loc, argument }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();

        if !self.context.contains(ParseContext::IN_FUNCTION)
            && !self.options.allow_return_outside_function
        {
            return self.error(self.loc, ParseError::ReturnOutsideFunction);
        }

        self.advance()?;

        let argument = if self.maybe_expect_semicolon()? {
            None
        } else {
            let argument = self.parse_expression()?;
            self.expect_semicolon()?;
            Some(argument)
        };

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Return(ReturnStatement { loc, argument }))
    }

    fn parse_break_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let label = if self.maybe_expect_semicolon()? {
            if !self.context.contains(ParseContext::IN_ITERATION)
                && !self.context.contains(ParseContext::IN_SWITCH)
            {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::UnlabeledBreakOutsideBreakable);
            }

            None
        } else {
            let label = self.parse_label_identifier()?;

            if !self.labels.iter().any(|entry| entry.name == label.name) {
                return self.error(label.loc, ParseError::LabelNotFound(label.name));
            }

            self.expect_semicolon()?;
            Some(p(label))
        };

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Break(BreakStatement { loc, label }))
    }

    fn parse_continue_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let label = if self.maybe_expect_semicolon()? {
            if !self.context.contains(ParseContext::IN_ITERATION) {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::ContinueOutsideIterable);
            }

            None
        } else {
            let label = self.parse_label_identifier()?;

            match self.labels.iter().find(|entry| entry.name == label.name) {
                None => return self.error(label.loc, ParseError::LabelNotFound(label.name)),
                Some(entry) if !entry.is_iteration => {
                    return self
                        .error(label.loc, ParseError::ContinueLabelNotIteration(label.name));
                }
                Some(_) => {}
            }

            self.expect_semicolon()?;
            Some(p(label))
        };

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Continue(ContinueStatement { loc, label }))
    }
}

/// Expression parsing.
impl<'a> Parser<'a> {
    /// 13.16 Expression
    fn parse_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_assignment_expression()?;
        self.parse_sequence_expression_continuation(expr, start_pos)
    }

    fn parse_sequence_expression_continuation(
        &mut self,
        expr: P<Expression>,
        start_pos: Pos,
    ) -> ParseResult<P<Expression>> {
        if self.token == Token::Comma {
            let mut expressions = vec![*expr];
            while self.token == Token::Comma {
                self.advance()?;
                expressions.push(*self.parse_assignment_expression()?);
            }

            let loc = self.mark_loc(start_pos);

            Ok(p(Expression::Sequence(SequenceExpression { loc, expressions })))
        } else {
            Ok(expr)
        }
    }

    /// 13.15 AssignmentExpression. Finalizes deferred cover grammar errors,
    /// since nothing above this expression can reinterpret it as a pattern.
    fn parse_assignment_expression(&mut self) -> ParseResult<P<Expression>> {
        let saved_cover = std::mem::take(&mut self.cover);
        let expr = self.parse_assignment_expression_deferred()?;
        self.check_cover_errors()?;
        self.cover = saved_cover;

        Ok(expr)
    }

    /// AssignmentExpression in a position where an enclosing expression may
    /// still reinterpret this expression as a pattern. Cover grammar errors
    /// are left deferred for the enclosing expression to resolve.
    fn parse_assignment_expression_deferred(&mut self) -> ParseResult<P<Expression>> {
        if self.token == Token::Yield && self.allow_yield() {
            return self.parse_yield_expression();
        }

        // First try parsing as a non-arrow assignment
        match self.try_parse(Parser::parse_non_arrow_assignment_expression) {
            Ok(expr) => Ok(expr),
            // Then try parsing as an arrow function if that doesn't succeed
            Err(err) => match self.try_parse(Parser::parse_arrow_function) {
                Ok(expr) => Ok(expr),
                // Error as if parsing a non-arrow assignment if neither match
                Err(_) => Err(err),
            },
        }
    }

    fn parse_non_arrow_assignment_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_conditional_expression()?;

        let assignment_op = match self.token {
            Token::Equals => Some(AssignmentOperator::Equals),
            Token::AddEq => Some(AssignmentOperator::Add),
            Token::SubtractEq => Some(AssignmentOperator::Subtract),
            Token::MultiplyEq => Some(AssignmentOperator::Multiply),
            Token::DivideEq => Some(AssignmentOperator::Divide),
            Token::RemainderEq => Some(AssignmentOperator::Remainder),
            Token::ExponentEq => Some(AssignmentOperator::Exponent),
            Token::AndEq => Some(AssignmentOperator::And),
            Token::OrEq => Some(AssignmentOperator::Or),
            Token::XorEq => Some(AssignmentOperator::Xor),
            Token::ShiftLeftEq => Some(AssignmentOperator::ShiftLeft),
            Token::ShiftRightArithmeticEq => Some(AssignmentOperator::ShiftRightArithmetic),
            Token::ShiftRightLogicalEq => Some(AssignmentOperator::ShiftRightLogical),
            Token::LogicalAndEq => Some(AssignmentOperator::LogicalAnd),
            Token::LogicalOrEq => Some(AssignmentOperator::LogicalOr),
            Token::NullishCoalesceEq => Some(AssignmentOperator::NullishCoalesce),
            _ => None,
        };

        let result = match assignment_op {
            None => Ok(expr),
            Some(operator) => {
                // Only a plain assignment can have a pattern as its target,
                // compound assignments require a simple target.
                let left = if operator == AssignmentOperator::Equals {
                    self.reparse_expression_as_pattern(*expr, PatternContext::Assignment)?
                } else {
                    self.reparse_expression_as_simple_target(*expr)?
                };

                self.advance()?;
                let right = self.parse_assignment_expression()?;
                let loc = self.mark_loc(start_pos);

                Ok(p(Expression::Assign(AssignmentExpression {
                    loc,
                    operator,
                    left: p(left),
                    right,
                })))
            }
        };

        // Force parsing as an arrow function if we see an arrow
        if self.token == Token::Arrow {
            if self.lexer.is_new_line_before_current() {
                return self.error(self.loc, ParseError::ArrowOnNewLine);
            }

            return self.error(self.loc, FAIL_TRY_PARSED_ERROR);
        }

        result
    }

    fn parse_yield_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();

        if self.context.contains(ParseContext::IN_PARAMETERS) {
            return self.error(self.loc, ParseError::YieldInFunctionParameters);
        }

        self.advance()?;

        // No argument may appear after a line terminator, and only tokens
        // that can start an expression begin an argument.
        let no_argument = self.lexer.is_new_line_before_current()
            || matches!(
                self.token,
                Token::Semicolon
                    | Token::RightParen
                    | Token::RightBracket
                    | Token::RightBrace
                    | Token::Colon
                    | Token::Comma
                    | Token::Eof
            )
            || (self.token == Token::In && self.context.contains(ParseContext::IN_FOR_INIT));

        if no_argument {
            let loc = self.mark_loc(start_pos);
            return Ok(p(Expression::Yield(YieldExpression {
                loc,
                argument: None,
                is_delegate: false,
            })));
        }

        let is_delegate = self.token == Token::Multiply;
        if is_delegate {
            self.advance()?;
        }

        let argument = Some(self.parse_assignment_expression()?);
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Yield(YieldExpression { loc, argument, is_delegate })))
    }

    fn parse_arrow_function(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();

        let is_async =
            self.token == Token::Async && self.options.ecma_version.has_async_functions();
        if is_async {
            let async_loc = self.loc;
            self.advance()?;

            // `async` on its own line is an identifier, not an async arrow
            if self.lexer.is_new_line_before_current() {
                return self.error(async_loc, FAIL_TRY_PARSED_ERROR);
            }

            // Special case for when async is actually the single parameter:
            // async => body
            if self.token == Token::Arrow {
                return self.parse_arrow_function_after_params(
                    start_pos,
                    vec![FunctionParam::Pattern(Pattern::Id(Identifier {
                        loc: async_loc,
                        name: "async".to_owned(),
                    }))],
                    /* is_async */ false,
                );
            }
        }

        let saved_context = self.context;
        let saved_labels = std::mem::take(&mut self.labels);

        // Arrow functions inherit the surrounding new.target and super
        // context, unlike ordinary functions.
        let mut context = ParseContext::IN_FUNCTION
            | (saved_context
                & (ParseContext::ALLOW_NEW_TARGET
                    | ParseContext::ALLOW_SUPER_PROPERTY
                    | ParseContext::ALLOW_SUPER_CALL));
        if is_async {
            context.insert(ParseContext::ALLOW_AWAIT);
        }
        self.context = context;

        self.scope_tree.enter_scope(ScopeNodeKind::Function);

        let result = self.parse_arrow_function_body(start_pos, is_async);

        self.scope_tree.exit_scope();
        self.context = saved_context;
        self.labels = saved_labels;

        result
    }

    fn parse_arrow_function_body(
        &mut self,
        start_pos: Pos,
        is_async: bool,
    ) -> ParseResult<P<Expression>> {
        // Arrow function params can be either parenthesized function params
        // or a single binding identifier.
        let params = match self.token {
            Token::LeftParen => self.parse_function_params()?,
            _ => {
                let id = self.parse_binding_identifier()?;
                if let Err(error) = self
                    .scope_tree
                    .add_binding(&id.name, BindingKind::FunctionParameter)
                {
                    return self.error(id.loc, error);
                }

                vec![FunctionParam::Pattern(Pattern::Id(id))]
            }
        };

        self.parse_arrow_function_after_params_in_context(start_pos, params, is_async)
    }

    fn parse_arrow_function_after_params(
        &mut self,
        start_pos: Pos,
        params: Vec<FunctionParam>,
        is_async: bool,
    ) -> ParseResult<P<Expression>> {
        let saved_context = self.context;
        let saved_labels = std::mem::take(&mut self.labels);

        let mut context = ParseContext::IN_FUNCTION
            | (saved_context
                & (ParseContext::ALLOW_NEW_TARGET
                    | ParseContext::ALLOW_SUPER_PROPERTY
                    | ParseContext::ALLOW_SUPER_CALL));
        if is_async {
            context.insert(ParseContext::ALLOW_AWAIT);
        }
        self.context = context;

        self.scope_tree.enter_scope(ScopeNodeKind::Function);

        let result = self.parse_arrow_function_after_params_in_context(start_pos, params, is_async);

        self.scope_tree.exit_scope();
        self.context = saved_context;
        self.labels = saved_labels;

        result
    }

    fn parse_arrow_function_after_params_in_context(
        &mut self,
        start_pos: Pos,
        params: Vec<FunctionParam>,
        is_async: bool,
    ) -> ParseResult<P<Expression>> {
        if self.lexer.is_new_line_before_current() && self.token == Token::Arrow {
            return self.error(self.loc, ParseError::ArrowOnNewLine);
        }

        self.expect(Token::Arrow)?;

        let (body, has_use_strict_directive, is_strict_mode) =
            if self.token == Token::LeftBrace {
                let (block, has_use_strict_directive, is_strict_mode) =
                    self.parse_function_block_body()?;
                (p(FunctionBody::Block(block)), has_use_strict_directive, is_strict_mode)
            } else {
                let expr = self.parse_assignment_expression()?;
                (p(FunctionBody::Expression(*expr)), false, self.in_strict_mode)
            };

        let loc = self.mark_loc(start_pos);

        let func = Function::new(
            loc,
            /* id */ None,
            params,
            body,
            is_async,
            /* is_generator */ false,
            is_strict_mode,
            has_use_strict_directive,
        );

        self.check_function_params(&func, Some(InvalidDuplicateParametersReason::ArrowFunction))?;

        Ok(p(Expression::ArrowFunction(func)))
    }

    /// 13.14 ConditionalExpression
    fn parse_conditional_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_expression_with_precedence(Precedence::Conditional)?;

        if self.token == Token::Question {
            self.advance()?;
            let conseq = self.with_in_allowed(Self::parse_assignment_expression)?;
            self.expect(Token::Colon)?;
            let altern = self.parse_assignment_expression()?;
            let loc = self.mark_loc(start_pos);

            Ok(p(Expression::Conditional(ConditionalExpression {
                loc,
                test: expr,
                conseq,
                altern,
            })))
        } else {
            Ok(expr)
        }
    }

    /// Precedence parsing for all binary operations and below.
    /// Corresponds to 13.13 ShortCircuitExpression
    fn parse_expression_with_precedence(
        &mut self,
        precedence: Precedence,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();

        // Private names must be the start of an `in` expression
        if self.token == Token::Hash {
            let private_name = self.parse_private_name()?;
            self.record_private_name_use(&private_name.name, private_name.loc)?;

            if self.token == Token::In
                && precedence.is_weaker_than(Precedence::Relational)
                && self.options.ecma_version.has_private_in()
                && !self.context.contains(ParseContext::IN_FOR_INIT)
            {
                return self.parse_binary_expression(
                    p(Expression::Id(private_name)),
                    start_pos,
                    BinaryOperator::InPrivate,
                    Precedence::Relational,
                );
            }

            return self.error_unexpected_token(self.loc, &self.token);
        }

        let mut current_expr = self.parse_expression_prefix()?;
        loop {
            let current_expr_ref = current_expr.as_ref() as *const Expression;
            let next_expr = self.parse_expression_infix(current_expr, precedence, start_pos)?;
            if std::ptr::eq(current_expr_ref, next_expr.as_ref()) {
                return Ok(next_expr);
            }

            current_expr = next_expr;
        }
    }

    fn parse_expression_prefix(&mut self) -> ParseResult<P<Expression>> {
        match &self.token {
            Token::Plus => self.parse_unary_expression(UnaryOperator::Plus),
            Token::Minus => self.parse_unary_expression(UnaryOperator::Minus),
            Token::LogicalNot => self.parse_unary_expression(UnaryOperator::LogicalNot),
            Token::BitwiseNot => self.parse_unary_expression(UnaryOperator::BitwiseNot),
            Token::Typeof => self.parse_unary_expression(UnaryOperator::TypeOf),
            Token::Void => self.parse_unary_expression(UnaryOperator::Void),
            Token::Delete => self.parse_unary_expression(UnaryOperator::Delete),
            Token::Increment => self.parse_update_expression_prefix(UpdateOperator::Increment),
            Token::Decrement => self.parse_update_expression_prefix(UpdateOperator::Decrement),
            Token::Await if self.allow_await() => self.parse_await_expression(),
            _ => self.parse_left_hand_side_expression(),
        }
    }

    fn parse_expression_infix(
        &mut self,
        left: P<Expression>,
        precedence: Precedence,
        start_pos: Pos,
    ) -> ParseResult<P<Expression>> {
        match &self.token {
            // Binary operations
            Token::Plus if precedence.is_weaker_than(Precedence::Addition) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Add,
                    Precedence::Addition,
                ),
            Token::Minus if precedence.is_weaker_than(Precedence::Addition) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Subtract,
                    Precedence::Addition,
                ),
            Token::Multiply if precedence.is_weaker_than(Precedence::Multiplication) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Multiply,
                    Precedence::Multiplication,
                ),
            Token::Divide if precedence.is_weaker_than(Precedence::Multiplication) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Divide,
                    Precedence::Multiplication,
                ),
            Token::Remainder if precedence.is_weaker_than(Precedence::Multiplication) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Remainder,
                    Precedence::Multiplication,
                ),
            Token::Exponent if precedence.is_weaker_than(Precedence::Exponentiation) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Exponent,
                    // Right associative, so lower precedence
                    Precedence::Multiplication,
                ),
            Token::BitwiseAnd if precedence.is_weaker_than(Precedence::BitwiseAnd) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::And,
                    Precedence::BitwiseAnd,
                ),
            Token::BitwiseOr if precedence.is_weaker_than(Precedence::BitwiseOr) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Or,
                    Precedence::BitwiseOr,
                ),
            Token::BitwiseXor if precedence.is_weaker_than(Precedence::BitwiseXor) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::Xor,
                    Precedence::BitwiseXor,
                ),
            Token::ShiftLeft if precedence.is_weaker_than(Precedence::Shift) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::ShiftLeft,
                    Precedence::Shift,
                ),
            Token::ShiftRightArithmetic if precedence.is_weaker_than(Precedence::Shift) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::ShiftRightArithmetic,
                    Precedence::Shift,
                ),
            Token::ShiftRightLogical if precedence.is_weaker_than(Precedence::Shift) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::ShiftRightLogical,
                    Precedence::Shift,
                ),
            Token::EqEq if precedence.is_weaker_than(Precedence::Equality) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::EqEq,
                    Precedence::Equality,
                ),
            Token::NotEq if precedence.is_weaker_than(Precedence::Equality) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::NotEq,
                    Precedence::Equality,
                ),
            Token::EqEqEq if precedence.is_weaker_than(Precedence::Equality) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::EqEqEq,
                    Precedence::Equality,
                ),
            Token::NotEqEq if precedence.is_weaker_than(Precedence::Equality) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::NotEqEq,
                    Precedence::Equality,
                ),
            Token::LessThan if precedence.is_weaker_than(Precedence::Relational) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::LessThan,
                    Precedence::Relational,
                ),
            Token::LessThanOrEqual if precedence.is_weaker_than(Precedence::Relational) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::LessThanOrEqual,
                    Precedence::Relational,
                ),
            Token::GreaterThan if precedence.is_weaker_than(Precedence::Relational) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::GreaterThan,
                    Precedence::Relational,
                ),
            Token::GreaterThanOrEqual if precedence.is_weaker_than(Precedence::Relational) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::GreaterThanOrEqual,
                    Precedence::Relational,
                ),
            Token::In
                if precedence.is_weaker_than(Precedence::Relational)
                    && !self.context.contains(ParseContext::IN_FOR_INIT) =>
            {
                self.parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::In,
                    Precedence::Relational,
                )
            }
            Token::InstanceOf if precedence.is_weaker_than(Precedence::Relational) => self
                .parse_binary_expression(
                    left,
                    start_pos,
                    BinaryOperator::InstanceOf,
                    Precedence::Relational,
                ),

            // Logical operations
            Token::LogicalAnd if precedence.is_weaker_than(Precedence::LogicalAnd) => self
                .parse_logical_expression(
                    left,
                    start_pos,
                    LogicalOperator::And,
                    Precedence::LogicalAnd,
                ),
            Token::LogicalOr if precedence.is_weaker_than(Precedence::LogicalOr) => self
                .parse_logical_expression(
                    left,
                    start_pos,
                    LogicalOperator::Or,
                    Precedence::LogicalOr,
                ),
            Token::NullishCoalesce if precedence.is_weaker_than(Precedence::LogicalOr) => self
                .parse_logical_expression(
                    left,
                    start_pos,
                    LogicalOperator::NullishCoalesce,
                    // The right operand binds at logical and precedence so
                    // that unparenthesized logical operators are not consumed,
                    // making the mixing error detectable.
                    Precedence::LogicalAnd,
                ),

            // Update expressions
            Token::Increment
                if precedence.is_weaker_than(Precedence::PostfixUpdate)
                    && !self.lexer.is_new_line_before_current() =>
            {
                self.parse_update_expression_postfix(left, start_pos, UpdateOperator::Increment)
            }
            Token::Decrement
                if precedence.is_weaker_than(Precedence::PostfixUpdate)
                    && !self.lexer.is_new_line_before_current() =>
            {
                self.parse_update_expression_postfix(left, start_pos, UpdateOperator::Decrement)
            }

            // No infix expression
            _ => Ok(left),
        }
    }

    fn parse_binary_expression(
        &mut self,
        left: P<Expression>,
        start_pos: Pos,
        operator: BinaryOperator,
        precedence: Precedence,
    ) -> ParseResult<P<Expression>> {
        self.advance()?;
        let right = self.parse_expression_with_precedence(precedence)?;
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Binary(BinaryExpression { loc, operator, left, right })))
    }

    fn parse_logical_expression(
        &mut self,
        left: P<Expression>,
        start_pos: Pos,
        operator: LogicalOperator,
        precedence: Precedence,
    ) -> ParseResult<P<Expression>> {
        self.advance()?;
        let right = self.parse_expression_with_precedence(precedence)?;
        let loc = self.mark_loc(start_pos);

        // Nullish coalescing may not be mixed with logical operators without
        // parentheses. Since the right operand of `??` stops before logical
        // operators, a mix in either direction leaves the other operator as
        // the current token.
        let is_mixed = match operator {
            LogicalOperator::NullishCoalesce => {
                self.token == Token::LogicalAnd || self.token == Token::LogicalOr
            }
            LogicalOperator::And | LogicalOperator::Or => self.token == Token::NullishCoalesce,
        };

        if is_mixed {
            return self.error(self.loc, ParseError::MixedLogicalAndCoalesce);
        }

        Ok(p(Expression::Logical(LogicalExpression { loc, operator, left, right })))
    }

    fn parse_update_expression_prefix(
        &mut self,
        operator: UpdateOperator,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;
        let argument = self.parse_expression_with_precedence(Precedence::Unary)?;
        let loc = self.mark_loc(start_pos);

        self.check_update_expression_argument(&argument)?;

        Ok(p(Expression::Update(UpdateExpression {
            loc,
            operator,
            argument,
            is_prefix: true,
        })))
    }

    fn parse_update_expression_postfix(
        &mut self,
        argument: P<Expression>,
        start_pos: Pos,
        operator: UpdateOperator,
    ) -> ParseResult<P<Expression>> {
        self.check_update_expression_argument(&argument)?;

        self.advance()?;
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Update(UpdateExpression {
            loc,
            operator,
            argument,
            is_prefix: false,
        })))
    }

    /// The target of an increment or decrement must be a simple assignment
    /// target.
    fn check_update_expression_argument(&mut self, argument: &Expression) -> ParseResult<()> {
        match argument {
            Expression::Id(id) => {
                if self.in_strict_mode {
                    if id.name == "eval" {
                        return self.error(id.loc, ParseError::AssignEvalInStrictMode);
                    } else if id.name == "arguments" {
                        return self.error(id.loc, ParseError::AssignArgumentsInStrictMode);
                    }
                }

                Ok(())
            }
            Expression::Member(_) | Expression::SuperMember(_) => Ok(()),
            Expression::Paren(paren) => self.check_update_expression_argument(&paren.expression),
            other => self.error(other.loc(), ParseError::InvalidUpdateExpressionArgument),
        }
    }

    fn parse_unary_expression(&mut self, operator: UnaryOperator) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;
        let argument = self.parse_expression_with_precedence(Precedence::Unary)?;
        let loc = self.mark_loc(start_pos);

        // An unparenthesized unary expression may not be the left operand of
        // an exponentiation expression.
        if self.token == Token::Exponent {
            return self.error(self.loc, ParseError::InvalidExponentiationOperand);
        }

        if operator == UnaryOperator::Delete {
            self.check_delete_argument(&argument)?;
        }

        Ok(p(Expression::Unary(UnaryExpression { loc, operator, argument })))
    }

    fn check_delete_argument(&mut self, argument: &Expression) -> ParseResult<()> {
        match argument {
            Expression::Id(id) if self.in_strict_mode => {
                self.error(id.loc, ParseError::DeleteIdentifierInStrictMode)
            }
            Expression::Member(member) if member.is_private => {
                self.error(member.loc, ParseError::DeletePrivateName)
            }
            Expression::Chain(chain) => self.check_delete_argument(&chain.expression),
            Expression::Paren(paren) => self.check_delete_argument(&paren.expression),
            _ => Ok(()),
        }
    }

    fn parse_await_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();

        if self.context.contains(ParseContext::IN_PARAMETERS) {
            return self.error(self.loc, ParseError::AwaitInFunctionParameters);
        }

        self.advance()?;
        let argument = self.parse_expression_with_precedence(Precedence::Unary)?;
        let loc = self.mark_loc(start_pos);

        // Await expressions are unary expressions for the purposes of the
        // exponentiation restriction.
        if self.token == Token::Exponent {
            return self.error(self.loc, ParseError::InvalidExponentiationOperand);
        }

        Ok(p(Expression::Await(AwaitExpression { loc, argument })))
    }

    /// 13.3 LeftHandSideExpression
    fn parse_left_hand_side_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();

        let mut in_optional_chain = false;

        let expr = match &self.token {
            Token::New => self.parse_new_expression()?,
            Token::Super => self.parse_super_expression()?,
            Token::Import => self.parse_import_expression()?,
            _ => self.parse_primary_expression()?,
        };

        let expr =
            self.parse_call_expression(expr, start_pos, true, &mut in_optional_chain)?;

        // The outermost member or call expression of an optional chain is
        // wrapped in a chain expression.
        if in_optional_chain {
            let loc = self.mark_loc(start_pos);
            Ok(p(Expression::Chain(ChainExpression { loc, expression: expr })))
        } else {
            Ok(expr)
        }
    }

    fn parse_call_expression(
        &mut self,
        expr: P<Expression>,
        start_pos: Pos,
        allow_call: bool,
        in_optional_chain: &mut bool,
    ) -> ParseResult<P<Expression>> {
        let expr = self.parse_member_expression(expr, start_pos, allow_call, in_optional_chain)?;
        match self.token {
            Token::LeftParen if allow_call => {
                let arguments = self.parse_call_arguments()?;
                let loc = self.mark_loc(start_pos);

                let call_expr = p(Expression::Call(CallExpression {
                    loc,
                    callee: expr,
                    arguments,
                    is_optional: false,
                }));

                self.parse_call_expression(call_expr, start_pos, allow_call, in_optional_chain)
            }
            _ => Ok(expr),
        }
    }

    fn parse_member_expression(
        &mut self,
        expr: P<Expression>,
        start_pos: Pos,
        allow_call: bool,
        in_optional_chain: &mut bool,
    ) -> ParseResult<P<Expression>> {
        match &self.token {
            Token::Period => {
                self.advance()?;

                let member_expr =
                    self.parse_member_property(expr, start_pos, /* is_optional */ false)?;

                self.parse_call_expression(member_expr, start_pos, allow_call, in_optional_chain)
            }
            Token::LeftBracket => {
                let member_expr =
                    self.parse_computed_member_property(expr, start_pos, false)?;

                self.parse_call_expression(member_expr, start_pos, allow_call, in_optional_chain)
            }
            Token::QuestionDot => {
                *in_optional_chain = true;
                self.advance()?;

                let chained_expr = match &self.token {
                    // An optional call: a?.()
                    Token::LeftParen => {
                        if !allow_call {
                            return self.error(self.loc, ParseError::OptionalChainInNewCallee);
                        }

                        let arguments = self.parse_call_arguments()?;
                        let loc = self.mark_loc(start_pos);

                        p(Expression::Call(CallExpression {
                            loc,
                            callee: expr,
                            arguments,
                            is_optional: true,
                        }))
                    }
                    // An optional computed member access: a?.[b]
                    Token::LeftBracket => {
                        self.parse_computed_member_property(expr, start_pos, true)?
                    }
                    // An optional member access: a?.b
                    _ => self.parse_member_property(expr, start_pos, /* is_optional */ true)?,
                };

                self.parse_call_expression(chained_expr, start_pos, allow_call, in_optional_chain)
            }
            Token::TemplatePart { is_head: true, .. } => {
                // Tagged templates may not appear in optional chains
                if *in_optional_chain {
                    return self.error(self.loc, ParseError::TaggedTemplateInOptionalChain);
                }

                let quasi = self.parse_template_literal(/* is_tagged */ true)?;
                let loc = self.mark_loc(start_pos);

                let tagged = p(Expression::TaggedTemplate(TaggedTemplateExpression {
                    loc,
                    tag: expr,
                    quasi: p(quasi),
                }));

                self.parse_call_expression(tagged, start_pos, allow_call, in_optional_chain)
            }
            _ => Ok(expr),
        }
    }

    fn parse_member_property(
        &mut self,
        object: P<Expression>,
        start_pos: Pos,
        is_optional: bool,
    ) -> ParseResult<P<Expression>> {
        let is_private = self.token == Token::Hash;
        let property = if is_private {
            let private_name = self.parse_private_name()?;
            self.record_private_name_use(&private_name.name, private_name.loc)?;
            private_name
        } else {
            match self.parse_identifier_name()? {
                Some(id) => id,
                None => return self.error_unexpected_token(self.loc, &self.token),
            }
        };

        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Member(MemberExpression {
            loc,
            object,
            property: p(Expression::Id(property)),
            is_computed: false,
            is_optional,
            is_private,
        })))
    }

    fn parse_computed_member_property(
        &mut self,
        object: P<Expression>,
        start_pos: Pos,
        is_optional: bool,
    ) -> ParseResult<P<Expression>> {
        self.advance()?;
        let property = self.with_in_allowed(Self::parse_expression)?;
        self.expect(Token::RightBracket)?;
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Member(MemberExpression {
            loc,
            object,
            property,
            is_computed: true,
            is_optional,
            is_private: false,
        })))
    }

    fn parse_new_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // new.target meta property
        if self.token == Token::Period {
            self.advance()?;

            match &self.token {
                Token::Identifier(name) if name == "target" => {
                    if !self.context.contains(ParseContext::ALLOW_NEW_TARGET) {
                        let loc = self.mark_loc(start_pos);
                        return self.error(loc, ParseError::NewTargetOutsideFunction);
                    }

                    self.advance()?;
                    let loc = self.mark_loc(start_pos);

                    return Ok(p(Expression::MetaProperty(MetaProperty {
                        loc,
                        kind: MetaPropertyKind::NewTarget,
                    })));
                }
                _ => return self.error(self.loc, ParseError::ExpectedNewTarget),
            }
        }

        let callee_start_pos = self.current_start_pos();
        let callee = match self.token {
            Token::New => self.parse_new_expression()?,
            Token::Super => self.parse_super_expression()?,
            _ => self.parse_primary_expression()?,
        };

        // Disallow calls so that parenthesized arguments are attached to this
        // new instead. Optional chains may not appear in a new callee.
        let mut in_optional_chain = false;
        let callee = self.parse_call_expression(
            callee,
            callee_start_pos,
            /* allow_call */ false,
            &mut in_optional_chain,
        )?;

        if in_optional_chain {
            let loc = self.mark_loc(callee_start_pos);
            return self.error(loc, ParseError::OptionalChainInNewCallee);
        }

        let arguments = if self.token == Token::LeftParen {
            self.parse_call_arguments()?
        } else {
            vec![]
        };

        let loc = self.mark_loc(start_pos);
        Ok(p(Expression::New(NewExpression { loc, callee, arguments })))
    }

    fn parse_super_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let super_loc = self.loc;
        self.advance()?;

        match self.token {
            Token::Period => {
                if !self.context.contains(ParseContext::ALLOW_SUPER_PROPERTY) {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::SuperPropertyOutsideMethod);
                }

                self.advance()?;
                let id = match self.parse_identifier_name()? {
                    Some(id) => id,
                    None => return self.error_unexpected_token(self.loc, &self.token),
                };

                let loc = self.mark_loc(start_pos);

                Ok(p(Expression::SuperMember(SuperMemberExpression {
                    loc,
                    super_: super_loc,
                    property: p(Expression::Id(id)),
                    is_computed: false,
                })))
            }
            Token::LeftBracket => {
                if !self.context.contains(ParseContext::ALLOW_SUPER_PROPERTY) {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::SuperPropertyOutsideMethod);
                }

                self.advance()?;
                let property = self.with_in_allowed(Self::parse_expression)?;
                self.expect(Token::RightBracket)?;
                let loc = self.mark_loc(start_pos);

                Ok(p(Expression::SuperMember(SuperMemberExpression {
                    loc,
                    super_: super_loc,
                    property,
                    is_computed: true,
                })))
            }
            Token::LeftParen => {
                if !self.context.contains(ParseContext::ALLOW_SUPER_CALL) {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::SuperCallOutsideDerivedConstructor);
                }

                let arguments = self.parse_call_arguments()?;
                let loc = self.mark_loc(start_pos);

                Ok(p(Expression::SuperCall(SuperCallExpression {
                    loc,
                    super_: super_loc,
                    arguments,
                })))
            }
            _ => self.error_expected_token(self.loc, &self.token, &Token::LeftParen),
        }
    }

    /// A dynamic import call or import.meta expression.
    fn parse_import_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        match self.token {
            Token::Period => {
                self.advance()?;

                match &self.token {
                    Token::Identifier(name) if name == "meta" => {
                        if !self.options.ecma_version.has_import_meta() {
                            let loc = self.mark_loc(start_pos);
                            return self.error(loc, ParseError::UnsupportedFeature("import.meta"));
                        }

                        if self.program_kind != ProgramKind::Module {
                            let loc = self.mark_loc(start_pos);
                            return self.error(loc, ParseError::ImportMetaOutsideModule);
                        }

                        self.advance()?;
                        let loc = self.mark_loc(start_pos);

                        Ok(p(Expression::MetaProperty(MetaProperty {
                            loc,
                            kind: MetaPropertyKind::ImportMeta,
                        })))
                    }
                    _ => self.error(self.loc, ParseError::ExpectedImportMeta),
                }
            }
            Token::LeftParen => {
                if !self.options.ecma_version.has_dynamic_import() {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::UnsupportedFeature("dynamic import"));
                }

                self.advance()?;

                let source = self.with_in_allowed(Self::parse_assignment_expression)?;

                let options = if self.token == Token::Comma {
                    self.advance()?;

                    if self.token == Token::RightParen {
                        None
                    } else {
                        let options = self.with_in_allowed(Self::parse_assignment_expression)?;

                        // Allow a trailing comma after the options argument
                        if self.token == Token::Comma {
                            self.advance()?;
                        }

                        Some(options)
                    }
                } else {
                    None
                };

                self.expect(Token::RightParen)?;
                let loc = self.mark_loc(start_pos);

                Ok(p(Expression::Import(ImportExpression { loc, source, options })))
            }
            _ => self.error_unexpected_token(self.loc, &self.token),
        }
    }

    fn parse_call_arguments(&mut self) -> ParseResult<Vec<CallArgument>> {
        self.with_in_allowed(Self::parse_call_arguments_inner)
    }

    fn parse_call_arguments_inner(&mut self) -> ParseResult<Vec<CallArgument>> {
        self.expect(Token::LeftParen)?;

        let mut arguments = vec![];
        while self.token != Token::RightParen {
            if self.token == Token::Spread {
                arguments.push(CallArgument::Spread(
                    self.parse_spread_element(/* deferred */ false)?,
                ))
            } else {
                arguments.push(CallArgument::Expression(*self.parse_assignment_expression()?));
            }

            if self.token == Token::Comma {
                self.advance()?;
            } else {
                break;
            }
        }

        self.expect(Token::RightParen)?;

        Ok(arguments)
    }

    /// 13.2 PrimaryExpression
    fn parse_primary_expression(&mut self) -> ParseResult<P<Expression>> {
        match &self.token {
            Token::Null => {
                let loc = self.loc;
                self.advance()?;
                Ok(p(Expression::Null(loc)))
            }
            Token::True | Token::False => {
                let value = self.token == Token::True;
                let loc = self.loc;
                self.advance()?;
                Ok(p(Expression::Boolean(BooleanLiteral { loc, value })))
            }
            Token::NumberLiteral(value) => {
                let loc = self.loc;
                let value = *value;
                self.advance()?;
                Ok(p(Expression::Number(NumberLiteral { loc, value })))
            }
            Token::BigIntLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(p(Expression::BigInt(BigIntLiteral { loc, value })))
            }
            Token::StringLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(p(Expression::String(StringLiteral { loc, value })))
            }
            // An ambiguous divide token in expression position must start a
            // regexp literal, so rescan it as one.
            Token::Divide | Token::DivideEq => {
                let slash_pos = self.loc.start;
                let (token, loc) = self.lexer.next_regexp_literal(slash_pos)?;

                if let Token::RegexpLiteral { raw, pattern, flags } = token {
                    // Replace the divide token with the regexp literal
                    self.loc = loc;
                    self.advance()?;

                    Ok(p(Expression::Regexp(RegexpLiteral { loc, raw, pattern, flags })))
                } else {
                    unreachable!("regexp rescan always produces a regexp literal")
                }
            }
            Token::TemplatePart { is_head: true, .. } => {
                let template = self.parse_template_literal(/* is_tagged */ false)?;
                Ok(p(Expression::Template(template)))
            }
            Token::This => {
                let loc = self.loc;
                self.advance()?;
                Ok(p(Expression::This(loc)))
            }
            Token::LeftParen => {
                let start_pos = self.current_start_pos();
                self.advance()?;
                let expr = self.with_in_allowed(Self::parse_expression)?;
                self.expect(Token::RightParen)?;

                if self.options.preserve_parens {
                    let loc = self.mark_loc(start_pos);
                    Ok(p(Expression::Paren(ParenthesizedExpression { loc, expression: expr })))
                } else {
                    Ok(expr)
                }
            }
            Token::LeftBrace => self.parse_object_expression(),
            Token::LeftBracket => self.parse_array_expression(),
            Token::Class => Ok(p(Expression::Class(self.parse_class(false, false)?))),
            _ => {
                if self.is_function_start()? {
                    return Ok(p(Expression::Function(self.parse_function_expression()?)));
                }

                // Check for the start of an async arrow function
                if self.token == Token::Async
                    && self.options.ecma_version.has_async_functions()
                {
                    let async_loc = self.loc;
                    let save_state = self.save();
                    self.advance()?;

                    // `async [newline] id` is an `async` identifier with ASI
                    // followed by another identifier, instead of the start of
                    // an async arrow function.
                    if !self.lexer.is_new_line_before_current()
                        && matches!(
                            self.token,
                            Token::Identifier(_)
                                | Token::Async
                                | Token::Of
                                | Token::From
                                | Token::As
                                | Token::Get
                                | Token::Set
                                | Token::Static
                                | Token::Let
                                | Token::Await
                                | Token::Yield
                        )
                    {
                        let id_token = self.token.clone();
                        let id_loc = self.loc;
                        self.advance()?;

                        // Start of an async arrow function. This can only
                        // occur while trying to parse a non-arrow function
                        // first, so fail the try parse.
                        if self.token == Token::Arrow {
                            return self.error(async_loc, FAIL_TRY_PARSED_ERROR);
                        } else {
                            // Otherwise this is a regular parse error at `id`
                            return self.error_unexpected_token(id_loc, &id_token);
                        }
                    }

                    self.restore(save_state);
                }

                Ok(p(Expression::Id(self.parse_identifier_reference()?)))
            }
        }
    }

    fn parse_identifier_reference(&mut self) -> ParseResult<Identifier> {
        self.parse_identifier(/* is_binding */ false)
    }

    fn parse_binding_identifier(&mut self) -> ParseResult<Identifier> {
        self.parse_identifier(/* is_binding */ true)
    }

    fn parse_label_identifier(&mut self) -> ParseResult<Identifier> {
        self.parse_identifier(/* is_binding */ false)
    }

    fn parse_identifier(&mut self, is_binding: bool) -> ParseResult<Identifier> {
        match &self.token {
            Token::Identifier(name) => {
                match classify_reserved_word(name, self.options.ecma_version) {
                    // Only reachable via escape sequences, since unescaped
                    // keywords lex as keyword tokens
                    ReservedWordCategory::Always => {
                        return self
                            .error(self.loc, ParseError::IdentifierIsReservedWord(name.clone()));
                    }
                    ReservedWordCategory::ModuleOnly => {
                        if self.is_await_reserved() {
                            return self.error(
                                self.loc,
                                ParseError::IdentifierIsReservedWord(name.clone()),
                            );
                        }
                    }
                    ReservedWordCategory::StrictOnly => {
                        if self.in_strict_mode
                            || (name == "yield" && self.allow_yield())
                        {
                            return self.error(
                                self.loc,
                                ParseError::IdentifierIsReservedWord(name.clone()),
                            );
                        }
                    }
                    ReservedWordCategory::StrictBind => {
                        if self.in_strict_mode && is_binding {
                            return self.error(
                                self.loc,
                                ParseError::BindRestrictedNameInStrictMode(name.clone()),
                            );
                        }
                    }
                    ReservedWordCategory::Future => {
                        if self.options.allow_reserved != AllowReserved::Always {
                            return self.error(
                                self.loc,
                                ParseError::IdentifierIsReservedWord(name.clone()),
                            );
                        }
                    }
                    ReservedWordCategory::NotReserved => {
                        if self.options.allow_reserved == AllowReserved::Never
                            && is_future_reserved_any_version(name)
                        {
                            return self.error(
                                self.loc,
                                ParseError::IdentifierIsReservedWord(name.clone()),
                            );
                        }
                    }
                }

                let loc = self.loc;
                let name = name.clone();
                self.advance()?;
                Ok(Identifier { loc, name })
            }
            // Contextual keywords that are always allowed as identifiers
            Token::Async | Token::Of | Token::From | Token::As | Token::Get | Token::Set => {
                let loc = self.loc;
                let name = self.token.to_string();
                self.advance()?;
                Ok(Identifier { loc, name })
            }
            // Contextual keywords allowed as identifiers outside strict mode
            Token::Let | Token::Static => {
                if self.in_strict_mode {
                    return self.error(
                        self.loc,
                        ParseError::IdentifierIsReservedWord(self.token.to_string()),
                    );
                }

                let loc = self.loc;
                let name = self.token.to_string();
                self.advance()?;
                Ok(Identifier { loc, name })
            }
            Token::Yield if !self.in_strict_mode && !self.allow_yield() => {
                let loc = self.loc;
                self.advance()?;
                Ok(Identifier { loc, name: "yield".to_owned() })
            }
            Token::Await if !self.is_await_reserved() => {
                let loc = self.loc;
                self.advance()?;
                Ok(Identifier { loc, name: "await".to_owned() })
            }
            Token::Yield | Token::Await => {
                self.error(self.loc, ParseError::IdentifierIsReservedWord(self.token.to_string()))
            }
            other => self.error_unexpected_token(self.loc, other),
        }
    }

    // Parse any identifier, including reserved words
    fn parse_identifier_name(&mut self) -> ParseResult<Option<Identifier>> {
        let name = match &self.token {
            Token::Identifier(name) => name.clone(),
            // All keywords can be used as an identifier name
            Token::Var
            | Token::Let
            | Token::Const
            | Token::Function
            | Token::Async
            | Token::This
            | Token::If
            | Token::Else
            | Token::Switch
            | Token::Case
            | Token::Default
            | Token::For
            | Token::Of
            | Token::While
            | Token::Do
            | Token::With
            | Token::Return
            | Token::Break
            | Token::Continue
            | Token::Try
            | Token::Catch
            | Token::Finally
            | Token::Throw
            | Token::Null
            | Token::True
            | Token::False
            | Token::In
            | Token::InstanceOf
            | Token::New
            | Token::Typeof
            | Token::Void
            | Token::Delete
            | Token::Debugger
            | Token::Static
            | Token::From
            | Token::As
            | Token::Class
            | Token::Extends
            | Token::Super
            | Token::Get
            | Token::Set
            | Token::Import
            | Token::Export
            | Token::Await
            | Token::Yield
            | Token::Enum => self.token.to_string(),
            _ => return Ok(None),
        };

        let loc = self.loc;
        self.advance()?;
        Ok(Some(Identifier { loc, name }))
    }

    fn parse_private_name(&mut self) -> ParseResult<Identifier> {
        let hash_loc = self.loc;
        self.expect(Token::Hash)?;

        // The name must immediately follow the hash with no whitespace
        match self.parse_identifier_name()? {
            Some(id) => {
                if id.loc.start != hash_loc.end {
                    return self.error_unexpected_token(id.loc, &Token::Hash);
                }

                Ok(id)
            }
            None => self.error_unexpected_token(self.loc, &self.token),
        }
    }

    fn parse_spread_element(&mut self, deferred: bool) -> ParseResult<SpreadElement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let argument = if deferred {
            self.parse_assignment_expression_deferred()?
        } else {
            self.parse_assignment_expression()?
        };

        let loc = self.mark_loc(start_pos);

        Ok(SpreadElement { loc, argument })
    }

    fn parse_array_expression(&mut self) -> ParseResult<P<Expression>> {
        self.with_in_allowed(Self::parse_array_expression_inner)
    }

    fn parse_array_expression_inner(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut elements = vec![];
        while self.token != Token::RightBracket {
            match self.token {
                Token::Comma => {
                    self.advance()?;
                    elements.push(ArrayElement::Hole);
                    continue;
                }
                Token::Spread => {
                    let spread = self.parse_spread_element(/* deferred */ true)?;
                    elements.push(ArrayElement::Spread(spread));

                    // A comma after a spread element is an error only if this
                    // array is later reinterpreted as a pattern.
                    if self.token == Token::Comma
                        && self.cover.rest_trailing_comma_loc.is_none()
                    {
                        self.cover.rest_trailing_comma_loc = Some(self.loc);
                    }
                }
                _ => {
                    elements.push(ArrayElement::Expression(
                        *self.parse_assignment_expression_deferred()?,
                    ));
                }
            }

            if self.token == Token::Comma {
                self.advance()?;
            } else {
                break;
            }
        }

        self.expect(Token::RightBracket)?;
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Array(ArrayExpression { loc, elements })))
    }

    fn parse_template_literal(&mut self, is_tagged: bool) -> ParseResult<TemplateLiteral> {
        let start_pos = self.current_start_pos();

        let mut quasis = vec![];
        let mut expressions = vec![];

        loop {
            let (raw, cooked, is_tail) = match &self.token {
                Token::TemplatePart { raw, cooked, is_tail, .. } => {
                    (raw.clone(), cooked.clone(), *is_tail)
                }
                _ => unreachable!("template literal parsing is driven by template part tokens"),
            };

            // An invalid escape sequence is only allowed in tagged templates,
            // where it produces a missing cooked value.
            let cooked = match cooked {
                Ok(value) => Some(value),
                Err(error_loc) => {
                    if !is_tagged {
                        return self.error(error_loc, ParseError::MalformedEscapeSeqence);
                    }

                    None
                }
            };

            quasis.push(TemplateElement { loc: self.loc, raw, cooked, is_tail });

            if is_tail {
                self.advance()?;
                break;
            }

            // Parse the substitution expression after the `${`
            self.advance()?;
            let expr = self.with_in_allowed(Self::parse_expression)?;
            expressions.push(*expr);

            if self.token != Token::RightBrace {
                return self.error_expected_token(self.loc, &self.token, &Token::RightBrace);
            }

            // The closing brace resumes the template literal, so rescan it as
            // a template part instead of advancing normally.
            let (token, loc) = self.lexer.next_template_part()?;
            self.prev_loc = self.loc;
            self.token = token;
            self.loc = loc;
        }

        let loc = self.mark_loc(start_pos);

        Ok(TemplateLiteral { loc, quasis, expressions })
    }
}

/// Object literal, property, and class parsing.
impl<'a> Parser<'a> {
    fn parse_object_expression(&mut self) -> ParseResult<P<Expression>> {
        self.with_in_allowed(Self::parse_object_expression_inner)
    }

    fn parse_object_expression_inner(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut properties = vec![];
        let mut has_proto = false;

        while self.token != Token::RightBrace {
            if self.token == Token::Spread {
                let spread = self.parse_spread_element(/* deferred */ true)?;
                let spread_property = Property {
                    loc: spread.loc,
                    key: spread.argument,
                    value: None,
                    is_computed: false,
                    is_method: false,
                    is_shorthand: false,
                    kind: PropertyKind::Spread,
                };
                properties.push(spread_property);
            } else {
                let (property, _) =
                    self.parse_property(PropertyContext::Object, /* is_static */ false)?;

                // A duplicate __proto__ property is an error unless this
                // object literal is reinterpreted as a pattern.
                if Self::is_proto_property(&property) {
                    if has_proto && self.cover.proto_loc.is_none() {
                        self.cover.proto_loc = Some(property.loc);
                    }
                    has_proto = true;
                }

                properties.push(property);
            }

            if self.token == Token::RightBrace {
                break;
            }

            self.expect(Token::Comma)?;
        }

        self.expect(Token::RightBrace)?;
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Object(ObjectExpression { loc, properties })))
    }

    fn is_proto_property(property: &Property) -> bool {
        if property.is_computed
            || property.is_method
            || property.is_shorthand
            || property.kind != PropertyKind::Init
        {
            return false;
        }

        match property.key.as_ref() {
            Expression::Id(id) => id.name == "__proto__",
            Expression::String(lit) => lit.value == "__proto__",
            _ => false,
        }
    }

    fn parse_property(
        &mut self,
        prop_context: PropertyContext,
        is_static: bool,
    ) -> ParseResult<(Property, bool)> {
        let start_pos = self.current_start_pos();

        // Handle getters and setters
        match self.token {
            Token::Get | Token::Set => {
                let id_loc = self.loc;
                let id_token = self.token.clone();
                let kind = if self.token == Token::Get {
                    PropertyKind::Get
                } else {
                    PropertyKind::Set
                };

                self.advance()?;

                // Handle `get` or `set` as the name of a method
                if self.token == Token::LeftParen {
                    let name =
                        p(Expression::Id(Identifier { loc: id_loc, name: id_token.to_string() }));
                    return self.parse_method_property(
                        name,
                        start_pos,
                        prop_context,
                        is_static,
                        PropertyKind::Init,
                        /* is_async */ false,
                        /* is_generator */ false,
                        /* is_computed */ false,
                        /* is_private */ false,
                    );
                }

                // Handle `get` or `set` as a shorthand or init property
                let is_init_property = self.is_property_initializer(prop_context);
                if is_init_property || self.is_property_end(prop_context) {
                    let name =
                        p(Expression::Id(Identifier { loc: id_loc, name: id_token.to_string() }));
                    return self.parse_init_property(
                        name,
                        start_pos,
                        prop_context,
                        /* is_computed */ false,
                        /* is_shorthand */ !is_init_property,
                        /* is_private */ false,
                    );
                }

                // Otherwise this is a getter or setter
                let property_name = self.parse_property_name(prop_context)?;
                return self.parse_method_property(
                    property_name.key,
                    start_pos,
                    prop_context,
                    is_static,
                    kind,
                    /* is_async */ false,
                    /* is_generator */ false,
                    property_name.is_computed,
                    property_name.is_private,
                );
            }
            _ => (),
        }

        // Async method (or method or property named async)
        if self.token == Token::Async && self.options.ecma_version.has_async_functions() {
            let async_loc = self.loc;
            self.advance()?;

            // Handle `async` as the name of a method: `async() {}`
            if self.token == Token::LeftParen {
                let name =
                    p(Expression::Id(Identifier { loc: async_loc, name: "async".to_owned() }));
                return self.parse_method_property(
                    name,
                    start_pos,
                    prop_context,
                    is_static,
                    PropertyKind::Init,
                    /* is_async */ false,
                    /* is_generator */ false,
                    /* is_computed */ false,
                    /* is_private */ false,
                );
            }

            // Handle `async` as a shorthand or init property
            let is_init_property = self.is_property_initializer(prop_context);
            if is_init_property || self.is_property_end(prop_context) {
                let name =
                    p(Expression::Id(Identifier { loc: async_loc, name: "async".to_owned() }));
                return self.parse_init_property(
                    name,
                    start_pos,
                    prop_context,
                    /* is_computed */ false,
                    /* is_shorthand */ !is_init_property,
                    /* is_private */ false,
                );
            }

            // An async method name must be on the same line as the async
            // modifier
            if self.lexer.is_new_line_before_current() {
                return self.error_unexpected_token(self.loc, &self.token);
            }

            // Async method may also be a generator
            let is_generator = self.token == Token::Multiply;
            if is_generator {
                self.advance()?;
            }

            let property_name = self.parse_property_name(prop_context)?;
            return self.parse_method_property(
                property_name.key,
                start_pos,
                prop_context,
                is_static,
                PropertyKind::Init,
                /* is_async */ true,
                is_generator,
                property_name.is_computed,
                property_name.is_private,
            );
        }

        // Generator method
        if self.token == Token::Multiply {
            self.advance()?;

            let property_name = self.parse_property_name(prop_context)?;
            return self.parse_method_property(
                property_name.key,
                start_pos,
                prop_context,
                is_static,
                PropertyKind::Init,
                /* is_async */ false,
                /* is_generator */ true,
                property_name.is_computed,
                property_name.is_private,
            );
        }

        // Regular init and method properties
        let property_name = self.parse_property_name(prop_context)?;

        match self.token {
            Token::LeftParen => self.parse_method_property(
                property_name.key,
                start_pos,
                prop_context,
                is_static,
                PropertyKind::Init,
                /* is_async */ false,
                /* is_generator */ false,
                property_name.is_computed,
                property_name.is_private,
            ),
            _ => self.parse_init_property(
                property_name.key,
                start_pos,
                prop_context,
                property_name.is_computed,
                property_name.is_shorthand,
                property_name.is_private,
            ),
        }
    }

    fn is_property_end(&mut self, prop_context: PropertyContext) -> bool {
        match prop_context {
            PropertyContext::Class => {
                self.token == Token::Semicolon
                    || self.token == Token::RightBrace
                    || self.lexer.is_new_line_before_current()
            }
            PropertyContext::Object => {
                self.token == Token::Comma || self.token == Token::RightBrace
            }
            PropertyContext::Pattern => {
                self.token == Token::Comma
                    || self.token == Token::RightBrace
                    || self.token == Token::Equals
            }
        }
    }

    fn is_property_initializer(&mut self, prop_context: PropertyContext) -> bool {
        let expected_token = self.get_property_initializer(prop_context);
        self.token == expected_token
    }

    fn get_property_initializer(&mut self, prop_context: PropertyContext) -> Token {
        match prop_context {
            PropertyContext::Class | PropertyContext::Pattern => Token::Equals,
            PropertyContext::Object => Token::Colon,
        }
    }

    fn parse_property_name(
        &mut self,
        prop_context: PropertyContext,
    ) -> ParseResult<PropertyNameResult> {
        let mut is_computed = false;
        let mut is_shorthand = false;
        let mut is_identifier = false;
        let mut is_private = false;

        let key = match &self.token {
            Token::LeftBracket => {
                self.advance()?;
                let expr = self.with_in_allowed(Self::parse_assignment_expression)?;
                self.expect(Token::RightBracket)?;
                is_computed = true;
                expr
            }
            Token::NumberLiteral(_) | Token::StringLiteral(_) | Token::BigIntLiteral(_) => {
                self.parse_primary_expression()?
            }
            // Private properties are only allowed in classes
            Token::Hash if prop_context == PropertyContext::Class => {
                is_private = true;
                p(Expression::Id(self.parse_private_name()?))
            }
            _ => match self.parse_identifier_name()? {
                Some(key) => {
                    is_identifier = true;
                    p(Expression::Id(key))
                }
                None => {
                    return self.error_unexpected_token(self.loc, &self.token);
                }
            },
        };

        // All non-private key types can be shorthand for classes, but only
        // identifier keys can be shorthand elsewhere. An object shorthand
        // property may also be followed by a default value initializer.
        if prop_context == PropertyContext::Class {
            is_shorthand = self.is_property_end(prop_context);
        } else if is_identifier {
            is_shorthand = self.is_property_end(prop_context)
                || (prop_context == PropertyContext::Object && self.token == Token::Equals);
        }

        Ok(PropertyNameResult { key, is_computed, is_shorthand, is_private })
    }

    fn parse_init_property(
        &mut self,
        key: P<Expression>,
        start_pos: Pos,
        prop_context: PropertyContext,
        is_computed: bool,
        is_shorthand: bool,
        is_private: bool,
    ) -> ParseResult<(Property, bool)> {
        let mut value = None;

        if is_shorthand {
            // A shorthand property with an initializer covers a pattern with
            // a default value, which is an error unless the object literal is
            // reinterpreted as a pattern.
            if prop_context == PropertyContext::Object && self.token == Token::Equals {
                // Shorthand keys with initializers are always identifiers
                let (id_loc, id_name) = match key.as_ref() {
                    Expression::Id(id) => (id.loc, id.name.clone()),
                    _ => unreachable!("shorthand properties have identifier keys"),
                };

                self.advance()?;
                let right = self.parse_assignment_expression()?;
                let loc = self.mark_loc(start_pos);

                if self.cover.shorthand_init_loc.is_none() {
                    self.cover.shorthand_init_loc = Some(loc);
                }

                value = Some(p(Expression::Assign(AssignmentExpression {
                    loc,
                    operator: AssignmentOperator::Equals,
                    left: p(Pattern::Id(Identifier { loc: id_loc, name: id_name })),
                    right,
                })));
            }

            // Shorthand properties in strict mode may not be reserved words,
            // checked here since the key was parsed as an identifier name.
            if prop_context == PropertyContext::Object {
                if let Expression::Id(id) = key.as_ref() {
                    self.check_shorthand_property_name(id)?;
                }
            }
        } else if self.is_property_initializer(prop_context) {
            self.advance()?;
            let expr = if prop_context == PropertyContext::Object {
                self.parse_assignment_expression_deferred()?
            } else {
                self.parse_assignment_expression()?
            };
            value = Some(expr);
        } else {
            let expected_token = self.get_property_initializer(prop_context);
            return self.error_expected_token(self.loc, &self.token, &expected_token);
        }

        let loc = self.mark_loc(start_pos);

        let property = Property {
            loc,
            key,
            value,
            is_computed,
            is_method: false,
            is_shorthand,
            kind: PropertyKind::Init,
        };

        Ok((property, is_private))
    }

    /// A shorthand property key doubles as an identifier reference, so it
    /// must not be a reserved word in the current context.
    fn check_shorthand_property_name(&mut self, id: &Identifier) -> ParseResult<()> {
        match classify_reserved_word(&id.name, self.options.ecma_version) {
            ReservedWordCategory::Always => {
                self.error(id.loc, ParseError::IdentifierIsReservedWord(id.name.clone()))
            }
            ReservedWordCategory::ModuleOnly if self.is_await_reserved() => {
                self.error(id.loc, ParseError::IdentifierIsReservedWord(id.name.clone()))
            }
            ReservedWordCategory::StrictOnly
                if self.in_strict_mode || (id.name == "yield" && self.allow_yield()) =>
            {
                self.error(id.loc, ParseError::IdentifierIsReservedWord(id.name.clone()))
            }
            _ => Ok(()),
        }
    }

    fn parse_method_property(
        &mut self,
        key: P<Expression>,
        start_pos: Pos,
        prop_context: PropertyContext,
        is_static: bool,
        kind: PropertyKind,
        is_async: bool,
        is_generator: bool,
        is_computed: bool,
        is_private: bool,
    ) -> ParseResult<(Property, bool)> {
        // Methods are not allowed in patterns
        if prop_context == PropertyContext::Pattern {
            return self.error_unexpected_token(self.loc, &Token::LeftParen);
        }

        // A non-static, non-computed method named constructor in a class is
        // the class constructor, which may call super in derived classes.
        // Accessor, async, and generator methods may not be constructors.
        let is_constructor_name = prop_context == PropertyContext::Class
            && !is_static
            && !is_computed
            && !is_private
            && Self::is_constructor_key(&key);

        let is_constructor = is_constructor_name
            && kind == PropertyKind::Init
            && !is_async
            && !is_generator;

        if is_constructor_name && !is_constructor {
            let loc = self.mark_loc(start_pos);
            return self.error(loc, ParseError::NonSimpleConstructor);
        }

        let saved_context = self.context;
        let saved_labels = std::mem::take(&mut self.labels);

        let mut context = ParseContext::IN_FUNCTION
            | ParseContext::ALLOW_NEW_TARGET
            | ParseContext::ALLOW_SUPER_PROPERTY;
        if is_async {
            context.insert(ParseContext::ALLOW_AWAIT);
        }
        if is_generator {
            context.insert(ParseContext::ALLOW_YIELD);
        }
        if is_constructor && *self.class_extends.last().unwrap_or(&false) {
            context.insert(ParseContext::ALLOW_SUPER_CALL);
        }
        self.context = context;

        self.scope_tree.enter_scope(ScopeNodeKind::Function);

        let result: ParseResult<_> = (|| {
            let params = self.parse_function_params()?;
            let (block, has_use_strict_directive, is_strict_mode) =
                self.parse_function_block_body()?;

            Ok((params, block, has_use_strict_directive, is_strict_mode))
        })();

        self.scope_tree.exit_scope();
        self.context = saved_context;
        self.labels = saved_labels;

        let (params, block, has_use_strict_directive, is_strict_mode) = result?;

        let body = p(FunctionBody::Block(block));
        let loc = self.mark_loc(start_pos);

        // Getters and setters have a fixed number of parameters
        match kind {
            PropertyKind::Get => {
                if !params.is_empty() {
                    return self.error(loc, ParseError::GetterWrongNumberOfParams);
                }
            }
            PropertyKind::Set => {
                let is_single_param =
                    params.len() == 1 && matches!(params[0], FunctionParam::Pattern(_));
                if !is_single_param {
                    return self.error(loc, ParseError::SetterWrongNumberOfParams);
                }
            }
            _ => {}
        }

        let func = Function::new(
            loc,
            /* id */ None,
            params,
            body,
            is_async,
            is_generator,
            is_strict_mode,
            has_use_strict_directive,
        );

        self.check_function_params(&func, Some(InvalidDuplicateParametersReason::Method))?;

        let property = Property {
            loc,
            key,
            is_computed,
            is_method: true,
            is_shorthand: false,
            kind,
            value: Some(p(Expression::Function(func))),
        };

        Ok((property, is_private))
    }

    fn is_constructor_key(key: &Expression) -> bool {
        match key {
            Expression::Id(id) => id.name == "constructor",
            Expression::String(str) => str.value == "constructor",
            _ => false,
        }
    }

    fn parse_class(&mut self, is_decl: bool, id_optional: bool) -> ParseResult<Class> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // Enter strict mode for the entire class, saving the strict mode
        // context from beforehand
        let old_in_strict_mode = self.in_strict_mode;
        self.set_strict_mode(true);

        let result = self.parse_class_in_strict_mode(start_pos, is_decl, id_optional);

        self.set_strict_mode(old_in_strict_mode);

        result
    }

    fn parse_class_in_strict_mode(
        &mut self,
        start_pos: Pos,
        is_decl: bool,
        id_optional: bool,
    ) -> ParseResult<Class> {
        // Id is optional only for class expressions and default exports
        let id = if self.token != Token::LeftBrace && self.token != Token::Extends {
            Some(p(self.parse_binding_identifier()?))
        } else if is_decl && !id_optional {
            // Declarations require a name, so force the error
            Some(p(self.parse_binding_identifier()?))
        } else {
            None
        };

        // Declarations bind their name as a lexical binding in the enclosing
        // scope
        if is_decl {
            if let Some(id) = &id {
                if let Err(error) = self.scope_tree.add_binding(&id.name, BindingKind::Class) {
                    return self.error(id.loc, error);
                }
            }
        }

        // The private names of a class are in scope for the entire class
        // tail, including the heritage clause.
        self.private_names
            .push(PrivateNameScope { defined: IndexMap::new(), used: vec![] });

        let super_class = if self.token == Token::Extends {
            self.advance()?;
            Some(self.parse_left_hand_side_expression()?)
        } else {
            None
        };

        self.class_extends.push(super_class.is_some());

        let result = self.parse_class_body();

        self.class_extends.pop();
        let pop_result = self.pop_private_name_scope();

        let body = result?;
        pop_result?;

        let loc = self.mark_loc(start_pos);

        Ok(Class::new(loc, id, super_class, body))
    }

    fn parse_class_body(&mut self) -> ParseResult<Vec<ClassElement>> {
        let mut body = vec![];
        let mut has_constructor = false;

        self.expect(Token::LeftBrace)?;
        while self.token != Token::RightBrace {
            // Empty semicolon statements are allowed in class bodies
            if self.token == Token::Semicolon {
                self.advance()?;
                continue;
            }

            let element = self.parse_class_element()?;

            // Only a single constructor is allowed per class
            if let ClassElement::Method(method) = &element {
                if method.kind == ClassMethodKind::Constructor {
                    if has_constructor {
                        return self.error(method.loc, ParseError::MultipleConstructors);
                    }
                    has_constructor = true;
                }
            }

            self.check_class_element(&element)?;
            self.register_class_element_private_name(&element)?;

            body.push(element);
        }

        self.advance()?;

        Ok(body)
    }

    fn check_class_element(&mut self, element: &ClassElement) -> ParseResult<()> {
        match element {
            ClassElement::Method(method) => {
                // Static methods may not be named prototype
                if method.is_static && !method.is_computed {
                    if Self::is_key_with_name(&method.key, "prototype") {
                        return self.error(method.loc, ParseError::ClassStaticPrototype);
                    }
                }
            }
            ClassElement::Property(property) => {
                if !property.is_computed {
                    // No field may be named constructor
                    if !property.is_private
                        && Self::is_constructor_key(&property.key)
                    {
                        return self.error(property.loc, ParseError::FieldNamedConstructor);
                    }

                    // Static fields may not be named prototype
                    if property.is_static && Self::is_key_with_name(&property.key, "prototype") {
                        return self.error(property.loc, ParseError::ClassStaticPrototype);
                    }
                }
            }
        }

        Ok(())
    }

    fn is_key_with_name(key: &Expression, name: &str) -> bool {
        match key {
            Expression::Id(id) => id.name == name,
            Expression::String(str) => str.value == name,
            _ => false,
        }
    }

    fn register_class_element_private_name(&mut self, element: &ClassElement) -> ParseResult<()> {
        let (key, kind, is_static, loc) = match element {
            ClassElement::Method(method) if method.is_private => {
                let kind = match method.kind {
                    ClassMethodKind::Get => PrivateNameKind::Getter,
                    ClassMethodKind::Set => PrivateNameKind::Setter,
                    _ => PrivateNameKind::Other,
                };

                (&method.key, kind, method.is_static, method.loc)
            }
            ClassElement::Property(property) if property.is_private => {
                (&property.key, PrivateNameKind::Other, property.is_static, property.loc)
            }
            _ => return Ok(()),
        };

        let name = key.to_id().name.clone();
        self.declare_private_name(&name, kind, is_static, loc)
    }

    fn parse_class_element(&mut self) -> ParseResult<ClassElement> {
        let start_pos = self.current_start_pos();

        // Every class element can start with a `static` modifier
        let is_static = self.token == Token::Static;
        if is_static {
            let static_loc = self.loc;
            self.advance()?;

            // A static block: static { ... }
            if self.token == Token::LeftBrace
                && self.options.ecma_version.has_static_blocks()
            {
                return self.parse_class_static_block(start_pos);
            }

            // Handle `static` as the name of a method: `static() {}`
            if self.token == Token::LeftParen {
                let name =
                    p(Expression::Id(Identifier { loc: static_loc, name: "static".to_owned() }));

                let (property, is_private) = self.parse_method_property(
                    name,
                    start_pos,
                    PropertyContext::Class,
                    /* is_static */ false,
                    PropertyKind::Init,
                    /* is_async */ false,
                    /* is_generator */ false,
                    /* is_computed */ false,
                    /* is_private */ false,
                )?;
                let loc = self.mark_loc(start_pos);

                return Ok(ClassElement::Method(self.reparse_property_as_class_method(
                    loc, property, /* is_static */ false, is_private,
                )));
            }

            // Handle `static` as a shorthand or init property
            let is_init_property = self.is_property_initializer(PropertyContext::Class);
            if is_init_property || self.is_property_end(PropertyContext::Class) {
                let name =
                    p(Expression::Id(Identifier { loc: static_loc, name: "static".to_owned() }));

                let (property, is_private) = self.parse_class_init_property(
                    name,
                    start_pos,
                    /* is_computed */ false,
                    /* is_shorthand */ !is_init_property,
                    /* is_private */ false,
                )?;
                let loc = self.mark_loc(start_pos);

                return Ok(ClassElement::Property(self.reparse_property_as_class_property(
                    loc, property, /* is_static */ false, is_private,
                )));
            }
        }

        // Parse an object property because the syntax is almost identical to
        // a class property
        let (property, is_private) = if self.is_class_method_start()? {
            self.parse_property(PropertyContext::Class, is_static)?
        } else {
            // Class fields parse their initializer in a field initializer
            // context
            let property_name = self.parse_property_name(PropertyContext::Class)?;

            match self.token {
                Token::LeftParen => self.parse_method_property(
                    property_name.key,
                    start_pos,
                    PropertyContext::Class,
                    is_static,
                    PropertyKind::Init,
                    /* is_async */ false,
                    /* is_generator */ false,
                    property_name.is_computed,
                    property_name.is_private,
                )?,
                _ => self.parse_class_init_property(
                    property_name.key,
                    start_pos,
                    property_name.is_computed,
                    property_name.is_shorthand,
                    property_name.is_private,
                )?,
            }
        };

        let loc = self.mark_loc(start_pos);

        // Translate from object property to class property or method
        if property.is_method {
            Ok(ClassElement::Method(
                self.reparse_property_as_class_method(loc, property, is_static, is_private),
            ))
        } else {
            Ok(ClassElement::Property(
                self.reparse_property_as_class_property(loc, property, is_static, is_private),
            ))
        }
    }

    /// Whether the current class element must be a method, meaning it starts
    /// with a get, set, async, or generator modifier.
    fn is_class_method_start(&mut self) -> ParseResult<bool> {
        match self.token {
            Token::Multiply => Ok(true),
            Token::Get | Token::Set | Token::Async => {
                let save_state = self.save();
                self.advance()?;

                // A modifier followed by a property end or initializer is
                // actually a property named get, set, or async
                let is_modifier = !self.is_property_end(PropertyContext::Class)
                    && !self.is_property_initializer(PropertyContext::Class)
                    && self.token != Token::LeftParen;

                self.restore(save_state);

                Ok(is_modifier)
            }
            _ => Ok(false),
        }
    }

    /// A class field, whose optional initializer is parsed in a class field
    /// initializer context.
    fn parse_class_init_property(
        &mut self,
        key: P<Expression>,
        start_pos: Pos,
        is_computed: bool,
        is_shorthand: bool,
        is_private: bool,
    ) -> ParseResult<(Property, bool)> {
        if !self.options.ecma_version.has_class_fields() {
            let loc = self.mark_loc(start_pos);
            return self.error(loc, ParseError::UnsupportedFeature("class fields"));
        }

        let mut value = None;

        if !is_shorthand && self.token == Token::Equals {
            self.advance()?;

            // Field initializers have their own function-like context where
            // await and yield are reserved but super properties and
            // new.target are allowed.
            let saved_context = self.context;
            let saved_labels = std::mem::take(&mut self.labels);
            self.context = ParseContext::ALLOW_NEW_TARGET
                | ParseContext::ALLOW_SUPER_PROPERTY
                | ParseContext::IN_CLASS_INITIALIZER;

            let result = self.parse_assignment_expression();

            self.context = saved_context;
            self.labels = saved_labels;

            value = Some(result?);
        }

        self.expect_semicolon()?;
        let loc = self.mark_loc(start_pos);

        let property = Property {
            loc,
            key,
            value,
            is_computed,
            is_method: false,
            is_shorthand,
            kind: PropertyKind::Init,
        };

        Ok((property, is_private))
    }

    /// A class static initializer block: static { ... }
    fn parse_class_static_block(&mut self, start_pos: Pos) -> ParseResult<ClassElement> {
        let saved_context = self.context;
        let saved_labels = std::mem::take(&mut self.labels);

        // Static blocks allow super properties and new.target but not return
        // statements, and await is reserved.
        self.context = ParseContext::ALLOW_NEW_TARGET
            | ParseContext::ALLOW_SUPER_PROPERTY
            | ParseContext::IN_CLASS_INITIALIZER;

        self.scope_tree.enter_scope(ScopeNodeKind::Function);
        let result = self.parse_block_in_current_scope();
        self.scope_tree.exit_scope();

        self.context = saved_context;
        self.labels = saved_labels;

        let block = result?;
        let loc = self.mark_loc(start_pos);

        // Static initializers are represented as methods whose function holds
        // the block body. All fields except for the kind and the function's
        // body are placeholders.
        Ok(ClassElement::Method(ClassMethod {
            loc,
            key: p(Expression::Null(loc)),
            value: p(Function::new(
                loc,
                None,
                vec![],
                p(FunctionBody::Block(block)),
                /* is_async */ false,
                /* is_generator */ false,
                /* is_strict_mode */ true,
                /* has_use_strict_directive */ false,
            )),
            kind: ClassMethodKind::StaticInitializer,
            is_computed: false,
            is_static: true,
            is_private: false,
        }))
    }

    fn reparse_property_as_class_method(
        &mut self,
        loc: Loc,
        property: Property,
        is_static: bool,
        is_private: bool,
    ) -> ClassMethod {
        let Property { key, value, is_computed, kind, .. } = property;

        let func_value = if let Expression::Function(func) = *value.unwrap() {
            p(func)
        } else {
            unreachable!("method properties must have function expression values")
        };

        let kind = match kind {
            PropertyKind::Get => ClassMethodKind::Get,
            PropertyKind::Set => ClassMethodKind::Set,
            PropertyKind::Init if is_static => ClassMethodKind::Method,
            PropertyKind::Init => {
                // Any non-computed, non-private method named constructor is
                // the class constructor
                let is_constructor_key = Self::is_constructor_key(&key);

                if is_constructor_key && !is_static && !is_computed && !is_private {
                    ClassMethodKind::Constructor
                } else {
                    ClassMethodKind::Method
                }
            }
            PropertyKind::Spread => unreachable!("spread element cannot appear in class"),
        };

        ClassMethod { loc, key, value: func_value, kind, is_computed, is_static, is_private }
    }

    fn reparse_property_as_class_property(
        &mut self,
        loc: Loc,
        property: Property,
        is_static: bool,
        is_private: bool,
    ) -> ClassProperty {
        let Property { key, value, is_computed, .. } = property;

        ClassProperty { loc, key, value, is_computed, is_static, is_private }
    }
}

/// Binding patterns and reinterpretation of expressions as patterns.
impl<'a> Parser<'a> {
    fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        match &self.token {
            Token::LeftBracket => self.parse_array_pattern(),
            Token::LeftBrace => self.parse_object_pattern(),
            _ => Ok(Pattern::Id(self.parse_binding_identifier()?)),
        }
    }

    fn parse_pattern_including_assignment_pattern(&mut self) -> ParseResult<Pattern> {
        let start_pos = self.current_start_pos();
        let patt = self.parse_pattern()?;
        self.parse_assignment_pattern(patt, start_pos)
    }

    /// Parse an assignment pattern if one exists, otherwise return the left
    /// hand side
    fn parse_assignment_pattern(&mut self, left: Pattern, start_pos: Pos) -> ParseResult<Pattern> {
        // If followed by an equals sign, this is an assignment pattern
        match self.token {
            Token::Equals => {
                self.advance()?;
                let right = self.with_in_allowed(Self::parse_assignment_expression)?;
                let loc = self.mark_loc(start_pos);

                Ok(Pattern::Assign(AssignmentPattern { loc, left: p(left), right }))
            }
            _ => Ok(left),
        }
    }

    fn parse_array_pattern(&mut self) -> ParseResult<Pattern> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut elements = vec![];
        while self.token != Token::RightBracket {
            if self.token == Token::Comma {
                self.advance()?;
                elements.push(ArrayPatternElement::Hole);
                continue;
            }

            if self.token == Token::Spread {
                let rest = self.parse_rest_element()?;
                elements.push(ArrayPatternElement::Rest(rest));

                // Rest element must be the last element and may not be
                // followed by a trailing comma
                if self.token == Token::Comma {
                    if self.peek_ahead_is(Token::RightBracket)? {
                        return self.error(self.loc, ParseError::RestTrailingComma);
                    } else {
                        return self.error(self.loc, ParseError::RestElementNotLast);
                    }
                }

                break;
            }

            elements.push(ArrayPatternElement::Pattern(
                self.parse_pattern_including_assignment_pattern()?,
            ));

            if self.token == Token::Comma {
                self.advance()?;
            } else {
                break;
            }
        }

        self.expect(Token::RightBracket)?;
        let loc = self.mark_loc(start_pos);

        Ok(Pattern::Array(ArrayPattern { loc, elements }))
    }

    fn peek_ahead_is(&mut self, token: Token) -> ParseResult<bool> {
        let save_state = self.save();
        self.advance()?;
        let matches = self.token == token;
        self.restore(save_state);

        Ok(matches)
    }

    fn parse_object_pattern(&mut self) -> ParseResult<Pattern> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut properties = vec![];
        while self.token != Token::RightBrace {
            if self.token == Token::Spread {
                properties.push(self.parse_object_pattern_rest_property()?);

                // Rest property must be the last property
                if self.token == Token::Comma {
                    if self.peek_ahead_is(Token::RightBrace)? {
                        return self.error(self.loc, ParseError::RestTrailingComma);
                    } else {
                        return self.error(self.loc, ParseError::RestElementNotLast);
                    }
                }

                break;
            }

            properties.push(self.parse_object_pattern_property()?);

            if self.token == Token::RightBrace {
                break;
            }

            self.expect(Token::Comma)?;
        }

        self.expect(Token::RightBrace)?;
        let loc = self.mark_loc(start_pos);

        Ok(Pattern::Object(ObjectPattern { loc, properties }))
    }

    fn parse_object_pattern_property(&mut self) -> ParseResult<ObjectPatternProperty> {
        let start_pos = self.current_start_pos();

        let property_name = self.parse_property_name(PropertyContext::Pattern)?;

        // Shorthand property
        if property_name.is_shorthand {
            let value = if let Expression::Id(id) = *property_name.key {
                // The shorthand name is a binding so the usual binding
                // restrictions apply
                self.check_binding_identifier_name(&id)?;
                Pattern::Id(id)
            } else {
                return self.error_expected_token(self.loc, &self.token, &Token::Colon);
            };

            // Shorthand property may be followed by an assignment pattern
            let value = p(self.parse_assignment_pattern(value, start_pos)?);
            let loc = self.mark_loc(start_pos);

            return Ok(ObjectPatternProperty {
                loc,
                key: None,
                value,
                is_computed: false,
                is_rest: false,
            });
        }

        // Regular properties
        self.expect(Token::Colon)?;
        let value = p(self.parse_pattern_including_assignment_pattern()?);
        let loc = self.mark_loc(start_pos);

        Ok(ObjectPatternProperty {
            loc,
            key: Some(property_name.key),
            value,
            is_computed: property_name.is_computed,
            is_rest: false,
        })
    }

    fn parse_object_pattern_rest_property(&mut self) -> ParseResult<ObjectPatternProperty> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // An object rest element can only bind a single identifier
        let id = self.parse_binding_identifier()?;

        if self.token == Token::Equals {
            return self.error(self.loc, ParseError::RestElementInitializer);
        }

        let loc = self.mark_loc(start_pos);

        Ok(ObjectPatternProperty {
            loc,
            key: None,
            value: p(Pattern::Id(id)),
            is_computed: false,
            is_rest: true,
        })
    }

    /// A binding identifier parsed through another production must still obey
    /// the binding restrictions.
    fn check_binding_identifier_name(&mut self, id: &Identifier) -> ParseResult<()> {
        if self.in_strict_mode && (id.name == "eval" || id.name == "arguments") {
            return self.error(id.loc, ParseError::BindRestrictedNameInStrictMode(id.name.clone()));
        }

        Ok(())
    }

    /// Reinterpret an already parsed expression as a pattern, used to resolve
    /// cover grammars once an assignment or for each left hand side is
    /// discovered. Deferred cover errors within converted object literals are
    /// discarded.
    fn reparse_expression_as_pattern(
        &mut self,
        expr: Expression,
        pattern_context: PatternContext,
    ) -> ParseResult<Pattern> {
        match expr {
            Expression::Id(id) => {
                if self.in_strict_mode {
                    if id.name == "eval" {
                        return self.error(id.loc, ParseError::AssignEvalInStrictMode);
                    } else if id.name == "arguments" {
                        return self.error(id.loc, ParseError::AssignArgumentsInStrictMode);
                    }
                }

                Ok(Pattern::Id(id))
            }
            Expression::Member(member) => {
                // Optional member accesses are not valid targets
                if member.is_optional {
                    self.error(member.loc, ParseError::InvalidAssignmentLeftHandSide)
                } else {
                    Ok(Pattern::Member(member))
                }
            }
            Expression::SuperMember(member) => Ok(Pattern::SuperMember(member)),
            Expression::Array(array) => self.reparse_array_expression_as_pattern(array),
            Expression::Object(object) => self.reparse_object_expression_as_pattern(object),
            Expression::Assign(assign) if assign.operator == AssignmentOperator::Equals => {
                let loc = assign.loc;
                let left = *assign.left;
                let right = assign.right;

                // The target of the inner assignment was already validated
                // as a pattern
                Ok(Pattern::Assign(AssignmentPattern { loc, left: p(left), right }))
            }
            Expression::Paren(paren) => {
                // Only simple targets may be parenthesized
                match *paren.expression {
                    Expression::Id(_) | Expression::Member(_) | Expression::SuperMember(_) => {
                        self.reparse_expression_as_pattern(*paren.expression, pattern_context)
                    }
                    other => self.error(other.loc(), ParseError::InvalidAssignmentLeftHandSide),
                }
            }
            other => self.error(other.loc(), ParseError::InvalidAssignmentLeftHandSide),
        }
    }

    fn reparse_array_expression_as_pattern(
        &mut self,
        array: ArrayExpression,
    ) -> ParseResult<Pattern> {
        // A trailing comma after a spread element was deferred while parsing
        // the array literal, and is an error now that this is a pattern.
        if let Some(comma_loc) = self.cover.rest_trailing_comma_loc {
            if array.loc.contains(comma_loc) {
                return self.error(comma_loc, ParseError::RestTrailingComma);
            }
        }

        let num_elements = array.elements.len();
        let mut elements = vec![];

        for (i, element) in array.elements.into_iter().enumerate() {
            let element = match element {
                ArrayElement::Expression(expr) => ArrayPatternElement::Pattern(
                    self.reparse_expression_as_pattern(expr, PatternContext::Assignment)?,
                ),
                ArrayElement::Spread(spread) => {
                    // Rest element must be the last element, and may not have
                    // a default value
                    if i != num_elements - 1 {
                        return self.error(spread.loc, ParseError::RestElementNotLast);
                    }

                    if let Expression::Assign(_) = spread.argument.as_ref() {
                        return self.error(spread.loc, ParseError::RestElementInitializer);
                    }

                    let argument = self
                        .reparse_expression_as_pattern(*spread.argument, PatternContext::Assignment)?;

                    ArrayPatternElement::Rest(RestElement {
                        loc: spread.loc,
                        argument: p(argument),
                    })
                }
                ArrayElement::Hole => ArrayPatternElement::Hole,
            };

            elements.push(element);
        }

        Ok(Pattern::Array(ArrayPattern { loc: array.loc, elements }))
    }

    fn reparse_object_expression_as_pattern(
        &mut self,
        object: ObjectExpression,
    ) -> ParseResult<Pattern> {
        // Deferred duplicate __proto__ and shorthand initializer errors are
        // valid in patterns
        self.clear_cover_errors_within(object.loc);

        let num_properties = object.properties.len();
        let mut properties = vec![];

        for (i, property) in object.properties.into_iter().enumerate() {
            let property = match property.kind {
                PropertyKind::Spread => {
                    // Rest property must be the last property and can only
                    // target an identifier or member expression
                    if i != num_properties - 1 {
                        return self.error(property.loc, ParseError::RestElementNotLast);
                    }

                    let target = self
                        .reparse_expression_as_pattern(*property.key, PatternContext::Assignment)?;

                    if !matches!(target, Pattern::Id(_) | Pattern::Member(_)) {
                        return self
                            .error(property.loc, ParseError::InvalidAssignmentLeftHandSide);
                    }

                    ObjectPatternProperty {
                        loc: property.loc,
                        key: None,
                        value: p(target),
                        is_computed: false,
                        is_rest: true,
                    }
                }
                PropertyKind::Init if !property.is_method => {
                    match property.value {
                        // A shorthand property binds its key as the target,
                        // optionally with a default value from the cover
                        // grammar.
                        None => {
                            let id = match *property.key {
                                Expression::Id(id) => id,
                                _ => {
                                    return self.error(
                                        property.loc,
                                        ParseError::InvalidAssignmentLeftHandSide,
                                    );
                                }
                            };

                            if self.in_strict_mode
                                && (id.name == "eval" || id.name == "arguments")
                            {
                                return self.error(
                                    id.loc,
                                    ParseError::BindRestrictedNameInStrictMode(id.name),
                                );
                            }

                            ObjectPatternProperty {
                                loc: property.loc,
                                key: None,
                                value: p(Pattern::Id(id)),
                                is_computed: false,
                                is_rest: false,
                            }
                        }
                        Some(value) => {
                            let value = self
                                .reparse_expression_as_pattern(*value, PatternContext::Assignment)?;

                            let key = if property.is_shorthand {
                                None
                            } else {
                                Some(property.key)
                            };

                            ObjectPatternProperty {
                                loc: property.loc,
                                key,
                                value: p(value),
                                is_computed: property.is_computed,
                                is_rest: false,
                            }
                        }
                    }
                }
                _ => {
                    // Methods, getters, and setters are never valid targets
                    return self.error(property.loc, ParseError::InvalidAssignmentLeftHandSide);
                }
            };

            properties.push(property);
        }

        Ok(Pattern::Object(ObjectPattern { loc: object.loc, properties }))
    }

    /// Reinterpret an expression as the simple target of a compound
    /// assignment, which may only be an identifier or member access.
    fn reparse_expression_as_simple_target(&mut self, expr: Expression) -> ParseResult<Pattern> {
        match expr {
            Expression::Id(_) | Expression::Member(_) | Expression::SuperMember(_) => {
                self.reparse_expression_as_pattern(expr, PatternContext::Assignment)
            }
            Expression::Paren(paren) => self.reparse_expression_as_simple_target(*paren.expression),
            other => self.error(other.loc(), ParseError::InvalidAssignmentLeftHandSide),
        }
    }
}

/// Module import and export parsing.
impl<'a> Parser<'a> {
    fn parse_import_declaration(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // A bare import of a module for its side effects
        if let Token::StringLiteral(_) = &self.token {
            let source = p(self.parse_module_source()?);
            let attributes = self.parse_import_attributes()?;
            self.expect_semicolon()?;
            let loc = self.mark_loc(start_pos);

            return Ok(Statement::Import(ImportDeclaration {
                loc,
                specifiers: vec![],
                source,
                attributes,
            }));
        }

        let mut specifiers = vec![];

        // An optional default import binding
        let has_default = !matches!(self.token, Token::Multiply | Token::LeftBrace);
        if has_default {
            let spec_start_pos = self.current_start_pos();
            let local = p(self.parse_imported_binding()?);
            let loc = self.mark_loc(spec_start_pos);

            specifiers.push(ImportSpecifier::Default(ImportDefaultSpecifier { loc, local }));

            if self.token == Token::Comma {
                self.advance()?;
            } else if self.token != Token::From {
                return self.error_expected_token(self.loc, &self.token, &Token::From);
            }
        }

        match self.token {
            // A namespace import: * as name
            Token::Multiply => {
                let spec_start_pos = self.current_start_pos();
                self.advance()?;
                self.expect(Token::As)?;
                let local = p(self.parse_imported_binding()?);
                let loc = self.mark_loc(spec_start_pos);

                specifiers.push(ImportSpecifier::Namespace(ImportNamespaceSpecifier {
                    loc,
                    local,
                }));
            }
            // Named imports: { a, b as c, "d" as e }
            Token::LeftBrace => {
                self.advance()?;

                while self.token != Token::RightBrace {
                    specifiers.push(self.parse_import_named_specifier()?);

                    if self.token == Token::Comma {
                        self.advance()?;
                    } else {
                        break;
                    }
                }

                self.expect(Token::RightBrace)?;
            }
            _ if has_default => {}
            _ => return self.error_unexpected_token(self.loc, &self.token),
        }

        self.expect(Token::From)?;
        let source = p(self.parse_module_source()?);
        let attributes = self.parse_import_attributes()?;
        self.expect_semicolon()?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::Import(ImportDeclaration { loc, specifiers, source, attributes }))
    }

    fn parse_import_named_specifier(&mut self) -> ParseResult<ImportSpecifier> {
        let start_pos = self.current_start_pos();

        let imported = self.parse_module_export_name()?;

        let local = if self.token == Token::As {
            self.advance()?;
            Some(p(self.parse_imported_binding()?))
        } else {
            // Without an `as` clause the imported name doubles as the local
            // binding, so it must be a valid binding identifier.
            match &imported {
                ModuleExportName::Id(id) => {
                    let id = Identifier { loc: id.loc, name: id.name.clone() };
                    self.check_imported_binding(&id)?;
                    None
                }
                ModuleExportName::String(lit) => {
                    return self.error_expected_token(lit.loc, &self.token, &Token::As);
                }
            }
        };

        let loc = self.mark_loc(start_pos);

        Ok(ImportSpecifier::Named(ImportNamedSpecifier { loc, imported: p(imported), local }))
    }

    /// A module export name is either an identifier name or a string literal.
    fn parse_module_export_name(&mut self) -> ParseResult<ModuleExportName> {
        match &self.token {
            Token::StringLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(ModuleExportName::String(StringLiteral { loc, value }))
            }
            _ => match self.parse_identifier_name()? {
                Some(id) => Ok(ModuleExportName::Id(id)),
                None => self.error_unexpected_token(self.loc, &self.token),
            },
        }
    }

    fn parse_imported_binding(&mut self) -> ParseResult<Identifier> {
        let id = self.parse_binding_identifier()?;
        self.check_imported_binding(&id)?;

        Ok(id)
    }

    fn check_imported_binding(&mut self, id: &Identifier) -> ParseResult<()> {
        if let Err(error) = self.scope_tree.add_binding(&id.name, BindingKind::Import) {
            return self.error(id.loc, error);
        }

        Ok(())
    }

    fn parse_module_source(&mut self) -> ParseResult<StringLiteral> {
        match &self.token {
            Token::StringLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(StringLiteral { loc, value })
            }
            other => self.error_expected_token(
                self.loc,
                other,
                &Token::StringLiteral(String::new()),
            ),
        }
    }

    /// Import attributes following a module source, introduced by `with` or
    /// the legacy `assert` keyword on the same line.
    fn parse_import_attributes(&mut self) -> ParseResult<Vec<ImportAttribute>> {
        if !self.options.ecma_version.has_import_attributes() {
            return Ok(vec![]);
        }

        let is_attributes_start = match &self.token {
            Token::With => true,
            Token::Identifier(name) => {
                name == "assert" && !self.lexer.is_new_line_before_current()
            }
            _ => false,
        };

        if !is_attributes_start {
            return Ok(vec![]);
        }

        self.advance()?;
        self.expect(Token::LeftBrace)?;

        let mut attributes = vec![];
        let mut seen_keys = HashSet::new();

        while self.token != Token::RightBrace {
            let start_pos = self.current_start_pos();

            // Attribute keys are identifier names or string literals
            let (key, key_name) = match &self.token {
                Token::StringLiteral(value) => {
                    let loc = self.loc;
                    let value = value.clone();
                    self.advance()?;
                    (p(Expression::String(StringLiteral { loc, value: value.clone() })), value)
                }
                _ => match self.parse_identifier_name()? {
                    Some(id) => {
                        let name = id.name.clone();
                        (p(Expression::Id(id)), name)
                    }
                    None => return self.error_unexpected_token(self.loc, &self.token),
                },
            };

            if !seen_keys.insert(key_name.clone()) {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::DuplicateImportAttribute(key_name));
            }

            self.expect(Token::Colon)?;

            let value = p(self.parse_module_source()?);
            let loc = self.mark_loc(start_pos);

            attributes.push(ImportAttribute { loc, key, value });

            if self.token == Token::Comma {
                self.advance()?;
            } else {
                break;
            }
        }

        self.expect(Token::RightBrace)?;

        Ok(attributes)
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // export function f() {} and export async function f() {}
        if self.is_function_start()? {
            let func = self.parse_function_declaration()?;

            if let Some(id) = &func.id {
                let name = id.name.clone();
                let id_loc = id.loc;
                self.add_export_name(name, id_loc)?;
            }

            let loc = self.mark_loc(start_pos);

            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                loc,
                declaration: Some(p(Statement::FuncDecl(func))),
                specifiers: vec![],
                source: None,
                attributes: vec![],
            }));
        }

        match self.token {
            // export * from "source" and export * as name from "source"
            Token::Multiply => {
                self.advance()?;

                let exported = if self.token == Token::As {
                    self.advance()?;
                    let exported = self.parse_module_export_name()?;
                    self.add_export_name(exported.name().to_owned(), exported.loc())?;
                    Some(p(exported))
                } else {
                    None
                };

                self.expect(Token::From)?;
                let source = p(self.parse_module_source()?);
                let attributes = self.parse_import_attributes()?;
                self.expect_semicolon()?;
                let loc = self.mark_loc(start_pos);

                Ok(Statement::ExportAll(ExportAllDeclaration { loc, exported, source, attributes }))
            }
            // export { spec, ... } with an optional source
            Token::LeftBrace => {
                self.advance()?;

                let mut specifiers = vec![];
                while self.token != Token::RightBrace {
                    specifiers.push(self.parse_export_specifier()?);

                    if self.token == Token::Comma {
                        self.advance()?;
                    } else {
                        break;
                    }
                }

                self.expect(Token::RightBrace)?;

                let (source, attributes) = if self.token == Token::From {
                    self.advance()?;
                    let source = p(self.parse_module_source()?);
                    let attributes = self.parse_import_attributes()?;
                    (Some(source), attributes)
                } else {
                    (None, vec![])
                };

                // Register the exported names, and without a source the local
                // names must resolve to module scope bindings.
                for specifier in &specifiers {
                    let exported = match &specifier.exported {
                        Some(exported) => exported,
                        None => &specifier.local,
                    };
                    self.add_export_name(exported.name().to_owned(), exported.loc())?;

                    if source.is_none() {
                        // String literal locals require a source
                        if let ModuleExportName::String(lit) = specifier.local.as_ref() {
                            let token = Token::StringLiteral(lit.value.clone());
                            return self.error(lit.loc, ParseError::UnexpectedToken(token));
                        }

                        self.exported_local_names
                            .push((specifier.local.name().to_owned(), specifier.local.loc()));
                    }
                }

                self.expect_semicolon()?;
                let loc = self.mark_loc(start_pos);

                Ok(Statement::ExportNamed(ExportNamedDeclaration {
                    loc,
                    declaration: None,
                    specifiers,
                    source,
                    attributes,
                }))
            }
            // export default, either a hoistable declaration or an expression
            Token::Default => {
                let default_loc = self.loc;
                self.advance()?;

                self.add_export_name("default".to_owned(), default_loc)?;

                let declaration = if self.is_function_start()? {
                    ExportDefaultKind::Function(p(self.parse_function(true, true)?))
                } else if self.token == Token::Class {
                    ExportDefaultKind::Class(p(self.parse_class(true, true)?))
                } else {
                    let expr = self.parse_assignment_expression()?;
                    self.expect_semicolon()?;
                    ExportDefaultKind::Expression(expr)
                };

                let loc = self.mark_loc(start_pos);

                Ok(Statement::ExportDefault(ExportDefaultDeclaration { loc, declaration }))
            }
            // export of a declaration
            Token::Var | Token::Let | Token::Const => {
                let var_decl = self.parse_variable_declaration(false)?;

                let mut bound_names = vec![];
                var_decl.iter_bound_names(&mut |id| bound_names.push((id.name.clone(), id.loc)));
                for (name, loc) in bound_names {
                    self.add_export_name(name, loc)?;
                }

                let loc = self.mark_loc(start_pos);

                Ok(Statement::ExportNamed(ExportNamedDeclaration {
                    loc,
                    declaration: Some(p(Statement::VarDecl(var_decl))),
                    specifiers: vec![],
                    source: None,
                    attributes: vec![],
                }))
            }
            Token::Class => {
                let class = self.parse_class(true, false)?;

                if let Some(id) = &class.id {
                    let name = id.name.clone();
                    let id_loc = id.loc;
                    self.add_export_name(name, id_loc)?;
                }

                let loc = self.mark_loc(start_pos);

                Ok(Statement::ExportNamed(ExportNamedDeclaration {
                    loc,
                    declaration: Some(p(Statement::ClassDecl(class))),
                    specifiers: vec![],
                    source: None,
                    attributes: vec![],
                }))
            }
            _ => self.error_unexpected_token(self.loc, &self.token),
        }
    }

    fn parse_export_specifier(&mut self) -> ParseResult<ExportSpecifier> {
        let start_pos = self.current_start_pos();

        let local = p(self.parse_module_export_name()?);

        let exported = if self.token == Token::As {
            self.advance()?;
            Some(p(self.parse_module_export_name()?))
        } else {
            None
        };

        let loc = self.mark_loc(start_pos);

        Ok(ExportSpecifier { loc, local, exported })
    }

    /// Register an exported name, erroring on duplicates.
    fn add_export_name(&mut self, name: String, loc: Loc) -> ParseResult<()> {
        if !self.export_names.insert(name.clone()) {
            return self.error(loc, ParseError::DuplicateExport(name));
        }

        Ok(())
    }
}

/// The result of parsing a program, including any errors collected while
/// parsing in tolerant mode.
#[derive(Debug)]
pub struct ParseProgramResult {
    pub program: Program,
    pub errors: Vec<LocalizedParseError>,
}

fn parse_program(
    source: &Rc<Source>,
    program_kind: ProgramKind,
    options: &Options,
) -> ParseResult<ParseProgramResult> {
    // Create and prime the parser
    let mut lexer = Lexer::new(source, options.ecma_version);
    lexer.allow_hashbang_comment = options.allow_hash_bang;

    let mut parser = Parser::new(lexer, program_kind, options);
    parser.advance()?;

    let program = parser.parse_program()?;

    Ok(ParseProgramResult { program, errors: parser.errors })
}

/// Parse the source as a script, returning the program along with any errors
/// collected in tolerant mode.
pub fn parse_script(source: &Rc<Source>) -> ParseResult<ParseProgramResult> {
    let options = Options::default();
    parse_program(source, ProgramKind::Script, &options)
}

pub fn parse_script_with_options(
    source: &Rc<Source>,
    options: &Options,
) -> ParseResult<ParseProgramResult> {
    let program_kind = match options.source_type {
        SourceType::Script => ProgramKind::Script,
        SourceType::Module => ProgramKind::Module,
    };

    parse_program(source, program_kind, options)
}

/// Parse the source as a module.
pub fn parse_module(source: &Rc<Source>) -> ParseResult<ParseProgramResult> {
    let options = Options::default();
    parse_program(source, ProgramKind::Module, &options)
}

pub fn parse_module_with_options(
    source: &Rc<Source>,
    options: &Options,
) -> ParseResult<ParseProgramResult> {
    parse_program(source, ProgramKind::Module, options)
}

/// Parse the source as a single expression.
pub fn parse_expression(source: &Rc<Source>) -> ParseResult<P<Expression>> {
    let options = Options::default();
    parse_expression_with_options(source, &options)
}

pub fn parse_expression_with_options(
    source: &Rc<Source>,
    options: &Options,
) -> ParseResult<P<Expression>> {
    let mut lexer = Lexer::new(source, options.ecma_version);
    lexer.allow_hashbang_comment = options.allow_hash_bang;

    let mut parser = Parser::new(lexer, ProgramKind::Script, options);
    parser.advance()?;

    let expr = parser.parse_expression()?;

    if parser.token != Token::Eof {
        let token = parser.token.clone();
        return parser.error_unexpected_token(parser.loc, &token);
    }

    Ok(expr)
}

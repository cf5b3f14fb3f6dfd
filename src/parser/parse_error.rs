use std::error::Error;
use std::rc::Rc;
use std::{fmt, io};

use super::{
    loc::{find_line_col_for_pos, Loc},
    source::Source,
    token::Token,
};

#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    UnknownToken(String),
    UnexpectedToken(Token),
    ExpectedToken(Token, Token),
    InvalidUnicode,
    UnterminatedStringLiteral,
    UnterminatedTemplateLiteral,
    UnterminatedRegexpLiteral,
    UnterminatedBlockComment,
    MalformedEscapeSeqence,
    MalformedNumericLiteral,
    BigIntLeadingZero,
    BigIntMalformed,
    TrailingNumericSeparator,
    AdjacentNumericSeparators,
    InvalidNumericLiteralNextChar,
    LegacyOctalLiteralInStrictMode,
    LegacyOctalEscapeSequenceInStrictMode,
    LegacyNonOctalEscapeSequenceInStrictMode,
    InvalidRegexpFlag(char),
    DuplicateRegexpFlag(char),
    IncompatibleRegexpFlags,
    UnsupportedFeature(&'static str),
    RestTrailingComma,
    RestElementNotLast,
    RestElementInitializer,
    ThrowArgumentOnNewLine,
    ArrowOnNewLine,
    AmbiguousLetBracket,
    InvalidAssignmentLeftHandSide,
    InvalidForLeftHandSide,
    InvalidUpdateExpressionArgument,
    IdentifierIsReservedWord(String),
    ExpectedNewTarget,
    ExpectedImportMeta,
    ImportMetaOutsideModule,
    ForEachInitInvalidVarDecl,
    ForInInitWithInitializer,
    NameRedeclaration(String),
    DuplicateLabel(String),
    LabelNotFound(String),
    ContinueLabelNotIteration(String),
    WithInStrictMode,
    DeleteIdentifierInStrictMode,
    DeletePrivateName,
    AssignEvalInStrictMode,
    AssignArgumentsInStrictMode,
    BindRestrictedNameInStrictMode(String),
    UseStrictFunctionNonSimpleParameterList,
    InvalidDuplicateParameters(InvalidDuplicateParametersReason),
    InvalidLabeledFunction(bool),
    ReturnOutsideFunction,
    ContinueOutsideIterable,
    UnlabeledBreakOutsideBreakable,
    MultipleConstructors,
    NonSimpleConstructor,
    FieldNamedConstructor,
    ClassStaticPrototype,
    InvalidPatternInitializer,
    DuplicatePrivateName(String),
    PrivateNameOutsideClass,
    PrivateNameNotDefined(String),
    PrivateNameConstructor,
    NewTargetOutsideFunction,
    SuperPropertyOutsideMethod,
    SuperCallOutsideDerivedConstructor,
    DuplicateProtoProperty,
    ConstWithoutInitializer,
    LetNameInLexicalDeclaration,
    GetterWrongNumberOfParams,
    SetterWrongNumberOfParams,
    MixedLogicalAndCoalesce,
    InvalidExponentiationOperand,
    AwaitInFunctionParameters,
    YieldInFunctionParameters,
    OptionalChainInNewCallee,
    TaggedTemplateInOptionalChain,
    ImportExportOutsideModule,
    ImportExportNotTopLevel,
    DuplicateExport(String),
    UnresolvedExport(String),
    DuplicateImportAttribute(String),
    MultipleDefaultClauses,
}

#[derive(Debug)]
pub enum InvalidDuplicateParametersReason {
    StrictMode,
    ArrowFunction,
    Method,
    NonSimpleParameters,
}

impl ParseError {
    /// A stable machine readable key for this kind of error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Io(_) => "IO_ERROR",
            ParseError::UnknownToken(_) => "UNKNOWN_TOKEN",
            ParseError::UnexpectedToken(_) => "UNEXPECTED_TOKEN",
            ParseError::ExpectedToken(..) => "EXPECTED_TOKEN",
            ParseError::InvalidUnicode => "INVALID_UNICODE",
            ParseError::UnterminatedStringLiteral => "UNTERMINATED_STRING",
            ParseError::UnterminatedTemplateLiteral => "UNTERMINATED_TEMPLATE",
            ParseError::UnterminatedRegexpLiteral => "UNTERMINATED_REGEXP",
            ParseError::UnterminatedBlockComment => "UNTERMINATED_COMMENT",
            ParseError::MalformedEscapeSeqence => "MALFORMED_ESCAPE",
            ParseError::MalformedNumericLiteral => "MALFORMED_NUMBER",
            ParseError::BigIntLeadingZero => "BIGINT_LEADING_ZERO",
            ParseError::BigIntMalformed => "BIGINT_MALFORMED",
            ParseError::TrailingNumericSeparator => "TRAILING_NUMERIC_SEPARATOR",
            ParseError::AdjacentNumericSeparators => "ADJACENT_NUMERIC_SEPARATORS",
            ParseError::InvalidNumericLiteralNextChar => "INVALID_NUMBER_SUFFIX",
            ParseError::LegacyOctalLiteralInStrictMode => "STRICT_OCTAL_LITERAL",
            ParseError::LegacyOctalEscapeSequenceInStrictMode => "STRICT_OCTAL_ESCAPE",
            ParseError::LegacyNonOctalEscapeSequenceInStrictMode => "STRICT_NON_OCTAL_ESCAPE",
            ParseError::InvalidRegexpFlag(_) => "INVALID_REGEXP_FLAG",
            ParseError::DuplicateRegexpFlag(_) => "DUPLICATE_REGEXP_FLAG",
            ParseError::IncompatibleRegexpFlags => "INCOMPATIBLE_REGEXP_FLAGS",
            ParseError::UnsupportedFeature(_) => "UNSUPPORTED_FEATURE",
            ParseError::RestTrailingComma => "REST_TRAILING_COMMA",
            ParseError::RestElementNotLast => "REST_NOT_LAST",
            ParseError::RestElementInitializer => "REST_INITIALIZER",
            ParseError::ThrowArgumentOnNewLine => "THROW_NEWLINE",
            ParseError::ArrowOnNewLine => "ARROW_NEWLINE",
            ParseError::AmbiguousLetBracket => "AMBIGUOUS_LET_BRACKET",
            ParseError::InvalidAssignmentLeftHandSide => "INVALID_ASSIGNMENT_TARGET",
            ParseError::InvalidForLeftHandSide => "INVALID_FOR_TARGET",
            ParseError::InvalidUpdateExpressionArgument => "INVALID_UPDATE_TARGET",
            ParseError::IdentifierIsReservedWord(_) => "RESERVED_WORD",
            ParseError::ExpectedNewTarget => "EXPECTED_NEW_TARGET",
            ParseError::ExpectedImportMeta => "EXPECTED_IMPORT_META",
            ParseError::ImportMetaOutsideModule => "IMPORT_META_OUTSIDE_MODULE",
            ParseError::ForEachInitInvalidVarDecl => "INVALID_FOR_EACH_INIT",
            ParseError::ForInInitWithInitializer => "FOR_IN_INITIALIZER",
            ParseError::NameRedeclaration(_) => "NAME_REDECLARATION",
            ParseError::DuplicateLabel(_) => "DUPLICATE_LABEL",
            ParseError::LabelNotFound(_) => "LABEL_NOT_FOUND",
            ParseError::ContinueLabelNotIteration(_) => "CONTINUE_LABEL_NOT_ITERATION",
            ParseError::WithInStrictMode => "STRICT_WITH",
            ParseError::DeleteIdentifierInStrictMode => "STRICT_DELETE",
            ParseError::DeletePrivateName => "DELETE_PRIVATE_NAME",
            ParseError::AssignEvalInStrictMode => "STRICT_ASSIGN_EVAL",
            ParseError::AssignArgumentsInStrictMode => "STRICT_ASSIGN_ARGUMENTS",
            ParseError::BindRestrictedNameInStrictMode(_) => "STRICT_BIND_RESTRICTED",
            ParseError::UseStrictFunctionNonSimpleParameterList => "USE_STRICT_NON_SIMPLE_PARAMS",
            ParseError::InvalidDuplicateParameters(_) => "DUPLICATE_PARAMETERS",
            ParseError::InvalidLabeledFunction(_) => "LABELED_FUNCTION",
            ParseError::ReturnOutsideFunction => "RETURN_OUTSIDE_FUNCTION",
            ParseError::ContinueOutsideIterable => "CONTINUE_OUTSIDE_LOOP",
            ParseError::UnlabeledBreakOutsideBreakable => "BREAK_OUTSIDE_BREAKABLE",
            ParseError::MultipleConstructors => "MULTIPLE_CONSTRUCTORS",
            ParseError::NonSimpleConstructor => "NON_SIMPLE_CONSTRUCTOR",
            ParseError::FieldNamedConstructor => "FIELD_NAMED_CONSTRUCTOR",
            ParseError::ClassStaticPrototype => "CLASS_STATIC_PROTOTYPE",
            ParseError::InvalidPatternInitializer => "INVALID_PATTERN_INITIALIZER",
            ParseError::DuplicatePrivateName(_) => "DUPLICATE_PRIVATE_NAME",
            ParseError::PrivateNameOutsideClass => "PRIVATE_NAME_OUTSIDE_CLASS",
            ParseError::PrivateNameNotDefined(_) => "PRIVATE_NAME_UNDEFINED",
            ParseError::PrivateNameConstructor => "PRIVATE_NAME_CONSTRUCTOR",
            ParseError::NewTargetOutsideFunction => "NEW_TARGET_OUTSIDE_FUNCTION",
            ParseError::SuperPropertyOutsideMethod => "SUPER_PROPERTY_OUTSIDE_METHOD",
            ParseError::SuperCallOutsideDerivedConstructor => "SUPER_CALL_OUTSIDE_CONSTRUCTOR",
            ParseError::DuplicateProtoProperty => "DUPLICATE_PROTO",
            ParseError::ConstWithoutInitializer => "CONST_WITHOUT_INITIALIZER",
            ParseError::LetNameInLexicalDeclaration => "LET_IN_LEXICAL_DECLARATION",
            ParseError::GetterWrongNumberOfParams => "GETTER_PARAMS",
            ParseError::SetterWrongNumberOfParams => "SETTER_PARAMS",
            ParseError::MixedLogicalAndCoalesce => "MIXED_COALESCE",
            ParseError::InvalidExponentiationOperand => "INVALID_EXPONENTIATION_OPERAND",
            ParseError::AwaitInFunctionParameters => "AWAIT_IN_PARAMETERS",
            ParseError::YieldInFunctionParameters => "YIELD_IN_PARAMETERS",
            ParseError::OptionalChainInNewCallee => "OPTIONAL_CHAIN_NEW",
            ParseError::TaggedTemplateInOptionalChain => "OPTIONAL_CHAIN_TEMPLATE",
            ParseError::ImportExportOutsideModule => "MODULE_SYNTAX_OUTSIDE_MODULE",
            ParseError::ImportExportNotTopLevel => "MODULE_SYNTAX_NOT_TOP_LEVEL",
            ParseError::DuplicateExport(_) => "DUPLICATE_EXPORT",
            ParseError::UnresolvedExport(_) => "UNRESOLVED_EXPORT",
            ParseError::DuplicateImportAttribute(_) => "DUPLICATE_IMPORT_ATTRIBUTE",
            ParseError::MultipleDefaultClauses => "MULTIPLE_DEFAULT_CLAUSES",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Io(io_error) => {
                f.write_str("Error: ")?;
                io_error.fmt(f)
            }
            ParseError::UnknownToken(token) => write!(f, "Unknown token {}", token),
            ParseError::UnexpectedToken(token) => write!(f, "Unexpected token {}", token),
            ParseError::ExpectedToken(actual, expected) => {
                write!(f, "Unexpected token {}, expected {}", actual, expected)
            }
            ParseError::InvalidUnicode => write!(f, "Invalid utf-8 sequence"),
            ParseError::UnterminatedStringLiteral => write!(f, "Unterminated string literal"),
            ParseError::UnterminatedTemplateLiteral => write!(f, "Unterminated template literal"),
            ParseError::UnterminatedRegexpLiteral => write!(f, "Unterminated regular expression"),
            ParseError::UnterminatedBlockComment => write!(f, "Unterminated block comment"),
            ParseError::MalformedEscapeSeqence => write!(f, "Malformed escape sequence"),
            ParseError::MalformedNumericLiteral => write!(f, "Malformed numeric literal"),
            ParseError::BigIntLeadingZero => write!(f, "BigInt cannot have a leading zero"),
            ParseError::BigIntMalformed => {
                write!(f, "BigInt literals cannot have a decimal point or exponent")
            }
            ParseError::TrailingNumericSeparator => write!(
                f,
                "Underscore can appear only between digits, not after the last digit in a number"
            ),
            ParseError::AdjacentNumericSeparators => {
                write!(f, "Number cannot contain multiple adjacent underscores")
            }
            ParseError::InvalidNumericLiteralNextChar => {
                write!(f, "Identifier or number cannot immediately follow numeric literal")
            }
            ParseError::LegacyOctalLiteralInStrictMode => {
                write!(f, "Octal literals are not allowed in strict mode")
            }
            ParseError::LegacyOctalEscapeSequenceInStrictMode => {
                write!(f, "Octal escape sequences are not allowed in strict mode")
            }
            ParseError::LegacyNonOctalEscapeSequenceInStrictMode => {
                write!(f, "\\8 and \\9 escape sequences are not allowed in strict mode")
            }
            ParseError::InvalidRegexpFlag(flag) => {
                write!(f, "Invalid regular expression flag '{}'", flag)
            }
            ParseError::DuplicateRegexpFlag(flag) => {
                write!(f, "Duplicate regular expression flag '{}'", flag)
            }
            ParseError::IncompatibleRegexpFlags => {
                write!(f, "Regular expression flags 'u' and 'v' cannot be combined")
            }
            ParseError::UnsupportedFeature(feature) => {
                write!(f, "{} is not supported by the target ECMAScript version", feature)
            }
            ParseError::RestTrailingComma => {
                write!(f, "Rest element may not have a trailing comma")
            }
            ParseError::RestElementNotLast => {
                write!(f, "Rest element must be the last element")
            }
            ParseError::RestElementInitializer => {
                write!(f, "Rest element may not have an initializer")
            }
            ParseError::ThrowArgumentOnNewLine => {
                write!(f, "No line break is allowed between 'throw' and its expression")
            }
            ParseError::ArrowOnNewLine => {
                write!(f, "No line break is allowed between arrow arguments and '=>'")
            }
            ParseError::AmbiguousLetBracket => {
                write!(f, "Expression cannot start with ambiguous `let [`")
            }
            ParseError::InvalidAssignmentLeftHandSide => {
                write!(f, "Invalid left hand side of assignment")
            }
            ParseError::InvalidForLeftHandSide => {
                write!(f, "Invalid left hand side of for statement")
            }
            ParseError::InvalidUpdateExpressionArgument => {
                write!(f, "Invalid increment/decrement operand")
            }
            ParseError::IdentifierIsReservedWord(name) => {
                write!(f, "Identifier '{}' is a reserved word", name)
            }
            ParseError::ExpectedNewTarget => write!(f, "Expected new.target"),
            ParseError::ExpectedImportMeta => write!(f, "Expected import.meta"),
            ParseError::ImportMetaOutsideModule => {
                write!(f, "import.meta is only allowed in modules")
            }
            ParseError::ForEachInitInvalidVarDecl => {
                write!(f, "Variable declarations in the left hand side of a for each loop must contain a single declaration with no initializer")
            }
            ParseError::ForInInitWithInitializer => {
                write!(f, "for-in loop variable declaration may not have an initializer")
            }
            ParseError::NameRedeclaration(name) => {
                write!(f, "Identifier '{}' has already been declared", name)
            }
            ParseError::DuplicateLabel(label) => write!(f, "Duplicate label '{}'", label),
            ParseError::LabelNotFound(label) => write!(f, "Label '{}' not found", label),
            ParseError::ContinueLabelNotIteration(label) => {
                write!(f, "Label '{}' does not label an iteration statement", label)
            }
            ParseError::WithInStrictMode => {
                write!(f, "Strict mode code may not contain 'with' statements")
            }
            ParseError::DeleteIdentifierInStrictMode => {
                write!(f, "Cannot delete variables in strict mode code")
            }
            ParseError::DeletePrivateName => {
                write!(f, "Private fields cannot be deleted")
            }
            ParseError::AssignEvalInStrictMode => {
                write!(f, "Cannot assign to 'eval' in strict mode code")
            }
            ParseError::AssignArgumentsInStrictMode => {
                write!(f, "Cannot assign to 'arguments' in strict mode code")
            }
            ParseError::BindRestrictedNameInStrictMode(name) => {
                write!(f, "Cannot bind '{}' in strict mode code", name)
            }
            ParseError::UseStrictFunctionNonSimpleParameterList => {
                write!(f, "'use strict' only allowed in functions with simple parameter lists")
            }
            ParseError::InvalidDuplicateParameters(reason) => {
                let reason_string = match reason {
                    InvalidDuplicateParametersReason::StrictMode => "strict mode functions",
                    InvalidDuplicateParametersReason::ArrowFunction => "arrow functions",
                    InvalidDuplicateParametersReason::Method => "methods",
                    InvalidDuplicateParametersReason::NonSimpleParameters => {
                        "functions with non-simple parameter lists"
                    }
                };
                write!(f, "Duplicate parameters not allowed in {}", reason_string)
            }
            ParseError::InvalidLabeledFunction(true) => write!(f, "Functions cannot be labeled"),
            ParseError::InvalidLabeledFunction(false) => {
                write!(f, "Functions can only be labeled inside blocks")
            }
            ParseError::ReturnOutsideFunction => write!(f, "Return must be inside function"),
            ParseError::ContinueOutsideIterable => write!(f, "Continue must be inside loop"),
            ParseError::UnlabeledBreakOutsideBreakable => {
                write!(f, "Unlabeled break must be inside loop or switch")
            }
            ParseError::MultipleConstructors => {
                write!(f, "Class can only have a single constructor")
            }
            ParseError::NonSimpleConstructor => {
                write!(f, "Constructors must be simple methods")
            }
            ParseError::FieldNamedConstructor => {
                write!(f, "Classes cannot have a field named 'constructor'")
            }
            ParseError::ClassStaticPrototype => {
                write!(f, "Classes cannot have a static prototype field or method")
            }
            ParseError::InvalidPatternInitializer => {
                write!(f, "Object property initializers do not use `=`")
            }
            ParseError::DuplicatePrivateName(name) => {
                write!(f, "Redeclaration of private name #{}", name)
            }
            ParseError::PrivateNameOutsideClass => {
                write!(f, "Private name outside class")
            }
            ParseError::PrivateNameNotDefined(name) => {
                write!(f, "Private field '#{}' must be declared in an enclosing class", name)
            }
            ParseError::PrivateNameConstructor => {
                write!(f, "Private name not allowed to be #constructor")
            }
            ParseError::NewTargetOutsideFunction => {
                write!(f, "new.target only allowed in functions")
            }
            ParseError::SuperPropertyOutsideMethod => {
                write!(f, "Super property accesses only allowed in methods")
            }
            ParseError::SuperCallOutsideDerivedConstructor => {
                write!(f, "Super calls only allowed in derived constructors")
            }
            ParseError::DuplicateProtoProperty => {
                write!(f, "Duplicate __proto__ properties are not allowed in object literals")
            }
            ParseError::ConstWithoutInitializer => {
                write!(f, "Const declarations must have an initializer")
            }
            ParseError::LetNameInLexicalDeclaration => {
                write!(f, "Lexical declarations can't define a 'let' binding")
            }
            ParseError::GetterWrongNumberOfParams => {
                write!(f, "Getter functions must have no parameters")
            }
            ParseError::SetterWrongNumberOfParams => {
                write!(f, "Setter functions must have exactly one parameter")
            }
            ParseError::MixedLogicalAndCoalesce => {
                write!(f, "Logical expressions may not be mixed with '??' without parentheses")
            }
            ParseError::InvalidExponentiationOperand => {
                write!(f, "Unparenthesized unary expression cannot appear on the left of '**'")
            }
            ParseError::AwaitInFunctionParameters => {
                write!(f, "Await expressions cannot appear in function parameters")
            }
            ParseError::YieldInFunctionParameters => {
                write!(f, "Yield expressions cannot appear in function parameters")
            }
            ParseError::OptionalChainInNewCallee => {
                write!(f, "Optional chains cannot appear in the callee of new expressions")
            }
            ParseError::TaggedTemplateInOptionalChain => {
                write!(f, "Tagged templates cannot appear in optional chains")
            }
            ParseError::ImportExportOutsideModule => {
                write!(f, "Import and export declarations are only allowed in modules")
            }
            ParseError::ImportExportNotTopLevel => {
                write!(f, "Import and export declarations are only allowed at the top level")
            }
            ParseError::DuplicateExport(name) => {
                write!(f, "Duplicate export of '{}'", name)
            }
            ParseError::UnresolvedExport(name) => {
                write!(f, "Export '{}' is not defined in module", name)
            }
            ParseError::DuplicateImportAttribute(key) => {
                write!(f, "Duplicate import attribute '{}'", key)
            }
            ParseError::MultipleDefaultClauses => {
                write!(f, "Switch statement can only have a single default clause")
            }
        }
    }
}

pub struct LocalizedParseError {
    pub error: ParseError,
    pub source_loc: Option<(Loc, Rc<Source>)>,
}

impl LocalizedParseError {
    fn new_without_loc(error: ParseError) -> LocalizedParseError {
        LocalizedParseError { error, source_loc: None }
    }

    /// The byte offset at which this error was reported.
    pub fn index(&self) -> Option<usize> {
        self.source_loc.as_ref().map(|(loc, _)| loc.start)
    }

    /// The 1-indexed line and 0-indexed column at which this error was
    /// reported.
    pub fn line_col(&self) -> Option<(usize, usize)> {
        self.source_loc.as_ref().map(|(loc, source)| {
            let offsets = source.line_offsets();
            find_line_col_for_pos(loc.start, offsets)
        })
    }
}

impl Error for LocalizedParseError {}

impl fmt::Display for LocalizedParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source_loc {
            None => write!(f, "SyntaxError: {}", self.error),
            Some((loc, source)) => {
                let offsets = source.line_offsets();
                let (line, col) = find_line_col_for_pos(loc.start, offsets);
                write!(f, "SyntaxError: {}:{}:{} {}", source.file_path, line, col, self.error)
            }
        }
    }
}

impl fmt::Debug for LocalizedParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <LocalizedParseError as fmt::Display>::fmt(self, f)
    }
}

impl From<io::Error> for LocalizedParseError {
    fn from(error: io::Error) -> LocalizedParseError {
        LocalizedParseError::new_without_loc(ParseError::Io(error))
    }
}

pub struct LocalizedParseErrors {
    pub errors: Vec<LocalizedParseError>,
}

impl LocalizedParseErrors {
    pub fn new(errors: Vec<LocalizedParseError>) -> Self {
        LocalizedParseErrors { errors }
    }
}

impl Error for LocalizedParseErrors {}

impl fmt::Display for LocalizedParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_localized_parse_errors(&self.errors))
    }
}

impl fmt::Debug for LocalizedParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <LocalizedParseErrors as fmt::Display>::fmt(self, f)
    }
}

pub type ParseResult<T> = Result<T, LocalizedParseError>;

pub fn format_localized_parse_errors(errors: &[LocalizedParseError]) -> String {
    // Separate errors into those with and without locs
    let mut errors_without_loc = vec![];
    let mut errors_with_loc = vec![];
    for error in errors {
        match &error.source_loc {
            None => {
                errors_without_loc.push(error);
            }
            Some((loc, source)) => {
                let offsets = source.line_offsets();
                let (line, col) = find_line_col_for_pos(loc.start, offsets);
                errors_with_loc.push((error, source, line, col))
            }
        }
    }

    // Sort errors with locs by file then position
    errors_with_loc.sort_by(|a, b| {
        a.1.file_path
            .cmp(&b.1.file_path)
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.3.cmp(&b.3))
    });

    let mut error_messages = vec![];
    for error in errors_without_loc {
        error_messages.push(format!("{}", error))
    }

    for (error, _, _, _) in errors_with_loc {
        error_messages.push(format!("{}", error))
    }

    error_messages.join("\n\n")
}

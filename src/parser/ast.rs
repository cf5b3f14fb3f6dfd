use num_bigint::BigInt;

use super::loc::Loc;

pub type P<T> = Box<T>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgramKind {
    Script,
    Module,
}

#[derive(Debug)]
pub struct Program {
    pub loc: Loc,
    pub kind: ProgramKind,
    pub body: Vec<Statement>,
    pub has_use_strict_directive: bool,
    pub is_strict_mode: bool,
}

impl Program {
    pub fn new(
        loc: Loc,
        kind: ProgramKind,
        body: Vec<Statement>,
        has_use_strict_directive: bool,
        is_strict_mode: bool,
    ) -> Program {
        Program { loc, kind, body, has_use_strict_directive, is_strict_mode }
    }
}

#[derive(Debug)]
pub struct Identifier {
    pub loc: Loc,
    pub name: String,
}

#[derive(Debug)]
pub enum Statement {
    VarDecl(VariableDeclaration),
    FuncDecl(Function),
    ClassDecl(Class),
    Expr(ExpressionStatement),
    Block(Block),
    If(IfStatement),
    Switch(SwitchStatement),
    For(ForStatement),
    ForEach(ForEachStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    With(WithStatement),
    Try(TryStatement),
    Throw(ThrowStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Labeled(LabeledStatement),
    Empty(Loc),
    Debugger(Loc),
    Import(ImportDeclaration),
    ExportNamed(ExportNamedDeclaration),
    ExportDefault(ExportDefaultDeclaration),
    ExportAll(ExportAllDeclaration),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug)]
pub struct VariableDeclaration {
    pub loc: Loc,
    pub kind: VarKind,
    pub declarations: Vec<VariableDeclarator>,
}

impl VariableDeclaration {
    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        for decl in &self.declarations {
            decl.id.iter_bound_names(f)
        }
    }
}

#[derive(Debug)]
pub struct VariableDeclarator {
    pub loc: Loc,
    pub id: P<Pattern>,
    pub init: Option<P<Expression>>,
}

#[derive(Debug)]
pub struct Function {
    pub loc: Loc,
    pub id: Option<P<Identifier>>,
    pub params: Vec<FunctionParam>,
    pub body: P<FunctionBody>,
    pub is_async: bool,
    pub is_generator: bool,
    pub has_simple_parameter_list: bool,

    // Whether the function has a "use strict" directive
    pub has_use_strict_directive: bool,
    // Whether the function is in strict mode, which could be inherited from
    // the surrounding context
    pub is_strict_mode: bool,
}

impl Function {
    pub fn new(
        loc: Loc,
        id: Option<P<Identifier>>,
        params: Vec<FunctionParam>,
        body: P<FunctionBody>,
        is_async: bool,
        is_generator: bool,
        is_strict_mode: bool,
        has_use_strict_directive: bool,
    ) -> Function {
        let has_simple_parameter_list = params
            .iter()
            .all(|param| matches!(param, FunctionParam::Pattern(Pattern::Id(_))));

        Function {
            loc,
            id,
            params,
            body,
            is_async,
            is_generator,
            has_simple_parameter_list,
            has_use_strict_directive,
            is_strict_mode,
        }
    }
}

#[derive(Debug)]
pub enum FunctionParam {
    Pattern(Pattern),
    Rest(RestElement),
}

impl FunctionParam {
    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        match &self {
            FunctionParam::Pattern(pattern) => pattern.iter_bound_names(f),
            FunctionParam::Rest(RestElement { argument, .. }) => argument.iter_bound_names(f),
        }
    }
}

#[derive(Debug)]
pub enum FunctionBody {
    Block(Block),
    Expression(Expression),
}

#[derive(Debug)]
pub struct Class {
    pub loc: Loc,
    pub id: Option<P<Identifier>>,
    pub super_class: Option<P<Expression>>,
    pub body: Vec<ClassElement>,
}

impl Class {
    pub fn new(
        loc: Loc,
        id: Option<P<Identifier>>,
        super_class: Option<P<Expression>>,
        body: Vec<ClassElement>,
    ) -> Class {
        Class { loc, id, super_class, body }
    }
}

#[derive(Debug)]
pub enum ClassElement {
    Method(ClassMethod),
    Property(ClassProperty),
}

#[derive(Debug)]
pub struct ClassMethod {
    pub loc: Loc,
    pub key: P<Expression>,
    pub value: P<Function>,
    pub kind: ClassMethodKind,
    pub is_computed: bool,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClassMethodKind {
    Method,
    Constructor,
    Get,
    Set,
    // Static initializer blocks are represented as methods whose function
    // holds the block body
    StaticInitializer,
}

#[derive(Debug)]
pub struct ClassProperty {
    pub loc: Loc,
    pub key: P<Expression>,
    pub value: Option<P<Expression>>,
    pub is_computed: bool,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Debug)]
pub struct ExpressionStatement {
    pub loc: Loc,
    pub expr: P<Expression>,
}

#[derive(Debug)]
pub struct Block {
    pub loc: Loc,
    pub body: Vec<Statement>,
}

impl Block {
    pub fn new(loc: Loc, body: Vec<Statement>) -> Block {
        Block { loc, body }
    }
}

#[derive(Debug)]
pub struct IfStatement {
    pub loc: Loc,
    pub test: P<Expression>,
    pub conseq: P<Statement>,
    pub altern: Option<P<Statement>>,
}

#[derive(Debug)]
pub struct SwitchStatement {
    pub loc: Loc,
    pub discriminant: P<Expression>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug)]
pub struct SwitchCase {
    pub loc: Loc,
    pub test: Option<P<Expression>>,
    pub body: Vec<Statement>,
}

#[derive(Debug)]
pub struct ForStatement {
    pub loc: Loc,
    pub init: Option<P<ForInit>>,
    pub test: Option<P<Expression>>,
    pub update: Option<P<Expression>>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub enum ForInit {
    Expression(Expression),
    VarDecl(VariableDeclaration),
}

#[derive(Debug)]
pub struct ForEachStatement {
    pub loc: Loc,
    pub kind: ForEachKind,
    pub left: P<ForEachInit>,
    pub right: P<Expression>,
    pub body: P<Statement>,
    pub is_await: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForEachKind {
    In,
    Of,
}

#[derive(Debug)]
pub enum ForEachInit {
    VarDecl(VariableDeclaration),
    Pattern(Pattern),
}

#[derive(Debug)]
pub struct WhileStatement {
    pub loc: Loc,
    pub test: P<Expression>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct DoWhileStatement {
    pub loc: Loc,
    pub test: P<Expression>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct WithStatement {
    pub loc: Loc,
    pub object: P<Expression>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct TryStatement {
    pub loc: Loc,
    pub block: P<Block>,
    pub handler: Option<P<CatchClause>>,
    pub finalizer: Option<P<Block>>,
}

#[derive(Debug)]
pub struct CatchClause {
    pub loc: Loc,
    pub param: Option<P<Pattern>>,
    pub body: P<Block>,
}

#[derive(Debug)]
pub struct ThrowStatement {
    pub loc: Loc,
    pub argument: P<Expression>,
}

#[derive(Debug)]
pub struct ReturnStatement {
    pub loc: Loc,
    pub argument: Option<P<Expression>>,
}

#[derive(Debug)]
pub struct BreakStatement {
    pub loc: Loc,
    pub label: Option<P<Identifier>>,
}

#[derive(Debug)]
pub struct ContinueStatement {
    pub loc: Loc,
    pub label: Option<P<Identifier>>,
}

#[derive(Debug)]
pub struct LabeledStatement {
    pub loc: Loc,
    pub label: P<Identifier>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub enum Expression {
    Id(Identifier),
    Null(Loc),
    Boolean(BooleanLiteral),
    Number(NumberLiteral),
    String(StringLiteral),
    BigInt(BigIntLiteral),
    Regexp(RegexpLiteral),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Assign(AssignmentExpression),
    Update(UpdateExpression),
    Member(MemberExpression),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    New(NewExpression),
    Sequence(SequenceExpression),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Function),
    ArrowFunction(Function),
    Class(Class),
    This(Loc),
    Await(AwaitExpression),
    Yield(YieldExpression),
    SuperMember(SuperMemberExpression),
    SuperCall(SuperCallExpression),
    Template(TemplateLiteral),
    TaggedTemplate(TaggedTemplateExpression),
    Chain(ChainExpression),
    MetaProperty(MetaProperty),
    Import(ImportExpression),
    // Only constructed when parenthesized expressions are preserved
    Paren(ParenthesizedExpression),
}

impl Expression {
    pub fn loc(&self) -> Loc {
        match self {
            Expression::Id(node) => node.loc,
            Expression::Null(loc) => *loc,
            Expression::Boolean(node) => node.loc,
            Expression::Number(node) => node.loc,
            Expression::String(node) => node.loc,
            Expression::BigInt(node) => node.loc,
            Expression::Regexp(node) => node.loc,
            Expression::Unary(node) => node.loc,
            Expression::Binary(node) => node.loc,
            Expression::Logical(node) => node.loc,
            Expression::Assign(node) => node.loc,
            Expression::Update(node) => node.loc,
            Expression::Member(node) => node.loc,
            Expression::Conditional(node) => node.loc,
            Expression::Call(node) => node.loc,
            Expression::New(node) => node.loc,
            Expression::Sequence(node) => node.loc,
            Expression::Array(node) => node.loc,
            Expression::Object(node) => node.loc,
            Expression::Function(node) => node.loc,
            Expression::ArrowFunction(node) => node.loc,
            Expression::Class(node) => node.loc,
            Expression::This(loc) => *loc,
            Expression::Await(node) => node.loc,
            Expression::Yield(node) => node.loc,
            Expression::SuperMember(node) => node.loc,
            Expression::SuperCall(node) => node.loc,
            Expression::Template(node) => node.loc,
            Expression::TaggedTemplate(node) => node.loc,
            Expression::Chain(node) => node.loc,
            Expression::MetaProperty(node) => node.loc,
            Expression::Import(node) => node.loc,
            Expression::Paren(node) => node.loc,
        }
    }

    pub fn to_id(&self) -> &Identifier {
        match self {
            Expression::Id(id) => id,
            _ => panic!("Expected identifier expression"),
        }
    }
}

#[derive(Debug)]
pub struct BooleanLiteral {
    pub loc: Loc,
    pub value: bool,
}

#[derive(Debug)]
pub struct NumberLiteral {
    pub loc: Loc,
    pub value: f64,
}

#[derive(Debug)]
pub struct StringLiteral {
    pub loc: Loc,
    pub value: String,
}

#[derive(Debug)]
pub struct BigIntLiteral {
    pub loc: Loc,
    pub value: BigInt,
}

#[derive(Debug)]
pub struct RegexpLiteral {
    pub loc: Loc,
    pub raw: String,
    pub pattern: String,
    pub flags: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug)]
pub struct UnaryExpression {
    pub loc: Loc,
    pub operator: UnaryOperator,
    pub argument: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Exponent,
    EqEq,
    EqEqEq,
    NotEq,
    NotEqEq,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRightArithmetic,
    ShiftRightLogical,
    // All in expressions with a non-private name LHS
    In,
    // Only for private name LHS. The left expression is always an identifier.
    InPrivate,
    InstanceOf,
}

#[derive(Debug)]
pub struct BinaryExpression {
    pub loc: Loc,
    pub operator: BinaryOperator,
    pub left: P<Expression>,
    pub right: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
    NullishCoalesce,
}

#[derive(Debug)]
pub struct LogicalExpression {
    pub loc: Loc,
    pub operator: LogicalOperator,
    pub left: P<Expression>,
    pub right: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AssignmentOperator {
    Equals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Exponent,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRightArithmetic,
    ShiftRightLogical,
    // Logical assignment operators preserve short circuit semantics
    LogicalAnd,
    LogicalOr,
    NullishCoalesce,
}

#[derive(Debug)]
pub struct AssignmentExpression {
    pub loc: Loc,
    pub operator: AssignmentOperator,
    pub left: P<Pattern>,
    pub right: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

#[derive(Debug)]
pub struct UpdateExpression {
    pub loc: Loc,
    pub operator: UpdateOperator,
    pub argument: P<Expression>,
    pub is_prefix: bool,
}

#[derive(Debug)]
pub struct MemberExpression {
    pub loc: Loc,
    pub object: P<Expression>,
    pub property: P<Expression>,
    pub is_computed: bool,
    pub is_optional: bool,
    pub is_private: bool,
}

#[derive(Debug)]
pub struct ConditionalExpression {
    pub loc: Loc,
    pub test: P<Expression>,
    pub conseq: P<Expression>,
    pub altern: P<Expression>,
}

#[derive(Debug)]
pub struct CallExpression {
    pub loc: Loc,
    pub callee: P<Expression>,
    pub arguments: Vec<CallArgument>,
    pub is_optional: bool,
}

#[derive(Debug)]
pub enum CallArgument {
    Expression(Expression),
    Spread(SpreadElement),
}

#[derive(Debug)]
pub struct NewExpression {
    pub loc: Loc,
    pub callee: P<Expression>,
    pub arguments: Vec<CallArgument>,
}

#[derive(Debug)]
pub struct SequenceExpression {
    pub loc: Loc,
    pub expressions: Vec<Expression>,
}

#[derive(Debug)]
pub struct ArrayExpression {
    pub loc: Loc,
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug)]
pub enum ArrayElement {
    Expression(Expression),
    Spread(SpreadElement),
    Hole,
}

#[derive(Debug)]
pub struct SpreadElement {
    pub loc: Loc,
    pub argument: P<Expression>,
}

#[derive(Debug)]
pub struct ObjectExpression {
    pub loc: Loc,
    pub properties: Vec<Property>,
}

#[derive(Debug)]
pub struct Property {
    pub loc: Loc,
    pub key: P<Expression>,
    pub value: Option<P<Expression>>,
    pub is_computed: bool,
    pub is_method: bool,
    pub is_shorthand: bool,
    pub kind: PropertyKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
    // For spread properties the key is the argument and all other fields are
    // ignored
    Spread,
}

#[derive(Debug)]
pub struct AwaitExpression {
    pub loc: Loc,
    pub argument: P<Expression>,
}

#[derive(Debug)]
pub struct YieldExpression {
    pub loc: Loc,
    pub argument: Option<P<Expression>>,
    pub is_delegate: bool,
}

#[derive(Debug)]
pub struct SuperMemberExpression {
    pub loc: Loc,
    pub super_: Loc,
    pub property: P<Expression>,
    pub is_computed: bool,
}

#[derive(Debug)]
pub struct SuperCallExpression {
    pub loc: Loc,
    pub super_: Loc,
    pub arguments: Vec<CallArgument>,
}

#[derive(Debug)]
pub struct TemplateLiteral {
    pub loc: Loc,
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug)]
pub struct TemplateElement {
    pub loc: Loc,
    pub raw: String,
    /// The decoded string value, or None if the segment contains an invalid
    /// escape sequence within a tagged template.
    pub cooked: Option<String>,
    pub is_tail: bool,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression {
    pub loc: Loc,
    pub tag: P<Expression>,
    pub quasi: P<TemplateLiteral>,
}

/// Wrapper around the outermost member or call expression of an optional
/// chain.
#[derive(Debug)]
pub struct ChainExpression {
    pub loc: Loc,
    pub expression: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetaPropertyKind {
    NewTarget,
    ImportMeta,
}

#[derive(Debug)]
pub struct MetaProperty {
    pub loc: Loc,
    pub kind: MetaPropertyKind,
}

#[derive(Debug)]
pub struct ImportExpression {
    pub loc: Loc,
    pub source: P<Expression>,
    pub options: Option<P<Expression>>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression {
    pub loc: Loc,
    pub expression: P<Expression>,
}

#[derive(Debug)]
pub enum Pattern {
    Id(Identifier),
    Array(ArrayPattern),
    Object(ObjectPattern),
    Assign(AssignmentPattern),
    // Member expressions are valid assignment targets but not binding targets
    Member(MemberExpression),
    SuperMember(SuperMemberExpression),
}

impl Pattern {
    pub fn loc(&self) -> Loc {
        match self {
            Pattern::Id(node) => node.loc,
            Pattern::Array(node) => node.loc,
            Pattern::Object(node) => node.loc,
            Pattern::Assign(node) => node.loc,
            Pattern::Member(node) => node.loc,
            Pattern::SuperMember(node) => node.loc,
        }
    }

    pub fn to_id(&self) -> &Identifier {
        match self {
            Pattern::Id(id) => id,
            _ => panic!("Expected identifier pattern"),
        }
    }

    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        match &self {
            Pattern::Id(id) => f(id),
            Pattern::Array(patt) => patt.iter_bound_names(f),
            Pattern::Object(patt) => patt.iter_bound_names(f),
            Pattern::Assign(patt) => patt.left.iter_bound_names(f),
            Pattern::Member(_) | Pattern::SuperMember(_) => {}
        }
    }
}

#[derive(Debug)]
pub struct ArrayPattern {
    pub loc: Loc,
    pub elements: Vec<ArrayPatternElement>,
}

#[derive(Debug)]
pub enum ArrayPatternElement {
    Pattern(Pattern),
    Rest(RestElement),
    Hole,
}

impl ArrayPattern {
    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        for element in &self.elements {
            match element {
                ArrayPatternElement::Pattern(pattern) => pattern.iter_bound_names(f),
                ArrayPatternElement::Rest(RestElement { argument, .. }) => {
                    argument.iter_bound_names(f)
                }
                ArrayPatternElement::Hole => {}
            }
        }
    }
}

#[derive(Debug)]
pub struct RestElement {
    pub loc: Loc,
    pub argument: P<Pattern>,
}

#[derive(Debug)]
pub struct ObjectPattern {
    pub loc: Loc,
    pub properties: Vec<ObjectPatternProperty>,
}

impl ObjectPattern {
    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        for prop in &self.properties {
            prop.value.iter_bound_names(f)
        }
    }
}

#[derive(Debug)]
pub struct ObjectPatternProperty {
    pub loc: Loc,
    pub key: Option<P<Expression>>,
    pub value: P<Pattern>,
    pub is_computed: bool,
    // For rest properties the value is the argument and all other fields are
    // ignored
    pub is_rest: bool,
}

#[derive(Debug)]
pub struct AssignmentPattern {
    pub loc: Loc,
    pub left: P<Pattern>,
    pub right: P<Expression>,
}

#[derive(Debug)]
pub struct ImportDeclaration {
    pub loc: Loc,
    pub specifiers: Vec<ImportSpecifier>,
    pub source: P<StringLiteral>,
    pub attributes: Vec<ImportAttribute>,
}

#[derive(Debug)]
pub enum ImportSpecifier {
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
    Named(ImportNamedSpecifier),
}

#[derive(Debug)]
pub struct ImportDefaultSpecifier {
    pub loc: Loc,
    pub local: P<Identifier>,
}

#[derive(Debug)]
pub struct ImportNamespaceSpecifier {
    pub loc: Loc,
    pub local: P<Identifier>,
}

#[derive(Debug)]
pub struct ImportNamedSpecifier {
    pub loc: Loc,
    pub imported: P<ModuleExportName>,
    /// None when there is no `as` clause, in which case the imported name is
    /// also the local binding and is always an identifier.
    pub local: Option<P<Identifier>>,
}

#[derive(Debug)]
pub enum ModuleExportName {
    Id(Identifier),
    String(StringLiteral),
}

impl ModuleExportName {
    pub fn loc(&self) -> Loc {
        match self {
            ModuleExportName::Id(id) => id.loc,
            ModuleExportName::String(string) => string.loc,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ModuleExportName::Id(id) => &id.name,
            ModuleExportName::String(string) => &string.value,
        }
    }
}

#[derive(Debug)]
pub struct ImportAttribute {
    pub loc: Loc,
    pub key: P<Expression>,
    pub value: P<StringLiteral>,
}

#[derive(Debug)]
pub struct ExportNamedDeclaration {
    pub loc: Loc,
    pub declaration: Option<P<Statement>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<P<StringLiteral>>,
    pub attributes: Vec<ImportAttribute>,
}

#[derive(Debug)]
pub struct ExportSpecifier {
    pub loc: Loc,
    pub local: P<ModuleExportName>,
    /// None when there is no `as` clause, in which case the local name is
    /// also the exported name.
    pub exported: Option<P<ModuleExportName>>,
}

#[derive(Debug)]
pub struct ExportDefaultDeclaration {
    pub loc: Loc,
    pub declaration: ExportDefaultKind,
}

#[derive(Debug)]
pub enum ExportDefaultKind {
    Function(P<Function>),
    Class(P<Class>),
    Expression(P<Expression>),
}

#[derive(Debug)]
pub struct ExportAllDeclaration {
    pub loc: Loc,
    pub exported: Option<P<ModuleExportName>>,
    pub source: P<StringLiteral>,
    pub attributes: Vec<ImportAttribute>,
}

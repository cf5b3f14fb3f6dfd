/// The ECMAScript language version the parser targets. Selects reserved word
/// sets and gates individual syntax features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EcmaVersion {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    ES2023,
    ES2024,
    Latest,
}

impl EcmaVersion {
    /// Create a version from its numeric form, either an edition number
    /// (3, 5, 6..) or a year (2015..).
    pub fn from_number(number: u32) -> Option<EcmaVersion> {
        match number {
            3 => Some(EcmaVersion::ES3),
            5 => Some(EcmaVersion::ES5),
            6 | 2015 => Some(EcmaVersion::ES2015),
            7 | 2016 => Some(EcmaVersion::ES2016),
            8 | 2017 => Some(EcmaVersion::ES2017),
            9 | 2018 => Some(EcmaVersion::ES2018),
            10 | 2019 => Some(EcmaVersion::ES2019),
            11 | 2020 => Some(EcmaVersion::ES2020),
            12 | 2021 => Some(EcmaVersion::ES2021),
            13 | 2022 => Some(EcmaVersion::ES2022),
            14 | 2023 => Some(EcmaVersion::ES2023),
            15 | 2024 => Some(EcmaVersion::ES2024),
            _ => None,
        }
    }

    #[inline]
    pub fn at_least(self, other: EcmaVersion) -> bool {
        self >= other
    }

    pub fn has_exponent_operator(self) -> bool {
        self.at_least(EcmaVersion::ES2016)
    }

    pub fn has_async_functions(self) -> bool {
        self.at_least(EcmaVersion::ES2017)
    }

    pub fn has_async_iteration(self) -> bool {
        self.at_least(EcmaVersion::ES2018)
    }

    pub fn has_optional_catch_binding(self) -> bool {
        self.at_least(EcmaVersion::ES2019)
    }

    pub fn has_optional_chaining(self) -> bool {
        self.at_least(EcmaVersion::ES2020)
    }

    pub fn has_nullish_coalescing(self) -> bool {
        self.at_least(EcmaVersion::ES2020)
    }

    pub fn has_bigint(self) -> bool {
        self.at_least(EcmaVersion::ES2020)
    }

    pub fn has_dynamic_import(self) -> bool {
        self.at_least(EcmaVersion::ES2020)
    }

    pub fn has_import_meta(self) -> bool {
        self.at_least(EcmaVersion::ES2020)
    }

    pub fn has_logical_assignment(self) -> bool {
        self.at_least(EcmaVersion::ES2021)
    }

    pub fn has_numeric_separators(self) -> bool {
        self.at_least(EcmaVersion::ES2021)
    }

    pub fn has_class_fields(self) -> bool {
        self.at_least(EcmaVersion::ES2022)
    }

    pub fn has_static_blocks(self) -> bool {
        self.at_least(EcmaVersion::ES2022)
    }

    pub fn has_private_in(self) -> bool {
        self.at_least(EcmaVersion::ES2022)
    }

    pub fn has_top_level_await(self) -> bool {
        self.at_least(EcmaVersion::ES2022)
    }

    pub fn has_import_attributes(self) -> bool {
        self.at_least(EcmaVersion::Latest)
    }
}

/// Whether the input is parsed as a script or a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceType {
    Script,
    Module,
}

/// How reserved words are enforced when used as identifiers in script code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowReserved {
    /// Enforce the reserved word set selected by the target version.
    Version,
    /// Allow version-specific reserved words as identifiers.
    Always,
    /// Reject the full future-reserved set regardless of version.
    Never,
}

/// Options controlling a single parser instance.
pub struct Options {
    /// The ECMAScript version to target.
    pub ecma_version: EcmaVersion,

    /// Whether to parse the input as a script or a module.
    pub source_type: SourceType,

    /// How version-specific reserved words are enforced.
    pub allow_reserved: AllowReserved,

    /// Whether a toplevel return statement is allowed.
    pub allow_return_outside_function: bool,

    /// Whether toplevel await is allowed in scripts.
    pub allow_await_outside_function: bool,

    /// Whether import and export declarations may appear outside the module
    /// toplevel.
    pub allow_import_export_everywhere: bool,

    /// Whether a leading `#!` comment line is allowed.
    pub allow_hash_bang: bool,

    /// Collect errors and continue parsing instead of failing on the first
    /// error.
    pub tolerant: bool,

    /// Wrap parenthesized expressions in a ParenthesizedExpression node.
    pub preserve_parens: bool,

    /// Enforce that private field references resolve to a declaration in an
    /// enclosing class.
    pub check_private_fields: bool,

    /// Whether Annex B extensions are enabled.
    pub annex_b: bool,
}

impl Default for Options {
    fn default() -> Self {
        OptionsBuilder::new().build()
    }
}

pub struct OptionsBuilder(Options);

impl OptionsBuilder {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self(Options {
            ecma_version: EcmaVersion::Latest,
            source_type: SourceType::Script,
            allow_reserved: AllowReserved::Version,
            allow_return_outside_function: false,
            allow_await_outside_function: false,
            allow_import_export_everywhere: false,
            allow_hash_bang: true,
            tolerant: false,
            preserve_parens: false,
            check_private_fields: true,
            annex_b: true,
        })
    }

    /// Return the options that have been built, consuming the builder.
    pub fn build(self) -> Options {
        self.0
    }

    pub fn ecma_version(mut self, ecma_version: EcmaVersion) -> Self {
        self.0.ecma_version = ecma_version;
        self
    }

    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.0.source_type = source_type;
        self
    }

    pub fn allow_reserved(mut self, allow_reserved: AllowReserved) -> Self {
        self.0.allow_reserved = allow_reserved;
        self
    }

    pub fn allow_return_outside_function(mut self, allow: bool) -> Self {
        self.0.allow_return_outside_function = allow;
        self
    }

    pub fn allow_await_outside_function(mut self, allow: bool) -> Self {
        self.0.allow_await_outside_function = allow;
        self
    }

    pub fn allow_import_export_everywhere(mut self, allow: bool) -> Self {
        self.0.allow_import_export_everywhere = allow;
        self
    }

    pub fn allow_hash_bang(mut self, allow_hash_bang: bool) -> Self {
        self.0.allow_hash_bang = allow_hash_bang;
        self
    }

    pub fn tolerant(mut self, tolerant: bool) -> Self {
        self.0.tolerant = tolerant;
        self
    }

    pub fn preserve_parens(mut self, preserve_parens: bool) -> Self {
        self.0.preserve_parens = preserve_parens;
        self
    }

    pub fn check_private_fields(mut self, check_private_fields: bool) -> Self {
        self.0.check_private_fields = check_private_fields;
        self
    }

    pub fn annex_b(mut self, annex_b: bool) -> Self {
        self.0.annex_b = annex_b;
        self
    }
}

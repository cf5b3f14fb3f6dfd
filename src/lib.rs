pub mod common;
pub mod parser;

pub use common::options::{AllowReserved, EcmaVersion, Options, OptionsBuilder, SourceType};
pub use parser::source::Source;
pub use parser::{
    parse_expression, parse_expression_with_options, parse_module, parse_module_with_options,
    parse_script, parse_script_with_options, print_program, LocalizedParseError,
    LocalizedParseErrors, ParseError, ParseProgramResult, ParseResult,
};

pub mod ast;
mod keywords;
mod lexer;
pub mod loc;
mod parse_error;
#[allow(clippy::module_inception)]
mod parser;
mod printer;
mod scope;
pub mod source;
mod token;

pub use parse_error::{
    format_localized_parse_errors, LocalizedParseError, LocalizedParseErrors, ParseError,
    ParseResult,
};
pub use parser::{
    parse_expression, parse_expression_with_options, parse_module, parse_module_with_options,
    parse_script, parse_script_with_options, ParseProgramResult,
};
pub use printer::print_program;

use crate::common::options::EcmaVersion;

use super::token::Token;

/// Map an identifier string to its keyword token, if it is a keyword.
/// Dispatches on word length and leading byte before comparing the full
/// word, so that most identifiers are rejected after inspecting two bytes.
pub fn keyword_from_str(str: &str) -> Option<Token> {
    let bytes = str.as_bytes();

    let token = match bytes.len() {
        2 => match bytes[0] {
            b'a' if str == "as" => Token::As,
            b'd' if str == "do" => Token::Do,
            b'i' if str == "if" => Token::If,
            b'i' if str == "in" => Token::In,
            b'o' if str == "of" => Token::Of,
            _ => return None,
        },
        3 => match bytes[0] {
            b'f' if str == "for" => Token::For,
            b'g' if str == "get" => Token::Get,
            b'l' if str == "let" => Token::Let,
            b'n' if str == "new" => Token::New,
            b's' if str == "set" => Token::Set,
            b't' if str == "try" => Token::Try,
            b'v' if str == "var" => Token::Var,
            _ => return None,
        },
        4 => match bytes[0] {
            b'c' if str == "case" => Token::Case,
            b'e' if str == "else" => Token::Else,
            b'e' if str == "enum" => Token::Enum,
            b'f' if str == "from" => Token::From,
            b'n' if str == "null" => Token::Null,
            b't' if str == "this" => Token::This,
            b't' if str == "true" => Token::True,
            b'v' if str == "void" => Token::Void,
            b'w' if str == "with" => Token::With,
            _ => return None,
        },
        5 => match bytes[0] {
            b'a' if str == "async" => Token::Async,
            b'a' if str == "await" => Token::Await,
            b'b' if str == "break" => Token::Break,
            b'c' if str == "catch" => Token::Catch,
            b'c' if str == "class" => Token::Class,
            b'c' if str == "const" => Token::Const,
            b'f' if str == "false" => Token::False,
            b's' if str == "super" => Token::Super,
            b't' if str == "throw" => Token::Throw,
            b'w' if str == "while" => Token::While,
            b'y' if str == "yield" => Token::Yield,
            _ => return None,
        },
        6 => match bytes[0] {
            b'd' if str == "delete" => Token::Delete,
            b'e' if str == "export" => Token::Export,
            b'i' if str == "import" => Token::Import,
            b'r' if str == "return" => Token::Return,
            b's' if str == "static" => Token::Static,
            b's' if str == "switch" => Token::Switch,
            b't' if str == "typeof" => Token::Typeof,
            _ => return None,
        },
        7 => match bytes[0] {
            b'd' if str == "default" => Token::Default,
            b'e' if str == "extends" => Token::Extends,
            b'f' if str == "finally" => Token::Finally,
            _ => return None,
        },
        8 => match bytes[0] {
            b'c' if str == "continue" => Token::Continue,
            b'd' if str == "debugger" => Token::Debugger,
            b'f' if str == "function" => Token::Function,
            _ => return None,
        },
        10 => match bytes[0] {
            b'i' if str == "instanceof" => Token::InstanceOf,
            _ => return None,
        },
        _ => return None,
    };

    Some(token)
}

/// The reserved word category of an identifier name. Callers interpret the
/// category according to the current context (module vs script, strict vs
/// sloppy, binding vs reference).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReservedWordCategory {
    NotReserved,
    /// Reserved in all contexts at the target version.
    Always,
    /// Reserved only in modules and async contexts.
    ModuleOnly,
    /// Reserved only in strict mode code.
    StrictOnly,
    /// Usable as an identifier but may not be bound or assigned in strict
    /// mode.
    StrictBind,
    /// Future reserved word at the target version.
    Future,
}

pub fn classify_reserved_word(name: &str, version: EcmaVersion) -> ReservedWordCategory {
    match name {
        "break" | "case" | "catch" | "class" | "const" | "continue" | "debugger" | "default"
        | "delete" | "do" | "else" | "enum" | "export" | "extends" | "false" | "finally"
        | "for" | "function" | "if" | "import" | "in" | "instanceof" | "new" | "null"
        | "return" | "super" | "switch" | "this" | "throw" | "true" | "try" | "typeof"
        | "var" | "void" | "while" | "with" => ReservedWordCategory::Always,
        "await" => ReservedWordCategory::ModuleOnly,
        "implements" | "interface" | "let" | "package" | "private" | "protected" | "public"
        | "static" | "yield" => ReservedWordCategory::StrictOnly,
        "eval" | "arguments" => ReservedWordCategory::StrictBind,
        "abstract" | "boolean" | "byte" | "char" | "double" | "final" | "float" | "goto"
        | "int" | "long" | "native" | "short" | "synchronized" | "throws" | "transient"
        | "volatile"
            if version == EcmaVersion::ES3 =>
        {
            ReservedWordCategory::Future
        }
        _ => ReservedWordCategory::NotReserved,
    }
}

/// The full future-reserved set, used when reserved word checking is forced
/// regardless of target version.
pub fn is_future_reserved_any_version(name: &str) -> bool {
    matches!(
        name,
        "abstract"
            | "boolean"
            | "byte"
            | "char"
            | "double"
            | "final"
            | "float"
            | "goto"
            | "int"
            | "long"
            | "native"
            | "short"
            | "synchronized"
            | "throws"
            | "transient"
            | "volatile"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_through_display() {
        let words = [
            "as", "do", "if", "in", "of", "for", "get", "let", "new", "set", "try", "var",
            "case", "else", "enum", "from", "null", "this", "true", "void", "with", "async",
            "await", "break", "catch", "class", "const", "false", "super", "throw", "while",
            "yield", "delete", "export", "import", "return", "static", "switch", "typeof",
            "default", "extends", "finally", "continue", "debugger", "function", "instanceof",
        ];

        for word in words {
            let token = keyword_from_str(word).unwrap();
            assert_eq!(token.to_string(), word);
        }
    }

    #[test]
    fn non_keywords_are_rejected() {
        for word in ["", "x", "iff", "instanceofx", "classs", "awai", "functio"] {
            assert!(keyword_from_str(word).is_none());
        }
    }
}

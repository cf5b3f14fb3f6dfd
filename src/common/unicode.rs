use unicode_xid::UnicodeXID;

#[inline]
pub fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

#[inline]
pub fn is_ascii(char: char) -> bool {
    (char as u32) < 0x80
}

#[inline]
pub fn is_decimal_digit(char: char) -> bool {
    '0' <= char && char <= '9'
}

#[inline]
pub fn is_ascii_whitespace(char: char) -> bool {
    match char {
         ' '
        | '\t'
        // Vertical tab
        | '\u{000B}'
        // Form feed
        | '\u{000C}' => true,
        _ => false,
    }
}

#[inline]
pub fn is_unicode_whitespace(char: char) -> bool {
    match char {
    // All non-ascii characters in the unicode Space_Separator category
        '\u{00A0}'
        | '\u{1680}'
        | '\u{2000}'..='\u{200A}'
        | '\u{202F}'
        | '\u{205F}'
        | '\u{3000}'
        // And the zero width non breaking space
        | '\u{FEFF}'
        => true,
        _ => false,
    }
}

#[inline]
pub fn is_unicode_newline(char: char) -> bool {
    char == '\u{2028}' || char == '\u{2029}'
}

#[inline]
pub fn is_ascii_newline(char: char) -> bool {
    match char {
        '\n' | '\r' => true,
        _ => false,
    }
}

#[inline]
pub fn is_newline(char: char) -> bool {
    is_ascii_newline(char) || is_unicode_newline(char)
}

/// Can this character appear as the first character of an identifier.
#[inline]
pub fn is_id_start_ascii(char: char) -> bool {
    match char {
        'a'..='z' | 'A'..='Z' | '_' | '$' => true,
        _ => false,
    }
}

/// Can this character appear in an identifier (after the first character).
#[inline]
pub fn is_id_part_ascii(char: char) -> bool {
    match char {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$' => true,
        _ => false,
    }
}

#[inline]
pub fn is_id_start_unicode(char: char) -> bool {
    UnicodeXID::is_xid_start(char)
}

#[inline]
pub fn is_id_continue_unicode(char: char) -> bool {
    UnicodeXID::is_xid_continue(char)
}

#[inline]
pub fn is_id_part_unicode(char: char) -> bool {
    // Either part of the unicode ID_Continue, ZWNJ, or ZWJ
    is_id_continue_unicode(char) || char == '\u{200C}' || char == '\u{200D}'
}

#[inline]
pub fn is_id_start(char: char) -> bool {
    is_id_start_ascii(char) || is_id_start_unicode(char)
}

#[inline]
pub fn is_id_part(char: char) -> bool {
    is_id_part_ascii(char) || is_id_part_unicode(char)
}

pub fn get_binary_value(char: char) -> Option<u32> {
    match char {
        '0' => Some(0),
        '1' => Some(1),
        _ => None,
    }
}

pub fn get_octal_value(char: char) -> Option<u32> {
    match char {
        '0'..='7' => Some(char as u32 - '0' as u32),
        _ => None,
    }
}

pub fn get_hex_value(char: char) -> Option<u32> {
    match char {
        '0'..='9' => Some(char as u32 - '0' as u32),
        'a'..='f' => Some(char as u32 - 'a' as u32 + 10),
        'A'..='F' => Some(char as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

//! Percent-encoding for link components.
//!
//! Every set here encodes all non-ASCII bytes (UTF-8) and controls. Output
//! uses uppercase hex and encodes space as `%20`, never `+`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Same output as JavaScript's `encodeURIComponent`: only
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` pass through.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Same output as JavaScript's `encodeURI`: reserved characters that give a
/// URI its structure are kept.
pub const FULL_URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Addresses inside a `mailto:` link. `@` and the `,` list separator are
/// legal there and read better unescaped.
pub const MAILTO_ADDRESS: &AsciiSet = &COMPONENT.remove(b'@').remove(b',');

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, FULL_URI).to_string()
}

pub fn encode_address(input: &str) -> String {
    utf8_percent_encode(input, MAILTO_ADDRESS).to_string()
}

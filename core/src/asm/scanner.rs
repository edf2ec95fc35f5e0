//! Positional scanning over the raw source bytes.
//!
//! Every function takes a buffer and an offset and hands back another
//! offset. `None` means the end of the buffer was reached where more input
//! was wanted; callers decide whether that is the end of the program or a
//! fatal error.

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// First non-whitespace offset at or after `p`.
pub fn skip_space(src: &[u8], p: usize) -> Option<usize> {
    let p = p.min(src.len());
    src[p..].iter().position(|&b| !is_space(b)).map(|n| p + n)
}

/// Offset one past the token starting at `p`.
pub fn next_space(src: &[u8], p: usize) -> usize {
    let p = p.min(src.len());
    src[p..].iter().position(|&b| is_space(b)).map_or(src.len(), |n| p + n)
}

pub fn skip_comma(src: &[u8], p: usize) -> Option<usize> {
    let p = p.min(src.len());
    src[p..].iter().position(|&b| b != b',').map(|n| p + n)
}

/// Offset of the next `\n`, or the end of the buffer.
pub fn next_eol(src: &[u8], p: usize) -> usize {
    let p = p.min(src.len());
    src[p..].iter().position(|&b| b == b'\n').map_or(src.len(), |n| p + n)
}

pub fn token(src: &[u8], p: usize) -> &[u8] {
    let p = p.min(src.len());
    &src[p..next_space(src, p)]
}

/// Parses a leading integer literal the way C's `strtol` with base 0 reads
/// decimal and hex: optional blanks, optional sign, `0x`/`0X` prefix for
/// hex. Anything after the digits is ignored. Returns `None` when no digit
/// was found; a value that overflows `i64` saturates to `i64::MAX` or
/// `i64::MIN`.
pub fn integer(text: &[u8]) -> Option<i64> {
    let mut rest = text;
    while let [b' ' | b'\t' | b'\r', tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let radix = match rest {
        [b'0', b'x' | b'X', tail @ ..] if tail.first().map_or(false, u8::is_ascii_hexdigit) => {
            rest = tail;
            16
        }
        _ => 10,
    };

    let digits = rest
        .iter()
        .take_while(|b| (**b as char).is_digit(radix))
        .count();
    if digits == 0 {
        return None;
    }

    let saturated = if negative { i64::MIN } else { i64::MAX };
    let mut value: i64 = 0;
    for &b in &rest[..digits] {
        let digit = (b as char).to_digit(radix)? as i64;
        let next = value
            .checked_mul(radix as i64)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) });
        value = match next {
            Some(v) => v,
            None => return Some(saturated),
        };
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_space_reports_end_of_input() {
        assert_eq!(skip_space(b"  \t\r\nADD", 0), Some(5));
        assert_eq!(skip_space(b"ADD", 0), Some(0));
        assert_eq!(skip_space(b" \n ", 0), None);
        assert_eq!(skip_space(b"", 0), None);
        assert_eq!(skip_space(b"AB", 7), None);
    }

    #[test]
    fn tokens_end_at_whitespace() {
        let src = b"STORE R0, 5\nHALT";
        assert_eq!(next_space(src, 0), 5);
        assert_eq!(token(src, 0), b"STORE");
        assert_eq!(token(src, 6), b"R0,");
        assert_eq!(token(src, 12), b"HALT");
        assert_eq!(token(src, 16), b"");
    }

    #[test]
    fn commas_and_line_ends() {
        let src = b",,, 5\nX";
        assert_eq!(skip_comma(src, 0), Some(3));
        assert_eq!(skip_comma(b",,", 0), None);
        assert_eq!(next_eol(src, 0), 5);
        assert_eq!(next_eol(src, 6), src.len());
    }

    #[test]
    fn integer_literals() {
        assert_eq!(integer(b"5"), Some(5));
        assert_eq!(integer(b"  -42 ; trailing"), Some(-42));
        assert_eq!(integer(b"+7"), Some(7));
        assert_eq!(integer(b"0x1F"), Some(31));
        assert_eq!(integer(b"0XfF333333"), Some(0xFF33_3333));
        assert_eq!(integer(b"-0x10"), Some(-16));
        assert_eq!(integer(b"0x"), Some(0));
        assert_eq!(integer(b"12abc"), Some(12));
        assert_eq!(integer(b""), None);
        assert_eq!(integer(b"R0"), None);
        assert_eq!(integer(b"-"), None);
        assert_eq!(integer(b"-9223372036854775808"), Some(i64::MIN));
        assert_eq!(integer(b"99999999999999999999"), Some(i64::MAX));
        assert_eq!(integer(b"-0xFFFFFFFFFFFFFFFFFF"), Some(i64::MIN));
    }
}

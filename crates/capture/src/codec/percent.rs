/// Strict percent-decoding of raw octets.
///
/// Returns `None` when a `%` is not followed by two hex digits. With `plus_as_space` a
/// `+` decodes to a space, as in `application/x-www-form-urlencoded`.
pub(crate) fn percent_decode(input: &[u8], plus_as_space: bool) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' => {
                let high = hex_value(*input.get(i + 1)?)?;
                let low = hex_value(*input.get(i + 2)?)?;
                out.push((high << 4) | low);
                i += 3;
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Some(out)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_escapes() {
        assert_eq!(percent_decode(b"Europe%2FMinsk", false).unwrap(), b"Europe/Minsk");
        assert_eq!(percent_decode(b"%e2%9C%93", false).unwrap(), "✓".as_bytes());
        assert_eq!(percent_decode(b"", false).unwrap(), b"");
    }

    #[test]
    fn decode_plus() {
        assert_eq!(percent_decode(b"a+b", true).unwrap(), b"a b");
        assert_eq!(percent_decode(b"a+b", false).unwrap(), b"a+b");
    }

    #[test]
    fn reject_invalid_escapes() {
        assert_eq!(percent_decode(b"%zz", true), None);
        assert_eq!(percent_decode(b"abc%", true), None);
        assert_eq!(percent_decode(b"abc%4", true), None);
    }
}

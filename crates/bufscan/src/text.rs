//! Word, line and character readers.
//!
//! Destinations are plain byte vectors; input is not assumed to be UTF-8.

use crate::{
    buffer::{InputBuffer, is_space},
    source::ByteSource,
};

#[inline]
fn is_line_end(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Skips whitespace, then replaces `dst` with the following run of
/// non-whitespace bytes.
///
/// Returns `false`, leaving `dst` untouched, if the input ends before a word
/// starts.
pub(crate) fn read_word<S: ByteSource>(input: &mut InputBuffer<S>, dst: &mut Vec<u8>) -> bool {
    input.skip_whitespace();
    if input.at_end() {
        return false;
    }
    dst.clear();
    input.copy_while(dst, |b| !is_space(b));
    true
}

/// Replaces `dst` with the rest of the current line.
///
/// The terminator (`\n`, `\r` or `\r\n`) is consumed but not stored. With a
/// `limit`, at most that many bytes are stored and the remainder of the line
/// is discarded. Returns `false` only when the input is already at its end.
pub(crate) fn read_line<S: ByteSource>(
    input: &mut InputBuffer<S>,
    dst: &mut Vec<u8>,
    limit: Option<usize>,
) -> bool {
    if input.at_end() {
        return false;
    }
    dst.clear();
    match limit {
        None => {
            input.copy_while(dst, |b| !is_line_end(b));
        }
        Some(mut room) => {
            input.copy_while(dst, |b| {
                if is_line_end(b) || room == 0 {
                    return false;
                }
                room -= 1;
                true
            });
            input.discard_while(|b| !is_line_end(b));
        }
    }
    match input.next() {
        Some(b'\r') => {
            if input.peek() == Some(b'\n') {
                input.consume(1);
            }
        }
        Some(b) => debug_assert_eq!(b, b'\n'),
        None => {}
    }
    true
}

/// Like [`read_line`] with a limit, but first skips any empty lines.
pub(crate) fn read_nonempty_line<S: ByteSource>(
    input: &mut InputBuffer<S>,
    dst: &mut Vec<u8>,
    limit: usize,
) -> bool {
    input.discard_while(is_line_end);
    read_line(input, dst, Some(limit))
}

/// Consumes one byte, optionally skipping whitespace first.
pub(crate) fn read_char<S: ByteSource>(
    input: &mut InputBuffer<S>,
    skip_whitespace: bool,
) -> Option<u8> {
    if skip_whitespace {
        input.skip_whitespace();
    }
    input.next()
}

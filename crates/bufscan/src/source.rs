//! Byte providers that back a [`Scanner`](crate::Scanner).
//!
//! The scanner only ever asks its source for "up to `buf.len()` more bytes".
//! A return of `0` means the stream is finished for good; the buffer latches
//! that and never calls the source again.

use std::io::{self, Read};

use tracing::warn;

/// An opaque provider of input bytes.
pub trait ByteSource {
    /// Fills a prefix of `buf` and returns how many bytes were written.
    ///
    /// Returning `0` signals permanent exhaustion.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }
}

/// Adapts any [`Read`] implementation (stdin, files, sockets) into a
/// [`ByteSource`].
///
/// `Interrupted` reads are retried. Any other error ends the stream; the
/// error is kept and can be retrieved with [`IoSource::take_error`].
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    failed: bool,
    error: Option<io::Error>,
}

impl<R: Read> IoSource<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            failed: false,
            error: None,
        }
    }

    /// Returns the I/O error that terminated the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        if self.failed {
            return 0;
        }
        loop {
            match self.inner.read(buf) {
                Ok(n) => return n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!(
                        target: "bufscan::buffer",
                        error = %e,
                        "read failed, treating as end of input"
                    );
                    self.failed = true;
                    self.error = Some(e);
                    return 0;
                }
            }
        }
    }
}

/// Serves bytes from an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Creates a source over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        n
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct Flaky {
        calls: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => Err(io::Error::new(io::ErrorKind::Interrupted, "again")),
                2 => {
                    buf[0] = b'7';
                    Ok(1)
                }
                _ => Err(io::Error::other("broken pipe")),
            }
        }
    }

    #[test]
    fn io_source_retries_interrupted_and_latches_errors() {
        let mut src = IoSource::new(Flaky { calls: 0 });
        let mut buf = [0u8; 4];
        assert_eq!(src.read(&mut buf), 1);
        assert_eq!(buf[0], b'7');
        assert_eq!(src.read(&mut buf), 0);
        // Once failed, the reader is not consulted again.
        assert_eq!(src.read(&mut buf), 0);
        assert_eq!(src.into_inner().calls, 3);
    }

    #[test]
    fn io_source_keeps_the_terminating_error() {
        let mut src = IoSource::new(Flaky { calls: 1 });
        let mut buf = [0u8; 4];
        assert_eq!(src.read(&mut buf), 1);
        assert_eq!(src.read(&mut buf), 0);
        let err = src.take_error().expect("error retained");
        assert_eq!(err.to_string(), "broken pipe");
        assert!(src.take_error().is_none());
        assert_eq!(src.read(&mut buf), 0);
        assert_eq!(src.into_inner().calls, 3);
    }

    #[test]
    fn slice_source_hands_out_prefixes() {
        let mut src = SliceSource::new(b"abcde");
        let mut buf = [0u8; 2];
        assert_eq!(src.read(&mut buf), 2);
        assert_eq!(&buf, b"ab");
        assert_eq!(src.remaining(), b"cde");
        assert_eq!(src.read(&mut buf), 2);
        assert_eq!(src.read(&mut buf), 1);
        assert_eq!(buf[0], b'e');
        assert_eq!(src.read(&mut buf), 0);
    }
}

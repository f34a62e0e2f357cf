//! Strict big-endian cursor over an encoded token.

use common::TokenError;

/// Consumes a byte slice front to back, failing on any short read.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Take exactly `n` bytes.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], TokenError> {
        if n > self.buf.len() {
            return Err(TokenError::TruncatedInput {
                needed: n,
                remaining: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], TokenError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, TokenError> {
        self.take_array().map(u16::from_be_bytes)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, TokenError> {
        self.take_array().map(i32::from_be_bytes)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64, TokenError> {
        self.take_array().map(i64::from_be_bytes)
    }

    /// Read a 16-bit length prefix followed by that many bytes.
    pub(crate) fn read_prefixed(&mut self) -> Result<&'a [u8], TokenError> {
        let len = usize::from(self.read_u16()?);
        self.take(len)
    }

    /// Succeeds only if every byte has been consumed.
    pub(crate) fn finish(self) -> Result<(), TokenError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(TokenError::TrailingData {
                remaining: self.buf.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let mut r = Reader::new(&[0x12, 0x34, 0x00, 0x00, 0x00, 0x2A]);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_i32().unwrap(), 42);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn short_read_reports_counts() {
        let mut r = Reader::new(&[0x00, 0x01, 0x02]);
        assert_eq!(
            r.read_i64(),
            Err(TokenError::TruncatedInput { needed: 8, remaining: 3 })
        );
    }

    #[test]
    fn prefixed_reads_declared_length() {
        let mut r = Reader::new(&[0x00, 0x03, b'a', b'b', b'c', 0xFF]);
        assert_eq!(r.read_prefixed().unwrap(), b"abc");
        assert!(!r.is_empty());
        assert_eq!(r.finish(), Err(TokenError::TrailingData { remaining: 1 }));
    }
}

// I/O utilities for reading tag bytes

use std::io::{self, Read};

/// Read until `buf` is full or the reader is exhausted.
///
/// Unlike `read_exact`, a short source is not an error: the number of bytes
/// actually read is returned so the caller can decide what a short read means.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read at most `limit` bytes into a fresh buffer.
pub fn read_limited<R: Read>(reader: &mut R, limit: usize) -> io::Result<Vec<u8>> {
    let mut data = Vec::with_capacity(limit.min(1 << 20));
    reader.take(limit as u64).read_to_end(&mut data)?;
    Ok(data)
}

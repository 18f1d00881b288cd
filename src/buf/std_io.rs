use std::io::{self, SeekFrom};

use super::{BufRw, Error, Whence};

impl io::Read for BufRw {
    /// Short reads are `Ok`; the end of the region reads as `Ok(0)`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match BufRw::read(self, buf) {
            Ok(n) => Ok(n),
            Err(e) => Ok(e.count()),
        }
    }
}

impl io::Write for BufRw {
    /// Short writes are `Ok`, so `write_all` fails with `WriteZero` once the
    /// region is full.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match BufRw::write(self, buf) {
            Ok(n) => Ok(n),
            Err(e) => Ok(e.count()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for BufRw {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => (n, Whence::Start),
            SeekFrom::Current(n) => (n as u64, Whence::Current),
            SeekFrom::End(n) if n <= 0 => (n.unsigned_abs(), Whence::End),
            // past the end
            SeekFrom::End(_) => return Err(Error::InsufficientCapacity { count: 0 }.into()),
        };
        Ok(BufRw::seek(self, offset, whence)?)
    }
}

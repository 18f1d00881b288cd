use std::{cell::Ref, io};

use tracing::trace;

use super::{region::copy_slice, whence::check_offset, Error, Region};

/// Stream-like I/O over a [`Region`] of fixed capacity.
///
/// Reads and writes happen at a common offset and never cross the end of
/// the region. The bytes before the offset are the head, the bytes from
/// the offset onward are the rest.
///
/// `BufRw` is single-threaded. Several instances may share one region (see
/// [`BufRw::share_view`]); each keeps its own offset.
#[derive(Debug)]
pub struct BufRw {
    region: Region,
    offset: usize,
}

impl BufRw {
    #[inline]
    fn check_rep(&self) {
        debug_assert!(self.offset <= self.region.len());
    }

    /// Builds a `BufRw` over `region` without copying it.
    ///
    /// The caller guarantees `offset <= region.len()`; it is not validated.
    /// Borrowed bytes are rejected, since wrapping them would need a copy:
    ///
    /// ```compile_fail
    /// let mem = [0u8; 3];
    /// let _ = boundio::BufRw::wrap(&mem[..], 0);
    /// ```
    pub fn wrap(region: impl Into<Region>, offset: usize) -> Self {
        let this = Self {
            region: region.into(),
            offset,
        };
        this.check_rep();
        this
    }

    /// Builds a `BufRw` over `capacity` zeroed bytes at offset 0.
    pub fn allocate(capacity: usize) -> Self {
        Self::wrap(Region::zeroed(capacity), 0)
    }

    #[must_use]
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(super) fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
        self.check_rep();
    }

    /// The handle to the underlying storage.
    #[must_use]
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The whole region.
    ///
    /// # Panics
    ///
    /// The guard must be dropped before writing through any `BufRw`
    /// sharing this region, or that write panics.
    #[must_use]
    pub fn content(&self) -> Ref<'_, [u8]> {
        self.region.data()
    }

    /// The region up to the offset (exclusive).
    #[must_use]
    pub fn head(&self) -> Ref<'_, [u8]> {
        let offset = self.offset;
        Ref::map(self.region.data(), |buf| &buf[..offset])
    }

    /// The region from the offset (inclusive) onward.
    #[must_use]
    pub fn rest(&self) -> Ref<'_, [u8]> {
        let offset = self.offset;
        Ref::map(self.region.data(), |buf| &buf[offset..])
    }

    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Number of bytes left to read or write; the length of [`BufRw::rest`].
    #[must_use]
    #[inline]
    pub fn rest_len(&self) -> usize {
        self.capacity() - self.offset
    }

    /// Returns a copy of the whole region.
    ///
    /// Reuses the allocation of `mem` if it can hold the copy.
    pub fn copy_content(&self, mem: Vec<u8>) -> Vec<u8> {
        self.region.copy_into(mem)
    }

    /// Returns a copy of the head, reusing `mem` if it is large enough.
    pub fn copy_head(&self, mem: Vec<u8>) -> Vec<u8> {
        copy_slice(&self.head(), mem)
    }

    /// Returns a copy of the rest, reusing `mem` if it is large enough.
    pub fn copy_rest(&self, mem: Vec<u8>) -> Vec<u8> {
        copy_slice(&self.rest(), mem)
    }

    /// Returns a `BufRw` over the same region with an independent offset,
    /// initially equal to this one.
    #[must_use]
    pub fn share_view(&self) -> BufRw {
        Self::wrap(self.region.clone(), self.offset)
    }

    /// Returns an independent `BufRw` with a copy of the content and the
    /// same offset.
    ///
    /// Reuses the allocation of `mem` if it can hold the copy.
    pub fn copy_view(&self, mem: Vec<u8>) -> BufRw {
        Self::wrap(self.copy_content(mem), self.offset)
    }

    /// Reads as many bytes as possible into `buf`.
    ///
    /// Fails with [`Error::EndOfData`] if fewer than `buf.len()` bytes were
    /// read; the offset still advances past the bytes that were.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = {
            let rest = self.rest();
            let n = usize::min(rest.len(), buf.len());
            buf[..n].copy_from_slice(&rest[..n]);
            n
        };
        self.set_offset(self.offset + n);
        if n < buf.len() {
            trace!(offset = self.offset, requested = buf.len(), count = n, "short read");
            return Err(Error::EndOfData { count: n });
        }
        Ok(n)
    }

    /// Writes as many bytes as possible from `buf`.
    ///
    /// Fails with [`Error::InsufficientCapacity`] if fewer than `buf.len()`
    /// bytes were written. The partial write is kept.
    ///
    /// # Panics
    ///
    /// Panics if a guard returned by [`BufRw::content`], [`BufRw::head`] or
    /// [`BufRw::rest`] of any `BufRw` sharing the region is alive.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let n = {
            let mut region = self.region.data_mut();
            let rest = &mut region[self.offset..];
            let n = usize::min(rest.len(), buf.len());
            rest[..n].copy_from_slice(&buf[..n]);
            n
        };
        self.set_offset(self.offset + n);
        if n < buf.len() {
            trace!(offset = self.offset, requested = buf.len(), count = n, "short write");
            return Err(Error::InsufficientCapacity { count: n });
        }
        Ok(n)
    }

    /// Reads once from `src` into the rest of the region.
    ///
    /// Advances the offset by the number of bytes `src` produced, which is
    /// also returned. `src` is called exactly once; errors from it are
    /// returned unchanged.
    ///
    /// While the region has other handles, `src` may be one of them, so the
    /// bytes are staged through a scratch buffer and copied in afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `src` claims to have read more bytes than it was given.
    pub fn read_from<R: io::Read + ?Sized>(&mut self, src: &mut R) -> io::Result<u64> {
        let len = self.rest_len();
        let n = if self.region.is_aliased() {
            let mut staged = vec![0; len];
            let n = src.read(&mut staged)?;
            assert!(n <= len, "reader overran the buffer");
            let start = self.offset;
            self.region.data_mut()[start..start + n].copy_from_slice(&staged[..n]);
            n
        } else {
            let mut region = self.region.data_mut();
            let n = src.read(&mut region[self.offset..])?;
            assert!(n <= len, "reader overran the buffer");
            n
        };
        self.set_offset(self.offset + n);
        Ok(n as u64)
    }

    /// Writes the rest of the region to `dst` with a single call.
    ///
    /// Advances the offset by the number of bytes `dst` accepted, which is
    /// also returned. Errors from `dst` are returned unchanged.
    ///
    /// While the region has other handles, `dst` may be one of them, so it is
    /// handed a snapshot of the rest instead of the region itself.
    ///
    /// # Panics
    ///
    /// Panics if `dst` claims to have accepted more bytes than it was given.
    pub fn write_to<W: io::Write + ?Sized>(&mut self, dst: &mut W) -> io::Result<u64> {
        let len = self.rest_len();
        let n = if self.region.is_aliased() {
            let staged = self.copy_rest(Vec::new());
            dst.write(&staged)?
        } else {
            let rest = self.rest();
            dst.write(&rest)?
        };
        assert!(n <= len, "writer accepted more bytes than it was given");
        self.set_offset(self.offset + n);
        Ok(n as u64)
    }

    /// Like [`BufRw::read`], but starts at the absolute `offset` and leaves
    /// the current offset untouched.
    ///
    /// Fails with [`Error::SeekBeforeStart`] if `offset` is negative,
    /// [`Error::OffsetOverflow`] if it does not fit into an `isize`, and
    /// [`Error::InsufficientCapacity`] if it exceeds the capacity.
    pub fn read_at(&self, buf: &mut [u8], offset: i64) -> Result<usize, Error> {
        self.view_at(offset)?.read(buf)
    }

    /// Like [`BufRw::write`], but starts at the absolute `offset` and leaves
    /// the current offset untouched.
    ///
    /// Offsets are validated as in [`BufRw::read_at`].
    pub fn write_at(&self, buf: &[u8], offset: i64) -> Result<usize, Error> {
        self.view_at(offset)?.write(buf)
    }

    fn view_at(&self, offset: i64) -> Result<BufRw, Error> {
        let offset = check_offset(i128::from(offset), self.capacity())?;
        let mut view = self.share_view();
        view.set_offset(offset);
        Ok(view)
    }
}

/// Builds a [`BufRw`] over `region` at `offset` without copying.
pub fn wrap(region: impl Into<Region>, offset: usize) -> BufRw {
    BufRw::wrap(region, offset)
}

/// Builds a [`BufRw`] over `capacity` zeroed bytes.
pub fn allocate(capacity: usize) -> BufRw {
    BufRw::allocate(capacity)
}

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// Fixed-length byte storage shared by every [`BufRw`](super::BufRw) derived from it.
///
/// Cloning a `Region` aliases the storage: writes through one handle are
/// visible through all others. The length never changes after construction.
#[derive(Debug, Clone)]
pub struct Region {
    buf: Rc<RefCell<Vec<u8>>>,
    len: usize,
}

impl Region {
    #[inline]
    fn check_rep(&self) {
        debug_assert_eq!(self.buf.borrow().len(), self.len);
    }

    pub fn zeroed(len: usize) -> Self {
        Self::from(vec![0; len])
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether other handles to this storage exist.
    #[must_use]
    pub fn is_aliased(&self) -> bool {
        Rc::strong_count(&self.buf) > 1
    }

    /// Whether `self` and `other` alias the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Region) -> bool {
        Rc::ptr_eq(&self.buf, &other.buf)
    }

    /// Borrows the whole region.
    ///
    /// # Panics
    ///
    /// Panics if the region is being written through some handle at the
    /// same time.
    #[must_use]
    pub fn data(&self) -> Ref<'_, [u8]> {
        Ref::map(self.buf.borrow(), |buf| buf.as_slice())
    }

    /// Borrows the whole region for writing.
    ///
    /// The returned guard hands out a slice, so the length stays fixed.
    ///
    /// # Panics
    ///
    /// Panics if any other guard over the region is alive.
    #[must_use]
    pub fn data_mut(&self) -> RefMut<'_, [u8]> {
        RefMut::map(self.buf.borrow_mut(), |buf| buf.as_mut_slice())
    }

    /// Copies the region into `mem`, reusing its allocation when it is
    /// large enough.
    pub fn copy_into(&self, mem: Vec<u8>) -> Vec<u8> {
        copy_slice(&self.data(), mem)
    }

    /// Unwraps the storage if this is the last handle to it.
    pub fn try_into_inner(self) -> Result<Vec<u8>, Region> {
        let len = self.len;
        Rc::try_unwrap(self.buf)
            .map(RefCell::into_inner)
            .map_err(|buf| Region { buf, len })
    }
}

impl From<Vec<u8>> for Region {
    fn from(buf: Vec<u8>) -> Self {
        let len = buf.len();
        let this = Region {
            buf: Rc::new(RefCell::new(buf)),
            len,
        };
        this.check_rep();
        this
    }
}

impl From<Box<[u8]>> for Region {
    fn from(buf: Box<[u8]>) -> Self {
        Self::from(Vec::from(buf))
    }
}

pub(crate) fn copy_slice(src: &[u8], mut mem: Vec<u8>) -> Vec<u8> {
    mem.clear();
    mem.extend_from_slice(src);
    mem
}

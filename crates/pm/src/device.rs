use types::{Frame, PageNum, PhysAddr, Word};

/// Physical-memory primitives the translation layer is built on.
///
/// Implementations provide word access at physical addresses plus the two
/// swap hooks. All four primitives are infallible at this layer; a device
/// that can fail must handle it below this interface.
pub trait FrameDevice {
    /// Word stored at `addr` (`frame * page_size + intra_frame_index`).
    fn read(&self, addr: PhysAddr) -> Word;

    /// Store `value` at `addr`.
    fn write(&mut self, addr: PhysAddr, value: Word);

    /// Persist the frame's current content under `page` in backing
    /// storage. Called exactly once per reclaimed live leaf frame,
    /// before its content is overwritten.
    fn evict(&mut self, frame: Frame, page: PageNum);

    /// Populate the frame from backing storage for `page`. Called exactly
    /// once whenever a leaf frame is freshly materialized.
    fn restore(&mut self, frame: Frame, page: PageNum);
}

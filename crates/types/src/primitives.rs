/// A machine word as stored in physical memory. Page-table entries are
/// words holding a child frame number (0 = absent).
pub type Word = u64;

/// Virtual address within the simulated address space.
pub type VirtAddr = u64;

/// Physical word address: `frame * page_size + intra_frame_index`.
pub type PhysAddr = u64;

/// Index of a physical frame in `[0, num_frames)`.
pub type Frame = u64;

/// Page number, i.e. `vaddr >> offset_width`.
pub type PageNum = u64;

/// The page-table root lives in frame 0 and is never reallocated.
pub const ROOT_FRAME: Frame = 0;

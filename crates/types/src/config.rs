use crate::primitives::{PageNum, VirtAddr};

/// Geometry of the simulated address space, fixed at construction.
///
/// A virtual address of `virt_width` bits splits into `depth` table-index
/// parts of `part_width()` bits each (most-significant first) followed by
/// an `offset_width`-bit page offset. The ceiling in `part_width()` can
/// overshoot the available bits; the top-level part simply has fewer
/// meaningful bits and the masks below handle that.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MmuConfig {
    virt_width: u32,
    offset_width: u32,
    depth: u32,
    num_frames: u64,
}

impl MmuConfig {
    /// Panics on geometry that cannot be expressed in `u64` arithmetic.
    /// Capacity (`num_frames` large enough for the root plus one full
    /// path) is the caller's contract and is not checked here.
    pub fn new(virt_width: u32, offset_width: u32, depth: u32, num_frames: u64) -> Self {
        assert!(virt_width > 0 && virt_width <= 63, "unsupported virtual address width");
        assert!(offset_width > 0 && offset_width < virt_width, "offset width out of range");
        assert!(depth >= 1, "table depth must be at least 1");
        let cfg = Self {
            virt_width,
            offset_width,
            depth,
            num_frames,
        };
        debug_assert!(cfg.part_width() * depth + offset_width >= virt_width);
        cfg
    }

    pub fn virt_width(&self) -> u32 {
        self.virt_width
    }

    pub fn offset_width(&self) -> u32 {
        self.offset_width
    }

    /// Depth of the table tree; leaves sit at this level.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn num_frames(&self) -> u64 {
        self.num_frames
    }

    /// Words per frame (and entries per table).
    pub fn page_size(&self) -> u64 {
        1u64 << self.offset_width
    }

    /// Bits per table-index part: `ceil((V - O) / D)`.
    pub fn part_width(&self) -> u32 {
        let translated = self.virt_width - self.offset_width;
        (translated + self.depth - 1) / self.depth
    }

    /// Size of the page-number space, `2^(V - O)`.
    pub fn num_pages(&self) -> u64 {
        1u64 << (self.virt_width - self.offset_width)
    }

    /// True iff `vaddr` fits in the configured address width.
    pub fn validate(&self, vaddr: VirtAddr) -> bool {
        vaddr < 1u64 << self.virt_width
    }

    /// Table index for level `i` (0 = root level, most-significant part).
    pub fn part(&self, i: u32, vaddr: VirtAddr) -> u64 {
        let shift = self.offset_width + self.part_width() * (self.depth - 1 - i);
        let mask = (1u64 << self.part_width()) - 1;
        (vaddr >> shift) & mask
    }

    /// Intra-page offset of `vaddr`.
    pub fn offset(&self, vaddr: VirtAddr) -> u64 {
        vaddr & ((1u64 << self.offset_width) - 1)
    }

    /// Page number containing `vaddr`.
    pub fn page_number(&self, vaddr: VirtAddr) -> PageNum {
        vaddr >> self.offset_width
    }
}

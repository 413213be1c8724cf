use log::trace;
use pm::FrameDevice;
use types::{Frame, MmuConfig, PhysAddr, VirtAddr, ROOT_FRAME};

use crate::allocator;

/// Resolves `vaddr` (already validated) to the physical address of the
/// target word, materializing missing tables and the leaf page on the
/// way down. Every call re-walks from the root; nothing is cached.
pub(crate) fn resolve<D: FrameDevice>(cfg: &MmuConfig, device: &mut D, vaddr: VirtAddr) -> PhysAddr {
    let mut current = ROOT_FRAME;
    for level in 0..cfg.depth() {
        let entry_addr = current * cfg.page_size() + cfg.part(level, vaddr);
        let mut next = device.read(entry_addr);
        if next == 0 {
            next = allocator::find_frame(cfg, device, vaddr);
            device.write(entry_addr, next);
            if level == cfg.depth() - 1 {
                device.restore(next, cfg.page_number(vaddr));
                trace!("materialized page {} in frame {}", cfg.page_number(vaddr), next);
            } else {
                zero_fill(cfg, device, next);
                trace!("materialized level-{} table in frame {}", level + 1, next);
            }
        }
        current = next;
    }
    current * cfg.page_size() + cfg.offset(vaddr)
}

/// Zeroes every word of `frame`, turning it into an empty table.
pub(crate) fn zero_fill<D: FrameDevice>(cfg: &MmuConfig, device: &mut D, frame: Frame) {
    let base = frame * cfg.page_size();
    for i in 0..cfg.page_size() {
        device.write(base + i, 0);
    }
}

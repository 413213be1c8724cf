use log::debug;
use pm::FrameDevice;
use types::{Frame, MmuConfig, PageNum, PhysAddr, VirtAddr, ROOT_FRAME};

/// Priority-1 hit: an empty table, identified by the physical address of
/// the parent entry that references it.
struct ZeroTable {
    parent_entry: PhysAddr,
}

/// Priority-3 candidate: a resident leaf page and its distance to the
/// page being brought in.
struct Victim {
    frame: Frame,
    page: PageNum,
    parent_entry: PhysAddr,
    distance: u64,
}

/// Picks the frame to back a missing table or leaf on the path of
/// `vaddr`. Three strategies, strictly ordered, first success wins:
///
/// 1. reclaim a table whose entries are all zero (never one on the path
///    currently being resolved),
/// 2. hand out the lowest frame index no table references yet,
/// 3. evict the resident leaf with maximal cyclic distance to the page
///    being brought in.
///
/// Always returns a non-root frame. A configuration with enough frames
/// for the root plus one full path cannot exhaust all three tiers.
pub(crate) fn find_frame<D: FrameDevice>(cfg: &MmuConfig, device: &mut D, vaddr: VirtAddr) -> Frame {
    if let Some(hit) = find_zero_table(cfg, device, vaddr, ROOT_FRAME, 0, 0) {
        let frame = device.read(hit.parent_entry);
        device.write(hit.parent_entry, 0);
        debug!("reclaiming empty table frame {}", frame);
        return frame;
    }

    let max_used = max_referenced_frame(cfg, device, ROOT_FRAME, 0);
    if max_used + 1 < cfg.num_frames() {
        debug!("allocating unused frame {}", max_used + 1);
        return max_used + 1;
    }

    let target = cfg.page_number(vaddr);
    let victim = find_victim(cfg, device, ROOT_FRAME, 0, 0, 0, target);
    debug_assert_ne!(victim.frame, ROOT_FRAME, "no evictable leaf found");
    device.write(victim.parent_entry, 0);
    device.evict(victim.frame, victim.page);
    debug!(
        "evicting page {} from frame {} (distance {})",
        victim.page, victim.frame, victim.distance
    );
    victim.frame
}

/// Depth-first search for a table whose entries are all zero. The first
/// qualifying table in traversal order wins, unless it lies on the path
/// being resolved for `vaddr` (reclaiming it would tear down a table the
/// walker is about to descend through).
fn find_zero_table<D: FrameDevice>(
    cfg: &MmuConfig,
    device: &mut D,
    vaddr: VirtAddr,
    frame: Frame,
    parent_entry: PhysAddr,
    level: u32,
) -> Option<ZeroTable> {
    let mut all_zero = true;
    for i in 0..cfg.page_size() {
        let entry_addr = frame * cfg.page_size() + i;
        let next = device.read(entry_addr);
        if next != 0 {
            all_zero = false;
            if level < cfg.depth() - 1 {
                let hit = find_zero_table(cfg, device, vaddr, next, entry_addr, level + 1);
                if hit.is_some() {
                    return hit;
                }
            }
        }
    }
    if all_zero && !on_resolution_path(cfg, device, vaddr, frame) {
        return Some(ZeroTable { parent_entry });
    }
    None
}

/// True iff `frame` is the root or already mapped on the path of
/// `vaddr`. The walk stops at the first absent entry: everything past it
/// does not exist yet and cannot collide.
fn on_resolution_path<D: FrameDevice>(
    cfg: &MmuConfig,
    device: &mut D,
    vaddr: VirtAddr,
    frame: Frame,
) -> bool {
    if frame == ROOT_FRAME {
        return true;
    }
    let mut current = ROOT_FRAME;
    for level in 0..cfg.depth() {
        let entry = device.read(current * cfg.page_size() + cfg.part(level, vaddr));
        if entry == frame {
            return true;
        }
        if entry == 0 {
            return false;
        }
        current = entry;
    }
    false
}

/// Highest frame index referenced anywhere in the tree, the visited
/// frame itself included (so the root counts as used).
fn max_referenced_frame<D: FrameDevice>(
    cfg: &MmuConfig,
    device: &mut D,
    frame: Frame,
    level: u32,
) -> Frame {
    let mut max = frame;
    for i in 0..cfg.page_size() {
        let next = device.read(frame * cfg.page_size() + i);
        if next != 0 && level < cfg.depth() {
            max = max.max(max_referenced_frame(cfg, device, next, level + 1));
        }
    }
    max
}

/// Depth-first search over resident leaves for the one with maximal
/// cyclic distance to `target`. Page numbers are rebuilt from the index
/// parts along the path. Strict `>` keeps the first-found candidate on
/// ties.
fn find_victim<D: FrameDevice>(
    cfg: &MmuConfig,
    device: &mut D,
    frame: Frame,
    parent_entry: PhysAddr,
    page: PageNum,
    level: u32,
    target: PageNum,
) -> Victim {
    if level == cfg.depth() {
        return Victim {
            frame,
            page,
            parent_entry,
            distance: cyclic_distance(cfg, target, page),
        };
    }
    let mut best = Victim {
        frame: 0,
        page: 0,
        parent_entry: 0,
        distance: 0,
    };
    for i in 0..cfg.page_size() {
        let entry_addr = frame * cfg.page_size() + i;
        let next = device.read(entry_addr);
        if next != 0 {
            let candidate = find_victim(
                cfg,
                device,
                next,
                entry_addr,
                (page << cfg.part_width()) + i,
                level + 1,
                target,
            );
            if candidate.distance > best.distance {
                best = candidate;
            }
        }
    }
    best
}

/// Wraparound distance over the page-number space:
/// `min(|q - p|, num_pages - |q - p|)`.
fn cyclic_distance(cfg: &MmuConfig, q: PageNum, p: PageNum) -> u64 {
    let d = q.abs_diff(p);
    d.min(cfg.num_pages() - d)
}

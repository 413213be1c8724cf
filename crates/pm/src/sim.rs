use std::collections::BTreeMap;
use std::fmt::Write as _;

use types::{Frame, MmuConfig, PageNum, PhysAddr, Word};

use crate::device::FrameDevice;

/// In-process physical memory: a flat word array of `num_frames` frames
/// plus a swap area keyed by page number.
///
/// Restoring a page that was never evicted zero-fills the frame, so a
/// freshly materialized page reads deterministically as zeros.
#[derive(Debug)]
pub struct SimFrameDevice {
    page_size: usize,
    mem: Vec<Word>,
    swap: BTreeMap<PageNum, Vec<Word>>,
}

impl SimFrameDevice {
    pub fn new(num_frames: usize, page_size: usize) -> Self {
        Self {
            page_size,
            mem: vec![0; num_frames * page_size],
            swap: BTreeMap::new(),
        }
    }

    pub fn from_config(cfg: &MmuConfig) -> Self {
        Self::new(cfg.num_frames() as usize, cfg.page_size() as usize)
    }

    pub fn num_frames(&self) -> usize {
        self.mem.len() / self.page_size
    }

    /// The words of frame `n`.
    pub fn frame(&self, n: Frame) -> &[Word] {
        let start = n as usize * self.page_size;
        &self.mem[start..start + self.page_size]
    }

    /// Copy of the whole physical memory, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<Word> {
        self.mem.clone()
    }

    /// Whether `page` currently sits in the swap area.
    pub fn swap_contains(&self, page: PageNum) -> bool {
        self.swap.contains_key(&page)
    }

    /// Pretty-prints all frames, one hex row per frame.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for n in 0..self.num_frames() {
            let _ = write!(out, "frame {:3}:", n);
            for word in self.frame(n as Frame) {
                let _ = write!(out, " {:04x}", word);
            }
            out.push('\n');
        }
        out
    }

    fn check(&self, addr: PhysAddr) -> usize {
        let addr = addr as usize;
        if addr >= self.mem.len() {
            panic!("physical access out of bounds: addr = 0x{:08x}", addr);
        }
        addr
    }
}

impl FrameDevice for SimFrameDevice {
    fn read(&self, addr: PhysAddr) -> Word {
        self.mem[self.check(addr)]
    }

    fn write(&mut self, addr: PhysAddr, value: Word) {
        let addr = self.check(addr);
        self.mem[addr] = value;
    }

    fn evict(&mut self, frame: Frame, page: PageNum) {
        let content = self.frame(frame).to_vec();
        self.swap.insert(page, content);
    }

    fn restore(&mut self, frame: Frame, page: PageNum) {
        let start = frame as usize * self.page_size;
        let dst = &mut self.mem[start..start + self.page_size];
        match self.swap.get(&page) {
            Some(content) => dst.copy_from_slice(content),
            None => dst.fill(0),
        }
    }
}

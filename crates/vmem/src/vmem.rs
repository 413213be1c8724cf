use pm::FrameDevice;
use types::{MmuConfig, PhysAddr, VirtAddr, VmError, VmResult, Word, ROOT_FRAME};

use crate::walker;

/// Single-address-space virtual memory over an injected physical device.
///
/// The facade validates addresses and drives the walker; the device does
/// the actual word storage. `initialize` must run before the first
/// access (it turns frame 0 into the empty root table); calling anything
/// else on an uninitialized instance is a caller contract violation and
/// is not guarded.
#[derive(Debug)]
pub struct VirtualMemory<D: FrameDevice> {
    config: MmuConfig,
    device: D,
}

impl<D: FrameDevice> VirtualMemory<D> {
    pub fn new(config: MmuConfig, device: D) -> Self {
        Self { config, device }
    }

    /// Zero-fills the root table.
    pub fn initialize(&mut self) {
        walker::zero_fill(&self.config, &mut self.device, ROOT_FRAME);
    }

    /// The word stored at `vaddr`, materializing the mapping on demand.
    /// Fails only when the address exceeds the configured width; nothing
    /// is touched in that case.
    pub fn read(&mut self, vaddr: VirtAddr) -> VmResult<Word> {
        let phys = self.resolve(vaddr)?;
        Ok(self.device.read(phys))
    }

    /// Stores `value` at `vaddr`, materializing the mapping on demand.
    pub fn write(&mut self, vaddr: VirtAddr, value: Word) -> VmResult<()> {
        let phys = self.resolve(vaddr)?;
        self.device.write(phys, value);
        Ok(())
    }

    fn resolve(&mut self, vaddr: VirtAddr) -> VmResult<PhysAddr> {
        if !self.config.validate(vaddr) {
            return Err(VmError::AddressOutOfRange {
                vaddr,
                virt_width: self.config.virt_width(),
            });
        }
        Ok(walker::resolve(&self.config, &mut self.device, vaddr))
    }

    pub fn config(&self) -> &MmuConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Hands the device back, e.g. to inspect physical memory after use.
    pub fn into_device(self) -> D {
        self.device
    }
}

mod allocator;
mod walker;

mod vmem;
pub use vmem::VirtualMemory;

pub use pm::{FrameDevice, SimFrameDevice};
pub use types::{Frame, MmuConfig, PageNum, PhysAddr, VirtAddr, VmError, VmResult, Word};

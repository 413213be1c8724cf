use core::fmt;

use crate::primitives::VirtAddr;

/// Failures surfaced by the translation layer. Everything else
/// (device faults, capacity misconfiguration) is a collaborator-layer
/// concern or a programming error, not a value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    /// The virtual address does not fit in the configured address width.
    AddressOutOfRange { vaddr: VirtAddr, virt_width: u32 },
}

pub type VmResult<T> = Result<T, VmError>;

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::AddressOutOfRange { vaddr, virt_width } => write!(
                f,
                "virtual address 0x{:x} exceeds the {}-bit address space",
                vaddr, virt_width
            ),
        }
    }
}

impl std::error::Error for VmError {}

pub mod device;
pub use device::FrameDevice;

pub mod sim;
pub use sim::SimFrameDevice;

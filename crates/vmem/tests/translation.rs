use once_cell::sync::Lazy;
use vmem::{MmuConfig, SimFrameDevice, VirtualMemory, VmError};

#[derive(Debug)]
pub struct Scenario {
    pub name: &'static str,
    /// (virt_width, offset_width, depth, num_frames)
    pub geometry: (u32, u32, u32, u64),
    pub writes: Vec<(u64, u64)>,
    pub expected: Vec<(u64, u64)>,
}

pub static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(|| {
    vec![
        Scenario {
            name: "single word",
            geometry: (16, 4, 3, 4),
            writes: vec![(0x0000, 5)],
            expected: vec![(0x0000, 5)],
        },
        Scenario {
            name: "offsets share one page",
            geometry: (16, 4, 3, 8),
            writes: vec![(0x20, 1), (0x21, 2), (0x2F, 3)],
            expected: vec![(0x20, 1), (0x21, 2), (0x2F, 3)],
        },
        Scenario {
            name: "overwrite same address",
            geometry: (16, 4, 3, 8),
            writes: vec![(0x123, 7), (0x123, 9)],
            expected: vec![(0x123, 9)],
        },
        Scenario {
            name: "distant pages under eviction pressure",
            geometry: (16, 4, 3, 4),
            writes: vec![(0x0000, 5), (0x8000, 7), (0x4000, 9)],
            expected: vec![(0x0000, 5), (0x8000, 7), (0x4000, 9)],
        },
        Scenario {
            name: "sequential pages with ample frames",
            geometry: (16, 4, 3, 64),
            writes: (0..16u64).map(|i| (i * 16, 100 + i)).collect(),
            expected: (0..16u64).map(|i| (i * 16, 100 + i)).collect(),
        },
    ]
});

fn build(geometry: (u32, u32, u32, u64)) -> VirtualMemory<SimFrameDevice> {
    let cfg = MmuConfig::new(geometry.0, geometry.1, geometry.2, geometry.3);
    let device = SimFrameDevice::from_config(&cfg);
    let mut vm = VirtualMemory::new(cfg, device);
    vm.initialize();
    vm
}

#[test]
fn scenarios_round_trip() {
    for scenario in SCENARIOS.iter() {
        let mut vm = build(scenario.geometry);
        for &(vaddr, value) in &scenario.writes {
            vm.write(vaddr, value)
                .unwrap_or_else(|e| panic!("{}: write failed: {}", scenario.name, e));
        }
        for &(vaddr, expected) in &scenario.expected {
            let got = vm
                .read(vaddr)
                .unwrap_or_else(|e| panic!("{}: read failed: {}", scenario.name, e));
            assert_eq!(got, expected, "{}: read(0x{:x})", scenario.name, vaddr);
        }
    }
}

#[test]
fn first_write_builds_one_full_path() {
    // V=16, O=4, D=3, 4 frames: writing address 0 must create exactly the
    // two intermediate tables and the leaf, in frames 1, 2 and 3.
    let mut vm = build((16, 4, 3, 4));
    vm.write(0x0000, 5).unwrap();
    assert_eq!(vm.read(0x0000), Ok(5));

    let dev = vm.device();
    assert_eq!(dev.frame(0)[0], 1);
    assert_eq!(dev.frame(1)[0], 2);
    assert_eq!(dev.frame(2)[0], 3);
    assert_eq!(dev.frame(3)[0], 5);
}

#[test]
fn out_of_range_addresses_are_rejected_without_side_effects() {
    let mut vm = build((16, 4, 3, 4));
    let before = vm.device().snapshot();

    let err = VmError::AddressOutOfRange {
        vaddr: 0x1_0000,
        virt_width: 16,
    };
    assert_eq!(vm.read(0x1_0000), Err(err));
    assert_eq!(vm.write(0x1_0000, 1), Err(err));
    assert_eq!(
        vm.read(u64::MAX),
        Err(VmError::AddressOutOfRange {
            vaddr: u64::MAX,
            virt_width: 16,
        })
    );

    assert_eq!(vm.device().snapshot(), before, "rejected access touched memory");
}

#[test]
fn rereads_do_not_change_physical_layout() {
    let mut vm = build((16, 4, 3, 16));
    vm.write(0x0000, 5).unwrap();
    vm.write(0x0340, 11).unwrap();

    assert_eq!(vm.read(0x0340), Ok(11));
    let after_first = vm.device().snapshot();
    assert_eq!(vm.read(0x0340), Ok(11));
    assert_eq!(vm.read(0x0000), Ok(5));
    assert_eq!(vm.read(0x0340), Ok(11));
    assert_eq!(vm.device().snapshot(), after_first, "pure reads caused frame churn");
}

#[test]
fn fresh_page_reads_as_zero() {
    let mut vm = build((16, 4, 3, 8));
    assert_eq!(vm.read(0x0500), Ok(0));
}

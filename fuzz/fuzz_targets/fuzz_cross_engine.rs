#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdrv_core::{engine_for, Algorithm, Multiplier, NativeMultiplier, ShiftAddMultiplier};
use fibdrv_core::MAX_INDEX;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let raw = u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ]);

    // Multipliers agree on every input
    let other = raw.rotate_left(17);
    assert_eq!(
        NativeMultiplier.multiply(raw, other),
        ShiftAddMultiplier.multiply(raw, other)
    );

    // Engines agree inside the domain
    let k = raw % (MAX_INDEX + 1);
    let reference = engine_for(Algorithm::AdditionDp).compute(k);
    for algo in Algorithm::ALL {
        assert_eq!(engine_for(algo).compute(k), reference, "{algo} at k={k}");
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdrv_device::Device;

fuzz_target!(|data: &[u8]| {
    let device = Device::new();
    let mut session = device.open().unwrap();
    let mut buf = [0u8; 8];

    // Each 9-byte chunk is (whence, target) followed by a write and a read
    for chunk in data.chunks_exact(9) {
        let whence = i32::from(chunk[0] % 4);
        let mut target = [0u8; 8];
        target.copy_from_slice(&chunk[1..]);
        let pos = session.seek_whence(i64::from_le_bytes(target), whence);
        assert!((0..=device.max_offset()).contains(&pos));

        session.write(&chunk[..usize::from(chunk[0] % 6)]);
        let outcome = session.read(&mut buf);
        assert_eq!(outcome.bytes_written, 8);
    }
});

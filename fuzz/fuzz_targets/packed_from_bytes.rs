#![no_main]

use libfuzzer_sys::fuzz_target;
use gambit::packed::PackedPosition;

fuzz_target!(|data: &[u8]| {
    let Ok(packed) = PackedPosition::try_from_bytes(data) else {
        return;
    };
    let Ok(pos) = packed.unpack() else {
        return;
    };
    let repacked = PackedPosition::pack(&pos);
    let repacked = PackedPosition::try_from_bytes(repacked.as_bytes()).expect("roundtrip");
    assert_eq!(repacked.unpack().expect("unpack"), pos);
});

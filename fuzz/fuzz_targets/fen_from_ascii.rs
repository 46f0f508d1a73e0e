#![no_main]

use libfuzzer_sys::fuzz_target;

use gambit::fen::Fen;

fuzz_target!(|data: &[u8]| {
    if let Ok(fen) = Fen::from_ascii(data) {
        let roundtripped = Fen::from_ascii(fen.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(fen, roundtripped);

        if let Ok(pos) = fen.into_position() {
            assert_eq!(Fen::from_position(&pos), roundtripped);
        }
    }
});

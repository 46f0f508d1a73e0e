#![no_main]

use libfuzzer_sys::fuzz_target;
use gambit::{uci::Uci, Chess};

fuzz_target!(|moves: Vec<Uci>| {
    let mut pos = Chess::default();

    for uci in moves {
        let before = pos.clone();
        let legals = before.legal_moves(before.turn());
        let is_legal = before.is_legal(uci.from, uci.to, before.turn());

        match pos.play(uci) {
            Ok(m) => {
                assert!(is_legal);
                assert!(legals.contains(&m));
                assert!(!pos.is_in_check(before.turn()));
            }
            Err(_) => {
                assert!(!is_legal);
                assert_eq!(pos, before);
            }
        }

        if pos.is_game_over() {
            assert!(pos.legal_moves(pos.turn()).is_empty());
            break;
        }
    }
});

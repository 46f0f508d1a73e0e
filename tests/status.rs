use gambit::{fen::Fen, packed::PackedPosition, uci::Uci, Chess, Outcome, Status};
use serde::Deserialize;
use serde_with::{formats::SpaceSeparator, serde_as, DisplayFromStr, StringWithSeparator};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    #[serde_as(as = "StringWithSeparator<SpaceSeparator, Uci>")]
    uci: Vec<Uci>,
    #[serde_as(as = "DisplayFromStr")]
    fen: Fen,
    #[serde_as(as = "DisplayFromStr")]
    status: Status,
    #[serde_as(as = "Option<DisplayFromStr>")]
    outcome: Option<Outcome>,
}

#[test]
fn test_status_reference() {
    let mut reader = csv::Reader::from_path("tests/status.csv").expect("reader");

    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");

        let mut pos = Chess::default();
        for uci in record.uci {
            pos.play(uci)
                .unwrap_or_else(|err| panic!("line {}: {uci} rejected: {err}", i + 1));
        }

        assert_eq!(
            Fen::from_position(&pos).to_string(),
            record.fen.to_string(),
            "line {}",
            i + 1
        );
        assert_eq!(pos.status(pos.turn()), record.status, "line {}", i + 1);
        assert_eq!(pos.outcome(), record.outcome, "line {}", i + 1);
        assert_eq!(pos.is_game_over(), record.outcome.is_some(), "line {}", i + 1);

        let unpacked = PackedPosition::pack(&pos).unpack().expect("valid packed position");
        assert_eq!(unpacked, pos, "line {}", i + 1);

        // A FEN forgets which minor pieces and pawns moved, but nothing the
        // rules depend on.
        let from_fen = record.fen.into_position().expect("valid position");
        assert_eq!(from_fen.status(from_fen.turn()), record.status, "line {}", i + 1);
        assert_eq!(
            from_fen.legal_moves(from_fen.turn()),
            pos.legal_moves(pos.turn()),
            "line {}",
            i + 1
        );
    }
}

use gambit::{
    fen::Fen, packed::PackedPosition, uci::Uci, Chess, Color, Outcome, PlayError, Role, Square,
    Status,
};

fn setup(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .expect("valid fen")
        .into_position()
        .expect("valid position")
}

fn uci(s: &str) -> Uci {
    s.parse().expect("valid uci")
}

fn play_all(pos: &mut Chess, moves: &[&str]) {
    for m in moves {
        pos.play(uci(m))
            .unwrap_or_else(|err| panic!("{m} rejected: {err}"));
    }
}

#[test]
fn test_fools_mate() {
    let mut pos = Chess::default();
    play_all(&mut pos, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(pos.is_in_check(Color::White));
    assert!(pos.is_checkmate(Color::White));
    assert!(!pos.is_stalemate(Color::White));
    assert!(pos.legal_moves(Color::White).is_empty());
    assert_eq!(pos.status(Color::White), Status::Checkmate);
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Decisive {
            winner: Color::Black
        })
    );
    assert!(pos.is_game_over());

    let before = pos.clone();
    assert_eq!(pos.play(uci("e1e2")), Err(PlayError::IllegalMove));
    assert_eq!(pos.play(uci("a2a3")), Err(PlayError::LeavesKingInCheck));
    assert_eq!(pos, before);
}

#[test]
fn test_stalemate() {
    let pos = setup("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!pos.is_in_check(Color::Black));
    assert!(pos.is_stalemate(Color::Black));
    assert!(!pos.is_checkmate(Color::Black));
    assert_eq!(pos.status(Color::Black), Status::Stalemate);
    assert_eq!(pos.outcome(), Some(Outcome::Draw));

    // White still has moves, it is just not their turn.
    assert_eq!(pos.status(Color::White), Status::Ongoing);
}

#[test]
fn test_check_evasion() {
    let mut pos = setup("4k3/8/8/8/8/8/3PP3/r3K3 w - - 0 1");
    assert_eq!(pos.status(Color::White), Status::Check);
    assert_eq!(pos.play(uci("e2e3")), Err(PlayError::LeavesKingInCheck));
    assert_eq!(pos.play(uci("e1d1")), Err(PlayError::LeavesKingInCheck));
    assert!(pos.is_legal(Square::E1, Square::F2, Color::White));
    pos.play(uci("e1f2")).expect("king escapes");
    assert!(!pos.is_in_check(Color::White));
}

#[test]
fn test_castling_both_sides() {
    let pos = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(pos.is_legal(Square::E1, Square::G1, Color::White));
    assert!(pos.is_legal(Square::E1, Square::C1, Color::White));
    assert!(pos.is_legal(Square::E8, Square::G8, Color::Black));
    assert!(pos.is_legal(Square::E8, Square::C8, Color::Black));

    let mut kingside = pos.clone();
    let m = kingside.play(uci("e1g1")).expect("castles");
    assert!(m.is_castle());
    assert_eq!(
        kingside.board().piece_at(Square::G1),
        Some(Color::White.king())
    );
    assert_eq!(
        kingside.board().piece_at(Square::F1),
        Some(Color::White.rook())
    );
    assert!(kingside.board().is_empty(Square::E1));
    assert!(kingside.board().is_empty(Square::H1));
    assert!(kingside.board().has_moved(Square::G1));
    assert!(kingside.board().has_moved(Square::F1));

    kingside.play(uci("e8c8")).expect("castles");
    assert_eq!(
        kingside.board().piece_at(Square::C8),
        Some(Color::Black.king())
    );
    assert_eq!(
        kingside.board().piece_at(Square::D8),
        Some(Color::Black.rook())
    );
    assert!(kingside.board().is_empty(Square::A8));
    assert_eq!(
        kingside.fen(),
        "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2"
    );
}

#[test]
fn test_castling_after_king_moved() {
    let mut pos = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play_all(&mut pos, &["e1f1", "a8b8", "f1e1", "b8a8"]);
    assert_eq!(pos.board().piece_at(Square::E1), Some(Color::White.king()));
    assert_eq!(pos.play(uci("e1g1")), Err(PlayError::IllegalCastling));
    assert_eq!(pos.play(uci("e1c1")), Err(PlayError::IllegalCastling));

    // Black only moved the queen side rook.
    pos.play(uci("a1a2")).expect("legal");
    assert!(!pos.is_legal(Square::E8, Square::C8, Color::Black));
    assert!(pos.is_legal(Square::E8, Square::G8, Color::Black));
}

#[test]
fn test_castling_after_rook_moved() {
    let pos = setup("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
    assert!(pos.board().has_moved(Square::H1));
    assert!(!pos.is_legal(Square::E1, Square::G1, Color::White));
    assert!(pos.is_legal(Square::E1, Square::C1, Color::White));
}

#[test]
fn test_castling_through_pieces() {
    let mut pos = setup("rn2k1nr/8/8/8/8/8/8/R2QK2R w KQkq - 0 1");
    assert!(!pos.is_legal(Square::E1, Square::C1, Color::White));
    assert!(pos.is_legal(Square::E1, Square::G1, Color::White));
    assert!(!pos.is_legal(Square::E8, Square::C8, Color::Black));
    assert!(!pos.is_legal(Square::E8, Square::G8, Color::Black));
    assert_eq!(pos.play(uci("e1c1")), Err(PlayError::IllegalCastling));
}

#[test]
fn test_castling_out_of_check() {
    let mut pos = setup("4k3/8/8/8/4r3/8/8/R3K2R w KQ - 0 1");
    assert!(pos.is_in_check(Color::White));
    assert_eq!(pos.play(uci("e1g1")), Err(PlayError::IllegalCastling));
    assert_eq!(pos.play(uci("e1c1")), Err(PlayError::IllegalCastling));
}

#[test]
fn test_castling_through_attacked_square() {
    let pos = setup("4k3/8/8/8/5r2/8/8/R3K2R w KQ - 0 1");
    assert!(!pos.is_legal(Square::E1, Square::G1, Color::White));
    assert!(pos.is_legal(Square::E1, Square::C1, Color::White));

    let pos = setup("r3k2r/8/8/3R4/8/8/8/4K3 b kq - 0 1");
    assert!(!pos.is_legal(Square::E8, Square::C8, Color::Black));
    assert!(pos.is_legal(Square::E8, Square::G8, Color::Black));
}

#[test]
fn test_castling_into_attacked_square() {
    let pos = setup("4k3/8/8/8/2r3r1/8/8/R3K2R w KQ - 0 1");
    assert!(!pos.is_legal(Square::E1, Square::G1, Color::White));
    assert!(!pos.is_legal(Square::E1, Square::C1, Color::White));

    // The rook passes the attacked b1, the king does not.
    let pos = setup("4k3/8/8/8/1r6/8/8/R3K2R w KQ - 0 1");
    assert!(pos.is_legal(Square::E1, Square::C1, Color::White));
}

#[test]
fn test_en_passant_window() {
    let mut pos = Chess::default();
    play_all(&mut pos, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(pos.ep_square(), Some(Square::D6));
    assert!(pos.is_legal(Square::E5, Square::D6, Color::White));
    assert!(!pos.is_legal(Square::E5, Square::F6, Color::White));

    let mut later = pos.clone();
    play_all(&mut later, &["h2h3", "h7h6"]);
    assert!(!later.is_legal(Square::E5, Square::D6, Color::White));
    assert_eq!(later.play(uci("e5d6")), Err(PlayError::IllegalEnPassant));

    let count = pos.board().piece_count();
    let m = pos.play(uci("e5d6")).expect("en passant");
    assert!(m.is_en_passant());
    assert!(pos.board().is_empty(Square::D5));
    assert_eq!(pos.board().piece_at(Square::D6), Some(Color::White.pawn()));
    assert_eq!(pos.board().piece_count(), count - 1);
}

#[test]
fn test_promotion_to_queen() {
    let mut pos = setup("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let count = pos.board().piece_count();
    let m = pos.play(uci("a7a8r")).expect("promotes");
    assert!(m.is_promotion());
    assert_eq!(m.promotion(), Some(Role::Queen));
    assert_eq!(pos.board().piece_at(Square::A8), Some(Color::White.queen()));
    assert_eq!(pos.board().piece_count(), count);
    assert!(pos.board().has_moved(Square::A8));

    let mut pos = setup("k7/8/8/8/8/8/p6K/8 b - - 0 1");
    pos.play(uci("a2a1")).expect("promotes");
    assert_eq!(pos.board().piece_at(Square::A1), Some(Color::Black.queen()));
}

#[test]
fn test_turn_alternation() {
    let mut pos = Chess::default();
    assert_eq!(pos.turn(), Color::White);
    pos.play(uci("e2e4")).expect("legal");
    assert_eq!(pos.turn(), Color::Black);
    assert_eq!(pos.play(uci("e4e5")), Err(PlayError::WrongTurn));
    assert_eq!(pos.turn(), Color::Black);
    pos.play(uci("e7e5")).expect("legal");
    assert_eq!(pos.turn(), Color::White);
}

#[test]
fn test_rejection_leaves_position_unchanged() {
    let mut pos = Chess::default();
    play_all(&mut pos, &["e2e4", "e7e5"]);
    let before = pos.clone();

    for _ in 0..2 {
        assert_eq!(pos.play(uci("e4e5")), Err(PlayError::IllegalMove));
        assert_eq!(pos.play(uci("e1g1")), Err(PlayError::IllegalCastling));
        assert_eq!(pos.play(uci("d1d8")), Err(PlayError::IllegalMove));
        assert!(!pos.apply_move(Square::A3, Square::A4));
        assert_eq!(pos, before);
    }
}

#[test]
fn test_queries_leave_position_unchanged() {
    let mut pos = Chess::default();
    play_all(&mut pos, &["e2e4", "d7d5", "e4e5", "f7f5"]);
    let fen = pos.fen();
    let packed = PackedPosition::pack(&pos);

    for color in Color::ALL {
        for from in Square::all() {
            for to in Square::all() {
                pos.is_legal(from, to, color);
            }
        }
        pos.legal_moves(color);
        pos.status(color);
    }

    assert_eq!(pos.fen(), fen);
    assert_eq!(PackedPosition::pack(&pos), packed);
}

#[test]
fn test_legal_moves_match_is_legal() {
    let pos = setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let legals = pos.legal_moves(Color::White);
    assert_eq!(legals.len(), 48);

    for from in Square::all() {
        for to in Square::all() {
            let listed = legals.iter().any(|m| m.from() == from && m.to() == to);
            assert_eq!(
                listed,
                pos.is_legal(from, to, Color::White),
                "{from}{to}"
            );
        }
    }
}

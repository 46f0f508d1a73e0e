use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use gambit::{fen::Fen, perft, Chess};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut pos = Chess::default();

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{line}");

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                pos = slices
                    .next()
                    .expect("missing epd")
                    .parse::<Fen>()
                    .expect("invalid fen")
                    .into_position()
                    .expect("illegal fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&pos, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_standard() {
    test_perft_file("tests/standard.perft", 100_000);
}

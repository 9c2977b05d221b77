use blockfall_core::{ActionKind, Board, Piece, PieceKind, Placement, Rotation, SpinType};
use blockfall_engine::{
    apply_placement, generate_placements, generate_placements_fast, replay, RotationTrigger,
    SearchConfig,
};
use rustc_hash::FxHashSet;

const TRIGGERS: [RotationTrigger; 3] = [
    RotationTrigger::Always,
    RotationTrigger::PossibleContact,
    RotationTrigger::AtBottom,
];

fn footprints(placements: &[Placement]) -> FxHashSet<[(i8, i8); 4]> {
    placements.iter().map(|p| p.piece.footprint()).collect()
}

fn contains(placements: &[Placement], piece: Piece) -> bool {
    placements.iter().any(|p| p.piece == piece)
}

fn assert_replayable(board: &Board, spawn: Piece, placements: &[Placement]) {
    let mut signatures = FxHashSet::default();
    for placement in placements {
        assert_eq!(
            replay(board, spawn, placement.path.kinds()),
            Ok(placement.piece),
            "path {}",
            placement.path
        );
        assert_eq!(placement.path.last().map(|a| a.kind), Some(ActionKind::HardDrop));
        assert!(signatures.insert(placement.piece.signature()));
    }
}

/// T-spin triple setup on a narrow well that needs three chained turns.
fn bt_canon() -> (Board, Piece) {
    let board = Board::from_rows(
        8,
        4,
        4,
        4,
        &["..##", "..##", "...#", "##.#", "#..#", "#...", "##.#", "##.#"],
    )
    .unwrap();
    (board, Piece::new(PieceKind::T, 4, -1, Rotation::East))
}

/// The same cave at the bottom of a full-width stack, entered from spawn.
fn bt_canon_wide() -> (Board, Piece) {
    let board = Board::from_rows(
        19,
        10,
        4,
        4,
        &[
            "..########",
            "...#######",
            "##.#######",
            "#..#######",
            "#...######",
            "##.#######",
            "##.#######",
        ],
    )
    .unwrap();
    (board, Piece::new(PieceKind::T, 1, 3, Rotation::North))
}

fn tsd() -> (Board, Piece) {
    let board = Board::from_rows(6, 5, 4, 4, &["##..#", "#...#", "##.##"]).unwrap();
    (board, Piece::new(PieceKind::T, 0, 0, Rotation::North))
}

mod exhaustive {
    use super::*;

    #[test]
    fn test_bt_canon_reaches_cave() {
        let (board, spawn) = bt_canon();
        let placements = generate_placements(&board, spawn, &SearchConfig::default());
        assert_eq!(placements.len(), 15);
        assert_replayable(&board, spawn, &placements);

        let cave = placements
            .iter()
            .find(|p| p.piece == Piece::new(PieceKind::T, 8, 1, Rotation::South))
            .unwrap();
        assert_eq!(cave.path.to_string(), "r3 r3 D r3 H");
    }

    #[test]
    fn test_bt_canon_wide_reaches_cave() {
        let (board, spawn) = bt_canon_wide();
        let placements = generate_placements(&board, spawn, &SearchConfig::default());
        assert_eq!(placements.len(), 39);
        assert!(contains(&placements, Piece::new(PieceKind::T, 19, 1, Rotation::South)));
        assert_replayable(&board, spawn, &placements);
    }

    #[test]
    fn test_tsd_slot() {
        let (board, spawn) = tsd();
        let placements = generate_placements(&board, spawn, &SearchConfig::default());
        assert_eq!(placements.len(), 17);
        let slot = placements
            .iter()
            .find(|p| p.piece == Piece::new(PieceKind::T, 7, 1, Rotation::South))
            .unwrap();
        assert_eq!(slot.path.to_string(), "D D D D D r2 H");
        assert_eq!(slot.spin, SpinType::Full);

        let (after, outcome) = apply_placement(&board, &slot.piece).unwrap();
        assert_eq!(outcome.lines_cleared(), 2);
        let rows = after.to_rows();
        assert_eq!(rows[rows.len() - 1], "##..#");
        assert!(rows[..rows.len() - 1].iter().all(|r| r == "....."));
    }

    #[test]
    fn test_triggers_agree_on_fixtures() {
        for (board, spawn) in [bt_canon(), bt_canon_wide(), tsd()] {
            let always = footprints(&generate_placements(&board, spawn, &SearchConfig::default()));
            for trigger in TRIGGERS {
                let config = SearchConfig::default().with_trigger(trigger);
                let placements = generate_placements(&board, spawn, &config);
                assert_replayable(&board, spawn, &placements);
                assert_eq!(footprints(&placements), always, "{trigger:?}");
            }
        }
    }

    #[test]
    fn test_triggers_agree_on_empty_board() {
        let board = Board::new(5, 4).unwrap();
        for kind in PieceKind::ALL {
            let spawn = Piece::spawn(kind, &board);
            let counts: Vec<usize> = TRIGGERS
                .iter()
                .map(|&t| {
                    generate_placements(&board, spawn, &SearchConfig::default().with_trigger(t))
                        .len()
                })
                .collect();
            assert!(counts.windows(2).all(|w| w[0] == w[1]), "{kind:?}: {counts:?}");
        }
    }
}

mod fast {
    use super::*;

    #[test]
    fn test_bt_canon_misses_cave() {
        let (board, spawn) = bt_canon();
        let fast = generate_placements_fast(&board, spawn, &SearchConfig::fast());
        assert_eq!(fast.len(), 7);
        assert!(!contains(&fast, Piece::new(PieceKind::T, 8, 1, Rotation::South)));
        assert_replayable(&board, spawn, &fast);
    }

    #[test]
    fn test_bt_canon_wide_is_subset() {
        let (board, spawn) = bt_canon_wide();
        let fast = generate_placements_fast(&board, spawn, &SearchConfig::fast());
        let full = generate_placements(&board, spawn, &SearchConfig::default());
        assert_eq!(fast.len(), 35);
        assert!(!contains(&fast, Piece::new(PieceKind::T, 19, 1, Rotation::South)));
        assert!(footprints(&fast).is_subset(&footprints(&full)));
        assert_replayable(&board, spawn, &fast);
    }

    #[test]
    fn test_tsd_matches_exhaustive() {
        let (board, spawn) = tsd();
        let fast = generate_placements_fast(&board, spawn, &SearchConfig::fast());
        let full = generate_placements(&board, spawn, &SearchConfig::default());
        assert_eq!(footprints(&fast), footprints(&full));
    }

    #[test]
    fn test_post_drop_rotations_only_add() {
        let (board, _) = bt_canon_wide();
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z, PieceKind::I] {
            let spawn = Piece::spawn(kind, &board);
            let plain = generate_placements_fast(&board, spawn, &SearchConfig::fast());
            let config = SearchConfig {
                post_drop_rotations: true,
                ..SearchConfig::fast()
            };
            let extended = generate_placements_fast(&board, spawn, &config);
            let full = generate_placements(&board, spawn, &SearchConfig::default());
            assert!(footprints(&plain).is_subset(&footprints(&extended)), "{kind:?}");
            assert!(footprints(&extended).is_subset(&footprints(&full)), "{kind:?}");
            assert_replayable(&board, spawn, &extended);
        }
    }
}

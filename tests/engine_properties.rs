//! Algebraic properties of the grid engine over arbitrary well-formed grids.

use merge_architect::engine::{self, Direction, Grid, Tile, GRID_SIZE};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// Grids whose cells are 0 or 2^1..2^32, up to the largest accepted tile.
fn arb_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(0u32..33, GRID_SIZE * GRID_SIZE).prop_map(|exps| {
        let rows = exps
            .chunks(GRID_SIZE)
            .map(|row| row.iter().map(|&e| if e == 0 { 0 } else { 1 << e }).collect::<Vec<Tile>>())
            .collect();
        Grid::from_rows(rows).expect("generated grid is well formed")
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn move_conserves_tile_sum(g in arb_grid(), dir in arb_direction()) {
        let res = g.resolve_move(dir);
        prop_assert_eq!(res.grid.sum(), g.sum());
        prop_assert_eq!(res.grid.size(), g.size());
    }

    #[test]
    fn score_is_even_and_bounded(g in arb_grid(), dir in arb_direction()) {
        let res = g.resolve_move(dir);
        prop_assert_eq!(res.score % 4, 0);
        prop_assert!(res.score <= g.sum());
        if res.score > 0 {
            prop_assert!(res.moved);
        }
    }

    #[test]
    fn moved_flag_matches_value_equality(g in arb_grid(), dir in arb_direction()) {
        let res = g.resolve_move(dir);
        prop_assert_eq!(res.moved, res.grid != g);
    }

    #[test]
    fn unmoved_grid_is_a_fixed_point(g in arb_grid(), dir in arb_direction()) {
        let first = g.resolve_move(dir);
        let second = first.grid.resolve_move(dir);
        if !second.moved {
            prop_assert_eq!(&second.grid, &first.grid);
            prop_assert_eq!(second.score, 0);
            let third = second.grid.resolve_move(dir);
            prop_assert_eq!(third.grid, second.grid);
        }
    }

    #[test]
    fn four_quarter_turns_is_identity(g in arb_grid()) {
        let turned = g.rotate_clockwise().rotate_clockwise().rotate_clockwise().rotate_clockwise();
        prop_assert_eq!(turned, g);
    }

    #[test]
    fn terminal_iff_no_direction_moves(g in arb_grid()) {
        let any_move = Direction::ALL.iter().any(|&d| g.resolve_move(d).moved);
        prop_assert_eq!(engine::is_game_over(&g), !any_move && g.count_empty() == 0);
    }

    #[test]
    fn spawn_fills_exactly_one_empty_cell(g in arb_grid(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let next = engine::spawn_random_tile(&g, &mut rng);
        if g.count_empty() == 0 {
            prop_assert_eq!(next, g);
        } else {
            prop_assert_eq!(next.count_empty(), g.count_empty() - 1);
            let changed: Vec<_> = g.cells().iter().zip(next.cells()).filter(|(a, b)| a != b).collect();
            prop_assert_eq!(changed.len(), 1);
            prop_assert_eq!(*changed[0].0, 0);
            prop_assert!(*changed[0].1 == 2 || *changed[0].1 == 4);
        }
    }
}

#[test]
fn alternating_full_grid_is_terminal() {
    let g = Grid::from_rows(vec![
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 2],
        vec![2, 4, 8, 16],
        vec![16, 8, 4, 2],
    ])
    .unwrap();
    assert!(engine::is_game_over(&g));
    assert_eq!(engine::max_value(&g), 16);
    for dir in Direction::ALL {
        assert!(!engine::resolve_move(&g, dir).moved);
    }
}

#[test]
fn empty_grid_factory() {
    let g = engine::create_empty_grid(GRID_SIZE);
    assert_eq!(g.size(), GRID_SIZE);
    assert!(g.cells().iter().all(|&v| v == 0));
    assert_eq!(engine::max_value(&g), 0);
}

//! Tests for the field-of-view system

use crate::{FovError, Grid, Shadowcast, Terrain, VisibilityAlgorithm, visibility_to_string};

/// An all-floor transparency map of the given size
fn open_map(width: usize, height: usize) -> Vec<Vec<bool>> {
    vec![vec![true; width]; height]
}

/// Compute FOV from a known-good origin
fn fov(transparency: &Vec<Vec<bool>>, origin: (usize, usize)) -> Vec<Vec<bool>> {
    Shadowcast::new()
        .field_of_view(transparency, origin)
        .expect("valid FOV input")
}

#[test]
fn test_main() {
    crate::main();
}

#[test]
fn test_origin_always_visible() {
    let map = open_map(5, 5);
    let visibility = fov(&map, (2, 2));
    assert!(visibility[2][2]);

    // Even an opaque origin tile is revealed
    let mut walled = open_map(5, 5);
    walled[2][2] = false;
    let visibility = fov(&walled, (2, 2));
    assert!(visibility[2][2], "opaque origin tile must still be visible");
}

#[test]
fn test_open_map_fully_visible() {
    // No obstruction, no range limit: every tile is visible from every
    // origin, including edges and corners.
    let map = open_map(5, 5);
    for origin_y in 0..5 {
        for origin_x in 0..5 {
            let visibility = fov(&map, (origin_x, origin_y));
            for y in 0..5 {
                for x in 0..5 {
                    assert!(
                        visibility[y][x],
                        "({}, {}) hidden from origin ({}, {}):\n{}",
                        x,
                        y,
                        origin_x,
                        origin_y,
                        visibility_to_string(&visibility)
                    );
                }
            }
        }
    }
}

#[test]
fn test_wall_shadow_north() {
    // A single wall directly north of the observer hides exactly the tile
    // straight behind it; the wall itself and both flanks stay visible.
    let mut map = open_map(5, 5);
    map[1][2] = false; // wall at (2, 1)
    let visibility = fov(&map, (2, 2));

    for y in 0..5 {
        for x in 0..5 {
            let expected = (x, y) != (2, 0);
            assert_eq!(
                visibility[y][x],
                expected,
                "tile ({}, {}):\n{}",
                x,
                y,
                visibility_to_string(&visibility)
            );
        }
    }
}

#[test]
fn test_wall_shadow_east_flanks() {
    // Wall adjacent to the observer: the shadow stays one tile wide
    let mut map = open_map(5, 5);
    map[2][3] = false; // wall at (3, 2)
    let visibility = fov(&map, (2, 2));

    assert!(visibility[2][3], "the wall itself is revealed");
    assert!(!visibility[2][4], "tile straight behind the wall is shadowed");
    assert!(visibility[1][4], "flank above stays visible");
    assert!(visibility[3][4], "flank below stays visible");
}

#[test]
fn test_mutual_blockage_on_axis() {
    // If A cannot see B, B cannot see A
    let mut map = open_map(7, 7);
    map[3][3] = false; // wall between the two observers

    let from_west = fov(&map, (1, 3));
    let from_east = fov(&map, (5, 3));

    assert!(!from_west[3][5], "east tile hidden behind the wall");
    assert!(!from_east[3][1], "west tile hidden behind the wall");
    assert!(
        from_west[3][3] && from_east[3][3],
        "the wall is seen from both sides"
    );
}

#[test]
fn test_corner_origin() {
    // Three of four quadrants probe off-map immediately; the scan must
    // still cover the whole map through the remaining directions.
    let map = open_map(3, 3);
    let visibility = fov(&map, (0, 0));
    for y in 0..3 {
        for x in 0..3 {
            assert!(
                visibility[y][x],
                "({}, {}) hidden from the corner:\n{}",
                x,
                y,
                visibility_to_string(&visibility)
            );
        }
    }
}

#[test]
fn test_single_tile_map() {
    let visibility = fov(&vec![vec![true]], (0, 0));
    assert_eq!(visibility, vec![vec![true]]);

    let visibility = fov(&vec![vec![false]], (0, 0));
    assert_eq!(visibility, vec![vec![true]]);
}

#[test]
fn test_idempotent() {
    let mut map = open_map(9, 9);
    map[4][4] = false;
    map[2][6] = false;
    map[7][1] = false;

    let first = fov(&map, (1, 1));
    let second = fov(&map, (1, 1));
    assert_eq!(first, second);
}

#[test]
fn test_dimensions_preserved() {
    let map = open_map(7, 3);
    let visibility = fov(&map, (3, 1));
    assert_eq!(visibility.len(), 3);
    for row in &visibility {
        assert_eq!(row.len(), 7);
    }
    // Open and small enough that everything is in view
    for row in &visibility {
        assert!(row.iter().all(|&v| v));
    }
}

#[test]
fn test_origin_out_of_bounds() {
    let map = open_map(3, 3);
    let err = Shadowcast::new().field_of_view(&map, (3, 0)).unwrap_err();
    assert_eq!(
        err,
        FovError::OriginOutOfBounds {
            x: 3,
            y: 0,
            width: 3,
            height: 3
        }
    );

    // A zero-area map has no valid origin
    let empty: Vec<Vec<bool>> = vec![];
    assert!(Shadowcast::new().field_of_view(&empty, (0, 0)).is_err());
}

#[test]
fn test_ragged_rows_rejected() {
    let map = vec![vec![true; 3], vec![true; 2], vec![true; 3]];
    let err = Shadowcast::new().field_of_view(&map, (0, 0)).unwrap_err();
    assert_eq!(
        err,
        FovError::RaggedRows {
            row: 1,
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn test_flat_length_mismatch() {
    let err = Shadowcast::new()
        .compute_flat(&[true; 5], 3, 2, 0, 0)
        .unwrap_err();
    assert_eq!(
        err,
        FovError::DimensionMismatch {
            expected: 6,
            actual: 5
        }
    );
}

#[test]
fn test_flat_matches_nested() {
    let mut map = open_map(11, 8);
    map[3][4] = false;
    map[5][5] = false;
    map[0][9] = false;

    let nested = fov(&map, (2, 6));

    let flat_map: Vec<bool> = map.iter().flatten().copied().collect();
    let flat = Shadowcast::new()
        .compute_flat(&flat_map, 11, 8, 2, 6)
        .expect("valid FOV input");

    let rejoined: Vec<Vec<bool>> = flat.chunks(11).map(|row| row.to_vec()).collect();
    assert_eq!(nested, rejoined);
}

#[test]
fn test_parallel_origins_match_sequential() {
    use rayon::prelude::*;

    let (width, height) = (30, 30);
    let mut flat_map = vec![true; width * height];
    for (x, y) in [(10, 10), (11, 10), (12, 10), (20, 5), (5, 25), (15, 18)] {
        flat_map[y * width + x] = false;
    }
    let origins = [(1usize, 1usize), (15, 15), (28, 3), (7, 22)];

    let algorithm = Shadowcast::new();
    let sequential: Vec<_> = origins
        .iter()
        .map(|&(x, y)| {
            algorithm
                .compute_flat(&flat_map, width, height, x, y)
                .expect("valid FOV input")
        })
        .collect();

    let parallel: Vec<_> = origins
        .par_iter()
        .map(|&(x, y)| {
            Shadowcast::new()
                .compute_flat(&flat_map, width, height, x, y)
                .expect("valid FOV input")
        })
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_terrain_round_trip() {
    // The full collaborator loop: extract transparency, compute FOV, write
    // visibility back onto the richer tiles.
    let floor = Terrain {
        transparent: true,
        visible: false,
        glyph: '.',
    };
    let wall = Terrain {
        transparent: false,
        visible: false,
        glyph: '#',
    };

    let mut tiles = Grid::filled(10, 10, floor);
    tiles.set(5, 4, wall);

    let transparency = tiles.extract_attributes(|t| t.transparent);
    let visibility = fov(&transparency, (5, 5));
    tiles.fill_attributes(&visibility, |tile, &visible| Terrain { visible, ..*tile });

    assert!(tiles.get(5, 5).visible, "observer tile");
    assert!(tiles.get(5, 4).visible, "adjacent wall");
    assert!(
        !tiles.get(5, 3).visible,
        "tile straight behind the wall stays dark"
    );
    assert!(tiles.get(4, 4).visible, "tile beside the wall");
    assert_eq!(tiles.get(5, 4).glyph, '#', "glyphs survive the write-back");
}

// tests/map_tests.rs

use grid_rpg::{GridPos, IrLayer, IrMap, IrTile, MapError, TileId, TileMap};

fn tile(id: u32, x: i32, y: i32) -> IrTile {
    IrTile { id: TileId(id), x, y }
}

#[test]
fn lookup_on_empty_map_finds_nothing() {
    let map = TileMap::from_ir(IrMap { width: 10, height: 10, layers: vec![] }).unwrap();
    assert_eq!(map.tiles_at(4, 4).count(), 0);
    assert_eq!(map.tiles_at(-1, 20).count(), 0);
    assert!(!map.is_wall(GridPos::new(4, 4), TileId(0)));
}

#[test]
fn sparse_layers_are_accepted() {
    let map = TileMap::from_ir(IrMap {
        width: 100,
        height: 100,
        layers: vec![
            IrLayer { name: "a".into(), tiles: vec![tile(4, 99, 99)] },
            IrLayer { name: "b".into(), tiles: vec![] },
            IrLayer { name: "c".into(), tiles: vec![tile(5, 99, 99), tile(5, 0, 0)] },
        ],
    })
    .unwrap();
    assert_eq!(map.layers().len(), 3);
    assert_eq!(map.tiles_at(99, 99).count(), 2);
    assert_eq!(map.tiles_at(0, 0).next().map(|t| t.id), Some(TileId(5)));
}

#[test]
fn error_on_duplicate_cell_in_one_layer() {
    let err = TileMap::from_ir(IrMap {
        width: 4,
        height: 4,
        layers: vec![IrLayer { name: "oops".into(), tiles: vec![tile(0, 1, 1), tile(2, 1, 1)] }],
    })
    .unwrap_err();
    assert!(matches!(err, MapError::DuplicateTile { layer, .. } if layer == "oops"));
}

#[test]
fn generated_field_walls_the_border() {
    let wall = TileId(1);
    let map = TileMap::from_ir(IrMap::field(60, 40, wall)).unwrap();
    assert!(map.is_wall(GridPos::new(0, 10), wall));
    assert!(map.is_wall(GridPos::new(59, 39), wall));
    assert!(!map.is_wall(GridPos::new(10, 7), wall));
    assert_eq!(map.tiles_at(10, 7).count(), 1);
}

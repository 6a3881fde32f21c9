//! End-to-end generation tests against known-good maps for fixed seeds

use rogue_core::dungeon::{CellType, Face};
use rogue_core::{generate, generate_with, GenerateError, GeneratorOptions};

const MESH_70X40_N10_S42: &str = include_str!("fixtures/mesh_70x40_n10_s42.txt");
const MESH_32X20_N2_S7: &str = include_str!("fixtures/mesh_32x20_n2_s7.txt");

/// (left, top, width, height, door slots) in placement order for 70x40,
/// 10 rooms, seed 42
const ROOMS_70X40_N10_S42: [(i32, i32, i32, i32, [i32; 4]); 10] = [
    (51, 30, 18, 6, [56, 33, -1, -1]),
    (1, 31, 30, 8, [18, -1, 34, -1]),
    (39, 11, 7, 13, [42, 13, 12, 41]),
    (54, 2, 11, 12, [-1, 8, -1, 56]),
    (3, 2, 28, 5, [-1, -1, 5, 14]),
    (41, 31, 9, 7, [42, 34, 36, -1]),
    (34, 4, 14, 5, [-1, 7, 7, 36]),
    (1, 21, 5, 6, [4, -1, 22, 4]),
    (10, 14, 9, 7, [11, 15, 15, 13]),
    (25, 8, 7, 14, [28, 11, 20, 27]),
];

#[test]
fn test_golden_70x40_seed_42() {
    let dungeon = generate(70, 40, 10, Some(42)).unwrap();
    assert_eq!(dungeon.to_text(), MESH_70X40_N10_S42);
}

#[test]
fn test_golden_32x20_seed_7() {
    let dungeon = generate(32, 20, 2, Some(7)).unwrap();
    assert_eq!(dungeon.to_text(), MESH_32X20_N2_S7);

    let rooms = dungeon.rooms();
    assert_eq!((rooms[0].left, rooms[0].top, rooms[0].width, rooms[0].height), (1, 1, 6, 17));
    assert_eq!(rooms[0].door(Face::RIGHT), Some(8));
    assert_eq!((rooms[1].left, rooms[1].top, rooms[1].width, rooms[1].height), (23, 1, 7, 15));
    assert_eq!(rooms[1].door(Face::LEFT), Some(9));
}

#[test]
fn test_room_geometry_seed_42() {
    let dungeon = generate(70, 40, 10, Some(42)).unwrap();
    let rooms: Vec<_> = dungeon
        .rooms()
        .iter()
        .map(|r| (r.left, r.top, r.width, r.height, r.doors.to_array()))
        .collect();
    assert_eq!(rooms, ROOMS_70X40_N10_S42);
}

#[test]
fn test_sections_seed_42() {
    let dungeon = generate(70, 40, 10, Some(42)).unwrap();
    let tree = dungeon.sections();
    let first = tree[dungeon.rooms()[0].section];
    assert_eq!((first.left, first.top, first.width, first.height), (50, 17, 20, 23));
    assert_eq!(first.faces, Face::TOP | Face::LEFT);

    let last = tree[dungeon.rooms()[9].section];
    assert_eq!((last.left, last.top, last.width, last.height), (24, 7, 9, 22));
    assert_eq!(last.faces, Face::all());

    assert_eq!(tree.leaves().len(), 10);
    assert_eq!(tree.registry().len(), 19);
}

#[test]
fn test_rendering_shape() {
    let dungeon = generate(70, 40, 10, Some(42)).unwrap();
    let text = dungeon.to_text();
    assert_eq!(text.lines().count(), 40);
    assert!(text.lines().all(|line| line.chars().count() == 70));
    assert!(!text.contains('T'));
}

#[test]
fn test_same_seed_same_map() {
    let a = generate(60, 45, 8, Some(1_700_000_000_000)).unwrap();
    let b = generate(60, 45, 8, Some(1_700_000_000_000)).unwrap();
    assert_eq!(a.mesh(), b.mesh());
    assert_eq!(a.rooms(), b.rooms());

    // Seeds are reduced modulo 2^32
    let c = generate(60, 45, 8, Some(1_700_000_000_000 + (1 << 32))).unwrap();
    assert_eq!(a.mesh(), c.mesh());
}

#[test]
fn test_zero_seed_is_a_real_seed() {
    let a = generate(40, 30, 3, Some(0)).unwrap();
    let b = generate(40, 30, 3, Some(0)).unwrap();
    assert_eq!(a.seed(), 0);
    assert_eq!(a.mesh(), b.mesh());
}

#[test]
fn test_single_room() {
    let dungeon = generate(70, 40, 1, Some(1)).unwrap();
    let room = dungeon.rooms()[0];
    assert_eq!((room.left, room.top, room.width, room.height), (9, 2, 5, 23));
    assert_eq!(room.door_count(), 0);
    assert_eq!(dungeon.mesh().count(CellType::Corridor), 0);
    assert_eq!(dungeon.mesh().count(CellType::Door), 0);
    assert!(dungeon.all_rooms_connected());
}

#[test]
fn test_smallest_grids() {
    let dungeon = generate(7, 7, 1, Some(1)).unwrap();
    let room = dungeon.rooms()[0];
    assert_eq!((room.left, room.top, room.width, room.height), (1, 1, 5, 5));

    let dungeon = generate(17, 9, 2, Some(3)).unwrap();
    assert_eq!(dungeon.rooms().len(), 2);
    assert!(dungeon.all_rooms_connected());

    let dungeon = generate(16, 30, 2, Some(3)).unwrap();
    assert_eq!(dungeon.rooms()[0].door(Face::BOTTOM), Some(7));
    assert_eq!(dungeon.rooms()[1].door(Face::TOP), Some(13));

    let dungeon = generate(17, 17, 2, Some(5)).unwrap();
    assert!(dungeon.all_rooms_connected());
}

#[test]
fn test_invalid_parameters() {
    let cases = [
        (0, 40, 1),
        (70, 0, 1),
        (-1, 40, 1),
        (70, 40, 0),
        (70, 40, -4),
        (5, 40, 1),
        (2_000_000_000, 2_000_000_000, 1),
    ];
    for (w, h, n) in cases {
        let err = generate(w, h, n, Some(1)).unwrap_err();
        assert!(err.is_invalid_parameter(), "{w}x{h} n={n}: {err}");
    }
}

#[test]
fn test_too_many_rooms() {
    let err = generate(20, 20, 5, Some(1)).unwrap_err();
    assert!(err.is_exhausted(), "{err}");
    match err {
        GenerateError::ConfigurationExhausted { room_num, width, height, .. } => {
            assert_eq!((room_num, width, height), (5, 20, 20));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(generate(15, 10, 2, Some(1)).unwrap_err().is_exhausted());
    assert!(generate(70, 40, 200, Some(1)).unwrap_err().is_exhausted());
}

#[test]
fn test_generate_with_options() {
    let opts = GeneratorOptions::parse_config("OPTIONS=width:32,height:20,rooms:2,seed:7").unwrap();
    let dungeon = generate_with(&opts).unwrap();
    assert_eq!(dungeon.to_text(), MESH_32X20_N2_S7);

    let opts = GeneratorOptions::parse_config("OPTIONS=width:0").unwrap();
    assert!(generate_with(&opts).unwrap_err().is_invalid_parameter());
}

#[test]
fn test_json_document() {
    let dungeon = generate(32, 20, 2, Some(7)).unwrap();
    let json = serde_json::to_value(&dungeon).unwrap();

    let mesh = json["mesh"].as_array().unwrap();
    assert_eq!(mesh.len(), 32 * 20);
    let rendered: String = mesh
        .iter()
        .map(|code| char::from(code.as_u64().unwrap() as u8))
        .collect();
    let expected: String = MESH_32X20_N2_S7.lines().collect();
    assert_eq!(rendered, expected);

    assert_eq!(json["rooms"][0]["top"], 1);
    assert_eq!(json["rooms"][0]["left"], 1);
    assert_eq!(json["rooms"][0]["door"], serde_json::json!([-1, -1, 8, -1]));
    assert_eq!(json["rooms"][1]["door"], serde_json::json!([-1, 9, -1, -1]));
}

#[test]
fn test_seed_42_map_is_connected() {
    let dungeon = generate(70, 40, 10, Some(42)).unwrap();
    let tracker = dungeon.connectivity();
    assert!(tracker.all_connected());
    assert_eq!(tracker.group_count(), 1);
}

use egui::Color32;
use inkpad::{FillOutcome, InkError, Raster, flood_fill};

const WALL: Color32 = Color32::from_rgb(20, 20, 20);
const FLOOR: Color32 = Color32::from_rgb(200, 200, 200);

// Two 4-connected rooms split by a vertical wall at x = 4.
fn two_rooms() -> Raster {
    let mut raster = Raster::filled(9, 6, FLOOR);
    for y in 0..6 {
        raster.set_pixel(4, y, WALL);
    }
    raster
}

fn left_room(x: usize) -> bool {
    x < 4
}

#[test]
fn test_fill_with_region_color_is_byte_identical() {
    let mut raster = two_rooms();
    let before = raster.to_rgba_unmultiplied();

    let outcome = flood_fill(&mut raster, 1, 1, FLOOR).unwrap();

    assert_eq!(outcome, FillOutcome::Unchanged);
    assert_eq!(raster.to_rgba_unmultiplied(), before);
}

#[test]
fn test_fill_changes_exactly_the_seeded_region_from_any_seed() {
    let fill = Color32::from_rgb(0, 0, 255);

    for seed_y in 0..6 {
        for seed_x in 0..4 {
            let mut raster = two_rooms();
            let outcome = flood_fill(&mut raster, seed_x, seed_y, fill).unwrap();
            assert_eq!(outcome, FillOutcome::Filled { pixels: 4 * 6 });

            for y in 0..6 {
                for x in 0..9 {
                    let expected = if left_room(x) {
                        fill
                    } else if x == 4 {
                        WALL
                    } else {
                        FLOOR
                    };
                    assert_eq!(
                        raster.get_pixel(x, y),
                        Some(expected),
                        "pixel ({}, {}) after seeding ({}, {})",
                        x,
                        y,
                        seed_x,
                        seed_y
                    );
                }
            }
        }
    }
}

#[test]
fn test_translucent_pixels_are_filled_whatever_their_rgb() {
    let mut raster = Raster::filled(5, 1, FLOOR);
    raster.set_pixel(1, 0, Color32::from_rgba_unmultiplied(255, 0, 0, 10));
    raster.set_pixel(2, 0, Color32::from_rgba_unmultiplied(0, 255, 0, 254));
    raster.set_pixel(3, 0, Color32::TRANSPARENT);

    let fill = Color32::from_rgb(9, 9, 9);
    let outcome = flood_fill(&mut raster, 0, 0, fill).unwrap();

    assert_eq!(outcome, FillOutcome::Filled { pixels: 5 });
    assert!(raster.pixels().iter().all(|&p| p == fill));
}

#[test]
fn test_seed_outside_raster_is_rejected_without_mutation() {
    let mut raster = two_rooms();
    let before = raster.clone();

    let result = flood_fill(&mut raster, 9, 0, Color32::RED);

    assert!(matches!(result, Err(InkError::InvalidArgument(_))));
    assert_eq!(raster, before);
}

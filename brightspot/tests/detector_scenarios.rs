// tests/detector_scenarios.rs: end-to-end detection scenarios through the
// public API only.

use brightspot::config::DetectionConfig;
use brightspot::{Detector, Subject};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn black_frame() -> RgbImage {
    RgbImage::new(WIDTH, HEIGHT)
}

fn paint_square(frame: &mut RgbImage, x0: u32, y0: u32, side: u32, value: u8) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            frame.put_pixel(x, y, Rgb([value, value, value]));
        }
    }
}

fn detector(threshold: u8, min_area: f64, max_area: f64, max_subjects: usize) -> Detector {
    Detector::new(&DetectionConfig {
        threshold,
        min_area,
        max_area,
        max_subjects,
    })
    .expect("valid detection config")
}

fn assert_ranked(subjects: &[Subject]) {
    for pair in subjects.windows(2) {
        assert!(pair[0].brightness >= pair[1].brightness);
    }
}

#[test]
fn all_black_frame_has_no_subjects() {
    let subjects = detector(150, 10.0, 1e8, 30).detect(&black_frame());
    assert!(subjects.is_empty());
}

#[test]
fn single_white_square() {
    let mut frame = black_frame();
    paint_square(&mut frame, 100, 200, 20, 255);

    let subjects = detector(150, 10.0, 1e8, 30).detect(&frame);
    assert_eq!(subjects.len(), 1);

    let subject = &subjects[0];
    // polygon through boundary pixel centres: (20 - 1)^2
    assert!((subject.area - 361.0).abs() < 1e-9, "area {}", subject.area);
    assert!((subject.area - 400.0).abs() < 40.0);
    assert!((subject.brightness - 255.0).abs() < 1e-9);
    assert!((subject.x - 109.5).abs() < 1e-9);
    assert!((subject.y - 209.5).abs() < 1e-9);
    assert!(!subject.contour.is_empty());
}

#[test]
fn square_in_the_corner_is_detected() {
    let mut frame = black_frame();
    paint_square(&mut frame, 0, 0, 10, 255);

    let subjects = detector(150, 10.0, 1e8, 30).detect(&frame);
    assert_eq!(subjects.len(), 1);
    assert!((subjects[0].area - 81.0).abs() < 1e-9, "area {}", subjects[0].area);
    assert!((subjects[0].x - 4.5).abs() < 1e-9);
    assert!((subjects[0].y - 4.5).abs() < 1e-9);
    assert!((subjects[0].brightness - 255.0).abs() < 1e-9);
}

#[test]
fn fully_white_frame_is_one_subject() {
    let frame = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([255, 255, 255]));

    let subjects = detector(150, 10.0, 1e8, 30).detect(&frame);
    assert_eq!(subjects.len(), 1);
    let expected = ((WIDTH - 1) * (HEIGHT - 1)) as f64;
    assert!((subjects[0].area - expected).abs() < 1e-9, "area {}", subjects[0].area);
    assert!((subjects[0].brightness - 255.0).abs() < 1e-9);
    assert!((subjects[0].x - 319.5).abs() < 1e-9);
    assert!((subjects[0].y - 239.5).abs() < 1e-9);
}

#[test]
fn two_squares_come_back_brighter_first() {
    let mut frame = black_frame();
    paint_square(&mut frame, 50, 50, 20, 160);
    paint_square(&mut frame, 300, 300, 20, 200);

    let subjects = detector(150, 10.0, 1e8, 30).detect(&frame);
    assert_eq!(subjects.len(), 2);
    assert!((subjects[0].brightness - 200.0).abs() < 1e-9);
    assert!((subjects[1].brightness - 160.0).abs() < 1e-9);
    assert!(subjects[0].x > 300.0);
}

#[test]
fn capacity_keeps_only_the_brightest() {
    let mut frame = black_frame();
    paint_square(&mut frame, 20, 20, 15, 90);
    paint_square(&mut frame, 200, 100, 15, 200);
    paint_square(&mut frame, 400, 300, 15, 150);

    let subjects = detector(80, 10.0, 1e8, 1).detect(&frame);
    assert_eq!(subjects.len(), 1);
    assert!((subjects[0].brightness - 200.0).abs() < 1e-9);

    let all = detector(80, 10.0, 1e8, 30).detect(&frame);
    let order: Vec<f64> = all.iter().map(|s| s.brightness.round()).collect();
    assert_eq!(order, vec![200.0, 150.0, 90.0]);
}

#[test]
fn area_bounds_filter_regions() {
    let mut frame = black_frame();
    paint_square(&mut frame, 10, 10, 5, 255); // area 16
    paint_square(&mut frame, 100, 100, 10, 255); // area 81
    paint_square(&mut frame, 300, 200, 30, 255); // area 841

    let subjects = detector(150, 50.0, 500.0, 30).detect(&frame);
    assert_eq!(subjects.len(), 1);
    assert!((subjects[0].area - 81.0).abs() < 1e-9);
}

#[test]
fn single_pixels_are_dropped_as_degenerate() {
    let mut frame = black_frame();
    frame.put_pixel(30, 30, Rgb([255, 255, 255]));
    frame.put_pixel(90, 90, Rgb([255, 255, 255]));
    assert!(detector(150, 0.0, 1e8, 30).detect(&frame).is_empty());
}

fn noisy_frame(seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut frame = black_frame();
    for _ in 0..40 {
        let side = rng.random_range(2..25);
        let x = rng.random_range(0..WIDTH - side);
        let y = rng.random_range(0..HEIGHT - side);
        let value = rng.random_range(100..=255);
        paint_square(&mut frame, x, y, side, value);
    }
    frame
}

#[test]
fn detection_is_idempotent() {
    let frame = noisy_frame(0xB1A5);
    let detector = detector(150, 10.0, 1e8, 30);
    let first = detector.detect(&frame);
    let second = detector.detect(&frame);
    assert_eq!(first, second);
}

#[test]
fn invariants_hold_on_random_frames() {
    let detector = detector(140, 20.0, 300.0, 5);
    for seed in 0..10 {
        let subjects = detector.detect(&noisy_frame(seed));
        assert!(subjects.len() <= 5);
        assert_ranked(&subjects);
        for subject in &subjects {
            assert!(subject.area >= 20.0 && subject.area <= 300.0);
            assert!(subject.brightness >= 0.0 && subject.brightness <= 255.0);
        }
    }
}

#[test]
fn threshold_changes_take_effect_on_next_frame() {
    let mut frame = black_frame();
    paint_square(&mut frame, 100, 100, 20, 120);

    let mut detector = detector(150, 10.0, 1e8, 30);
    assert!(detector.detect(&frame).is_empty());
    detector.set_threshold(110);
    assert_eq!(detector.detect(&frame).len(), 1);
}

use bon_voyage::geodesy::{
    destination_point, great_circle_distance, initial_bearing, sun_angle, surface_position,
};
use bon_voyage::primitives::vector;

const RADIUS: f64 = 600_000.0;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn bearings_follow_compass_convention() {
    assert!(close(initial_bearing(0.0, 0.0, 1.0, 0.0), 0.0, 1e-9));
    assert!(close(initial_bearing(0.0, 0.0, 0.0, 1.0), 90.0, 1e-9));
    assert!(close(initial_bearing(0.0, 0.0, -1.0, 0.0), 180.0, 1e-9));
    assert!(close(initial_bearing(0.0, 0.0, 0.0, -1.0), 270.0, 1e-9));
}

#[test]
fn destination_point_travels_the_requested_distance() {
    let start = (10.0, 20.0);
    for bearing in [0.0, 45.0, 135.0, 260.0] {
        let end = destination_point(start.0, start.1, bearing, 12_345.0, RADIUS);
        let distance = great_circle_distance(start.0, start.1, end.latitude, end.longitude, RADIUS);
        assert!(close(distance, 12_345.0, 1e-3), "bearing {bearing}: {distance}");
        let back = initial_bearing(start.0, start.1, end.latitude, end.longitude);
        assert!(close(back, bearing, 1e-6), "bearing {bearing}: {back}");
    }
}

#[test]
fn destination_point_wraps_the_antimeridian() {
    let end = destination_point(0.0, 179.99, 90.0, 1_000.0, RADIUS);
    assert!(end.longitude < -179.0, "longitude {}", end.longitude);
    assert!(end.longitude >= -180.0);
}

#[test]
fn quarter_circumference_along_equator_is_ninety_degrees() {
    let quarter = std::f64::consts::FRAC_PI_2 * RADIUS;
    let end = destination_point(0.0, 0.0, 90.0, quarter, RADIUS);
    assert!(close(end.latitude, 0.0, 1e-9));
    assert!(close(end.longitude, 90.0, 1e-9));
}

#[test]
fn surface_position_includes_altitude() {
    let p = surface_position(0.0, 90.0, 250.0, RADIUS);
    assert!(close(vector::norm(&p), RADIUS + 250.0, 1e-6));
    assert!(close(p[1], RADIUS + 250.0, 1e-6));
}

#[test]
fn sun_angle_spans_noon_to_midnight() {
    let sun = [1.0, 0.0, 0.0];
    assert!(close(sun_angle(0.0, 0.0, &sun), 0.0, 1e-9));
    assert!(close(sun_angle(0.0, 90.0, &sun), 90.0, 1e-9));
    assert!(close(sun_angle(0.0, 180.0, &sun), 180.0, 1e-9));
    assert!(close(sun_angle(90.0, 0.0, &sun), 90.0, 1e-9));
}

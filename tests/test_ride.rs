//! Ride history integration tests

use tkx_lib::app::{ride_append, ride_list, RideAppendReq};
use tkx_lib::infra::db::init_test_db;

fn make_req(driver_id: i64) -> RideAppendReq {
    RideAppendReq {
        driver_id,
        client_id: Some(3),
        total_paid: 25.0,
        distance_km: 7.4,
        platform_fee: 2.5,
        gateway_cost: 0.75,
        fixed_costs: 4.0,
        driver_net: 17.75,
        departure_time: Some("18:40".to_string()),
        competitor_price: Some(27.9),
        driver_rating: Some(5),
    }
}

#[test]
fn append_returns_stored_row() {
    let conn = init_test_db();
    let dto = ride_append(&conn, make_req(1)).unwrap();
    assert!(dto.id > 0);
    assert_eq!(dto.driver_id, Some(1));
    assert_eq!(dto.client_id, Some(3));
    assert_eq!(dto.total_paid, Some(25.0));
    assert_eq!(dto.departure_time.as_deref(), Some("18:40"));
    assert_eq!(dto.driver_rating, Some(5));
    assert!(dto.ride_at.is_some());
    assert!(dto.recorded_at.is_some());
}

#[test]
fn append_accepts_unknown_driver_and_client_ids() {
    let conn = init_test_db();
    let mut req = make_req(999);
    req.client_id = Some(12345);
    assert!(ride_append(&conn, req).is_ok());
}

#[test]
fn append_trims_departure_time() {
    let conn = init_test_db();
    let mut req = make_req(1);
    req.departure_time = Some(" 07:05 ".to_string());
    let dto = ride_append(&conn, req).unwrap();
    assert_eq!(dto.departure_time.as_deref(), Some("07:05"));
}

#[test]
fn append_stores_numeric_fields_unconstrained() {
    let conn = init_test_db();
    let mut req = make_req(1);
    req.distance_km = -0.5;
    req.driver_net = -3.0;
    req.driver_rating = Some(9);
    let dto = ride_append(&conn, req).unwrap();
    assert_eq!(dto.distance_km, Some(-0.5));
    assert_eq!(dto.driver_net, Some(-3.0));
    assert_eq!(dto.driver_rating, Some(9));
    assert_eq!(ride_list(&conn, 10).unwrap().len(), 1);
}

#[test]
fn list_is_newest_first_and_limited() {
    let conn = init_test_db();
    for d in 1..=3 {
        ride_append(&conn, make_req(d)).unwrap();
    }
    let rides = ride_list(&conn, 2).unwrap();
    assert_eq!(rides.len(), 2);
    assert_eq!(rides[0].driver_id, Some(3));
    assert_eq!(rides[1].driver_id, Some(2));
}

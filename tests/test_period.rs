//! Period lookup integration tests

use tkx_lib::app::{period_for_time, period_list};
use tkx_lib::domain::{PeriodTable, CANONICAL_PERIODS};
use tkx_lib::infra::db::init_test_db;

#[test]
fn list_returns_seeded_periods_in_start_order() {
    let conn = init_test_db();
    for table in PeriodTable::all() {
        let list = period_list(&conn, *table).unwrap();
        let names: Vec<&str> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Madrugada", "Normal", "Pico", "Noite"]);
        for (dto, canon) in list.iter().zip(CANONICAL_PERIODS.iter()) {
            assert_eq!(dto.start, canon.start);
            assert_eq!(dto.end, canon.end);
            assert_eq!(dto.multiplier, canon.multiplier);
        }
    }
}

#[test]
fn lookup_finds_covering_period() {
    let conn = init_test_db();
    let p = period_for_time(&conn, PeriodTable::DynamicFares, "19:15").unwrap();
    assert_eq!(p.name, "Pico");
    assert_eq!(p.multiplier, 1.1);

    let p = period_for_time(&conn, PeriodTable::ScheduleGrid, "6:00").unwrap();
    assert_eq!(p.name, "Normal");

    let p = period_for_time(&conn, PeriodTable::DynamicFares, "23:59:30").unwrap();
    assert_eq!(p.name, "Noite");
}

#[test]
fn lookup_rejects_invalid_time() {
    let conn = init_test_db();
    let err = period_for_time(&conn, PeriodTable::DynamicFares, "25:00").unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn lookup_reports_uncovered_time() {
    let conn = init_test_db();
    conn.execute("DELETE FROM grade_horarios WHERE periodo = 'Pico'", [])
        .unwrap();
    let err = period_for_time(&conn, PeriodTable::ScheduleGrid, "18:30").unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
    // the other table is independent
    assert!(period_for_time(&conn, PeriodTable::DynamicFares, "18:30").is_ok());
}

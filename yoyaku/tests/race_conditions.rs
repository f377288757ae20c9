//! Race condition tests for concurrent booking attempts.
//!
//! The hazard this core exists to close: concurrent submissions racing for
//! the same slot. These tests hammer one slot from many threads, each with
//! its own database connection, and verify the conflict invariant holds:
//! exactly one winner, every loser told `SlotConflict`, never two active
//! reservations on the same slot.

mod common;
use common::{directory, next_monday, open_service};

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::NaiveDate;
use tempfile::TempDir;
use yoyaku::{
    BookingRequest, BookingService, Database, DatabaseConfig, MenuId, MenuSnapshot,
    NewReservation, Principal, SalonId, SlotKey, UserId,
};

const SALON: SalonId = SalonId::new(1);
const CUT: MenuId = MenuId::new(10);

/// Store-level race: N writers, one slot, plain `create_reservation`.
///
/// The check-and-insert is a single atomic operation (the partial unique
/// index decides), so no interleaving can admit two active reservations.
#[test]
fn test_concurrent_creates_one_winner() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("race.db");

    // Initialize the schema before the stampede
    drop(Database::open(DatabaseConfig::new(&path)).unwrap());

    let slot = SlotKey::new(
        SALON,
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        "10:00".parse().unwrap(),
    );

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
                let menu = MenuSnapshot::new(CUT, "Cut", 30, 4500).unwrap();
                let new = NewReservation::new(slot, UserId::new(i as i64), menu);
                barrier.wait();
                db.create_reservation(&new)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_conflict()))
        .count();

    assert_eq!(winners, 1, "exactly one create must win the slot");
    assert_eq!(conflicts, threads - 1, "every loser observes SlotConflict");

    // The store holds a single active reservation for the slot
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let occupied = db.occupied_times(SALON, slot.date).unwrap();
    assert_eq!(occupied, vec![slot.time]);
}

/// Service-level race: full submissions through validation and the
/// directory, same slot.
#[test]
fn test_concurrent_submissions_one_winner() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("race.db");
    drop(Database::open(DatabaseConfig::new(&path)).unwrap());

    let date = next_monday();
    let request = BookingRequest::new(SALON, date, "10:00".parse().unwrap(), CUT);

    let threads = 6;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let db = Database::open(DatabaseConfig::new(&path)).unwrap();
                let mut service = BookingService::new(db, directory(), directory());
                barrier.wait();
                service.submit(&Principal::user(UserId::new(100 + i as i64)), &request)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(yoyaku::Error::is_conflict));

    // Losers re-fetch availability and see the slot gone
    let service = open_service(&path);
    let slots = service.available_slots(SALON, date, CUT).unwrap();
    assert!(!slots.contains(&request.time));
}

/// Distinct slots under concurrency: no false conflicts.
#[test]
fn test_concurrent_creates_on_distinct_slots_all_win() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("race.db");
    drop(Database::open(DatabaseConfig::new(&path)).unwrap());

    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let times = ["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"];

    let barrier = Arc::new(Barrier::new(times.len()));
    let handles: Vec<_> = times
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            let time = time.parse().unwrap();
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
                let menu = MenuSnapshot::new(CUT, "Cut", 30, 4500).unwrap();
                let new = NewReservation::new(
                    SlotKey::new(SALON, date, time),
                    UserId::new(i as i64),
                    menu,
                );
                barrier.wait();
                db.create_reservation(&new)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let occupied = db.occupied_times(SALON, date).unwrap();
    assert_eq!(occupied.len(), times.len());
}

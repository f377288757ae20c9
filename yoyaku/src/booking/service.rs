//! Booking service: orchestration over calendar, store, and lifecycle.
//!
//! The service answers "what can I book?" and "book this" by combining the
//! slot calendar with the store's occupied set, and routes every status
//! change through the lifecycle state machine. It holds explicitly
//! constructed handles: the database plus the salon/menu directory
//! collaborators.

use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::calendar;
use crate::database::Database;
use crate::directory::{MenuDirectory, MenuItem, Principal, Role, Salon, SalonDirectory};
use crate::error::{Error, Result};
use crate::ids::{MenuId, ReservationId, SalonId};
use crate::lifecycle::{BookingEvent, TransitionRequest};
use crate::reservation::{MenuSnapshot, NewReservation, Reservation, SlotKey};
use crate::slot::{DateRange, SlotTime};

use super::notify::{BookingNotifier, NoopNotifier};

/// A booking submission.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yoyaku::{BookingRequest, MenuId, SalonId};
///
/// let request = BookingRequest::new(
///     SalonId::new(1),
///     NaiveDate::from_ymd_opt(2029, 6, 4).unwrap(),
///     "10:00".parse().unwrap(),
///     MenuId::new(10),
/// );
/// assert_eq!(request.salon_id, SalonId::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    /// The salon to book at.
    pub salon_id: SalonId,
    /// The requested date.
    pub date: NaiveDate,
    /// The requested slot start time.
    pub time: SlotTime,
    /// The requested menu item.
    pub menu_id: MenuId,
}

impl BookingRequest {
    /// Creates a booking submission.
    #[must_use]
    pub const fn new(salon_id: SalonId, date: NaiveDate, time: SlotTime, menu_id: MenuId) -> Self {
        Self {
            salon_id,
            date,
            time,
            menu_id,
        }
    }
}

/// Orchestrates slot queries, booking submissions, and transitions.
///
/// Construction is explicit dependency injection: the store handle and the
/// collaborator directories are passed in, which keeps the service fully
/// testable with doubles.
pub struct BookingService<S, M> {
    db: Database,
    salons: S,
    menus: M,
    notifier: Box<dyn BookingNotifier>,
}

impl<S: SalonDirectory, M: MenuDirectory> BookingService<S, M> {
    /// Creates a service over the given store and directories.
    ///
    /// Events are dropped until a notifier is attached with
    /// [`with_notifier`](Self::with_notifier).
    #[must_use]
    pub fn new(db: Database, salons: S, menus: M) -> Self {
        Self {
            db,
            salons,
            menus,
            notifier: Box::new(NoopNotifier),
        }
    }

    /// Attaches a booking-event notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn BookingNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Returns a mutable reference to the underlying store.
    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Looks up the salon and menu item, checking menu ownership.
    fn lookup(&self, salon_id: SalonId, menu_id: MenuId) -> Result<(Salon, MenuItem)> {
        let salon = self
            .salons
            .salon(salon_id)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("salon {salon_id}"),
            })?;
        let menu = self
            .menus
            .menu_item(menu_id)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("menu item {menu_id}"),
            })?;
        if menu.salon_id != salon_id {
            return Err(Error::Validation {
                field: "menu_id".into(),
                message: format!("menu item {menu_id} does not belong to salon {salon_id}"),
            });
        }
        Ok((salon, menu))
    }

    /// Returns the bookable slots for a salon, date, and menu item.
    ///
    /// Calendar candidates minus the store's occupied set, ascending. A
    /// date in the past yields an empty list; closed days likewise.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown salon or menu item, `Validation`
    /// when the menu belongs to another salon, or a storage error.
    pub fn available_slots(
        &self,
        salon_id: SalonId,
        date: NaiveDate,
        menu_id: MenuId,
    ) -> Result<Vec<SlotTime>> {
        let (salon, menu) = self.lookup(salon_id, menu_id)?;

        if date < Local::now().date_naive() {
            return Ok(Vec::new());
        }

        let hours = salon.hours.for_weekday(date.weekday());
        let occupied: HashSet<SlotTime> =
            self.db.occupied_times(salon_id, date)?.into_iter().collect();

        Ok(calendar::candidate_starts(hours, menu.duration_minutes)
            .filter(|slot| !occupied.contains(slot))
            .collect())
    }

    /// Submits a booking for the authenticated user.
    ///
    /// Validates the request (future slot, menu ownership, time within the
    /// salon's bookable grid) and then performs one atomic create. A lost
    /// race surfaces as [`Error::SlotConflict`] untouched, so the caller
    /// can re-fetch availability; no alternate slot is ever picked
    /// silently. On success the booking-created event is emitted.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for bad input or a non-user principal,
    /// `NotFound` for unknown salon/menu, `SlotConflict` when the slot was
    /// taken concurrently, `Unavailable` on storage timeout, or a
    /// database error.
    pub fn submit(&mut self, principal: &Principal, request: &BookingRequest) -> Result<Reservation> {
        if principal.role != Role::User {
            return Err(Error::Validation {
                field: "principal".into(),
                message: "only users may submit bookings".into(),
            });
        }

        let (salon, menu) = self.lookup(request.salon_id, request.menu_id)?;

        let now = Local::now().naive_local();
        check_slot_in_future(request, now)?;

        let hours = salon.hours.for_weekday(request.date.weekday());
        let bookable = calendar::candidate_starts(hours, menu.duration_minutes)
            .any(|slot| slot == request.time);
        if !bookable {
            return Err(Error::Validation {
                field: "time".into(),
                message: format!(
                    "{} is not a bookable start time at salon {} on {}",
                    request.time, request.salon_id, request.date
                ),
            });
        }

        let snapshot = MenuSnapshot::new(menu.id, menu.name, menu.duration_minutes, menu.price)?;
        let slot = SlotKey::new(request.salon_id, request.date, request.time);
        let reservation = self
            .db
            .create_reservation(&NewReservation::new(slot, principal.user_id(), snapshot))?;

        log::debug!(
            "booking submitted: reservation {} by user {}",
            reservation.id(),
            principal.user_id()
        );
        self.notifier.booking_created(&reservation);

        Ok(reservation)
    }

    /// Lists a salon's reservations, operator-only.
    ///
    /// Ordered by `(date, time)` ascending; empty when none exist.
    ///
    /// # Errors
    ///
    /// Returns `Validation` unless the principal is the salon itself, or a
    /// storage error.
    pub fn list_salon(
        &self,
        principal: &Principal,
        salon_id: SalonId,
        range: Option<&DateRange>,
    ) -> Result<Vec<Reservation>> {
        if principal.role != Role::Salon || principal.salon_id() != salon_id {
            return Err(Error::Validation {
                field: "principal".into(),
                message: "only the salon operator may list its reservations".into(),
            });
        }
        self.db.list_salon_reservations(salon_id, range)
    }

    /// Applies a lifecycle event to a reservation on behalf of a
    /// principal.
    ///
    /// Users may act only on their own reservations, operators only on
    /// their own salon's; the state machine then decides whether the event
    /// is legal for the actor and the current status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `Validation` when the
    /// principal does not own the record, `InvalidTransition` when the
    /// state machine rejects the event, `Unavailable` on storage timeout,
    /// or a database error.
    pub fn transition(
        &mut self,
        principal: &Principal,
        id: ReservationId,
        event: BookingEvent,
    ) -> Result<Reservation> {
        let reservation = self.db.get_reservation(id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;

        match principal.role {
            Role::User => {
                if reservation.user_id() != principal.user_id() {
                    return Err(Error::Validation {
                        field: "principal".into(),
                        message: "reservation belongs to another user".into(),
                    });
                }
            }
            Role::Salon => {
                if reservation.slot().salon_id != principal.salon_id() {
                    return Err(Error::Validation {
                        field: "principal".into(),
                        message: "reservation belongs to another salon".into(),
                    });
                }
            }
        }

        let request = TransitionRequest {
            event,
            actor: principal.role,
            now: Local::now().naive_local(),
        };
        self.db.transition_reservation(id, &request)
    }
}

/// Rejects slots whose start is not strictly in the future.
fn check_slot_in_future(request: &BookingRequest, now: NaiveDateTime) -> Result<()> {
    if request.date < now.date() {
        return Err(Error::Validation {
            field: "date".into(),
            message: format!("{} is in the past", request.date),
        });
    }
    let start = request.date.and_time(request.time.time());
    if start <= now {
        return Err(Error::Validation {
            field: "time".into(),
            message: format!("slot {} has already started", request.time),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, new_reservation};
    use crate::directory::StaticDirectory;
    use crate::ids::UserId;
    use crate::reservation::ReservationStatus;
    use crate::slot::{DayHours, OpeningHours};
    use chrono::Days;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SALON: SalonId = SalonId::new(1);
    const CUT: MenuId = MenuId::new(10);
    const COLOR: MenuId = MenuId::new(11);
    const OTHER_SALON_MENU: MenuId = MenuId::new(30);

    fn directory() -> StaticDirectory {
        StaticDirectory::from_yaml_str(
            r#"
salons:
  - id: 1
    name: Ginza
    hours:
      monday: { start: "09:00", end: "18:00" }
      tuesday: { start: "09:00", end: "18:00" }
      wednesday: { start: "09:00", end: "18:00" }
      thursday: { start: "09:00", end: "18:00" }
      friday: { start: "09:00", end: "18:00" }
      saturday: { start: "09:00", end: "18:00" }
      sunday: { start: "09:00", end: "18:00" }
  - id: 2
    name: Shibuya
    hours:
      monday: { start: "10:00", end: "16:00" }
menus:
  - id: 10
    salon_id: 1
    name: Cut
    duration_minutes: 30
    price: 4500
  - id: 11
    salon_id: 1
    name: Color
    duration_minutes: 90
    price: 12000
  - id: 30
    salon_id: 2
    name: Perm
    duration_minutes: 120
    price: 15000
"#,
        )
        .unwrap()
    }

    fn service() -> BookingService<StaticDirectory, StaticDirectory> {
        let directory = directory();
        BookingService::new(create_test_database(), directory.clone(), directory)
    }

    /// A date far enough out that submissions always pass the past guard.
    fn future_date() -> NaiveDate {
        Local::now()
            .date_naive()
            .checked_add_days(Days::new(30))
            .unwrap()
    }

    fn user() -> Principal {
        Principal::user(UserId::new(12))
    }

    #[test]
    fn test_available_slots_full_day() {
        let service = service();
        let slots = service.available_slots(SALON, future_date(), CUT).unwrap();
        // Open 09:00-18:00 with a 30-minute menu: 18 candidates
        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0].to_string(), "09:00");
        assert_eq!(slots[17].to_string(), "17:30");
    }

    #[test]
    fn test_available_slots_subtracts_occupied() {
        let mut service = service();
        let date = future_date();
        service
            .database_mut()
            .create_reservation(&new_reservation(
                1,
                &date.to_string(),
                "10:00",
                99,
            ))
            .unwrap();

        let slots = service.available_slots(SALON, date, CUT).unwrap();
        assert_eq!(slots.len(), 17);
        assert!(!slots.iter().any(|slot| slot.to_string() == "10:00"));
    }

    #[test]
    fn test_available_slots_past_date_is_empty() {
        let service = service();
        let yesterday = Local::now()
            .date_naive()
            .checked_sub_days(Days::new(1))
            .unwrap();
        assert!(service.available_slots(SALON, yesterday, CUT).unwrap().is_empty());
    }

    #[test]
    fn test_available_slots_unknown_salon() {
        let service = service();
        let err = service
            .available_slots(SalonId::new(99), future_date(), CUT)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_available_slots_menu_of_other_salon() {
        let service = service();
        let err = service
            .available_slots(SALON, future_date(), OTHER_SALON_MENU)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "menu_id"));
    }

    #[test]
    fn test_submit_creates_requested_reservation() {
        let mut service = service();
        let date = future_date();
        let request = BookingRequest::new(SALON, date, "10:00".parse().unwrap(), CUT);

        let reservation = service.submit(&user(), &request).unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Requested);
        assert_eq!(reservation.user_id(), UserId::new(12));
        assert_eq!(reservation.menu().name(), "Cut");
        assert_eq!(reservation.menu().price(), 4500);
        assert_eq!(reservation.slot().date, date);
    }

    #[test]
    fn test_submit_twice_reports_conflict() {
        let mut service = service();
        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);

        service.submit(&user(), &request).unwrap();
        let err = service
            .submit(&Principal::user(UserId::new(34)), &request)
            .unwrap_err();
        assert!(err.is_conflict());

        // The loser can re-fetch availability and see the slot gone
        let slots = service
            .available_slots(SALON, request.date, CUT)
            .unwrap();
        assert!(!slots.contains(&request.time));
    }

    #[test]
    fn test_submit_rejects_operator_principal() {
        let mut service = service();
        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);
        let err = service.submit(&Principal::salon(SALON), &request).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "principal"));
    }

    #[test]
    fn test_submit_rejects_past_date() {
        let mut service = service();
        let yesterday = Local::now()
            .date_naive()
            .checked_sub_days(Days::new(1))
            .unwrap();
        let request = BookingRequest::new(SALON, yesterday, "10:00".parse().unwrap(), CUT);
        let err = service.submit(&user(), &request).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "date"));
    }

    #[test]
    fn test_submit_rejects_time_outside_hours() {
        let mut service = service();
        // 18:00 is closing time; nothing can start there
        let request = BookingRequest::new(SALON, future_date(), "18:00".parse().unwrap(), CUT);
        let err = service.submit(&user(), &request).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "time"));
    }

    #[test]
    fn test_submit_rejects_tail_slot_for_long_menu() {
        let mut service = service();
        // A 90-minute color cannot start at 17:30 even though a cut could
        let request = BookingRequest::new(SALON, future_date(), "17:30".parse().unwrap(), COLOR);
        let err = service.submit(&user(), &request).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "time"));
    }

    #[test]
    fn test_submit_unknown_menu() {
        let mut service = service();
        let request =
            BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), MenuId::new(77));
        let err = service.submit(&user(), &request).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_submit_emits_booking_created() {
        struct Recorder(Rc<RefCell<Vec<ReservationId>>>);
        impl BookingNotifier for Recorder {
            fn booking_created(&self, reservation: &Reservation) {
                self.0.borrow_mut().push(reservation.id());
            }
        }

        let created = Rc::new(RefCell::new(Vec::new()));
        let directory = directory();
        let mut service =
            BookingService::new(create_test_database(), directory.clone(), directory)
                .with_notifier(Box::new(Recorder(Rc::clone(&created))));

        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);
        let reservation = service.submit(&user(), &request).unwrap();

        assert_eq!(created.borrow().as_slice(), &[reservation.id()]);

        // A failed submission emits nothing
        let _ = service.submit(&user(), &request).unwrap_err();
        assert_eq!(created.borrow().len(), 1);
    }

    #[test]
    fn test_list_salon_operator_only() {
        let service = service();
        let err = service.list_salon(&user(), SALON, None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let other = Principal::salon(SalonId::new(2));
        let err = service.list_salon(&other, SALON, None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let listed = service
            .list_salon(&Principal::salon(SALON), SALON, None)
            .unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_operator_confirms_and_completes() {
        let mut service = service();
        // Seed a confirmed-able reservation in the past so completion is
        // allowed (store inserts bypass the past guard by design)
        let created = service
            .database_mut()
            .create_reservation(&new_reservation(1, "2020-06-04", "10:00", 12))
            .unwrap();

        let operator = Principal::salon(SALON);
        let confirmed = service
            .transition(&operator, created.id(), BookingEvent::Confirm)
            .unwrap();
        assert_eq!(confirmed.status(), ReservationStatus::Confirmed);

        let completed = service
            .transition(&operator, created.id(), BookingEvent::Complete)
            .unwrap();
        assert_eq!(completed.status(), ReservationStatus::Completed);

        // Confirming a completed reservation fails
        let err = service
            .transition(&operator, created.id(), BookingEvent::Confirm)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn test_user_cannot_confirm_own_booking() {
        let mut service = service();
        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);
        let created = service.submit(&user(), &request).unwrap();

        let err = service
            .transition(&user(), created.id(), BookingEvent::Confirm)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn test_user_cancels_own_booking_only() {
        let mut service = service();
        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);
        let created = service.submit(&user(), &request).unwrap();

        let stranger = Principal::user(UserId::new(777));
        let err = service
            .transition(&stranger, created.id(), BookingEvent::Cancel)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        let cancelled = service
            .transition(&user(), created.id(), BookingEvent::Cancel)
            .unwrap();
        assert_eq!(cancelled.status(), ReservationStatus::Cancelled);
    }

    #[test]
    fn test_operator_of_other_salon_cannot_touch_reservation() {
        let mut service = service();
        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);
        let created = service.submit(&user(), &request).unwrap();

        let other = Principal::salon(SalonId::new(2));
        let err = service
            .transition(&other, created.id(), BookingEvent::Confirm)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_transition_unknown_reservation() {
        let mut service = service();
        let err = service
            .transition(&user(), ReservationId::new(404), BookingEvent::Cancel)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_cancelled_slot_becomes_available_again() {
        let mut service = service();
        let request = BookingRequest::new(SALON, future_date(), "10:00".parse().unwrap(), CUT);
        let created = service.submit(&user(), &request).unwrap();

        assert!(!service
            .available_slots(SALON, request.date, CUT)
            .unwrap()
            .contains(&request.time));

        service
            .transition(&user(), created.id(), BookingEvent::Cancel)
            .unwrap();

        assert!(service
            .available_slots(SALON, request.date, CUT)
            .unwrap()
            .contains(&request.time));

        // And it can be booked again
        service
            .submit(&Principal::user(UserId::new(34)), &request)
            .unwrap();
    }

    #[test]
    fn test_directory_failure_propagates() {
        mockall::mock! {
            Salons {}
            impl SalonDirectory for Salons {
                fn salon(&self, id: SalonId) -> crate::error::Result<Option<Salon>>;
            }
        }

        let mut salons = MockSalons::new();
        salons.expect_salon().returning(|_| {
            Err(Error::Unavailable {
                details: "salon directory timed out".into(),
            })
        });

        let service = BookingService::new(create_test_database(), salons, directory());
        let err = service
            .available_slots(SALON, future_date(), CUT)
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_lookup_with_hand_built_directory() {
        // StaticDirectory can also be assembled programmatically
        let hours = OpeningHours::every_day(DayHours::parse("09:00", "18:00").unwrap());
        let directory = StaticDirectory::new(
            vec![Salon {
                id: SALON,
                name: "Ginza".into(),
                hours,
            }],
            vec![MenuItem {
                id: CUT,
                salon_id: SALON,
                name: "Cut".into(),
                duration_minutes: 30,
                price: 4500,
            }],
        );
        let service = BookingService::new(create_test_database(), directory.clone(), directory);
        assert_eq!(
            service.available_slots(SALON, future_date(), CUT).unwrap().len(),
            18
        );
    }
}

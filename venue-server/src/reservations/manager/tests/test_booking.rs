use super::*;

#[tokio::test]
async fn booking_succeeds_and_blocks_the_overlap_window() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let outcome = book(&manager, t(19, 0), 2).await;
    assert!(outcome.success);
    let confirmation = outcome.reservation.unwrap();
    assert_eq!(confirmation.table, "T1");
    assert_eq!(confirmation.status, ReservationStatus::Confirmed);

    // Same slot again: the only table is taken
    let outcome = book(&manager, t(19, 0), 2).await;
    assert!(!outcome.success);
    assert_eq!(outcome.denial, Some(DenialReason::FullyBooked));
    assert!(!outcome.alternatives.is_empty());

    // Mid-window overlap is blocked too
    assert!(!book(&manager, t(19, 30), 2).await.success);

    // The occupancy ends at 20:30; a back-to-back seating works
    assert!(book(&manager, t(20, 30), 2).await.success);
}

#[tokio::test]
async fn end_time_is_persisted_from_the_period_duration() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let outcome = book(&manager, t(19, 0), 2).await;
    let id = outcome.reservation.unwrap().id;
    let row = manager.get_reservation(&id).await.unwrap().unwrap();
    assert_eq!(row.end_time, Some(t(20, 30)));
    assert_eq!(row.status, ReservationStatus::Confirmed);
    assert!(row.confirmed_at.is_some());
    assert_eq!(row.source, "whatsapp");
}

#[tokio::test]
async fn two_tables_fill_in_priority_order_then_deny_with_alternatives() {
    let (db, manager) = fixture().await;
    add_table(&db, "A", "interior", 2, 4, 1).await;
    add_table(&db, "B", "interior", 2, 4, 3).await;
    add_dinner(&db).await;

    let first = book(&manager, t(19, 0), 4).await;
    assert_eq!(first.reservation.unwrap().table, "A");

    let second = book(&manager, t(19, 0), 4).await;
    assert_eq!(second.reservation.unwrap().table, "B");

    let third = book(&manager, t(19, 0), 4).await;
    assert!(!third.success);
    assert_eq!(third.denial, Some(DenialReason::FullyBooked));
    // Closest open slots first
    assert_eq!(third.alternatives[0].time, t(20, 30));
    assert!(third.alternatives.len() <= 5);
}

#[tokio::test]
async fn zone_preference_wins_over_priority_when_satisfiable() {
    let (db, manager) = fixture().await;
    add_table(&db, "Inside", "interior", 2, 4, 1).await;
    add_table(&db, "Terrace", "terrace", 2, 4, 5).await;
    add_dinner(&db).await;

    let mut req = request(t(19, 0), 2);
    req.zone_preference = Some("terrace".to_string());
    let outcome = manager.create_reservation(req).await.unwrap();
    assert_eq!(outcome.reservation.unwrap().zone, "terrace");

    // An unsatisfiable preference falls back to the best free table
    let mut req = request(t(19, 0), 2);
    req.zone_preference = Some("garden".to_string());
    let outcome = manager.create_reservation(req).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.reservation.unwrap().zone, "interior");
}

#[tokio::test]
async fn denial_reasons_follow_precedence() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;
    close_friday(&db).await;

    let outcome = book(&manager, t(19, 0), 2).await;
    assert_eq!(outcome.denial, Some(DenialReason::Closed));
    assert!(outcome.alternatives.is_empty());

    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let outcome = book(&manager, t(15, 0), 2).await;
    assert_eq!(outcome.denial, Some(DenialReason::OutsideHours));

    let outcome = book(&manager, t(21, 30), 2).await;
    assert_eq!(outcome.denial, Some(DenialReason::AfterLastSeating));
}

#[tokio::test]
async fn concurrent_bookings_for_the_last_table_yield_one_winner() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let (a, b) = tokio::join!(book(&manager, t(19, 0), 2), book(&manager, t(19, 0), 2));
    assert_ne!(a.success, b.success);
    let loser = if a.success { b } else { a };
    assert_eq!(loser.denial, Some(DenialReason::FullyBooked));
}

#[tokio::test]
async fn walkin_books_the_current_minute_and_is_seated() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let now = friday().and_time(t(19, 7));
    let outcome = manager.create_walkin_at(now, 2, None).await.unwrap();
    assert!(outcome.success);
    let confirmation = outcome.reservation.unwrap();
    assert_eq!(confirmation.status, ReservationStatus::Seated);
    assert_eq!(confirmation.guest_name, "Walk-in");
    assert_eq!(confirmation.time, t(19, 7));

    let row = manager.get_reservation(&confirmation.id).await.unwrap().unwrap();
    assert_eq!(row.status, ReservationStatus::Seated);
    assert_eq!(row.source, "walkin");
    assert!(row.seated_at.is_some());
}

#[tokio::test]
async fn walkin_outside_hours_is_denied() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let now = friday().and_time(t(9, 0));
    let outcome = manager.create_walkin_at(now, 2, Some("Ad hoc".to_string())).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.denial, Some(DenialReason::OutsideHours));
}

#[tokio::test]
async fn oversized_party_is_fully_booked_with_no_alternatives() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let outcome = book(&manager, t(19, 0), 6).await;
    assert!(!outcome.success);
    assert_eq!(outcome.denial, Some(DenialReason::FullyBooked));
    assert!(outcome.alternatives.is_empty());
}

#[tokio::test]
async fn slot_listing_matches_the_grid() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    // 18:00 through 21:00 on the half hour
    let slots = manager.available_slots(friday(), 2).await.unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0].time, t(18, 0));
    assert_eq!(slots[7].time, t(21, 0));

    // A booking at 19:00 knocks out 18:00-20:00 starts
    book(&manager, t(19, 0), 2).await;
    let slots = manager.available_slots(friday(), 2).await.unwrap();
    let times: Vec<NaiveTime> = slots.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![t(20, 30), t(21, 0)]);
}

#[tokio::test]
async fn partial_intent_asks_before_checking() {
    let (db, manager) = fixture().await;
    add_table(&db, "T1", "interior", 2, 4, 1).await;
    add_dinner(&db).await;

    let intent = BookingIntent {
        date: Some(friday()),
        time: Some(t(19, 0)),
        party_size: None,
        zone_preference: None,
    };
    match manager.check_intent(intent).await.unwrap() {
        IntentReply::NeedsFields(missing) => assert_eq!(missing, vec!["party_size"]),
        IntentReply::Checked(_) => panic!("incomplete intent must not be checked"),
    }

    let intent = BookingIntent {
        date: Some(friday()),
        time: Some(t(19, 0)),
        party_size: Some(2),
        zone_preference: None,
    };
    match manager.check_intent(intent).await.unwrap() {
        IntentReply::Checked(reply) => assert!(reply.available),
        IntentReply::NeedsFields(_) => panic!("complete intent must be checked"),
    }
}

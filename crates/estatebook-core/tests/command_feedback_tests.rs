/// Success messages are part of the command contract
mod common;

use chrono::{NaiveDate, NaiveTime};
use common::*;
use estatebook_core::model::Appointment;
use estatebook_core::{AutoConfirm, Command, EstateError, Store};

#[test]
fn test_add_buyer_feedback() {
    let mut store = Store::new();

    let result = run(&mut store, Command::AddBuyer(benson()), &AutoConfirm).unwrap();

    assert_eq!(
        result.feedback,
        "New buyer added: Benson Meier; Phone: 98765432; Email: bensonmeier@example.com; Tags: [friends, owesMoney]"
    );
}

#[test]
fn test_add_seller_feedback() {
    let mut store = Store::new();

    let result = run(&mut store, Command::AddSeller(carl()), &AutoConfirm).unwrap();

    assert_eq!(
        result.feedback,
        "New seller added: Carl Kurz; Phone: 95352563; Email: carlkurz@example.com; Tags: []"
    );
}

#[test]
fn test_add_listing_feedback() {
    let mut store = Store::new();
    run(&mut store, Command::AddSeller(carl()), &AutoConfirm).unwrap();
    run(&mut store, Command::AddBuyer(alice()), &AutoConfirm).unwrap();

    let result = run(
        &mut store,
        add_listing_cmd("Pasir Ris Flat", "Carl Kurz", &["Alice Pauline"]),
        &AutoConfirm,
    )
    .unwrap();

    assert_eq!(
        result.feedback,
        "New listing added: Pasir Ris Flat; Price: $650000; Area: 100 m²; Address: Pasir Ris Flat Street 1; Region: central; Seller: Carl Kurz; Buyers: [Alice Pauline]"
    );
}

#[test]
fn test_delete_client_feedback() {
    let mut store = typical_store();

    let result = run(
        &mut store,
        Command::DeleteClient {
            name: "Daniel Meier".to_string(),
            skip_confirmation: false,
        },
        &AutoConfirm,
    )
    .unwrap();

    assert_eq!(
        result.feedback,
        "Successfully deleted Daniel Meier with the number: 87652533 and email: danielmeier@example.com!"
    );
}

#[test]
fn test_schedule_appointment_feedback() {
    let mut store = typical_store();
    let appointment = Appointment::scheduled(
        NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
    )
    .unwrap();

    let result = run(
        &mut store,
        Command::ScheduleAppointment {
            name: "Alice Pauline".to_string(),
            appointment,
        },
        &AutoConfirm,
    )
    .unwrap();

    assert_eq!(
        result.feedback,
        "Appointment scheduled for Alice Pauline: Date: 25-12-24 (From: 09:30 To: 10:15)"
    );
}

#[test]
fn test_failure_feedback_is_error_display() {
    let mut store = typical_store();

    let err = run(
        &mut store,
        Command::DeleteAppointment {
            name: "Alice Paulin".to_string(),
        },
        &AutoConfirm,
    )
    .unwrap_err();

    assert!(matches!(err, EstateError::Suggestion { .. }));
    assert_eq!(err.to_string(), "Did you mean Alice Pauline?");
}

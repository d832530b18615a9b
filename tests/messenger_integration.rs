//! Cross-component integration tests
//!
//! These tests exercise the full pipeline: locale resolution, standard
//! variable assembly, template compilation and dispatch through an in-memory
//! transport, without any host platform present.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use scheduler_messenger::config::Settings;
use scheduler_messenger::domain::{Course, Scheduler, Slot, User};
use scheduler_messenger::message::SCHEDULER_COMPONENT;
use scheduler_messenger::{
    create_string_catalog, CopyPolicy, Messenger, RecordingTransport, SendError, StringCatalog,
    TemplateVars, Transport,
};

/// Create a full test environment with a seeded catalog and transport
fn create_test_environment() -> TestEnvironment {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("scheduler_messenger=debug")
        .try_init();

    let catalog = create_string_catalog();
    catalog
        .load_pack(
            SCHEDULER_COMPONENT,
            "en",
            r#"{
                "slot_booked_subject": "{{COURSE_SHORT}}: appointment on {{DATE}}",
                "slot_booked_plain": "Dear {{ATTENDEE}},\n\nyour appointment for {{COURSE}} in {{MODULE}} is on {{DATE}} from {{TIME}} to {{ENDTIME}} ({{LOCATION}}), with the {{STAFFROLE}} {{ATTENDANT}}.\n\n{{SITE}} - {{COURSE_URL}}",
                "slot_booked_html": "<p>Dear {{ATTENDEE}},</p><p>your appointment for <b>{{COURSE}}</b> in <b>{{MODULE}}</b> is on {{DATE}} from {{TIME}} to {{ENDTIME}} ({{LOCATION}}), with the {{STAFFROLE}} <a href=\"{{ATTENDANT_URL}}\">{{ATTENDANT}}</a>.</p>",
                "slot_cancelled_subject": "Cancelled: {{DATE}} {{TIME}}",
                "slot_cancelled_plain": "The appointment on {{DATE}} at {{TIME}} was cancelled.\nReason: {{CANCEL_REASON}}",
                "slot_cancelled_html": "<p>The appointment on {{DATE}} at {{TIME}} was cancelled.<br>Reason: {{CANCEL_REASON}}</p>",
                "slot_confirmed_subject": "Confirmed: {{DATE}} {{TIME}}",
                "slot_confirmed_plain": "{{RECIPIENT}}: the appointment of {{ATTENDEE}} with {{ATTENDANT}} on {{DATE}} is confirmed.",
                "slot_confirmed_html": "<p>{{RECIPIENT}}: the appointment of {{ATTENDEE}} with {{ATTENDANT}} on {{DATE}} is confirmed.</p>"
            }"#,
        )
        .expect("seed pack");
    catalog
        .load_pack(
            "langconfig",
            "fr",
            r#"{"strftimedate": "%d/%m/%Y", "strftimetime": "%Hh%M"}"#,
        )
        .expect("seed langconfig pack");

    let transport = Arc::new(RecordingTransport::new());
    let messenger = Messenger::new(
        &Settings::default(),
        catalog.clone(),
        transport.clone() as Arc<dyn Transport>,
    );

    TestEnvironment {
        catalog,
        transport,
        messenger,
        scheduler: Scheduler::new(17, 42, "Math Tutoring", "Teacher"),
        slot: Slot::new(
            Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap(),
            "Room 101",
        ),
        course: Course::new(42, "ALG1", "Algebra I"),
        sender: User::new(1, "Sam", "Sender", "sam@example.com"),
        recipient: User::new(2, "Rae", "Recipient", "rae@example.com"),
        teacher: User::new(3, "Tina", "Teacher", "tina@example.com"),
        student: User::new(4, "Stu", "Dent", "stu@example.com"),
    }
}

struct TestEnvironment {
    catalog: Arc<StringCatalog>,
    transport: Arc<RecordingTransport>,
    messenger: Messenger,
    scheduler: Scheduler,
    slot: Slot,
    course: Course,
    sender: User,
    recipient: User,
    teacher: User,
    student: User,
}

// =============================================================================
// Booked-slot notification, end to end
// =============================================================================

#[test]
fn booked_slot_notification_renders_and_sends() {
    let env = create_test_environment();

    env.messenger
        .send_slot_notification(
            &env.slot,
            &env.scheduler,
            "bookingnotification",
            "slot_booked",
            &env.sender,
            &env.recipient,
            &env.teacher,
            &env.student,
            &env.course,
        )
        .expect("send");

    let sent = env.transport.sent();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];

    assert_eq!(message.subject, "ALG1: appointment on 10 March 2026");
    assert!(message.full_message.contains("Dear Stu Dent"));
    assert!(message.full_message.contains("Algebra I"));
    assert!(message.full_message.contains("Math Tutoring"));
    assert!(message.full_message.contains("10 March 2026"));
    assert!(message.full_message.contains("from 09:00 to 10:00"));
    assert!(message.full_message.contains("Room 101"));
    assert!(message.full_message.contains("Teacher Tina Teacher"));
    assert!(message
        .full_message
        .contains("http://localhost/course/view.php?id=42"));

    assert!(message
        .full_message_html
        .contains("http://localhost/user/view.php?id=3&course=42"));

    // No unsubstituted placeholders remain in any format
    assert!(!message.subject.contains("{{"));
    assert!(!message.full_message.contains("{{"));
    assert!(!message.full_message_html.contains("{{"));

    // Routing metadata points back to the course
    assert!(message.notification);
    assert_eq!(message.course_id, Some(42));
    assert_eq!(message.context_url_name.as_deref(), Some("Algebra I"));
}

#[test]
fn recipient_timezone_shifts_rendered_times() {
    let env = create_test_environment();
    let recipient = env.recipient.clone().with_utc_offset(120);

    env.messenger
        .send_slot_notification(
            &env.slot,
            &env.scheduler,
            "bookingnotification",
            "slot_booked",
            &env.sender,
            &recipient,
            &env.teacher,
            &env.student,
            &env.course,
        )
        .expect("send");

    let message = env.transport.last().expect("one message");
    assert!(message.full_message.contains("from 11:00 to 12:00"));
}

// =============================================================================
// Locale resolution through the whole stack
// =============================================================================

#[test]
fn course_locale_drives_date_patterns() {
    let env = create_test_environment();
    // French strings for the booked template
    env.catalog
        .load_pack(
            SCHEDULER_COMPONENT,
            "fr",
            r#"{
                "slot_booked_subject": "{{COURSE_SHORT}} : rendez-vous le {{DATE}} a {{TIME}}",
                "slot_booked_plain": "Rendez-vous le {{DATE}} a {{TIME}}.",
                "slot_booked_html": "<p>Rendez-vous le {{DATE}} a {{TIME}}.</p>"
            }"#,
        )
        .expect("fr pack");

    let course = env.course.clone().with_lang("fr");
    // The recipient prefers German, but the course language wins
    let recipient = env.recipient.clone().with_lang("de");

    env.messenger
        .send_slot_notification(
            &env.slot,
            &env.scheduler,
            "bookingnotification",
            "slot_booked",
            &env.sender,
            &recipient,
            &env.teacher,
            &env.student,
            &course,
        )
        .expect("send");

    let message = env.transport.last().expect("one message");
    assert_eq!(message.subject, "ALG1 : rendez-vous le 10/03/2026 a 09h00");
}

#[test]
fn unknown_locale_falls_back_to_english_strings() {
    let env = create_test_environment();
    let recipient = env.recipient.clone().with_lang("sv");

    env.messenger
        .send_slot_notification(
            &env.slot,
            &env.scheduler,
            "bookingnotification",
            "slot_booked",
            &env.sender,
            &recipient,
            &env.teacher,
            &env.student,
            &env.course,
        )
        .expect("send");

    let message = env.transport.last().expect("one message");
    assert_eq!(message.subject, "ALG1: appointment on 10 March 2026");
}

// =============================================================================
// Cancellation: recipient plus courtesy copy
// =============================================================================

#[test]
fn cancellation_notifies_recipient_and_sender() {
    let env = create_test_environment();

    let (to_recipient, to_sender) = env
        .messenger
        .send_slot_notification_cancelled(
            &env.slot,
            &env.scheduler,
            "cancellednotification",
            "slot_cancelled",
            &env.sender,
            &env.recipient,
            &env.teacher,
            &env.student,
            &env.course,
            "room flooded",
        )
        .expect("send");
    assert_ne!(to_recipient, to_sender);

    let sent = env.transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].recipient.id, env.recipient.id);
    assert_eq!(sent[1].recipient.id, env.sender.id);
    for message in &sent {
        assert!(message.full_message.contains("Reason: room flooded"));
    }
}

// =============================================================================
// Confirmation fan-out via the copy policy
// =============================================================================

#[test]
fn confirmation_copies_watchers_of_the_course() {
    let env = create_test_environment();
    let watcher = User::new(9, "Wanda", "Watcher", "wanda@example.com");
    let messenger = Messenger::new(
        &Settings::default(),
        env.catalog.clone(),
        env.transport.clone() as Arc<dyn Transport>,
    )
    .with_copy_policy(CopyPolicy::new().watch(Some(42), vec![watcher.clone()]));

    let ids = messenger
        .send_slot_notification_confirmed(
            &env.slot,
            &env.scheduler,
            "confirmednotification",
            "slot_confirmed",
            &env.sender,
            &env.recipient,
            &env.teacher,
            &env.student,
            &env.course,
        )
        .expect("send");
    assert_eq!(ids.len(), 3);

    let recipients: Vec<u64> = env
        .transport
        .sent()
        .iter()
        .map(|m| m.recipient.id)
        .collect();
    assert_eq!(recipients, vec![env.recipient.id, env.sender.id, watcher.id]);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn missing_template_string_reaches_the_caller() {
    let env = create_test_environment();
    let err = env
        .messenger
        .send_from_template(
            SCHEDULER_COMPONENT,
            "bookingnotification",
            true,
            &env.sender,
            &env.recipient,
            Some(&env.course),
            "never_registered",
            &TemplateVars::new(),
        )
        .expect_err("missing template");
    assert!(matches!(err, SendError::Template(_)));
    assert!(env.transport.is_empty());
}

#[test]
fn transport_failure_is_returned_not_panicked() {
    let env = create_test_environment();
    env.transport.fail_all(true);

    let err = env
        .messenger
        .send_slot_notification(
            &env.slot,
            &env.scheduler,
            "bookingnotification",
            "slot_booked",
            &env.sender,
            &env.recipient,
            &env.teacher,
            &env.student,
            &env.course,
        )
        .expect_err("transport down");
    assert!(matches!(err, SendError::Transport(_)));
    assert!(env.transport.is_empty());
}

// =============================================================================
// Exposed variable dictionary
// =============================================================================

#[test]
fn standard_variables_emit_only_present_sources() {
    let env = create_test_environment();

    let full = env.messenger.standard_variables(
        Some(&env.scheduler),
        Some(&env.slot),
        Some(&env.teacher),
        Some(&env.student),
        Some(&env.course),
        &env.recipient,
    );
    for key in [
        "MODULE",
        "STAFFROLE",
        "SCHEDULER_URL",
        "DATE",
        "TIME",
        "ENDTIME",
        "LOCATION",
        "ATTENDANT",
        "ATTENDANT_URL",
        "ATTENDEE",
        "ATTENDEE_URL",
    ] {
        assert!(full.contains(key), "missing {key}");
    }

    let empty =
        env.messenger
            .standard_variables(None, None, None, None, Some(&env.course), &env.recipient);
    assert!(empty.is_empty());
}

#![forbid(unsafe_code)]

//! Console walkthrough of the flight form lifecycle: route guarding, a
//! rejected submit, the fixes, and delivery.
//!
//! Submissions are echoed locally unless `FLIGHTFORM_POST` is set, in which
//! case they go to the configured collection endpoint (see the
//! `FLIGHTFORM_*` variables in `flightform-http`).

use async_trait::async_trait;
use chrono::{Duration, Local};
use flightform::prelude::*;
use flightform::{FORM_PATH, Identity, login_return_target, watch_identity};
use tracing_subscriber::{EnvFilter, fmt};

/// Prints each submission instead of posting it.
struct EchoSink;

#[async_trait]
impl SubmissionSink for EchoSink {
    async fn submit(&self, submission: &FlightSubmission) -> Result<(), SinkError> {
        let body = serde_json::to_string_pretty(submission).map_err(SinkError::transport)?;
        println!("payload:\n{body}");
        Ok(())
    }
}

async fn walkthrough<S: SubmissionSink>(mut driver: SessionDriver<S>) {
    let arrival = (Local::now().date_naive() + Duration::days(10))
        .format("%Y-%m-%d")
        .to_string();

    // A submit with a bad airline and too many guests: rejected locally.
    for (field, value) in [
        (FieldId::Airline, "7"),
        (FieldId::ArrivalDate, arrival.as_str()),
        (FieldId::ArrivalTime, "14:30"),
        (FieldId::FlightNumber, "dl 45"),
        (FieldId::Guests, "25"),
    ] {
        driver
            .dispatch(FormEvent::Edit {
                field,
                value: value.to_string(),
            })
            .await;
    }
    driver.dispatch(FormEvent::Submit).await;
    println!("first submit: {}", driver.session().phase());
    if let Some(notice) = driver.session().notice() {
        println!("  {}", notice.message());
    }
    for error in driver.session().errors() {
        println!("  - {error}");
    }

    // Fix both fields and submit again.
    for (field, value) in [(FieldId::Airline, "Delta Air Lines"), (FieldId::Guests, "2")] {
        driver
            .dispatch(FormEvent::Edit {
                field,
                value: value.to_string(),
            })
            .await;
    }
    driver.dispatch(FormEvent::Submit).await;
    println!("second submit: {}", driver.session().phase());
    if let Some(notice) = driver.session().notice() {
        println!("  {}", notice.message());
    }
    if let Some(submission) = driver.session().submitted() {
        println!(
            "recorded {} flight {} on {}",
            submission.airline(),
            submission.flight_number(),
            submission.arrival_date(),
        );
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    tracing::info!("flight form walkthrough starting");

    // Route guarding: nobody is signed in yet, so the form redirects.
    let (handle, watcher) = watch_identity();
    let decision = guard_form_access(watcher.current_identity().as_ref(), FORM_PATH);
    if let Some(login) = decision.login_url() {
        println!("not signed in, redirecting to {login}");
    }

    // Sign in and land back on the remembered path.
    handle.sign_in(Identity::new("demo-user").with_email("crew@example.com"));
    let target = login_return_target("returnUrl=/flight-form");
    let decision = guard_form_access(watcher.current_identity().as_ref(), &target);
    println!("signed in, access to {target}: {:?}", decision);

    let session = FormSession::new();
    if std::env::var("FLIGHTFORM_POST").is_ok_and(|v| !v.is_empty()) {
        let sink = HttpSink::new(SinkConfig::from_env());
        println!("posting to {}", sink.config().endpoint());
        walkthrough(SessionDriver::new(session, sink)).await;
    } else {
        println!("echoing submissions locally (set FLIGHTFORM_POST to deliver)");
        walkthrough(SessionDriver::new(session, EchoSink)).await;
    }
}

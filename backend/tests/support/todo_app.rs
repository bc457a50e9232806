//! Shared helpers for HTTP-level todo tests against the in-memory store.

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;
use todo_backend::Trace;
use todo_backend::inbound::http::error::not_found;
use todo_backend::inbound::http::state::HttpState;
use todo_backend::inbound::http::todos;
use todo_backend::outbound::memory::InMemoryTodoRepository;

/// Clock that moves forward one second on every reading.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 5, 8, 30, 0)
            .single()
            .expect("valid start time");
        Self(Mutex::new(start))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.0.lock().expect("clock lock");
        let current = *now;
        *now = current + Duration::seconds(1);
        current
    }
}

/// Build the todo application the way the server does, over a fresh store.
pub async fn init_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let repository = InMemoryTodoRepository::new(Arc::new(SteppingClock::new()));
    let state = HttpState::from_repository(Arc::new(repository));
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(todos::configure)
            .default_service(web::to(not_found)),
    )
    .await
}

/// Parse an RFC 3339 timestamp out of a JSON body field.
pub fn timestamp(value: &Value) -> DateTime<Utc> {
    serde_json::from_value(value.clone()).expect("RFC 3339 timestamp")
}

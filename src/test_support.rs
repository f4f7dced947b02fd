//! Fixtures shared by unit tests.

use chrono::{DateTime, Days, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Clock pinned to an instant that tests move explicitly.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Pins the clock to the given UTC date and hour.
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid timestamp");
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }

    /// Returns the clock's current date.
    pub fn today(&self) -> NaiveDate {
        self.utc().date_naive()
    }

    /// Returns the date `days` after today.
    pub fn in_days(&self, days: u64) -> NaiveDate {
        self.today()
            .checked_add_days(Days::new(days))
            .expect("date in range")
    }

    /// Returns the date `days` before today.
    pub fn days_ago(&self, days: u64) -> NaiveDate {
        self.today()
            .checked_sub_days(Days::new(days))
            .expect("date in range")
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(2026, 3, 2, 9)
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// A `tracing` event seen by [`EventCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub recipient: Option<String>,
}

/// Layer that records every event it sees, for asserting on log output.
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Returns a subscriber that feeds this capture.
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        tracing_subscriber::registry().with(self.clone())
    }

    /// Returns the captured events in emission order.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().expect("capture lock").clone()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EventFields::default();
        event.record(&mut fields);
        self.events.lock().expect("capture lock").push(CapturedEvent {
            level: *event.metadata().level(),
            message: fields.message,
            recipient: fields.recipient,
        });
    }
}

#[derive(Default)]
struct EventFields {
    message: String,
    recipient: Option<String>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "recipient" {
            self.recipient = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "recipient" => self.recipient = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

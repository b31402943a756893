//! Background task feeding the telemetry store from the network.
//!
//! The task waits on two things at once: the next inbound payload and a
//! periodic ticker. Data messages update the store. Each tick publishes the
//! selected city so the back-end knows which readings to send.

pub mod message;
mod transport;

use core::convert::Infallible;

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Ticker, Timer};
use log::{debug, error, info, warn};

use crate::app_state::{AppError, TelemetryStore};
use crate::config::{CITIES_TAG, CITY_TAG, Config};

pub use message::{MessageError, Payload, TelemetryUpdate};
pub use transport::{Frame, TelemetryTransport};

/// Ingestion task state: the store it writes, the status period and the
/// receive backoff.
pub struct Ingestion<'a> {
    store: &'a TelemetryStore,
    status_interval: Duration,
    receive_retry: Duration,
}

impl<'a> Ingestion<'a> {
    pub fn new(store: &'a TelemetryStore, config: &Config) -> Self {
        Self {
            store,
            status_interval: config.status_interval,
            receive_retry: config.receive_retry,
        }
    }

    /// Apply one inbound frame to the store.
    ///
    /// Returns the number of fields written. Frames carrying another tag are
    /// reported as [`MessageError::UnknownDiscriminator`].
    pub fn handle_inbound(&self, frame: &[u8]) -> Result<usize, MessageError> {
        let update = message::decode(frame)?;
        update.apply(self.store);
        debug!(
            " Telemetry update: temperature={:?} humidity={:?} visibility={:?}",
            update.temperature, update.humidity, update.visibility
        );
        Ok(update.len())
    }

    /// Status payload for the currently selected city.
    pub fn status(&self) -> Payload {
        message::city_status(self.store.selected_city_name())
    }

    /// Handle a frame, logging anything that is not a usable data message.
    fn absorb(&self, frame: &[u8]) {
        match self.handle_inbound(frame) {
            Ok(_) => {}
            Err(MessageError::UnknownDiscriminator) if is_peer_message(frame) => {
                debug!(" Ignoring non-data message on topic");
            }
            Err(err) => warn!(" Discarding inbound message: {}", err),
        }
    }

    async fn publish_status<T: TelemetryTransport>(&self, transport: &mut T) {
        let status = self.status();
        match transport.publish(&status).await {
            Ok(()) => info!(" Published status: {}", status),
            Err(err) => warn!(" Status publish failed: {:?}", err),
        }
    }

    /// Connect the transport, then process traffic forever.
    ///
    /// Only a failed connect ends the task. Receive and publish errors are
    /// logged and the loop carries on. A failed receive is followed by a
    /// backoff so a link that keeps failing cannot starve other tasks.
    pub async fn run<T: TelemetryTransport>(
        &self,
        transport: &mut T,
    ) -> Result<Infallible, AppError> {
        if let Err(err) = transport.connect().await {
            error!(" Transport connect failed: {:?}", err);
            return Err(AppError::transport_init(&err));
        }
        info!(" Ingestion started, status every {} s", self.status_interval.as_secs());

        let mut ticker = Ticker::every(self.status_interval);
        loop {
            let event = select(transport.receive(), ticker.next()).await;
            match event {
                Either::First(Ok(frame)) => self.absorb(&frame),
                Either::First(Err(err)) => {
                    warn!(" Receive failed: {:?}", err);
                    // Status stays on schedule while the link is down.
                    let backoff = select(Timer::after(self.receive_retry), ticker.next()).await;
                    if let Either::Second(()) = backoff {
                        self.publish_status(transport).await;
                    }
                }
                Either::Second(()) => self.publish_status(transport).await,
            }
        }
    }
}

/// Messages other publishers on the shared topic send: the back-end's city
/// list and the panel's own status.
fn is_peer_message(frame: &[u8]) -> bool {
    core::str::from_utf8(frame)
        .map(|text| message::has_tag(text, CITIES_TAG) || message::has_tag(text, CITY_TAG))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::Reading;
    use crate::config::{CITIES, FIELD_CAPACITY};

    use std::collections::VecDeque;
    use std::string::String;
    use std::vec::Vec;

    use embassy_futures::block_on;
    use embassy_time::Timer;

    #[derive(Debug, PartialEq)]
    enum LinkError {
        Refused,
        Dropped,
    }

    /// Scripted transport: replays frames, then goes quiet.
    struct ScriptedLink {
        refuse_connect: bool,
        /// Fail every receive once the script runs out instead of going quiet.
        link_down: bool,
        refuse_publish: bool,
        inbound: VecDeque<Result<&'static str, LinkError>>,
        receive_errors: usize,
        publish_attempts: usize,
        published: Vec<String>,
    }

    impl ScriptedLink {
        fn new(inbound: Vec<Result<&'static str, LinkError>>) -> Self {
            Self {
                refuse_connect: false,
                link_down: false,
                refuse_publish: false,
                inbound: inbound.into(),
                receive_errors: 0,
                publish_attempts: 0,
                published: Vec::new(),
            }
        }
    }

    impl TelemetryTransport for ScriptedLink {
        type Error = LinkError;

        async fn connect(&mut self) -> Result<(), LinkError> {
            if self.refuse_connect {
                Err(LinkError::Refused)
            } else {
                Ok(())
            }
        }

        async fn receive(&mut self) -> Result<Frame, LinkError> {
            match self.inbound.pop_front() {
                Some(Ok(text)) => Ok(Frame::from_slice(text.as_bytes()).unwrap()),
                Some(Err(err)) => {
                    self.receive_errors += 1;
                    Err(err)
                }
                None if self.link_down => {
                    self.receive_errors += 1;
                    Err(LinkError::Dropped)
                }
                None => core::future::pending().await,
            }
        }

        async fn publish(&mut self, payload: &str) -> Result<(), LinkError> {
            self.publish_attempts += 1;
            if self.refuse_publish {
                return Err(LinkError::Refused);
            }
            self.published.push(payload.into());
            Ok(())
        }
    }

    fn config_with_interval(ms: u64) -> Config {
        Config {
            status_interval: Duration::from_millis(ms),
            receive_retry: Duration::from_millis(5),
            ..Config::default()
        }
    }

    #[test]
    fn test_handle_inbound_counts_fields() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &Config::default());

        assert_eq!(ingestion.handle_inbound(b"[DATA] t,21.5,60,10km"), Ok(3));
        assert_eq!(ingestion.handle_inbound(b"[DATA] t,22.0"), Ok(1));
        assert_eq!(store.read(Reading::Temperature).as_str(), "22.0");
        assert_eq!(store.read(Reading::Humidity).as_str(), "60");
        assert_eq!(store.read(Reading::Visibility).as_str(), "10km");
    }

    #[test]
    fn test_oversized_token_truncated_in_place() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &Config::default());

        let mut frame = Vec::from(&b"[DATA] t,"[..]);
        frame.extend(core::iter::repeat_n(b'9', FIELD_CAPACITY + 44));
        frame.extend_from_slice(b",60,10km");

        assert_eq!(ingestion.handle_inbound(&frame), Ok(3));
        let temperature = store.read(Reading::Temperature);
        assert_eq!(temperature.len(), FIELD_CAPACITY);
        assert!(temperature.bytes().all(|b| b == b'9'));
        assert_eq!(store.read(Reading::Humidity).as_str(), "60");
        assert_eq!(store.read(Reading::Visibility).as_str(), "10km");
    }

    #[test]
    fn test_foreign_messages_leave_store_alone() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &Config::default());
        store.write(Reading::Temperature, "24.4 C");

        assert_eq!(
            ingestion.handle_inbound(b"[CITIES] Brno,London,Paris"),
            Err(MessageError::UnknownDiscriminator)
        );
        assert_eq!(ingestion.handle_inbound(b""), Err(MessageError::Empty));
        assert!(is_peer_message(b"[CITY] Brno"));
        assert!(!is_peer_message(b"garbage"));
        assert_eq!(store.read(Reading::Temperature).as_str(), "24.4 C");
    }

    #[test]
    fn test_status_follows_selected_city() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &Config::default());
        assert_eq!(ingestion.status().as_str(), "[CITY] Brno");
        store.select_city(1).unwrap();
        assert_eq!(ingestion.status().as_str(), "[CITY] London");
    }

    #[test]
    fn test_connect_failure_is_fatal() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &Config::default());
        let mut link = ScriptedLink::new(Vec::new());
        link.refuse_connect = true;

        match block_on(ingestion.run(&mut link)) {
            Err(AppError::TransportInit(details)) => assert_eq!(details.as_str(), "Refused"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_run_applies_frames_and_publishes_status() {
        let store = TelemetryStore::new(CITIES);
        store.select_city(2).unwrap();
        let ingestion = Ingestion::new(&store, &config_with_interval(20));
        let mut link = ScriptedLink::new(vec![
            Ok("[DATA] Paris,32.7 C,23.4 %,99.7 %"),
            Err(LinkError::Dropped),
            Ok("[CITIES] Brno,London,Paris"),
            Ok("[DATA] Paris,33.0 C"),
        ]);

        let outcome = block_on(select(ingestion.run(&mut link), Timer::after_millis(120)));
        assert!(matches!(outcome, Either::Second(())));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.temperature.as_str(), "33.0 C");
        assert_eq!(snapshot.humidity.as_str(), "23.4 %");
        assert_eq!(snapshot.visibility.as_str(), "99.7 %");

        assert!(!link.published.is_empty());
        assert!(link.published.iter().all(|p| p == "[CITY] Paris"));
    }

    #[test]
    fn test_failing_receive_backs_off_and_status_continues() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &config_with_interval(20));
        let mut link = ScriptedLink::new(Vec::new());
        link.link_down = true;

        let outcome = block_on(select(ingestion.run(&mut link), Timer::after_millis(200)));
        assert!(matches!(outcome, Either::Second(())));

        // 5 ms backoff over 200 ms: a few dozen attempts, not a busy loop.
        assert!(link.receive_errors > 0);
        assert!(link.receive_errors <= 100, "{} receives", link.receive_errors);
        assert!(!link.published.is_empty());
        assert!(link.published.iter().all(|p| p == "[CITY] Brno"));
    }

    #[test]
    fn test_publish_errors_do_not_stop_the_loop() {
        let store = TelemetryStore::new(CITIES);
        let ingestion = Ingestion::new(&store, &config_with_interval(20));
        let mut link = ScriptedLink::new(Vec::new());
        link.refuse_publish = true;

        let outcome = block_on(select(ingestion.run(&mut link), Timer::after_millis(120)));
        assert!(matches!(outcome, Either::Second(())));

        assert!(link.publish_attempts >= 2, "{} attempts", link.publish_attempts);
        assert!(link.published.is_empty());
    }
}

//! In-process stand-in for the MQTT broker and the data back-end.
//!
//! The panel and the back-end share one topic. [`BrokerLink`] is the panel's
//! transport; [`MockBackend`] plays the back-end: every interval it sends the
//! readings of the city it follows plus its city list, and it switches city
//! when the panel announces a new one.

use airdeck_core::config::{BROKER_PORT, BROKER_URL, CITIES_TAG, CITY_TAG, DATA_TAG, MQTT_TOPIC};
use airdeck_core::ingestion::{Frame, Payload, TelemetryTransport};
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use log::{debug, info, warn};

/// Messages queued for the panel.
pub type Downlink = Channel<CriticalSectionRawMutex, Frame, 4>;

/// Messages the panel published.
pub type Uplink = Channel<CriticalSectionRawMutex, Payload, 4>;

#[derive(Debug)]
pub enum LinkError {
    /// The broker has not taken the previous publish yet.
    Backpressure,
    /// Payload larger than a broker frame.
    Oversized(usize),
}

/// Panel side of the topic.
pub struct BrokerLink {
    downlink: &'static Downlink,
    uplink: &'static Uplink,
}

impl BrokerLink {
    pub fn new(downlink: &'static Downlink, uplink: &'static Uplink) -> Self {
        Self { downlink, uplink }
    }
}

impl TelemetryTransport for BrokerLink {
    type Error = LinkError;

    async fn connect(&mut self) -> Result<(), LinkError> {
        info!(
            " Connected to {}:{}, subscribed to '{}'",
            BROKER_URL, BROKER_PORT, MQTT_TOPIC
        );
        Ok(())
    }

    async fn receive(&mut self) -> Result<Frame, LinkError> {
        Ok(self.downlink.receive().await)
    }

    async fn publish(&mut self, payload: &str) -> Result<(), LinkError> {
        let mut message = Payload::new();
        message
            .push_str(payload)
            .map_err(|_| LinkError::Oversized(payload.len()))?;
        self.uplink
            .try_send(message)
            .map_err(|_| LinkError::Backpressure)
    }
}

/// Readings the back-end reports for one city.
struct CityReport {
    name: &'static str,
    temperature: &'static str,
    humidity: &'static str,
    visibility: &'static str,
}

const REPORTS: [CityReport; 3] = [
    CityReport {
        name: "Brno",
        temperature: "24.4 C",
        humidity: "46.3 %",
        visibility: "98.2 %",
    },
    CityReport {
        name: "London",
        temperature: "18.1 C",
        humidity: "84.7 %",
        visibility: "63.1 %",
    },
    CityReport {
        name: "Paris",
        temperature: "32.7 C",
        humidity: "23.4 %",
        visibility: "99.7 %",
    },
];

/// Back-end publishing per-city readings on the shared topic.
pub struct MockBackend {
    downlink: &'static Downlink,
    uplink: &'static Uplink,
    following: usize,
    interval: Duration,
}

impl MockBackend {
    pub fn new(downlink: &'static Downlink, uplink: &'static Uplink, interval: Duration) -> Self {
        Self {
            downlink,
            uplink,
            following: 0,
            interval,
        }
    }

    /// Publish and listen forever.
    pub async fn run(mut self) {
        let mut ticker = Ticker::every(self.interval);
        loop {
            let event = select(self.uplink.receive(), ticker.next()).await;
            match event {
                Either::First(payload) => self.on_publish(&payload),
                Either::Second(()) => self.announce(),
            }
        }
    }

    /// Handle a message the panel published on the topic.
    fn on_publish(&mut self, payload: &str) {
        // Subscribers on a shared topic see their own messages too.
        self.deliver(payload);

        let Some(name) = payload.strip_prefix(CITY_TAG).map(str::trim) else {
            return;
        };
        match REPORTS.iter().position(|report| report.name == name) {
            Some(index) if index != self.following => {
                info!(" Back-end now following {}", name);
                self.following = index;
            }
            Some(_) => {}
            None => warn!(" Back-end has no data for city '{}'", name),
        }
    }

    fn announce(&self) {
        let report = &REPORTS[self.following];
        let mut data = Payload::new();
        data.push_str(DATA_TAG).ok();
        for part in [
            " ",
            report.name,
            ",",
            report.temperature,
            ",",
            report.humidity,
            ",",
            report.visibility,
            "\n",
        ] {
            data.push_str(part).ok();
        }
        self.deliver(&data);

        let mut cities = Payload::new();
        cities.push_str(CITIES_TAG).ok();
        for (i, report) in REPORTS.iter().enumerate() {
            cities.push_str(if i == 0 { " " } else { "," }).ok();
            cities.push_str(report.name).ok();
        }
        cities.push_str("\n").ok();
        self.deliver(&cities);
    }

    fn deliver(&self, text: &str) {
        let Ok(frame) = Frame::from_slice(text.as_bytes()) else {
            warn!(" Dropping oversized message ({} bytes)", text.len());
            return;
        };
        if self.downlink.try_send(frame).is_err() {
            debug!(" Downlink full, dropping message");
        }
    }
}

//! Wire format of the telemetry topic.
//!
//! Inbound: `[DATA] <topic>,<temperature>,<humidity>,<visibility>`. The first
//! comma-separated token carries the tag, the following tokens map to the
//! readings in order. Outbound: `[CITY] <name>`.

use core::fmt::Write;

use thiserror_no_std::Error;

use crate::app_state::{Reading, TelemetryStore, clip_to_capacity};
use crate::config::{CITY_TAG, DATA_TAG, PAYLOAD_CAPACITY};

/// Outbound payload buffer.
pub type Payload = heapless::String<PAYLOAD_CAPACITY>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    #[error("empty message")]
    Empty,
    #[error("message is not tagged as telemetry data")]
    UnknownDiscriminator,
    #[error("message is not valid UTF-8")]
    Encoding,
}

/// Field values carried by one data message. `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryUpdate<'a> {
    pub temperature: Option<&'a str>,
    pub humidity: Option<&'a str>,
    pub visibility: Option<&'a str>,
}

impl<'a> TelemetryUpdate<'a> {
    pub fn get(&self, reading: Reading) -> Option<&'a str> {
        match reading {
            Reading::Temperature => self.temperature,
            Reading::Humidity => self.humidity,
            Reading::Visibility => self.visibility,
        }
    }

    fn set(&mut self, reading: Reading, value: &'a str) {
        match reading {
            Reading::Temperature => self.temperature = Some(value),
            Reading::Humidity => self.humidity = Some(value),
            Reading::Visibility => self.visibility = Some(value),
        }
    }

    /// Number of fields this update carries.
    pub fn len(&self) -> usize {
        Reading::ALL
            .iter()
            .filter(|reading| self.get(**reading).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the carried fields into the store.
    pub fn apply(&self, store: &TelemetryStore) {
        for reading in Reading::ALL {
            if let Some(value) = self.get(reading) {
                store.write(reading, value);
            }
        }
    }
}

/// Whether `payload` is tagged with `tag`, ignoring surrounding whitespace.
pub fn has_tag(payload: &str, tag: &str) -> bool {
    payload.trim_start().starts_with(tag)
}

/// Parse a data message.
pub fn parse(payload: &str) -> Result<TelemetryUpdate<'_>, MessageError> {
    let payload = payload.trim_end_matches(['\r', '\n']);
    if payload.is_empty() {
        return Err(MessageError::Empty);
    }

    let mut tokens = payload.split(',');
    let head = tokens.next().unwrap_or_default();
    if !has_tag(head, DATA_TAG) {
        return Err(MessageError::UnknownDiscriminator);
    }

    let mut update = TelemetryUpdate::default();
    for (reading, value) in Reading::ALL.into_iter().zip(tokens) {
        update.set(reading, value);
    }
    Ok(update)
}

/// Parse a raw transport frame.
pub fn decode(frame: &[u8]) -> Result<TelemetryUpdate<'_>, MessageError> {
    let payload = core::str::from_utf8(frame).map_err(|_| MessageError::Encoding)?;
    parse(payload)
}

/// Status message announcing the selected city.
pub fn city_status(name: &str) -> Payload {
    let mut payload = Payload::new();
    // The tag plus separator always fit.
    write!(payload, "{} ", CITY_TAG).ok();
    let room = PAYLOAD_CAPACITY - payload.len();
    payload.push_str(clip_to_capacity(name, room)).ok();
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CITIES;

    #[test]
    fn test_full_data_message() {
        let update = parse("[DATA] Brno,24.4 C,46.3 %,98.2 %").unwrap();
        assert_eq!(update.temperature, Some("24.4 C"));
        assert_eq!(update.humidity, Some("46.3 %"));
        assert_eq!(update.visibility, Some("98.2 %"));
    }

    #[test]
    fn test_topic_token_is_skipped() {
        let update = parse("[DATA] topic,21.5,60,10km").unwrap();
        assert_eq!(update.temperature, Some("21.5"));
        assert_eq!(update.humidity, Some("60"));
        assert_eq!(update.visibility, Some("10km"));
    }

    #[test]
    fn test_short_message_leaves_fields_unset() {
        let update = parse("[DATA] topic,21.5").unwrap();
        assert_eq!(update.len(), 1);
        assert_eq!(update.humidity, None);
        assert_eq!(update.visibility, None);

        let bare = parse("[DATA]").unwrap();
        assert!(bare.is_empty());
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let update = parse("[DATA] t,1,2,3,4,5").unwrap();
        assert_eq!(update.len(), 3);
        assert_eq!(update.visibility, Some("3"));
    }

    #[test]
    fn test_line_terminators_trimmed() {
        let update = parse("[DATA] t,1,2,10km\r\n").unwrap();
        assert_eq!(update.visibility, Some("10km"));
    }

    #[test]
    fn test_rejected_messages() {
        assert_eq!(parse(""), Err(MessageError::Empty));
        assert_eq!(parse("\n"), Err(MessageError::Empty));
        assert_eq!(
            parse("[CITIES] Brno,London,Paris"),
            Err(MessageError::UnknownDiscriminator)
        );
        assert_eq!(parse("21.5,60,10km"), Err(MessageError::UnknownDiscriminator));
        assert_eq!(decode(&[0x5b, 0xff, 0xfe]), Err(MessageError::Encoding));
    }

    #[test]
    fn test_apply_writes_only_carried_fields() {
        let store = TelemetryStore::new(CITIES);
        store.write(Reading::Visibility, "63.1 %");

        parse("[DATA] London,18.1 C,84.7 %").unwrap().apply(&store);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.temperature.as_str(), "18.1 C");
        assert_eq!(snapshot.humidity.as_str(), "84.7 %");
        assert_eq!(snapshot.visibility.as_str(), "63.1 %");
    }

    #[test]
    fn test_city_status() {
        assert_eq!(city_status("Paris").as_str(), "[CITY] Paris");

        let long: String = "y".repeat(PAYLOAD_CAPACITY);
        assert_eq!(city_status(&long).len(), PAYLOAD_CAPACITY);
    }
}

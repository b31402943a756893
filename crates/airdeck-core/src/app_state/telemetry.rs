//! Shared telemetry record written by ingestion and read by the views.
//!
//! Each field sits behind its own blocking critical-section mutex. A lock is
//! held only while a value is copied in or out, so a reader sees either the
//! old or the new string, never a mix. Fields are independent: a snapshot may
//! combine values from different inbound messages.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::debug;
use thiserror_no_std::Error;

use crate::config::{CityCatalog, FIELD_CAPACITY};

/// Bounded text held by a telemetry field.
pub type FieldText = heapless::String<FIELD_CAPACITY>;

type Field = Mutex<CriticalSectionRawMutex, RefCell<FieldText>>;

/// Telemetry values the panel can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Temperature,
    Humidity,
    Visibility,
}

impl Reading {
    /// Fields in the order inbound messages carry them.
    pub const ALL: [Reading; 3] = [Reading::Temperature, Reading::Humidity, Reading::Visibility];
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("city index {index} is outside the catalog of {len} cities")]
pub struct CityOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Point-in-time copy of the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub temperature: FieldText,
    pub humidity: FieldText,
    pub visibility: FieldText,
    pub selected_city: usize,
}

/// Latest telemetry strings plus the selected city.
///
/// Created once at startup with empty text and city 0, then shared by
/// reference between the view engine and the ingestion task.
pub struct TelemetryStore {
    temperature: Field,
    humidity: Field,
    visibility: Field,
    selected_city: Mutex<CriticalSectionRawMutex, Cell<usize>>,
    cities: CityCatalog,
}

impl TelemetryStore {
    pub const fn new(cities: CityCatalog) -> Self {
        Self {
            temperature: Mutex::new(RefCell::new(heapless::String::new())),
            humidity: Mutex::new(RefCell::new(heapless::String::new())),
            visibility: Mutex::new(RefCell::new(heapless::String::new())),
            selected_city: Mutex::new(Cell::new(0)),
            cities,
        }
    }

    fn field(&self, reading: Reading) -> &Field {
        match reading {
            Reading::Temperature => &self.temperature,
            Reading::Humidity => &self.humidity,
            Reading::Visibility => &self.visibility,
        }
    }

    /// Replace one field.
    ///
    /// Values over [`FIELD_CAPACITY`] bytes are cut at the last character
    /// boundary that fits. Returns `true` when the value was cut.
    pub fn write(&self, reading: Reading, value: &str) -> bool {
        let fitted = clip_to_capacity(value, FIELD_CAPACITY);
        self.field(reading).lock(|cell| {
            let mut text = cell.borrow_mut();
            text.clear();
            // Cannot fail, `fitted` is at most FIELD_CAPACITY bytes.
            text.push_str(fitted).ok();
        });
        let truncated = fitted.len() < value.len();
        if truncated {
            debug!(
                "{:?} value truncated from {} to {} bytes",
                reading,
                value.len(),
                fitted.len()
            );
        }
        truncated
    }

    /// Copy one field out.
    pub fn read(&self, reading: Reading) -> FieldText {
        self.field(reading).lock(|cell| cell.borrow().clone())
    }

    pub fn selected_city(&self) -> usize {
        self.selected_city.lock(Cell::get)
    }

    /// Name of the selected city.
    pub fn selected_city_name(&self) -> &'static str {
        // The index is only ever set through `select_city`, which checks it.
        self.cities.get(self.selected_city()).unwrap_or_default()
    }

    /// Change the selected city, leaving the store untouched on a bad index.
    pub fn select_city(&self, index: usize) -> Result<(), CityOutOfRange> {
        if index >= self.cities.len() {
            return Err(CityOutOfRange {
                index,
                len: self.cities.len(),
            });
        }
        self.selected_city.lock(|city| city.set(index));
        Ok(())
    }

    pub fn cities(&self) -> CityCatalog {
        self.cities
    }

    /// Copy every field, each under its own lock.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            temperature: self.read(Reading::Temperature),
            humidity: self.read(Reading::Humidity),
            visibility: self.read(Reading::Visibility),
            selected_city: self.selected_city(),
        }
    }
}

/// Longest prefix of `value` that fits in `capacity` bytes without splitting
/// a character.
pub fn clip_to_capacity(value: &str, capacity: usize) -> &str {
    if value.len() <= capacity {
        return value;
    }
    let mut end = capacity;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

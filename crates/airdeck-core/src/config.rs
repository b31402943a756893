//! Compiled-in configuration for the airdeck panel.
//!
//! The panel has no persistent settings. Everything it needs is fixed at
//! build time here: the menu and city catalogs, the broker endpoint, the
//! message tags and the UI timing. [`Config`] bundles the subset a host may
//! tune at startup.

use embassy_time::Duration;

use crate::pages::ViewKind;

// ============================================================================
// Network
// ============================================================================

/// Broker the device-side transport connects to.
pub const BROKER_URL: &str = "mqtt://broker.hivemq.com";

/// Broker TCP port.
pub const BROKER_PORT: u16 = 1883;

/// Topic used for both inbound data and outbound status.
pub const MQTT_TOPIC: &str = "test";

/// Discriminator carried by inbound telemetry messages.
pub const DATA_TAG: &str = "[DATA]";

/// Discriminator carried by the outbound selected-city status.
pub const CITY_TAG: &str = "[CITY]";

/// Discriminator the back-end uses to announce its city list.
pub const CITIES_TAG: &str = "[CITIES]";

/// Seconds between two outbound status messages.
pub const STATUS_INTERVAL_SECS: u64 = 5;

/// Largest inbound payload accepted from the transport, in bytes.
pub const PAYLOAD_CAPACITY: usize = 256;

/// Pause after a failed receive before asking the transport again.
pub const RECEIVE_RETRY_MS: u64 = 1000;

// ============================================================================
// Telemetry
// ============================================================================

/// Capacity of every telemetry text field, in bytes.
pub const FIELD_CAPACITY: usize = 256;

// ============================================================================
// Display
// ============================================================================

/// Contrast level written before every redraw.
pub const DISPLAY_CONTRAST: u8 = 0xFF;

/// Pause after drawing a list view before the next gesture is accepted.
pub const LIST_SETTLE_MS: u32 = 500;

// ============================================================================
// Catalogs
// ============================================================================

/// One selectable line of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub kind: ViewKind,
}

impl MenuEntry {
    pub const fn new(label: &'static str, kind: ViewKind) -> Self {
        Self { label, kind }
    }
}

/// Ordered, non-empty list of menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCatalog {
    entries: &'static [MenuEntry],
}

impl MenuCatalog {
    /// Wrap a static entry list.
    ///
    /// Panics on an empty list; used in a `const` this fails the build.
    pub const fn new(entries: &'static [MenuEntry]) -> Self {
        assert!(!entries.is_empty(), "menu catalog must not be empty");
        Self { entries }
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&'static MenuEntry> {
        self.entries.get(index)
    }
}

/// Ordered, non-empty list of city names, referenced by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityCatalog {
    names: &'static [&'static str],
}

impl CityCatalog {
    /// Wrap a static name list.
    ///
    /// Panics on an empty list; used in a `const` this fails the build.
    pub const fn new(names: &'static [&'static str]) -> Self {
        assert!(!names.is_empty(), "city catalog must not be empty");
        Self { names }
    }

    pub const fn len(&self) -> usize {
        self.names.len()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).copied()
    }
}

const MENU_ENTRIES: &[MenuEntry] = &[
    MenuEntry::new("Temperature", ViewKind::Temperature),
    MenuEntry::new("Humidity", ViewKind::Humidity),
    MenuEntry::new("Visibility", ViewKind::Visibility),
    MenuEntry::new("Select area", ViewKind::SelectArea),
];

/// Default main menu.
pub const MENU: MenuCatalog = MenuCatalog::new(MENU_ENTRIES);

/// Default city list.
pub const CITIES: CityCatalog = CityCatalog::new(&["Brno", "London", "Paris"]);

// ============================================================================
// Runtime configuration
// ============================================================================

/// Startup configuration shared by the view engine and the ingestion task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub menu: MenuCatalog,
    pub cities: CityCatalog,
    pub contrast: u8,
    pub settle_ms: u32,
    pub status_interval: Duration,
    /// Backoff between failed receives.
    pub receive_retry: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu: MENU,
            cities: CITIES,
            contrast: DISPLAY_CONTRAST,
            settle_ms: LIST_SETTLE_MS,
            status_interval: Duration::from_secs(STATUS_INTERVAL_SECS),
            receive_retry: Duration::from_millis(RECEIVE_RETRY_MS),
        }
    }
}

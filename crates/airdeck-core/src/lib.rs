//! Hardware-independent core library for airdeck
//!
//! This crate contains the platform-agnostic logic of the airdeck panel: the
//! gesture-driven view state machine, the shared telemetry store, the
//! network ingestion task and its message format, and the display and
//! gesture contracts the hardware plugs into.
//!
//! It is `#![no_std]` so it compiles for the device and for desktop hosts
//! (the simulator and the tests).

#![cfg_attr(not(test), no_std)]

pub mod app_state;
pub mod config;
pub mod framebuffer;
pub mod gesture;
pub mod ingestion;
pub mod pages;
pub mod ui;
pub mod view_engine;

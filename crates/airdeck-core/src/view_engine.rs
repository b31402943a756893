//! Foreground UI loop.
//!
//! The engine owns the display sink and the gesture source. Each pass it:
//! - redraws the current view from the telemetry store
//! - waits out the settle delay on list views
//! - blocks on the next gesture and applies the resulting transition
//!
//! Draw errors are logged and the loop carries on. A gesture sensor fault
//! releases the sensor and ends the loop with an [`AppError`].

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::app_state::{AppError, TelemetryStore};
use crate::config::Config;
use crate::gesture::{Gesture, GestureSource};
use crate::pages::{Action, Navigator, View};
use crate::ui::{DisplaySink, RenderFault};

pub struct ViewEngine<'a, S, G, W>
where
    S: DisplaySink,
    G: GestureSource,
    W: DelayNs,
{
    sink: S,
    gestures: G,
    delay: W,
    store: &'a TelemetryStore,
    navigator: Navigator,
    config: Config,
}

impl<'a, S, G, W> ViewEngine<'a, S, G, W>
where
    S: DisplaySink,
    G: GestureSource,
    W: DelayNs,
{
    /// Create an engine on the welcome view.
    pub fn new(sink: S, gestures: G, delay: W, store: &'a TelemetryStore, config: Config) -> Self {
        Self {
            sink,
            gestures,
            delay,
            store,
            navigator: Navigator::new(config.menu, config.cities),
            config,
        }
    }

    pub fn view(&self) -> View {
        self.navigator.view()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the sink and gesture source back.
    pub fn into_parts(self) -> (S, G) {
        (self.sink, self.gestures)
    }

    /// Redraw the current view and flush it.
    pub fn render(&mut self) -> Result<(), RenderFault<S::Error>> {
        self.navigator
            .draw(&mut self.sink, self.store, self.config.contrast)
            .and_then(|()| self.sink.flush())
            .map_err(RenderFault)
    }

    /// Apply a gesture and carry out any action it triggers.
    pub fn apply(&mut self, gesture: Gesture) {
        debug!(
            " Gesture: {} ({:?})",
            gesture.mirrored_label(),
            gesture
        );
        let Some(action) = self.navigator.handle_gesture(gesture) else {
            return;
        };
        match action {
            Action::CommitCity(index) => match self.store.select_city(index) {
                Ok(()) => info!(" Selected city: {}", self.store.selected_city_name()),
                Err(err) => error!(" City not changed: {}", err),
            },
        }
    }

    /// One pass: render, settle, read a gesture, transition.
    pub async fn step(&mut self) -> Result<(), AppError> {
        if let Err(fault) = self.render() {
            warn!(" Render of {:?} view failed: {}", self.view().kind(), fault);
        }

        if self.view().settles() && self.config.settle_ms > 0 {
            self.delay.delay_ms(self.config.settle_ms).await;
        }

        let gesture = self.gestures.read_gesture().await?;
        self.apply(gesture);
        Ok(())
    }

    /// Run until the gesture source faults.
    pub async fn run(&mut self) -> Result<Infallible, AppError> {
        info!(" View engine started");
        loop {
            if let Err(err) = self.step().await {
                error!(" View engine stopping: {}", err);
                self.gestures.release();
                return Err(err);
            }
        }
    }
}

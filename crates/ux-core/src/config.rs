//! Runtime configuration for the event loop and interaction timing.
//!
//! Stored as a postcard blob so it can live next to other settings in flash.

use alloc::vec::Vec;

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{UxError, UxResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UxConfig {
    /// Interval between synthetic periodic events
    pub update_period_ms: u32,
    /// Pixels a drag must exceed before an axis locks
    pub drag_threshold_px: u16,
    /// How long a button must stay pressed to report `Held`
    pub button_hold_ms: u32,
}

impl Default for UxConfig {
    fn default() -> Self {
        Self {
            update_period_ms: 30,
            drag_threshold_px: 1,
            button_hold_ms: 750,
        }
    }
}

impl UxConfig {
    pub fn with_update_period_ms(mut self, update_period_ms: u32) -> Self {
        self.update_period_ms = update_period_ms;
        self
    }

    pub fn with_drag_threshold_px(mut self, drag_threshold_px: u16) -> Self {
        self.drag_threshold_px = drag_threshold_px;
        self
    }

    pub fn with_button_hold_ms(mut self, button_hold_ms: u32) -> Self {
        self.button_hold_ms = button_hold_ms;
        self
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_millis(self.update_period_ms as u64)
    }

    pub fn button_hold_duration(&self) -> Duration {
        Duration::from_millis(self.button_hold_ms as u64)
    }

    pub fn to_bytes(&self) -> UxResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| UxError::Serialization)
    }

    pub fn from_bytes(bytes: &[u8]) -> UxResult<Self> {
        postcard::from_bytes(bytes).map_err(|_| UxError::Serialization)
    }
}

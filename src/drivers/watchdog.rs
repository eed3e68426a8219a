//! Task Watchdog Timer (TWDT) for the supervisor thread.
//!
//! The station tasks never return, so the only thing that can silently
//! stop is the supervisor loop in `main()`.  It subscribes itself here and
//! feeds once per diagnostics interval; if it stalls past the timeout the
//! TWDT panics and the chip resets.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

pub struct Watchdog {
    timeout_ms: u32,
    subscribed: bool,
    feeds: u32,
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    ///
    /// A failed subscription is logged and leaves the watchdog inert; the
    /// station keeps running.
    #[cfg(target_os = "espidf")]
    pub fn subscribe(timeout_ms: u32) -> Self {
        // SAFETY: plain FFI calls on the calling task's own TWDT entry.
        let subscribed = unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
            }
            let ret = esp_task_wdt_add(core::ptr::null_mut());
            if ret != ESP_OK {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }
            ret == ESP_OK
        };
        if subscribed {
            log::info!("Watchdog: subscribed ({}ms timeout, panic on trigger)", timeout_ms);
        }
        Self {
            timeout_ms,
            subscribed,
            feeds: 0,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn subscribe(timeout_ms: u32) -> Self {
        log::info!("Watchdog(sim): {}ms timeout, no-op", timeout_ms);
        Self {
            timeout_ms,
            subscribed: false,
            feeds: 0,
        }
    }

    /// Reset the countdown.
    pub fn feed(&mut self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: the calling task subscribed in `subscribe()`.
            unsafe {
                esp_task_wdt_reset();
            }
        }
        self.feeds = self.feeds.wrapping_add(1);
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}

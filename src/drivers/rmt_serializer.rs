//! RMT-backed WS2812 serializer.
//!
//! Claims one RMT TX channel and attaches a bytes encoder that expands every
//! bit into a high/low pulse pair:
//!
//! ```text
//!        ┌───┐         ┌─────────┐
//!  "0"   │0.3│   0.9   │   0.9   │0.3   "1"
//!      ──┘   └─────────┘         └──
//! ```
//!
//! Resolution is 10 MHz, so one tick is 100 ns and one bit is 1.2 µs
//! (WS2812 nominal is 1.25 µs at 800 kHz).  Bytes go out MSB first.
//!
//! ## Inter-byte gap
//!
//! Every byte is its own RMT transaction: `rmt_transmit` then
//! `rmt_tx_wait_all_done`.  Between two bytes of one frame the line idles
//! low for the software round-trip (done ISR, task wake-up, next queue
//! call).  On a 240 MHz ESP32-S3 that round-trip is a few microseconds,
//! and it must stay under [`MAX_INTER_BYTE_GAP_US`], well below the
//! [`WS2812_LATCH_US`] low time that makes the strip latch mid-frame.  The
//! matrix task holds the highest priority on its core, so only interrupts
//! can stretch the gap.  A latch mid-frame shows as a frame shifted by the
//! bytes already sent and is corrected by the next full redraw.

use crate::app::ports::{PinSpec, SerializerPort};
use crate::error::SerializerError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// RMT tick rate.
pub const RMT_RESOLUTION_HZ: u32 = 10_000_000;

const T0H_TICKS: u32 = 3;
const T0L_TICKS: u32 = 9;
const T1H_TICKS: u32 = 9;
const T1L_TICKS: u32 = 3;

/// Pack one RMT symbol: `duration0 | level0 | duration1 | level1`.
const fn symbol(high_ticks: u32, low_ticks: u32) -> u32 {
    (high_ticks & 0x7FFF) | (1 << 15) | ((low_ticks & 0x7FFF) << 16)
}

pub const BIT0_SYMBOL: u32 = symbol(T0H_TICKS, T0L_TICKS);
pub const BIT1_SYMBOL: u32 = symbol(T1H_TICKS, T1L_TICKS);

/// Shortest low time the oldest WS2812 parts treat as reset/latch.
pub const WS2812_LATCH_US: u32 = 50;

/// Budget for the idle-low gap between two per-byte transactions.
pub const MAX_INTER_BYTE_GAP_US: u32 = 20;

/// Serializer factory.  Each successful [`claim`](SerializerPort::claim)
/// owns one hardware channel for the rest of the program.
#[derive(Debug, Default)]
pub struct RmtSerializer;

impl RmtSerializer {
    pub fn new() -> Self {
        Self
    }
}

// ── ESP-IDF implementation ────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct RmtChannel {
    channel: rmt_channel_handle_t,
    encoder: rmt_encoder_handle_t,
}

// SAFETY: the RMT handles are only used by the thread that owns the
// `RmtChannel`; ESP-IDF does not bind them to the creating task.
#[cfg(target_os = "espidf")]
unsafe impl Send for RmtChannel {}

#[cfg(target_os = "espidf")]
impl SerializerPort for RmtSerializer {
    type Handle = RmtChannel;

    fn claim(&mut self, pin: PinSpec) -> Result<RmtChannel, SerializerError> {
        let mut channel: rmt_channel_handle_t = core::ptr::null_mut();
        let mut encoder: rmt_encoder_handle_t = core::ptr::null_mut();

        // SAFETY: plain C configuration structs; zero is the documented
        // default for every field not set below.
        let mut tx_cfg: rmt_tx_channel_config_t = unsafe { core::mem::zeroed() };
        tx_cfg.gpio_num = pin.gpio;
        tx_cfg.clk_src = soc_periph_rmt_clk_src_t_RMT_CLK_SRC_DEFAULT;
        tx_cfg.resolution_hz = RMT_RESOLUTION_HZ;
        tx_cfg.mem_block_symbols = 64;
        tx_cfg.trans_queue_depth = 4;

        // SAFETY: `channel` is a valid out-pointer; the driver allocates a
        // free TX channel or reports ESP_ERR_NOT_FOUND.
        let ret = unsafe { rmt_new_tx_channel(&tx_cfg, &mut channel) };
        if ret != ESP_OK {
            log::error!("RMT: no TX channel for GPIO {} (rc={})", pin.gpio, ret);
            return Err(SerializerError::NoChannelAvailable);
        }

        let mut enc_cfg: rmt_bytes_encoder_config_t = unsafe { core::mem::zeroed() };
        enc_cfg.bit0 = rmt_symbol_word_t { val: BIT0_SYMBOL };
        enc_cfg.bit1 = rmt_symbol_word_t { val: BIT1_SYMBOL };
        enc_cfg.flags.set_msb_first(1);

        // SAFETY: `encoder` is a valid out-pointer; on failure the channel
        // allocated above is released before returning.
        let ret = unsafe { rmt_new_bytes_encoder(&enc_cfg, &mut encoder) };
        if ret != ESP_OK {
            unsafe { rmt_del_channel(channel) };
            return Err(SerializerError::EncoderSetupFailed(ret));
        }

        let ret = unsafe { rmt_enable(channel) };
        if ret != ESP_OK {
            unsafe {
                rmt_del_encoder(encoder);
                rmt_del_channel(channel);
            }
            return Err(SerializerError::EnableFailed(ret));
        }

        log::info!(
            "RMT: TX channel ready (GPIO {}, {} Hz bit rate)",
            pin.gpio,
            pin.bit_rate_hz
        );
        Ok(RmtChannel { channel, encoder })
    }

    fn send_byte(&mut self, handle: &mut RmtChannel, byte: u8) -> Result<(), SerializerError> {
        let tx_cfg: rmt_transmit_config_t = unsafe { core::mem::zeroed() };
        // SAFETY: `byte` outlives the call because we wait for completion
        // before returning.
        let ret = unsafe {
            rmt_transmit(
                handle.channel,
                handle.encoder,
                (&raw const byte).cast(),
                1,
                &tx_cfg,
            )
        };
        if ret != ESP_OK {
            return Err(SerializerError::TransmitFailed(ret));
        }
        // SAFETY: channel handle is valid for the lifetime of `handle`.
        let ret = unsafe { rmt_tx_wait_all_done(handle.channel, -1) };
        if ret != ESP_OK {
            return Err(SerializerError::TransmitFailed(ret));
        }
        Ok(())
    }
}

// ── Simulation ────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU8, Ordering};

/// TX channels on the ESP32-S3 RMT peripheral.
#[cfg(not(target_os = "espidf"))]
const SIM_TX_CHANNELS: u8 = 4;

#[cfg(not(target_os = "espidf"))]
static SIM_CHANNELS_CLAIMED: AtomicU8 = AtomicU8::new(0);

#[cfg(not(target_os = "espidf"))]
#[derive(Debug)]
pub struct RmtChannel {
    index: u8,
}

#[cfg(not(target_os = "espidf"))]
impl RmtChannel {
    pub fn index(&self) -> u8 {
        self.index
    }
}

#[cfg(not(target_os = "espidf"))]
impl SerializerPort for RmtSerializer {
    type Handle = RmtChannel;

    fn claim(&mut self, pin: PinSpec) -> Result<RmtChannel, SerializerError> {
        let index = SIM_CHANNELS_CLAIMED
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < SIM_TX_CHANNELS).then_some(n + 1)
            })
            .map_err(|_| SerializerError::NoChannelAvailable)?;
        log::info!("RMT(sim): channel {} claimed for GPIO {}", index, pin.gpio);
        Ok(RmtChannel { index })
    }

    fn send_byte(&mut self, _handle: &mut RmtChannel, _byte: u8) -> Result<(), SerializerError> {
        Ok(())
    }
}

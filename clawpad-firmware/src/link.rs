//! Command link over a UART BLE serial module
//!
//! The module bridges its UART to a BLE serial characteristic. Its STATE
//! output is high while a central is connected; pulsing KEY drops the
//! connection.

use clawpad_core::traits::{Link, LinkStatus};
use clawpad_core::{Command, LinkError};
use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{with_timeout, Duration, Timer};
use embedded_io_async::Write;

use crate::board::{BLE_CONNECT_TIMEOUT_S, BLE_KEY_PULSE_MS};

/// BLE serial module link
pub struct BleLink {
    tx: BufferedUartTx<'static, UART0>,
    state: Input<'static>,
    key: Output<'static>,
}

impl BleLink {
    pub fn new(
        tx: BufferedUartTx<'static, UART0>,
        state: Input<'static>,
        mut key: Output<'static>,
    ) -> Self {
        key.set_low();
        Self { tx, state, key }
    }
}

impl Link for BleLink {
    fn is_connected(&self) -> bool {
        self.state.is_high()
    }

    async fn connect(&mut self) -> LinkStatus {
        let timeout = Duration::from_secs(BLE_CONNECT_TIMEOUT_S);
        if with_timeout(timeout, self.state.wait_for_high()).await.is_err() {
            return LinkStatus::TimedOut;
        }
        // Drain anything queued while the link was down
        match self.tx.flush().await {
            Ok(()) => LinkStatus::Connected,
            Err(e) => {
                warn!("BLE UART error on connect: {:?}", e);
                LinkStatus::Failed
            }
        }
    }

    async fn send(&mut self, command: Command) -> Result<(), LinkError> {
        if !self.is_connected() {
            return Err(LinkError::NotConnected);
        }
        self.tx
            .write_all(&[command.as_byte()])
            .await
            .map_err(|_| LinkError::Write)?;
        self.tx.flush().await.map_err(|_| LinkError::Write)
    }

    async fn disconnect(&mut self) {
        self.key.set_high();
        Timer::after_millis(BLE_KEY_PULSE_MS).await;
        self.key.set_low();
        info!("BLE link released");
    }
}

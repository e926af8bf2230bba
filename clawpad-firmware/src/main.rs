//! Clawpad - robotic arm touch pendant firmware
//!
//! Main firmware binary for the RP2040 pendant. Brings up the touch
//! screen, the status peripherals and the BLE serial module, then hands
//! everything to the control task.

#![no_std]
#![no_main]

use clawpad_core::config::TOUCH_BUS_HZ;
use clawpad_drivers::{Buzzer, DisplayConfig, Ili9341, RgbLed, SpiClock, Ssd1306, Tsc2046};
use clawpad_hal::gpio::NoPin;
use clawpad_hal_rp2040::{duty_config, mode0, PwmTone, RpOutput, SpiBusCell};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, SPI0, UART0};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod board;
mod link;
mod tasks;

use crate::board::{BLE_BAUD, BUTTON_POLL_MS, INDICATOR_PWM_HZ, OLED_I2C_HZ};
use crate::link::BleLink;
use crate::tasks::ControlParts;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// Display and touch share SPI0
static SPI_BUS: StaticCell<SpiBusCell<'static, SPI0>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Clawpad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Nothing moves until the operator presses button A
    let button_a = Input::new(p.PIN_5, Pull::Up);
    info!("Waiting for button A");
    while button_a.is_high() {
        Timer::after_millis(BUTTON_POLL_MS).await;
    }
    info!("Button A pressed, starting");

    // Status light: red and blue share slice 6, green is slice 5 B
    let (red, blue) = Pwm::new_output_ab(
        p.PWM_SLICE6,
        p.PIN_12,
        p.PIN_13,
        duty_config(INDICATOR_PWM_HZ),
    )
    .split();
    let (_, green) = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, duty_config(INDICATOR_PWM_HZ)).split();
    let indicator = RgbLed::new(unwrap!(red), unwrap!(green), unwrap!(blue));

    let buzzer_pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm::Config::default());
    let speaker = Buzzer::new(PwmTone::new(buzzer_pwm), Delay);

    // Status readout on I2C1
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = OLED_I2C_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);
    let mut readout = Ssd1306::new(i2c);
    if readout.init().await.is_err() {
        warn!("OLED init failed, continuing without readout");
    }

    // Touch screen on SPI0, starting at the touch controller's rate
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, mode0(TOUCH_BUS_HZ));
    let bus = SPI_BUS.init(SpiBusCell::new(spi, TOUCH_BUS_HZ));

    let display = Ili9341::new(
        bus.handle(),
        RpOutput::new(Output::new(p.PIN_17, Level::High)),
        RpOutput::new(Output::new(p.PIN_20, Level::Low)),
        None::<NoPin>,
        DisplayConfig::default(),
    );
    let touch = Tsc2046::new(
        bus.handle(),
        RpOutput::new(Output::new(p.PIN_9, Level::High)),
        None::<NoPin>,
        Delay,
    );
    let clock = SpiClock::new(bus.handle());
    info!("Touch screen initialized");

    // BLE serial module on UART0
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BLE_BAUD;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    // Nothing is received from the controller
    let (tx, _rx) = uart.split();

    let link = BleLink::new(
        tx,
        Input::new(p.PIN_8, Pull::Down),
        Output::new(p.PIN_3, Level::Low),
    );
    info!("BLE module UART initialized");

    let parts: ControlParts = clawpad_core::Parts {
        display,
        touch,
        clock,
        link,
        indicator,
        speaker,
        readout,
        delay: Delay,
    };

    spawner.spawn(tasks::control_task(parts)).unwrap();
    info!("Control task spawned");

    loop {
        Timer::after_secs(60).await;
        debug!("Heartbeat");
    }
}

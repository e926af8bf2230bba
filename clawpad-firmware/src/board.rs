//! Board wiring (BitDogLab-style RP2040 board with an ILI9341/TSC2046 shield)
//!
//! | Function            | GPIO | Peripheral      |
//! |---------------------|------|-----------------|
//! | BLE module TX / RX  | 0/1  | UART0           |
//! | BLE module KEY      | 3    | output          |
//! | Buzzer              | 4    | PWM2 A          |
//! | Button A            | 5    | input, pull-up  |
//! | BLE module STATE    | 8    | input           |
//! | Touch CS            | 9    | output          |
//! | LED green           | 11   | PWM5 B          |
//! | LED red / blue      | 12/13| PWM6 A / B      |
//! | OLED SDA / SCL      | 14/15| I2C1            |
//! | SPI MISO            | 16   | SPI0            |
//! | Display CS          | 17   | output          |
//! | SPI SCK / MOSI      | 18/19| SPI0            |
//! | Display D/C         | 20   | output          |
//!
//! Neither the display reset nor the touch interrupt line is wired.

/// Status light PWM frequency
pub const INDICATOR_PWM_HZ: u32 = 1_000;

/// BLE serial module baud rate
pub const BLE_BAUD: u32 = 115_200;

/// How long one connection attempt waits for a central
pub const BLE_CONNECT_TIMEOUT_S: u64 = 10;

/// KEY pulse that makes the module drop its connection
pub const BLE_KEY_PULSE_MS: u64 = 200;

/// OLED I2C clock
pub const OLED_I2C_HZ: u32 = 400_000;

/// Start button polling period
pub const BUTTON_POLL_MS: u64 = 10;

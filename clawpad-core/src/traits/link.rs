//! Command link to the remote arm controller

use crate::command::Command;
use crate::error::LinkError;

/// Result of a connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Remote controller connected and ready for commands
    Connected,
    /// No controller answered within the link's timeout
    TimedOut,
    /// The transport reported an error while connecting
    Failed,
}

/// Wireless transport carrying single-character commands
///
/// Implementations own their scan and connect timeouts. The control loop
/// simply calls [`Link::connect`] again on its next iteration.
#[allow(async_fn_in_trait)]
pub trait Link {
    /// Whether a controller is currently connected
    fn is_connected(&self) -> bool;

    /// Attempt to connect
    async fn connect(&mut self) -> LinkStatus;

    /// Deliver one command; never retried by the caller
    async fn send(&mut self, command: Command) -> Result<(), LinkError>;

    /// Drop the connection
    async fn disconnect(&mut self);
}

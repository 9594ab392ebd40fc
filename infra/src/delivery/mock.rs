//! Mock delivery channel for development
//!
//! Prints messages to the console instead of sending them, so passcodes can
//! be read off the server log while no bot token is configured.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use tg_core::domain::value_objects::DeliveryTarget;
use tg_core::errors::DeliveryError;
use tg_core::services::verification::DeliveryChannel;

/// Console-backed delivery channel
pub struct MockDeliveryChannel {
    /// Number of messages "sent"
    message_counter: AtomicU64,
    /// Delay each send to imitate network latency
    simulate_delay: bool,
    /// Fail every send
    simulate_failure: AtomicBool,
}

impl MockDeliveryChannel {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(simulate_delay: bool, simulate_failure: bool) -> Self {
        Self {
            message_counter: AtomicU64::new(0),
            simulate_delay,
            simulate_failure: AtomicBool::new(simulate_failure),
        }
    }

    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn get_message_count(&self) -> u64 {
        self.message_counter.load(Ordering::SeqCst)
    }

    pub fn reset_counter(&self) {
        self.message_counter.store(0, Ordering::SeqCst);
    }
}

impl Default for MockDeliveryChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryChannel for MockDeliveryChannel {
    async fn send(&self, target: &DeliveryTarget, message: &str) -> Result<String, DeliveryError> {
        if self.simulate_delay {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(chat = %target, "Mock delivery failure");
            return Err(DeliveryError::new("Mock delivery channel: simulated failure"));
        }

        let count = self.message_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("mock_{}", uuid::Uuid::new_v4());

        println!("\n========== MOCK TELEGRAM MESSAGE ==========");
        println!("To chat: {}", target);
        println!("Message: {}", message);
        println!("Message ID: {}", message_id);
        println!("Total messages sent: {}", count);
        println!("===========================================\n");

        info!(
            chat = %target,
            message_id = %message_id,
            count = count,
            "Mock message delivered"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

use async_trait::async_trait;

use crate::Result;

/// Outbound port for whatever chat surface delivers replies.
///
/// The console is the first implementation; the shape leaves room for
/// messenger adapters (Telegram/WhatsApp-style bridges) without the core
/// knowing about any transport.
#[async_trait]
pub trait ChatSurface: Send + Sync {
    async fn send_reply(&self, text: &str) -> Result<()>;
}

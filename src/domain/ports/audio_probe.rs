use async_trait::async_trait;

/// Plays a test sound on the operator's audio device
#[async_trait]
pub trait AudioProbe: Send + Sync {
    async fn probe(&self) -> Result<(), String>;
}

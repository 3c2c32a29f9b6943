use async_trait::async_trait;

use crate::core::position::Position;
use crate::Result;

/// Anything that can report the tracked object's latest position.
///
/// A fetch may suspend; the controller keeps handling user events meanwhile.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<Position>;
}

#[cfg(feature = "http")]
pub use http::HttpPositionSource;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;
    use once_cell::sync::OnceCell;
    use reqwest::Client;

    use super::PositionSource;
    use crate::core::config::SourceConfig;
    use crate::core::position::Position;
    use crate::{Result, TrackerError};

    /// Polls a JSON endpoint that returns `latitude`, `longitude`,
    /// `timestamp`, `velocity` and `altitude`.
    ///
    /// The HTTP client is built on the first fetch and reused after that.
    #[derive(Debug)]
    pub struct HttpPositionSource {
        config: SourceConfig,
        client: OnceCell<Client>,
    }

    impl HttpPositionSource {
        pub fn new(config: SourceConfig) -> Self {
            Self {
                config,
                client: OnceCell::new(),
            }
        }

        pub fn endpoint(&self) -> &str {
            &self.config.endpoint
        }

        fn client(&self) -> Result<&Client> {
            self.client.get_or_try_init(|| {
                Client::builder()
                    .user_agent(self.config.user_agent.as_str())
                    .timeout(self.config.request_timeout())
                    .build()
                    .map_err(TrackerError::from)
            })
        }
    }

    impl Default for HttpPositionSource {
        fn default() -> Self {
            Self::new(SourceConfig::default())
        }
    }

    #[async_trait]
    impl PositionSource for HttpPositionSource {
        async fn fetch_latest(&self) -> Result<Position> {
            let response = self.client()?.get(&self.config.endpoint).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(TrackerError::HttpStatus(status.as_u16()));
            }

            let body = response.text().await?;
            let position = Position::from_json(&body)?;
            log::debug!(
                "fetched position ({}, {}) from {}",
                position.latitude,
                position.longitude,
                self.config.endpoint
            );
            Ok(position)
        }
    }

}

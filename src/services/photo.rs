use reqwest::Client;
use std::time::Duration;

/// Best-effort photo probe
///
/// Confirms that a candidate's photo URL actually resolves to an image
/// before it is surfaced. This is cosmetic: every transport failure or
/// timeout reads as "not resolvable" and never aborts a pipeline run.
pub struct PhotoValidator {
    client: Client,
}

impl PhotoValidator {
    /// Create a probe with the given per-request timeout
    ///
    /// Redirects are followed (the photo endpoint redirects to the image
    /// binary).
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    /// Check whether the URL leads to an image resource
    ///
    /// True only when the final response status is success and the
    /// Content-Type starts with "image/".
    pub async fn is_resolvable(&self, url: &str) -> bool {
        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!("Photo probe failed for {}: {}", url, error);
                return false;
            }
        };

        if !response.status().is_success() {
            return false;
        }

        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false)
    }
}

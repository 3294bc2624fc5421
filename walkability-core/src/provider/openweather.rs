use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::{Result, WalkError};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalkError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn fetch(&self, city: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        let city = capitalize(city.trim());
        tracing::info!(%city, "requesting current weather from OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(%status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            return Err(WalkError::Fetch(format!(
                "OpenWeather request failed with status {}: {}",
                status,
                error_message(&body),
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| WalkError::Fetch(format!("failed to parse OpenWeather JSON: {e}")))
    }
}

/// Upper-case the first letter and lower-case the rest, e.g. "nEW york" -> "New york".
fn capitalize(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// OpenWeather error bodies look like {"cod":"404","message":"city not found"}.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_record;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned HTTP response and hand back the request line it received.
    async fn serve_once(status: &str, body: String, delay: Duration) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let status = status.to_string();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            tokio::time::sleep(delay).await;

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.flush().await;

            String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string()
        });

        (base_url, handle)
    }

    fn provider(base_url: &str, timeout: Duration) -> OpenWeatherProvider {
        OpenWeatherProvider::new("KEY".to_string(), base_url, timeout).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_record_and_sends_metric_query() {
        let (base_url, server) = serve_once("200 OK", sample_record().to_string(), Duration::ZERO).await;

        let record = provider(&base_url, Duration::from_secs(5)).fetch("  turin ").await.unwrap();
        assert_eq!(record["name"], "Province of Turin");

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /data/2.5/weather?"), "{request_line}");
        assert!(request_line.contains("q=Turin"), "{request_line}");
        assert!(request_line.contains("appid=KEY"), "{request_line}");
        assert!(request_line.contains("units=metric"), "{request_line}");
    }

    #[tokio::test]
    async fn non_success_status_is_fetch_error() {
        let body = r#"{"cod":"404","message":"city not found"}"#.to_string();
        let (base_url, _server) = serve_once("404 Not Found", body, Duration::ZERO).await;

        let err = provider(&base_url, Duration::from_secs(5)).fetch("Atlantis").await.unwrap_err();
        match err {
            WalkError::Fetch(msg) => {
                assert!(msg.contains("404"), "{msg}");
                assert!(msg.contains("city not found"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_fetch_error() {
        let (base_url, _server) = serve_once("200 OK", "<html>oops</html>".to_string(), Duration::ZERO).await;

        let err = provider(&base_url, Duration::from_secs(5)).fetch("Oxford").await.unwrap_err();
        assert!(matches!(err, WalkError::Fetch(msg) if msg.contains("failed to parse")));
    }

    #[tokio::test]
    async fn unreachable_host_is_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = provider(&base_url, Duration::from_secs(5)).fetch("Oxford").await.unwrap_err();
        assert!(matches!(err, WalkError::Fetch(_)));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let (base_url, _server) =
            serve_once("200 OK", sample_record().to_string(), Duration::from_secs(2)).await;

        let err = provider(&base_url, Duration::from_millis(200)).fetch("Oxford").await.unwrap_err();
        assert!(matches!(err, WalkError::Fetch(msg) if msg.contains("timed out")));
    }

    #[test]
    fn capitalize_matches_title_of_first_word() {
        assert_eq!(capitalize("oxford"), "Oxford");
        assert_eq!(capitalize("nEW york"), "New york");
        assert_eq!(capitalize("ängelholm"), "Ängelholm");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}

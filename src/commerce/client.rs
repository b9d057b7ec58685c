use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::{OrdersPage, PageSource};
use crate::config::Config;
use crate::error::AppError;
use crate::telemetry::metrics::PAGE_FETCH_DURATION;

/// How the credential reaches the upstream API: attached by us, or injected
/// by the reverse proxy that receives the target URL as a query parameter.
pub enum Transport {
    Direct { api_key: String },
    Proxied { proxy_base_url: String },
}

pub struct CommerceClient {
    client: reqwest::Client,
    orders_url: String,
    transport: Transport,
}

impl CommerceClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = if config.is_local() {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("COMMERCE_API_KEY must be set in local mode"))?;
            Transport::Direct { api_key }
        } else {
            let proxy_base_url = config.proxy_base_url.clone().ok_or_else(|| {
                anyhow::anyhow!("PROXY_BASE_URL must be set outside local mode")
            })?;
            Transport::Proxied { proxy_base_url }
        };

        Ok(Self {
            client: reqwest::Client::new(),
            orders_url: config.orders_url.clone(),
            transport,
        })
    }

    fn request_parts(&self, cursor: Option<&str>) -> Result<(String, HeaderMap), AppError> {
        let mut target = self.orders_url.clone();
        if let Some(cursor) = cursor {
            target.push_str("?cursor=");
            target.push_str(cursor);
        }

        let mut headers = HeaderMap::new();
        let url = match &self.transport {
            Transport::Direct { api_key } => {
                let bearer = format!("Bearer {api_key}");
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&bearer).map_err(|e| {
                        AppError::Internal(format!("invalid API key header: {e}"))
                    })?,
                );
                target
            }
            Transport::Proxied { proxy_base_url } => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                format!("{proxy_base_url}?url={target}")
            }
        };

        Ok((url, headers))
    }
}

#[async_trait::async_trait]
impl PageSource for CommerceClient {
    #[tracing::instrument(
        name = "commerce fetch_page",
        skip(self),
        fields(
            commerce.transport = %self.name(),
            commerce.page_orders = tracing::field::Empty,
            http.response.status_code = tracing::field::Empty,
        )
    )]
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<OrdersPage, AppError> {
        let (url, headers) = self.request_parts(cursor)?;
        let start = Instant::now();

        let response = self.client.get(&url).headers(headers).send().await?;

        let status = response.status();
        let span = tracing::Span::current();
        span.record("http.response.status_code", status.as_u16() as i64);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let page: OrdersPage =
            serde_json::from_str(&body).map_err(|e| AppError::Schema(e.to_string()))?;

        PAGE_FETCH_DURATION.record(start.elapsed().as_secs_f64(), &[]);
        span.record("commerce.page_orders", page.result.len());

        Ok(page)
    }

    fn name(&self) -> &str {
        match self.transport {
            Transport::Direct { .. } => "direct",
            Transport::Proxied { .. } => "proxied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str) -> Config {
        Config {
            port: 8080,
            environment: environment.to_string(),
            orders_url: "https://api.example.com/1.0/commerce/orders".to_string(),
            api_key: Some("key-123".to_string()),
            proxy_base_url: Some("https://proxy.example.com/orders".to_string()),
            redact_customers: false,
            page_delay_ms: 100,
            otel_service_name: "order-desk".to_string(),
            otel_exporter_endpoint: "http://localhost:4317".to_string(),
        }
    }

    #[test]
    fn test_direct_mode_attaches_bearer() {
        let client = CommerceClient::from_config(&config("local")).unwrap();
        let (url, headers) = client.request_parts(None).unwrap();

        assert_eq!(url, "https://api.example.com/1.0/commerce/orders");
        assert_eq!(headers[AUTHORIZATION], "Bearer key-123");
    }

    #[test]
    fn test_direct_mode_appends_cursor() {
        let client = CommerceClient::from_config(&config("local")).unwrap();
        let (url, _) = client.request_parts(Some("abc123")).unwrap();

        assert_eq!(url, "https://api.example.com/1.0/commerce/orders?cursor=abc123");
    }

    #[test]
    fn test_proxied_mode_forwards_target_url() {
        let client = CommerceClient::from_config(&config("production")).unwrap();
        let (url, headers) = client.request_parts(Some("abc123")).unwrap();

        assert_eq!(
            url,
            "https://proxy.example.com/orders?url=https://api.example.com/1.0/commerce/orders?cursor=abc123"
        );
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_local_mode_requires_api_key() {
        let mut cfg = config("local");
        cfg.api_key = None;
        assert!(CommerceClient::from_config(&cfg).is_err());
    }

    #[test]
    fn test_proxied_mode_requires_proxy_url() {
        let mut cfg = config("production");
        cfg.proxy_base_url = None;
        assert!(CommerceClient::from_config(&cfg).is_err());
    }

    #[test]
    fn test_transport_names() {
        assert_eq!(CommerceClient::from_config(&config("local")).unwrap().name(), "direct");
        assert_eq!(
            CommerceClient::from_config(&config("production")).unwrap().name(),
            "proxied"
        );
    }
}

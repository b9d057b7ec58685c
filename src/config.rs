use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub orders_url: String,
    pub api_key: Option<String>,
    pub proxy_base_url: Option<String>,
    pub redact_customers: bool,
    pub page_delay_ms: u64,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("APP_PORT must be a number"),
            environment: env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            orders_url: env::var("COMMERCE_ORDERS_URL")
                .unwrap_or_else(|_| "https://api.squarespace.com/1.0/commerce/orders".to_string()),
            api_key: env::var("COMMERCE_API_KEY").ok(),
            proxy_base_url: env::var("PROXY_BASE_URL").ok(),
            redact_customers: env::var("REDACT_CUSTOMERS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            page_delay_ms: env::var("PAGE_DELAY_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("PAGE_DELAY_MS must be a number"),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "order-desk".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
        }
    }

    /// Local deployments talk to the upstream API directly and attach the
    /// bearer credential themselves; everywhere else the reverse proxy
    /// injects it.
    pub fn is_local(&self) -> bool {
        self.environment == "local"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

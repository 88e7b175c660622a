use parley_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to verify the session tokens of inbound requests
    pub api_secret: String,
    /// Base url of the external calendar service. When unset, calendar
    /// sync is disabled for the whole deployment.
    pub calendar_api_base_url: Option<String>,
    /// Credential for the external calendar service.
    pub calendar_api_secret: Option<String>,
    /// Webhook to which counterparty notifications are posted. When
    /// unset, notifications are dropped with a log line.
    pub notifier_webhook_url: Option<String>,
    /// Fallback event duration in minutes for events that are confirmed
    /// without an explicit end time.
    pub event_duration_minutes_fallback: i64,
}

impl Config {
    pub fn new() -> Self {
        let api_secret = match std::env::var("API_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find API_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("API_SECRET was generated and set to: {}", secret);
                secret
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let calendar_api_base_url = std::env::var("CALENDAR_API_BASE_URL").ok();
        let calendar_api_secret = std::env::var("CALENDAR_API_SECRET").ok();
        if calendar_api_base_url.is_some() && calendar_api_secret.is_none() {
            warn!("CALENDAR_API_BASE_URL is set but CALENDAR_API_SECRET is not. Calendar sync will be disabled.");
        }
        let notifier_webhook_url = std::env::var("NOTIFIER_WEBHOOK_URL").ok();

        let default_duration = "60";
        let event_duration_minutes_fallback = std::env::var("EVENT_DURATION_MINUTES_FALLBACK")
            .unwrap_or_else(|_| default_duration.into());
        let event_duration_minutes_fallback = match event_duration_minutes_fallback.parse::<i64>()
        {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                warn!(
                    "The given EVENT_DURATION_MINUTES_FALLBACK: {} is not valid, falling back to the default: {} minutes.",
                    event_duration_minutes_fallback, default_duration
                );
                default_duration.parse::<i64>().unwrap()
            }
        };

        Self {
            port,
            api_secret,
            calendar_api_base_url,
            calendar_api_secret,
            notifier_webhook_url,
            event_duration_minutes_fallback,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_the_event_duration_fallback_from_the_environment() {
        std::env::set_var("EVENT_DURATION_MINUTES_FALLBACK", "45");
        let config = Config::new();
        assert_eq!(config.event_duration_minutes_fallback, 45);

        std::env::set_var("EVENT_DURATION_MINUTES_FALLBACK", "not a number");
        let config = Config::new();
        assert_eq!(config.event_duration_minutes_fallback, 60);

        std::env::remove_var("EVENT_DURATION_MINUTES_FALLBACK");
        let config = Config::new();
        assert_eq!(config.event_duration_minutes_fallback, 60);
    }
}

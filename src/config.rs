use std::fmt;

use crate::error::{Result, ShippingError};

pub const PRODUCTION_BASE_URL: &str = "https://onlinetools.ups.com/ups.app/xml";
pub const INTEGRATION_BASE_URL: &str = "https://wwwcie.ups.com/ups.app/xml";

pub const SHIP_CONFIRM_ENDPOINT: &str = "/ShipConfirm";
pub const SHIP_ACCEPT_ENDPOINT: &str = "/ShipAccept";
pub const VOID_ENDPOINT: &str = "/Void";
pub const LABEL_RECOVERY_ENDPOINT: &str = "/LabelRecovery";

// Credentials sent in the AccessRequest document ahead of every request
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessCredentials {
    pub access_key: String,
    pub user_id: String,
    pub password: String,
}

impl AccessCredentials {
    pub fn new(
        access_key: impl Into<String>,
        user_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AccessCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessCredentials")
            .field("access_key", &self.access_key)
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Client configuration
#[derive(Debug, Clone)]
pub struct ShippingConfig {
    pub credentials: AccessCredentials,
    pub use_integration: bool,
    pub production_base_url: String,
    pub integration_base_url: String,
    /// Echoed back by the vendor in `TransactionReference/CustomerContext`.
    pub customer_context: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            credentials: AccessCredentials::default(),
            use_integration: false,
            production_base_url: PRODUCTION_BASE_URL.to_string(),
            integration_base_url: INTEGRATION_BASE_URL.to_string(),
            customer_context: None,
            timeout_ms: 30_000,
        }
    }
}

impl ShippingConfig {
    pub fn new(credentials: AccessCredentials) -> Self {
        Self {
            credentials,
            ..Default::default()
        }
    }

    pub fn with_integration(mut self, use_integration: bool) -> Self {
        self.use_integration = use_integration;
        self
    }

    pub fn with_customer_context(mut self, context: impl Into<String>) -> Self {
        self.customer_context = Some(context.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    // Points both environments at one base URL, mostly useful against a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.production_base_url = base_url.clone();
        self.integration_base_url = base_url;
        self
    }

    pub fn base_url(&self) -> &str {
        if self.use_integration {
            &self.integration_base_url
        } else {
            &self.production_base_url
        }
    }

    pub fn endpoint_url(&self, segment: &str) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), segment)
    }

    pub fn validate(&self) -> Result<()> {
        let credentials = &self.credentials;
        for (name, value) in [
            ("access_key", &credentials.access_key),
            ("user_id", &credentials.user_id),
            ("password", &credentials.password),
        ] {
            if value.trim().is_empty() {
                return Err(ShippingError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.base_url().is_empty() {
            return Err(ShippingError::Config("base URL must not be empty".to_string()));
        }
        Ok(())
    }
}

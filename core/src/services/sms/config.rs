//! Configuration for the verification-code lifecycle engine.
//!
//! All knobs are injected at construction; the engine never reads
//! process-wide state.

use std::collections::HashMap;

use crate::domain::entities::code::{DEFAULT_CODE_LENGTH, DEFAULT_VALID_MINUTES};

/// Code generation and validity settings.
#[derive(Debug, Clone)]
pub struct CodeConfig {
    /// Number of decimal digits in a generated code
    pub length: usize,
    /// Validity window in minutes
    pub valid_minutes: i64,
    /// Maximum failed verification attempts before the code is considered
    /// exhausted and must be replaced. `0` disables the limit.
    pub max_attempts: u32,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            valid_minutes: DEFAULT_VALID_MINUTES,
            max_attempts: 0,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Debug/dry-run mode: dispatch is rerouted to the errorlog gateway
    /// and the stored code can be read back via `peek_code`
    pub debug: bool,
    /// Whether send attempts are handed to the audit logger
    pub audit_log: bool,
    /// Code generation settings
    pub code: CodeConfig,
    /// Default message template; `{code}` and `{minutes}` are substituted
    pub content: String,
    /// Extra template variables merged into every message
    pub template_vars: HashMap<String, String>,
    /// Gateways tried, in order, when the caller supplies none
    pub default_gateways: Vec<String>,
    /// Explicit gateway name -> template identifier mapping
    pub gateway_templates: HashMap<String, String>,
    /// Use the OS CSPRNG for code generation instead of the default
    /// thread-local generator. The codes are short-lived nuisance values,
    /// but callers guarding higher-value actions should enable this.
    pub secure_rng: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            debug: false,
            audit_log: true,
            code: CodeConfig::default(),
            content: "Your verification code is {code}. It is valid for {minutes} minutes."
                .to_string(),
            template_vars: HashMap::new(),
            default_gateways: Vec::new(),
            gateway_templates: HashMap::new(),
            secure_rng: false,
        }
    }
}

//! Renderable verification-code message.

use std::collections::HashMap;

use super::config::SmsConfig;

/// Message input accepted by `request_send`.
///
/// Most callers pass overrides (usually empty) and let the engine build
/// the message from its configured template; a prebuilt message bypasses
/// the template path entirely.
#[derive(Debug, Clone)]
pub enum MessageData {
    Overrides(MessageOverrides),
    Prebuilt(CodeMessage),
}

impl Default for MessageData {
    fn default() -> Self {
        Self::Overrides(MessageOverrides::default())
    }
}

/// Per-call overrides for the configured message defaults.
#[derive(Debug, Clone, Default)]
pub struct MessageOverrides {
    /// Replaces the configured content template
    pub content: Option<String>,
    /// Template identifier used for every gateway, ignoring the
    /// configured per-gateway mapping
    pub template: Option<String>,
    /// Extra template variables, merged over the configured ones
    pub vars: HashMap<String, String>,
}

/// A fully resolved message ready for gateway dispatch.
///
/// Content-style gateways read `content()`; template-style gateways look
/// up their template id via `template_for()` and substitute `vars()`.
#[derive(Debug, Clone)]
pub struct CodeMessage {
    content: String,
    template: Option<String>,
    gateway_templates: HashMap<String, String>,
    vars: HashMap<String, String>,
}

impl CodeMessage {
    /// Builds the default code message from the engine configuration.
    pub fn from_config(code: &str, minutes: i64, overrides: &MessageOverrides, config: &SmsConfig) -> Self {
        let template_source = overrides.content.as_deref().unwrap_or(&config.content);
        let content = template_source
            .replace("{code}", code)
            .replace("{minutes}", &minutes.to_string());

        let mut vars = config.template_vars.clone();
        vars.extend(overrides.vars.clone());
        vars.insert("code".to_string(), code.to_string());

        Self {
            content,
            template: overrides.template.clone(),
            gateway_templates: config.gateway_templates.clone(),
            vars,
        }
    }

    /// Builds a caller-supplied message that bypasses the template path.
    pub fn prebuilt(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            template: None,
            gateway_templates: HashMap::new(),
            vars: HashMap::new(),
        }
    }

    /// Rendered content for content-style gateways.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Template identifier for the named gateway: the per-call override
    /// wins, otherwise the configured gateway -> template mapping.
    pub fn template_for(&self, gateway: &str) -> Option<&str> {
        self.template
            .as_deref()
            .or_else(|| self.gateway_templates.get(gateway).map(String::as_str))
    }

    /// Template variables, always including `code`.
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

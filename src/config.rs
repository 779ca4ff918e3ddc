pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const TEMPERATURE: f32 = 0.7;

#[derive(Clone, PartialEq, Debug)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: TEMPERATURE,
        }
    }
}

impl GeneratorConfig {
    /// Values baked in at build time win; the runtime environment is only
    /// consulted natively, since the browser has none.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            let baked = match name {
                "GEMINI_API_KEY" => option_env!("GEMINI_API_KEY"),
                "GEMINI_MODEL" => option_env!("GEMINI_MODEL"),
                "GEMINI_BASE_URL" => option_env!("GEMINI_BASE_URL"),
                _ => None,
            };
            baked
                .map(str::to_string)
                .or_else(|| std::env::var(name).ok())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();
        Self {
            api_key: non_blank("GEMINI_API_KEY"),
            model: non_blank("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: non_blank("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            temperature: defaults.temperature,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> String {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model_path
        )
    }
}

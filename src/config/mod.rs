// src/config/mod.rs
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str = "https://sme-vision-backend.onrender.com";
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";

/// Runtime settings. Defaults work out of the box; an optional
/// `sme-vision/settings.toml` under the user config dir and `SME_VISION_*`
/// environment variables override them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    pub speech_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            speech_command: DEFAULT_SPEECH_COMMAND.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("speech_command", DEFAULT_SPEECH_COMMAND)?;

        if let Some(config_dir) = dirs::config_dir() {
            builder = builder.add_source(
                config::File::from(config_dir.join("sme-vision").join("settings"))
                    .required(false),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SME_VISION"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_hosted_backend() {
        let settings = Settings::default();
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.speech_command, DEFAULT_SPEECH_COMMAND);
    }
}

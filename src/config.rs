use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Runtime configuration for the interactive layer.
///
/// Every field has a default, so an empty JSON object (or no configuration
/// at all) yields a working site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub relay: RelayConfig,
    pub navigation: NavigationConfig,
    pub parallax: ParallaxConfig,
    pub animation: AnimationConfig,
    pub form: FormConfig,
    pub loader: LoaderConfig,
    pub particles: ParticleConfig,
}

/// EmailJS relay identifiers. The public key is pre-shared and safe to ship
/// to the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            service_id: "service_atpcpd1".to_string(),
            template_id: "template_hjaqzck".to_string(),
            public_key: "hFmn3XCFmL0RACFF2".to_string(),
            to_email: "yuvarajramasamy1234@gmail.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Distance below the viewport top used to pick the active section (px)
    pub probe_offset: f64,
    /// Scroll offset after which the header is marked `scrolled` (px)
    pub header_threshold: f64,
    /// Scroll offset after which the back-to-top button is shown (px)
    pub back_to_top_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            probe_offset: 100.0,
            header_threshold: 50.0,
            back_to_top_threshold: 300.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub profile_factor: f64,
    pub profile_max_offset: f64,
    pub grid_factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            profile_factor: 0.3,
            profile_max_offset: 100.0,
            grid_factor: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Master switch; when false every animation jumps to its end state
    pub enabled: bool,
    /// Disable motion when the browser reports `prefers-reduced-motion`
    pub respect_reduced_motion: bool,
    /// Delay between the `load` event and the entrance cascade (ms)
    pub cascade_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            respect_reduced_motion: true,
            cascade_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long the success status stays visible (ms)
    pub status_hide_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            status_hide_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub tick_ms: u64,
    /// Upper bound (exclusive) of the random per-tick increment, in percent
    pub max_increment: f64,
    pub hide_delay_ms: u64,
    pub remove_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            max_increment: 15.0,
            hide_delay_ms: 500,
            remove_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub symbols: String,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            symbols: "{}[]()<>/*=+-;:&|%$#@".to_string(),
        }
    }
}

/// Hard ceiling on generated particles.
const MAX_PARTICLES: usize = 500;

impl Config {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).context("Failed to parse portfolio configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would leave a controller unable to work.
    pub fn validate(&self) -> Result<()> {
        let relay = &self.relay;
        for (name, value) in [
            ("relay.endpoint", &relay.endpoint),
            ("relay.service_id", &relay.service_id),
            ("relay.template_id", &relay.template_id),
            ("relay.public_key", &relay.public_key),
            ("relay.to_email", &relay.to_email),
        ] {
            if value.trim().is_empty() {
                bail!("{} must not be empty", name);
            }
        }

        let parallax = &self.parallax;
        if parallax.profile_factor < 0.0 || parallax.grid_factor < 0.0 {
            bail!("parallax factors must not be negative");
        }
        if parallax.profile_max_offset < 0.0 {
            bail!("parallax.profile_max_offset must not be negative");
        }

        if self.navigation.probe_offset < 0.0 {
            bail!("navigation.probe_offset must not be negative");
        }

        if self.loader.tick_ms == 0 {
            bail!("loader.tick_ms must be positive");
        }
        if self.loader.max_increment <= 0.0 {
            bail!("loader.max_increment must be positive");
        }

        if self.particles.count > MAX_PARTICLES {
            bail!(
                "particles.count must be at most {} (got {})",
                MAX_PARTICLES,
                self.particles.count
            );
        }
        if self.particles.count > 0 && self.particles.symbols.is_empty() {
            bail!("particles.symbols must not be empty");
        }

        Ok(())
    }
}

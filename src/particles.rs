//! Decorative floating code glyphs behind the hero.

use crate::config::ParticleConfig;
use crate::dom::Element;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub symbol: char,
    /// Horizontal position, percent of the container width
    pub left: f64,
    /// Animation delay in seconds
    pub delay: f64,
    /// Animation duration in seconds
    pub duration: f64,
}

const MAX_DELAY_SECS: f64 = 15.0;
const MIN_DURATION_SECS: f64 = 10.0;
const DURATION_SPREAD_SECS: f64 = 10.0;

pub fn generate<R: Rng>(rng: &mut R, config: &ParticleConfig) -> Vec<Particle> {
    let symbols: Vec<char> = config.symbols.chars().collect();
    (0..config.count)
        .filter_map(|_| {
            let symbol = *symbols.choose(&mut *rng)?;
            Some(Particle {
                symbol,
                left: rng.gen_range(0.0..100.0),
                delay: rng.gen_range(0.0..MAX_DELAY_SECS),
                duration: MIN_DURATION_SECS + rng.gen_range(0.0..DURATION_SPREAD_SECS),
            })
        })
        .collect()
}

/// Append one `div.particle` per particle to `container`.
pub fn render<E: Element>(container: &E, particles: &[Particle]) -> usize {
    let mut rendered = 0;
    for particle in particles {
        let Some(node) = container.append_new("div") else {
            continue;
        };
        node.set_class_name("particle");
        node.set_text(&particle.symbol.to_string());
        node.set_style("left", &format!("{}%", particle.left));
        node.set_style("animation-delay", &format!("{}s", particle.delay));
        node.set_style("animation-duration", &format!("{}s", particle.duration));
        rendered += 1;
    }
    debug!("Rendered {} particles", rendered);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_count_and_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ParticleConfig::default();
        let particles = generate(&mut rng, &config);

        assert_eq!(particles.len(), 20);
        for p in &particles {
            assert!(config.symbols.contains(p.symbol));
            assert!((0.0..100.0).contains(&p.left));
            assert!((0.0..15.0).contains(&p.delay));
            assert!((10.0..20.0).contains(&p.duration));
        }
    }

    #[test]
    fn test_generate_empty_symbols_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ParticleConfig {
            count: 5,
            symbols: String::new(),
        };
        assert!(generate(&mut rng, &config).is_empty());
    }

    #[test]
    fn test_render_appends_styled_nodes() {
        let container = MemoryElement::new("div");
        let particles = vec![Particle {
            symbol: '{',
            left: 12.5,
            delay: 3.0,
            duration: 14.0,
        }];

        assert_eq!(render(&container, &particles), 1);
        let node = &container.children()[0];
        assert!(node.has_class("particle"));
        assert_eq!(node.text(), "{");
        assert_eq!(node.style("left").as_deref(), Some("12.5%"));
        assert_eq!(node.style("animation-delay").as_deref(), Some("3s"));
        assert_eq!(node.style("animation-duration").as_deref(), Some("14s"));
    }
}

use anyhow::{ensure, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReplayBufferOptions {
    pub window_size: usize,
    pub batch_size: usize,
    pub num_unroll_steps: usize,
    pub td_steps: usize,
    pub discount: f32,
    pub seed: Option<u64>,
}

impl ReplayBufferOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.window_size > 0, "window_size must be greater than 0");
        ensure!(self.batch_size > 0, "batch_size must be greater than 0");
        ensure!(
            self.discount > 0.0 && self.discount <= 1.0,
            "discount must be in (0, 1] but was {}",
            self.discount
        );

        Ok(())
    }
}

impl Default for ReplayBufferOptions {
    fn default() -> Self {
        Self {
            window_size: 1_000_000,
            batch_size: 128,
            num_unroll_steps: 5,
            td_steps: 10,
            discount: 0.997,
            seed: None,
        }
    }
}

impl Config for ReplayBufferOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        let options = Self {
            window_size: config
                .get("window_size")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.window_size),
            batch_size: config
                .get("batch_size")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.batch_size),
            num_unroll_steps: config
                .get("num_unroll_steps")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.num_unroll_steps),
            td_steps: config
                .get("td_steps")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.td_steps),
            discount: config
                .get("discount")
                .and_then(|v| v.as_f32())
                .unwrap_or(defaults.discount),
            seed: config.get("seed").and_then(|v| v.as_u64()),
        };

        options.validate()?;

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::from_source("{}", "replay_buffer").unwrap();

        let options: ReplayBufferOptions = config.load().unwrap();

        assert_eq!(options, ReplayBufferOptions::default());
    }

    #[test]
    fn test_load_scoped_values() {
        let config = ConfigLoader::from_source(
            r#"
            td_steps = 3
            replay_buffer {
                window_size = 50
                batch_size = 32
                num_unroll_steps = 4
                discount = 0.5
                seed = 11
            }
            "#,
            "replay_buffer",
        )
        .unwrap();

        let options: ReplayBufferOptions = config.load().unwrap();

        assert_eq!(options.window_size, 50);
        assert_eq!(options.batch_size, 32);
        assert_eq!(options.num_unroll_steps, 4);
        assert_eq!(options.td_steps, 3);
        assert_abs_diff_eq!(options.discount, 0.5);
        assert_eq!(options.seed, Some(11));
    }

    #[test]
    fn test_load_rejects_invalid_discount() {
        let config = ConfigLoader::from_source("discount = 1.5", "replay_buffer").unwrap();

        assert!(config.load::<ReplayBufferOptions>().is_err());
    }

    #[test]
    fn test_validate() {
        let valid = ReplayBufferOptions::default();
        assert!(valid.validate().is_ok());

        let discount_one = ReplayBufferOptions {
            discount: 1.0,
            ..Default::default()
        };
        assert!(discount_one.validate().is_ok());

        let zero_window = ReplayBufferOptions {
            window_size: 0,
            ..Default::default()
        };
        assert!(zero_window.validate().is_err());

        let zero_batch = ReplayBufferOptions {
            batch_size: 0,
            ..Default::default()
        };
        assert!(zero_batch.validate().is_err());

        let zero_discount = ReplayBufferOptions {
            discount: 0.0,
            ..Default::default()
        };
        assert!(zero_discount.validate().is_err());
    }
}

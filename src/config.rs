//! Runtime configuration: compiled defaults, then `MINIPAC_*` environment variables, then command-line flags.

use std::path::PathBuf;
use std::str::FromStr;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::ConfigError;

/// Which game to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
    /// Cell-stepping game on the small digit board.
    Grid,
    /// Free movement on the full maze.
    #[default]
    Pixel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    /// Start playing without the code-entry screen.
    pub skip_gate: bool,
    /// Start with sound muted.
    pub muted: bool,
    /// Fixed seed for ghost behavior; random when unset.
    pub seed: Option<u64>,
    /// Append logs to this file instead of printing them on exit.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("MINIPAC_"))
    }

    /// Loads the configuration from the environment and applies `args` on top.
    pub fn load<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config: Config = Self::figment().extract().map_err(Box::new)?;
        config.apply_args(args)?;
        Ok(config)
    }

    /// Applies command-line flags, which take precedence over everything else.
    pub fn apply_args<I>(&mut self, args: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--grid" => self.variant = Variant::Grid,
                "--pixel" => self.variant = Variant::Pixel,
                "--skip-gate" => self.skip_gate = true,
                "--mute" => self.muted = true,
                "--variant" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.variant = Variant::from_str(&value).map_err(|_| ConfigError::InvalidValue {
                        argument: arg.clone(),
                        value,
                    })?;
                }
                "--seed" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    let seed = value.parse().map_err(|_| ConfigError::InvalidValue {
                        argument: arg.clone(),
                        value,
                    })?;
                    self.seed = Some(seed);
                }
                "--log-file" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.log_file = Some(PathBuf::from(value));
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(())
    }
}

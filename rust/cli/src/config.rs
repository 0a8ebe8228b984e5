use oddsmaker_engine::simulation::{DEFAULT_BATCHES, RemainderPolicy, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::str::FromStr;

pub const ENV_CONFIG: &str = "ODDSMAKER_CONFIG";
pub const ENV_ITERATIONS: &str = "ODDSMAKER_ITERATIONS";
pub const ENV_OPPONENTS: &str = "ODDSMAKER_OPPONENTS";
pub const ENV_BATCHES: &str = "ODDSMAKER_BATCHES";
pub const ENV_SEED: &str = "ODDSMAKER_SEED";
pub const ENV_PARALLEL: &str = "ODDSMAKER_PARALLEL";

/// Most opponents a single deck can deal to alongside a full board.
pub const MAX_OPPONENTS: usize = 22;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub iterations: usize,
    pub opponents: usize,
    pub batches: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            opponents: 1,
            batches: DEFAULT_BATCHES,
            seed: None,
            parallel: true,
        }
    }
}

impl Config {
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            batches: self.batches,
            seed: self.seed,
            parallel: self.parallel,
            remainder: RemainderPolicy::Drop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub iterations: ValueSource,
    pub opponents: ValueSource,
    pub batches: ValueSource,
    pub seed: ValueSource,
    pub parallel: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            iterations: ValueSource::Default,
            opponents: ValueSource::Default,
            batches: ValueSource::Default,
            seed: ValueSource::Default,
            parallel: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; these win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub iterations: Option<usize>,
    pub opponents: Option<usize>,
    pub batches: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(&Overrides::default())
}

/// Defaults, then the `ODDSMAKER_CONFIG` file, then environment variables,
/// then `overrides`; the result is validated once all layers are applied.
pub fn resolve(overrides: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(ENV_CONFIG) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.opponents {
            cfg.opponents = v;
            sources.opponents = ValueSource::File;
        }
        if let Some(v) = f.batches {
            cfg.batches = v;
            sources.batches = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.parallel {
            cfg.parallel = v;
            sources.parallel = ValueSource::File;
        }
    }

    if let Some(v) = parse_env(ENV_ITERATIONS)? {
        cfg.iterations = v;
        sources.iterations = ValueSource::Env;
    }
    if let Some(v) = parse_env(ENV_OPPONENTS)? {
        cfg.opponents = v;
        sources.opponents = ValueSource::Env;
    }
    if let Some(v) = parse_env(ENV_BATCHES)? {
        cfg.batches = v;
        sources.batches = ValueSource::Env;
    }
    if let Some(v) = parse_env(ENV_SEED)? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value(ENV_PARALLEL) {
        cfg.parallel = parse_bool(&v)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid {}: {}", ENV_PARALLEL, v)))?;
        sources.parallel = ValueSource::Env;
    }

    if let Some(v) = overrides.iterations {
        cfg.iterations = v;
        sources.iterations = ValueSource::Flag;
    }
    if let Some(v) = overrides.opponents {
        cfg.opponents = v;
        sources.opponents = ValueSource::Flag;
    }
    if let Some(v) = overrides.batches {
        cfg.batches = v;
        sources.batches = ValueSource::Flag;
    }
    if let Some(v) = overrides.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Flag;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    iterations: Option<usize>,
    #[serde(default)]
    opponents: Option<usize>,
    #[serde(default)]
    batches: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    parallel: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.iterations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: iterations must be >=1".into(),
        ));
    }
    if cfg.batches == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: batches must be >=1".into(),
        ));
    }
    if cfg.opponents > MAX_OPPONENTS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: opponents must be <={}",
            MAX_OPPONENTS
        )));
    }
    Ok(())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    env_value(key)
        .map(|v| {
            v.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, v)))
        })
        .transpose()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

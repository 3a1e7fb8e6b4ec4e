use herald_core::PubSubConfig;

pub const DEFAULT_PUBLISH_JOB: &str = "PublishJob";
pub const LOG_FORMAT_ENV: &str = "HERALD_LOG_FORMAT";

pub struct Config {
    pub pubsub: PubSubConfig,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut pubsub = PubSubConfig::from_lookup(&lookup)?;
        if pubsub.publish_job.is_none() {
            pubsub.publish_job = Some(DEFAULT_PUBLISH_JOB.to_string());
        }
        let log_format = lookup(LOG_FORMAT_ENV).unwrap_or_else(|| "text".into());
        Ok(Self { pubsub, log_format })
    }
}

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub media: MediaConfig,
    pub blog: BlogConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot holding every table
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    pub posts_per_page: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_hours: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("store.path", "data/store.json")?
            .set_default("media.path", "data/media")?
            .set_default("blog.posts_per_page", 10)?
            .set_default("session.ttl_hours", 24)?
            .add_source(config::File::with_name("blogicum").required(false))
            .add_source(config::Environment::with_prefix("BLOGICUM").separator("__"))
            .build()?;

        let config: Config = config.try_deserialize()?;
        if config.blog.posts_per_page == 0 {
            anyhow::bail!("blog.posts_per_page must be at least 1");
        }

        Ok(config)
    }

    pub fn session_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session.ttl_hours * 60 * 60)
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests(media_path: PathBuf) -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            store: StoreConfig {
                path: PathBuf::new(),
            },
            media: MediaConfig { path: media_path },
            blog: BlogConfig { posts_per_page: 10 },
            session: SessionConfig { ttl_hours: 24 },
        }
    }
}

#[derive(Clone, Debug)]
pub struct TaskboardConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub listen_addr: String,
}

impl TaskboardConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    // resolve settings through an arbitrary lookup so tests don't have to touch the process env
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://tasks.db".to_string());

        // one shared connection unless told otherwise
        let max_connections = lookup("MAX_CONNECTIONS")
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|val| *val > 0)
            .unwrap_or(1);

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            max_connections,
            listen_addr,
        }
    }
}

use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub initial_admin: Option<InitialAdminConfig>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse::<u64>()?,
        };
        let server = ServerConfig {
            port: match std::env::var("SERVER_PORT") {
                Ok(port) => port.parse::<u16>()?,
                Err(_) => ServerConfig::DEFAULT_PORT,
            },
        };
        let initial_admin = match (
            std::env::var("INITIAL_ADMIN_EMAIL"),
            std::env::var("INITIAL_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(InitialAdminConfig { email, password }),
            _ => None,
        };
        Ok(Self {
            database,
            redis,
            auth,
            server,
            initial_admin,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    /// Access token lifetime in seconds.
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8080;
}

/// Administrator created at startup when no account owns `email` yet.
pub struct InitialAdminConfig {
    pub email: String,
    pub password: String,
}

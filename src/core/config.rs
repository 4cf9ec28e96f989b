use dotenv::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub menu_path: Option<String>,
    pub sign_in_delay_ms: u64,
    pub reply_delay_min_secs: u64,
    pub reply_delay_max_secs: u64,
    pub session_poll_interval_ms: u64,
    pub monitor_interval_secs: u64,
    pub app_env: String,
}

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        // lo store locale viene creato al primo avvio se non esiste
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://companion.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            eprintln!("WARNING: JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        // path opzionale di un documento menu alternativo al fixture impacchettato
        let menu_path = env::var("MENU_PATH").ok();

        let sign_in_delay_ms = env::var("SIGN_IN_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid SIGN_IN_DELAY_MS: must be a positive number".to_string())?;

        let reply_delay_min_secs = env::var("REPLY_DELAY_MIN_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid REPLY_DELAY_MIN_SECS: must be a positive number".to_string())?;

        let reply_delay_max_secs = env::var("REPLY_DELAY_MAX_SECS")
            .unwrap_or_else(|_| "40".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid REPLY_DELAY_MAX_SECS: must be a positive number".to_string())?;

        if reply_delay_min_secs > reply_delay_max_secs {
            return Err(
                "Invalid reply delay window: REPLY_DELAY_MIN_SECS exceeds REPLY_DELAY_MAX_SECS"
                    .to_string(),
            );
        }

        let session_poll_interval_ms = env::var("SESSION_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid SESSION_POLL_INTERVAL_MS: must be a positive number".to_string())?;

        if session_poll_interval_ms == 0 {
            return Err("Invalid SESSION_POLL_INTERVAL_MS: must be greater than zero".to_string());
        }

        // 0 = monitoraggio disabilitato
        let monitor_interval_secs = env::var("MONITOR_INTERVAL_SECS")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid MONITOR_INTERVAL_SECS: must be a number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            menu_path,
            sign_in_delay_ms,
            reply_delay_min_secs,
            reply_delay_max_secs,
            session_poll_interval_ms,
            monitor_interval_secs,
            app_env,
        })
    }

    /// Stampa la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        println!("   Server Configuration:");
        println!("   Environment: {}", self.app_env);
        println!("   Server Address: {}:{}", self.server_host, self.server_port);
        println!("   Local Store: {}", self.database_url);
        println!(
            "   Menu Document: {}",
            self.menu_path.as_deref().unwrap_or("<bundled fixture>")
        );
        println!("   Sign-in Delay: {}ms", self.sign_in_delay_ms);
        println!(
            "   Reply Delay Window: {}-{}s",
            self.reply_delay_min_secs, self.reply_delay_max_secs
        );
        println!("   Session Poll Interval: {}ms", self.session_poll_interval_ms);
        println!("   JWT Secret: {}", if self.jwt_secret == DEFAULT_JWT_SECRET {
            "   USING DEFAULT (INSECURE!)"
        } else {
            "✓ Custom secret configured"
        });
    }
}

// src/config/consts.rs

// Net config
pub const DEFAULT_API_BASE: &str = "https://fantasy.premierleague.com/api";
pub const DEFAULT_STANDINGS_URL: &str = "https://www.bbc.co.uk/sport/football/premier-league/table";
pub const API_USER_AGENT: &str = concat!("pl_pipeline/", env!("CARGO_PKG_VERSION"));
// The standings host turns away non-browser clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Sink
pub const DEFAULT_SINK_DIR: &str = "out";
pub const DEFAULT_CREDENTIAL_FILE: &str = "service_account_key.json";
pub const DEFAULT_SHEET_ROWS: usize = 100;
pub const DEFAULT_SHEET_COLS: usize = 20;

// Destination table names
pub const SHEET_HISTORY: &str = "Historic_Seasons";
pub const SHEET_PLAYERS: &str = "Player_Static";
pub const SHEET_FIXTURES: &str = "Fixtures";
pub const SHEET_STANDINGS: &str = "Standings";
pub const SHEET_TEAMS: &str = "Teams";
pub const SHEET_GAMEWEEKS: &str = "Gameweeks";

// Local log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

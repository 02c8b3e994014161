pub mod env {
    pub const ENV_PREFIX: &str = "ENROLL";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_FILE: &str = "config/base";
pub const DEFAULT_APP_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}

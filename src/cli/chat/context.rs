use std::env;

/// The current user's identity, as supplied by the environment.
///
/// Stand-in for a hosted identity provider: the chat itself never depends on
/// it, but the saved goal record is attributed to this name.
pub struct UserContext {
    pub display_name: String,
}

impl UserContext {
    pub fn from_env() -> Self {
        let display_name = env::var("TANDEM_USER")
            .or_else(|_| env::var("USER"))
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "user".to_string());

        Self { display_name }
    }
}

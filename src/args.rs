use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wxa-identity")]
#[command(about = "Mini-program identity client: login code exchange, session signing and user lookup")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// App identifier override
    #[arg(long)]
    pub app_id: Option<String>,

    /// App secret override
    #[arg(long)]
    pub app_secret: Option<String>,

    /// Identity API base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Obtain a client-credential access token
    Token,

    /// Exchange a login code for openid and session key
    Login {
        #[arg(long)]
        code: String,
    },

    /// Fetch the user's phone number
    Phone {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        openid: String,
    },

    /// Fetch the user's encrypted key material
    UserKey {
        #[arg(long)]
        openid: String,
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        session_key: String,
    },

    /// Check that a session key is still valid (deprecated endpoint)
    CheckSession {
        #[arg(long)]
        openid: String,
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        session_key: String,
    },

    /// Print the HMAC-SHA256 signature of a message under a key
    Sign {
        #[arg(long)]
        key: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

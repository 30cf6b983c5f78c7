use std::net::SocketAddr;

use url::Url;

use common::prelude::Token;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // Base URL for generating share links, the public URL if
    //  configured, otherwise localhost on the listen port
    pub base_url: Url,
    // log level for http tracing
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(
        listen_addr: SocketAddr,
        public_url: Option<Url>,
        log_level: tracing::Level,
    ) -> Result<Self, ConfigError> {
        let base_url = match public_url {
            Some(url) => url,
            None => Url::parse(&format!("http://localhost:{}", listen_addr.port()))?,
        };
        tracing::info!(
            "Creating HTTP server Config: listen_addr={}, base_url={}",
            listen_addr,
            base_url
        );
        Ok(Self {
            listen_addr,
            base_url,
            log_level,
        })
    }

    /// Link to the page that reveals the secret behind `token`
    pub fn share_url(&self, token: &Token) -> Result<Url, ConfigError> {
        Ok(self.base_url.join(&share_path(token))?)
    }
}

pub fn share_path(token: &Token) -> String {
    format!("/get-secret/{}", token)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_defaults_to_localhost() {
        let config =
            Config::new("0.0.0.0:8080".parse().unwrap(), None, tracing::Level::INFO).unwrap();
        let token = Token::from("abc-_".to_string());
        assert_eq!(
            config.share_url(&token).unwrap().as_str(),
            "http://localhost:8080/get-secret/abc-_"
        );
    }

    #[test]
    fn test_share_url_uses_public_url() {
        let public_url = Url::parse("https://secrets.example.com").unwrap();
        let config = Config::new(
            "0.0.0.0:8080".parse().unwrap(),
            Some(public_url),
            tracing::Level::DEBUG,
        )
        .unwrap();
        let token = Token::from("abc".to_string());
        assert_eq!(
            config.share_url(&token).unwrap().as_str(),
            "https://secrets.example.com/get-secret/abc"
        );
    }

    #[test]
    fn test_log_level_is_kept() {
        let config =
            Config::new("0.0.0.0:8080".parse().unwrap(), None, tracing::Level::DEBUG).unwrap();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }
}

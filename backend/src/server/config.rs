//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use reqwest::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directory_base_url: Option<Url>,
    pub(crate) identity_base_url: Option<Url>,
    pub(crate) confirmation_message: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration binding the given address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            directory_base_url: None,
            identity_base_url: None,
            confirmation_message: None,
        }
    }

    /// Attach the base URLs of the external user directory and identity
    /// store.
    ///
    /// When absent, the server falls back to in-memory fixture adapters.
    pub fn with_backends(mut self, directory: Url, identity: Url) -> Self {
        self.directory_base_url = Some(directory);
        self.identity_base_url = Some(identity);
        self
    }

    /// Include a confirmation message in successful deletion responses.
    pub fn with_confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = Some(message.into());
        self
    }

    /// Return the socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

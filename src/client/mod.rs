//! External service clients derived from stored credentials.

mod github;

pub use github::{ClientFactory, ClientHandle, GitHubClient, GitHubClientFactory, GitHubConfig};

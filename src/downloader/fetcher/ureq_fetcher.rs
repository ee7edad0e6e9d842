use std::io::Read;
use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use super::{FileDownloader, Response};
use crate::config::FetchConfig;

pub struct UReqFetcher {
    agent: Agent,
    user_agent: String,
}

impl FileDownloader for UReqFetcher {
    fn fetch(&self, url: &str) -> Response {
        let request = self.agent.get(url).set("User-Agent", &self.user_agent);

        match request.call() {
            Ok(response) => {
                tracing::debug!(url, status = response.status(), "response received");

                let mut body = Vec::new();

                if let Err(err) = response.into_reader().read_to_end(&mut body) {
                    return Response::invalid_body(err.to_string());
                }

                Response::ok(body)
            }

            Err(ureq::Error::Status(code, response)) => {
                Response::status(code, response.status_text())
            }

            Err(ureq::Error::Transport(transport)) => {
                Response::network_error(transport.to_string())
            }
        }
    }
}

impl UReqFetcher {
    /// `timeout` bounds connecting and each socket read or write, not the whole
    /// transfer, so a slow but steady body still completes.
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();

        UReqFetcher {
            agent,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(&config.user_agent, config.timeout())
    }
}

impl Default for UReqFetcher {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

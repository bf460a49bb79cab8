//! eNom HTTP 请求方法

use crate::document::Document;
use crate::error::Result;
use crate::traits::ProviderErrorMapper;
use crate::utils::log_sanitizer::{redact_params, truncate_for_log};

use super::EnomProvider;
use super::commands::{Command, Params};
use super::error::ResponseShape;

impl EnomProvider {
    /// Base parameters carried by every call.
    fn base_params(&self) -> Params {
        vec![
            ("uid".to_string(), self.uid.clone()),
            ("pw".to_string(), self.password.clone()),
            ("responsetype".to_string(), "xml".to_string()),
        ]
    }

    /// Sends one command and parses the response body.
    ///
    /// The document is returned unclassified; callers pass it to [`Self::classify`].
    pub(crate) async fn execute(&self, command: &impl Command) -> Result<Document> {
        let mut params = self.base_params();
        params.push(("command".to_string(), command.name().to_string()));
        command.encode(&mut params);

        let method = command.method();
        log::debug!(
            "[{}] {} {} {}",
            self.provider_name(),
            method.as_str(),
            command.name(),
            redact_params(&params[3..])
        );

        let (status, body) = self.transport.send(method, self.endpoint, &params).await?;

        if status >= 400 {
            log::error!(
                "[{}] {} failed with HTTP {status}",
                self.provider_name(),
                command.name()
            );
            return Err(self.network_error(format!(
                "HTTP {status}: {}",
                truncate_for_log(&body)
            )));
        }

        Document::parse(&body).map_err(|e| {
            log::error!("[{}] XML parse failed: {e}", self.provider_name());
            log::error!(
                "[{}] Raw response: {}",
                self.provider_name(),
                truncate_for_log(&body)
            );
            self.parse_error(e)
        })
    }

    /// [`Self::execute`] followed by [`Self::classify`].
    pub(crate) async fn call(
        &self,
        command: &impl Command,
        shape: ResponseShape,
    ) -> Result<Document> {
        let doc = self.execute(command).await?;
        self.classify(&doc, shape)?;
        Ok(doc)
    }
}

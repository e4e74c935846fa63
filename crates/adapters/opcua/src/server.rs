//! OPC UA server lifecycle.

use greenhouse_domain::process_image::ProcessImage;
use opcua::server::prelude::{ServerBuilder, ServerEndpoint, ANONYMOUS_USER_TOKEN_ID};

use crate::address_space::OpcUaAddressSpace;
use crate::config::OpcUaConfig;
use crate::error::OpcUaError;

const ENDPOINT_ID: &str = "none";

/// An OPC UA server with the greenhouse variables installed.
///
/// The server is anonymous and unsecured. It runs its own runtime, so
/// [`GreenhouseServer::start`] moves it to a dedicated thread.
pub struct GreenhouseServer {
    server: opcua::server::prelude::Server,
    space: OpcUaAddressSpace,
    endpoint_url: String,
}

impl GreenhouseServer {
    /// Build the server and create every variable, seeded from `image`.
    ///
    /// # Errors
    ///
    /// Returns [`OpcUaError::InvalidConfig`] when the OPC UA stack rejects
    /// the configuration, or the error raised while creating the variables.
    pub fn build(config: &OpcUaConfig, image: &ProcessImage) -> Result<Self, OpcUaError> {
        let endpoint_url = config.endpoint_url();
        let application_uri = format!("urn:{}", config.namespace);

        let server = ServerBuilder::new()
            .application_name(config.application_name.as_str())
            .application_uri(application_uri.as_str())
            .product_uri(application_uri.as_str())
            .create_sample_keypair(true)
            .pki_dir(config.pki_dir.as_str())
            .host_and_port(config.host.as_str(), config.port)
            .discovery_urls(vec![endpoint_url.clone()])
            .discovery_server_url(None)
            .endpoint(
                ENDPOINT_ID,
                ServerEndpoint::new_none(
                    config.path.as_str(),
                    &[ANONYMOUS_USER_TOKEN_ID.to_string()],
                ),
            )
            .server()
            .ok_or(OpcUaError::InvalidConfig)?;

        let space = OpcUaAddressSpace::install(server.address_space(), config, image)?;

        Ok(Self {
            server,
            space,
            endpoint_url,
        })
    }

    /// Handle on the greenhouse variables, usable before and after start.
    #[must_use]
    pub fn address_space(&self) -> OpcUaAddressSpace {
        self.space.clone()
    }

    /// Run the server on its own thread until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`OpcUaError::Thread`] when the thread cannot be spawned.
    pub fn start(self) -> Result<std::thread::JoinHandle<()>, OpcUaError> {
        let Self {
            server,
            endpoint_url,
            ..
        } = self;
        std::thread::Builder::new()
            .name("opcua-server".to_string())
            .spawn(move || {
                tracing::info!(endpoint = %endpoint_url, "OPC UA server listening");
                server.run();
                tracing::warn!(endpoint = %endpoint_url, "OPC UA server stopped");
            })
            .map_err(OpcUaError::Thread)
    }
}

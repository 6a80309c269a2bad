//! Server state management.

use crate::bundle::BundleResolver;
use crate::config::ServerConfig;
use crate::protocol::ClientInfo;
use crate::tools::ToolRegistry;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct ServerState {
    pub config: ServerConfig,
    pub resolver: Arc<BundleResolver>,
    pub tools: ToolRegistry,
    initialized: AtomicBool,
    client_info: RwLock<Option<ClientInfo>>,
    request_count: AtomicU64,
}

impl ServerState {
    pub fn new(config: ServerConfig, resolver: Arc<BundleResolver>, tools: ToolRegistry) -> Self {
        Self {
            config,
            resolver,
            tools,
            initialized: AtomicBool::new(false),
            client_info: RwLock::new(None),
            request_count: AtomicU64::new(0),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn set_initialized(&self, client_info: ClientInfo) {
        *self.client_info.write() = Some(client_info);
        self.initialized.store(true, Ordering::SeqCst);
    }

    pub fn client_info(&self) -> Option<ClientInfo> {
        self.client_info.read().clone()
    }

    pub fn next_request_id(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }
}

pub struct ServerStateBuilder {
    config: Option<ServerConfig>,
    resolver: Option<Arc<BundleResolver>>,
}

impl ServerStateBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            resolver: None,
        }
    }

    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn resolver(mut self, resolver: Arc<BundleResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> Result<ServerState, &'static str> {
        let config = self.config.ok_or("Config is required")?;

        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(BundleResolver::new(&config.project_root)));

        let tools = crate::tools::create_registry(Arc::clone(&resolver));

        Ok(ServerState::new(config, resolver, tools))
    }
}

impl Default for ServerStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

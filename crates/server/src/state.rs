use service::ServiceContext;

/// Shared axum state: the service graph built at startup.
#[derive(Clone)]
pub struct ServerState {
    pub svc: ServiceContext,
}

impl ServerState {
    pub fn new(svc: ServiceContext) -> Self { Self { svc } }
}

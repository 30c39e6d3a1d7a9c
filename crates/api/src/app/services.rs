use std::sync::Arc;

use stockflow_infra::{AlertService, Ledger, TransferService};

/// Services shared by all handlers, injected as an `Extension`.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub transfers: TransferService,
    pub alerts: AlertService,
}

impl AppServices {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            transfers: TransferService::new(ledger.clone()),
            alerts: AlertService::new(ledger),
        }
    }
}

use accounting_service::{Catalog, ExpenseGenerator, ExpenseLedger, ExpenseOwner};
use anyhow::Result;
use audit_engine::{AuditAction, AuditLog, AuditLogGenerator, AuditTrail, TargetType};
use auth_identity::{reference_users, InMemoryUserRepository, User, UserDirectory};
use chrono::{DateTime, NaiveDate, Utc};
use config_engine::SgcConfig;
use genai_service::{FlowClient, GenAiService, HttpFlowClient};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};

/// Name recorded on audit entries when the request carries no known user
pub const SYSTEM_ACTOR: &str = "Sistema";

/// Main SGC_USB server state
#[derive(Clone)]
pub struct SgcServer {
    /// Server configuration
    pub config: Arc<SgcConfig>,
    /// Account administration
    pub users: UserDirectory,
    /// Expenses, approvals and the reference catalog
    pub ledger: Arc<ExpenseLedger>,
    /// Audit history, newest first
    pub audit: Arc<AuditTrail>,
    /// Remote flows: linear programming and branded PDF
    pub genai: GenAiService,
    pub started_at: DateTime<Utc>,
}

impl SgcServer {
    /// Create a server talking to the configured flow service over HTTP
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be built.
    pub fn new(config: SgcConfig) -> Result<Self> {
        let client = HttpFlowClient::new(&config.genai)?;
        Ok(Self::with_flow_client(config, Arc::new(client)))
    }

    /// Create a server over any flow client, generating the mock dataset
    pub fn with_flow_client(config: SgcConfig, client: Arc<dyn FlowClient>) -> Self {
        let mut rng = match config.mock_data.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (start, end) = (config.mock_data.start_date, config.mock_data.end_date);

        let catalog = Catalog::reference();
        let users = reference_users();
        let owners: Vec<ExpenseOwner> = users.iter().map(owner_of).collect();
        let names: Vec<String> = users.iter().map(|u| u.name.clone()).collect();

        let mut expenses = ExpenseGenerator::new(&catalog, &owners, start, end).generate(&mut rng);
        expenses.reverse();
        let logs = AuditLogGenerator::new(&names, start, end).generate(&mut rng);

        info!(
            users = users.len(),
            expenses = expenses.len(),
            audit_logs = logs.len(),
            seeded = config.mock_data.seed.is_some(),
            "Mock dataset generated"
        );

        let genai = GenAiService::new(client, &config.genai);
        Self {
            config: Arc::new(config),
            users: UserDirectory::new(Arc::new(InMemoryUserRepository::new(users))),
            ledger: Arc::new(ExpenseLedger::new(catalog, expenses)),
            audit: Arc::new(AuditTrail::new(logs)),
            genai,
            started_at: Utc::now(),
        }
    }

    /// The current calendar day used for date checks and file names
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Look up the user behind an `X-User-Id` header value
    pub async fn find_actor(&self, user_id: Option<&str>) -> Option<User> {
        let key = user_id.map(str::trim).filter(|k| !k.is_empty())?;
        match self.users.resolve(key).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Failed to resolve acting user");
                None
            }
        }
    }

    /// Display name for audit attribution, [`SYSTEM_ACTOR`] when unknown
    pub async fn actor_name(&self, user_id: Option<&str>) -> String {
        self.find_actor(user_id)
            .await
            .map_or_else(|| SYSTEM_ACTOR.to_string(), |u| u.name)
    }

    /// The owner of an expense submitted by the identified user
    ///
    /// # Errors
    /// `BadRequest` when no known user is identified.
    pub async fn expense_owner(&self, user_id: Option<&str>) -> ApiResult<ExpenseOwner> {
        self.find_actor(user_id)
            .await
            .as_ref()
            .map(owner_of)
            .ok_or_else(|| ApiError::bad_request("X-User-Id must identify an existing user"))
    }

    /// Record an audit entry on behalf of `actor`
    pub fn record(
        &self,
        actor: &str,
        action: AuditAction,
        target_type: TargetType,
        target_id: &str,
    ) -> AuditLog {
        self.audit.record(actor, action, target_type, target_id)
    }
}

fn owner_of(user: &User) -> ExpenseOwner {
    ExpenseOwner {
        name: user.name.clone(),
        department: user.department.clone(),
        sede: user.sede.clone(),
    }
}

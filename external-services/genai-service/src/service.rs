use crate::branded_pdf::{BrandedPdfOutput, BrandedPdfRequest, PdfDataUri};
use crate::client::FlowClient;
use crate::error::{GenAiError, GenAiResult};
use crate::linear_programming::{LinearProgram, LinearProgramSolution};
use config_engine::GenAiSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

/// Reachability of the flow service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Operational,
    Outage,
}

/// Typed access to the named flows
#[derive(Clone)]
pub struct GenAiService {
    client: Arc<dyn FlowClient>,
    linear_programming_flow: String,
    branded_pdf_flow: String,
}

impl GenAiService {
    pub fn new(client: Arc<dyn FlowClient>, settings: &GenAiSettings) -> Self {
        Self {
            client,
            linear_programming_flow: settings.linear_programming_flow.clone(),
            branded_pdf_flow: settings.branded_pdf_flow.clone(),
        }
    }

    /// # Errors
    /// `InvalidInput` for a malformed program, otherwise the flow's failure.
    pub async fn solve_linear_programming(&self, program: &LinearProgram) -> GenAiResult<LinearProgramSolution> {
        program.validate()?;

        let input = serde_json::to_value(program)
            .map_err(|e| GenAiError::InvalidInput(format!("Failed to encode program: {e}")))?;
        let output = self.client.run_flow(&self.linear_programming_flow, input).await?;
        let solution: LinearProgramSolution = serde_json::from_value(output)
            .map_err(|e| GenAiError::InvalidResponse(format!("Unexpected solver output: {e}")))?;

        info!(
            status = %solution.status,
            variables = program.variable_count(),
            "Linear program solved"
        );
        Ok(solution)
    }

    /// # Errors
    /// The flow's failure, or `InvalidResponse` when it does not return a PDF data URI.
    pub async fn generate_branded_pdf(&self, request: BrandedPdfRequest) -> GenAiResult<PdfDataUri> {
        let input = serde_json::to_value(&request)
            .map_err(|e| GenAiError::InvalidInput(format!("Failed to encode report: {e}")))?;
        let output = self.client.run_flow(&self.branded_pdf_flow, input).await?;
        let output: BrandedPdfOutput = serde_json::from_value(output)
            .map_err(|e| GenAiError::InvalidResponse(format!("Unexpected PDF output: {e}")))?;

        let uri = PdfDataUri::parse(&output.pdf_data_uri)?;
        info!(bytes = uri.as_str().len(), "Branded PDF generated");
        Ok(uri)
    }

    pub async fn system_status(&self) -> SystemStatus {
        match self.client.health().await {
            Ok(()) => SystemStatus::Operational,
            Err(e) => {
                warn!(error = %e, "Flow service health check failed");
                SystemStatus::Outage
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockFlowClient;
    use crate::linear_programming::{Inequality, Objective};
    use serde_json::json;

    fn program() -> LinearProgram {
        LinearProgram {
            objective: Objective::Minimize,
            objective_coeffs: vec![2.0, 3.0],
            constraint_coeffs: vec![vec![1.0, 1.0]],
            inequalities: vec![Inequality::GreaterOrEqual],
            rhs_values: vec![10.0],
        }
    }

    fn service(mock: MockFlowClient) -> GenAiService {
        GenAiService::new(Arc::new(mock), &GenAiSettings::default())
    }

    #[tokio::test]
    async fn test_solve_calls_configured_flow() {
        let mut mock = MockFlowClient::new();
        mock.expect_run_flow()
            .withf(|flow, input| flow == "solveLinearProgrammingFlow" && input["objective"] == "minimize")
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "status": "Optimal",
                    "optimal_value": 20.0,
                    "variable_values": {"x1": 10.0, "x2": 0.0},
                    "analysis": "El costo mínimo es 20."
                }))
            });

        let solution = service(mock).solve_linear_programming(&program()).await.unwrap();
        assert_eq!(solution.optimal_value, 20.0);
        assert_eq!(solution.variable_values["x1"], 10.0);
    }

    #[tokio::test]
    async fn test_invalid_program_never_reaches_flow() {
        let mut mock = MockFlowClient::new();
        mock.expect_run_flow().times(0);

        let mut lp = program();
        lp.rhs_values.clear();
        assert!(matches!(
            service(mock).solve_linear_programming(&lp).await,
            Err(GenAiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_solver_output() {
        let mut mock = MockFlowClient::new();
        mock.expect_run_flow()
            .returning(|_, _| Ok(json!({"status": "Optimal"})));
        assert!(matches!(
            service(mock).solve_linear_programming(&program()).await,
            Err(GenAiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_branded_pdf_validates_uri() {
        let mut mock = MockFlowClient::new();
        mock.expect_run_flow()
            .withf(|flow, input| flow == "generateBrandedPdfFlow" && input["reportData"] == "{}")
            .returning(|_, _| Ok(json!({"pdfDataUri": "data:application/pdf;base64,JVBERi0xLjc="})));
        let uri = service(mock)
            .generate_branded_pdf(BrandedPdfRequest {
                report_data: "{}".to_string(),
                brand_guidelines: Some(String::new()),
            })
            .await
            .unwrap();
        assert_eq!(uri.bytes().unwrap(), b"%PDF-1.7");

        let mut mock = MockFlowClient::new();
        mock.expect_run_flow()
            .returning(|_, _| Ok(json!({"pdfDataUri": "not a pdf"})));
        assert!(service(mock)
            .generate_branded_pdf(BrandedPdfRequest {
                report_data: "{}".to_string(),
                brand_guidelines: None,
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_system_status() {
        let mut up = MockFlowClient::new();
        up.expect_health().returning(|| Ok(()));
        assert_eq!(service(up).system_status().await, SystemStatus::Operational);

        let mut down = MockFlowClient::new();
        down.expect_health()
            .returning(|| Err(GenAiError::Request("connection refused".to_string())));
        assert_eq!(service(down).system_status().await, SystemStatus::Outage);
    }
}

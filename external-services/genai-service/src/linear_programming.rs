use crate::error::{GenAiError, GenAiResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Message shown when the solver flow fails without its own explanation
pub const SOLVE_FAILED_MESSAGE: &str = "Ocurrió un error al resolver el problema.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Inequality {
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "=")]
    Equal,
}

/// Linear program in matrix form: optimise `c·x` subject to `A x (<=|>=|=) b`, `x >= 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LinearProgram {
    pub objective: Objective,
    #[schema(example = json!([3.0, 5.0]))]
    pub objective_coeffs: Vec<f64>,
    #[schema(example = json!([[1.0, 0.0], [0.0, 2.0], [3.0, 2.0]]))]
    pub constraint_coeffs: Vec<Vec<f64>>,
    pub inequalities: Vec<Inequality>,
    #[schema(example = json!([4.0, 12.0, 18.0]))]
    pub rhs_values: Vec<f64>,
}

impl LinearProgram {
    pub fn variable_count(&self) -> usize {
        self.objective_coeffs.len()
    }

    /// Check that the problem is well formed before it is sent anywhere
    ///
    /// # Errors
    /// `InvalidInput` naming the first offending field.
    pub fn validate(&self) -> GenAiResult<()> {
        let vars = self.variable_count();
        if vars == 0 {
            return Err(invalid("objective_coeffs must contain at least one coefficient"));
        }
        if self.constraint_coeffs.is_empty() {
            return Err(invalid("at least one constraint is required"));
        }
        if let Some(row) = self.constraint_coeffs.iter().position(|r| r.len() != vars) {
            return Err(invalid(&format!(
                "constraint {} must have {vars} coefficients",
                row + 1
            )));
        }
        if self.inequalities.len() != self.constraint_coeffs.len() {
            return Err(invalid("inequalities must have one entry per constraint"));
        }
        if self.rhs_values.len() != self.constraint_coeffs.len() {
            return Err(invalid("rhs_values must have one entry per constraint"));
        }

        let all_finite = self
            .objective_coeffs
            .iter()
            .chain(self.constraint_coeffs.iter().flatten())
            .chain(self.rhs_values.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(invalid("coefficients must be finite numbers"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> GenAiError {
    GenAiError::InvalidInput(message.to_string())
}

/// Solver output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LinearProgramSolution {
    #[schema(example = "Optimal")]
    pub status: String,
    #[schema(example = 36.0)]
    pub optimal_value: f64,
    /// Keyed `x1`, `x2`, ...
    pub variable_values: BTreeMap<String, f64>,
    /// Interpretation of the result, in Spanish
    pub analysis: String,
}

/// Operations research model offered on the optimisation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OptimisationModel {
    #[schema(value_type = String, example = "linear-programming")]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    /// Whether the model can be solved; the rest are still in development
    pub available: bool,
}

pub const OPTIMISATION_MODELS: [OptimisationModel; 5] = [
    OptimisationModel {
        id: "linear-programming",
        name: "Modelo de Programación Lineal",
        description: "Defina la función objetivo y las restricciones para minimizar costos o maximizar el rendimiento.",
        available: true,
    },
    OptimisationModel {
        id: "transport",
        name: "Modelo de Transporte",
        description: "Optimice las rutas y costos de envío de materiales entre las diferentes sedes de la universidad.",
        available: false,
    },
    OptimisationModel {
        id: "assignment",
        name: "Modelo de Asignación",
        description: "Asigne de manera óptima los recursos (personal, equipo) a las tareas para minimizar el costo o tiempo total.",
        available: false,
    },
    OptimisationModel {
        id: "networks",
        name: "Algoritmo de Dijkstra para Redes",
        description: "Encuentre la ruta más corta o de menor costo entre dos puntos (nodos) en la red de la universidad.",
        available: false,
    },
    OptimisationModel {
        id: "pert-cpm",
        name: "Modelo PERT/CPM",
        description: "Planifique, programe y controle proyectos complejos para determinar la ruta crítica y gestionar los tiempos.",
        available: false,
    },
];

// Reference data: sedes, departments and expense categories
use crate::models::{Category, Department, Sede};
use serde::Serialize;

const SEDES: [(&str, &str); 3] = [
    ("sede-lp", "La Paz"),
    ("sede-cb", "Cochabamba"),
    ("sede-sc", "Santa Cruz"),
];

const DEPARTMENTS: [(&str, &str, &str); 7] = [
    ("d1", "Ingeniería de Sistemas", "La Paz"),
    ("d2", "Contaduría Pública", "La Paz"),
    ("d3", "Administración de Empresas", "Cochabamba"),
    ("d4", "Recursos Humanos", "Santa Cruz"),
    ("d5", "Psicología", "Cochabamba"),
    ("d6", "Derecho", "Santa Cruz"),
    ("d7", "Ciencias de la Educación", "La Paz"),
];

const CATEGORIES: [(&str, &str); 8] = [
    ("c1", "Transporte"),
    ("c2", "Material de Oficina"),
    ("c3", "Alimentación"),
    ("c4", "Software y Licencias"),
    ("c5", "Viáticos y Hospedaje"),
    ("c6", "Publicidad y Marketing"),
    ("c7", "Mantenimiento y Reparaciones"),
    ("c8", "Servicios Básicos"),
];

/// Settings catalog shown on the settings page and used to validate input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub sedes: Vec<Sede>,
    pub departments: Vec<Department>,
    pub categories: Vec<Category>,
}

impl Catalog {
    /// The university's campuses, departments and categories
    pub fn reference() -> Self {
        Self {
            sedes: SEDES
                .iter()
                .map(|(id, name)| Sede {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
            departments: DEPARTMENTS
                .iter()
                .map(|(id, name, sede)| Department {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    sede: (*sede).to_string(),
                })
                .collect(),
            categories: CATEGORIES
                .iter()
                .map(|(id, name)| Category {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn sede(&self, name: &str) -> Option<&Sede> {
        self.sedes.iter().find(|s| s.name == name)
    }

    /// Departments of one sede, or all of them
    pub fn departments_in(&self, sede: Option<&str>) -> Vec<Department> {
        self.departments
            .iter()
            .filter(|d| sede.map_or(true, |s| d.sede == s))
            .cloned()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

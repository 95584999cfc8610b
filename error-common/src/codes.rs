// Error codes implementation
// This module contains standardized error codes returned in API error bodies

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
    pub const UNKNOWN_FILTER_VALUE: &str = "VALIDATION_1004";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_2001";
    pub const CONFLICT: &str = "RESOURCE_2002";
    pub const INVALID_STATE: &str = "RESOURCE_2003";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_4001";
    pub const QUERY_FAILED: &str = "DB_4002";
}

pub mod upstream {
    pub const FLOW_FAILED: &str = "UPSTREAM_5001";
    pub const INVALID_RESPONSE: &str = "UPSTREAM_5002";
    pub const UNAVAILABLE: &str = "UPSTREAM_5003";
}

pub mod system {
    pub const INTERNAL: &str = "SYSTEM_9001";
    pub const CONFIGURATION: &str = "SYSTEM_9002";
}

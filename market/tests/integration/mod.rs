mod browse_flow;
mod error_cases;
mod role_gating;

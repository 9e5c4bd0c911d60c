//! Tool definitions module.
//!
//! One file per Intigriti endpoint. Each tool defines its params struct,
//! `request()` (path and query building), `handle()` (argument parsing and
//! dispatch), `to_tool()` (metadata) and `create_route()` (rmcp route).

pub mod common;
pub mod program_activities;
pub mod program_details;
pub mod program_domains;
pub mod programs;
pub mod rules_of_engagement;

pub use program_activities::{GetProgramActivitiesParams, GetProgramActivitiesTool};
pub use program_details::{GetProgramDetailsParams, GetProgramDetailsTool};
pub use program_domains::{GetProgramDomainsParams, GetProgramDomainsTool};
pub use programs::{GetProgramsParams, GetProgramsTool};
pub use rules_of_engagement::{GetRulesOfEngagementParams, GetRulesOfEngagementTool};

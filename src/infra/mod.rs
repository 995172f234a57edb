pub mod random_org_v1;
pub mod reqwest_http;

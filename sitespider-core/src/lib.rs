//! Crawl sessions, reports, and the request/status payloads for routers that
//! embed the crawler (see [`response`]).

pub mod crawl;
pub mod report;
pub mod response;

pub use crawl::{CrawlOptions, CrawlProgressCallback, SeedReport, execute_crawl, extract_url_path};
pub use report::{ReportFormat, generate_crawl_report, generate_json_report, render_report};
pub use response::{CrawlResponse, crawl_response, status_json};

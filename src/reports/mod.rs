//! Report rendering for analysis results: machine-readable JSON and a
//! human-readable HTML summary.
//!
//! Unlike the code generator, the HTML report keeps Tera's HTML
//! auto-escaping enabled: template values here land in markup, not in
//! source code.

use crate::analyzer::types::ExtendedAnalysisResult;
use crate::error::Result;
use once_cell::sync::OnceCell;
use tera::Tera;

const REPORT_TEMPLATE_NAME: &str = "report.html";
const REPORT_TEMPLATE: &str = include_str!("templates/report.html.tera");

static ENGINE: OnceCell<Tera> = OnceCell::new();

fn build_engine() -> std::result::Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)?;
    Ok(tera)
}

fn engine() -> Result<&'static Tera> {
    ENGINE.get_or_try_init(build_engine).map_err(Into::into)
}

/// Render the analysis result as pretty-printed JSON.
pub fn render_json(analysis: &ExtendedAnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Render the analysis result as a standalone HTML page.
pub fn render_html(analysis: &ExtendedAnalysisResult) -> Result<String> {
    let context = tera::Context::from_serialize(analysis)?;
    let rendered = engine()?.render(REPORT_TEMPLATE_NAME, &context)?;
    Ok(rendered)
}

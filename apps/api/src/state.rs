use std::sync::Arc;

use crate::config::Config;
use crate::generation::description::DescriptionSource;
use crate::generation::summary::TemplateSelector;
use crate::layout::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Per-experience description collaborator. `FallbackOnly` when no API key is set.
    pub describer: Arc<dyn DescriptionSource>,
    /// Summary template choice. `RandomTemplate` in production.
    pub template_selector: Arc<dyn TemplateSelector>,
    /// Page geometry for the rendered document.
    pub page_config: PageConfig,
}

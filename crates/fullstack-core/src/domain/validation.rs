use crate::domain::{
    entities::{ProjectConfig, RenderContext, StagedProject, TemplateCatalog, render_context},
    error::DomainError,
    value_objects::DatabaseEngine,
};

/// Centralized domain validation.
///
/// Entities enforce their own invariants at construction; the checks here
/// span several entities at once.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_staged_project(project: &StagedProject) -> Result<(), DomainError> {
        project.validate()
    }

    /// Check that `catalog` renders for every database engine.
    ///
    /// Resolves once per engine with a sample configuration and scans every
    /// selected entry's path and content for tokens the context lacks. Used
    /// on user-supplied catalogs so authoring defects surface before a
    /// project is requested.
    pub fn validate_catalog(catalog: &TemplateCatalog) -> Result<(), DomainError> {
        for engine in DatabaseEngine::ALL {
            let config = ProjectConfig::builder("catalog-check").database(engine).build()?;
            let ctx = RenderContext::from_config(&config);

            for entry in catalog.resolve(&config)? {
                let key = entry.key().as_str();
                for text in [entry.path_pattern(), entry.content().as_str()] {
                    if let Some(token) = render_context::placeholders(text)
                        .into_iter()
                        .find(|t| ctx.get(t).is_none())
                    {
                        return Err(DomainError::UnresolvedPlaceholder {
                            key: key.to_string(),
                            token: token.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

//! Error types for the CRM service.

/// Errors that can stop the service or an operator command.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] crm_auth::error::Error),

    #[error(transparent)]
    Model(#[from] crm_models::error::Error),

    #[error(transparent)]
    Web(#[from] crm_web::error::Error),

    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),

    #[error("Invalid value '{value}' for '{var}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("create-admin needs CRM_STORE=postgres")]
    NoPersistentStore,
}

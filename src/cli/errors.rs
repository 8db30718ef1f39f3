use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Expected WIDTHxHEIGHT with positive integers")]
    InvalidSize { size: String },

    #[error("Invalid reference box: {value}. Expected LEFT,TOP,RIGHT,BOTTOM with LEFT < RIGHT and TOP < BOTTOM")]
    InvalidBox { value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error(transparent)]
    Pipeline(#[from] spritekey::Error),
}
